//! The binding variants tracked by the linker.
//!
//! Every referenceable name in the program is a [`Binding`]: a display name,
//! an `included` flag, and one of three [`BindingKind`]s. All mutation goes
//! through [`crate::LinkGraph`], which owns the bindings and the modules they
//! point into.

use crate::ids::BindingId;
use crate::ids::ExternalModuleId;
use crate::ids::ModuleId;
use crate::ordered::OrderedMap;

/// One occurrence of a binding's name in source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceSite {
  /// Module containing the identifier.
  pub module: ModuleId,
  /// The identifier's spelling at this site.
  pub name: String,
}

impl ReferenceSite {
  pub fn new(module: ModuleId, name: impl Into<String>) -> Self {
    Self {
      module,
      name: name.into(),
    }
  }
}

#[derive(Debug)]
pub struct Binding {
  pub(crate) name: String,
  pub(crate) included: bool,
  pub(crate) kind: BindingKind,
}

#[derive(Debug)]
pub enum BindingKind {
  Local(LocalBinding),
  External(ExternalBinding),
  Namespace(NamespaceBinding),
}

impl Binding {
  pub(crate) fn new(name: String, kind: BindingKind) -> Self {
    Self {
      name,
      included: false,
      kind,
    }
  }

  /// Current rendering name.
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn included(&self) -> bool {
    self.included
  }

  pub fn kind(&self) -> &BindingKind {
    &self.kind
  }

  pub fn is_external(&self) -> bool {
    matches!(self.kind, BindingKind::External(_))
  }

  /// True for module namespaces, including `import * as x` from an external
  /// module.
  pub fn is_namespace(&self) -> bool {
    match &self.kind {
      BindingKind::Namespace(_) => true,
      BindingKind::External(ext) => ext.is_namespace,
      BindingKind::Local(_) => false,
    }
  }

  /// Whether the binding is written to after its declaration. Imports and
  /// namespaces are read-only, so only locals can report true.
  pub fn is_reassigned(&self) -> bool {
    match &self.kind {
      BindingKind::Local(local) => local.reassigned,
      _ => false,
    }
  }

  pub fn as_external(&self) -> Option<&ExternalBinding> {
    match &self.kind {
      BindingKind::External(ext) => Some(ext),
      _ => None,
    }
  }

  pub fn as_namespace(&self) -> Option<&NamespaceBinding> {
    match &self.kind {
      BindingKind::Namespace(ns) => Some(ns),
      _ => None,
    }
  }

  pub(crate) fn as_namespace_mut(&mut self) -> Option<&mut NamespaceBinding> {
    match &mut self.kind {
      BindingKind::Namespace(ns) => Some(ns),
      _ => None,
    }
  }

  /// Flips `included`. Returns false if it was already set.
  pub(crate) fn mark_included(&mut self) -> bool {
    if self.included {
      return false;
    }
    self.included = true;
    true
  }

  pub(crate) fn kind_name(&self) -> &'static str {
    match self.kind {
      BindingKind::Local(_) => "local",
      BindingKind::External(_) => "external",
      BindingKind::Namespace(_) => "namespace",
    }
  }
}

/// A binding declared by a statement inside an in-graph module.
#[derive(Debug)]
pub struct LocalBinding {
  pub(crate) module: ModuleId,
  pub(crate) reassigned: bool,
}

impl LocalBinding {
  pub fn module(&self) -> ModuleId {
    self.module
  }
}

/// A name imported from a module outside the graph.
#[derive(Debug)]
pub struct ExternalBinding {
  pub(crate) module: ExternalModuleId,
  pub(crate) is_namespace: bool,
}

impl ExternalBinding {
  pub fn module(&self) -> ExternalModuleId {
    self.module
  }

  pub fn is_namespace(&self) -> bool {
    self.is_namespace
  }
}

/// The namespace object of an in-graph module.
#[derive(Debug)]
pub struct NamespaceBinding {
  pub(crate) module: ModuleId,
  pub(crate) needs_namespace_block: bool,
  pub(crate) referenced_early: bool,
  pub(crate) originals: OrderedMap<BindingId>,
  pub(crate) references: Option<Vec<ReferenceSite>>,
  pub(crate) export_name: Option<String>,
}

impl NamespaceBinding {
  pub(crate) fn new(module: ModuleId) -> Self {
    Self {
      module,
      needs_namespace_block: false,
      referenced_early: false,
      originals: OrderedMap::default(),
      references: None,
      export_name: None,
    }
  }

  pub fn module(&self) -> ModuleId {
    self.module
  }

  pub fn needs_namespace_block(&self) -> bool {
    self.needs_namespace_block
  }

  /// Whether some reference lives in a module that executes no later than
  /// the namespace's own module.
  pub fn referenced_early(&self) -> bool {
    self.referenced_early
  }

  /// The namespace declaration must be hoisted above its early readers.
  pub fn render_first(&self) -> bool {
    self.referenced_early
  }

  /// Export name to the binding it traces to, in export order.
  pub fn originals(&self) -> impl Iterator<Item = (&str, BindingId)> + '_ {
    self.originals.iter().map(|(name, id)| (name, *id))
  }

  pub fn original(&self, export_name: &str) -> Option<BindingId> {
    self.originals.get(export_name).copied()
  }

  pub fn references(&self) -> &[ReferenceSite] {
    self.references.as_deref().unwrap_or(&[])
  }

  pub fn export_name(&self) -> Option<&str> {
    self.export_name.as_deref()
  }
}
