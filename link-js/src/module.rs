use crate::ident::external_basename;
use crate::ident::module_basename;
use crate::ids::BindingId;
use crate::ids::ExternalModuleId;
use crate::ids::ModuleId;
use crate::ordered::OrderedMap;
use ahash::HashMap;

/// Where a re-export or `export *` points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModuleRef {
  Internal(ModuleId),
  External(ExternalModuleId),
}

/// `export { imported as exported } from source`. An `imported` name of `*`
/// re-exports the whole namespace of `source`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reexport {
  pub source: ModuleRef,
  pub imported: String,
}

/// Link-relevant facts about one in-graph module.
#[derive(Debug)]
pub struct ModuleData {
  pub(crate) id: String,
  pub(crate) exec_index: u32,
  pub(crate) exports: OrderedMap<BindingId>,
  pub(crate) reexports: OrderedMap<Reexport>,
  pub(crate) star_reexports: Vec<ModuleRef>,
  pub(crate) namespace: Option<BindingId>,
}

impl ModuleData {
  pub(crate) fn new(id: String, exec_index: u32) -> Self {
    Self {
      id,
      exec_index,
      exports: OrderedMap::default(),
      reexports: OrderedMap::default(),
      star_reexports: Vec::new(),
      namespace: None,
    }
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  /// Topological position in evaluation order; lower runs earlier.
  pub fn exec_index(&self) -> u32 {
    self.exec_index
  }

  pub fn basename(&self) -> String {
    module_basename(&self.id)
  }

  /// Names of the module's own exports, in declaration order.
  pub fn exports(&self) -> impl Iterator<Item = &str> + '_ {
    self.exports.keys()
  }

  pub fn local_export(&self, name: &str) -> Option<BindingId> {
    self.exports.get(name).copied()
  }

  /// Explicit `export { .. } from` records, in declaration order.
  pub fn reexports(&self) -> impl Iterator<Item = (&str, &Reexport)> + '_ {
    self.reexports.iter()
  }

  pub fn star_reexports(&self) -> &[ModuleRef] {
    &self.star_reexports
  }

  /// The namespace binding, once something has asked for it.
  pub fn namespace(&self) -> Option<BindingId> {
    self.namespace
  }
}

/// A module left outside the graph. Only its requested names are tracked.
#[derive(Debug)]
pub struct ExternalModuleData {
  pub(crate) id: String,
  pub(crate) name: String,
  pub(crate) used: bool,
  pub(crate) bindings: HashMap<String, BindingId>,
  name_suggestions: HashMap<String, usize>,
  most_common_suggestion: usize,
}

impl ExternalModuleData {
  pub(crate) fn new(id: String) -> Self {
    let name = external_basename(&id);
    Self {
      id,
      name,
      used: false,
      bindings: HashMap::default(),
      name_suggestions: HashMap::default(),
      most_common_suggestion: 0,
    }
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  /// Name used if the module needs a synthesized local alias.
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Whether any binding of this module was included. An unused external
  /// module may still need its import kept for side effects; that decision
  /// belongs to the bundler.
  pub fn used(&self) -> bool {
    self.used
  }

  pub fn binding(&self, name: &str) -> Option<BindingId> {
    self.bindings.get(name).copied()
  }

  pub fn suggestion_count(&self, candidate: &str) -> usize {
    self.name_suggestions.get(candidate).copied().unwrap_or(0)
  }

  /// Records that user code called this module `candidate`. The most
  /// frequently suggested name becomes the display name; ties keep the
  /// earlier winner. Returns true if the display name changed.
  pub fn suggest_name(&mut self, candidate: &str) -> bool {
    let count = self
      .name_suggestions
      .entry(candidate.to_string())
      .or_insert(0);
    *count += 1;
    if *count <= self.most_common_suggestion {
      return false;
    }
    self.most_common_suggestion = *count;
    if self.name == candidate {
      return false;
    }
    tracing::debug!(
      target: "link_js::external",
      module = %self.id,
      from = %self.name,
      to = candidate,
      "renamed external module"
    );
    self.name = candidate.to_string();
    true
  }
}
