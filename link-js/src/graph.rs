use crate::binding::Binding;
use crate::binding::BindingKind;
use crate::binding::ExternalBinding;
use crate::binding::LocalBinding;
use crate::binding::NamespaceBinding;
use crate::binding::ReferenceSite;
use crate::err::LinkError;
use crate::ids::BindingId;
use crate::ids::ExternalModuleId;
use crate::ids::ModuleId;
use crate::module::ExternalModuleData;
use crate::module::ModuleData;
use crate::module::ModuleRef;
use crate::module::Reexport;
use crate::ordered::OrderedMap;
use crate::render::NamespaceLayout;
use crate::render::RenderOptions;
use ahash::HashSet;

/// Owns every module, external module and binding of one build.
///
/// Entities are addressed by the `Copy` ids handed out at registration and
/// live as long as the graph. All linking state is monotonic: flags only go
/// from false to true and reference lists only grow, so the inclusion
/// traversal may call into the graph in any order and as often as it likes.
#[derive(Debug, Default)]
pub struct LinkGraph {
  modules: Vec<ModuleData>,
  external_modules: Vec<ExternalModuleData>,
  bindings: Vec<Binding>,
}

impl LinkGraph {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add_module(&mut self, id: impl Into<String>, exec_index: u32) -> ModuleId {
    let module = ModuleId::from_index(self.modules.len());
    self.modules.push(ModuleData::new(id.into(), exec_index));
    module
  }

  pub fn add_external_module(&mut self, id: impl Into<String>) -> ExternalModuleId {
    let module = ExternalModuleId::from_index(self.external_modules.len());
    self
      .external_modules
      .push(ExternalModuleData::new(id.into()));
    module
  }

  pub fn module(&self, module: ModuleId) -> &ModuleData {
    &self.modules[module.index()]
  }

  pub fn external_module(&self, module: ExternalModuleId) -> &ExternalModuleData {
    &self.external_modules[module.index()]
  }

  pub fn binding(&self, binding: BindingId) -> &Binding {
    &self.bindings[binding.index()]
  }

  pub fn modules(&self) -> impl Iterator<Item = (ModuleId, &ModuleData)> + '_ {
    self
      .modules
      .iter()
      .enumerate()
      .map(|(i, m)| (ModuleId::from_index(i), m))
  }

  pub fn external_modules(
    &self,
  ) -> impl Iterator<Item = (ExternalModuleId, &ExternalModuleData)> + '_ {
    self
      .external_modules
      .iter()
      .enumerate()
      .map(|(i, m)| (ExternalModuleId::from_index(i), m))
  }

  pub fn bindings(&self) -> impl Iterator<Item = (BindingId, &Binding)> + '_ {
    self
      .bindings
      .iter()
      .enumerate()
      .map(|(i, b)| (BindingId::from_index(i), b))
  }

  fn push_binding(&mut self, name: String, kind: BindingKind) -> BindingId {
    let id = BindingId::from_index(self.bindings.len());
    self.bindings.push(Binding::new(name, kind));
    id
  }

  pub fn declare_local(&mut self, module: ModuleId, name: impl Into<String>) -> BindingId {
    self.push_binding(
      name.into(),
      BindingKind::Local(LocalBinding {
        module,
        reassigned: false,
      }),
    )
  }

  /// Records the assignment-analysis fact that `binding` is written after its
  /// declaration. Only locals can be reassigned; returns false for other
  /// kinds.
  pub fn mark_reassigned(&mut self, binding: BindingId) -> bool {
    match &mut self.bindings[binding.index()].kind {
      BindingKind::Local(local) => {
        local.reassigned = true;
        true
      }
      _ => false,
    }
  }

  /// Renames a binding, e.g. after deconflicting.
  pub fn set_name(&mut self, binding: BindingId, name: impl Into<String>) {
    self.bindings[binding.index()].name = name.into();
  }

  /// `export { local as exported }`.
  pub fn add_export(&mut self, module: ModuleId, exported: impl Into<String>, local: BindingId) {
    self.modules[module.index()]
      .exports
      .insert(exported.into(), local);
  }

  /// `export { imported as exported } from source`.
  pub fn add_reexport(
    &mut self,
    module: ModuleId,
    exported: impl Into<String>,
    source: ModuleRef,
    imported: impl Into<String>,
  ) {
    self.modules[module.index()].reexports.insert(
      exported.into(),
      Reexport {
        source,
        imported: imported.into(),
      },
    );
  }

  /// `export * from source`.
  pub fn add_star_reexport(&mut self, module: ModuleId, source: ModuleRef) {
    let stars = &mut self.modules[module.index()].star_reexports;
    if !stars.contains(&source) {
      stars.push(source);
    }
  }

  /// The unique binding for `name` imported from an external module. `*`
  /// denotes the external module's namespace.
  pub fn external_binding(&mut self, module: ExternalModuleId, name: &str) -> BindingId {
    if let Some(existing) = self.external_modules[module.index()].binding(name) {
      return existing;
    }
    let id = self.push_binding(
      name.to_string(),
      BindingKind::External(ExternalBinding {
        module,
        is_namespace: name == "*",
      }),
    );
    self.external_modules[module.index()]
      .bindings
      .insert(name.to_string(), id);
    id
  }

  /// Names of the module's own exports, in declaration order.
  pub fn export_names(&self, module: ModuleId) -> Vec<String> {
    self.modules[module.index()]
      .exports()
      .map(str::to_string)
      .collect()
  }

  /// Explicitly re-exported names followed by the names `export *` makes
  /// visible from in-graph modules, without duplicates. `export *` never
  /// forwards `default`, and contributes nothing for external modules since
  /// their export lists are unknown.
  pub fn reexport_names(&self, module: ModuleId) -> Vec<String> {
    let mut names = OrderedMap::default();
    let mut seen = HashSet::default();
    seen.insert(module);
    self.collect_reexport_names(module, &mut seen, &mut names);
    names.keys().map(str::to_string).collect()
  }

  fn collect_reexport_names(
    &self,
    module: ModuleId,
    seen: &mut HashSet<ModuleId>,
    out: &mut OrderedMap<()>,
  ) {
    let data = &self.modules[module.index()];
    for name in data.reexports.keys() {
      out.insert(name.to_string(), ());
    }
    for source in &data.star_reexports {
      let ModuleRef::Internal(source) = *source else {
        continue;
      };
      if !seen.insert(source) {
        continue;
      }
      for name in self.modules[source.index()].exports() {
        if name != "default" {
          out.insert(name.to_string(), ());
        }
      }
      let mut nested = OrderedMap::default();
      self.collect_reexport_names(source, seen, &mut nested);
      for name in nested.keys() {
        if name != "default" {
          out.insert(name.to_string(), ());
        }
      }
    }
  }

  /// Follows export and re-export records from `module` to the binding that
  /// ultimately declares `name`. Re-exports from external modules resolve to
  /// the matching [`ExternalBinding`], creating it if needed; re-exporting
  /// `*` from an in-graph module resolves to its namespace.
  ///
  /// Returns `Ok(None)` if nothing exports `name`.
  pub fn trace_export(
    &mut self,
    module: ModuleId,
    name: &str,
  ) -> Result<Option<BindingId>, LinkError> {
    let mut stack = HashSet::default();
    self.trace_export_inner(module, name, &mut stack)
  }

  fn trace_export_inner(
    &mut self,
    module: ModuleId,
    name: &str,
    stack: &mut HashSet<(ModuleId, String)>,
  ) -> Result<Option<BindingId>, LinkError> {
    let key = (module, name.to_string());
    if !stack.insert(key.clone()) {
      return Err(LinkError::CircularReexport {
        module: self.modules[module.index()].id.clone(),
        name: name.to_string(),
      });
    }
    let result = self.trace_export_step(module, name, stack);
    stack.remove(&key);
    result
  }

  fn trace_export_step(
    &mut self,
    module: ModuleId,
    name: &str,
    stack: &mut HashSet<(ModuleId, String)>,
  ) -> Result<Option<BindingId>, LinkError> {
    let data = &self.modules[module.index()];
    if let Some(local) = data.local_export(name) {
      return Ok(Some(local));
    }

    if let Some(reexport) = data.reexports.get(name).cloned() {
      return match reexport.source {
        ModuleRef::External(ext) => Ok(Some(self.external_binding(ext, &reexport.imported))),
        ModuleRef::Internal(source) if reexport.imported == "*" => {
          self.namespace_of(source).map(Some)
        }
        ModuleRef::Internal(source) => {
          match self.trace_export_inner(source, &reexport.imported, stack)? {
            Some(original) => Ok(Some(original)),
            None => Err(LinkError::UnresolvedExport {
              module: self.modules[source.index()].id.clone(),
              name: reexport.imported,
            }),
          }
        }
      };
    }

    if name == "default" {
      return Ok(None);
    }

    let stars = self.modules[module.index()].star_reexports.clone();
    for source in stars {
      match source {
        ModuleRef::Internal(source) => {
          // Star cycles just contribute nothing.
          if stack.contains(&(source, name.to_string())) {
            continue;
          }
          if let Some(original) = self.trace_export_inner(source, name, stack)? {
            return Ok(Some(original));
          }
        }
        ModuleRef::External(ext) => return Ok(Some(self.external_binding(ext, name))),
      }
    }
    Ok(None)
  }

  /// The namespace binding of `module`, created on first request.
  ///
  /// Creation snapshots every exported and re-exported name of the module,
  /// traced to its declaring binding, so it must happen after all modules
  /// are linked. The snapshot is never updated afterwards. A name that does
  /// not trace is an upstream inconsistency and fails the build.
  pub fn namespace_of(&mut self, module: ModuleId) -> Result<BindingId, LinkError> {
    if let Some(existing) = self.modules[module.index()].namespace {
      return Ok(existing);
    }
    let name = self.modules[module.index()].basename();
    // Registered before tracing so namespaces that re-export each other
    // resolve to the same binding.
    let id = self.push_binding(name, BindingKind::Namespace(NamespaceBinding::new(module)));
    self.modules[module.index()].namespace = Some(id);

    let originals = match self.trace_namespace_members(module) {
      Ok(originals) => originals,
      Err(err) => {
        // Leave no half-built namespace behind: a later call traces again and
        // reports the same error.
        self.modules[module.index()].namespace = None;
        return Err(err);
      }
    };

    tracing::debug!(
      target: "link_js::namespace",
      module = %self.modules[module.index()].id,
      binding = id.raw(),
      exports = originals.len(),
      "created namespace binding"
    );
    if let Some(ns) = self.bindings[id.index()].as_namespace_mut() {
      ns.originals = originals;
    }
    Ok(id)
  }

  fn trace_namespace_members(
    &mut self,
    module: ModuleId,
  ) -> Result<OrderedMap<BindingId>, LinkError> {
    let mut names = self.export_names(module);
    names.extend(self.reexport_names(module));

    let mut originals = OrderedMap::default();
    for name in names {
      match self.trace_export(module, &name)? {
        Some(original) => {
          originals.insert(name, original);
        }
        None => {
          return Err(LinkError::UnresolvedExport {
            module: self.modules[module.index()].id.clone(),
            name,
          })
        }
      }
    }
    Ok(originals)
  }

  pub fn namespace(&self, binding: BindingId) -> Result<&NamespaceBinding, LinkError> {
    self.bindings[binding.index()]
      .as_namespace()
      .ok_or(LinkError::NotANamespace(binding))
  }

  /// Names under which a System-format chunk exports this namespace itself.
  pub fn set_namespace_export_name(
    &mut self,
    binding: BindingId,
    export_name: impl Into<String>,
  ) -> Result<(), LinkError> {
    let ns = self.bindings[binding.index()]
      .as_namespace_mut()
      .ok_or(LinkError::NotANamespace(binding))?;
    ns.export_name = Some(export_name.into());
    Ok(())
  }

  /// Records that `site` refers to `binding`.
  ///
  /// - Locals ignore it.
  /// - External `default` and `*` imports forward the site's spelling to
  ///   their module as a naming suggestion.
  /// - Namespaces remember the site and take its spelling as their display
  ///   name, so the last registered reference decides the name.
  pub fn register_reference(&mut self, binding: BindingId, site: ReferenceSite) {
    let data = &mut self.bindings[binding.index()];
    tracing::trace!(
      target: "link_js::reference",
      binding = binding.raw(),
      kind = data.kind_name(),
      module = site.module.raw(),
      name = %site.name,
      "registered reference"
    );
    match &mut data.kind {
      BindingKind::Local(_) => {}
      BindingKind::External(ext) => {
        if data.name == "default" || data.name == "*" {
          self.external_modules[ext.module.index()].suggest_name(&site.name);
        }
      }
      BindingKind::Namespace(ns) => {
        data.name = site.name.clone();
        ns.references.get_or_insert_with(Vec::new).push(site);
      }
    }
  }

  /// Marks `binding` as reachable.
  ///
  /// Returns true only for the call that flips the binding's `included`
  /// flag; every later call is a no-op. On that first call:
  /// - an external binding marks its module as used;
  /// - a namespace records whether it is referenced early and includes every
  ///   binding it exposes, since any property may be read dynamically.
  pub fn include(&mut self, binding: BindingId) -> bool {
    let mut pending = Vec::new();
    let transitioned = self.include_one(binding, &mut pending);
    while let Some(next) = pending.pop() {
      self.include_one(next, &mut pending);
    }
    transitioned
  }

  fn include_one(&mut self, id: BindingId, pending: &mut Vec<BindingId>) -> bool {
    let binding = &mut self.bindings[id.index()];
    if !binding.mark_included() {
      return false;
    }
    tracing::debug!(
      target: "link_js::include",
      binding = id.raw(),
      kind = binding.kind_name(),
      name = %binding.name,
      "included binding"
    );
    match &mut binding.kind {
      BindingKind::Local(_) => {}
      BindingKind::External(ext) => {
        self.external_modules[ext.module.index()].used = true;
      }
      BindingKind::Namespace(ns) => {
        ns.needs_namespace_block = true;
        let modules = &self.modules;
        let own_index = modules[ns.module.index()].exec_index;
        ns.referenced_early = ns
          .references()
          .iter()
          .any(|site| modules[site.module.index()].exec_index <= own_index);
        pending.extend(ns.originals.values().rev().copied());
      }
    }
    true
  }

  /// Whether the namespace declaration must be emitted ahead of the code
  /// that references it early.
  pub fn render_first(&self, binding: BindingId) -> Result<bool, LinkError> {
    Ok(self.namespace(binding)?.render_first())
  }

  /// Included namespaces that need a declaration block, in creation order.
  pub fn namespaces_to_render(&self) -> impl Iterator<Item = BindingId> + '_ {
    self.bindings().filter_map(|(id, binding)| {
      binding
        .as_namespace()
        .filter(|ns| ns.needs_namespace_block())
        .map(|_| id)
    })
  }

  /// The statements declaring the namespace object. Pure: the same state and
  /// options always produce the same text.
  pub fn render_block(
    &self,
    binding: BindingId,
    options: &RenderOptions,
  ) -> Result<String, LinkError> {
    Ok(NamespaceLayout::plan(self, binding, options)?.to_string())
  }
}
