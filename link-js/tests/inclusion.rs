use link_js::LinkGraph;
use link_js::ModuleRef;
use link_js::ReferenceSite;

#[test]
fn include_is_idempotent_for_locals() {
  let mut graph = LinkGraph::new();
  let module = graph.add_module("a.js", 0);
  let local = graph.declare_local(module, "a");

  assert!(!graph.binding(local).included());
  assert!(graph.include(local));
  for _ in 0..5 {
    assert!(!graph.include(local));
  }
  assert!(graph.binding(local).included());
}

#[test]
fn including_external_binding_marks_module_used() {
  let mut graph = LinkGraph::new();
  let react = graph.add_external_module("react");
  let lodash = graph.add_external_module("lodash");
  let use_state = graph.external_binding(react, "useState");
  let _debounce = graph.external_binding(lodash, "debounce");

  assert!(!graph.external_module(react).used());
  assert!(graph.include(use_state));
  assert!(!graph.include(use_state));
  assert!(graph.external_module(react).used());
  // Nothing from lodash was included.
  assert!(!graph.external_module(lodash).used());
}

#[test]
fn external_bindings_are_unique_per_module_and_name() {
  let mut graph = LinkGraph::new();
  let react = graph.add_external_module("react");
  let vue = graph.add_external_module("vue");

  let a = graph.external_binding(react, "default");
  let b = graph.external_binding(react, "default");
  let c = graph.external_binding(vue, "default");
  let star = graph.external_binding(react, "*");

  assert_eq!(a, b);
  assert_ne!(a, c);
  assert_ne!(a, star);
  assert!(graph.binding(a).is_external());
  assert!(!graph.binding(a).is_namespace());
  assert!(graph.binding(star).is_namespace());
  assert_eq!(graph.external_module(react).binding("default"), Some(a));
}

#[test]
fn empty_namespace_includes_nothing_else() {
  let mut graph = LinkGraph::new();
  let module = graph.add_module("empty.js", 0);
  let ns = graph.namespace_of(module).unwrap();

  assert_eq!(graph.namespace(ns).unwrap().originals().count(), 0);
  assert!(graph.include(ns));
  assert!(graph.namespace(ns).unwrap().needs_namespace_block());
  assert!(!graph.namespace(ns).unwrap().referenced_early());
}

#[test]
fn namespace_includes_single_export() {
  let mut graph = LinkGraph::new();
  let module = graph.add_module("one.js", 0);
  let value = graph.declare_local(module, "value");
  graph.add_export(module, "value", value);

  let ns = graph.namespace_of(module).unwrap();
  assert!(!graph.binding(value).included());
  assert!(graph.include(ns));
  assert!(graph.binding(value).included());
}

#[test]
fn namespace_includes_every_export_with_duplicates_overwritten() {
  let mut graph = LinkGraph::new();
  let lib = graph.add_module("lib.js", 0);
  let first = graph.declare_local(lib, "first");
  let second = graph.declare_local(lib, "second");
  let third = graph.declare_local(lib, "third");
  graph.add_export(lib, "x", first);
  graph.add_export(lib, "y", second);
  // Redeclaring `x` keeps its position but points it at `third`.
  graph.add_export(lib, "x", third);

  let ext = graph.add_external_module("ext");
  graph.add_reexport(lib, "z", ModuleRef::External(ext), "z");
  // Also re-exported; the own export still wins when tracing.
  graph.add_reexport(lib, "y", ModuleRef::External(ext), "y");

  let ns = graph.namespace_of(lib).unwrap();
  let ext_z = graph.external_module(ext).binding("z").unwrap();
  let originals: Vec<_> = graph
    .namespace(ns)
    .unwrap()
    .originals()
    .map(|(name, id)| (name.to_string(), id))
    .collect();
  assert_eq!(
    originals,
    vec![
      ("x".to_string(), third),
      ("y".to_string(), second),
      ("z".to_string(), ext_z),
    ]
  );

  assert!(graph.include(ns));
  assert!(graph.binding(third).included());
  assert!(graph.binding(second).included());
  assert!(graph.binding(ext_z).included());
  assert!(!graph.binding(first).included());
  assert!(graph.external_module(ext).used());
}

#[test]
fn namespace_side_effects_fire_once() {
  let mut graph = LinkGraph::new();
  let module = graph.add_module("m.js", 3);
  let importer = graph.add_module("main.js", 5);
  let value = graph.declare_local(module, "value");
  graph.add_export(module, "value", value);
  let ns = graph.namespace_of(module).unwrap();
  graph.register_reference(ns, ReferenceSite::new(importer, "m"));

  assert!(graph.include(ns));
  assert!(!graph.namespace(ns).unwrap().referenced_early());

  // A reference registered after inclusion does not recompute the flag.
  graph.register_reference(ns, ReferenceSite::new(module, "self"));
  assert!(!graph.include(ns));
  assert!(!graph.namespace(ns).unwrap().referenced_early());
  assert_eq!(graph.namespace(ns).unwrap().references().len(), 2);
}

#[test]
fn early_reference_boundary() {
  for (importer_index, expected) in [(2, true), (3, true), (4, false)] {
    let mut graph = LinkGraph::new();
    let module = graph.add_module("target.js", 3);
    let importer = graph.add_module("importer.js", importer_index);
    let ns = graph.namespace_of(module).unwrap();
    graph.register_reference(ns, ReferenceSite::new(importer, "t"));
    graph.include(ns);
    let ns_data = graph.namespace(ns).unwrap();
    assert_eq!(ns_data.referenced_early(), expected, "importer index {importer_index}");
    assert_eq!(ns_data.render_first(), expected);
    assert_eq!(graph.render_first(ns).unwrap(), expected);
  }
}

#[test]
fn early_reference_requires_any_one_site() {
  let mut graph = LinkGraph::new();
  let module = graph.add_module("target.js", 2);
  let late_a = graph.add_module("late_a.js", 7);
  let early = graph.add_module("early.js", 1);
  let late_b = graph.add_module("late_b.js", 9);
  let ns = graph.namespace_of(module).unwrap();
  graph.register_reference(ns, ReferenceSite::new(late_a, "t"));
  graph.register_reference(ns, ReferenceSite::new(early, "t"));
  graph.register_reference(ns, ReferenceSite::new(late_b, "t"));
  graph.include(ns);
  assert!(graph.namespace(ns).unwrap().referenced_early());
}

#[test]
fn namespace_without_references_is_not_early() {
  let mut graph = LinkGraph::new();
  let module = graph.add_module("target.js", 0);
  let ns = graph.namespace_of(module).unwrap();
  graph.include(ns);
  assert!(!graph.namespace(ns).unwrap().referenced_early());
}

#[test]
fn mutually_reexported_namespaces_terminate() {
  let mut graph = LinkGraph::new();
  let a = graph.add_module("a.js", 0);
  let b = graph.add_module("b.js", 1);
  let a_value = graph.declare_local(a, "aValue");
  graph.add_export(a, "aValue", a_value);
  let b_value = graph.declare_local(b, "bValue");
  graph.add_export(b, "bValue", b_value);
  // export * as b from './b' in a.js, and vice versa.
  graph.add_reexport(a, "b", ModuleRef::Internal(b), "*");
  graph.add_reexport(b, "a", ModuleRef::Internal(a), "*");

  let ns_a = graph.namespace_of(a).unwrap();
  let ns_b = graph.namespace(ns_a).unwrap().original("b").unwrap();
  assert_eq!(graph.module(b).namespace(), Some(ns_b));
  assert_eq!(graph.namespace(ns_b).unwrap().original("a"), Some(ns_a));

  assert!(graph.include(ns_a));
  assert!(graph.binding(ns_b).included());
  assert!(graph.binding(a_value).included());
  assert!(graph.binding(b_value).included());
  assert!(!graph.include(ns_b));
}

#[test]
fn namespaces_to_render_lists_included_namespaces() {
  let mut graph = LinkGraph::new();
  let a = graph.add_module("a.js", 0);
  let b = graph.add_module("b.js", 1);
  let ns_a = graph.namespace_of(a).unwrap();
  let _ns_b = graph.namespace_of(b).unwrap();
  assert_eq!(graph.namespaces_to_render().count(), 0);
  graph.include(ns_a);
  assert_eq!(graph.namespaces_to_render().collect::<Vec<_>>(), vec![ns_a]);
}

#[test]
fn namespace_of_is_memoized() {
  let mut graph = LinkGraph::new();
  let module = graph.add_module("src/date-utils.js", 0);
  let first = graph.namespace_of(module).unwrap();
  let second = graph.namespace_of(module).unwrap();
  assert_eq!(first, second);
  assert_eq!(graph.binding(first).name(), "dateUtils");
  assert!(graph.binding(first).is_namespace());
}
