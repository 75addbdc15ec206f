//! Binding resolution, reachability and namespace synthesis for linking
//! JavaScript modules.
//!
//! A [`LinkGraph`] owns every module and binding of one build:
//! - local bindings declared inside in-graph modules;
//! - [`ExternalBinding`]s, one per name imported from a module left outside
//!   the graph;
//! - [`NamespaceBinding`]s, the objects produced by `import * as ns`.
//!
//! The surrounding bundler registers modules and their export records, then
//! drives a fixpoint traversal that calls [`LinkGraph::register_reference`]
//! and [`LinkGraph::include`] as it visits identifiers. Once the traversal
//! settles, every namespace returned by [`LinkGraph::namespaces_to_render`]
//! is printed with [`LinkGraph::render_block`].
//!
//! ```
//! use link_js::{LinkGraph, ReferenceSite, RenderOptions};
//!
//! let mut graph = LinkGraph::new();
//! let main = graph.add_module("src/main.js", 1);
//! let math = graph.add_module("src/math.js", 0);
//!
//! let add = graph.declare_local(math, "add");
//! graph.add_export(math, "add", add);
//! let total = graph.declare_local(math, "total");
//! graph.add_export(math, "total", total);
//! graph.mark_reassigned(total);
//!
//! // `import * as m from './math'` in main.js, used as `m.add(1, 2)`.
//! let ns = graph.namespace_of(math).unwrap();
//! graph.register_reference(ns, ReferenceSite::new(main, "m"));
//! assert!(graph.include(ns));
//! assert!(graph.binding(add).included());
//!
//! let text = graph.render_block(ns, &RenderOptions::default()).unwrap();
//! assert_eq!(
//!   text,
//!   "var m = /*#__PURE__*/Object.freeze({\n\tadd: add,\n\tget total () { return total; }\n});"
//! );
//! ```
//!
//! ## Determinism
//!
//! Namespace members follow export order: the module's own exports, then its
//! re-exports. A name declared twice keeps its first position and its last
//! target. A namespace's display name follows the last registered reference,
//! so it depends on the order in which the traversal visits aliases.

pub mod binding;
mod err;
pub mod graph;
pub mod ident;
mod ids;
pub mod module;
mod ordered;
pub mod render;

pub use binding::Binding;
pub use binding::BindingKind;
pub use binding::ExternalBinding;
pub use binding::LocalBinding;
pub use binding::NamespaceBinding;
pub use binding::ReferenceSite;
pub use err::LinkError;
pub use graph::LinkGraph;
pub use ids::BindingId;
pub use ids::ExternalModuleId;
pub use ids::ModuleId;
pub use module::ExternalModuleData;
pub use module::ModuleData;
pub use module::ModuleRef;
pub use module::Reexport;
pub use render::DeclarationKeyword;
pub use render::FreezeCall;
pub use render::MemberLayout;
pub use render::MemberValue;
pub use render::NamespaceLayout;
pub use render::PropertyKey;
pub use render::RenderOptions;
