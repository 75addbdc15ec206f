use crate::ids::BindingId;

/// Internal-consistency faults raised while linking.
///
/// Upstream passes are expected to hand over a validated graph, so none of
/// these are recoverable: they indicate that export tracing or a caller broke
/// an invariant, and continuing would silently change the shape of emitted
/// code.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
  /// An export name listed by a module does not trace to any binding.
  #[error("export `{name}` of module `{module}` does not resolve to a binding")]
  UnresolvedExport { module: String, name: String },

  /// Explicit re-exports form a cycle.
  #[error("circular re-export of `{name}` through module `{module}`")]
  CircularReexport { module: String, name: String },

  /// A namespace-only operation was applied to another kind of binding.
  #[error("binding {0:?} is not a namespace")]
  NotANamespace(BindingId),
}
