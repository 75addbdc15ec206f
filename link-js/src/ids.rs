use serde::Deserialize;
use serde::Serialize;

macro_rules! arena_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub struct $name(u32);

    impl $name {
      pub fn raw(self) -> u32 {
        self.0
      }

      pub(crate) fn from_index(index: usize) -> Self {
        $name(u32::try_from(index).expect(concat!("too many entries for ", stringify!($name))))
      }

      pub(crate) fn index(self) -> usize {
        self.0 as usize
      }
    }
  };
}

arena_id!(
  /// An in-graph module registered with a [`crate::LinkGraph`].
  ModuleId
);

arena_id!(
  /// A module whose source lives outside the graph.
  ExternalModuleId
);

arena_id!(
  /// Any binding (local, external or namespace) owned by a [`crate::LinkGraph`].
  BindingId
);
