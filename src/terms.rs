pub use fixed_map::Key as Term;
pub use fixed_map::Key;
use fixed_map::Map as FixedMap;

use crate::membership::MembershipFunction;

/// The labeled shapes of one variable. Keys are the variable's label enum,
/// so a label can only ever be registered once.
pub struct Terms<K: Term>(pub(crate) FixedMap<K, MembershipFunction>);

impl<K: Term> Default for Terms<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Term> Terms<K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    /// Registers `shape` under `key`, replacing any earlier shape for it.
    pub fn insert(&mut self, key: K, shape: MembershipFunction) -> &mut Self {
        self.0.insert(key, shape);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
