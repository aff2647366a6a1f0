use std::hash::Hash;

use crate::math::Bijection;

/// Hands out the names of composite states. Every key is named once, the preferred text is used
/// unless a different key already carries it, in which case primes are appended until the name
/// is unique. The identity of a composite state is always its key, never its name.
#[derive(Debug, Clone)]
pub(crate) struct UniqueNames<K: Hash + Eq> {
    names: Bijection<K, String>,
}

impl<K: Hash + Eq> Default for UniqueNames<K> {
    fn default() -> Self {
        Self {
            names: Bijection::new(),
        }
    }
}

impl<K: Hash + Eq> UniqueNames<K> {
    /// Returns the name of `key` if it was named before.
    pub(crate) fn get(&self, key: &K) -> Option<&String> {
        self.names.get_by_left(key)
    }

    /// Names `key`, preferring `preferred`. If `key` already has a name, that name is returned.
    pub(crate) fn assign(&mut self, key: K, preferred: String) -> String {
        if let Some(name) = self.names.get_by_left(&key) {
            return name.clone();
        }
        let mut name = preferred;
        while self.names.contains_right(&name) {
            name.push('\'');
        }
        self.names.insert(key, name.clone());
        name
    }
}
