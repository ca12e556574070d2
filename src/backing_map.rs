//! The capability trait a slot handle operates through, plus adapters
//! for the std and hashbrown maps.
//!
//! `get_or_insert_with` and `try_get_or_insert_with` carry the laziness
//! contract: the factory must not run when the key is present. Each
//! adapter delegates to its backend's native entry API so the contract
//! holds by construction rather than by a separate lookup.

use core::hash::{BuildHasher, Hash};
use std::collections::{btree_map, hash_map, BTreeMap, HashMap};

/// A mapping from keys to values, reduced to the operations a slot
/// handle needs. Keys are unique; insertion order is not significant.
///
/// Borrowed-key (`Borrow<Q>`) lookups are deliberately absent: the
/// handle owns its key outright, so every lookup passes `&Self::Key`.
pub trait BackingMap {
    type Key;
    type Value;

    /// Borrow the stored value, if present.
    fn get(&self, key: &Self::Key) -> Option<&Self::Value>;

    /// Mutably borrow the stored value, if present.
    fn get_mut(&mut self, key: &Self::Key) -> Option<&mut Self::Value>;

    /// Presence query; no mutation.
    fn contains_key(&self, key: &Self::Key) -> bool;

    /// Remove and return the stored value, if present.
    fn remove(&mut self, key: &Self::Key) -> Option<Self::Value>;

    /// If absent, insert `default(&key)`; borrow whatever is now
    /// stored. The factory must not run when the key is present.
    fn get_or_insert_with<F>(&mut self, key: Self::Key, default: F) -> &mut Self::Value
    where
        F: FnOnce(&Self::Key) -> Self::Value;

    /// Fallible variant of [`get_or_insert_with`]: a factory error
    /// propagates unchanged and leaves the map unmodified. The factory
    /// must not run when the key is present.
    ///
    /// [`get_or_insert_with`]: BackingMap::get_or_insert_with
    fn try_get_or_insert_with<F, E>(
        &mut self,
        key: Self::Key,
        default: F,
    ) -> Result<&mut Self::Value, E>
    where
        F: FnOnce(&Self::Key) -> Result<Self::Value, E>;
}

impl<K, V, S> BackingMap for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;

    fn get(&self, key: &K) -> Option<&V> {
        HashMap::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        HashMap::get_mut(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        HashMap::contains_key(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        HashMap::remove(self, key)
    }

    fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce(&K) -> V,
    {
        self.entry(key).or_insert_with_key(default)
    }

    fn try_get_or_insert_with<F, E>(&mut self, key: K, default: F) -> Result<&mut V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        match self.entry(key) {
            hash_map::Entry::Occupied(o) => Ok(o.into_mut()),
            hash_map::Entry::Vacant(v) => {
                let value = default(v.key())?;
                Ok(v.insert(value))
            }
        }
    }
}

impl<K, V> BackingMap for BTreeMap<K, V>
where
    K: Ord,
{
    type Key = K;
    type Value = V;

    fn get(&self, key: &K) -> Option<&V> {
        BTreeMap::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        BTreeMap::get_mut(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        BTreeMap::contains_key(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        BTreeMap::remove(self, key)
    }

    fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce(&K) -> V,
    {
        self.entry(key).or_insert_with_key(default)
    }

    fn try_get_or_insert_with<F, E>(&mut self, key: K, default: F) -> Result<&mut V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        match self.entry(key) {
            btree_map::Entry::Occupied(o) => Ok(o.into_mut()),
            btree_map::Entry::Vacant(v) => {
                let value = default(v.key())?;
                Ok(v.insert(value))
            }
        }
    }
}

impl<K, V, S> BackingMap for hashbrown::HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;

    fn get(&self, key: &K) -> Option<&V> {
        hashbrown::HashMap::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        hashbrown::HashMap::get_mut(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        hashbrown::HashMap::contains_key(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        hashbrown::HashMap::remove(self, key)
    }

    fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce(&K) -> V,
    {
        self.entry(key).or_insert_with_key(default)
    }

    fn try_get_or_insert_with<F, E>(&mut self, key: K, default: F) -> Result<&mut V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        match self.entry(key) {
            hashbrown::hash_map::Entry::Occupied(o) => Ok(o.into_mut()),
            hashbrown::hash_map::Entry::Vacant(v) => {
                let value = default(v.key())?;
                Ok(v.insert(value))
            }
        }
    }
}
