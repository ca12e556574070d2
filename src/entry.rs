//! The slot handle and its construction surface.

use crate::backing_map::BackingMap;
use core::fmt;

/// A handle bound to exactly one (map, key) pair.
///
/// Chainable operations (`and_modify`, `retain_if`, `replace*`) hand
/// the same handle back; value-surfacing operations (`or_insert*`,
/// `remove`, `get`, `get_mut`) consume it and end the map borrow.
/// Every operation re-reads presence from the live map, so steps of a
/// chain compose as if each were applied sequentially to the real map
/// state, because they are.
pub struct Entry<'a, M: BackingMap> {
    map: &'a mut M,
    key: M::Key,
}

impl<'a, M: BackingMap> Entry<'a, M> {
    pub(crate) fn new(map: &'a mut M, key: M::Key) -> Self {
        Self { map, key }
    }

    /// Borrow the bound key.
    pub fn key(&self) -> &M::Key {
        &self.key
    }

    /// Recover the bound key, ending the handle.
    pub fn into_key(self) -> M::Key {
        self.key
    }

    /// Whether the key is currently present. Query only.
    pub fn exists(&self) -> bool {
        self.map.contains_key(&self.key)
    }

    /// Borrow the current value, or `None` if the key is absent.
    pub fn get(self) -> Option<&'a M::Value> {
        let Entry { map, key } = self;
        map.get(&key)
    }

    /// Mutably borrow the current value, or `None` if the key is absent.
    pub fn get_mut(self) -> Option<&'a mut M::Value> {
        let Entry { map, key } = self;
        map.get_mut(&key)
    }

    /// Remove the key if present, returning the previous value.
    /// Removal of an absent key is `None`, not an error.
    pub fn remove(self) -> Option<M::Value> {
        let Entry { map, key } = self;
        map.remove(&key)
    }

    /// If the key is present, run `f` on the stored value in place.
    /// If absent, no-op; `f` never runs.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut M::Value),
    {
        if let Some(v) = self.map.get_mut(&self.key) {
            f(v);
        }
        self
    }

    /// If the key is present and `p` returns false, remove it. If the
    /// key is absent, or `p` returns true, no-op; `p` never runs on an
    /// absent key.
    pub fn retain_if<P>(self, p: P) -> Self
    where
        P: FnOnce(&M::Value) -> bool,
    {
        let discard = match self.map.get(&self.key) {
            Some(v) => !p(v),
            None => false,
        };
        if discard {
            self.map.remove(&self.key);
        }
        self
    }

    /// If the key is present, overwrite the stored value with `value`
    /// unconditionally. If absent, no-op: `value` is dropped, never
    /// inserted.
    pub fn replace(self, value: M::Value) -> Self {
        self.replace_with_key(|_| value)
    }

    /// As [`replace`], with the value computed only if the key is
    /// present.
    ///
    /// [`replace`]: Entry::replace
    pub fn replace_with<F>(self, f: F) -> Self
    where
        F: FnOnce() -> M::Value,
    {
        self.replace_with_key(|_| f())
    }

    /// As [`replace_with`], with the factory receiving the bound key.
    ///
    /// [`replace_with`]: Entry::replace_with
    pub fn replace_with_key<F>(self, f: F) -> Self
    where
        F: FnOnce(&M::Key) -> M::Value,
    {
        if let Some(v) = self.map.get_mut(&self.key) {
            *v = f(&self.key);
        }
        self
    }

    /// If the key is absent, insert `value`. Returns the value now
    /// stored at the key, pre-existing or just inserted.
    pub fn or_insert(self, value: M::Value) -> &'a mut M::Value {
        self.or_insert_with_key(|_| value)
    }

    /// As [`or_insert`], with the value produced by `f` only when the
    /// key is absent. `f` runs exactly once on an absent key and never
    /// on a present one.
    ///
    /// [`or_insert`]: Entry::or_insert
    pub fn or_insert_with<F>(self, f: F) -> &'a mut M::Value
    where
        F: FnOnce() -> M::Value,
    {
        self.or_insert_with_key(|_| f())
    }

    /// As [`or_insert_with`], with the factory receiving the bound key.
    ///
    /// [`or_insert_with`]: Entry::or_insert_with
    pub fn or_insert_with_key<F>(self, f: F) -> &'a mut M::Value
    where
        F: FnOnce(&M::Key) -> M::Value,
    {
        let Entry { map, key } = self;
        map.get_or_insert_with(key, f)
    }

    /// Fallible [`or_insert_with`]: an `Err` from the factory
    /// propagates unchanged and leaves the map unmodified.
    ///
    /// [`or_insert_with`]: Entry::or_insert_with
    pub fn or_try_insert_with<F, E>(self, f: F) -> Result<&'a mut M::Value, E>
    where
        F: FnOnce() -> Result<M::Value, E>,
    {
        let Entry { map, key } = self;
        map.try_get_or_insert_with(key, |_| f())
    }

    /// `or_insert_with(Default::default)`.
    pub fn or_default(self) -> &'a mut M::Value
    where
        M::Value: Default,
    {
        self.or_insert_with(M::Value::default)
    }
}

impl<'a, M: BackingMap> fmt::Debug for Entry<'a, M>
where
    M::Key: fmt::Debug,
    M::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Reports the live state at the moment of formatting.
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("value", &self.map.get(&self.key))
            .finish()
    }
}

/// Method-syntax access to slot handles, blanket-implemented for every
/// [`BackingMap`].
///
/// Named `slot` rather than `entry`: the inherent `entry` methods on
/// the std-family maps take precedence over a same-named trait method
/// and would shadow it. The free [`entry`] function keeps the
/// original name.
pub trait SlotExt: BackingMap + Sized {
    /// A handle for `key`'s slot in this map. No side effects; O(1).
    fn slot(&mut self, key: Self::Key) -> Entry<'_, Self> {
        Entry::new(self, key)
    }
}

impl<M: BackingMap> SlotExt for M {}

/// A handle for `key`'s slot in `map`. No side effects; O(1).
pub fn entry<M: BackingMap>(map: &mut M, key: M::Key) -> Entry<'_, M> {
    Entry::new(map, key)
}
