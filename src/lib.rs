//! slot-entry: chainable handles bound to a single key's slot in an
//! existing map, generalizing the standard library's entry API to any
//! associative container.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: let callers express get-or-insert, modify-if-present,
//!   conditionally-remove, and remove against one map slot without
//!   repeating key lookups or splitting presence checks from actions.
//! - Layers:
//!   - BackingMap: the minimal capability trait for "a mapping from
//!     keys to values". Adapters delegate to each backend's native
//!     entry API so insert-if-absent is lazy by construction.
//!   - Entry<'a, M>: the handle over one (map, key) pair. Holds the
//!     key by value and the map by `&'a mut M`; re-reads presence from
//!     the live map on every operation.
//!
//! Constraints
//! - Single-threaded, synchronous: no operation suspends or performs
//!   I/O. Exclusive access for the duration of a chain is enforced
//!   statically by the `&'a mut M` borrow.
//! - The handle never caches the value at its key. Chained calls share
//!   no snapshot; a `retain_if` that removes the key makes a later
//!   `and_modify` in the same chain see "absent" and no-op.
//! - Laziness is a correctness contract: `or_insert_with` and friends
//!   never run their factory when the key is present; `replace*` never
//!   inserts when the key is absent.
//! - Absence is never an error: `Option` returns and defined no-ops.
//!   Failures in caller-supplied closures (panics, or `Err` from the
//!   fallible factory) propagate unmodified.
//!
//! Why this split?
//! - Localize contracts: BackingMap carries the laziness obligation
//!   once, per backend; Entry carries the chaining semantics once,
//!   independent of backend.
//! - Downstream containers implement BackingMap and get the whole
//!   slot surface through the blanket SlotExt impl.
//!
//! Notes and non-goals
//! - Not a map implementation: no iteration, bulk operations, or
//!   storage. The backing map already exists and is owned by the
//!   caller.
//! - No concurrency coordination; callers sharing a map across
//!   contexts must synchronize around whole chains.
//! - Method-syntax access is `slot(key)` rather than `entry(key)`:
//!   the inherent `entry` methods on the std-family maps take
//!   precedence over a same-named trait method and would silently
//!   shadow it. The free `entry` function keeps the original name.
//! - `Entry::new` is crate-private; `slot`/`entry` are the only
//!   constructors.

mod backing_map;
mod entry;

// Public surface
pub use backing_map::BackingMap;
pub use entry::{entry, Entry, SlotExt};
