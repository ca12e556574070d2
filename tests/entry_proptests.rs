// Model-based property tests: random slot-operation sequences applied
// through the public handle API, checked step by step against a plain
// std::collections::HashMap oracle driven by direct map operations
// (std's own entry API serves as the oracle for the or_insert family).

use proptest::prelude::*;
use slot_entry::{BackingMap, SlotExt};
use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

// Pool-indexed operations to improve shrinking: indices shrink to
// earlier keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    OrInsert(usize, i32),
    OrInsertWith(usize, i32),
    OrInsertWithKey(usize),
    AndModify(usize, i32),
    RetainIf(usize, i32),
    Replace(usize, i32),
    ReplaceWithKey(usize),
    Remove(usize),
    Get(usize),
    Exists(usize),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::OrInsert(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::OrInsertWith(i, v)),
            idx.clone().prop_map(OpI::OrInsertWithKey),
            (idx.clone(), -8..8i32).prop_map(|(i, d)| OpI::AndModify(i, d)),
            (idx.clone(), any::<i32>()).prop_map(|(i, t)| OpI::RetainIf(i, t)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Replace(i, v)),
            idx.clone().prop_map(OpI::ReplaceWithKey),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Get),
            idx.clone().prop_map(OpI::Exists),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn key_value(k: &str) -> i32 {
    k.len() as i32
}

// One scenario against one backend; the oracle is always std HashMap.
// Also tracks factory invocation counts: the or_insert factories must
// run exactly once per actual insert and never on a present key, and
// replace_with_key must run its factory only on a present key.
fn run_scenario<M>(
    sut: &mut M,
    pool: &[String],
    ops: &[OpI],
) -> Result<(), TestCaseError>
where
    M: BackingMap<Key = String, Value = i32>,
{
    let mut model: HashMap<String, i32> = HashMap::new();
    let factory_calls = Rc::new(Cell::new(0u32));

    for op in ops {
        match *op {
            OpI::OrInsert(i, v) => {
                let k = pool[i].clone();
                let expected = *model.entry(k.clone()).or_insert(v);
                let got = *sut.slot(k).or_insert(v);
                prop_assert_eq!(got, expected);
            }
            OpI::OrInsertWith(i, v) => {
                let k = pool[i].clone();
                let absent = !model.contains_key(&k);
                let expected = *model.entry(k.clone()).or_insert_with(|| v);
                let calls = factory_calls.clone();
                let before = calls.get();
                let got = *sut.slot(k).or_insert_with(move || {
                    calls.set(calls.get() + 1);
                    v
                });
                prop_assert_eq!(got, expected);
                let ran = factory_calls.get() - before;
                prop_assert_eq!(ran, u32::from(absent), "factory runs iff absent");
            }
            OpI::OrInsertWithKey(i) => {
                let k = pool[i].clone();
                let absent = !model.contains_key(&k);
                let expected = *model
                    .entry(k.clone())
                    .or_insert_with_key(|k| key_value(k));
                let calls = factory_calls.clone();
                let before = calls.get();
                let got = *sut.slot(k).or_insert_with_key(move |k| {
                    calls.set(calls.get() + 1);
                    key_value(k)
                });
                prop_assert_eq!(got, expected);
                let ran = factory_calls.get() - before;
                prop_assert_eq!(ran, u32::from(absent), "key factory runs iff absent");
            }
            OpI::AndModify(i, d) => {
                let k = pool[i].clone();
                if let Some(v) = model.get_mut(&k) {
                    *v = v.wrapping_add(d);
                }
                sut.slot(k).and_modify(|v| *v = v.wrapping_add(d));
            }
            OpI::RetainIf(i, t) => {
                let k = pool[i].clone();
                if model.get(&k).is_some_and(|v| !(*v <= t)) {
                    model.remove(&k);
                }
                sut.slot(k).retain_if(|v| *v <= t);
            }
            OpI::Replace(i, v) => {
                let k = pool[i].clone();
                if let Some(slot) = model.get_mut(&k) {
                    *slot = v;
                }
                sut.slot(k).replace(v);
            }
            OpI::ReplaceWithKey(i) => {
                let k = pool[i].clone();
                let present = model.contains_key(&k);
                if let Some(slot) = model.get_mut(&k) {
                    *slot = key_value(&k);
                }
                let calls = factory_calls.clone();
                let before = calls.get();
                sut.slot(k).replace_with_key(move |k| {
                    calls.set(calls.get() + 1);
                    key_value(k)
                });
                let ran = factory_calls.get() - before;
                prop_assert_eq!(ran, u32::from(present), "replace factory runs iff present");
            }
            OpI::Remove(i) => {
                let k = pool[i].clone();
                let expected = model.remove(&k);
                prop_assert_eq!(sut.slot(k).remove(), expected);
            }
            OpI::Get(i) => {
                let k = pool[i].clone();
                prop_assert_eq!(sut.slot(k.clone()).get(), model.get(&k));
            }
            OpI::Exists(i) => {
                let k = pool[i].clone();
                prop_assert_eq!(sut.slot(k.clone()).exists(), model.contains_key(&k));
            }
        }
    }

    // Final parity over every key the scenario could touch.
    for k in pool {
        prop_assert_eq!(sut.get(k), model.get(k));
    }
    Ok(())
}

// Property: state-machine equivalence against the std oracle.
// Invariants exercised across random operation sequences:
// - or_insert returns the stored value, never a losing default.
// - or_insert_with/or_insert_with_key run their factory exactly once
//   per insert and never on a present key.
// - and_modify/retain_if/replace* apply their documented
//   present/absent behavior, including replace never inserting.
// - remove returns the model's prior value; get/exists track presence.
// - Per-key parity with the model holds after the full sequence.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_hash_backend_matches_model((pool, ops) in arb_scenario()) {
        let mut sut: HashMap<String, i32> = HashMap::new();
        run_scenario(&mut sut, &pool, &ops)?;
    }

    #[test]
    fn prop_btree_backend_matches_model((pool, ops) in arb_scenario()) {
        let mut sut: BTreeMap<String, i32> = BTreeMap::new();
        run_scenario(&mut sut, &pool, &ops)?;
    }
}
