use crate::{Node, PrefixTree};

use proptest::prelude::*;
use std::collections::BTreeMap;

fn validate_tree<V>(t: &PrefixTree<V>) {
    let issues = t.root().verify_integrity();
    assert!(issues.is_empty(), "integrity issues: {issues:?}");
    check_priority_order(t.root());
}

/// Siblings stay sorted by descending priority while reordering is on.
fn check_priority_order<V>(n: &Node<V>) {
    for pair in n.children().windows(2) {
        assert!(
            pair[0].priority() >= pair[1].priority(),
            "children out of priority order: {} < {}",
            pair[0].priority(),
            pair[1].priority()
        );
    }
    for child in n.children() {
        check_priority_order(child);
    }
}

fn check_no_orphans<V>(n: &Node<V>) {
    for child in n.children() {
        assert!(!child.is_orphan(), "orphan survived cleanup");
        check_no_orphans(child);
    }
}

/// Value of the longest key in `m` that is a prefix of `key`.
fn longest_prefix<'a>(m: &'a BTreeMap<Vec<u8>, u64>, key: &[u8]) -> Option<&'a u64> {
    (0..=key.len()).rev().find_map(|len| m.get(&key[..len]))
}

#[derive(Clone, Debug)]
enum Op {
    Add(Vec<u8>, u64),
    Remove(Vec<u8>),
    Lookup(Vec<u8>),
    Cleanup,
}

fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // A small alphabet makes shared prefixes, splits and fallbacks common.
    prop::collection::vec(prop::sample::select(b"/ab01".to_vec()), 0..=12)
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        45 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Add(k, v)),
        20 => key.clone().prop_map(Op::Remove),
        30 => key.clone().prop_map(Op::Lookup),
        5 => Just(Op::Cleanup),
    ];
    prop::collection::vec(op, 0..=400)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in ops_strategy()) {
        let mut t: PrefixTree<u64> = PrefixTree::new();
        let mut m: BTreeMap<Vec<u8>, u64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Add(key, value) => {
                    t.add(&key, value);
                    m.insert(key, value);
                }
                Op::Remove(key) => {
                    let old_t = t.remove(&key);
                    let old_m = m.remove(key.as_slice());
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Lookup(key) => {
                    prop_assert_eq!(t.lookup(&key), longest_prefix(&m, &key));
                }
                Op::Cleanup => {
                    t.cleanup();
                    check_no_orphans(t.root());
                }
            }
        }

        validate_tree(&t);
        prop_assert_eq!(t.len(), m.len());

        let mut got: Vec<(Vec<u8>, u64)> = t.entries().map(|(k, v)| (k, *v)).collect();
        got.sort();
        let expected: Vec<(Vec<u8>, u64)> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_cleanup_is_idempotent(ops in ops_strategy()) {
        let mut t: PrefixTree<u64> = PrefixTree::new();
        for op in ops {
            match op {
                Op::Add(key, value) => t.add(&key, value),
                Op::Remove(key) => {
                    t.remove(&key);
                }
                Op::Lookup(_) | Op::Cleanup => {}
            }
        }

        t.cleanup();
        check_no_orphans(t.root());
        let once = t.to_string();
        t.cleanup();
        prop_assert_eq!(t.to_string(), once);
        validate_tree(&t);
    }

    #[test]
    fn prop_distinct_keys_round_trip(keys in prop::collection::btree_set(key_strategy(), 0..64)) {
        let mut t: PrefixTree<u64> = PrefixTree::new();
        for (i, key) in keys.iter().enumerate() {
            t.add(key, i as u64);
        }
        for (i, key) in keys.iter().enumerate() {
            prop_assert_eq!(t.lookup(key), Some(&(i as u64)));
        }
        validate_tree(&t);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys = ["/", "/a", "/ab", "/b", "/a/b", ""];
    let probes = [
        "", "/", "/a", "/ab", "/abc", "/a/", "/a/b/c", "/b", "/bb", "x",
    ];

    for_each_permutation(&keys, |perm| {
        let mut t: PrefixTree<u64> = PrefixTree::new();
        let mut m: BTreeMap<Vec<u8>, u64> = BTreeMap::new();

        for k in perm {
            let v = keys.iter().position(|x| *x == k).unwrap() as u64;
            t.add(k, v);
            m.insert(k.as_bytes().to_vec(), v);
        }

        validate_tree(&t);
        for probe in probes {
            assert_eq!(
                t.lookup(probe),
                longest_prefix(&m, probe.as_bytes()),
                "probe {probe:?}"
            );
        }
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys = ["/a", "/ab", "/abc", "/b", "/b/a", "/"];

    let mut base: PrefixTree<u64> = PrefixTree::new();
    for (i, k) in keys.iter().enumerate() {
        base.add(k, i as u64);
    }

    for_each_permutation(&keys, |perm| {
        let mut t = base.clone();
        let mut m: BTreeMap<Vec<u8>, u64> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.as_bytes().to_vec(), i as u64))
            .collect();

        for k in perm {
            assert_eq!(t.remove(k), m.remove(k.as_bytes()));
            t.cleanup();
            check_no_orphans(t.root());
            validate_tree(&t);
            for probe in keys {
                assert_eq!(t.lookup(probe), longest_prefix(&m, probe.as_bytes()));
            }
        }
        assert!(t.is_empty());
        assert!(t.root().children().is_empty());
    });
}

#[test]
fn randomized_add_remove_lookup() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(7);
    let mut t: PrefixTree<u64> = PrefixTree::new();
    let mut m: BTreeMap<Vec<u8>, u64> = BTreeMap::new();
    let alphabet = b"/abcxyz01";

    for round in 0..20_000 {
        let len = rng.gen_range(0..10);
        let key: Vec<u8> = (0..len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect();

        match rng.gen_range(0..100) {
            0..=44 => {
                let v: u64 = rng.gen();
                t.add(&key, v);
                m.insert(key, v);
            }
            45..=64 => {
                assert_eq!(t.remove(&key), m.remove(&key));
            }
            65..=66 => t.cleanup(),
            _ => {
                assert_eq!(t.lookup(&key), longest_prefix(&m, &key), "round {round}");
            }
        }
    }

    validate_tree(&t);
    assert_eq!(t.len(), m.len());
}
