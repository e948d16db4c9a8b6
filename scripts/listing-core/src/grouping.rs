//! Grouping, pair enumeration and reproducible sampling.

use std::hash::Hash;

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Which groups qualify for pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSize {
    AtLeast(usize),
    Exactly(usize),
}

impl GroupSize {
    pub fn accepts(self, len: usize) -> bool {
        match self {
            GroupSize::AtLeast(n) => len >= n,
            GroupSize::Exactly(n) => len == n,
        }
    }
}

/// Groups items by key. Items whose key is `None` are skipped. Groups come
/// out in the order their key was first seen and keep member order.
pub fn group_by<'a, T, K, F>(items: &'a [T], mut key: F) -> IndexMap<K, Vec<&'a T>>
where
    K: Hash + Eq,
    F: FnMut(&'a T) -> Option<K>,
{
    let mut groups: IndexMap<K, Vec<&'a T>> = IndexMap::new();
    for item in items {
        if let Some(k) = key(item) {
            groups.entry(k).or_default().push(item);
        }
    }
    groups
}

/// Keeps the groups whose size `filter` accepts.
pub fn select_groups<K, V>(groups: IndexMap<K, Vec<V>>, filter: GroupSize) -> IndexMap<K, Vec<V>>
where
    K: Hash + Eq,
{
    groups
        .into_iter()
        .filter(|(_, members)| filter.accepts(members.len()))
        .collect()
}

/// All unordered pairs `(items[i], items[j])` with `i < j`.
pub fn pairs<T: Clone>(items: &[T]) -> Vec<(T, T)> {
    let n = items.len();
    let mut out = Vec::with_capacity(pair_count(n));
    for i in 0..n {
        for j in (i + 1)..n {
            out.push((items[i].clone(), items[j].clone()));
        }
    }
    out
}

pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Draws `amount` distinct items without replacement using a seeded RNG.
/// Selection order is kept, so the same seed always yields the same list.
/// Asking for more than there is returns every item in seeded order.
pub fn sample<T: Clone>(items: &[T], amount: usize, seed: u64) -> Vec<T> {
    let mut rng = StdRng::seed_from_u64(seed);
    let amount = amount.min(items.len());
    rand::seq::index::sample(&mut rng, items.len(), amount)
        .into_iter()
        .map(|idx| items[idx].clone())
        .collect()
}
