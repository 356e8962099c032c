//! Utility types and functions.

use std::collections::HashMap;
use std::hash::Hash;

/// Routes values to a per-key accumulator, creating it on first use.
#[derive(Default)]
pub struct Dispatcher<K, V> {
    items: HashMap<K, V>,
}

impl<K, V> Dispatcher<K, V>
where
    K: Hash + Eq + Clone,
{
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
        }
    }
}

impl<K, V> Dispatcher<K, V>
where
    K: Hash + Eq + Clone + Ord,
{
    /// Consumes the dispatcher and returns its entries ordered by key.
    pub fn into_sorted(self) -> Vec<(K, V)> {
        let mut ret: Vec<(K, V)> = self.items.into_iter().collect();
        ret.sort_by(|(a, _), (b, _)| a.cmp(b));
        ret
    }
}

impl<K, V> Dispatcher<K, V>
where
    K: Hash + Eq + Clone,
    V: Default,
{
    pub fn get_or_default(&mut self, k: &K) -> &mut V {
        self.items.entry(k.clone()).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::Dispatcher;

    #[test]
    fn test_dispatch_and_sort() {
        let mut d: Dispatcher<u64, Vec<i64>> = Dispatcher::new();

        d.get_or_default(&10).push(1);
        d.get_or_default(&5).push(2);
        d.get_or_default(&10).push(3);
        d.get_or_default(&7).push(4);

        let sorted = d.into_sorted();
        assert_eq!(
            sorted,
            vec![(5, vec![2]), (7, vec![4]), (10, vec![1, 3])]
        );
    }
}
