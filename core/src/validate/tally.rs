use std::collections::HashMap;
use std::hash::Hash;

/// Sums keyed by first-seen order.
#[derive(Debug, Clone)]
pub(crate) struct Tally<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, f64)>,
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, key: K, amount: f64) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += amount,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, amount));
            }
        }
    }

    pub(crate) fn get(&self, key: &K) -> f64 {
        self.index.get(key).map_or(0.0, |&i| self.entries[i].1)
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_seen_order() {
        let mut t = Tally::new();
        t.add("b", 1.0);
        t.add("a", 2.0);
        t.add("b", 0.5);
        let entries: Vec<_> = t.iter().collect();
        assert_eq!(entries, vec![(&"b", 1.5), (&"a", 2.0)]);
        assert_eq!(t.get(&"zzz"), 0.0);
    }
}
