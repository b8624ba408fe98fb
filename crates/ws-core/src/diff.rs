//! Keyed diff between the previously rendered mark set and the next one

use std::hash::Hash;

use ahash::AHashSet;

/// Classification of mark keys into added/retained/removed, driving the
/// entrance, update, and exit animation lanes.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedDiff<K> {
    /// Keys in the next set only, in next-set order
    pub added: Vec<K>,
    /// Keys in both sets, in next-set order
    pub retained: Vec<K>,
    /// Keys in the previous set only
    pub removed: Vec<K>,
}

impl<K: Eq + Hash + Clone> KeyedDiff<K> {
    pub fn compute<'a, I>(previous: &AHashSet<K>, next: I) -> Self
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let mut added = Vec::new();
        let mut retained = Vec::new();
        let mut next_set = AHashSet::new();

        for key in next {
            next_set.insert(key.clone());
            if previous.contains(key) {
                retained.push(key.clone());
            } else {
                added.push(key.clone());
            }
        }

        let removed = previous
            .iter()
            .filter(|key| !next_set.contains(*key))
            .cloned()
            .collect();

        Self {
            added,
            retained,
            removed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let previous: AHashSet<&str> = ["ZAF", "RWA", "BWA"].into_iter().collect();
        let next = ["RWA", "ZAF", "THA"];

        let diff = KeyedDiff::compute(&previous, next.iter());
        assert_eq!(diff.added, vec!["THA"]);
        assert_eq!(diff.retained, vec!["RWA", "ZAF"]);
        assert_eq!(diff.removed, vec!["BWA"]);
    }

    #[test]
    fn test_empty_previous_set_is_all_entrances() {
        let previous: AHashSet<&str> = AHashSet::new();
        let diff = KeyedDiff::compute(&previous, ["ZAF", "RWA"].iter());
        assert_eq!(diff.added.len(), 2);
        assert!(diff.retained.is_empty());
        assert!(diff.removed.is_empty());
    }

    #[test]
    fn test_identical_sets_retain_everything() {
        let previous: AHashSet<&str> = ["ZAF", "RWA"].into_iter().collect();
        let diff = KeyedDiff::compute(&previous, ["ZAF", "RWA"].iter());
        assert!(diff.added.is_empty());
        assert_eq!(diff.retained.len(), 2);
        assert!(diff.removed.is_empty());
    }
}
