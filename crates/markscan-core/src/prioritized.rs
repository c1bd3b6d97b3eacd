//! Priority-ordered registries.
//!
//! Pipelines built on markscan register their extensible behaviors (inline
//! triggers, renderer hooks, ...) with a priority; lower priorities run first.

/// A value paired with a priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prioritized<T> {
    /// The registered value
    pub value: T,
    /// Priority of the value (lower = earlier)
    pub priority: i32,
}

impl<T> Prioritized<T> {
    pub fn new(value: T, priority: i32) -> Self {
        Self { value, priority }
    }
}

/// An ordered collection of [`Prioritized`] entries.
///
/// # Example
///
/// ```
/// use markscan_core::PrioritizedList;
///
/// let mut list = PrioritizedList::new();
/// list.push("emphasis", 200);
/// list.push("link", 100);
/// list.push("code", 100);
/// list.sort();
///
/// let order: Vec<_> = list.values().copied().collect();
/// assert_eq!(order, vec!["link", "code", "emphasis"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrioritizedList<T> {
    entries: Vec<Prioritized<T>>,
}

impl<T> Default for PrioritizedList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> PrioritizedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value with the given priority. Call [`PrioritizedList::sort`]
    /// once registration is done.
    pub fn push(&mut self, value: T, priority: i32) {
        self.entries.push(Prioritized::new(value, priority));
    }

    /// Stable ascending sort by priority; equal priorities keep insertion order.
    pub fn sort(&mut self) {
        self.entries.sort_by_key(|entry| entry.priority);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Prioritized<T>> {
        self.entries.iter()
    }

    /// Iterate over the values in their current order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|entry| &entry.value)
    }
}

impl<T: PartialEq> PrioritizedList<T> {
    /// Remove the first entry holding `value`.
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.entries.iter().position(|entry| entry.value == *value) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }
}

impl<T> FromIterator<Prioritized<T>> for PrioritizedList<T> {
    fn from_iter<I: IntoIterator<Item = Prioritized<T>>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a PrioritizedList<T> {
    type Item = &'a Prioritized<T>;
    type IntoIter = std::slice::Iter<'a, Prioritized<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_is_stable() {
        let mut list = PrioritizedList::new();
        list.push('a', 10);
        list.push('b', 5);
        list.push('c', 10);
        list.push('d', 5);
        list.sort();

        let order: String = list.values().collect();
        assert_eq!(order, "bdac");
    }

    #[test]
    fn test_remove_by_value() {
        let mut list = PrioritizedList::new();
        list.push("x", 1);
        list.push("y", 2);
        list.push("x", 3);

        assert!(list.remove(&"x"));
        assert_eq!(list.len(), 2);
        let priorities: Vec<i32> = list.iter().map(|e| e.priority).collect();
        assert_eq!(priorities, vec![2, 3]);

        assert!(!list.remove(&"z"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_from_iterator() {
        let list: PrioritizedList<u8> = vec![Prioritized::new(1, 9), Prioritized::new(2, 0)]
            .into_iter()
            .collect();
        assert_eq!(list.len(), 2);
        assert!(!list.is_empty());
        let first = list.iter().next().map(|e| e.value);
        assert_eq!(first, Some(1));
    }
}
