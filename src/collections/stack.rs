use std::fmt::Display;

/// LIFO holding area for incidents awaiting processing.
///
/// The most recently pushed element is the first popped.
#[derive(Debug, Clone)]
pub struct IncidentBacklog<T> {
    items: Vec<T>,
}

impl<T> Default for IncidentBacklog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IncidentBacklog<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Top to bottom
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().rev()
    }
}

impl<T: Display> IncidentBacklog<T> {
    /// String form of every element, top to bottom
    pub fn list_all(&self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_backlog() {
        let mut backlog: IncidentBacklog<u32> = IncidentBacklog::new();
        assert!(backlog.is_empty());
        assert_eq!(backlog.peek(), None);
        assert_eq!(backlog.pop(), None);
        assert!(backlog.list_all().is_empty());
    }

    #[test]
    fn test_list_all_is_top_first() {
        let mut backlog = IncidentBacklog::new();
        backlog.push("older");
        backlog.push("newer");

        assert_eq!(backlog.peek(), Some(&"newer"));
        assert_eq!(backlog.list_all(), vec!["newer", "older"]);
        assert_eq!(backlog.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_pop_reverses_registration_order(items in prop::collection::vec(any::<u32>(), 0..64)) {
            let mut backlog = IncidentBacklog::new();
            for item in &items {
                backlog.push(*item);
            }

            let mut drained = Vec::new();
            while let Some(item) = backlog.pop() {
                drained.push(item);
            }

            let mut expected = items.clone();
            expected.reverse();
            prop_assert_eq!(drained, expected);
            prop_assert!(backlog.pop().is_none());
        }
    }
}
