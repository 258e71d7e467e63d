use std::collections::VecDeque;
use std::fmt::Display;

/// FIFO holding area for orders awaiting dispatch.
///
/// Pure sequence container: no business rules live here.
#[derive(Debug, Clone)]
pub struct AdmissionQueue<T> {
    items: VecDeque<T>,
}

impl<T> Default for AdmissionQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AdmissionQueue<T> {
    pub fn new() -> Self {
        Self { items: VecDeque::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Append to the tail
    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Remove the head; `None` when empty
    pub fn dequeue(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    /// Front to back
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Display> AdmissionQueue<T> {
    /// String form of every element, front to back
    pub fn list_all(&self) -> Vec<String> {
        self.items.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_queue() {
        let mut queue: AdmissionQueue<u32> = AdmissionQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.peek(), None);
        assert_eq!(queue.dequeue(), None);
        assert!(queue.list_all().is_empty());
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut queue = AdmissionQueue::new();
        queue.enqueue("first");
        queue.enqueue("second");

        assert_eq!(queue.peek(), Some(&"first"));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.list_all(), vec!["first", "second"]);
    }

    #[test]
    fn test_refill_after_drain() {
        let mut queue = AdmissionQueue::new();
        queue.enqueue(1);
        assert_eq!(queue.dequeue(), Some(1));
        assert!(queue.is_empty());

        queue.enqueue(2);
        queue.enqueue(3);
        assert_eq!(queue.dequeue(), Some(2));
        assert_eq!(queue.peek(), Some(&3));
    }

    proptest! {
        #[test]
        fn prop_dequeue_preserves_admission_order(items in prop::collection::vec(any::<u32>(), 0..64)) {
            let mut queue = AdmissionQueue::new();
            for item in &items {
                queue.enqueue(*item);
            }

            let mut drained = Vec::new();
            while let Some(item) = queue.dequeue() {
                drained.push(item);
            }

            prop_assert_eq!(drained, items);
            prop_assert!(queue.dequeue().is_none());
        }
    }
}
