//! A bounded-batch FIFO queue.
//!
//! Backed by two stacks (`back` accumulates enqueued items in order, `front`
//! is the reversed tail consumed by `dequeue`), giving amortised O(1) per
//! item without ever shifting a `Vec`. Not `Sync`: the scheduler wraps its
//! queue in its own mutex.

#[derive(Debug, Clone, Default)]
pub struct Queue<T> {
    front: Vec<T>,
    back: Vec<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self { front: Vec::new(), back: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.front.is_empty() && self.back.is_empty()
    }

    pub fn size(&self) -> usize {
        self.front.len() + self.back.len()
    }

    /// Appends every element of `batch` in order; `size` increases by
    /// `batch.len()`.
    pub fn enqueue(&mut self, batch: impl IntoIterator<Item = T>) {
        self.back.extend(batch);
    }

    /// Returns up to `n` items in FIFO order, exactly `min(n, size())` of
    /// them.
    pub fn dequeue(&mut self, n: usize) -> Vec<T> {
        let mut out = Vec::with_capacity(n.min(self.size()));
        for _ in 0..n {
            if let Some(item) = self.pop_front() {
                out.push(item);
            } else {
                break;
            }
        }
        out
    }

    fn pop_front(&mut self) -> Option<T> {
        if self.front.is_empty() {
            self.front.extend(self.back.drain(..).rev());
        }
        self.front.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order_preserved_across_interleaved_batches() {
        let mut q = Queue::new();
        q.enqueue(['a', 'b', 'c', 'd', 'e']);
        assert_eq!(q.dequeue(3), vec!['a', 'b', 'c']);
        assert_eq!(q.dequeue(3), vec!['d', 'e']);
        assert!(q.is_empty());
    }

    #[test]
    fn size_tracks_enqueue_and_dequeue() {
        let mut q: Queue<u32> = Queue::new();
        assert_eq!(q.size(), 0);
        q.enqueue([1, 2, 3]);
        assert_eq!(q.size(), 3);
        let dequeued = q.dequeue(2);
        assert_eq!(q.size() + dequeued.len(), 3);
    }

    #[test]
    fn short_dequeue_returns_everything_and_empties_queue() {
        let mut q = Queue::new();
        q.enqueue([1, 2]);
        let out = q.dequeue(10);
        assert_eq!(out, vec![1, 2]);
        assert!(q.is_empty());
        assert_eq!(q.dequeue(1), Vec::<i32>::new());
    }

    #[test]
    fn enqueue_after_partial_drain_keeps_fifo_order() {
        let mut q = Queue::new();
        q.enqueue([1, 2, 3]);
        assert_eq!(q.dequeue(1), vec![1]);
        q.enqueue([4, 5]);
        assert_eq!(q.dequeue(10), vec![2, 3, 4, 5]);
    }

    // Property-style check over a scripted sequence of operations: the
    // concatenation of dequeue outputs must be a prefix of the concatenation
    // of enqueue inputs.
    #[test]
    fn dequeue_outputs_are_a_prefix_of_enqueue_inputs() {
        let mut q = Queue::new();
        let mut all_in = Vec::new();
        let mut all_out = Vec::new();
        let batches: &[&[i32]] = &[&[1, 2], &[3], &[], &[4, 5, 6], &[7]];
        let pulls = [1usize, 0, 3, 2, 100];

        for (batch, pull) in batches.iter().zip(pulls) {
            q.enqueue(batch.iter().copied());
            all_in.extend_from_slice(batch);
            all_out.extend(q.dequeue(pull));
        }
        all_out.extend(q.dequeue(usize::MAX));

        assert!(all_in.starts_with(&all_out));
    }
}
