//! Animation-frame request queue.

use super::Slot;

/// Pending `requestAnimationFrame` callbacks.
///
/// A request names the owning behavior and a behavior-chosen tag. Requests made
/// while a batch is running land in the next batch, matching browser semantics.
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: Vec<(Slot, usize)>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, slot: Slot, tag: usize) {
        self.pending.push((slot, tag));
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Take the current batch, leaving the queue empty for new requests.
    pub fn take(&mut self) -> Vec<(Slot, usize)> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_drains_batch() {
        let mut frames = FrameQueue::new();
        assert!(!frames.is_pending());

        frames.request(Slot(0), 1);
        frames.request(Slot(2), 7);
        assert_eq!(frames.len(), 2);

        let batch = frames.take();
        assert_eq!(batch, vec![(Slot(0), 1), (Slot(2), 7)]);
        assert!(!frames.is_pending());
    }
}
