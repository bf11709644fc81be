//! Single-slot, last-value-wins buffer for the most recent landmark frame

use crate::landmark::FrameLandmarks;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared handle to the latest detected landmarks
///
/// The tracking step overwrites the whole frame; the render step reads a copy.
/// There is no queue: a frame that is never read is simply replaced.
#[derive(Debug, Clone, Default)]
pub struct LatestLandmarks {
    inner: Arc<RwLock<Slot>>,
}

#[derive(Debug, Default)]
struct Slot {
    frame: FrameLandmarks,
    generation: u64,
}

impl LatestLandmarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored frame
    pub fn publish(&self, frame: FrameLandmarks) {
        let mut slot = self.inner.write();
        slot.frame = frame;
        slot.generation = slot.generation.wrapping_add(1);
    }

    /// Copy of the most recently published frame
    pub fn snapshot(&self) -> FrameLandmarks {
        self.inner.read().frame.clone()
    }

    /// Number of frames published so far
    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    /// Hand count of the current frame without copying it
    pub fn hand_count(&self) -> usize {
        self.inner.read().frame.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::Hand;

    #[test]
    fn test_last_value_wins() {
        let slot = LatestLandmarks::new();
        assert!(slot.snapshot().is_empty());
        assert_eq!(slot.generation(), 0);

        slot.publish(FrameLandmarks::from_hands(vec![Hand::default(); 2]));
        slot.publish(FrameLandmarks::from_hands(vec![Hand::default()]));

        assert_eq!(slot.snapshot().len(), 1);
        assert_eq!(slot.hand_count(), 1);
        assert_eq!(slot.generation(), 2);
    }

    #[test]
    fn test_clones_share_the_slot() {
        let writer = LatestLandmarks::new();
        let reader = writer.clone();

        writer.publish(FrameLandmarks::from_hands(vec![Hand::default()]));
        assert_eq!(reader.hand_count(), 1);
    }
}
