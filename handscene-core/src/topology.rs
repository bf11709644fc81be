//! Fixed bone topology of a hand skeleton

use crate::landmark::{HandJoint, MAX_HANDS, JOINTS_PER_HAND};

/// Number of bones per hand
pub const BONES_PER_HAND: usize = 20;

/// Total joint marker slots across all hands
pub const MAX_JOINTS: usize = MAX_HANDS * JOINTS_PER_HAND;

/// Total bone segment slots across all hands
pub const MAX_BONES: usize = MAX_HANDS * BONES_PER_HAND;

/// A connection between two joints of the same hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bone {
    pub start: HandJoint,
    pub end: HandJoint,
}

impl Bone {
    pub const fn new(start: HandJoint, end: HandJoint) -> Self {
        Self { start, end }
    }
}

use HandJoint::*;

/// Standard MediaPipe hand connections: four bones per finger, each finger rooted at the wrist
pub const HAND_CONNECTIONS: [Bone; BONES_PER_HAND] = [
    // Thumb
    Bone::new(Wrist, ThumbCmc),
    Bone::new(ThumbCmc, ThumbMcp),
    Bone::new(ThumbMcp, ThumbIp),
    Bone::new(ThumbIp, ThumbTip),
    // Index
    Bone::new(Wrist, IndexFingerMcp),
    Bone::new(IndexFingerMcp, IndexFingerPip),
    Bone::new(IndexFingerPip, IndexFingerDip),
    Bone::new(IndexFingerDip, IndexFingerTip),
    // Middle
    Bone::new(Wrist, MiddleFingerMcp),
    Bone::new(MiddleFingerMcp, MiddleFingerPip),
    Bone::new(MiddleFingerPip, MiddleFingerDip),
    Bone::new(MiddleFingerDip, MiddleFingerTip),
    // Ring
    Bone::new(Wrist, RingFingerMcp),
    Bone::new(RingFingerMcp, RingFingerPip),
    Bone::new(RingFingerPip, RingFingerDip),
    Bone::new(RingFingerDip, RingFingerTip),
    // Pinky
    Bone::new(Wrist, PinkyMcp),
    Bone::new(PinkyMcp, PinkyPip),
    Bone::new(PinkyPip, PinkyDip),
    Bone::new(PinkyDip, PinkyTip),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_capacities() {
        assert_eq!(MAX_JOINTS, 42);
        assert_eq!(MAX_BONES, 40);
    }

    #[test]
    fn test_connections_form_a_tree() {
        // 20 edges over 21 joints, every non-wrist joint is the end of exactly one bone
        let ends: HashSet<_> = HAND_CONNECTIONS.iter().map(|b| b.end).collect();
        assert_eq!(ends.len(), BONES_PER_HAND);
        assert!(!ends.contains(&HandJoint::Wrist));

        let wrist_roots = HAND_CONNECTIONS.iter().filter(|b| b.start == HandJoint::Wrist).count();
        assert_eq!(wrist_roots, 5);
    }

    #[test]
    fn test_index_finger_chain_reaches_tip() {
        assert_eq!(HAND_CONNECTIONS[7], Bone::new(IndexFingerDip, IndexFingerTip));
    }
}
