//! Per-frame layout of joint markers and bone segments
//!
//! Instances live in fixed-capacity arrays indexed by slot. Each update fills
//! slots from the front for every tracked hand and suppresses the rest, so a
//! frame with fewer hands never leaves geometry from an earlier frame behind.

use handscene_core::{
    CoordinateMapper, FrameLandmarks, Hand, InstanceTransform, Point3f, Viewport,
    HAND_CONNECTIONS, JOINTS_PER_HAND, MAX_BONES, MAX_HANDS, MAX_JOINTS,
};
use tracing::debug;

/// Emit a diagnostic sample of the first wrist once every this many frames
const DIAGNOSTIC_INTERVAL: u64 = 100;

/// Joint and bone instance transforms for up to two hands
#[derive(Debug, Clone)]
pub struct SkeletonInstances {
    joints: [InstanceTransform; MAX_JOINTS],
    bones: [InstanceTransform; MAX_BONES],
    active_joints: usize,
    active_bones: usize,
    frames: u64,
}

impl SkeletonInstances {
    /// All slots start suppressed
    pub fn new() -> Self {
        Self {
            joints: [InstanceTransform::hidden(); MAX_JOINTS],
            bones: [InstanceTransform::hidden(); MAX_BONES],
            active_joints: 0,
            active_bones: 0,
            frames: 0,
        }
    }

    /// Recompute every slot from `frame`
    pub fn update(&mut self, frame: &FrameLandmarks, viewport: &Viewport, mapper: &CoordinateMapper) {
        let mut joint_index = 0;
        let mut bone_index = 0;

        for hand in frame.iter().take(MAX_HANDS) {
            let mapped = map_hand(hand, viewport, mapper);

            for point in &mapped {
                self.joints[joint_index] = InstanceTransform::at(point);
                joint_index += 1;
            }

            for bone in &HAND_CONNECTIONS {
                let start = &mapped[bone.start.index()];
                let end = &mapped[bone.end.index()];
                self.bones[bone_index] = InstanceTransform::segment(start, end);
                bone_index += 1;
            }
        }

        // Hide unused trailing slots
        for slot in &mut self.joints[joint_index..] {
            *slot = InstanceTransform::hidden();
        }
        for slot in &mut self.bones[bone_index..] {
            *slot = InstanceTransform::hidden();
        }

        self.active_joints = joint_index;
        self.active_bones = bone_index;

        self.frames = self.frames.wrapping_add(1);
        if self.frames % DIAGNOSTIC_INTERVAL == 0 {
            if let Some(hand) = frame.hands().first() {
                debug!(hands = frame.len(), wrist = ?hand.landmarks[0], "rendering hands");
            }
        }
    }

    /// Every joint slot, active ones first
    pub fn joints(&self) -> &[InstanceTransform] {
        &self.joints
    }

    /// Every bone slot, active ones first
    pub fn bones(&self) -> &[InstanceTransform] {
        &self.bones
    }

    pub fn active_joint_count(&self) -> usize {
        self.active_joints
    }

    pub fn active_bone_count(&self) -> usize {
        self.active_bones
    }

    /// Joint slots that are not suppressed
    pub fn visible_joint_count(&self) -> usize {
        self.joints.iter().filter(|t| !t.is_hidden()).count()
    }

    /// Bone slots that are not suppressed
    pub fn visible_bone_count(&self) -> usize {
        self.bones.iter().filter(|t| !t.is_hidden()).count()
    }
}

impl Default for SkeletonInstances {
    fn default() -> Self {
        Self::new()
    }
}

/// Map all 21 landmarks of a hand into scene space
pub fn map_hand(hand: &Hand, viewport: &Viewport, mapper: &CoordinateMapper) -> [Point3f; JOINTS_PER_HAND] {
    hand.landmarks.map(|lm| mapper.map(&lm, viewport))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use handscene_core::{HandJoint, Landmark, BONES_PER_HAND};

    fn spread_hand(offset: f32) -> Hand {
        let mut hand = Hand::default();
        for (i, lm) in hand.landmarks.iter_mut().enumerate() {
            *lm = Landmark::new(offset + i as f32 * 0.01, 0.2 + i as f32 * 0.03, 0.0);
        }
        hand
    }

    #[test]
    fn test_new_is_fully_hidden() {
        let skeleton = SkeletonInstances::new();
        assert_eq!(skeleton.visible_joint_count(), 0);
        assert_eq!(skeleton.visible_bone_count(), 0);
        assert_eq!(skeleton.joints().len(), MAX_JOINTS);
        assert_eq!(skeleton.bones().len(), MAX_BONES);
    }

    #[test]
    fn test_single_hand_fills_first_slots() {
        let mut skeleton = SkeletonInstances::new();
        let viewport = Viewport::new(10.0, 10.0);
        let mapper = CoordinateMapper::default();
        let hand = spread_hand(0.3);

        skeleton.update(&FrameLandmarks::from_hands(vec![hand]), &viewport, &mapper);

        assert_eq!(skeleton.active_joint_count(), JOINTS_PER_HAND);
        assert_eq!(skeleton.active_bone_count(), BONES_PER_HAND);
        assert_eq!(skeleton.visible_joint_count(), JOINTS_PER_HAND);
        assert_eq!(skeleton.visible_bone_count(), BONES_PER_HAND);

        let tip = mapper.map(hand.get(HandJoint::IndexFingerTip), &viewport);
        assert_relative_eq!(skeleton.joints()[8].position(), tip);
        assert!(skeleton.joints()[JOINTS_PER_HAND].is_hidden());
    }

    #[test]
    fn test_bone_spans_its_joints() {
        let mut skeleton = SkeletonInstances::new();
        let viewport = Viewport::new(10.0, 10.0);
        let mapper = CoordinateMapper::default();
        let hand = spread_hand(0.1);

        skeleton.update(&FrameLandmarks::from_hands(vec![hand]), &viewport, &mapper);

        let mapped = map_hand(&hand, &viewport, &mapper);
        for (slot, bone) in HAND_CONNECTIONS.iter().enumerate() {
            let seg = &skeleton.bones()[slot];
            let a = mapped[bone.start.index()];
            let b = mapped[bone.end.index()];
            assert_relative_eq!(seg.position(), nalgebra::center(&a, &b), epsilon = 1e-5);
            assert_relative_eq!(seg.scale.y, nalgebra::distance(&a, &b), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_three_hands_fill_at_most_two() {
        let mut skeleton = SkeletonInstances::new();
        let viewport = Viewport::new(10.0, 10.0);
        let mapper = CoordinateMapper::default();
        let hands = vec![spread_hand(0.1), spread_hand(0.3), spread_hand(0.5)];

        skeleton.update(&FrameLandmarks::from(hands), &viewport, &mapper);

        assert_eq!(skeleton.active_joint_count(), MAX_JOINTS);
        assert_eq!(skeleton.active_bone_count(), MAX_BONES);
        assert_eq!(skeleton.visible_joint_count(), MAX_JOINTS);
    }
}
