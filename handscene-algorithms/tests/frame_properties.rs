//! Integration tests for the per-frame skeleton layout and touch evaluation
//!
//! These drive full frames through the mapper, the skeleton layout and the
//! interaction evaluator together, the way the viewer does every frame.

use approx::assert_relative_eq;
use handscene_algorithms::*;
use handscene_core::{
    CoordinateMapper, FrameLandmarks, Hand, HandJoint, Landmark, Point3f, Viewport,
    BONES_PER_HAND, JOINTS_PER_HAND, MAX_BONES, MAX_JOINTS,
};

/// An open hand with its wrist at `(cx, 0.8)` and fingers fanning upwards
fn open_hand(cx: f32) -> Hand {
    let mut hand = Hand::default();
    hand[HandJoint::Wrist] = Landmark::new(cx, 0.8, 0.0);

    let fingers = [
        [HandJoint::ThumbCmc, HandJoint::ThumbMcp, HandJoint::ThumbIp, HandJoint::ThumbTip],
        [HandJoint::IndexFingerMcp, HandJoint::IndexFingerPip, HandJoint::IndexFingerDip, HandJoint::IndexFingerTip],
        [HandJoint::MiddleFingerMcp, HandJoint::MiddleFingerPip, HandJoint::MiddleFingerDip, HandJoint::MiddleFingerTip],
        [HandJoint::RingFingerMcp, HandJoint::RingFingerPip, HandJoint::RingFingerDip, HandJoint::RingFingerTip],
        [HandJoint::PinkyMcp, HandJoint::PinkyPip, HandJoint::PinkyDip, HandJoint::PinkyTip],
    ];

    for (f, chain) in fingers.iter().enumerate() {
        let spread = (f as f32 - 2.0) * 0.03;
        for (k, joint) in chain.iter().enumerate() {
            let step = (k + 1) as f32;
            hand[*joint] = Landmark::new(cx + spread * step, 0.8 - 0.05 * step, -0.01 * step);
        }
    }
    hand
}

fn hand_with_tip(x: f32, y: f32) -> Hand {
    let mut hand = open_hand(x);
    hand[HandJoint::IndexFingerTip] = Landmark::new(x, y, 0.0);
    hand
}

#[test]
fn test_zero_hands_hides_everything() {
    let mut skeleton = SkeletonInstances::new();
    skeleton.update(&FrameLandmarks::empty(), &Viewport::new(10.0, 10.0), &CoordinateMapper::default());

    assert_eq!(skeleton.visible_joint_count(), 0);
    assert_eq!(skeleton.visible_bone_count(), 0);
    assert!(skeleton.joints().iter().all(|t| t.is_hidden()));
    assert!(skeleton.bones().iter().all(|t| t.is_hidden()));
    assert_relative_eq!(skeleton.joints()[0].position(), Point3f::new(0.0, 0.0, 1000.0));
}

#[test]
fn test_two_hands_fill_every_slot() {
    let mut skeleton = SkeletonInstances::new();
    let frame = FrameLandmarks::from_hands(vec![open_hand(0.3), open_hand(0.7)]);
    skeleton.update(&frame, &Viewport::new(10.0, 10.0), &CoordinateMapper::default());

    assert_eq!(skeleton.visible_joint_count(), MAX_JOINTS);
    assert_eq!(skeleton.visible_bone_count(), MAX_BONES);
    assert_eq!(skeleton.visible_joint_count(), 42);
    assert_eq!(skeleton.visible_bone_count(), 40);
}

#[test]
fn test_dropping_a_hand_hides_its_slots() {
    let mut skeleton = SkeletonInstances::new();
    let viewport = Viewport::new(10.0, 10.0);
    let mapper = CoordinateMapper::default();

    skeleton.update(&FrameLandmarks::from_hands(vec![open_hand(0.3), open_hand(0.7)]), &viewport, &mapper);
    skeleton.update(&FrameLandmarks::from_hands(vec![open_hand(0.4)]), &viewport, &mapper);

    assert_eq!(skeleton.visible_joint_count(), JOINTS_PER_HAND);
    assert_eq!(skeleton.visible_bone_count(), BONES_PER_HAND);
    assert!(skeleton.joints()[JOINTS_PER_HAND..].iter().all(|t| t.is_hidden()));
    assert!(skeleton.bones()[BONES_PER_HAND..].iter().all(|t| t.is_hidden()));

    // The remaining hand's wrist is where the new frame put it, not the old one
    let wrist = mapper.map(&Landmark::new(0.4, 0.8, 0.0), &viewport);
    assert_relative_eq!(skeleton.joints()[0].position(), wrist, epsilon = 1e-5);
}

#[test]
fn test_fingertip_at_centre_touches() {
    let evaluator = InteractionEvaluator::new(InteractionObject::new(Point3f::origin(), 1.5));
    let viewport = Viewport::new(10.0, 10.0);
    let mapper = CoordinateMapper::default();

    let frame = FrameLandmarks::from_hands(vec![hand_with_tip(0.5, 0.5)]);
    let tip = mapper.map(frame.hands()[0].index_tip(), &viewport);
    assert_relative_eq!(tip, Point3f::origin());
    assert_eq!(evaluator.evaluate(&frame, &viewport, &mapper), TouchState::Touching);
}

#[test]
fn test_fingertip_at_edge_does_not_touch() {
    let evaluator = InteractionEvaluator::new(InteractionObject::new(Point3f::origin(), 1.5));
    let viewport = Viewport::new(10.0, 10.0);
    let mapper = CoordinateMapper::default();

    let frame = FrameLandmarks::from_hands(vec![hand_with_tip(0.0, 0.5)]);
    let tip = mapper.map(frame.hands()[0].index_tip(), &viewport);
    assert_relative_eq!(tip.x, 5.0);

    assert_relative_eq!(evaluator.nearest_distance(&frame, &viewport, &mapper).unwrap(), 5.0);
    assert_eq!(evaluator.evaluate(&frame, &viewport, &mapper), TouchState::Idle);
}

#[test]
fn test_just_outside_radius_is_idle() {
    let radius = 1.5;
    let evaluator = InteractionEvaluator::new(InteractionObject::new(Point3f::origin(), radius));
    let viewport = Viewport::new(10.0, 10.0);
    let mapper = CoordinateMapper::default();

    // Tip mapped to x = -(radius + 0.01)
    let x = 0.5 + (radius + 0.01) / viewport.width;
    let frame = FrameLandmarks::from_hands(vec![hand_with_tip(x, 0.5)]);
    assert_eq!(evaluator.evaluate(&frame, &viewport, &mapper), TouchState::Idle);
}

#[test]
fn test_touch_is_recomputed_every_frame() {
    let evaluator = InteractionEvaluator::new(InteractionObject::default());
    let viewport = Viewport::new(10.0, 10.0);
    let mapper = CoordinateMapper::default();
    let mut motion = ToolMotion::default();

    let touching = FrameLandmarks::from_hands(vec![hand_with_tip(0.5, 0.5)]);
    let away = FrameLandmarks::from_hands(vec![hand_with_tip(0.0, 0.0)]);

    let states: Vec<_> = [&touching, &away, &touching, &FrameLandmarks::empty()]
        .iter()
        .map(|frame| {
            let state = evaluator.evaluate(frame, &viewport, &mapper);
            motion.step(state);
            state
        })
        .collect();

    assert_eq!(
        states,
        vec![TouchState::Touching, TouchState::Idle, TouchState::Touching, TouchState::Idle]
    );
    assert_relative_eq!(motion.angles.x, 0.1);
}
