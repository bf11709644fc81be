//! Scripted landmark source for running without a tracker or recording

use crate::LandmarkTimeline;
use handscene_core::{FrameLandmarks, Hand, HandJoint, Landmark};

/// Finger chains from knuckle to tip, thumb first
const FINGERS: [[HandJoint; 4]; 5] = [
    [HandJoint::ThumbCmc, HandJoint::ThumbMcp, HandJoint::ThumbIp, HandJoint::ThumbTip],
    [HandJoint::IndexFingerMcp, HandJoint::IndexFingerPip, HandJoint::IndexFingerDip, HandJoint::IndexFingerTip],
    [HandJoint::MiddleFingerMcp, HandJoint::MiddleFingerPip, HandJoint::MiddleFingerDip, HandJoint::MiddleFingerTip],
    [HandJoint::RingFingerMcp, HandJoint::RingFingerPip, HandJoint::RingFingerDip, HandJoint::RingFingerTip],
    [HandJoint::PinkyMcp, HandJoint::PinkyPip, HandJoint::PinkyDip, HandJoint::PinkyTip],
];

/// An open, upright hand whose index fingertip sits at `(tip_x, tip_y)`
pub fn open_hand(tip_x: f32, tip_y: f32) -> Hand {
    let mut hand = Hand::default();
    hand[HandJoint::Wrist] = Landmark::new(0.0, 0.0, 0.0);

    for (f, chain) in FINGERS.iter().enumerate() {
        // Fingers fan out from the wrist; the thumb splays further sideways
        let spread = (f as f32 - 1.0) * 0.025 + if f == 0 { -0.03 } else { 0.0 };
        let segment = if f == 0 { 0.035 } else { 0.05 };
        for (k, joint) in chain.iter().enumerate() {
            let step = (k + 1) as f32;
            hand[*joint] = Landmark::new(spread * step, -segment * step, -0.01 * step);
        }
    }

    // Translate so the index tip lands on the target
    let tip = *hand.index_tip();
    for lm in hand.landmarks.iter_mut() {
        lm.x += tip_x - tip.x;
        lm.y += tip_y - tip.y;
    }
    hand
}

/// A hand sweeping back and forth across the view
///
/// The index fingertip follows `x = 0.5 + amplitude * sin(2 pi t / period)` at
/// a fixed height, so it passes through the centre of the view twice per period.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedHand {
    pub period_ms: f64,
    pub amplitude: f32,
    pub tip_y: f32,
    /// Add a second, mirrored hand
    pub mirrored: bool,
}

impl ScriptedHand {
    pub fn new(period_ms: f64, amplitude: f32) -> Self {
        Self {
            period_ms,
            amplitude,
            tip_y: 0.5,
            mirrored: false,
        }
    }

    pub fn with_mirrored_hand(mut self) -> Self {
        self.mirrored = true;
        self
    }

    /// Fingertip x at `elapsed_ms`
    pub fn tip_x(&self, elapsed_ms: f64) -> f32 {
        let phase = (elapsed_ms / self.period_ms).rem_euclid(1.0);
        0.5 + self.amplitude * (std::f64::consts::TAU * phase).sin() as f32
    }
}

impl Default for ScriptedHand {
    fn default() -> Self {
        Self::new(6000.0, 0.35)
    }
}

impl LandmarkTimeline for ScriptedHand {
    fn frame_at(&self, elapsed_ms: f64) -> FrameLandmarks {
        let x = self.tip_x(elapsed_ms);
        let mut hands = vec![open_hand(x, self.tip_y)];
        if self.mirrored {
            hands.push(open_hand(1.0 - x, self.tip_y + 0.2));
        }
        FrameLandmarks::from_hands(hands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_open_hand_places_tip() {
        let hand = open_hand(0.3, 0.6);
        assert_relative_eq!(hand.index_tip().x, 0.3, epsilon = 1e-6);
        assert_relative_eq!(hand.index_tip().y, 0.6, epsilon = 1e-6);
        // Wrist sits below the fingertip in image space
        assert!(hand.get(HandJoint::Wrist).y > 0.6);
    }

    #[test]
    fn test_sweep_passes_through_centre() {
        let script = ScriptedHand::new(4000.0, 0.4);
        assert_relative_eq!(script.tip_x(0.0), 0.5, epsilon = 1e-6);
        assert_relative_eq!(script.tip_x(1000.0), 0.9, epsilon = 1e-6);
        assert_relative_eq!(script.tip_x(3000.0), 0.1, epsilon = 1e-6);
        assert_relative_eq!(script.tip_x(4000.0), 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_mirrored_adds_second_hand() {
        let frame = ScriptedHand::default().with_mirrored_hand().frame_at(0.0);
        assert_eq!(frame.len(), 2);
        assert_eq!(ScriptedHand::default().frame_at(0.0).len(), 1);
    }
}
