//! # handscene
//!
//! Hand-tracked fingertip interaction with a 3D scene.
//!
//! This is the umbrella crate that provides convenient access to all handscene functionality.
//! You can use this crate to get everything in one place, or use individual crates for
//! more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Landmarks, hand topology, viewport mapping, instance transforms
//! - **Algorithms**: Skeleton instance layout and fingertip interaction
//! - **I/O**: Recorded landmark files, synthetic sources, TOML configuration
//! - **Session**: Tracker/camera setup sequence and status reporting
//! - **Visualization**: Bevy viewer
//!
//! ## Quick Start
//!
//! ```rust
//! use handscene::prelude::*;
//!
//! let viewport = Viewport::new(10.0, 10.0);
//! let mapper = CoordinateMapper::default();
//!
//! let mut hand = Hand::default();
//! hand[HandJoint::IndexFingerTip] = Landmark::new(0.5, 0.5, 0.0);
//! let frame = FrameLandmarks::from_hands(vec![hand]);
//!
//! let evaluator = InteractionEvaluator::new(InteractionObject::default());
//! assert_eq!(evaluator.evaluate(&frame, &viewport, &mapper), TouchState::Touching);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables core, algorithms, io, and session
//! - `visualization`: Bevy viewer (pulls in bevy)
//! - `all`: Enables all features

// Re-export core functionality
pub use handscene_core::*;

// Re-export sub-crates
#[cfg(feature = "algorithms")]
pub use handscene_algorithms as algorithms;

#[cfg(feature = "io")]
pub use handscene_io as io;

#[cfg(feature = "session")]
pub use handscene_session as session;

#[cfg(feature = "visualization")]
pub use handscene_visualization as visualization;

/// Convenient imports for common use cases
pub mod prelude {
    pub use handscene_core::*;

    #[cfg(feature = "algorithms")]
    pub use handscene_algorithms::*;

    #[cfg(feature = "io")]
    pub use handscene_io::*;

    #[cfg(feature = "session")]
    pub use handscene_session::*;
}
