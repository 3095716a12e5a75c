//! Partial Animation Engine
//!
//! Drives the settle motion of a sheet between checkpoints.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Tweens**: Fixed-duration interpolation shaped by an easing curve
//! - **Deterministic stepping**: The scheduler can be ticked by an explicit `dt`
//! - **Interruptible**: Retargeting a spring keeps its current velocity

pub mod easing;
pub mod scheduler;
pub mod spring;
pub mod tween;

pub use easing::Easing;
pub use scheduler::{AnimationScheduler, SpringId, TweenId};
pub use spring::{Spring, SpringConfig};
pub use tween::Tween;
