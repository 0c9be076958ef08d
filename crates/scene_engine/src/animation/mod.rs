//! # Animation System
//!
//! Time-bounded, one-shot mutations of scene objects.
//!
//! - [`Animation`] owns the clock: duration, elapsed time and the running flag.
//!   It hands its [`AnimationEffect`] slices of time that never go past the end,
//!   so the total effect is applied exactly once however the ticks fall.
//! - Effects ([`RotationAnimation`], [`TranslationAnimation`], [`ScaleAnimation`],
//!   [`MaterialAnimation`]) only know how to apply a per-second rate. New kinds
//!   implement the trait without touching the clock.
//! - [`Animator`] chains animations for one actor and runs them one at a time.
//!
//! Animations reach their target through an [`ObjectRef`](crate::scene::ObjectRef)
//! resolved on every tick, so a removed target surfaces as
//! [`AnimationError::Target`] instead of a dangling reference.

#[allow(clippy::module_inception)]
mod animation;
mod animator;
mod effects;

#[cfg(test)]
mod scenario_tests;

pub use animation::{Animation, AnimationEffect};
pub(crate) use animation::check_duration;
pub use animator::{Animator, AnimatorState};
pub use effects::{MaterialAnimation, RotationAnimation, ScaleAnimation, TranslationAnimation};

use thiserror::Error;

use crate::scene::SceneError;

/// Animation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Duration must be positive and finite
    #[error("Animation duration must be positive and finite, got {0}")]
    InvalidDuration(f32),

    /// The target object could not be resolved
    #[error("Animation target unavailable: {0}")]
    Target(#[from] SceneError),
}
