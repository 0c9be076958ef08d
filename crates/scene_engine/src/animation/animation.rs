//! Time-bounded animation of one scene object

use std::fmt;

use crate::animation::AnimationError;
use crate::scene::{ObjectRef, ObjectTable, SceneObject};

/// What an animation does to its target.
///
/// Implementors receive the target and a slice of time that never extends past
/// the animation's end, so an effect that applies `rate * dt` ends up applying
/// exactly `rate * duration` over the animation's life.
pub trait AnimationEffect: fmt::Debug {
    /// Apply `dt` seconds worth of change to `object`
    fn apply(&mut self, object: &mut SceneObject, dt: f32);
}

/// Shortfall, relative to the duration, still counted as reaching the end
const FINISH_TOLERANCE: f64 = 5e-7;

/// Reject durations an animation cannot run for
pub(crate) fn check_duration(duration: f32) -> Result<f32, AnimationError> {
    if duration.is_finite() && duration > 0.0 {
        Ok(duration)
    } else {
        Err(AnimationError::InvalidDuration(duration))
    }
}

/// An effect bound to a target object and a duration.
///
/// Starts stopped. [`Animation::start`] rewinds and runs it; [`Animation::tick`]
/// advances it until the elapsed time reaches the duration, after which further
/// ticks are ignored until the next start.
#[derive(Debug)]
pub struct Animation {
    target: ObjectRef,
    duration: f32,
    elapsed: f64,
    running: bool,
    effect: Box<dyn AnimationEffect>,
}

impl Animation {
    /// Bind `effect` to `target` for `duration` seconds
    pub fn new(
        target: ObjectRef,
        duration: f32,
        effect: impl AnimationEffect + 'static,
    ) -> Result<Self, AnimationError> {
        Ok(Self {
            target,
            duration: check_duration(duration)?,
            elapsed: 0.0,
            running: false,
            effect: Box::new(effect),
        })
    }

    /// Rewind to the beginning and start running
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
    }

    /// Stop and rewind without applying anything
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.running = false;
    }

    /// Advance by `dt` seconds.
    ///
    /// Does nothing while stopped. The effect receives at most the time that
    /// remains; the tick that reaches the duration stops the animation. Frame
    /// deltas that add up to the duration finish it even when their f32 sum
    /// falls a few ulps short. Negative or NaN `dt` is treated as zero, and an
    /// infinite `dt` finishes the animation.
    #[allow(clippy::cast_possible_truncation)]
    pub fn tick(&mut self, objects: &mut ObjectTable, dt: f32) -> Result<(), AnimationError> {
        if !self.running {
            return Ok(());
        }

        let dt = if dt.is_nan() || dt < 0.0 {
            log::warn!("Ignoring invalid animation delta {} for {}", dt, self.target);
            0.0
        } else {
            f64::from(dt)
        };

        let object = self.target.resolve_mut(objects)?;
        let duration = f64::from(self.duration);
        let remaining = duration - self.elapsed;
        if dt >= remaining - duration * FINISH_TOLERANCE {
            self.effect.apply(object, remaining as f32);
            self.elapsed = duration;
            self.running = false;
            log::trace!("Animation on {} finished after {}s", self.target, self.duration);
        } else {
            self.effect.apply(object, dt as f32);
            self.elapsed += dt;
        }
        Ok(())
    }

    /// Whether the animation is consuming ticks
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds applied so far
    #[allow(clippy::cast_possible_truncation)]
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    /// Total length in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Fraction of the duration applied so far, 0..=1
    pub fn progress(&self) -> f32 {
        self.elapsed() / self.duration
    }

    /// Object this animation mutates
    pub fn target(&self) -> &ObjectRef {
        &self.target
    }
}
