//! Sequencer running animations one after another

use crate::animation::{Animation, AnimationError};
use crate::scene::ObjectTable;

/// Lifecycle of an [`Animator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    /// No animations
    Empty,
    /// Has animations, the current one is not running
    Idle,
    /// The current animation is running
    Running,
    /// Every animation has completed
    Finished,
}

/// Ordered list of animations for one actor, run one at a time.
///
/// When the current animation completes during a tick, the next one is started
/// within the same tick but only receives time from the following tick onward.
#[derive(Debug, Default)]
pub struct Animator {
    animations: Vec<Animation>,
    current: usize,
}

impl Animator {
    /// Create an empty animator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an animation. Adding does not start anything.
    pub fn add_animation(&mut self, animation: Animation) {
        self.animations.push(animation);
    }

    /// Builder pattern: append an animation
    #[must_use]
    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.add_animation(animation);
        self
    }

    /// Replace the sequence and return to idle
    pub fn set_animations(&mut self, animations: Vec<Animation>) {
        self.animations = animations;
        self.current = 0;
        for animation in &mut self.animations {
            animation.reset();
        }
    }

    /// Start the current animation.
    ///
    /// A finished animator rewinds to its first animation; a running one restarts
    /// the current animation from its beginning.
    pub fn start(&mut self) {
        if self.animations.is_empty() {
            log::debug!("Ignoring start on an empty animator");
            return;
        }
        if self.current >= self.animations.len() {
            self.current = 0;
        }
        self.animations[self.current].start();
    }

    /// Stop everything and rewind to the first animation
    pub fn reset(&mut self) {
        self.current = 0;
        for animation in &mut self.animations {
            animation.reset();
        }
    }

    /// Forward `dt` to the current animation and advance past it once it completes
    pub fn tick(&mut self, objects: &mut ObjectTable, dt: f32) -> Result<(), AnimationError> {
        let Some(animation) = self.animations.get_mut(self.current) else {
            return Ok(());
        };
        if !animation.is_running() {
            return Ok(());
        }

        animation.tick(objects, dt)?;
        if !animation.is_running() {
            self.current += 1;
            match self.animations.get_mut(self.current) {
                Some(next) => {
                    next.start();
                    log::trace!("Animator advanced to animation {}", self.current);
                }
                None => log::trace!("Animator finished {} animations", self.animations.len()),
            }
        }
        Ok(())
    }

    /// Current lifecycle state
    pub fn state(&self) -> AnimatorState {
        match self.animations.get(self.current) {
            _ if self.animations.is_empty() => AnimatorState::Empty,
            None => AnimatorState::Finished,
            Some(animation) if animation.is_running() => AnimatorState::Running,
            Some(_) => AnimatorState::Idle,
        }
    }

    /// Whether an animation is currently running
    pub fn is_running(&self) -> bool {
        self.state() == AnimatorState::Running
    }

    /// Whether every animation has completed
    pub fn is_finished(&self) -> bool {
        self.state() == AnimatorState::Finished
    }

    /// Index of the current animation; equals [`Animator::len`] once finished
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Current animation, if any remain
    pub fn current(&self) -> Option<&Animation> {
        self.animations.get(self.current)
    }

    /// Number of animations in the sequence
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    /// Whether the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// The animations in sequence order
    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }
}
