//! Windowing and event polling
//!
//! The frame loop only needs three things from the window system: the events
//! since the last frame, the framebuffer size and whether the window wants to
//! close. [`HeadlessPlatform`] provides them from a script.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::application::AppEvent;

/// Window system seen by the frame loop
pub trait Platform {
    /// Events received since the previous call
    fn poll_events(&mut self) -> Vec<AppEvent>;

    /// Current framebuffer size in pixels
    fn framebuffer_size(&self) -> (u32, u32);

    /// Whether the user asked to close the window
    fn should_close(&self) -> bool;
}

/// An event delivered at the start of a given frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    /// Zero-based frame number
    pub frame: u64,
    /// Event to deliver
    pub event: AppEvent,
}

/// Platform without a window, replaying scripted events
#[derive(Debug, Clone)]
pub struct HeadlessPlatform {
    width: u32,
    height: u32,
    frame: u64,
    script: BTreeMap<u64, Vec<AppEvent>>,
    close_requested: bool,
}

impl HeadlessPlatform {
    /// Platform with a framebuffer of the given size and no events
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frame: 0,
            script: BTreeMap::new(),
            close_requested: false,
        }
    }

    /// Builder pattern: deliver `event` at the start of `frame`
    #[must_use]
    pub fn with_event(mut self, frame: u64, event: AppEvent) -> Self {
        self.schedule(frame, event);
        self
    }

    /// Builder pattern: deliver every event of `script`
    #[must_use]
    pub fn with_script(mut self, script: impl IntoIterator<Item = ScriptedEvent>) -> Self {
        for scripted in script {
            self.schedule(scripted.frame, scripted.event);
        }
        self
    }

    /// Deliver `event` at the start of `frame`
    pub fn schedule(&mut self, frame: u64, event: AppEvent) {
        self.script.entry(frame).or_default().push(event);
    }

    /// Number of frames polled so far
    pub fn frames_polled(&self) -> u64 {
        self.frame
    }
}

impl Platform for HeadlessPlatform {
    fn poll_events(&mut self) -> Vec<AppEvent> {
        let events = self.script.remove(&self.frame).unwrap_or_default();
        self.frame += 1;

        for event in &events {
            match *event {
                AppEvent::WindowResized { width, height } => {
                    self.width = width;
                    self.height = height;
                }
                AppEvent::WindowCloseRequested => self.close_requested = true,
                _ => {}
            }
        }
        events
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn should_close(&self) -> bool {
        self.close_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;

    #[test]
    fn test_events_delivered_on_their_frame() {
        let mut platform = HeadlessPlatform::new(800, 600)
            .with_event(1, AppEvent::KeyPressed(KeyCode::E))
            .with_event(1, AppEvent::KeyPressed(KeyCode::Q))
            .with_event(3, AppEvent::KeyReleased(KeyCode::E));

        assert!(platform.poll_events().is_empty());
        assert_eq!(
            platform.poll_events(),
            vec![AppEvent::KeyPressed(KeyCode::E), AppEvent::KeyPressed(KeyCode::Q)]
        );
        assert!(platform.poll_events().is_empty());
        assert_eq!(platform.poll_events(), vec![AppEvent::KeyReleased(KeyCode::E)]);
        assert_eq!(platform.frames_polled(), 4);
    }

    #[test]
    fn test_resize_and_close() {
        let mut platform = HeadlessPlatform::new(800, 600).with_script([
            ScriptedEvent {
                frame: 0,
                event: AppEvent::WindowResized { width: 1920, height: 1080 },
            },
            ScriptedEvent {
                frame: 1,
                event: AppEvent::WindowCloseRequested,
            },
        ]);

        platform.poll_events();
        assert_eq!(platform.framebuffer_size(), (1920, 1080));
        assert!(!platform.should_close());
        platform.poll_events();
        assert!(platform.should_close());
    }
}
