//! Landing page intro animation
//!
//! Three class changes on a fixed clock: the doors open, a figure walks in,
//! and the overlay fades out. Once the fade's CSS animation ends the overlay
//! is hidden for good.

use std::time::Duration;

/// Element a step applies its class to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroTarget {
    /// `.door-scene`
    DoorScene,
    /// `#intro-overlay`
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroStep {
    OpenDoors,
    WalkIn,
    FadeOut,
}

impl IntroStep {
    pub fn class(&self) -> &'static str {
        match self {
            IntroStep::OpenDoors => "intro-doors-open",
            IntroStep::WalkIn => "intro-person-walk",
            IntroStep::FadeOut => "intro-fade-out",
        }
    }

    pub fn target(&self) -> IntroTarget {
        match self {
            IntroStep::OpenDoors | IntroStep::WalkIn => IntroTarget::DoorScene,
            IntroStep::FadeOut => IntroTarget::Overlay,
        }
    }
}

/// Step schedule, offsets measured from page load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntroTimeline {
    steps: Vec<(Duration, IntroStep)>,
}

impl Default for IntroTimeline {
    fn default() -> Self {
        Self {
            steps: vec![
                (Duration::from_millis(800), IntroStep::OpenDoors),
                (Duration::from_millis(1500), IntroStep::WalkIn),
                (Duration::from_millis(2600), IntroStep::FadeOut),
            ],
        }
    }
}

impl IntroTimeline {
    pub fn steps(&self) -> &[(Duration, IntroStep)] {
        &self.steps
    }

    /// Offset of the final step
    pub fn duration(&self) -> Duration {
        self.steps.last().map(|(at, _)| *at).unwrap_or_default()
    }

    /// Classes applied once `elapsed` has passed
    pub fn state_at(&self, elapsed: Duration) -> IntroState {
        let mut state = IntroState::default();
        for (at, step) in &self.steps {
            if elapsed >= *at {
                state.apply(*step);
            }
        }
        state
    }
}

/// Classes applied so far, plus whether the overlay is gone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntroState {
    pub door_classes: Vec<&'static str>,
    pub overlay_classes: Vec<&'static str>,
    pub overlay_hidden: bool,
}

impl IntroState {
    pub fn apply(&mut self, step: IntroStep) {
        let classes = match step.target() {
            IntroTarget::DoorScene => &mut self.door_classes,
            IntroTarget::Overlay => &mut self.overlay_classes,
        };
        if !classes.contains(&step.class()) {
            classes.push(step.class());
        }
    }

    /// Called when the overlay's fade animation finishes
    ///
    /// Ignored until the fade has actually started.
    pub fn finish(&mut self) {
        if self.overlay_classes.contains(&IntroStep::FadeOut.class()) {
            self.overlay_hidden = true;
        }
    }

    /// Space-separated class attribute for the door scene
    pub fn door_class_attr(&self) -> String {
        join_classes("door-scene", &self.door_classes)
    }

    /// Space-separated class attribute for the overlay
    pub fn overlay_class_attr(&self) -> String {
        let mut attr = join_classes("intro-overlay", &self.overlay_classes);
        if self.overlay_hidden {
            attr.push_str(" hidden");
        }
        attr
    }
}

fn join_classes(base: &str, extra: &[&str]) -> String {
    std::iter::once(base)
        .chain(extra.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_before_first_step() {
        let timeline = IntroTimeline::default();
        let state = timeline.state_at(Duration::from_millis(799));
        assert_eq!(state, IntroState::default());
        assert_eq!(state.door_class_attr(), "door-scene");
    }

    #[test]
    fn test_state_progression() {
        let timeline = IntroTimeline::default();

        let doors = timeline.state_at(Duration::from_millis(800));
        assert_eq!(doors.door_classes, vec!["intro-doors-open"]);
        assert!(doors.overlay_classes.is_empty());

        let walking = timeline.state_at(Duration::from_millis(2000));
        assert_eq!(
            walking.door_class_attr(),
            "door-scene intro-doors-open intro-person-walk"
        );

        let fading = timeline.state_at(timeline.duration());
        assert_eq!(fading.overlay_class_attr(), "intro-overlay intro-fade-out");
        assert!(!fading.overlay_hidden);
    }

    #[test]
    fn test_finish_only_after_fade() {
        let timeline = IntroTimeline::default();

        let mut early = timeline.state_at(Duration::from_millis(1000));
        early.finish();
        assert!(!early.overlay_hidden);

        let mut done = timeline.state_at(Duration::from_secs(3));
        done.finish();
        assert!(done.overlay_hidden);
        assert!(done.overlay_class_attr().ends_with(" hidden"));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut state = IntroState::default();
        state.apply(IntroStep::OpenDoors);
        state.apply(IntroStep::OpenDoors);
        assert_eq!(state.door_classes.len(), 1);
    }
}
