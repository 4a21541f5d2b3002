//! Intro Overlay
//!
//! Door animation shown over the landing page. Class changes follow the
//! core [`IntroTimeline`]; the overlay hides once its fade animation ends,
//! which the owning page observes through the shared state signal.

use bizanalytics::pages::{IntroState, IntroStep, IntroTimeline};
use leptos::*;

#[component]
pub fn IntroOverlay(state: RwSignal<IntroState>) -> impl IntoView {
    for (at, step) in IntroTimeline::default().steps().iter().copied() {
        schedule(at.as_millis(), step, state);
    }

    // Fires for every animation inside the overlay; only the fade counts
    let on_animation_end = move |ev: ev::AnimationEvent| {
        if ev.animation_name() == IntroStep::FadeOut.class() {
            state.update(IntroState::finish);
        }
    };

    view! {
        <div
            id="intro-overlay"
            class=move || state.with(IntroState::overlay_class_attr)
            on:animationend=on_animation_end
        >
            <div class=move || state.with(IntroState::door_class_attr)>
                <div class="door door-left" />
                <div class="door door-right" />
                <div class="intro-person" />
            </div>
        </div>
    }
}

fn schedule(at_ms: u128, step: IntroStep, state: RwSignal<IntroState>) {
    let millis = u32::try_from(at_ms).unwrap_or(u32::MAX);
    gloo_timers::callback::Timeout::new(millis, move || {
        state.update(|s| s.apply(step));
    })
    .forget();
}
