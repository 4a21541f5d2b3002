//! BizAnalystics Pages
//!
//! Landing page, login/registration and the sales dashboard, built with
//! Leptos (WASM).
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application. Session state,
//! auth flows, page rules and chart construction come from the `bizanalytics`
//! core crate; this crate supplies the browser pieces: `localStorage`,
//! `fetch`, `window.location` and `<canvas>` drawing. Page changes are full
//! loads, so every page runs its guard on startup.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
