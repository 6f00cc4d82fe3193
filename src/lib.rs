//! Global keyboard and mouse capture for on-screen input overlays.
//!
//! `keylight` is the capture core of an input overlay: it intercepts every
//! keystroke and mouse event system-wide through the Win32 low-level hook
//! chain, maintains a concurrent press/release state table, classifies
//! cursor motion into 32 compass sectors, and condenses wheel rotation into
//! a short-lived scroll-activity signal. The rendering layer consumes all of
//! this through a narrow query/event interface and owns its own frame timer.
//!
//! # Architecture
//!
//! Two execution contexts exist. The OS invokes the hook callbacks
//! asynchronously on the installing thread's message pump; each callback
//! decodes its payload, updates shared state, and forwards down the hook
//! chain within the strict latency budget the OS enforces on low-level
//! hooks. Independently, the consumer drives `InputCapture::tick`
//! at a fixed cadence (~60 Hz) and queries press and scroll state once per
//! frame. The two sides share only per-key atomics, so neither ever blocks
//! the other.
//!
//! The pure pieces — the virtual-key table, press-state store, direction
//! classifier, motion sampler, and wheel aggregator — are platform-neutral
//! and fully testable anywhere. Only the hook channels and the composite
//! `capture` module require Windows.
//!
//! # Modules
//!
//! - [`codes`] — virtual-key/button identifiers and display symbols.
//! - [`events`] — normalized input events and payload decoding helpers.
//! - [`state`] — concurrent, edge-detecting press-state table.
//! - [`motion`] — cursor sampling and 32-sector direction classification.
//! - [`wheel`] — decaying scroll-activity aggregation.
//! - `capture` — the composite subsystem (Windows only).

pub mod codes;
pub mod events;
pub mod motion;
pub mod state;
pub mod wheel;

#[cfg(windows)]
pub mod capture;
#[cfg(windows)]
mod errors;
mod hook;
