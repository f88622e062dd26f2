//! Client-side effect bindings for the live card table.
//!
//! The server owns the game and streams DOM patches to the page. This crate
//! supplies the visual behavior the server cannot express: entrance and exit
//! animations for cards, round and turn indicators, celebration particles and
//! full-screen flashes. Each binding watches one element, diffs what the
//! server rendered against what it saw last time, and schedules short,
//! self-cleaning effects that only touch presentational properties.
//!
//! The core is browser-independent: bindings talk to a [`dom::Dom`]
//! capability and a [`schedule::Scheduler`], so the whole layer runs against
//! [`headless`] in tests. The `browser` feature adds the `web` module that
//! binds the same code to `web-sys` and the page's live socket.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`binding`] | Binding trait, lifecycle guard and kind registry |
//! | [`bindings`] | One binding per element kind (cards, indicators, effects) |
//! | [`change`] | Snapshot diffing for counts, rounds, turns and flags |
//! | [`schedule`] | Deferred tasks with element guards and stale-timer latches |
//! | [`dom`] | DOM capability trait and geometry/animation types |
//! | [`page`] | Page-level named events outside the patch stream |
//! | [`connection`] | Live connection config and the process-wide handle |
//! | [`headless`] | In-memory DOM, virtual clock and recording outbound sink |
//! | [`consts`] | Durations, class names and palettes |
//! | [`error`] | Host-boundary errors |

pub mod binding;
pub mod bindings;
pub mod change;
pub mod connection;
pub mod consts;
pub mod dom;
pub mod error;
pub mod headless;
pub mod page;
pub mod schedule;

#[cfg(feature = "browser")]
pub mod web;
