//! `larder-core` is the editing core of larder: caret-tracked, focus-aware text fields for a
//! retained-mode UI driven by a host frame loop.
//!
//! ## Design goals
//!
//! - Frame-loop driven: the host calls `update(dt, &mut ctx)` then `render(&mut surface)` once per
//!   frame, on one thread, for every widget in a fixed order.
//! - No hidden globals: click, pointer and focus ownership travel in an explicit
//!   [`context::InputContext`].
//! - Backend neutral: widgets draw through [`surface::Surface`] and measure through
//!   [`metrics::FontMetrics`]. [`surface::BufferSurface`] renders into a ratatui buffer.
//!
//! ## Getting started
//!
//! - [`field::TextField::entry`]: single-line input with placeholder and password masking.
//! - [`field::TextField::paragraph`]: fixed-height input that wraps into rows.
//! - [`crossterm_input`] (feature `crossterm`): turn terminal events into [`input::InputEvent`]s.
//!
//! Rejected edits (typing past the width budget, deleting at a boundary) are silent no-ops. They
//! are logged through `tracing` at trace level as [`error::EditError`]s.
pub mod geometry;
pub mod input;
pub mod keymap;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod bindings;
pub mod buffer;
pub mod context;
pub mod error;
pub mod metrics;
pub mod surface;
pub mod timer;

pub mod caret;
pub mod field;
