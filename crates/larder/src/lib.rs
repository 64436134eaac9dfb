//! `larder` is the storage-inventory UI built on [`larder_core`]: record types, a themed slot
//! entry form and the buttons it needs.
//!
//! The editing core is re-exported so hosts depend on one crate.
pub use larder_core::bindings;
pub use larder_core::buffer;
pub use larder_core::caret;
pub use larder_core::context;
#[cfg(feature = "crossterm")]
pub use larder_core::crossterm_input;
pub use larder_core::error;
pub use larder_core::field;
pub use larder_core::geometry;
pub use larder_core::input;
pub use larder_core::keymap;
pub use larder_core::metrics;
pub use larder_core::surface;
pub use larder_core::timer;

pub mod theme;

pub mod models;

pub mod button;
pub mod form;
