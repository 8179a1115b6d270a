//! Core data types shared by yubitouch components.
//!
//! - **Events**: [`TouchEvent`] tags emitted by touch detectors and the
//!   [`TouchSource`] they belong to.

pub mod events;

pub use events::{ParseTouchEventError, TouchEvent, TouchSource};
