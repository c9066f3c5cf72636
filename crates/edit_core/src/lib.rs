//! # edit_core
//!
//! UI-agnostic editing model for a native text-field view.
//!
//! This crate provides the building blocks the view adapter owns:
//! - [`EditField`]: the live text-input control: value, caret, selection,
//!   focus, soft-input visibility, and the forwarded appearance properties
//! - [`TextDelta`]: what a mutation actually did, so callers can report
//!   the changed range without re-deriving it
//! - [`TextMeasurer`]/[`count_wrapped_lines`]: visual line counting behind
//!   a measurement seam, for height reporting
//!
//! ## Design Principles
//!
//! This crate is intentionally free of dependencies: no channel layer, no
//! graphics framework, no platform APIs. It holds pure editing semantics
//! that are testable on their own and reusable under any embedding.
//!
//! Offsets stored inside the model are byte indices on UTF-8 character
//! boundaries; the character-index conversions for external contracts
//! live in [`text`].

pub mod text;

mod field;
mod wrap;

pub use field::{EditField, Padding, RangeError, TextDelta, TextStyle, VerticalAlign};
pub use wrap::{MonospaceMeasurer, TextMeasurer, count_wrapped_lines};
