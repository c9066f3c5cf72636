//! # fieldbridge
//!
//! Bridges a native text-field model to a cross-platform UI framework:
//! the framework creates a [`TextFieldView`] with a creation map, mutates
//! it over a per-view method channel (`setText`, `updateFocus`, `replace`,
//! `insertText`, `insertBlock`, `setAlpha`), and receives `updateValue`,
//! `updateHeight`, and `updateFocus` events back on the same channel.
//!
//! The widget itself is the UI-agnostic [`EditField`] from `edit_core`;
//! the conduit is a [`channel::MethodChannel`] bound to whatever
//! [`channel::Messenger`] transport the hosting framework supplies.
//! Rendering, layout, and IME behavior stay with the host toolkit; this
//! crate is only the contract between the two sides.

pub mod params;

mod view;

pub use view::{CreateError, LINE_HEIGHT_PX, TextFieldView, VIEW_TYPE_ID};

pub use channel::{
    InProcessMessenger, Messenger, MethodCall, MethodChannel, MethodHandler, MethodResult,
    OutboundCall,
};
pub use edit_core::{
    EditField, MonospaceMeasurer, Padding, RangeError, TextDelta, TextMeasurer, TextStyle,
    VerticalAlign,
};
