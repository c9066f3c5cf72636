//! The view adapter: owns one text-field widget and one method channel,
//! forwards remote commands into the widget, and reports widget changes
//! back over the channel.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use channel::{MethodCall, MethodChannel, MethodResult, Messenger};
use edit_core::{EditField, Padding, TextDelta, TextMeasurer, VerticalAlign};
use serde_json::{Value, json};

use crate::params::CreationParams;

/// Fixed channel-name prefix. The hosting framework routes calls on
/// `"<VIEW_TYPE_ID>_<view_id>"`; external contract, do not change.
pub const VIEW_TYPE_ID: &str = "com.fanbook.flutter_text_field";

/// Reported widget height is `line count × this` (px).
pub const LINE_HEIGHT_PX: f64 = 40.0;

/// Construction failure; no widget or channel exists when this is returned.
#[derive(Debug)]
pub enum CreateError {
    Params(serde_json::Error),
}

/// One platform text-field view: a widget, a channel, 1:1 lifetimes.
///
/// Created via [`TextFieldView::create`], which returns the shared handle
/// the inbound command handler also holds (weakly): the view is the
/// channel's call handler. Dropping the handle after
/// [`TextFieldView::dispose`] tears both down together.
pub struct TextFieldView {
    view_id: i64,
    field: EditField,
    channel: MethodChannel,
    measurer: Box<dyn TextMeasurer>,
}

impl TextFieldView {
    /// Build the widget from a creation map, apply every configuration
    /// option in fixed order, then bind the command handler to the
    /// per-view channel. Fails fast on a bad map; callers never observe a
    /// partially-initialized widget.
    pub fn create(
        view_id: i64,
        creation_params: &Value,
        messenger: Rc<dyn Messenger>,
        measurer: Box<dyn TextMeasurer>,
    ) -> Result<Rc<RefCell<Self>>, CreateError> {
        let params = CreationParams::from_value(creation_params).map_err(CreateError::Params)?;
        log::debug!(target: "fieldbridge.view", "create view {view_id}: {params:?}");

        // Configuration order: layout sizing, padding/alignment, width,
        // initial text, text style, placeholder, length filter, chrome.
        // The initial text is applied before the length filter exists and
        // is therefore never truncated by it.
        let mut field = EditField::new();
        field.set_min_lines(1);
        field.set_padding(Padding {
            left: 14.0,
            top: 0.0,
            right: 6.0,
            bottom: 0.0,
        });
        field.set_alignment(VerticalAlign::Top);
        field.set_width(params.width as f32);
        field.set_text(&params.text);
        field.set_text_style(params.text_style.into());
        field.set_placeholder(&params.place_holder);
        field.set_placeholder_style(params.place_holder_style.into());
        field.set_max_length(match params.max_length {
            0 => None,
            n => Some(n as usize),
        });
        field.set_decorated(false);

        let channel = MethodChannel::new(messenger, format!("{VIEW_TYPE_ID}_{view_id}"));
        let view = Rc::new(RefCell::new(Self {
            view_id,
            field,
            channel,
            measurer,
        }));

        let weak: Weak<RefCell<Self>> = Rc::downgrade(&view);
        view.borrow().channel.set_handler(Some(Rc::new(move |call| {
            match weak.upgrade() {
                Some(view) => view.borrow_mut().on_method_call(call),
                None => MethodResult::NotImplemented,
            }
        })));

        Ok(view)
    }

    pub fn view_id(&self) -> i64 {
        self.view_id
    }

    pub fn channel_name(&self) -> &str {
        self.channel.name()
    }

    /// The widget itself; its state is the single source of truth.
    pub fn field(&self) -> &EditField {
        &self.field
    }

    /// Detach the command handler from the channel. The widget is dropped
    /// with the adapter; ownership of the on-screen control reverts to the
    /// hosting layout system.
    pub fn dispose(&self) {
        log::debug!(target: "fieldbridge.view", "dispose view {}", self.view_id);
        self.channel.set_handler(None);
    }

    // --- inbound commands --------------------------------------------------

    fn on_method_call(&mut self, call: &MethodCall) -> MethodResult {
        log::trace!(target: "fieldbridge.view", "view {}: inbound {}", self.view_id, call.method);
        match call.method.as_str() {
            "setText" => self.handle_set_text(&call.args),
            "updateFocus" => self.handle_update_focus(&call.args),
            "replace" => self.handle_replace(&call.args),
            "insertText" => self.handle_insert_text(&call.args),
            // Accepted but inert until rich-content blocks land.
            "insertBlock" => MethodResult::ok(),
            // Transparency is applied by the host view hierarchy.
            "setAlpha" => MethodResult::ok(),
            _ => MethodResult::NotImplemented,
        }
    }

    fn handle_set_text(&mut self, args: &Value) -> MethodResult {
        let text = args.as_str().unwrap_or_default();
        let before_lines = self.line_count();
        let delta = self.field.set_text(text);
        self.report_change(&delta, before_lines);
        MethodResult::ok()
    }

    fn handle_update_focus(&mut self, args: &Value) -> MethodResult {
        let focus = args.as_bool().unwrap_or_default();
        self.set_focus(focus);
        if !focus {
            self.field.set_soft_input_visible(false);
        }
        MethodResult::ok()
    }

    fn handle_replace(&mut self, args: &Value) -> MethodResult {
        let text = args.get("text").and_then(Value::as_str).unwrap_or_default();
        let start = args
            .get("selection_start")
            .and_then(Value::as_i64)
            .unwrap_or(-1);
        let end = args
            .get("selection_end")
            .and_then(Value::as_i64)
            .unwrap_or(-1);
        if start < 0 || end < 0 || start > end {
            return MethodResult::error("replace", "replace range error");
        }

        let before_lines = self.line_count();
        match self.field.replace_range(start as usize, end as usize, text) {
            Ok(delta) => {
                self.report_change(&delta, before_lines);
                MethodResult::ok()
            }
            Err(_) => MethodResult::error("replace", "replace range error"),
        }
    }

    fn handle_insert_text(&mut self, args: &Value) -> MethodResult {
        let text = args.as_str().unwrap_or_default();
        let before_lines = self.line_count();
        let delta = self.field.insert_at_selection_start(text);
        self.report_change(&delta, before_lines);
        MethodResult::ok()
    }

    // --- host input surface ------------------------------------------------
    //
    // The widget is also mutated locally (typing, gestures); the host
    // embedding routes that input through here so the same change
    // reporting runs for every mutation, remote or local.

    pub fn commit_text(&mut self, text: &str) {
        let before_lines = self.line_count();
        if let Some(delta) = self.field.commit_text(text) {
            self.report_change(&delta, before_lines);
        }
    }

    pub fn backspace(&mut self) {
        let before_lines = self.line_count();
        if let Some(delta) = self.field.backspace() {
            self.report_change(&delta, before_lines);
        }
    }

    pub fn delete_forward(&mut self) {
        let before_lines = self.line_count();
        if let Some(delta) = self.field.delete_forward() {
            self.report_change(&delta, before_lines);
        }
    }

    pub fn set_caret(&mut self, char_index: usize, selecting: bool) {
        self.field.set_caret(char_index, selecting);
    }

    pub fn select_all(&mut self) {
        self.field.select_all();
    }

    /// The host reports a focus transition (e.g. the user tapped the
    /// field, or focus moved elsewhere).
    pub fn notify_focus(&mut self, focused: bool) {
        self.set_focus(focused);
    }

    pub fn set_soft_input_visible(&mut self, visible: bool) {
        self.field.set_soft_input_visible(visible);
    }

    // --- outbound events ---------------------------------------------------

    fn set_focus(&mut self, focused: bool) {
        if self.field.set_focused(focused) {
            log::debug!(target: "fieldbridge.view", "view {}: focus {focused}", self.view_id);
            self.channel.invoke("updateFocus", Value::Bool(focused));
        }
    }

    /// Report an applied mutation: height first when the visual line count
    /// moved, then the value change itself. Fired once per mutation, after
    /// the widget state is already updated.
    fn report_change(&mut self, delta: &TextDelta, before_lines: usize) {
        let after_lines = self.line_count();
        if after_lines != before_lines {
            log::trace!(
                target: "fieldbridge.view",
                "view {}: lines {before_lines} -> {after_lines}",
                self.view_id
            );
            self.channel
                .invoke("updateHeight", json!(after_lines as f64 * LINE_HEIGHT_PX));
        }

        let value = self.field.value();
        let start = edit_core::text::byte_to_char(value, delta.start);
        let count = delta.inserted.chars().count();
        log::trace!(
            target: "fieldbridge.view",
            "view {}: text changed at {start} (+{count})",
            self.view_id
        );
        self.channel.invoke(
            "updateValue",
            json!({
                "text": value,
                // Echo of `text`, reserved for future structured content.
                "data": value,
                "selection_start": start,
                "selection_end": start + count,
                "input_text": delta.inserted,
            }),
        );
    }

    fn line_count(&self) -> usize {
        self.field.line_count(self.measurer.as_ref())
    }
}
