//! Creation-time configuration.
//!
//! The key names below are an external collaborator contract with the
//! hosting framework and must be preserved bit-for-bit; the `serde` field
//! names ARE the wire names. Every field is required: a creation map
//! missing any of them fails before a widget exists, so callers never
//! observe a partially-initialized view. Unknown keys are tolerated for
//! forward compatibility.

use edit_core::TextStyle;
use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CreationParams {
    /// Field width in px.
    pub width: f64,
    /// Initial text.
    pub text: String,
    pub place_holder: String,
    /// Maximum value length in characters; zero disables the limit.
    pub max_length: u32,
    pub text_style: StyleParams,
    pub place_holder_style: StyleParams,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct StyleParams {
    /// ARGB color, one byte per component.
    pub color: u32,
    pub font_size: f32,
    /// Line-height multiplier relative to `font_size`.
    pub height: f32,
}

impl CreationParams {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value.clone())
    }
}

impl From<StyleParams> for TextStyle {
    fn from(style: StyleParams) -> Self {
        TextStyle {
            color: style.color,
            font_size: style.font_size,
            line_height: style.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_map() -> Value {
        json!({
            "width": 300.0,
            "text": "hello",
            "place_holder": "Say something",
            "max_length": 1024,
            "text_style": {"color": 4278190080u32, "font_size": 14.0, "height": 1.17},
            "place_holder_style": {"color": 4286611584u32, "font_size": 14.0, "height": 1.17},
        })
    }

    #[test]
    fn parses_complete_map() {
        let params = CreationParams::from_value(&full_map()).unwrap();
        assert_eq!(params.width, 300.0);
        assert_eq!(params.text, "hello");
        assert_eq!(params.place_holder, "Say something");
        assert_eq!(params.max_length, 1024);
        assert_eq!(params.text_style.color, 0xFF00_0000);
        assert_eq!(params.place_holder_style.color, 0xFF80_8080);
    }

    #[test]
    fn integer_width_is_accepted() {
        let mut map = full_map();
        map["width"] = json!(300);
        let params = CreationParams::from_value(&map).unwrap();
        assert_eq!(params.width, 300.0);
    }

    #[test]
    fn missing_field_fails() {
        let mut map = full_map();
        map.as_object_mut().unwrap().remove("max_length");
        assert!(CreationParams::from_value(&map).is_err());
    }

    #[test]
    fn ill_typed_field_fails() {
        let mut map = full_map();
        map["text"] = json!(42);
        assert!(CreationParams::from_value(&map).is_err());
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let mut map = full_map();
        map["future_knob"] = json!(true);
        assert!(CreationParams::from_value(&map).is_ok());
    }

    #[test]
    fn style_converts_to_widget_style() {
        let style: TextStyle = StyleParams {
            color: 0xFF11_2233,
            font_size: 16.0,
            height: 1.4,
        }
        .into();
        assert_eq!(style.color, 0xFF11_2233);
        assert_eq!(style.font_size, 16.0);
        assert_eq!(style.line_height, 1.4);
    }
}
