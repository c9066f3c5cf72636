//! UTF-8 index utilities for the editing model.
//!
//! The channel contract talks in character indices; the field stores byte
//! offsets. These helpers do the conversions and keep every stored offset
//! on a valid character boundary.

/// Clamp an arbitrary byte index to a valid UTF-8 character boundary.
///
/// An index beyond the string length is clamped to `s.len()`; an index in
/// the middle of a multi-byte character is moved back to its start.
///
/// # Examples
///
/// ```
/// use edit_core::text::clamp_to_char_boundary;
///
/// let s = "a€b"; // '€' is 3 bytes
/// assert_eq!(clamp_to_char_boundary(s, 2), 1);
/// assert_eq!(clamp_to_char_boundary(s, 100), 5);
/// ```
#[inline]
pub fn clamp_to_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Byte offset of the character boundary before `i`, or 0 at the start.
pub fn prev_char_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    if i == 0 {
        return 0;
    }
    s[..i]
        .char_indices()
        .last()
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `i`, or `s.len()` at the end.
pub fn next_char_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    if i >= s.len() {
        return s.len();
    }

    let mut it = s[i..].char_indices();
    let _ = it.next(); // the character sitting at `i`
    it.next().map(|(idx, _)| i + idx).unwrap_or(s.len())
}

/// Convert a character index to a byte offset, clamping past-the-end
/// indices to `s.len()`.
///
/// # Examples
///
/// ```
/// use edit_core::text::char_to_byte;
///
/// assert_eq!(char_to_byte("a€b", 1), 1);
/// assert_eq!(char_to_byte("a€b", 2), 4);
/// assert_eq!(char_to_byte("a€b", 99), 5);
/// ```
pub fn char_to_byte(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

/// Convert a byte offset to a character index. Offsets inside a multi-byte
/// character count as the index of that character.
pub fn byte_to_char(s: &str, byte_index: usize) -> usize {
    let byte_index = clamp_to_char_boundary(s, byte_index);
    s[..byte_index].chars().count()
}

/// The longest prefix of `s` holding at most `n` characters.
pub fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
