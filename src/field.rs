/// Why a tag could not be read out of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    OpenTagMissing,
    CloseTagMissing,
}

#[inline]
fn find_ignore_case(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}

#[inline]
fn is_pad(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Pulls the text between `<tag>` and the first following `</tag>`.
///
/// This is plain substring matching, not markup parsing:
/// - tag names match ignoring ASCII case,
/// - the document ends at the first NUL byte,
/// - at most `capacity - 1` bytes of inner text are kept (silently truncated),
/// - leading/trailing space, tab, CR and LF are then trimmed.
pub fn extract_field(document: &[u8], tag: &str, capacity: usize) -> Result<String, FieldError> {
    let doc = match document.iter().position(|&b| b == 0) {
        Some(nul) => &document[..nul],
        None => document,
    };

    let open_tag = format!("<{}>", tag);
    let close_tag = format!("</{}>", tag);

    let start = find_ignore_case(doc, open_tag.as_bytes())
        .map(|i| i + open_tag.len())
        .ok_or(FieldError::OpenTagMissing)?;
    let len = find_ignore_case(&doc[start..], close_tag.as_bytes())
        .ok_or(FieldError::CloseTagMissing)?;

    let kept = len.min(capacity.saturating_sub(1));
    let mut value = &doc[start..start + kept];
    while let [first, rest @ ..] = value {
        if !is_pad(*first) { break; }
        value = rest;
    }
    while let [rest @ .., last] = value {
        if !is_pad(*last) { break; }
        value = rest;
    }

    Ok(String::from_utf8_lossy(value).into_owned())
}

/// Same as [`extract_field`] but a missing tag (open or close) reads as "".
pub fn field_or_empty(document: &[u8], tag: &str, capacity: usize) -> String {
    extract_field(document, tag, capacity).unwrap_or_default()
}
