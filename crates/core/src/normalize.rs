//! Input normalization applied before markup scanning.

use std::borrow::Cow;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Normalize line endings to `\n` and drop a leading byte order mark.
///
/// Returns the input unchanged (borrowed) when there is nothing to do.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);

    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }

    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Trim trailing whitespace from each line, then trim the block as a whole.
///
/// Blank lines inside the block are kept (as empty lines) since they mark
/// slide boundaries further down the pipeline.
pub fn clean_block(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
