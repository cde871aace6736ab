/// Wraps each line at `width` columns; existing line breaks are kept.
pub fn wrap_text(text: &str, width: usize) -> String {
    text.split('\n')
        .map(|line| textwrap::fill(line, width.max(1)))
        .collect::<Vec<_>>()
        .join("\n")
}
