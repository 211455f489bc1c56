//! Pure markdown escaping utilities.

/// Escape special Markdown characters in text.
///
/// Escapes characters that have special meaning in Markdown:
/// - Backslash: `\\`
/// - Emphasis: `*`, `_`
/// - Links and footnote labels: `[`, `]`
/// - Code: `` ` ``
/// - HTML: `<`, `>`
/// - Images: `!` (when followed by `[`)
/// - Block markers at line start: `#`, `>`, `-`/`+` bullets and `1.` list numbers
///
/// Reflowed text often starts a line with a bare number (`1. The note`);
/// left alone that would turn into an ordered list.
///
/// # Examples
///
/// ```
/// use footmark::markdown::escape_markdown;
///
/// assert_eq!(escape_markdown("*bold*"), "\\*bold\\*");
/// assert_eq!(escape_markdown("[^1]"), "\\[^1\\]");
/// assert_eq!(escape_markdown("1. Note"), "1\\. Note");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 10);
    let mut chars = text.chars().peekable();
    let mut at_line_start = true;
    // Digits seen since the start of the line, for `1.` / `1)` list markers
    let mut leading_digits = true;

    while let Some(c) = chars.next() {
        match c {
            '\\' | '*' | '_' | '[' | ']' | '`' | '<' | '>' => {
                result.push('\\');
                result.push(c);
            }
            '#' if at_line_start => {
                result.push('\\');
                result.push(c);
            }
            '-' | '+' if at_line_start && chars.peek().is_none_or(|n| n.is_whitespace()) => {
                result.push('\\');
                result.push(c);
            }
            '.' | ')'
                if leading_digits
                    && !at_line_start
                    && chars.peek().is_none_or(|n| n.is_whitespace()) =>
            {
                result.push('\\');
                result.push(c);
            }
            '!' if chars.peek() == Some(&'[') => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
        leading_digits = if c == '\n' {
            true
        } else {
            leading_digits && c.is_ascii_digit()
        };
        at_line_start = c == '\n';
    }

    result
}
