//! Logical line assembly and quote-aware tokenization.

/// One logical line: physical lines joined across `\` continuations, with
/// comments stripped. `number` is the first physical line, 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LogicalLine {
    pub text: String,
    pub number: usize,
}

/// Assemble logical lines from raw configuration text.
///
/// A `#` outside double quotes starts a comment running to end of line;
/// full-line comments and blank lines disappear. A cleaned line ending in
/// `\` continues on the next non-empty line.
pub(crate) fn logical_lines(source: &str) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut pending: Option<LogicalLine> = None;

    for (idx, raw) in source.lines().enumerate() {
        let cleaned = strip_comment(raw);
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            continue;
        }

        let (fragment, continues) = match cleaned.strip_suffix('\\') {
            Some(head) => (head.trim_end(), true),
            None => (cleaned, false),
        };

        match pending.as_mut() {
            Some(line) => {
                if !fragment.is_empty() {
                    line.text.push(' ');
                    line.text.push_str(fragment);
                }
            }
            None => {
                pending = Some(LogicalLine {
                    text: fragment.to_string(),
                    number: idx + 1,
                });
            }
        }

        if !continues {
            if let Some(line) = pending.take() {
                if !line.text.is_empty() {
                    lines.push(line);
                }
            }
        }
    }

    // Trailing continuation with no following line still yields its content.
    if let Some(line) = pending.take() {
        if !line.text.is_empty() {
            lines.push(line);
        }
    }

    lines
}

fn strip_comment(line: &str) -> &str {
    let mut in_quote = false;
    for (idx, ch) in line.char_indices() {
        match ch {
            '"' => in_quote = !in_quote,
            '#' if !in_quote => return &line[..idx],
            _ => {}
        }
    }
    line
}

/// Split a logical line into whitespace-separated tokens, keeping quoted
/// spans (and their quotes) intact.
///
/// A character loop rather than shell-style splitting: quotes stay attached
/// to their token so `Reason="Maintenance Mode"` survives as one token.
pub(crate) fn split_tokens(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quote = !in_quote;
                current.push(ch);
            }
            c if c.is_whitespace() && !in_quote => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
