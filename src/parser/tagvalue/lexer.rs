//! Line-oriented tokenizer for the tag-value format.
//!
//! Produces an ordered stream of `(tag, value)` terminals. `#` comment lines
//! and blank lines carry no terminals. Values wrapped in `<text>...</text>`
//! may span lines and are delivered as [`RawValue::Text`] so grammar slots
//! that require a single line can reject them. Malformed input is reported
//! and skipped; tokenization always reaches the end of the input.

/// The value half of a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// Single-line value.
    Line(String),
    /// Possibly multi-line value unwrapped from a `<text>` block.
    Text(String),
}

impl RawValue {
    pub fn as_str(&self) -> &str {
        match self {
            RawValue::Line(value) | RawValue::Text(value) => value,
        }
    }
}

/// One `tag: value` terminal with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagToken {
    pub tag: String,
    pub value: RawValue,
    pub line: usize,
}

/// Tokenize a complete document. Returns the terminal stream together with
/// any malformed-line messages, in input order.
pub fn lex(text: &str) -> (Vec<TagToken>, Vec<String>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let lines: Vec<&str> = text.lines().collect();
    let mut index = 0;

    while index < lines.len() {
        let line_number = index + 1;
        let trimmed = lines[index].trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            index += 1;
            continue;
        }

        let Some((tag, rest)) = trimmed.split_once(':') else {
            errors.push(format!(
                "Invalid line, \"Tag: value\" expected. Line: {}",
                line_number
            ));
            index += 1;
            continue;
        };
        let tag = tag.trim();
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
            errors.push(format!(
                "Invalid line, \"Tag: value\" expected. Line: {}",
                line_number
            ));
            index += 1;
            continue;
        }

        let rest = rest.trim();
        if let Some(opened) = rest.strip_prefix("<text>") {
            match consume_text_block(opened, &lines, index, &mut errors) {
                Some((inner, next_index)) => {
                    tokens.push(TagToken {
                        tag: tag.to_string(),
                        value: RawValue::Text(inner),
                        line: line_number,
                    });
                    index = next_index;
                }
                None => {
                    errors.push(format!("Unterminated <text> block. Line: {}", line_number));
                    index = lines.len();
                }
            }
            continue;
        }

        tokens.push(TagToken {
            tag: tag.to_string(),
            value: RawValue::Line(rest.to_string()),
            line: line_number,
        });
        index += 1;
    }

    (tokens, errors)
}

/// Collect the inside of a `<text>` block. `opened` is the remainder of the
/// opening line after `<text>`. Returns the inner text and the index of the
/// first line past the block, or `None` when the block never closes.
fn consume_text_block(
    opened: &str,
    lines: &[&str],
    start_index: usize,
    errors: &mut Vec<String>,
) -> Option<(String, usize)> {
    if let Some(end) = opened.find("</text>") {
        report_trailing(&opened[end + "</text>".len()..], start_index + 1, errors);
        return Some((opened[..end].to_string(), start_index + 1));
    }

    let mut collected = vec![opened.to_string()];
    let mut index = start_index + 1;
    while index < lines.len() {
        let line = lines[index];
        if let Some(end) = line.find("</text>") {
            collected.push(line[..end].to_string());
            report_trailing(&line[end + "</text>".len()..], index + 1, errors);
            return Some((collected.join("\n"), index + 1));
        }
        collected.push(line.to_string());
        index += 1;
    }
    None
}

fn report_trailing(trailing: &str, line_number: usize, errors: &mut Vec<String>) {
    if !trailing.trim().is_empty() {
        errors.push(format!(
            "Unexpected content after </text>. Line: {}",
            line_number
        ));
    }
}
