//! Byte-cursor scanning of task-group source text.
//!
//! Runfile bodies nest braces inside string literals, template
//! interpolations, and comments, so boundary detection cannot lean on
//! naive bracket counting. The helpers here walk the source once,
//! tracking string, template, and comment state, and only count
//! delimiters that appear in code position.

/// Scanning context. Template literals switch the lexer into raw text
/// until a closing backtick; `${` interpolations switch back into code.
#[derive(Debug)]
enum Frame {
    /// Code context with its bracket depth.
    Code(usize),
    /// Inside a template literal.
    Template,
}

fn open_code_bracket(stack: &mut [Frame]) {
    if let Some(Frame::Code(depth)) = stack.last_mut() {
        *depth += 1;
    }
}

/// Handles a closing bracket in code context. Returns `true` when the
/// bracket closes the base frame, i.e. it matches the delimiter the scan
/// started from.
fn close_code_bracket(stack: &mut Vec<Frame>) -> bool {
    let base = stack.len() == 1;
    match stack.last_mut() {
        Some(Frame::Code(depth)) if *depth > 0 => {
            *depth -= 1;
            base && *depth == 0
        }
        _ => {
            // Depth zero in a nested frame: this bracket ends a `${`
            // interpolation, so drop back into the template.
            if !base {
                stack.pop();
            }
            false
        }
    }
}

fn skip_line_comment(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 2;
    while i < bytes.len() && bytes[i] != b'\n' {
        i += 1;
    }
    i
}

fn skip_block_comment(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 2;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return Some(i + 2);
        }
        i += 1;
    }
    None
}

/// Skips a quoted literal, returning the index just past the closing
/// quote. Single- and double-quoted strings end at an unescaped newline;
/// backticks span lines. Interpolations inside backtick strings are
/// treated as part of the literal here.
fn skip_string(bytes: &[u8], quote: u8, start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if quote != b'`' => return i + 1,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Finds the index of the delimiter matching the one at `open_at`.
///
/// The byte at `open_at` must be `(`, `[`, or `{`. Delimiters inside
/// comments, string literals, and template literals do not count, and
/// `${}` interpolations are balanced independently. Returns `None` for
/// unterminated input.
pub(crate) fn matching_delimiter(source: &str, open_at: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let &open = bytes.get(open_at)?;
    if !matches!(open, b'(' | b'[' | b'{') {
        return None;
    }

    let mut stack: Vec<Frame> = vec![Frame::Code(0)];
    let mut i = open_at;
    while i < bytes.len() {
        if matches!(stack.last(), Some(Frame::Template)) {
            match bytes[i] {
                b'\\' => i += 2,
                b'`' => {
                    stack.pop();
                    i += 1;
                }
                b'$' if bytes.get(i + 1) == Some(&b'{') => {
                    stack.push(Frame::Code(0));
                    i += 2;
                }
                _ => i += 1,
            }
            continue;
        }
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = skip_line_comment(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_block_comment(bytes, i)?;
                continue;
            }
            b'\'' | b'"' => {
                i = skip_string(bytes, bytes[i], i);
                continue;
            }
            b'`' => stack.push(Frame::Template),
            b'(' | b'[' | b'{' => open_code_bracket(&mut stack),
            b')' | b']' | b'}' => {
                if close_code_bracket(&mut stack) {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Collects the byte spans of every doc comment (`/** ... */`, markers
/// included) that sits directly in the body scope: not nested inside a
/// method body, parameter list, string, or template literal.
pub(crate) fn doc_spans(body: &str) -> Vec<(usize, usize)> {
    let bytes = body.as_bytes();
    let mut spans = Vec::new();
    let mut stack: Vec<Frame> = vec![Frame::Code(0)];
    let mut i = 0;
    while i < bytes.len() {
        if matches!(stack.last(), Some(Frame::Template)) {
            match bytes[i] {
                b'\\' => i += 2,
                b'`' => {
                    stack.pop();
                    i += 1;
                }
                b'$' if bytes.get(i + 1) == Some(&b'{') => {
                    stack.push(Frame::Code(0));
                    i += 2;
                }
                _ => i += 1,
            }
            continue;
        }
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => i = skip_line_comment(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let is_doc = bytes.get(i + 2) == Some(&b'*');
                let Some(end) = skip_block_comment(bytes, i) else {
                    break;
                };
                if is_doc && matches!(stack.as_slice(), [Frame::Code(0)]) {
                    spans.push((i, end));
                }
                i = end;
            }
            b'\'' | b'"' => i = skip_string(bytes, bytes[i], i),
            b'`' => {
                stack.push(Frame::Template);
                i += 1;
            }
            b'(' | b'[' | b'{' => {
                open_code_bracket(&mut stack);
                i += 1;
            }
            b')' | b']' | b'}' => {
                close_code_bracket(&mut stack);
                i += 1;
            }
            _ => i += 1,
        }
    }
    spans
}

fn top_level_separators(text: &str, sep: u8) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut separators = Vec::new();
    let mut depth = 0usize;
    let mut angle = 0usize;
    let mut prev = b' ';
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = skip_line_comment(bytes, i);
                prev = b' ';
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => match skip_block_comment(bytes, i) {
                Some(end) => {
                    i = end;
                    prev = b' ';
                    continue;
                }
                None => break,
            },
            b'\'' | b'"' | b'`' => {
                i = skip_string(bytes, b, i);
                prev = b;
                continue;
            }
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            // `<` opens a generic only straight after an identifier
            // (`Map<...`); a spaced comparison in a default stays flat.
            b'<' if is_ident_byte(prev) => angle += 1,
            // `>` closes a generic unless it is the tail of an arrow.
            b'>' if prev != b'=' => angle = angle.saturating_sub(1),
            _ => {}
        }
        if b == sep && depth == 0 && angle == 0 {
            separators.push(i);
        }
        prev = b;
        i += 1;
    }
    separators
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Splits text at every separator that sits outside brackets, generics,
/// strings, and comments. Segments are returned untrimmed.
pub(crate) fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    debug_assert!(sep.is_ascii());
    let mut parts = Vec::new();
    let mut start = 0;
    for idx in top_level_separators(text, sep as u8) {
        parts.push(&text[start..idx]);
        start = idx + 1;
    }
    parts.push(&text[start..]);
    parts
}

/// Splits at the first top-level separator, if one exists.
pub(crate) fn split_once_top_level(text: &str, sep: char) -> Option<(&str, &str)> {
    debug_assert!(sep.is_ascii());
    let idx = top_level_separators(text, sep as u8).first().copied()?;
    Some((&text[..idx], &text[idx + 1..]))
}
