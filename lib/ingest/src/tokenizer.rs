/// Splits a statement line into raw terms for the fallback parser.
///
/// The scanner tracks two states: inside a URI (entered by `<`, left by `>`) and inside a literal
/// (toggled by every unescaped `"`). Whitespace only separates terms outside of both states, so
/// literal suffixes such as `@en` or `^^<...>` stay attached to their literal. A standalone
/// terminating `.` is dropped, as is a `.` glued to the end of the last term.
pub fn tokenize(line: &str) -> Vec<&str> {
    let mut terms = Vec::new();
    let mut start = None;
    let mut in_uri = false;
    let mut in_literal = false;
    let mut escape_next = false;

    for (i, c) in line.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match c {
            '\\' if in_literal => escape_next = true,
            '<' if !in_literal => in_uri = true,
            '>' if !in_literal => in_uri = false,
            '"' if !in_uri => in_literal = !in_literal,
            c if c.is_whitespace() && !in_uri && !in_literal => {
                if let Some(begin) = start.take() {
                    terms.push(&line[begin..i]);
                }
                continue;
            }
            _ => {}
        }
        if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(begin) = start {
        terms.push(&line[begin..]);
    }

    match terms.last().copied() {
        Some(".") => {
            terms.pop();
        }
        Some(last) => {
            if let Some(stripped) = last.strip_suffix('.') {
                if let Some(slot) = terms.last_mut() {
                    *slot = stripped;
                }
            }
        }
        _ => {}
    }
    terms
}
