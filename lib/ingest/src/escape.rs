use crate::ParseError;
use std::borrow::Cow;

/// Resolves the escape sequences of a literal body.
///
/// Supports the N-Triples string escapes (`\t`, `\b`, `\n`, `\r`, `\f`, `\"`, `\'`, `\\`) and the
/// numeric escapes `\uXXXX` and `\UXXXXXXXX`. Any other escape is an error.
pub fn unescape(value: &str) -> Result<Cow<'_, str>, ParseError> {
    unescape_impl(value, false)
}

/// Like [unescape], but keeps unknown or broken escape sequences verbatim.
pub fn unescape_lenient(value: &str) -> Cow<'_, str> {
    match unescape_impl(value, true) {
        Ok(unescaped) => unescaped,
        // Lenient mode never reports escape errors.
        Err(_) => Cow::Borrowed(value),
    }
}

fn unescape_impl(value: &str, lenient: bool) -> Result<Cow<'_, str>, ParseError> {
    if !value.contains('\\') {
        return Ok(Cow::Borrowed(value));
    }

    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            if lenient {
                result.push('\\');
                break;
            }
            return Err(ParseError::InvalidEscape(String::new()));
        };
        let simple = match escaped {
            't' => Some('\t'),
            'b' => Some('\u{8}'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            'f' => Some('\u{C}'),
            '"' => Some('"'),
            '\'' => Some('\''),
            '\\' => Some('\\'),
            _ => None,
        };
        if let Some(simple) = simple {
            result.push(simple);
            continue;
        }

        let digits = match escaped {
            'u' => 4,
            'U' => 8,
            _ => 0,
        };
        let hex: String = chars.clone().take(digits).collect();
        let decoded = (digits > 0 && hex.len() == digits)
            .then(|| u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32))
            .flatten();
        match decoded {
            Some(decoded) => {
                result.push(decoded);
                chars.nth(digits - 1);
            }
            None if lenient => {
                result.push('\\');
                result.push(escaped);
            }
            None => return Err(ParseError::InvalidEscape(format!("{escaped}{hex}"))),
        }
    }
    Ok(Cow::Owned(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_values_are_borrowed() {
        assert!(matches!(unescape("Pizza Place"), Ok(Cow::Borrowed("Pizza Place"))));
    }

    #[test]
    fn resolves_string_escapes() {
        assert_eq!(
            unescape(r#"Say \"hi\"\n\tand\\leave"#).unwrap(),
            "Say \"hi\"\n\tand\\leave"
        );
    }

    #[test]
    fn resolves_numeric_escapes() {
        assert_eq!(unescape(r"Caf\u00e9").unwrap(), "Caf\u{E9}");
        assert_eq!(unescape(r"\U0001F355 slice").unwrap(), "\u{1F355} slice");
    }

    #[test]
    fn rejects_unknown_escapes() {
        assert_eq!(unescape(r"a\qb"), Err(ParseError::InvalidEscape("q".to_owned())));
        assert_eq!(
            unescape(r"\u12"),
            Err(ParseError::InvalidEscape("u12".to_owned()))
        );
    }

    #[test]
    fn lenient_mode_keeps_unknown_escapes() {
        assert_eq!(unescape_lenient(r"a\qb\n"), "a\\qb\n");
        assert_eq!(unescape_lenient(r"trailing\"), "trailing\\");
    }
}
