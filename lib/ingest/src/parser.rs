use crate::escape::{unescape, unescape_lenient};
use crate::tokenizer::tokenize;
use crate::ParseError;
use rdf_harvest_model::{NodeRef, ObjectValue, Statement, BLANK_NODE_PREFIX};
use regex::Regex;
use std::sync::LazyLock;

/// The statement grammar: subject, predicate, object, an optional graph label and a terminating
/// period.
static STATEMENT_GRAMMAR: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(
        r#"^(?P<subject><[^>]*>|_:\S+)\s+(?P<predicate><[^>]*>)\s+(?P<object><[^>]*>|_:\S+|"(?:[^"\\]|\\.)*"(?:@[A-Za-z]+(?:-[A-Za-z0-9]+)*|\^\^<[^>]*>)?)(?:\s+(?P<graph><[^>]*>|_:\S+))?\s*\.$"#,
    )
});

/// Parses a single line into a [Statement].
///
/// Returns `Ok(None)` for blank lines and `#` comments. Well-formed lines are matched by the
/// statement grammar. Lines the grammar rejects (unescaped quotes inside literals, odd spacing,
/// a missing terminator, ...) go through a quote- and bracket-aware tokenizer instead, which only
/// fails if fewer than three terms remain or the subject or predicate is unusable.
pub fn parse_line(line: &str) -> Result<Option<Statement>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    if let Some(statement) = parse_with_grammar(line) {
        return Ok(Some(statement));
    }
    parse_with_tokenizer(line).map(Some)
}

fn parse_with_grammar(line: &str) -> Option<Statement> {
    let grammar = STATEMENT_GRAMMAR.as_ref().ok()?;
    let captures = grammar.captures(line)?;
    let group = |name: &str| captures.name(name).map(|m| m.as_str());

    let subject = parse_subject(group("subject")?).ok()?;
    let predicate = strip_brackets(group("predicate")?).to_owned();
    let object = parse_object(group("object")?, false).ok()?;
    let statement = Statement::new(subject, predicate, object);
    Some(match group("graph") {
        Some(graph) => statement.with_graph(strip_brackets(graph)),
        None => statement,
    })
}

fn parse_with_tokenizer(line: &str) -> Result<Statement, ParseError> {
    let terms = tokenize(line);
    let [subject, predicate, object, rest @ ..] = terms.as_slice() else {
        return Err(ParseError::TooFewTerms { found: terms.len() });
    };

    let subject = parse_subject(subject)?;
    if !predicate.starts_with('<') {
        return Err(ParseError::InvalidPredicate((*predicate).to_owned()));
    }
    let predicate = strip_brackets(predicate).to_owned();
    let object = parse_object(object, true)?;
    let statement = Statement::new(subject, predicate, object);
    Ok(match rest.first() {
        Some(graph) if graph.starts_with('<') || graph.starts_with(BLANK_NODE_PREFIX) => {
            statement.with_graph(strip_brackets(graph))
        }
        _ => statement,
    })
}

fn parse_subject(term: &str) -> Result<NodeRef, ParseError> {
    if term.starts_with('<') {
        Ok(NodeRef::Iri(strip_brackets(term).to_owned()))
    } else if term.starts_with(BLANK_NODE_PREFIX) {
        Ok(NodeRef::BlankNode(term.to_owned()))
    } else {
        Err(ParseError::InvalidSubject(term.to_owned()))
    }
}

fn parse_object(term: &str, lenient: bool) -> Result<ObjectValue, ParseError> {
    if term.starts_with('<') {
        Ok(ObjectValue::Iri(strip_brackets(term).to_owned()))
    } else if term.starts_with(BLANK_NODE_PREFIX) {
        Ok(ObjectValue::BlankNode(term.to_owned()))
    } else if term.starts_with('"') {
        let body = literal_body(term)?;
        let value = if lenient {
            unescape_lenient(body)
        } else {
            unescape(body)?
        };
        Ok(ObjectValue::Literal(value.into_owned()))
    } else {
        // Bare tokens (numbers, booleans) found in sloppy dumps.
        Ok(ObjectValue::Literal(term.to_owned()))
    }
}

/// Returns the text between the opening quote and the last quote of a literal term, dropping any
/// `@lang` or `^^<datatype>` suffix.
fn literal_body(term: &str) -> Result<&str, ParseError> {
    match term.rfind('"') {
        Some(end) if end > 0 => Ok(&term[1..end]),
        _ => Err(ParseError::UnterminatedLiteral(term.to_owned())),
    }
}

fn strip_brackets(term: &str) -> &str {
    let term = term.strip_prefix('<').unwrap_or(term);
    term.strip_suffix('>').unwrap_or(term)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(value: &str) -> ObjectValue {
        ObjectValue::Iri(value.to_owned())
    }

    fn literal(value: &str) -> ObjectValue {
        ObjectValue::Literal(value.to_owned())
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   \t"), Ok(None));
        assert_eq!(parse_line("# a comment <s> <p> <o> ."), Ok(None));
    }

    #[test]
    fn parses_uri_statement() {
        let statement = parse_line(
            "<http://ex/r1> <http://schema.org/type> <http://schema.org/Restaurant> .",
        )
        .unwrap()
        .unwrap();
        assert_eq!(statement.subject, NodeRef::Iri("http://ex/r1".to_owned()));
        assert_eq!(statement.predicate, "http://schema.org/type");
        assert_eq!(statement.object, iri("http://schema.org/Restaurant"));
        assert_eq!(statement.graph, None);
        assert!(!statement.object_is_blank());
    }

    #[test]
    fn parses_blank_nodes_and_graph() {
        let statement = parse_line(
            "_:b0 <http://schema.org/address> _:b1 <https://example.com/menu.html> .",
        )
        .unwrap()
        .unwrap();
        assert_eq!(statement.subject, NodeRef::BlankNode("_:b0".to_owned()));
        assert_eq!(statement.object, ObjectValue::BlankNode("_:b1".to_owned()));
        assert_eq!(statement.graph.as_deref(), Some("https://example.com/menu.html"));
        assert!(statement.object_is_blank());
    }

    #[test]
    fn drops_language_and_datatype_after_unescaping() {
        let tagged = parse_line(r#"_:b0 <http://schema.org/name> "Caf\u00e9 \"Rouge\""@fr-CA ."#)
            .unwrap()
            .unwrap();
        assert_eq!(tagged.object, literal("Caf\u{E9} \"Rouge\""));

        let typed = parse_line(
            r#"_:b0 <http://schema.org/ratingValue> "4.5"^^<http://www.w3.org/2001/XMLSchema#decimal> <http://g> ."#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(typed.object, literal("4.5"));
        assert_eq!(typed.graph.as_deref(), Some("http://g"));
    }

    #[test]
    fn falls_back_for_unescaped_nested_quotes() {
        let statement = parse_line(r#"_:b1 <http://schema.org/name> "Joe's "Best" Diner"@en ."#)
            .unwrap()
            .unwrap();
        assert_eq!(statement.object, literal("Joe's \"Best\" Diner"));
    }

    #[test]
    fn falls_back_for_missing_terminator_and_odd_spacing() {
        let statement = parse_line("<http://ex/s>\t\t<http://ex/p>    \"multi\\nline\"")
            .unwrap()
            .unwrap();
        assert_eq!(statement.object, literal("multi\nline"));
    }

    #[test]
    fn fallback_keeps_invalid_escapes() {
        let statement = parse_line(r#"<http://ex/s> <http://ex/p> "C:\path\qux" ."#)
            .unwrap()
            .unwrap();
        assert_eq!(statement.object, literal("C:\\path\\qux"));
    }

    #[test]
    fn bare_tokens_become_literals() {
        let statement = parse_line("<http://ex/s> <http://ex/p> 42 .").unwrap().unwrap();
        assert_eq!(statement.object, literal("42"));
    }

    #[test]
    fn reports_unrecoverable_lines() {
        assert_eq!(
            parse_line("<http://ex/s> <http://ex/p>"),
            Err(ParseError::TooFewTerms { found: 2 })
        );
        assert_eq!(
            parse_line(r#""literal" <http://ex/p> <http://ex/o> ."#),
            Err(ParseError::InvalidSubject("\"literal\"".to_owned()))
        );
        assert_eq!(
            parse_line("<http://ex/s> predicate <http://ex/o> ."),
            Err(ParseError::InvalidPredicate("predicate".to_owned()))
        );
    }
}
