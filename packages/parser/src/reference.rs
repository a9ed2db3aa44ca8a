//! Custom property extraction from canonical reference stylesheets.
//!
//! Selectors, at-rules and regular declarations are skipped; only
//! `--name: value` pairs are kept. Values are sliced from the source
//! between the colon and the `;` (or `}`) at parenthesis depth zero, so
//! their text round-trips exactly.

use crate::ast::{Declaration, ReferenceSheet, Span};
use crate::error::{ParseError, ParseResult};
use crate::tokenizer::{tokenize, Token};
use crate::value::parse_value;
use std::collections::HashSet;

pub fn parse_reference_sheet(name: &str, source: &str) -> ParseResult<ReferenceSheet> {
    let mut tokens = tokenize(source)?.into_iter().peekable();
    let mut declarations = Vec::new();
    let mut seen = HashSet::new();

    while let Some((token, start)) = tokens.next() {
        let Token::CustomProperty(property) = token else {
            continue;
        };
        if !matches!(tokens.peek(), Some((Token::Colon, _))) {
            // A reference such as `var(--x)`, not a declaration
            continue;
        }
        let value_start = match tokens.next() {
            Some((_, colon)) => colon.end,
            None => break,
        };

        let mut depth = 0usize;
        let value_end = loop {
            match tokens.next() {
                Some((Token::LParen, _)) => depth += 1,
                Some((Token::RParen, span)) => {
                    if depth == 0 {
                        return Err(ParseError::UnexpectedToken {
                            span,
                            expected: "';'".to_string(),
                            found: "')'".to_string(),
                        });
                    }
                    depth -= 1;
                }
                Some((token @ (Token::Semicolon | Token::RBrace), span)) => {
                    if depth == 0 {
                        break span.start;
                    }
                    return Err(ParseError::UnexpectedToken {
                        span,
                        expected: "')'".to_string(),
                        found: token.to_string(),
                    });
                }
                Some(_) => {}
                None if depth > 0 => {
                    return Err(ParseError::UnexpectedEof {
                        expected: "')'".to_string(),
                    })
                }
                None => break source.len(),
            }
        };

        let text = source[value_start..value_end].trim();
        let span = Span::new(start.start, value_end);
        if text.is_empty() {
            return Err(ParseError::InvalidValue {
                span,
                message: format!("missing value for {}", property),
            });
        }

        if seen.insert(property.to_string()) {
            declarations.push(Declaration {
                name: property.to_string(),
                value: parse_value(text),
                span,
            });
        }
    }

    Ok(ReferenceSheet {
        name: name.to_string(),
        declarations,
    })
}
