//! Selector parser using the `cssparser` tokenizer.
//!
//! Supports the subset of selector syntax used for structural queries:
//! type and universal selectors, `#id`, `.class`, attribute presence,
//! `=` and `^=` attribute comparisons, descendant and child combinators, and
//! comma-separated lists.

use cssparser::{ParseError as CssParseError, Parser, ParserInput, Token};

use super::{
    AttributeOperator, AttributeSelector, Combinator, Selector, SelectorList, SelectorPart,
    TypeSelector,
};
use crate::{Error, Result};

/// Parse a selector list such as `".choices__item[data-id=\"2\"], option"`.
///
/// # Errors
///
/// Returns [`Error::InvalidSelector`] for empty input, dangling combinators
/// or any token outside the supported subset, pseudo-classes included.
pub fn parse_selector_list(source: &str) -> Result<SelectorList> {
    let mut input = ParserInput::new(source);
    let mut parser = Parser::new(&mut input);
    let mut selectors = vec![];

    loop {
        selectors.push(parse_selector(&mut parser, source)?);

        match parser.next() {
            Ok(Token::Comma) => continue,
            Ok(token) => {
                return Err(Error::invalid_selector(
                    source,
                    format!("Unexpected token {token:?}"),
                ));
            }
            Err(_) => break,
        }
    }

    Ok(SelectorList { selectors })
}

/// Parse a single complex selector, stopping before a top-level comma.
fn parse_selector<'i>(parser: &mut Parser<'i, '_>, source: &str) -> Result<Selector> {
    let mut parts: Vec<SelectorPart> = vec![];
    let mut combinators = vec![];
    let mut current = SelectorPart::default();
    // Combinator seen since the last finished part.
    let mut pending: Option<Combinator> = None;

    parser.skip_whitespace();

    loop {
        let state = parser.state();
        let token = match parser.next_including_whitespace() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };

        match token {
            Token::WhiteSpace(_) => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                    pending = Some(Combinator::Descendant);
                }
                continue;
            }

            Token::Delim('>') => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                } else if parts.is_empty() {
                    return Err(Error::invalid_selector(source, "Selector starts with '>'"));
                } else if pending == Some(Combinator::Child) {
                    return Err(Error::invalid_selector(source, "Repeated '>' combinator"));
                }
                pending = Some(Combinator::Child);
                continue;
            }

            Token::Comma => {
                parser.reset(&state);
                break;
            }

            _ => {}
        }

        // Every remaining token contributes a simple selector to `current`.
        if current.is_empty() && !parts.is_empty() {
            let combinator = pending
                .take()
                .ok_or_else(|| Error::invalid_selector(source, "Missing combinator"))?;
            combinators.push(combinator);
        }

        match token {
            Token::Ident(name) => {
                if !current.is_empty() {
                    return Err(Error::invalid_selector(
                        source,
                        format!("Type selector '{}' must come first in a compound selector", &*name),
                    ));
                }
                current.type_selector = Some(TypeSelector::Type(name.to_ascii_lowercase()));
            }

            Token::Delim('*') => {
                if !current.is_empty() {
                    return Err(Error::invalid_selector(
                        source,
                        "Universal selector must come first in a compound selector",
                    ));
                }
                current.type_selector = Some(TypeSelector::Universal);
            }

            Token::Delim('.') => {
                let class = match parser.next_including_whitespace() {
                    Ok(Token::Ident(class)) => class.to_string(),
                    _ => return Err(Error::invalid_selector(source, "Expected class name after '.'")),
                };
                current.classes.push(class);
            }

            Token::IDHash(id) => {
                if current.id.is_some() {
                    return Err(Error::invalid_selector(source, "Duplicate ID selector"));
                }
                current.id = Some(id.to_string());
            }

            Token::SquareBracketBlock => {
                let attribute = parser
                    .parse_nested_block(|p| parse_attribute(p))
                    .map_err(|_: CssParseError<'_, ()>| {
                        Error::invalid_selector(source, "Invalid attribute selector")
                    })?;
                current.attributes.push(attribute);
            }

            other => {
                return Err(Error::invalid_selector(
                    source,
                    format!("Unexpected token {other:?}"),
                ));
            }
        }
    }

    if !current.is_empty() {
        parts.push(current);
    } else if pending == Some(Combinator::Child) {
        return Err(Error::invalid_selector(source, "Selector ends with '>'"));
    }

    if parts.is_empty() {
        return Err(Error::invalid_selector(source, "Empty selector"));
    }

    Ok(Selector { parts, combinators })
}

/// Parse the inside of `[...]`.
fn parse_attribute<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<AttributeSelector, CssParseError<'i, ()>> {
    let name = parser.expect_ident()?.to_ascii_lowercase();

    if parser.is_exhausted() {
        return Ok(AttributeSelector::exists(name));
    }

    let operator = match parser.next()? {
        Token::Delim('=') => AttributeOperator::Equals,
        Token::PrefixMatch => AttributeOperator::Prefix,
        _ => return Err(parser.new_custom_error(())),
    };
    let value = parser.expect_ident_or_string()?.to_string();
    parser.expect_exhausted()?;

    Ok(AttributeSelector::with_operator(name, operator, value))
}
