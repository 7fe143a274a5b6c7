//! Selector type definitions.

use std::fmt;

/// A comma-separated group of selectors (e.g., "input, select[multiple]").
///
/// An element matches the list if it matches any selector in it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectorList {
    /// The alternatives, in source order.
    pub selectors: Vec<Selector>,
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

/// A complete selector (e.g., "div.choices__list > [data-choice-selectable]").
///
/// A selector consists of one or more compound parts connected by combinators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    /// Chain of compound parts, left to right.
    pub parts: Vec<SelectorPart>,
    /// Combinators between parts (length = parts.len() - 1).
    pub combinators: Vec<Combinator>,
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                match &self.combinators[i - 1] {
                    Combinator::Descendant => write!(f, " ")?,
                    Combinator::Child => write!(f, " > ")?,
                }
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

/// A single compound segment (e.g., "div.item[data-id=\"3\"]").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SelectorPart {
    /// Type selector (tag name or universal).
    pub type_selector: Option<TypeSelector>,
    /// ID selector (#id), matched against the `id` attribute.
    pub id: Option<String>,
    /// Class selectors (.class).
    pub classes: Vec<String>,
    /// Attribute selectors ([name], [name="value"]).
    pub attributes: Vec<AttributeSelector>,
}

impl SelectorPart {
    /// Whether the part has no conditions at all.
    pub fn is_empty(&self) -> bool {
        self.type_selector.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
    }
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_selector {
            Some(TypeSelector::Universal) => write!(f, "*")?,
            Some(TypeSelector::Type(name)) => write!(f, "{name}")?,
            None => {}
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        for attribute in &self.attributes {
            write!(f, "{attribute}")?;
        }
        Ok(())
    }
}

/// Type selector variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSelector {
    /// Universal selector (*).
    Universal,
    /// Specific tag name, lower-cased.
    Type(String),
}

/// Combinators between selector parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Descendant combinator (space).
    Descendant,
    /// Child combinator (>).
    Child,
}

/// An attribute condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeSelector {
    /// Attribute name, lower-cased.
    pub name: String,
    /// Comparison against the attribute value; `None` tests presence only.
    pub condition: Option<(AttributeOperator, String)>,
}

impl AttributeSelector {
    /// Match elements that carry the attribute at all.
    pub fn exists(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            condition: None,
        }
    }

    /// Match elements whose attribute compares to `value` with `operator`.
    pub fn with_operator(
        name: impl Into<String>,
        operator: AttributeOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            condition: Some((operator, value.into())),
        }
    }

    /// Test an attribute value (or its absence) against this condition.
    pub fn matches(&self, actual: Option<&str>) -> bool {
        let Some(actual) = actual else {
            return false;
        };
        match &self.condition {
            None => true,
            Some((AttributeOperator::Equals, expected)) => actual == expected,
            // An empty prefix never matches.
            Some((AttributeOperator::Prefix, expected)) => {
                !expected.is_empty() && actual.starts_with(expected.as_str())
            }
        }
    }
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.condition {
            None => write!(f, "[{}]", self.name),
            Some((operator, value)) => {
                write!(f, "[{}{}\"{}\"]", self.name, operator.as_css(), value)
            }
        }
    }
}

/// Attribute value comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeOperator {
    /// `=`: exact match.
    Equals,
    /// `^=`: starts with the value.
    Prefix,
}

impl AttributeOperator {
    /// CSS spelling of the operator.
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::Prefix => "^=",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_display() {
        let item = SelectorPart {
            type_selector: Some(TypeSelector::Type("div".into())),
            classes: vec!["choices__item".into()],
            ..Default::default()
        };
        let value = SelectorPart {
            attributes: vec![AttributeSelector::exists("data-value")],
            ..Default::default()
        };
        let sel = Selector {
            parts: vec![
                SelectorPart {
                    classes: vec!["choices__list".into()],
                    ..Default::default()
                },
                item,
                value,
            ],
            combinators: vec![Combinator::Child, Combinator::Descendant],
        };
        assert_eq!(
            sel.to_string(),
            ".choices__list > div.choices__item [data-value]"
        );
    }

    #[test]
    fn attribute_operators() {
        let eq = AttributeSelector::with_operator("data-choice", AttributeOperator::Equals, "active");
        assert!(eq.matches(Some("active")));
        assert!(!eq.matches(Some("inactive")));
        assert!(!eq.matches(None));

        let exists = AttributeSelector::exists("hidden");
        assert!(exists.matches(Some("")));
        assert!(!exists.matches(None));

        let prefix = AttributeSelector::with_operator("id", AttributeOperator::Prefix, "choices-");
        assert!(prefix.matches(Some("choices-item-1")));
        assert!(!prefix.matches(Some("item-choices-")));

        let empty = AttributeSelector::with_operator("id", AttributeOperator::Prefix, "");
        assert!(!empty.matches(Some("anything")));
    }
}
