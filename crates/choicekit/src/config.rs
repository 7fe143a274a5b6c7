//! Widget configuration: dropdown placement, presentation class names and
//! the kind of form control being enhanced.
//!
//! Configuration is plain `serde` data, so it can be built in code or read
//! from TOML:
//!
//! ```
//! use choicekit::{ChoicesConfig, Position};
//!
//! let config = ChoicesConfig::from_toml_str(r#"
//!     position = "top"
//!
//!     [classNames]
//!     openState = "is-open is-expanded"
//!     flippedState = ["is-flipped"]
//! "#).unwrap();
//!
//! assert_eq!(config.position, Position::Top);
//! assert_eq!(config.class_names.open_state.as_slice(), ["is-open", "is-expanded"]);
//! assert_eq!(config.class_names.container_outer.as_slice(), ["choices"]);
//! ```

use std::fmt;
use std::path::Path;

use choicekit_dom::Element;
use serde::{Deserialize, Serialize};

use crate::logging::targets;
use crate::{Error, Result};

// ============================================================================
// Class lists
// ============================================================================

/// An ordered set of presentation class names for one semantic state.
///
/// Deserializes from either a space-separated string or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "ClassListRepr", into = "Vec<String>")]
pub struct ClassList(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassListRepr {
    Joined(String),
    List(Vec<String>),
}

impl From<ClassListRepr> for ClassList {
    fn from(repr: ClassListRepr) -> Self {
        match repr {
            ClassListRepr::Joined(joined) => Self::from(joined.as_str()),
            ClassListRepr::List(list) => list.into_iter().collect(),
        }
    }
}

impl From<ClassList> for Vec<String> {
    fn from(list: ClassList) -> Self {
        list.0
    }
}

impl ClassList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The class names in order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterate over the class names.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Whether the list has no classes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether `class` is in the list.
    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }
}

impl From<&str> for ClassList {
    fn from(joined: &str) -> Self {
        joined.split_whitespace().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut classes: Vec<String> = Vec::new();
        for class in iter {
            let class = class.into();
            if !class.is_empty() && !classes.contains(&class) {
                classes.push(class);
            }
        }
        Self(classes)
    }
}

impl<'a> IntoIterator for &'a ClassList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

// ============================================================================
// Class-name table
// ============================================================================

/// Presentation classes for every surface and state of a widget.
///
/// Missing keys fall back to the defaults listed on each field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassNames {
    /// Outer container (`choices`).
    pub container_outer: ClassList,
    /// Inner container (`choices__inner`).
    pub container_inner: ClassList,
    /// Hidden native control and search input (`choices__input`).
    pub input: ClassList,
    /// Cloned search input (`choices__input--cloned`).
    pub input_cloned: ClassList,
    /// Any list (`choices__list`).
    pub list: ClassList,
    /// Selected items of a multiple select (`choices__list--multiple`).
    pub list_items: ClassList,
    /// Selected item of a single select (`choices__list--single`).
    pub list_single: ClassList,
    /// Dropdown panel (`choices__list--dropdown`).
    pub list_dropdown: ClassList,
    /// Any item (`choices__item`).
    pub item: ClassList,
    /// Selectable item (`choices__item--selectable`).
    pub item_selectable: ClassList,
    /// Disabled item (`choices__item--disabled`).
    pub item_disabled: ClassList,
    /// Choice inside the dropdown (`choices__item--choice`).
    pub item_choice: ClassList,
    /// Placeholder (`choices__placeholder`).
    pub placeholder: ClassList,
    /// Option group (`choices__group`).
    pub group: ClassList,
    /// Option group heading (`choices__heading`).
    pub group_heading: ClassList,
    /// Remove-item button (`choices__button`).
    pub button: ClassList,
    /// Shown dropdown (`is-active`).
    pub active_state: ClassList,
    /// Focused container (`is-focused`).
    pub focus_state: ClassList,
    /// Open container (`is-open`).
    pub open_state: ClassList,
    /// Disabled container (`is-disabled`).
    pub disabled_state: ClassList,
    /// Highlighted choice (`is-highlighted`).
    pub highlighted_state: ClassList,
    /// Selected choice (`is-selected`).
    pub selected_state: ClassList,
    /// Container whose dropdown renders above it (`is-flipped`).
    pub flipped_state: ClassList,
    /// Container waiting on choices (`is-loading`).
    pub loading_state: ClassList,
    /// Search returned nothing (`has-no-results`).
    pub no_results: ClassList,
    /// Nothing left to choose (`has-no-choices`).
    pub no_choices: ClassList,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            container_outer: "choices".into(),
            container_inner: "choices__inner".into(),
            input: "choices__input".into(),
            input_cloned: "choices__input--cloned".into(),
            list: "choices__list".into(),
            list_items: "choices__list--multiple".into(),
            list_single: "choices__list--single".into(),
            list_dropdown: "choices__list--dropdown".into(),
            item: "choices__item".into(),
            item_selectable: "choices__item--selectable".into(),
            item_disabled: "choices__item--disabled".into(),
            item_choice: "choices__item--choice".into(),
            placeholder: "choices__placeholder".into(),
            group: "choices__group".into(),
            group_heading: "choices__heading".into(),
            button: "choices__button".into(),
            active_state: "is-active".into(),
            focus_state: "is-focused".into(),
            open_state: "is-open".into(),
            disabled_state: "is-disabled".into(),
            highlighted_state: "is-highlighted".into(),
            selected_state: "is-selected".into(),
            flipped_state: "is-flipped".into(),
            loading_state: "is-loading".into(),
            no_results: "has-no-results".into(),
            no_choices: "has-no-choices".into(),
        }
    }
}

// ============================================================================
// Position
// ============================================================================

/// Where the dropdown renders relative to the container.
///
/// Unrecognised names are read as [`Position::Bottom`], which never flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Position {
    /// Below, unless the viewport is too short.
    #[default]
    Auto,
    /// Always above.
    Top,
    /// Always below.
    Bottom,
}

impl Position {
    /// Parse a position name, case-insensitively.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "auto" => Self::Auto,
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            other => {
                tracing::warn!(target: targets::CONFIG, position = other, "unknown position, using bottom");
                Self::Bottom
            }
        }
    }

    /// The configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl From<String> for Position {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Passed element type
// ============================================================================

/// The kind of form control a widget enhances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassedElementType {
    /// A text `<input>`.
    #[serde(rename = "text")]
    Text,
    /// A single-choice `<select>`.
    #[serde(rename = "select-one")]
    SelectOne,
    /// A `<select multiple>`.
    #[serde(rename = "select-multiple")]
    SelectMultiple,
}

impl PassedElementType {
    /// Derive the type from a form control surface.
    ///
    /// Anything other than a `<select>` is treated as text.
    pub fn of(element: &Element) -> Self {
        if element.tag_name() != "select" {
            Self::Text
        } else if element.has_attribute("multiple") {
            Self::SelectMultiple
        } else {
            Self::SelectOne
        }
    }

    /// The wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::SelectOne => "select-one",
            Self::SelectMultiple => "select-multiple",
        }
    }
}

impl fmt::Display for PassedElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Widget configuration
// ============================================================================

/// Construction-time configuration shared by the widget components.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChoicesConfig {
    /// Dropdown placement.
    pub position: Position,
    /// Presentation classes.
    pub class_names: ClassNames,
}

impl ChoicesConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| Error::config(None, e))
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config =
            toml::from_str(&content).map_err(|e| Error::config(Some(path.to_path_buf()), e))?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded configuration");
        Ok(config)
    }
}
