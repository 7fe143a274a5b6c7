//! Custom events a widget dispatches from its wrapped form control.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Widget event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    /// The dropdown was shown.
    ShowDropdown,
    /// The dropdown was hidden.
    HideDropdown,
    /// The selected value changed.
    Change,
    /// A choice was picked.
    Choice,
    /// The user typed into the search input.
    Search,
    /// An item was added.
    AddItem,
    /// An item was removed.
    RemoveItem,
    /// An item was highlighted.
    HighlightItem,
    /// An item lost its highlight.
    UnhighlightItem,
    /// A dropdown choice was highlighted.
    HighlightChoice,
    /// A dropdown choice lost its highlight.
    UnhighlightChoice,
}

impl EventType {
    /// Every event type.
    pub const ALL: [EventType; 11] = [
        Self::ShowDropdown,
        Self::HideDropdown,
        Self::Change,
        Self::Choice,
        Self::Search,
        Self::AddItem,
        Self::RemoveItem,
        Self::HighlightItem,
        Self::UnhighlightItem,
        Self::HighlightChoice,
        Self::UnhighlightChoice,
    ];

    /// The dispatched event name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShowDropdown => "showDropdown",
            Self::HideDropdown => "hideDropdown",
            Self::Change => "change",
            Self::Choice => "choice",
            Self::Search => "search",
            Self::AddItem => "addItem",
            Self::RemoveItem => "removeItem",
            Self::HighlightItem => "highlightItem",
            Self::UnhighlightItem => "unhighlightItem",
            Self::HighlightChoice => "highlightChoice",
            Self::UnhighlightChoice => "unhighlightChoice",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
