//! Tracing targets for the widget components.
//!
//! Components log state transitions at `debug` and recovered conditions at
//! `warn`. No subscriber is installed here.

/// Target names for log filtering.
pub mod targets {
    /// Container state transitions.
    pub const CONTAINER: &str = "choicekit::container";
    /// Dropdown state transitions and child queries.
    pub const DROPDOWN: &str = "choicekit::dropdown";
    /// Wrapped form control concealment and dispatch.
    pub const WRAPPED_ELEMENT: &str = "choicekit::wrapped_element";
    /// Configuration loading.
    pub const CONFIG: &str = "choicekit::config";
}
