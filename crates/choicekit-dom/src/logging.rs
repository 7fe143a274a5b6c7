//! Tracing targets for the element tree.
//!
//! The crate logs through the `tracing` facade and never installs a
//! subscriber. To see its output, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("choicekit_dom=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Element tree target.
    pub const TREE: &str = "choicekit_dom::tree";
    /// Element handle target (operations on destroyed nodes are logged here).
    pub const ELEMENT: &str = "choicekit_dom::element";
    /// Event dispatch target.
    pub const EVENT: &str = "choicekit_dom::event";
    /// Focus tracking target.
    pub const FOCUS: &str = "choicekit_dom::focus";
    /// Selector parsing and matching target.
    pub const SELECTOR: &str = "choicekit_dom::selector";
}
