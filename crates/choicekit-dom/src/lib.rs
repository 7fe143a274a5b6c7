//! Headless element tree for choicekit.
//!
//! This crate stands in for the host page that choice widgets live in. It
//! provides the collaborators the widget components rely on:
//!
//! - **Element tree**: Arena-backed elements with classes, attributes,
//!   native form-control state and layout boxes ([`DocumentTree`])
//! - **Shared handles**: Thread-safe [`Document`] and [`Element`] references
//! - **Events**: Listener registration by handler identity, bubbling
//!   dispatch and focus tracking
//! - **Selectors**: Parsing and matching for structural queries
//! - **Geometry**: Bounding boxes and the injectable [`Viewport`]
//! - **Mutation records**: An opt-in log of every observable change
//!
//! # Example
//!
//! ```
//! use choicekit_dom::{Document, handler, utils};
//!
//! let doc = Document::new();
//! let list = doc.create_element("div");
//! doc.body().append_child(&list);
//!
//! let item = doc.create_element("div");
//! item.set_attribute("data-id", "1");
//! list.append_child(&item);
//!
//! utils::add_classes(&item, ["choices__item", "is-highlighted"]);
//! let found = list.query_selector(".is-highlighted[data-id]").unwrap();
//! assert_eq!(found, Some(item.clone()));
//!
//! let on_change = handler(|event| {
//!     assert_eq!(event.event_type(), "change");
//! });
//! doc.body().add_event_listener("change", &on_change);
//! assert_eq!(utils::dispatch_event(&item, "change", None), 1);
//! ```

mod document;
mod error;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod mutation;
mod node;
pub mod selector;
mod tree;
pub mod utils;

pub use document::{Document, Element};
pub use error::{Error, Result};
pub use event::{Event, EventHandler, ListenerId, handler};
pub use geometry::{FixedViewport, Rect, Viewport};
pub use mutation::MutationRecord;
pub use node::NodeId;
pub use tree::DocumentTree;

static_assertions::assert_impl_all!(DocumentTree: Send, Sync);
