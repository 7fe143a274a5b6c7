//! State layer for select and text choice widgets.
//!
//! A widget is composed of three cooperating components, each owning a
//! handful of boolean flags that are kept consistent with the classes and
//! accessibility attributes on its surface:
//!
//! - [`Container`]: the outer surface. Open, flipped, focused, disabled and
//!   loading state, plus the decision of whether the dropdown renders above
//!   its anchor.
//! - [`Dropdown`]: the panel of choices and its active state.
//! - [`WrappedElement`]: the hidden native `<input>` or `<select>`, its value
//!   and disabled state, and widget event dispatch.
//!
//! Deciding *when* to open, close, enable or disable is left to the caller.
//! Surfaces live in a [`choicekit_dom::Document`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use choicekit::{
//!     ChoicesConfig, Container, ContainerOptions, Dropdown, DropdownOptions,
//!     PassedElementType, WrappedElement, WrappedElementOptions,
//! };
//! use choicekit_dom::{Document, FixedViewport, Rect};
//!
//! let doc = Document::new();
//! let select = doc.create_element("select");
//! doc.body().append_child(&select);
//!
//! let config = ChoicesConfig::default();
//! let kind = PassedElementType::of(&select);
//! let viewport = Arc::new(FixedViewport::new(800.0));
//!
//! let wrapped = WrappedElement::new(WrappedElementOptions::new(select.clone()).with_config(&config))?;
//! let mut container = Container::new(
//!     ContainerOptions::new(doc.create_element("div"), kind, viewport).with_config(&config),
//! );
//! let mut dropdown = Dropdown::new(
//!     DropdownOptions::new(doc.create_element("div"), kind).with_config(&config),
//! );
//!
//! container.wrap(&select);
//! container.element().append_child(dropdown.element());
//! wrapped.conceal();
//!
//! dropdown.element().set_bounding_client_rect(Rect::new(0.0, 40.0, 200.0, 300.0));
//! dropdown.show();
//! container.open(dropdown.distance_from_top_window());
//! assert!(container.is_open() && !container.is_flipped());
//!
//! container.close();
//! dropdown.hide();
//! container.unwrap(&select);
//! wrapped.reveal();
//! assert_eq!(select.parent(), Some(doc.body()));
//! # Ok::<(), choicekit::Error>(())
//! ```

pub mod config;
mod container;
mod dropdown;
mod error;
pub mod events;
pub mod logging;
mod wrapped_element;

pub use config::{ChoicesConfig, ClassList, ClassNames, PassedElementType, Position};
pub use container::{Container, ContainerOptions};
pub use dropdown::{Dropdown, DropdownOptions};
pub use error::{Error, Result};
pub use events::EventType;
pub use wrapped_element::{WrappedElement, WrappedElementOptions};
