//! Class, relocation and dispatch helpers shared by widget components.

use serde_json::Value;

use crate::document::Element;
use crate::event::Event;

/// Add every class in `classes`. Already present classes are left alone.
pub fn add_classes<I, S>(element: &Element, classes: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for class in classes {
        element.add_class(class.as_ref());
    }
}

/// Remove every class in `classes`. Absent classes are ignored.
pub fn remove_classes<I, S>(element: &Element, classes: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for class in classes {
        element.remove_class(class.as_ref());
    }
}

/// Move `target` inside `wrapper`, putting `wrapper` where `target` was.
///
/// If `target` is detached, `wrapper` stays where it is and just receives
/// `target` as its last child.
pub fn wrap(target: &Element, wrapper: &Element) {
    if let Some(parent) = target.parent() {
        parent.insert_before(wrapper, target.next_sibling().as_ref());
    }
    wrapper.append_child(target);
}

/// Dispatch a bubbling custom event carrying `detail` from `element`.
/// Returns the number of handlers that ran.
pub fn dispatch_event(element: &Element, event_type: &str, detail: Option<Value>) -> usize {
    element.dispatch_event(Event::custom(event_type, detail))
}
