//! Behaviour of the three components working over one document.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use choicekit::{
    ClassNames, Container, ContainerOptions, Dropdown, DropdownOptions, EventType,
    PassedElementType, Position, WrappedElement, WrappedElementOptions,
};
use choicekit_dom::{Document, Element, FixedViewport, MutationRecord, Rect, handler};
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

struct Widget {
    doc: Document,
    select: Element,
    viewport: Arc<FixedViewport>,
    container: Container,
    dropdown: Dropdown,
    wrapped: WrappedElement,
}

fn widget(position: Position, multiple: bool) -> Widget {
    init_tracing();
    let doc = Document::new();
    let select = doc.create_element("select");
    if multiple {
        select.set_attribute("multiple", "");
    }
    doc.body().append_child(&select);

    let kind = PassedElementType::of(&select);
    let viewport = Arc::new(FixedViewport::new(600.0));
    let wrapped = WrappedElement::new(WrappedElementOptions::new(select.clone()))
        .expect("select is a supported control");
    let container = Container::new(
        ContainerOptions::new(doc.create_element("div"), kind, viewport.clone())
            .with_position(position),
    );
    let dropdown = Dropdown::new(DropdownOptions::new(doc.create_element("div"), kind));

    container.wrap(&select);
    container.element().append_child(dropdown.element());
    wrapped.conceal();

    Widget {
        doc,
        select,
        viewport,
        container,
        dropdown,
        wrapped,
    }
}

#[test]
fn open_close_sequences_track_last_call() {
    let mut w = widget(Position::Auto, false);
    let sequences: [&[bool]; 5] = [
        &[true],
        &[true, true],
        &[true, false],
        &[false, true, true, false, true],
        &[false, false],
    ];

    for sequence in sequences {
        for &open in sequence {
            if open {
                w.container.open(100.0);
            } else {
                w.container.close();
            }
        }
        let last_open = *sequence.last().unwrap_or(&false);
        assert_eq!(w.container.is_open(), last_open);
        let open_classes = w
            .container
            .element()
            .class_list()
            .iter()
            .filter(|c| *c == "is-open")
            .count();
        assert_eq!(open_classes, usize::from(last_open));
        w.container.close();
    }
}

#[test]
fn flipped_implies_open() {
    let mut w = widget(Position::Auto, false);
    for bottom in [10.0, 599.0, 600.0, 900.0, f64::NAN] {
        w.container.open(bottom);
        assert!(!w.container.is_flipped() || w.container.is_open());
        w.container.close();
        assert!(!w.container.is_flipped());
        assert!(!w.container.element().has_class("is-flipped"));
    }
}

#[test]
fn flip_follows_dropdown_geometry() {
    let mut w = widget(Position::Auto, false);
    w.dropdown
        .element()
        .set_bounding_client_rect(Rect::new(0.0, 400.0, 300.0, 250.0));

    w.container.open(w.dropdown.distance_from_top_window());
    assert!(w.container.is_flipped());
    w.container.close();

    w.viewport.set_height(1200.0);
    w.container.open(w.dropdown.distance_from_top_window());
    assert!(!w.container.is_flipped());
}

#[test]
fn top_and_bottom_ignore_viewport() {
    let top = widget(Position::Top, false);
    let bottom = widget(Position::Bottom, false);
    for x in [-1e6, -1.0, 0.0, 0.5, 599.0, 601.0, 1e12] {
        assert!(top.container.should_flip(x));
        assert!(!bottom.container.should_flip(x));
    }
    assert!(!top.container.should_flip(f64::NAN));
}

#[test]
fn disable_enable_restores_reachability() {
    let mut w = widget(Position::Auto, false);
    let surface = w.container.element().clone();
    surface.set_tab_index(0);

    w.container.disable();
    assert_eq!(surface.tab_index(), -1);
    w.container.enable();
    assert_eq!(surface.tab_index(), 0);
    assert!(!surface.has_attribute("aria-disabled"));

    let mut multi = widget(Position::Auto, true);
    assert_eq!(
        multi.container.passed_element_type(),
        PassedElementType::SelectMultiple
    );
    multi.container.disable();
    assert!(!multi.container.element().has_attribute("tabindex"));
}

#[test]
fn conceal_reveal_round_trips_style() {
    let w = widget(Position::Auto, false);
    w.wrapped.reveal();

    for style in ["", "color: red", "  width:10px;height : 2em ;  "] {
        if style.is_empty() {
            w.select.remove_attribute("style");
        } else {
            w.select.set_attribute("style", style);
        }

        w.wrapped.conceal();
        assert!(w.wrapped.is_active());
        w.wrapped.reveal();

        assert!(!w.select.has_attribute("data-choice-orig-style"));
        if style.is_empty() {
            assert!(!w.select.has_attribute("style"));
        } else {
            assert_eq!(w.select.attribute("style").as_deref(), Some(style));
        }
    }
}

#[test]
fn unsupported_surface_fails_before_mutation() {
    init_tracing();
    let doc = Document::new();
    let div = doc.create_element("div");
    doc.body().append_child(&div);
    doc.set_recording(true);

    let result = WrappedElement::new(
        WrappedElementOptions::new(div.clone()).with_class_names(ClassNames::default()),
    );

    assert!(matches!(result, Err(choicekit::Error::InvalidElement { .. })));
    assert!(
        doc.take_records()
            .iter()
            .all(|record| record.node() != div.id())
    );
    assert!(div.class_list().is_empty());
}

#[test]
fn show_hide_keep_active_and_expanded_in_lockstep() {
    let mut w = widget(Position::Auto, false);
    let panel = w.dropdown.element().clone();

    for _ in 0..3 {
        let shown = w.dropdown.show().is_active();
        assert!(shown);
        assert_eq!(panel.attribute("aria-expanded").as_deref(), Some("true"));

        let hidden = !w.dropdown.hide().is_active();
        assert!(hidden);
        assert_eq!(panel.attribute("aria-expanded").as_deref(), Some("false"));
    }
}

#[test]
fn widget_events_bubble_to_the_page() {
    let w = widget(Position::Auto, false);
    let count = Arc::new(AtomicUsize::new(0));
    let on_change = {
        let count = count.clone();
        handler(move |event| {
            assert_eq!(event.detail(), Some(&json!({ "value": "b" })));
            count.fetch_add(1, Ordering::SeqCst);
        })
    };
    w.doc.body().add_event_listener("change", &on_change);
    w.container
        .element()
        .add_event_listener(EventType::Change.as_str(), &on_change);

    w.wrapped
        .trigger_event(EventType::Change, Some(json!({ "value": "b" })));
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn focus_events_reach_container_flag() {
    let w = widget(Position::Auto, false);
    let surface = w.container.element().clone();
    surface.set_tab_index(0);
    w.container.add_event_listeners();

    w.container.focus();
    assert!(w.container.is_focussed());
    assert!(surface.is_focused());

    let search = w.doc.create_element("input");
    w.doc.body().append_child(&search);
    search.focus();
    assert!(!w.container.is_focussed());
}

#[test]
fn open_is_recorded_class_then_attribute() {
    let mut w = widget(Position::Top, false);
    let id = w.container.element().id();
    w.doc.set_recording(true);
    w.container.open(0.0);

    let kinds: Vec<_> = w
        .doc
        .take_records()
        .into_iter()
        .filter(|r| r.node() == id)
        .map(|r| match r {
            MutationRecord::ClassAdded { class, .. } => format!("class:{class}"),
            MutationRecord::AttributeSet { name, .. } => format!("attr:{name}"),
            other => format!("{other:?}"),
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["class:is-open", "attr:aria-expanded", "class:is-flipped"]
    );
}
