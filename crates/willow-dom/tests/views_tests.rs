//! Class list, inline style, and dataset views.

use willow_dom::{Dom, NodeId};

fn element_with(attr: &str, value: &str) -> (Dom, NodeId) {
    let mut dom = Dom::new();
    let div = dom.create_element("div");
    dom.append_child(NodeId::ROOT, div).unwrap();
    dom.set_attribute(div, attr, value).unwrap();
    (dom, div)
}

#[test]
fn class_list_splits_on_whitespace() {
    let (dom, div) = element_with("class", "  alpha   beta ");
    assert_eq!(dom.class_list(div), vec!["alpha", "beta"]);
    assert!(dom.class_contains(div, "alpha"));
    assert!(!dom.class_contains(div, "gamma"));
}

#[test]
fn class_add_is_idempotent() {
    let (mut dom, div) = element_with("class", "alpha");
    dom.class_add(div, "beta").unwrap();
    dom.class_add(div, "beta").unwrap();
    assert_eq!(dom.class_name(div), "alpha beta");
}

#[test]
fn class_remove_rewrites_the_attribute() {
    let (mut dom, div) = element_with("class", "alpha beta gamma");
    dom.class_remove(div, "beta").unwrap();
    assert_eq!(dom.class_name(div), "alpha gamma");
    // Removing something absent leaves the list alone.
    dom.class_remove(div, "delta").unwrap();
    assert_eq!(dom.class_name(div), "alpha gamma");
}

#[test]
fn class_remove_without_class_attribute_stays_absent() {
    let mut dom = Dom::new();
    let div = dom.create_element("div");
    dom.append_child(NodeId::ROOT, div).unwrap();
    dom.class_remove(div, "ghost").unwrap();
    assert!(!dom.has_attribute(div, "class"));
    assert_eq!(willow_dom::serialize(&dom, div), "<div></div>");
}

#[test]
fn class_toggle_honors_force() {
    let (mut dom, div) = element_with("class", "on");
    assert!(!dom.class_toggle(div, "on", None).unwrap());
    assert!(dom.class_toggle(div, "on", None).unwrap());
    assert!(dom.class_toggle(div, "on", Some(true)).unwrap());
    assert!(dom.class_contains(div, "on"));
    assert!(!dom.class_toggle(div, "on", Some(false)).unwrap());
    assert!(!dom.class_contains(div, "on"));
}

#[test]
fn class_replace_preserves_position() {
    let (mut dom, div) = element_with("class", "a b c");
    assert!(dom.class_replace(div, "b", "x").unwrap());
    assert_eq!(dom.class_name(div), "a x c");
    assert!(!dom.class_replace(div, "missing", "y").unwrap());
    assert_eq!(dom.class_name(div), "a x c");
}

#[test]
fn class_view_on_a_fresh_element_starts_empty() {
    let mut dom = Dom::new();
    let div = dom.create_element("div");
    assert!(dom.class_list(div).is_empty());
    dom.class_add(div, "solo").unwrap();
    assert_eq!(dom.class_name(div), "solo");
}

#[test]
fn style_properties_parse_and_rewrite() {
    let (mut dom, div) = element_with("style", "color: red; margin: 0");
    assert_eq!(dom.style_property(div, "color").as_deref(), Some("red"));
    dom.set_style_property(div, "color", "blue").unwrap();
    assert_eq!(dom.css_text(div), "color: blue; margin: 0");
    dom.set_style_property(div, "display", "flex").unwrap();
    assert_eq!(dom.css_text(div), "color: blue; margin: 0; display: flex");
}

#[test]
fn camel_case_style_names_map_to_kebab_case() {
    let mut dom = Dom::new();
    let div = dom.create_element("div");
    dom.set_style_property(div, "backgroundColor", "teal").unwrap();
    assert_eq!(dom.css_text(div), "background-color: teal");
    assert_eq!(
        dom.style_property(div, "background-color").as_deref(),
        Some("teal")
    );
    assert_eq!(
        dom.style_property(div, "backgroundColor").as_deref(),
        Some("teal")
    );
}

#[test]
fn blank_style_value_removes_the_declaration() {
    let (mut dom, div) = element_with("style", "color: red; margin: 0");
    dom.set_style_property(div, "color", "  ").unwrap();
    assert_eq!(dom.css_text(div), "margin: 0");
    dom.remove_style_property(div, "margin").unwrap();
    assert_eq!(dom.css_text(div), "");
}

#[test]
fn style_remove_without_style_attribute_stays_absent() {
    let mut dom = Dom::new();
    let div = dom.create_element("div");
    dom.append_child(NodeId::ROOT, div).unwrap();
    dom.remove_style_property(div, "color").unwrap();
    assert!(!dom.has_attribute(div, "style"));
    assert_eq!(willow_dom::serialize(&dom, div), "<div></div>");
    // A blank set routes through removal and must not materialize it either.
    dom.set_style_property(div, "color", "").unwrap();
    assert!(!dom.has_attribute(div, "style"));
}

#[test]
fn style_remove_of_absent_property_leaves_the_attribute_untouched() {
    let (mut dom, div) = element_with("style", "color:red;margin:0");
    dom.remove_style_property(div, "padding").unwrap();
    // Nothing was removed, so the raw value keeps its original spelling.
    assert_eq!(dom.css_text(div), "color:red;margin:0");
}

#[test]
fn malformed_style_declarations_are_dropped() {
    let (mut dom, div) = element_with("style", "color red; ; margin: 0");
    dom.set_style_property(div, "padding", "1px").unwrap();
    assert_eq!(dom.css_text(div), "margin: 0; padding: 1px");
}

#[test]
fn dataset_keys_map_to_data_attributes() {
    let mut dom = Dom::new();
    let div = dom.create_element("div");
    dom.data_set(div, "userId", "42").unwrap();
    assert_eq!(dom.get_attribute(div, "data-user-id"), Some("42"));
    assert_eq!(dom.data_get(div, "userId"), Some("42"));
    dom.data_remove(div, "userId").unwrap();
    assert_eq!(dom.data_get(div, "userId"), None);
}
