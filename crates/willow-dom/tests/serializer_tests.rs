//! Serialization of manually built trees.

use willow_dom::{inner_html, serialize, Dom, NodeId, NodeKind};

#[test]
fn element_with_attributes_and_text() {
    let mut dom = Dom::new();
    let div = dom.create_element("div");
    dom.set_attribute(div, "class", "a b").unwrap();
    dom.append_child(NodeId::ROOT, div).unwrap();
    let p = dom.create_element("p");
    dom.append_child(div, p).unwrap();
    let text = dom.create_text("Hi");
    dom.append_child(p, text).unwrap();
    assert_eq!(serialize(&dom, NodeId::ROOT), "<div class=\"a b\"><p>Hi</p></div>");
}

#[test]
fn attributes_keep_insertion_order() {
    let mut dom = Dom::new();
    let input = dom.create_element("input");
    dom.set_attribute(input, "type", "text").unwrap();
    dom.set_attribute(input, "value", "Ohayo Sekai!").unwrap();
    assert_eq!(
        serialize(&dom, input),
        "<input type=\"text\" value=\"Ohayo Sekai!\"></input>"
    );
}

#[test]
fn self_closing_element_without_children() {
    let mut dom = Dom::new();
    let meta = dom.create_element("meta");
    dom.set_attribute(meta, "charset", "UTF-8").unwrap();
    dom.as_element_mut(meta).unwrap().self_closing = true;
    assert_eq!(serialize(&dom, meta), "<meta charset=\"UTF-8\"/>");
}

#[test]
fn self_closing_flag_is_ignored_once_children_exist() {
    let mut dom = Dom::new();
    let div = dom.create_element("div");
    dom.as_element_mut(div).unwrap().self_closing = true;
    let text = dom.create_text("x");
    dom.append_child(div, text).unwrap();
    assert_eq!(serialize(&dom, div), "<div>x</div>");
}

#[test]
fn special_node_kinds_round_out_the_syntax() {
    let mut dom = Dom::new();
    let comment = dom.create_comment("hi");
    let doctype = dom.alloc(NodeKind::Doctype("html".to_string()));
    let cdata = dom.alloc(NodeKind::Cdata("1 < 2".to_string()));
    let pi = dom.alloc(NodeKind::ProcessingInstruction {
        target: "php".to_string(),
        data: "echo 1;".to_string(),
    });
    dom.append_child(NodeId::ROOT, comment).unwrap();
    dom.append_child(NodeId::ROOT, doctype).unwrap();
    dom.append_child(NodeId::ROOT, cdata).unwrap();
    dom.append_child(NodeId::ROOT, pi).unwrap();
    assert_eq!(
        serialize(&dom, NodeId::ROOT),
        "<!--hi--><!DOCTYPE html><![CDATA[1 < 2]]><?php echo 1; ?>"
    );
}

#[test]
fn tag_names_serialize_lower_case() {
    let mut dom = Dom::new();
    let div = dom.create_element("DIV");
    assert_eq!(serialize(&dom, div), "<div></div>");
}

#[test]
fn inner_html_skips_the_outer_tags() {
    let mut dom = Dom::new();
    let div = dom.create_element("div");
    dom.append_child(NodeId::ROOT, div).unwrap();
    let em = dom.create_element("em");
    dom.append_child(div, em).unwrap();
    let text = dom.create_text("deep");
    dom.append_child(em, text).unwrap();
    assert_eq!(inner_html(&dom, div), "<em>deep</em>");
    assert_eq!(serialize(&dom, div), "<div><em>deep</em></div>");
}

#[test]
fn text_is_written_verbatim() {
    let mut dom = Dom::new();
    let p = dom.create_element("p");
    let text = dom.create_text("a & b");
    dom.append_child(p, text).unwrap();
    assert_eq!(serialize(&dom, p), "<p>a & b</p>");
}
