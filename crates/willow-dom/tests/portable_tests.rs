//! JSON interchange through the portable form.

use willow_dom::{
    from_json, from_portable, to_json, to_portable, Dom, NodeId, PortableError,
    PortableNode,
};

fn sample_document() -> Dom {
    let mut dom = Dom::new();
    let div = dom.create_element("div");
    dom.set_attribute(div, "id", "box").unwrap();
    dom.append_child(NodeId::ROOT, div).unwrap();
    let text = dom.create_text("hello");
    dom.append_child(div, text).unwrap();
    let br = dom.create_element("br");
    dom.as_element_mut(br).unwrap().self_closing = true;
    dom.append_child(div, br).unwrap();
    dom
}

#[test]
fn portable_round_trip_preserves_structure() {
    let dom = sample_document();
    let portable = to_portable(&dom, NodeId::ROOT);
    let rebuilt = from_portable(&portable).unwrap();
    assert!(dom.structural_eq(NodeId::ROOT, &rebuilt, NodeId::ROOT));
}

#[test]
fn json_round_trip_preserves_structure() {
    let dom = sample_document();
    let json = to_json(&dom, NodeId::ROOT).unwrap();
    let rebuilt = from_json(&json).unwrap();
    assert!(dom.structural_eq(NodeId::ROOT, &rebuilt, NodeId::ROOT));
}

#[test]
fn kinds_and_names_come_out_as_expected() {
    let dom = sample_document();
    let portable = to_portable(&dom, NodeId::ROOT);
    assert_eq!(portable.kind, "document");
    let div = &portable.children[0];
    assert_eq!(div.kind, "element");
    assert_eq!(div.name.as_deref(), Some("div"));
    assert_eq!(div.attributes.len(), 1);
    assert_eq!(div.attributes[0].kind, "attr");
    assert_eq!(div.attributes[0].name.as_deref(), Some("id"));
    assert_eq!(div.attributes[0].value.as_deref(), Some("box"));
    assert_eq!(div.children[0].kind, "text");
    assert_eq!(div.children[1].kind, "singletag");
    assert_eq!(div.children[1].name.as_deref(), Some("br"));
}

#[test]
fn singletag_rebuilds_as_self_closing() {
    let dom = sample_document();
    let rebuilt = from_portable(&to_portable(&dom, NodeId::ROOT)).unwrap();
    let div = rebuilt.children(NodeId::ROOT)[0];
    let br = rebuilt.children(div)[1];
    assert!(rebuilt.as_element(br).unwrap().self_closing);
}

#[test]
fn carriage_returns_are_stripped_from_text() {
    let mut dom = Dom::new();
    let text = dom.create_text("line\r\nnext");
    let portable = to_portable(&dom, text);
    assert_eq!(portable.value.as_deref(), Some("line\nnext"));
}

#[test]
fn non_document_top_node_gets_rooted() {
    let dom = sample_document();
    let div = dom.children(NodeId::ROOT)[0];
    let rebuilt = from_portable(&to_portable(&dom, div)).unwrap();
    assert_eq!(rebuilt.children(NodeId::ROOT).len(), 1);
    assert!(dom.structural_eq(div, &rebuilt, rebuilt.children(NodeId::ROOT)[0]));
}

#[test]
fn unknown_kind_is_rejected() {
    let result = from_json("{\"kind\": \"wormhole\"}");
    assert!(matches!(result, Err(PortableError::UnknownKind(k)) if k == "wormhole"));
}

#[test]
fn element_without_a_name_is_rejected() {
    let mut portable = PortableNode {
        kind: "element".to_string(),
        name: None,
        value: None,
        children: Vec::new(),
        attributes: Vec::new(),
    };
    assert!(matches!(
        from_portable(&portable),
        Err(PortableError::MissingField { field: "name", .. })
    ));
    portable.name = Some("div".to_string());
    assert!(from_portable(&portable).is_ok());
}

#[test]
fn bad_json_surfaces_the_parse_error() {
    assert!(matches!(from_json("not json"), Err(PortableError::Json(_))));
}
