//! Selector matching against parsed documents.

use willow_dom::{Dom, NodeId};
use willow_html::parse;
use willow_selector::{matches, query_selector, query_selector_all};

fn tags(dom: &Dom, ids: &[NodeId]) -> Vec<String> {
    ids.iter()
        .map(|&id| dom.as_element(id).unwrap().tag_name.clone())
        .collect()
}

#[test]
fn tag_id_class_and_attribute_queries() {
    let dom = parse("<input type=\"text\" value=\"Ohayo Sekai!\">").unwrap();
    for selector in ["input", "INPUT", "[type]", "[type=text]", "[type=\"text\"]"] {
        let found = query_selector(&dom, NodeId::ROOT, selector).unwrap();
        assert!(found.is_some(), "{selector} should match");
        assert_eq!(
            dom.get_attribute(found.unwrap(), "value"),
            Some("Ohayo Sekai!")
        );
    }
    assert!(query_selector(&dom, NodeId::ROOT, "[type=email]")
        .unwrap()
        .is_none());
}

#[test]
fn first_match_is_first_in_document_order() {
    // The match inside the first sibling subtree must win over the later
    // shallower one, and a match in a later sibling subtree must still be
    // found at all.
    let dom = parse("<section><div><p class=\"t\">deep</p></div><p class=\"t\">flat</p></section>")
        .unwrap();
    let first = query_selector(&dom, NodeId::ROOT, "p.t").unwrap().unwrap();
    assert_eq!(dom.text_content(first), "deep");

    let dom = parse("<div><span>a</span></div><em>b</em>").unwrap();
    let found = query_selector(&dom, NodeId::ROOT, "em").unwrap();
    assert!(found.is_some(), "later sibling subtrees must be searched");
}

#[test]
fn the_subject_is_the_rightmost_compound() {
    let dom = parse("<div><p>inner</p></div>").unwrap();
    let found = query_selector(&dom, NodeId::ROOT, "div > p").unwrap().unwrap();
    assert_eq!(dom.as_element(found).unwrap().tag_name, "P");
}

#[test]
fn child_requires_a_direct_parent() {
    let dom = parse("<section><div><p>deep</p></div></section>").unwrap();
    assert!(query_selector(&dom, NodeId::ROOT, "section > p")
        .unwrap()
        .is_none());
    assert!(query_selector(&dom, NodeId::ROOT, "section p")
        .unwrap()
        .is_some());
    assert!(query_selector(&dom, NodeId::ROOT, "div > p")
        .unwrap()
        .is_some());
}

#[test]
fn descendant_combinator_backtracks_over_ancestors() {
    let dom = parse("<div id=\"outer\"><section><div id=\"inner\"><p>x</p></div></section></div>")
        .unwrap();
    // The nearest div ancestor is #inner, but #outer also satisfies the
    // chain through the section.
    assert!(query_selector(&dom, NodeId::ROOT, "#outer section p")
        .unwrap()
        .is_some());
    assert!(query_selector(&dom, NodeId::ROOT, "section div p")
        .unwrap()
        .is_some());
}

#[test]
fn sibling_combinators() {
    let dom = parse("<ul><li>1</li><li>2</li><li>3</li></ul>").unwrap();
    let next = query_selector_all(&dom, NodeId::ROOT, "li + li").unwrap();
    assert_eq!(next.len(), 2);
    let subsequent = query_selector_all(&dom, NodeId::ROOT, "li ~ li").unwrap();
    assert_eq!(subsequent.len(), 2);

    let dom = parse("<div><h1>t</h1>text<p>a</p><p>b</p></div>").unwrap();
    // Text between elements does not break element adjacency.
    let after_heading = query_selector(&dom, NodeId::ROOT, "h1 + p").unwrap().unwrap();
    assert_eq!(dom.text_content(after_heading), "a");
}

#[test]
fn query_all_reports_each_element_once_in_order() {
    let dom = parse("<article><p class=\"x\">1</p><span>2</span><p>3</p></article>").unwrap();
    let found = query_selector_all(&dom, NodeId::ROOT, "p, .x, span").unwrap();
    assert_eq!(tags(&dom, &found), vec!["P", "SPAN", "P"]);
}

#[test]
fn structural_pseudo_classes() {
    let dom = parse("<ul><li>1</li><li>2</li><li>3</li><li>4</li></ul>").unwrap();
    let first = query_selector(&dom, NodeId::ROOT, "li:first-child").unwrap().unwrap();
    assert_eq!(dom.text_content(first), "1");
    let last = query_selector(&dom, NodeId::ROOT, "li:last-child").unwrap().unwrap();
    assert_eq!(dom.text_content(last), "4");
    let odd = query_selector_all(&dom, NodeId::ROOT, "li:nth-child(odd)").unwrap();
    assert_eq!(odd.len(), 2);
    let last_two = query_selector_all(&dom, NodeId::ROOT, "li:nth-last-child(-n+2)").unwrap();
    assert_eq!(last_two.len(), 2);
    assert!(query_selector(&dom, NodeId::ROOT, "li:only-child")
        .unwrap()
        .is_none());
}

#[test]
fn of_type_pseudo_classes_ignore_other_tags() {
    let dom = parse("<div><h1>t</h1><p>a</p><p>b</p></div>").unwrap();
    let first_p = query_selector(&dom, NodeId::ROOT, "p:first-of-type").unwrap().unwrap();
    assert_eq!(dom.text_content(first_p), "a");
    assert!(query_selector(&dom, NodeId::ROOT, "p:first-child")
        .unwrap()
        .is_none());
    let last_p = query_selector(&dom, NodeId::ROOT, "p:last-of-type").unwrap().unwrap();
    assert_eq!(dom.text_content(last_p), "b");
    let only_h1 = query_selector(&dom, NodeId::ROOT, "h1:only-child").unwrap();
    assert!(only_h1.is_none());
}

#[test]
fn empty_is_lenient_about_whitespace_and_comments() {
    let dom = parse("<div><p>  <!--c--> </p><span>text</span><b></b></div>").unwrap();
    let found = query_selector_all(&dom, NodeId::ROOT, ":empty").unwrap();
    assert_eq!(tags(&dom, &found), vec!["P", "B"]);
}

#[test]
fn not_excludes_matching_elements() {
    let dom = parse("<div><p class=\"a\">1</p><p>2</p><p hidden>3</p></div>").unwrap();
    let found = query_selector_all(&dom, NodeId::ROOT, "p:not(.a, [hidden])").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(dom.text_content(found[0]), "2");
}

#[test]
fn attribute_substring_modes_match_values() {
    let dom = parse("<a href=\"https://example.test/img.png\">x</a>").unwrap();
    for selector in ["[href^=https]", "[href$=.png]", "[href*=example]"] {
        assert!(
            query_selector(&dom, NodeId::ROOT, selector).unwrap().is_some(),
            "{selector} should match"
        );
    }
    assert!(query_selector(&dom, NodeId::ROOT, "[href^=ftp]")
        .unwrap()
        .is_none());
}

#[test]
fn missing_attribute_fails_every_mode() {
    let dom = parse("<p>x</p>").unwrap();
    for selector in ["[href]", "[href=a]", "[href^=a]", "[href$=a]", "[href*=a]"] {
        assert!(query_selector(&dom, NodeId::ROOT, selector)
            .unwrap()
            .is_none());
    }
}

#[test]
fn unsupported_pseudo_classes_never_match() {
    let dom = parse("<a href=\"#\">x</a>").unwrap();
    assert!(query_selector(&dom, NodeId::ROOT, "a:hover")
        .unwrap()
        .is_none());
    assert!(query_selector(&dom, NodeId::ROOT, "a").unwrap().is_some());
}

#[test]
fn matches_tests_one_element_in_place() {
    let dom = parse("<div class=\"note\"><p>x</p></div>").unwrap();
    let div = query_selector(&dom, NodeId::ROOT, "div").unwrap().unwrap();
    assert!(matches(&dom, div, ".note").unwrap());
    assert!(!matches(&dom, div, "p").unwrap());
    let p = query_selector(&dom, NodeId::ROOT, "p").unwrap().unwrap();
    assert!(matches(&dom, p, "div > p").unwrap());
    assert!(matches(&dom, p, ".note p").unwrap());
}

#[test]
fn the_search_root_itself_is_excluded() {
    let dom = parse("<div id=\"root\"><div id=\"child\"></div></div>").unwrap();
    let root = query_selector(&dom, NodeId::ROOT, "#root").unwrap().unwrap();
    let found = query_selector(&dom, root, "div").unwrap().unwrap();
    assert_eq!(dom.get_attribute(found, "id"), Some("child"));
}

#[test]
fn a_bad_selector_surfaces_the_parse_error() {
    let dom = parse("<p>x</p>").unwrap();
    assert!(query_selector(&dom, NodeId::ROOT, "p >").is_err());
    assert!(query_selector_all(&dom, NodeId::ROOT, "").is_err());
}
