//! Integration tests for style computation.

use lumen_css::{ComputedStyle, StyledNode, compute_styles, extract_style_content, parse_stylesheet};
use lumen_dom::{DomTree, NodeId};
use lumen_html::{TreeBuilder, tokenize};

/// Build the tree and compute styles for some markup and CSS.
fn styled(html: &str, css: &str) -> (DomTree, StyledNode) {
    let tokens = tokenize(html);
    let tree = TreeBuilder::new(&tokens).run();
    let styled = compute_styles(&tree, &parse_stylesheet(css));
    (tree, styled)
}

/// Find the first element with the given id attribute.
fn by_id(tree: &DomTree, id: &str) -> NodeId {
    tree.iter_all()
        .find(|&node| tree.as_element(node).and_then(|e| e.id()) == Some(id))
        .unwrap()
}

fn style_of(styled: &StyledNode, node: NodeId) -> &ComputedStyle {
    &styled.find(node).unwrap().style
}

#[test]
fn test_styled_tree_mirrors_node_tree() {
    let (tree, styled) = styled("<div><p>a</p><!-- c --><p>b</p></div>", "");
    assert_eq!(styled.node_id, NodeId::ROOT);
    assert_eq!(styled.count(), tree.len());
    assert!(styled.style.is_empty());
}

#[test]
fn test_type_class_and_id_selectors() {
    let (tree, styled) = styled(
        r#"<div id="x" class="note big">t</div>"#,
        "div { width: 10px } .note { height: 5px } #x { margin: 1px } .missing { color: red }",
    );
    let style = style_of(&styled, by_id(&tree, "x"));
    assert_eq!(style.width(), Some("10px"));
    assert_eq!(style.height(), Some("5px"));
    assert_eq!(style.get_raw("margin"), Some("1px"));
    assert_eq!(style.color(), None);
}

#[test]
fn test_compound_classes_require_all() {
    let (tree, styled) = styled(
        r#"<p id="both" class="a b">x</p><p id="one" class="a">y</p>"#,
        ".a.b { color: red }",
    );
    assert_eq!(style_of(&styled, by_id(&tree, "both")).color(), Some("red"));
    assert_eq!(style_of(&styled, by_id(&tree, "one")).color(), None);
}

#[test]
fn test_id_beats_later_class() {
    let (tree, styled) = styled(
        r#"<p id="main" class="note">x</p>"#,
        "#main { color: red } .note { color: green }",
    );
    assert_eq!(style_of(&styled, by_id(&tree, "main")).color(), Some("red"));
}

#[test]
fn test_equal_specificity_later_rule_wins() {
    let (tree, styled) = styled(
        r#"<p id="p" class="a b">x</p>"#,
        ".a { color: red } .b { color: green }",
    );
    assert_eq!(style_of(&styled, by_id(&tree, "p")).color(), Some("green"));
}

#[test]
fn test_later_declaration_in_rule_wins() {
    let (tree, styled) = styled(r#"<p id="p">x</p>"#, "p { color: red; color: blue }");
    assert_eq!(style_of(&styled, by_id(&tree, "p")).color(), Some("blue"));
}

#[test]
fn test_descendant_selector() {
    let (tree, styled) = styled(
        r#"<ul><li id="inside">a</li></ul><li id="outside">b</li>"#,
        "ul li { color: red }",
    );
    assert_eq!(style_of(&styled, by_id(&tree, "inside")).color(), Some("red"));
    assert_eq!(style_of(&styled, by_id(&tree, "outside")).color(), None);
}

#[test]
fn test_descendant_selector_skips_intermediate_ancestors() {
    let (tree, styled) = styled(
        r#"<div class="a"><section><div class="b"><span><em id="t">x</em></span></div></section></div>"#,
        ".a .b em { color: red } .b .a em { color: blue }",
    );
    assert_eq!(style_of(&styled, by_id(&tree, "t")).color(), Some("red"));
}

#[test]
fn test_descendant_needs_strict_ancestor() {
    let (tree, styled) = styled(r#"<p id="p" class="a">x</p>"#, ".a p { color: red }");
    assert_eq!(style_of(&styled, by_id(&tree, "p")).color(), None);
}

#[test]
fn test_elements_inherit_only_inheritable_properties() {
    let (tree, styled) = styled(
        r#"<div id="outer"><p id="inner">x</p></div>"#,
        "#outer { color: red; font-size: 20px; background-color: blue; width: 50px }",
    );
    let inner = style_of(&styled, by_id(&tree, "inner"));
    assert_eq!(inner.color(), Some("red"));
    assert_eq!(inner.get_raw("font-size"), Some("20px"));
    assert_eq!(inner.background_color(), None);
    assert_eq!(inner.width(), None);
}

#[test]
fn test_text_nodes_copy_parent_style_whole() {
    let (tree, styled) = styled(
        r#"<p id="p">hello</p>"#,
        "p { color: red; background-color: blue }",
    );
    let p = by_id(&tree, "p");
    let text = tree.children(p)[0];
    assert_eq!(style_of(&styled, text), style_of(&styled, p));
}

#[test]
fn test_own_declaration_overrides_inherited() {
    let (tree, styled) = styled(
        r#"<div><p id="p">x</p></div>"#,
        "div { color: red } p { color: green }",
    );
    assert_eq!(style_of(&styled, by_id(&tree, "p")).color(), Some("green"));
}

#[test]
fn test_universal_selector_matches_elements() {
    let (tree, styled) = styled(r#"<div id="d"><p id="p">x</p></div>"#, "* { margin: 0 }");
    assert_eq!(style_of(&styled, by_id(&tree, "d")).get_raw("margin"), Some("0"));
    assert_eq!(style_of(&styled, by_id(&tree, "p")).get_raw("margin"), Some("0"));
}

#[test]
fn test_type_selectors_ignore_case() {
    let (tree, styled) = styled(r#"<DIV id="d">x</DIV>"#, "Div { color: red }");
    assert_eq!(style_of(&styled, by_id(&tree, "d")).color(), Some("red"));
}

#[test]
fn test_pseudo_class_only_raises_specificity() {
    let (tree, styled) = styled(
        r#"<a id="a">x</a>"#,
        "a:hover { color: red } a { color: blue }",
    );
    // `a:hover` matches like `a` but is more specific.
    assert_eq!(style_of(&styled, by_id(&tree, "a")).color(), Some("red"));
}

#[test]
fn test_extract_style_content_in_document_order() {
    let tokens = tokenize(
        "<head><style>p { color: red }</style></head><body><style>div { color: blue }</style></body>",
    );
    let tree = TreeBuilder::new(&tokens).run();
    let css = extract_style_content(&tree);
    assert_eq!(css, "p { color: red }\ndiv { color: blue }\n");
    assert_eq!(parse_stylesheet(&css).len(), 2);
}
