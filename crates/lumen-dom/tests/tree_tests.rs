//! Tests for node tree construction and traversal.

use lumen_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut DomTree, tag: &str, token_index: usize) -> NodeId {
    tree.alloc(
        NodeType::Element(ElementData {
            tag_name: tag.to_string(),
            attrs: AttributesMap::new(),
        }),
        Some(token_index),
    )
}

#[test]
fn test_new_tree_has_document_root() {
    let tree = DomTree::new();
    assert_eq!(tree.len(), 1);
    let root = tree.get(tree.root()).unwrap();
    assert!(matches!(root.node_type, NodeType::Document));
    assert_eq!(root.token_index, None);
    assert_eq!(root.parent, None);
}

#[test]
fn test_append_child_sets_parent() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div", 0);
    tree.append_child(NodeId::ROOT, div);

    assert_eq!(tree.children(NodeId::ROOT), &[div]);
    assert_eq!(tree.parent(div), Some(NodeId::ROOT));
    assert_eq!(tree.get(div).unwrap().token_index, Some(0));
}

#[test]
fn test_ancestors_walk_to_root() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html", 0);
    let body = alloc_element(&mut tree, "body", 1);
    let p = alloc_element(&mut tree, "p", 2);
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, body);
    tree.append_child(body, p);

    let ancestors: Vec<NodeId> = tree.ancestors(p).collect();
    assert_eq!(ancestors, vec![body, html, NodeId::ROOT]);
}

#[test]
fn test_iter_all_is_document_order() {
    let mut tree = DomTree::new();
    let a = alloc_element(&mut tree, "a", 0);
    let b = alloc_element(&mut tree, "b", 1);
    let c = alloc_element(&mut tree, "c", 2);
    tree.append_child(NodeId::ROOT, a);
    tree.append_child(a, b);
    tree.append_child(NodeId::ROOT, c);

    let order: Vec<NodeId> = tree.iter_all().collect();
    assert_eq!(order, vec![NodeId::ROOT, a, b, c]);
}

#[test]
fn test_classes_split_on_any_whitespace() {
    let mut attrs = AttributesMap::new();
    let _ = attrs.insert("class".to_string(), "one  two\tthree".to_string());
    let _ = attrs.insert("id".to_string(), "main".to_string());
    let element = ElementData {
        tag_name: "div".to_string(),
        attrs,
    };

    let classes = element.classes();
    assert_eq!(classes.len(), 3);
    assert!(classes.contains("two"));
    assert_eq!(element.id(), Some("main"));
}

#[test]
fn test_node_id_display() {
    assert_eq!(NodeId::ROOT.to_string(), "node-0");
    assert_eq!(NodeId(12).to_string(), "node-12");
}

#[test]
fn test_append_child_ignores_foreign_ids() {
    let mut tree = DomTree::new();
    tree.append_child(NodeId::ROOT, NodeId(42));
    assert!(tree.children(NodeId::ROOT).is_empty());
}
