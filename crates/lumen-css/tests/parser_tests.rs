//! Integration tests for the stylesheet parser.

use lumen_css::{Declaration, Specificity, parse_stylesheet};

#[test]
fn test_rule_with_declarations_in_order() {
    let sheet = parse_stylesheet("p { color: red; margin: 4px; color: blue; }");
    assert_eq!(sheet.len(), 1);
    let rule = &sheet.rules[0];
    assert_eq!(rule.selector, "p");
    assert_eq!(
        rule.declarations,
        vec![
            Declaration::new("color", "red"),
            Declaration::new("margin", "4px"),
            Declaration::new("color", "blue"),
        ]
    );
}

#[test]
fn test_trailing_semicolon_is_optional() {
    let sheet = parse_stylesheet(".a{color:blue}");
    assert_eq!(sheet.rules[0].selector, ".a");
    assert_eq!(sheet.rules[0].declarations, vec![Declaration::new("color", "blue")]);
}

#[test]
fn test_selector_and_values_are_trimmed() {
    let sheet = parse_stylesheet("  div   p  {  font-family :  Georgia, serif  ; }");
    let rule = &sheet.rules[0];
    assert_eq!(rule.selector, "div   p");
    assert_eq!(rule.declarations[0].property, "font-family");
    assert_eq!(rule.declarations[0].value, "Georgia, serif");
}

#[test]
fn test_property_names_are_lower_cased() {
    let sheet = parse_stylesheet("p { COLOR: Red }");
    assert_eq!(sheet.rules[0].declarations[0], Declaration::new("color", "Red"));
}

#[test]
fn test_declaration_without_colon_is_dropped() {
    let sheet = parse_stylesheet("p { color red; margin: 1px }");
    assert_eq!(sheet.rules[0].declarations, vec![Declaration::new("margin", "1px")]);
}

#[test]
fn test_declaration_with_empty_side_is_dropped() {
    let sheet = parse_stylesheet("p { color: ; : red; width: 5px }");
    assert_eq!(sheet.rules[0].declarations, vec![Declaration::new("width", "5px")]);
}

#[test]
fn test_rule_with_no_declarations_is_kept() {
    let sheet = parse_stylesheet("p {} div { }");
    assert_eq!(sheet.len(), 2);
    assert!(sheet.rules[0].declarations.is_empty());
}

#[test]
fn test_comments_between_rules_are_skipped() {
    let sheet = parse_stylesheet("/* header */ p { color: red } /* a */ /* b */ div { color: blue }");
    assert_eq!(sheet.len(), 2);
    assert_eq!(sheet.rules[1].selector, "div");
}

#[test]
fn test_missing_brace_halts_collection() {
    let sheet = parse_stylesheet("p { color: red } div color: blue; span { color: green }");
    // Everything from `div` up to the next `{` is read as one selector.
    assert_eq!(sheet.len(), 2);
    assert_eq!(sheet.rules[1].selector, "div color: blue; span");

    let sheet = parse_stylesheet("p { color: red } div");
    assert_eq!(sheet.len(), 1);
}

#[test]
fn test_empty_selector_is_dropped() {
    let sheet = parse_stylesheet("{ color: red } p { color: blue }");
    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet.rules[0].selector, "p");
}

#[test]
fn test_unclosed_block_keeps_declarations() {
    let sheet = parse_stylesheet("p { color: red; margin: 2px");
    assert_eq!(sheet.rules[0].declarations.len(), 2);
}

#[test]
fn test_specificity_attached_to_rules() {
    let sheet = parse_stylesheet("#main .note p { color: red } p { color: blue }");
    assert_eq!(sheet.rules[0].specificity, Specificity::new(0, 1, 1, 1));
    assert_eq!(sheet.rules[1].specificity, Specificity::new(0, 0, 0, 1));
}

#[test]
fn test_empty_and_blank_input() {
    assert!(parse_stylesheet("").is_empty());
    assert!(parse_stylesheet("   \n\t ").is_empty());
    assert!(parse_stylesheet("/* only a comment */").is_empty());
}

mod properties {
    use lumen_css::parse_stylesheet;
    use quickcheck_macros::quickcheck;

    #[quickcheck]
    fn parsing_never_panics_and_keeps_only_complete_parts(css: String) -> bool {
        let sheet = parse_stylesheet(&css);
        sheet.rules.iter().all(|rule| {
            !rule.selector.is_empty()
                && rule
                    .declarations
                    .iter()
                    .all(|d| !d.property.is_empty() && !d.value.is_empty())
        })
    }
}
