//! Integration tests for the full rendering pipeline.

use lumen_browser::css::{FilterReasonKind, LayerTrigger, PaintKind, RenderNode};
use lumen_browser::html::TokenKind;
use lumen_browser::{
    LoadError, Pipeline, PipelineInput, PipelineResult, PipelineStage, PipelineStats,
    run_pipeline,
};

fn run(html: &str, css: &str) -> PipelineResult {
    run_pipeline(&PipelineInput::new(html).with_stylesheet(css))
}

/// The first render node with `tag`, in pre-order.
fn find_tag<'a>(node: &'a RenderNode, tag: &str) -> Option<&'a RenderNode> {
    if node.tag_name.as_deref() == Some(tag) {
        return Some(node);
    }
    node.children.iter().find_map(|child| find_tag(child, tag))
}

fn stages(result: &PipelineResult) -> Vec<PipelineStage> {
    result.meta.steps.iter().map(|step| step.stage).collect()
}

#[test]
fn test_class_color_reaches_text_paint() {
    let result = run(r#"<div class="a">hi</div>"#, ".a{color:blue}");
    let render = result.render.as_ref().unwrap();
    let div = find_tag(render, "div").unwrap();
    assert_eq!(div.style.color(), Some("blue"));

    let layout = result.layout.as_ref().unwrap();
    let div_box = layout.find(div.node_id).unwrap();
    assert!(div_box.rect.height >= 20.0);

    let texts: Vec<&PaintKind> = result
        .paint
        .iter()
        .map(|command| &command.kind)
        .filter(|kind| matches!(kind, PaintKind::Text { .. }))
        .collect();
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].color(), "blue");
}

#[test]
fn test_display_none_subtree_is_filtered_once() {
    let result = run(
        r#"<div style ignored><p class="hidden-display">x</p></div>"#,
        ".hidden-display{display:none}",
    );
    let render = result.render.as_ref().unwrap();
    assert!(find_tag(render, "div").is_some());
    assert!(find_tag(render, "p").is_none());

    let hidden: Vec<_> = result
        .meta
        .filter_reasons
        .iter()
        .filter(|reason| reason.reason == FilterReasonKind::DisplayNone)
        .collect();
    assert_eq!(hidden.len(), 1);
    assert_eq!(hidden[0].node_name, "p");
}

#[test]
fn test_transform_promotes_one_layer() {
    let result = run(
        r#"<div class="box"></div>"#,
        ".box{transform:translateX(50px)}",
    );
    assert_eq!(result.layers.len(), 2);
    assert_eq!(result.layers[0].trigger, LayerTrigger::Root);

    let promoted = &result.layers[1];
    assert_eq!(promoted.trigger, LayerTrigger::Transform);
    assert!(promoted.reason.contains("transform"));
    assert_eq!(promoted.name, "div");

    assert_eq!(result.meta.layer_reasons.len(), 1);
    assert!(result.meta.layer_reasons[0].trigger.contains("transform"));
}

#[test]
fn test_text_inside_transformed_box_is_promoted_too() {
    // Text boxes carry their parent's whole style.
    let result = run(r#"<div class="box">x</div>"#, ".box{transform:scale(2)}");
    let names: Vec<&str> = result.layers.iter().map(|layer| layer.name.as_str()).collect();
    assert_eq!(names, vec!["Root Layer", "div", "text"]);
}

#[test]
fn test_id_beats_later_class() {
    let result = run(
        r#"<p id="x" class="y">t</p>"#,
        "#x { color: red } .y { color: green }",
    );
    let p = find_tag(result.render.as_ref().unwrap(), "p").unwrap();
    assert_eq!(p.style.color(), Some("red"));
}

#[test]
fn test_stages_without_stylesheet() {
    let result = run("<p>x</p>", "");
    assert_eq!(
        stages(&result),
        vec![
            PipelineStage::Tokenize,
            PipelineStage::BuildDom,
            PipelineStage::ComputeStyle,
            PipelineStage::BuildRenderTree,
            PipelineStage::Layout,
            PipelineStage::Paint,
            PipelineStage::Composite,
        ]
    );
}

#[test]
fn test_stages_with_stylesheet() {
    let result = run("<p>x</p>", "p { color: red }");
    assert_eq!(stages(&result)[2], PipelineStage::ParseCss);
    assert_eq!(result.meta.steps.len(), 8);
}

#[test]
fn test_stylesheet_without_rules_skips_parse_step() {
    let result = run("<p>x</p>", "/* nothing here */");
    assert!(!stages(&result).contains(&PipelineStage::ParseCss));
    assert_eq!(result.stats.css_rule_count, 0);
}

#[test]
fn test_stats() {
    let result = run("<div>a</div>", "");
    assert_eq!(
        result.stats,
        PipelineStats {
            token_count: 3,
            dom_node_count: 3,
            css_rule_count: 0,
            render_node_count: 3,
            paint_command_count: 1,
            layer_count: 1,
        }
    );
}

#[test]
fn test_node_count_is_one_per_token_plus_document() {
    let result = run("<!DOCTYPE html><ul><li>a</li><li>b<br></li></ul><!-- c -->", "");
    let end_tags = result
        .tokens
        .iter()
        .filter(|token| matches!(token.kind, TokenKind::EndTag { .. }))
        .count();
    assert_eq!(result.stats.token_count, 11);
    assert_eq!(end_tags, 3);
    // Everything but the doctype and end tags becomes a node.
    assert_eq!(result.stats.dom_node_count, 1 + 11 - 1 - end_tags);
}

#[test]
fn test_html_and_body_are_unwrapped() {
    let result = run(
        "<html><head><title>t</title></head><body><p>x</p></body></html>",
        "",
    );
    let render = result.render.as_ref().unwrap();
    assert_eq!(render.tag_name.as_deref(), Some("body"));
    assert!(
        result
            .meta
            .filter_reasons
            .iter()
            .any(|reason| reason.reason == FilterReasonKind::NonVisualTag
                && reason.node_name == "head")
    );
}

#[test]
fn test_embedded_styles_apply_after_stylesheet() {
    let html = "<style>p { color: green }</style><p>x</p>";

    let plain = run(html, "p { color: red }");
    let p = find_tag(plain.render.as_ref().unwrap(), "p").unwrap();
    assert_eq!(p.style.color(), Some("red"));

    let embedded = run_pipeline(
        &PipelineInput::new(html)
            .with_stylesheet("p { color: red }")
            .with_embedded_styles(true),
    );
    assert_eq!(embedded.stats.css_rule_count, 2);
    let p = find_tag(embedded.render.as_ref().unwrap(), "p").unwrap();
    assert_eq!(p.style.color(), Some("green"));
}

#[test]
fn test_container_width_option() {
    let result = run_pipeline(&PipelineInput::new("<div>x</div>").with_container_width(320.0));
    assert_eq!(result.layout.as_ref().unwrap().rect.width, 320.0);
}

#[test]
fn test_unusable_container_width_falls_back() {
    for width in [0.0, -5.0, f32::NAN, f32::INFINITY] {
        let result = run_pipeline(&PipelineInput::new("<div>x</div>").with_container_width(width));
        assert_eq!(result.layout.as_ref().unwrap().rect.width, 800.0);
    }
}

#[test]
fn test_builder_matches_function() {
    let built = Pipeline::new()
        .markup(r#"<div class="a">hi</div>"#)
        .stylesheet(".a { color: blue }")
        .container_width(500.0)
        .run();
    let direct = run_pipeline(
        &PipelineInput::new(r#"<div class="a">hi</div>"#)
            .with_stylesheet(".a { color: blue }")
            .with_container_width(500.0),
    );
    assert_eq!(built, direct);
}

#[test]
fn test_layer_box_resolves_anchor() {
    let result = run(r#"<div class="f"></div>"#, ".f { opacity: 0.5; padding: 4px }");
    let layer = &result.layers[1];
    let anchored = result.layer_box(layer).unwrap();
    assert_eq!(anchored.tag_name.as_deref(), Some("div"));
    assert_eq!(anchored.rect, layer.bounds);
}

#[test]
fn test_json_export() {
    let json = Pipeline::new()
        .markup(r#"<p class="h">x</p><span>y</span>"#)
        .stylesheet(".h { display: none }")
        .to_json()
        .unwrap();
    assert!(json.contains(r#""stage": "build-dom""#));
    assert!(json.contains(r#""reason": "display-none""#));
    assert!(json.contains(r#""type": "text""#));
    assert!(json.contains(r#""paint_command_count": 1"#));
}

#[test]
fn test_parse_issues_are_surfaced() {
    let result = run("<div></span></div>", "");
    assert_eq!(result.parse_issues.len(), 1);
    assert!(result.parse_issues[0].is_error);
}

#[test]
fn test_missing_file_is_a_load_error() {
    let err = PipelineInput::from_files("/no/such/page.html", None).unwrap_err();
    assert!(matches!(err, LoadError::Markup { .. }));
}

#[test]
fn test_from_files_reads_both_sources() {
    let dir = std::env::temp_dir().join(format!("lumen-pipeline-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let html = dir.join("page.html");
    let css = dir.join("page.css");
    std::fs::write(&html, "<p>x</p>").unwrap();
    std::fs::write(&css, "p { color: red }").unwrap();

    let input = PipelineInput::from_files(&html, Some(css.as_path())).unwrap();
    assert_eq!(input.markup, "<p>x</p>");
    assert_eq!(input.stylesheet, "p { color: red }");

    let missing = PipelineInput::from_files(&html, Some(dir.join("none.css").as_path()));
    assert!(matches!(missing, Err(LoadError::Stylesheet { .. })));

    std::fs::remove_dir_all(&dir).unwrap();
}

mod properties {
    use quickcheck_macros::quickcheck;

    use super::{PipelineInput, run, run_pipeline};

    const FRAGMENTS: [&str; 12] = [
        "<div class=\"a\">",
        "</div>",
        "<p id=\"b\">",
        "</p>",
        "text ",
        "<br>",
        "<!-- c -->",
        "<style>",
        "</style>",
        "<span style=x>",
        "<",
        "   ",
    ];

    const CSS: &str = ".a { padding: 3px; border: 1px; background-color: red }
        #b { display: none } p { margin: 10% } span { opacity: .5 }";

    fn markup_from(picks: &[u8]) -> String {
        picks
            .iter()
            .map(|&pick| FRAGMENTS[usize::from(pick) % FRAGMENTS.len()])
            .collect()
    }

    #[quickcheck]
    fn arbitrary_sources_never_panic(markup: String, stylesheet: String) -> bool {
        let result = run(&markup, &stylesheet);
        result.stats.token_count == result.tokens.len()
    }

    #[quickcheck]
    fn structured_markup_never_panics(picks: Vec<u8>) -> bool {
        let input = PipelineInput::new(markup_from(&picks))
            .with_stylesheet(CSS)
            .with_embedded_styles(true);
        let result = run_pipeline(&input);
        result.stats.layer_count == result.layers.len()
            && result.stats.paint_command_count == result.paint.len()
    }

    #[quickcheck]
    fn running_twice_gives_identical_output(picks: Vec<u8>) -> bool {
        let markup = markup_from(&picks);
        let first = run(&markup, CSS).to_json().ok();
        let second = run(&markup, CSS).to_json().ok();
        first.is_some() && first == second
    }
}
