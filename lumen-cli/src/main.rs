//! Lumen CLI
//!
//! Runs the rendering pipeline on one document and prints every stage.
//!
//! - lumen page.html --css page.css     # Print each stage
//! - lumen --html '<p>hi</p>' --json    # Dump the whole result

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use lumen_browser::{PipelineInput, PipelineResult, load_markup, load_stylesheet, run_pipeline};
use lumen_common::warning::clear_warnings;
use lumen_css::{DEFAULT_CONTAINER_WIDTH, LayoutBox, RenderNode};
use lumen_html::print_tree;
use owo_colors::OwoColorize;

/// Lumen - step through a miniature browser rendering pipeline
#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print every stage for a file
    lumen ./index.html

    # Inline markup with an inline stylesheet
    lumen --html '<div class="a">hi</div>' --css-text '.a { color: blue }'

    # Dump the full result as JSON
    lumen --json --css page.css page.html
"#)]
struct Cli {
    /// Path to a markup file
    #[arg(value_name = "FILE", conflicts_with = "html")]
    path: Option<PathBuf>,

    /// Markup given directly instead of a file
    #[arg(long, value_name = "MARKUP")]
    html: Option<String>,

    /// Path to a stylesheet file
    #[arg(long, value_name = "FILE", conflicts_with = "css_text")]
    css: Option<PathBuf>,

    /// Stylesheet given directly instead of a file
    #[arg(long, value_name = "CSS")]
    css_text: Option<String>,

    /// Container width in pixels
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_CONTAINER_WIDTH)]
    width: f32,

    /// Also apply <style> elements found in the markup
    #[arg(long)]
    embedded_styles: bool,

    /// Print the whole result as JSON instead of the stage summary
    #[arg(long)]
    json: bool,

    /// Print the token stream
    #[arg(long)]
    tokens: bool,

    /// Print stage explanations and every paint command
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    clear_warnings();

    let input = load_input(&cli)?;
    let result = run_pipeline(&input);

    if cli.json {
        println!("{}", result.to_json().context("failed to serialize the result")?);
        return Ok(());
    }

    print_result(&result, &cli);
    Ok(())
}

/// Build the pipeline input from CLI arguments
fn load_input(cli: &Cli) -> anyhow::Result<PipelineInput> {
    let markup = if let Some(ref html) = cli.html {
        html.clone()
    } else if let Some(ref path) = cli.path {
        load_markup(path)?
    } else {
        bail!("a markup FILE or --html is required");
    };

    let stylesheet = if let Some(ref css) = cli.css_text {
        css.clone()
    } else if let Some(ref path) = cli.css {
        load_stylesheet(path)?
    } else {
        String::new()
    };

    Ok(PipelineInput::new(markup)
        .with_stylesheet(stylesheet)
        .with_container_width(cli.width)
        .with_embedded_styles(cli.embedded_styles))
}

fn heading(title: &str) {
    println!("\n{}", format!("=== {title} ===").bold().cyan());
}

fn print_result(result: &PipelineResult, cli: &Cli) {
    heading("Stages");
    for step in &result.meta.steps {
        println!("{:>18}  {}", step.stage.to_string().green(), step.action);
        if cli.verbose {
            println!("{:>18}  {}", "", step.reason.dimmed());
            println!("{:>18}  {}", "", step.explanation.dimmed());
        }
    }

    if cli.tokens {
        heading("Tokens");
        for (index, token) in result.tokens.iter().enumerate() {
            let detail = token
                .name()
                .or_else(|| token.content())
                .unwrap_or_default()
                .replace('\n', "\\n");
            println!("  {index:>4} {:<14} {detail}", token.kind.to_string());
        }
    }

    heading("Node Tree");
    print_tree(&result.dom, result.dom.root(), 0);

    if !result.parse_issues.is_empty() {
        heading("Parse Issues");
        for issue in &result.parse_issues {
            let label = if issue.is_error { "error" } else { "note" };
            println!("  - [{label}] token {}: {}", issue.token_index, issue.message);
        }
    }

    heading("Style Rules");
    for rule in &result.rules.rules {
        let declarations: Vec<String> = rule
            .declarations
            .iter()
            .map(|declaration| format!("{}: {}", declaration.property, declaration.value))
            .collect();
        println!(
            "  {} {:?} {{ {} }}",
            rule.selector.yellow(),
            rule.specificity,
            declarations.join("; ")
        );
    }

    heading("Render Tree");
    match &result.render {
        Some(root) => print_render_node(root, 1),
        None => println!("  (empty)"),
    }
    for reason in &result.meta.filter_reasons {
        println!(
            "  {} {} ({}): {}",
            "filtered".red(),
            reason.node_name,
            reason.reason,
            reason.explanation.dimmed()
        );
    }

    if let Some(layout) = &result.layout {
        heading(&format!("Layout (container: {}px)", layout.margin_box().width));
        print_layout_box(layout, 1);
    }

    heading("Paint");
    if cli.verbose {
        for command in &result.paint {
            println!("  #{:<3} {:<10} {}", command.id, command.kind.to_string(), command.description);
        }
    } else {
        println!("  {} commands", result.paint.len());
    }

    heading("Layers");
    for layer in &result.layers {
        println!("  {} <{}> {}", layer.id.magenta(), layer.name, layer.reason);
    }

    heading("Stats");
    let stats = &result.stats;
    println!("  tokens:         {}", stats.token_count);
    println!("  nodes:          {}", stats.dom_node_count);
    println!("  rules:          {}", stats.css_rule_count);
    println!("  render nodes:   {}", stats.render_node_count);
    println!("  paint commands: {}", stats.paint_command_count);
    println!("  layers:         {}", stats.layer_count);
}

fn print_render_node(node: &RenderNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match &node.text {
        Some(text) => println!("{indent}\"{}\"", preview(text)),
        None => println!("{indent}<{}> ({})", node.label(), node.node_id),
    }
    for child in &node.children {
        print_render_node(child, depth + 1);
    }
}

/// Recursively print a layout box with its geometry
fn print_layout_box(layout_box: &LayoutBox, depth: usize) {
    let indent = "  ".repeat(depth);
    let name = layout_box.text.as_deref().map_or_else(
        || format!("<{}>", layout_box.label()),
        |text| format!("Text(\"{}\")", preview(text)),
    );
    let rect = layout_box.rect;
    println!(
        "{indent}{name} x={:.1} y={:.1} w={:.1} h={:.1}",
        rect.x, rect.y, rect.width, rect.height
    );

    let margin = layout_box.margin;
    if margin.any_positive() {
        println!(
            "{indent}  margin: t={:.1} r={:.1} b={:.1} l={:.1}",
            margin.top, margin.right, margin.bottom, margin.left
        );
    }
    let padding = layout_box.padding;
    if padding.any_positive() {
        println!(
            "{indent}  padding: t={:.1} r={:.1} b={:.1} l={:.1}",
            padding.top, padding.right, padding.bottom, padding.left
        );
    }

    for child in &layout_box.children {
        print_layout_box(child, depth + 1);
    }
}

/// First 30 characters, newlines escaped.
fn preview(text: &str) -> String {
    let mut preview: String = text.trim().chars().take(30).collect();
    if text.trim().chars().count() > 30 {
        preview.push_str("...");
    }
    preview.replace('\n', "\\n")
}
