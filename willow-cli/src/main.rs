//! Willow CLI
//!
//! Parse an HTML document and inspect it: dump the tree, run a selector
//! query against it, or emit the portable JSON form.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use willow_dom::{serialize, to_json, Dom, NodeId, NodeKind};
use willow_html::parse;
use willow_selector::query_selector_all;

/// Parse an HTML document and inspect the resulting tree.
#[derive(Parser, Debug)]
#[command(name = "willow", version, about)]
struct Cli {
    /// HTML file to parse.
    input: Option<PathBuf>,

    /// Parse this HTML string instead of reading a file.
    #[arg(long, conflicts_with = "input")]
    html: Option<String>,

    /// Print the elements matching this selector, serialized, one per
    /// line.
    #[arg(long)]
    selector: Option<String>,

    /// Emit the document as portable JSON instead of a tree dump.
    #[arg(long, conflicts_with = "selector")]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let html = match (&cli.html, &cli.input) {
        (Some(html), _) => html.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        (None, None) => bail!("provide an HTML file or --html '<...>'"),
    };

    let dom = parse(&html).context("parsing HTML")?;

    if let Some(selector) = &cli.selector {
        let found = query_selector_all(&dom, NodeId::ROOT, selector)
            .with_context(|| format!("running selector `{selector}`"))?;
        for id in &found {
            println!("{}", serialize(&dom, *id));
        }
        println!("{} match(es)", found.len());
        return Ok(());
    }

    if cli.json {
        println!("{}", to_json(&dom, NodeId::ROOT).context("serializing to JSON")?);
        return Ok(());
    }

    print_tree(&dom, NodeId::ROOT, 0);
    Ok(())
}

/// Dump one node per line, indented by depth.
fn print_tree(dom: &Dom, id: NodeId, depth: usize) {
    let indent = "  ".repeat(depth);
    let Some(kind) = dom.kind(id) else {
        return;
    };
    match kind {
        NodeKind::Document => println!("{indent}#document"),
        NodeKind::Element(data) => {
            let mut line = format!("{indent}<{}", data.tag_name.to_ascii_lowercase());
            for attribute in &data.attributes {
                line.push_str(&format!(" {}=\"{}\"", attribute.name, attribute.value));
            }
            line.push('>');
            println!("{line}");
        }
        NodeKind::Text(text) => println!("{indent}#text {text:?}"),
        NodeKind::Cdata(data) => println!("{indent}#cdata {data:?}"),
        NodeKind::ProcessingInstruction { target, data } => {
            println!("{indent}<?{target} {data} ?>");
        }
        NodeKind::Comment(text) => println!("{indent}<!-- {text} -->"),
        NodeKind::Doctype(name) => println!("{indent}<!DOCTYPE {name}>"),
    }
    for &child in dom.children(id) {
        print_tree(dom, child, depth + 1);
    }
}
