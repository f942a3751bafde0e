//! Build a small page and print it, compact and pretty

use markup_dom::{DocumentType, DomSerializer, Node, NodeArena, SerializerConfig, Text};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let mut arena = NodeArena::new();
    let document = arena.create(Node::document());
    let doctype = arena.create(DocumentType::new("html"));
    let html = arena.create(Node::element("html"));

    let mut body = Node::element("body");
    body.add_class("page")?;
    body.set_style("margin", "0")?;
    let body = arena.create(body);

    let mut heading = Node::element("h1");
    heading.set_attribute("id", "title")?;
    let heading = arena.create(heading);
    let title = arena.create(Text::new("Hello, \"markup\""));

    arena.append_child(document, doctype)?;
    arena.append_child(document, html)?;
    arena.append_child(html, body)?;
    arena.append_child(body, heading)?;
    arena.append_child(heading, title)?;
    arena.set_root(document)?;

    println!("{}", arena.render(document)?);

    let pretty = DomSerializer::with_config(SerializerConfig::default().pretty().escape_text());
    println!("{}", pretty.serialize_root(&arena)?);

    println!("{}", arena.snapshot(document)?.to_json_pretty()?);

    Ok(())
}
