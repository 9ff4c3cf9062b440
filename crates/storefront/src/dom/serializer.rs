//! HTML serialization of document subtrees.
//!
//! Used for inspection: the CLI prints the rendered page, and tests assert on
//! markup when structure matters more than individual nodes.

use std::fmt::Write;

use super::{Document, NodeId};

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &["img", "input", "br", "hr", "meta", "link"];

/// Serialize `node` and its subtree.
///
/// Class comes first, then the remaining attributes sorted by name. A form
/// control's current value is written as its `value` attribute.
#[must_use]
pub fn to_html(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, node, &mut out);
    out
}

fn write_node(doc: &Document, node: NodeId, out: &mut String) {
    let Some(el) = doc.get(node) else {
        return;
    };

    out.push('<');
    out.push_str(el.tag());
    if !el.classes().is_empty() {
        let _ = write!(out, " class=\"{}\"", escape_attribute(&el.classes().join(" ")));
    }
    for (name, value) in el.attributes() {
        if name == "value" {
            continue;
        }
        let _ = write!(out, " {name}=\"{}\"", escape_attribute(value));
    }
    if !el.value().is_empty() {
        let _ = write!(out, " value=\"{}\"", escape_attribute(el.value()));
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&el.tag()) {
        return;
    }

    out.push_str(&escape_text(el.own_text()));
    for &child in el.children() {
        write_node(doc, child, out);
    }
    let _ = write!(out, "</{}>", el.tag());
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attribute(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_nested_markup() {
        let mut doc = Document::new();
        let card = doc.create_element("div");
        doc.add_class(card, "card");
        doc.add_class(card, "card_full");
        let title = doc.create_element("h2");
        doc.add_class(title, "card__title");
        doc.set_text(title, "Fish & <Chips>");
        let image = doc.create_element("img");
        doc.set_image(image, "/a.svg", Some("say \"hi\""));
        doc.append_child(card, title);
        doc.append_child(card, image);

        assert_eq!(
            to_html(&doc, card),
            "<div class=\"card card_full\"><h2 class=\"card__title\">Fish &amp; &lt;Chips&gt;</h2>\
             <img alt=\"say &quot;hi&quot;\" src=\"/a.svg\"></div>"
        );
    }

    #[test]
    fn test_input_value_written_as_attribute() {
        let mut doc = Document::new();
        let input = doc.create_element("input");
        doc.set_attribute(input, "name", "address");
        doc.set_value(input, "Main St");
        assert_eq!(
            to_html(&doc, input),
            "<input name=\"address\" value=\"Main St\">"
        );
    }

    #[test]
    fn test_disabled_attribute() {
        let mut doc = Document::new();
        let button = doc.create_element("button");
        doc.set_disabled(button, true);
        doc.set_text(button, "Next");
        assert_eq!(to_html(&doc, button), "<button disabled=\"true\">Next</button>");
    }
}
