//! HTML emission for document trees, honouring render hints.
//!
//! Tables put their first row in `<thead>` with `<th>` cells. Paragraphs in
//! tight list items render without their `<p>` unless a pass hinted them.

use crate::tree::{ListItem, Node, Parent, RenderHint};
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Renders a tree to an HTML string.
///
/// A node's render hint overrides its default element and contributes its
/// properties as attributes after the node's own (`href`, `src`, ...).
pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    render_node(node, &mut out);
    out
}

fn render_node(node: &Node, out: &mut String) {
    match node {
        Node::Root(root) => render_children(&root.children, out),
        Node::Paragraph(p) => element(out, "p", p.hint.as_ref(), &[], &p.children),
        Node::Heading(h) => {
            let tag = format!("h{}", h.depth.clamp(1, 6));
            element(out, &tag, h.hint.as_ref(), &[], &h.children);
        }
        Node::Blockquote(q) => element(out, "blockquote", q.hint.as_ref(), &[], &q.children),
        Node::List(list) => {
            let tag = if list.ordered { "ol" } else { "ul" };
            let start = list
                .start
                .filter(|start| list.ordered && *start != 1)
                .map(|start| start.to_string());
            let attrs: Vec<(&str, &str)> = start.iter().map(|s| ("start", s.as_str())).collect();
            let tag = open_tag(out, tag, list.hint.as_ref(), &attrs);
            for child in &list.children {
                match child {
                    Node::ListItem(item) => render_list_item(item, !list.spread, out),
                    other => render_node(other, out),
                }
            }
            close_tag(out, &tag);
        }
        Node::ListItem(item) => render_list_item(item, false, out),
        Node::ContainerDirective(d) => element(out, "div", d.hint.as_ref(), &[], &d.children),
        Node::Table(t) => render_table(t, out),
        Node::TableRow(r) => render_row(r, "td", out),
        Node::TableCell(c) => element(out, "td", c.hint.as_ref(), &[], &c.children),
        Node::Emphasis(e) => element(out, "em", e.hint.as_ref(), &[], &e.children),
        Node::Strong(s) => element(out, "strong", s.hint.as_ref(), &[], &s.children),
        Node::Delete(d) => element(out, "del", d.hint.as_ref(), &[], &d.children),
        Node::Link(link) => {
            let mut attrs = vec![("href", link.url.as_str())];
            if let Some(title) = &link.title {
                attrs.push(("title", title.as_str()));
            }
            element(out, "a", link.hint.as_ref(), &attrs, &link.children);
        }
        Node::Text(text) => out.push_str(&encode_text(&text.value)),
        Node::InlineCode(code) => {
            open_tag(out, "code", code.hint.as_ref(), &[]);
            out.push_str(&encode_text(&code.value));
            out.push_str("</code>");
        }
        Node::Code(code) => {
            out.push_str("<pre>");
            let class = code.lang.as_ref().map(|lang| format!("language-{lang}"));
            let attrs: Vec<(&str, &str)> = class.iter().map(|c| ("class", c.as_str())).collect();
            open_tag(out, "code", code.hint.as_ref(), &attrs);
            out.push_str(&encode_text(&code.value));
            out.push_str("</code></pre>");
        }
        Node::Image(image) => {
            let mut attrs = vec![("src", image.url.as_str()), ("alt", image.alt.as_str())];
            if let Some(title) = &image.title {
                attrs.push(("title", title.as_str()));
            }
            let tag = open_tag_start(out, "img", image.hint.as_ref(), &attrs);
            if tag == "img" {
                out.push_str(" />");
            } else {
                out.push_str(&format!("></{tag}>"));
            }
        }
        Node::Html(html) => out.push_str(&html.value),
        Node::Break(_) => out.push_str("<br />"),
        Node::ThematicBreak(_) => out.push_str("<hr />"),
        Node::Frontmatter(_) => {}
    }
}

fn render_children(children: &[Node], out: &mut String) {
    for child in children {
        render_node(child, out);
    }
}

fn render_list_item(item: &ListItem, tight_list: bool, out: &mut String) {
    let tag = open_tag(out, "li", item.hint.as_ref(), &[]);
    if let Some(checked) = item.checked {
        out.push_str(if checked {
            "<input type=\"checkbox\" disabled=\"\" checked=\"\" /> "
        } else {
            "<input type=\"checkbox\" disabled=\"\" /> "
        });
    }
    let tight = tight_list && !item.spread;
    for child in &item.children {
        match child {
            Node::Paragraph(p) if tight && p.hint.is_none() => render_children(&p.children, out),
            other => render_node(other, out),
        }
    }
    close_tag(out, &tag);
}

fn render_table(table: &Parent, out: &mut String) {
    let tag = open_tag(out, "table", table.hint.as_ref(), &[]);
    let mut rows = table.children.iter();
    if let Some(head) = rows.next() {
        out.push_str("<thead>");
        match head {
            Node::TableRow(row) => render_row(row, "th", out),
            other => render_node(other, out),
        }
        out.push_str("</thead>");
    }
    let body: Vec<&Node> = rows.collect();
    if !body.is_empty() {
        out.push_str("<tbody>");
        for row in body {
            render_node(row, out);
        }
        out.push_str("</tbody>");
    }
    close_tag(out, &tag);
}

fn render_row(row: &Parent, cell: &str, out: &mut String) {
    let tag = open_tag(out, "tr", row.hint.as_ref(), &[]);
    for child in &row.children {
        match child {
            Node::TableCell(c) => element(out, cell, c.hint.as_ref(), &[], &c.children),
            other => render_node(other, out),
        }
    }
    close_tag(out, &tag);
}

fn close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn element(
    out: &mut String,
    default: &str,
    hint: Option<&RenderHint>,
    attrs: &[(&str, &str)],
    children: &[Node],
) {
    let tag = open_tag(out, default, hint, attrs);
    render_children(children, out);
    close_tag(out, &tag);
}

fn open_tag(out: &mut String, default: &str, hint: Option<&RenderHint>, attrs: &[(&str, &str)]) -> String {
    let tag = open_tag_start(out, default, hint, attrs);
    out.push('>');
    tag
}

/// Writes `<tag attr="..."` without the closing `>`, returning the tag used.
fn open_tag_start(
    out: &mut String,
    default: &str,
    hint: Option<&RenderHint>,
    attrs: &[(&str, &str)],
) -> String {
    let tag = hint
        .and_then(|hint| hint.element.clone())
        .unwrap_or_else(|| default.to_string());

    out.push('<');
    out.push_str(&tag);
    for (key, value) in attrs {
        push_attr(out, key, value);
    }
    if let Some(hint) = hint {
        for (key, value) in &hint.properties {
            // Node fields win over same-named hint properties.
            if attrs.iter().any(|(k, _)| k == key) {
                continue;
            }
            push_attr(out, key, value);
        }
    }
    tag
}

fn push_attr(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    out.push_str(&encode_double_quoted_attribute(value));
    out.push('"');
}
