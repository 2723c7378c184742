use super::{Document, Node};

pub(super) fn write_document(doc: &Document, indent: usize) -> String {
    let mut out = String::new();
    write_node(&mut out, &doc.root, indent, 0);
    out
}

fn write_node(out: &mut String, node: &Node, indent: usize, depth: usize) {
    pad(out, indent * depth);
    out.push('<');
    out.push_str(&node.tag);
    for attr in node.attributes() {
        out.push(' ');
        out.push_str(&attr.key);
        out.push_str("=\"");
        out.push_str(&attr.value);
        out.push('"');
    }

    if node.children.is_empty() && node.text.is_none() {
        out.push_str("/>\n");
        return;
    }
    out.push_str(">\n");

    if let Some(text) = &node.text {
        for line in text.lines() {
            pad(out, indent * (depth + 1));
            out.push_str(line);
            out.push('\n');
        }
    }
    for child in &node.children {
        write_node(out, child, indent, depth + 1);
    }

    pad(out, indent * depth);
    out.push_str("</");
    out.push_str(&node.tag);
    out.push_str(">\n");
}

#[inline]
fn pad(out: &mut String, width: usize) {
    out.extend(std::iter::repeat(' ').take(width));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_with_requested_indent() {
        let mut doc = Document::new("level");
        doc.root.push(Node::new("tilemap").with_text("1,2\n3,4"));
        doc.root.push(Node::new("spawn").with_attribute("x", 1).with_attribute("y", 0));

        let txt = write_document(&doc, 2);
        assert_eq!(
            txt,
            "<level>\n  <tilemap>\n    1,2\n    3,4\n  </tilemap>\n  <spawn x=\"1\" y=\"0\"/>\n</level>\n"
        );
    }

    #[test]
    fn zero_indent_keeps_line_breaks() {
        let doc = Document {
            root: Node::new("a").with_text("t"),
        };
        assert_eq!(write_document(&doc, 0), "<a>\nt\n</a>\n");
    }
}
