//! [`Document`] -> HTML.

use super::tree::{Document, NodeId, NodeKind};
use crate::utils::html::{escape, escape_attr, is_raw_text_element, is_void_element};

impl Document {
    /// Serialize the whole document, doctype included.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if let Some(doctype) = &self.doctype {
            out.push_str(doctype);
            out.push('\n');
        }
        for child in self.children(self.root()) {
            self.write_node(*child, false, &mut out);
        }
        out
    }

    /// Serialize one node and its subtree (like `outerHTML`).
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, false, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, raw_text: bool, out: &mut String) {
        let Some(node) = self.nodes.get(id.0) else {
            return;
        };

        match &node.kind {
            NodeKind::Root => {
                for child in &node.children {
                    self.write_node(*child, false, out);
                }
            }
            NodeKind::Text(text) if raw_text => out.push_str(text),
            NodeKind::Text(text) => out.push_str(&escape(text)),
            NodeKind::Comment(text) => out.push_str(text),
            NodeKind::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in el.attrs() {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(value));
                    out.push('"');
                }
                out.push('>');

                if is_void_element(&el.tag) {
                    // Void elements never close; anything nested under one by a
                    // lenient parse is written as a following sibling.
                    for child in &node.children {
                        self.write_node(*child, false, out);
                    }
                    return;
                }

                let raw = is_raw_text_element(&el.tag);
                for child in &node.children {
                    self.write_node(*child, raw, out);
                }

                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
    }
}
