//! HTML -> [`Document`] conversion via `tl`.

use super::DomError;
use super::tree::{Document, Element, NodeId, NodeKind};
use crate::utils::html::{is_raw_text_element, unescape};

impl Document {
    /// Parse an HTML string into a document.
    ///
    /// Text and attribute values are entity-decoded; `script`/`style` bodies are
    /// kept verbatim. Whitespace text is preserved so serialization round-trips
    /// the page layout.
    pub fn parse(html: &str) -> Result<Self, DomError> {
        let dom = tl::parse(html, tl::ParserOptions::default())
            .map_err(|e| DomError::Parse(format!("{e:?}")))?;

        let mut doc = Document::new();
        if let Some(doctype) = leading_doctype(html) {
            doc.doctype = Some(doctype.to_string());
        }

        let parser = dom.parser();
        let root = doc.root();
        for handle in dom.children() {
            doc.import(*handle, parser, root, false);
        }

        Ok(doc)
    }

    /// Convert a tl node handle into arena nodes under `parent`.
    fn import(
        &mut self,
        handle: tl::NodeHandle,
        parser: &tl::Parser,
        parent: NodeId,
        raw_text: bool,
    ) {
        let Some(node) = handle.get(parser) else {
            return;
        };

        match node {
            tl::Node::Tag(tag) => {
                let tag_name = tag.name().as_utf8_str().to_lowercase();
                // Markup declarations (`<!DOCTYPE ...>`) are tracked on the document
                if tag_name.starts_with('!') {
                    return;
                }

                // Collect attributes
                let mut element = Element::new(&tag_name);
                for (key, value) in tag.attributes().iter() {
                    let key_str: &str = key.as_ref();
                    let value_str = value.map(|v| unescape(&v).into_owned()).unwrap_or_default();
                    element.set_attr(key_str, &value_str);
                }

                let id = self.push(parent, NodeKind::Element(element));
                let raw = is_raw_text_element(&tag_name);

                // Recursively process children
                for child in tag.children().top().iter() {
                    self.import(*child, parser, id, raw);
                }
            }
            tl::Node::Raw(bytes) => {
                let text = bytes.as_utf8_str();
                let text = if raw_text {
                    text.into_owned()
                } else {
                    unescape(&text).into_owned()
                };
                if !text.is_empty() {
                    self.push(parent, NodeKind::Text(text));
                }
            }
            tl::Node::Comment(bytes) => {
                let text = bytes.as_utf8_str();
                // The doctype is tracked separately on the document
                if !is_doctype(&text) {
                    self.push(parent, NodeKind::Comment(text.into_owned()));
                }
            }
        }
    }
}

fn is_doctype(text: &str) -> bool {
    text.trim_start()
        .get(..9)
        .is_some_and(|head| head.eq_ignore_ascii_case("<!doctype"))
}

/// The `<!DOCTYPE ...>` declaration at the start of the markup, if any.
fn leading_doctype(html: &str) -> Option<&str> {
    let trimmed = html.trim_start();
    if !is_doctype(trimmed) {
        return None;
    }
    let end = trimmed.find('>')?;
    Some(&trimmed[..=end])
}
