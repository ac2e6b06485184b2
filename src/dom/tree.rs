//! Document arena: nodes, attributes, classes and text.

use smallvec::SmallVec;

use super::Selector;
use crate::utils::css::{parse_style, render_style};

/// Index of a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(super) usize);

#[derive(Debug, Clone)]
pub(super) enum NodeKind {
    Root,
    Element(Element),
    Text(String),
    /// Comment kept verbatim, including `<!--` / `-->`.
    Comment(String),
}

#[derive(Debug, Clone)]
pub(super) struct Node {
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    pub(super) kind: NodeKind,
}

/// An element: lowercase tag name and ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    attrs: Vec<(String, String)>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Set an attribute, keeping its original position when it already exists.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self
            .attrs
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, v)) => *v = value.to_string(),
            None => self
                .attrs
                .push((name.to_ascii_lowercase(), value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Class tokens in attribute order.
    pub fn classes(&self) -> SmallVec<[&str; 8]> {
        self.attr("class")
            .map(|c| c.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }

    /// Add or remove a class token. Returns whether the class list changed.
    pub fn set_class(&mut self, class: &str, on: bool) -> bool {
        let mut tokens: Vec<String> = self.classes().iter().map(|s| s.to_string()).collect();
        let present = tokens.iter().any(|t| t == class);

        match (on, present) {
            (true, false) => tokens.push(class.to_string()),
            (false, true) => tokens.retain(|t| t != class),
            _ => return false,
        }

        if tokens.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", &tokens.join(" "));
        }
        true
    }

    /// Value of one inline style property.
    pub fn style(&self, prop: &str) -> Option<String> {
        let style = self.attr("style")?;
        parse_style(style)
            .into_iter()
            .rev()
            .find(|(p, _)| p.eq_ignore_ascii_case(prop))
            .map(|(_, v)| v)
    }

    /// Set one inline style property, preserving the others.
    pub fn set_style(&mut self, prop: &str, value: &str) {
        let prop = prop.to_ascii_lowercase();
        let mut decls = self.attr("style").map(parse_style).unwrap_or_default();

        match decls.iter_mut().find(|(p, _)| *p == prop) {
            Some((_, v)) => *v = value.to_string(),
            None => decls.push((prop, value.to_string())),
        }
        self.set_attr("style", &render_style(&decls));
    }
}

/// Arena-backed HTML document.
///
/// Node `0` is the document root; every other node has exactly one parent.
#[derive(Debug, Clone)]
pub struct Document {
    pub(super) nodes: Vec<Node>,
    pub(super) doctype: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Root,
            }],
            doctype: None,
        }
    }

    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub(super) fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append a new element under `parent`.
    pub fn append_element(&mut self, parent: NodeId, element: Element) -> NodeId {
        self.push(parent, NodeKind::Element(element))
    }

    /// Append a text node under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(parent, NodeKind::Text(text.to_string()))
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(id.0)?.kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0)?.parent
    }

    /// Nearest ancestor that is an element (skips the document root).
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|p| self.element(*p).is_some())
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// All descendants of `id` in document (pre-)order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Whether `node` is `ancestor` or lies inside it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    // ========================================================================
    // queries
    // ========================================================================

    /// First element matching `selector` in document order.
    pub fn query(&self, selector: &Selector) -> Option<NodeId> {
        self.query_within(self.root(), selector).into_iter().next()
    }

    /// All elements matching `selector` in document order.
    pub fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.query_within(self.root(), selector)
    }

    /// Matching elements strictly inside `scope`.
    pub fn query_within(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| selector.matches(self, *id))
            .collect()
    }

    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|n| self.element(*n).and_then(Element::id) == Some(id))
    }

    /// The `<body>` element, if the markup has one.
    pub fn body(&self) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|n| self.element(*n).is_some_and(|el| el.tag == "body"))
    }

    // ========================================================================
    // text
    // ========================================================================

    /// Concatenated text of all descendant text nodes.
    pub fn text(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|n| match &self.nodes[n.0].kind {
                NodeKind::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replace all children of `id` with a single text node.
    ///
    /// Detached children stay in the arena but are unreachable from the root.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if id.0 >= self.nodes.len() {
            return;
        }
        let old = std::mem::take(&mut self.nodes[id.0].children);
        for child in old {
            self.nodes[child.0].parent = None;
        }
        if !text.is_empty() {
            self.append_text(id, text);
        }
    }

    /// Short human-readable label: `tag#id.class1.class2`.
    pub fn describe(&self, id: NodeId) -> String {
        let Some(el) = self.element(id) else {
            return "#document".to_string();
        };
        let mut label = el.tag.clone();
        if let Some(dom_id) = el.id() {
            label.push('#');
            label.push_str(dom_id);
        }
        for class in el.classes() {
            label.push('.');
            label.push_str(class);
        }
        label
    }
}
