//! DOM adapter: the parser capability set the extraction core programs against.
//!
//! The core (`text`, `date`, `title`, `content` modules) never touches `scraper` or
//! `ego-tree` directly. It only sees [`Document`] and [`Node`], so a different backing
//! parser could be swapped in by reimplementing this module.

pub mod geometry;

use ego_tree::NodeRef;
use regex::Regex;
use scraper::node::Element;
use scraper::{Html, Node as RawNode, Selector};
use std::fmt;

/// Opaque handle to a node inside a [`Document`]. Only comparable to other handles
/// drawn from the same document.
pub type Node = ego_tree::NodeId;

/// A parsed HTML tree plus the operations the extraction core needs from it.
///
/// Backed by `scraper::Html` (itself `html5ever` + `ego-tree`). `scraper` does not
/// support attribute mutation on an existing tree (its `Element` type has no public
/// setter), so [`Document::set_attr`] is a best-effort no-op — nothing in this crate's
/// algorithms actually relies on DOM-attribute mutation; see the gravity-map REDESIGN
/// FLAG in SPEC_FULL.md.
pub struct Document {
    html: Html,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.html.root_element().value().name())
            .finish()
    }
}

impl Document {
    /// Parse a full HTML document.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Parse an HTML fragment (no implied `<html>`/`<body>` wrapper document).
    pub fn parse_fragment(html: &str) -> Self {
        Self {
            html: Html::parse_fragment(html),
        }
    }

    /// Root node of the tree.
    pub fn root(&self) -> Node {
        self.html.tree.root().id()
    }

    fn node_ref(&self, node: Node) -> Option<NodeRef<'_, RawNode>> {
        self.html.tree.get(node)
    }

    fn element(&self, node: Node) -> Option<&Element> {
        match self.node_ref(node)?.value() {
            RawNode::Element(el) => Some(el),
            _ => None,
        }
    }

    /// CSS-selector query, returning matches in document order. An invalid selector
    /// yields an empty result rather than an error — selector misses are never fatal
    /// per the crate's total-function error policy.
    pub fn select(&self, selector: &str) -> Vec<Node> {
        match Selector::parse(selector) {
            Ok(sel) => self.html.select(&sel).map(|er| er.id()).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// All elements whose tag name is any of `tags`, in document order.
    pub fn select_tags(&self, tags: &[&str]) -> Vec<Node> {
        self.html
            .tree
            .nodes()
            .filter_map(|nr| match nr.value() {
                RawNode::Element(el) => tags.contains(&el.name()).then(|| nr.id()),
                _ => None,
            })
            .collect()
    }

    /// All elements whose tag (optional) and named attribute value match `pattern`.
    pub fn elements_with_attr_matching(
        &self,
        tag: Option<&str>,
        attr: &str,
        pattern: &Regex,
    ) -> Vec<Node> {
        self.html
            .tree
            .nodes()
            .filter_map(|nr| match nr.value() {
                RawNode::Element(el) => {
                    if tag.is_some_and(|t| el.name() != t) {
                        return None;
                    }
                    let value = el.attr(attr)?;
                    pattern.is_match(value).then(|| nr.id())
                }
                _ => None,
            })
            .collect()
    }

    /// Descendants of `node` whose tag name is any of `tags`, in document order.
    pub fn select_tags_within(&self, node: Node, tags: &[&str]) -> Vec<Node> {
        let Some(nr) = self.node_ref(node) else {
            return Vec::new();
        };
        nr.descendants()
            .filter_map(|d| match d.value() {
                RawNode::Element(el) => tags.contains(&el.name()).then(|| d.id()),
                _ => None,
            })
            .collect()
    }

    pub fn tag_name(&self, node: Node) -> Option<String> {
        self.element(node).map(|el| el.name().to_string())
    }

    pub fn attr(&self, node: Node, name: &str) -> Option<String> {
        self.element(node).and_then(|el| el.attr(name)).map(str::to_string)
    }

    /// Best-effort attribute set. See the struct-level note: `scraper::Element`
    /// does not expose mutable attribute storage, so this is a no-op today. Kept
    /// in the interface so a future backing parser swap doesn't change call sites.
    pub fn set_attr(&mut self, _node: Node, _name: &str, _value: &str) {}

    pub fn remove_attr(&mut self, _node: Node, _name: &str) {}

    /// Whitespace-normalized concatenation of all descendant text nodes.
    pub fn text(&self, node: Node) -> String {
        let Some(nr) = self.node_ref(node) else {
            return String::new();
        };
        let raw: String = nr
            .descendants()
            .filter_map(|d| match d.value() {
                RawNode::Text(t) => Some(t.as_ref()),
                _ => None,
            })
            .collect();
        normalize_whitespace(&raw)
    }

    pub fn parent(&self, node: Node) -> Option<Node> {
        self.node_ref(node)?.parent().map(|p| p.id())
    }

    pub fn children(&self, node: Node) -> Vec<Node> {
        self.node_ref(node)
            .map(|nr| nr.children().map(|c| c.id()).collect())
            .unwrap_or_default()
    }

    /// Previous siblings, nearest first (document order reversed).
    pub fn previous_siblings(&self, node: Node) -> Vec<Node> {
        self.node_ref(node)
            .map(|nr| nr.prev_siblings().map(|s| s.id()).collect())
            .unwrap_or_default()
    }

    /// Detach a node (and its subtree) from the document. The node is no longer
    /// reachable from `root()`, `select()`, or any traversal.
    pub fn remove(&mut self, node: Node) {
        if let Some(mut nm) = self.html.tree.get_mut(node) {
            nm.detach();
        }
    }

    /// Move an existing node to be the first child of `new_parent`.
    pub fn prepend_existing(&mut self, new_parent: Node, node: Node) {
        if let Some(mut nm) = self.html.tree.get_mut(new_parent) {
            nm.prepend_id(node);
        }
    }

    /// Construct a new `<tag>text</tag>` element attached nowhere, returning its id.
    /// Used sparingly — see §6 of SPEC_FULL.md; none of C1-C8's documented
    /// algorithms require fabricating nodes, only relocating existing ones.
    pub fn create_element(&mut self, tag: &str, text: &str) -> Node {
        let fragment = Html::parse_fragment(&format!("<{tag}>{}</{tag}>", escape_text(text)));
        let source_root = fragment
            .tree
            .root()
            .children()
            .find(|n| matches!(n.value(), RawNode::Element(_)));
        match source_root {
            Some(src) => self.clone_subtree_from(src),
            None => self.html.tree.orphan(RawNode::Text(text.into())).id(),
        }
    }

    fn clone_subtree_from(&mut self, src: NodeRef<'_, RawNode>) -> Node {
        let new_id = self.html.tree.orphan(src.value().clone()).id();
        for child in src.children() {
            let child_id = self.clone_subtree_from(child);
            if let Some(mut nm) = self.html.tree.get_mut(new_id) {
                nm.append_id(child_id);
            }
        }
        new_id
    }

    /// Canonical slash-separated path, e.g. `/html[0]/body[0]/div[2]/p[0]`. Each
    /// segment is `tag[index]`, where `index` counts preceding same-tag siblings.
    /// Stands in for the original implementation's XPath path (see REDESIGN FLAGS).
    pub fn path(&self, node: Node) -> String {
        let mut segments = Vec::new();
        let mut current = self.node_ref(node);
        while let Some(nr) = current {
            if let RawNode::Element(el) = nr.value() {
                let index = nr
                    .prev_siblings()
                    .filter(|s| matches!(s.value(), RawNode::Element(e) if e.name() == el.name()))
                    .count();
                segments.push(format!("{}[{}]", el.name(), index));
            }
            current = nr.parent();
        }
        segments.reverse();
        format!("/{}", segments.join("/"))
    }
}

/// Collapse runs of whitespace (including newlines) to a single space and trim ends.
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    out.trim_end().to_string()
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_text() {
        let doc = Document::parse("<html><body><p class=\"a\">Hello  world</p></body></html>");
        let nodes = doc.select("p.a");
        assert_eq!(nodes.len(), 1);
        assert_eq!(doc.text(nodes[0]), "Hello world");
    }

    #[test]
    fn test_select_tags() {
        let doc = Document::parse("<html><body><p>a</p><div>b</div><p>c</p></body></html>");
        let nodes = doc.select_tags(&["p"]);
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn test_path_indices() {
        let doc = Document::parse("<html><body><div>x</div><div>y</div></body></html>");
        let divs = doc.select_tags(&["div"]);
        assert_eq!(doc.path(divs[0]), "/html[0]/body[0]/div[0]");
        assert_eq!(doc.path(divs[1]), "/html[0]/body[0]/div[1]");
    }

    #[test]
    fn test_remove_detaches_node() {
        let mut doc = Document::parse("<html><body><p>keep</p><p>drop</p></body></html>");
        let ps = doc.select_tags(&["p"]);
        doc.remove(ps[1]);
        assert_eq!(doc.select_tags(&["p"]).len(), 1);
    }

    #[test]
    fn test_previous_siblings_nearest_first() {
        let doc = Document::parse("<html><body><p>1</p><p>2</p><p>3</p></body></html>");
        let ps = doc.select_tags(&["p"]);
        let siblings = doc.previous_siblings(ps[2]);
        assert_eq!(siblings.len(), 2);
        assert_eq!(doc.text(siblings[0]), "2");
        assert_eq!(doc.text(siblings[1]), "1");
    }
}
