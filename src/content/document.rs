use anyhow::{anyhow, Result};
use markdown::mdast;
use markdown::{Options, ParseOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Heading,
    Paragraph,
    Text,
    Definition,
    Other,
}

/// One element of the parsed markdown tree.
///
/// Only the kinds the metadata scan cares about get their own tag, everything
/// else (lists, code blocks, emphasis, ...) is `Other` but keeps its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
    pub value: Option<String>,
    span: Option<(usize, usize)>,
}

impl Node {
    pub fn text(value: &str) -> Node {
        Node {
            kind: NodeKind::Text,
            children: vec![],
            value: Some(value.to_string()),
            span: None,
        }
    }

    pub fn heading(children: Vec<Node>) -> Node {
        Self::container(NodeKind::Heading, children)
    }

    pub fn paragraph(children: Vec<Node>) -> Node {
        Self::container(NodeKind::Paragraph, children)
    }

    pub fn other(children: Vec<Node>) -> Node {
        Self::container(NodeKind::Other, children)
    }

    fn container(kind: NodeKind, children: Vec<Node>) -> Node {
        Node {
            kind,
            children,
            value: None,
            span: None,
        }
    }

    /// Values of the direct children that are text leaves, in order.
    pub fn text_children(&self) -> impl Iterator<Item = &str> {
        self.children
            .iter()
            .filter(|child| child.kind == NodeKind::Text)
            .filter_map(|child| child.value.as_deref())
    }

    fn from_mdast(node: &mdast::Node) -> Node {
        let kind = match node {
            mdast::Node::Heading(_) => NodeKind::Heading,
            mdast::Node::Paragraph(_) => NodeKind::Paragraph,
            mdast::Node::Text(_) => NodeKind::Text,
            mdast::Node::Definition(_) => NodeKind::Definition,
            _ => NodeKind::Other,
        };

        let value = match node {
            mdast::Node::Text(text) => Some(text.value.clone()),
            _ => None,
        };

        let children = node
            .children()
            .map(|children| children.iter().map(Node::from_mdast).collect())
            .unwrap_or_default();

        Node {
            kind,
            children,
            value,
            span: node.position().map(|pos| (pos.start.offset, pos.end.offset)),
        }
    }
}

/// A parsed markdown file: the source text and its top-level blocks.
///
/// Blocks can only be removed from the front, so the remaining blocks always
/// cover the source from the first one's offset to the end. Link reference
/// definitions removed that way are kept aside so the body can still use them.
pub struct Document {
    source: String,
    nodes: Vec<Node>,
    definitions: Vec<String>,
}

impl Document {
    pub fn parse(source: &str) -> Result<Document> {
        let root = markdown::to_mdast(source, &ParseOptions::gfm())
            .map_err(|e| anyhow!("Error parsing markdown: {}", e.reason))?;

        let nodes = root
            .children()
            .map(|children| children.iter().map(Node::from_mdast).collect())
            .unwrap_or_default();

        Ok(Document {
            source: source.to_string(),
            nodes,
            definitions: vec![],
        })
    }

    #[cfg(test)]
    pub fn from_nodes(nodes: Vec<Node>) -> Document {
        Document {
            source: String::new(),
            nodes,
            definitions: vec![],
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Drops every top-level block before the first heading and returns how
    /// many were removed. Without a heading the document ends up empty.
    pub fn strip_preamble(&mut self) -> usize {
        let count = self
            .nodes
            .iter()
            .take_while(|node| node.kind != NodeKind::Heading)
            .count();
        for node in self.nodes.drain(..count) {
            if node.kind != NodeKind::Definition {
                continue;
            }
            if let Some(text) = node.span.and_then(|(start, end)| self.source.get(start..end)) {
                self.definitions.push(text.to_string());
            }
        }
        count
    }

    pub fn to_html(&self) -> Result<String> {
        let start = match self.nodes.first() {
            None => return Ok(String::new()),
            Some(node) => node.span.map(|(start, _)| start).unwrap_or(0),
        };

        let body = self
            .source
            .get(start..)
            .ok_or_else(|| anyhow!("Block offset {} is outside of the document", start))?;

        let mut markdown_src = String::new();
        for definition in &self.definitions {
            markdown_src.push_str(definition);
            markdown_src.push('\n');
        }
        if !markdown_src.is_empty() {
            markdown_src.push('\n');
        }
        markdown_src.push_str(body);

        markdown::to_html_with_options(&markdown_src, &Options::gfm())
            .map_err(|e| anyhow!("Error rendering markdown: {}", e.reason))
    }
}
