//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed; removing a child only unlinks it, so a detached
//! `NodeId` stays valid and can be re-inserted.

use crate::{DomError, DomResult, ElementData, Node, NodeData, NodeId};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document root
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// Document root
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Element data for a node, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Number of nodes in the tree, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    /// Append `child` as the last child of `parent`, detaching it first if needed
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound(parent))?;
        if !matches!(parent_node.data, NodeData::Element(_) | NodeData::Document) {
            return Err(DomError::HierarchyRequest);
        }
        let child_node = self.get(child).ok_or(DomError::NotFound(child))?;
        if matches!(child_node.data, NodeData::Document) || self.contains(child, parent) {
            return Err(DomError::HierarchyRequest);
        }

        let old_parent = child_node.parent;
        if old_parent.is_valid() {
            self.remove_child(old_parent, child)?;
        }

        let last = self.nodes[parent.0 as usize].last_child;
        {
            let node = &mut self.nodes[child.0 as usize];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.0 as usize].next_sibling = child;
        } else {
            self.nodes[parent.0 as usize].first_child = child;
        }
        self.nodes[parent.0 as usize].last_child = child;

        Ok(child)
    }

    /// Unlink `child` from `parent`. The node stays in the arena.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let node = self.get(child).ok_or(DomError::NotFound(child))?;
        if node.parent != parent {
            return Err(DomError::NotAChild);
        }
        let (prev, next) = (node.prev_sibling, node.next_sibling);

        if prev.is_valid() {
            self.nodes[prev.0 as usize].next_sibling = next;
        } else {
            self.nodes[parent.0 as usize].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.0 as usize].prev_sibling = prev;
        } else {
            self.nodes[parent.0 as usize].last_child = prev;
        }

        let node = &mut self.nodes[child.0 as usize];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;

        Ok(child)
    }

    /// Direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// All descendants in document (pre-)order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Descendants { tree: self, root: id, next }
    }

    /// Inclusive ancestry check
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = match self.get(current) {
                Some(n) => n.parent,
                None => return false,
            };
        }
        false
    }

    /// Whether the node is reachable from the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.get(id).is_some() && self.contains(self.root(), id)
    }

    /// Concatenated text of the node and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            out.push_str(text);
        }
        for desc in self.descendants(id) {
            if let Some(text) = self.get(desc).and_then(Node::as_text) {
                out.push_str(text);
            }
        }
        out
    }

    /// Replace all children with a single text node (none for empty text)
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        let node = self.get_mut(id).ok_or(DomError::NotFound(id))?;
        if let NodeData::Text(data) = &mut node.data {
            data.content = text.to_string();
            return Ok(());
        }

        let children: Vec<NodeId> = self.children(id).map(|(child, _)| child).collect();
        for child in children {
            self.remove_child(id, child)?;
        }
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(id, text_node)?;
        }
        Ok(())
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order iterator over descendants
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next;
        let node = self.tree.get(current)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            let mut cursor = current;
            loop {
                let Some(n) = self.tree.get(cursor) else { break NodeId::NONE };
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                cursor = n.parent;
                if cursor == self.root || !cursor.is_valid() {
                    break NodeId::NONE;
                }
            }
        };

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build() -> (DomTree, NodeId, [NodeId; 4]) {
        // root > div > (p > span), em
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let p = tree.create_element("p");
        let span = tree.create_element("span");
        let em = tree.create_element("em");
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, p).unwrap();
        tree.append_child(p, span).unwrap();
        tree.append_child(div, em).unwrap();
        (tree, div, [div, p, span, em])
    }

    #[test]
    fn test_descendants_document_order() {
        let (tree, div, [_, p, span, em]) = build();
        let order: Vec<_> = tree.descendants(div).collect();
        assert_eq!(order, vec![p, span, em]);
    }

    #[test]
    fn test_descendants_stop_at_root() {
        let (mut tree, _, [div, p, span, _]) = build();
        let after = tree.create_element("footer");
        tree.append_child(tree.root(), after).unwrap();

        let order: Vec<_> = tree.descendants(p).collect();
        assert_eq!(order, vec![span]);
        assert!(tree.descendants(div).all(|id| id != after));
    }

    #[test]
    fn test_remove_child_relinks_siblings() {
        let (mut tree, div, [_, p, _, em]) = build();
        tree.remove_child(div, p).unwrap();

        let children: Vec<_> = tree.children(div).map(|(id, _)| id).collect();
        assert_eq!(children, vec![em]);
        assert!(!tree.is_connected(p));
        assert_eq!(tree.remove_child(div, p), Err(DomError::NotAChild));
    }

    #[test]
    fn test_append_rejects_cycles() {
        let (mut tree, div, [_, _, span, _]) = build();
        assert_eq!(tree.append_child(span, div), Err(DomError::HierarchyRequest));
    }

    #[test]
    fn test_text_content() {
        let (mut tree, div, [_, p, span, _]) = build();
        tree.set_text_content(span, "hello").unwrap();
        let extra = tree.create_text(" world");
        tree.append_child(p, extra).unwrap();
        assert_eq!(tree.text_content(div), "hello world");

        tree.set_text_content(p, "").unwrap();
        assert_eq!(tree.children(p).count(), 0);
    }
}
