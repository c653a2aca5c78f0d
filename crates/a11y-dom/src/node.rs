//! DOM Node
//!
//! Nodes link to their relatives through `NodeId`s instead of pointers.

use crate::NodeId;

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if root or detached)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: String) -> Self {
        Self::with_data(NodeData::Text(TextData { content }))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(TextData),
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag: String,
    /// Attributes in insertion order
    pub attrs: Vec<Attribute>,
    /// Cached id attribute
    pub id: Option<String>,
    /// Cached class list
    pub classes: Vec<String>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            id: None,
            classes: Vec::new(),
        }
    }

    /// Check the tag name (case-insensitive)
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    /// Set an attribute, replacing any existing value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "id" => self.id = Some(value.to_string()),
            "class" => {
                self.classes = value.split_whitespace().map(String::from).collect();
            }
            _ => {}
        }

        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == name) {
            attr.value = value.to_string();
            return;
        }
        self.attrs.push(Attribute { name, value: value.to_string() });
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        let idx = self.attrs.iter().position(|a| a.name == name)?;
        match name.as_str() {
            "id" => self.id = None,
            "class" => self.classes.clear(),
            _ => {}
        }
        Some(self.attrs.remove(idx).value)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. Returns false if it was already present.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        self.sync_class_attr();
        true
    }

    /// Remove a class. Returns false if it was absent.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        if self.classes.len() == before {
            return false;
        }
        self.sync_class_attr();
        true
    }

    fn sync_class_attr(&mut self) {
        let joined = self.classes.join(" ");
        match self.attrs.iter_mut().find(|a| a.name == "class") {
            Some(attr) => attr.value = joined,
            None => self.attrs.push(Attribute { name: "class".into(), value: joined }),
        }
    }
}

/// Text node data
#[derive(Debug, Clone)]
pub struct TextData {
    pub content: String,
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_replaces() {
        let mut el = ElementData::new("BUTTON");
        assert_eq!(el.tag, "button");

        el.set_attr("aria-label", "Open");
        el.set_attr("aria-label", "Close");
        assert_eq!(el.get_attr("aria-label"), Some("Close"));
        assert_eq!(el.attrs.len(), 1);
    }

    #[test]
    fn test_id_and_class_cache() {
        let mut el = ElementData::new("div");
        el.set_attr("id", "main");
        el.set_attr("class", "a  b");
        assert_eq!(el.id.as_deref(), Some("main"));
        assert!(el.has_class("b"));

        assert!(el.add_class("focused"));
        assert!(!el.add_class("focused"));
        assert_eq!(el.get_attr("class"), Some("a b focused"));

        assert!(el.remove_class("a"));
        assert_eq!(el.get_attr("class"), Some("b focused"));

        assert_eq!(el.remove_attr("id"), Some("main".to_string()));
        assert!(el.id.is_none());
    }

    #[test]
    fn test_cache_follows_uppercase_names() {
        let mut el = ElementData::new("div");
        el.set_attr("ID", "main-content");
        el.set_attr("Class", "landmark wide");
        assert_eq!(el.id.as_deref(), Some("main-content"));
        assert!(el.has_class("wide"));
        assert_eq!(el.attrs[0].name, "id");

        el.set_attr("id", "footer");
        assert_eq!(el.attrs.len(), 2);
        assert_eq!(el.id.as_deref(), Some("footer"));

        assert_eq!(el.remove_attr("CLASS"), Some("landmark wide".to_string()));
        assert!(!el.has_class("landmark"));
        el.remove_attr("Id");
        assert!(el.id.is_none());
    }
}
