//! Arena-backed element tree standing in for a browser document.
//!
//! [`Document`] is a cheap, clonable handle. Elements are never freed, so an
//! [`ElementId`] handed out by a document stays valid for its lifetime.
//! Layout is not computed: hosts report rendered widths through
//! [`Document::set_layout_width`], the way a browser would answer
//! `offsetWidth`.

use crate::error::DomError;
use crate::events::ListenerRegistry;
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Content {
    Children,
    Text(String),
    Markup(String),
}

#[derive(Debug, Clone)]
struct ElementData {
    tag: String,
    id: Option<String>,
    classes: SmallVec<[String; 2]>,
    style: IndexMap<String, String>,
    content: Content,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
    layout_width: Option<f32>,
}

impl ElementData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: SmallVec::new(),
            style: IndexMap::new(),
            content: Content::Children,
            children: Vec::new(),
            parent: None,
            layout_width: None,
        }
    }
}

pub(crate) struct DocumentTree {
    elements: Vec<ElementData>,
    body: ElementId,
    revision: u64,
    pub(crate) listeners: ListenerRegistry,
}

impl DocumentTree {
    fn element(&self, id: ElementId) -> Result<&ElementData, DomError> {
        self.elements.get(id.0).ok_or(DomError::UnknownElement(id))
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut ElementData, DomError> {
        self.revision += 1;
        self.elements
            .get_mut(id.0)
            .ok_or(DomError::UnknownElement(id))
    }

    pub(crate) fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(id.0).and_then(|element| element.parent)
    }

    fn is_ancestor(&self, candidate: ElementId, of: ElementId) -> bool {
        let mut current = Some(of);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.parent_of(id);
        }
        false
    }

    fn detach(&mut self, child: ElementId) {
        if let Some(parent) = self.parent_of(child) {
            if let Some(data) = self.elements.get_mut(parent.0) {
                data.children.retain(|id| *id != child);
            }
        }
        if let Some(data) = self.elements.get_mut(child.0) {
            data.parent = None;
        }
    }

    fn write_html(&self, id: ElementId, out: &mut String) {
        let Some(element) = self.elements.get(id.0) else {
            return;
        };
        out.push('<');
        out.push_str(&element.tag);
        if let Some(id_attr) = &element.id {
            out.push_str(" id=\"");
            out.push_str(&escape_attr(id_attr));
            out.push('"');
        }
        if !element.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape_attr(&element.classes.join(" ")));
            out.push('"');
        }
        if !element.style.is_empty() {
            let style = element
                .style
                .iter()
                .map(|(property, value)| format!("{}: {};", property, value))
                .collect::<Vec<_>>()
                .join(" ");
            out.push_str(" style=\"");
            out.push_str(&escape_attr(&style));
            out.push('"');
        }
        out.push('>');
        match &element.content {
            Content::Text(text) => out.push_str(&escape_text(text)),
            Content::Markup(markup) => out.push_str(markup),
            Content::Children => {
                for child in &element.children {
                    self.write_html(*child, out);
                }
            }
        }
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }

    fn collect_text(&self, id: ElementId, out: &mut String) {
        let Some(element) = self.elements.get(id.0) else {
            return;
        };
        match &element.content {
            Content::Text(text) => out.push_str(text),
            Content::Markup(_) => {}
            Content::Children => {
                for child in &element.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }
}

#[derive(Clone)]
pub struct Document {
    pub(crate) inner: Rc<RefCell<DocumentTree>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.inner.borrow();
        f.debug_struct("Document")
            .field("elements", &tree.elements.len())
            .field("listeners", &tree.listeners.len())
            .field("revision", &tree.revision)
            .finish()
    }
}

impl Document {
    /// Creates an empty document containing only `<body>`.
    pub fn new() -> Self {
        let body = ElementData::new("body");
        Self {
            inner: Rc::new(RefCell::new(DocumentTree {
                elements: vec![body],
                body: ElementId(0),
                revision: 0,
                listeners: ListenerRegistry::default(),
            })),
        }
    }

    pub fn body(&self) -> ElementId {
        self.inner.borrow().body
    }

    /// Monotonic counter bumped by every mutation of the element tree.
    pub fn revision(&self) -> u64 {
        self.inner.borrow().revision
    }

    pub fn contains(&self, id: ElementId) -> bool {
        id.0 < self.inner.borrow().elements.len()
    }

    pub fn create_element(&self, tag: &str) -> ElementId {
        let mut tree = self.inner.borrow_mut();
        tree.elements.push(ElementData::new(tag));
        tree.revision += 1;
        ElementId(tree.elements.len() - 1)
    }

    /// Appends `child` to `parent`, moving it if it already has a parent.
    pub fn append_child(&self, parent: ElementId, child: ElementId) -> Result<(), DomError> {
        let mut tree = self.inner.borrow_mut();
        tree.element(parent)?;
        tree.element(child)?;
        if tree.is_ancestor(child, parent) {
            return Err(DomError::CycleDetected { parent, child });
        }
        tree.detach(child);
        tree.element_mut(child)?.parent = Some(parent);
        let parent_data = tree.element_mut(parent)?;
        parent_data.content = Content::Children;
        parent_data.children.push(child);
        Ok(())
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.inner.borrow().parent_of(id)
    }

    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        self.inner
            .borrow()
            .element(id)
            .map(|element| element.children.clone())
            .unwrap_or_default()
    }

    pub fn tag_name(&self, id: ElementId) -> Option<String> {
        self.inner
            .borrow()
            .element(id)
            .ok()
            .map(|element| element.tag.clone())
    }

    pub fn set_id(&self, element: ElementId, id: &str) -> Result<(), DomError> {
        self.inner.borrow_mut().element_mut(element)?.id = Some(id.to_string());
        Ok(())
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        let tree = self.inner.borrow();
        tree.elements
            .iter()
            .position(|element| element.id.as_deref() == Some(id))
            .map(ElementId)
    }

    pub fn add_class(&self, id: ElementId, class: &str) -> Result<(), DomError> {
        let mut tree = self.inner.borrow_mut();
        let element = tree.element_mut(id)?;
        if !element.classes.iter().any(|existing| existing == class) {
            element.classes.push(class.to_string());
        }
        Ok(())
    }

    pub fn remove_class(&self, id: ElementId, class: &str) -> Result<(), DomError> {
        let mut tree = self.inner.borrow_mut();
        tree.element_mut(id)?
            .classes
            .retain(|existing| existing != class);
        Ok(())
    }

    pub fn toggle_class(&self, id: ElementId, class: &str, on: bool) -> Result<(), DomError> {
        if on {
            self.add_class(id, class)
        } else {
            self.remove_class(id, class)
        }
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.inner
            .borrow()
            .element(id)
            .map(|element| element.classes.iter().any(|existing| existing == class))
            .unwrap_or(false)
    }

    pub fn class_list(&self, id: ElementId) -> Vec<String> {
        self.inner
            .borrow()
            .element(id)
            .map(|element| element.classes.to_vec())
            .unwrap_or_default()
    }

    /// Descendants of `root` (depth-first, `root` included) carrying `class`.
    pub fn query_by_class(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        let tree = self.inner.borrow();
        let mut found = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Ok(element) = tree.element(id) else {
                continue;
            };
            if element.classes.iter().any(|existing| existing == class) {
                found.push(id);
            }
            stack.extend(element.children.iter().rev().copied());
        }
        found
    }

    /// Replaces the element's content with a text node.
    pub fn set_text_content(&self, id: ElementId, text: &str) -> Result<(), DomError> {
        let mut tree = self.inner.borrow_mut();
        let children = std::mem::take(&mut tree.element_mut(id)?.children);
        for child in children {
            if let Some(data) = tree.elements.get_mut(child.0) {
                data.parent = None;
            }
        }
        tree.element_mut(id)?.content = Content::Text(text.to_string());
        Ok(())
    }

    pub fn text_content(&self, id: ElementId) -> String {
        let mut out = String::new();
        self.inner.borrow().collect_text(id, &mut out);
        out
    }

    /// Replaces the element's content with raw markup. The markup is opaque
    /// to the tree: it is serialized verbatim and not parsed into elements.
    pub fn set_inner_html(&self, id: ElementId, markup: &str) -> Result<(), DomError> {
        let mut tree = self.inner.borrow_mut();
        let children = std::mem::take(&mut tree.element_mut(id)?.children);
        for child in children {
            if let Some(data) = tree.elements.get_mut(child.0) {
                data.parent = None;
            }
        }
        tree.element_mut(id)?.content = Content::Markup(markup.to_string());
        Ok(())
    }

    pub fn inner_html(&self, id: ElementId) -> String {
        let tree = self.inner.borrow();
        let Ok(element) = tree.element(id) else {
            return String::new();
        };
        match &element.content {
            Content::Text(text) => escape_text(text),
            Content::Markup(markup) => markup.clone(),
            Content::Children => {
                let mut out = String::new();
                for child in &element.children {
                    tree.write_html(*child, &mut out);
                }
                out
            }
        }
    }

    pub fn set_style(&self, id: ElementId, property: &str, value: &str) -> Result<(), DomError> {
        self.inner
            .borrow_mut()
            .element_mut(id)?
            .style
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    pub fn style(&self, id: ElementId, property: &str) -> Option<String> {
        self.inner
            .borrow()
            .element(id)
            .ok()
            .and_then(|element| element.style.get(property).cloned())
    }

    /// Records the width layout assigned to an element.
    pub fn set_layout_width(&self, id: ElementId, width: f32) -> Result<(), DomError> {
        self.inner.borrow_mut().element_mut(id)?.layout_width = Some(width);
        Ok(())
    }

    /// Rendered width of an element: the reported layout width, else an
    /// inline `width: Npx`, else zero (like a detached browser element).
    pub fn offset_width(&self, id: ElementId) -> f32 {
        let tree = self.inner.borrow();
        let Ok(element) = tree.element(id) else {
            return 0.0;
        };
        element
            .layout_width
            .or_else(|| element.style.get("width").and_then(|value| parse_px(value)))
            .unwrap_or(0.0)
    }

    pub fn outer_html(&self, id: ElementId) -> String {
        let mut out = String::new();
        self.inner.borrow().write_html(id, &mut out);
        out
    }
}

pub fn parse_px(value: &str) -> Option<f32> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    number.trim().parse::<f32>().ok()
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_builds_tree_and_serializes_in_order() {
        let document = Document::new();
        let outer = document.create_element("div");
        let first = document.create_element("span");
        let second = document.create_element("span");
        document.add_class(outer, "outer").expect("class");
        document.append_child(outer, first).expect("append");
        document.append_child(outer, second).expect("append");
        document.set_text_content(first, "a < b").expect("text");
        document.set_inner_html(second, "<i></i>").expect("markup");
        document.set_style(outer, "left", "4px").expect("style");

        assert_eq!(document.children(outer), vec![first, second]);
        assert_eq!(
            document.outer_html(outer),
            r#"<div class="outer" style="left: 4px;"><span>a &lt; b</span><span><i></i></span></div>"#
        );
        assert_eq!(document.text_content(outer), "a < b");
    }

    #[test]
    fn append_rejects_cycles_and_unknown_elements() {
        let document = Document::new();
        let parent = document.create_element("div");
        let child = document.create_element("div");
        document.append_child(parent, child).expect("append");

        assert_eq!(
            document.append_child(child, parent),
            Err(DomError::CycleDetected {
                parent: child,
                child: parent
            })
        );
        assert_eq!(
            document.append_child(parent, ElementId(99)),
            Err(DomError::UnknownElement(ElementId(99)))
        );
    }

    #[test]
    fn append_moves_existing_child() {
        let document = Document::new();
        let a = document.create_element("div");
        let b = document.create_element("div");
        let child = document.create_element("p");
        document.append_child(a, child).expect("append");
        document.append_child(b, child).expect("move");

        assert!(document.children(a).is_empty());
        assert_eq!(document.children(b), vec![child]);
        assert_eq!(document.parent(child), Some(b));
    }

    #[test]
    fn class_list_operations() {
        let document = Document::new();
        let el = document.create_element("div");
        document.add_class(el, "x").expect("add");
        document.add_class(el, "x").expect("add twice");
        document.toggle_class(el, "y", true).expect("toggle on");
        assert_eq!(document.class_list(el), vec!["x", "y"]);

        document.toggle_class(el, "x", false).expect("toggle off");
        assert!(!document.has_class(el, "x"));
        assert!(document.has_class(el, "y"));
    }

    #[test]
    fn offset_width_prefers_layout_then_inline_style() {
        let document = Document::new();
        let el = document.create_element("div");
        assert_eq!(document.offset_width(el), 0.0);

        document.set_style(el, "width", "120px").expect("style");
        assert_eq!(document.offset_width(el), 120.0);

        document.set_layout_width(el, 300.0).expect("layout");
        assert_eq!(document.offset_width(el), 300.0);
        assert_eq!(document.offset_width(ElementId(42)), 0.0);
    }

    #[test]
    fn lookup_by_id_and_class() {
        let document = Document::new();
        let host = document.create_element("div");
        document.set_id(host, "captcha").expect("id");
        document
            .append_child(document.body(), host)
            .expect("append");
        let inner = document.create_element("div");
        document.add_class(inner, "target").expect("class");
        document.append_child(host, inner).expect("append");

        assert_eq!(document.get_element_by_id("captcha"), Some(host));
        assert_eq!(document.get_element_by_id("missing"), None);
        assert_eq!(
            document.query_by_class(document.body(), "target"),
            vec![inner]
        );
    }

    #[test]
    fn mutations_bump_revision() {
        let document = Document::new();
        let el = document.create_element("div");
        let before = document.revision();
        document.set_style(el, "left", "1px").expect("style");
        assert!(document.revision() > before);

        let settled = document.revision();
        let _ = document.outer_html(el);
        let _ = document.offset_width(el);
        assert_eq!(document.revision(), settled);
    }

    #[test]
    fn parse_px_accepts_plain_and_suffixed() {
        assert_eq!(parse_px("260px"), Some(260.0));
        assert_eq!(parse_px(" 12.5 "), Some(12.5));
        assert_eq!(parse_px("auto"), None);
    }
}
