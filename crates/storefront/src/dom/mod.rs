//! Headless DOM.
//!
//! A small element tree with the parts of the browser DOM the storefront's
//! components touch: class lists, attributes, text content, form control
//! values, templates, selector lookups and event listeners.
//!
//! ## Storage
//!
//! Elements live in a single arena and are addressed by [`NodeId`]. Detaching
//! an element keeps it alive (components re-attach their roots into the modal
//! over and over); only [`Document::remove`] frees a subtree. Slots of removed
//! elements are never reused, so a stale `NodeId` can only ever miss, never
//! alias another element.
//!
//! Mutators on a missing node are silent no-ops, mirroring how the storefront
//! treats optional card parts.

mod selector;
pub mod serializer;
pub mod template;

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

pub use selector::Selector;

use crate::events::{Event, FormName};

/// Element lookup and template errors.
///
/// These are programming or template errors, not user errors: a component
/// that cannot find its parts fails at construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    /// A selector matched nothing under the given root.
    #[error("selector {selector} returned nothing")]
    NotFound { selector: String },

    /// No template registered under this name.
    #[error("template {0} is not registered")]
    MissingTemplate(String),

    /// The selector string could not be parsed.
    #[error("invalid selector {selector}: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index, for diagnostics.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Kinds of user interaction the document dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEventType {
    Click,
    Input,
    Submit,
}

/// What an element does when an interaction reaches it.
///
/// Listeners are data rather than closures so the document can be owned by
/// the same context the bus handlers mutate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listener {
    /// Publish this event on the bus.
    Emit(Event),
    /// Publish a field change built from the target's `name` and value.
    FieldInput(FormName),
    /// Publish a payment change named by this element's `name` attribute.
    SelectPayment,
    /// Close the modal.
    CloseModal,
    /// Close the modal when the click landed on this element itself.
    CloseModalOnBackdrop,
    /// Do not bubble further up.
    StopPropagation,
}

/// A single element.
#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    value: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Lower-case tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Class list, in insertion order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Whether the class list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Attribute value, if set.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All attributes, sorted by name.
    #[must_use]
    pub const fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Own text, not including children.
    #[must_use]
    pub fn own_text(&self) -> &str {
        &self.text
    }

    /// Current form control value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Child element handles, in order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent handle, if attached.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// The element arena plus templates and listeners.
///
/// Freed slots are reused, so a [`NodeId`] of a removed element may later
/// name a different one.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Option<Element>>,
    free: Vec<usize>,
    templates: HashMap<String, NodeId>,
    listeners: HashMap<NodeId, Vec<(DomEventType, Listener)>>,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only an empty `<body>`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Element::new("body"))],
            free: Vec::new(),
            templates: HashMap::new(),
            listeners: HashMap::new(),
            body: NodeId(0),
        }
    }

    /// The `<body>` element.
    #[must_use]
    pub const fn body(&self) -> NodeId {
        self.body
    }

    /// Number of live elements (templates included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Number of arena slots, live or free.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document holds nothing but its body.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Look up an element.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Store `el` in a free slot, or a new one.
    fn alloc(&mut self, el: Element) -> NodeId {
        while let Some(index) = self.free.pop() {
            if let Some(slot) = self.nodes.get_mut(index)
                && slot.is_none()
            {
                *slot = Some(el);
                return NodeId(index);
            }
        }
        self.nodes.push(Some(el));
        NodeId(self.nodes.len() - 1)
    }

    // =========================================================================
    // Tree structure
    // =========================================================================

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Element::new(tag))
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.get(parent).is_none() || self.is_ancestor(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(el) = self.get_mut(child) {
            el.parent = Some(parent);
        } else {
            return;
        }
        if let Some(el) = self.get_mut(parent) {
            el.children.push(child);
        }
    }

    /// Detach `node` from its parent. The subtree stays alive.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.get(node).and_then(Element::parent) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|&c| c != node);
        }
        if let Some(el) = self.get_mut(node) {
            el.parent = None;
        }
    }

    /// Replace the children of `parent` and clear its own text.
    ///
    /// Returns the children that were detached.
    pub fn replace_children(&mut self, parent: NodeId, children: &[NodeId]) -> Vec<NodeId> {
        let old = self.children(parent).to_vec();
        for &child in &old {
            self.detach(child);
        }
        if let Some(el) = self.get_mut(parent) {
            el.text.clear();
        }
        for &child in children {
            self.append_child(parent, child);
        }
        old.into_iter().filter(|c| !children.contains(c)).collect()
    }

    /// Detach and free a subtree, dropping its listeners. The freed slots
    /// are reused by later elements.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.body {
            return;
        }
        self.detach(node);
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(el) = self.nodes.get_mut(id.0).and_then(Option::take) {
                stack.extend(el.children);
                self.listeners.remove(&id);
                self.free.push(id.0);
            }
        }
    }

    /// Children of `node`, empty if it does not exist.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map_or(&[], Element::children)
    }

    /// Parent of `node`.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(Element::parent)
    }

    /// `node` followed by each of its ancestors, innermost first.
    #[must_use]
    pub fn path(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.get(node).map(|_| node);
        while let Some(id) = current {
            path.push(id);
            current = self.parent(id);
        }
        path
    }

    /// Whether `ancestor` is `node` or contains it.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.path(node).contains(&ancestor)
    }

    /// Whether `node` is attached under the body.
    #[must_use]
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.is_ancestor(self.body, node)
    }

    /// Closest element, starting at `node` itself, matching `selector`.
    #[must_use]
    pub fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        self.path(node)
            .into_iter()
            .find(|&id| self.get(id).is_some_and(|el| selector.matches(el)))
    }

    /// Deep-copy a subtree. The copy is detached and has no listeners.
    pub fn clone_subtree(&mut self, node: NodeId) -> Option<NodeId> {
        let source = self.get(node)?.clone();
        let copy = self.alloc(Element {
            children: Vec::new(),
            parent: None,
            ..source.clone()
        });
        for child in source.children {
            if let Some(child_copy) = self.clone_subtree(child) {
                self.append_child(copy, child_copy);
            }
        }
        Some(copy)
    }

    // =========================================================================
    // Templates
    // =========================================================================

    /// Register a detached subtree as a named template.
    pub fn register_template(&mut self, name: &str, root: NodeId) {
        self.detach(root);
        self.templates.insert(name.to_string(), root);
    }

    /// Whether a template is registered under `name`.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Clone a registered template's content.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::MissingTemplate`] if no template has that name.
    pub fn clone_template(&mut self, name: &str) -> Result<NodeId, DomError> {
        let root = *self
            .templates
            .get(name)
            .ok_or_else(|| DomError::MissingTemplate(name.to_string()))?;
        self.clone_subtree(root)
            .ok_or_else(|| DomError::MissingTemplate(name.to_string()))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Descendants of `root` (excluding `root`) in document order.
    #[must_use]
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        out
    }

    /// All descendants of `root` matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidSelector`] if `selector` does not parse.
    pub fn query_selector_all(
        &self,
        root: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        Ok(self.select(root, &selector))
    }

    /// First descendant of `root` matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidSelector`] if `selector` does not parse.
    pub fn query_selector(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>, DomError> {
        Ok(self.query_selector_all(root, selector)?.into_iter().next())
    }

    /// Descendants of `root` matching a parsed selector.
    #[must_use]
    pub fn select(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(|el| selector.matches(el)))
            .collect()
    }

    // =========================================================================
    // Classes, attributes, text
    // =========================================================================

    /// Add a class if absent.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.get_mut(node)
            && !el.has_class(class)
        {
            el.classes.push(class.to_string());
        }
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.get_mut(node) {
            el.classes.retain(|c| c != class);
        }
    }

    /// Toggle a class, or force it on/off with `state`.
    pub fn toggle_class(&mut self, node: NodeId, class: &str, state: Option<bool>) {
        let on = state.unwrap_or_else(|| !self.has_class(node, class));
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// Replace the whole class list.
    pub fn set_classes(&mut self, node: NodeId, classes: &[&str]) {
        if let Some(el) = self.get_mut(node) {
            el.classes = classes.iter().map(|c| (*c).to_string()).collect();
        }
    }

    /// Whether `node` has `class`.
    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node).is_some_and(|el| el.has_class(class))
    }

    /// Set an attribute.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.get_mut(node) {
            el.attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(el) = self.get_mut(node) {
            el.attributes.remove(name);
        }
    }

    /// Attribute value.
    #[must_use]
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node).and_then(|el| el.attribute(name))
    }

    /// Set text content, freeing any children.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        for child in self.children(node).to_vec() {
            self.remove(child);
        }
        if let Some(el) = self.get_mut(node) {
            el.text = text.to_string();
        }
    }

    /// Text content of the subtree, concatenated in document order.
    #[must_use]
    pub fn text(&self, node: NodeId) -> String {
        let mut out = String::new();
        if let Some(el) = self.get(node) {
            out.push_str(&el.text);
            for &child in &el.children {
                out.push_str(&self.text(child));
            }
        }
        out
    }

    /// Set a form control's value.
    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(el) = self.get_mut(node) {
            el.value = value.to_string();
        }
    }

    /// A form control's value, empty if unset.
    #[must_use]
    pub fn value(&self, node: NodeId) -> &str {
        self.get(node).map_or("", Element::value)
    }

    /// Toggle the `disabled` attribute.
    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if disabled {
            self.set_attribute(node, "disabled", "true");
        } else {
            self.remove_attribute(node, "disabled");
        }
    }

    /// Whether the `disabled` attribute is present.
    #[must_use]
    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.attribute(node, "disabled").is_some()
    }

    /// Hide or show via inline `display: none`.
    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        if hidden {
            self.set_attribute(node, "style", "display: none");
        } else {
            self.remove_attribute(node, "style");
        }
    }

    /// Whether the element is hidden inline.
    #[must_use]
    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.attribute(node, "style") == Some("display: none")
    }

    /// Point an image at `src`, setting `alt` when given.
    pub fn set_image(&mut self, node: NodeId, src: &str, alt: Option<&str>) {
        self.set_attribute(node, "src", src);
        if let Some(alt) = alt {
            self.set_attribute(node, "alt", alt);
        }
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Attach a listener.
    pub fn add_listener(&mut self, node: NodeId, event: DomEventType, listener: Listener) {
        if self.get(node).is_some() {
            self.listeners.entry(node).or_default().push((event, listener));
        }
    }

    /// Replace every listener of one event type on `node`.
    pub fn set_listener(&mut self, node: NodeId, event: DomEventType, listener: Listener) {
        if let Some(list) = self.listeners.get_mut(&node) {
            list.retain(|(ty, _)| *ty != event);
        }
        self.add_listener(node, event, listener);
    }

    /// Listeners of one event type on `node`, in registration order.
    #[must_use]
    pub fn listeners(&self, node: NodeId, event: DomEventType) -> Vec<Listener> {
        self.listeners
            .get(&node)
            .map(|list| {
                list.iter()
                    .filter(|(ty, _)| *ty == event)
                    .map(|(_, l)| l.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}
