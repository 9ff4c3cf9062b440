//! The single modal window.
//!
//! Opening and closing only flip `modal_active`; the storefront publishes
//! `modal-open` / `modal-close` when the state actually changed.

use super::{Component, ensure_element};
use crate::dom::{Document, DomError, DomEventType, Listener, NodeId};

/// Class present while the modal is shown.
pub const ACTIVE_CLASS: &str = "modal_active";

#[derive(Debug, Clone, Copy)]
pub struct Modal {
    root: NodeId,
    close: NodeId,
    content: NodeId,
}

impl Modal {
    /// Mount the modal found under `page`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotFound`] if the modal, its close button or its
    /// content region is missing.
    pub fn mount(doc: &mut Document, page: NodeId) -> Result<Self, DomError> {
        let root = ensure_element(doc, page, ".modal")?;
        let close = ensure_element(doc, root, ".modal__close")?;
        let content = ensure_element(doc, root, ".modal__content")?;

        doc.set_listener(close, DomEventType::Click, Listener::CloseModal);
        doc.set_listener(root, DomEventType::Click, Listener::CloseModalOnBackdrop);
        doc.set_listener(content, DomEventType::Click, Listener::StopPropagation);

        Ok(Self {
            root,
            close,
            content,
        })
    }

    #[must_use]
    pub const fn close_button(&self) -> NodeId {
        self.close
    }

    #[must_use]
    pub const fn content(&self) -> NodeId {
        self.content
    }

    #[must_use]
    pub fn is_open(&self, doc: &Document) -> bool {
        doc.has_class(self.root, ACTIVE_CLASS)
    }

    /// Show the modal. Returns `false` if it was already open.
    pub fn open(&self, doc: &mut Document) -> bool {
        if self.is_open(doc) {
            return false;
        }
        doc.add_class(self.root, ACTIVE_CLASS);
        true
    }

    /// Hide the modal. Returns `false` if it was already closed.
    pub fn close(&self, doc: &mut Document) -> bool {
        if !self.is_open(doc) {
            return false;
        }
        doc.remove_class(self.root, ACTIVE_CLASS);
        true
    }

    /// Put `node` in the content region, detaching whatever was there.
    ///
    /// Detached content stays alive so views can be shown again.
    pub fn set_content(&self, doc: &mut Document, node: NodeId) {
        doc.replace_children(self.content, &[node]);
    }

    /// The node currently shown, if any.
    #[must_use]
    pub fn current(&self, doc: &Document) -> Option<NodeId> {
        doc.children(self.content).first().copied()
    }

    pub fn clear_content(&self, doc: &mut Document) {
        doc.replace_children(self.content, &[]);
    }
}

impl Component for Modal {
    type Model = NodeId;

    fn root(&self) -> NodeId {
        self.root
    }

    fn render(&self, doc: &mut Document, content: &NodeId) -> NodeId {
        self.set_content(doc, *content);
        self.root
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dom::template;

    fn modal() -> (Document, Modal) {
        let mut doc = Document::new();
        template::install(&mut doc);
        let body = doc.body();
        let modal = Modal::mount(&mut doc, body).unwrap();
        (doc, modal)
    }

    #[test]
    fn test_open_close_transitions() {
        let (mut doc, modal) = modal();
        assert!(!modal.is_open(&doc));
        assert!(!modal.close(&mut doc));
        assert!(modal.open(&mut doc));
        assert!(!modal.open(&mut doc));
        assert!(modal.is_open(&doc));
        assert!(modal.close(&mut doc));
        assert!(!modal.is_open(&doc));
    }

    #[test]
    fn test_content_is_swapped_not_freed() {
        let (mut doc, modal) = modal();
        let first = doc.create_element("div");
        let second = doc.create_element("div");
        modal.set_content(&mut doc, first);
        modal.render(&mut doc, &second);
        assert_eq!(modal.current(&doc), Some(second));
        assert!(doc.get(first).is_some());
        assert!(!doc.is_connected(first));
    }

    #[test]
    fn test_listeners() {
        let (doc, modal) = modal();
        assert_eq!(
            doc.listeners(modal.root(), DomEventType::Click),
            vec![Listener::CloseModalOnBackdrop]
        );
        assert_eq!(
            doc.listeners(modal.content(), DomEventType::Click),
            vec![Listener::StopPropagation]
        );
        assert_eq!(
            doc.listeners(modal.close_button(), DomEventType::Click),
            vec![Listener::CloseModal]
        );
    }
}
