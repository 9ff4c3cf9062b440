//! Page shell: basket counter, gallery and scroll lock.

use super::{Component, ensure_element};
use crate::dom::{Document, DomError, DomEventType, Listener, NodeId};
use crate::events::Event;

/// Class on the wrapper while a modal is open.
pub const LOCKED_CLASS: &str = "page__wrapper_locked";

/// Page state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageModel {
    pub counter: usize,
    pub catalog: Vec<NodeId>,
    pub locked: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Page {
    root: NodeId,
    wrapper: NodeId,
    counter: NodeId,
    gallery: NodeId,
    basket: NodeId,
}

impl Page {
    /// Mount the page found under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotFound`] if a page part is missing.
    pub fn mount(doc: &mut Document, root: NodeId) -> Result<Self, DomError> {
        let basket = ensure_element(doc, root, ".header__basket")?;
        doc.set_listener(basket, DomEventType::Click, Listener::Emit(Event::BasketOpened));
        Ok(Self {
            root,
            wrapper: ensure_element(doc, root, ".page__wrapper")?,
            counter: ensure_element(doc, root, ".header__basket-counter")?,
            gallery: ensure_element(doc, root, ".gallery")?,
            basket,
        })
    }

    #[must_use]
    pub const fn gallery(&self) -> NodeId {
        self.gallery
    }

    #[must_use]
    pub const fn basket_button(&self) -> NodeId {
        self.basket
    }

    #[must_use]
    pub const fn counter(&self) -> NodeId {
        self.counter
    }

    pub fn set_counter(&self, doc: &mut Document, count: usize) {
        doc.set_text(self.counter, &count.to_string());
    }

    /// Replace the gallery cards, freeing the old ones.
    pub fn set_catalog(&self, doc: &mut Document, cards: &[NodeId]) {
        for old in doc.replace_children(self.gallery, cards) {
            doc.remove(old);
        }
    }

    pub fn set_locked(&self, doc: &mut Document, locked: bool) {
        doc.toggle_class(self.wrapper, LOCKED_CLASS, Some(locked));
    }

    #[must_use]
    pub fn is_locked(&self, doc: &Document) -> bool {
        doc.has_class(self.wrapper, LOCKED_CLASS)
    }
}

impl Component for Page {
    type Model = PageModel;

    fn root(&self) -> NodeId {
        self.root
    }

    fn render(&self, doc: &mut Document, model: &PageModel) -> NodeId {
        self.set_counter(doc, model.counter);
        self.set_catalog(doc, &model.catalog);
        self.set_locked(doc, model.locked);
        self.root
    }
}
