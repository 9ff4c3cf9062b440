//! Basket panel: rows, total and the checkout button.

use web_larek_core::Price;

use super::{Component, ensure_element};
use crate::dom::template::names;
use crate::dom::{Document, DomError, DomEventType, Listener, NodeId};
use crate::events::Event;

/// Rendered rows and the total to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasketModel {
    pub items: Vec<NodeId>,
    pub total: Price,
}

#[derive(Debug, Clone, Copy)]
pub struct Basket {
    root: NodeId,
    list: NodeId,
    total: NodeId,
    button: NodeId,
}

impl Basket {
    /// Clone the basket template and mount it.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] if the template or one of its parts is missing.
    pub fn create(doc: &mut Document) -> Result<Self, DomError> {
        let root = doc.clone_template(names::BASKET)?;
        let button = ensure_element(doc, root, ".basket__button")?;
        doc.set_listener(button, DomEventType::Click, Listener::Emit(Event::OrderOpen));
        Ok(Self {
            root,
            list: ensure_element(doc, root, ".basket__list")?,
            total: ensure_element(doc, root, ".basket__price")?,
            button,
        })
    }

    #[must_use]
    pub const fn list(&self) -> NodeId {
        self.list
    }

    #[must_use]
    pub const fn checkout_button(&self) -> NodeId {
        self.button
    }

    /// Replace the rows. Previous rows are freed. Checkout is disabled when
    /// there are none.
    pub fn set_items(&self, doc: &mut Document, items: &[NodeId]) {
        for old in doc.replace_children(self.list, items) {
            doc.remove(old);
        }
        doc.set_disabled(self.button, items.is_empty());
    }

    pub fn set_total(&self, doc: &mut Document, total: Price) {
        doc.set_text(self.total, &total.to_string());
    }
}

impl Component for Basket {
    type Model = BasketModel;

    fn root(&self) -> NodeId {
        self.root
    }

    fn render(&self, doc: &mut Document, model: &BasketModel) -> NodeId {
        self.set_items(doc, &model.items);
        self.set_total(doc, model.total);
        self.root
    }
}
