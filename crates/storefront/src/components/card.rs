//! Product cards: catalog tile, full preview and basket row.

use web_larek_core::{Category, Price, Product};

use super::{Component, ensure_element, optional_element};
use crate::dom::template::names;
use crate::dom::{Document, DomError, DomEventType, Listener, NodeId};
use crate::events::Event;

/// Text of the preview button for a product not yet in the basket.
pub const BUY_LABEL: &str = "Buy";
/// Text of the preview button for a product already in the basket.
pub const REMOVE_LABEL: &str = "Remove from basket";

/// Parts shared by every card. Title and price are required, the rest
/// depend on the template.
#[derive(Debug, Clone, Copy)]
pub struct Card {
    root: NodeId,
    title: NodeId,
    price: NodeId,
    image: Option<NodeId>,
    category: Option<NodeId>,
    text: Option<NodeId>,
    button: Option<NodeId>,
}

impl Card {
    /// Locate the card's parts under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotFound`] if the title or price is missing.
    pub fn mount(doc: &Document, root: NodeId) -> Result<Self, DomError> {
        Ok(Self {
            root,
            title: ensure_element(doc, root, ".card__title")?,
            price: ensure_element(doc, root, ".card__price")?,
            image: optional_element(doc, root, ".card__image")?,
            category: optional_element(doc, root, ".card__category")?,
            text: optional_element(doc, root, ".card__text")?,
            button: optional_element(doc, root, ".card__button")?,
        })
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub const fn button(&self) -> Option<NodeId> {
        self.button
    }

    pub fn set_title(&self, doc: &mut Document, title: &str) {
        doc.set_text(self.title, title);
    }

    pub fn set_price(&self, doc: &mut Document, price: Option<Price>) {
        doc.set_text(self.price, &Price::label(price));
    }

    pub fn set_image(&self, doc: &mut Document, src: &str, alt: &str) {
        if let Some(image) = self.image {
            doc.set_image(image, src, Some(alt));
        }
    }

    /// Category badge: the name as received, plus the
    /// `card__category_<modifier>` class of the matching [`Category`].
    pub fn set_category(&self, doc: &mut Document, name: &str) {
        if let Some(badge) = self.category {
            doc.set_text(badge, name);
            let category = Category::from(name);
            let modifier = format!("card__category_{}", category.modifier());
            doc.set_classes(badge, &["card__category", modifier.as_str()]);
        }
    }

    pub fn set_description(&self, doc: &mut Document, description: Option<&str>) {
        if let Some(text) = self.text {
            doc.set_text(text, description.unwrap_or_default());
        }
    }

    fn render_product(&self, doc: &mut Document, product: &Product) {
        self.set_title(doc, &product.title);
        self.set_price(doc, product.price);
        self.set_image(doc, &product.image, &product.title);
        self.set_category(doc, &product.category);
        self.set_description(doc, product.description.as_deref());
    }
}

/// Gallery tile. Clicking anywhere on it selects the product.
#[derive(Debug, Clone, Copy)]
pub struct CatalogCard {
    card: Card,
}

impl CatalogCard {
    /// Clone the catalog template and mount it.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] if the template or one of its parts is missing.
    pub fn create(doc: &mut Document) -> Result<Self, DomError> {
        let root = doc.clone_template(names::CARD_CATALOG)?;
        Ok(Self {
            card: Card::mount(doc, root)?,
        })
    }
}

impl Component for CatalogCard {
    type Model = Product;

    fn root(&self) -> NodeId {
        self.card.root
    }

    fn render(&self, doc: &mut Document, product: &Product) -> NodeId {
        self.card.render_product(doc, product);
        doc.set_listener(
            self.card.root,
            DomEventType::Click,
            Listener::Emit(Event::CardSelect(product.id.clone())),
        );
        self.card.root
    }
}

/// What the preview shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewModel {
    pub product: Product,
    pub in_basket: bool,
}

/// Full card shown in the modal, with the buy/remove button.
#[derive(Debug, Clone, Copy)]
pub struct PreviewCard {
    card: Card,
    button: NodeId,
}

impl PreviewCard {
    /// Clone the preview template and mount it.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] if the template, a card part, or the button is
    /// missing.
    pub fn create(doc: &mut Document) -> Result<Self, DomError> {
        let root = doc.clone_template(names::CARD_PREVIEW)?;
        let card = Card::mount(doc, root)?;
        let button = card.button().ok_or_else(|| DomError::NotFound {
            selector: ".card__button".to_string(),
        })?;
        Ok(Self { card, button })
    }

    #[must_use]
    pub const fn button(&self) -> NodeId {
        self.button
    }

    /// Switch the button between buying and removing `product`.
    ///
    /// A priceless product gets a disabled button either way.
    pub fn set_in_basket(&self, doc: &mut Document, product: &Product, in_basket: bool) {
        let (label, event) = if in_basket {
            (REMOVE_LABEL, Event::CardRemove(product.id.clone()))
        } else {
            (BUY_LABEL, Event::CardAdd(product.id.clone()))
        };
        doc.set_text(self.button, label);
        doc.set_listener(self.button, DomEventType::Click, Listener::Emit(event));
        doc.set_disabled(self.button, !in_basket && !product.is_for_sale());
    }
}

impl Component for PreviewCard {
    type Model = PreviewModel;

    fn root(&self) -> NodeId {
        self.card.root
    }

    fn render(&self, doc: &mut Document, model: &PreviewModel) -> NodeId {
        self.card.render_product(doc, &model.product);
        self.set_in_basket(doc, &model.product, model.in_basket);
        self.card.root
    }
}

/// A basket row: 1-based position plus the product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketItem {
    pub index: usize,
    pub product: Product,
}

/// Compact row in the basket list with a delete button.
#[derive(Debug, Clone, Copy)]
pub struct BasketCard {
    card: Card,
    index: NodeId,
    delete: NodeId,
}

impl BasketCard {
    /// Clone the basket row template and mount it.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] if the template or one of its parts is missing.
    pub fn create(doc: &mut Document) -> Result<Self, DomError> {
        let root = doc.clone_template(names::CARD_BASKET)?;
        Ok(Self {
            card: Card::mount(doc, root)?,
            index: ensure_element(doc, root, ".basket__item-index")?,
            delete: ensure_element(doc, root, ".basket__item-delete")?,
        })
    }
}

impl Component for BasketCard {
    type Model = BasketItem;

    fn root(&self) -> NodeId {
        self.card.root
    }

    fn render(&self, doc: &mut Document, item: &BasketItem) -> NodeId {
        doc.set_text(self.index, &item.index.to_string());
        self.card.set_title(doc, &item.product.title);
        self.card.set_price(doc, item.product.price);
        doc.set_listener(
            self.delete,
            DomEventType::Click,
            Listener::Emit(Event::CardRemove(item.product.id.clone())),
        );
        self.card.root
    }
}
