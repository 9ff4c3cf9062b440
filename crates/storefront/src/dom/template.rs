//! Element builder and the storefront's standard page and templates.
//!
//! The page and template markup follow the store's BEM layout: components
//! look their parts up by these class names and fail if one is missing.

use super::{Document, NodeId};

/// Template names.
pub mod names {
    pub const CARD_CATALOG: &str = "card-catalog";
    pub const CARD_PREVIEW: &str = "card-preview";
    pub const CARD_BASKET: &str = "card-basket";
    pub const BASKET: &str = "basket";
    pub const ORDER: &str = "order";
    pub const CONTACTS: &str = "contacts";
    pub const SUCCESS: &str = "success";

    /// Every template the storefront clones.
    pub const ALL: [&str; 7] = [
        CARD_CATALOG,
        CARD_PREVIEW,
        CARD_BASKET,
        BASKET,
        ORDER,
        CONTACTS,
        SUCCESS,
    ];
}

/// Declarative element description, built into a [`Document`] with
/// [`ElementBuilder::build`].
///
/// ```
/// use web_larek_storefront::dom::{Document, template::ElementBuilder};
///
/// let mut doc = Document::new();
/// let button = ElementBuilder::new("button")
///     .class("button")
///     .attr("type", "submit")
///     .text("Pay")
///     .build(&mut doc);
/// assert_eq!(doc.text(button), "Pay");
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ElementBuilder {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Self>,
}

impl ElementBuilder {
    /// Start an element.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    /// Add a class.
    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Set an attribute.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    /// Set text content.
    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Append a child.
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Materialize the element (detached) and return its root.
    pub fn build(self, doc: &mut Document) -> NodeId {
        let node = doc.create_element(&self.tag);
        for class in &self.classes {
            doc.add_class(node, class);
        }
        for (name, value) in &self.attributes {
            doc.set_attribute(node, name, value);
        }
        if let Some(text) = &self.text {
            doc.set_text(node, text);
        }
        for child in self.children {
            let child = child.build(doc);
            doc.append_child(node, child);
        }
        node
    }
}

fn el(tag: &str) -> ElementBuilder {
    ElementBuilder::new(tag)
}

/// Mount the standard page into the body and register every template.
pub fn install(doc: &mut Document) {
    let page = page().build(doc);
    doc.append_child(doc.body(), page);

    let templates = [
        (names::CARD_CATALOG, card_catalog()),
        (names::CARD_PREVIEW, card_preview()),
        (names::CARD_BASKET, card_basket()),
        (names::BASKET, basket()),
        (names::ORDER, order()),
        (names::CONTACTS, contacts()),
        (names::SUCCESS, success()),
    ];
    for (name, builder) in templates {
        let root = builder.build(doc);
        doc.register_template(name, root);
    }
}

/// Page shell: header with basket button, gallery, modal container.
pub fn page() -> ElementBuilder {
    el("div")
        .class("page")
        .child(
            el("div")
                .class("page__wrapper")
                .child(
                    el("header").class("header").child(
                        el("div")
                            .class("header__container")
                            .child(
                                el("a").class("header__logo").attr("href", "#").child(
                                    el("img")
                                        .class("header__logo-image")
                                        .attr("src", "./images/logo.svg")
                                        .attr("alt", "Web Larek logo"),
                                ),
                            )
                            .child(
                                el("button").class("header__basket").child(
                                    el("span").class("header__basket-counter").text("0"),
                                ),
                            ),
                    ),
                )
                .child(el("main").class("gallery")),
        )
        .child(
            el("div").class("modal").attr("id", "modal-container").child(
                el("div")
                    .class("modal__container")
                    .child(
                        el("button")
                            .class("modal__close")
                            .attr("aria-label", "close"),
                    )
                    .child(el("div").class("modal__content")),
            ),
        )
}

/// Catalog tile.
pub fn card_catalog() -> ElementBuilder {
    el("button")
        .class("gallery__item")
        .class("card")
        .child(el("span").class("card__category").class("card__category_soft"))
        .child(el("h2").class("card__title"))
        .child(el("img").class("card__image").attr("src", "").attr("alt", ""))
        .child(el("span").class("card__price"))
}

/// Full product card shown in the modal.
pub fn card_preview() -> ElementBuilder {
    el("div")
        .class("card")
        .class("card_full")
        .child(el("img").class("card__image").attr("src", "").attr("alt", ""))
        .child(
            el("div")
                .class("card__column")
                .child(el("span").class("card__category").class("card__category_other"))
                .child(el("h2").class("card__title"))
                .child(el("p").class("card__text"))
                .child(
                    el("div")
                        .class("card__row")
                        .child(el("button").class("button").class("card__button").text("Buy"))
                        .child(el("span").class("card__price")),
                ),
        )
}

/// Basket row.
pub fn card_basket() -> ElementBuilder {
    el("li")
        .class("basket__item")
        .class("card")
        .class("card_compact")
        .child(el("span").class("basket__item-index").text("1"))
        .child(el("span").class("card__title"))
        .child(el("span").class("card__price"))
        .child(
            el("button")
                .class("basket__item-delete")
                .class("card__button")
                .attr("aria-label", "remove"),
        )
}

/// Basket panel.
pub fn basket() -> ElementBuilder {
    el("div")
        .class("basket")
        .child(el("h2").class("modal__title").text("Basket"))
        .child(el("ul").class("basket__list"))
        .child(
            el("div")
                .class("modal__actions")
                .child(el("button").class("button").class("basket__button").text("Checkout"))
                .child(el("span").class("basket__price").text("0 synapses")),
        )
}

/// Delivery step: payment method and address.
pub fn order() -> ElementBuilder {
    el("form")
        .class("form")
        .attr("name", "order")
        .child(
            el("div")
                .class("order")
                .child(
                    el("div")
                        .class("order__field")
                        .child(el("h2").class("modal__title").text("Payment method"))
                        .child(
                            el("div")
                                .class("order__buttons")
                                .child(
                                    el("button")
                                        .class("button")
                                        .class("button_alt")
                                        .attr("name", "card")
                                        .attr("type", "button")
                                        .text("Online"),
                                )
                                .child(
                                    el("button")
                                        .class("button")
                                        .class("button_alt")
                                        .attr("name", "cash")
                                        .attr("type", "button")
                                        .text("On delivery"),
                                ),
                        ),
                )
                .child(labelled_input("Delivery address", "address", "Enter address")),
        )
        .child(form_actions("Next", "order__button"))
}

/// Contacts step: email and phone.
pub fn contacts() -> ElementBuilder {
    el("form")
        .class("form")
        .attr("name", "contacts")
        .child(
            el("div")
                .class("order")
                .child(labelled_input("Email", "email", "Enter email"))
                .child(labelled_input("Phone", "phone", "+7 (")),
        )
        .child(form_actions("Pay", "contacts__button"))
}

/// Order confirmation.
pub fn success() -> ElementBuilder {
    el("div")
        .class("order-success")
        .child(el("h2").class("order-success__title").text("Order placed"))
        .child(
            el("p")
                .class("order-success__description")
                .text("Charged: 0 synapses"),
        )
        .child(
            el("button")
                .class("button")
                .class("order-success__close")
                .text("Keep shopping!"),
        )
}

fn labelled_input(label: &str, name: &str, placeholder: &str) -> ElementBuilder {
    el("label")
        .class("order__field")
        .child(el("span").class("form__label").class("modal__title").text(label))
        .child(
            el("input")
                .class("form__input")
                .attr("name", name)
                .attr("type", "text")
                .attr("placeholder", placeholder),
        )
}

fn form_actions(submit_label: &str, submit_class: &str) -> ElementBuilder {
    el("div")
        .class("modal__actions")
        .child(
            el("button")
                .class("button")
                .class(submit_class)
                .attr("type", "submit")
                .attr("disabled", "true")
                .text(submit_label),
        )
        .child(el("span").class("form__errors"))
}
