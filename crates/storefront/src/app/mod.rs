//! The storefront context.
//!
//! [`Storefront`] owns the document, the state, the bus and every view. It is
//! the `C` of [`EventBus<C>`]: handlers get `&mut Storefront` and do their work
//! synchronously. The only awaits are in [`Storefront::load_catalog`] and
//! [`Storefront::process_requests`]; handlers that need the network queue an
//! [`ApiRequest`] instead.
//!
//! ```
//! use web_larek_storefront::Storefront;
//!
//! let mut store = Storefront::new().unwrap();
//! let basket_button = store.views().page.basket_button();
//! store.click(basket_button);
//! assert!(store.is_modal_open());
//! ```

mod handlers;

use std::collections::VecDeque;

use web_larek_core::PaymentMethod;

use crate::api::{ApiError, ApiRequest, LarekApi};
use crate::components::{
    Basket, BasketModel, Component, ContactsForm, Modal, OrderForm, Page, PreviewCard, Success,
};
use crate::dom::serializer::to_html;
use crate::dom::template::{self, names};
use crate::dom::{Document, DomError, DomEventType, Listener, NodeId};
use crate::events::{self, BusContext, Event, EventBus, FieldChange};
use crate::state::AppState;

/// Every long-lived view.
#[derive(Debug, Clone)]
pub struct Views {
    pub page: Page,
    pub modal: Modal,
    pub basket: Basket,
    pub preview: PreviewCard,
    pub order: OrderForm,
    pub contacts: ContactsForm,
    pub success: Success,
}

impl Views {
    fn mount(doc: &mut Document) -> Result<Self, DomError> {
        for name in names::ALL {
            if !doc.has_template(name) {
                return Err(DomError::MissingTemplate(name.to_string()));
            }
        }
        let body = doc.body();
        Ok(Self {
            page: Page::mount(doc, body)?,
            modal: Modal::mount(doc, body)?,
            basket: Basket::create(doc)?,
            preview: PreviewCard::create(doc)?,
            order: OrderForm::create(doc)?,
            contacts: ContactsForm::create(doc)?,
            success: Success::create(doc)?,
        })
    }
}

/// The running storefront.
#[derive(Debug)]
pub struct Storefront {
    doc: Document,
    state: AppState,
    bus: EventBus<Self>,
    views: Views,
    pending: VecDeque<ApiRequest>,
}

impl BusContext for Storefront {
    fn bus(&self) -> &EventBus<Self> {
        &self.bus
    }
}

impl Storefront {
    /// Build a storefront over the standard page and templates.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] if a view cannot find its parts.
    pub fn new() -> Result<Self, DomError> {
        let mut doc = Document::new();
        template::install(&mut doc);
        Self::from_document(doc)
    }

    /// Build a storefront over a prepared document.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::MissingTemplate`] if a template is not registered
    /// and [`DomError::NotFound`] naming the selector of a missing part.
    pub fn from_document(mut doc: Document) -> Result<Self, DomError> {
        let views = Views::mount(&mut doc)?;
        let mut store = Self {
            doc,
            state: AppState::new(),
            bus: EventBus::new(),
            views,
            pending: VecDeque::new(),
        };
        handlers::register(&mut store.bus);

        let basket = store.views.basket;
        basket.render(&mut store.doc, &BasketModel::default());
        store.views.page.set_counter(&mut store.doc, 0);
        tracing::debug!(subscriptions = store.bus.len(), "storefront ready");
        Ok(store)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.doc
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn views(&self) -> &Views {
        &self.views
    }

    /// Bus access, for extra subscribers.
    pub const fn bus_mut(&mut self) -> &mut EventBus<Self> {
        &mut self.bus
    }

    /// Requests waiting for [`Storefront::process_requests`].
    #[must_use]
    pub const fn pending_requests(&self) -> &VecDeque<ApiRequest> {
        &self.pending
    }

    /// Whether an order is queued and not yet sent.
    #[must_use]
    pub fn order_pending(&self) -> bool {
        self.pending
            .iter()
            .any(|r| matches!(r, ApiRequest::SubmitOrder(_)))
    }

    #[must_use]
    pub fn is_modal_open(&self) -> bool {
        self.views.modal.is_open(&self.doc)
    }

    /// The whole page as HTML.
    #[must_use]
    pub fn render_html(&self) -> String {
        to_html(&self.doc, self.doc.body())
    }

    // =========================================================================
    // Bus and state
    // =========================================================================

    /// Publish an event.
    pub fn emit(&mut self, event: &Event) {
        events::emit(self, event);
    }

    /// Mutate the state, then publish what changed.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut AppState) -> R) -> R {
        let result = f(&mut self.state);
        for event in self.state.take_changes() {
            self.emit(&event);
        }
        result
    }

    /// Queue a request. At most one order waits at a time.
    fn queue(&mut self, request: ApiRequest) -> bool {
        if matches!(request, ApiRequest::SubmitOrder(_)) && self.order_pending() {
            tracing::debug!("order already queued");
            return false;
        }
        self.pending.push_back(request);
        true
    }

    // =========================================================================
    // Modal
    // =========================================================================

    /// Show `content` in the modal and open it.
    pub fn open_modal(&mut self, content: NodeId) {
        let modal = self.views.modal;
        modal.set_content(&mut self.doc, content);
        if modal.open(&mut self.doc) {
            self.emit(&Event::ModalOpen);
        }
    }

    pub fn close_modal(&mut self) {
        let modal = self.views.modal;
        if modal.close(&mut self.doc) {
            self.emit(&Event::ModalClose);
        }
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Click `node`. Clicks on a disabled button are ignored; clicking a
    /// submit button also submits its form.
    pub fn click(&mut self, node: NodeId) {
        if self.inside_disabled_button(node) {
            tracing::debug!(node = node.index(), "click on disabled button ignored");
            return;
        }
        self.dispatch(node, DomEventType::Click);

        if self.doc.get(node).is_some_and(|el| el.tag() == "button")
            && self.doc.attribute(node, "type") == Some("submit")
            && let Some(form) = self
                .doc
                .path(node)
                .into_iter()
                .find(|&n| self.doc.get(n).is_some_and(|el| el.tag() == "form"))
        {
            self.dispatch(form, DomEventType::Submit);
        }
    }

    /// Type `value` into an input.
    pub fn input(&mut self, node: NodeId, value: &str) {
        self.doc.set_value(node, value);
        self.dispatch(node, DomEventType::Input);
    }

    /// Submit a form.
    pub fn submit(&mut self, form: NodeId) {
        self.dispatch(form, DomEventType::Submit);
    }

    fn inside_disabled_button(&self, node: NodeId) -> bool {
        self.doc.path(node).into_iter().any(|n| {
            self.doc.get(n).is_some_and(|el| el.tag() == "button") && self.doc.is_disabled(n)
        })
    }

    /// Run listeners from `target` up to the body, innermost first.
    fn dispatch(&mut self, target: NodeId, kind: DomEventType) {
        for node in self.doc.path(target) {
            let mut stop = false;
            for listener in self.doc.listeners(node, kind) {
                match listener {
                    Listener::Emit(event) => self.emit(&event),
                    Listener::FieldInput(form) => {
                        if let Some(field) = self.doc.attribute(target, "name") {
                            let change = FieldChange {
                                form,
                                field: field.to_string(),
                                value: self.doc.value(target).to_string(),
                            };
                            self.emit(&Event::FieldChanged(change));
                        }
                    }
                    Listener::SelectPayment => {
                        match self.doc.attribute(node, "name").map(str::parse::<PaymentMethod>) {
                            Some(Ok(method)) => self.emit(&Event::PaymentChanged(method)),
                            _ => {
                                tracing::warn!(
                                    node = node.index(),
                                    "payment button without a known name"
                                );
                            }
                        }
                    }
                    Listener::CloseModal => self.close_modal(),
                    Listener::CloseModalOnBackdrop => {
                        if node == target {
                            self.close_modal();
                        }
                    }
                    Listener::StopPropagation => stop = true,
                }
            }
            if stop {
                break;
            }
        }
    }

    // =========================================================================
    // Network
    // =========================================================================

    /// Fetch the catalog and store it. Returns the number of products.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] if the catalog could not be fetched; the
    /// current catalog is kept.
    #[allow(clippy::future_not_send)]
    pub async fn load_catalog(&mut self, api: &impl LarekApi) -> Result<usize, ApiError> {
        let list = match api.get_products().await {
            Ok(list) => list,
            Err(e) => {
                tracing::error!(error = %e, "failed to load catalog");
                return Err(e);
            }
        };
        let count = list.items.len();
        tracing::info!(count, total = list.total, "catalog loaded");
        self.update(|s| s.set_catalog(list.items));
        Ok(count)
    }

    /// Perform every queued request, publishing `order-placed` or
    /// `order-failed` for each order. Returns how many were processed.
    #[allow(clippy::future_not_send)]
    pub async fn process_requests(&mut self, api: &impl LarekApi) -> usize {
        let mut processed = 0;
        while let Some(request) = self.pending.pop_front() {
            processed += 1;
            match request {
                ApiRequest::SubmitOrder(order) => match api.submit_order(&order).await {
                    Ok(result) => {
                        tracing::info!(
                            id = ?result.id,
                            total = %result.total,
                            items = order.items.len(),
                            "order placed"
                        );
                        self.emit(&Event::OrderPlaced(result));
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "order submission failed");
                        self.emit(&Event::OrderFailed(e.user_message()));
                    }
                },
            }
        }
        processed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::components::{LOCKED_CLASS, MODAL_ACTIVE_CLASS};
    use crate::dom::template::ElementBuilder;
    use crate::events::EventKind;
    use std::cell::RefCell;
    use std::rc::Rc;
    use web_larek_core::{Category, Price, Product, ProductId};

    fn product(id: &str, price: Option<i64>) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: Some(format!("About {id}")),
            image: format!("https://cdn.test/{id}.svg"),
            category: Category::SoftSkill.label().to_string(),
            price: price.map(Price::from_units),
        }
    }

    fn store_with_catalog() -> Storefront {
        let mut store = Storefront::new().unwrap();
        store.update(|s| {
            s.set_catalog(vec![
                product("a", Some(100)),
                product("b", Some(200)),
                product("free", None),
            ]);
        });
        store
    }

    fn record(store: &mut Storefront, kind: EventKind) -> Rc<RefCell<usize>> {
        let count = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&count);
        store.bus_mut().on(kind, move |_: &mut Storefront, _| *seen.borrow_mut() += 1);
        count
    }

    fn gallery_card(store: &Storefront, index: usize) -> NodeId {
        store.document().children(store.views().page.gallery())[index]
    }

    #[test]
    #[allow(clippy::indexing_slicing)]
    fn test_catalog_renders_gallery() {
        let store = store_with_catalog();
        let gallery = store.views().page.gallery();
        assert_eq!(store.document().children(gallery).len(), 3);
        let first = gallery_card(&store, 0);
        assert!(store.document().text(first).contains("Product a"));
        assert!(store.document().text(first).contains("100 synapses"));
    }

    #[test]
    #[allow(clippy::indexing_slicing)]
    fn test_card_click_opens_preview() {
        let mut store = store_with_catalog();
        let opened = record(&mut store, EventKind::ModalOpen);
        let card = gallery_card(&store, 1);
        store.click(card);

        assert!(store.is_modal_open());
        assert_eq!(*opened.borrow(), 1);
        assert_eq!(store.state().preview().unwrap().id.as_str(), "b");
        let modal = store.views().modal;
        assert_eq!(modal.current(store.document()), Some(store.views().preview.root()));
        let wrapper = store.document().parent(store.views().page.gallery()).unwrap();
        assert!(store.document().has_class(wrapper, LOCKED_CLASS));
    }

    #[test]
    #[allow(clippy::indexing_slicing)]
    fn test_buy_adds_and_closes() {
        let mut store = store_with_catalog();
        store.click(gallery_card(&store, 0));
        let buy = store.views().preview.button();
        store.click(buy);

        assert!(!store.is_modal_open());
        assert_eq!(store.state().basket_len(), 1);
        let counter = store.views().page.counter();
        assert_eq!(store.document().text(counter), "1");
    }

    #[test]
    #[allow(clippy::indexing_slicing)]
    fn test_priceless_buy_button_is_inert() {
        let mut store = store_with_catalog();
        store.click(gallery_card(&store, 2));
        let buy = store.views().preview.button();
        assert!(store.document().is_disabled(buy));
        store.click(buy);
        assert_eq!(store.state().basket_len(), 0);
        assert!(store.is_modal_open());
    }

    #[test]
    fn test_backdrop_click_closes_once() {
        let mut store = store_with_catalog();
        let closed = record(&mut store, EventKind::ModalClose);
        store.click(store.views().page.basket_button());
        assert!(store.is_modal_open());

        let modal_root = store.views().modal.root();
        store.click(modal_root);
        assert!(!store.is_modal_open());
        store.click(modal_root);
        assert_eq!(*closed.borrow(), 1);
    }

    #[test]
    fn test_interior_click_keeps_modal_open() {
        let mut store = store_with_catalog();
        store.click(store.views().page.basket_button());
        let list = store.views().basket.list();
        store.click(list);
        assert!(store.is_modal_open());
        assert!(store.document().has_class(store.views().modal.root(), MODAL_ACTIVE_CLASS));

        store.click(store.views().modal.close_button());
        assert!(!store.is_modal_open());
    }

    #[test]
    fn test_missing_template_part_fails() {
        let mut doc = Document::new();
        template::install(&mut doc);
        let broken = ElementBuilder::new("div")
            .class("basket")
            .child(ElementBuilder::new("ul").class("basket__list"))
            .child(ElementBuilder::new("button").class("basket__button"))
            .build(&mut doc);
        doc.register_template(names::BASKET, broken);

        let err = Storefront::from_document(doc).unwrap_err();
        assert_eq!(
            err,
            DomError::NotFound {
                selector: ".basket__price".to_string()
            }
        );
    }

    #[test]
    fn test_unregistered_template_fails() {
        let mut doc = Document::new();
        let page = template::page().build(&mut doc);
        let body = doc.body();
        doc.append_child(body, page);
        assert_eq!(
            Storefront::from_document(doc).unwrap_err(),
            DomError::MissingTemplate(names::CARD_CATALOG.to_string())
        );
    }

    #[test]
    fn test_render_html_contains_page() {
        let store = store_with_catalog();
        let html = store.render_html();
        assert!(html.starts_with("<body>"));
        assert!(html.contains("class=\"gallery\""));
        assert!(html.contains("Product b"));
    }
}
