//! Integration tests for Web Larek.
//!
//! # Running Tests
//!
//! ```bash
//! # Everything that runs offline
//! cargo test -p web-larek-integration-tests
//!
//! # Include the tests against the live API
//! cargo test -p web-larek-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `basket` - Catalog, preview and basket through clicks
//! - `checkout` - Delivery and contacts forms, order submission
//! - `modal` - Modal open/close and page locking
//! - `events` - Bus topics seen from outside the storefront
//! - `live_api` - The real Larek API (ignored by default)
//!
//! The helpers here drive a [`Storefront`] like a shopper and stand in for
//! the API with [`ScriptedApi`].

use std::cell::{Cell, RefCell};

use web_larek_core::{
    Category, Order, OrderId, OrderResult, PaymentMethod, Price, Product, ProductId, ProductList,
};
use web_larek_storefront::components::Component;
use web_larek_storefront::dom::NodeId;
use web_larek_storefront::{ApiError, LarekApi, Storefront};

// ============================================================================
// Fixtures
// ============================================================================

/// A product with a predictable title and image.
#[must_use]
pub fn product(id: &str, price: Option<i64>) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        description: Some(format!("Everything about {id}")),
        image: format!("https://cdn.test/{id}.svg"),
        category: Category::SoftSkill.label().to_string(),
        price: price.map(Price::from_units),
    }
}

/// `a` for 100, `b` for 200 and a priceless `c`.
#[must_use]
pub fn sample_catalog() -> Vec<Product> {
    vec![product("a", Some(100)), product("b", Some(200)), product("c", None)]
}

// ============================================================================
// Scripted API
// ============================================================================

/// How [`ScriptedApi`] answers `POST /order`.
#[derive(Debug, Clone)]
pub enum OrderOutcome {
    /// Accept and echo the total.
    Accept,
    /// Answer with an error status and message.
    Reject { status: u16, message: String },
}

/// In-memory [`LarekApi`] that records submitted orders.
#[derive(Debug)]
pub struct ScriptedApi {
    products: Vec<Product>,
    catalog_error: Option<String>,
    outcome: OrderOutcome,
    orders: RefCell<Vec<Order>>,
    catalog_calls: Cell<usize>,
}

impl ScriptedApi {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            catalog_error: None,
            outcome: OrderOutcome::Accept,
            orders: RefCell::new(Vec::new()),
            catalog_calls: Cell::new(0),
        }
    }

    /// Reject every order with `status` and `message`.
    #[must_use]
    pub fn rejecting(mut self, status: u16, message: &str) -> Self {
        self.outcome = OrderOutcome::Reject {
            status,
            message: message.to_string(),
        };
        self
    }

    /// Fail `GET /product/` with `message`.
    #[must_use]
    pub fn failing_catalog(mut self, message: &str) -> Self {
        self.catalog_error = Some(message.to_string());
        self
    }

    /// Orders received so far.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.orders.borrow().clone()
    }

    #[must_use]
    pub fn catalog_calls(&self) -> usize {
        self.catalog_calls.get()
    }
}

#[allow(clippy::future_not_send)]
impl LarekApi for ScriptedApi {
    async fn get_products(&self) -> Result<ProductList, ApiError> {
        self.catalog_calls.set(self.catalog_calls.get() + 1);
        if let Some(message) = &self.catalog_error {
            return Err(ApiError::Api {
                status: 500,
                message: message.clone(),
            });
        }
        Ok(ProductList {
            total: u32::try_from(self.products.len()).unwrap_or(u32::MAX),
            items: self.products.clone(),
        })
    }

    async fn submit_order(&self, order: &Order) -> Result<OrderResult, ApiError> {
        self.orders.borrow_mut().push(order.clone());
        match &self.outcome {
            OrderOutcome::Accept => Ok(OrderResult {
                id: Some(OrderId::new(format!("order-{}", self.orders.borrow().len()))),
                total: order.total,
                success: None,
            }),
            OrderOutcome::Reject { status, message } => Err(ApiError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

// ============================================================================
// Shopper helpers
// ============================================================================

/// A storefront with `api`'s catalog loaded.
///
/// # Errors
///
/// Returns the [`ApiError`] if the catalog cannot be loaded.
///
/// # Panics
///
/// Panics if the built-in templates cannot be mounted.
#[allow(clippy::future_not_send)]
pub async fn open_store(api: &ScriptedApi) -> Result<Storefront, ApiError> {
    let mut store = Storefront::new().expect("built-in templates mount");
    store.load_catalog(api).await?;
    Ok(store)
}

/// The gallery card showing product `id`.
#[must_use]
pub fn gallery_card(store: &Storefront, id: &str) -> Option<NodeId> {
    let index = store
        .state()
        .catalog()
        .iter()
        .position(|p| p.id.as_str() == id)?;
    store
        .document()
        .children(store.views().page.gallery())
        .get(index)
        .copied()
}

/// Open the preview of `id` and press its button.
///
/// Returns `false` if the product is not in the gallery.
pub fn buy(store: &mut Storefront, id: &str) -> bool {
    let Some(card) = gallery_card(store, id) else {
        return false;
    };
    store.click(card);
    let button = store.views().preview.button();
    store.click(button);
    true
}

/// Rows currently in the basket list.
#[must_use]
pub fn basket_rows(store: &Storefront) -> Vec<NodeId> {
    store.document().children(store.views().basket.list()).to_vec()
}

/// The delete button of a basket row.
#[must_use]
pub fn row_delete_button(store: &Storefront, row: NodeId) -> Option<NodeId> {
    store
        .document()
        .query_selector(row, ".basket__item-delete")
        .ok()
        .flatten()
}

/// Text of the basket view.
#[must_use]
pub fn basket_text(store: &Storefront) -> String {
    store.document().text(store.views().basket.root())
}

/// The node the modal currently shows.
#[must_use]
pub fn modal_content(store: &Storefront) -> Option<NodeId> {
    store.views().modal.current(store.document())
}

/// Open the basket and press checkout.
pub fn start_checkout(store: &mut Storefront) {
    let basket_button = store.views().page.basket_button();
    store.click(basket_button);
    let checkout = store.views().basket.checkout_button();
    store.click(checkout);
}

/// Pick `payment`, type `address` and submit the delivery form.
pub fn fill_delivery(store: &mut Storefront, payment: &str, address: &str) {
    let order = store.views().order.clone();
    if let Ok(method) = payment.parse::<PaymentMethod>()
        && let Some(button) = order.payment_button(store.document(), method)
    {
        store.click(button);
    }
    store.input(order.address_input(), address);
    store.click(order.form().submit_button());
}

/// Type `email` and `phone` and submit the contacts form.
pub fn fill_contacts(store: &mut Storefront, email: &str, phone: &str) {
    let contacts = store.views().contacts;
    store.input(contacts.email_input(), email);
    store.input(contacts.phone_input(), phone);
    store.click(contacts.form().submit_button());
}
