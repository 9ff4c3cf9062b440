//! Application state: catalog, basket, preview, order draft and form errors.
//!
//! `AppState` never talks to the bus directly. Every mutation that other
//! parts of the storefront care about is recorded as an [`Event`] and drained
//! with [`AppState::take_changes`]; the storefront context publishes them
//! once the mutation returns.
//!
//! The basket is the source of truth for the order: item ids and the total
//! are derived from it when the order is built.

use std::collections::BTreeMap;
use std::fmt;

use web_larek_core::{Email, Order, OrderField, PaymentMethod, Phone, Price, Product, ProductId};

use crate::events::Event;

/// Message shown when no payment method is selected.
pub const PAYMENT_REQUIRED: &str = "Choose a payment method";
/// Message shown when the delivery address is blank.
pub const ADDRESS_REQUIRED: &str = "Address is required";

/// State errors.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The id is not in the catalog.
    #[error("product {0} is not in the catalog")]
    UnknownProduct(ProductId),

    /// The product has no price and cannot be bought.
    #[error("product {0} is not for sale")]
    NotForSale(ProductId),

    /// An order needs at least one item.
    #[error("basket is empty")]
    EmptyBasket,

    /// The draft still has validation errors.
    #[error("order is incomplete: {0}")]
    Incomplete(FormErrors),
}

/// Validation messages keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<OrderField, String>);

impl FormErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, field: OrderField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    #[must_use]
    pub fn get(&self, field: OrderField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OrderField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// Messages for `fields`, in field order.
    #[must_use]
    pub fn messages_for(&self, fields: &[OrderField]) -> Vec<&str> {
        fields.iter().filter_map(|f| self.get(*f)).collect()
    }

    /// Whether any of `fields` has an error.
    #[must_use]
    pub fn any_of(&self, fields: &[OrderField]) -> bool {
        fields.iter().any(|f| self.0.contains_key(f))
    }

    fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        f.write_str(&messages.join("; "))
    }
}

/// What the customer has typed into the checkout forms so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    pub payment: Option<PaymentMethod>,
    pub address: String,
    pub email: String,
    pub phone: String,
}

impl OrderDraft {
    /// Current raw value of a field, as a form input would show it.
    #[must_use]
    pub fn value(&self, field: OrderField) -> String {
        match field {
            OrderField::Payment => self
                .payment
                .map(|p| p.button_name().to_string())
                .unwrap_or_default(),
            OrderField::Address => self.address.clone(),
            OrderField::Email => self.email.clone(),
            OrderField::Phone => self.phone.clone(),
        }
    }

    fn assign(&mut self, field: OrderField, value: &str) {
        match field {
            OrderField::Payment => self.payment = value.parse().ok(),
            OrderField::Address => self.address = value.to_string(),
            OrderField::Email => self.email = value.to_string(),
            OrderField::Phone => self.phone = value.to_string(),
        }
    }
}

/// The storefront's model.
#[derive(Debug, Default)]
pub struct AppState {
    catalog: Vec<Product>,
    basket: Vec<Product>,
    preview: Option<ProductId>,
    order: OrderDraft,
    form_errors: FormErrors,
    changes: Vec<Event>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Replace the catalog.
    pub fn set_catalog(&mut self, items: Vec<Product>) {
        self.catalog = items;
        if let Some(id) = &self.preview
            && !self.catalog.iter().any(|p| &p.id == id)
        {
            self.preview = None;
        }
        self.changes.push(Event::CatalogChanged);
    }

    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// Look up a catalog product.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.catalog.iter().find(|p| &p.id == id)
    }

    /// Show `id` in the preview.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownProduct`] if the id is not in the catalog.
    pub fn set_preview(&mut self, id: &ProductId) -> Result<(), StateError> {
        if self.product(id).is_none() {
            return Err(StateError::UnknownProduct(id.clone()));
        }
        self.preview = Some(id.clone());
        self.changes.push(Event::PreviewChanged(id.clone()));
        Ok(())
    }

    /// The product currently in the preview.
    #[must_use]
    pub fn preview(&self) -> Option<&Product> {
        self.preview.as_ref().and_then(|id| self.product(id))
    }

    // =========================================================================
    // Basket
    // =========================================================================

    /// Put a product in the basket.
    ///
    /// Returns `false` if it was already there.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NotForSale`] for a product without a price.
    pub fn add_to_basket(&mut self, product: &Product) -> Result<bool, StateError> {
        if !product.is_for_sale() {
            return Err(StateError::NotForSale(product.id.clone()));
        }
        if self.contains(&product.id) {
            return Ok(false);
        }
        self.basket.push(product.clone());
        self.changes.push(Event::BasketChanged);
        Ok(true)
    }

    /// Take a product out of the basket. Returns `false` if it was not there.
    pub fn remove_from_basket(&mut self, id: &ProductId) -> bool {
        let before = self.basket.len();
        self.basket.retain(|p| &p.id != id);
        let removed = self.basket.len() != before;
        if removed {
            self.changes.push(Event::BasketChanged);
        }
        removed
    }

    /// Empty the basket.
    pub fn clear_basket(&mut self) {
        if !self.basket.is_empty() {
            self.basket.clear();
            self.changes.push(Event::BasketChanged);
        }
    }

    /// Basket contents in insertion order.
    #[must_use]
    pub fn basket(&self) -> &[Product] {
        &self.basket
    }

    /// Ids of the basket items, i.e. the order's `items`.
    #[must_use]
    pub fn basket_ids(&self) -> Vec<ProductId> {
        self.basket.iter().map(|p| p.id.clone()).collect()
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.basket.iter().any(|p| &p.id == id)
    }

    #[must_use]
    pub fn basket_len(&self) -> usize {
        self.basket.len()
    }

    /// Sum of basket prices.
    #[must_use]
    pub fn total(&self) -> Price {
        self.basket.iter().filter_map(|p| p.price).sum()
    }

    // =========================================================================
    // Order draft
    // =========================================================================

    /// Set a delivery field and revalidate the delivery step.
    ///
    /// An unrecognised payment name clears the payment method.
    pub fn set_order_field(&mut self, field: OrderField, value: &str) {
        self.order.assign(field, value);
        self.validate_order();
    }

    /// Set a contact field and revalidate the contacts step.
    pub fn set_contact_field(&mut self, field: OrderField, value: &str) {
        self.order.assign(field, value);
        self.validate_contacts();
    }

    /// Errors of the delivery step, without touching the stored map.
    #[must_use]
    pub fn delivery_errors(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        if self.order.payment.is_none() {
            errors.insert(OrderField::Payment, PAYMENT_REQUIRED);
        }
        if self.order.address.trim().is_empty() {
            errors.insert(OrderField::Address, ADDRESS_REQUIRED);
        }
        errors
    }

    /// Errors of the contacts step, without touching the stored map.
    #[must_use]
    pub fn contact_errors(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        if let Err(e) = Email::parse(&self.order.email) {
            errors.insert(OrderField::Email, e.to_string());
        }
        if let Err(e) = Phone::parse(&self.order.phone) {
            errors.insert(OrderField::Phone, e.to_string());
        }
        errors
    }

    /// Replace the error map with the delivery step's errors.
    ///
    /// Returns whether the delivery step is valid.
    pub fn validate_order(&mut self) -> bool {
        self.replace_errors(self.delivery_errors())
    }

    /// Replace the error map with the contacts step's errors.
    ///
    /// Returns whether the contacts step is valid.
    pub fn validate_contacts(&mut self) -> bool {
        self.replace_errors(self.contact_errors())
    }

    fn replace_errors(&mut self, errors: FormErrors) -> bool {
        let valid = errors.is_empty();
        self.form_errors = errors;
        self.changes.push(Event::ErrorsChanged(self.form_errors.clone()));
        valid
    }

    /// Errors from the last validation pass.
    #[must_use]
    pub const fn form_errors(&self) -> &FormErrors {
        &self.form_errors
    }

    #[must_use]
    pub const fn order_draft(&self) -> &OrderDraft {
        &self.order
    }

    /// Build the order to submit from the basket and the draft.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::EmptyBasket`] if there is nothing to buy and
    /// [`StateError::Incomplete`] with every outstanding error otherwise.
    pub fn order(&self) -> Result<Order, StateError> {
        if self.basket.is_empty() {
            return Err(StateError::EmptyBasket);
        }
        let mut errors = self.delivery_errors();
        errors.extend(self.contact_errors());

        let parsed = (
            self.order.payment,
            Email::parse(&self.order.email),
            Phone::parse(&self.order.phone),
        );
        match parsed {
            (Some(payment), Ok(email), Ok(phone)) if errors.is_empty() => Ok(Order {
                payment,
                address: self.order.address.trim().to_string(),
                email,
                phone,
                total: self.total(),
                items: self.basket_ids(),
            }),
            _ => Err(StateError::Incomplete(errors)),
        }
    }

    /// Forget the draft and its errors after a placed order.
    pub fn reset_order(&mut self) {
        self.order = OrderDraft::default();
        self.form_errors = FormErrors::new();
    }

    /// Drain the events recorded since the last call.
    pub fn take_changes(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.changes)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use web_larek_core::Category;

    fn product(id: &str, price: Option<i64>) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: None,
            image: format!("/{id}.svg"),
            category: Category::Other.label().to_string(),
            price: price.map(Price::from_units),
        }
    }

    fn filled_state() -> AppState {
        let mut state = AppState::new();
        state.set_catalog(vec![
            product("a", Some(100)),
            product("b", Some(200)),
            product("free", None),
        ]);
        state.take_changes();
        state
    }

    #[test]
    fn test_set_catalog_emits_change() {
        let mut state = AppState::new();
        state.set_catalog(vec![product("a", Some(1))]);
        assert_eq!(state.take_changes(), vec![Event::CatalogChanged]);
        assert_eq!(state.catalog().len(), 1);
        assert!(state.take_changes().is_empty());
    }

    #[test]
    fn test_total_of_basket() {
        let mut state = filled_state();
        let a = state.product(&"a".into()).unwrap().clone();
        let b = state.product(&"b".into()).unwrap().clone();
        assert!(state.add_to_basket(&a).unwrap());
        assert!(state.add_to_basket(&b).unwrap());
        assert_eq!(state.total(), Price::from_units(300));
        assert_eq!(state.basket_len(), 2);
        assert_eq!(
            state.take_changes(),
            vec![Event::BasketChanged, Event::BasketChanged]
        );
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut state = filled_state();
        let a = product("a", Some(100));
        assert!(state.add_to_basket(&a).unwrap());
        assert!(!state.add_to_basket(&a).unwrap());
        assert_eq!(state.basket_len(), 1);
        assert_eq!(state.take_changes(), vec![Event::BasketChanged]);
    }

    #[test]
    fn test_priceless_product_is_rejected() {
        let mut state = filled_state();
        let free = product("free", None);
        assert_eq!(
            state.add_to_basket(&free),
            Err(StateError::NotForSale("free".into()))
        );
        assert_eq!(state.basket_len(), 0);
        assert!(state.take_changes().is_empty());
    }

    #[test]
    fn test_remove_absent_is_silent() {
        let mut state = filled_state();
        assert!(!state.remove_from_basket(&"a".into()));
        assert!(state.take_changes().is_empty());
    }

    #[test]
    fn test_add_remove_sequences_keep_basket_consistent() {
        // Deterministic pseudo-random walk over add/remove operations.
        let products: Vec<Product> = (0..6)
            .map(|i| product(&format!("p{i}"), Some(i * 10 + 5)))
            .collect();
        let mut state = AppState::new();
        state.set_catalog(products.clone());
        let mut seed: u64 = 0x2545_f491;

        for _ in 0..500 {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let pick = usize::try_from((seed >> 33) % 6).unwrap();
            let target = &products[pick];
            if (seed >> 20) & 1 == 0 {
                state.add_to_basket(target).unwrap();
            } else {
                state.remove_from_basket(&target.id);
            }

            let ids = state.basket_ids();
            let mut unique = ids.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), ids.len(), "basket holds duplicates");

            let expected: Price = state.basket().iter().filter_map(|p| p.price).sum();
            assert_eq!(state.total(), expected);
            assert_eq!(ids.len(), state.basket_len());
        }
    }

    #[test]
    fn test_clear_basket() {
        let mut state = filled_state();
        state.clear_basket();
        assert!(state.take_changes().is_empty());

        state.add_to_basket(&product("a", Some(100))).unwrap();
        state.take_changes();
        state.clear_basket();
        assert_eq!(state.basket_len(), 0);
        assert_eq!(state.total(), Price::ZERO);
        assert_eq!(state.take_changes(), vec![Event::BasketChanged]);
    }

    #[test]
    fn test_preview() {
        let mut state = filled_state();
        state.set_preview(&"b".into()).unwrap();
        assert_eq!(state.preview().unwrap().id.as_str(), "b");
        assert_eq!(
            state.take_changes(),
            vec![Event::PreviewChanged("b".into())]
        );
        assert_eq!(
            state.set_preview(&"zzz".into()),
            Err(StateError::UnknownProduct("zzz".into()))
        );
    }

    #[test]
    fn test_order_validation_replaces_errors() {
        let mut state = filled_state();
        state.set_contact_field(OrderField::Email, "nope");
        assert!(state.form_errors().get(OrderField::Email).is_some());

        state.set_order_field(OrderField::Address, "Main St 1");
        let errors = state.form_errors();
        assert_eq!(errors.get(OrderField::Payment), Some(PAYMENT_REQUIRED));
        assert_eq!(errors.get(OrderField::Address), None);
        // The delivery pass does not carry contact errors over.
        assert_eq!(errors.get(OrderField::Email), None);

        state.set_order_field(OrderField::Payment, "card");
        assert!(state.form_errors().is_empty());
        assert_eq!(state.order_draft().payment, Some(PaymentMethod::Card));

        let changes = state.take_changes();
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[2], Event::ErrorsChanged(FormErrors::new()));
    }

    #[test]
    fn test_validate_returns_step_validity() {
        let mut state = filled_state();
        assert!(!state.validate_order());
        let errors = state.form_errors().clone();
        assert_eq!(errors.get(OrderField::Address), Some(ADDRESS_REQUIRED));
        assert_eq!(errors.len(), 2);

        state.set_contact_field(OrderField::Email, "buyer@example.com");
        state.set_contact_field(OrderField::Phone, "+7 (999) 123-45-67");
        assert!(state.validate_contacts());
    }

    #[test]
    fn test_blank_address_is_invalid() {
        let mut state = filled_state();
        state.set_order_field(OrderField::Payment, "cash");
        state.set_order_field(OrderField::Address, "   ");
        assert_eq!(
            state.form_errors().messages_for(&OrderField::DELIVERY),
            vec![ADDRESS_REQUIRED]
        );
    }

    #[test]
    fn test_order_requires_items_and_valid_draft() {
        let mut state = filled_state();
        assert_eq!(state.order(), Err(StateError::EmptyBasket));

        state.add_to_basket(&product("a", Some(100))).unwrap();
        state.add_to_basket(&product("b", Some(200))).unwrap();
        let Err(StateError::Incomplete(errors)) = state.order() else {
            panic!("expected incomplete order");
        };
        assert_eq!(errors.len(), 4);

        state.set_order_field(OrderField::Payment, "cash");
        state.set_order_field(OrderField::Address, " Main St 1 ");
        state.set_contact_field(OrderField::Email, "buyer@example.com");
        state.set_contact_field(OrderField::Phone, "+7 999 123 45 67");

        let order = state.order().unwrap();
        assert_eq!(order.payment, PaymentMethod::Cash);
        assert_eq!(order.address, "Main St 1");
        assert_eq!(order.total, Price::from_units(300));
        assert_eq!(order.items, vec![ProductId::new("a"), ProductId::new("b")]);
    }

    #[test]
    fn test_reset_order() {
        let mut state = filled_state();
        state.set_order_field(OrderField::Address, "Main St 1");
        state.reset_order();
        assert_eq!(state.order_draft(), &OrderDraft::default());
        assert!(state.form_errors().is_empty());
    }

    #[test]
    fn test_draft_value_round_trips_payment_name() {
        let mut draft = OrderDraft::default();
        draft.assign(OrderField::Payment, "online");
        assert_eq!(draft.value(OrderField::Payment), "card");
        draft.assign(OrderField::Payment, "barter");
        assert_eq!(draft.payment, None);
    }

    #[test]
    fn test_form_errors_display() {
        let mut errors = FormErrors::new();
        errors.insert(OrderField::Phone, "Phone is required");
        errors.insert(OrderField::Email, "Email is required");
        assert_eq!(errors.to_string(), "Email is required; Phone is required");
    }
}
