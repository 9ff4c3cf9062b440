//! Checkout from the basket to the success screen.

use web_larek_core::{PaymentMethod, Price, ProductId};
use web_larek_integration_tests::{
    ScriptedApi, buy, fill_contacts, fill_delivery, modal_content, open_store, sample_catalog,
    start_checkout,
};
use web_larek_storefront::Storefront;
use web_larek_storefront::components::{ACTIVE_PAYMENT_CLASS, Component, Form};
use web_larek_storefront::state::{ADDRESS_REQUIRED, PAYMENT_REQUIRED};

const EMAIL: &str = "buyer@example.com";
const PHONE: &str = "+7 999 123 45 67";

/// A store with `a` and `b` in the basket.
async fn store_with_basket(api: &ScriptedApi) -> Storefront {
    let mut store = open_store(api).await.expect("catalog loads");
    assert!(buy(&mut store, "a"));
    assert!(buy(&mut store, "b"));
    store
}

fn errors_text(store: &Storefront, form: &Form) -> String {
    store.document().text(form.errors())
}

// ============================================================================
// Happy path
// ============================================================================

#[tokio::test]
async fn test_full_checkout_posts_basket() {
    let api = ScriptedApi::new(sample_catalog());
    let mut store = store_with_basket(&api).await;

    start_checkout(&mut store);
    assert_eq!(modal_content(&store), Some(store.views().order.root()));

    fill_delivery(&mut store, "card", "  Main St 1  ");
    assert_eq!(modal_content(&store), Some(store.views().contacts.root()));

    fill_contacts(&mut store, EMAIL, PHONE);
    assert_eq!(store.pending_requests().len(), 1);
    assert_eq!(store.process_requests(&api).await, 1);

    let orders = api.orders();
    assert_eq!(orders.len(), 1);
    let order = orders.first().expect("one order");
    assert_eq!(order.items, vec![ProductId::new("a"), ProductId::new("b")]);
    assert_eq!(order.total, Price::from_units(300));
    assert_eq!(order.payment, PaymentMethod::Card);
    assert_eq!(order.address, "Main St 1");
    assert_eq!(order.email.as_str(), EMAIL);
    assert_eq!(order.phone.as_str(), PHONE);

    let wire = serde_json::to_value(order).expect("order serializes");
    assert_eq!(wire["payment"], "online");
    assert_eq!(wire["items"], serde_json::json!(["a", "b"]));

    let success = store.views().success;
    assert_eq!(modal_content(&store), Some(success.root()));
    assert_eq!(
        store.document().text(success.description()),
        "Charged: 300 synapses"
    );
    assert_eq!(store.state().basket_len(), 0);
    assert_eq!(store.document().text(store.views().page.counter()), "0");
    assert!(store.state().order_draft().address.is_empty());

    store.click(success.close_button());
    assert!(!store.is_modal_open());
}

#[tokio::test]
async fn test_checkout_with_cash() {
    let api = ScriptedApi::new(sample_catalog());
    let mut store = store_with_basket(&api).await;

    start_checkout(&mut store);
    fill_delivery(&mut store, "cash", "Main St 1");
    fill_contacts(&mut store, EMAIL, PHONE);
    store.process_requests(&api).await;

    let order = api.orders().pop().expect("order sent");
    assert_eq!(order.payment, PaymentMethod::Cash);
    let wire = serde_json::to_value(&order).expect("order serializes");
    assert_eq!(wire["payment"], "cash");
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_delivery_form_reports_missing_fields() {
    let api = ScriptedApi::new(sample_catalog());
    let mut store = store_with_basket(&api).await;
    start_checkout(&mut store);

    let order = store.views().order.clone();
    let form = *order.form();
    assert!(store.document().is_disabled(form.submit_button()));
    assert!(errors_text(&store, &form).is_empty(), "fresh form shows no errors");

    store.input(order.address_input(), "Main St 1");
    assert_eq!(errors_text(&store, &form), PAYMENT_REQUIRED);
    store.click(form.submit_button());
    assert_eq!(modal_content(&store), Some(order.root()), "disabled submit is inert");

    let cash = order
        .payment_button(store.document(), PaymentMethod::Cash)
        .expect("cash button");
    store.click(cash);
    assert!(store.document().has_class(cash, ACTIVE_PAYMENT_CLASS));
    assert!(errors_text(&store, &form).is_empty());
    assert!(!store.document().is_disabled(form.submit_button()));

    store.input(order.address_input(), "   ");
    assert_eq!(errors_text(&store, &form), ADDRESS_REQUIRED);
    assert!(store.document().is_disabled(form.submit_button()));
}

#[tokio::test]
async fn test_contacts_form_reports_bad_email() {
    let api = ScriptedApi::new(sample_catalog());
    let mut store = store_with_basket(&api).await;
    start_checkout(&mut store);
    fill_delivery(&mut store, "card", "Main St 1");

    let contacts = store.views().contacts;
    let form = *contacts.form();
    store.input(contacts.email_input(), "nope");
    store.input(contacts.phone_input(), PHONE);

    assert!(errors_text(&store, &form).contains("@"));
    assert!(store.document().is_disabled(form.submit_button()));
    store.click(form.submit_button());
    assert!(store.pending_requests().is_empty());

    store.input(contacts.email_input(), EMAIL);
    assert!(errors_text(&store, &form).is_empty());
    store.click(form.submit_button());
    assert_eq!(store.pending_requests().len(), 1);
}

#[tokio::test]
async fn test_repeated_submit_queues_one_order() {
    let api = ScriptedApi::new(sample_catalog());
    let mut store = store_with_basket(&api).await;
    start_checkout(&mut store);
    fill_delivery(&mut store, "card", "Main St 1");
    fill_contacts(&mut store, EMAIL, PHONE);

    let contacts = store.views().contacts;
    let form = *contacts.form();
    assert!(store.document().is_disabled(form.submit_button()));
    store.click(form.submit_button());
    store.submit(contacts.root());
    assert_eq!(store.pending_requests().len(), 1);

    store.process_requests(&api).await;
    assert_eq!(api.orders().len(), 1);
}

#[tokio::test]
async fn test_editing_contacts_while_order_pending_queues_nothing() {
    let api = ScriptedApi::new(sample_catalog());
    let mut store = store_with_basket(&api).await;
    start_checkout(&mut store);
    fill_delivery(&mut store, "card", "Main St 1");
    fill_contacts(&mut store, EMAIL, PHONE);
    assert!(store.order_pending());

    fill_contacts(&mut store, EMAIL, "+7 999 123 45 68");
    let contacts = store.views().contacts;
    let form = *contacts.form();
    assert!(
        store.document().is_disabled(form.submit_button()),
        "submit stays disabled while the order waits"
    );
    store.submit(contacts.root());
    assert_eq!(store.pending_requests().len(), 1);

    assert_eq!(store.process_requests(&api).await, 1);
    let orders = api.orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders.first().expect("one order").phone.as_str(), PHONE);
    assert!(!store.order_pending());
}

// ============================================================================
// Failure
// ============================================================================

#[tokio::test]
async fn test_rejected_order_keeps_basket() {
    let api = ScriptedApi::new(sample_catalog()).rejecting(400, "Wrong order total");
    let mut store = store_with_basket(&api).await;
    start_checkout(&mut store);
    fill_delivery(&mut store, "card", "Main St 1");
    fill_contacts(&mut store, EMAIL, PHONE);
    store.process_requests(&api).await;

    let contacts = store.views().contacts;
    assert_eq!(modal_content(&store), Some(contacts.root()));
    assert_eq!(
        errors_text(&store, contacts.form()),
        "Order failed: Wrong order total"
    );
    assert_eq!(store.state().basket_len(), 2);
    assert_eq!(store.state().order_draft().email, EMAIL);

    let submit = contacts.form().submit_button();
    assert!(!store.document().is_disabled(submit), "retry is possible");
    store.click(submit);
    assert_eq!(store.pending_requests().len(), 1);
}
