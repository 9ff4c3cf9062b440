//! Checkout.
//!
//! Walks basket, delivery and contacts the same way the page does, then
//! submits the queued order.
//!
//! # Usage
//!
//! ```bash
//! larek checkout --items 854cef69-976d-4c2a-a18c-2aa45046c390,c101ab44-ed99-4a54-990d-47aa2bb4e7d9 \
//!     --payment cash --address "Main St 1" \
//!     --email buyer@example.com --phone "+7 999 123 45 67"
//! ```

use web_larek_core::PaymentMethod;
use web_larek_storefront::api::ApiRequest;
use web_larek_storefront::components::{Component, Form};
use web_larek_storefront::dom::NodeId;
use web_larek_storefront::{LarekApi, Storefront};

use super::{CliError, add_item};

/// What the shopper types in.
#[derive(Debug, Clone)]
pub struct Details {
    pub items: Vec<String>,
    pub payment: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

/// Check out `details.items`. With `dry_run` the order is printed instead of
/// submitted.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched, a product cannot be
/// bought, a form rejects its input or the service rejects the order.
pub async fn run(
    api: &impl LarekApi,
    details: &Details,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let payment: PaymentMethod = details.payment.parse()?;

    let mut store = Storefront::new()?;
    store.load_catalog(api).await?;
    for id in &details.items {
        add_item(&mut store, id)?;
    }
    tracing::info!(
        items = store.state().basket_len(),
        total = %store.state().total(),
        "basket ready"
    );

    // Basket
    let basket_button = store.views().page.basket_button();
    store.click(basket_button);
    let checkout = store.views().basket.checkout_button();
    store.click(checkout);
    let order = store.views().order.clone();
    expect_step(&store, order.root(), "basket", None)?;

    // Delivery
    let payment_button = order
        .payment_button(store.document(), payment)
        .ok_or_else(|| CliError::Stalled {
            step: "delivery",
            reason: format!("no button for {payment}"),
        })?;
    store.click(payment_button);
    store.input(order.address_input(), &details.address);
    store.click(order.form().submit_button());
    let contacts = store.views().contacts;
    expect_step(&store, contacts.root(), "delivery", Some(order.form()))?;

    // Contacts
    store.input(contacts.email_input(), &details.email);
    store.input(contacts.phone_input(), &details.phone);
    store.click(contacts.form().submit_button());

    let Some(ApiRequest::SubmitOrder(queued)) = store.pending_requests().front().cloned() else {
        return Err(CliError::Stalled {
            step: "contacts",
            reason: form_errors(&store, contacts.form()),
        }
        .into());
    };

    if dry_run {
        let body = serde_json::to_string_pretty(&queued)?;
        #[allow(clippy::print_stdout)]
        {
            println!("{body}");
        }
        return Ok(());
    }

    store.process_requests(api).await;

    let success = store.views().success;
    if store.views().modal.current(store.document()) != Some(success.root()) {
        return Err(CliError::Rejected(form_errors(&store, contacts.form())).into());
    }
    let message = store.document().text(success.description());
    #[allow(clippy::print_stdout)]
    {
        println!("{message}");
    }
    Ok(())
}

/// Fail unless the modal now shows `next`.
fn expect_step(
    store: &Storefront,
    next: NodeId,
    step: &'static str,
    form: Option<&Form>,
) -> Result<(), CliError> {
    if store.views().modal.current(store.document()) == Some(next) {
        return Ok(());
    }
    let reason = form.map_or_else(
        || "the next form did not open".to_string(),
        |form| form_errors(store, form),
    );
    Err(CliError::Stalled { step, reason })
}

fn form_errors(store: &Storefront, form: &Form) -> String {
    let text = store.document().text(form.errors());
    if text.is_empty() {
        "form is not valid".to_string()
    } else {
        text
    }
}
