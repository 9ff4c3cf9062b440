//! Subcommands.
//!
//! Every command drives a [`Storefront`] the way a shopper would: clicks and
//! typed input, never direct state mutation.

pub mod catalog;
pub mod checkout;
pub mod render;

use web_larek_core::ProductId;
use web_larek_storefront::Storefront;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Product {0} is not for sale")]
    NotForSale(String),

    #[error("Checkout stopped at the {step} step: {reason}")]
    Stalled { step: &'static str, reason: String },

    #[error("Order rejected: {0}")]
    Rejected(String),
}

/// Put a product in the basket through its catalog card and preview.
///
/// Products already in the basket are skipped.
///
/// # Errors
///
/// Returns [`CliError::UnknownProduct`] if the id is not in the catalog and
/// [`CliError::NotForSale`] if the preview would not let it be bought.
pub fn add_item(store: &mut Storefront, id: &str) -> Result<(), CliError> {
    let product_id = ProductId::new(id);
    if store.state().contains(&product_id) {
        tracing::debug!(product = id, "already in basket");
        return Ok(());
    }

    let index = store
        .state()
        .catalog()
        .iter()
        .position(|p| p.id == product_id)
        .ok_or_else(|| CliError::UnknownProduct(id.to_string()))?;
    let card = store
        .document()
        .children(store.views().page.gallery())
        .get(index)
        .copied()
        .ok_or_else(|| CliError::UnknownProduct(id.to_string()))?;

    store.click(card);
    let buy = store.views().preview.button();
    store.click(buy);

    if !store.state().contains(&product_id) {
        store.close_modal();
        return Err(CliError::NotForSale(id.to_string()));
    }
    tracing::info!(product = id, "added to basket");
    Ok(())
}
