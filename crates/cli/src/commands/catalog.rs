//! Catalog listing.
//!
//! # Usage
//!
//! ```bash
//! larek catalog
//! larek catalog --json
//! ```

use web_larek_core::Price;
use web_larek_storefront::{LarekApi, Storefront};

/// Load the catalog and print it.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
pub async fn list(api: &impl LarekApi, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = Storefront::new()?;
    let count = store.load_catalog(api).await?;

    if json {
        let body = serde_json::to_string_pretty(store.state().catalog())?;
        #[allow(clippy::print_stdout)]
        {
            println!("{body}");
        }
        return Ok(());
    }

    #[allow(clippy::print_stdout)]
    {
        for product in store.state().catalog() {
            println!(
                "{:<38} {:>18}  {:<12} {}",
                product.id,
                Price::label(product.price),
                product.category,
                product.title
            );
        }
        println!();
        println!("{count} products");
    }
    Ok(())
}
