//! Page rendering.
//!
//! # Usage
//!
//! ```bash
//! # The catalog page
//! larek render > page.html
//!
//! # With a product in the basket and the basket open
//! larek render --add c101ab44-ed99-4a54-990d-47aa2bb4e7d9 --open-basket
//! ```

use web_larek_storefront::{LarekApi, Storefront};

use super::add_item;

/// Load the catalog, fill the basket and print the page HTML.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched or a product cannot be
/// added.
pub async fn page(
    api: &impl LarekApi,
    add: &[String],
    open_basket: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = Storefront::new()?;
    store.load_catalog(api).await?;

    for id in add {
        add_item(&mut store, id)?;
    }
    if open_basket {
        let button = store.views().page.basket_button();
        store.click(button);
    }

    let html = store.render_html();
    #[allow(clippy::print_stdout)]
    {
        println!("{html}");
    }
    Ok(())
}
