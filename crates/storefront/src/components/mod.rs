//! View components.
//!
//! Each component owns one subtree of the [`Document`], finds its parts when
//! it is mounted and patches them through typed setters. Interactions are
//! wired as [`Listener`](crate::dom::Listener)s that publish bus events;
//! components never touch [`AppState`](crate::state::AppState).

mod basket;
mod card;
mod contacts;
mod form;
mod modal;
mod order;
mod page;
mod success;

pub use basket::{Basket, BasketModel};
pub use card::{
    BUY_LABEL, BasketCard, BasketItem, Card, CatalogCard, PreviewCard, PreviewModel, REMOVE_LABEL,
};
pub use contacts::{ContactsForm, ContactsModel};
pub use form::{Form, FormState};
pub use modal::{ACTIVE_CLASS as MODAL_ACTIVE_CLASS, Modal};
pub use order::{ACTIVE_PAYMENT_CLASS, DeliveryModel, OrderForm};
pub use page::{LOCKED_CLASS, Page, PageModel};
pub use success::Success;

use crate::dom::{Document, DomError, NodeId};

/// A mounted view over a typed model.
pub trait Component {
    type Model;

    /// Root element of the component's subtree.
    fn root(&self) -> NodeId;

    /// Apply `model` to the subtree and return the root.
    fn render(&self, doc: &mut Document, model: &Self::Model) -> NodeId;
}

/// Find exactly one element under `root`.
///
/// More than one match is tolerated: the first wins and a warning is logged.
///
/// # Errors
///
/// Returns [`DomError::NotFound`] if nothing matches, or
/// [`DomError::InvalidSelector`] if the selector does not parse.
pub fn ensure_element(doc: &Document, root: NodeId, selector: &str) -> Result<NodeId, DomError> {
    let matches = doc.query_selector_all(root, selector)?;
    if matches.len() > 1 {
        tracing::warn!(
            selector,
            count = matches.len(),
            "selector matched several elements, using the first"
        );
    }
    matches.into_iter().next().ok_or_else(|| DomError::NotFound {
        selector: selector.to_string(),
    })
}

/// Find every element under `root` matching `selector`, requiring at least
/// one.
///
/// # Errors
///
/// Returns [`DomError::NotFound`] if nothing matches, or
/// [`DomError::InvalidSelector`] if the selector does not parse.
pub fn ensure_all(doc: &Document, root: NodeId, selector: &str) -> Result<Vec<NodeId>, DomError> {
    let matches = doc.query_selector_all(root, selector)?;
    if matches.is_empty() {
        return Err(DomError::NotFound {
            selector: selector.to_string(),
        });
    }
    Ok(matches)
}

/// Optional part: `None` when nothing matches.
fn optional_element(
    doc: &Document,
    root: NodeId,
    selector: &str,
) -> Result<Option<NodeId>, DomError> {
    doc.query_selector(root, selector)
}
