//! Storefront events and topics.
//!
//! Every interaction and state change is one variant of [`Event`]. Handlers
//! subscribe with a [`Topic`]: an exact [`EventKind`], a form-field pattern
//! (every field of a form, or one field), or everything.

mod bus;

use std::borrow::Cow;
use std::fmt;

pub use bus::{BusContext, EventBus, Handler, SubscriptionId, emit};

use web_larek_core::{OrderResult, PaymentMethod, ProductId};

use crate::state::FormErrors;

/// The two checkout forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormName {
    Order,
    Contacts,
}

impl FormName {
    /// The form's `name` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Contacts => "contacts",
        }
    }

    /// Event published when the form is submitted.
    #[must_use]
    pub const fn submit_event(self) -> Event {
        match self {
            Self::Order => Event::OrderSubmit,
            Self::Contacts => Event::ContactsSubmit,
        }
    }
}

impl fmt::Display for FormName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single input change inside a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub form: FormName,
    pub field: String,
    pub value: String,
}

/// Everything that can happen in the storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The catalog was replaced.
    CatalogChanged,
    /// A product was picked for the preview.
    PreviewChanged(ProductId),
    /// A catalog card was clicked.
    CardSelect(ProductId),
    /// "Buy" was clicked on a preview.
    CardAdd(ProductId),
    /// A product was taken out of the basket.
    CardRemove(ProductId),
    /// The header basket button was clicked.
    BasketOpened,
    /// Basket contents changed.
    BasketChanged,
    /// Checkout was started from the basket.
    OrderOpen,
    /// The delivery step was submitted.
    OrderSubmit,
    /// The contacts step was submitted.
    ContactsSubmit,
    /// Validation errors were recomputed.
    ErrorsChanged(FormErrors),
    /// A payment method button was clicked.
    PaymentChanged(PaymentMethod),
    /// A form input changed.
    FieldChanged(FieldChange),
    ModalOpen,
    ModalClose,
    /// The API accepted the order.
    OrderPlaced(OrderResult),
    /// The API rejected the order or could not be reached.
    OrderFailed(String),
    /// The confirmation was dismissed.
    SuccessClosed,
}

/// Payload-free discriminant of [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    CatalogChanged,
    PreviewChanged,
    CardSelect,
    CardAdd,
    CardRemove,
    BasketOpened,
    BasketChanged,
    OrderOpen,
    OrderSubmit,
    ContactsSubmit,
    ErrorsChanged,
    PaymentChanged,
    FieldChanged,
    ModalOpen,
    ModalClose,
    OrderPlaced,
    OrderFailed,
    SuccessClosed,
}

impl EventKind {
    /// Topic name, as used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CatalogChanged => "catalog-changed",
            Self::PreviewChanged => "preview-changed",
            Self::CardSelect => "card-select",
            Self::CardAdd => "card-add",
            Self::CardRemove => "card-remove",
            Self::BasketOpened => "basket-opened",
            Self::BasketChanged => "basket-changed",
            Self::OrderOpen => "order-open",
            Self::OrderSubmit => "order-submit",
            Self::ContactsSubmit => "contacts-submit",
            Self::ErrorsChanged => "errors-changed",
            Self::PaymentChanged => "payment-changed",
            Self::FieldChanged => "field-changed",
            Self::ModalOpen => "modal-open",
            Self::ModalClose => "modal-close",
            Self::OrderPlaced => "order-placed",
            Self::OrderFailed => "order-failed",
            Self::SuccessClosed => "success-closed",
        }
    }
}

impl Event {
    /// The event's kind.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::CatalogChanged => EventKind::CatalogChanged,
            Self::PreviewChanged(_) => EventKind::PreviewChanged,
            Self::CardSelect(_) => EventKind::CardSelect,
            Self::CardAdd(_) => EventKind::CardAdd,
            Self::CardRemove(_) => EventKind::CardRemove,
            Self::BasketOpened => EventKind::BasketOpened,
            Self::BasketChanged => EventKind::BasketChanged,
            Self::OrderOpen => EventKind::OrderOpen,
            Self::OrderSubmit => EventKind::OrderSubmit,
            Self::ContactsSubmit => EventKind::ContactsSubmit,
            Self::ErrorsChanged(_) => EventKind::ErrorsChanged,
            Self::PaymentChanged(_) => EventKind::PaymentChanged,
            Self::FieldChanged(_) => EventKind::FieldChanged,
            Self::ModalOpen => EventKind::ModalOpen,
            Self::ModalClose => EventKind::ModalClose,
            Self::OrderPlaced(_) => EventKind::OrderPlaced,
            Self::OrderFailed(_) => EventKind::OrderFailed,
            Self::SuccessClosed => EventKind::SuccessClosed,
        }
    }

    /// Topic string: the kind's name, or `<form>.<field>-change` for field
    /// changes.
    #[must_use]
    pub fn topic(&self) -> Cow<'static, str> {
        match self {
            Self::FieldChanged(change) => {
                Cow::Owned(format!("{}.{}-change", change.form, change.field))
            }
            other => Cow::Borrowed(other.kind().name()),
        }
    }
}

/// What a subscription listens to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Topic {
    /// Every event of one kind.
    Kind(EventKind),
    /// Field changes of one form; all fields when `field` is `None`.
    Field {
        form: FormName,
        field: Option<String>,
    },
    /// Every event.
    All,
}

impl Topic {
    /// Every field change of `form`.
    #[must_use]
    pub const fn form(form: FormName) -> Self {
        Self::Field { form, field: None }
    }

    /// Changes of one field of `form`.
    #[must_use]
    pub fn field(form: FormName, field: &str) -> Self {
        Self::Field {
            form,
            field: Some(field.to_string()),
        }
    }

    /// Whether an event is delivered to this topic.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        match (self, event) {
            (Self::All, _) => true,
            (Self::Kind(kind), event) => event.kind() == *kind,
            (Self::Field { form, field }, Event::FieldChanged(change)) => {
                change.form == *form && field.as_ref().is_none_or(|f| *f == change.field)
            }
            (Self::Field { .. }, _) => false,
        }
    }
}

impl From<EventKind> for Topic {
    fn from(kind: EventKind) -> Self {
        Self::Kind(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(form: FormName, field: &str) -> Event {
        Event::FieldChanged(FieldChange {
            form,
            field: field.to_string(),
            value: "x".to_string(),
        })
    }

    #[test]
    fn test_topic_names() {
        assert_eq!(Event::CatalogChanged.topic(), "catalog-changed");
        assert_eq!(Event::CardAdd(ProductId::new("a")).topic(), "card-add");
        assert_eq!(field(FormName::Order, "address").topic(), "order.address-change");
        assert_eq!(field(FormName::Contacts, "email").topic(), "contacts.email-change");
    }

    #[test]
    fn test_field_topic_patterns() {
        let any_order = Topic::form(FormName::Order);
        let address = Topic::field(FormName::Order, "address");

        assert!(any_order.matches(&field(FormName::Order, "address")));
        assert!(any_order.matches(&field(FormName::Order, "payment")));
        assert!(!any_order.matches(&field(FormName::Contacts, "email")));
        assert!(address.matches(&field(FormName::Order, "address")));
        assert!(!address.matches(&field(FormName::Order, "payment")));
        assert!(!address.matches(&Event::OrderSubmit));
    }

    #[test]
    fn test_kind_and_all_topics() {
        assert!(Topic::from(EventKind::ModalOpen).matches(&Event::ModalOpen));
        assert!(!Topic::from(EventKind::ModalOpen).matches(&Event::ModalClose));
        assert!(Topic::All.matches(&Event::ModalClose));
        assert!(Topic::All.matches(&field(FormName::Contacts, "phone")));
    }

    #[test]
    fn test_submit_events() {
        assert_eq!(FormName::Order.submit_event(), Event::OrderSubmit);
        assert_eq!(FormName::Contacts.submit_event(), Event::ContactsSubmit);
    }
}
