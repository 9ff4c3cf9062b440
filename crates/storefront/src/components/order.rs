//! Delivery step: payment method buttons and the address input.

use web_larek_core::{OrderField, PaymentMethod};

use super::form::{Form, FormState};
use super::{Component, ensure_all, ensure_element};
use crate::dom::template::names;
use crate::dom::{Document, DomError, DomEventType, Listener, NodeId};
use crate::events::FormName;

/// Class marking the selected payment button.
pub const ACTIVE_PAYMENT_CLASS: &str = "button_alt-active";

/// What the delivery form shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryModel {
    pub payment: Option<PaymentMethod>,
    pub address: String,
    pub form: FormState,
}

#[derive(Debug, Clone)]
pub struct OrderForm {
    form: Form,
    payment_buttons: Vec<NodeId>,
    address: NodeId,
}

impl OrderForm {
    /// Clone the order template and mount it.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] if the template, the payment buttons, or the
    /// address input is missing.
    pub fn create(doc: &mut Document) -> Result<Self, DomError> {
        let root = doc.clone_template(names::ORDER)?;
        let form = Form::mount(doc, root, FormName::Order)?;
        let payment_buttons = ensure_all(doc, root, ".button_alt")?;
        for &button in &payment_buttons {
            doc.set_listener(button, DomEventType::Click, Listener::SelectPayment);
        }
        let address = ensure_element(doc, root, "input[name=address]")?;
        Ok(Self {
            form,
            payment_buttons,
            address,
        })
    }

    #[must_use]
    pub const fn form(&self) -> &Form {
        &self.form
    }

    #[must_use]
    pub const fn address_input(&self) -> NodeId {
        self.address
    }

    /// The button selecting `method`.
    #[must_use]
    pub fn payment_button(&self, doc: &Document, method: PaymentMethod) -> Option<NodeId> {
        self.payment_buttons
            .iter()
            .copied()
            .find(|&b| doc.attribute(b, "name") == Some(method.button_name()))
    }

    /// Highlight the button of `payment`; `None` clears the highlight.
    pub fn set_payment(&self, doc: &mut Document, payment: Option<PaymentMethod>) {
        let active = payment.map(PaymentMethod::button_name);
        for &button in &self.payment_buttons {
            let on = active.is_some() && doc.attribute(button, "name") == active;
            doc.toggle_class(button, ACTIVE_PAYMENT_CLASS, Some(on));
        }
    }

    pub fn set_address(&self, doc: &mut Document, address: &str) {
        doc.set_value(self.address, address);
    }
}

impl Component for OrderForm {
    type Model = DeliveryModel;

    fn root(&self) -> NodeId {
        self.form.root()
    }

    fn render(&self, doc: &mut Document, model: &DeliveryModel) -> NodeId {
        self.set_payment(doc, model.payment);
        self.form
            .set_input_value(doc, OrderField::Address.as_str(), &model.address);
        self.form.render(doc, &model.form)
    }
}
