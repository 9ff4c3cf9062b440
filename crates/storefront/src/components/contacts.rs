//! Contacts step: email and phone.

use web_larek_core::OrderField;

use super::form::{Form, FormState};
use super::{Component, ensure_element};
use crate::dom::template::names;
use crate::dom::{Document, DomError, NodeId};
use crate::events::FormName;

/// What the contacts form shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactsModel {
    pub email: String,
    pub phone: String,
    pub form: FormState,
}

#[derive(Debug, Clone, Copy)]
pub struct ContactsForm {
    form: Form,
    email: NodeId,
    phone: NodeId,
}

impl ContactsForm {
    /// Clone the contacts template and mount it.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] if the template or one of the inputs is missing.
    pub fn create(doc: &mut Document) -> Result<Self, DomError> {
        let root = doc.clone_template(names::CONTACTS)?;
        let form = Form::mount(doc, root, FormName::Contacts)?;
        Ok(Self {
            form,
            email: ensure_element(doc, root, "input[name=email]")?,
            phone: ensure_element(doc, root, "input[name=phone]")?,
        })
    }

    #[must_use]
    pub const fn form(&self) -> &Form {
        &self.form
    }

    #[must_use]
    pub const fn email_input(&self) -> NodeId {
        self.email
    }

    #[must_use]
    pub const fn phone_input(&self) -> NodeId {
        self.phone
    }
}

impl Component for ContactsForm {
    type Model = ContactsModel;

    fn root(&self) -> NodeId {
        self.form.root()
    }

    fn render(&self, doc: &mut Document, model: &ContactsModel) -> NodeId {
        self.form
            .set_input_value(doc, OrderField::Email.as_str(), &model.email);
        self.form
            .set_input_value(doc, OrderField::Phone.as_str(), &model.phone);
        self.form.render(doc, &model.form)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dom::template;

    #[test]
    fn test_render_contacts() {
        let mut doc = Document::new();
        template::install(&mut doc);
        let contacts = ContactsForm::create(&mut doc).unwrap();
        contacts.render(
            &mut doc,
            &ContactsModel {
                email: "buyer@example.com".to_string(),
                phone: String::new(),
                form: FormState::new(false, ["Phone is required"]),
            },
        );
        assert_eq!(doc.value(contacts.email_input()), "buyer@example.com");
        assert_eq!(doc.value(contacts.phone_input()), "");
        assert_eq!(doc.text(contacts.form().errors()), "Phone is required");
    }
}
