//! Shared form behaviour: field input, submit, validity and error text.

use super::{Component, ensure_element};
use crate::dom::{Document, DomError, DomEventType, Listener, NodeId};
use crate::events::FormName;

/// Validity and messages shown by a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl FormState {
    #[must_use]
    pub fn new(valid: bool, errors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            valid,
            errors: errors.into_iter().map(Into::into).collect(),
        }
    }
}

/// A `<form>` with a submit button and an error container.
///
/// Every `input` inside publishes a field change for this form, and
/// submitting publishes the form's submit event.
#[derive(Debug, Clone, Copy)]
pub struct Form {
    root: NodeId,
    name: FormName,
    submit: NodeId,
    errors: NodeId,
}

impl Form {
    /// Mount `root` as form `name` and attach its listeners.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotFound`] if the submit button or the error
    /// container is missing.
    pub fn mount(doc: &mut Document, root: NodeId, name: FormName) -> Result<Self, DomError> {
        let submit = ensure_element(doc, root, "button[type=submit]")?;
        let errors = ensure_element(doc, root, ".form__errors")?;
        doc.set_listener(root, DomEventType::Input, Listener::FieldInput(name));
        doc.set_listener(root, DomEventType::Submit, Listener::Emit(name.submit_event()));
        Ok(Self {
            root,
            name,
            submit,
            errors,
        })
    }

    #[must_use]
    pub const fn name(&self) -> FormName {
        self.name
    }

    #[must_use]
    pub const fn submit_button(&self) -> NodeId {
        self.submit
    }

    #[must_use]
    pub const fn errors(&self) -> NodeId {
        self.errors
    }

    /// Enable or disable the submit button.
    pub fn set_valid(&self, doc: &mut Document, valid: bool) {
        doc.set_disabled(self.submit, !valid);
    }

    /// Show `messages`, joined, in the error container.
    pub fn set_errors<S: AsRef<str>>(&self, doc: &mut Document, messages: &[S]) {
        let text = messages
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("; ");
        doc.set_text(self.errors, &text);
    }

    /// The `<input name=..>` for `field`, if the form has one.
    #[must_use]
    pub fn input(&self, doc: &Document, field: &str) -> Option<NodeId> {
        doc.query_selector(self.root, &format!("input[name={field}]"))
            .ok()
            .flatten()
    }

    /// Set an input's value. Unknown fields are ignored.
    pub fn set_input_value(&self, doc: &mut Document, field: &str, value: &str) {
        if let Some(input) = self.input(doc, field) {
            doc.set_value(input, value);
        }
    }
}

impl Component for Form {
    type Model = FormState;

    fn root(&self) -> NodeId {
        self.root
    }

    fn render(&self, doc: &mut Document, state: &FormState) -> NodeId {
        self.set_valid(doc, state.valid);
        self.set_errors(doc, &state.errors);
        self.root
    }
}
