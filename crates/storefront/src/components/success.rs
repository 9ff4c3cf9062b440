//! Order confirmation.

use web_larek_core::Price;

use super::{Component, ensure_element};
use crate::dom::template::names;
use crate::dom::{Document, DomError, DomEventType, Listener, NodeId};
use crate::events::Event;

#[derive(Debug, Clone, Copy)]
pub struct Success {
    root: NodeId,
    description: NodeId,
    close: NodeId,
}

impl Success {
    /// Clone the success template and mount it.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] if the template or one of its parts is missing.
    pub fn create(doc: &mut Document) -> Result<Self, DomError> {
        let root = doc.clone_template(names::SUCCESS)?;
        let close = ensure_element(doc, root, ".order-success__close")?;
        doc.set_listener(close, DomEventType::Click, Listener::Emit(Event::SuccessClosed));
        Ok(Self {
            root,
            description: ensure_element(doc, root, ".order-success__description")?,
            close,
        })
    }

    #[must_use]
    pub const fn description(&self) -> NodeId {
        self.description
    }

    #[must_use]
    pub const fn close_button(&self) -> NodeId {
        self.close
    }

    pub fn set_total(&self, doc: &mut Document, total: Price) {
        doc.set_text(self.description, &format!("Charged: {total}"));
    }
}

impl Component for Success {
    type Model = Price;

    fn root(&self) -> NodeId {
        self.root
    }

    fn render(&self, doc: &mut Document, total: &Price) -> NodeId {
        self.set_total(doc, *total);
        self.root
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dom::template;

    #[test]
    fn test_shows_charged_total() {
        let mut doc = Document::new();
        template::install(&mut doc);
        let success = Success::create(&mut doc).unwrap();
        success.render(&mut doc, &Price::from_units(12_300));
        assert_eq!(doc.text(success.description()), "Charged: 12 300 synapses");
        assert_eq!(
            doc.listeners(success.close_button(), DomEventType::Click),
            vec![Listener::Emit(Event::SuccessClosed)]
        );
    }
}
