//! Bus handlers wiring state changes to views and interactions to state.

use web_larek_core::{OrderField, Product, ProductId};

use super::Storefront;
use crate::api::ApiRequest;
use crate::components::{
    BasketCard, BasketItem, BasketModel, CatalogCard, Component, ContactsModel, DeliveryModel,
    FormState, PreviewModel,
};
use crate::events::{Event, EventBus, EventKind, FormName, Topic};
use crate::state::AppState;

/// Subscribe every storefront handler, in the order they should run.
pub(super) fn register(bus: &mut EventBus<Storefront>) {
    bus.on(Topic::All, |_: &mut Storefront, event: &Event| {
        tracing::debug!(topic = %event.topic(), "event");
    });

    bus.on(EventKind::CatalogChanged, render_catalog);
    bus.on(EventKind::CardSelect, select_card);
    bus.on(EventKind::PreviewChanged, show_preview);
    bus.on(EventKind::CardAdd, add_to_basket);
    bus.on(EventKind::CardRemove, remove_from_basket);
    bus.on(EventKind::BasketChanged, render_basket);
    bus.on(EventKind::BasketOpened, open_basket);
    bus.on(EventKind::OrderOpen, open_order);
    bus.on(Topic::form(FormName::Order), change_order_field);
    bus.on(EventKind::PaymentChanged, change_payment);
    bus.on(EventKind::ErrorsChanged, render_errors);
    bus.on(EventKind::OrderSubmit, open_contacts);
    bus.on(Topic::form(FormName::Contacts), change_contact_field);
    bus.on(EventKind::ContactsSubmit, submit_order);
    bus.on(EventKind::OrderPlaced, show_success);
    bus.on(EventKind::OrderFailed, show_failure);
    bus.on(EventKind::SuccessClosed, |sf: &mut Storefront, _: &Event| sf.close_modal());
    bus.on(EventKind::ModalOpen, |sf: &mut Storefront, _: &Event| {
        sf.views.page.set_locked(&mut sf.doc, true);
    });
    bus.on(EventKind::ModalClose, |sf: &mut Storefront, _: &Event| {
        sf.views.page.set_locked(&mut sf.doc, false);
    });
}

fn render_catalog(sf: &mut Storefront, _: &Event) {
    let products: Vec<Product> = sf.state.catalog().to_vec();
    let mut cards = Vec::with_capacity(products.len());
    for product in &products {
        match CatalogCard::create(&mut sf.doc) {
            Ok(card) => cards.push(card.render(&mut sf.doc, product)),
            Err(e) => {
                tracing::error!(error = %e, product = %product.id, "cannot build catalog card");
            }
        }
    }
    sf.views.page.set_catalog(&mut sf.doc, &cards);
}

fn select_card(sf: &mut Storefront, event: &Event) {
    let Event::CardSelect(id) = event else { return };
    if let Err(e) = sf.update(|s| s.set_preview(id)) {
        tracing::warn!(error = %e, "cannot preview product");
    }
}

fn show_preview(sf: &mut Storefront, event: &Event) {
    let Event::PreviewChanged(id) = event else { return };
    let Some(product) = sf.state.product(id).cloned() else {
        return;
    };
    let model = PreviewModel {
        in_basket: sf.state.contains(id),
        product,
    };
    let root = sf.views.preview.render(&mut sf.doc, &model);
    sf.open_modal(root);
}

fn add_to_basket(sf: &mut Storefront, event: &Event) {
    let Event::CardAdd(id) = event else { return };
    let Some(product) = sf.state.product(id).cloned() else {
        tracing::warn!(product = %id, "cannot add unknown product");
        return;
    };
    if let Err(e) = sf.update(|s| s.add_to_basket(&product)) {
        tracing::warn!(error = %e, "cannot add product to basket");
        return;
    }
    sf.close_modal();
}

fn remove_from_basket(sf: &mut Storefront, event: &Event) {
    let Event::CardRemove(id) = event else { return };
    sf.update(|s| s.remove_from_basket(id));
    refresh_preview(sf, id);
}

/// Flip the preview's button if it is showing `id`.
fn refresh_preview(sf: &mut Storefront, id: &ProductId) {
    let preview = sf.views.preview;
    if sf.views.modal.current(&sf.doc) != Some(preview.root()) {
        return;
    }
    if let Some(product) = sf.state.preview().filter(|p| &p.id == id).cloned() {
        let in_basket = sf.state.contains(id);
        preview.set_in_basket(&mut sf.doc, &product, in_basket);
    }
}

fn render_basket(sf: &mut Storefront, _: &Event) {
    let items: Vec<Product> = sf.state.basket().to_vec();
    let mut rows = Vec::with_capacity(items.len());
    for (index, product) in items.into_iter().enumerate() {
        match BasketCard::create(&mut sf.doc) {
            Ok(row) => rows.push(row.render(
                &mut sf.doc,
                &BasketItem {
                    index: index + 1,
                    product,
                },
            )),
            Err(e) => tracing::error!(error = %e, "cannot build basket row"),
        }
    }
    let model = BasketModel {
        items: rows,
        total: sf.state.total(),
    };
    sf.views.basket.render(&mut sf.doc, &model);
    sf.views.page.set_counter(&mut sf.doc, sf.state.basket_len());
}

fn open_basket(sf: &mut Storefront, _: &Event) {
    let root = sf.views.basket.root();
    sf.open_modal(root);
}

fn open_order(sf: &mut Storefront, _: &Event) {
    if sf.state.basket_len() == 0 {
        tracing::debug!("checkout with an empty basket ignored");
        return;
    }
    let draft = sf.state.order_draft();
    let model = DeliveryModel {
        payment: draft.payment,
        address: draft.address.clone(),
        form: FormState::new(sf.state.delivery_errors().is_empty(), Vec::<String>::new()),
    };
    let root = sf.views.order.render(&mut sf.doc, &model);
    sf.open_modal(root);
}

fn change_order_field(sf: &mut Storefront, event: &Event) {
    let Event::FieldChanged(change) = event else { return };
    match change.field.parse::<OrderField>() {
        Ok(field) => sf.update(|s| s.set_order_field(field, &change.value)),
        Err(e) => tracing::debug!(error = %e, "ignoring order form input"),
    }
}

fn change_payment(sf: &mut Storefront, event: &Event) {
    let Event::PaymentChanged(method) = event else { return };
    sf.views.order.set_payment(&mut sf.doc, Some(*method));
    sf.update(|s| s.set_order_field(OrderField::Payment, method.button_name()));
}

fn render_errors(sf: &mut Storefront, event: &Event) {
    let Event::ErrorsChanged(errors) = event else { return };
    let order = sf.views.order.form();
    order.set_valid(&mut sf.doc, !errors.any_of(&OrderField::DELIVERY));
    order.set_errors(&mut sf.doc, &errors.messages_for(&OrderField::DELIVERY));

    // An order waiting to be sent keeps the contacts submit disabled.
    let contacts = sf.views.contacts.form();
    let ready = !errors.any_of(&OrderField::CONTACTS) && !sf.order_pending();
    contacts.set_valid(&mut sf.doc, ready);
    contacts.set_errors(&mut sf.doc, &errors.messages_for(&OrderField::CONTACTS));
}

fn open_contacts(sf: &mut Storefront, _: &Event) {
    if !sf.update(AppState::validate_order) {
        return;
    }
    let draft = sf.state.order_draft();
    let model = ContactsModel {
        email: draft.email.clone(),
        phone: draft.phone.clone(),
        form: FormState::new(
            sf.state.contact_errors().is_empty() && !sf.order_pending(),
            Vec::<String>::new(),
        ),
    };
    let root = sf.views.contacts.render(&mut sf.doc, &model);
    sf.open_modal(root);
}

fn change_contact_field(sf: &mut Storefront, event: &Event) {
    let Event::FieldChanged(change) = event else { return };
    match change.field.parse::<OrderField>() {
        Ok(field) => sf.update(|s| s.set_contact_field(field, &change.value)),
        Err(e) => tracing::debug!(error = %e, "ignoring contacts form input"),
    }
}

fn submit_order(sf: &mut Storefront, _: &Event) {
    if sf.order_pending() {
        tracing::debug!("order already pending, submit ignored");
        return;
    }
    let valid = sf.update(|s| {
        let delivery = s.validate_order();
        let contacts = s.validate_contacts();
        delivery && contacts
    });
    if !valid {
        return;
    }
    let contacts = *sf.views.contacts.form();
    match sf.state.order() {
        Ok(order) => {
            let (items, total) = (order.items.len(), order.total);
            if sf.queue(ApiRequest::SubmitOrder(order)) {
                tracing::info!(items, total = %total, "order queued");
            }
            contacts.set_valid(&mut sf.doc, false);
        }
        Err(e) => {
            tracing::warn!(error = %e, "order not ready");
            contacts.set_errors(&mut sf.doc, &[e.to_string()]);
        }
    }
}

fn show_success(sf: &mut Storefront, event: &Event) {
    let Event::OrderPlaced(result) = event else { return };
    sf.update(|s| {
        s.clear_basket();
        s.reset_order();
    });
    let root = sf.views.success.render(&mut sf.doc, &result.total);
    sf.open_modal(root);
}

fn show_failure(sf: &mut Storefront, event: &Event) {
    let Event::OrderFailed(message) = event else { return };
    tracing::error!(%message, "order failed");
    let contacts = *sf.views.contacts.form();
    contacts.set_errors(&mut sf.doc, &[format!("Order failed: {message}")]);
    contacts.set_valid(&mut sf.doc, sf.state.contact_errors().is_empty());
}
