//! Bus topics as seen by an outside subscriber.

use std::cell::RefCell;
use std::rc::Rc;

use web_larek_integration_tests::{
    ScriptedApi, buy, fill_delivery, open_store, sample_catalog, start_checkout,
};
use web_larek_storefront::Storefront;
use web_larek_storefront::events::{Event, EventKind, FormName, Topic};

/// Record the topic of every event matching `topic`.
fn record(store: &mut Storefront, topic: impl Into<Topic>) -> Rc<RefCell<Vec<String>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    store.bus_mut().on(topic, move |_: &mut Storefront, event: &Event| {
        sink.borrow_mut().push(event.topic().into_owned());
    });
    log
}

#[tokio::test]
async fn test_field_topics_follow_form_and_field() {
    let api = ScriptedApi::new(sample_catalog());
    let mut store = open_store(&api).await.expect("catalog loads");
    assert!(buy(&mut store, "a"));

    let address = record(&mut store, Topic::field(FormName::Order, "address"));
    let contacts = record(&mut store, Topic::form(FormName::Contacts));

    start_checkout(&mut store);
    fill_delivery(&mut store, "card", "Main St 1");

    let views = store.views().contacts;
    store.input(views.email_input(), "buyer@example.com");
    store.input(views.phone_input(), "+7 999 123 45 67");

    assert_eq!(*address.borrow(), vec!["order.address-change".to_string()]);
    assert_eq!(
        *contacts.borrow(),
        vec![
            "contacts.email-change".to_string(),
            "contacts.phone-change".to_string()
        ]
    );
}

#[tokio::test]
async fn test_catalog_load_publishes_change() {
    let api = ScriptedApi::new(sample_catalog());
    let mut store = Storefront::new().expect("templates mount");
    let seen = record(&mut store, Topic::All);

    store.load_catalog(&api).await.expect("catalog loads");
    assert_eq!(*seen.borrow(), vec!["catalog-changed".to_string()]);
}

#[tokio::test]
async fn test_unsubscribed_handler_is_silent() {
    let api = ScriptedApi::new(sample_catalog());
    let mut store = open_store(&api).await.expect("catalog loads");

    let hits = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&hits);
    let id = store
        .bus_mut()
        .on(EventKind::BasketChanged, move |_: &mut Storefront, _: &Event| {
            *counter.borrow_mut() += 1;
        });

    assert!(buy(&mut store, "a"));
    assert_eq!(*hits.borrow(), 1);

    assert!(store.bus_mut().off(id));
    assert!(buy(&mut store, "b"));
    assert_eq!(*hits.borrow(), 1);
    assert_eq!(store.state().basket_len(), 2);
}

#[tokio::test]
async fn test_emitted_event_reaches_storefront_handlers() {
    let api = ScriptedApi::new(sample_catalog());
    let mut store = open_store(&api).await.expect("catalog loads");

    store.emit(&Event::BasketOpened);
    assert!(store.is_modal_open());
    store.emit(&Event::ModalClose);
    assert!(!store.views().page.is_locked(store.document()));
}
