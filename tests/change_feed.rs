use import_dashboard_wasm::application::change_feed::ChangeFeed;
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn notifies_every_subscriber() {
    let feed = ChangeFeed::new();
    let hits = Rc::new(Cell::new(0));
    let first = Rc::clone(&hits);
    let second = Rc::clone(&hits);
    feed.subscribe(move || first.set(first.get() + 1));
    feed.subscribe(move || second.set(second.get() + 1));

    feed.notify();
    assert_eq!(hits.get(), 2);
    feed.notify();
    assert_eq!(hits.get(), 4);
}

#[test]
fn unsubscribe_detaches_exactly_one_listener() {
    let feed = ChangeFeed::new();
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    let handle = feed.subscribe(move || counter.set(counter.get() + 1));
    assert_eq!(feed.listener_count(), 1);

    assert!(feed.unsubscribe(handle));
    assert!(!feed.unsubscribe(handle));
    assert_eq!(feed.listener_count(), 0);

    feed.notify();
    assert_eq!(hits.get(), 0);
}

#[test]
fn handles_stay_distinct_across_subscriptions() {
    let feed = ChangeFeed::new();
    let first = feed.subscribe(|| {});
    let second = feed.subscribe(|| {});
    assert_ne!(first, second);
    assert!(feed.unsubscribe(first));
    assert_eq!(feed.listener_count(), 1);
    assert!(feed.unsubscribe(second));
}

#[test]
fn listeners_may_mutate_the_feed_during_delivery() {
    let feed = Rc::new(ChangeFeed::new());
    let feed_inside = Rc::clone(&feed);
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    feed.subscribe(move || {
        counter.set(counter.get() + 1);
        // A listener added mid-delivery must not fire in the same round
        feed_inside.subscribe(|| {});
    });

    feed.notify();
    assert_eq!(hits.get(), 1);
    assert_eq!(feed.listener_count(), 2);
}

#[test]
fn a_listener_may_detach_itself_during_delivery() {
    let feed = Rc::new(ChangeFeed::new());
    let hits = Rc::new(Cell::new(0));

    let feed_inside = Rc::clone(&feed);
    let counter = Rc::clone(&hits);
    let slot: Rc<Cell<Option<_>>> = Rc::new(Cell::new(None));
    let slot_inside = Rc::clone(&slot);
    let handle = feed.subscribe(move || {
        counter.set(counter.get() + 1);
        if let Some(own) = slot_inside.take() {
            feed_inside.unsubscribe(own);
        }
    });
    slot.set(Some(handle));

    feed.notify();
    feed.notify();
    assert_eq!(hits.get(), 1);
    assert_eq!(feed.listener_count(), 0);
}
