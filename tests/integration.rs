//! Integration tests for the attribute store.

use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use watchman::{Attributes, Event, Operation, Subscriber, Watchman, CHANGE, REMEMBER, RESTORE};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn attrs(value: Value) -> Attributes {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

fn event_log() -> (Subscriber, Arc<Mutex<Vec<Event>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let subscriber = Subscriber::new(move |_, event, _| sink.lock().push(event.clone()));
    (subscriber, log)
}

// --- Realistic Workflow Tests ---

#[test]
fn test_form_editing_with_undo() {
    init_tracing();
    let mut form = Watchman::with_attributes(attrs(json!({"name": "", "email": ""})));
    let (log, events) = event_log();
    form.on(CHANGE, &log).on(REMEMBER, &log).on(RESTORE, &log);

    // Checkpoint before each edit
    form.remember_all(&[]).set("name", "Ada", &[]);
    form.remember_all(&[]).set("email", "ada@example.com", &[]);
    form.remember_all(&[]).set("name", "Ada L.", &[]);

    assert_eq!(form.snapshots().len(), 3);

    // Undo twice
    form.restore_all(&[]).restore_all(&[]);
    assert_eq!(form.get_all(), attrs(json!({"name": "Ada", "email": ""})));
    assert_eq!(form.snapshots().len(), 1);

    let kinds: Vec<String> = events.lock().iter().map(|e| e.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            "remember", "change", "remember", "change", "remember", "change", "restore",
            "restore"
        ]
    );
}

#[test]
fn test_per_property_undo_leaves_others_alone() {
    let mut doc = Watchman::new();
    doc.set("title", "Draft", &[]).set("body", "Hello", &[]);

    doc.remember("title", &[]).set("title", "Final", &[]);
    doc.set("body", "Hello, world", &[]);
    doc.restore("title", &[]);

    assert_eq!(doc.get("title"), Some(&json!("Draft")));
    assert_eq!(doc.get("body"), Some(&json!("Hello, world")));
}

#[test]
fn test_nested_property_history() {
    let mut store = Watchman::new();
    for i in 1..=3 {
        store.set("level", i, &[]).remember("level", &[]);
    }
    store.set("level", 99, &[]);

    assert_eq!(store.states("level"), vec![Some(json!(1)), Some(json!(2)), Some(json!(3))]);

    store.restore("level", &[]);
    assert_eq!(store.get("level"), Some(&json!(3)));
    store.restore("level", &[]).restore("level", &[]);
    assert_eq!(store.get("level"), Some(&json!(1)));

    // History exhausted
    store.restore("level", &[]);
    assert_eq!(store.get("level"), Some(&json!(1)));
}

#[test]
fn test_operations_as_events() {
    init_tracing();
    let mut cart = Watchman::with_attributes(attrs(json!({"items": []})));
    let (log, events) = event_log();

    cart.register(
        "add_item",
        Operation::new(|store, args| {
            let mut items = store
                .get("items")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            items.extend(args.iter().cloned());
            let count = items.len();
            store.set("items", Value::Array(items), &[]);
            json!(count)
        }),
    )
    .on("add_item", &log)
    .on(CHANGE, &log);

    assert_eq!(cart.invoke("add_item", &[json!("apple")]), Some(json!(1)));
    assert_eq!(
        cart.invoke("add_item", &[json!("pear"), json!("plum")]),
        Some(json!(3))
    );
    assert_eq!(cart.get("items"), Some(&json!(["apple", "pear", "plum"])));

    // The operation's own change fires before the operation event
    let events = events.lock();
    assert_eq!(events.len(), 4);
    assert!(events[0].is(CHANGE));
    assert_eq!(events[1], Event::named("add_item"));
}

#[test]
fn test_manual_trigger_with_record() {
    let mut store = Watchman::new();
    let (log, events) = event_log();
    store.on(CHANGE, &log);

    let synthetic = Event::change(Some("external".to_string()), json!("sync"));
    assert!(store.trigger(synthetic.clone(), &[]).is_some());

    // Manual triggers do not touch the attributes
    assert!(!store.contains("external"));
    assert_eq!(events.lock()[0], synthetic);
}

#[test]
fn test_extra_args_forwarded_everywhere() {
    let mut store = Watchman::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let collector = Subscriber::new(move |_, event, args| {
        sink.lock().push((event.kind.clone(), args.to_vec()));
    });

    store
        .on(CHANGE, &collector)
        .on(REMEMBER, &collector)
        .on(RESTORE, &collector);

    let origin = [json!({"origin": "test"})];
    store
        .set("a", 1, &origin)
        .set_many(attrs(json!({"b": 2})), &origin)
        .unset("a", &origin)
        .remember("b", &origin)
        .restore("b", &origin)
        .remember_all(&origin)
        .restore_all(&origin)
        .clear(&origin);

    let seen = seen.lock();
    assert_eq!(seen.len(), 8);
    assert!(seen.iter().all(|(_, args)| args.as_slice() == origin.as_slice()));
}

#[test]
fn test_subscriber_chain_reacts_reentrantly() {
    let mut store = Watchman::new();
    let derive_total = Subscriber::new(|store, event, _| {
        if matches!(event.prop.as_deref(), Some("price") | Some("qty")) {
            let price = store.get("price").and_then(Value::as_f64).unwrap_or(0.0);
            let qty = store.get("qty").and_then(Value::as_f64).unwrap_or(0.0);
            store.set("total", price * qty, &[]);
        }
    });

    store.on(CHANGE, &derive_total);
    store.set("price", 2.5, &[]).set("qty", 4, &[]);

    assert_eq!(store.get("total"), Some(&json!(10.0)));
}

#[test]
fn test_initial_state_scenario() {
    let store = Watchman::with_attributes(attrs(json!({"a": 1})));

    let mut copy = store.get_all();
    assert_eq!(copy, attrs(json!({"a": 1})));
    copy.insert("a".to_string(), json!(2));
    assert_eq!(store.get("a"), Some(&json!(1)));

    assert!(store.snapshots().is_empty());
}
