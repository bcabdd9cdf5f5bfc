mod common;
use common::{change_watcher, tagged};
use osmerion_properties::*;
use std::sync::{Arc, Mutex};
use tokio_test::{assert_err, assert_ok};

#[test]
fn test_clamping_property() {
    let property = Property::with_validator(0, |v: i32| v.clamp(0, 100));
    let (watcher, check) = change_watcher();
    property.add_listener(watcher);

    assert_eq!(assert_ok!(property.set(150)), 0);
    assert_eq!(property.get(), 100);
    assert_eq!(check(), [(0, 100)]);

    // same validated value: no notification, previous value returned
    assert_eq!(assert_ok!(property.set(100)), 100);
    assert_eq!(assert_ok!(property.set(250)), 100);
    assert!(check().is_empty());
}

#[test]
fn test_set_returns_previous_value() {
    let property = Property::new("a".to_string());
    assert_eq!(property.set("b".to_string()).unwrap(), "a");
    assert_eq!(property.set("c".to_string()).unwrap(), "b");
    assert_eq!(property.set("c".to_string()).unwrap(), "c");
    assert_eq!(property.get(), "c");
}

#[test]
fn test_repeated_set_notifies_once() {
    let property = Property::new(1.5f64);
    let (watcher, check) = change_watcher();
    property.add_listener(watcher);

    property.set(2.5).unwrap();
    property.set(2.5).unwrap();
    assert_eq!(check(), [(1.5, 2.5)]);
}

#[test]
fn test_initial_value_is_not_validated() {
    let property = Property::with_validator(500, |v: i32| v.clamp(0, 100));
    assert_eq!(property.get(), 500);

    property.set(500).unwrap();
    assert_eq!(property.get(), 100);
}

#[test]
fn test_default_values() {
    assert!(!BooleanProperty::default().get());
    assert_eq!(IntProperty::default().get(), 0);
    assert_eq!(CharProperty::default().get(), 0u16);
    assert_eq!(DoubleProperty::default().get(), 0.0);
    assert_eq!(ObjectProperty::<String>::default().get(), None);
    assert_eq!(LongProperty::initial_value(), 0);
}

#[test]
fn test_listeners_notified_in_order_including_duplicates() {
    let property = Property::new(0);
    let log = Arc::new(Mutex::new(Vec::new()));
    let first = tagged(&log, "first");
    property.add_listener(first.clone());
    property.add_listener(tagged(&log, "second"));
    property.add_listener(first.clone());

    property.set(1).unwrap();
    assert_eq!(*log.lock().unwrap(), ["first", "second", "first"]);
    log.lock().unwrap().clear();

    // removes one registration only
    property.remove_listener(&first).unwrap();
    property.set(2).unwrap();
    assert_eq!(*log.lock().unwrap(), ["second", "first"]);
}

#[test]
fn test_remove_missing_listener_fails() {
    let property = Property::new(0);
    let (watcher, _check) = change_watcher::<i32>();

    assert!(matches!(property.remove_listener(&watcher), Err(PropertyError::MissingListener)));

    property.add_listener(watcher.clone());
    assert_ok!(property.remove_listener(&watcher));
    assert!(matches!(property.remove_listener(&watcher), Err(PropertyError::MissingListener)));
}

#[test]
fn test_removed_listener_is_not_notified() {
    let property = Property::new(0);
    let (watcher, check) = change_watcher();
    property.add_listener(watcher.clone());
    property.set(1).unwrap();
    property.remove_listener(&watcher).unwrap();
    property.set(2).unwrap();
    assert_eq!(check(), [(0, 1)]);
}

#[test]
fn test_listener_sees_observable_and_new_value() {
    let property = Property::new(0);
    let seen = Arc::new(Mutex::new(Vec::new()));
    {
        let seen = seen.clone();
        property.add_listener(ChangeListener::new(move |observable, _, new| {
            // the stored value is already updated when listeners run
            seen.lock().unwrap().push((observable.get(), *new));
        }));
    }
    property.set(7).unwrap();
    assert_eq!(*seen.lock().unwrap(), [(7, 7)]);
}

#[test]
fn test_failing_listener_aborts_round_and_keeps_value() {
    let property = Property::new(0);
    let log = Arc::new(Mutex::new(Vec::new()));
    property.add_listener(tagged(&log, "before"));
    property.add_listener(ChangeListener::try_new(|_, _, new: &i32| if *new > 5 { Err("too large") } else { Ok(()) }));
    property.add_listener(tagged(&log, "after"));

    let err = assert_err!(property.set(10));
    assert!(matches!(err, PropertyError::Listener(_)));
    assert_eq!(err.to_string(), "change listener failed: too large");
    assert_eq!(*log.lock().unwrap(), ["before"]);
    // the value was stored before dispatch
    assert_eq!(property.get(), 10);
}

#[test]
fn test_fallible_validator_rejects() {
    let property = Property::with_fallible_validator(1u32, |v: u32| if v == 0 { Err("zero is not allowed") } else { Ok(v) });
    let (watcher, check) = change_watcher();
    property.add_listener(watcher);

    let err = assert_err!(property.set(0));
    assert!(matches!(err, PropertyError::Validation(_)));
    assert_eq!(property.get(), 1);
    assert!(check().is_empty());

    assert_eq!(assert_ok!(property.set(3)), 1);
    assert_eq!(check(), [(1, 3)]);
}

#[test]
fn test_reentrant_listener() {
    let property = Property::new(0);
    let mirror = Property::new(0);
    {
        let mirror = mirror.clone();
        property.add_listener(ChangeListener::try_new(move |observable, _, _| mirror.set(observable.get() * 2).map(|_| ())));
    }
    property.set(21).unwrap();
    assert_eq!(mirror.get(), 42);
}

#[test]
fn test_clones_share_state() {
    let property = Property::new(1);
    let handle = property.clone();
    let (watcher, check) = change_watcher();
    handle.add_listener(watcher);

    property.set(2).unwrap();
    assert_eq!(handle.get(), 2);
    assert_eq!(check(), [(1, 2)]);
    assert_eq!(property.observable_id(), handle.observable_id());
}

#[test]
fn test_nan_always_counts_as_a_change() {
    let property = FloatProperty::new(f32::NAN);
    let (watcher, check) = change_watcher();
    property.add_listener(watcher);

    property.set(f32::NAN).unwrap();
    assert_eq!(check().len(), 1);
}

#[test]
fn test_reporter_sees_failures() {
    let failures = Arc::new(Mutex::new(Vec::new()));
    let reporter: Arc<dyn FailureReporter> = {
        let failures = failures.clone();
        Arc::new(move |failure: &PropertyError| failures.lock().unwrap().push(failure.to_string()))
    };
    let property = Property::builder(5i32).fallible_validator(|v: i32| if v < 0 { Err("negative") } else { Ok(v) }).reporter(reporter).build();

    assert_err!(property.set(-1));
    assert_ok!(property.set(1));
    assert_eq!(*failures.lock().unwrap(), ["validation failed: negative"]);
}

#[test]
fn test_tracing_reporter() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let property = Property::builder(0i32)
        .fallible_validator(|v: i32| if v > 10 { Err(format!("{v} is out of range")) } else { Ok(v) })
        .reporter(Arc::new(TracingReporter))
        .build();

    let err = assert_err!(property.set(11));
    assert_eq!(err.to_string(), "validation failed: 11 is out of range");
}

#[test]
fn test_display_and_debug() {
    let property = Property::new(3);
    assert_eq!(property.to_string(), "3");
    assert!(format!("{property:?}").contains("value: 3"));
}
