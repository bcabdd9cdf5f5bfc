use osmerion_properties::ChangeListener;
use std::sync::{Arc, Mutex};

/// A listener that records every `(old, new)` pair it sees, plus a function that drains the record
#[allow(unused)]
pub fn change_watcher<T: Clone + Send + 'static>() -> (ChangeListener<T>, Box<dyn Fn() -> Vec<(T, T)> + Send + Sync>) {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let watcher = {
        let changes = changes.clone();
        ChangeListener::new(move |_, old: &T, new: &T| {
            changes.lock().unwrap().push((old.clone(), new.clone()));
        })
    };

    let check = Box::new(move || {
        let changes: Vec<(T, T)> = changes.lock().unwrap().drain(..).collect();
        changes
    });

    (watcher, check)
}

/// A listener that appends `name` to a shared log, for checking dispatch order
#[allow(unused)]
pub fn tagged<T: 'static>(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> ChangeListener<T> {
    let log = log.clone();
    ChangeListener::new(move |_, _, _| log.lock().unwrap().push(name))
}
