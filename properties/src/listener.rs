use std::sync::{Arc, PoisonError, RwLock, Weak};

use crate::{
    error::{BoxError, PropertyError},
    value::ObservableValue,
};

type Callback<T> = dyn Fn(&dyn ObservableValue<T>, &T, &T) -> Result<(), PropertyError> + Send + Sync + 'static;

/// A callback that is notified with `(observable, old_value, new_value)` whenever an observable changes.
///
/// Listeners are compared by identity: a clone of a listener is the same listener, two listeners built
/// from identical closures are not. Keep a clone around if you intend to remove it later.
pub struct ChangeListener<T>(Arc<Callback<T>>);

impl<T> Clone for ChangeListener<T> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> PartialEq for ChangeListener<T> {
    fn eq(&self, other: &Self) -> bool { std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0)) }
}

impl<T> Eq for ChangeListener<T> {}

impl<T> std::fmt::Debug for ChangeListener<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ChangeListener").field(&Arc::as_ptr(&self.0).cast::<()>()).finish()
    }
}

impl<T: 'static> ChangeListener<T> {
    /// Create a listener from an infallible callback
    pub fn new<F>(callback: F) -> Self
    where F: Fn(&dyn ObservableValue<T>, &T, &T) + Send + Sync + 'static {
        Self::raw(move |observable, old, new| {
            callback(observable, old, new);
            Ok(())
        })
    }

    /// Create a listener from a fallible callback.
    ///
    /// An error aborts the notification round it occurred in and is returned to whoever triggered
    /// the change, wrapped in [`PropertyError::Listener`].
    pub fn try_new<F, E>(callback: F) -> Self
    where
        F: Fn(&dyn ObservableValue<T>, &T, &T) -> Result<(), E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::raw(move |observable, old, new| callback(observable, old, new).map_err(PropertyError::listener))
    }

    /// Listener whose errors are already `PropertyError`s and must pass through untouched
    pub(crate) fn raw<F>(callback: F) -> Self
    where F: Fn(&dyn ObservableValue<T>, &T, &T) -> Result<(), PropertyError> + Send + Sync + 'static {
        Self(Arc::new(callback))
    }
}

impl<T> ChangeListener<T> {
    pub(crate) fn call(&self, observable: &dyn ObservableValue<T>, old: &T, new: &T) -> Result<(), PropertyError> {
        (self.0)(observable, old, new)
    }
}

/// Identifies the listener set of an observable. Read-only views share the id of the property they wrap.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ObservableId(usize);

impl std::fmt::Display for ObservableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{:#x}", self.0) }
}

type Listeners<T> = RwLock<Vec<ChangeListener<T>>>;

/// Ordered collection of change listeners. Duplicates are allowed and each registration is notified.
pub struct ListenerSet<T>(Arc<Listeners<T>>);

impl<T> Default for ListenerSet<T> {
    fn default() -> Self { Self::new() }
}

impl<T> std::fmt::Debug for ListenerSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSet").field("id", &self.id()).field("listeners", &read(&self.0).len()).finish()
    }
}

impl<T> ListenerSet<T> {
    pub fn new() -> Self { Self(Arc::new(RwLock::new(Vec::new()))) }

    pub fn id(&self) -> ObservableId { ObservableId(Arc::as_ptr(&self.0) as *const () as usize) }

    /// Get a listen-only reference to this set. Holders can register and remove listeners but not notify.
    pub fn reference(&self) -> ListenerRef<'_, T> { ListenerRef(self) }

    /// Notify every listener registered at the time of the call, in registration order.
    ///
    /// No lock is held while listeners run. The first failing listener ends the round.
    pub fn notify(&self, observable: &dyn ObservableValue<T>, old: &T, new: &T) -> Result<(), PropertyError> {
        let listeners = read(&self.0).clone();
        tracing::trace!(observable = %self.id(), listeners = listeners.len(), "notifying change listeners");
        for listener in &listeners {
            listener.call(observable, old, new)?;
        }
        Ok(())
    }
}

/// A listen-only reference to a [`ListenerSet`]
pub struct ListenerRef<'a, T>(&'a ListenerSet<T>);

impl<T> ListenerRef<'_, T> {
    /// Append a listener. The same listener may be added more than once.
    pub fn add(&self, listener: ChangeListener<T>) { write(&self.0.0).push(listener); }

    /// Remove the first registration of `listener`
    pub fn remove(&self, listener: &ChangeListener<T>) -> Result<(), PropertyError> { remove(&self.0.0, listener) }

    pub fn contains(&self, listener: &ChangeListener<T>) -> bool { read(&self.0.0).contains(listener) }

    pub fn len(&self) -> usize { read(&self.0.0).len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn id(&self) -> ObservableId { self.0.id() }

    /// A handle that does not keep the listener set alive
    pub fn downgrade(&self) -> WeakListenerSet<T> { WeakListenerSet(Arc::downgrade(&self.0.0)) }
}

/// Weak handle to a [`ListenerSet`]
pub struct WeakListenerSet<T>(Weak<Listeners<T>>);

impl<T> WeakListenerSet<T> {
    /// Remove the first registration of `listener`. Succeeds trivially when the set no longer exists,
    /// since its listeners went with it.
    pub fn remove(&self, listener: &ChangeListener<T>) -> Result<(), PropertyError> {
        match self.0.upgrade() {
            Some(listeners) => remove(&listeners, listener),
            None => Ok(()),
        }
    }

    pub fn id(&self) -> ObservableId { ObservableId(self.0.as_ptr() as *const () as usize) }
}

/// Keeps a listener registered with another observable's listener set and removes it on release or drop
pub(crate) struct ListenerGuard<T> {
    source: WeakListenerSet<T>,
    listener: Option<ChangeListener<T>>,
}

impl<T> ListenerGuard<T> {
    pub(crate) fn new(source: WeakListenerSet<T>, listener: ChangeListener<T>) -> Self { Self { source, listener: Some(listener) } }

    pub(crate) fn source_id(&self) -> ObservableId { self.source.id() }

    /// Remove the listener now, reporting a failed removal
    pub(crate) fn release(mut self) -> Result<(), PropertyError> {
        match self.listener.take() {
            Some(listener) => self.source.remove(&listener),
            None => Ok(()),
        }
    }
}

impl<T> Drop for ListenerGuard<T> {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take() {
            let _ = self.source.remove(&listener);
        }
    }
}

fn remove<T>(listeners: &Listeners<T>, listener: &ChangeListener<T>) -> Result<(), PropertyError> {
    let mut listeners = write(listeners);
    let index = listeners.iter().position(|l| l == listener).ok_or(PropertyError::MissingListener)?;
    listeners.remove(index);
    Ok(())
}

// Listener lists are only ever pushed to or spliced, so a poisoned lock still guards a valid Vec
fn read<T>(listeners: &Listeners<T>) -> std::sync::RwLockReadGuard<'_, Vec<ChangeListener<T>>> {
    listeners.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(listeners: &Listeners<T>) -> std::sync::RwLockWriteGuard<'_, Vec<ChangeListener<T>>> {
    listeners.write().unwrap_or_else(PoisonError::into_inner)
}
