use std::sync::{Arc, PoisonError, RwLock};

use crate::{
    error::PropertyError,
    listener::{ChangeListener, ListenerGuard, ListenerRef, ListenerSet},
    value::ObservableValue,
};

struct Inner<T> {
    value: RwLock<T>,
    listeners: ListenerSet<T>,
    /// Keeps our recompute listener registered with the upstream for as long as the binding lives
    _upstream: Box<dyn std::any::Any + Send + Sync>,
}

/// A read-only observable whose value is derived from one upstream observable through a converter.
///
/// The value is computed once when the binding is created and again on every change the upstream
/// reports. Unlike a [`Property`](crate::Property), a binding notifies its listeners after every
/// recomputation, even when the converted value did not change. The upstream relation is permanent.
///
/// # Example
/// ```
/// use osmerion_properties::*;
///
/// let power = Property::new(false);
/// let label = Binding::wrap(&power, |on: &bool| if *on { "ON" } else { "OFF" });
/// assert_eq!(label.get(), "OFF");
///
/// power.set(true).unwrap();
/// assert_eq!(label.get(), "ON");
/// ```
pub struct Binding<T>(Arc<Inner<T>>);

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> Binding<T>
where T: Clone + Send + Sync + 'static
{
    /// Wrap `upstream`, converting each of its values with `converter`
    pub fn wrap<U, O, F>(upstream: &O, converter: F) -> Self
    where
        O: ObservableValue<U> + ?Sized,
        U: 'static,
        F: Fn(&U) -> T + Send + Sync + 'static,
    {
        let initial = converter(&upstream.get());
        let source = upstream.listeners();

        let inner = Arc::new_cyclic(|weak| {
            let weak = weak.clone();
            let listener = ChangeListener::raw(move |_, _, new: &U| match weak.upgrade() {
                Some(inner) => Binding(inner).recompute(converter(new)),
                None => Ok(()),
            });
            source.add(listener.clone());

            Inner {
                value: RwLock::new(initial),
                listeners: ListenerSet::new(),
                _upstream: Box::new(ListenerGuard::new(source.downgrade(), listener)),
            }
        });

        tracing::trace!(binding = %inner.listeners.id(), source = %source.id(), "wrapped observable");
        Self(inner)
    }

    /// Store the converted value unconditionally and notify
    fn recompute(&self, value: T) -> Result<(), PropertyError> {
        let old = std::mem::replace(&mut *self.0.value.write().unwrap_or_else(PoisonError::into_inner), value.clone());
        self.0.listeners.notify(self, &old, &value)
    }
}

impl<T> ObservableValue<T> for Binding<T>
where T: Clone + Send + Sync + 'static
{
    fn get(&self) -> T { self.0.value.read().unwrap_or_else(PoisonError::into_inner).clone() }

    fn listeners(&self) -> ListenerRef<'_, T> { self.0.listeners.reference() }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("value", &*self.0.value.read().unwrap_or_else(PoisonError::into_inner))
            .field("listeners", &self.0.listeners)
            .finish()
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.value.read().unwrap_or_else(PoisonError::into_inner))
    }
}
