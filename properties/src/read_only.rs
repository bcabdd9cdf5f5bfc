use crate::{
    Property,
    error::PropertyError,
    listener::{ChangeListener, ListenerRef, ObservableId},
    value::{ObservableValue, ReadOnlyProperty},
};

/// Read-only view of a [`Property`]. Every call is forwarded to the wrapped property; there is no way
/// to set, bind or unbind through the wrapper.
pub struct ReadOnlyWrapper<T> {
    property: Property<T>,
}

impl<T> Clone for ReadOnlyWrapper<T> {
    fn clone(&self) -> Self { Self { property: self.property.clone() } }
}

impl<T> ReadOnlyWrapper<T> {
    pub fn new(property: Property<T>) -> Self { Self { property } }
}

impl<T> ObservableValue<T> for ReadOnlyWrapper<T>
where T: Clone + PartialEq + Send + Sync + 'static
{
    fn get(&self) -> T { self.property.get() }

    fn listeners(&self) -> ListenerRef<'_, T> { self.property.listeners() }

    fn add_listener(&self, listener: ChangeListener<T>) { self.property.add_listener(listener) }

    fn remove_listener(&self, listener: &ChangeListener<T>) -> Result<(), PropertyError> { self.property.remove_listener(listener) }

    fn observable_id(&self) -> ObservableId { self.property.observable_id() }
}

impl<T> ReadOnlyProperty<T> for ReadOnlyWrapper<T>
where T: Clone + PartialEq + Send + Sync + 'static
{
    fn is_bound(&self) -> bool { self.property.is_bound() }

    /// Already read-only: returns another view of the same property
    fn read_only(&self) -> ReadOnlyWrapper<T> { self.clone() }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ReadOnlyWrapper<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.debug_tuple("ReadOnlyWrapper").field(&self.property).finish() }
}

impl<T: std::fmt::Display> std::fmt::Display for ReadOnlyWrapper<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { std::fmt::Display::fmt(&self.property, f) }
}
