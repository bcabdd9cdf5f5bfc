use crate::{
    error::PropertyError,
    listener::{ChangeListener, ListenerRef, ObservableId},
    read_only::ReadOnlyWrapper,
};

/// A value that can be read and observed for changes.
///
/// This trait is dyn safe; listeners receive the observable that changed as `&dyn ObservableValue<T>`.
pub trait ObservableValue<T> {
    /// Returns a copy of the current value
    fn get(&self) -> T;

    /// Listen-only access to the listeners of this observable
    fn listeners(&self) -> ListenerRef<'_, T>;

    /// Appends a listener. No duplicate check is made, a listener added twice is notified twice.
    fn add_listener(&self, listener: ChangeListener<T>) { self.listeners().add(listener) }

    /// Removes one registration of `listener`.
    ///
    /// Fails with [`PropertyError::MissingListener`] if the listener is not currently registered.
    fn remove_listener(&self, listener: &ChangeListener<T>) -> Result<(), PropertyError> { self.listeners().remove(listener) }

    /// Identity of the underlying listener set
    fn observable_id(&self) -> ObservableId { self.listeners().id() }
}

/// An observable value that can also be set directly
pub trait WritableValue<T>: ObservableValue<T> {
    /// Sets the value and returns the previous one
    fn set(&self, value: T) -> Result<T, PropertyError>;
}

/// A read-only representation of a property
pub trait ReadOnlyProperty<T>: ObservableValue<T> {
    /// True while the property tracks another observable
    fn is_bound(&self) -> bool;

    /// A view of this property without mutators
    fn read_only(&self) -> ReadOnlyWrapper<T>;
}
