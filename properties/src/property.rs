use std::sync::{Arc, PoisonError, RwLock};

use crate::{
    error::{BoxError, PropertyError},
    listener::{ChangeListener, ListenerGuard, ListenerRef, ListenerSet},
    read_only::ReadOnlyWrapper,
    report::FailureReporter,
    value::{ObservableValue, ReadOnlyProperty, WritableValue},
};

type Validator<T> = Box<dyn Fn(T) -> Result<T, PropertyError> + Send + Sync>;

/// A validated, bindable, observable value.
///
/// A property is either free, in which case it can be [`set`](WritableValue::set), or bound to another
/// observable via [`bind`](Property::bind), in which case it mirrors the validated upstream value and
/// rejects direct writes. Listeners are notified only when the validated value actually changes.
///
/// Cloning a `Property` yields another handle to the same property.
pub struct Property<T>(Arc<Inner<T>>);

struct Inner<T> {
    value: RwLock<T>,
    validator: Validator<T>,
    listeners: ListenerSet<T>,
    /// Registration of our binding listener with the upstream's listener set. Dropping it unregisters.
    binding: RwLock<Option<ListenerGuard<T>>>,
    reporter: Option<Arc<dyn FailureReporter>>,
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> Property<T>
where T: Clone + PartialEq + Send + Sync + 'static
{
    /// Create a property that accepts every value as-is
    pub fn new(initial: T) -> Self { Self::builder(initial).build() }

    /// Create a property whose assigned values are passed through `validator` (e.g. clamped) before storage
    pub fn with_validator<F>(initial: T, validator: F) -> Self
    where F: Fn(T) -> T + Send + Sync + 'static {
        Self::builder(initial).validator(validator).build()
    }

    /// Create a property whose validator may reject values
    pub fn with_fallible_validator<F, E>(initial: T, validator: F) -> Self
    where
        F: Fn(T) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::builder(initial).fallible_validator(validator).build()
    }

    pub fn builder(initial: T) -> PropertyBuilder<T> { PropertyBuilder { initial, validator: None, reporter: None } }

    /// The value a property starts with when none is given
    pub fn initial_value() -> T
    where T: Default {
        T::default()
    }

    /// Binds this property to `other`. From now on every change of `other` is validated and mirrored
    /// into this property, and direct writes fail until [`unbind`](Property::unbind) is called.
    ///
    /// The current value of `other` is not pulled in; the first update is the next change of `other`.
    pub fn bind<O>(&self, other: &O) -> Result<(), PropertyError>
    where O: ObservableValue<T> + ?Sized {
        let source = other.listeners();
        if source.id() == self.0.listeners.id() {
            return Err(PropertyError::InvalidArgument("a property cannot be bound to itself"));
        }

        let mut binding = self.0.binding.write().unwrap_or_else(PoisonError::into_inner);
        if binding.is_some() {
            return Err(PropertyError::AlreadyBound);
        }

        let weak = Arc::downgrade(&self.0);
        let listener = ChangeListener::raw(move |_, _, new: &T| match weak.upgrade() {
            Some(inner) => Property(inner).update(new.clone()).map(|_| ()),
            None => Ok(()),
        });
        source.add(listener.clone());
        *binding = Some(ListenerGuard::new(source.downgrade(), listener));

        tracing::trace!(property = %self.0.listeners.id(), source = %source.id(), "bound property");
        Ok(())
    }

    /// Releases the binding. The property keeps the last value it received and can be set again.
    pub fn unbind(&self) -> Result<(), PropertyError> {
        let guard = self.0.binding.write().unwrap_or_else(PoisonError::into_inner).take().ok_or(PropertyError::NotBound)?;
        tracing::trace!(property = %self.0.listeners.id(), source = %guard.source_id(), "unbound property");
        guard.release()
    }

    /// Validate, store and notify. Shared by direct writes and binding updates.
    fn update(&self, value: T) -> Result<T, PropertyError> {
        let result = self.apply(value);
        if let (Err(failure), Some(reporter)) = (&result, &self.0.reporter) {
            reporter.report(failure);
        }
        result
    }

    fn apply(&self, value: T) -> Result<T, PropertyError> {
        let validated = (self.0.validator)(value)?;
        let old = {
            let mut current = self.0.value.write().unwrap_or_else(PoisonError::into_inner);
            if *current == validated {
                return Ok(current.clone());
            }
            std::mem::replace(&mut *current, validated.clone())
        };
        self.0.listeners.notify(self, &old, &validated)?;
        Ok(old)
    }
}

impl<T> Default for Property<T>
where T: Default + Clone + PartialEq + Send + Sync + 'static
{
    fn default() -> Self { Self::new(T::default()) }
}

impl<T> ObservableValue<T> for Property<T>
where T: Clone + PartialEq + Send + Sync + 'static
{
    fn get(&self) -> T { self.0.value.read().unwrap_or_else(PoisonError::into_inner).clone() }

    fn listeners(&self) -> ListenerRef<'_, T> { self.0.listeners.reference() }
}

impl<T> WritableValue<T> for Property<T>
where T: Clone + PartialEq + Send + Sync + 'static
{
    /// Fails with [`PropertyError::UnsupportedOperation`] while the property is bound
    fn set(&self, value: T) -> Result<T, PropertyError> {
        if self.is_bound() {
            return Err(PropertyError::UnsupportedOperation);
        }
        self.update(value)
    }
}

impl<T> ReadOnlyProperty<T> for Property<T>
where T: Clone + PartialEq + Send + Sync + 'static
{
    fn is_bound(&self) -> bool { self.0.binding.read().unwrap_or_else(PoisonError::into_inner).is_some() }

    fn read_only(&self) -> ReadOnlyWrapper<T> { ReadOnlyWrapper::new(self.clone()) }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Property")
            .field("value", &*self.0.value.read().unwrap_or_else(PoisonError::into_inner))
            .field("bound", &self.0.binding.read().unwrap_or_else(PoisonError::into_inner).is_some())
            .field("listeners", &self.0.listeners)
            .finish()
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.value.read().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Configures a [`Property`] before it is shared
pub struct PropertyBuilder<T> {
    initial: T,
    validator: Option<Validator<T>>,
    reporter: Option<Arc<dyn FailureReporter>>,
}

impl<T> PropertyBuilder<T>
where T: Clone + PartialEq + Send + Sync + 'static
{
    /// Infallible validation, typically clamping or normalising. The initial value is not validated.
    pub fn validator<F>(mut self, validator: F) -> Self
    where F: Fn(T) -> T + Send + Sync + 'static {
        let validator: Validator<T> = Box::new(move |value| Ok(validator(value)));
        self.validator = Some(validator);
        self
    }

    /// Validation that may reject a value. Rejections surface as [`PropertyError::Validation`].
    pub fn fallible_validator<F, E>(mut self, validator: F) -> Self
    where
        F: Fn(T) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        let validator: Validator<T> = Box::new(move |value| validator(value).map_err(PropertyError::validation));
        self.validator = Some(validator);
        self
    }

    /// Report failed updates (rejected values, failing listeners) to `reporter` before returning them
    pub fn reporter(mut self, reporter: Arc<dyn FailureReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn build(self) -> Property<T> {
        let validator = match self.validator {
            Some(validator) => validator,
            None => Box::new(|value: T| Ok::<T, PropertyError>(value)),
        };
        Property(Arc::new(Inner {
            value: RwLock::new(self.initial),
            validator,
            listeners: ListenerSet::new(),
            binding: RwLock::new(None),
            reporter: self.reporter,
        }))
    }
}
