use thiserror::Error;

/// Boxed error produced by user-supplied validators and listeners.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for every fallible property, binding and listener operation.
///
/// Returned from: `set`, `bind`, `unbind`, `remove_listener`; also from an upstream's `set`
/// when one of its downstream listeners (including a bound property) fails.
#[derive(Debug, Error)]
pub enum PropertyError {
    /// A required argument was not acceptable (e.g. binding a property to itself)
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The listener to remove is not registered
    #[error("the listener is not registered with this observable")]
    MissingListener,

    /// `bind` was called on a property that is already bound
    #[error("the property is already bound to a value")]
    AlreadyBound,

    /// `unbind` was called on a property that is not bound
    #[error("the property is not bound to a value")]
    NotBound,

    /// `set` was called on a bound property
    #[error("a bound property's value may not be set explicitly")]
    UnsupportedOperation,

    /// The property's validator rejected a value
    #[error("validation failed: {0}")]
    Validation(#[source] BoxError),

    /// A change listener failed; the remaining listeners of that round were not notified
    #[error("change listener failed: {0}")]
    Listener(#[source] BoxError),
}

impl PropertyError {
    /// True for the lifecycle errors (`AlreadyBound`, `NotBound`)
    pub fn is_illegal_state(&self) -> bool { matches!(self, PropertyError::AlreadyBound | PropertyError::NotBound) }

    pub(crate) fn validation<E: Into<BoxError>>(e: E) -> Self { PropertyError::Validation(e.into()) }

    pub(crate) fn listener<E: Into<BoxError>>(e: E) -> Self { PropertyError::Listener(e.into()) }
}
