use crate::error::PropertyError;

/// Receives failures of property updates before they are returned to the caller.
///
/// Reporting does not handle the failure: the error still propagates. Closures taking
/// `&PropertyError` implement this trait.
pub trait FailureReporter: Send + Sync {
    fn report(&self, failure: &PropertyError);
}

impl<F> FailureReporter for F
where F: Fn(&PropertyError) + Send + Sync
{
    fn report(&self, failure: &PropertyError) { self(failure) }
}

/// Forwards failures to `tracing` at warn level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl FailureReporter for TracingReporter {
    fn report(&self, failure: &PropertyError) {
        tracing::warn!(error = %failure, "property update failed");
    }
}
