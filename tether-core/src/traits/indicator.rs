//! Status indicator trait

/// Visible acknowledgment of a successful authentication
///
/// Implementations run the whole pattern before returning. The connector
/// calls [`Indicator::signal`] once per `AUTH_SUCCESS` line, before the
/// acknowledgment is written, so the caller is blocked for the duration of
/// the pattern.
pub trait Indicator {
    /// Run the acknowledgment pattern to completion
    fn signal(&mut self);
}

impl<T: Indicator + ?Sized> Indicator for &mut T {
    fn signal(&mut self) {
        (**self).signal()
    }
}

/// Indicator that does nothing, for boards without a status LED
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIndicator;

impl Indicator for NoIndicator {
    fn signal(&mut self) {}
}
