//! Monotonic time source

/// Millisecond clock that never goes backwards
///
/// The epoch is implementation-defined (usually boot).
pub trait Monotonic {
    /// Milliseconds elapsed since the clock's epoch
    fn now_ms(&self) -> u64;
}

impl<M: Monotonic + ?Sized> Monotonic for &M {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
