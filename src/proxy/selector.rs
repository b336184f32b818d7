//! Backend picking policy.

use rand::Rng;

/// Chooses one of `len` candidate backends.
///
/// Implementations must return an index in `0..len`; `len` is never zero.
pub trait BackendPicker: Send + Sync {
    fn pick(&self, len: usize) -> usize;
}

/// Uniform random choice using the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPicker;

impl BackendPicker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}
