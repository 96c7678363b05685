//! Extension traits for Dioxus signals to reduce boilerplate.
//!
//! Dropzone state lives in a `Signal<DropzoneSession>`. The session is not
//! `Clone` (it owns boxed observers), so the read-clone-set pattern does not
//! apply; mutations go through the write guard instead:
//!
//! ```ignore
//! let added = session.mutate(|s| s.handle_drop(files));
//! ```

use dioxus::prelude::*;

/// Extension trait for Dioxus signals providing mutation helpers.
pub trait SignalExt<T: 'static> {
    /// Mutate the signal's value in place and return whatever the closure returns.
    ///
    /// Subscribers are notified once, when the write guard is dropped.
    fn mutate<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R;

    /// Read a value derived from the signal without cloning it.
    fn peek_with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R;
}

impl<T: 'static> SignalExt<T> for Signal<T> {
    fn mutate<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut guard = self.write();
        f(&mut guard)
    }

    fn peek_with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let guard = self.peek();
        f(&guard)
    }
}

// Note: Tests for SignalExt are omitted because they require a Dioxus runtime.
// The session logic these helpers wrap is tested in dropbay-core.
