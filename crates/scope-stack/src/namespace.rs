use crate::Shared;

/// A scope that can be held as a frame on a [`CallStack`](crate::CallStack).
///
/// The stack never looks inside a namespace. The only thing it needs from the
/// namespace subsystem is the native-code sentinel: a single, well-known frame that
/// stands for "this call came from outside the scripted world". It is returned by
/// [`CallStack::get`](crate::CallStack::get) whenever the requested depth is not on the
/// stack.
///
/// Implementations must hand out the same allocation on every call, so that the
/// sentinel is distinguishable from real scopes by identity. A `thread_local!` handle
/// works for the default `Rc` frames; with the `sync` feature a `LazyLock` or
/// `OnceLock` static gives one process-wide instance.
pub trait Namespace: Sized {
    /// Returns the shared native-code sentinel.
    fn native_code() -> Shared<Self>;

    /// Returns `true` if `frame` is the native-code sentinel.
    #[inline]
    fn is_native_code(frame: &Shared<Self>) -> bool {
        Shared::ptr_eq(frame, &Self::native_code())
    }
}
