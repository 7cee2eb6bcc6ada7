// Guarded entry into a frame. A push made through `enter` is always matched by a
// pop, whether the callee returns normally, bails out with `?` or panics.
use std::ops::{Deref, DerefMut};

use crate::Shared;
use crate::call_stack::CallStack;
use crate::error::CallStackError;

/// Configuration options for guarded entry.
///
/// The default limit depends on the build profile: debug builds refuse
/// [`CallStack::enter`] once 32 frames are on the stack, release builds once 192 are.
/// Every guarded entry counts, blocks included. Use [`Options::unbounded`] to turn
/// the check off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Maximum number of frames [`CallStack::enter`] allows on the stack, to stop
    /// runaway script recursion. `None` disables the check. Plain
    /// [`CallStack::push`] ignores it.
    pub max_depth: Option<usize>,
}

#[cfg(debug_assertions)]
// Debug builds run with a smaller native stack, so stop recursion earlier.
impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: Some(32),
        }
    }
}

#[cfg(not(debug_assertions))]
impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: Some(192),
        }
    }
}

impl Options {
    pub fn unbounded() -> Self {
        Self { max_depth: None }
    }
}

/// Pops the frame pushed by [`CallStack::enter`] when dropped.
///
/// The guard dereferences to the stack, so nested calls enter deeper frames through
/// it.
#[derive(Debug)]
pub struct FrameGuard<'a, N> {
    stack: &'a mut CallStack<N>,
    frame: Shared<N>,
    entry_depth: usize,
}

impl<N> FrameGuard<'_, N> {
    /// The frame this guard pushed.
    pub fn pushed(&self) -> &Shared<N> {
        &self.frame
    }
}

impl<N> Deref for FrameGuard<'_, N> {
    type Target = CallStack<N>;

    fn deref(&self) -> &Self::Target {
        self.stack
    }
}

impl<N> DerefMut for FrameGuard<'_, N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.stack
    }
}

impl<N> Drop for FrameGuard<'_, N> {
    fn drop(&mut self) {
        // Drop can't propagate, so an unbalanced stack is reported and then cut back
        // to the depth it had before `enter`.
        let depth = self.stack.depth();
        if depth != self.entry_depth + 1 {
            tracing::error!(
                depth,
                expected = self.entry_depth + 1,
                "unbalanced call stack on guarded frame exit"
            );
            self.stack.truncate(self.entry_depth);
            return;
        }

        if let Err(err) = self.stack.pop() {
            tracing::error!(error = %err, "failed to pop guarded frame");
        }
    }
}

impl<N> CallStack<N> {
    /// Pushes `frame` and returns a guard that pops it again when dropped.
    ///
    /// On drop the stack is brought back to the depth it had before this call. Frames
    /// pushed inside the guard and never popped are discarded with an `error` event.
    ///
    /// Fails with [`CallStackError::RecursionLimit`], without pushing, if the stack
    /// already holds [`Options::max_depth`] frames.
    pub fn enter(&mut self, frame: Shared<N>) -> Result<FrameGuard<'_, N>, CallStackError> {
        let depth = self.depth();
        if let Some(max_depth) = self.options().max_depth.filter(|&max| depth >= max) {
            tracing::debug!(depth, max_depth, "refusing to enter frame");
            return Err(CallStackError::RecursionLimit(max_depth));
        }

        self.push(Shared::clone(&frame));
        Ok(FrameGuard {
            stack: self,
            frame,
            entry_depth: depth,
        })
    }

    /// Runs `f` with `frame` pushed as the current namespace and pops it on every exit
    /// path.
    pub fn scoped<R>(
        &mut self,
        frame: Shared<N>,
        f: impl FnOnce(&mut CallStack<N>) -> R,
    ) -> Result<R, CallStackError> {
        let mut guard = self.enter(frame)?;
        Ok(f(&mut *guard))
    }
}
