use std::fmt;
use std::iter::{FusedIterator, Rev};
use std::slice;

use smallvec::SmallVec;

use crate::Shared;
use crate::error::CallStackError;
use crate::invocation::Options;
use crate::namespace::Namespace;

/// Frames are stored bottom-first so that pushing and popping the top stays O(1).
/// Logical depth `0` (the top) lives in the last slot.
type Frames<N> = SmallVec<[Shared<N>; 4]>;

/// A stack of namespaces representing the script call path.
///
/// Each method invocation, block entry and so on pushes a new namespace, and the top of
/// the stack (depth `0`) is always the namespace of the current evaluation. Reads past
/// the bottom resolve to [`Namespace::native_code`], which is how "the caller is native
/// code" shows up to caller reflection.
///
/// One stack serves one logical call path. Independent entry points into the
/// interpreter each construct their own stack.
#[derive(Debug)]
pub struct CallStack<N> {
    frames: Frames<N>,
    options: Options,
}

impl<N> Default for CallStack<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Clone for CallStack<N> {
    fn clone(&self) -> Self {
        Self {
            frames: self.frames.iter().map(Shared::clone).collect(),
            options: self.options,
        }
    }
}

impl<N> CallStack<N> {
    /// Creates an empty call stack with default [`Options`].
    ///
    /// The default options limit [`CallStack::enter`] to 32 frames in debug builds and
    /// 192 in release builds. [`CallStack::push`] is never limited.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            frames: SmallVec::new(),
            options,
        }
    }

    /// Creates a call stack seeded with `frame` as its only entry.
    pub fn with_frame(frame: Shared<N>) -> Self {
        let mut stack = Self::new();
        stack.push(frame);
        stack
    }

    #[inline]
    pub fn options(&self) -> Options {
        self.options
    }

    /// Removes every frame. The frames themselves stay alive as long as other
    /// handles to them exist.
    pub fn clear(&mut self) {
        self.frames.clear();
        tracing::trace!("clear call stack");
    }

    /// Pushes `frame` as the new top. Every existing frame moves one level deeper.
    ///
    /// No depth limit is enforced here; use [`CallStack::enter`] for limited,
    /// guarded entry.
    #[inline]
    pub fn push(&mut self, frame: Shared<N>) {
        self.frames.push(frame);
        tracing::trace!(depth = self.frames.len(), "push frame");
    }

    /// Removes and returns the top frame.
    ///
    /// Popping an empty stack means pushes and pops got out of step somewhere in the
    /// interpreter, so it is reported as [`CallStackError::EmptyStack`].
    pub fn pop(&mut self) -> Result<Shared<N>, CallStackError> {
        match self.frames.pop() {
            Some(frame) => {
                tracing::trace!(depth = self.frames.len(), "pop frame");
                Ok(frame)
            }
            None => {
                tracing::warn!("pop on empty call stack");
                Err(CallStackError::EmptyStack("pop"))
            }
        }
    }

    /// Returns the frame at `depth` (zero based, `0` is the top), or `None` if the
    /// stack is not that deep.
    #[inline]
    pub fn frame(&self, depth: usize) -> Option<&Shared<N>> {
        self.slot(depth).map(|slot| &self.frames[slot])
    }

    /// Replaces the frame at `depth` in place, leaving the depth unchanged.
    ///
    /// This retargets an existing frame and never grows the stack: `depth` must be
    /// below [`CallStack::depth`].
    pub fn set(&mut self, depth: usize, frame: Shared<N>) -> Result<(), CallStackError> {
        match self.slot(depth) {
            Some(slot) => {
                self.frames[slot] = frame;
                tracing::trace!(depth, "set frame");
                Ok(())
            }
            None => {
                tracing::warn!(index = depth, depth = self.frames.len(), "set out of bounds");
                Err(CallStackError::IndexOutOfBounds {
                    index: depth,
                    depth: self.frames.len(),
                })
            }
        }
    }

    /// Swaps `new_top` in as the top frame and returns the previous top.
    ///
    /// There is no undo. The caller restores the old frame when it is done.
    pub fn swap(&mut self, new_top: Shared<N>) -> Result<Shared<N>, CallStackError> {
        match self.frames.last_mut() {
            Some(top) => {
                let old_top = std::mem::replace(top, new_top);
                tracing::trace!(depth = self.frames.len(), "swap top frame");
                Ok(old_top)
            }
            None => {
                tracing::warn!("swap on empty call stack");
                Err(CallStackError::EmptyStack("swap"))
            }
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterates over the frames from the top down to the bottom.
    pub fn iter(&self) -> Iter<'_, N> {
        Iter {
            inner: self.frames.iter().rev(),
        }
    }

    /// Iterates over the caller chain: every frame below the top, nearest caller first.
    pub fn callers(&self) -> Iter<'_, N> {
        let below_top = self.frames.len().saturating_sub(1);
        Iter {
            inner: self.frames[..below_top].iter().rev(),
        }
    }

    /// Returns the frames top-first. The returned vector is independent of the stack,
    /// but the frames are shared with it.
    pub fn to_vec(&self) -> Vec<Shared<N>> {
        self.iter().map(Shared::clone).collect()
    }

    /// Freezes the current call path, e.g. for error reporting while the live stack
    /// keeps changing. Frames are shared, the sequence is not.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Drops frames from the top until at most `depth` remain.
    pub(crate) fn truncate(&mut self, depth: usize) {
        self.frames.truncate(depth);
        tracing::trace!(depth = self.frames.len(), "truncate call stack");
    }

    #[inline]
    fn slot(&self, depth: usize) -> Option<usize> {
        self.frames.len().checked_sub(depth)?.checked_sub(1)
    }
}

impl<N: Namespace> CallStack<N> {
    /// Returns the current namespace, or the native-code sentinel if the stack is empty.
    #[inline]
    pub fn top(&self) -> Shared<N> {
        self.get(0)
    }

    /// Returns the frame at `depth` (zero based, `0` is the top).
    ///
    /// Any depth at or beyond [`CallStack::depth`] yields [`Namespace::native_code`]
    /// instead of failing, so walking the caller chain past the first scripted frame
    /// ends at native code.
    #[inline]
    pub fn get(&self, depth: usize) -> Shared<N> {
        match self.frame(depth) {
            Some(frame) => Shared::clone(frame),
            None => N::native_code(),
        }
    }

    #[inline]
    pub fn is_native_code(&self, frame: &Shared<N>) -> bool {
        N::is_native_code(frame)
    }
}

impl<N: fmt::Display> fmt::Display for CallStack<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CallStack:")?;
        for frame in self {
            writeln!(f, "\t{}", frame)?;
        }
        Ok(())
    }
}

impl<'a, N> IntoIterator for &'a CallStack<N> {
    type Item = &'a Shared<N>;
    type IntoIter = Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Top-first iterator over the frames of a [`CallStack`].
#[derive(Debug)]
pub struct Iter<'a, N> {
    inner: Rev<slice::Iter<'a, Shared<N>>>,
}

impl<N> Clone for Iter<'_, N> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, N> Iterator for Iter<'a, N> {
    type Item = &'a Shared<N>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<N> DoubleEndedIterator for Iter<'_, N> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<N> ExactSizeIterator for Iter<'_, N> {}

impl<N> FusedIterator for Iter<'_, N> {}
