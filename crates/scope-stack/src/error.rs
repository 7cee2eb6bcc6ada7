use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallStackError {
    #[error("{0} on empty call stack")]
    EmptyStack(&'static str),
    #[error("Index out of bounds {index}, call stack depth is {depth}")]
    IndexOutOfBounds { index: usize, depth: usize },
    #[error("Maximum recursion depth exceeded \"{0}\"")]
    RecursionLimit(usize),
}

impl CallStackError {
    /// Returns `true` if the error means the interpreter broke its push/pop discipline,
    /// as opposed to a script recursing too deeply.
    #[cold]
    pub fn is_internal(&self) -> bool {
        match self {
            CallStackError::EmptyStack(_) => true,
            CallStackError::IndexOutOfBounds { .. } => true,
            CallStackError::RecursionLimit(_) => false,
        }
    }
}
