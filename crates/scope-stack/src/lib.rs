//! `scope-stack` provides the call/scope stack used by an embedded script interpreter
//! to track the chain of namespaces active during evaluation.
//!
//! Every script-level invocation pushes the callee's namespace, and the top of the
//! stack is always the namespace currently being evaluated. Deeper frames answer
//! "who called me" queries, and a frozen copy of the stack renders a script stack
//! trace when evaluation fails.
//!
//! ## Examples
//!
//! ```rust
//! use std::fmt;
//! use scope_stack::{CallStack, Namespace, Shared};
//!
//! #[derive(Debug)]
//! struct Scope(&'static str);
//!
//! impl fmt::Display for Scope {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "Scope: {}", self.0)
//!     }
//! }
//!
//! # #[cfg(not(feature = "sync"))]
//! thread_local! {
//!     static NATIVE_CODE: Shared<Scope> = Shared::new(Scope("native code"));
//! }
//!
//! # #[cfg(not(feature = "sync"))]
//! impl Namespace for Scope {
//!     fn native_code() -> Shared<Self> {
//!         NATIVE_CODE.with(Shared::clone)
//!     }
//! }
//!
//! # #[cfg(feature = "sync")]
//! static NATIVE_CODE: std::sync::LazyLock<Shared<Scope>> =
//!     std::sync::LazyLock::new(|| Shared::new(Scope("native code")));
//!
//! # #[cfg(feature = "sync")]
//! impl Namespace for Scope {
//!     fn native_code() -> Shared<Self> {
//!         Shared::clone(&NATIVE_CODE)
//!     }
//! }
//!
//! let global = Shared::new(Scope("global"));
//! let mut stack = CallStack::with_frame(Shared::clone(&global));
//!
//! stack
//!     .scoped(Shared::new(Scope("method")), |stack| {
//!         assert_eq!(stack.depth(), 2);
//!         assert!(Shared::ptr_eq(&stack.get(1), &global));
//!         assert!(stack.is_native_code(&stack.get(2)));
//!     })
//!     .unwrap();
//!
//! assert_eq!(stack.depth(), 1);
//! assert_eq!(stack.to_string(), "CallStack:\n\tScope: global\n");
//! ```
mod call_stack;
mod error;
mod invocation;
mod namespace;

pub use call_stack::{CallStack, Iter};
pub use error::CallStackError;
pub use invocation::{FrameGuard, Options};
pub use namespace::Namespace;

/// Handle type used for frames on the stack.
#[cfg(not(feature = "sync"))]
pub type Shared<T> = std::rc::Rc<T>;
#[cfg(feature = "sync")]
pub type Shared<T> = std::sync::Arc<T>;

/// Interior-mutability cell matching [`Shared`], for namespaces whose bindings change
/// while they are on the stack.
#[cfg(not(feature = "sync"))]
pub type SharedCell<T> = std::cell::RefCell<T>;
#[cfg(feature = "sync")]
pub type SharedCell<T> = std::sync::RwLock<T>;
