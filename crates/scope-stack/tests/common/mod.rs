#![allow(dead_code)]

use std::collections::HashMap;
use std::fmt;

use scope_stack::{Namespace, Shared, SharedCell};

/// Minimal namespace with mutable bindings, standing in for the interpreter's scope type.
#[derive(Debug, Default)]
pub struct Scope {
    pub name: String,
    bindings: SharedCell<HashMap<String, i64>>,
}

impl Scope {
    pub fn new(name: &str) -> Shared<Self> {
        Shared::new(Self {
            name: name.to_string(),
            bindings: SharedCell::default(),
        })
    }

    pub fn define(&self, ident: &str, value: i64) {
        #[cfg(not(feature = "sync"))]
        self.bindings.borrow_mut().insert(ident.to_string(), value);
        #[cfg(feature = "sync")]
        self.bindings
            .write()
            .unwrap()
            .insert(ident.to_string(), value);
    }

    pub fn resolve(&self, ident: &str) -> Option<i64> {
        #[cfg(not(feature = "sync"))]
        let bindings = self.bindings.borrow();
        #[cfg(feature = "sync")]
        let bindings = self.bindings.read().unwrap();

        bindings.get(ident).copied()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameSpace: {}", self.name)
    }
}

#[cfg(not(feature = "sync"))]
thread_local! {
    static NATIVE_CODE: Shared<Scope> = Scope::new("native code");
}

#[cfg(not(feature = "sync"))]
impl Namespace for Scope {
    fn native_code() -> Shared<Self> {
        NATIVE_CODE.with(Shared::clone)
    }
}

#[cfg(feature = "sync")]
static NATIVE_CODE: std::sync::LazyLock<Shared<Scope>> =
    std::sync::LazyLock::new(|| Scope::new("native code"));

#[cfg(feature = "sync")]
impl Namespace for Scope {
    fn native_code() -> Shared<Self> {
        Shared::clone(&NATIVE_CODE)
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
