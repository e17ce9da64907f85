//! Host session capabilities the resolver depends on.

/// A live value as described by the host session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectRef {
    /// An ordinary object, an instance of `class_name`
    Instance { class_name: String },
    /// A class or module object itself
    Module { name: String },
    /// A method object; `bound` is true when it carries a receiver
    Method {
        owner: String,
        name: String,
        bound: bool,
    },
}

impl ObjectRef {
    pub fn instance(class_name: impl Into<String>) -> Self {
        Self::Instance {
            class_name: class_name.into(),
        }
    }

    pub fn module(name: impl Into<String>) -> Self {
        Self::Module { name: name.into() }
    }

    pub fn bound_method(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Method {
            owner: owner.into(),
            name: name.into(),
            bound: true,
        }
    }

    pub fn unbound_method(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Method {
            owner: owner.into(),
            name: name.into(),
            bound: false,
        }
    }
}

/// Where the host session currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextFrame {
    /// Stopped inside an instance method
    Method { owner: String, name: String },
    /// Inspecting an object with no method frame
    Receiver(ObjectRef),
}

/// Queries the resolver makes against the host session.
pub trait SessionContext {
    /// The frame targets are inferred from when none is given.
    fn current_frame(&self) -> ContextFrame;

    /// Evaluate an expression to a live value, or `None` if the host
    /// cannot make sense of it.
    fn evaluate(&self, expr: &str) -> Option<ObjectRef>;
}
