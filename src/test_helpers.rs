//! Test helper fixtures
//!
//! A fixed host context and a scripted editor, plus builders for
//! operations wired to them.
#![allow(dead_code)]

use crate::commands::NoteOperations;
use crate::editor::EditorHook;
use crate::error::Result;
use crate::resolver::{ContextFrame, ObjectRef, SessionContext};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

// ============================================================================
// Host context
// ============================================================================

/// Host context with a fixed frame and a table of evaluable expressions.
pub struct StaticContext {
    frame: ContextFrame,
    bindings: HashMap<String, ObjectRef>,
}

impl StaticContext {
    /// Context inspecting `object`
    pub fn receiver(object: ObjectRef) -> Self {
        Self {
            frame: ContextFrame::Receiver(object),
            bindings: HashMap::new(),
        }
    }

    /// Context stopped inside `owner#name`
    pub fn method(owner: &str, name: &str) -> Self {
        Self {
            frame: ContextFrame::Method {
                owner: owner.to_string(),
                name: name.to_string(),
            },
            bindings: HashMap::new(),
        }
    }

    /// Make `expr` evaluate to `object`
    pub fn with_binding(mut self, expr: &str, object: ObjectRef) -> Self {
        self.bindings.insert(expr.to_string(), object);
        self
    }
}

impl SessionContext for StaticContext {
    fn current_frame(&self) -> ContextFrame {
        self.frame.clone()
    }

    fn evaluate(&self, expr: &str) -> Option<ObjectRef> {
        self.bindings.get(expr).cloned()
    }
}

/// Top-level context where `obj` is a `Notes::Sample` and `obj.ping` its bound method.
pub fn sample_context() -> StaticContext {
    StaticContext::receiver(ObjectRef::instance("Object"))
        .with_binding("obj", ObjectRef::instance("Notes::Sample"))
        .with_binding("obj.ping", ObjectRef::bound_method("Notes::Sample", "ping"))
        .with_binding("Notes::Sample", ObjectRef::module("Notes::Sample"))
}

// ============================================================================
// Editor
// ============================================================================

/// Editor that replays canned replies and records the seeds it was given.
///
/// Clones share state, so a clone can be boxed into `NoteOperations`
/// while the test keeps another to inspect.
#[derive(Clone, Default)]
pub struct ScriptedEditor {
    replies: Rc<RefCell<VecDeque<Option<String>>>>,
    seeds: Rc<RefCell<Vec<String>>>,
}

impl ScriptedEditor {
    pub fn new(replies: Vec<Option<String>>) -> Self {
        Self {
            replies: Rc::new(RefCell::new(replies.into())),
            seeds: Rc::default(),
        }
    }

    /// Seeds passed to `edit`, in call order
    pub fn seeds(&self) -> Vec<String> {
        self.seeds.borrow().clone()
    }
}

impl EditorHook for ScriptedEditor {
    fn edit(&self, seed: &str) -> Result<Option<String>> {
        self.seeds.borrow_mut().push(seed.to_string());
        Ok(self.replies.borrow_mut().pop_front().flatten())
    }
}

/// Operations backed by a scripted editor; returns the editor handle too.
pub fn scripted_operations(replies: Vec<Option<String>>) -> (NoteOperations, ScriptedEditor) {
    let editor = ScriptedEditor::new(replies);
    let operations = NoteOperations::new(Box::new(editor.clone()));
    (operations, editor)
}
