//! Host session for the interactive shell
//!
//! A small stand-in for a code-exploration REPL: named bindings, a stack
//! of frames entered with `cd`, and an evaluator for the expressions users
//! point notes at (`obj`, `obj.ping`, `Geometry::Point.new.x`, `42`, `self`).

use crate::notes::METHOD_SEPARATOR;
use crate::resolver::{is_method_name, ContextFrame, ObjectRef, SessionContext};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_][A-Za-z0-9_]*[?!]?$").expect("valid regex"));

static CONSTANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:::)?[A-Z][A-Za-z0-9_]*(?:::[A-Z][A-Za-z0-9_]*)*$").expect("valid regex")
});

static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?[0-9][0-9_]*$").expect("valid regex"));

static FLOAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+\.[0-9]+$").expect("valid regex"));

/// Bindings and frame stack of one interactive session.
#[derive(Debug, Clone)]
pub struct Session {
    bindings: HashMap<String, ObjectRef>,
    frames: Vec<ContextFrame>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session at top level, where `self` is an `Object`.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            frames: vec![ContextFrame::Receiver(ObjectRef::instance("Object"))],
        }
    }

    /// Bind a local name.
    pub fn bind(&mut self, name: impl Into<String>, value: ObjectRef) {
        self.bindings.insert(name.into(), value);
    }

    pub fn binding(&self, name: &str) -> Option<&ObjectRef> {
        self.bindings.get(name)
    }

    /// Push a frame.
    pub fn enter(&mut self, frame: ContextFrame) {
        tracing::debug!(frame = %describe_frame(&frame), "Entering frame");
        self.frames.push(frame);
    }

    /// Pop a frame; the top-level frame is never popped.
    pub fn leave(&mut self) -> bool {
        if self.frames.len() > 1 {
            self.frames.pop();
            true
        } else {
            false
        }
    }

    /// Drop back to the top-level frame.
    pub fn reset(&mut self) {
        self.frames.truncate(1);
    }

    /// Number of frames entered above top level.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Frame for `cd <target>`: `Owner#method` enters a method, anything
    /// else enters the value it evaluates to.
    pub fn frame_for(&self, target: &str) -> Option<ContextFrame> {
        if let Some((owner, name)) = target.split_once(METHOD_SEPARATOR) {
            let name = name.trim();
            if !is_method_name(name) {
                return None;
            }
            let owner = match self.evaluate_expr(owner.trim())? {
                ObjectRef::Instance { class_name } => class_name,
                ObjectRef::Module { name } => name,
                ObjectRef::Method { .. } => return None,
            };
            return Some(ContextFrame::Method {
                owner,
                name: name.to_string(),
            });
        }
        Some(match self.evaluate_expr(target)? {
            ObjectRef::Method { owner, name, .. } => ContextFrame::Method { owner, name },
            object => ContextFrame::Receiver(object),
        })
    }

    /// Evaluate an expression: a literal, `self`, a binding or constant,
    /// followed by `.new` or a trailing `.method` reference.
    pub fn evaluate_expr(&self, expr: &str) -> Option<ObjectRef> {
        let expr = expr.trim();
        if let Some(literal) = literal_class(expr) {
            return Some(ObjectRef::instance(literal));
        }

        let mut segments = expr.split('.');
        let mut value = self.evaluate_head(segments.next()?.trim())?;
        for segment in segments {
            let segment = segment.trim();
            value = match value {
                ObjectRef::Module { name } if segment == "new" => ObjectRef::instance(name),
                ObjectRef::Instance { class_name } if IDENTIFIER.is_match(segment) => {
                    ObjectRef::bound_method(class_name, segment)
                }
                // Calling through a method object or a singleton method has no
                // statically known result.
                _ => return None,
            };
        }
        Some(value)
    }

    fn evaluate_head(&self, head: &str) -> Option<ObjectRef> {
        if head == "self" {
            return Some(self.receiver());
        }
        if let Some(value) = self.bindings.get(head) {
            return Some(value.clone());
        }
        CONSTANT
            .is_match(head)
            .then(|| ObjectRef::module(head.trim_start_matches("::")))
    }

    /// `self` of the current frame.
    fn receiver(&self) -> ObjectRef {
        match self.frame() {
            ContextFrame::Method { owner, .. } => ObjectRef::instance(owner.as_str()),
            ContextFrame::Receiver(object) => object.clone(),
        }
    }

    fn frame(&self) -> &ContextFrame {
        // `new` seeds a top-level frame and `leave` never pops it
        &self.frames[self.frames.len() - 1]
    }

    /// Short description of the current frame for prompts.
    pub fn location(&self) -> String {
        describe_frame(self.frame())
    }
}

impl SessionContext for Session {
    fn current_frame(&self) -> ContextFrame {
        self.frame().clone()
    }

    fn evaluate(&self, expr: &str) -> Option<ObjectRef> {
        self.evaluate_expr(expr)
    }
}

fn literal_class(expr: &str) -> Option<&'static str> {
    let quoted = |q: char| expr.len() >= 2 && expr.starts_with(q) && expr.ends_with(q);
    if INTEGER.is_match(expr) {
        Some("Integer")
    } else if FLOAT.is_match(expr) {
        Some("Float")
    } else if quoted('"') || quoted('\'') {
        Some("String")
    } else if expr.len() > 1 && expr.starts_with(':') && !expr.starts_with("::") {
        Some("Symbol")
    } else {
        match expr {
            "nil" => Some("NilClass"),
            "true" => Some("TrueClass"),
            "false" => Some("FalseClass"),
            _ => None,
        }
    }
}

fn describe_frame(frame: &ContextFrame) -> String {
    match frame {
        ContextFrame::Method { owner, name } => format!("{}{}{}", owner, METHOD_SEPARATOR, name),
        ContextFrame::Receiver(ObjectRef::Instance { class_name }) => {
            format!("#<{}>", class_name)
        }
        ContextFrame::Receiver(ObjectRef::Module { name }) => name.clone(),
        ContextFrame::Receiver(ObjectRef::Method { owner, name, .. }) => {
            format!("#<Method {}{}{}>", owner, METHOD_SEPARATOR, name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals() {
        let session = Session::new();
        assert_eq!(session.evaluate_expr("0"), Some(ObjectRef::instance("Integer")));
        assert_eq!(session.evaluate_expr("-12"), Some(ObjectRef::instance("Integer")));
        assert_eq!(session.evaluate_expr("1.5"), Some(ObjectRef::instance("Float")));
        assert_eq!(session.evaluate_expr("'hi'"), Some(ObjectRef::instance("String")));
        assert_eq!(session.evaluate_expr(":sym"), Some(ObjectRef::instance("Symbol")));
        assert_eq!(session.evaluate_expr("nil"), Some(ObjectRef::instance("NilClass")));
    }

    #[test]
    fn test_constants_bindings_and_methods() {
        let mut session = Session::new();
        session.bind("obj", ObjectRef::instance("Notes::Sample"));

        assert_eq!(
            session.evaluate_expr("Notes::Sample"),
            Some(ObjectRef::module("Notes::Sample"))
        );
        assert_eq!(
            session.evaluate_expr("obj.ping"),
            Some(ObjectRef::bound_method("Notes::Sample", "ping"))
        );
        assert_eq!(
            session.evaluate_expr("Notes::Sample.new.ping"),
            Some(ObjectRef::bound_method("Notes::Sample", "ping"))
        );
        assert_eq!(session.evaluate_expr("unbound"), None);
        assert_eq!(session.evaluate_expr("obj.ping.call"), None);
        assert_eq!(session.evaluate_expr("Notes::Sample.build"), None);
    }

    #[test]
    fn test_frames() {
        let mut session = Session::new();
        assert_eq!(session.location(), "#<Object>");
        assert!(!session.leave());

        let frame = session.frame_for("0").unwrap();
        session.enter(frame);
        assert_eq!(
            session.current_frame(),
            ContextFrame::Receiver(ObjectRef::instance("Integer"))
        );

        session.bind("obj", ObjectRef::instance("Notes::Sample"));
        let frame = session.frame_for("obj.ping").unwrap();
        session.enter(frame);
        assert_eq!(session.location(), "Notes::Sample#ping");
        assert_eq!(session.evaluate_expr("self"), Some(ObjectRef::instance("Notes::Sample")));
        assert_eq!(session.depth(), 2);

        assert!(session.leave());
        session.reset();
        assert_eq!(session.depth(), 0);
    }

    #[test]
    fn test_frame_for_method_syntax() {
        let session = Session::new();
        assert_eq!(
            session.frame_for("Parser#advance"),
            Some(ContextFrame::Method {
                owner: "Parser".into(),
                name: "advance".into()
            })
        );
        assert_eq!(session.frame_for("nothing#here"), None);
    }

    #[test]
    fn test_frame_for_rejects_malformed_method_names() {
        let session = Session::new();
        for target in ["Parser#", "Parser#1bad", "Parser#a#b", "Parser# "] {
            assert_eq!(session.frame_for(target), None, "{target}");
        }
        assert!(session.frame_for("Parser#empty?").is_some());
    }

    #[test]
    fn test_bindings() {
        let mut session = Session::new();
        assert_eq!(session.binding("obj"), None);
        session.bind("obj", ObjectRef::instance("Notes::Sample"));
        assert_eq!(session.binding("obj"), Some(&ObjectRef::instance("Notes::Sample")));
        assert_eq!(session.evaluate_expr(":sym"), Some(ObjectRef::instance("Symbol")));
    }
}
