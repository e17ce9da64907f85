//! Target Resolver
//!
//! Turns what the user pointed at into a canonical [`NoteKey`] plus an
//! optional note number. Targets come in three shapes:
//! - a live object handed over by the host,
//! - text: `Owner#method`, a constant path, or an expression the host
//!   evaluates, optionally suffixed with `:N`,
//! - nothing, in which case the host's current frame is used.
//!
//! The same method or class always yields the same key however it was
//! referenced: `obj.ping`, `Klass#ping` and a frame stopped in `ping`
//! all resolve to `Klass#ping`.

pub mod context;
mod target;

pub use context::{ContextFrame, ObjectRef, SessionContext};

use crate::error::{NoteError, Result};
use crate::notes::{NoteIndex, NoteKey, METHOD_SEPARATOR};
pub(crate) use target::is_method_name;
use target::{constant_path, split_index_suffix};

/// What a command was asked to operate on.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// No target given; infer from the current frame
    Implicit,
    /// A live object supplied by the host
    Object(&'a ObjectRef),
    /// Text typed by the user
    Text(&'a str),
}

impl<'a> Target<'a> {
    /// `Implicit` for `None`, `Text` otherwise.
    pub fn from_arg(arg: Option<&'a str>) -> Self {
        match arg {
            Some(text) => Self::Text(text),
            None => Self::Implicit,
        }
    }
}

/// Outcome of resolving a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub key: NoteKey,
    pub index: Option<NoteIndex>,
}

impl ResolvedTarget {
    fn new(key: NoteKey, index: Option<NoteIndex>) -> Self {
        Self { key, index }
    }
}

/// Resolves targets against a host session.
pub struct TargetResolver<'c> {
    context: &'c dyn SessionContext,
}

impl<'c> TargetResolver<'c> {
    pub fn new(context: &'c dyn SessionContext) -> Self {
        Self { context }
    }

    pub fn resolve(&self, target: Target<'_>) -> Result<ResolvedTarget> {
        let resolved = match target {
            Target::Implicit => ResolvedTarget::new(self.implicit_key(), None),
            Target::Object(object) => ResolvedTarget::new(Self::object_key(object), None),
            Target::Text(text) => self.resolve_text(text)?,
        };
        tracing::debug!(
            key = %resolved.key,
            index = ?resolved.index.map(NoteIndex::get),
            "Resolved note target"
        );
        Ok(resolved)
    }

    /// Key of a live object: its class, its own name for a module, or
    /// `Owner#method` for a method object.
    pub fn object_key(object: &ObjectRef) -> NoteKey {
        match object {
            ObjectRef::Instance { class_name } => NoteKey::module(class_name.as_str()),
            ObjectRef::Module { name } => NoteKey::module(name.as_str()),
            ObjectRef::Method { owner, name, .. } => NoteKey::method(owner, name),
        }
    }

    fn resolve_text(&self, text: &str) -> Result<ResolvedTarget> {
        let (body, index) = split_index_suffix(text.trim())?;
        let body = body.trim();

        if body.is_empty() {
            return Ok(ResolvedTarget::new(self.implicit_key(), index));
        }

        let key = match body.split_once(METHOD_SEPARATOR) {
            Some((owner, method)) => self.method_key(owner.trim(), method.trim())?,
            None => self.name_key(body)?,
        };
        Ok(ResolvedTarget::new(key, index))
    }

    /// `Owner#method`; an empty owner means the current frame's owner.
    fn method_key(&self, owner_expr: &str, method: &str) -> Result<NoteKey> {
        if !is_method_name(method) {
            return Err(NoteError::resolution(format!(
                "Invalid method name '{}'",
                method
            )));
        }
        let owner = if owner_expr.is_empty() {
            self.implicit_owner()
        } else {
            self.owner_name(owner_expr)?
        };
        Ok(NoteKey::method(&owner, method))
    }

    /// Class or module name that `expr` denotes as a method owner.
    fn owner_name(&self, expr: &str) -> Result<String> {
        match self.context.evaluate(expr) {
            Some(ObjectRef::Instance { class_name }) => Ok(class_name),
            Some(ObjectRef::Module { name }) => Ok(name),
            Some(ObjectRef::Method { owner, name, .. }) => Err(NoteError::resolution(format!(
                "'{}' is the method {}#{}, not a class or object",
                expr, owner, name
            ))),
            None => constant_path(expr).map(str::to_string).ok_or_else(|| {
                NoteError::resolution(format!("Cannot resolve owner '{}'", expr))
            }),
        }
    }

    /// A bare name: evaluated by the host first, then taken as a constant path.
    fn name_key(&self, body: &str) -> Result<NoteKey> {
        if let Some(object) = self.context.evaluate(body) {
            return Ok(Self::object_key(&object));
        }
        constant_path(body)
            .map(NoteKey::module)
            .ok_or_else(|| NoteError::resolution(format!("Cannot resolve target '{}'", body)))
    }

    fn implicit_key(&self) -> NoteKey {
        match self.context.current_frame() {
            ContextFrame::Method { owner, name } => NoteKey::method(&owner, &name),
            ContextFrame::Receiver(object) => Self::object_key(&object),
        }
    }

    fn implicit_owner(&self) -> String {
        match self.context.current_frame() {
            ContextFrame::Method { owner, .. } => owner,
            ContextFrame::Receiver(ObjectRef::Instance { class_name }) => class_name,
            ContextFrame::Receiver(ObjectRef::Module { name }) => name,
            ContextFrame::Receiver(ObjectRef::Method { owner, .. }) => owner,
        }
    }
}
