//! Hierarchical signal namespace.
//!
//! Signals are registered under dotted paths such as `top.core.alu.result`. The
//! namespace is a tree of scopes whose leaves are signal identifiers. Scopes are
//! created on demand the first time a path passes through them and reused after
//! that; a name is either a scope or a signal, never both.

use std::collections::BTreeMap;

use crate::common::constants::PATH_SEPARATOR;
use crate::common::{ConstructionError, Result, SignalId, SimError};

/// One node of the namespace tree.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Node {
    Signal(SignalId),
    Scope(Scope),
}

impl Node {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Signal(_) => "signal",
            Self::Scope(_) => "scope",
        }
    }
}

/// Interior node: child nodes by name segment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Scope {
    children: BTreeMap<String, Node>,
}

/// Tree of named signals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignalNamespace {
    root: Scope,
    len: usize,
}

/// Splits a dotted path into segments.
///
/// # Errors
///
/// [`ConstructionError::InvalidPath`] if the path is empty or has an empty segment.
pub fn split_path(path: &str) -> Result<Vec<&str>> {
    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(ConstructionError::InvalidPath {
            path: path.to_owned(),
        }
        .into());
    }
    Ok(segments)
}

/// Joins path segments with [`PATH_SEPARATOR`].
fn join_path(segments: &[&str]) -> String {
    let mut buf = [0; 4];
    segments.join(&*PATH_SEPARATOR.encode_utf8(&mut buf))
}

/// Rejects multi-element signal shapes.
///
/// `type_width` lists the element count of each dimension reported by the backend.
/// Only scalars (no dimensions, or a single dimension of one element) are supported.
///
/// # Errors
///
/// [`SimError::Shape`] for any array shape.
pub fn check_scalar(path: &str, type_width: &[usize]) -> Result<()> {
    match type_width {
        [] | [1] => Ok(()),
        dims => Err(SimError::Shape {
            path: path.to_owned(),
            reason: format!("array signals are not supported (dimensions {dims:?})"),
        }),
    }
}

impl SignalNamespace {
    /// Creates an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered signals.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no signal is registered.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Binds `path` to `id`, creating intermediate scopes as needed.
    ///
    /// Validation happens before anything is inserted, so a failed registration leaves
    /// the tree unchanged.
    ///
    /// # Arguments
    ///
    /// * `path` - Name segments from the outermost scope to the signal.
    /// * `id` - Handle to bind to the last segment.
    /// * `type_width` - Backend-reported dimensions of the signal.
    ///
    /// # Errors
    ///
    /// [`SimError::Shape`] for array shapes, [`ConstructionError::InvalidPath`] for an
    /// empty path or segment, and [`ConstructionError::PathConflict`] if a prefix
    /// names a signal or the last segment is already bound.
    pub fn register(&mut self, path: &[&str], id: SignalId, type_width: &[usize]) -> Result<()> {
        let dotted = join_path(path);
        check_scalar(&dotted, type_width)?;
        if path.is_empty() || path.iter().any(|s| s.is_empty()) {
            return Err(ConstructionError::InvalidPath { path: dotted }.into());
        }
        self.check_free(path)?;

        let Some((leaf, scopes)) = path.split_last() else {
            return Err(ConstructionError::InvalidPath { path: dotted }.into());
        };
        let mut scope = &mut self.root;
        for segment in scopes {
            let node = scope
                .children
                .entry((*segment).to_owned())
                .or_insert_with(|| Node::Scope(Scope::default()));
            scope = match node {
                Node::Scope(inner) => inner,
                Node::Signal(_) => {
                    return Err(ConstructionError::PathConflict {
                        path: dotted,
                        existing: "signal",
                    }
                    .into());
                }
            };
        }
        let _ = scope.children.insert((*leaf).to_owned(), Node::Signal(id));
        self.len += 1;
        Ok(())
    }

    /// Binds the dotted `path` to `id`.
    ///
    /// # Errors
    ///
    /// As [`register`](Self::register).
    pub fn register_dotted(&mut self, path: &str, id: SignalId, type_width: &[usize]) -> Result<()> {
        let segments = split_path(path)?;
        self.register(&segments, id, type_width)
    }

    fn check_free(&self, path: &[&str]) -> Result<()> {
        let mut scope = &self.root;
        for (depth, segment) in path.iter().enumerate() {
            let is_leaf = depth + 1 == path.len();
            match scope.children.get(*segment) {
                None => return Ok(()),
                Some(Node::Scope(inner)) if !is_leaf => scope = inner,
                Some(node) => {
                    return Err(ConstructionError::PathConflict {
                        path: join_path(&path[..=depth]),
                        existing: node.kind(),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Looks up the signal bound to `path`.
    pub fn lookup(&self, path: &[&str]) -> Option<SignalId> {
        let (leaf, scopes) = path.split_last()?;
        let mut scope = &self.root;
        for segment in scopes {
            match scope.children.get(*segment)? {
                Node::Scope(inner) => scope = inner,
                Node::Signal(_) => return None,
            }
        }
        match scope.children.get(*leaf)? {
            Node::Signal(id) => Some(*id),
            Node::Scope(_) => None,
        }
    }

    /// Looks up the signal bound to the dotted `path`.
    pub fn lookup_dotted(&self, path: &str) -> Option<SignalId> {
        let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        self.lookup(&segments)
    }

    /// Returns `true` if `path` names a scope.
    pub fn is_scope(&self, path: &str) -> bool {
        let mut scope = &self.root;
        for segment in path.split(PATH_SEPARATOR) {
            match scope.children.get(segment) {
                Some(Node::Scope(inner)) => scope = inner,
                _ => return false,
            }
        }
        true
    }

    /// Every registered signal as `(dotted path, id)`, sorted by path.
    pub fn signals(&self) -> Vec<(String, SignalId)> {
        let mut out = Vec::with_capacity(self.len);
        collect(&self.root, &mut String::new(), &mut out);
        out
    }
}

fn collect(scope: &Scope, prefix: &mut String, out: &mut Vec<(String, SignalId)>) {
    for (name, node) in &scope.children {
        let mark = prefix.len();
        if !prefix.is_empty() {
            prefix.push(PATH_SEPARATOR);
        }
        prefix.push_str(name);
        match node {
            Node::Signal(id) => out.push((prefix.clone(), *id)),
            Node::Scope(inner) => collect(inner, prefix, out),
        }
        prefix.truncate(mark);
    }
}
