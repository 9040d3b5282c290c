//! Markup targets.

use super::MarkupGuard;
use std::sync::Arc;

/// Anything whose raw inner markup can be assigned from a string.
pub trait MarkupTarget {
    /// Tag name of the element (e.g. "DIV").
    fn tag_name(&self) -> &str;

    /// Current inner markup.
    fn inner_html(&self) -> &str;

    /// Replaces the inner markup. This is the unguarded, original setter.
    fn set_inner_html(&mut self, value: String);
}

/// Minimal in-memory element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    tag: String,
    inner_html: String,
}

impl Element {
    /// Creates an empty element. The tag name is upper-cased as HTML
    /// documents report it.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_uppercase(),
            inner_html: String::new(),
        }
    }
}

impl MarkupTarget for Element {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn inner_html(&self) -> &str {
        &self.inner_html
    }

    fn set_inner_html(&mut self, value: String) {
        self.inner_html = value;
    }
}

/// Element wrapper whose markup setter goes through a [`MarkupGuard`].
///
/// Call sites opt in by holding a `GuardedElement` instead of the bare
/// target.
#[derive(Debug)]
pub struct GuardedElement<T: MarkupTarget> {
    target: T,
    guard: Arc<MarkupGuard>,
}

impl<T: MarkupTarget> GuardedElement<T> {
    /// Wraps `target`.
    #[must_use]
    pub fn new(target: T, guard: Arc<MarkupGuard>) -> Self {
        Self { target, guard }
    }

    /// Assigns markup through the guard. Returns `true` if the value was
    /// flagged. The assignment happens either way.
    pub fn set_inner_html(&mut self, value: impl Into<String>) -> bool {
        self.guard.set_markup(&mut self.target, value)
    }

    /// Current inner markup.
    #[must_use]
    pub fn inner_html(&self) -> &str {
        self.target.inner_html()
    }

    /// Tag name of the wrapped element.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        self.target.tag_name()
    }

    /// Borrows the wrapped element.
    #[must_use]
    pub fn get_ref(&self) -> &T {
        &self.target
    }

    /// Unwraps the element.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.target
    }
}
