//! Stable identity of a page type.

use std::any::{TypeId, type_name};
use std::fmt;

/// Identity of a concrete page type.
///
/// Compared by [`TypeId`]; the name is for logs and error messages.
#[derive(Clone, Copy)]
pub struct PageKind {
    id: TypeId,
    name: &'static str,
}

impl PageKind {
    /// Returns the kind of `P`.
    #[must_use]
    pub fn of<P: ?Sized + 'static>() -> Self {
        let full = type_name::<P>();
        let name = full.rsplit("::").next().unwrap_or(full);
        Self {
            id: TypeId::of::<P>(),
            name,
        }
    }

    /// Returns the type id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the short type name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for PageKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PageKind {}

impl std::hash::Hash for PageKind {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
