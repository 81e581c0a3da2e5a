//! Lazily resolved record references.

use redline_store::StoreResult;

/// A reference column resolved at most once per wrapper instance.
///
/// `Unresolved` means no lookup has happened yet; `Missing` memoizes a null
/// reference so repeated reads do not re-query the store. Reading through
/// `get` before resolution is a programming error, not a recoverable state.
#[derive(Debug, Clone, Default)]
pub enum LazyRef<T> {
    #[default]
    Unresolved,
    Missing,
    Present(T),
}

impl<T> LazyRef<T> {
    /// Resolve once with `fetch`; later calls are no-ops.
    pub fn resolve_with(
        &mut self,
        fetch: impl FnOnce() -> StoreResult<Option<T>>,
    ) -> StoreResult<()> {
        if matches!(self, LazyRef::Unresolved) {
            *self = match fetch()? {
                Some(value) => LazyRef::Present(value),
                None => LazyRef::Missing,
            };
        }
        Ok(())
    }

    /// The resolved value, or `None` for a null reference.
    ///
    /// # Panics
    /// If the reference was never resolved.
    pub fn get(&self) -> Option<&T> {
        match self {
            LazyRef::Unresolved => panic!("record reference read before resolution"),
            LazyRef::Missing => None,
            LazyRef::Present(value) => Some(value),
        }
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            LazyRef::Unresolved => panic!("record reference read before resolution"),
            LazyRef::Missing => None,
            LazyRef::Present(value) => Some(value),
        }
    }

    /// Replace the reference with a freshly assigned value.
    pub fn set(&mut self, value: T) {
        *self = LazyRef::Present(value);
    }

    /// True once `resolve_with` or `set` has run.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, LazyRef::Unresolved)
    }
}
