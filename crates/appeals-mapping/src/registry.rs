//! Submapper registry
//!
//! Provides [`Submapper`], the single-field view-model contract, and
//! [`SubmapperRegistry`], an insertion-ordered map of field id to submapper.

use crate::error::MappingError;
use appeals_components::FieldInstruction;
use indexmap::IndexMap;
use std::fmt;

/// Single-field view-model function
///
/// A submapper reads what it needs from the shared context and returns one
/// [`FieldInstruction`]. It must be a pure function of the context: no I/O,
/// no hidden state, same context in, same instruction out.
pub trait Submapper<C: ?Sized>: Send + Sync {
    /// Map the context to this field's instruction
    ///
    /// # Errors
    /// [`MappingError::MissingField`] / [`MappingError::InvalidValue`] when the
    /// context lacks something this field requires.
    fn map(&self, context: &C) -> Result<FieldInstruction, MappingError>;
}

impl<C: ?Sized, F> Submapper<C> for F
where
    F: Fn(&C) -> Result<FieldInstruction, MappingError> + Send + Sync,
{
    #[inline]
    fn map(&self, context: &C) -> Result<FieldInstruction, MappingError> {
        self(context)
    }
}

/// Insertion-ordered registry of submappers keyed by field id
///
/// Ids are unique; registering an id twice is rejected.
pub struct SubmapperRegistry<C: ?Sized> {
    submappers: IndexMap<String, Box<dyn Submapper<C>>>,
}

impl<C: ?Sized> Default for SubmapperRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> fmt::Debug for SubmapperRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmapperRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}

impl<C: ?Sized> SubmapperRegistry<C> {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            submappers: IndexMap::new(),
        }
    }

    /// Register a submapper under `id`
    ///
    /// # Errors
    /// [`MappingError::DuplicateSubmapper`] if `id` is already registered.
    pub fn register<S>(&mut self, id: impl Into<String>, submapper: S) -> Result<(), MappingError>
    where
        S: Submapper<C> + 'static,
    {
        let id = id.into();
        if self.submappers.contains_key(&id) {
            return Err(MappingError::DuplicateSubmapper(id));
        }
        self.submappers.insert(id, Box::new(submapper));
        Ok(())
    }

    /// Builder-style [`register`](Self::register)
    ///
    /// # Errors
    /// [`MappingError::DuplicateSubmapper`] if `id` is already registered.
    pub fn with<S>(mut self, id: impl Into<String>, submapper: S) -> Result<Self, MappingError>
    where
        S: Submapper<C> + 'static,
    {
        self.register(id, submapper)?;
        Ok(self)
    }

    /// Append every entry of `other`, keeping its order
    ///
    /// # Errors
    /// [`MappingError::DuplicateSubmapper`] on the first shared id.
    pub fn extend(&mut self, other: Self) -> Result<(), MappingError> {
        for (id, submapper) in other.submappers {
            if self.submappers.contains_key(&id) {
                return Err(MappingError::DuplicateSubmapper(id));
            }
            self.submappers.insert(id, submapper);
        }
        Ok(())
    }

    /// Look up a submapper
    #[inline]
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn Submapper<C>> {
        self.submappers.get(id).map(|s| &**s)
    }

    /// Check if an id is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.submappers.contains_key(id)
    }

    /// Registered ids in registration order
    #[inline]
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.submappers.keys().map(String::as_str).collect()
    }

    /// Number of submappers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.submappers.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.submappers.is_empty()
    }

    /// Iterate `(id, submapper)` in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Submapper<C>)> {
        self.submappers.iter().map(|(id, s)| (id.as_str(), &**s))
    }
}
