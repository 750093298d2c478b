//! Context passing from providers to descendants

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};

use crate::component::ComponentError;

/// A type-erased value that can be stored in a context
pub trait ContextValue: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn debug_string(&self) -> String;
}

impl<T: Any + Clone + Send + Sync + Debug + 'static> ContextValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn debug_string(&self) -> String {
        format!("{:?}", self)
    }
}

/// Typed values shared between a provider and the components below it
///
/// Lookups fall back to the parent chain, so a value provided higher up is
/// visible until a closer provider shadows it.
#[derive(Clone, Default)]
pub struct ContextProvider {
    parent: Option<Box<ContextProvider>>,
    values: Arc<RwLock<HashMap<TypeId, Box<dyn ContextValue>>>>,
}

impl Debug for ContextProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values = self
            .values
            .read()
            .map(|v| v.values().map(|value| value.debug_string()).collect())
            .unwrap_or_else(|_| Vec::<String>::new());
        f.debug_struct("ContextProvider")
            .field("parent", &self.parent.is_some())
            .field("values", &values)
            .finish()
    }
}

impl ContextProvider {
    /// Create a new context provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context provider with a parent
    pub fn with_parent(parent: ContextProvider) -> Self {
        Self {
            parent: Some(Box::new(parent)),
            values: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Set a value in the context, replacing any value of the same type
    pub fn provide<T: Clone + Send + Sync + Debug + 'static>(
        &self,
        value: T,
    ) -> Result<(), ComponentError> {
        let mut values = self.values.write().map_err(|_| {
            ComponentError::LockError("Failed to acquire write lock for context values".to_string())
        })?;
        values.insert(TypeId::of::<T>(), Box::new(value));
        Ok(())
    }

    /// Get a value from this context or the nearest ancestor that has one
    pub fn consume<T: Clone + Send + Sync + 'static>(&self) -> Option<T> {
        let local = self.values.read().ok().and_then(|values| {
            values
                .get(&TypeId::of::<T>())
                .and_then(|value| value.as_any().downcast_ref::<T>().cloned())
        });

        match local {
            Some(value) => Some(value),
            None => self.parent.as_ref().and_then(|parent| parent.consume::<T>()),
        }
    }

    /// Check if a type exists in the context or its ancestors
    pub fn has<T: 'static>(&self) -> bool {
        let exists_here = self
            .values
            .read()
            .map(|values| values.contains_key(&TypeId::of::<T>()))
            .unwrap_or(false);

        exists_here || self.parent.as_ref().is_some_and(|parent| parent.has::<T>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Accent(&'static str);

    #[test]
    fn test_consume_falls_back_to_parent() {
        let root = ContextProvider::new();
        root.provide(Accent("blue")).unwrap();

        let child = ContextProvider::with_parent(root);
        assert!(child.has::<Accent>());
        assert_eq!(child.consume::<Accent>(), Some(Accent("blue")));
    }

    #[test]
    fn test_child_value_shadows_parent() {
        let root = ContextProvider::new();
        root.provide(Accent("blue")).unwrap();

        let child = ContextProvider::with_parent(root.clone());
        child.provide(Accent("red")).unwrap();

        assert_eq!(child.consume::<Accent>(), Some(Accent("red")));
        assert_eq!(root.consume::<Accent>(), Some(Accent("blue")));
    }

    #[test]
    fn test_missing_value() {
        let provider = ContextProvider::new();
        assert!(!provider.has::<Accent>());
        assert_eq!(provider.consume::<Accent>(), None);
    }
}
