//! Component model for server-rendered Orbit trees
//!
//! This module contains the types and traits components are built from:
//! props, the context handed to each component, type-erased component
//! instances and the render tree they produce.

mod context;
mod error;
pub mod node;
pub mod props;


pub use context::{ContextProvider, ContextValue};
pub use error::ComponentError;
pub use node::{Node, NodeKind};

use std::{
    any::{Any, TypeId},
    fmt::Debug,
    sync::{Arc, Mutex},
};

/// Props trait - implemented by all component props types
pub trait Props: 'static + Send + Sync + Any {
    /// Get the type name for debugging
    fn type_name(&self) -> &'static str;

    /// Clone the props
    fn box_clone(&self) -> Box<dyn Props>;

    /// Convert to Any for downcasting
    fn as_any(&self) -> &dyn Any;
}

impl<T: 'static + Clone + Send + Sync> Props for T {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn box_clone(&self) -> Box<dyn Props> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Component trait - implemented by all UI components
pub trait Component: Send + Sync + Any {
    /// The props type for this component
    type Props: Props + Clone;

    /// Create a new component instance
    fn create(props: Self::Props, context: Context) -> Self
    where
        Self: Sized;

    /// Initialize the component - called immediately after creation
    /// Use this for validating props and publishing context values
    fn initialize(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Render component - returns child nodes
    fn render(&self) -> Result<Vec<Node>, ComponentError>;

    /// Convert to Any for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// Context passed to components providing access to shared values
#[derive(Clone, Debug, Default)]
pub struct Context {
    /// Context provider for parent-child communication
    context_provider: ContextProvider,
}

impl Context {
    /// Create a new context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new context that can see the values of `parent`
    pub fn with_parent(parent: &Context) -> Self {
        Self {
            context_provider: ContextProvider::with_parent(parent.context_provider.clone()),
        }
    }

    /// Make a value available to this component and its descendants
    pub fn provide<T: Clone + Send + Sync + Debug + 'static>(
        &self,
        value: T,
    ) -> Result<(), ComponentError> {
        self.context_provider.provide(value)
    }

    /// Read the nearest provided value of type `T`
    pub fn consume<T: Clone + Send + Sync + 'static>(&self) -> Option<T> {
        self.context_provider.consume::<T>()
    }

    /// Access the underlying provider
    pub fn provider(&self) -> &ContextProvider {
        &self.context_provider
    }
}

/// Trait for type-erased components
pub trait AnyComponent: Send + Sync + 'static {
    /// Render the component
    fn render(&self) -> Result<Vec<Node>, ComponentError>;

    /// Convert to Any for downcasting
    fn as_any(&self) -> &dyn Any;
}

impl<T: Component + 'static> AnyComponent for T {
    fn render(&self) -> Result<Vec<Node>, ComponentError> {
        Component::render(self)
    }

    fn as_any(&self) -> &dyn Any {
        Component::as_any(self)
    }
}

/// Wraps a component instance with the props it was created from
pub struct ComponentInstance {
    /// Component instance
    instance: Arc<Mutex<Box<dyn AnyComponent>>>,

    /// Props the component was created with
    props: Box<dyn Props>,

    /// Component type ID for type checking
    type_id: TypeId,
}

impl ComponentInstance {
    /// Create and initialize a component of type `C`
    pub fn create<C: Component + 'static>(
        props: C::Props,
        context: Context,
    ) -> Result<Self, ComponentError> {
        let mut component = C::create(props.clone(), context);
        component.initialize()?;
        Ok(Self::new(component, props))
    }

    /// Wrap an already created component
    pub fn new<C: Component + 'static>(instance: C, props: C::Props) -> Self {
        Self {
            instance: Arc::new(Mutex::new(Box::new(instance) as Box<dyn AnyComponent>)),
            props: Box::new(props),
            type_id: TypeId::of::<C>(),
        }
    }

    /// Whether this instance wraps a component of type `C`
    pub fn is<C: Component + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<C>()
    }

    /// Type name of the props, for diagnostics
    pub fn props_type_name(&self) -> &'static str {
        self.props.type_name()
    }

    /// A copy of the props, if they are of type `P`
    pub fn props<P: Props + Clone>(&self) -> Option<P> {
        self.props.as_any().downcast_ref::<P>().cloned()
    }

    /// Run `f` against the concrete component
    pub fn with_component<C, R>(&self, f: impl FnOnce(&C) -> R) -> Result<R, ComponentError>
    where
        C: Component + 'static,
    {
        let instance = self.instance.lock().map_err(|_| {
            ComponentError::LockError("Failed to lock component instance".to_string())
        })?;
        instance
            .as_any()
            .downcast_ref::<C>()
            .map(f)
            .ok_or(ComponentError::PropsMismatch {
                expected: TypeId::of::<C>(),
                got: self.type_id,
            })
    }

    /// Render the component
    pub fn render(&self) -> Result<Vec<Node>, ComponentError> {
        if let Ok(instance) = self.instance.lock() {
            instance.render()
        } else {
            Err(ComponentError::LockError(
                "Failed to lock component instance".to_string(),
            ))
        }
    }
}

impl Clone for ComponentInstance {
    fn clone(&self) -> Self {
        Self {
            instance: self.instance.clone(),
            props: self.props.box_clone(),
            type_id: self.type_id,
        }
    }
}

impl PartialEq for ComponentInstance {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.instance, &other.instance)
    }
}

impl Debug for ComponentInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentInstance")
            .field("type_id", &self.type_id)
            .field("props", &self.props.type_name())
            .finish()
    }
}
