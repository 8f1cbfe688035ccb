//! Builds an instance of the class under test from the candidate pool.
//!
//! Constructors are tried in ascending parameter count: the zero-parameter
//! constructor first, then each parameterized one whose argument list can
//! be fully assembled by type matching. Individual construction failures
//! are swallowed; only exhausting every constructor is an error.

use std::fmt;

use tracing::{debug, trace};

use crate::holder::MockHolder;
use crate::inject::InjectionError;
use crate::reflect::{Mock, TypeKey};
use crate::select::{ByTypeSelector, MockSelector};

/// Payload-free failure of a single constructor trial.
///
/// The engine cannot tell an incompatible argument from a failure inside
/// the target, so the distinction is deliberately not representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstructionFailed;

/// One constructor of a class under test: its declared parameter types and
/// a factory invoking it with the selected arguments.
pub struct Constructor<T> {
    params: Vec<TypeKey>,
    factory: Box<dyn Fn(&[Mock]) -> Result<T, ConstructionFailed> + Send + Sync>,
}

impl<T> Constructor<T> {
    pub fn new<F>(params: Vec<TypeKey>, factory: F) -> Self
    where
        F: Fn(&[Mock]) -> Result<T, ConstructionFailed> + Send + Sync + 'static,
    {
        Self {
            params,
            factory: Box::new(factory),
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn params(&self) -> &[TypeKey] {
        &self.params
    }

    fn invoke(&self, args: &[Mock]) -> Result<T, ConstructionFailed> {
        (self.factory)(args)
    }
}

impl<T> fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("params", &self.params)
            .finish()
    }
}

/// Introspection of a class under test: its name and declared
/// constructors, any visibility, in declaration order.
#[derive(Debug)]
pub struct ClassDescriptor<T> {
    name: &'static str,
    constructors: Vec<Constructor<T>>,
}

impl<T> ClassDescriptor<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            constructors: Vec::new(),
        }
    }

    pub fn with_constructor(mut self, constructor: Constructor<T>) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Creates a new instance of a class, preferring constructors with fewer
/// parameters and falling back across arity until one succeeds.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassInitializer {
    by_type: ByTypeSelector,
}

impl ClassInitializer {
    pub fn new() -> Self {
        Self {
            by_type: ByTypeSelector,
        }
    }

    /// Initialize an instance of the described class, drawing constructor
    /// arguments from `mocks`.
    pub fn initialize<T>(
        &self,
        class: &ClassDescriptor<T>,
        mocks: &[MockHolder],
    ) -> Result<T, InjectionError> {
        let mut ordered: Vec<&Constructor<T>> = class.constructors.iter().collect();
        ordered.sort_by_key(|constructor| constructor.arity());

        if let Some(instance) = self.with_default_constructor(&ordered) {
            return Ok(instance);
        }
        if let Some(instance) = self.with_parameterized_constructor(&ordered, mocks) {
            return Ok(instance);
        }
        Err(InjectionError::Unconstructible {
            class: class.name.to_string(),
        })
    }

    fn with_default_constructor<T>(&self, ordered: &[&Constructor<T>]) -> Option<T> {
        let default = ordered.iter().find(|constructor| constructor.arity() == 0)?;
        default.invoke(&[]).ok()
    }

    fn with_parameterized_constructor<T>(
        &self,
        ordered: &[&Constructor<T>],
        mocks: &[MockHolder],
    ) -> Option<T> {
        for constructor in ordered.iter().filter(|c| c.arity() > 0) {
            let Some(args) = self.select_arguments(constructor, mocks) else {
                trace!(?constructor, "incomplete argument list, skipping");
                continue;
            };
            match constructor.invoke(&args) {
                Ok(instance) => {
                    debug!(?constructor, "constructed instance");
                    return Some(instance);
                }
                Err(ConstructionFailed) => continue,
            }
        }
        None
    }

    /// A complete argument list for the constructor, or `None` as soon as
    /// one parameter has no matching mock.
    fn select_arguments<T>(
        &self,
        constructor: &Constructor<T>,
        mocks: &[MockHolder],
    ) -> Option<Vec<Mock>> {
        let mut args = Vec::with_capacity(constructor.arity());
        for param in constructor.params() {
            let matching = self.by_type.select(param, mocks);
            let holder = matching.first()?;
            args.push(holder.mock()?.clone());
        }
        Some(args)
    }
}
