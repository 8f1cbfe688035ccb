//! Host-introspection capability consumed by the selection engine.
//!
//! The engine never inspects values on its own: every mock carries its own
//! type metadata through the [Reflect] trait, and every class under test is
//! described by the consumption-site descriptors defined here. This is the
//! runtime-reflection seam of the library, supplied by the test fixture
//! (usually through the [crate::reflect_mock] macro).

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Identity of a type, the unit of all type comparison in the engine.
///
/// Two keys are equal exactly when they refer to the same type. Keys for
/// trait objects (`TypeKey::of::<dyn MyTrait>()`) identify capability
/// targets.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: 'static + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Type metadata reported by a mock value.
///
/// * [Reflect::type_key] is the most-derived type of the value.
/// * [Reflect::ancestry] is the ordered ancestor chain, nearest first,
///   up to but excluding the root of all types.
/// * [Reflect::capabilities] lists the interface-like types the value
///   satisfies without them appearing in the ancestor chain.
pub trait Reflect: Any + Send + Sync {
    fn type_key(&self) -> TypeKey;

    fn ancestry(&self) -> Vec<TypeKey> {
        Vec::new()
    }

    fn capabilities(&self) -> Vec<TypeKey> {
        Vec::new()
    }

    /// Access to the underlying value, for downcasting by fixtures.
    fn as_any(&self) -> &dyn Any;
}

/// Shared, non-owning reference to a mock value.
pub type Mock = Arc<dyn Reflect>;

/// Declare the type metadata of a mock type.
///
/// ```
/// use mockwire::{reflect_mock, Reflect, TypeKey};
///
/// trait Transport: Send + Sync {}
///
/// struct BaseStub;
/// struct DerivedStub;
/// impl Transport for DerivedStub {}
///
/// reflect_mock!(BaseStub);
/// reflect_mock!(DerivedStub, BaseStub; dyn Transport);
///
/// assert_eq!(DerivedStub.ancestry(), vec![TypeKey::of::<BaseStub>()]);
/// ```
#[macro_export]
macro_rules! reflect_mock {
    ($Type:ty $(, $Ancestor:ty)* $(; $($Capability:ty),+)?) => {
        impl $crate::Reflect for $Type {
            fn type_key(&self) -> $crate::TypeKey {
                $crate::TypeKey::of::<$Type>()
            }

            fn ancestry(&self) -> Vec<$crate::TypeKey> {
                vec![$($crate::TypeKey::of::<$Ancestor>()),*]
            }

            fn capabilities(&self) -> Vec<$crate::TypeKey> {
                vec![$($($crate::TypeKey::of::<$Capability>()),+)?]
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    };
}

/// Distance of a value to a target type in the inheritance tree.
///
/// Zero for an exact type match, the number of ancestor steps otherwise.
/// A target satisfied only as a capability counts the whole chain plus one,
/// ranking it below any ancestor match. `None` when the value is not an
/// instance of the target at all.
pub fn inheritance_distance(value: &dyn Reflect, target: TypeKey) -> Option<usize> {
    if value.type_key() == target {
        return Some(0);
    }
    let chain = value.ancestry();
    if let Some(step) = chain.iter().position(|ancestor| *ancestor == target) {
        return Some(step + 1);
    }
    if value.capabilities().contains(&target) {
        return Some(chain.len() + 1);
    }
    None
}

/// One member consumption site, as reported by the marker scanner.
#[derive(Clone, Debug)]
pub struct MemberSite {
    pub name: String,
    pub declared_type: TypeKey,
    pub generics: Vec<TypeKey>,
    pub is_static: bool,
    pub is_constant: bool,
}

impl MemberSite {
    pub fn new(name: impl Into<String>, declared_type: TypeKey) -> Self {
        Self {
            name: name.into(),
            declared_type,
            generics: Vec::new(),
            is_static: false,
            is_constant: false,
        }
    }

    pub fn with_generics(mut self, generics: Vec<TypeKey>) -> Self {
        self.generics = generics;
        self
    }

    pub fn constant(mut self) -> Self {
        self.is_constant = true;
        self
    }

    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Whether the member write collaborator may assign to this site.
    pub fn accepts_write(&self) -> bool {
        !self.is_static && !self.is_constant
    }
}

/// One setter consumption site: the sole parameter of a public,
/// non-static method whose name starts with the `set` prefix.
#[derive(Clone, Debug)]
pub struct SetterSite {
    pub method_name: String,
    pub param_type: TypeKey,
    pub param_generics: Vec<TypeKey>,
}

impl SetterSite {
    pub fn new(method_name: impl Into<String>, param_type: TypeKey) -> Self {
        Self {
            method_name: method_name.into(),
            param_type,
            param_generics: Vec::new(),
        }
    }

    pub fn with_generics(mut self, generics: Vec<TypeKey>) -> Self {
        self.param_generics = generics;
        self
    }
}
