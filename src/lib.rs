//! Test-support crate that automatically places pre-created mocks into an object under test.
//!
//! # Simple use case
//!
//! ```
//! # use std::sync::Arc;
//! # use mockwire::*;
//! // Mock types declared by the test fixture
//! struct HttpStub;
//! reflect_mock!(HttpStub);
//!
//! // The class under test, described to the engine by the fixture
//! #[derive(Default)]
//! struct Service {
//!     http: Option<Mock>,
//! }
//!
//! impl InjectionTarget for Service {
//!     fn marked_members(&self) -> Vec<MemberSite> {
//!         vec![MemberSite::new("http", TypeKey::of::<HttpStub>())]
//!     }
//!
//!     fn write_member(
//!         &mut self,
//!         site: &MemberSite,
//!         value: Option<Mock>,
//!     ) -> Result<(), InjectionError> {
//!         if site.accepts_write() && site.name == "http" {
//!             if let Some(value) = value {
//!                 self.http = Some(value);
//!             }
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<(), InjectionError> {
//! let injector = MockInjector::new(vec![MockHolder::of(HttpStub, "http")]);
//! let mut service = Service::default();
//! injector.inject_to(&mut service)?;
//! assert!(service.http.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! # Mechanism
//!
//! The engine does not create mocks and is not a dependency-injection
//! container: it only decides which of the pre-created candidates goes
//! where, and places it.
//!
//! * Every candidate is wrapped in a [MockHolder] carrying the mock value,
//!   the fixture member name it was declared from, an optional alias and
//!   the declared generic signature.
//! * Per consumption site (member, setter parameter or constructor
//!   parameter) a fixed selector chain narrows the full pool:
//!   [ByTypeSelector] keeps the candidates at minimal inheritance distance,
//!   [ByGenericSelector] keeps exact generic-signature matches, and
//!   [ByNameSelector] picks the single best-named candidate.
//! * [MockInjector] and [SetterMockInjector] run the chain per member or
//!   setter and assign through the [InjectionTarget] collaborator; sites
//!   with no match are silently left untouched.
//! * [ClassInitializer] builds the object under test when the caller has
//!   no instance, trying constructors in ascending parameter count and
//!   swallowing individual construction failures.
//!
//! Runtime type information is supplied by the fixture through the
//! [Reflect] trait (see [reflect_mock]); the engine itself performs no
//! introspection.

mod construct;
mod holder;
mod inject;
mod reflect;
mod select;

pub use construct::{ClassDescriptor, ClassInitializer, ConstructionFailed, Constructor};
pub use holder::MockHolder;
pub use inject::{
    setter_member_name, InjectionError, InjectionTarget, MockInjector, SetterMockInjector,
};
pub use reflect::{inheritance_distance, MemberSite, Mock, Reflect, SetterSite, TypeKey};
pub use select::{
    builtin_strategies, override_default_strategies, ByGenericSelector, ByNameSelector,
    ByTypeSelector, MockSelector, NameContains, NameEquals, NameEqualsIgnoreCase,
    SelectionStrategy, StrategyList,
};
