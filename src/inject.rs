//! Injectors placing mocks into a target through its members or setters.
//!
//! Injection is best-effort and silent: each consumption site runs the
//! full selector chain against the original pool, a site with no selected
//! mock is simply left untouched, and only a genuine collaborator failure
//! surfaces as an error.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::holder::MockHolder;
use crate::reflect::{MemberSite, Mock, SetterSite, TypeKey};
use crate::select::{
    ByGenericSelector, ByNameSelector, ByTypeSelector, MockSelector, SelectionStrategy,
};

/// Errors surfaced by injection and construction.
#[derive(Error, Debug)]
pub enum InjectionError {
    #[error("could not construct `{class}` from the available mocks; provide a pre-built instance instead")]
    Unconstructible { class: String },
    #[error("cannot set value of member `{member}`")]
    MemberWrite { member: String },
    #[error("cannot invoke setter `{method}`")]
    SetterInvocation { method: String },
}

/// The scanning and member-access collaborators of a class under test,
/// rolled into one trait implemented by the fixture.
pub trait InjectionTarget {
    /// Marker-carrying members in declaration order, inherited members
    /// included up to (but excluding) the root type.
    fn marked_members(&self) -> Vec<MemberSite>;

    /// Public, non-static setters.
    fn setters(&self) -> Vec<SetterSite> {
        Vec::new()
    }

    /// Write collaborator. Implementations must silently skip static and
    /// constant members as well as absent values; [MemberSite::accepts_write]
    /// reports the former. Only a genuine access failure is an error.
    fn write_member(&mut self, site: &MemberSite, value: Option<Mock>)
        -> Result<(), InjectionError>;

    /// Invoke collaborator for setter injection.
    fn invoke_setter(&mut self, site: &SetterSite, value: Mock) -> Result<(), InjectionError> {
        let _ = value;
        Err(InjectionError::SetterInvocation {
            method: site.method_name.clone(),
        })
    }

    /// Read collaborator; absent when the member was never set.
    fn member_value(&self, site: &MemberSite) -> Option<Mock> {
        let _ = site;
        None
    }
}

/// The fixed selector chain applied per consumption site:
/// type distance, then generic signature, then name priority.
struct SelectorChain {
    mocks: Vec<MockHolder>,
    by_type: ByTypeSelector,
    by_generic: ByGenericSelector,
    by_name: ByNameSelector,
}

impl SelectorChain {
    fn new(mocks: Vec<MockHolder>, by_name: ByNameSelector) -> Self {
        Self {
            mocks,
            by_type: ByTypeSelector,
            by_generic: ByGenericSelector,
            by_name,
        }
    }

    fn select(&self, name: &str, declared_type: TypeKey, generics: &[TypeKey]) -> Vec<MockHolder> {
        let by_type = self.by_type.select(&declared_type, &self.mocks);
        let by_generic = self.by_generic.select(generics, &by_type);
        self.by_name.select(name, &by_generic)
    }
}

/// Injects the given mocks into the members of a target. Mocks are matched
/// by type, generic signature and name.
pub struct MockInjector {
    chain: SelectorChain,
}

impl MockInjector {
    pub fn new(mocks: Vec<MockHolder>) -> Self {
        Self {
            chain: SelectorChain::new(mocks, ByNameSelector::new()),
        }
    }

    /// An injector whose name matching uses its own fixed strategy list.
    pub fn with_strategies<I>(mocks: Vec<MockHolder>, strategies: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn SelectionStrategy>>,
    {
        Self {
            chain: SelectorChain::new(mocks, ByNameSelector::with_strategies(strategies)),
        }
    }

    /// Inject the mocks into `target`, returning the same reference.
    ///
    /// Members with no matching mock are left untouched.
    pub fn inject_to<'t, T: InjectionTarget>(
        &self,
        target: &'t mut T,
    ) -> Result<&'t mut T, InjectionError> {
        for site in target.marked_members() {
            let selected = self
                .chain
                .select(&site.name, site.declared_type, &site.generics);
            if let Some(holder) = selected.first() {
                debug!(member = %site.name, mock = %holder, "injecting member");
                target.write_member(&site, holder.mock().cloned())?;
            }
        }
        Ok(target)
    }
}

/// Injects the given mocks into a target through its setters.
pub struct SetterMockInjector {
    chain: SelectorChain,
}

impl SetterMockInjector {
    pub fn new(mocks: Vec<MockHolder>) -> Self {
        Self {
            chain: SelectorChain::new(mocks, ByNameSelector::new()),
        }
    }

    pub fn with_strategies<I>(mocks: Vec<MockHolder>, strategies: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn SelectionStrategy>>,
    {
        Self {
            chain: SelectorChain::new(mocks, ByNameSelector::with_strategies(strategies)),
        }
    }

    /// Inject the mocks through the setters of `target`, returning the
    /// same reference. Setters with no matching mock are not invoked.
    pub fn inject_to<'t, T: InjectionTarget>(
        &self,
        target: &'t mut T,
    ) -> Result<&'t mut T, InjectionError> {
        for site in target.setters() {
            let member_name = setter_member_name(&site.method_name);
            let selected =
                self.chain
                    .select(&member_name, site.param_type, &site.param_generics);
            if let Some(holder) = selected.first() {
                if let Some(mock) = holder.mock() {
                    debug!(setter = %site.method_name, mock = %holder, "injecting via setter");
                    target.invoke_setter(&site, mock.clone())?;
                }
            }
        }
        Ok(target)
    }
}

/// Member name addressed by a setter: the fixed 3-character `set` prefix
/// is stripped, one leading underscore after it is dropped, and the first
/// remaining character is lower-cased. `"setName"` and `"set_name"` both
/// yield `"name"`. A name without the prefix is returned unchanged.
pub fn setter_member_name(setter_name: &str) -> String {
    let Some(rest) = setter_name.strip_prefix("set") else {
        return setter_name.to_string();
    };
    let rest = rest.strip_prefix('_').unwrap_or(rest);
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
