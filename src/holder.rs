//! Wrapper for a single mock and the metadata used to match it.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::reflect::{Mock, Reflect, TypeKey};

/// A mock value paired with the name of the fixture member it came from,
/// an optional user-supplied alias and the declared generic signature of
/// the source member.
///
/// Holders are built once per discovered fixture member and are read-only
/// for every selector; cloning shares the mock value.
#[derive(Clone, Default)]
pub struct MockHolder {
    mock: Option<Mock>,
    source_name: String,
    name: String,
    generics: Vec<TypeKey>,
}

static EMPTY: Lazy<MockHolder> = Lazy::new(MockHolder::default);

impl MockHolder {
    pub fn new(mock: Mock, source_name: impl Into<String>) -> Self {
        Self {
            mock: Some(mock),
            source_name: source_name.into(),
            name: String::new(),
            generics: Vec::new(),
        }
    }

    /// Wrap an owned mock value.
    pub fn of<M: Reflect>(mock: M, source_name: impl Into<String>) -> Self {
        Self::new(Arc::new(mock), source_name)
    }

    pub fn create(mock: Mock, source_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(mock, source_name).named(name)
    }

    /// The shared "no mock" sentinel.
    pub fn empty() -> &'static MockHolder {
        &EMPTY
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_generics(mut self, generics: Vec<TypeKey>) -> Self {
        self.generics = generics;
        self
    }

    pub fn mock(&self) -> Option<&Mock> {
        self.mock.as_ref()
    }

    /// Name of the fixture member this mock was declared from, `""` if absent.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// User-supplied alias, `""` if unset.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn generics(&self) -> &[TypeKey] {
        &self.generics
    }
}

impl PartialEq for MockHolder {
    fn eq(&self, other: &Self) -> bool {
        let same_mock = match (&self.mock, &other.mock) {
            // Compare data pointers, not vtables.
            (Some(a), Some(b)) => Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const (),
            (None, None) => true,
            _ => false,
        };
        same_mock
            && self.source_name == other.source_name
            && self.name == other.name
            && self.generics == other.generics
    }
}

impl fmt::Debug for MockHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockHolder")
            .field("source_name", &self.source_name)
            .field("name", &self.name)
            .field("mock", &self.mock.as_ref().map(|m| m.type_key()))
            .finish()
    }
}

impl fmt::Display for MockHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mock {
            Some(mock) => write!(f, "{}: {}", self.source_name, mock.type_key()),
            None => write!(f, "{}: <empty>", self.source_name),
        }
    }
}
