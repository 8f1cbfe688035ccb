//! Selection rules narrowing a candidate pool against one criterion each.
//!
//! Three selectors cooperate, always running against a caller-supplied pool
//! and never mutating it:
//!
//! * [ByTypeSelector] keeps the candidates closest to a target type in the
//!   inheritance tree.
//! * [ByGenericSelector] keeps the candidates whose declared generic
//!   signature equals the target's, element for element.
//! * [ByNameSelector] picks the single best candidate under an ordered list
//!   of name-matching strategies.

use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use tracing::trace;

use crate::holder::MockHolder;
use crate::reflect::{inheritance_distance, TypeKey};

/// Unified interface for selecting mocks according to one rule.
pub trait MockSelector<C: ?Sized> {
    /// Narrow `mocks` against `selection`; the input pool is left untouched.
    fn select(&self, selection: &C, mocks: &[MockHolder]) -> Vec<MockHolder>;
}

/// Selects the mocks which are the closest to the target type.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByTypeSelector;

impl MockSelector<TypeKey> for ByTypeSelector {
    fn select(&self, target: &TypeKey, mocks: &[MockHolder]) -> Vec<MockHolder> {
        let mut closest = Vec::new();
        let mut closest_dist = usize::MAX;
        for holder in mocks {
            let Some(mock) = holder.mock() else { continue };
            match inheritance_distance(mock.as_ref(), *target) {
                Some(dist) if dist < closest_dist => {
                    closest_dist = dist;
                    closest.clear();
                    closest.push(holder.clone());
                }
                Some(dist) if dist == closest_dist => closest.push(holder.clone()),
                _ => {}
            }
        }
        if closest_dist == usize::MAX {
            closest.clear();
        }
        trace!(target = %target, matched = closest.len(), "selected by type");
        closest
    }
}

/// Selects the mocks which have the same generic signature.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByGenericSelector;

impl MockSelector<[TypeKey]> for ByGenericSelector {
    fn select(&self, target: &[TypeKey], mocks: &[MockHolder]) -> Vec<MockHolder> {
        mocks
            .iter()
            .filter(|holder| holder.generics() == target)
            .cloned()
            .collect()
    }
}

/// A single name-matching rule consulted by [ByNameSelector].
pub trait SelectionStrategy: Send + Sync {
    /// Whether the target member name and the mock's source name are
    /// acceptable to this rule.
    fn is_matching(&self, target_name: &str, source_name: &str) -> bool;
}

/// Exact name equality.
#[derive(Clone, Copy, Debug, Default)]
pub struct NameEquals;

impl SelectionStrategy for NameEquals {
    fn is_matching(&self, target_name: &str, source_name: &str) -> bool {
        target_name == source_name
    }
}

/// Case-insensitive name equality.
#[derive(Clone, Copy, Debug, Default)]
pub struct NameEqualsIgnoreCase;

impl SelectionStrategy for NameEqualsIgnoreCase {
    fn is_matching(&self, target_name: &str, source_name: &str) -> bool {
        target_name.eq_ignore_ascii_case(source_name)
    }
}

/// Either name contains the other as a substring.
#[derive(Clone, Copy, Debug, Default)]
pub struct NameContains;

impl SelectionStrategy for NameContains {
    fn is_matching(&self, target_name: &str, source_name: &str) -> bool {
        target_name.contains(source_name) || source_name.contains(target_name)
    }
}

/// Immutable snapshot of an ordered strategy list, highest priority first.
pub type StrategyList = Arc<[Arc<dyn SelectionStrategy>]>;

/// The built-in strategy order: equals, equals ignoring case, contains.
pub fn builtin_strategies() -> StrategyList {
    let strategies: Vec<Arc<dyn SelectionStrategy>> = vec![
        Arc::new(NameEquals),
        Arc::new(NameEqualsIgnoreCase),
        Arc::new(NameContains),
    ];
    strategies.into()
}

static DEFAULT_STRATEGIES: Lazy<RwLock<StrategyList>> =
    Lazy::new(|| RwLock::new(builtin_strategies()));

/// Replace the process-wide default strategy list.
///
/// Affects every [ByNameSelector] that was not built with its own list.
/// Each selection call reads one consistent snapshot, so a concurrent
/// override is either fully visible to it or not at all.
pub fn override_default_strategies<I>(strategies: I)
where
    I: IntoIterator<Item = Arc<dyn SelectionStrategy>>,
{
    let snapshot: StrategyList = strategies.into_iter().collect::<Vec<_>>().into();
    *DEFAULT_STRATEGIES.write().unwrap() = snapshot;
}

/// Selects the single mock whose source name best matches the target name.
///
/// Each candidate is scored by the first strategy accepting the name pair;
/// the lowest score wins and the first candidate in pool order wins ties.
/// A non-empty pool always yields one candidate, even when no strategy
/// accepted any pair: the selector deliberately falls back to the first
/// lowest-scored candidate rather than returning nothing.
#[derive(Clone, Default)]
pub struct ByNameSelector {
    strategies: Option<StrategyList>,
}

impl ByNameSelector {
    /// A selector following the process-wide default strategy list.
    pub fn new() -> Self {
        Self { strategies: None }
    }

    /// A selector with its own fixed strategy list, unaffected by
    /// [override_default_strategies].
    pub fn with_strategies<I>(strategies: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn SelectionStrategy>>,
    {
        Self {
            strategies: Some(strategies.into_iter().collect::<Vec<_>>().into()),
        }
    }

    fn snapshot(&self) -> StrategyList {
        match &self.strategies {
            Some(own) => own.clone(),
            None => DEFAULT_STRATEGIES.read().unwrap().clone(),
        }
    }
}

impl MockSelector<str> for ByNameSelector {
    fn select(&self, target_name: &str, mocks: &[MockHolder]) -> Vec<MockHolder> {
        let strategies = self.snapshot();
        let mut best: Option<&MockHolder> = None;
        let mut best_score = strategies.len() + 1;
        for holder in mocks {
            let score = priority_of(&strategies, target_name, holder.source_name());
            if score < best_score {
                best_score = score;
                best = Some(holder);
            }
        }
        if let Some(holder) = best {
            trace!(target = target_name, selected = %holder, score = best_score, "selected by name");
        }
        best.into_iter().cloned().collect()
    }
}

/// Index of the first strategy accepting the pair; one past the end when
/// no strategy does.
fn priority_of(strategies: &StrategyList, target_name: &str, source_name: &str) -> usize {
    strategies
        .iter()
        .position(|strategy| strategy.is_matching(target_name, source_name))
        .unwrap_or(strategies.len())
}
