//! Cascade ordering of ladder components.
//!
//! The ladder heuristic sorts components by the pair `(in_node, is_series)`. A shunt element
//! hanging off node `n` is visited before the series element that leaves node `n`, so a
//! netlist written in any order collapses to the left-to-right cascade of a simple ladder.
//!
//! The heuristic is only meaningful for ladders. No connectivity, cycle or disconnection check
//! is performed: a malformed netlist yields a well-defined but physically meaningless cascade.

use tracing::debug;

use super::component::Component;

/// Permutation vector representing a reordering of components.
///
/// perm[i] = j means the i-th component in cascade order is the j-th component of the input.
pub type Permutation = Vec<usize>;

/// Ordering strategy selection.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingStrategy {
    /// Keep the caller's order (input is already in cascade order).
    Natural,
    /// Stable sort by `(in_node, is_series)`.
    #[default]
    Ladder,
}

/// Computes the ladder cascade permutation of `components`.
///
/// The sort is stable: components with equal keys keep their relative input order.
#[must_use]
pub fn ladder_ordering(components: &[Component]) -> Permutation {
    let mut perm: Permutation = (0..components.len()).collect();
    perm.sort_by_key(|&idx| {
        let c = &components[idx];
        (c.in_node(), c.is_series())
    });
    perm
}

/// Computes the permutation for the chosen strategy.
#[must_use]
pub fn ordering_for(components: &[Component], strategy: OrderingStrategy) -> Permutation {
    match strategy {
        OrderingStrategy::Natural => (0..components.len()).collect(),
        OrderingStrategy::Ladder => ladder_ordering(components),
    }
}

/// Applies a permutation to a slice, producing the reordered sequence.
#[must_use]
pub fn apply_permutation<T: Clone>(items: &[T], perm: &Permutation) -> Vec<T> {
    perm.iter().map(|&idx| items[idx].clone()).collect()
}

/// Orders components into cascade order using `strategy`.
#[must_use]
pub fn order_components(components: &[Component], strategy: OrderingStrategy) -> Vec<Component> {
    let perm = ordering_for(components, strategy);
    debug!(?strategy, ?perm, "ordered ladder components");
    apply_permutation(components, &perm)
}
