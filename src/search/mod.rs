//! Search for the map coloring problem.

/// consistency of a (region, color) decision with a partial assignment
pub mod consistency;

/// stopping criteria (time or node limits)
pub mod stopping;

/// chronological backtracking in declaration order
pub mod backtracking;
