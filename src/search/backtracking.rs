use std::time::Instant;

use log::{debug, trace};
use serde::Serialize;

use crate::color::{Assignment, ColorId, ColoringInstance, FixedConstraint, RegionId};
use crate::search::consistency::is_consistent;
use crate::search::stopping::{NeverStoppingCriterion, StoppingCriterion};


/** result of a solve: a total coloring, a proof that none exists, or a stop */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome<S> {
    /// first coloring found in declaration order
    Colored(S),
    /// the search space is exhausted
    NoSolution,
    /// the stopping criterion was met before the end of the search
    Timeout,
}

impl<S> SolveOutcome<S> {
    /// converts the coloring (if any)
    pub fn map<T, F:FnOnce(S) -> T>(self, f:F) -> SolveOutcome<T> {
        match self {
            SolveOutcome::Colored(s) => SolveOutcome::Colored(f(s)),
            SolveOutcome::NoSolution => SolveOutcome::NoSolution,
            SolveOutcome::Timeout => SolveOutcome::Timeout,
        }
    }

    /// coloring (if any)
    pub fn colored(self) -> Option<S> {
        match self {
            SolveOutcome::Colored(s) => Some(s),
            _ => None,
        }
    }
}


/** statistics of a search */
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStatistics {
    /// number of decisions applied
    pub nb_expanded: usize,
    /// number of regions left with no consistent color
    pub nb_dead_ends: usize,
    /// time spent in the search (seconds)
    pub time_searched: f32,
}


/** represents a decision (assigning color c to region v) */
#[derive(Debug, Clone, Copy)]
struct Decision {
    v: RegionId,
    c: ColorId,
}

/// either a decision to apply, either a decision to undo
#[derive(Debug)]
enum BacktrackEvent {
    Commit(Decision), // decision to apply
    Restore(Decision) // decision taken
}


/**
Chronological backtracking over the regions in declaration order.
Colors are tried in palette order, so the first coloring found only depends on
the map, the palette and the fixed constraint.
*/
pub struct BacktrackingSolver<'a> {
    /// instance
    inst: &'a dyn ColoringInstance,
    /// number of colors of the palette
    nb_colors: usize,
    /// optional pinned (region, color)
    fixed: Option<FixedConstraint>,
    /// maximum number of expanded nodes (if any)
    node_limit: Option<usize>,
    /// current partial assignment (owned by this solve)
    assignment: Assignment,
    /// decision history
    decisions: Vec<BacktrackEvent>,
    /// search statistics
    stats: SearchStatistics,
}

impl<'a> std::fmt::Debug for BacktrackingSolver<'a> {
    fn fmt(&self, f:&mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BacktrackingSolver")
            .field("nb_regions", &self.inst.nb_vertices())
            .field("nb_colors", &self.nb_colors)
            .field("fixed", &self.fixed)
            .field("node_limit", &self.node_limit)
            .field("nb_assigned", &self.assignment.nb_assigned())
            .finish()
    }
}

impl<'a> BacktrackingSolver<'a> {
    /**
    creates a solver. The fixed region (if any) is colored before the search
    starts and never reconsidered.
    */
    pub fn new(inst:&'a dyn ColoringInstance, nb_colors:usize, fixed:Option<FixedConstraint>) -> Self {
        let n = inst.nb_vertices();
        let mut assignment = Assignment::new(n);
        if let Some(f) = fixed {
            debug_assert!(f.region < n && f.color < nb_colors);
            assignment.assign(f.region, f.color);
        }
        Self {
            inst,
            nb_colors,
            fixed,
            node_limit: None,
            assignment,
            decisions: Vec::with_capacity(n * nb_colors),
            stats: SearchStatistics::default(),
        }
    }

    /** stops the search (timeout) once `node_limit` decisions are applied */
    pub fn with_node_limit(mut self, node_limit:Option<usize>) -> Self {
        self.node_limit = node_limit;
        self
    }

    /// true iff the node limit is reached
    fn is_node_limit_reached(&self) -> bool {
        self.node_limit.map_or(false, |n| self.stats.nb_expanded >= n)
    }

    /// first uncolored region at or after `from`
    fn next_region(&self, from:RegionId) -> Option<RegionId> {
        (from..self.inst.nb_vertices()).find(|v| !self.assignment.is_assigned(*v))
    }

    /// pushes the consistent colors of v (first color on top of the stack).
    /// returns false if there is none.
    fn push_decisions(&mut self, v:RegionId) -> bool {
        let mut nb_pushed = 0;
        for c in (0..self.nb_colors).rev() {
            if is_consistent(self.inst, &self.assignment, v, c, self.fixed.as_ref()) {
                let decision = Decision { v, c };
                self.decisions.push(BacktrackEvent::Restore(decision)); // prepare to backtrack
                self.decisions.push(BacktrackEvent::Commit(decision)); // decision to apply
                nb_pushed += 1;
            }
        }
        if nb_pushed == 0 {
            trace!("no consistent color for region {}", self.inst.region_name(v));
            self.stats.nb_dead_ends += 1;
        }
        nb_pushed > 0
    }

    /// true iff no adjacent regions share a color (total assignment only)
    fn is_proper(&self) -> bool {
        self.inst.edges().iter().all(|(a,b)| self.assignment.get(*a) != self.assignment.get(*b))
    }

    /**
    backtracking search

    Stores the decisions to be taken in a stack.
    pops each decision and applies it (or undoes it).
    when all regions are colored, reports the coloring.
    */
    pub fn solve<Stop:StoppingCriterion>(mut self, stopping_criterion:Stop)
    -> (SolveOutcome<Vec<ColorId>>, SearchStatistics) {
        let t_start = Instant::now();
        debug!(
            "backtracking: {} regions, {} colors, fixed: {:?}",
            self.inst.nb_vertices(), self.nb_colors, self.fixed
        );
        let outcome = self.dfs_search(&stopping_criterion);
        self.stats.time_searched = t_start.elapsed().as_secs_f32();
        debug!(
            "backtracking: {} expanded, {} dead ends, {:.3}s",
            self.stats.nb_expanded, self.stats.nb_dead_ends, self.stats.time_searched
        );
        (outcome, self.stats)
    }

    fn dfs_search<Stop:StoppingCriterion>(&mut self, stopping_criterion:&Stop)
    -> SolveOutcome<Vec<ColorId>> {
        if self.nb_colors == 0 && self.inst.nb_vertices() > 0 {
            return SolveOutcome::NoSolution;
        }
        // populate decisions with the root node children
        match self.next_region(0) {
            None => return self.solution(),
            Some(v) => { self.push_decisions(v); },
        }
        while let Some(event) = self.decisions.pop() {
            match event {
                BacktrackEvent::Restore(decision) => { // restore the state
                    self.assignment.unassign(decision.v);
                },
                BacktrackEvent::Commit(decision) => { // apply the decision and generate children
                    if stopping_criterion.is_finished() || self.is_node_limit_reached() {
                        return SolveOutcome::Timeout;
                    }
                    self.stats.nb_expanded += 1;
                    self.assignment.assign(decision.v, decision.c);
                    match self.next_region(decision.v + 1) {
                        None => return self.solution(),
                        Some(v) => { self.push_decisions(v); },
                    }
                }
            }
        }
        SolveOutcome::NoSolution
    }

    fn solution(&self) -> SolveOutcome<Vec<ColorId>> {
        debug_assert!(self.is_proper());
        match self.assignment.to_total() {
            Some(colors) => SolveOutcome::Colored(colors),
            None => SolveOutcome::NoSolution,
        }
    }
}

/** solves an instance without time limit */
pub fn backtracking_coloring(
    inst:&dyn ColoringInstance,
    nb_colors:usize,
    fixed:Option<FixedConstraint>,
) -> SolveOutcome<Vec<ColorId>> {
    BacktrackingSolver::new(inst, nb_colors, fixed).solve(NeverStoppingCriterion::default()).0
}
