pub use dogs::search_algorithm::{NeverStoppingCriterion, StoppingCriterion, TimeStoppingCriterion};

/**
time limit that may be absent. Without a limit the search runs until it
finds a coloring or exhausts the search space.
*/
#[derive(Debug, Clone, Default)]
pub struct OptionalTimeStoppingCriterion {
    /// time limit (if any)
    time: Option<TimeStoppingCriterion>,
}

impl OptionalTimeStoppingCriterion {
    /** stops t seconds from now if t is given */
    pub fn new(t:Option<f32>) -> Self {
        Self { time: t.map(TimeStoppingCriterion::new) }
    }
}

impl StoppingCriterion for OptionalTimeStoppingCriterion {
    fn is_finished(&self) -> bool {
        self.time.as_ref().map_or(false, |t| t.is_finished())
    }
}
