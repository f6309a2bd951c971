use jiff::{SignedDuration, Timestamp};

use crate::solver::solver_params::Termination;

/// Counts search iterations and checks them, with the elapsed time, against the
/// configured terminations. The search stops as soon as one of them is met.
#[derive(Debug)]
pub struct TerminationTracker<'a> {
    terminations: &'a [Termination],
    start: Timestamp,
    iterations: usize,
    iterations_without_improvement: usize,
}

impl<'a> TerminationTracker<'a> {
    pub fn new(terminations: &'a [Termination]) -> Self {
        TerminationTracker {
            terminations,
            start: Timestamp::now(),
            iterations: 0,
            iterations_without_improvement: 0,
        }
    }

    pub fn record_iteration(&mut self, improved: bool) {
        self.iterations += 1;
        if improved {
            self.iterations_without_improvement = 0;
        } else {
            self.iterations_without_improvement += 1;
        }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn elapsed(&self) -> SignedDuration {
        Timestamp::now().duration_since(self.start)
    }

    pub fn should_terminate(&self) -> bool {
        self.terminations
            .iter()
            .any(|termination| self.check_termination(termination))
    }

    /// Only the wall-clock terminations. `false` when none is configured.
    pub fn is_out_of_time(&self) -> bool {
        self.terminations.iter().any(|termination| {
            matches!(termination, Termination::Duration(_)) && self.check_termination(termination)
        })
    }

    fn check_termination(&self, termination: &Termination) -> bool {
        match *termination {
            Termination::Duration(max_duration) => self.elapsed() >= max_duration,
            Termination::Iterations(max_iterations) => self.iterations >= max_iterations,
            Termination::IterationsWithoutImprovement(max_iterations) => {
                self.iterations_without_improvement >= max_iterations
            }
        }
    }
}
