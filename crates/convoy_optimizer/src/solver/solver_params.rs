use jiff::SignedDuration;

#[derive(Clone, Debug)]
pub struct SolverParams {
    pub terminations: Vec<Termination>,
    pub search_threads: Threads,
    /// Scales the penalty weight computed at the first local optimum.
    pub gls_lambda_coefficient: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Termination {
    Duration(SignedDuration),
    Iterations(usize),
    IterationsWithoutImprovement(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Threads {
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => (*num).max(1),
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

pub const DEFAULT_TIME_BUDGET: SignedDuration = SignedDuration::from_secs(10);

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            terminations: vec![Termination::Duration(DEFAULT_TIME_BUDGET)],
            search_threads: Threads::Single,
            gls_lambda_coefficient: 0.1,
        }
    }
}
