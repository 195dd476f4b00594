//! Constraint-handling selectors: static penalty, Deb's feasibility
//! rule, and the epsilon-constraint decay schedule. Each exposes a total
//! order `better(a, b)` plus a generation-level hook, dispatched through
//! a closed enum (the operator set is fixed by configuration, never
//! extended at runtime — see the engine's design notes on variant
//! dispatch).

mod epsilon;
mod feasibility_rule;
mod static_penalty;

pub use epsilon::Epsilon;
pub use feasibility_rule::feasibility_better;
pub use static_penalty::static_penalty_better;

use crate::error::ConfigError;
use crate::population::Evaluation;

/// Static-penalty or Deb's-rule selectors carry no per-instance state;
/// `Epsilon` carries a decaying threshold.
#[derive(Debug, Clone)]
pub enum Selector {
    StaticPenalty,
    FeasibilityRule,
    Epsilon(Epsilon),
}

impl Selector {
    pub fn epsilon(theta: f64, tc: u64, cp: f64) -> Result<Self, ConfigError> {
        Ok(Selector::Epsilon(Epsilon::new(theta, tc, cp)?))
    }

    /// `true` iff `a` is preferred over (or tied with, by tie-break) `b`.
    pub fn better(&self, a: &Evaluation, b: &Evaluation) -> bool {
        match self {
            Selector::StaticPenalty => static_penalty_better(a, b),
            Selector::FeasibilityRule => feasibility_better(a, b, 0.0),
            Selector::Epsilon(eps) => feasibility_better(a, b, eps.level()),
        }
    }

    /// Generation-level hook. For `Epsilon` this initializes or decays
    /// the threshold; the other selectors are no-ops.
    pub fn on_generation_start(&mut self, g: u64, violation_sums: &[f64]) {
        if let Selector::Epsilon(eps) = self {
            eps.on_generation_start(g, violation_sums);
        }
    }
}
