//! The plain DE driver (spec.md §4.4): population, one fixed
//! mutator/crossover pair, one selector, `max_iter` generations.
//! [`crate::sade::SadeDriver`] extends this with per-slot sampled
//! strategies and online-adapted parameters.

use crate::bounds::{clamp_or_resample_vec, Range};
use crate::crossover::Crossover;
use crate::error::{ConfigError, EngineError};
use crate::mutation::Mutator;
use crate::population::{Evaluation, Population};
use crate::progress::{GenerationCallback, GenerationReport};
use crate::rng::Rng64;
use crate::selector::Selector;
use ndarray::Array1;
use rayon::prelude::*;

/// Objective: `f(slot_index, x) -> (fom, violations)`. Must be callable
/// concurrently with distinct `slot_index` values (spec.md §6).
pub trait Objective: Fn(usize, &Array1<f64>) -> (f64, Vec<f64>) + Sync {}
impl<T: Fn(usize, &Array1<f64>) -> (f64, Vec<f64>) + Sync> Objective for T {}

/// Constructor configuration for the plain DE driver.
pub struct DeConfig {
    pub np: usize,
    pub max_iter: usize,
    pub mutator: Mutator,
    pub crossover: Crossover,
    pub f: f64,
    pub cr: f64,
    pub theta: f64,
    pub selector: Selector,
    pub seed: Option<u64>,
    pub on_generation: Option<GenerationCallback>,
}

impl DeConfig {
    pub fn validate(&self, ranges: &[Range]) -> Result<(), ConfigError> {
        let min_np = match self.mutator {
            Mutator::Rand2 | Mutator::RandToBest2 | Mutator::Best2 => 5,
            Mutator::Rand1 | Mutator::Best1 | Mutator::RandToBest1 | Mutator::CurrentToRand1 => 3,
        };
        if self.np < min_np {
            return Err(ConfigError::PopulationTooSmall {
                np: self.np,
                min: min_np,
            });
        }
        if ranges.is_empty() {
            return Err(ConfigError::MissingRequiredField("ranges"));
        }
        if !(0.0..=1.0).contains(&self.theta) {
            return Err(ConfigError::InvalidTheta(self.theta));
        }
        Ok(())
    }
}

/// Owns the population, RNG, operators and selector for its lifetime.
pub struct DifferentialEvolutionDriver {
    config: DeConfig,
    ranges: Vec<Range>,
    rng: Rng64,
    population: Population,
}

impl DifferentialEvolutionDriver {
    pub fn new(config: DeConfig, ranges: Vec<(f64, f64)>) -> Result<Self, ConfigError> {
        let ranges = crate::bounds::validate_ranges(&ranges)?;
        config.validate(&ranges)?;
        let rng = match config.seed {
            Some(s) => Rng64::seeded(s),
            None => Rng64::from_entropy(),
        };
        Ok(Self {
            config,
            ranges,
            rng,
            population: Population::new(Vec::new(), Vec::new()),
        })
    }

    /// Run to completion and return the best individual found.
    pub fn solve(&mut self, objective: &impl Objective) -> Result<Array1<f64>, EngineError> {
        self.init(objective);

        for g in 1..self.config.max_iter.max(1) as u64 {
            self.run_generation(g, objective)?;
        }

        let best_idx = self.population.find_best(|a, b| self.config.selector.better(a, b));
        Ok(self.population.individual(best_idx).clone())
    }

    fn init(&mut self, objective: &impl Objective) {
        let np = self.config.np;
        let d = self.ranges.len();
        let mut individuals: Vec<Array1<f64>> = (0..np).map(|_| self.sample_uniform(d)).collect();
        let mut evaluations: Vec<Evaluation> = self.evaluate_all(&individuals, objective);

        if self.config.theta > 0.0 {
            let min_valid = ((np as f64) * self.config.theta).floor() as usize;
            while evaluations.iter().filter(|e| !e.is_invalid()).count() < min_valid {
                let invalid_slots: Vec<usize> = (0..np).filter(|&i| evaluations[i].is_invalid()).collect();
                if invalid_slots.is_empty() {
                    break;
                }
                for &i in &invalid_slots {
                    individuals[i] = self.sample_uniform(d);
                }
                let resampled: Vec<Array1<f64>> = invalid_slots.iter().map(|&i| individuals[i].clone()).collect();
                let new_evals = self.evaluate_all(&resampled, objective);
                for (slot, eval) in invalid_slots.into_iter().zip(new_evals) {
                    evaluations[slot] = eval;
                }
            }
        }

        self.population = Population::new(individuals, evaluations);
    }

    fn sample_uniform(&mut self, d: usize) -> Array1<f64> {
        Array1::from_iter((0..d).map(|j| self.rng.uniform_range(self.ranges[j].lb, self.ranges[j].ub)))
    }

    fn evaluate_all(&self, individuals: &[Array1<f64>], objective: &impl Objective) -> Vec<Evaluation> {
        individuals
            .par_iter()
            .enumerate()
            .map(|(i, x)| {
                let (fom, violations) = objective(i, x);
                Evaluation::new(fom, violations)
            })
            .collect()
    }

    fn run_generation(&mut self, g: u64, objective: &impl Objective) -> Result<(), EngineError> {
        let np = self.population.len();
        let best_idx = self.population.find_best(|a, b| self.config.selector.better(a, b));

        let mut trials = Vec::with_capacity(np);
        {
            let view = self.population.view();
            for i in 0..np {
                let donor = self
                    .config
                    .mutator
                    .donor(i, &view, best_idx, self.config.f, &self.ranges, &mut self.rng);
                let target = self.population.individual(i);
                let trial = self.config.crossover.trial(target, &donor, self.config.cr, &mut self.rng);
                trials.push(clamp_or_resample_vec(trial, &self.ranges, &mut self.rng));
            }
        }

        let trial_evals = self.evaluate_all(&trials, objective);

        let violation_sums: Vec<f64> = (0..np)
            .map(|i| self.population.evaluation(i).violation_sum())
            .collect();
        self.config.selector.on_generation_start(g, &violation_sums);

        for i in 0..np {
            let target_eval = self.population.evaluation(i);
            if self.config.selector.better(&trial_evals[i], target_eval) {
                self.population.commit(i, trials[i].clone(), trial_evals[i].clone());
            }
        }

        let best_idx = self.population.find_best(|a, b| self.config.selector.better(a, b));
        let best_eval = self.population.evaluation(best_idx);
        let report = GenerationReport {
            generation: g,
            best_slot: best_idx,
            best_fom: best_eval.fom,
            best_violation_sum: best_eval.violation_sum(),
        };
        if let Some(cb) = self.config.on_generation.as_mut() {
            cb(&report);
        }
        Ok(())
    }
}
