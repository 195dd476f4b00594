//! Self-adaptive differential evolution (spec.md §4.5): the same
//! generation shape as [`crate::driver::DifferentialEvolutionDriver`],
//! but the fixed `(mutator, crossover, f, cr)` is replaced by a per-slot
//! sampled strategy plus two rolling memories that adapt the strategy
//! probabilities and the crossover-rate distribution online.

use crate::bounds::Range;
use crate::crossover::Crossover;
use crate::driver::Objective;
use crate::error::{ConfigError, EngineError};
use crate::mutation::Mutator;
use crate::population::{Evaluation, Population};
use crate::progress::{GenerationCallback, GenerationReport};
use crate::rng::Rng64;
use crate::selector::Selector;
use ndarray::Array1;
use rayon::prelude::*;
use std::collections::VecDeque;

/// A `(mutator, crossover)` pair in the SaDE pool.
#[derive(Debug, Clone, Copy)]
pub struct Strategy {
    pub mutator: Mutator,
    pub crossover: Crossover,
}

/// The five-strategy pool named in the source material: `Rand1`/`Best1`/
/// `Rand2` with binomial crossover, `CurrentToRand1` with exponential
/// crossover (its own arithmetic already mixes in the target, which is
/// the classical pairing for this variant), and `RandToBest2` with
/// binomial crossover.
pub fn default_strategy_pool() -> Vec<Strategy> {
    vec![
        Strategy {
            mutator: Mutator::Rand1,
            crossover: Crossover::Bin,
        },
        Strategy {
            mutator: Mutator::Best1,
            crossover: Crossover::Bin,
        },
        Strategy {
            mutator: Mutator::Rand2,
            crossover: Crossover::Bin,
        },
        Strategy {
            mutator: Mutator::CurrentToRand1,
            crossover: Crossover::Exp,
        },
        Strategy {
            mutator: Mutator::RandToBest2,
            crossover: Crossover::Bin,
        },
    ]
}

fn min_np_for(strategies: &[Strategy]) -> usize {
    strategies
        .iter()
        .map(|s| match s.mutator {
            Mutator::Rand2 | Mutator::RandToBest2 | Mutator::Best2 => 5,
            Mutator::Rand1 | Mutator::Best1 | Mutator::RandToBest1 | Mutator::CurrentToRand1 => 3,
        })
        .max()
        .unwrap_or(3)
}

/// Constructor configuration for the SaDE driver.
pub struct SadeConfig {
    pub lp: u64,
    pub fmu: f64,
    pub fsigma: f64,
    pub crmu: f64,
    pub crsigma: f64,
    pub np: usize,
    pub max_iter: usize,
    pub theta: f64,
    pub selector: Selector,
    pub seed: Option<u64>,
    pub on_generation: Option<GenerationCallback>,
}

impl SadeConfig {
    pub fn validate(&self, ranges: &[Range], strategies: &[Strategy]) -> Result<(), ConfigError> {
        if self.lp == 0 {
            return Err(ConfigError::MissingRequiredField("lp"));
        }
        let min_np = min_np_for(strategies);
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

const EPS: f64 = 0.01;

/// Owns the population, RNG, strategy pool, and the two adaptive
/// memories (strategy success/failure, per-strategy CR history).
pub struct SadeDriver {
    config: SadeConfig,
    ranges: Vec<Range>,
    strategies: Vec<Strategy>,
    rng: Rng64,
    population: Population,
    strategy_prob: Vec<f64>,
    mem_success: VecDeque<Vec<u32>>,
    mem_failure: VecDeque<Vec<u32>>,
    cr_memory: Vec<VecDeque<Vec<f64>>>,
}

impl SadeDriver {
    pub fn new(config: SadeConfig, ranges: Vec<(f64, f64)>) -> Result<Self, ConfigError> {
        Self::with_strategies(config, ranges, default_strategy_pool())
    }

    pub fn with_strategies(
        config: SadeConfig,
        ranges: Vec<(f64, f64)>,
        strategies: Vec<Strategy>,
    ) -> Result<Self, ConfigError> {
        let ranges = crate::bounds::validate_ranges(&ranges)?;
        config.validate(&ranges, &strategies)?;
        let rng = match config.seed {
            Some(s) => Rng64::seeded(s),
            None => Rng64::from_entropy(),
        };
        let s_count = strategies.len();
        let strategy_prob = vec![1.0 / s_count as f64; s_count];
        let cr_memory = (0..s_count).map(|_| VecDeque::new()).collect();
        Ok(Self {
            config,
            ranges,
            strategies,
            rng,
            population: Population::new(Vec::new(), Vec::new()),
            strategy_prob,
            mem_success: VecDeque::new(),
            mem_failure: VecDeque::new(),
            cr_memory,
        })
    }

    pub fn strategy_prob(&self) -> &[f64] {
        &self.strategy_prob
    }

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
        let mut evaluations = self.evaluate_all(&individuals, objective);

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

    /// Inverse-CDF sample over the contiguous sub-intervals of `[0,1)`
    /// defined by `strategy_prob`.
    fn sample_strategy(&mut self) -> usize {
        debug_assert!((self.strategy_prob.iter().sum::<f64>() - 1.0).abs() < 0.01);
        let u = self.rng.uniform01();
        let mut cum = 0.0;
        for (s, p) in self.strategy_prob.iter().enumerate() {
            cum += p;
            if u < cum {
                return s;
            }
        }
        self.strategy_prob.len() - 1
    }

    fn strategy_cr_median(&self, s: usize) -> Option<f64> {
        let mut all: Vec<f64> = self.cr_memory[s].iter().flatten().copied().collect();
        if all.is_empty() {
            return None;
        }
        all.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let n = all.len();
        Some(if n % 2 == 1 {
            all[n / 2]
        } else {
            (all[n / 2 - 1] + all[n / 2]) / 2.0
        })
    }

    fn build_cr_vec(&mut self, g: u64, strategy_idx: &[usize]) -> Vec<f64> {
        let np = strategy_idx.len();
        if g <= self.config.lp {
            (0..np)
                .map(|_| self.rng.truncated_normal(self.config.crmu, self.config.crsigma, 0.0, 1.0))
                .collect()
        } else {
            let crmu_per_strategy: Vec<f64> = (0..self.strategies.len())
                .map(|s| self.strategy_cr_median(s).unwrap_or(self.config.crmu))
                .collect();
            strategy_idx
                .iter()
                .map(|&s| {
                    self.rng
                        .truncated_normal(crmu_per_strategy[s], self.config.crsigma, 0.0, 1.0)
                })
                .collect()
        }
    }

    fn recompute_strategy_prob(&mut self) {
        let s_count = self.strategies.len();
        let mut ns = vec![0u32; s_count];
        let mut nf = vec![0u32; s_count];
        for gen in self.mem_success.iter() {
            for s in 0..s_count {
                ns[s] += gen[s];
            }
        }
        for gen in self.mem_failure.iter() {
            for s in 0..s_count {
                nf[s] += gen[s];
            }
        }
        let rates: Vec<f64> = (0..s_count)
            .map(|s| {
                let denom = ns[s] + nf[s];
                if denom > 0 {
                    EPS + (ns[s] as f64 / denom as f64)
                } else {
                    EPS
                }
            })
            .collect();
        let total: f64 = rates.iter().sum();
        debug_assert!(total > 0.0);
        self.strategy_prob = rates.iter().map(|r| r / total).collect();
    }

    fn run_generation(&mut self, g: u64, objective: &impl Objective) -> Result<(), EngineError> {
        let np = self.population.len();
        let best_idx = self.population.find_best(|a, b| self.config.selector.better(a, b));

        let strategy_idx: Vec<usize> = (0..np).map(|_| self.sample_strategy()).collect();
        let cr_vec = self.build_cr_vec(g, &strategy_idx);

        let mut trials = Vec::with_capacity(np);
        {
            let view = self.population.view();
            for i in 0..np {
                let s = strategy_idx[i];
                let f_i = self.rng.normal(self.config.fmu, self.config.fsigma);
                let donor = self.strategies[s]
                    .mutator
                    .donor(i, &view, best_idx, f_i, &self.ranges, &mut self.rng);
                let target = self.population.individual(i);
                let trial = self.strategies[s]
                    .crossover
                    .trial(target, &donor, cr_vec[i], &mut self.rng);
                trials.push(crate::bounds::clamp_or_resample_vec(trial, &self.ranges, &mut self.rng));
            }
        }

        let trial_evals = self.evaluate_all(&trials, objective);

        let violation_sums: Vec<f64> = (0..np)
            .map(|i| self.population.evaluation(i).violation_sum())
            .collect();
        self.config.selector.on_generation_start(g, &violation_sums);

        let s_count = self.strategies.len();
        let mut success = vec![0u32; s_count];
        let mut failure = vec![0u32; s_count];
        let mut beat = vec![false; np];
        for i in 0..np {
            let target_eval = self.population.evaluation(i);
            let better = self.config.selector.better(&trial_evals[i], target_eval);
            beat[i] = better;
            if better {
                success[strategy_idx[i]] += 1;
            } else {
                failure[strategy_idx[i]] += 1;
            }
        }

        let total_success: u32 = success.iter().sum();
        if total_success > 0 {
            self.mem_success.push_back(success);
            self.mem_failure.push_back(failure);
        }
        if self.mem_success.len() > self.config.lp as usize {
            self.mem_success.pop_front();
            self.mem_failure.pop_front();
            self.recompute_strategy_prob();
        }

        for deque in self.cr_memory.iter_mut() {
            deque.push_back(Vec::new());
        }
        if g > self.config.lp {
            for deque in self.cr_memory.iter_mut() {
                deque.pop_front();
            }
        }
        for i in 0..np {
            if beat[i] {
                self.cr_memory[strategy_idx[i]].back_mut().unwrap().push(cr_vec[i]);
            }
        }

        for i in 0..np {
            if beat[i] {
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
