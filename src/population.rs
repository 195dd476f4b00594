//! Population and per-individual evaluation. Owned exclusively by the
//! driver; operators only ever see an immutable [`PopulationView`].

use ndarray::Array1;

/// Objective value plus constraint violations for one individual.
///
/// `violations[k] == f64::INFINITY` marks the individual invalid (e.g.
/// the objective's external simulator failed). Aggregate violation `V`
/// is the sum of the violation vector; `V == 0` denotes feasibility.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub fom: f64,
    pub violations: Vec<f64>,
}

impl Evaluation {
    pub fn new(fom: f64, violations: Vec<f64>) -> Self {
        Self { fom, violations }
    }

    /// Aggregate violation `V = sum(violations)`.
    pub fn violation_sum(&self) -> f64 {
        self.violations.iter().sum()
    }

    pub fn is_feasible(&self) -> bool {
        self.violation_sum() == 0.0
    }

    /// `true` iff any violation coordinate is `+inf`.
    pub fn is_invalid(&self) -> bool {
        self.violations.iter().any(|v| v.is_infinite() && v.is_sign_positive())
    }
}

/// Fixed-size ordered sequence of `(individual, evaluation)` pairs.
pub struct Population {
    individuals: Vec<Array1<f64>>,
    evaluations: Vec<Evaluation>,
}

impl Population {
    pub fn new(individuals: Vec<Array1<f64>>, evaluations: Vec<Evaluation>) -> Self {
        assert_eq!(individuals.len(), evaluations.len());
        Self {
            individuals,
            evaluations,
        }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.individuals.first().map(|x| x.len()).unwrap_or(0)
    }

    pub fn individual(&self, i: usize) -> &Array1<f64> {
        &self.individuals[i]
    }

    pub fn evaluation(&self, i: usize) -> &Evaluation {
        &self.evaluations[i]
    }

    /// Overwrite slot `i` in place (acceptance of a trial).
    pub fn commit(&mut self, i: usize, individual: Array1<f64>, evaluation: Evaluation) {
        self.individuals[i] = individual;
        self.evaluations[i] = evaluation;
    }

    pub fn view(&self) -> PopulationView<'_> {
        PopulationView {
            individuals: &self.individuals,
        }
    }

    /// Index of the individual preferred by `better` over all others,
    /// ties broken by first occurrence.
    pub fn find_best(&self, better: impl Fn(&Evaluation, &Evaluation) -> bool) -> usize {
        let mut best = 0;
        for i in 1..self.evaluations.len() {
            let candidate = &self.evaluations[i];
            let current_best = &self.evaluations[best];
            if better(candidate, current_best) && !better(current_best, candidate) {
                best = i;
            }
        }
        best
    }
}

/// Read-only view of the current individuals, the only thing mutators
/// are allowed to see — this removes the cyclic driver back-references
/// the source used (`de.population()`, `de.f()`, `de.cr()` calls from
/// inside operator code).
pub struct PopulationView<'a> {
    individuals: &'a [Array1<f64>],
}

impl<'a> PopulationView<'a> {
    pub fn new(individuals: &'a [Array1<f64>]) -> Self {
        Self { individuals }
    }

    pub fn nrows(&self) -> usize {
        self.individuals.len()
    }

    pub fn row(&self, i: usize) -> &Array1<f64> {
        &self.individuals[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_sum_and_feasibility() {
        let e = Evaluation::new(1.0, vec![0.0, 0.0]);
        assert!(e.is_feasible());
        let e2 = Evaluation::new(1.0, vec![0.2, 0.3]);
        assert!(!e2.is_feasible());
        assert_eq!(e2.violation_sum(), 0.5);
    }

    #[test]
    fn infinite_violation_marks_invalid() {
        let e = Evaluation::new(1.0, vec![0.0, f64::INFINITY]);
        assert!(e.is_invalid());
        let e2 = Evaluation::new(1.0, vec![0.0, 0.0]);
        assert!(!e2.is_invalid());
    }

    #[test]
    fn find_best_breaks_ties_by_first_occurrence() {
        let pop = Population::new(
            vec![Array1::zeros(1), Array1::zeros(1), Array1::zeros(1)],
            vec![
                Evaluation::new(1.0, vec![]),
                Evaluation::new(1.0, vec![]),
                Evaluation::new(0.5, vec![]),
            ],
        );
        let best = pop.find_best(|a, b| a.fom < b.fom);
        assert_eq!(best, 2);
        let tie_pop = Population::new(
            vec![Array1::zeros(1), Array1::zeros(1)],
            vec![Evaluation::new(1.0, vec![]), Evaluation::new(1.0, vec![])],
        );
        assert_eq!(tie_pop.find_best(|a, b| a.fom < b.fom), 0);
    }

    #[test]
    fn find_best_breaks_ties_by_first_occurrence_under_non_strict_comparator() {
        // `Selector::better` is non-strict (`<=`-shaped): on an exact tie
        // a naive "overwrite on better(candidate, best)" scan would drift
        // to the last tied index instead of keeping the first.
        let pop = Population::new(
            vec![Array1::zeros(1), Array1::zeros(1), Array1::zeros(1)],
            vec![
                Evaluation::new(1.0, vec![]),
                Evaluation::new(1.0, vec![]),
                Evaluation::new(1.0, vec![]),
            ],
        );
        assert_eq!(pop.find_best(|a, b| a.fom <= b.fom), 0);
    }
}
