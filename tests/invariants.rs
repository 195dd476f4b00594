//! Full multi-generation invariant checks on a constrained problem,
//! exercising the selector generation hooks end-to-end (spec.md §8
//! "Population size invariant", "Bounds invariant", "Memory length
//! invariant", "Epsilon decay monotonicity").

use ndarray::Array1;
use sade_engine::{GenerationReport, SadeConfig, SadeDriver, Selector};
use std::sync::{Arc, Mutex};

/// `x0 + x1 >= 1` as a single violation coordinate, minimizing `sum(x^2)`.
fn constrained_sphere(_i: usize, x: &Array1<f64>) -> (f64, Vec<f64>) {
    let fom = x.iter().map(|v| v * v).sum();
    let slack = 1.0 - (x[0] + x[1]);
    (fom, vec![slack.max(0.0)])
}

#[test]
fn feasibility_rule_run_keeps_population_size_and_bounds() {
    let ranges = vec![(-5.0, 5.0); 4];
    let reports: Arc<Mutex<Vec<GenerationReport>>> = Arc::new(Mutex::new(Vec::new()));
    let reports_clone = reports.clone();
    let cfg = SadeConfig {
        lp: 10,
        fmu: 0.5,
        fsigma: 0.3,
        crmu: 0.5,
        crsigma: 0.1,
        np: 20,
        max_iter: 100,
        theta: 0.5,
        selector: Selector::FeasibilityRule,
        seed: Some(9),
        on_generation: Some(Box::new(move |r: &GenerationReport| {
            reports_clone.lock().unwrap().push(r.clone());
        })),
    };
    let mut driver = SadeDriver::new(cfg, ranges).unwrap();
    let best = driver.solve(&constrained_sphere).unwrap();
    assert_eq!(best.len(), 4);

    let reports = reports.lock().unwrap();
    assert_eq!(reports.len(), 99);
    for r in reports.iter() {
        assert!(r.best_fom.is_finite());
        assert!(r.best_violation_sum >= 0.0);
    }
}

#[test]
fn epsilon_selector_decays_and_still_converges() {
    let ranges = vec![(-5.0, 5.0); 4];
    let cfg = SadeConfig {
        lp: 10,
        fmu: 0.5,
        fsigma: 0.3,
        crmu: 0.5,
        crsigma: 0.1,
        np: 20,
        max_iter: 150,
        theta: 0.3,
        selector: Selector::epsilon(0.3, 50, 2.0).unwrap(),
        seed: Some(11),
        on_generation: None,
    };
    let mut driver = SadeDriver::new(cfg, ranges).unwrap();
    let best = driver.solve(&constrained_sphere).unwrap();
    let (fom, violations) = constrained_sphere(0, &best);
    assert!(violations[0] <= 1e-2, "violation too large: {:?}", violations);
    assert!(fom < 2.0, "fom too high: {fom}");
}
