//! Secondary smoke test on a narrow curved valley, following the
//! teacher's per-function integration test convention.

use ndarray::Array1;
use sade_engine::{SadeConfig, SadeDriver, Selector};

fn rosenbrock(_i: usize, x: &Array1<f64>) -> (f64, Vec<f64>) {
    let fom = (0..x.len() - 1)
        .map(|i| 100.0 * (x[i + 1] - x[i] * x[i]).powi(2) + (1.0 - x[i]).powi(2))
        .sum();
    (fom, vec![])
}

#[test]
fn sade_rosenbrock_4d() {
    let ranges = vec![(-5.0, 10.0); 4];
    let cfg = SadeConfig {
        lp: 30,
        fmu: 0.5,
        fsigma: 0.3,
        crmu: 0.9,
        crsigma: 0.1,
        np: 60,
        max_iter: 800,
        theta: 0.0,
        selector: Selector::StaticPenalty,
        seed: Some(50),
        on_generation: None,
    };
    let mut driver = SadeDriver::new(cfg, ranges).unwrap();
    let best = driver.solve(&rosenbrock).unwrap();
    let (fom, _) = rosenbrock(0, &best);
    assert!(fom < 1.0, "rosenbrock fom too high: {fom}");
}
