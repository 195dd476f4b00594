//! Binomial and exponential crossover (spec.md §4.2).

use crate::rng::Rng64;
use ndarray::Array1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    Bin,
    Exp,
}

impl Crossover {
    pub fn trial(&self, target: &Array1<f64>, donor: &Array1<f64>, cr: f64, rng: &mut Rng64) -> Array1<f64> {
        match self {
            Crossover::Bin => binomial(target, donor, cr, rng),
            Crossover::Exp => exponential(target, donor, cr, rng),
        }
    }
}

/// For each coordinate `j`, take the donor value if `U(0,1) <= cr` or
/// `j == jrand`, else the target value. Guarantees at least one
/// coordinate comes from the donor.
fn binomial(target: &Array1<f64>, donor: &Array1<f64>, cr: f64, rng: &mut Rng64) -> Array1<f64> {
    let n = target.len();
    let jrand = rng.uniform_index(n);
    let mut trial = target.clone();
    for j in 0..n {
        if j == jrand || rng.uniform01() <= cr {
            trial[j] = donor[j];
        }
    }
    trial
}

/// Draw a start index `j0` and a run length `L` by counting consecutive
/// `U(0,1) <= cr` draws starting from `L = 1`. Take donor values at
/// `(j0 + k) mod D` for `k in [0, L)`.
fn exponential(target: &Array1<f64>, donor: &Array1<f64>, cr: f64, rng: &mut Rng64) -> Array1<f64> {
    let n = target.len();
    let j0 = rng.uniform_index(n);
    let mut trial = target.clone();
    let mut l = 0usize;
    let mut j = j0;
    loop {
        trial[j] = donor[j];
        l += 1;
        j = (j + 1) % n;
        if l >= n || rng.uniform01() > cr {
            break;
        }
    }
    trial
}
