use crate::population::PopulationView;
use crate::rng::Rng64;
use ndarray::Array1;

/// `x[best] + f*(x[r1] - x[r2])`, r1 != r2, both excluding `best`.
pub(crate) fn mutant_best1(
    _i: usize,
    pop: &PopulationView<'_>,
    best_idx: usize,
    f: f64,
    rng: &mut Rng64,
) -> Array1<f64> {
    let idxs = rng.distinct_indices(&[best_idx], 2, pop.nrows());
    let (r1, r2) = (idxs[0], idxs[1]);
    pop.row(best_idx) + &((pop.row(r1) - pop.row(r2)) * f)
}
