use crate::population::PopulationView;
use crate::rng::Rng64;
use ndarray::Array1;

/// `x[i] + f*(x[best]-x[i]) + f*(x[r1]-x[r2]) + f*(x[r3]-x[r4])`,
/// r1..r4 distinct, excluding `best`.
pub(crate) fn mutant_rand_to_best2(
    i: usize,
    pop: &PopulationView<'_>,
    best_idx: usize,
    f: f64,
    rng: &mut Rng64,
) -> Array1<f64> {
    let idxs = rng.distinct_indices(&[best_idx], 4, pop.nrows());
    let (r1, r2, r3, r4) = (idxs[0], idxs[1], idxs[2], idxs[3]);
    let xi = pop.row(i);
    xi + &((pop.row(best_idx) - xi + pop.row(r1) - pop.row(r2) + pop.row(r3) - pop.row(r4)) * f)
}
