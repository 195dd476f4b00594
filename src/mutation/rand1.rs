use crate::population::PopulationView;
use crate::rng::Rng64;
use ndarray::Array1;

/// `x[r1] + f*(x[r2] - x[r3])`, r1/r2/r3 pairwise distinct. May include `i`.
pub(crate) fn mutant_rand1(_i: usize, pop: &PopulationView<'_>, f: f64, rng: &mut Rng64) -> Array1<f64> {
    let idxs = rng.distinct_indices(&[], 3, pop.nrows());
    let (r1, r2, r3) = (idxs[0], idxs[1], idxs[2]);
    pop.row(r1) + &((pop.row(r2) - pop.row(r3)) * f)
}
