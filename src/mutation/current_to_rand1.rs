use crate::population::PopulationView;
use crate::rng::Rng64;
use ndarray::Array1;

/// `x[i] + K*(x[r1]-x[i]) + f*(x[r2]-x[r3])`, `K ~ U(0,1)`, r1,r2,r3
/// pairwise distinct. May include `i`.
pub(crate) fn mutant_current_to_rand1(
    i: usize,
    pop: &PopulationView<'_>,
    f: f64,
    rng: &mut Rng64,
) -> Array1<f64> {
    let idxs = rng.distinct_indices(&[], 3, pop.nrows());
    let (r1, r2, r3) = (idxs[0], idxs[1], idxs[2]);
    let k = rng.uniform01();
    let xi = pop.row(i);
    xi + &((pop.row(r1) - xi) * k) + &((pop.row(r2) - pop.row(r3)) * f)
}
