//! Per-generation progress record emitted by both drivers (spec.md §6).

use serde::Serialize;

/// Per-generation progress callback shape shared by both drivers.
pub type GenerationCallback = Box<dyn FnMut(&GenerationReport) + Send>;

/// One record per generation: which slot holds the current best, its
/// FOM, and its aggregate violation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub generation: u64,
    pub best_slot: usize,
    pub best_fom: f64,
    pub best_violation_sum: f64,
}
