//! CSV progress recorder, grounded on `OptimizationRecorder` in the
//! teacher crate. Purely a convenience for offline analysis; the engine
//! itself only requires the four-field [`crate::progress::GenerationReport`].

use crate::progress::GenerationReport;
use std::fs::{create_dir_all, File};
use std::io::Write;
use std::sync::Mutex;

/// Accumulates [`GenerationReport`]s and writes them to a CSV file.
pub struct ProgressRecorder {
    records: Mutex<Vec<GenerationReport>>,
}

impl ProgressRecorder {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn record(&self, report: &GenerationReport) {
        self.records.lock().unwrap().push(report.clone());
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write all recorded generations to `<output_dir>/<name>.csv`,
    /// creating `output_dir` if necessary.
    pub fn save_to_csv(&self, output_dir: &str, name: &str) -> std::io::Result<String> {
        create_dir_all(output_dir)?;
        let path = format!("{output_dir}/{name}.csv");
        let mut file = File::create(&path)?;
        writeln!(file, "generation,best_slot,best_fom,best_violation_sum")?;
        for r in self.records.lock().unwrap().iter() {
            writeln!(
                file,
                "{},{},{:.16e},{:.16e}",
                r.generation, r.best_slot, r.best_fom, r.best_violation_sum
            )?;
        }
        Ok(path)
    }
}

impl Default for ProgressRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_recorded_generations_through_csv() {
        let recorder = ProgressRecorder::new();
        for g in 1..=3u64 {
            recorder.record(&GenerationReport {
                generation: g,
                best_slot: 0,
                best_fom: 1.0 / g as f64,
                best_violation_sum: 0.0,
            });
        }
        assert_eq!(recorder.len(), 3);

        let dir = tempfile::tempdir().unwrap();
        let path = recorder
            .save_to_csv(dir.path().to_str().unwrap(), "run")
            .unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.trim().lines().collect();
        assert_eq!(lines.len(), 4); // header + 3 generations
        assert!(lines[0].starts_with("generation,best_slot,best_fom"));
    }
}
