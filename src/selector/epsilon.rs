use crate::error::ConfigError;

/// Epsilon-constraint schedule: decays an infeasibility tolerance from
/// `epsilon_0` (a low quantile of generation-1 violations) down to zero
/// by generation `tc`, then holds it at zero.
#[derive(Debug, Clone)]
pub struct Epsilon {
    theta: f64,
    tc: u64,
    cp: f64,
    epsilon_0: f64,
    epsilon_level: f64,
    initialized: bool,
}

impl Epsilon {
    pub fn new(theta: f64, tc: u64, cp: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&theta) {
            return Err(ConfigError::InvalidSelectorParams {
                selector: "Epsilon",
                reason: "theta must be in [0, 1]",
            });
        }
        if tc == 0 {
            return Err(ConfigError::InvalidSelectorParams {
                selector: "Epsilon",
                reason: "tc must be positive",
            });
        }
        if cp <= 0.0 {
            return Err(ConfigError::InvalidSelectorParams {
                selector: "Epsilon",
                reason: "cp must be positive",
            });
        }
        Ok(Self {
            theta,
            tc,
            cp,
            epsilon_0: 0.0,
            epsilon_level: 0.0,
            initialized: false,
        })
    }

    pub fn level(&self) -> f64 {
        self.epsilon_level
    }

    /// On generation 1, set `epsilon_0`/`epsilon_level` from the
    /// `floor(theta*NP)`-th smallest violation sum. On every later
    /// generation, decay `epsilon_level` per the schedule.
    pub fn on_generation_start(&mut self, g: u64, violation_sums: &[f64]) {
        if g == 1 && !self.initialized {
            let np = violation_sums.len();
            let mut sorted = violation_sums.to_vec();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let idx = ((self.theta * np as f64).floor() as usize).saturating_sub(1).min(np.saturating_sub(1));
            self.epsilon_0 = sorted.get(idx).copied().unwrap_or(0.0);
            self.epsilon_level = self.epsilon_0;
            self.initialized = true;
            return;
        }
        if g > self.tc {
            self.epsilon_level = 0.0;
        } else {
            self.epsilon_level = self.epsilon_0 * (1.0 - g as f64 / self.tc as f64).powf(self.cp);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_epsilon_init_picks_third_smallest() {
        let violations = [0.0, 0.0, 0.1, 0.2, 0.5, 1.0, 1.0, 2.0, 5.0, 10.0];
        assert_eq!(violations.len(), 10);
        let mut eps = Epsilon::new(0.3, 50, 2.0).unwrap();
        eps.on_generation_start(1, &violations);
        assert_eq!(eps.epsilon_0, 0.1);
        assert_eq!(eps.level(), 0.1);
    }

    #[test]
    fn decay_is_monotone_then_zero_after_tc() {
        let violations = vec![0.0; 10];
        let mut eps = Epsilon::new(0.3, 5, 2.0).unwrap();
        eps.on_generation_start(1, &violations);
        let mut prev = eps.level();
        for g in 2..=5u64 {
            eps.on_generation_start(g, &violations);
            assert!(eps.level() <= prev + 1e-12);
            prev = eps.level();
        }
        eps.on_generation_start(6, &violations);
        assert_eq!(eps.level(), 0.0);
        eps.on_generation_start(100, &violations);
        assert_eq!(eps.level(), 0.0);
    }

    #[test]
    fn rejects_invalid_params() {
        assert!(Epsilon::new(1.5, 10, 1.0).is_err());
        assert!(Epsilon::new(0.5, 0, 1.0).is_err());
        assert!(Epsilon::new(0.5, 10, 0.0).is_err());
    }
}
