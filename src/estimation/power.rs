//! Power achieved by a given sample size, analytically and by simulation

use crate::design::{EffectSpecification, Tails, TestDesignParameters};
use crate::estimation::estimator::SampleSizeEstimator;
use crate::io::configuration::{DEFAULT_SEED, DEFAULT_SIMULATION_TRIALS};
use crate::io::error::{Result, computation_error, invalid_parameter};
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Binomial, Distribution};

/// Settings for Monte-Carlo power checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of simulated experiments
    pub trials: usize,
    /// Seed for the random number generator
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_SIMULATION_TRIALS,
            seed: DEFAULT_SEED,
        }
    }
}

impl SampleSizeEstimator {
    /// Power of the design when each group holds `n_per_group` observations
    ///
    /// Inverts the sizing formula, so the required size from
    /// [`Self::estimate`] is the smallest `n` for which this meets the target.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error for an invalid design or effect,
    /// or when `n_per_group` is zero
    pub fn achieved_power(
        &self,
        design: &TestDesignParameters,
        effect: &EffectSpecification,
        n_per_group: u64,
    ) -> Result<f64> {
        let prepared = self.prepare(design, effect)?;
        check_group_size(n_per_group)?;

        let equal_split_size = n_per_group as f64 / prepared.split_factor();
        let z_power = prepared
            .difference()
            .abs()
            .mul_add(
                equal_split_size.sqrt(),
                -prepared.z_alpha * prepared.null_variance().sqrt(),
            )
            / prepared.alt_variance().sqrt();

        Ok(self.normal.cdf(z_power))
    }

    /// Fraction of simulated experiments that reject the null hypothesis
    ///
    /// Each trial draws binomial success counts for both arms at the design's
    /// traffic split and applies a pooled two-proportion z-test at the
    /// corrected significance level.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error for an invalid design or effect,
    /// or when `n_per_group` or the trial count is zero, and a computation
    /// error if an arm's outcome distribution cannot be built
    pub fn simulate_power(
        &self,
        design: &TestDesignParameters,
        effect: &EffectSpecification,
        n_per_group: u64,
        config: &SimulationConfig,
    ) -> Result<f64> {
        let prepared = self.prepare(design, effect)?;
        check_group_size(n_per_group)?;
        if config.trials == 0 {
            return Err(invalid_parameter("trials", &0, &"must be at least 1"));
        }

        let total = 2.0 * n_per_group as f64;
        let control_size = (total * (1.0 - prepared.traffic_split)).round().max(1.0) as u64;
        let treatment_size = (total * prepared.traffic_split).round().max(1.0) as u64;
        let direction = prepared.difference().signum();

        let control_outcomes = arm_outcomes(control_size, prepared.baseline_rate)?;
        let treatment_outcomes = arm_outcomes(treatment_size, prepared.treatment_rate)?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut rejections = 0_usize;

        for _ in 0..config.trials {
            let control_successes = control_outcomes.sample(&mut rng);
            let treatment_successes = treatment_outcomes.sample(&mut rng);

            let z = pooled_z_statistic(
                (control_successes, control_size),
                (treatment_successes, treatment_size),
            );

            let rejected = match prepared.tails {
                Tails::TwoSided => z.abs() > prepared.z_alpha,
                Tails::OneSided => z * direction > prepared.z_alpha,
            };
            if rejected {
                rejections += 1;
            }
        }

        Ok(rejections as f64 / config.trials as f64)
    }
}

fn check_group_size(n_per_group: u64) -> Result<()> {
    if n_per_group == 0 {
        return Err(invalid_parameter("n_per_group", &0, &"must be at least 1"));
    }
    Ok(())
}

fn arm_outcomes(size: u64, rate: f64) -> Result<Binomial> {
    Binomial::new(size, rate).map_err(|e| computation_error("binomial arm outcomes", &e))
}

/// Two-proportion z statistic with pooled variance, treatment minus control
fn pooled_z_statistic(control: (u64, u64), treatment: (u64, u64)) -> f64 {
    let (control_successes, control_size) = control;
    let (treatment_successes, treatment_size) = treatment;

    let control_rate = control_successes as f64 / control_size as f64;
    let treatment_rate = treatment_successes as f64 / treatment_size as f64;
    let pooled = (control_successes + treatment_successes) as f64
        / (control_size + treatment_size) as f64;

    let standard_error = (pooled
        * (1.0 - pooled)
        * (1.0 / control_size as f64 + 1.0 / treatment_size as f64))
        .sqrt();
    if standard_error > 0.0 {
        (treatment_rate - control_rate) / standard_error
    } else {
        0.0
    }
}
