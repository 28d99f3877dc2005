//! Measurement sampling.
//!
//! Grading always works from exact probabilities; sampled counts exist for
//! display. [`SamplingMode::Exact`] gives reproducible counts when a caller
//! needs them anyway.

use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SimulatorConfig;
use crate::error::{SimError, SimResult};
use crate::result::{Counts, Probabilities};

/// How counts are derived from a probability distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    /// Independent categorical draws.
    #[default]
    Multinomial,
    /// `round(p × S)` with the remainder handed out by largest fraction.
    Exact,
}

/// Converts probabilities into shot counts that sum to the shot count.
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    mode: SamplingMode,
    negligible_probability: f64,
    max_shots: u64,
}

impl Sampler {
    /// Create a sampler using the default thresholds.
    pub fn new(mode: SamplingMode) -> Self {
        Self::from_config(&SimulatorConfig::default().with_sampling(mode))
    }

    /// Create a sampler from simulator configuration.
    pub fn from_config(config: &SimulatorConfig) -> Self {
        Self {
            mode: config.sampling,
            negligible_probability: config.negligible_probability,
            max_shots: config.max_shots,
        }
    }

    /// The sampling mode.
    pub fn mode(&self) -> SamplingMode {
        self.mode
    }

    /// Sample with the thread-local RNG.
    pub fn sample(&self, distribution: &Probabilities, shots: u64) -> SimResult<Counts> {
        self.sample_with_rng(distribution, shots, &mut rand::thread_rng())
    }

    /// Sample with a caller-supplied RNG.
    ///
    /// States below the negligible threshold never appear in the output, and
    /// the counts always total `shots`.
    pub fn sample_with_rng<R: Rng + ?Sized>(
        &self,
        distribution: &Probabilities,
        shots: u64,
        rng: &mut R,
    ) -> SimResult<Counts> {
        if shots == 0 || shots > self.max_shots {
            return Err(SimError::InvalidShots {
                shots,
                max: self.max_shots,
            });
        }

        let mut states = Vec::with_capacity(distribution.len());
        let mut weights = Vec::with_capacity(distribution.len());
        for (state, p) in distribution.iter() {
            if !p.is_finite() || p < 0.0 {
                return Err(SimError::InvalidDistribution(format!(
                    "probability of '{state}' is {p}"
                )));
            }
            if p >= self.negligible_probability && p > 0.0 {
                states.push(state);
                weights.push(p);
            }
        }
        if states.is_empty() {
            return Err(SimError::InvalidDistribution(
                "no outcome has a non-negligible probability".into(),
            ));
        }

        let tallies = match self.mode {
            SamplingMode::Multinomial => multinomial(&weights, shots, rng)?,
            SamplingMode::Exact => largest_remainder(&weights, shots),
        };

        debug!(
            "Sampled {} shots over {} outcomes ({:?})",
            shots,
            states.len(),
            self.mode
        );

        Ok(states
            .into_iter()
            .zip(tallies)
            .filter(|(_, count)| *count > 0)
            .map(|(state, count)| (state.to_string(), count))
            .collect())
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(SamplingMode::default())
    }
}

fn multinomial<R: Rng + ?Sized>(weights: &[f64], shots: u64, rng: &mut R) -> SimResult<Vec<u64>> {
    let dist =
        WeightedIndex::new(weights).map_err(|e| SimError::InvalidDistribution(e.to_string()))?;
    let mut tallies = vec![0_u64; weights.len()];
    for _ in 0..shots {
        tallies[dist.sample(rng)] += 1;
    }
    Ok(tallies)
}

fn largest_remainder(weights: &[f64], shots: u64) -> Vec<u64> {
    let total: f64 = weights.iter().sum();
    let quotas: Vec<f64> = weights
        .iter()
        .map(|w| w / total * shots as f64)
        .collect();

    let mut tallies: Vec<u64> = quotas.iter().map(|q| q.floor() as u64).collect();
    let assigned: u64 = tallies.iter().sum();

    let mut by_fraction: Vec<usize> = (0..quotas.len()).collect();
    // Stable: equal fractions favour the lower basis index.
    by_fraction.sort_by(|&a, &b| {
        let fa = quotas[a] - quotas[a].floor();
        let fb = quotas[b] - quotas[b].floor();
        fb.total_cmp(&fa)
    });

    for &i in by_fraction.iter().cycle().take(shots.saturating_sub(assigned) as usize) {
        tallies[i] += 1;
    }
    tallies
}
