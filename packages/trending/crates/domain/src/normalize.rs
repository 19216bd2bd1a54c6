//! Z-score normalization of raw scores against their own batch.

use serde::Serialize;

/// Population statistics of one batch of raw scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatchStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl BatchStats {
    /// Mean and population standard deviation (divides by N).
    pub fn from_scores(scores: &[f64]) -> Self {
        let count = scores.len();
        if count == 0 {
            return Self {
                count,
                mean: 0.0,
                std_dev: 0.0,
            };
        }

        let n = count as f64;
        let mean = scores.iter().sum::<f64>() / n;

        // Identical inputs must give exactly zero spread; the mean of equal
        // floats can be off by an ulp.
        let std_dev = if scores.iter().all(|&x| x == scores[0]) {
            0.0
        } else {
            (scores.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt()
        };

        Self {
            count,
            mean,
            std_dev,
        }
    }

    /// Standard score of `x`; zero when the batch cannot support a variance.
    pub fn z_score(&self, x: f64) -> f64 {
        if self.count < 2 || self.std_dev == 0.0 {
            return 0.0;
        }
        (x - self.mean) / self.std_dev
    }
}

/// One z-score per input, in input order.
pub fn z_scores(scores: &[f64]) -> Vec<f64> {
    let stats = BatchStats::from_scores(scores);
    scores.iter().map(|&x| stats.z_score(x)).collect()
}

/// Boost band an item falls into by its z-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// z > 1.5
    Exceptional,
    /// 0.5 < z <= 1.5
    AboveAverage,
    /// 0 < z <= 0.5
    Marginal,
    /// z <= 0
    Penalized,
}

impl Tier {
    pub const ALL: [Tier; 4] = [
        Tier::Exceptional,
        Tier::AboveAverage,
        Tier::Marginal,
        Tier::Penalized,
    ];

    pub fn of(z: f64) -> Self {
        if z > 1.5 {
            Tier::Exceptional
        } else if z > 0.5 {
            Tier::AboveAverage
        } else if z > 0.0 {
            Tier::Marginal
        } else {
            Tier::Penalized
        }
    }

    /// Factor applied to the raw score. Never below 0.1.
    pub fn multiplier(self, z: f64) -> f64 {
        match self {
            Tier::Exceptional => 1.0 + z,
            Tier::AboveAverage => 1.0 + z * 0.7,
            Tier::Marginal => 1.0 + z * 0.3,
            Tier::Penalized => f64::max(0.1, 1.0 + z * 0.5),
        }
    }

    pub fn condition(self) -> &'static str {
        match self {
            Tier::Exceptional => "z > 1.5",
            Tier::AboveAverage => "z > 0.5",
            Tier::Marginal => "z > 0",
            Tier::Penalized => "z <= 0",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tier::Exceptional => "Highly trending (major boost)",
            Tier::AboveAverage => "Moderately trending (moderate boost)",
            Tier::Marginal => "Slightly trending (small boost)",
            Tier::Penalized => "Not trending (penalty applied)",
        }
    }
}

pub fn final_score(raw: f64, z: f64) -> f64 {
    raw * Tier::of(z).multiplier(z)
}
