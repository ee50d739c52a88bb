pub struct StatsHelper;

impl StatsHelper {
    /// `numerator / denominator`, or `None` when the denominator is zero.
    pub fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
        if denominator == 0 {
            return None;
        }
        Some(numerator as f64 / denominator as f64)
    }

    pub fn percentage(numerator: usize, denominator: usize) -> Option<f64> {
        Self::ratio(numerator, denominator).map(|ratio| ratio * 100.0)
    }

    pub fn mean(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().sum::<f64>() / samples.len() as f64
    }

    /// Population standard deviation.
    pub fn std_dev(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let mean = Self::mean(samples);
        let variance = samples.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>()
            / samples.len() as f64;
        variance.sqrt()
    }
}
