use super::ladder::ThresholdLadder;

/// Arithmetic mean of the readings, `None` when there are none.
pub fn mean(readings: &[f64]) -> Option<f64> {
    if readings.is_empty() {
        return None;
    }
    let sum: f64 = readings.iter().sum();
    Some(sum / readings.len() as f64)
}

/// Apply a ladder to the mean of the readings.
///
/// An empty list scores 0 instead of failing; the ladder's fallback is not
/// consulted in that case.
pub fn averaged_points(readings: &[f64], ladder: &ThresholdLadder) -> u32 {
    mean(readings).map_or(0, |avg| ladder.evaluate(avg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::tables;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[98.0, 97.0, 96.0, 95.0]), Some(96.5));
        assert_eq!(mean(&[4.2]), Some(4.2));
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_averaged_points() {
        let ladder = tables::activity_ladder();
        assert_eq!(averaged_points(&[98.0, 98.0, 98.0, 98.0], &ladder), 10);
        // mean 96.5 lands in the 96 bucket
        assert_eq!(averaged_points(&[98.0, 97.0, 96.0, 95.0], &ladder), 6);
    }

    #[test]
    fn test_empty_readings_score_zero() {
        let mut ladder = tables::activity_ladder();
        ladder.fallback = 3;
        assert_eq!(averaged_points(&[], &ladder), 0);
    }
}
