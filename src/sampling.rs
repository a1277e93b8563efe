//! Random draws shared by the synthesized-data paths

use rand::RngExt;

/// Round to one decimal place
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Uniform rating in `[low, high]`, rounded to one decimal
pub fn sample_rating<R: RngExt>(rng: &mut R, low: f64, high: f64) -> f64 {
    round_to_tenth(rng.random_range(low..=high))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(4.26), 4.3);
        assert_eq!(round_to_tenth(3.5), 3.5);
        assert_eq!(round_to_tenth(4.04), 4.0);
    }

    #[test]
    fn test_sample_rating_stays_in_range() {
        let mut rng = rand::rng();
        for _ in 0..500 {
            let rating = sample_rating(&mut rng, 3.5, 5.0);
            assert!((3.5..=5.0).contains(&rating), "rating {rating} out of range");
            assert_eq!(round_to_tenth(rating), rating);
        }
    }
}
