//! Series crossover detection.
//!
//! A row crosses above when the first series is strictly above the second
//! on that row and was at or below it on the previous row. Comparisons
//! involving `NaN` are false, so warm-up rows never cross. The first row
//! never crosses.

/// Rows where `a` crosses above `b`.
pub fn crossed_above(a: &[f64], b: &[f64]) -> Vec<bool> {
    cross(a.len().min(b.len()), |i| a[i] > b[i], |i| a[i] <= b[i])
}

/// Rows where `a` crosses below `b`.
pub fn crossed_below(a: &[f64], b: &[f64]) -> Vec<bool> {
    cross(a.len().min(b.len()), |i| a[i] < b[i], |i| a[i] >= b[i])
}

/// Rows where `a` crosses above a fixed level.
pub fn crossed_above_value(a: &[f64], level: f64) -> Vec<bool> {
    cross(a.len(), |i| a[i] > level, |i| a[i] <= level)
}

/// Rows where `a` crosses below a fixed level.
pub fn crossed_below_value(a: &[f64], level: f64) -> Vec<bool> {
    cross(a.len(), |i| a[i] < level, |i| a[i] >= level)
}

fn cross(len: usize, now: impl Fn(usize) -> bool, before: impl Fn(usize) -> bool) -> Vec<bool> {
    (0..len).map(|i| i > 0 && now(i) && before(i - 1)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossed_above_value() {
        let rsi = [70.0, 79.0, 80.0, 81.0, 85.0, 79.0, 82.0];
        assert_eq!(
            crossed_above_value(&rsi, 80.0),
            vec![false, false, false, true, false, false, true]
        );
    }

    #[test]
    fn test_touching_level_is_not_a_cross() {
        let rsi = [79.0, 80.0, 79.0];
        assert!(crossed_above_value(&rsi, 80.0).iter().all(|c| !c));
    }

    #[test]
    fn test_nan_never_crosses() {
        let rsi = [f64::NAN, 90.0, f64::NAN, 90.0];
        assert!(crossed_above_value(&rsi, 80.0).iter().all(|c| !c));
    }

    #[test]
    fn test_series_crosses() {
        let fast = [1.0, 2.0, 3.0, 2.0, 1.0];
        let slow = [2.0, 2.0, 2.0, 2.0, 2.0];

        assert_eq!(
            crossed_above(&fast, &slow),
            vec![false, false, true, false, false]
        );
        assert_eq!(
            crossed_below(&fast, &slow),
            vec![false, false, false, false, true]
        );
    }

    #[test]
    fn test_crossed_below_value() {
        let rsi = [55.0, 45.0, 50.0, 49.0];
        assert_eq!(
            crossed_below_value(&rsi, 50.0),
            vec![false, true, false, true]
        );
    }

    #[test]
    fn test_first_row_never_crosses() {
        assert_eq!(crossed_above_value(&[100.0], 80.0), vec![false]);
        assert!(crossed_above_value(&[], 80.0).is_empty());
    }
}
