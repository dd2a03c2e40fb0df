/// Trailing mean over the current row and up to `window - 1` rows before it.
///
/// Missing values are skipped; a window with no valid value is `None`.
/// Windows at the start of the series are partial.
#[must_use]
pub fn trailing_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let (sum, count) = values[start..=i]
                .iter()
                .flatten()
                .fold((0.0, 0u32), |(s, n), x| (s + x, n + 1));
            (count > 0).then(|| sum / f64::from(count))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_windows_at_start() {
        let v = [Some(2.0), Some(4.0), Some(6.0)];
        assert_eq!(trailing_mean(&v, 2), vec![Some(2.0), Some(3.0), Some(5.0)]);
    }

    #[test]
    fn missing_values_are_skipped_not_zeroed() {
        let v = [Some(2.0), None, Some(6.0), None, None];
        assert_eq!(
            trailing_mean(&v, 2),
            vec![Some(2.0), Some(2.0), Some(6.0), Some(6.0), None]
        );
    }

    #[test]
    fn zero_window_is_all_missing() {
        assert_eq!(trailing_mean(&[Some(1.0)], 0), vec![None]);
    }
}
