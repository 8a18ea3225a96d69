//! Small numeric helpers shared by the report metrics.

use std::collections::HashMap;

/// Round to one decimal place, resolving exact `.x5` ties to the even digit.
///
/// The exact binary value is rounded once, so `0.8500000000000001` goes up.
pub fn round1(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Share of `hits` in `total`, scaled to a percentage. `None` when `total` is zero.
pub fn percentage(hits: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(hits as f64 / total as f64 * 100.0)
}

pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = u32>,
{
    let (sum, n) = values
        .into_iter()
        .fold((0u64, 0usize), |(sum, n), v| (sum + u64::from(v), n + 1));
    if n == 0 {
        None
    } else {
        Some(sum as f64 / n as f64)
    }
}

/// Most frequent value. Ties go to the lexically smallest value.
pub fn mode<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = HashMap::<&str, usize>::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| b.cmp(a)))
        .map(|(v, _)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round1_ties_to_even() {
        assert_eq!(round1(2.25), 2.2);
        assert_eq!(round1(2.75), 2.8);
        assert_eq!(round1(100.0 / 3.0), 33.3);
        assert_eq!(round1(200.0 / 3.0), 66.7);
        assert_eq!(round1(40.0), 40.0);
    }

    #[test]
    fn round1_uses_exact_value_above_half() {
        // 17 of 2000 rows is 0.8500000000000001, just above the tie
        assert_eq!(round1(17.0 / 2000.0 * 100.0), 0.9);
        assert_eq!(round1(0.05), 0.1);
        assert_eq!(round1(percentage(17, 2000).unwrap()), 0.9);
    }

    #[test]
    fn percentage_of_empty_is_none() {
        assert_eq!(percentage(0, 0), None);
        assert_eq!(percentage(1, 2), Some(50.0));
        assert_eq!(percentage(3, 3), Some(100.0));
    }

    #[test]
    fn mean_of_ages() {
        assert_eq!(mean([30, 50]), Some(40.0));
        assert_eq!(mean(Vec::<u32>::new()), None);
    }

    #[test]
    fn mode_breaks_ties_lexically() {
        assert_eq!(mode(["b", "a", "b", "a", "c"]), Some("a"));
        assert_eq!(mode(["x", "y", "y"]), Some("y"));
        assert_eq!(mode(Vec::<&str>::new()), None);
    }
}
