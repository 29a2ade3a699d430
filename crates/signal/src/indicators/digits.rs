use std::cmp::Reverse;

/// Minimum buffered digits before frequency statistics are defined.
pub const MIN_DIGIT_SAMPLES: usize = 60;

/// Frequency statistics over a rolling digit buffer.
///
/// Percentages are relative to the buffered count, which may be anywhere
/// between `MIN_DIGIT_SAMPLES` and the buffer capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitStats {
    /// Digits 0-9 ranked by descending frequency, ties broken by ascending
    /// digit value.
    pub ranking: [u8; 10],
    /// Percentage of samples in 0..=5.
    pub under6: f64,
    /// Percentage of samples in 0..=6.
    pub under7: f64,
    /// Percentage of even samples.
    pub even: f64,
    /// Percentage of odd samples.
    pub odd: f64,
}

impl DigitStats {
    /// The digit quoted as a trade entry point.
    pub fn most_frequent(&self) -> u8 {
        self.ranking[0]
    }
}

/// Compute digit statistics, or `None` below `MIN_DIGIT_SAMPLES`.
pub fn digit_stats(digits: &[u8]) -> Option<DigitStats> {
    if digits.len() < MIN_DIGIT_SAMPLES {
        return None;
    }

    let mut counts = [0usize; 10];
    for &d in digits {
        if let Some(slot) = counts.get_mut(d as usize) {
            *slot += 1;
        }
    }
    let total = digits.len() as f64;

    let mut ranking: [u8; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
    ranking.sort_by_key(|&d| (Reverse(counts[d as usize]), d));

    let under6: usize = counts[..6].iter().sum();
    let under7: usize = counts[..7].iter().sum();
    let even: usize = counts.iter().step_by(2).sum();
    let odd: usize = counts.iter().skip(1).step_by(2).sum();

    let pct = |n: usize| n as f64 / total * 100.0;
    Some(DigitStats {
        ranking,
        under6: pct(under6),
        under7: pct(under7),
        even: pct(even),
        odd: pct(odd),
    })
}
