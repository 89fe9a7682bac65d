//! Period windows over a development triangle

use serde::{Deserialize, Serialize};

/// One age-to-age transition of a triangle
///
/// `age` is compared against `age - age_length`. `lag` is zero or negative:
/// the number of most recent origin periods that have not reached `age`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub age: u32,
    pub lag: i32,
}

impl PeriodWindow {
    /// The younger age of the transition
    pub fn prior_age(&self, age_length: u32) -> u32 {
        self.age - age_length
    }

    /// Number of origin periods mature enough for this transition
    pub fn mature_rows(&self, periods: usize) -> usize {
        periods.saturating_sub(self.lag.unsigned_abs() as usize)
    }

    /// Label such as "12-24"
    pub fn label(&self, age_length: u32) -> String {
        format!("{}-{}", self.prior_age(age_length), self.age)
    }
}

/// Windows `(first_age + age_length * i, -i)` for `i` in `1..periods`
pub fn period_windows(first_age: u32, age_length: u32, periods: usize) -> Vec<PeriodWindow> {
    (1..periods)
        .map(|i| PeriodWindow {
            age: first_age + age_length * i as u32,
            lag: -(i as i32),
        })
        .collect()
}
