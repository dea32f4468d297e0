//! Largest-remainder column apportionment.
//!
//! Distributes an integer pixel total across sibling columns in proportion
//! to their current widths while never going below a column's minimum.
//! This is the Jefferson (D'Hondt) method from seat apportionment:
//!
//! 1. `sd = Σcurrent / next_total` (the standard divisor);
//! 2. every column starts at its minimum;
//! 3. until the sum reaches `next_total`, give one pixel to the column with
//!    the strictly largest positive remainder `current / sd − new`.
//!
//! Remainders are compared exactly in integer arithmetic
//! (`current · next_total − new · Σcurrent`, which is the remainder scaled
//! by `Σcurrent`), so results do not depend on floating point rounding.
//! Pixels are not handed out one at a time: the remainder of the last
//! pixel is found by bisection, so the cost is independent of the total.
//!
//! # Edge cases
//!
//! | Input | Result |
//! |-------|--------|
//! | no columns | empty |
//! | `Σcurrent == 0` | columns weighted equally |
//! | `next_total < Σmin` | [`UnderflowPolicy`] decides |
//! | equal remainders | lowest index wins |

use std::fmt;

use serde::{Deserialize, Serialize};

/// One column as seen by the apportionment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApportionColumn {
    /// Weight of the column: its width before the resize.
    pub current_width: u32,
    pub min_width: u32,
}

impl ApportionColumn {
    #[must_use]
    pub const fn new(current_width: u32, min_width: u32) -> Self {
        Self {
            current_width,
            min_width,
        }
    }
}

/// What to do when the target total is below the sum of minimums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnderflowPolicy {
    /// Return every column at its minimum; the sum exceeds the target.
    #[default]
    ClampToMinimums,
    /// Fail with [`ApportionError::Underflow`].
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApportionError {
    /// `next_total_width` cannot hold the columns' minimum widths.
    Underflow {
        next_total_width: u32,
        min_total_width: u64,
    },
}

impl fmt::Display for ApportionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Underflow {
                next_total_width,
                min_total_width,
            } => write!(
                f,
                "cannot apportion {next_total_width}px: columns need at least {min_total_width}px"
            ),
        }
    }
}

impl std::error::Error for ApportionError {}

/// Apportion `next_total_width` across `columns`, clamping to minimums on
/// underflow.
///
/// ```
/// use bee_layout::apportion::{apportion_column_widths, ApportionColumn};
///
/// let columns = [
///     ApportionColumn::new(100, 60),
///     ApportionColumn::new(150, 60),
///     ApportionColumn::new(250, 60),
/// ];
/// assert_eq!(apportion_column_widths(400, &columns), vec![80, 120, 200]);
/// assert_eq!(apportion_column_widths(150, &columns), vec![60, 60, 60]);
/// ```
#[must_use]
pub fn apportion_column_widths(next_total_width: u32, columns: &[ApportionColumn]) -> Vec<u32> {
    match try_apportion_column_widths(next_total_width, columns, UnderflowPolicy::ClampToMinimums)
    {
        Ok(widths) => widths,
        // Unreachable with the clamping policy.
        Err(_) => columns.iter().map(|c| c.min_width).collect(),
    }
}

/// Apportion `next_total_width` across `columns` with an explicit
/// underflow policy.
pub fn try_apportion_column_widths(
    next_total_width: u32,
    columns: &[ApportionColumn],
    policy: UnderflowPolicy,
) -> Result<Vec<u32>, ApportionError> {
    let mut next_widths: Vec<u32> = columns.iter().map(|c| c.min_width).collect();
    let min_total: u64 = next_widths.iter().map(|&w| u64::from(w)).sum();
    let target = u64::from(next_total_width);

    if target < min_total {
        return match policy {
            UnderflowPolicy::ClampToMinimums => Ok(next_widths),
            UnderflowPolicy::Reject => Err(ApportionError::Underflow {
                next_total_width,
                min_total_width: min_total,
            }),
        };
    }
    if columns.is_empty() {
        return Ok(next_widths);
    }

    let needed = i128::from(target - min_total);
    if needed == 0 {
        return Ok(next_widths);
    }

    let current_total: u64 = columns.iter().map(|c| u64::from(c.current_width)).sum();
    let weight_total = if current_total == 0 {
        columns.len() as i128
    } else {
        i128::from(current_total)
    };
    // current · next_total, the quota scaled by Σcurrent.
    let scaled_quota = |i: usize| -> i128 {
        let weight = if current_total == 0 {
            1
        } else {
            i128::from(columns[i].current_width)
        };
        weight * i128::from(next_total_width)
    };
    // Pixels column `i` receives while its scaled remainder is >= `floor`.
    let taken = |i: usize, floor: i128| -> i128 {
        let last = (scaled_quota(i) - floor).div_euclid(weight_total);
        (last - i128::from(columns[i].min_width) + 1).max(0)
    };
    let taken_total = |floor: i128| -> i128 { (0..columns.len()).map(|i| taken(i, floor)).sum() };

    // Remainder of the last pixel handed out: the largest floor that still
    // covers every missing pixel. A floor of 1 always does.
    let mut lo: i128 = 1;
    let mut hi = (0..columns.len()).map(&scaled_quota).max().unwrap_or(1).max(1);
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if taken_total(mid) >= needed {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    // Strictly larger remainders all win; ties at the floor go to the
    // lowest index.
    let mut tied = needed - taken_total(lo + 1);
    for (i, width) in next_widths.iter_mut().enumerate() {
        let mut extra = taken(i, lo + 1);
        if tied > 0 && taken(i, lo) > extra {
            extra += 1;
            tied -= 1;
        }
        *width = u32::try_from(i128::from(*width) + extra).unwrap_or(u32::MAX);
    }

    Ok(next_widths)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(pairs: &[(u32, u32)]) -> Vec<ApportionColumn> {
        pairs.iter()
            .map(|&(current, min)| ApportionColumn::new(current, min))
            .collect()
    }

    #[test]
    fn shrink_keeps_proportions() {
        let c = cols(&[(100, 60), (150, 60), (250, 60)]);
        assert_eq!(apportion_column_widths(400, &c), vec![80, 120, 200]);
    }

    #[test]
    fn grow_keeps_proportions() {
        let c = cols(&[(100, 60), (150, 60), (250, 60)]);
        assert_eq!(apportion_column_widths(600, &c), vec![120, 180, 300]);
    }

    #[test]
    fn same_total_is_identity() {
        let c = cols(&[(100, 60), (150, 60), (250, 60)]);
        assert_eq!(apportion_column_widths(500, &c), vec![100, 150, 250]);
    }

    #[test]
    fn tie_goes_to_first_column() {
        let c = cols(&[(100, 100), (100, 100), (100, 100)]);
        assert_eq!(apportion_column_widths(301, &c), vec![101, 100, 100]);
        let c = cols(&[(150, 100), (150, 100)]);
        assert_eq!(apportion_column_widths(302, &c), vec![151, 151]);
    }

    #[test]
    fn zero_current_total_weights_equally() {
        let c = cols(&[(0, 0), (0, 0), (0, 0)]);
        assert_eq!(apportion_column_widths(10, &c), vec![4, 3, 3]);
    }

    #[test]
    fn underflow_clamps_by_default() {
        let c = cols(&[(100, 60), (150, 60), (250, 60)]);
        assert_eq!(apportion_column_widths(150, &c), vec![60, 60, 60]);
    }

    #[test]
    fn underflow_rejected_on_request() {
        let c = cols(&[(100, 60), (150, 60), (250, 60)]);
        let err = try_apportion_column_widths(150, &c, UnderflowPolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            ApportionError::Underflow {
                next_total_width: 150,
                min_total_width: 180,
            }
        );
        assert_eq!(
            err.to_string(),
            "cannot apportion 150px: columns need at least 180px"
        );
    }

    #[test]
    fn no_columns() {
        assert!(apportion_column_widths(500, &[]).is_empty());
        assert!(try_apportion_column_widths(0, &[], UnderflowPolicy::Reject)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn exact_minimum_total() {
        let c = cols(&[(500, 60), (10, 40)]);
        assert_eq!(apportion_column_widths(100, &c), vec![60, 40]);
    }

    #[test]
    fn full_range_total_is_split_by_weight() {
        let c = cols(&[(100, 60), (300, 60)]);
        let widths = apportion_column_widths(u32::MAX, &c);
        assert_eq!(widths, vec![1_073_741_824, 3_221_225_471]);
    }

    #[test]
    fn policy_serializes_snake_case() {
        let json = serde_json::to_string(&UnderflowPolicy::ClampToMinimums).unwrap();
        assert_eq!(json, "\"clamp_to_minimums\"");
    }
}
