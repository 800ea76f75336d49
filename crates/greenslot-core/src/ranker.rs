// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of GreenSlot.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use std::cmp::Ordering;

use greenslot_types::TimeWindow;
use tracing::debug;

/// Number of windows returned when the caller does not ask for a count
pub const DEFAULT_TOP_N: usize = 3;

/// Averages closer than this are treated as equivalent and ordered by stability
pub const DEFAULT_SCORE_BAND: f64 = 2.0;

// ============= Ordering =============

/// Banded comparison of two windows.
///
/// Higher average wins when the averages differ by more than `band`;
/// otherwise the steadier window (smaller max-min) wins. This relation is not
/// transitive across chains of near-equal averages, so it must only drive a
/// sort that tolerates inconsistent orderings.
pub fn compare_windows(a: &TimeWindow, b: &TimeWindow, band: f64) -> Ordering {
    if (a.avg_score - b.avg_score).abs() > band {
        b.avg_score.total_cmp(&a.avg_score)
    } else {
        a.stability_value.total_cmp(&b.stability_value)
    }
}

/// Rank with the default score band
pub fn rank(windows: Vec<TimeWindow>, top_n: usize) -> Vec<TimeWindow> {
    rank_with(windows, top_n, DEFAULT_SCORE_BAND)
}

/// Order windows best-first and keep at most `top_n`.
///
/// Stable: windows the comparator considers equal keep their scan order, so the
/// earliest placement wins ties.
pub fn rank_with(mut windows: Vec<TimeWindow>, top_n: usize, band: f64) -> Vec<TimeWindow> {
    let candidates = windows.len();
    insertion_sort_by(&mut windows, |a, b| compare_windows(a, b, band));
    windows.truncate(top_n);

    if let Some(best) = windows.first() {
        debug!(
            "Ranked {} candidates, best {}-{} avg {:.2} range {:.2}",
            candidates, best.start, best.end, best.avg_score, best.stability_value
        );
    }

    windows
}

/// Stable in-place insertion sort.
///
/// Never panics on a comparator that is not a total order, unlike the
/// standard library sorts.
fn insertion_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j], &items[j - 1]) == Ordering::Less {
            items.swap(j, j - 1);
            j -= 1;
        }
    }
}
