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

//! `HH:MM` bucket labels on the 10-minute day grid.
//!
//! Labels are compared as plain strings by the window constraints, which works
//! because they are always zero-padded.

/// Length of one bucket in minutes
pub const BUCKET_MINUTES: u32 = 10;

/// Number of buckets in a full day (24 * 6)
pub const BUCKETS_PER_DAY: usize = 144;

/// Format an hour/minute pair as a zero-padded `HH:MM` label
pub fn bucket_label(hour: u32, minute: u32) -> String {
    format!("{hour:02}:{minute:02}")
}

/// Label of the bucket at `index` on the day grid (0 => "00:00", 143 => "23:50")
pub fn label_from_index(index: usize) -> String {
    let minutes = (index as u32) * BUCKET_MINUTES;
    bucket_label((minutes / 60) % 24, minutes % 60)
}

/// Parse "HH:MM" into minutes since midnight
pub fn label_minutes(label: &str) -> Option<u32> {
    let (hour, minute) = label.trim().split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;

    if hour > 23 || minute > 59 {
        return None;
    }

    Some(hour * 60 + minute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_label_is_zero_padded() {
        assert_eq!(bucket_label(0, 0), "00:00");
        assert_eq!(bucket_label(7, 5), "07:05");
        assert_eq!(bucket_label(23, 50), "23:50");
    }

    #[test]
    fn test_label_from_index() {
        assert_eq!(label_from_index(0), "00:00");
        assert_eq!(label_from_index(1), "00:10");
        assert_eq!(label_from_index(87), "14:30");
        assert_eq!(label_from_index(BUCKETS_PER_DAY - 1), "23:50");
    }

    #[test]
    fn test_label_minutes() {
        assert_eq!(label_minutes("00:00"), Some(0));
        assert_eq!(label_minutes("14:30"), Some(870));
        assert_eq!(label_minutes(" 23:50 "), Some(1430));
        assert_eq!(label_minutes("24:00"), None);
        assert_eq!(label_minutes("12-30"), None);
        assert_eq!(label_minutes("ab:cd"), None);
    }
}
