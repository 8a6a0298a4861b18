// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::BTreeSet;

use crate::types::Bucket;
use crate::types::card_hash::CardHash;
use crate::types::day::Day;

/// The review interval of a bucket in days, `2^bucket`. `None` when the
/// interval does not fit in 64 bits.
fn interval(bucket: Bucket) -> Option<u64> {
    1u64.checked_shl(bucket)
}

/// Whether cards in `bucket` are due on `day`: `day mod 2^bucket == 0`.
///
/// Bucket 0 is due every day, and every bucket is due on day 0.
pub fn is_due(bucket: Bucket, day: Day) -> bool {
    let day = u64::from(day.into_inner());
    match interval(bucket) {
        Some(interval) => day % interval == 0,
        // 2^bucket exceeds any representable day.
        None => day == 0,
    }
}

/// The first day on or after `from` on which `bucket` is due, if there is one
/// before the day counter runs out.
pub fn next_due_day(bucket: Bucket, from: Day) -> Option<Day> {
    let from = u64::from(from.into_inner());
    let next = match interval(bucket) {
        Some(interval) => from.div_ceil(interval).checked_mul(interval)?,
        None if from == 0 => 0,
        None => return None,
    };
    u32::try_from(next).ok().map(Day::new)
}

/// The cards due for review on `day`, given the dense bucket sequence.
pub fn practice(buckets: &[BTreeSet<CardHash>], day: Day) -> BTreeSet<CardHash> {
    let mut due = BTreeSet::new();
    for (bucket, cards) in buckets.iter().enumerate() {
        if is_due(bucket as Bucket, day) {
            due.extend(cards.iter().copied());
        }
    }
    log::debug!("{} cards due on day {day}", due.len());
    due
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hashes(names: &[&str]) -> BTreeSet<CardHash> {
        names
            .iter()
            .map(|name| CardHash::of_content(name, "back"))
            .collect()
    }

    fn sequence() -> Vec<BTreeSet<CardHash>> {
        vec![
            hashes(&["a", "b"]),
            hashes(&["c"]),
            BTreeSet::new(),
            hashes(&["d", "e"]),
        ]
    }

    #[test]
    fn test_bucket_zero_always_due() {
        let seq = sequence();
        for day in 0..100 {
            let due = practice(&seq, Day::new(day));
            assert!(seq[0].is_subset(&due));
        }
    }

    #[test]
    fn test_day_zero_everything_due() {
        let seq = sequence();
        let all: BTreeSet<CardHash> = seq.iter().flatten().copied().collect();
        assert_eq!(practice(&seq, Day::FIRST), all);
    }

    #[test]
    fn test_exponential_intervals() {
        let seq = sequence();
        // Day 2: buckets 0 and 1.
        assert_eq!(practice(&seq, Day::new(2)), hashes(&["a", "b", "c"]));
        // Day 3: bucket 0 only.
        assert_eq!(practice(&seq, Day::new(3)), hashes(&["a", "b"]));
        // Day 8: buckets 0, 1, 3.
        assert_eq!(practice(&seq, Day::new(8)), hashes(&["a", "b", "c", "d", "e"]));
        // Day 12: bucket 3 is not due (12 mod 8 != 0).
        assert_eq!(practice(&seq, Day::new(12)), hashes(&["a", "b", "c"]));
    }

    #[test]
    fn test_empty_sequence() {
        assert!(practice(&[], Day::new(5)).is_empty());
    }

    #[test]
    fn test_huge_buckets() {
        assert!(is_due(64, Day::FIRST));
        assert!(!is_due(64, Day::new(1)));
        assert!(is_due(31, Day::new(1 << 31)));
        assert!(!is_due(32, Day::new(u32::MAX)));
    }

    #[test]
    fn test_next_due_day() {
        assert_eq!(next_due_day(0, Day::new(7)), Some(Day::new(7)));
        assert_eq!(next_due_day(2, Day::new(5)), Some(Day::new(8)));
        assert_eq!(next_due_day(2, Day::new(8)), Some(Day::new(8)));
        assert_eq!(next_due_day(40, Day::FIRST), Some(Day::FIRST));
        assert_eq!(next_due_day(40, Day::new(1)), None);
        assert_eq!(next_due_day(70, Day::new(1)), None);
    }
}
