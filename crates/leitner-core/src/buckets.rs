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

//! The bucket map: a sparse partition of cards into retention tiers.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::error::SchedulerError;
use crate::types::Bucket;
use crate::types::card_hash::CardHash;

/// A card set as stored on the wire.
type RawBuckets = BTreeMap<Bucket, BTreeSet<CardHash>>;

/// Sparse mapping from bucket number to the cards in that bucket.
///
/// Every card is in exactly one bucket. Bucket sets are shared between
/// versions of the map, so deriving a new map from an old one only copies
/// the sets that change.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBuckets", into = "RawBuckets")]
pub struct BucketMap {
    buckets: BTreeMap<Bucket, Arc<BTreeSet<CardHash>>>,
}

impl BucketMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from raw bucket sets, rejecting any card that appears in
    /// more than one bucket.
    pub fn from_buckets(
        buckets: impl IntoIterator<Item = (Bucket, BTreeSet<CardHash>)>,
    ) -> Result<Self, SchedulerError> {
        let mut seen: BTreeMap<CardHash, Bucket> = BTreeMap::new();
        let mut map = BTreeMap::new();
        for (bucket, cards) in buckets {
            for hash in cards.iter() {
                if let Some(other) = seen.insert(*hash, bucket) {
                    if other != bucket {
                        return Err(SchedulerError::ContractViolation(format!(
                            "card {hash} is in buckets {other} and {bucket}"
                        )));
                    }
                }
            }
            let slot: &mut Arc<BTreeSet<CardHash>> = map.entry(bucket).or_default();
            Arc::make_mut(slot).extend(cards);
        }
        Ok(Self { buckets: map })
    }

    /// Place a card that is not yet tracked into `bucket`.
    pub fn insert(&mut self, hash: CardHash, bucket: Bucket) -> Result<(), SchedulerError> {
        if let Some(current) = self.bucket_of(hash) {
            return Err(SchedulerError::ContractViolation(format!(
                "card {hash} is already in bucket {current}"
            )));
        }
        self.insert_new(hash, bucket);
        Ok(())
    }

    /// Place a card the caller has already checked to be untracked.
    pub(crate) fn insert_new(&mut self, hash: CardHash, bucket: Bucket) {
        debug_assert!(!self.contains(hash), "card {hash} is already tracked");
        Arc::make_mut(self.buckets.entry(bucket).or_default()).insert(hash);
    }

    /// Move a tracked card to `to`, dropping its old bucket if it empties.
    pub(crate) fn relocate(&mut self, hash: CardHash, from: Bucket, to: Bucket) {
        if from == to {
            return;
        }
        let emptied = match self.buckets.get_mut(&from) {
            Some(set) => {
                Arc::make_mut(set).remove(&hash);
                set.is_empty()
            }
            None => false,
        };
        if emptied {
            self.buckets.remove(&from);
        }
        Arc::make_mut(self.buckets.entry(to).or_default()).insert(hash);
    }

    /// Drop every card not accepted by `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&CardHash) -> bool) {
        for set in self.buckets.values_mut() {
            if set.iter().any(|hash| !keep(hash)) {
                Arc::make_mut(set).retain(|hash| keep(hash));
            }
        }
        self.buckets.retain(|_, set| !set.is_empty());
    }

    pub fn bucket_of(&self, hash: CardHash) -> Option<Bucket> {
        self.buckets
            .iter()
            .find(|(_, set)| set.contains(&hash))
            .map(|(bucket, _)| *bucket)
    }

    pub fn contains(&self, hash: CardHash) -> bool {
        self.bucket_of(hash).is_some()
    }

    /// The cards in `bucket`, if the bucket is present.
    pub fn get(&self, bucket: Bucket) -> Option<&BTreeSet<CardHash>> {
        self.buckets.get(&bucket).map(|set| set.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &BTreeSet<CardHash>)> {
        self.buckets.iter().map(|(bucket, set)| (*bucket, set.as_ref()))
    }

    /// The largest bucket number present, empty or not.
    pub fn max_bucket(&self) -> Option<Bucket> {
        self.buckets.keys().next_back().copied()
    }

    pub fn card_count(&self) -> usize {
        self.buckets.values().map(|set| set.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.card_count() == 0
    }

    #[cfg(test)]
    pub(crate) fn shares_bucket_with(&self, other: &BucketMap, bucket: Bucket) -> bool {
        match (self.buckets.get(&bucket), other.buckets.get(&bucket)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl TryFrom<RawBuckets> for BucketMap {
    type Error = SchedulerError;

    fn try_from(value: RawBuckets) -> Result<Self, Self::Error> {
        BucketMap::from_buckets(value)
    }
}

impl From<BucketMap> for RawBuckets {
    fn from(map: BucketMap) -> RawBuckets {
        map.buckets
            .into_iter()
            .map(|(bucket, set)| (bucket, Arc::unwrap_or_clone(set)))
            .collect()
    }
}

/// Densify a bucket map: index `i` of the result holds the cards of bucket
/// `i`, for every `i` up to the largest bucket present. Absent buckets become
/// empty sets.
pub fn to_bucket_sets(map: &BucketMap) -> Vec<BTreeSet<CardHash>> {
    let Some(max) = map.max_bucket() else {
        return Vec::new();
    };
    let mut sets: Vec<BTreeSet<CardHash>> = vec![BTreeSet::new(); max as usize + 1];
    for (bucket, cards) in map.iter() {
        sets[bucket as usize].extend(cards.iter().copied());
    }
    sets
}
