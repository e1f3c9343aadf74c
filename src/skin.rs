//! # Skin Typing
//!
//! Maps a completed quiz to one of four skin types by weighted voting.
//!
//! ## Requirements
//!
//! - Every answer token adds +1 to exactly one bucket
//! - Unknown tokens add nothing, never an error
//! - Result is independent of answer iteration order
//! - Ties resolve the same way on every run
use std::collections::HashMap;

use serde::Serialize;

/// User-facing result labels, one per bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkinType {
    Oleosa,
    Seca,
    Mista,
    #[serde(rename = "Sensível")]
    Sensivel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Oily,
    Dry,
    Mixed,
    Sensitive,
}

/// Fixed product tuning, carried over as-is. Each token votes for exactly
/// one bucket.
pub fn token_bucket(token: &str) -> Option<Bucket> {
    let bucket = match token {
        // Direct mappings
        "oily" => Bucket::Oily,
        "dry" => Bucket::Dry,
        "mixed" => Bucket::Mixed,
        "sensitive" => Bucket::Sensitive,

        // Derived mappings
        "normal" => Bucket::Mixed,
        "acne" => Bucket::Oily,
        "sensitive_high" => Bucket::Sensitive,
        "dry_sensitive" => Bucket::Sensitive,
        "spots" => Bucket::Sensitive,
        "resilient" => Bucket::Mixed,

        // Makeup habits
        "daily" => Bucket::Oily,
        "sometimes" => Bucket::Mixed,
        "rarely" => Bucket::Dry,
        "never" => Bucket::Sensitive,

        // Washing habits
        "3x" => Bucket::Oily,
        "2x" => Bucket::Mixed,
        "1x" => Bucket::Dry,
        "0x" => Bucket::Dry,

        _ => return None,
    };

    Some(bucket)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTally {
    pub oily: u32,
    pub dry: u32,
    pub mixed: u32,
    pub sensitive: u32,
}

impl ScoreTally {
    fn add(&mut self, bucket: Bucket) {
        match bucket {
            Bucket::Oily => self.oily += 1,
            Bucket::Dry => self.dry += 1,
            Bucket::Mixed => self.mixed += 1,
            Bucket::Sensitive => self.sensitive += 1,
        }
    }

    /// Left-to-right scan, strictly greater replaces the current best.
    /// The seed holds Mista at zero, so an all-zero tally resolves to Mista
    /// and ties favor oily > dry > sensitive > mixed.
    fn leader(&self) -> SkinType {
        let ranked = [
            (SkinType::Oleosa, self.oily),
            (SkinType::Seca, self.dry),
            (SkinType::Sensivel, self.sensitive),
            (SkinType::Mista, self.mixed),
        ];

        let mut best = (SkinType::Mista, 0);

        for (label, count) in ranked {
            if count > best.1 {
                best = (label, count);
            }
        }

        best.0
    }
}

/// Total function, never fails. Only answer values matter, question ids are
/// ignored.
pub fn classify(answers: &HashMap<u8, String>) -> SkinType {
    let mut tally = ScoreTally::default();

    for value in answers.values() {
        if let Some(bucket) = token_bucket(value) {
            tally.add(bucket);
        }
    }

    tally.leader()
}
