//! # Faculty Triage Board
//!
//! Three ordered buckets (pending, approved, flagged) that partition a set of
//! questions by id. Faculty move questions between buckets one at a time; the
//! record itself is never modified by a move.
//!
//! The board keeps the partition invariant: a question id appears in at most
//! one bucket. Moves that cannot apply (unknown id, same source and
//! destination) leave the board untouched and report why through
//! [`MoveOutcome`] rather than failing.

use crate::model::Mcq;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Pending,
    Approved,
    Flagged,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Pending, Bucket::Approved, Bucket::Flagged];
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Bucket::Pending => "pending",
            Bucket::Approved => "approved",
            Bucket::Flagged => "flagged",
        };
        f.write_str(s)
    }
}

impl FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Bucket::Pending),
            "approved" => Ok(Bucket::Approved),
            "flagged" => Ok(Bucket::Flagged),
            other => Err(format!("Unknown bucket: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// The id is not in the source bucket.
    NotFound,
    /// Source and destination are the same bucket.
    SameBucket,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacultyBoard {
    pending: Vec<Mcq>,
    approved: Vec<Mcq>,
    flagged: Vec<Mcq>,
}

impl FacultyBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial layout for a session: the first question pending, the second
    /// approved, everything after flagged.
    pub fn seeded(mcqs: &[Mcq]) -> Self {
        let mut board = Self::new();
        for (i, mcq) in mcqs.iter().enumerate() {
            let bucket = match i {
                0 => Bucket::Pending,
                1 => Bucket::Approved,
                _ => Bucket::Flagged,
            };
            board.insert(bucket, mcq.clone());
        }
        board
    }

    pub fn bucket(&self, bucket: Bucket) -> &[Mcq] {
        match bucket {
            Bucket::Pending => &self.pending,
            Bucket::Approved => &self.approved,
            Bucket::Flagged => &self.flagged,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<Mcq> {
        match bucket {
            Bucket::Pending => &mut self.pending,
            Bucket::Approved => &mut self.approved,
            Bucket::Flagged => &mut self.flagged,
        }
    }

    pub fn pending(&self) -> &[Mcq] {
        &self.pending
    }

    pub fn approved(&self) -> &[Mcq] {
        &self.approved
    }

    pub fn flagged(&self) -> &[Mcq] {
        &self.flagged
    }

    pub fn bucket_of(&self, mcq_id: &str) -> Option<Bucket> {
        Bucket::ALL
            .into_iter()
            .find(|b| self.bucket(*b).iter().any(|m| m.id == mcq_id))
    }

    pub fn contains(&self, mcq_id: &str) -> bool {
        self.bucket_of(mcq_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.pending.len() + self.approved.len() + self.flagged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids in a bucket, in bucket order.
    pub fn ids(&self, bucket: Bucket) -> Vec<&str> {
        self.bucket(bucket).iter().map(|m| m.id.as_str()).collect()
    }

    /// Append to a bucket unless the id is already somewhere on the board.
    /// Returns whether the question was added.
    pub fn insert(&mut self, bucket: Bucket, mcq: Mcq) -> bool {
        if let Some(existing) = self.bucket_of(&mcq.id) {
            debug!(mcq = %mcq.id, bucket = %existing, "already on the board, not added");
            return false;
        }
        self.bucket_mut(bucket).push(mcq);
        true
    }

    pub fn move_mcq(&mut self, mcq_id: &str, from: Bucket, to: Bucket) -> MoveOutcome {
        let Some(position) = self.bucket(from).iter().position(|m| m.id == mcq_id) else {
            debug!(mcq = mcq_id, %from, %to, "move ignored: not in source bucket");
            return MoveOutcome::NotFound;
        };
        if from == to {
            return MoveOutcome::SameBucket;
        }

        let mcq = self.bucket_mut(from).remove(position);
        self.bucket_mut(to).push(mcq);
        MoveOutcome::Moved
    }

    /// Move every pending question to approved, in pending order.
    /// Returns the ids that were moved.
    pub fn approve_all_pending(&mut self) -> Vec<String> {
        let ids: Vec<String> = self.pending.iter().map(|m| m.id.clone()).collect();
        for id in &ids {
            self.move_mcq(id, Bucket::Pending, Bucket::Approved);
        }
        ids
    }
}
