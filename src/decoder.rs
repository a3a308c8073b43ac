//! Lattice decoder: pick one candidate per note minimizing total
//! playing cost.
//!
//! One lattice layer per note, one node per candidate.  The cost of
//! entering a node depends only on the node chosen for the previous note,
//! so a single forward pass with backpointers finds the optimal path
//! exactly in O(N · K²).

use serde::{Deserialize, Serialize};

use crate::candidates::CandidateList;
use crate::model::{PositionCandidate, StringRegister};

/// Penalties and thresholds of the transition cost.
///
/// `CostModel::default()` is the standard playing model; callers may
/// deserialize a partial JSON object to override individual weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    /// Added when consecutive notes are on different strings
    pub string_change: u32,
    /// Added per degree of distance between consecutive positions
    pub degree_jump: u32,
    /// Added when the candidate's confidence is below `confidence_threshold`
    pub low_confidence: u32,
    pub confidence_threshold: f64,
    /// Added for pitches at or above `high_pitch` played on the male string
    pub high_on_male: u32,
    pub high_pitch: i32,
    /// Added for pitches at or below `low_pitch` played on the female string
    pub low_on_female: u32,
    pub low_pitch: i32,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            string_change: 2,
            degree_jump: 1,
            low_confidence: 1,
            confidence_threshold: 0.7,
            high_on_male: 1,
            high_pitch: 69,
            low_on_female: 1,
            low_pitch: 55,
        }
    }
}

impl CostModel {
    /// Cost of playing `current` (for transposed pitch `pitch`) right after
    /// `prev`.  `prev` is `None` for the first note, which only pays the
    /// confidence and range penalties.
    pub fn transition_cost(
        &self,
        prev: Option<&PositionCandidate>,
        current: &PositionCandidate,
        pitch: i32,
    ) -> u32 {
        let mut cost: u32 = 0;
        if let Some(p) = prev {
            if p.register != current.register {
                cost = cost.saturating_add(self.string_change);
            }
            let jump = self.degree_jump.saturating_mul(u32::from(p.degree.abs_diff(current.degree)));
            cost = cost.saturating_add(jump);
        }
        if current.confidence < self.confidence_threshold {
            cost = cost.saturating_add(self.low_confidence);
        }
        if pitch >= self.high_pitch && current.register == StringRegister::Male {
            cost = cost.saturating_add(self.high_on_male);
        }
        if pitch <= self.low_pitch && current.register == StringRegister::Female {
            cost = cost.saturating_add(self.low_on_female);
        }
        cost
    }
}

/// Find the minimum-cost path through `layers`.
///
/// `pitches[i]` is the transposed pitch of note `i`.  If the slices differ
/// in length only the common prefix is decoded, so the output is as long
/// as the shorter one.  Every layer should be non-empty (as produced by
/// `resolve_candidates`).  Ties go to the lowest candidate index, both
/// between predecessors and at the final layer.
///
/// Costs saturate at `u32::MAX`, so extreme weights never overflow.
pub fn decode(layers: &[CandidateList], pitches: &[i32], model: &CostModel) -> Vec<PositionCandidate> {
    let n = layers.len().min(pitches.len());
    if n < layers.len().max(pitches.len()) {
        tracing::warn!(
            layers = layers.len(),
            pitches = pitches.len(),
            "lattice and pitch lengths differ, decoding common prefix"
        );
    }
    let (layers, pitches) = (&layers[..n], &pitches[..n]);
    if layers.is_empty() {
        return Vec::new();
    }

    let mut best: Vec<Vec<u32>> = layers.iter().map(|l| vec![u32::MAX; l.len()]).collect();
    let mut back: Vec<Vec<Option<usize>>> = layers.iter().map(|l| vec![None; l.len()]).collect();

    for (j, cand) in layers[0].iter().enumerate() {
        best[0][j] = model.transition_cost(None, cand, pitches[0]);
    }

    for i in 1..layers.len() {
        let (done, rest) = best.split_at_mut(i);
        let prev_best = &done[i - 1];
        let cur_best = &mut rest[0];
        for (j, cand) in layers[i].iter().enumerate() {
            for (k, prev) in layers[i - 1].iter().enumerate() {
                let cost = prev_best[k]
                    .saturating_add(model.transition_cost(Some(prev), cand, pitches[i]));
                if cost < cur_best[j] {
                    cur_best[j] = cost;
                    back[i][j] = Some(k);
                }
            }
        }
    }

    let last = layers.len() - 1;
    let mut cursor = argmin(&best[last]);
    tracing::debug!(
        notes = layers.len(),
        cost = best[last].get(cursor).copied().unwrap_or(0),
        "decoded kunkunshi path"
    );

    let mut path = Vec::with_capacity(layers.len());
    for i in (0..layers.len()).rev() {
        let Some(chosen) = layers[i].get(cursor) else {
            // Empty layer: nothing to emit, caller broke the contract.
            continue;
        };
        path.push(chosen.clone());
        if i > 0 {
            cursor = back[i][cursor].unwrap_or(0);
        }
    }
    path.reverse();
    path
}

/// Total cost of an explicit candidate sequence under `model`.
pub fn path_cost(path: &[PositionCandidate], pitches: &[i32], model: &CostModel) -> u32 {
    let mut total: u32 = 0;
    let mut prev = None;
    for (cand, &pitch) in path.iter().zip(pitches) {
        total = total.saturating_add(model.transition_cost(prev, cand, pitch));
        prev = Some(cand);
    }
    total
}

/// Index of the smallest value, first occurrence on ties.
fn argmin(values: &[u32]) -> usize {
    let mut best_index = 0;
    let mut best_value = u32::MAX;
    for (i, &v) in values.iter().enumerate() {
        if v < best_value {
            best_value = v;
            best_index = i;
        }
    }
    best_index
}
