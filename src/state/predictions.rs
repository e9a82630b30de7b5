use log::{debug, warn};
use scorecast_api::{Field, Match, MatchId, Prediction, ScorePair};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Client-local predictions in progress, keyed by match id.
///
/// Keys are always a subset of the match set the buffer was last reconciled
/// against. Matches the user has neither predicted server-side nor edited
/// locally have no entry at all (absent means "not yet predicted").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionBuffer {
    entries: BTreeMap<MatchId, ScorePair>,
    known: BTreeSet<MatchId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    UnknownMatch(MatchId),
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::UnknownMatch(id) => write!(f, "match {id} is not in the current fixture list"),
        }
    }
}

impl std::error::Error for BufferError {}

impl PredictionBuffer {
    /// Merge independently fetched matches and predictions into one buffer.
    ///
    /// Later prediction records for the same match overwrite earlier ones.
    /// Predictions for matches outside `matches` are dropped.
    pub fn reconcile(matches: &[Match], predictions: &[Prediction]) -> Self {
        let known: BTreeSet<MatchId> = matches.iter().map(|m| m.id).collect();
        let mut entries = BTreeMap::new();
        let mut stale = 0usize;

        for prediction in predictions {
            if known.contains(&prediction.match_id) {
                entries.insert(prediction.match_id, prediction.score);
            } else {
                stale += 1;
            }
        }

        if stale > 0 {
            debug!("dropped {stale} prediction(s) for matches no longer in the fixture list");
        }

        Self { entries, known }
    }

    pub fn get(&self, match_id: MatchId) -> Option<ScorePair> {
        self.entries.get(&match_id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Update exactly one side of a match's prediction.
    ///
    /// The other side keeps its last value; it only defaults to 0 when this
    /// call creates the entry.
    pub fn set_field(&mut self, match_id: MatchId, field: Field, value: u16) -> Result<ScorePair, BufferError> {
        if !self.known.contains(&match_id) {
            warn!("rejected edit for unknown match {match_id}");
            return Err(BufferError::UnknownMatch(match_id));
        }
        let entry = self.entries.entry(match_id).or_default();
        entry.set(field, value);
        Ok(*entry)
    }

    /// Nudge one side up or down by `delta`, saturating at the score bounds.
    pub fn step_field(&mut self, match_id: MatchId, field: Field, delta: i32) -> Result<ScorePair, BufferError> {
        let current = self.get(match_id).map(|s| s.get(field)).unwrap_or(0);
        let next = (i64::from(current) + i64::from(delta)).clamp(0, i64::from(u16::MAX)) as u16;
        self.set_field(match_id, field, next)
    }

    /// Wire-ready list of every buffered prediction, ordered by match id.
    pub fn project(&self) -> Vec<Prediction> {
        self.entries
            .iter()
            .map(|(&match_id, &score)| Prediction { match_id, score })
            .collect()
    }
}

/// Turn raw score input into a storable score.
///
/// Empty, non-numeric and negative input becomes 0; values beyond the score
/// range saturate.
pub fn coerce_score(input: &str) -> u16 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0;
    }
    match trimmed.parse::<i64>() {
        Ok(n) if n < 0 => {
            debug!("coerced negative score input {n} to 0");
            0
        }
        Ok(n) => u16::try_from(n).unwrap_or(u16::MAX),
        Err(_) if trimmed.bytes().all(|b| b.is_ascii_digit()) => u16::MAX,
        Err(_) => {
            debug!("coerced non-numeric score input {trimmed:?} to 0");
            0
        }
    }
}
