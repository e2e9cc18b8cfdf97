//! Built-in candidate rules.
//!
//! Both rules look only at the candidate's rating for the requester's
//! role. An unrated candidate carries the minimum rating.

use super::{Candidate, CandidateRule, RuleScore};

/// Highest rating first. Used to pick who fills a vacated shift.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostSkilled;

impl CandidateRule for MostSkilled {
    fn name(&self) -> &'static str {
        "MOST_SKILLED"
    }

    fn evaluate(&self, candidate: &Candidate) -> RuleScore {
        -RuleScore::from(candidate.rating)
    }
}

/// Lowest rating first. Used to pick whose shift is taken over.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastSkilled;

impl CandidateRule for LeastSkilled {
    fn name(&self) -> &'static str {
        "LEAST_SKILLED"
    }

    fn evaluate(&self, candidate: &Candidate) -> RuleScore {
        RuleScore::from(candidate.rating)
    }
}
