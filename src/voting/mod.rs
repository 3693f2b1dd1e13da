pub mod plurality;

use crate::models::{CountRequest, ResultOption, TallyRow, Turnout, VoteStats, Voting, VotingResult};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Builds the result snapshot for a tallied voting.
///
/// Every tally row becomes an option, flagged as winner when its id matches
/// `winner_id`. `createdAt` carries over from the result the voting already
/// holds; `frozen` is `None` when turnout and stats were not computed.
pub fn assemble_result(
    voting: &Voting,
    tally: &[TallyRow],
    winner_id: Uuid,
    request: &CountRequest,
    frozen: Option<(Turnout, VoteStats)>,
    now: DateTime<Utc>,
) -> VotingResult {
    let options = tally
        .iter()
        .map(|row| ResultOption {
            id: row.id,
            name: row.name.clone(),
            count: row.count,
            winner: row.id == winner_id,
        })
        .collect();

    let (turnout, stats) = match frozen {
        Some((turnout, stats)) => (Some(turnout), Some(stats)),
        None => (None, None),
    };

    VotingResult {
        options,
        updated_at: now,
        created_at: voting.previous_created_at().unwrap_or(now),
        message: request.message.clone(),
        video: request.video.clone(),
        turnout,
        stats,
    }
}
