use chrono::Utc;
use log::{debug, error, info};
use sqlx::{PgConnection, PgPool};

use crate::db;
use crate::error::CountError;
use crate::models::CountRequest;
use crate::stats::{self, VoteStatistics};
use crate::voting::{assemble_result, plurality};

/// Counts a voting and stores its result, all in one transaction.
///
/// Returns the result as stored in the database. On any failure the
/// transaction is rolled back and the original error is returned.
pub async fn count_voting(
    pool: &PgPool,
    statistics: &dyn VoteStatistics,
    request: &CountRequest,
) -> Result<serde_json::Value, CountError> {
    // Everything below runs on this transaction
    let mut tx = pool.begin().await?;

    match count_in_transaction(&mut tx, statistics, request).await {
        Ok(stored) => {
            tx.commit().await?;
            info!("Committed result of voting '{}'", request.name);
            Ok(stored)
        }
        Err(e) => {
            // Keep the original error even if the rollback fails too
            if let Err(rollback_err) = tx.rollback().await {
                error!(
                    "Failed to roll back counting of voting '{}': {}",
                    request.name, rollback_err
                );
            }
            Err(e)
        }
    }
}

async fn count_in_transaction(
    conn: &mut PgConnection,
    statistics: &dyn VoteStatistics,
    request: &CountRequest,
) -> Result<serde_json::Value, CountError> {
    // Look up the voting
    let voting = db::find_voting_by_name(conn, &request.name)
        .await?
        .ok_or_else(|| CountError::VotingNotFound(request.name.clone()))?;

    // Count distinct voters per option
    let tally = db::tally_voting(conn, voting.id).await?;
    for row in &tally {
        debug!("{}: {} votes", row.name, row.count);
    }

    // Ties need --winner
    let winner = plurality::resolve_winner(&voting.name, &tally, request.winner.as_deref())?;

    let frozen = if request.freeze {
        Some(stats::freeze(statistics, conn, &voting).await?)
    } else {
        info!("Not freezing turnout and stats");
        None
    };

    // Build the snapshot and write it
    let result = assemble_result(&voting, &tally, winner.id, request, frozen, Utc::now());
    if let Some(winner) = result.winner() {
        info!("Winner of '{}' is '{}' with {} votes", voting.name, winner.name, winner.count);
    }
    db::update_voting_result(conn, voting.id, &result).await
}
