use sqlx::postgres::{PgConnection, PgPool, PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::Row;
use uuid::Uuid;

use crate::config::Config;
use crate::error::CountError;
use crate::models::{TallyRow, Voting, VotingResult};

#[cfg(test)]
pub mod fixtures;

// One zero row per option unioned with the real counts, so options without
// ballots still show up. DISTINCT ON keeps the highest count per option.
const TALLY_QUERY: &str = r#"
    SELECT id, name, count FROM (
        SELECT DISTINCT ON (id, name) id, name, count FROM (
                SELECT
                    vo.id AS id,
                    vo.name AS name,
                    0::BIGINT AS count
                FROM "votingOptions" vo
                WHERE vo."votingId" = $1

            UNION ALL

                SELECT
                    vo.id AS id,
                    vo.name AS name,
                    COUNT(DISTINCT m."userId") AS count
                FROM "votingOptions" vo
                JOIN ballots b ON vo.id = b."votingOptionId"
                JOIN memberships m ON m."userId" = b."userId"
                WHERE vo."votingId" = $1
                GROUP BY 1, 2
        ) AS counts
        ORDER BY id, name, count DESC
    ) AS tally
    ORDER BY count DESC, name ASC
"#;

pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(config: &Config) -> Result<Self, CountError> {
        // Connect to the database
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

/// Looks a voting up by its exact name.
pub async fn find_voting_by_name(
    conn: &mut PgConnection,
    name: &str,
) -> Result<Option<Voting>, CountError> {
    let row = sqlx::query(
        r#"
        SELECT id, name, result
        FROM votings
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(&mut *conn)
    .await?;

    // Extract voting data
    let voting = match row {
        Some(row) => Some(Voting {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            result: row.try_get("result")?,
        }),
        None => None,
    };
    Ok(voting)
}

/// Counts distinct voters per option, ordered by count descending.
pub async fn tally_voting(
    conn: &mut PgConnection,
    voting_id: Uuid,
) -> Result<Vec<TallyRow>, CountError> {
    let rows = sqlx::query(TALLY_QUERY)
        .bind(voting_id)
        .fetch_all(&mut *conn)
        .await?;

    // Decode into typed rows right away
    let tally = rows
        .iter()
        .map(tally_row)
        .collect::<Result<Vec<_>, sqlx::Error>>()?;
    Ok(tally)
}

fn tally_row(row: &PgRow) -> Result<TallyRow, sqlx::Error> {
    // COUNT can't go negative, but the column type allows it
    let count: i64 = row.try_get("count")?;
    if count < 0 {
        return Err(sqlx::Error::Decode(
            format!("negative ballot count {}", count).into(),
        ));
    }

    Ok(TallyRow {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        count,
    })
}

/// Replaces the stored result of a voting and returns it as written.
pub async fn update_voting_result(
    conn: &mut PgConnection,
    voting_id: Uuid,
    result: &VotingResult,
) -> Result<serde_json::Value, CountError> {
    let row = sqlx::query(
        r#"
        UPDATE votings
        SET result = $1, "updatedAt" = now()
        WHERE id = $2
        RETURNING result
        "#,
    )
    .bind(Json(result))
    .bind(voting_id)
    .fetch_one(&mut *conn)
    .await?;

    // Hand back what the database actually stored
    Ok(row.try_get("result")?)
}
