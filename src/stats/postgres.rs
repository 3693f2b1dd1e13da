use async_trait::async_trait;
use log::debug;
use sqlx::{PgConnection, Row};

use super::{age_histogram, VoteStatistics};
use crate::error::CountError;
use crate::models::{StatsBucket, Turnout, Voting};

// Country name stored on Swiss addresses
const SWITZERLAND: &str = "Schweiz";

/// Statistics computed from the membership, user and address tables.
pub struct PostgresVoteStatistics;

#[async_trait]
impl VoteStatistics for PostgresVoteStatistics {
    async fn turnout(&self, conn: &mut PgConnection, voting: &Voting) -> Result<Turnout, CountError> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(DISTINCT m."userId") FROM memberships m WHERE m.active) AS eligible,
                (SELECT COUNT(DISTINCT b."userId") FROM ballots b WHERE b."votingId" = $1) AS submitted
            "#,
        )
        .bind(voting.id)
        .fetch_one(&mut *conn)
        .await?;

        let turnout = Turnout {
            eligible: row.try_get("eligible")?,
            submitted: row.try_get("submitted")?,
        };
        debug!("Turnout of '{}': {:?}", voting.name, turnout);
        Ok(turnout)
    }

    async fn ages(&self, conn: &mut PgConnection, voting: &Voting) -> Result<Vec<StatsBucket>, CountError> {
        let rows = sqlx::query(
            r#"
            SELECT date_part('year', age(u.birthday))::INT AS age
            FROM users u
            WHERE u.id IN (SELECT b."userId" FROM ballots b WHERE b."votingId" = $1)
            "#,
        )
        .bind(voting.id)
        .fetch_all(&mut *conn)
        .await?;

        let ages = rows
            .iter()
            .map(|row| row.try_get::<Option<i32>, _>("age"))
            .collect::<Result<Vec<_>, sqlx::Error>>()?;
        Ok(age_histogram(ages))
    }

    async fn countries(&self, conn: &mut PgConnection, voting: &Voting) -> Result<Vec<StatsBucket>, CountError> {
        let rows = sqlx::query(
            r#"
            SELECT COALESCE(a.country, 'unknown') AS key, COUNT(DISTINCT u.id) AS count
            FROM users u
            LEFT JOIN addresses a ON a.id = u."addressId"
            WHERE u.id IN (SELECT b."userId" FROM ballots b WHERE b."votingId" = $1)
            GROUP BY 1
            ORDER BY 2 DESC, 1
            "#,
        )
        .bind(voting.id)
        .fetch_all(&mut *conn)
        .await?;

        buckets(&rows)
    }

    async fn ch_cantons(&self, conn: &mut PgConnection, voting: &Voting) -> Result<Vec<StatsBucket>, CountError> {
        let rows = sqlx::query(
            r#"
            SELECT COALESCE(p.canton, 'unknown') AS key, COUNT(DISTINCT u.id) AS count
            FROM users u
            JOIN addresses a ON a.id = u."addressId"
            LEFT JOIN "postalCodesCH" p ON p.code = a."postalCode"
            WHERE a.country = $2
              AND u.id IN (SELECT b."userId" FROM ballots b WHERE b."votingId" = $1)
            GROUP BY 1
            ORDER BY 2 DESC, 1
            "#,
        )
        .bind(voting.id)
        .bind(SWITZERLAND)
        .fetch_all(&mut *conn)
        .await?;

        buckets(&rows)
    }
}

fn buckets(rows: &[sqlx::postgres::PgRow]) -> Result<Vec<StatsBucket>, CountError> {
    let buckets = rows
        .iter()
        .map(|row| -> Result<StatsBucket, sqlx::Error> {
            Ok(StatsBucket {
                key: row.try_get("key")?,
                count: row.try_get("count")?,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()?;
    Ok(buckets)
}
