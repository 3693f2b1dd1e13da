//! Turnout and demographic breakdowns frozen into a voting result.
mod postgres;

pub use postgres::PostgresVoteStatistics;

use async_trait::async_trait;
use sqlx::PgConnection;
use std::collections::HashMap;

use crate::error::CountError;
use crate::models::{StatsBucket, Turnout, VoteStats, Voting};

/// Age buckets in the order they are reported.
pub const AGE_BUCKETS: [&str; 9] = [
    "<20", "20-29", "30-39", "40-49", "50-59", "60-69", "70-79", "80+", "unknown",
];

/// Source of the participation figures of a voting.
///
/// Every call runs on the connection of the counting transaction.
#[async_trait]
pub trait VoteStatistics: Send + Sync {
    async fn turnout(&self, conn: &mut PgConnection, voting: &Voting) -> Result<Turnout, CountError>;

    async fn ages(&self, conn: &mut PgConnection, voting: &Voting) -> Result<Vec<StatsBucket>, CountError>;

    async fn countries(&self, conn: &mut PgConnection, voting: &Voting) -> Result<Vec<StatsBucket>, CountError>;

    async fn ch_cantons(&self, conn: &mut PgConnection, voting: &Voting) -> Result<Vec<StatsBucket>, CountError>;
}

/// Computes the turnout and the three breakdowns of a voting.
pub async fn freeze(
    statistics: &dyn VoteStatistics,
    conn: &mut PgConnection,
    voting: &Voting,
) -> Result<(Turnout, VoteStats), CountError> {
    let turnout = statistics.turnout(conn, voting).await?;
    let stats = VoteStats {
        ages: statistics.ages(conn, voting).await?,
        countries: statistics.countries(conn, voting).await?,
        ch_cantons: statistics.ch_cantons(conn, voting).await?,
    };
    Ok((turnout, stats))
}

pub fn age_bucket(age: Option<i32>) -> &'static str {
    match age {
        None => "unknown",
        Some(age) if age < 20 => "<20",
        Some(age) if age < 30 => "20-29",
        Some(age) if age < 40 => "30-39",
        Some(age) if age < 50 => "40-49",
        Some(age) if age < 60 => "50-59",
        Some(age) if age < 70 => "60-69",
        Some(age) if age < 80 => "70-79",
        Some(_) => "80+",
    }
}

/// Histogram of voter ages in `AGE_BUCKETS` order, empty buckets left out.
pub fn age_histogram(ages: impl IntoIterator<Item = Option<i32>>) -> Vec<StatsBucket> {
    let mut counts: HashMap<&'static str, i64> = HashMap::new();
    for age in ages {
        *counts.entry(age_bucket(age)).or_insert(0) += 1;
    }

    AGE_BUCKETS
        .iter()
        .filter_map(|key| {
            counts.get(key).map(|count| StatsBucket {
                key: key.to_string(),
                count: *count,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ages_fall_into_decades() {
        assert_eq!(age_bucket(Some(16)), "<20");
        assert_eq!(age_bucket(Some(20)), "20-29");
        assert_eq!(age_bucket(Some(39)), "30-39");
        assert_eq!(age_bucket(Some(79)), "70-79");
        assert_eq!(age_bucket(Some(80)), "80+");
        assert_eq!(age_bucket(Some(104)), "80+");
        assert_eq!(age_bucket(None), "unknown");
    }

    #[test]
    fn histogram_keeps_bucket_order_and_skips_empty() {
        let histogram = age_histogram(vec![None, Some(85), Some(33), Some(31), Some(18)]);

        let buckets: Vec<(&str, i64)> = histogram.iter().map(|b| (b.key.as_str(), b.count)).collect();
        assert_eq!(buckets, vec![("<20", 1), ("30-39", 2), ("80+", 1), ("unknown", 1)]);
    }

    #[test]
    fn histogram_of_nobody_is_empty() {
        assert!(age_histogram(Vec::new()).is_empty());
    }
}
