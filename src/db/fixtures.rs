//! Row builders for database tests.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn insert_voting(pool: &PgPool, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO votings (id, name) VALUES ($1, $2)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
    id
}

pub async fn insert_option(pool: &PgPool, voting_id: Uuid, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(r#"INSERT INTO "votingOptions" (id, "votingId", name) VALUES ($1, $2, $3)"#)
        .bind(id)
        .bind(voting_id)
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
    id
}

/// Inserts a user with an active membership and no profile data.
pub async fn insert_member(pool: &PgPool) -> Uuid {
    insert_member_with(pool, None, None).await
}

/// Inserts a user with an active membership, a birthday and an address
/// given as `(country, postal code)`.
pub async fn insert_member_with(
    pool: &PgPool,
    birthday: Option<NaiveDate>,
    address: Option<(&str, &str)>,
) -> Uuid {
    let address_id = match address {
        Some((country, postal_code)) => {
            let id = Uuid::new_v4();
            sqlx::query(r#"INSERT INTO addresses (id, country, "postalCode") VALUES ($1, $2, $3)"#)
                .bind(id)
                .bind(country)
                .bind(postal_code)
                .execute(pool)
                .await
                .unwrap();
            Some(id)
        }
        None => None,
    };

    let user_id = Uuid::new_v4();
    sqlx::query(r#"INSERT INTO users (id, birthday, "addressId") VALUES ($1, $2, $3)"#)
        .bind(user_id)
        .bind(birthday)
        .bind(address_id)
        .execute(pool)
        .await
        .unwrap();

    sqlx::query(r#"INSERT INTO memberships (id, "userId", active) VALUES ($1, $2, TRUE)"#)
        .bind(Uuid::new_v4())
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();

    user_id
}

/// Inserts a user without any membership.
pub async fn insert_non_member(pool: &PgPool) -> Uuid {
    let user_id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (id) VALUES ($1)")
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
    user_id
}

pub async fn deactivate_memberships(pool: &PgPool, user_id: Uuid) {
    sqlx::query(r#"UPDATE memberships SET active = FALSE WHERE "userId" = $1"#)
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn insert_ballot(pool: &PgPool, voting_id: Uuid, option_id: Uuid, user_id: Uuid) {
    sqlx::query(
        r#"INSERT INTO ballots (id, "votingId", "votingOptionId", "userId") VALUES ($1, $2, $3, $4)"#,
    )
    .bind(Uuid::new_v4())
    .bind(voting_id)
    .bind(option_id)
    .bind(user_id)
    .execute(pool)
    .await
    .unwrap();
}

/// Lets `voters` new members each cast one ballot for `option_id`.
pub async fn cast_ballots(pool: &PgPool, voting_id: Uuid, option_id: Uuid, voters: usize) -> Vec<Uuid> {
    let mut users = Vec::with_capacity(voters);
    for _ in 0..voters {
        let user = insert_member(pool).await;
        insert_ballot(pool, voting_id, option_id, user).await;
        users.push(user);
    }
    users
}

pub async fn insert_postal_code(pool: &PgPool, code: &str, canton: &str) {
    sqlx::query(r#"INSERT INTO "postalCodesCH" (code, canton) VALUES ($1, $2)"#)
        .bind(code)
        .bind(canton)
        .execute(pool)
        .await
        .unwrap();
}
