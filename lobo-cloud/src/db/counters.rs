//! Activity counters and the snapshot of values seen by the last check
//!
//! Counters are derived from the activity tables. The snapshot in
//! `achievement_counters` holds each counter's value at the previous check so
//! the next check can tell which thresholds an event crossed. Subject 0 is the
//! family itself, any other subject is a member.

use std::collections::HashMap;

use sqlx::PgConnection;

pub const FAMILY_SUBJECT: i64 = 0;

const MILLIS_PER_DAY: i64 = 86_400_000;
/// Enough history for the longest streak badge
const STREAK_LOOKBACK_DAYS: i64 = 400;

/// Current counter values for one family and acting member
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityCounts {
    pub member_completed_tasks: i64,
    pub family_completed_tasks: i64,
    pub lists: i64,
    pub completed_lists: i64,
    pub budget_transactions: i64,
}

pub async fn activity_counts(
    conn: &mut PgConnection,
    family_id: i64,
    user_id: i64,
) -> Result<ActivityCounts, sqlx::Error> {
    let (member_completed_tasks, family_completed_tasks, lists, completed_lists, budget_transactions): (
        i64,
        i64,
        i64,
        i64,
        i64,
    ) = sqlx::query_as(
        "SELECT
            (SELECT COUNT(*) FROM tasks
              WHERE family_id = $1 AND completed_by = $2 AND completed_at IS NOT NULL),
            (SELECT COUNT(*) FROM tasks
              WHERE family_id = $1 AND completed_at IS NOT NULL),
            (SELECT COUNT(*) FROM shopping_lists WHERE family_id = $1),
            (SELECT COUNT(*) FROM shopping_lists
              WHERE family_id = $1 AND completed_at IS NOT NULL),
            (SELECT COUNT(*) FROM budget_transactions WHERE family_id = $1)",
    )
    .bind(family_id)
    .bind(user_id)
    .fetch_one(conn)
    .await?;

    Ok(ActivityCounts {
        member_completed_tasks,
        family_completed_tasks,
        lists,
        completed_lists,
        budget_transactions,
    })
}

/// Distinct local days (days since the epoch, shifted by `offset_millis`) on
/// which the member completed a task, most recent first.
pub async fn completion_days(
    conn: &mut PgConnection,
    family_id: i64,
    user_id: i64,
    offset_millis: i64,
) -> Result<Vec<i64>, sqlx::Error> {
    let rows: Vec<(i64,)> = sqlx::query_as(
        "SELECT DISTINCT (completed_at + $3) / $4 AS day
         FROM tasks
         WHERE family_id = $1 AND completed_by = $2 AND completed_at IS NOT NULL
         ORDER BY day DESC
         LIMIT $5",
    )
    .bind(family_id)
    .bind(user_id)
    .bind(offset_millis)
    .bind(MILLIS_PER_DAY)
    .bind(STREAK_LOOKBACK_DAYS)
    .fetch_all(conn)
    .await?;
    Ok(rows.into_iter().map(|(day,)| day).collect())
}

/// Local day index of a timestamp, matching [`completion_days`].
pub fn day_index(millis: i64, offset_millis: i64) -> i64 {
    (millis + offset_millis).div_euclid(MILLIS_PER_DAY)
}

/// Snapshot values keyed by `(subject_id, counter name)`
pub type Snapshot = HashMap<(i64, String), i64>;

pub async fn load_snapshot(
    conn: &mut PgConnection,
    family_id: i64,
    subjects: &[i64],
) -> Result<Snapshot, sqlx::Error> {
    let rows: Vec<(i64, String, i64)> = sqlx::query_as(
        "SELECT subject_id, metric, value FROM achievement_counters
         WHERE family_id = $1 AND subject_id = ANY($2)",
    )
    .bind(family_id)
    .bind(subjects)
    .fetch_all(conn)
    .await?;
    Ok(rows
        .into_iter()
        .map(|(subject, metric, value)| ((subject, metric), value))
        .collect())
}

pub async fn save_snapshot(
    conn: &mut PgConnection,
    family_id: i64,
    values: &[(i64, &str, i64)],
    now: i64,
) -> Result<(), sqlx::Error> {
    if values.is_empty() {
        return Ok(());
    }
    let subjects: Vec<i64> = values.iter().map(|(s, _, _)| *s).collect();
    let metrics: Vec<String> = values.iter().map(|(_, m, _)| (*m).to_string()).collect();
    let counts: Vec<i64> = values.iter().map(|(_, _, v)| *v).collect();

    sqlx::query(
        "INSERT INTO achievement_counters (family_id, subject_id, metric, value, updated_at)
         SELECT $1, t.subject_id, t.metric, t.value, $5
         FROM UNNEST($2::BIGINT[], $3::TEXT[], $4::BIGINT[]) AS t(subject_id, metric, value)
         ON CONFLICT (family_id, subject_id, metric)
         DO UPDATE SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at",
    )
    .bind(family_id)
    .bind(&subjects)
    .bind(&metrics)
    .bind(&counts)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(())
}
