//! Reminder Repository (物化提醒列表)

use super::RepoResult;
use shared::models::ReminderItem;
use sqlx::{SqliteConnection, SqlitePool};

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<ReminderItem>> {
    let rows = sqlx::query_as::<_, ReminderItem>(
        "SELECT member_id, days_without_training, days_until_timeout, refreshed_at FROM reminder_item ORDER BY days_until_timeout ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn upsert_tx(conn: &mut SqliteConnection, item: &ReminderItem) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO reminder_item (member_id, days_without_training, days_until_timeout, refreshed_at) VALUES (?1, ?2, ?3, ?4) ON CONFLICT(member_id) DO UPDATE SET days_without_training = excluded.days_without_training, days_until_timeout = excluded.days_until_timeout, refreshed_at = excluded.refreshed_at",
    )
    .bind(item.member_id)
    .bind(item.days_without_training)
    .bind(item.days_until_timeout)
    .bind(item.refreshed_at)
    .execute(conn)
    .await?;
    Ok(())
}

/// 刷新时删除不再符合条件的成员 (delete-by-absence)
pub async fn delete_absent_tx(
    conn: &mut SqliteConnection,
    keep_member_ids: &[i64],
) -> RepoResult<u64> {
    if keep_member_ids.is_empty() {
        let rows = sqlx::query("DELETE FROM reminder_item")
            .execute(conn)
            .await?;
        return Ok(rows.rows_affected());
    }
    let placeholders = vec!["?"; keep_member_ids.len()].join(", ");
    let sql = format!("DELETE FROM reminder_item WHERE member_id NOT IN ({placeholders})");
    let mut query = sqlx::query(&sql);
    for id in keep_member_ids {
        query = query.bind(id);
    }
    let rows = query.execute(conn).await?;
    Ok(rows.rows_affected())
}

pub async fn delete_by_member(pool: &SqlitePool, member_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM reminder_item WHERE member_id = ?")
        .bind(member_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}
