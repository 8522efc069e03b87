//! Reminder Handlers
//!
//! `GET /` 实时计算，永远是当下的真实值；物化表只在显式
//! `POST /refresh` 时重建 (upsert + delete-by-absence, 单事务)，
//! `GET /snapshot` 读上次刷新的快照。

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::{member as member_repo, reminder as reminder_repo, settings as settings_repo};
use crate::training::{days_until_timeout, days_without_training, effective_timeout};
use crate::utils::AppResult;
use shared::models::{Member, MemberStatus, ReminderItem, ReminderView};

/// GET /api/reminders - 实时计算的超期成员列表
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ReminderView>>> {
    let views = compute_overdue(&state).await?;
    Ok(Json(views))
}

/// GET /api/reminders/snapshot - 上次刷新的物化快照
pub async fn snapshot(State(state): State<ServerState>) -> AppResult<Json<Vec<ReminderItem>>> {
    let items = reminder_repo::find_all(&state.pool).await?;
    Ok(Json(items))
}

/// POST /api/reminders/refresh - 重建物化提醒列表 (单事务)
pub async fn refresh(State(state): State<ServerState>) -> AppResult<Json<Vec<ReminderItem>>> {
    let views = compute_overdue(&state).await?;
    let now = shared::util::now_millis();

    let items: Vec<ReminderItem> = views
        .iter()
        .map(|v| ReminderItem {
            member_id: v.member_id,
            days_without_training: v.days_without_training,
            days_until_timeout: v.days_until_timeout,
            refreshed_at: now,
        })
        .collect();
    let keep_ids: Vec<i64> = items.iter().map(|i| i.member_id).collect();

    let mut tx = state.pool.begin().await?;
    for item in &items {
        reminder_repo::upsert_tx(&mut *tx, item).await?;
    }
    let removed = reminder_repo::delete_absent_tx(&mut *tx, &keep_ids).await?;
    tx.commit().await?;

    tracing::info!(count = items.len(), removed, "Reminder list refreshed");
    Ok(Json(items))
}

/// 超期成员的实时计算
///
/// 只看状态 normal 的非管理阶层成员：请假/退会的不催，管理阶层
/// 不参加训练。`days_until_timeout <= 0` 才进列表。
async fn compute_overdue(state: &ServerState) -> AppResult<Vec<ReminderView>> {
    let members = member_repo::find_all(&state.pool).await?;
    let global = settings_repo::global_settings(&state.pool).await?;
    let today = shared::util::today();

    let mut views: Vec<ReminderView> = members
        .iter()
        .filter(|m| m.status == MemberStatus::Normal && !m.stage_role.is_staff_level())
        .filter_map(|m| {
            let view = compute_view(m, global.reminder_timeout_days, today);
            (view.days_until_timeout <= 0).then_some(view)
        })
        .collect();

    // 超期最久的排前面
    views.sort_by_key(|v| v.days_until_timeout);
    Ok(views)
}

fn compute_view(member: &Member, global_days: i64, today: chrono::NaiveDate) -> ReminderView {
    let days_without = days_without_training(member.last_training_date, today);
    let timeout = effective_timeout(member.reminder_timeout_days, global_days);
    ReminderView {
        member_id: member.id,
        nickname: member.nickname.clone(),
        qq: member.qq.clone(),
        last_training_date: member.last_training_date,
        days_without_training: days_without,
        days_until_timeout: days_until_timeout(days_without, timeout),
        effective_timeout_days: timeout,
    }
}
