//! 端到端 API 测试
//!
//! 用内存 SQLite + `tower::ServiceExt::oneshot` 直接驱动路由，
//! 不开真实端口。覆盖认证边界、成员/课程/进度流程、阶段同步、
//! 重排校验、催训列表和退会审批。

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use server::auth::Role;
use server::core::{Config, ServerState};
use server::db::DbService;
use server::db::repository::admin as admin_repo;

async fn test_state() -> ServerState {
    let db = DbService::new_in_memory().await.expect("in-memory db");
    let config = Config::with_overrides("/tmp/ziye-guild-test", 0);
    ServerState::with_pool(config, db.pool)
}

fn app(state: &ServerState) -> Router {
    server::api::build_app(state).with_state(state.clone())
}

fn admin_token(state: &ServerState) -> String {
    state
        .get_jwt_service()
        .generate_token(1, "admin", "Admin", Role::Admin)
        .expect("token")
}

async fn send(
    state: &ServerState,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create_member(state: &ServerState, token: &str, nickname: &str, qq: &str) -> i64 {
    let (status, body) = send(
        state,
        Method::POST,
        "/api/members",
        Some(token),
        Some(json!({ "nickname": nickname, "qq": qq })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create member: {body}");
    body["id"].as_i64().unwrap()
}

async fn create_course(state: &ServerState, token: &str, code: &str, name: &str) -> i64 {
    let (status, body) = send(
        state,
        Method::POST,
        "/api/courses",
        Some(token),
        Some(json!({ "code": code, "name": name, "category": "基础" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create course: {body}");
    body["id"].as_i64().unwrap()
}

async fn put_progress(state: &ServerState, token: &str, member_id: i64, course_id: i64, percent: i64) {
    let (status, body) = send(
        state,
        Method::PUT,
        "/api/progress",
        Some(token),
        Some(json!({
            "member_id": member_id,
            "course_id": course_id,
            "progress_percent": percent,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "put progress: {body}");
}

#[tokio::test]
async fn health_is_public() {
    let state = test_state().await;
    let (status, body) = send(&state, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn api_requires_auth() {
    let state = test_state().await;
    let (status, _) = send(&state, Method::GET, "/api/members", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn student_token_is_rejected_on_admin_routes() {
    let state = test_state().await;
    let student_token = state
        .get_jwt_service()
        .generate_token(42, "10001", "小明", Role::Student)
        .unwrap();

    let (status, _) = send(
        &state,
        Method::GET,
        "/api/members",
        Some(&student_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_token_is_rejected_on_student_routes() {
    let state = test_state().await;
    let token = admin_token(&state);
    let (status, _) = send(&state, Method::GET, "/api/student/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_login_round_trip() {
    let state = test_state().await;
    let hash = server::auth::hash_password("guild-pass-123").unwrap();
    admin_repo::create(&state.pool, "yezhu", &hash, "夜主").await.unwrap();

    let (status, body) = send(
        &state,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "yezhu", "password": "guild-pass-123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["role"], "admin");

    let (status, body) = send(&state, Method::GET, "/api/auth/verify", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "yezhu");

    // 错误口令统一报 invalid credentials
    let (status, _) = send(
        &state,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "yezhu", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn progress_rejects_percent_outside_ladder() {
    let state = test_state().await;
    let token = admin_token(&state);
    let member_id = create_member(&state, &token, "阿紫", "20001").await;
    let course_id = create_course(&state, &token, "1.1", "走位基础").await;

    let (status, _) = send(
        &state,
        Method::PUT,
        "/api/progress",
        Some(&token),
        Some(json!({
            "member_id": member_id,
            "course_id": course_id,
            "progress_percent": 33,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stage_sync_walks_the_ladder() {
    let state = test_state().await;
    let token = admin_token(&state);
    let member_id = create_member(&state, &token, "阿夜", "20002").await;
    let c1 = create_course(&state, &token, "1.1", "走位基础").await;
    let c2 = create_course(&state, &token, "2.1", "连招入门").await;
    let c3 = create_course(&state, &token, "3.1", "团战意识").await;

    // 没动过课程：同步后仍 untrained，且幂等 (第二次无变化)
    let (status, body) = send(&state, Method::POST, "/api/members/sync-stage", Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["changed"].as_array().unwrap().is_empty());

    // 阶段 1 全满 → part1_complete
    put_progress(&state, &token, member_id, c1, 100).await;
    let (_, body) = send(&state, Method::POST, "/api/members/sync-stage", Some(&token), Some(json!({}))).await;
    assert_eq!(body["changed"], json!([member_id]));
    let (_, body) = send(&state, Method::GET, &format!("/api/members/{member_id}"), Some(&token), None).await;
    assert_eq!(body["stage_role"], "part1_complete");

    // 阶段 2 动了但未满 → 仍 part1_complete (同步无变化)
    put_progress(&state, &token, member_id, c2, 50).await;
    let (_, body) = send(&state, Method::POST, "/api/members/sync-stage", Some(&token), Some(json!({}))).await;
    assert!(body["changed"].as_array().unwrap().is_empty());

    // 全部 100% → part3_complete
    put_progress(&state, &token, member_id, c2, 100).await;
    put_progress(&state, &token, member_id, c3, 100).await;
    let (_, body) = send(&state, Method::POST, "/api/members/sync-stage", Some(&token), Some(json!({}))).await;
    assert_eq!(body["changed"], json!([member_id]));
    let (_, body) = send(&state, Method::GET, &format!("/api/members/{member_id}"), Some(&token), None).await;
    assert_eq!(body["stage_role"], "part3_complete");
}

#[tokio::test]
async fn stage_sync_never_touches_staff() {
    let state = test_state().await;
    let token = admin_token(&state);
    let member_id = create_member(&state, &token, "会长", "20003").await;
    create_course(&state, &token, "1.1", "走位基础").await;

    let (status, _) = send(
        &state,
        Method::PUT,
        &format!("/api/members/{member_id}"),
        Some(&token),
        Some(json!({ "stage_role": "officer" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // 无进度也不会被降级
    let (_, body) = send(&state, Method::POST, "/api/members/sync-stage", Some(&token), Some(json!({}))).await;
    assert!(body["changed"].as_array().unwrap().is_empty());
    let (_, body) = send(&state, Method::GET, &format!("/api/members/{member_id}"), Some(&token), None).await;
    assert_eq!(body["stage_role"], "officer");
}

#[tokio::test]
async fn course_reorder_validates_permutation() {
    let state = test_state().await;
    let token = admin_token(&state);
    let c1 = create_course(&state, &token, "1.1", "走位基础").await;
    let c2 = create_course(&state, &token, "1.2", "补刀练习").await;
    let c3 = create_course(&state, &token, "1.3", "视野控制").await;

    // 缺一门课 → 整个请求拒绝
    let (status, _) = send(
        &state,
        Method::POST,
        "/api/courses/reorder",
        Some(&token),
        Some(json!({ "part": 1, "ordered_ids": [c1, c2] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 把最后一门拖到最前
    let (status, body) = send(
        &state,
        Method::POST,
        "/api/courses/reorder",
        Some(&token),
        Some(json!({ "part": 1, "ordered_ids": [c3, c1, c2] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let codes: Vec<(i64, String)> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| (c["id"].as_i64().unwrap(), c["code"].as_str().unwrap().to_string()))
        .collect();
    assert_eq!(codes, vec![
        (c3, "1.1".to_string()),
        (c1, "1.2".to_string()),
        (c2, "1.3".to_string()),
    ]);
}

#[tokio::test]
async fn reminders_list_overdue_members_and_snapshot_after_refresh() {
    let state = test_state().await;
    let token = admin_token(&state);
    let overdue = create_member(&state, &token, "超期生", "20004").await;
    let fresh = create_member(&state, &token, "新训生", "20005").await;

    let today = chrono::Utc::now().date_naive();
    let ten_days_ago = (today - chrono::Duration::days(10)).to_string();
    send(
        &state,
        Method::PUT,
        &format!("/api/members/{overdue}"),
        Some(&token),
        Some(json!({ "last_training_date": ten_days_ago })),
    )
    .await;
    send(
        &state,
        Method::PUT,
        &format!("/api/members/{fresh}"),
        Some(&token),
        Some(json!({ "last_training_date": today.to_string() })),
    )
    .await;

    // 默认阈值 7 天：超期 3 天的在列表里，今天训过的不在
    let (status, body) = send(&state, Method::GET, "/api/reminders", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["member_id"].as_i64().unwrap(), overdue);
    assert_eq!(list[0]["days_until_timeout"].as_i64().unwrap(), -3);

    // 个人阈值覆盖：放宽到 30 天后不再超期
    let (status, _) = send(
        &state,
        Method::PUT,
        &format!("/api/members/{overdue}/reminder-timeout"),
        Some(&token),
        Some(json!({ "reminder_timeout_days": 30 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&state, Method::GET, "/api/reminders", Some(&token), None).await;
    assert!(body.as_array().unwrap().is_empty());

    // 清除覆盖 → 重新超期；refresh 后快照一致
    send(
        &state,
        Method::PUT,
        &format!("/api/members/{overdue}/reminder-timeout"),
        Some(&token),
        Some(json!({ "reminder_timeout_days": null })),
    )
    .await;
    let (status, body) = send(&state, Method::POST, "/api/reminders/refresh", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let (_, snapshot) = send(&state, Method::GET, "/api/reminders/snapshot", Some(&token), None).await;
    assert_eq!(snapshot.as_array().unwrap().len(), 1);
    assert_eq!(snapshot[0]["member_id"].as_i64().unwrap(), overdue);
}

#[tokio::test]
async fn quit_approval_runs_all_steps() {
    let state = test_state().await;
    let token = admin_token(&state);
    let member_id = create_member(&state, &token, "要退会", "20006").await;
    let course_id = create_course(&state, &token, "1.1", "走位基础").await;
    put_progress(&state, &token, member_id, course_id, 50).await;

    let (status, body) = send(
        &state,
        Method::POST,
        "/api/quit",
        Some(&token),
        Some(json!({ "member_id": member_id, "reason": "学业繁忙" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let quit_id = body["id"].as_i64().unwrap();

    let (status, body) = send(
        &state,
        Method::POST,
        &format!("/api/quit/{quit_id}/approve"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let steps = body["steps"].as_array().unwrap();
    assert!(steps.iter().all(|s| s["ok"].as_bool().unwrap()), "{body}");

    // 成员已停用、进度已清理
    let (_, member) = send(&state, Method::GET, &format!("/api/members/{member_id}"), Some(&token), None).await;
    assert_eq!(member["is_active"], json!(false));
    assert_eq!(member["status"], "quit");
    assert!(member["progress"].as_array().unwrap().is_empty());

    // 已处理的申请不能再批
    let (status, _) = send(
        &state,
        Method::POST,
        &format!("/api/quit/{quit_id}/approve"),
        Some(&token),
        None,
    )
    .await;
    assert_ne!(status, StatusCode::OK);
}

#[tokio::test]
async fn student_portal_round_trip() {
    let state = test_state().await;
    let token = admin_token(&state);
    let member_id = create_member(&state, &token, "小紫", "30001").await;
    let course_id = create_course(&state, &token, "1.1", "走位基础").await;
    put_progress(&state, &token, member_id, course_id, 75).await;

    // 管理员代设口令
    let (status, _) = send(
        &state,
        Method::PUT,
        &format!("/api/members/{member_id}/password"),
        Some(&token),
        Some(json!({ "password": "zi-ye-666" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &state,
        Method::POST,
        "/api/student/login",
        None,
        Some(json!({ "qq": "30001", "password": "zi-ye-666" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["user"]["role"], "student");
    let student_token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&state, Method::GET, "/api/student/profile", Some(&student_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nickname"], "小紫");

    let (status, body) = send(&state, Method::GET, "/api/student/progress", Some(&student_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["progress_percent"].as_i64().unwrap(), 75);

    // 没设口令的成员登不进来
    let other = create_member(&state, &token, "无口令", "30002").await;
    let _ = other;
    let (status, _) = send(
        &state,
        Method::POST,
        "/api/student/login",
        None,
        Some(json!({ "qq": "30002", "password": "anything" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn member_batch_reports_per_item_results() {
    let state = test_state().await;
    let token = admin_token(&state);
    let a = create_member(&state, &token, "甲", "40001").await;
    let b = create_member(&state, &token, "乙", "40002").await;

    let (status, body) = send(
        &state,
        Method::POST,
        "/api/members/batch",
        Some(&token),
        Some(json!({
            "member_ids": [a, b, 999],
            "op": "set_status",
            "status": "on_leave",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert!(results[0]["ok"].as_bool().unwrap());
    assert!(results[1]["ok"].as_bool().unwrap());
    assert!(!results[2]["ok"].as_bool().unwrap());

    let (_, member) = send(&state, Method::GET, &format!("/api/members/{a}"), Some(&token), None).await;
    assert_eq!(member["status"], "on_leave");
}

#[tokio::test]
async fn view_preferences_are_per_admin_and_view() {
    let state = test_state().await;
    let token = admin_token(&state);

    // 没存过 → 空配置
    let (status, body) = send(&state, Method::GET, "/api/settings/views/members", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["config"], json!({}));

    let config = json!({ "sort": "stage_role", "filter": { "status": "normal" } });
    let (status, _) = send(
        &state,
        Method::PUT,
        "/api/settings/views/members",
        Some(&token),
        Some(json!({ "config": config })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&state, Method::GET, "/api/settings/views/members", Some(&token), None).await;
    assert_eq!(body["config"], config);

    // 另一个管理员看不到这份偏好
    let other_token = state
        .get_jwt_service()
        .generate_token(2, "second", "副会长", Role::Admin)
        .unwrap();
    let (_, body) = send(&state, Method::GET, "/api/settings/views/members", Some(&other_token), None).await;
    assert_eq!(body["config"], json!({}));
}
