use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Duration, SecondsFormat, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

use activities_portal::database::{announcements_repo, schema};
use activities_portal::models::AnnouncementRow;
use activities_portal::web;

async fn test_pool() -> SqlitePool {
    // Single connection so every query sees the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    schema::init(&pool).await.expect("schema init");
    pool
}

async fn test_app() -> (Router, SqlitePool) {
    let pool = test_pool().await;
    (web::router(pool.clone()), pool)
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn send_html(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn find_activity<'a>(list: &'a Value, name: &str) -> Option<&'a Value> {
    list.as_array()
        .unwrap()
        .iter()
        .find(|a| a["name"] == name)
}

fn in_hours(hours: i64) -> String {
    (Utc::now() + Duration::hours(hours)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ---------------------------------------------------------------------------
// Listing & filtering

#[tokio::test]
async fn lists_seeded_activities_sorted_by_name() {
    let (app, _pool) = test_app().await;
    let (status, body) = send(&app, "GET", "/activities").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Chess Club"));
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted, "listing should be ordered by name");

    let chess = find_activity(&body, "Chess Club").unwrap();
    assert_eq!(chess["max_participants"], 12);
    assert_eq!(chess["category"], "academic");
    assert_eq!(
        chess["participants"][0], "michael@northgate.edu",
        "participants keep enrollment order"
    );
}

#[tokio::test]
async fn day_filter_keeps_matches_and_unstructured_rows() {
    let (app, _pool) = test_app().await;
    let (status, body) = send(&app, "GET", "/activities?day=Saturday").await;

    assert_eq!(status, StatusCode::OK);
    assert!(find_activity(&body, "Weekend Robotics Workshop").is_some());
    assert!(find_activity(&body, "Community Garden Volunteers").is_some());
    assert!(
        find_activity(&body, "Open Gym").is_some(),
        "rows without structured days pass through unfiltered"
    );
    assert!(find_activity(&body, "Chess Club").is_none());
}

#[tokio::test]
async fn time_filter_is_window_overlap() {
    let (app, _pool) = test_app().await;
    let (status, body) = send(
        &app,
        "GET",
        "/activities?day=Monday&start_time=06:00&end_time=08:00",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(find_activity(&body, "Morning Fitness").is_some());
    assert!(find_activity(&body, "Open Gym").is_some());
    assert!(
        find_activity(&body, "Chess Club").is_none(),
        "afternoon window does not overlap a morning request"
    );
}

#[tokio::test]
async fn malformed_time_param_is_rejected() {
    let (app, _pool) = test_app().await;
    let (status, body) = send(&app, "GET", "/activities?start_time=late").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid start_time format");
}

// ---------------------------------------------------------------------------
// Signup / unregister

#[tokio::test]
async fn signup_requires_a_known_staff_identity() {
    let (app, _pool) = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/activities/Chess%20Club/signup?email=amy@northgate.edu",
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Authentication required");

    let (status, _) = send(
        &app,
        "POST",
        "/activities/Chess%20Club/signup?email=amy@northgate.edu&teacher_username=nobody",
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signup_unknown_activity_is_not_found() {
    let (app, _pool) = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/activities/Knitting/signup?email=amy@northgate.edu&teacher_username=mchen",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Activity not found");
}

#[tokio::test]
async fn duplicate_signup_is_a_conflict() {
    let (app, _pool) = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/activities/Chess%20Club/signup?email=michael@northgate.edu&teacher_username=mchen",
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "Student is already signed up");
}

#[tokio::test]
async fn capacity_is_never_exceeded() {
    let (app, _pool) = test_app().await;

    // Math Club seeds 2 of 10; eight more signups reach capacity exactly.
    for i in 0..8 {
        let uri = format!(
            "/activities/Math%20Club/signup?email=student{}@northgate.edu&teacher_username=mchen",
            i
        );
        let (status, body) = send(&app, "POST", &uri).await;
        assert_eq!(status, StatusCode::OK, "signup {} failed: {}", i, body);
    }

    let (status, body) = send(
        &app,
        "POST",
        "/activities/Math%20Club/signup?email=overflow@northgate.edu&teacher_username=mchen",
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "Activity is full");

    let (_, listing) = send(&app, "GET", "/activities").await;
    let math_club = find_activity(&listing, "Math Club").unwrap();
    assert_eq!(
        math_club["participants"].as_array().unwrap().len(),
        10,
        "enrollment must stop at max_participants"
    );
}

#[tokio::test]
async fn unregister_round_trip() {
    let (app, _pool) = test_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/activities/Chess%20Club/unregister?email=absent@northgate.edu&teacher_username=mchen",
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        "POST",
        "/activities/Chess%20Club/unregister?email=daniel@northgate.edu&teacher_username=mchen",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Unregistered daniel@northgate.edu from Chess Club"
    );

    // A second unregister of the same email now fails.
    let (status, _) = send(
        &app,
        "POST",
        "/activities/Chess%20Club/unregister?email=daniel@northgate.edu&teacher_username=mchen",
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let (app, _pool) = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/activities/Chess%20Club/signup?email=not-an-email&teacher_username=mchen",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid email");
}

// ---------------------------------------------------------------------------
// Announcements

#[tokio::test]
async fn announcement_create_requires_staff() {
    let (app, _pool) = test_app().await;
    let uri = format!(
        "/announcements?message=Picture%20Day&expires_at={}",
        in_hours(1)
    );
    let (status, _) = send(&app, "POST", &uri).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn active_announcement_appears_until_it_expires() {
    let (app, pool) = test_app().await;

    let uri = format!(
        "/announcements?message=Picture%20Day&expires_at={}&teacher_username=mrodriguez",
        in_hours(1)
    );
    let (status, created) = send(&app, "POST", &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["message"], "Picture Day");
    let id = created["id"].as_str().unwrap().to_string();

    let (_, public) = send(&app, "GET", "/announcements").await;
    assert!(public.as_array().unwrap().iter().any(|a| a["id"] == *id));

    // An already-expired row only shows up in the management listing.
    let expired = AnnouncementRow {
        id: "f3b7c2a4-0000-4000-8000-000000000001".to_string(),
        message: "Old news".to_string(),
        starts_at: None,
        expires_at: in_hours(-1),
        created_at: in_hours(-2),
        updated_at: in_hours(-2),
    };
    announcements_repo::insert(&pool, &expired).await.unwrap();

    let (_, public) = send(&app, "GET", "/announcements").await;
    assert!(!public.as_array().unwrap().iter().any(|a| a["id"] == expired.id));

    let (status, manage) = send(
        &app,
        "GET",
        "/announcements/manage?teacher_username=mrodriguez",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(manage.as_array().unwrap().iter().any(|a| a["id"] == expired.id));
    assert!(manage.as_array().unwrap().iter().any(|a| a["id"] == *id));
}

#[tokio::test]
async fn scheduled_announcement_is_hidden_until_it_starts() {
    let (app, _pool) = test_app().await;

    let uri = format!(
        "/announcements?message=Spirit%20Week&starts_at={}&expires_at={}&teacher_username=mrodriguez",
        in_hours(24),
        in_hours(48)
    );
    let (status, created) = send(&app, "POST", &uri).await;
    assert_eq!(status, StatusCode::OK);

    let (_, public) = send(&app, "GET", "/announcements").await;
    assert!(
        !public
            .as_array()
            .unwrap()
            .iter()
            .any(|a| a["id"] == created["id"]),
        "not-yet-started announcements stay off the public banner"
    );
}

#[tokio::test]
async fn start_after_expiry_is_rejected_on_create_and_update() {
    let (app, _pool) = test_app().await;

    let uri = format!(
        "/announcements?message=Backwards&starts_at={}&expires_at={}&teacher_username=mrodriguez",
        in_hours(2),
        in_hours(1)
    );
    let (status, body) = send(&app, "POST", &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Expiration must be after start date");

    let uri = format!(
        "/announcements?message=Fine&expires_at={}&teacher_username=mrodriguez",
        in_hours(1)
    );
    let (_, created) = send(&app, "POST", &uri).await;
    let id = created["id"].as_str().unwrap();

    let uri = format!(
        "/announcements/{}?message=Backwards&starts_at={}&expires_at={}&teacher_username=mrodriguez",
        id,
        in_hours(2),
        in_hours(1)
    );
    let (status, body) = send(&app, "PUT", &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Expiration must be after start date");
}

#[tokio::test]
async fn update_and_delete_announcements() {
    let (app, _pool) = test_app().await;

    let uri = format!(
        "/announcements?message=Draft&expires_at={}&teacher_username=mrodriguez",
        in_hours(1)
    );
    let (_, created) = send(&app, "POST", &uri).await;
    let id = created["id"].as_str().unwrap().to_string();

    let uri = format!(
        "/announcements/{}?message=Final&expires_at={}&teacher_username=mrodriguez",
        id,
        in_hours(3)
    );
    let (status, updated) = send(&app, "PUT", &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["message"], "Final");

    let uri = format!(
        "/announcements/not-a-uuid?message=x&expires_at={}&teacher_username=mrodriguez",
        in_hours(1)
    );
    let (status, body) = send(&app, "PUT", &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid announcement id");

    let uri = format!(
        "/announcements/f3b7c2a4-0000-4000-8000-00000000dead?message=x&expires_at={}&teacher_username=mrodriguez",
        in_hours(1)
    );
    let (status, _) = send(&app, "PUT", &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let uri = format!("/announcements/{}?teacher_username=mrodriguez", id);
    let (status, body) = send(&app, "DELETE", &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Announcement deleted");

    let (status, _) = send(&app, "DELETE", &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn overlong_message_is_rejected() {
    let (app, _pool) = test_app().await;
    let uri = format!(
        "/announcements?message={}&expires_at={}&teacher_username=mrodriguez",
        "x".repeat(501),
        in_hours(1)
    );
    let (status, body) = send(&app, "POST", &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Message is too long");
}

// ---------------------------------------------------------------------------
// Auth

#[tokio::test]
async fn login_returns_display_identity_without_password() {
    let (app, _pool) = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/auth/login?username=mrodriguez&password=art123",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "mrodriguez");
    assert_eq!(body["display_name"], "Ms. Rodriguez");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn bad_password_and_unknown_user_fail_identically() {
    let (app, _pool) = test_app().await;

    let (wrong_pw_status, wrong_pw_body) = send(
        &app,
        "POST",
        "/auth/login?username=mrodriguez&password=wrong",
    )
    .await;
    let (unknown_status, unknown_body) =
        send(&app, "POST", "/auth/login?username=ghost&password=art123").await;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_pw_body, unknown_body,
        "failures must not reveal which part was wrong"
    );
}

#[tokio::test]
async fn check_session_revalidates_stored_identity() {
    let (app, _pool) = test_app().await;

    let (status, body) = send(&app, "GET", "/auth/check-session?username=mchen").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display_name"], "Mr. Chen");

    let (status, _) = send(&app, "GET", "/auth/check-session?username=ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Directory page

#[tokio::test]
async fn directory_page_renders_cards_and_applies_filters() {
    let (app, _pool) = test_app().await;

    let (status, html) = send_html(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Chess Club"));
    assert!(html.contains("spots left"));

    let (status, html) = send_html(&app, "/?when=weekend").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Weekend Robotics Workshop"));
    assert!(html.contains("Sunday Chess Tournament"));
    assert!(!html.contains("Drama Club"));

    let (status, html) = send_html(&app, "/?q=robot").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Weekend Robotics Workshop"));
    assert!(!html.contains("Chess Club"));

    let (status, html) = send_html(&app, "/?category=community").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Community Garden Volunteers"));
    assert!(!html.contains("Soccer Team"));
}
