//! End-to-end booking flow tests over a real (temporary) SQLite store
//!
//! Uses `ServerState::initialize` with a tempdir work directory, so every
//! test runs migrations against its own database file.

use std::sync::Arc;

use club_server::db::models::credential;
use club_server::db::repository::{member, order, pizza};
use club_server::ordering::{SubmitOrderRequest, submit_order};
use club_server::scheduling::{availability, current_nights};
use club_server::utils::time::now_in;
use club_server::{Config, ErrorCode, ServerState};
use shared::models::{Member, Pizza, PizzaCreate};

const ADMIN_PASSWORD: &str = "kitchen-door-code";

struct TestClub {
    state: ServerState,
    member: Member,
    margherita: Pizza,
    /// A bookable (date, time) pair on the upcoming Saturday
    date: String,
    time: String,
    _work_dir: tempfile::TempDir,
}

async fn test_club() -> TestClub {
    let work_dir = tempfile::tempdir().expect("tempdir");
    let mut config = Config::with_overrides(work_dir.path().to_string_lossy(), 0);
    config.admin_password = Some(ADMIN_PASSWORD.to_string());
    let state = ServerState::initialize(&config).await.expect("state");

    let margherita = pizza::create(
        &state.pool,
        PizzaCreate {
            name: "Margherita".into(),
            description: Some("Tomato, mozzarella, basil".into()),
        },
    )
    .await
    .expect("pizza");
    pizza::create(
        &state.pool,
        PizzaCreate {
            name: "Pepperoni".into(),
            description: None,
        },
    )
    .await
    .expect("pizza");

    let member = member::create(
        &state.pool,
        member::MemberInsert {
            first_name: "Tony".into(),
            last_name: "Soprano".into(),
            username: "tsoprano".into(),
            phone: "555-867-5309".into(),
            hash_pass: credential::hash_password("gabagool-pass").expect("hash"),
        },
    )
    .await
    .expect("member");

    // The upcoming Saturday always has at least one bookable slot
    let now = now_in(state.config.timezone);
    let candidate = *current_nights(now, state.config.roster.last_start())
        .last()
        .expect("a current night");
    let date = candidate.date.format("%Y-%m-%d").to_string();
    let open = availability::available_slots(&state.pool, &state.config.roster, candidate.date, &now)
        .await
        .expect("availability");
    let time = open.first().expect("an open slot").clone();

    TestClub {
        state,
        member,
        margherita,
        date,
        time,
        _work_dir: work_dir,
    }
}

fn request(club: &TestClub, pizza_name: &str, time: &str) -> SubmitOrderRequest {
    SubmitOrderRequest {
        member_id: Some(club.member.id),
        phone: None,
        pizza_name: pizza_name.into(),
        pickup_date: club.date.clone(),
        pickup_time: time.into(),
    }
}

#[tokio::test]
async fn submitted_order_round_trips() {
    let club = test_club().await;

    let submitted = submit_order(&club.state, request(&club, "Margherita Pizza", &club.time))
        .await
        .expect("submit");

    let detail = order::find_detail_by_id(&club.state.pool, submitted.order_id)
        .await
        .expect("fetch")
        .expect("order exists");
    assert_eq!(detail.member_id, club.member.id);
    assert_eq!(detail.pizza_id, club.margherita.id);
    assert_eq!(detail.pizza_name, "Margherita");
    assert_eq!(detail.night_date, club.date);
    assert_eq!(detail.start_time, club.time);
}

#[tokio::test]
async fn taken_slot_rejects_second_submission() {
    let club = test_club().await;

    submit_order(&club.state, request(&club, "Margherita", &club.time))
        .await
        .expect("first submit");

    let err = submit_order(&club.state, request(&club, "Pepperoni", &club.time))
        .await
        .expect_err("second submit must fail");
    assert_eq!(err.code, ErrorCode::SlotUnavailable);

    // The slot no longer shows as available
    let now = now_in(club.state.config.timezone);
    let date = club.date.parse().unwrap();
    let open = availability::available_slots(&club.state.pool, &club.state.config.roster, date, &now)
        .await
        .expect("availability");
    assert!(!open.contains(&club.time));
}

#[tokio::test]
async fn concurrent_submissions_book_at_most_once() {
    let club = test_club().await;
    let state = Arc::new(club.state.clone());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let state = state.clone();
        let req = request(&club, "Margherita", &club.time);
        handles.push(tokio::spawn(async move { submit_order(&state, req).await }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.expect("task") {
            Ok(_) => successes += 1,
            Err(e) => assert_eq!(e.code, ErrorCode::SlotUnavailable),
        }
    }
    assert_eq!(successes, 1, "exactly one concurrent submission may win");
}

#[tokio::test]
async fn cancellation_reopens_the_slot() {
    let club = test_club().await;
    let creds = club_server::admin::AdminCredentials {
        admin_username: "admin".into(),
        admin_password: ADMIN_PASSWORD.into(),
    };

    let submitted = submit_order(&club.state, request(&club, "Margherita", &club.time))
        .await
        .expect("submit");

    club_server::admin::orders::cancel_order(&club.state.pool, &creds, submitted.order_id)
        .await
        .expect("cancel");

    assert!(
        order::find_by_id(&club.state.pool, submitted.order_id)
            .await
            .expect("fetch")
            .is_none(),
        "cancellation hard-deletes the order"
    );

    let now = now_in(club.state.config.timezone);
    let date = club.date.parse().unwrap();
    let open = availability::available_slots(&club.state.pool, &club.state.config.roster, date, &now)
        .await
        .expect("availability");
    assert!(open.contains(&club.time), "cancelled slot is offerable again");

    // And bookable again
    submit_order(&club.state, request(&club, "Pepperoni", &club.time))
        .await
        .expect("rebook");
}

#[tokio::test]
async fn wrong_admin_credentials_cannot_cancel() {
    let club = test_club().await;
    let submitted = submit_order(&club.state, request(&club, "Margherita", &club.time))
        .await
        .expect("submit");

    let bad_creds = club_server::admin::AdminCredentials {
        admin_username: "admin".into(),
        admin_password: "guess".into(),
    };
    let err =
        club_server::admin::orders::cancel_order(&club.state.pool, &bad_creds, submitted.order_id)
            .await
            .expect_err("must reject");
    assert_eq!(err.code, ErrorCode::AdminRequired);

    assert!(
        order::find_by_id(&club.state.pool, submitted.order_id)
            .await
            .expect("fetch")
            .is_some()
    );
}

#[tokio::test]
async fn misspelled_pizza_reports_catalog() {
    let club = test_club().await;

    let err = submit_order(&club.state, request(&club, "Pepperonni", &club.time))
        .await
        .expect_err("no tier may guess");
    assert_eq!(err.code, ErrorCode::PizzaNotFound);
    assert!(err.message.contains("Margherita"));
    assert!(err.message.contains("Pepperoni"));
}

#[tokio::test]
async fn member_resolution_falls_back_to_phone() {
    let club = test_club().await;

    let req = SubmitOrderRequest {
        member_id: None,
        phone: Some("555-867-5309".into()),
        pizza_name: "Margherita".into(),
        pickup_date: club.date.clone(),
        pickup_time: club.time.clone(),
    };
    submit_order(&club.state, req).await.expect("phone fallback");
}

#[tokio::test]
async fn unknown_member_is_terminal() {
    let club = test_club().await;

    let req = SubmitOrderRequest {
        member_id: Some(424242),
        phone: Some("555-000-0000".into()),
        pizza_name: "Margherita".into(),
        pickup_date: club.date.clone(),
        pickup_time: club.time.clone(),
    };
    let err = submit_order(&club.state, req).await.expect_err("no member");
    assert_eq!(err.code, ErrorCode::MemberNotFound);
}

#[tokio::test]
async fn ambiguous_phone_is_rejected() {
    let club = test_club().await;

    // Second member sharing the phone number
    member::create(
        &club.state.pool,
        member::MemberInsert {
            first_name: "Carmela".into(),
            last_name: "Soprano".into(),
            username: "csoprano".into(),
            phone: "555-867-5309".into(),
            hash_pass: credential::hash_password("ziti-pass").expect("hash"),
        },
    )
    .await
    .expect("member");

    let req = SubmitOrderRequest {
        member_id: None,
        phone: Some("555-867-5309".into()),
        pizza_name: "Margherita".into(),
        pickup_date: club.date.clone(),
        pickup_time: club.time.clone(),
    };
    let err = submit_order(&club.state, req)
        .await
        .expect_err("ambiguous phone must not book");
    assert_eq!(err.code, ErrorCode::MemberNotFound);
}
