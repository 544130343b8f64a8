//! Admin slot lock/unlock behavior against a real store

use club_server::admin::locks::{SlotLockRequest, list_locks, set_slot_lock};
use club_server::admin::AdminCredentials;
use club_server::db::models::credential;
use club_server::db::repository::{member, pizza};
use club_server::ordering::{SubmitOrderRequest, submit_order};
use club_server::scheduling::{availability, current_nights};
use club_server::utils::time::now_in;
use club_server::{Config, ErrorCode, ServerState};
use shared::models::PizzaCreate;

const ADMIN_PASSWORD: &str = "kitchen-door-code";

async fn test_state() -> (ServerState, tempfile::TempDir) {
    let work_dir = tempfile::tempdir().expect("tempdir");
    let mut config = Config::with_overrides(work_dir.path().to_string_lossy(), 0);
    config.admin_password = Some(ADMIN_PASSWORD.to_string());
    let state = ServerState::initialize(&config).await.expect("state");
    (state, work_dir)
}

fn creds() -> AdminCredentials {
    AdminCredentials {
        admin_username: "admin".into(),
        admin_password: ADMIN_PASSWORD.into(),
    }
}

fn lock_req(date: &str, time: &str, locked: bool) -> SlotLockRequest {
    SlotLockRequest {
        date: date.into(),
        time: time.into(),
        locked,
    }
}

/// The upcoming Saturday and its first open slot
async fn open_slot(state: &ServerState) -> (String, String) {
    let now = now_in(state.config.timezone);
    let candidate = *current_nights(now, state.config.roster.last_start())
        .last()
        .expect("a current night");
    let open = availability::available_slots(&state.pool, &state.config.roster, candidate.date, &now)
        .await
        .expect("availability");
    (
        candidate.date.format("%Y-%m-%d").to_string(),
        open.first().expect("an open slot").clone(),
    )
}

#[tokio::test]
async fn lock_hides_slot_and_unlock_restores_it() {
    let (state, _dir) = test_state().await;
    let (date, time) = open_slot(&state).await;

    set_slot_lock(&state.pool, &creds(), &lock_req(&date, &time, true))
        .await
        .expect("lock");

    let now = now_in(state.config.timezone);
    let night = date.parse().unwrap();
    let open = availability::available_slots(&state.pool, &state.config.roster, night, &now)
        .await
        .expect("availability");
    assert!(!open.contains(&time), "locked slot must not be offered");

    set_slot_lock(&state.pool, &creds(), &lock_req(&date, &time, false))
        .await
        .expect("unlock");

    let open = availability::available_slots(&state.pool, &state.config.roster, night, &now)
        .await
        .expect("availability");
    assert!(open.contains(&time), "unlocked slot is offered again");
}

#[tokio::test]
async fn lock_and_unlock_are_idempotent() {
    let (state, _dir) = test_state().await;
    let (date, time) = open_slot(&state).await;

    // Locking twice is a no-op success and leaves exactly one record
    set_slot_lock(&state.pool, &creds(), &lock_req(&date, &time, true))
        .await
        .expect("first lock");
    set_slot_lock(&state.pool, &creds(), &lock_req(&date, &time, true))
        .await
        .expect("second lock");
    let locks = list_locks(&state.pool, &creds(), &date).await.expect("list");
    assert_eq!(locks.len(), 1);
    assert_eq!(locks[0].start_time, time);
    assert_eq!(locks[0].locked_by.as_deref(), Some("admin"));

    // Unlocking twice is also a no-op success
    set_slot_lock(&state.pool, &creds(), &lock_req(&date, &time, false))
        .await
        .expect("first unlock");
    set_slot_lock(&state.pool, &creds(), &lock_req(&date, &time, false))
        .await
        .expect("second unlock");
    let locks = list_locks(&state.pool, &creds(), &date).await.expect("list");
    assert!(locks.is_empty());
}

#[tokio::test]
async fn locked_slot_rejects_submission() {
    let (state, _dir) = test_state().await;
    let (date, time) = open_slot(&state).await;

    pizza::create(
        &state.pool,
        PizzaCreate {
            name: "Margherita".into(),
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

    set_slot_lock(&state.pool, &creds(), &lock_req(&date, &time, true))
        .await
        .expect("lock");

    let err = submit_order(
        &state,
        SubmitOrderRequest {
            member_id: Some(member.id),
            phone: None,
            pizza_name: "Margherita".into(),
            pickup_date: date.clone(),
            pickup_time: time.clone(),
        },
    )
    .await
    .expect_err("locked slot must reject");
    assert_eq!(err.code, ErrorCode::SlotLocked);
}

#[tokio::test]
async fn lock_requires_valid_credentials() {
    let (state, _dir) = test_state().await;
    let (date, time) = open_slot(&state).await;

    let bad = AdminCredentials {
        admin_username: "nobody".into(),
        admin_password: "nothing".into(),
    };
    let err = set_slot_lock(&state.pool, &bad, &lock_req(&date, &time, true))
        .await
        .expect_err("must reject");
    assert_eq!(err.code, ErrorCode::AdminRequired);
}
