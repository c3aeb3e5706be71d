//! Repository tests against a real PostgreSQL database.
//!
//! Run with `DATABASE_URL` pointing at a disposable server:
//! `cargo test --test postgres_repository -- --ignored`

use serde_json::json;
use sqlx::PgPool;
use visadesk_core::ErrorKind;
use visadesk_db::{ApplicationRepository, PgStore, UserRepository};
use visadesk_models::applications::{ApplicationStatus, NewApplication, StatusUpdate};
use visadesk_models::users::{NewUser, UserRole};
use visadesk_models::{ApplicationId, Email, UserId};

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: Email::new(email).unwrap(),
        password_hash: "$2b$04$placeholderplaceholderplaceholderplaceholde".to_string(),
        role: UserRole::User,
    }
}

fn new_application(user_id: UserId) -> NewApplication {
    NewApplication {
        user_id,
        personal_info: serde_json::from_value(json!({
            "name": "Alice Doe",
            "email": "alice@example.com",
            "passportNumber": "X1234567",
            "passportExpirationDate": "2032-01-31",
            "dateOfBirth": "1990-04-12",
            "nationality": "Kenyan",
            "gender": "female",
            "phoneNumber": "+254700000000",
            "address": "1 Main St"
        }))
        .unwrap(),
        travel_info: serde_json::from_value(json!({
            "destination": "France",
            "date": "2030-05-01",
            "purpose": "tourism",
            "travelCompanions": ["Bob"],
            "travelDates": [],
            "travelDocuments": [],
            "travelBudget": "3000 EUR",
            "travelInsurance": "AXA",
            "intendedArrivalDate": "2030-05-01",
            "intendedDepartureDate": "2030-05-20"
        }))
        .unwrap(),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_user_insert_and_lookup(pool: PgPool) {
    let store = PgStore::new(pool);
    let created = UserRepository::insert(&store, new_user("alice@example.com"))
        .await
        .unwrap();

    let by_email = store
        .find_by_email(&Email::new("ALICE@example.com").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, created.id);

    let by_id = UserRepository::find_by_id(&store, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_id.email, "alice@example.com");
    assert_eq!(by_id.role, UserRole::User);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_email_maps_to_email_taken(pool: PgPool) {
    let store = PgStore::new(pool);
    UserRepository::insert(&store, new_user("bob@example.com"))
        .await
        .unwrap();

    let err = UserRepository::insert(&store, new_user("bob@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::EmailTaken);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_application_round_trip_and_listing(pool: PgPool) {
    let store = PgStore::new(pool);
    let alice = UserRepository::insert(&store, new_user("alice@example.com"))
        .await
        .unwrap();
    let bob = UserRepository::insert(&store, new_user("bob@example.com"))
        .await
        .unwrap();

    let created = ApplicationRepository::insert(&store, new_application(alice.id))
        .await
        .unwrap();
    ApplicationRepository::insert(&store, new_application(bob.id))
        .await
        .unwrap();

    assert_eq!(created.status, ApplicationStatus::Pending);
    assert_eq!(created.version, 1);
    assert_eq!(created.travel_info.travel_companions, vec!["Bob".to_string()]);

    let own = store.find_by_owner(alice.id).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].id, created.id);

    let all = store.find_all_with_owner().await.unwrap();
    assert_eq!(all.len(), 2);
    let listed = all
        .iter()
        .find(|a| a.application.id == created.id)
        .unwrap();
    assert_eq!(listed.owner.as_ref().unwrap().email, "alice@example.com");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_status_versions(pool: PgPool) {
    let store = PgStore::new(pool);
    let alice = UserRepository::insert(&store, new_user("alice@example.com"))
        .await
        .unwrap();
    let created = ApplicationRepository::insert(&store, new_application(alice.id))
        .await
        .unwrap();

    let approved = store
        .update_status(
            created.id,
            StatusUpdate {
                status: ApplicationStatus::Approved,
                admin_notes: Some("ok".to_string()),
                expected_version: Some(1),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(approved.version, 2);
    assert_eq!(approved.admin_notes.as_deref(), Some("ok"));

    let err = store
        .update_status(
            created.id,
            StatusUpdate {
                status: ApplicationStatus::Rejected,
                admin_notes: None,
                expected_version: Some(1),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::VersionConflict);

    let kept_notes = store
        .update_status(
            created.id,
            StatusUpdate {
                status: ApplicationStatus::Rejected,
                admin_notes: None,
                expected_version: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept_notes.version, 3);
    assert_eq!(kept_notes.admin_notes.as_deref(), Some("ok"));

    let unchanged = store
        .update_status(
            created.id,
            StatusUpdate {
                status: ApplicationStatus::Rejected,
                admin_notes: None,
                expected_version: Some(3),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.version, 3);
    assert_eq!(unchanged.updated_at, kept_notes.updated_at);

    let missing = store
        .update_status(
            ApplicationId::new(),
            StatusUpdate {
                status: ApplicationStatus::Approved,
                admin_notes: None,
                expected_version: Some(1),
            },
        )
        .await
        .unwrap();
    assert!(missing.is_none());
}
