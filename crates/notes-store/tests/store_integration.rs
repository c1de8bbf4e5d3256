//! Integration tests against a real PostgreSQL database.
//!
//! Run with:
//!   DATABASE_URL=postgres://... cargo test -p notes-store --features integration-tests
#![cfg(feature = "integration-tests")]

use notes_core::Role;
use notes_store::{NewNote, NewUser, Store, StoreConfig, StoreError};
use uuid::Uuid;

async fn connect() -> Store {
    let config = StoreConfig::from_env().expect("DATABASE_URL must be set for integration tests");
    Store::connect(config).await.expect("failed to connect")
}

fn unique_email() -> String {
    format!("it-{}@example.com", Uuid::new_v4())
}

async fn create_user(store: &Store) -> String {
    let email = unique_email();
    store
        .insert_user(&NewUser {
            email: email.clone(),
            password_hash: Some("hash".to_string()),
            role: Role::User,
        })
        .await
        .expect("insert user");
    email
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let store = connect().await;
    let email = create_user(&store).await;

    let result = store
        .insert_user(&NewUser {
            email: email.clone(),
            password_hash: Some("other".to_string()),
            role: Role::User,
        })
        .await;

    assert!(matches!(result, Err(StoreError::DuplicateEmail(e)) if e == email));
}

#[tokio::test]
async fn resolve_tags_is_idempotent_and_deduplicates() {
    let store = connect().await;
    // Unique suffix so runs do not interfere with each other.
    let suffix = Uuid::new_v4().simple().to_string();
    let go = format!("go-{suffix}");
    let rust = format!("rust-{suffix}");
    let python = format!("python-{suffix}");

    let first = store
        .resolve_tags(&[go.clone(), rust.clone(), go.clone()])
        .await
        .expect("first resolve");
    assert_eq!(first.len(), 2);

    let go_id = first.iter().find(|t| t.name == go).expect("go tag").id;

    let second = store
        .resolve_tags(&[go.clone(), python.clone()])
        .await
        .expect("second resolve");
    assert_eq!(second.len(), 2);
    let go_again = second.iter().find(|t| t.name == go).expect("go tag");
    assert_eq!(go_again.id, go_id, "existing tag must keep its identity");
    assert!(second.iter().any(|t| t.name == python));
}

#[tokio::test]
async fn concurrent_tag_creation_recovers_from_race() {
    let store = connect().await;
    let name = format!("race-{}", Uuid::new_v4().simple());

    let (a, b) = tokio::join!(
        store.resolve_tags(std::slice::from_ref(&name)),
        store.resolve_tags(std::slice::from_ref(&name)),
    );

    let a = a.expect("first resolver");
    let b = b.expect("second resolver");
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);
    assert_eq!(a[0].id, b[0].id, "both resolvers must converge on one tag");
}

#[tokio::test]
async fn stale_version_update_conflicts() {
    let store = connect().await;
    let owner = create_user(&store).await;

    let note = store
        .insert_note(&NewNote {
            title: "draft".to_string(),
            content: "v0".to_string(),
            owner_email: owner,
        })
        .await
        .expect("insert note");
    assert_eq!(note.version, 0);

    let updated = store
        .update_note(note.id, "draft", "v1", 0)
        .await
        .expect("first update");
    assert_eq!(updated.version, 1);

    // Writing with the version we already consumed must conflict.
    let stale = store.update_note(note.id, "draft", "v2", 0).await;
    assert!(matches!(
        stale,
        Err(StoreError::VersionConflict { expected: 0, .. })
    ));
}

#[tokio::test]
async fn missing_note_reports_not_found_not_conflict() {
    let store = connect().await;
    let missing = Uuid::new_v4();

    let update = store.update_note(missing, "t", "c", 0).await;
    assert!(matches!(update, Err(StoreError::NoteNotFound(id)) if id == missing));

    let delete = store.delete_note(missing).await;
    assert!(matches!(delete, Err(StoreError::NoteNotFound(id)) if id == missing));
}

#[tokio::test]
async fn note_tags_are_replaced_not_accumulated() {
    let store = connect().await;
    let owner = create_user(&store).await;
    let suffix = Uuid::new_v4().simple().to_string();

    let note = store
        .insert_note(&NewNote {
            title: "tagged".to_string(),
            content: String::new(),
            owner_email: owner,
        })
        .await
        .expect("insert note");

    let first = store
        .resolve_tags(&[format!("a-{suffix}"), format!("b-{suffix}")])
        .await
        .expect("resolve");
    let ids: Vec<Uuid> = first.iter().map(|t| t.id).collect();
    store.set_note_tags(note.id, &ids).await.expect("set tags");
    assert_eq!(store.tags_for_note(note.id).await.unwrap().len(), 2);

    let second = store
        .resolve_tags(&[format!("c-{suffix}")])
        .await
        .expect("resolve");
    let ids: Vec<Uuid> = second.iter().map(|t| t.id).collect();
    store.set_note_tags(note.id, &ids).await.expect("replace tags");

    let tags = store.tags_for_note(note.id).await.unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name, format!("c-{suffix}"));
}
