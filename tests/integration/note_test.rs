//! Integration tests for notes and the folder note cache.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, ids};

#[tokio::test]
async fn test_create_unfiled_note() {
    let app = TestApp::new();
    let token = app.signup("alice").await;

    let response = app
        .request(
            "POST",
            "/api/notes",
            Some(json!({
                "title": "Groceries",
                "keyPoints": "milk",
                "detailedNotes": "oat milk, 2l",
                "summary": "buy milk",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["title"], "Groceries");
    assert_eq!(response.data()["keyPoints"], "milk");
    assert!(response.data()["folderId"].is_null());
}

#[tokio::test]
async fn test_create_filed_note_updates_cache() {
    let app = TestApp::new();
    let token = app.signup("alice").await;
    let folder = app.create_folder(&token, "Work", None).await;

    let note = app.create_note(&token, "Plan", Some(&folder)).await;

    assert_eq!(app.note(&token, &note).await["folderId"], folder);
    assert_eq!(ids(&app.folder(&token, &folder).await["noteIds"]), vec![note]);
}

#[tokio::test]
async fn test_create_in_unknown_folder_leaves_no_note() {
    let app = TestApp::new();
    let token = app.signup("alice").await;

    let response = app
        .request(
            "POST",
            "/api/notes",
            Some(json!({ "title": "Lost", "folderId": uuid::Uuid::new_v4() })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let list = app.request("GET", "/api/notes", None, Some(&token)).await;
    assert_eq!(list.data().as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_note_validation() {
    let app = TestApp::new();
    let token = app.signup("alice").await;

    let missing = app
        .request("POST", "/api/notes", Some(json!({ "title": "  " })), Some(&token))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.message(), "Note title is required.");

    let long = app
        .request(
            "POST",
            "/api/notes",
            Some(json!({ "title": "T", "summary": "s".repeat(301) })),
            Some(&token),
        )
        .await;
    assert_eq!(long.status, StatusCode::BAD_REQUEST);
    assert_eq!(long.message(), "Summary must not exceed 300 characters.");
}

#[tokio::test]
async fn test_update_note_content_keeps_folder() {
    let app = TestApp::new();
    let token = app.signup("alice").await;
    let folder = app.create_folder(&token, "Work", None).await;
    let note = app.create_note(&token, "Draft", Some(&folder)).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/notes/{note}"),
            Some(json!({ "title": "Final", "summary": "done", "folderId": null })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["title"], "Final");
    assert_eq!(response.data()["folderId"], folder);
}

#[tokio::test]
async fn test_move_note_between_folders() {
    let app = TestApp::new();
    let token = app.signup("alice").await;
    let a = app.create_folder(&token, "A", None).await;
    let b = app.create_folder(&token, "B", None).await;
    let note = app.create_note(&token, "n", Some(&a)).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/notes/{note}/folder"),
            Some(json!({ "newFolderId": b })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["folderId"], b);
    assert!(ids(&app.folder(&token, &a).await["noteIds"]).is_empty());
    assert_eq!(ids(&app.folder(&token, &b).await["noteIds"]), vec![note]);
}

#[tokio::test]
async fn test_move_note_to_same_folder_twice_is_idempotent() {
    let app = TestApp::new();
    let token = app.signup("alice").await;
    let a = app.create_folder(&token, "A", None).await;
    let note = app.create_note(&token, "n", Some(&a)).await;

    for _ in 0..2 {
        let response = app
            .request(
                "PATCH",
                &format!("/api/notes/{note}/folder"),
                Some(json!({ "newFolderId": a })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    assert_eq!(ids(&app.folder(&token, &a).await["noteIds"]), vec![note]);
}

#[tokio::test]
async fn test_unfile_note() {
    let app = TestApp::new();
    let token = app.signup("alice").await;
    let a = app.create_folder(&token, "A", None).await;
    let note = app.create_note(&token, "n", Some(&a)).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/notes/{note}/folder"),
            Some(json!({ "newFolderId": null })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["folderId"].is_null());
    assert!(ids(&app.folder(&token, &a).await["noteIds"]).is_empty());
}

#[tokio::test]
async fn test_move_to_unknown_folder_changes_nothing() {
    let app = TestApp::new();
    let token = app.signup("alice").await;
    let a = app.create_folder(&token, "A", None).await;
    let note = app.create_note(&token, "n", Some(&a)).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/notes/{note}/folder"),
            Some(json!({ "newFolderId": uuid::Uuid::new_v4() })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.note(&token, &note).await["folderId"], a);
    assert_eq!(ids(&app.folder(&token, &a).await["noteIds"]), vec![note]);
}

#[tokio::test]
async fn test_delete_note_drops_it_from_cache() {
    let app = TestApp::new();
    let token = app.signup("alice").await;
    let a = app.create_folder(&token, "A", None).await;
    let note = app.create_note(&token, "n", Some(&a)).await;

    let response = app
        .request("DELETE", &format!("/api/notes/{note}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["message"], "Note deleted successfully");

    let gone = app
        .request("GET", &format!("/api/notes/{note}"), None, Some(&token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert!(ids(&app.folder(&token, &a).await["noteIds"]).is_empty());
}

#[tokio::test]
async fn test_notes_are_private_to_their_owner() {
    let app = TestApp::new();
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let note = app.create_note(&alice, "secret", None).await;
    let bobs_folder = app.create_folder(&bob, "Mine", None).await;

    let get = app
        .request("GET", &format!("/api/notes/{note}"), None, Some(&bob))
        .await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);

    let steal = app
        .request(
            "PATCH",
            &format!("/api/notes/{note}/folder"),
            Some(json!({ "newFolderId": bobs_folder })),
            Some(&bob),
        )
        .await;
    assert_eq!(steal.status, StatusCode::NOT_FOUND);

    let file_into_foreign = app
        .request(
            "POST",
            "/api/notes",
            Some(json!({ "title": "x", "folderId": bobs_folder })),
            Some(&alice),
        )
        .await;
    assert_eq!(file_into_foreign.status, StatusCode::NOT_FOUND);
}
