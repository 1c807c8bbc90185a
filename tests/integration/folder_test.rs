//! Integration tests for folder CRUD, moves, the depth rule, and the
//! deletion cascade.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, ids};

#[tokio::test]
async fn test_create_root_folder() {
    let app = TestApp::new();
    let token = app.signup("alice").await;

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "  Work  " })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["name"], "Work");
    assert!(response.data()["parentFolder"].is_null());
    assert_eq!(ids(&response.data()["noteIds"]), Vec::<String>::new());
}

#[tokio::test]
async fn test_three_levels_allowed_fourth_rejected() {
    let app = TestApp::new();
    let token = app.signup("alice").await;
    let root = app.create_folder(&token, "R", None).await;
    let child = app.create_folder(&token, "C", Some(&root)).await;
    let grandchild = app.create_folder(&token, "G", Some(&child)).await;

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Too deep", "parentFolder": grandchild })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.error(), "DEPTH_EXCEEDED");
    assert_eq!(
        response.message(),
        "Maximum folder nesting level of 3 exceeded."
    );

    let list = app.request("GET", "/api/folders", None, Some(&token)).await;
    assert_eq!(list.data().as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_validation_errors() {
    let app = TestApp::new();
    let token = app.signup("alice").await;

    let empty = app
        .request("POST", "/api/folders", Some(json!({ "name": "" })), Some(&token))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.message(), "Folder name is required.");

    let long = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "x".repeat(51) })),
            Some(&token),
        )
        .await;
    assert_eq!(long.status, StatusCode::BAD_REQUEST);
    assert_eq!(long.message(), "Folder name must not exceed 50 characters.");
}

#[tokio::test]
async fn test_unknown_parent_is_not_found() {
    let app = TestApp::new();
    let token = app.signup("alice").await;

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Orphan", "parentFolder": uuid::Uuid::new_v4() })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_id_format() {
    let app = TestApp::new();
    let token = app.signup("alice").await;

    let response = app
        .request("GET", "/api/folders/not-an-id", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Invalid ID format");
}

#[tokio::test]
async fn test_get_folder_resolves_notes() {
    let app = TestApp::new();
    let token = app.signup("alice").await;
    let folder = app.create_folder(&token, "Work", None).await;
    let note = app.create_note(&token, "Plan", Some(&folder)).await;

    let body = app.folder(&token, &folder).await;

    assert_eq!(ids(&body["noteIds"]), vec![note.clone()]);
    assert_eq!(body["notes"][0]["id"], note);
    assert_eq!(body["notes"][0]["title"], "Plan");
}

#[tokio::test]
async fn test_update_keeps_parent_when_absent_and_clears_on_null() {
    let app = TestApp::new();
    let token = app.signup("alice").await;
    let root = app.create_folder(&token, "R", None).await;
    let child = app.create_folder(&token, "C", Some(&root)).await;

    let renamed = app
        .request(
            "PUT",
            &format!("/api/folders/{child}"),
            Some(json!({ "name": "Renamed" })),
            Some(&token),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.data()["name"], "Renamed");
    assert_eq!(renamed.data()["parentFolder"], root);

    let rooted = app
        .request(
            "PUT",
            &format!("/api/folders/{child}"),
            Some(json!({ "name": "Renamed", "parentFolder": null })),
            Some(&token),
        )
        .await;
    assert_eq!(rooted.status, StatusCode::OK);
    assert!(rooted.data()["parentFolder"].is_null());
}

#[tokio::test]
async fn test_move_enforces_depth_with_subtree() {
    let app = TestApp::new();
    let token = app.signup("alice").await;
    let a = app.create_folder(&token, "A", None).await;
    let b = app.create_folder(&token, "B", Some(&a)).await;
    let x = app.create_folder(&token, "X", None).await;
    app.create_folder(&token, "Y", Some(&x)).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/folders/{x}/parent"),
            Some(json!({ "newParentId": b })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.error(), "DEPTH_EXCEEDED");

    let response = app
        .request(
            "PATCH",
            &format!("/api/folders/{x}/parent"),
            Some(json!({ "newParentId": a })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Folder moved successfully");
    assert_eq!(response.data()["parentFolder"], a);
}

#[tokio::test]
async fn test_move_into_descendant_is_a_cycle() {
    let app = TestApp::new();
    let token = app.signup("alice").await;
    let a = app.create_folder(&token, "A", None).await;
    let b = app.create_folder(&token, "B", Some(&a)).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/folders/{a}/parent"),
            Some(json!({ "newParentId": b })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.error(), "CYCLE_DETECTED");
}

#[tokio::test]
async fn test_move_to_top_level() {
    let app = TestApp::new();
    let token = app.signup("alice").await;
    let a = app.create_folder(&token, "A", None).await;
    let b = app.create_folder(&token, "B", Some(&a)).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/folders/{b}/parent"),
            Some(json!({})),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(app.folder(&token, &b).await["parentFolder"].is_null());
}

#[tokio::test]
async fn test_delete_cascades_to_parent() {
    let app = TestApp::new();
    let token = app.signup("alice").await;
    let p = app.create_folder(&token, "P", None).await;
    let doomed = app.create_folder(&token, "D", Some(&p)).await;
    let child = app.create_folder(&token, "C", Some(&doomed)).await;
    let kept = app.create_note(&token, "in parent", Some(&p)).await;
    let moved = app.create_note(&token, "in doomed", Some(&doomed)).await;

    let response = app
        .request("DELETE", &format!("/api/folders/{doomed}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Folder deleted successfully");
    assert_eq!(response.data()["reparentedFolders"], 1);
    assert_eq!(response.data()["relinkedNotes"], 1);

    let gone = app
        .request("GET", &format!("/api/folders/{doomed}"), None, Some(&token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    assert_eq!(app.folder(&token, &child).await["parentFolder"], p);
    assert_eq!(app.note(&token, &moved).await["folderId"], p);

    let mut cache = ids(&app.folder(&token, &p).await["noteIds"]);
    cache.sort();
    let mut expected = vec![kept, moved];
    expected.sort();
    assert_eq!(cache, expected);
}

#[tokio::test]
async fn test_delete_root_unfiles_notes() {
    let app = TestApp::new();
    let token = app.signup("alice").await;
    let p = app.create_folder(&token, "P", None).await;
    let child = app.create_folder(&token, "C", Some(&p)).await;
    let note = app.create_note(&token, "n1", Some(&p)).await;

    let response = app
        .request("DELETE", &format!("/api/folders/{p}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["newParentId"].is_null());

    assert!(app.note(&token, &note).await["folderId"].is_null());
    assert!(app.folder(&token, &child).await["parentFolder"].is_null());
}

#[tokio::test]
async fn test_tree_view() {
    let app = TestApp::new();
    let token = app.signup("alice").await;
    let a = app.create_folder(&token, "A", None).await;
    let b = app.create_folder(&token, "B", Some(&a)).await;
    app.create_folder(&token, "C", Some(&b)).await;
    app.create_folder(&token, "Z", None).await;
    app.create_note(&token, "n", Some(&b)).await;

    let response = app
        .request("GET", "/api/folders/tree", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let tree = response.data();
    assert_eq!(tree["totalFolders"], 4);
    assert_eq!(tree["roots"].as_array().unwrap().len(), 2);
    let b_node = &tree["roots"][0]["children"][0];
    assert_eq!(b_node["name"], "B");
    assert_eq!(b_node["level"], 2);
    assert_eq!(b_node["noteCount"], 1);
    assert_eq!(b_node["children"][0]["level"], 3);
}

#[tokio::test]
async fn test_folders_are_private_to_their_owner() {
    let app = TestApp::new();
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let folder = app.create_folder(&alice, "Private", None).await;

    let get = app
        .request("GET", &format!("/api/folders/{folder}"), None, Some(&bob))
        .await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);

    let nest = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Intruder", "parentFolder": folder })),
            Some(&bob),
        )
        .await;
    assert_eq!(nest.status, StatusCode::NOT_FOUND);

    let delete = app
        .request("DELETE", &format!("/api/folders/{folder}"), None, Some(&bob))
        .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let list = app.request("GET", "/api/folders", None, Some(&bob)).await;
    assert_eq!(list.data().as_array().unwrap().len(), 0);
}
