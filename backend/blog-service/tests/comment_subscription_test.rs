//! `commentAdded` subscriptions over the in-memory backend

use std::time::Duration;

use async_graphql::{Request, Variables};
use blog_service::graphql::build_schema;
use blog_service::AppState;
use futures_util::StreamExt;
use serde_json::json;

async fn wait_for_subscribers(state: &AppState, expected: u64) {
    for _ in 0..100 {
        if state.feed.stats().active_subscriptions() == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("expected {} active subscriptions", expected);
}

#[tokio::test]
async fn test_comment_added_is_pushed() {
    let state = AppState::in_memory(4);
    let schema = build_schema(state.clone());
    let post = state
        .posts
        .create_post("Live", "body", "alice", None)
        .await
        .unwrap();

    let mut stream = schema.execute_stream(
        Request::new(r#"subscription($id: String!) { commentAdded(postId: $id) { id postId content } }"#)
            .variables(Variables::from_json(json!({ "id": post.id }))),
    );
    let next = tokio::spawn(async move {
        let first = stream.next().await;
        (first, stream)
    });
    wait_for_subscribers(&state, 1).await;

    let comment = state
        .comments
        .add_comment(&post.id, "hi", "bob", None)
        .await
        .unwrap();

    let (first, stream) = tokio::time::timeout(Duration::from_secs(2), next)
        .await
        .expect("comment was not pushed")
        .unwrap();
    let response = first.unwrap();
    assert!(response.errors.is_empty());

    let data = response.data.into_json().unwrap();
    assert_eq!(data["commentAdded"]["id"], comment.id.as_str());
    assert_eq!(data["commentAdded"]["postId"], post.id.as_str());
    assert_eq!(data["commentAdded"]["content"], "hi");

    drop(stream);
    wait_for_subscribers(&state, 0).await;
}

#[tokio::test]
async fn test_other_posts_are_not_delivered() {
    let state = AppState::in_memory(4);
    let schema = build_schema(state.clone());
    let watched = state.posts.create_post("A", "a", "alice", None).await.unwrap();
    let other = state.posts.create_post("B", "b", "alice", None).await.unwrap();

    let mut stream = schema.execute_stream(
        Request::new(r#"subscription($id: String!) { commentAdded(postId: $id) { content } }"#)
            .variables(Variables::from_json(json!({ "id": watched.id }))),
    );
    let next = tokio::spawn(async move { stream.next().await });
    wait_for_subscribers(&state, 1).await;

    state.comments.add_comment(&other.id, "elsewhere", "bob", None).await.unwrap();
    state.comments.add_comment(&watched.id, "here", "bob", None).await.unwrap();

    let response = tokio::time::timeout(Duration::from_secs(2), next)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let data = response.data.into_json().unwrap();
    assert_eq!(data["commentAdded"]["content"], "here");
}

#[tokio::test]
async fn test_subscribe_to_missing_post_errors() {
    let schema = build_schema(AppState::in_memory(1));

    let mut stream = schema.execute_stream(
        r#"subscription { commentAdded(postId: "ghost") { id } }"#,
    );
    let response = tokio::time::timeout(Duration::from_secs(2), stream.next())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(response.errors.len(), 1);
    let body = serde_json::to_value(&response).unwrap();
    assert_eq!(body["errors"][0]["extensions"]["code"], "NOT_FOUND");
}
