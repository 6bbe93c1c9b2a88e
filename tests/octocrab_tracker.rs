//! Wire-level tests for the Octocrab issue tracker.

use relnote::github::{
    IssueComment, IssueLocator, IssueTracker, OctocrabTracker, PersonalAccessToken,
    StaleCommentPredicate, TrackerError,
};
use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPO_PATH: &str = "/api/v3/repos/octo/repo/issues";

fn tracker_for(server: &MockServer) -> OctocrabTracker {
    let token = PersonalAccessToken::new("ghp_test").expect("token should be valid");
    OctocrabTracker::for_token(&token, &format!("{}/api/v3", server.uri()))
        .expect("tracker should build")
}

fn issue() -> IssueLocator {
    IssueLocator::new("octo", "repo", 7).expect("locator should be valid")
}

#[rstest]
#[case::member(204, true)]
#[case::not_member(404, false)]
#[tokio::test]
async fn membership_follows_status(#[case] status: u16, #[case] expected: bool) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/orgs/octo/members/alice"))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(&server)
        .await;

    let result = tracker_for(&server).is_org_member("octo", "alice").await;

    assert_eq!(result, Ok(expected));
}

#[tokio::test]
async fn membership_server_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/orgs/octo/members/alice"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })),
        )
        .mount(&server)
        .await;

    let result = tracker_for(&server).is_org_member("octo", "alice").await;

    assert!(
        matches!(result, Err(TrackerError::Api { ref message }) if message.contains("boom")),
        "expected API error, got {result:?}"
    );
}

#[tokio::test]
async fn create_comment_posts_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{REPO_PATH}/7/comments")))
        .and(body_json(json!({ "body": "hello" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1,
            "body": "hello",
            "user": { "login": "release-bot" },
            "html_url": "https://github.com/octo/repo/pull/7#issuecomment-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    tracker_for(&server)
        .create_comment(&issue(), "hello")
        .await
        .expect("comment should post");
}

#[tokio::test]
async fn add_label_posts_label_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{REPO_PATH}/7/labels")))
        .and(body_json(json!({ "labels": ["release-note"] })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "name": "release-note" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    tracker_for(&server)
        .add_label(&issue(), "release-note")
        .await
        .expect("label should be added");
}

#[rstest]
#[case::removed(200)]
#[case::already_gone(404)]
#[tokio::test]
async fn remove_label_encodes_name_and_tolerates_missing(#[case] status: u16) {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path_regex(
            r"^/api/v3/repos/octo/repo/issues/7/labels/do-not-merge%2[Ff]release-note-label-needed$",
        ))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    tracker_for(&server)
        .remove_label(&issue(), "do-not-merge/release-note-label-needed")
        .await
        .expect("removal should succeed");
}

#[tokio::test]
async fn remove_label_rejected_token_is_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("{REPO_PATH}/7/labels/release-note")))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })),
        )
        .mount(&server)
        .await;

    let result = tracker_for(&server).remove_label(&issue(), "release-note").await;

    assert!(
        matches!(result, Err(TrackerError::Authentication { ref message }) if message.contains("Bad credentials")),
        "expected authentication error, got {result:?}"
    );
}

#[tokio::test]
async fn labels_are_listed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{REPO_PATH}/7/labels")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "release-note" },
            { "name": "lgtm" }
        ])))
        .mount(&server)
        .await;

    let labels = tracker_for(&server)
        .labels(&issue())
        .await
        .expect("labels should load");

    let names: Vec<&str> = labels.iter().map(|label| label.name.as_str()).collect();
    assert_eq!(names, vec!["release-note", "lgtm"]);
}

#[tokio::test]
async fn comments_tolerate_missing_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{REPO_PATH}/7/comments")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "body": "/release-note-none", "user": { "login": "alice" } },
            { "id": 2, "body": null, "user": null }
        ])))
        .mount(&server)
        .await;

    let comments = tracker_for(&server)
        .comments(&issue())
        .await
        .expect("comments should load");

    assert_eq!(
        comments,
        vec![
            IssueComment {
                id: 1,
                body: "/release-note-none".to_owned(),
                author: "alice".to_owned(),
                html_url: None,
            },
            IssueComment {
                id: 2,
                body: String::new(),
                author: String::new(),
                html_url: None,
            },
        ]
    );
}

#[tokio::test]
async fn only_stale_comments_are_deleted() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v3/repos/octo/repo/issues/comments/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/api/v3/repos/octo/repo/issues/comments/[13]$"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let comment = |id: u64, author: &str, body: &str| IssueComment {
        id,
        body: body.to_owned(),
        author: author.to_owned(),
        html_url: None,
    };
    let comments = vec![
        comment(1, "release-bot", "/retest"),
        comment(2, "release-bot", "@alice: ADVISORY text"),
        comment(3, "alice", "quoting ADVISORY"),
    ];
    let predicate = StaleCommentPredicate::new("release-bot".to_owned(), vec!["ADVISORY".to_owned()]);

    tracker_for(&server)
        .delete_stale_comments(&issue(), &comments, &predicate)
        .await
        .expect("deletion should succeed");
}

#[tokio::test]
async fn failed_deletion_is_reported_after_all_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v3/repos/octo/repo/issues/comments/1"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "message": "nope" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v3/repos/octo/repo/issues/comments/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let comments: Vec<IssueComment> = [1, 2]
        .into_iter()
        .map(|id| IssueComment {
            id,
            body: "ADVISORY".to_owned(),
            author: "release-bot".to_owned(),
            html_url: None,
        })
        .collect();
    let predicate = StaleCommentPredicate::new("release-bot".to_owned(), vec!["ADVISORY".to_owned()]);

    let result = tracker_for(&server)
        .delete_stale_comments(&issue(), &comments, &predicate)
        .await;

    assert!(
        matches!(result, Err(TrackerError::Api { ref message }) if message.contains("nope")),
        "got {result:?}"
    );
}

#[tokio::test]
async fn bot_name_is_fetched_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "login": "release-bot" })))
        .expect(1)
        .mount(&server)
        .await;

    let tracker = tracker_for(&server);
    let first = tracker.bot_name().await.expect("login should load");
    let second = tracker.bot_name().await.expect("login should be cached");

    assert_eq!(first, "release-bot");
    assert_eq!(second, "release-bot");
}

#[tokio::test]
async fn configured_bot_name_skips_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "login": "someone" })))
        .expect(0)
        .mount(&server)
        .await;

    let tracker = tracker_for(&server).with_bot_name("k8s-ci-robot".to_owned());

    assert_eq!(tracker.bot_name().await, Ok("k8s-ci-robot".to_owned()));
}
