//! Scenario state for release-note labelling behavioural tests.

use std::cell::RefCell;
use std::rc::Rc;

use relnote::releasenote::test_support::RecordingTracker;
use relnote::{ReleaseNoteReconciler, ReleaseNoteSettings, WebhookEvent};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use serde_json::{Value, json};
use tokio::runtime::Runtime;

/// Number of the pull request every scenario acts on.
pub(crate) const PR_NUMBER: u64 = 42;

/// Error type shared by the step definitions.
pub(crate) type StepResult = Result<(), Box<dyn std::error::Error>>;

/// Shared runtime wrapper that can be stored in an rstest-bdd Slot.
#[derive(Clone)]
pub(crate) struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

/// Shared scenario state for release-note labelling.
#[derive(ScenarioState, Default)]
pub(crate) struct LabelingState {
    runtime: Slot<SharedRuntime>,
    /// Tracker holding labels and comments.
    pub(crate) tracker: Slot<RecordingTracker>,
    /// Branch the pull request targets.
    pub(crate) base_ref: Slot<String>,
    /// Pull request description.
    pub(crate) body: Slot<String>,
}

impl LabelingState {
    /// Replaces the tracker with `update` applied to it.
    pub(crate) fn update_tracker(&self, update: impl FnOnce(RecordingTracker) -> RecordingTracker) {
        let tracker = self.tracker.take().unwrap_or_default();
        self.tracker.set(update(tracker));
    }

    /// Current label names on the scenario pull request.
    pub(crate) fn labels(&self) -> Vec<String> {
        self.tracker
            .with_ref(|tracker| tracker.label_names(PR_NUMBER))
            .unwrap_or_default()
    }

    fn runtime(&self) -> Result<SharedRuntime, std::io::Error> {
        if self.runtime.with_ref(|_| ()).is_none() {
            self.runtime.set(SharedRuntime::new(Runtime::new()?));
        }
        self.runtime
            .get()
            .ok_or_else(|| std::io::Error::other("runtime not initialised after set"))
    }

    fn repository() -> Value {
        json!({ "name": "kubernetes", "owner": { "login": "kubernetes" } })
    }

    fn label_payload(&self) -> Vec<Value> {
        self.labels()
            .into_iter()
            .map(|name| json!({ "name": name }))
            .collect()
    }

    /// Delivers a `pull_request` event with the given action.
    pub(crate) fn deliver_pull_request(&self, action: &str) -> StepResult {
        let payload = json!({
            "action": action,
            "number": PR_NUMBER,
            "pull_request": {
                "body": self.body.get().unwrap_or_default(),
                "user": { "login": "author" },
                "base": { "ref": self.base_ref.get().unwrap_or_else(|| "master".to_owned()) },
                "labels": self.label_payload(),
            },
            "repository": Self::repository(),
        });
        self.deliver("pull_request", &payload)
    }

    /// Delivers an `issue_comment` event from `commenter`.
    pub(crate) fn deliver_comment(&self, commenter: &str, text: &str) -> StepResult {
        let payload = json!({
            "action": "created",
            "issue": {
                "number": PR_NUMBER,
                "body": self.body.get().unwrap_or_default(),
                "user": { "login": "author" },
                "labels": self.label_payload(),
                "pull_request": { "url": "https://api.github.com/repos/kubernetes/kubernetes/pulls/42" },
            },
            "comment": {
                "id": 1,
                "body": text,
                "user": { "login": commenter },
                "html_url": "https://github.com/kubernetes/kubernetes/pull/42#issuecomment-1",
            },
            "repository": Self::repository(),
        });
        self.deliver("issue_comment", &payload)
    }

    fn deliver(&self, name: &str, payload: &Value) -> StepResult {
        let event = WebhookEvent::parse(name, &payload.to_string())?;
        let runtime = self.runtime()?;
        self.update_tracker(|tracker| tracker);
        let outcome = self.tracker.with_ref(|tracker| {
            let reconciler = ReleaseNoteReconciler::new(tracker, ReleaseNoteSettings::default());
            runtime.block_on(async {
                match &event {
                    WebhookEvent::IssueComment(comment) => reconciler.handle_comment(comment).await,
                    WebhookEvent::PullRequest(pull_request) => {
                        reconciler.handle_pull_request(pull_request).await
                    }
                    WebhookEvent::Ignored { .. } => Ok(()),
                }
            })
        });
        match outcome {
            Some(result) => Ok(result?),
            None => Err("tracker not initialised".into()),
        }
    }
}
