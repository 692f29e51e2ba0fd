use crate::api::ActivitiesApi;
use crate::model::{Catalog, MutationReply};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
    Info,
}

impl MessageKind {
    pub fn css_class(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
            MessageKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: MessageKind,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, kind: MessageKind) -> Self {
        Self { text: text.into(), kind }
    }
}

/// Effects the controller has on the page.
pub trait ActivityView {
    fn show_catalog(&self, catalog: Catalog);
    fn show_load_failure(&self);
    fn show_message(&self, message: StatusMessage);
    fn reset_form(&self);
}

pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Asks the browser via `window.confirm`.
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }
}

pub struct Controller<A, V> {
    api: A,
    view: V,
}

impl<A: ActivitiesApi, V: ActivityView> Controller<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self { api, view }
    }

    pub async fn fetch_activities(&self) {
        match self.api.list_activities().await {
            Ok(catalog) => self.view.show_catalog(catalog),
            Err(e) => {
                self.view.show_load_failure();
                log::error!("Error fetching activities: {e}");
            }
        }
    }

    pub async fn submit_signup(&self, activity: &str, email: &str) {
        match self.api.signup(activity, email).await {
            Ok(MutationReply::Accepted(body)) => {
                self.view.show_message(StatusMessage::new(body.message, MessageKind::Success));
                self.view.reset_form();
                self.fetch_activities().await;
            }
            Ok(MutationReply::Rejected { status, body }) => {
                log::debug!("signup for {activity} rejected with {status}");
                let text = body
                    .detail
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| "An error occurred".into());
                self.view.show_message(StatusMessage::new(text, MessageKind::Error));
            }
            Err(e) => {
                log::error!("Error signing up: {e}");
                self.view.show_message(StatusMessage::new(
                    "Failed to sign up. Please try again.",
                    MessageKind::Error,
                ));
            }
        }
    }

    /// Returns without touching the network if the user declines the prompt.
    pub async fn remove_participant<C: Confirm>(&self, confirm: &C, activity: &str, email: &str) {
        if !confirm.confirm(&format!("Remove {email} from {activity}?")) {
            return;
        }

        match self.api.remove_participant(activity, email).await {
            Ok(MutationReply::Accepted(body)) => {
                self.view.show_message(StatusMessage::new(body.message, MessageKind::Success));
                self.fetch_activities().await;
            }
            Ok(MutationReply::Rejected { status, body }) => {
                log::debug!("removal from {activity} rejected with {status}");
                let text = body
                    .detail
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| "Failed to remove participant".into());
                self.view.show_message(StatusMessage::new(text, MessageKind::Error));
            }
            Err(e) => {
                log::error!("Error removing participant: {e}");
                self.view.show_message(StatusMessage::new(
                    "Failed to remove participant. Please try again.",
                    MessageKind::Error,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClientError, ClientResult};
    use crate::model::{ErrorResponse, MessageResponse};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    const CHESS: &str = r#"{"Chess Club": {"description":"d","schedule":"s","max_participants":2,"participants":["a@x.com"]}}"#;

    #[derive(Default)]
    struct FakeApi {
        calls: RefCell<Vec<String>>,
        catalogs: RefCell<VecDeque<ClientResult<Catalog>>>,
        replies: RefCell<VecDeque<ClientResult<MutationReply>>>,
    }

    impl FakeApi {
        fn with_catalog(self, json: &str) -> Self {
            self.catalogs.borrow_mut().push_back(Catalog::from_json(json));
            self
        }

        fn with_reply(self, reply: ClientResult<MutationReply>) -> Self {
            self.replies.borrow_mut().push_back(reply);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn next_reply(&self) -> ClientResult<MutationReply> {
            self.replies.borrow_mut().pop_front().expect("unexpected mutation call")
        }
    }

    impl ActivitiesApi for &FakeApi {
        async fn list_activities(&self) -> ClientResult<Catalog> {
            self.calls.borrow_mut().push("GET /activities".into());
            self.catalogs.borrow_mut().pop_front().unwrap_or_else(|| Err(ClientError::Status(500)))
        }

        async fn signup(&self, activity: &str, email: &str) -> ClientResult<MutationReply> {
            self.calls.borrow_mut().push(format!("POST {activity} {email}"));
            self.next_reply()
        }

        async fn remove_participant(&self, activity: &str, email: &str) -> ClientResult<MutationReply> {
            self.calls.borrow_mut().push(format!("DELETE {activity} {email}"));
            self.next_reply()
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Effect {
        Catalog(Vec<String>),
        LoadFailure,
        Message(StatusMessage),
        ResetForm,
    }

    #[derive(Clone, Default)]
    struct RecordingView {
        effects: Rc<RefCell<Vec<Effect>>>,
    }

    impl RecordingView {
        fn effects(&self) -> Vec<Effect> {
            self.effects.borrow().clone()
        }
    }

    impl ActivityView for RecordingView {
        fn show_catalog(&self, catalog: Catalog) {
            let names = catalog.names().map(str::to_string).collect();
            self.effects.borrow_mut().push(Effect::Catalog(names));
        }

        fn show_load_failure(&self) {
            self.effects.borrow_mut().push(Effect::LoadFailure);
        }

        fn show_message(&self, message: StatusMessage) {
            self.effects.borrow_mut().push(Effect::Message(message));
        }

        fn reset_form(&self) {
            self.effects.borrow_mut().push(Effect::ResetForm);
        }
    }

    struct Answer(bool);

    impl Confirm for Answer {
        fn confirm(&self, _prompt: &str) -> bool {
            self.0
        }
    }

    fn accepted(message: &str) -> ClientResult<MutationReply> {
        Ok(MutationReply::Accepted(MessageResponse { message: message.into() }))
    }

    fn rejected(status: u16, detail: Option<&str>) -> ClientResult<MutationReply> {
        Ok(MutationReply::Rejected {
            status,
            body: ErrorResponse { detail: detail.map(str::to_string) },
        })
    }

    #[test]
    fn test_message_kind_css_classes() {
        assert_eq!(MessageKind::Success.css_class(), "success");
        assert_eq!(MessageKind::Error.css_class(), "error");
        assert_eq!(MessageKind::Info.css_class(), "info");
    }

    #[tokio::test]
    async fn test_fetch_renders_catalog() {
        let api = FakeApi::default().with_catalog(CHESS);
        let view = RecordingView::default();
        Controller::new(&api, view.clone()).fetch_activities().await;

        assert_eq!(view.effects(), vec![Effect::Catalog(vec!["Chess Club".into()])]);
    }

    #[tokio::test]
    async fn test_fetch_failure_shows_list_message() {
        let api = FakeApi::default().with_catalog("<html>oops</html>");
        let view = RecordingView::default();
        Controller::new(&api, view.clone()).fetch_activities().await;

        assert_eq!(view.effects(), vec![Effect::LoadFailure]);
    }

    #[tokio::test]
    async fn test_signup_success_resets_and_refetches() {
        let api = FakeApi::default()
            .with_reply(accepted("Signed up a@x.com for Chess Club"))
            .with_catalog(CHESS);
        let view = RecordingView::default();
        Controller::new(&api, view.clone()).submit_signup("Chess Club", "a@x.com").await;

        assert_eq!(api.calls(), vec!["POST Chess Club a@x.com", "GET /activities"]);
        assert_eq!(
            view.effects(),
            vec![
                Effect::Message(StatusMessage::new("Signed up a@x.com for Chess Club", MessageKind::Success)),
                Effect::ResetForm,
                Effect::Catalog(vec!["Chess Club".into()]),
            ]
        );
    }

    #[tokio::test]
    async fn test_signup_full_activity_keeps_form() {
        let api = FakeApi::default().with_reply(rejected(409, Some("Activity full")));
        let view = RecordingView::default();
        Controller::new(&api, view.clone()).submit_signup("Chess Club", "b@x.com").await;

        assert_eq!(
            view.effects(),
            vec![Effect::Message(StatusMessage::new("Activity full", MessageKind::Error))]
        );
        assert!(!view.effects().contains(&Effect::ResetForm));
        assert_eq!(api.calls(), vec!["POST Chess Club b@x.com"]);
    }

    #[tokio::test]
    async fn test_signup_rejection_without_detail_uses_generic_text() {
        let api = FakeApi::default().with_reply(rejected(500, None));
        let view = RecordingView::default();
        Controller::new(&api, view.clone()).submit_signup("Chess Club", "b@x.com").await;

        assert_eq!(
            view.effects(),
            vec![Effect::Message(StatusMessage::new("An error occurred", MessageKind::Error))]
        );
    }

    #[tokio::test]
    async fn test_signup_rejection_with_empty_detail_uses_generic_text() {
        let api = FakeApi::default().with_reply(rejected(400, Some("")));
        let view = RecordingView::default();
        Controller::new(&api, view.clone()).submit_signup("Chess Club", "b@x.com").await;

        assert_eq!(
            view.effects(),
            vec![Effect::Message(StatusMessage::new("An error occurred", MessageKind::Error))]
        );
    }

    #[tokio::test]
    async fn test_signup_accepted_without_message_still_refetches() {
        let api = FakeApi::default()
            .with_reply(MutationReply::from_parts(true, 200, "{}"))
            .with_catalog(CHESS);
        let view = RecordingView::default();
        Controller::new(&api, view.clone()).submit_signup("Chess Club", "b@x.com").await;

        assert_eq!(api.calls(), vec!["POST Chess Club b@x.com", "GET /activities"]);
        assert!(view.effects().contains(&Effect::ResetForm));
    }

    #[tokio::test]
    async fn test_signup_network_failure() {
        let api = FakeApi::default()
            .with_reply(Err(gloo_net::Error::GlooError("connection refused".into()).into()));
        let view = RecordingView::default();
        Controller::new(&api, view.clone()).submit_signup("Chess Club", "b@x.com").await;

        assert_eq!(
            view.effects(),
            vec![Effect::Message(StatusMessage::new(
                "Failed to sign up. Please try again.",
                MessageKind::Error
            ))]
        );
    }

    #[tokio::test]
    async fn test_declined_removal_makes_no_requests() {
        let api = FakeApi::default();
        let view = RecordingView::default();
        Controller::new(&api, view.clone())
            .remove_participant(&Answer(false), "Chess Club", "a@x.com")
            .await;

        assert!(api.calls().is_empty());
        assert!(view.effects().is_empty());
    }

    #[tokio::test]
    async fn test_removal_success_shows_message_and_refetches() {
        let api = FakeApi::default().with_reply(accepted("Removed")).with_catalog(CHESS);
        let view = RecordingView::default();
        Controller::new(&api, view.clone())
            .remove_participant(&Answer(true), "Chess Club", "a@x.com")
            .await;

        assert_eq!(api.calls(), vec!["DELETE Chess Club a@x.com", "GET /activities"]);
        assert_eq!(
            view.effects(),
            vec![
                Effect::Message(StatusMessage::new("Removed", MessageKind::Success)),
                Effect::Catalog(vec!["Chess Club".into()]),
            ]
        );
    }

    #[tokio::test]
    async fn test_removal_of_missing_participant() {
        let api = FakeApi::default().with_reply(rejected(404, Some("Participant not found")));
        let view = RecordingView::default();
        Controller::new(&api, view.clone())
            .remove_participant(&Answer(true), "Chess Club", "ghost@x.com")
            .await;

        assert_eq!(
            view.effects(),
            vec![Effect::Message(StatusMessage::new("Participant not found", MessageKind::Error))]
        );
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_removal_rejection_with_empty_detail_uses_generic_text() {
        let api = FakeApi::default().with_reply(rejected(404, Some("")));
        let view = RecordingView::default();
        Controller::new(&api, view.clone())
            .remove_participant(&Answer(true), "Chess Club", "ghost@x.com")
            .await;

        assert_eq!(
            view.effects(),
            vec![Effect::Message(StatusMessage::new("Failed to remove participant", MessageKind::Error))]
        );
    }

    #[tokio::test]
    async fn test_removal_with_unreadable_body() {
        let api = FakeApi::default().with_reply(MutationReply::from_parts(false, 502, "Bad Gateway"));
        let view = RecordingView::default();
        Controller::new(&api, view.clone())
            .remove_participant(&Answer(true), "Chess Club", "a@x.com")
            .await;

        assert_eq!(
            view.effects(),
            vec![Effect::Message(StatusMessage::new(
                "Failed to remove participant. Please try again.",
                MessageKind::Error
            ))]
        );
    }
}
