//! Action semantics and interaction dispatch against an in-process HTTP fake.

use async_trait::async_trait;
use orion_core::{Action, Behavior, HttpMethod, Node, NodeKind, Props};
use orion_runtime::{
    fallback_payload, EventOutcome, HttpClient, HttpResponse, InteractionEvent, Interpreter, Mode,
    NetworkError, Outcome, RecordingNotifier, VariableStore,
};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct FakeClient {
    replies: RefCell<VecDeque<orion_runtime::Result<HttpResponse>>>,
    calls: RefCell<Vec<(HttpMethod, String)>>,
}

impl FakeClient {
    fn replying(body: &str) -> Rc<Self> {
        let client = Self::default();
        client.replies.borrow_mut().push_back(Ok(HttpResponse {
            status: 200,
            body: body.to_string(),
        }));
        Rc::new(client)
    }

    fn failing() -> Rc<Self> {
        let client = Self::default();
        client
            .replies
            .borrow_mut()
            .push_back(Err(NetworkError::Connect { url: "http://localhost".into() }));
        Rc::new(client)
    }
}

#[async_trait(?Send)]
impl HttpClient for FakeClient {
    async fn fetch(&self, method: HttpMethod, url: &str) -> orion_runtime::Result<HttpResponse> {
        self.calls.borrow_mut().push((method, url.to_string()));
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(NetworkError::Timeout { url: "unscripted".into() }))
    }
}

fn interpreter(client: Rc<FakeClient>) -> Interpreter {
    Interpreter::new(VariableStore::new(), client)
}

fn api(url: &str, target: Option<&str>) -> Action {
    Action::ApiRequest {
        url: Some(url.into()),
        method: None,
        target: target.map(str::to_string),
    }
}

// ── Synchronous actions ─────────────────────────────────────────────────

#[test]
fn toggle_twice_returns_to_false() {
    let interp = interpreter(Rc::new(FakeClient::default()));
    interp.execute(&Action::toggle("a"));
    assert_eq!(interp.store().get("a"), Some(json!(true)));
    interp.execute(&Action::toggle("a"));
    assert_eq!(interp.store().get("a"), Some(json!(false)));
}

#[test]
fn toggle_flips_truthiness_of_any_value() {
    let interp = interpreter(Rc::new(FakeClient::default()));
    interp.store().set("a", json!("text"));
    interp.execute(&Action::toggle("a"));
    assert_eq!(interp.store().get("a"), Some(json!(false)));
}

#[test]
fn set_overwrites_regardless_of_prior_value() {
    let interp = interpreter(Rc::new(FakeClient::default()));
    interp.store().set("b", json!([1, 2]));
    assert!(matches!(interp.execute(&Action::set("b", "5")), Outcome::Applied));
    assert_eq!(interp.store().get("b"), Some(json!("5")));
}

#[test]
fn malformed_actions_are_inert() {
    let interp = interpreter(Rc::new(FakeClient::default()));
    let malformed = [
        Action::Toggle { target: None },
        Action::Set { target: Some("x".into()), value: None },
        Action::Set { target: None, value: Some(json!(1)) },
        Action::ApiRequest { url: None, method: None, target: Some("x".into()) },
    ];
    for action in &malformed {
        assert!(matches!(interp.execute(action), Outcome::Inert), "{:?}", action);
    }
    assert!(interp.store().is_empty());
}

#[test]
fn alert_uses_notifier_and_default_message() {
    let notifier = Rc::new(RecordingNotifier::new());
    let interp = interpreter(Rc::new(FakeClient::default())).with_notifier(notifier.clone());

    interp.execute(&Action::alert("Saved"));
    interp.execute(&Action::Alert { message: None });

    assert_eq!(notifier.take(), vec!["Saved".to_string(), "Alert!".to_string()]);
    assert!(interp.store().is_empty());
}

// ── apiRequest ──────────────────────────────────────────────────────────

#[tokio::test]
async fn api_request_stores_pretty_body() {
    let client = FakeClient::replying(r#"{"temp":21}"#);
    let interp = interpreter(client.clone());

    let outcome = interp.run(&api("https://example.com/weather", Some("weather"))).await;
    assert!(matches!(outcome, Outcome::Applied));
    assert_eq!(interp.store().get("weather"), Some(json!("{\n  \"temp\": 21\n}")));
    assert_eq!(
        client.calls.borrow().as_slice(),
        &[(HttpMethod::Get, "https://example.com/weather".to_string())]
    );
}

#[tokio::test]
async fn api_request_falls_back_on_unparseable_body() {
    let interp = interpreter(FakeClient::replying("<html>oops</html>"));
    interp.run(&api("https://example.com", Some("out"))).await;

    let stored = interp.store().get("out").unwrap();
    let parsed: Value = serde_json::from_str(stored.as_str().unwrap()).unwrap();
    assert_eq!(parsed, fallback_payload());
}

#[tokio::test]
async fn api_request_failure_leaves_store_unchanged() {
    let interp = interpreter(FakeClient::failing());
    interp.store().set("out", json!("before"));

    let outcome = interp.run(&api("https://example.com", Some("out"))).await;
    assert!(matches!(outcome, Outcome::Inert));
    assert_eq!(interp.store().get("out"), Some(json!("before")));
}

#[tokio::test]
async fn api_request_without_target_writes_nothing() {
    let client = FakeClient::replying("{}");
    let interp = interpreter(client.clone());
    interp.run(&api("https://example.com", None)).await;
    assert!(interp.store().is_empty());
    assert_eq!(client.calls.borrow().len(), 1);
}

#[tokio::test]
async fn late_response_wins_over_earlier_edit() {
    let interp = interpreter(FakeClient::replying("1"));

    let Outcome::Pending(request) = interp.execute(&api("https://example.com", Some("v"))) else {
        panic!("apiRequest should be pending");
    };
    assert_eq!(request.target(), Some("v"));

    interp.execute(&Action::set("v", "edited meanwhile"));
    assert!(request.resolve().await);
    assert_eq!(interp.store().get("v"), Some(json!("1")));
}

// ── Interaction dispatch ────────────────────────────────────────────────

fn interactive_tree() -> Node {
    let button = Node::with_props("btn", Props::palette(NodeKind::Button)).with_behavior(Behavior {
        on_click: Some(Action::toggle("open")),
        ..Default::default()
    });
    let input = Node::with_props("name", Props::palette(NodeKind::Input)).with_behavior(Behavior {
        bind: Some("username".into()),
        ..Default::default()
    });
    Node::with_props("root", Props::palette(NodeKind::Container))
        .with_child(button)
        .with_child(input)
}

#[test]
fn design_mode_only_selects() {
    let interp = interpreter(Rc::new(FakeClient::default()));
    let tree = interactive_tree();

    assert!(matches!(
        interp.handle_event(&tree, Mode::Design, "btn", InteractionEvent::Select),
        EventOutcome::Selected(id) if id == "btn"
    ));
    assert!(matches!(
        interp.handle_event(&tree, Mode::Design, "btn", InteractionEvent::Click),
        EventOutcome::Ignored
    ));
    assert!(interp.store().is_empty());
}

#[test]
fn interactive_click_and_value_change() {
    let interp = interpreter(Rc::new(FakeClient::default()));
    let tree = interactive_tree();

    let clicked = interp.handle_event(&tree, Mode::Interactive, "btn", InteractionEvent::Click);
    assert!(matches!(clicked, EventOutcome::Action(Outcome::Applied)));
    assert!(interp.store().is_truthy("open"));

    let typed = interp.handle_event(
        &tree,
        Mode::Interactive,
        "name",
        InteractionEvent::ValueChange(json!("Ada")),
    );
    assert!(matches!(typed, EventOutcome::ValueWritten { ref variable } if variable == "username"));
    assert_eq!(interp.store().get("username"), Some(json!("Ada")));

    assert!(matches!(
        interp.handle_event(&tree, Mode::Interactive, "btn", InteractionEvent::Hover),
        EventOutcome::Ignored
    ));
    assert!(matches!(
        interp.handle_event(&tree, Mode::Interactive, "ghost", InteractionEvent::Click),
        EventOutcome::Ignored
    ));
}
