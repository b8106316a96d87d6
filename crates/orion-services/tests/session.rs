//! Editor session behavior: editing, selection, sync, persistence and AI fill.

use async_trait::async_trait;
use orion_codegen::{Dialect, EmitOptions};
use orion_core::{Action, BehaviorPatch, EventSlot, ListItem, NodeKind, Props, ROOT_ID};
use orion_runtime::{Mode, VariableStore};
use orion_schema::{find, SchemaError};
use orion_services::{
    ContentGenerator, EditorSession, GenerationError, MemoryStore, SessionError, SyncHub,
};
use serde_json::{json, Map};

// ── Helpers ─────────────────────────────────────────────────────────────

struct FixedGenerator(Result<Vec<ListItem>, GenerationError>);

#[async_trait(?Send)]
impl ContentGenerator for FixedGenerator {
    async fn generate_list_items(&self, _prompt: &str) -> Result<Vec<ListItem>, GenerationError> {
        self.0.clone()
    }
}

fn item(id: &str, title: &str) -> ListItem {
    ListItem {
        id: id.into(),
        title: title.into(),
        ..Default::default()
    }
}

fn props(key: &str, value: serde_json::Value) -> Map<String, serde_json::Value> {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    map
}

// ── Editing ─────────────────────────────────────────────────────────────

#[test]
fn starts_on_dashboard_with_root_selected() {
    let session = EditorSession::default();
    assert_eq!(session.selection(), &ROOT_ID);
    assert_eq!(session.mode(), Mode::Design);
    assert!(find(session.tree(), "market-list").is_some());
}

#[test]
fn add_node_goes_under_selected_container() {
    let mut session = EditorSession::default();
    assert!(session.select("right-col"));

    let id = session.add_node(NodeKind::Slider).unwrap();
    assert!(id.as_str().starts_with("slider_"));
    let parent = find(session.tree(), "right-col").unwrap();
    assert_eq!(parent.children().last().map(|n| &n.id), Some(&id));
}

#[test]
fn add_requires_a_container_selection() {
    let mut session = EditorSession::default();
    let before = session.tree().clone();
    session.select("save-btn");

    let err = session.add_node(NodeKind::Text).unwrap_err();
    assert!(matches!(err, SessionError::Edit(SchemaError::NotAContainer(ref id)) if id == "save-btn"));
    assert_eq!(session.tree(), &before);
}

#[test]
fn add_template_inserts_fresh_copy() {
    let mut session = EditorSession::default();
    let first = session.add_template("tpl_hero").unwrap();
    let second = session.add_template("tpl_hero").unwrap();
    assert_ne!(first, second);

    let root = find(session.tree(), ROOT_ID).unwrap();
    assert_eq!(root.children().len(), 4);
    assert!(matches!(
        session.add_template("tpl_nope"),
        Err(SessionError::Edit(SchemaError::UnknownTemplate(_)))
    ));
}

#[test]
fn unknown_selection_is_ignored() {
    let mut session = EditorSession::default();
    assert!(!session.select("ghost"));
    assert_eq!(session.selection(), &ROOT_ID);
}

#[test]
fn deleting_selected_node_resets_selection_to_root() {
    let mut session = EditorSession::default();
    session.select("profile-card");
    session.delete_selected().unwrap();

    assert_eq!(session.selection(), &ROOT_ID);
    assert!(find(session.tree(), "profile-card").is_none());
    assert!(find(session.tree(), "profile-img").is_none());
}

#[test]
fn root_cannot_be_deleted() {
    let mut session = EditorSession::default();
    assert!(matches!(
        session.delete_selected(),
        Err(SessionError::Edit(SchemaError::RootProtected))
    ));
}

#[test]
fn behavior_edits_drive_interactive_render() {
    let mut session = EditorSession::default();
    session
        .set_behavior("save-btn", BehaviorPatch::new().visible_if(Some("ready")))
        .unwrap();
    session
        .set_behavior(
            "cancel-btn",
            BehaviorPatch::new().action(EventSlot::Click, Some(Action::toggle("ready"))),
        )
        .unwrap();

    let store = VariableStore::new();
    let design = session.render(&store).unwrap();
    assert!(design.find("save-btn").is_some());
    assert!(design.find(ROOT_ID).map(|n| n.selected).unwrap_or(false));

    session.set_mode(Mode::Interactive);
    assert!(session.render(&store).unwrap().find("save-btn").is_none());
    store.set("ready", json!(true));
    assert!(session.render(&store).unwrap().find("save-btn").is_some());
}

#[test]
fn export_uses_current_tree() {
    let mut session = EditorSession::default();
    session.set_props("save-btn", props("label", json!("Ship it"))).unwrap();
    for dialect in Dialect::ALL {
        assert!(session.export(*dialect, &EmitOptions::default()).contains(">Ship it</button>"));
    }
}

// ── Sync ────────────────────────────────────────────────────────────────

#[test]
fn edits_are_broadcast_and_adopted() {
    let hub = SyncHub::new();
    let mut alice = EditorSession::default();
    let mut bob = EditorSession::default();
    alice.attach_sync(hub.connect()).unwrap();
    bob.attach_sync(hub.connect()).unwrap();

    alice.set_props("title-text", props("content", json!("Shared"))).unwrap();
    assert!(!alice.pull_remote(), "a peer never hears itself");
    assert!(bob.pull_remote());
    assert_eq!(bob.tree(), alice.tree());

    // Adopting does not echo back.
    assert!(!alice.pull_remote());
}

#[test]
fn adopted_tree_resets_missing_selection() {
    let mut session = EditorSession::default();
    session.select("market-list");
    session.adopt(orion_core::Node::with_props("other-root", Props::palette(NodeKind::Container)));
    assert_eq!(session.selection(), &"other-root");
}

#[test]
fn failed_edits_are_not_broadcast() {
    let hub = SyncHub::new();
    let mut alice = EditorSession::default();
    let mut bob = EditorSession::default();
    alice.attach_sync(hub.connect()).unwrap();
    bob.attach_sync(hub.connect()).unwrap();

    alice.select("save-btn");
    assert!(alice.add_node(NodeKind::Text).is_err());
    assert!(!bob.pull_remote());
}

// ── Persistence ─────────────────────────────────────────────────────────

#[test]
fn save_and_load_projects() {
    let hub = SyncHub::new();
    let mut store = MemoryStore::new();
    let mut editor = EditorSession::default();
    let mut viewer = EditorSession::default();
    editor.attach_sync(hub.connect()).unwrap();
    viewer.attach_sync(hub.connect()).unwrap();

    let saved = editor.save_project(&mut store, "Dashboard v1").unwrap();
    editor.select("header-container");
    editor.delete_selected().unwrap();
    viewer.pull_remote();
    assert!(find(viewer.tree(), "header-container").is_none());

    let loaded = editor.load_project(&store, &saved.id).unwrap();
    assert_eq!(loaded.name, "Dashboard v1");
    assert!(find(editor.tree(), "header-container").is_some());
    assert!(viewer.pull_remote());
    assert!(find(viewer.tree(), "header-container").is_some());

    assert!(matches!(
        editor.load_project(&store, "proj_missing"),
        Err(SessionError::ProjectNotFound(_))
    ));
}

// ── AI fill ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn fill_list_replaces_items() {
    let mut session = EditorSession::default();
    let generator = FixedGenerator(Ok(vec![item("a", "Mars"), item("b", "Venus"), item("c", "Io")]));

    let count = session.fill_list(&generator, "market-list", "planets").await.unwrap();
    assert_eq!(count, 3);
    match &find(session.tree(), "market-list").unwrap().props {
        Props::DataList(list) => {
            let titles: Vec<_> = list.items.iter().map(|i| i.title.as_str()).collect();
            assert_eq!(titles, vec!["Mars", "Venus", "Io"]);
        }
        other => panic!("unexpected props {:?}", other),
    }
}

#[tokio::test]
async fn fill_list_failures() {
    let mut session = EditorSession::default();
    let before = session.tree().clone();

    let failing = FixedGenerator(Err(GenerationError));
    assert!(matches!(
        session.fill_list(&failing, "market-list", "x").await,
        Err(SessionError::Generation(GenerationError))
    ));

    let ok = FixedGenerator(Ok(vec![item("a", "A")]));
    assert!(matches!(
        session.fill_list(&ok, "save-btn", "x").await,
        Err(SessionError::NotADataList(_))
    ));
    assert!(matches!(
        session.fill_list(&ok, "ghost", "x").await,
        Err(SessionError::Edit(SchemaError::NotFound(_)))
    ));
    assert_eq!(session.tree(), &before);
}
