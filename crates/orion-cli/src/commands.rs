//! Command handlers. Each loads what it needs from the configured paths,
//! works through an [`EditorSession`] or the interpreter, and writes back.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::rc::Rc;

use anyhow::{anyhow, bail, Context, Result};
use orion_codegen::{Dialect, EmitOptions};
use orion_core::{Node, NodeKind};
use orion_runtime::{
    EventOutcome, HttpOptions, InteractionEvent, Interpreter, Mode, Outcome, ReqwestClient, VariableStore,
};
use orion_schema::{initial_schema, TemplateRegistry};
use orion_services::{EditorSession, GeminiGenerator, GeminiOptions, JsonFileStore, ProjectStore};
use serde_json::{Map, Value};

use crate::config::OrionConfig;
use crate::outline::outline;
use crate::EventArg;

pub fn init(config: &OrionConfig, force: bool) -> Result<()> {
    let path = &config.storage.schema_path;
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let schema = initial_schema();
    save_schema(path, &schema)?;
    println!("Wrote {} ({} nodes)", path.display(), schema.len());
    Ok(())
}

pub fn templates() -> Result<()> {
    for template in TemplateRegistry::builtin().iter() {
        println!("{:<12} {:<16} {} nodes", template.id, template.name, template.schema.len());
    }
    Ok(())
}

pub fn add(config: &OrionConfig, kind: &str, parent: Option<&str>, template: bool) -> Result<()> {
    let mut session = open_session(config)?;
    if let Some(parent) = parent {
        if !session.select(parent) {
            bail!("no node with id '{parent}'");
        }
    }
    let id = if template {
        session.add_template(kind)?
    } else {
        let kind = NodeKind::from_name(kind).ok_or_else(|| {
            let known: Vec<_> = NodeKind::ALL.iter().map(NodeKind::name).collect();
            anyhow!("unknown component kind '{kind}' (expected one of: {})", known.join(", "))
        })?;
        session.add_node(kind)?
    };
    save_schema(&config.storage.schema_path, session.tree())?;
    println!("{id}");
    Ok(())
}

pub fn set(config: &OrionConfig, id: &str, key: &str, value: &str) -> Result<()> {
    let mut session = open_session(config)?;
    let mut props = Map::new();
    props.insert(key.to_string(), parse_value(value));
    session.set_props(id, props)?;
    save_schema(&config.storage.schema_path, session.tree())
}

pub fn delete(config: &OrionConfig, id: &str) -> Result<()> {
    let mut session = open_session(config)?;
    if !session.select(id) {
        bail!("no node with id '{id}'");
    }
    session.delete_selected()?;
    save_schema(&config.storage.schema_path, session.tree())
}

pub fn export(config: &OrionConfig, dialect: &str, out: Option<&Path>, component: Option<String>) -> Result<()> {
    let dialect: Dialect = dialect.parse()?;
    let mut options = EmitOptions::new();
    if let Some(name) = component {
        options = options.with_component_name(name);
    }
    let source = open_session(config)?.export(dialect, &options);
    match out {
        Some(path) => {
            fs::write(path, source).with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(dialect = %dialect, path = %path.display(), "exported");
        }
        None => println!("{source}"),
    }
    Ok(())
}

pub fn preview(config: &OrionConfig, interactive: bool, select: Option<&str>) -> Result<()> {
    let mut session = open_session(config)?;
    if let Some(id) = select {
        if !session.select(id) {
            bail!("no node with id '{id}'");
        }
    }
    if interactive {
        session.set_mode(Mode::Interactive);
    }
    let store = load_store(&config.storage.state_path)?;
    match session.render(&store) {
        Some(root) => println!("{}", outline(&root)),
        None => println!("(root is hidden)"),
    }
    Ok(())
}

pub async fn fire(config: &OrionConfig, id: &str, event: EventArg, value: Option<&str>) -> Result<()> {
    let schema = load_schema(&config.storage.schema_path)?;
    let store = load_store(&config.storage.state_path)?;
    let mut http = HttpOptions::new().with_timeout(config.network.timeout());
    if let Some(agent) = &config.network.user_agent {
        http = http.with_user_agent(agent.clone());
    }
    let interpreter = Interpreter::new(store.clone(), Rc::new(ReqwestClient::new(&http)?));

    let event = match event {
        EventArg::Select => InteractionEvent::Select,
        EventArg::Click => InteractionEvent::Click,
        EventArg::Hover => InteractionEvent::Hover,
        EventArg::Blur => InteractionEvent::Blur,
        EventArg::Change => {
            let value = value.ok_or_else(|| anyhow!("`change` needs --value"))?;
            InteractionEvent::ValueChange(parse_value(value))
        }
    };

    match interpreter.handle_event(&schema, Mode::Interactive, id, event) {
        EventOutcome::Selected(id) => println!("selected {id}"),
        EventOutcome::Ignored => println!("no effect"),
        EventOutcome::ValueWritten { variable } => println!("wrote {variable}"),
        EventOutcome::Action(Outcome::Applied) => println!("applied"),
        EventOutcome::Action(Outcome::Notified(message)) => println!("alert: {message}"),
        EventOutcome::Action(Outcome::Inert) => println!("action is incomplete; nothing done"),
        EventOutcome::Action(Outcome::Pending(request)) => {
            let url = request.url().to_string();
            let target = request.target().map(str::to_string);
            if request.resolve().await {
                println!("{url} -> {}", target.unwrap_or_default());
            } else {
                println!("{url} -> no change");
            }
        }
    }
    save_store(&config.storage.state_path, &store)
}

pub fn save_project(config: &OrionConfig, name: &str) -> Result<()> {
    let session = open_session(config)?;
    let mut store = JsonFileStore::new(&config.storage.projects_path);
    let project = session.save_project(&mut store, name)?;
    println!("{}", project.id);
    Ok(())
}

pub fn list_projects(config: &OrionConfig) -> Result<()> {
    let store = JsonFileStore::new(&config.storage.projects_path);
    for project in store.list_projects()? {
        let saved = project
            .saved_at_utc()
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!("{:<16} {:<17} {:>4} nodes  {}", project.id, saved, project.schema.len(), project.name);
    }
    Ok(())
}

pub fn show_project(config: &OrionConfig, id: &str) -> Result<()> {
    let store = JsonFileStore::new(&config.storage.projects_path);
    let project = store
        .load_project(id)?
        .ok_or_else(|| anyhow!("no saved project with id '{id}'"))?;
    println!("{}", serde_json::to_string_pretty(&project.schema)?);
    Ok(())
}

pub fn load_project(config: &OrionConfig, id: &str) -> Result<()> {
    let mut session = open_session(config)?;
    let store = JsonFileStore::new(&config.storage.projects_path);
    let project = session.load_project(&store, id)?;
    save_schema(&config.storage.schema_path, session.tree())?;
    println!("Loaded '{}' into {}", project.name, config.storage.schema_path.display());
    Ok(())
}

pub async fn generate_items(config: &OrionConfig, id: &str, prompt: &str) -> Result<()> {
    let key_env = &config.ai.api_key_env;
    let api_key = std::env::var(key_env).with_context(|| format!("set {key_env} to use AI generation"))?;
    let mut options = GeminiOptions::new();
    if let Some(endpoint) = &config.ai.endpoint {
        options = options.with_endpoint(endpoint.clone());
    }
    if let Some(model) = &config.ai.model {
        options = options.with_model(model.clone());
    }
    let generator = GeminiGenerator::new(api_key, options)?;

    let mut session = open_session(config)?;
    let count = session.fill_list(&generator, id, prompt).await?;
    save_schema(&config.storage.schema_path, session.tree())?;
    println!("Filled {id} with {count} items");
    Ok(())
}

fn open_session(config: &OrionConfig) -> Result<EditorSession> {
    Ok(EditorSession::new(load_schema(&config.storage.schema_path)?))
}

fn load_schema(path: &Path) -> Result<Node> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {} (run `orion init` first?)", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn save_schema(path: &Path, schema: &Node) -> Result<()> {
    write_json(path, &serde_json::to_string_pretty(schema)?)
}

fn load_store(path: &Path) -> Result<VariableStore> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(VariableStore::new()),
        Err(err) => return Err(err).with_context(|| format!("failed to read {}", path.display())),
    };
    let snapshot: Map<String, Value> =
        serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(VariableStore::from_snapshot(snapshot))
}

fn save_store(path: &Path, store: &VariableStore) -> Result<()> {
    write_json(path, &serde_json::to_string_pretty(&store.snapshot())?)
}

fn write_json(path: &Path, raw: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, raw).with_context(|| format!("failed to write {}", path.display()))
}

/// JSON if it parses, otherwise the text itself.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
