//! Signs in and prints the content board of one workspace.
//!
//! Usage:
//!
//! ```text
//! board_snapshot [config-path]
//! ```
//!
//! The configuration path falls back to `STORYBOARD_CONFIG`. Credentials
//! are read from `STORYBOARD_EMAIL` and `STORYBOARD_PASSWORD`. The
//! workspace is the configured `workspace_id`, or `STORYBOARD_WORKSPACE`
//! when the file names none.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use storyboard::board::{
    adapters::{HttpContentRepository, TracingNotifier},
    domain::{Board, HiddenItem, WorkspaceId},
    services::{BoardController, SyncOutcome},
};
use storyboard::config::ClientConfig;
use storyboard::http::ApiClient;
use storyboard::session::{
    adapters::{HttpAuthGateway, InMemoryTokenStore},
    domain::Persistence,
    ports::TokenStore,
    services::SessionService,
};
use storyboard::telemetry;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::info;

const EMAIL_ENV: &str = "STORYBOARD_EMAIL";
const PASSWORD_ENV: &str = "STORYBOARD_PASSWORD";
const WORKSPACE_ENV: &str = "STORYBOARD_WORKSPACE";

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
enum SnapshotError {
    #[error("set {EMAIL_ENV} and {PASSWORD_ENV} to sign in")]
    MissingCredentials,
    #[error("no workspace configured; set workspace_id or {WORKSPACE_ENV}")]
    MissingWorkspace,
    #[error("invalid {WORKSPACE_ENV} value '{0}'")]
    InvalidWorkspace(String),
    #[error("board could not be loaded")]
    LoadFailed,
    #[error("failed to initialise async runtime: {0}")]
    RuntimeInit(#[source] io::Error),
}

fn main() -> Result<(), BoxError> {
    let config_path = env::args_os().nth(1).map(PathBuf::from);
    let config = ClientConfig::load(config_path.as_deref())?;
    telemetry::init(config.log_filter.as_deref())?;
    let workspace = resolve_workspace(&config)?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(SnapshotError::RuntimeInit)?;
    let (board, hidden) = runtime.block_on(load_board(&config, workspace))?;

    let mut stdout = io::stdout().lock();
    write_board(&mut stdout, &board, &hidden)?;
    Ok(())
}

fn resolve_workspace(config: &ClientConfig) -> Result<WorkspaceId, SnapshotError> {
    if let Some(id) = config.workspace_id {
        return Ok(WorkspaceId::new(id));
    }
    let raw = env::var(WORKSPACE_ENV).map_err(|_| SnapshotError::MissingWorkspace)?;
    raw.trim()
        .parse()
        .map(WorkspaceId::new)
        .map_err(|_| SnapshotError::InvalidWorkspace(raw))
}

async fn load_board(
    config: &ClientConfig,
    workspace: WorkspaceId,
) -> Result<(Board, Vec<HiddenItem>), BoxError> {
    let email = env::var(EMAIL_ENV).map_err(|_| SnapshotError::MissingCredentials)?;
    let password = env::var(PASSWORD_ENV).map_err(|_| SnapshotError::MissingCredentials)?;

    let tokens = Arc::new(InMemoryTokenStore::new());
    let shared_tokens: Arc<dyn TokenStore> = Arc::<InMemoryTokenStore>::clone(&tokens);
    let client = ApiClient::new(config, shared_tokens)?;
    let session = SessionService::new(
        Arc::new(HttpAuthGateway::new(client.clone())),
        Arc::clone(&tokens),
    );
    let user = session
        .login(&email, &password, Persistence::SessionOnly)
        .await?;
    info!(
        user = user.as_ref().map_or("unknown", |signed_in| signed_in.name.as_str()),
        %workspace,
        "loading board"
    );

    let controller = BoardController::new(
        Arc::new(HttpContentRepository::new(client)),
        Arc::new(TracingNotifier),
        workspace,
    );
    match controller.load().await {
        SyncOutcome::Applied => Ok((controller.board(), controller.hidden_items())),
        SyncOutcome::Stale | SyncOutcome::Failed => Err(SnapshotError::LoadFailed.into()),
    }
}

fn write_board(out: &mut impl Write, board: &Board, hidden: &[HiddenItem]) -> io::Result<()> {
    for column in board.columns() {
        writeln!(out, "{} ({})", column.title(), column.len())?;
        for item in column.items() {
            let schedule = item.schedule_label().map_or_else(String::new, |label| {
                format!(" | {} {}", label.prefix(), label.at().format("%Y-%m-%d %H:%M"))
            });
            writeln!(
                out,
                "  #{} [{}] {} | {}{}",
                item.id(),
                item.platform(),
                item.title(),
                item.assignee_name(),
                schedule
            )?;
        }
    }
    if !hidden.is_empty() {
        writeln!(out, "Not shown ({})", hidden.len())?;
        for item in hidden {
            writeln!(out, "  #{} has unknown status '{}'", item.id, item.status)?;
        }
    }
    Ok(())
}
