//! swishbot — terminal driver for the Swish support chat widget.
//!
//! Wires the widget core to a line-based terminal: stdin lines become
//! submits, widget events render as a progressively revealed reply, and
//! EOF fires the best-effort end-of-session signal before exit.

mod cli;

use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncBufReadExt;
use tokio::sync::broadcast;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use swish_chat::{BackendClient, BackendConfig, ChatSession, ChatTransport, StoredCredentials};
use swish_common::{Message, MessageId, Sender, WidgetEvent};

#[tokio::main]
async fn main() {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("swish=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "swish=info".parse().unwrap()),
            ),
        )
        .init();

    if let Err(e) = run(args).await {
        tracing::error!("fatal: {e}");
        std::process::exit(1);
    }
}

async fn run(args: cli::Args) -> swish_common::Result<()> {
    let config = match args.backend_url {
        Some(url) => BackendConfig::new(url),
        None => BackendConfig::from_env(),
    };
    info!(backend = %config.base_url, "swishbot v{} starting", env!("CARGO_PKG_VERSION"));

    let transport: Arc<dyn ChatTransport> = Arc::new(BackendClient::new(config));
    let session = Arc::new(ChatSession::new());

    match args.token {
        Some(token) => session.attach_credential(token),
        None => session.connect_auth(&StoredCredentials::new()).await,
    }
    info!(session = %session.session_id(), authed = session.bearer().is_some(), "chat session ready");

    let renderer = tokio::spawn(render_events(Arc::clone(&session), session.subscribe()));

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    loop {
        print!("\nyou> ");
        let _ = std::io::stdout().flush();
        match lines.next_line().await? {
            Some(line) => session.submit(&*transport, &line).await,
            None => break,
        }
    }

    // Best-effort termination signal; never block exit on it.
    let signal = session.end_session_in_background(Arc::clone(&transport));
    if tokio::time::timeout(Duration::from_millis(500), signal)
        .await
        .is_err()
    {
        debug!("end-of-session signal still pending at exit");
    }
    session.close().await;
    renderer.await.ok();

    info!("session ended");
    Ok(())
}

/// Render widget events: bot replies print as they reveal, error messages
/// print whole, user messages are already on screen.
async fn render_events(
    session: Arc<ChatSession>,
    mut events: broadcast::Receiver<WidgetEvent>,
) {
    // Chars of the current bot message already printed.
    let mut shown = 0usize;
    let mut current: Option<MessageId> = None;

    loop {
        let event = match events.recv().await {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => break,
        };
        match event {
            WidgetEvent::ThinkingChanged(true) => {
                println!("swishbot is thinking...");
            }
            WidgetEvent::MessageAppended(id) => {
                let Some(message) = find_message(&session, id).await else {
                    continue;
                };
                if message.sender != Sender::Bot {
                    continue;
                }
                print!("swishbot> ");
                if message.content.is_empty() {
                    // Reveal target; updates follow.
                    current = Some(id);
                    shown = 0;
                } else {
                    // Error messages arrive complete.
                    println!("{}", message.content);
                    current = None;
                }
                let _ = std::io::stdout().flush();
            }
            WidgetEvent::MessageUpdated(id) => {
                if current != Some(id) {
                    continue;
                }
                let Some(message) = find_message(&session, id).await else {
                    continue;
                };
                let suffix: String = message.content.chars().skip(shown).collect();
                shown = message.content.chars().count();
                print!("{suffix}");
                let _ = std::io::stdout().flush();
            }
            WidgetEvent::SessionEnded => break,
            _ => {}
        }
    }
}

async fn find_message(session: &ChatSession, id: MessageId) -> Option<Message> {
    session.messages().await.into_iter().find(|m| m.id == id)
}
