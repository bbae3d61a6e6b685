use roomchat_client::{ChatSession, ClientConfig, SessionOptions, SessionStatus, WsConnector};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Minimal terminal host: mounts one chat session, pumps its transport events,
/// and turns stdin lines into commands.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomchat=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ClientConfig::from_env();
    let options = SessionOptions::from_env();
    info!(
        "Loaded configuration: endpoint={}, username={}",
        config.endpoint, options.username
    );

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let connector = WsConnector::new(event_tx);
    let mut session = ChatSession::new(options.clone(), config.endpoint.clone(), connector);

    println!(
        "{} — /join <room>, /leave, /quit, anything else is sent to the room",
        options.title
    );
    if let Ok(room) = std::env::var("CHAT_ROOM") {
        session.connect(&room);
    }

    let mut printed = 0usize;
    let mut last_status = session.status();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            event = event_rx.recv() => {
                let Some(event) = event else { break };
                session.handle_event(event.generation, event.event);

                // Print transcript growth; a shrink means reset-on-disconnect.
                let transcript = session.transcript();
                if transcript.len() < printed {
                    printed = 0;
                }
                for line in &transcript[printed..] {
                    println!("{line}");
                }
                printed = transcript.len();

                if session.status() != last_status {
                    last_status = session.status();
                    match last_status {
                        SessionStatus::Connected => println!("* connected"),
                        SessionStatus::Disconnected => println!("* disconnected"),
                    }
                }
            }
            line = lines.next_line() => {
                let Ok(Some(line)) = line else { break };
                let line = line.trim();
                if let Some(room) = line.strip_prefix("/join ") {
                    session.connect(room);
                    printed = 0;
                } else if line == "/leave" {
                    session.disconnect();
                    printed = 0;
                } else if line == "/quit" {
                    break;
                } else {
                    session.send(line);
                }
            }
        }
    }

    session.disconnect();
    Ok(())
}
