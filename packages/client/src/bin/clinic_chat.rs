//! Interactive chat driver for the clinic chat session.
//!
//! Connects to the chat endpoint, prints what the remote user sends and sends
//! every line typed at the prompt.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin clinic-chat -- --endpoint ws://127.0.0.1:8080/chat
//! cargo run --bin clinic-chat -- --appointments
//! ```

use clap::Parser;
use clinic_chat_client::{
    ChatConfig, ChatError, ChatSession, Origin, SessionEvent,
    config::{DEFAULT_ENDPOINT, DEFAULT_LOCAL_PARTICIPANT, DEFAULT_REMOTE_PARTICIPANT},
    domain::{AppointmentError, AppointmentRepository},
    infrastructure::repository::InMemoryAppointmentRepository,
};
use clinic_chat_shared::{logger::setup_logger, time::timestamp_to_jst_rfc3339};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::{broadcast::error::RecvError, mpsc};

#[derive(Debug, Parser)]
#[command(name = "clinic-chat", version, about = "Chat sheet of the clinic scheduling app")]
struct Args {
    /// WebSocket endpoint to connect to
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Name shown for your messages
    #[arg(long, default_value = DEFAULT_LOCAL_PARTICIPANT)]
    local_name: String,

    /// Name shown for received messages
    #[arg(long, default_value = DEFAULT_REMOTE_PARTICIPANT)]
    remote_name: String,

    /// Print the bundled appointment list and exit
    #[arg(long)]
    appointments: bool,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");
    let args = Args::parse();

    if args.appointments {
        if let Err(e) = print_appointments() {
            tracing::error!("Appointment error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = run(args).await {
        tracing::error!("Chat error: {}", e);
        std::process::exit(1);
    }
}

fn print_appointments() -> Result<(), AppointmentError> {
    let repository = InMemoryAppointmentRepository::bundled()?;
    for a in repository.all() {
        let conflict = if a.has_conflict { "  [conflict]" } else { "" };
        println!(
            "#{:<4} {} {}-{} ({:>3} min)  {:<9} {:<12} {} / {}{}",
            a.id.as_str(),
            a.date,
            a.start_time.format("%H:%M"),
            a.end_time.format("%H:%M"),
            a.duration_minutes(),
            a.period,
            a.room,
            a.title,
            a.patient_name,
            conflict
        );
    }
    Ok(())
}

async fn run(args: Args) -> Result<(), ChatError> {
    let config = ChatConfig::default()
        .with_endpoint(args.endpoint)
        .with_local_participant(args.local_name)
        .with_remote_participant(args.remote_name);
    let session = ChatSession::websocket(config)?;
    let mut events = session.subscribe();

    session.connect().await?;
    println!(
        "*** connected to {} as {} (type /quit to leave)",
        session.endpoint(),
        session.local_participant()
    );

    // rustyline blocks; keep it off the runtime.
    let (line_tx, mut line_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || read_lines(line_tx));

    loop {
        tokio::select! {
            line = line_rx.recv() => match line {
                Some(line) if line.trim() == "/quit" => break,
                Some(line) if line.is_empty() => continue,
                Some(line) => {
                    if let Err(e) = session.send(line).await {
                        println!("*** not sent: {e}");
                    }
                }
                None => break,
            },
            event = events.recv() => match event {
                Ok(SessionEvent::EntryAppended(entry)) if entry.origin() == Origin::Remote => {
                    println!(
                        "[{}] <{}> {}",
                        timestamp_to_jst_rfc3339(entry.created_at().value()),
                        entry.author(),
                        entry.text()
                    );
                }
                Ok(SessionEvent::StateChanged(state)) if state.is_terminal() => {
                    println!("*** connection {state}");
                    break;
                }
                Ok(SessionEvent::Error(e)) => println!("*** {e}"),
                Ok(_) => {}
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!("Missed {} session events", missed);
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    session.disconnect().await;
    println!("*** leaving chat");
    Ok(())
}

fn read_lines(tx: mpsc::UnboundedSender<String>) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            tracing::error!("Failed to start line editor: {}", e);
            return;
        }
    };

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                if tx.send(line).is_err() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                tracing::error!("Failed to read line: {}", e);
                break;
            }
        }
    }
}
