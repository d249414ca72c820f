use std::sync::{Arc, OnceLock};

use anyhow::Result;
use async_trait::async_trait;
use parley::client::{AnalysisClient, DialogueClient, TranslateClient};
use parley::messages::AudioClip;
use parley::session::{
    PendingDecider, Session, SessionCommand, SessionConfig, SessionIntent, SessionServices,
};
use parley::speech::{AudioOutput, PlaybackOutcome, SpeechRecognizer};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Terminal demo has no microphone; the voice button is inert.
struct NoMicrophone;

impl SpeechRecognizer for NoMicrophone {
    fn start(&self) -> parley::Result<()> {
        Err(parley::ParleyError::Recognition(
            "No speech engine in the terminal demo".to_string(),
        ))
    }

    fn stop(&self) {}
}

/// Terminal demo cannot play audio; playback completes immediately so the
/// turn still finishes.
struct SilentSpeaker {
    session: OnceLock<mpsc::Sender<SessionCommand>>,
}

impl AudioOutput for SilentSpeaker {
    fn play(&self, clip: &AudioClip) -> parley::Result<()> {
        info!("(spoken reply: {} bytes of {})", clip.bytes.len(), clip.mime);
        if let Some(tx) = self.session.get() {
            let _ = tx.try_send(SessionCommand::PlaybackFinished(PlaybackOutcome::Completed));
        }
        Ok(())
    }

    fn stop(&self) {}
}

/// Always resend a pending message
struct AlwaysConfirm;

#[async_trait]
impl PendingDecider for AlwaysConfirm {
    async fn confirm(&self, text: &str) -> bool {
        println!("[resending pending message: {}]", text);
        true
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parley=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url =
        std::env::var("PARLEY_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());
    info!("Starting Parley session against {}", base_url);

    let speaker = Arc::new(SilentSpeaker {
        session: OnceLock::new(),
    });
    let services = SessionServices {
        dialogue: Arc::new(DialogueClient::new(base_url.clone())),
        translator: Arc::new(TranslateClient::new(base_url.clone())),
        analyzer: Arc::new(AnalysisClient::new(base_url)),
        decider: Arc::new(AlwaysConfirm),
        recognizer: Arc::new(NoMicrophone),
        speaker: speaker.clone(),
    };

    let (session, mut handle) = Session::new(SessionConfig::default(), services)?;
    let _ = speaker.session.set(handle.command_sender());
    let commands = handle.command_sender();

    tokio::spawn(session.run());

    // Render intents to the terminal
    let printer = tokio::spawn(async move {
        while let Some(intent) = handle.next_intent().await {
            match intent {
                SessionIntent::RenderUserMessage { text, .. } => println!("you  > {}", text),
                SessionIntent::RenderAgentMessage { text, .. } => println!("agent> {}", text),
                SessionIntent::ShowPlaceholder => println!("agent> ..."),
                SessionIntent::PendingNotice(text) => println!("[pending: {}]", text),
                SessionIntent::Shutdown => break,
                _ => {}
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line == "/quit" {
            commands.send(SessionCommand::Shutdown).await?;
            break;
        }
        if !line.is_empty() {
            commands.send(SessionCommand::Submit(line)).await?;
        }
    }

    printer.await?;
    Ok(())
}
