//! Session orchestrator event loop
//!
//! One cooperative task serializes every state transition of a session:
//! submissions, dialogue round-trips, spoken-reply playback, speech-engine
//! events and enrichment requests. Network calls run in spawned tasks and
//! report back over an internal channel, so the loop itself never blocks on
//! I/O and a cancelled turn can discard a stale reply by token.

use crate::client::{AnalysisService, DialogueReply, DialogueService, TranslationService};
use crate::messages::{
    Author, Enrichment, EnrichmentKind, GrammarAnalysis, Message, MessageStorage,
};
use crate::session::config::SessionConfig;
use crate::session::flags::SessionFlags;
use crate::session::pending::{PendingDecider, PendingGate};
use crate::speech::{
    AudioOutput, Playback, PlaybackOutcome, SpeechEvent, SpeechRecognizer, VoiceInput,
};
use crate::{ParleyError, Result};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Commands accepted by the session
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// Submit a user message (typed or re-injected)
    Submit(String),

    /// Voice button: stop the agent if it is talking, otherwise toggle
    /// listening
    ToggleVoice,

    /// Flip the auto-mic policy
    ToggleAutoMic,

    /// Explicit "stop AI talking" action
    StopSpeaking,

    /// Request a translation panel for a message
    Translate(Uuid),

    /// Request a grammar analysis panel for a message
    Analyze(Uuid),

    /// Event from the speech-recognition engine
    Speech(SpeechEvent),

    /// The active spoken reply ended
    PlaybackFinished(PlaybackOutcome),

    /// Shut the session down
    Shutdown,
}

/// Rendering and indicator intents emitted by the session. A thin adapter
/// performs the actual rendering and audio I/O; the orchestrator never
/// touches presentation.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionIntent {
    RenderUserMessage { id: Uuid, text: String },
    ShowPlaceholder,
    RemovePlaceholder,
    RenderAgentMessage { id: Uuid, text: String },
    ListeningChanged(bool),
    BusyChanged(bool),
    SpeakingChanged(bool),
    AutoMicChanged(bool),
    PendingNotice(String),
    PendingCleared,
    EnrichmentLoading { id: Uuid, kind: EnrichmentKind, active: bool },
    TranslationRendered { id: Uuid, text: String },
    AnalysisRendered { id: Uuid, analysis: GrammarAnalysis },
    EnrichmentToggled { id: Uuid, kind: EnrichmentKind, visible: bool },
    InlineError { id: Uuid, text: String },
    Shutdown,
}

/// Completions reported back into the loop by spawned tasks
#[derive(Debug)]
enum TaskEvent {
    TurnReply {
        token: u64,
        result: Result<DialogueReply>,
    },
    TranslationDone {
        id: Uuid,
        result: Result<String>,
    },
    AnalysisDone {
        id: Uuid,
        result: Result<GrammarAnalysis>,
    },
    ResumeListen,
}

/// External collaborators of one session
pub struct SessionServices {
    pub dialogue: Arc<dyn DialogueService>,
    pub translator: Arc<dyn TranslationService>,
    pub analyzer: Arc<dyn AnalysisService>,
    pub decider: Arc<dyn PendingDecider>,
    pub recognizer: Arc<dyn SpeechRecognizer>,
    pub speaker: Arc<dyn AudioOutput>,
}

/// Handle for controlling a running session
pub struct SessionHandle {
    command_tx: mpsc::Sender<SessionCommand>,
    intent_rx: mpsc::UnboundedReceiver<SessionIntent>,
    listening: Arc<AtomicBool>,
    busy: Arc<AtomicBool>,
    speaking: Arc<AtomicBool>,
    message_count: Arc<AtomicU64>,
}

impl SessionHandle {
    /// Send a command to the session
    pub async fn send(&self, cmd: SessionCommand) -> Result<()> {
        self.command_tx
            .send(cmd)
            .await
            .map_err(|e| ParleyError::Channel(format!("Failed to send command: {}", e)))
    }

    /// Receive the next intent, waiting for one
    pub async fn next_intent(&mut self) -> Option<SessionIntent> {
        self.intent_rx.recv().await
    }

    /// Receive an intent if one is ready
    pub fn try_next_intent(&mut self) -> Option<SessionIntent> {
        self.intent_rx.try_recv().ok()
    }

    /// Get a command sender for adapters (speech engine, audio output)
    pub fn command_sender(&self) -> mpsc::Sender<SessionCommand> {
        self.command_tx.clone()
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }

    /// Number of turns started in this session
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

/// The session orchestrator
pub struct Session {
    config: SessionConfig,
    flags: SessionFlags,
    storage: MessageStorage,
    queue: VecDeque<String>,
    pending: PendingGate,
    voice: VoiceInput,
    playback: Playback,

    dialogue: Arc<dyn DialogueService>,
    translator: Arc<dyn TranslationService>,
    analyzer: Arc<dyn AnalysisService>,
    decider: Arc<dyn PendingDecider>,

    command_rx: mpsc::Receiver<SessionCommand>,
    intent_tx: mpsc::UnboundedSender<SessionIntent>,
    task_tx: mpsc::UnboundedSender<TaskEvent>,
    task_rx: mpsc::UnboundedReceiver<TaskEvent>,

    /// Monotonically increasing per-turn token. A dialogue reply whose token
    /// no longer matches is stale (its turn was cancelled) and is dropped.
    turn_token: u64,
    placeholder_shown: bool,

    listening: Arc<AtomicBool>,
    busy: Arc<AtomicBool>,
    speaking: Arc<AtomicBool>,
    message_count: Arc<AtomicU64>,
}

impl Session {
    /// Create a new session with the given configuration and collaborators
    pub fn new(
        config: SessionConfig,
        services: SessionServices,
    ) -> Result<(Self, SessionHandle)> {
        config.validate().map_err(ParleyError::Config)?;

        let (command_tx, command_rx) = mpsc::channel(config.channel_capacity);
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (task_tx, task_rx) = mpsc::unbounded_channel();

        let listening = Arc::new(AtomicBool::new(false));
        let busy = Arc::new(AtomicBool::new(false));
        let speaking = Arc::new(AtomicBool::new(false));
        let message_count = Arc::new(AtomicU64::new(0));

        let handle = SessionHandle {
            command_tx,
            intent_rx,
            listening: Arc::clone(&listening),
            busy: Arc::clone(&busy),
            speaking: Arc::clone(&speaking),
            message_count: Arc::clone(&message_count),
        };

        let flags = SessionFlags::new(config.auto_mic);
        let session = Self {
            flags,
            storage: MessageStorage::new(),
            queue: VecDeque::new(),
            pending: PendingGate::new(),
            voice: VoiceInput::new(Arc::clone(&services.recognizer)),
            playback: Playback::new(Arc::clone(&services.speaker)),
            dialogue: services.dialogue,
            translator: services.translator,
            analyzer: services.analyzer,
            decider: services.decider,
            command_rx,
            intent_tx,
            task_tx,
            task_rx,
            turn_token: 0,
            placeholder_shown: false,
            listening,
            busy,
            speaking,
            message_count,
            config,
        };

        Ok((session, handle))
    }

    /// Shared transcript of this session
    pub fn storage(&self) -> MessageStorage {
        self.storage.clone()
    }

    /// Run the session event loop until shutdown
    pub async fn run(mut self) {
        info!("Session started");

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(cmd) => {
                            if !self.handle_command(cmd).await {
                                break;
                            }
                        }
                        None => {
                            warn!("Command channel disconnected");
                            break;
                        }
                    }
                }
                Some(event) = self.task_rx.recv() => {
                    self.handle_task_event(event).await;
                }
            }
        }

        info!("Session stopped");
    }

    async fn handle_command(&mut self, cmd: SessionCommand) -> bool {
        match cmd {
            SessionCommand::Submit(text) => {
                self.submit(text).await;
            }
            SessionCommand::ToggleVoice => {
                if self.flags.busy || self.flags.speaking {
                    self.stop_speaking().await;
                } else if self.flags.listening {
                    self.stop_listening();
                } else {
                    self.start_listening();
                }
            }
            SessionCommand::ToggleAutoMic => {
                self.flags.auto_mic = !self.flags.auto_mic;
                info!("Auto-mic {}", if self.flags.auto_mic { "on" } else { "off" });
                self.emit(SessionIntent::AutoMicChanged(self.flags.auto_mic));
                if self.flags.auto_mic {
                    if self.flags.idle() {
                        self.start_listening();
                    }
                } else {
                    self.stop_listening();
                }
            }
            SessionCommand::StopSpeaking => {
                self.stop_speaking().await;
            }
            SessionCommand::Translate(id) => {
                self.request_translation(id);
            }
            SessionCommand::Analyze(id) => {
                self.request_analysis(id);
            }
            SessionCommand::Speech(event) => {
                self.handle_speech_event(event).await;
            }
            SessionCommand::PlaybackFinished(outcome) => {
                self.handle_playback_finished(outcome).await;
            }
            SessionCommand::Shutdown => {
                info!("Session shutdown requested");
                self.emit(SessionIntent::Shutdown);
                return false;
            }
        }
        true
    }

    async fn handle_task_event(&mut self, event: TaskEvent) {
        match event {
            TaskEvent::TurnReply { token, result } => {
                self.handle_turn_reply(token, result).await;
            }
            TaskEvent::TranslationDone { id, result } => {
                self.flags.translating = false;
                self.emit(SessionIntent::EnrichmentLoading {
                    id,
                    kind: EnrichmentKind::Translation,
                    active: false,
                });
                match result {
                    Ok(text) => {
                        self.storage
                            .attach_enrichment(id, Enrichment::translation(text.clone()));
                        self.emit(SessionIntent::TranslationRendered { id, text });
                    }
                    Err(e) => {
                        error!("Translation failed: {}", e);
                        self.emit(SessionIntent::InlineError {
                            id,
                            text: e.user_message(),
                        });
                    }
                }
            }
            TaskEvent::AnalysisDone { id, result } => {
                self.flags.analyzing = false;
                self.emit(SessionIntent::EnrichmentLoading {
                    id,
                    kind: EnrichmentKind::Analysis,
                    active: false,
                });
                match result {
                    Ok(analysis) => {
                        self.storage
                            .attach_enrichment(id, Enrichment::analysis(analysis.clone()));
                        self.emit(SessionIntent::AnalysisRendered { id, analysis });
                    }
                    Err(e) => {
                        error!("Grammar analysis failed: {}", e);
                        self.emit(SessionIntent::InlineError {
                            id,
                            text: e.user_message(),
                        });
                    }
                }
            }
            TaskEvent::ResumeListen => {
                if self.flags.auto_mic && self.flags.idle() {
                    self.start_listening();
                }
            }
        }
    }

    /// Submit a user message. While a turn is in flight the text lands in
    /// the pending gate instead of the queue.
    async fn submit(&mut self, text: String) {
        let text = text.trim().to_string();
        if text.is_empty() {
            return;
        }

        if self.flags.busy {
            debug!("Busy, capturing submission as pending");
            self.pending.capture(text.clone());
            self.emit(SessionIntent::PendingNotice(text));
            return;
        }

        self.queue.push_back(text);
        self.drain_queue().await;
    }

    /// Drain the conversation queue strictly FIFO, one turn at a time
    async fn drain_queue(&mut self) {
        while !self.flags.busy {
            match self.queue.pop_front() {
                Some(text) => self.start_turn(text).await,
                None => break,
            }
        }
    }

    async fn start_turn(&mut self, text: String) {
        // The microphone and the network turn never overlap
        self.stop_listening();

        self.set_busy(true);
        self.turn_token += 1;
        let token = self.turn_token;
        self.message_count.fetch_add(1, Ordering::SeqCst);

        let message = Message::new(Author::User, text.clone());
        self.emit(SessionIntent::RenderUserMessage {
            id: message.id,
            text: message.text.clone(),
        });
        self.storage.add(message);

        self.emit(SessionIntent::ShowPlaceholder);
        self.placeholder_shown = true;

        debug!("Turn {} started", token);
        let dialogue = Arc::clone(&self.dialogue);
        let task_tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = dialogue.send_turn(&text).await;
            let _ = task_tx.send(TaskEvent::TurnReply { token, result });
        });
    }

    async fn handle_turn_reply(&mut self, token: u64, result: Result<DialogueReply>) {
        if token != self.turn_token {
            debug!("Discarding stale dialogue reply (token {})", token);
            return;
        }

        self.remove_placeholder();

        match result {
            Ok(reply) => {
                let text = sanitize_reply(&reply.text);
                let mut message = Message::new(Author::Agent, text.clone());
                if let Some(ref clip) = reply.audio {
                    message = message.with_audio(clip.clone());
                }
                self.emit(SessionIntent::RenderAgentMessage {
                    id: message.id,
                    text,
                });
                self.storage.add(message);

                match reply.audio {
                    Some(clip) => {
                        self.stop_listening();
                        match self.playback.play(&clip) {
                            Ok(()) => {
                                self.set_speaking(true);
                                // Turn completes on PlaybackFinished
                            }
                            Err(e) => {
                                warn!("Playback failed to start: {}", e);
                                self.finish_turn().await;
                            }
                        }
                    }
                    None => {
                        self.finish_turn().await;
                    }
                }
            }
            Err(e) => {
                // Transport and validation failures consume the turn alike
                error!("Dialogue turn failed: {}", e);
                let message =
                    Message::new(Author::Agent, self.config.transport_error_reply.clone());
                self.emit(SessionIntent::RenderAgentMessage {
                    id: message.id,
                    text: message.text.clone(),
                });
                self.storage.add(message);
                self.finish_turn().await;
            }
        }
    }

    /// Turn completion: clear busy, resolve a pending message if one was
    /// captured, otherwise keep draining, then let the auto-mic policy
    /// re-enter listening.
    async fn finish_turn(&mut self) {
        self.set_busy(false);

        if let Some(text) = self.pending.take() {
            self.emit(SessionIntent::PendingCleared);
            debug!("Resolving pending message");
            if self.decider.confirm(&text).await {
                self.submit(text).await;
            }
        } else {
            self.drain_queue().await;
        }

        self.maybe_resume_listening();
    }

    async fn handle_playback_finished(&mut self, outcome: PlaybackOutcome) {
        if !self.flags.speaking {
            debug!("Ignoring playback completion with no active playback");
            return;
        }
        if outcome == PlaybackOutcome::Failed {
            warn!("Spoken reply playback failed");
        }
        self.playback.finish();
        self.set_speaking(false);
        self.finish_turn().await;
    }

    /// Explicit "stop AI talking": discard the playback handle and clear
    /// busy/speaking immediately, whether or not the dialogue reply has
    /// arrived. Bumping the token makes a late reply stale.
    async fn stop_speaking(&mut self) {
        if !self.flags.busy && !self.flags.speaking {
            return;
        }
        info!("Stopping agent speech");

        self.playback.cancel();
        self.turn_token += 1;
        self.remove_placeholder();

        if self.flags.speaking {
            self.set_speaking(false);
        }
        if self.flags.busy {
            self.set_busy(false);
        }

        if let Some(text) = self.pending.take() {
            self.emit(SessionIntent::PendingCleared);
            if self.decider.confirm(&text).await {
                self.submit(text).await;
            }
        }
    }

    async fn handle_speech_event(&mut self, event: SpeechEvent) {
        match event {
            SpeechEvent::Result { finalized } => {
                if let Some(text) = self.voice.on_result(&finalized) {
                    self.submit(text).await;
                }
            }
            SpeechEvent::Ended => {
                let flush = self.voice.on_ended();
                self.set_listening(false);
                if let Some(text) = flush {
                    self.submit(text).await;
                }
                if self.flags.auto_mic && self.flags.idle() {
                    self.start_listening();
                }
            }
            SpeechEvent::Error(code) => {
                warn!("Speech recognition error: {}", code);
                self.voice.on_error(&code);
                self.set_listening(false);
                if self.flags.auto_mic {
                    let delay = self.config.speech_retry_delay;
                    let task_tx = self.task_tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = task_tx.send(TaskEvent::ResumeListen);
                    });
                }
            }
        }
    }

    fn request_translation(&mut self, id: Uuid) {
        let Some(message) = self.storage.get(id) else {
            warn!("Translation requested for unknown message {}", id);
            return;
        };

        match self.storage.enrichment_kind(id) {
            Some(EnrichmentKind::Translation) => {
                if let Some(visible) = self.storage.toggle_enrichment(id) {
                    self.emit(SessionIntent::EnrichmentToggled {
                        id,
                        kind: EnrichmentKind::Translation,
                        visible,
                    });
                }
                return;
            }
            Some(EnrichmentKind::Analysis) => {
                debug!("Message {} already carries an analysis panel", id);
                return;
            }
            None => {}
        }

        if self.flags.translating {
            debug!("Translation already in progress, dropping request");
            return;
        }
        self.flags.translating = true;
        self.emit(SessionIntent::EnrichmentLoading {
            id,
            kind: EnrichmentKind::Translation,
            active: true,
        });

        let translator = Arc::clone(&self.translator);
        let task_tx = self.task_tx.clone();
        let text = message.text;
        tokio::spawn(async move {
            let result = translator.translate(&text).await;
            let _ = task_tx.send(TaskEvent::TranslationDone { id, result });
        });
    }

    fn request_analysis(&mut self, id: Uuid) {
        let Some(message) = self.storage.get(id) else {
            warn!("Analysis requested for unknown message {}", id);
            return;
        };

        match self.storage.enrichment_kind(id) {
            Some(EnrichmentKind::Analysis) => {
                if let Some(visible) = self.storage.toggle_enrichment(id) {
                    self.emit(SessionIntent::EnrichmentToggled {
                        id,
                        kind: EnrichmentKind::Analysis,
                        visible,
                    });
                }
                return;
            }
            Some(EnrichmentKind::Translation) => {
                debug!("Message {} already carries a translation panel", id);
                return;
            }
            None => {}
        }

        if self.flags.analyzing {
            debug!("Analysis already in progress, dropping request");
            return;
        }
        self.flags.analyzing = true;
        self.emit(SessionIntent::EnrichmentLoading {
            id,
            kind: EnrichmentKind::Analysis,
            active: true,
        });

        let analyzer = Arc::clone(&self.analyzer);
        let task_tx = self.task_tx.clone();
        let text = message.text;
        let retry_delay = self.config.analysis_retry_delay;
        tokio::spawn(async move {
            let mut result = analyzer.analyze(&text).await;
            if matches!(result, Err(ref e) if e.is_retryable()) {
                debug!("Analysis hit a retryable failure, retrying once");
                tokio::time::sleep(retry_delay).await;
                result = analyzer.analyze(&text).await;
            }
            let _ = task_tx.send(TaskEvent::AnalysisDone { id, result });
        });
    }

    fn start_listening(&mut self) {
        if self.flags.listening {
            return;
        }
        // Feedback avoidance: never open the microphone mid-turn or while a
        // reply is being spoken
        if !self.flags.idle() {
            debug!("Not starting recognition while busy or speaking");
            return;
        }
        match self.voice.start() {
            Ok(()) => self.set_listening(true),
            Err(e) => warn!("Failed to start recognition: {}", e),
        }
    }

    fn stop_listening(&mut self) {
        self.voice.stop();
        self.set_listening(false);
    }

    fn maybe_resume_listening(&mut self) {
        if self.flags.auto_mic && self.flags.idle() {
            self.start_listening();
        }
    }

    fn remove_placeholder(&mut self) {
        if self.placeholder_shown {
            self.emit(SessionIntent::RemovePlaceholder);
            self.placeholder_shown = false;
        }
    }

    fn set_listening(&mut self, on: bool) {
        if self.flags.listening == on {
            return;
        }
        self.flags.listening = on;
        self.listening.store(on, Ordering::SeqCst);
        self.emit(SessionIntent::ListeningChanged(on));
        self.flags.check_invariant();
    }

    fn set_busy(&mut self, on: bool) {
        if self.flags.busy == on {
            return;
        }
        self.flags.busy = on;
        self.busy.store(on, Ordering::SeqCst);
        self.emit(SessionIntent::BusyChanged(on));
        self.flags.check_invariant();
    }

    fn set_speaking(&mut self, on: bool) {
        if self.flags.speaking == on {
            return;
        }
        self.flags.speaking = on;
        self.speaking.store(on, Ordering::SeqCst);
        self.emit(SessionIntent::SpeakingChanged(on));
        self.flags.check_invariant();
    }

    // The intent channel is unbounded: a slow adapter lags but never loses a
    // state-change intent, which would leave its indicators out of sync for
    // the rest of the session. Send fails only once the handle is dropped.
    fn emit(&self, intent: SessionIntent) {
        if let Err(e) = self.intent_tx.send(intent) {
            warn!("Intent receiver gone: {}", e);
        }
    }
}

/// Strip the response wrapper tags the dialogue model occasionally emits
fn sanitize_reply(text: &str) -> String {
    text.replace("<response>", "")
        .replace("</response>", "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::AudioClip;
    use async_trait::async_trait;

    struct NullDialogue;

    #[async_trait]
    impl DialogueService for NullDialogue {
        async fn send_turn(&self, _message: &str) -> Result<DialogueReply> {
            Ok(DialogueReply {
                text: "ok".to_string(),
                audio: None,
            })
        }
    }

    struct NullTranslate;

    #[async_trait]
    impl TranslationService for NullTranslate {
        async fn translate(&self, _text: &str) -> Result<String> {
            Ok("ok".to_string())
        }
    }

    struct NullAnalyze;

    #[async_trait]
    impl AnalysisService for NullAnalyze {
        async fn analyze(&self, _text: &str) -> Result<GrammarAnalysis> {
            Ok(GrammarAnalysis {
                errors: vec![],
                final_revised: "ok".to_string(),
                overall_comment: "ok".to_string(),
            })
        }
    }

    struct NullDecider;

    #[async_trait]
    impl PendingDecider for NullDecider {
        async fn confirm(&self, _text: &str) -> bool {
            false
        }
    }

    struct NullRecognizer;

    impl SpeechRecognizer for NullRecognizer {
        fn start(&self) -> Result<()> {
            Ok(())
        }
        fn stop(&self) {}
    }

    struct NullSpeaker;

    impl AudioOutput for NullSpeaker {
        fn play(&self, _clip: &AudioClip) -> Result<()> {
            Ok(())
        }
        fn stop(&self) {}
    }

    fn services() -> SessionServices {
        SessionServices {
            dialogue: Arc::new(NullDialogue),
            translator: Arc::new(NullTranslate),
            analyzer: Arc::new(NullAnalyze),
            decider: Arc::new(NullDecider),
            recognizer: Arc::new(NullRecognizer),
            speaker: Arc::new(NullSpeaker),
        }
    }

    #[test]
    fn test_session_creation() {
        let result = Session::new(SessionConfig::default(), services());
        assert!(result.is_ok());

        let (_, handle) = result.unwrap();
        assert!(!handle.is_listening());
        assert!(!handle.is_busy());
        assert!(!handle.is_speaking());
        assert_eq!(handle.message_count(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SessionConfig::default();
        config.channel_capacity = 0;
        assert!(matches!(
            Session::new(config, services()),
            Err(ParleyError::Config(_))
        ));
    }

    #[test]
    fn test_sanitize_reply() {
        assert_eq!(sanitize_reply("<response>안녕하세요</response>"), "안녕하세요");
        assert_eq!(sanitize_reply("  plain  "), "plain");
    }

    #[tokio::test]
    async fn test_shutdown_emits_intent() {
        let (session, mut handle) = Session::new(SessionConfig::default(), services()).unwrap();
        let join = tokio::spawn(session.run());

        handle.send(SessionCommand::Shutdown).await.unwrap();
        assert_eq!(handle.next_intent().await, Some(SessionIntent::Shutdown));
        join.await.unwrap();
    }
}
