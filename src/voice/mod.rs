//! Voice-search control.
//!
//! [`VoiceControl`] owns the listening flag and the lazily-created recognizer
//! singleton. Every way out of the listening state (a final result, an engine
//! error, the engine's natural end, or a second user activation) funnels
//! through the one stop routine.

pub mod recognizer;
#[cfg(feature = "whisper")]
pub mod whisper;

pub use recognizer::{Recognizer, RecognizerConfig, RecognizerEvent, RecognizerFactory};

use crate::audio::{Cue, CuePlayer};
use crate::{HubbubError, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::{debug, error};

pub struct VoiceControl {
    /// Engine factory; `None` means the capability is absent on this host
    factory: Option<RecognizerFactory>,

    /// Engine singleton, created on first activation and reused
    recognizer: Option<Box<dyn Recognizer>>,

    event_tx: Sender<RecognizerEvent>,
    event_rx: Receiver<RecognizerEvent>,

    is_listening: bool,

    cues: CuePlayer,
}

impl VoiceControl {
    /// Probe the host for a speech engine
    pub fn new(config: &RecognizerConfig, cues: CuePlayer) -> Self {
        Self::with_factory(recognizer::platform_factory(config), cues)
    }

    /// Use an explicit engine factory (or none, for a host without the capability)
    pub fn with_factory(factory: Option<RecognizerFactory>, cues: CuePlayer) -> Self {
        let (event_tx, event_rx) = bounded(32);

        Self {
            factory,
            recognizer: None,
            event_tx,
            event_rx,
            is_listening: false,
            cues,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.is_listening
    }

    /// Whether a speech engine exists on this host
    pub fn available(&self) -> bool {
        self.factory.is_some() || self.recognizer.is_some()
    }

    /// User activation: start listening, or stop if already listening.
    ///
    /// With no engine available this is an error and no state changes.
    pub fn toggle(&mut self) -> Result<()> {
        if !self.available() {
            return Err(HubbubError::RecognizerUnavailable);
        }

        if self.is_listening {
            self.stop_listening();
        } else {
            self.start_listening();
        }

        Ok(())
    }

    fn ensure_recognizer(&mut self) -> bool {
        if self.recognizer.is_some() {
            return true;
        }

        let Some(factory) = self.factory.as_ref() else {
            return false;
        };

        match factory(self.event_tx.clone()) {
            Ok(recognizer) => {
                self.recognizer = Some(recognizer);
                true
            }
            Err(e) => {
                error!("Failed to initialize speech engine: {}", e);
                false
            }
        }
    }

    fn start_listening(&mut self) {
        if !self.ensure_recognizer() {
            return;
        }

        if let Some(recognizer) = self.recognizer.as_mut() {
            if let Err(e) = recognizer.start() {
                error!("Error starting recognition: {}", e);
                return;
            }
        }

        self.is_listening = true;
        self.cues.play(Cue::ListenStart);
        debug!("Listening started");
    }

    /// The single stop routine all exits from listening converge on.
    /// Idempotent: stopping while idle does nothing.
    fn stop_listening(&mut self) {
        if !self.is_listening {
            return;
        }

        if let Some(recognizer) = self.recognizer.as_mut() {
            if let Err(e) = recognizer.stop() {
                error!("Error stopping recognition: {}", e);
            }
        }

        self.is_listening = false;
        self.cues.play(Cue::ListenStop);
        debug!("Listening stopped");
    }

    /// Drain pending engine events; returns the final transcript if one arrived.
    pub fn poll(&mut self) -> Option<String> {
        let mut transcript = None;

        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                RecognizerEvent::Result { transcript: text } => {
                    debug!("Recognition result: \"{}\"", text);
                    transcript = Some(text);
                    self.stop_listening();
                }
                RecognizerEvent::Error { message } => {
                    error!("Voice recognition error: {}", message);
                    self.stop_listening();
                }
                RecognizerEvent::End => {
                    self.stop_listening();
                }
            }
        }

        transcript
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Engine that replays a fixed event script when started
    struct ScriptedRecognizer {
        events: Sender<RecognizerEvent>,
        script: Vec<RecognizerEvent>,
        starts: Arc<AtomicUsize>,
        stops: Arc<AtomicUsize>,
        fail_start: bool,
    }

    impl Recognizer for ScriptedRecognizer {
        fn start(&mut self) -> Result<()> {
            if self.fail_start {
                return Err(HubbubError::RecognitionError("engine refused".into()));
            }
            self.starts.fetch_add(1, Ordering::SeqCst);
            for event in self.script.clone() {
                self.events.send(event).unwrap();
            }
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.stops.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Counters {
        starts: Arc<AtomicUsize>,
        stops: Arc<AtomicUsize>,
    }

    fn scripted_control(script: Vec<RecognizerEvent>, fail_start: bool) -> (VoiceControl, Counters) {
        let starts = Arc::new(AtomicUsize::new(0));
        let stops = Arc::new(AtomicUsize::new(0));
        let counters = Counters {
            starts: Arc::clone(&starts),
            stops: Arc::clone(&stops),
        };

        let factory: RecognizerFactory = Box::new(move |events| {
            Ok(Box::new(ScriptedRecognizer {
                events,
                script: script.clone(),
                starts: Arc::clone(&starts),
                stops: Arc::clone(&stops),
                fail_start,
            }) as Box<dyn Recognizer>)
        });

        (
            VoiceControl::with_factory(Some(factory), CuePlayer::disabled()),
            counters,
        )
    }

    #[test]
    fn test_toggle_without_capability_is_an_error() {
        let mut control = VoiceControl::with_factory(None, CuePlayer::disabled());

        let err = control.toggle().unwrap_err();
        assert!(matches!(err, HubbubError::RecognizerUnavailable));
        assert!(!control.is_listening());
    }

    #[test]
    fn test_toggle_twice_returns_to_idle() {
        let (mut control, counters) = scripted_control(Vec::new(), false);

        control.toggle().unwrap();
        assert!(control.is_listening());

        control.toggle().unwrap();
        assert!(!control.is_listening());
        assert_eq!(counters.starts.load(Ordering::SeqCst), 1);
        assert_eq!(counters.stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_result_stops_listening_and_yields_transcript() {
        let (mut control, _) = scripted_control(
            vec![
                RecognizerEvent::Result {
                    transcript: "rust developer jobs".to_string(),
                },
                RecognizerEvent::End,
            ],
            false,
        );

        control.toggle().unwrap();
        let transcript = control.poll();

        assert_eq!(transcript.as_deref(), Some("rust developer jobs"));
        assert!(!control.is_listening());
    }

    #[test]
    fn test_engine_error_resets_to_idle() {
        let (mut control, _) = scripted_control(
            vec![
                RecognizerEvent::Error {
                    message: "no-speech".to_string(),
                },
                RecognizerEvent::End,
            ],
            false,
        );

        control.toggle().unwrap();
        assert!(control.poll().is_none());
        assert!(!control.is_listening());
    }

    #[test]
    fn test_natural_end_resets_to_idle() {
        let (mut control, _) = scripted_control(vec![RecognizerEvent::End], false);

        control.toggle().unwrap();
        control.poll();

        assert!(!control.is_listening());
    }

    #[test]
    fn test_start_failure_stays_idle() {
        let (mut control, counters) = scripted_control(Vec::new(), true);

        control.toggle().unwrap();

        assert!(!control.is_listening());
        assert_eq!(counters.starts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_recognizer_is_created_once() {
        let created = Arc::new(AtomicUsize::new(0));
        let created_in_factory = Arc::clone(&created);

        let factory: RecognizerFactory = Box::new(move |events| {
            created_in_factory.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(ScriptedRecognizer {
                events,
                script: Vec::new(),
                starts: Arc::new(AtomicUsize::new(0)),
                stops: Arc::new(AtomicUsize::new(0)),
                fail_start: false,
            }) as Box<dyn Recognizer>)
        });

        let mut control = VoiceControl::with_factory(Some(factory), CuePlayer::disabled());

        for _ in 0..3 {
            control.toggle().unwrap();
        }

        assert_eq!(created.load(Ordering::SeqCst), 1);
    }
}
