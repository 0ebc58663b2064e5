//! Local recognition engine backed by Whisper.
//!
//! A session captures microphone audio, waits for one utterance (energy-gated
//! endpointing, final results only), transcribes it at 16 kHz, and reports a
//! single `Result` followed by `End`. Stopping mid-utterance transcribes
//! whatever was heard so far.

use crate::audio::{resample_to, MicCapture};
use crate::voice::recognizer::{Recognizer, RecognizerConfig, RecognizerEvent, RecognizerFactory};
use crate::{HubbubError, Result};
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, error, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

/// Sample rate Whisper expects
const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Utterances shorter than this are treated as noise and discarded
const MIN_UTTERANCE_SECS: f32 = 0.5;

/// Hard ceiling on a single utterance
const MAX_UTTERANCE_SECS: f32 = 30.0;

const N_THREADS: i32 = 4;

/// Probe for [`platform_factory`]: requires the model file and a microphone.
///
/// [`platform_factory`]: crate::voice::recognizer::platform_factory
pub(crate) fn probe(config: &RecognizerConfig) -> Result<RecognizerFactory> {
    if !config.model_path.exists() {
        return Err(HubbubError::RecognitionError(format!(
            "Model file not found: {:?}",
            config.model_path
        )));
    }

    if !MicCapture::device_available() {
        return Err(HubbubError::AudioDeviceError(
            "No input device available".into(),
        ));
    }

    let config = config.clone();
    Ok(Box::new(move |events| {
        WhisperRecognizer::create(config.clone(), events)
            .map(|recognizer| Box::new(recognizer) as Box<dyn Recognizer>)
    }))
}

struct Session {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Whisper-backed recognition engine
pub struct WhisperRecognizer {
    context: Arc<WhisperContext>,
    config: RecognizerConfig,
    events: Sender<RecognizerEvent>,
    session: Option<Session>,
}

impl WhisperRecognizer {
    pub fn create(config: RecognizerConfig, events: Sender<RecognizerEvent>) -> Result<Self> {
        info!("Loading Whisper model from: {:?}", config.model_path);

        let model_path = config.model_path.to_str().ok_or_else(|| {
            HubbubError::RecognitionError("Invalid model path".to_string())
        })?;

        let context =
            WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
                .map_err(|e| {
                    HubbubError::RecognitionError(format!("Failed to load Whisper model: {:?}", e))
                })?;

        info!("Whisper model loaded");

        Ok(Self {
            context: Arc::new(context),
            config,
            events,
            session: None,
        })
    }
}

impl Recognizer for WhisperRecognizer {
    fn start(&mut self) -> Result<()> {
        if let Some(session) = &self.session {
            if !session.handle.is_finished() {
                return Err(HubbubError::RecognitionError(
                    "Recognition already started".into(),
                ));
            }
        }
        // Reap the previous, already-finished session
        if let Some(session) = self.session.take() {
            let _ = session.handle.join();
        }

        let stop = Arc::new(AtomicBool::new(false));
        let context = Arc::clone(&self.context);
        let config = self.config.clone();
        let events = self.events.clone();
        let session_stop = Arc::clone(&stop);

        let handle = std::thread::spawn(move || {
            run_session(context, config, events, session_stop);
        });

        self.session = Some(Session { stop, handle });
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(session) = &self.session {
            session.stop.store(true, Ordering::Relaxed);
        }
        Ok(())
    }
}

impl Drop for WhisperRecognizer {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

fn run_session(
    context: Arc<WhisperContext>,
    config: RecognizerConfig,
    events: Sender<RecognizerEvent>,
    stop: Arc<AtomicBool>,
) {
    let mut capture = match MicCapture::new() {
        Ok(capture) => capture,
        Err(e) => {
            let _ = events.send(RecognizerEvent::Error {
                message: e.to_string(),
            });
            let _ = events.send(RecognizerEvent::End);
            return;
        }
    };

    let (audio_tx, audio_rx) = bounded(64);
    if let Err(e) = capture.start(audio_tx) {
        let _ = events.send(RecognizerEvent::Error {
            message: e.to_string(),
        });
        let _ = events.send(RecognizerEvent::End);
        return;
    }

    let sample_rate = capture.sample_rate();
    let mut gate = EnergyGate::new(sample_rate);
    let mut utterance: Vec<f32> = Vec::new();

    loop {
        if stop.load(Ordering::Relaxed) {
            debug!("Recognition session stopped by caller");
            break;
        }

        match audio_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(chunk) => {
                utterance.extend_from_slice(&chunk);

                if gate.observe(&chunk) {
                    debug!("End of utterance detected");
                    break;
                }

                if utterance.len() as f32 / sample_rate as f32 >= MAX_UTTERANCE_SECS {
                    debug!("Maximum utterance length reached");
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    capture.stop();

    let heard_secs = utterance.len() as f32 / sample_rate as f32;
    if gate.heard_speech() && heard_secs >= MIN_UTTERANCE_SECS {
        match resample_to(&utterance, sample_rate, WHISPER_SAMPLE_RATE)
            .and_then(|samples| transcribe(&context, &config, &samples))
        {
            Ok(text) if !text.is_empty() => {
                let _ = events.send(RecognizerEvent::Result { transcript: text });
            }
            Ok(_) => debug!("Empty transcript, discarding"),
            Err(e) => {
                error!("Transcription failed: {}", e);
                let _ = events.send(RecognizerEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    } else {
        debug!("No usable speech captured ({:.2}s)", heard_secs);
    }

    let _ = events.send(RecognizerEvent::End);
}

fn transcribe(
    context: &WhisperContext,
    config: &RecognizerConfig,
    samples: &[f32],
) -> Result<String> {
    let mut params = FullParams::new(SamplingStrategy::Greedy {
        best_of: config.max_alternatives.max(1) as i32,
    });

    params.set_n_threads(N_THREADS);
    params.set_translate(false);
    params.set_print_timestamps(false);
    params.set_print_special(false);
    params.set_print_progress(false);
    params.set_print_realtime(false);

    // Whisper takes the bare language code, not the full tag
    let language = config.language.split('-').next().unwrap_or("en");
    params.set_language(Some(language));

    let mut state = context
        .create_state()
        .map_err(|e| HubbubError::RecognitionError(format!("Failed to create state: {:?}", e)))?;

    state
        .full(params, samples)
        .map_err(|e| HubbubError::RecognitionError(format!("Transcription failed: {:?}", e)))?;

    let num_segments = state
        .full_n_segments()
        .map_err(|e| HubbubError::RecognitionError(format!("Failed to get segments: {:?}", e)))?;

    let mut text = String::new();
    for i in 0..num_segments {
        let segment = state.full_get_segment_text(i).map_err(|e| {
            HubbubError::RecognitionError(format!("Failed to get segment text: {:?}", e))
        })?;
        text.push_str(&segment);
    }

    Ok(text.trim().to_string())
}

/// RMS-based utterance endpointing: an utterance is complete once speech has
/// been heard and the signal stays below the floor for the hang time.
struct EnergyGate {
    sample_rate: u32,
    rms_floor: f32,
    hang_secs: f32,
    in_speech: bool,
    trailing_silence: f32,
}

impl EnergyGate {
    fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            rms_floor: 0.015,
            hang_secs: 0.6,
            in_speech: false,
            trailing_silence: 0.0,
        }
    }

    /// Feed one chunk; returns true when the utterance is complete
    fn observe(&mut self, chunk: &[f32]) -> bool {
        if chunk.is_empty() {
            return false;
        }

        let rms =
            (chunk.iter().map(|s| s * s).sum::<f32>() / chunk.len() as f32).sqrt();

        if rms >= self.rms_floor {
            self.in_speech = true;
            self.trailing_silence = 0.0;
        } else if self.in_speech {
            self.trailing_silence += chunk.len() as f32 / self.sample_rate as f32;
            if self.trailing_silence >= self.hang_secs {
                return true;
            }
        }

        false
    }

    fn heard_speech(&self) -> bool {
        self.in_speech
    }
}
