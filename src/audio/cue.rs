//! Short audible cues for the voice-search control.
//!
//! Playback is strictly best-effort: a missing output device, an undecodable
//! cue file, or a busy audio server must never disturb the listening state,
//! so every failure here is swallowed after a debug log.

use std::path::PathBuf;
use tracing::debug;

#[cfg(feature = "audio-io")]
use rodio::{source::SineWave, Decoder, OutputStream, OutputStreamHandle, Sink, Source};
#[cfg(feature = "audio-io")]
use std::fs::File;
#[cfg(feature = "audio-io")]
use std::io::BufReader;
#[cfg(feature = "audio-io")]
use std::time::Duration;

/// Which cue to sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Listening started
    ListenStart,
    /// Listening stopped
    ListenStop,
}

/// Fire-and-forget cue playback on the default output device.
pub struct CuePlayer {
    /// Optional cue file; a synthesized tone is used when absent
    cue_path: Option<PathBuf>,
    #[cfg(feature = "audio-io")]
    output: Option<(OutputStream, OutputStreamHandle)>,
}

impl CuePlayer {
    /// Open the default output device. A device-less system yields a silent player.
    pub fn new(cue_path: Option<PathBuf>) -> Self {
        #[cfg(feature = "audio-io")]
        {
            let output = match OutputStream::try_default() {
                Ok(output) => Some(output),
                Err(e) => {
                    debug!("No audio output for cues: {}", e);
                    None
                }
            };
            Self { cue_path, output }
        }

        #[cfg(not(feature = "audio-io"))]
        Self { cue_path }
    }

    /// A player that never sounds anything
    pub fn disabled() -> Self {
        Self {
            cue_path: None,
            #[cfg(feature = "audio-io")]
            output: None,
        }
    }

    /// Play a cue. Failures are ignored.
    pub fn play(&self, cue: Cue) {
        #[cfg(feature = "audio-io")]
        {
            let Some((_, handle)) = &self.output else {
                return;
            };

            if let Err(e) = self.play_on(handle, cue) {
                debug!("Cue playback failed: {}", e);
            }
        }

        #[cfg(not(feature = "audio-io"))]
        debug!(?cue, cue_path = ?self.cue_path, "Audio output disabled, skipping cue");
    }

    #[cfg(feature = "audio-io")]
    fn play_on(&self, handle: &OutputStreamHandle, cue: Cue) -> std::result::Result<(), String> {
        let sink = Sink::try_new(handle).map_err(|e| e.to_string())?;

        if let Some(path) = &self.cue_path {
            let file = File::open(path).map_err(|e| e.to_string())?;
            let source = Decoder::new(BufReader::new(file)).map_err(|e| e.to_string())?;
            sink.append(source);
        } else {
            // Rising tone for start, falling tone for stop
            let freq = match cue {
                Cue::ListenStart => 880.0,
                Cue::ListenStop => 660.0,
            };
            let source = SineWave::new(freq)
                .take_duration(Duration::from_millis(120))
                .amplify(0.20);
            sink.append(source);
        }

        sink.detach();
        Ok(())
    }
}
