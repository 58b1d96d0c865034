//! Background audio for the walkthrough.
//!
//! One looping ambient track, started only on an explicit user gesture.
//! Audio output runs on its own thread behind a command channel; device
//! initialization can hang or fail on some systems, and the walkthrough
//! must keep rendering either way. Every failure downgrades to silence
//! with a warning.

use rodio::source::Source;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

enum AudioCommand {
    Play,
    SetVolume(f32),
    Stop,
    Shutdown,
}

struct AudioState {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    sink: Option<Sink>,
}

/// A single looping background track.
///
/// Construction spawns the audio thread and prepares the device; nothing
/// plays until [`AudioChannel::play`] is called from a user gesture.
pub struct AudioChannel {
    command_tx: Option<mpsc::Sender<AudioCommand>>,
    _audio_thread: Option<thread::JoinHandle<()>>,
}

impl AudioChannel {
    pub fn new(track: impl Into<PathBuf>, volume: f32, looped: bool) -> Self {
        let track = track.into();
        let (command_tx, command_rx) = mpsc::channel::<AudioCommand>();

        let audio_thread = thread::Builder::new()
            .name("storewalk-audio".to_string())
            .spawn(move || {
                let mut state = match OutputStream::try_default() {
                    Ok((stream, handle)) => Some(AudioState {
                        _stream: stream,
                        stream_handle: handle,
                        sink: None,
                    }),
                    Err(e) => {
                        tracing::warn!("could not initialize audio output: {e}");
                        None
                    }
                };
                let mut volume = volume;

                while let Ok(cmd) = command_rx.recv() {
                    match cmd {
                        AudioCommand::Play => {
                            if let Some(ref mut s) = state {
                                if s.sink.is_some() {
                                    continue;
                                }
                                match start_track(s, &track, volume, looped) {
                                    Ok(sink) => {
                                        tracing::info!(track = %track.display(), "audio playing");
                                        s.sink = Some(sink);
                                    }
                                    Err(e) => {
                                        tracing::warn!(
                                            track = %track.display(),
                                            "could not play audio: {e}; continuing silent"
                                        );
                                    }
                                }
                            }
                        }
                        AudioCommand::SetVolume(v) => {
                            volume = v;
                            if let Some(ref s) = state {
                                if let Some(ref sink) = s.sink {
                                    sink.set_volume(v);
                                }
                            }
                        }
                        AudioCommand::Stop => {
                            if let Some(ref mut s) = state {
                                if let Some(sink) = s.sink.take() {
                                    sink.stop();
                                }
                            }
                        }
                        AudioCommand::Shutdown => {
                            if let Some(ref mut s) = state {
                                if let Some(sink) = s.sink.take() {
                                    sink.stop();
                                }
                            }
                            break;
                        }
                    }
                }
            });

        let audio_thread = match audio_thread {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!("could not spawn audio thread: {e}");
                None
            }
        };

        Self {
            command_tx: Some(command_tx),
            _audio_thread: audio_thread,
        }
    }

    /// Start the track. Call from a user gesture; starting twice is a no-op.
    pub fn play(&self) {
        self.send(AudioCommand::Play);
    }

    pub fn set_volume(&self, volume: f32) {
        self.send(AudioCommand::SetVolume(volume));
    }

    pub fn stop(&self) {
        self.send(AudioCommand::Stop);
    }

    fn send(&self, cmd: AudioCommand) {
        if let Some(ref tx) = self.command_tx {
            let _ = tx.send(cmd);
        }
    }
}

impl Drop for AudioChannel {
    fn drop(&mut self) {
        if let Some(ref tx) = self.command_tx {
            let _ = tx.send(AudioCommand::Shutdown);
        }
    }
}

fn start_track(
    state: &AudioState,
    track: &std::path::Path,
    volume: f32,
    looped: bool,
) -> Result<Sink, String> {
    let file = File::open(track).map_err(|e| e.to_string())?;
    let source = Decoder::new(BufReader::new(file)).map_err(|e| e.to_string())?;
    let sink = Sink::try_new(&state.stream_handle).map_err(|e| e.to_string())?;
    sink.set_volume(volume);
    if looped {
        sink.append(source.repeat_infinite());
    } else {
        sink.append(source);
    }
    Ok(sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_track_degrades_to_silence() {
        // No device or file in CI; construction and playback must both
        // swallow the failure.
        let channel = AudioChannel::new("/no/such/track.mp3", 0.2, true);
        channel.play();
        channel.set_volume(0.5);
        channel.stop();
    }
}
