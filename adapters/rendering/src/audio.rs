//! Fire-and-forget audio requests raised by the simulation.

use anyhow::Result as AnyResult;
use idle_tower_core::{Event, MusicTrack, SoundEffect};

/// Audio output used by adapters.
///
/// Errors are reported to [`dispatch`], which logs them and carries on.
pub trait AudioSink {
    /// Starts `track` on an endless loop, replacing any current track.
    fn play_looping_track(&mut self, track: MusicTrack, volume_db: f32) -> AnyResult<()>;

    /// Stops the current track.
    fn stop_track(&mut self) -> AnyResult<()>;

    /// Reports whether a track is currently playing.
    fn is_playing(&self) -> bool;

    /// Plays `effect` once on top of any music.
    fn play_one_shot(&mut self, effect: SoundEffect, volume_db: f32) -> AnyResult<()>;
}

/// Forwards the audio requests found in `events` to `sink`.
///
/// Music is only stopped when something is playing. Sink failures are logged
/// at `warn` and never interrupt the caller.
pub fn dispatch<S>(events: &[Event], sink: &mut S)
where
    S: AudioSink + ?Sized,
{
    for event in events {
        let result = match event {
            Event::MusicRequested { track } => sink.play_looping_track(*track, track.volume_db()),
            Event::MusicStopRequested if sink.is_playing() => sink.stop_track(),
            Event::SoundRequested { sound } => sink.play_one_shot(*sound, sound.volume_db()),
            _ => Ok(()),
        };
        if let Err(error) = result {
            tracing::warn!(error = %error, "audio request failed");
        }
    }
}

/// Sink that records audio requests in the log instead of playing them.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingAudioSink {
    playing: Option<MusicTrack>,
}

impl LoggingAudioSink {
    /// Creates a silent sink.
    #[must_use]
    pub const fn new() -> Self {
        Self { playing: None }
    }
}

impl AudioSink for LoggingAudioSink {
    fn play_looping_track(&mut self, track: MusicTrack, volume_db: f32) -> AnyResult<()> {
        tracing::info!(
            asset = track.asset_path(),
            volume_db,
            "music started"
        );
        self.playing = Some(track);
        Ok(())
    }

    fn stop_track(&mut self) -> AnyResult<()> {
        if let Some(track) = self.playing.take() {
            tracing::info!(asset = track.asset_path(), "music stopped");
        }
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.playing.is_some()
    }

    fn play_one_shot(&mut self, effect: SoundEffect, volume_db: f32) -> AnyResult<()> {
        tracing::debug!(asset = effect.asset_path(), volume_db, "sound effect");
        Ok(())
    }
}
