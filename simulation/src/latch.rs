//! One-way transition into the game-over state.

use idle_tower_core::{Event, SoundEffect};

/// Latch that emits the game-over effects exactly once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameOverLatch {
    triggered: bool,
}

impl GameOverLatch {
    /// Creates an unset latch.
    #[must_use]
    pub const fn new() -> Self {
        Self { triggered: false }
    }

    /// Sets the latch, returning `true` only on the first call.
    ///
    /// The first call stops the music and requests the death sound; later
    /// calls push nothing.
    pub fn trigger(&mut self, out_events: &mut Vec<Event>) -> bool {
        if self.triggered {
            return false;
        }
        self.triggered = true;

        tracing::info!("game over");
        out_events.push(Event::GameOver);
        out_events.push(Event::MusicStopRequested);
        out_events.push(Event::SoundRequested {
            sound: SoundEffect::Death,
        });
        true
    }

    /// Reports whether the latch has been set.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.triggered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_trigger_is_silent() {
        let mut latch = GameOverLatch::new();
        let mut events = Vec::new();

        assert!(latch.trigger(&mut events));
        assert!(!latch.trigger(&mut events));

        assert!(latch.is_set());
        assert_eq!(
            events,
            vec![
                Event::GameOver,
                Event::MusicStopRequested,
                Event::SoundRequested {
                    sound: SoundEffect::Death
                },
            ]
        );
    }
}
