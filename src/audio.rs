//! Audio feedback
//!
//! Procedurally generated beeps - no external files needed. The actual
//! oscillator lives behind `ToneSink` so the game runs silently anywhere.

use crate::sim::SimEvent;

/// A single beep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Hz
    pub frequency: f32,
    /// Seconds
    pub duration: f32,
}

impl Tone {
    pub const fn new(frequency: f32, duration: f32) -> Self {
        Self {
            frequency,
            duration,
        }
    }
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits a brick
    BrickHit,
    /// Ball hits the paddle
    PaddleHit,
    /// Power-up collected
    PowerUp,
    /// Last ball fell out
    LifeLost,
    /// All bricks cleared
    LevelClear,
    /// Run ended
    GameOver,
}

const BRICK_HIT: &[Tone] = &[Tone::new(300.0, 0.03)];
const PADDLE_HIT: &[Tone] = &[Tone::new(220.0, 0.02)];
const POWER_UP: &[Tone] = &[Tone::new(520.0, 0.05)];
const LIFE_LOST: &[Tone] = &[Tone::new(180.0, 0.10)];
const LEVEL_CLEAR: &[Tone] = &[Tone::new(523.0, 0.06), Tone::new(784.0, 0.08)];
const GAME_OVER: &[Tone] = &[Tone::new(220.0, 0.12), Tone::new(147.0, 0.20)];

impl SoundEffect {
    /// Notes making up the effect, played back to back
    pub fn tones(&self) -> &'static [Tone] {
        match self {
            SoundEffect::BrickHit => BRICK_HIT,
            SoundEffect::PaddleHit => PADDLE_HIT,
            SoundEffect::PowerUp => POWER_UP,
            SoundEffect::LifeLost => LIFE_LOST,
            SoundEffect::LevelClear => LEVEL_CLEAR,
            SoundEffect::GameOver => GAME_OVER,
        }
    }

    /// Effect for a simulation event, if it makes a sound
    pub fn for_event(event: &SimEvent) -> Option<Self> {
        match event {
            SimEvent::BrickHit { .. } => Some(SoundEffect::BrickHit),
            SimEvent::PaddleBounce { .. } => Some(SoundEffect::PaddleHit),
            SimEvent::PowerUpCollected(_) => Some(SoundEffect::PowerUp),
            SimEvent::WallBounce | SimEvent::BallLost => None,
        }
    }
}

/// "Play tone" capability (fire-and-forget, failures ignored)
pub trait ToneSink {
    /// Start a tone `delay` seconds from now at `volume` (0-1)
    fn play(&mut self, tone: Tone, volume: f32, delay: f32);
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl ToneSink for SilentSink {
    fn play(&mut self, _tone: Tone, _volume: f32, _delay: f32) {}
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn ToneSink>,
    volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(SilentSink))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn ToneSink>) -> Self {
        Self {
            sink,
            volume: 1.0,
            muted: false,
        }
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        let mut delay = 0.0;
        for tone in effect.tones() {
            self.sink.play(*tone, volume, delay);
            delay += tone.duration;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records (frequency, delay) of every tone played
    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<(f32, f32)>>>);

    impl ToneSink for Recorder {
        fn play(&mut self, tone: Tone, _volume: f32, delay: f32) {
            self.0.borrow_mut().push((tone.frequency, delay));
        }
    }

    #[test]
    fn test_play_and_mute() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));

        audio.play(SoundEffect::BrickHit);
        assert_eq!(recorder.0.borrow().as_slice(), &[(300.0, 0.0)]);

        assert!(audio.toggle_muted());
        audio.play(SoundEffect::PaddleHit);
        assert_eq!(recorder.0.borrow().len(), 1);

        assert!(!audio.toggle_muted());
        audio.set_volume(0.0);
        audio.play(SoundEffect::PaddleHit);
        assert_eq!(recorder.0.borrow().len(), 1);
    }

    #[test]
    fn test_jingle_is_sequenced() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.play(SoundEffect::LevelClear);
        let played = recorder.0.borrow();
        assert_eq!(played.len(), 2);
        assert_eq!(played[0].1, 0.0);
        assert!((played[1].1 - 0.06).abs() < 1e-6);
    }

    #[test]
    fn test_tone_tables() {
        assert_eq!(SoundEffect::BrickHit.tones(), &[Tone::new(300.0, 0.03)]);
        assert_eq!(SoundEffect::PaddleHit.tones(), &[Tone::new(220.0, 0.02)]);
        assert_eq!(SoundEffect::PowerUp.tones(), &[Tone::new(520.0, 0.05)]);
        assert_eq!(SoundEffect::LifeLost.tones(), &[Tone::new(180.0, 0.10)]);
        assert_eq!(SoundEffect::LevelClear.tones().len(), 2);
        assert_eq!(SoundEffect::GameOver.tones().len(), 2);
    }

    #[test]
    fn test_event_mapping() {
        use glam::Vec2;
        assert_eq!(
            SoundEffect::for_event(&SimEvent::BrickHit {
                pos: Vec2::ZERO,
                destroyed: false
            }),
            Some(SoundEffect::BrickHit)
        );
        assert_eq!(SoundEffect::for_event(&SimEvent::WallBounce), None);
    }
}
