//! Game lifecycle state machine
//!
//! Owns the simulation state and the capabilities around it (storage,
//! audio, ads) and turns tick reports into lifecycle transitions: rounds
//! lost, levels cleared, game over. RoundLost and LevelCleared are
//! transient; they resolve within the same frame into Paused or GameOver.

use crate::ads::{AdOutcome, InterstitialAd, NoAds, RewardedAd};
use crate::audio::{AudioManager, SoundEffect};
use crate::consts::*;
use crate::highscores::{BestScore, KeyValueStore};
use crate::input::Command;
use crate::render::{RenderSurface, draw_frame};
use crate::settings::Settings;
use crate::sim::{GameState, TickInput, start_level, start_round, tick};

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting for the first confirm
    #[default]
    Idle,
    Running,
    /// Frozen until resumed (user pause, or after a lost round / new level)
    Paused,
    /// Ended; restart or a rewarded continue leaves it
    GameOver,
}

/// What changed as a result of an action or a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started,
    Paused,
    Resumed,
    RoundLost { lives_left: u8 },
    LevelCleared { level: u32 },
    GameOver { score: u64, new_best: bool },
    ExtraLifeGranted,
    AdUnavailable,
}

/// Overlay message shown over the playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// A complete game session
pub struct Game {
    state: GameState,
    phase: Phase,
    notice: Option<Notice>,
    best: BestScore,
    store: Box<dyn KeyValueStore>,
    audio: AudioManager,
    rewarded: Box<dyn RewardedAd>,
    interstitial: Box<dyn InterstitialAd>,
    /// Frames spent waiting on a rewarded ad
    pending_ad: Option<u32>,
    /// Frames since creation (drives the interstitial clock)
    frames: u64,
}

impl Game {
    pub fn new(seed: u64, store: Box<dyn KeyValueStore>, audio: AudioManager) -> Self {
        let best = BestScore::load(store.as_ref());
        Self {
            state: GameState::new(seed),
            phase: Phase::Idle,
            notice: Some(Notice::new("Brickfall", "Press Enter to start")),
            best,
            store,
            audio,
            rewarded: Box::new(NoAds),
            interstitial: Box::new(NoAds),
            pending_ad: None,
            frames: 0,
        }
    }

    pub fn with_rewarded_ad(mut self, ad: Box<dyn RewardedAd>) -> Self {
        self.rewarded = ad;
        self
    }

    pub fn with_interstitial(mut self, ad: Box<dyn InterstitialAd>) -> Self {
        self.interstitial = ad;
        self
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.audio.set_muted(!settings.sound_on);
        self.audio.set_volume(settings.volume);
        self.state.max_particles = settings.max_particles();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access to the simulation (tools and tests)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn best(&self) -> u64 {
        self.best.value()
    }

    pub fn is_muted(&self) -> bool {
        self.audio.is_muted()
    }

    pub fn ad_pending(&self) -> bool {
        self.pending_ad.is_some()
    }

    /// Start from Idle / GameOver, or resume from Paused
    pub fn confirm(&mut self) -> Option<Transition> {
        match self.phase {
            Phase::Idle | Phase::GameOver => Some(self.start_new_game()),
            Phase::Paused => {
                self.phase = Phase::Running;
                self.notice = None;
                Some(Transition::Resumed)
            }
            Phase::Running => None,
        }
    }

    /// Pause while running, resume while paused; ignored otherwise
    pub fn toggle_pause(&mut self) -> Option<Transition> {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                self.notice = Some(Notice::new("Paused", "Press P to resume"));
                Some(Transition::Paused)
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                self.notice = None;
                Some(Transition::Resumed)
            }
            Phase::Idle | Phase::GameOver => None,
        }
    }

    /// Throw away the current run and start over at level 1
    pub fn restart(&mut self) -> Transition {
        self.start_new_game()
    }

    /// Flip the sound toggle. Returns true if now muted.
    pub fn toggle_sound(&mut self) -> bool {
        let muted = self.audio.toggle_muted();
        log::info!("Sound {}", if muted { "off" } else { "on" });
        muted
    }

    /// Center the paddle on a world x (pointer move)
    pub fn place_paddle(&mut self, world_x: f32) {
        if self.phase != Phase::GameOver {
            self.state.paddle.place_center(world_x);
        }
    }

    /// Pointer press / touch: place the paddle, and start or resume when
    /// waiting on the player
    pub fn tap(&mut self, world_x: f32) -> Option<Transition> {
        // Confirm first: starting a game resets the paddle
        let transition = match self.phase {
            Phase::Idle | Phase::Paused => self.confirm(),
            Phase::Running | Phase::GameOver => None,
        };
        self.place_paddle(world_x);
        transition
    }

    pub fn handle(&mut self, command: Command) -> Option<Transition> {
        match command {
            Command::Confirm => self.confirm(),
            Command::TogglePause => self.toggle_pause(),
            Command::Restart => Some(self.restart()),
            Command::WatchAd => self.request_extra_life(),
            Command::ToggleSound => {
                self.toggle_sound();
                None
            }
        }
    }

    /// Ask the rewarded capability for an extra life (GameOver only)
    ///
    /// The outcome is picked up by `frame`; nothing blocks here.
    pub fn request_extra_life(&mut self) -> Option<Transition> {
        if self.phase != Phase::GameOver || self.pending_ad.is_some() {
            return None;
        }
        if !self.rewarded.is_available() {
            log::warn!("Rewarded ad not available");
            self.notice = Some(Notice::new(
                "No ad available",
                "Rewarded ads are only available in the app. Press N to restart",
            ));
            return Some(Transition::AdUnavailable);
        }
        log::info!("Requesting rewarded ad");
        self.rewarded.request();
        self.pending_ad = Some(0);
        self.notice = Some(Notice::new("Loading ad", "Please wait..."));
        None
    }

    /// Advance one display frame
    pub fn frame(&mut self, input: &TickInput) -> Vec<Transition> {
        let mut transitions = Vec::new();
        self.frames += 1;

        if let Some(t) = self.poll_rewarded_ad() {
            transitions.push(t);
        }

        if self.phase != Phase::Running {
            return transitions;
        }

        let report = tick(&mut self.state, input);
        for effect in report.events.iter().filter_map(SoundEffect::for_event) {
            self.audio.play(effect);
        }

        if report.level_cleared {
            transitions.push(self.on_level_cleared());
        } else if report.round_lost {
            transitions.push(self.on_round_lost());
        }
        transitions
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        draw_frame(surface, &self.state, self.best.value(), self.notice.as_ref());
    }

    fn start_new_game(&mut self) -> Transition {
        if self.pending_ad.take().is_some() {
            self.rewarded.cancel();
        }
        self.state.reset();
        self.phase = Phase::Running;
        self.notice = None;
        log::info!("New game started");
        Transition::Started
    }

    fn poll_rewarded_ad(&mut self) -> Option<Transition> {
        let waited = self.pending_ad?;
        let outcome = match self.rewarded.poll() {
            Some(outcome) => outcome,
            None if waited + 1 >= AD_TIMEOUT_FRAMES => {
                log::warn!("Rewarded ad timed out");
                self.rewarded.cancel();
                AdOutcome::NotAvailable
            }
            None => {
                self.pending_ad = Some(waited + 1);
                return None;
            }
        };
        self.pending_ad = None;

        if outcome == AdOutcome::Granted && self.phase == Phase::GameOver {
            self.state.gain_life();
            start_round(&mut self.state);
            self.phase = Phase::Paused;
            self.notice = Some(Notice::new("Extra life!", "Press Enter to continue"));
            log::info!("Extra life granted, lives: {}", self.state.lives);
            return Some(Transition::ExtraLifeGranted);
        }

        log::warn!("Rewarded ad finished without reward: {:?}", outcome);
        self.notice = Some(Notice::new("No ad available", "Press N to restart"));
        Some(Transition::AdUnavailable)
    }

    fn on_round_lost(&mut self) -> Transition {
        self.state.lives = self.state.lives.saturating_sub(1);
        self.audio.play(SoundEffect::LifeLost);

        if self.state.lives == 0 {
            return self.game_over();
        }

        start_round(&mut self.state);
        self.phase = Phase::Paused;
        let lives_left = self.state.lives;
        self.notice = Some(Notice::new(
            "Life lost",
            format!("{} left. Press Enter to continue", lives_left),
        ));
        log::info!("Round lost, {} lives left", lives_left);
        Transition::RoundLost { lives_left }
    }

    fn on_level_cleared(&mut self) -> Transition {
        self.audio.play(SoundEffect::LevelClear);
        self.state.level += 1;
        let level = self.state.level;

        if level % INTERSTITIAL_LEVEL_INTERVAL == 0 {
            let now = self.frames as f32 * SIM_DT;
            if self.interstitial.maybe_show(now) {
                log::info!("Interstitial shown at level {}", level);
            }
        }

        start_level(&mut self.state);
        self.phase = Phase::Paused;
        self.notice = Some(Notice::new(
            format!("Level {}", level),
            "Press Enter to continue",
        ));
        log::info!("Level cleared, now on level {}", level);
        Transition::LevelCleared { level }
    }

    fn game_over(&mut self) -> Transition {
        self.phase = Phase::GameOver;
        let score = self.state.score;
        let new_best = self.best.submit(score, self.store.as_mut());
        self.audio.play(SoundEffect::GameOver);

        let message = if self.rewarded.is_available() {
            "Press R to watch an ad for an extra life, or N to restart"
        } else {
            "Press N to restart"
        };
        let title = if new_best {
            format!("Game Over - new best {}", score)
        } else {
            format!("Game Over - score {}", score)
        };
        self.notice = Some(Notice::new(title, message));
        log::info!("Game over with score {} (best {})", score, self.best.value());
        Transition::GameOver { score, new_best }
    }
}
