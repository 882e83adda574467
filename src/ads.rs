//! Optional monetization capabilities
//!
//! Both ad kinds are polled, never awaited: the frame driver keeps running
//! while an ad is pending and the game reacts to the outcome when it lands.

use crate::consts::INTERSTITIAL_COOLDOWN_SECS;

/// Result of showing a rewarded ad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdOutcome {
    /// Watched to the end; grant the reward
    Granted,
    /// Nothing to show (not loaded, unsupported platform, timed out)
    NotAvailable,
    /// Started but errored or was dismissed early
    Failed,
}

/// Rewarded ad ("watch to continue") capability
pub trait RewardedAd {
    fn is_available(&self) -> bool;

    /// Begin showing the ad; the outcome arrives later through `poll`
    fn request(&mut self);

    /// Outcome of the last request, once it is known
    fn poll(&mut self) -> Option<AdOutcome>;

    /// Abandon a pending request
    fn cancel(&mut self) {}
}

/// Interstitial ad capability
pub trait InterstitialAd {
    /// Show an interstitial if one is ready. `now` is game-clock seconds.
    /// Returns true if one was shown.
    fn maybe_show(&mut self, now: f32) -> bool;
}

/// No ad SDK on this platform
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAds;

impl RewardedAd for NoAds {
    fn is_available(&self) -> bool {
        false
    }

    fn request(&mut self) {}

    fn poll(&mut self) -> Option<AdOutcome> {
        Some(AdOutcome::NotAvailable)
    }
}

impl InterstitialAd for NoAds {
    fn maybe_show(&mut self, _now: f32) -> bool {
        false
    }
}

/// Interstitial wrapper enforcing a minimum gap between shows
#[derive(Debug, Clone)]
pub struct RateLimitedInterstitial<I> {
    inner: I,
    cooldown: f32,
    last_shown: Option<f32>,
}

impl<I: InterstitialAd> RateLimitedInterstitial<I> {
    pub fn new(inner: I) -> Self {
        Self::with_cooldown(inner, INTERSTITIAL_COOLDOWN_SECS)
    }

    pub fn with_cooldown(inner: I, cooldown: f32) -> Self {
        Self {
            inner,
            cooldown,
            last_shown: None,
        }
    }

    pub fn inner(&self) -> &I {
        &self.inner
    }
}

impl<I: InterstitialAd> InterstitialAd for RateLimitedInterstitial<I> {
    fn maybe_show(&mut self, now: f32) -> bool {
        if let Some(last) = self.last_shown {
            if now - last < self.cooldown {
                log::debug!("Interstitial suppressed ({:.0}s since last)", now - last);
                return false;
            }
        }
        let shown = self.inner.maybe_show(now);
        if shown {
            self.last_shown = Some(now);
        }
        shown
    }
}
