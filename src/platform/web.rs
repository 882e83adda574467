//! Browser backends

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AudioContext, CanvasRenderingContext2d, GainNode, HtmlCanvasElement, OscillatorNode,
    OscillatorType, Storage,
};

use crate::audio::{Tone, ToneSink};
use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::error::StoreError;
use crate::highscores::KeyValueStore;
use crate::render::{Color, RenderSurface, TextAlign, TextStyle};
use crate::sim::Rect;

fn js_err(e: JsValue) -> StoreError {
    StoreError::Unavailable(format!("{:?}", e))
}

/// LocalStorage-backed key-value store
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn open() -> Result<Self, StoreError> {
        let storage = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(js_err)?
            .ok_or_else(|| StoreError::Unavailable("LocalStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get_number(&self, key: &str) -> Result<Option<f64>, StoreError> {
        let raw = self.storage.get_item(key).map_err(js_err)?;
        Ok(raw.and_then(|s| s.trim().parse().ok()))
    }

    fn set_number(&mut self, key: &str, value: f64) -> Result<(), StoreError> {
        self.storage
            .set_item(key, &value.to_string())
            .map_err(js_err)
    }
}

/// Square-wave beeps through Web Audio
///
/// The context is created on first use; browsers only allow it after a user
/// gesture, so creating it up front often leaves it suspended.
#[derive(Default)]
pub struct WebToneSink {
    ctx: Option<AudioContext>,
    /// Context creation failed once; stay silent
    disabled: bool,
}

impl WebToneSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&mut self) -> Option<&AudioContext> {
        if self.ctx.is_none() && !self.disabled {
            match AudioContext::new() {
                Ok(ctx) => self.ctx = Some(ctx),
                Err(_) => {
                    log::warn!("Failed to create AudioContext - audio disabled");
                    self.disabled = true;
                }
            }
        }
        self.ctx.as_ref()
    }

    /// Create an oscillator routed through a gain node
    fn create_osc(ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(OscillatorType::Square);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}

impl ToneSink for WebToneSink {
    fn play(&mut self, tone: Tone, volume: f32, delay: f32) {
        let Some(ctx) = self.context() else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let Some((osc, gain)) = Self::create_osc(ctx, tone.frequency) else {
            return;
        };
        let start = ctx.current_time() + delay as f64;

        gain.gain().set_value_at_time(0.05 * volume, start).ok();
        osc.start_with_when(start).ok();
        osc.stop_with_when(start + tone.duration as f64).ok();
    }
}

/// Canvas 2D drawing surface in world coordinates
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Size the canvas to the world and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        canvas.set_width(WORLD_WIDTH as u32);
        canvas.set_height(WORLD_HEIGHT as u32);
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    fn set_fill(&self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
    }
}

impl RenderSurface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, WORLD_WIDTH as f64, WORLD_HEIGHT as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.set_fill(color);
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.set_fill(color);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn draw_text(&mut self, text: &str, position: Vec2, style: &TextStyle) {
        self.set_fill(style.color);
        self.ctx.set_font(&style.to_css_font());
        self.ctx.set_text_align(match style.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        });
        self.ctx.set_text_baseline("middle");
        let _ = self
            .ctx
            .fill_text(text, position.x as f64, position.y as f64);
    }
}
