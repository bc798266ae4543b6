//! Audio backend using the Web Audio API
//!
//! Cues are synthesised with oscillators. Clips go through the fallback
//! chain: cached buffer, fetch + decode, media element, fire-and-forget.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AudioBuffer, AudioContext, AudioContextState, GainNode, HtmlAudioElement, HtmlMediaElement,
    OscillatorNode, OscillatorType, Response,
};

use super::chain::{ClipPlayer, LocalBoxFuture, PlaybackError, PlaybackStep};
use super::{Cue, PageSound, Waveform, cache_busted_url};

impl From<JsValue> for PlaybackError {
    fn from(value: JsValue) -> Self {
        PlaybackError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<Waveform> for OscillatorType {
    fn from(waveform: Waveform) -> Self {
        match waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Triangle => OscillatorType::Triangle,
        }
    }
}

/// Audio manager shared by every sound on the page
pub struct AudioManager {
    /// Created on first use, at most once
    ctx: RefCell<Option<AudioContext>>,
    ctx_attempted: Cell<bool>,
    /// Decoded clips by URL
    buffers: RefCell<HashMap<String, AudioBuffer>>,
    /// Media elements by URL, reused between plays
    elements: RefCell<HashMap<String, HtmlAudioElement>>,
    volume: Cell<f32>,
}

impl AudioManager {
    pub fn new(volume: f32) -> Self {
        Self {
            ctx: RefCell::new(None),
            ctx_attempted: Cell::new(false),
            buffers: RefCell::new(HashMap::new()),
            elements: RefCell::new(HashMap::new()),
            volume: Cell::new(volume.clamp(0.0, 1.0)),
        }
    }

    /// The shared context, created lazily
    pub fn context(&self) -> Option<AudioContext> {
        if !self.ctx_attempted.replace(true) {
            match AudioContext::new() {
                Ok(ctx) => *self.ctx.borrow_mut() = Some(ctx),
                Err(e) => log::warn!("Failed to create AudioContext - audio disabled: {:?}", e),
            }
        }
        self.ctx.borrow().clone()
    }

    /// Resume the context if the browser suspended it (needs a user gesture)
    pub fn ensure_resumed(&self) -> Option<AudioContext> {
        let ctx = self.context()?;
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    }

    pub fn set_volume(&self, vol: f32) {
        self.volume.set(vol.clamp(0.0, 1.0));
    }

    pub fn volume(&self) -> f32 {
        self.volume.get()
    }

    /// Play a synthesised cue
    pub fn play(&self, cue: Cue) {
        let vol = self.volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.ensure_resumed() else {
            return;
        };

        let voice = cue.voice();
        let Some((osc, gain)) = self.create_osc(&ctx, voice.freq_hz, voice.waveform.into()) else {
            return;
        };
        let t = ctx.current_time();
        let end = t + voice.duration_s;

        gain.gain().set_value_at_time(vol * voice.gain, t).ok();
        if voice.fade_out {
            gain.gain().exponential_ramp_to_value_at_time(0.001, end).ok();
        }
        if let Some(target) = voice.end_freq_hz {
            osc.frequency().set_value_at_time(voice.freq_hz, t).ok();
            osc.frequency().exponential_ramp_to_value_at_time(target, end).ok();
        }

        osc.start().ok();
        osc.stop_with_when(end).ok();
    }

    /// Play one of the page's own `<audio>` elements, if present
    pub fn play_page_sound(&self, sound: PageSound) {
        let el = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(sound.element_id()))
            .and_then(|el| el.dyn_into::<HtmlMediaElement>().ok());
        let Some(el) = el else { return };

        let base = sound.volume().unwrap_or(1.0);
        el.set_volume(base * self.volume() as f64);
        el.set_current_time(0.0);
        let _ = el.play();
    }

    /// Pause every media element and close the context
    pub fn release(&self) {
        for el in self.elements.borrow().values() {
            let _ = el.pause();
        }
        self.buffers.borrow_mut().clear();
        if let Some(ctx) = self.ctx.borrow_mut().take() {
            let _ = ctx.close();
            log::info!("Audio context closed");
        }
    }

    /// Create an oscillator routed through a gain node
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn play_buffer(&self, ctx: &AudioContext, buffer: &AudioBuffer) -> Result<(), PlaybackError> {
        let src = ctx.create_buffer_source()?;
        let gain = ctx.create_gain()?;
        src.set_buffer(Some(buffer));
        gain.gain().set_value(self.volume());
        src.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;
        src.start()?;
        Ok(())
    }

    async fn fetch_decode(&self, url: &str) -> Result<(), PlaybackError> {
        let ctx = self.ensure_resumed().ok_or(PlaybackError::NoContext)?;
        let window = web_sys::window().ok_or(PlaybackError::NoContext)?;
        let fresh = cache_busted_url(url, js_sys::Date::now() as u64);

        let response: Response = JsFuture::from(window.fetch_with_str(&fresh)).await?.dyn_into()?;
        if !response.ok() {
            return Err(PlaybackError::Status(response.status()));
        }
        let bytes: js_sys::ArrayBuffer = JsFuture::from(response.array_buffer()?).await?.dyn_into()?;
        let buffer: AudioBuffer = JsFuture::from(ctx.decode_audio_data(&bytes)?).await?.dyn_into()?;

        self.buffers.borrow_mut().insert(url.to_string(), buffer.clone());
        self.play_buffer(&ctx, &buffer)
    }

    async fn media_element(&self, url: &str) -> Result<(), PlaybackError> {
        let existing = self.elements.borrow().get(url).cloned();
        let el = match existing {
            Some(el) => el,
            None => {
                let el = HtmlAudioElement::new_with_src(url)?;
                el.set_cross_origin(Some("anonymous"));
                // Route through the context when CORS allows, otherwise play direct
                if let Some(ctx) = self.context() {
                    if let Ok(node) = ctx.create_media_element_source(&el) {
                        let _ = node.connect_with_audio_node(&ctx.destination());
                    }
                }
                self.elements.borrow_mut().insert(url.to_string(), el.clone());
                el
            }
        };

        self.ensure_resumed();
        el.set_volume(self.volume() as f64);
        el.set_current_time(0.0);
        JsFuture::from(el.play()?).await?;
        Ok(())
    }

    fn fire_and_forget(&self, url: &str) {
        if let Ok(el) = HtmlAudioElement::new_with_src(url) {
            el.set_volume(self.volume() as f64);
            let _ = el.play();
        }
    }
}

impl ClipPlayer for AudioManager {
    fn attempt<'a>(
        &'a self,
        step: PlaybackStep,
        url: &'a str,
    ) -> LocalBoxFuture<'a, Result<(), PlaybackError>> {
        Box::pin(async move {
            match step {
                PlaybackStep::CachedBuffer => {
                    let ctx = self.ensure_resumed().ok_or(PlaybackError::NoContext)?;
                    let buffer = self
                        .buffers
                        .borrow()
                        .get(url)
                        .cloned()
                        .ok_or(PlaybackError::NotCached)?;
                    self.play_buffer(&ctx, &buffer)
                }
                PlaybackStep::FetchDecode => self.fetch_decode(url).await,
                PlaybackStep::MediaElement => self.media_element(url).await,
                PlaybackStep::FireAndForget => {
                    self.fire_and_forget(url);
                    Ok(())
                }
            }
        })
    }
}
