// narration.rs - Fire-and-forget spoken cues
//
// Narration is cosmetic. Nothing here may block or fail the caller: a
// missing speech platform or an empty voice list just means silence or the
// platform default voice.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::config::NarrationConfig;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    pub lang: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// None = platform default voice.
    pub voice: Option<String>,
    pub lang: String,
    pub rate: f32,
}

pub trait Narrator {
    fn announce(&mut self, text: &str);
}

/// A platform text-to-speech facility.
pub trait SpeechBackend {
    /// Voices on offer right now. None when speech is unavailable.
    fn voices(&self) -> Option<Vec<Voice>>;
    /// Stop whatever is being spoken.
    fn cancel(&mut self);
    fn speak(&mut self, utterance: Utterance);
}

/// Best voice for the preferences: exact name, then name hint, then locale.
pub fn pick_voice<'a>(voices: &'a [Voice], prefs: &NarrationConfig) -> Option<&'a Voice> {
    voices
        .iter()
        .find(|v| v.name == prefs.voice)
        .or_else(|| {
            if prefs.voice_hint.is_empty() { return None; }
            voices.iter().find(|v| v.name.contains(&prefs.voice_hint))
        })
        .or_else(|| voices.iter().find(|v| v.lang == prefs.locale))
}

/// Narrator over a speech backend; the voice is resolved on every call.
pub struct Announcer<B> {
    backend: B,
    prefs: NarrationConfig,
}

impl<B: SpeechBackend> Announcer<B> {
    pub fn new(backend: B, prefs: NarrationConfig) -> Self {
        Self { backend, prefs }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: SpeechBackend> Narrator for Announcer<B> {
    fn announce(&mut self, text: &str) {
        let Some(voices) = self.backend.voices() else {
            log::debug!("narration: no speech platform, skipping cue");
            return;
        };
        let voice = pick_voice(&voices, &self.prefs).map(|v| v.name.clone());
        if voice.is_none() {
            log::debug!("narration: no matching voice among {}, using default", voices.len());
        }

        self.backend.cancel();
        self.backend.speak(Utterance {
            text: text.to_string(),
            voice,
            lang: self.prefs.locale.clone(),
            rate: self.prefs.rate,
        });
    }
}

/// Drops every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn announce(&mut self, _text: &str) {}
}

/// Logs and keeps every cue, for headless runs.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Narrator for Transcript {
    fn announce(&mut self, text: &str) {
        log::info!("narration: {text}");
        self.lines.push(text.to_string());
    }
}

/// Speech provided by the JS host.
///
/// `speak(text, voiceName | null, lang, rate)` is required. `cancel()` and
/// `voices() -> [{ name, lang }]` are optional; without `voices` the
/// platform default voice is used.
pub struct JsSpeech {
    speak: js_sys::Function,
    cancel: Option<js_sys::Function>,
    voices: Option<js_sys::Function>,
}

impl JsSpeech {
    pub fn new(
        speak: js_sys::Function,
        cancel: Option<js_sys::Function>,
        voices: Option<js_sys::Function>,
    ) -> Self {
        Self { speak, cancel, voices }
    }
}

impl SpeechBackend for JsSpeech {
    fn voices(&self) -> Option<Vec<Voice>> {
        let Some(f) = &self.voices else { return Some(Vec::new()) };
        let list = match f.call0(&JsValue::NULL) {
            Ok(v) if js_sys::Array::is_array(&v) => js_sys::Array::from(&v),
            Ok(_) => return Some(Vec::new()),
            Err(e) => {
                log::debug!("narration: voices() threw {e:?}");
                return Some(Vec::new());
            }
        };

        let field = |v: &JsValue, key: &str| {
            js_sys::Reflect::get(v, &JsValue::from_str(key))
                .ok()
                .and_then(|s| s.as_string())
                .unwrap_or_default()
        };
        Some(
            list.iter()
                .map(|v| Voice { name: field(&v, "name"), lang: field(&v, "lang") })
                .collect(),
        )
    }

    fn cancel(&mut self) {
        if let Some(f) = &self.cancel {
            if let Err(e) = f.call0(&JsValue::NULL) {
                log::debug!("narration: cancel() threw {e:?}");
            }
        }
    }

    fn speak(&mut self, u: Utterance) {
        let args = js_sys::Array::of4(
            &JsValue::from_str(&u.text),
            &u.voice.as_deref().map_or(JsValue::NULL, JsValue::from_str),
            &JsValue::from_str(&u.lang),
            &JsValue::from_f64(u.rate as f64),
        );
        if let Err(e) = self.speak.apply(&JsValue::NULL, &args) {
            log::debug!("narration: speak() threw {e:?}");
        }
    }
}
