use std::collections::VecDeque;

use js_sys::{Array, Object, Reflect};
use log::{info, warn};
use morph_core::content::{CaptionCue, CaptionSequencer, CtaAction};
use morph_core::transition::{NavDirection, TransitionEvent};
use morph_core::{MorphConfig, MorphEngine, ShapeKind};
use wasm_bindgen::prelude::*;

fn init_logging() {
    console_error_panic_hook::set_once();
    // A second world on the same page finds the logger already installed.
    if console_log::init_with_level(log::Level::Info).is_err() {
        warn!("console logger already initialised");
    }
}

fn to_js_error(err: morph_core::MorphError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct MorphWorld {
    engine: MorphEngine,
    captions: CaptionSequencer,
    cues: VecDeque<CaptionCue>,
    committed: Option<ShapeKind>,
    last_timestamp_ms: Option<f64>,
}

#[wasm_bindgen]
impl MorphWorld {
    /// Build the world from the three sample payloads (JSON arrays of
    /// `[x, y, z]`) and an optional partial JSON config override.
    #[wasm_bindgen(constructor)]
    pub fn new(
        monitor_json: &str,
        phone_json: &str,
        vr_json: &str,
        config_json: Option<String>,
    ) -> Result<MorphWorld, JsValue> {
        init_logging();

        let config = match config_json {
            Some(json) => MorphConfig::from_json(&json).map_err(to_js_error)?,
            None => MorphConfig::default(),
        };
        let engine =
            MorphEngine::from_json(monitor_json, phone_json, vr_json, config).map_err(to_js_error)?;

        info!("WASM MorphWorld created: {} particles", engine.count());

        let mut world = MorphWorld {
            engine,
            captions: CaptionSequencer::new(),
            cues: VecDeque::new(),
            committed: None,
            last_timestamp_ms: None,
        };
        // Initial caption for the starting shape.
        world.captions.swap_to(ShapeKind::Monitor);
        Ok(world)
    }

    /// Run one frame at the page's animation timestamp (milliseconds).
    /// Returns the time spent stepping, in milliseconds.
    #[wasm_bindgen]
    pub fn step(&mut self, timestamp_ms: f64) -> f32 {
        let start = js_sys::Date::now();

        let raw_dt = match self.last_timestamp_ms {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_timestamp_ms = Some(timestamp_ms);

        if !self.engine.advance(raw_dt) {
            return 0.0;
        }

        for event in self.engine.drain_events() {
            match event {
                TransitionEvent::CaptionSwap { shape } => self.captions.swap_to(shape),
                TransitionEvent::ShapeCommitted { shape } => self.committed = Some(shape),
                TransitionEvent::MorphStarted { .. } | TransitionEvent::WaveEnded => {}
            }
        }
        self.cues.extend(self.captions.advance(raw_dt.max(0.0)));

        (js_sys::Date::now() - start) as f32
    }

    /// Pause or resume stepping as the canvas leaves or enters the viewport.
    #[wasm_bindgen]
    pub fn set_visible(&mut self, visible: bool) {
        self.engine.set_running(visible);
        if visible {
            self.last_timestamp_ms = None;
        }
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.engine.count()
    }

    #[wasm_bindgen]
    pub fn get_instance_buffer_ptr(&self) -> *const f32 {
        self.engine.snapshot().instances.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn get_instance_buffer_byte_length(&self) -> usize {
        self.engine.snapshot().as_bytes().len()
    }

    /// Whether any instance colour changed during the last step.
    #[wasm_bindgen]
    pub fn colors_dirty(&self) -> bool {
        self.engine.snapshot().colors_dirty
    }

    #[wasm_bindgen]
    pub fn group_rotation(&self) -> f32 {
        self.engine.snapshot().group_rotation
    }

    #[wasm_bindgen]
    pub fn model_rotation(&self) -> f32 {
        self.engine.crossfade().rotation
    }

    #[wasm_bindgen]
    pub fn model_visible(&self, index: usize) -> bool {
        self.engine
            .crossfade()
            .visible
            .get(index)
            .copied()
            .unwrap_or(false)
    }

    #[wasm_bindgen]
    pub fn get_material_uniforms_ptr(&self) -> *const f32 {
        self.engine.crossfade().uniforms.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn get_material_uniforms_byte_length(&self) -> usize {
        self.engine.crossfade().uniform_bytes().len()
    }

    /// Pointer ray in world space, as produced by the page's raycaster.
    #[wasm_bindgen]
    pub fn set_pointer_ray(
        &mut self,
        origin_x: f32,
        origin_y: f32,
        origin_z: f32,
        dir_x: f32,
        dir_y: f32,
        dir_z: f32,
    ) {
        self.engine.pointer_ray(
            glam::Vec3::new(origin_x, origin_y, origin_z),
            glam::Vec3::new(dir_x, dir_y, dir_z),
        );
    }

    /// Returns `false` when a transition is already queued or running.
    #[wasm_bindgen]
    pub fn previous(&mut self) -> bool {
        self.engine.request(NavDirection::Previous)
    }

    #[wasm_bindgen]
    pub fn next(&mut self) -> bool {
        self.engine.request(NavDirection::Next)
    }

    #[wasm_bindgen]
    pub fn current_shape(&self) -> u32 {
        self.engine.transition().current().index() as u32
    }

    #[wasm_bindgen]
    pub fn next_shape(&self) -> u32 {
        self.engine.transition().next().index() as u32
    }

    #[wasm_bindgen]
    pub fn morph_progress(&self) -> f32 {
        self.engine.transition().progress()
    }

    /// Shape committed since the last call, if any. The page switches video
    /// playback and refreshes the CTA label when this returns a value.
    #[wasm_bindgen]
    pub fn take_committed_shape(&mut self) -> Option<u32> {
        self.committed.take().map(|s| s.index() as u32)
    }

    #[wasm_bindgen]
    pub fn cta_label(&self) -> String {
        self.engine.transition().current().content().cta_label().to_string()
    }

    /// Handle a CTA click. Returns the demo URL to navigate to, or `None`
    /// when access is denied (a pulse cue is queued instead).
    #[wasm_bindgen]
    pub fn click_cta(&mut self) -> Option<String> {
        match self.captions.click(self.engine.transition().current()) {
            CtaAction::Navigate(url) => Some(url.to_string()),
            CtaAction::Denied => None,
        }
    }

    /// Pop the next caption cue as `{ kind, shape, headingLines, description, subtext }`
    /// (shape fields only on `hide`/`reveal`), or `undefined` when none is pending.
    #[wasm_bindgen]
    pub fn next_caption_cue(&mut self) -> Result<JsValue, JsValue> {
        let Some(cue) = self.cues.pop_front() else {
            return Ok(JsValue::UNDEFINED);
        };

        let obj = Object::new();
        let (kind, shape) = match cue {
            CaptionCue::Hide(shape) => ("hide", Some(shape)),
            CaptionCue::Reveal(shape) => ("reveal", Some(shape)),
            CaptionCue::DenyPulse => ("deny-start", None),
            CaptionCue::DenyPulseEnd => ("deny-end", None),
        };
        Reflect::set(&obj, &"kind".into(), &kind.into())?;

        if let Some(shape) = shape {
            let content = shape.content();
            let lines: Array = content.heading_lines().map(JsValue::from_str).collect();
            Reflect::set(&obj, &"shape".into(), &(shape.index() as u32).into())?;
            Reflect::set(&obj, &"headingLines".into(), &lines)?;
            Reflect::set(&obj, &"description".into(), &content.description.into())?;
            Reflect::set(&obj, &"subtext".into(), &content.subtext.into())?;
        }
        Ok(obj.into())
    }
}
