//! Caption and call-to-action content for each shape.

use crate::shapes::ShapeKind;
use crate::timeline::Timeline;

/// Seconds the old caption stays faded out before the new one is revealed.
pub const CAPTION_SWAP_DELAY: f32 = 0.3;
/// Seconds the denied-click pulse stays on the CTA button.
pub const DENY_PULSE_DURATION: f32 = 0.5;

pub const CTA_VIEW_DEMO: &str = "VIEW DEMO";
pub const CTA_ACCESS_DENIED: &str = "ACCESS DENIED";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShowcaseContent {
    pub heading: &'static str,
    pub description: &'static str,
    pub subtext: &'static str,
    /// Demo link; empty when the demo is not public.
    pub url: &'static str,
}

const MONITOR: ShowcaseContent = ShowcaseContent {
    heading: "Product Stories",
    description: "Interactive narratives that turn complex content into clear, engaging digital products.",
    subtext: "Reports · Case studies · Platforms",
    url: "/temp-demo",
};

const PHONE: ShowcaseContent = ShowcaseContent {
    heading: "Living Interfaces",
    description: "Interactions designed to respond, adapt, and guide users through story-led experiences.",
    subtext: "Apps · Web apps · Interactive systems",
    url: "",
};

const VR: ShowcaseContent = ShowcaseContent {
    heading: "Immersive Narratives",
    description: "Stories extended into spatial and immersive environments that invite exploration.",
    subtext: "AR · VR · Spatial experiences",
    url: "",
};

/// What a click on the call-to-action button should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CtaAction {
    Navigate(&'static str),
    Denied,
}

impl ShowcaseContent {
    /// Heading words, one per display line.
    pub fn heading_lines(&self) -> impl Iterator<Item = &'static str> {
        self.heading.split(' ')
    }

    pub fn cta_label(&self) -> &'static str {
        if self.url.is_empty() {
            CTA_ACCESS_DENIED
        } else {
            CTA_VIEW_DEMO
        }
    }

    pub fn cta_action(&self) -> CtaAction {
        if self.url.is_empty() {
            CtaAction::Denied
        } else {
            CtaAction::Navigate(self.url)
        }
    }
}

impl ShapeKind {
    pub fn content(self) -> &'static ShowcaseContent {
        match self {
            ShapeKind::Monitor => &MONITOR,
            ShapeKind::Phone => &PHONE,
            ShapeKind::Vr => &VR,
        }
    }
}

/// Cue for the page's caption and CTA elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptionCue {
    /// Fade the caption block out ahead of showing `ShapeKind`.
    Hide(ShapeKind),
    /// Replace the caption text with this shape's content and fade it in.
    Reveal(ShapeKind),
    DenyPulse,
    DenyPulseEnd,
}

/// Turns transition and click events into timed caption cues.
#[derive(Debug, Default)]
pub struct CaptionSequencer {
    timeline: Timeline<CaptionCue>,
}

impl CaptionSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn swap_to(&mut self, shape: ShapeKind) {
        self.timeline.schedule(0.0, CaptionCue::Hide(shape));
        self.timeline.schedule(CAPTION_SWAP_DELAY, CaptionCue::Reveal(shape));
    }

    /// Handle a CTA click while `shape` is current.
    pub fn click(&mut self, shape: ShapeKind) -> CtaAction {
        let action = shape.content().cta_action();
        if action == CtaAction::Denied {
            self.timeline.schedule(0.0, CaptionCue::DenyPulse);
            self.timeline.schedule(DENY_PULSE_DURATION, CaptionCue::DenyPulseEnd);
        }
        action
    }

    pub fn advance(&mut self, dt: f32) -> Vec<CaptionCue> {
        self.timeline.advance(dt)
    }
}
