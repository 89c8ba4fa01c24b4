//! The signature pad a host embeds: pointer input in, images out.
//!
//! The pad is either [`PadPhase::Empty`] or [`PadPhase::Drawing`]. `Complete`
//! hands the host the rendered strokes, or `None` when nothing was drawn;
//! `Clear` goes back to `Empty` from anywhere. Completion is a one-shot
//! callback and the pad stays usable afterwards unless the host disables input.

use tracing::{debug, info};

use crate::config::PadConfig;
use crate::gesture::GestureTracker;
use crate::render::{render_segments, SignatureImage};
use crate::state::SignatureState;
use crate::types::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAction {
    Clear,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadPhase {
    Empty,
    Drawing,
}

type CompleteCallback = Box<dyn FnMut(Option<SignatureImage>)>;
type ClearCallback = Box<dyn FnMut()>;

pub struct SignaturePad {
    config: PadConfig,
    state: SignatureState,
    gesture: GestureTracker,
    input_enabled: bool,
    on_complete: Option<CompleteCallback>,
    on_clear: Option<ClearCallback>,
}

impl SignaturePad {
    pub fn new(config: PadConfig) -> Self {
        Self::with_state(config, SignatureState::new())
    }

    /// Start from previously captured strokes (e.g. after a save/restore).
    pub fn with_state(config: PadConfig, state: SignatureState) -> Self {
        Self {
            config,
            state,
            gesture: GestureTracker::new(),
            input_enabled: true,
            on_complete: None,
            on_clear: None,
        }
    }

    pub fn on_complete(mut self, f: impl FnMut(Option<SignatureImage>) + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn on_clear(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_clear = Some(Box::new(f));
        self
    }

    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    pub fn state(&self) -> &SignatureState {
        &self.state
    }

    pub fn into_state(self) -> SignatureState {
        self.state
    }

    pub fn phase(&self) -> PadPhase {
        if self.state.is_empty() { PadPhase::Empty } else { PadPhase::Drawing }
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Hint text shows over an empty pad, only alongside the guideline.
    pub fn hint_visible(&self) -> bool {
        self.config.show_guideline && self.state.is_empty()
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn set_input_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.gesture.end();
        }
        self.input_enabled = enabled;
    }

    /* ---------- pointer input ---------- */

    pub fn pointer_down(&mut self, at: Point) {
        if self.input_enabled {
            self.gesture.begin(at);
        }
    }

    pub fn pointer_move(&mut self, to: Point) {
        if !self.input_enabled {
            return;
        }
        if let Some(segment) = self.gesture.move_to(to) {
            self.state.append(segment);
        }
    }

    pub fn pointer_up(&mut self) {
        self.gesture.end();
    }

    /* ---------- actions ---------- */

    pub fn handle_action(&mut self, action: SignatureAction) {
        match action {
            SignatureAction::Clear => {
                self.clear();
                if let Some(cb) = self.on_clear.as_mut() {
                    cb();
                }
            }
            SignatureAction::Complete => {
                let image = self.complete();
                if let Some(cb) = self.on_complete.as_mut() {
                    cb(image);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.gesture.end();
        self.state.clear();
    }

    /// The finished signature, or `None` when no strokes were captured.
    pub fn complete(&self) -> Option<SignatureImage> {
        if self.state.is_empty() {
            debug!("complete requested on an empty pad");
            return None;
        }
        let image = render_segments(
            self.state.segments(),
            self.config.width,
            self.config.height,
            &self.config.completion_options(),
        );
        info!(segments = self.state.len(), width = image.width(), height = image.height(), "signature completed");
        Some(image)
    }

    /// On-screen image at the configured size, re-rendered only when strokes changed.
    pub fn preview(&mut self) -> &SignatureImage {
        let options = self.config.preview_options();
        self.state.refresh(self.config.width, self.config.height, &options)
    }

    /// Whether the cached preview is out of date.
    pub fn needs_redraw(&self) -> bool {
        self.state.is_stale()
    }
}
