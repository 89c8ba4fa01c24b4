//! Signature capture: record freehand pointer strokes as line segments and
//! rasterize them into a bitmap when the user is done.
//!
//! ```
//! use signature_pad::{PadConfig, Point, SignaturePad};
//!
//! let mut pad = SignaturePad::new(PadConfig::default());
//! pad.pointer_down(Point::new(10.0, 10.0));
//! pad.pointer_move(Point::new(60.0, 40.0));
//! pad.pointer_up();
//!
//! let image = pad.complete().expect("strokes were drawn");
//! assert!(!image.is_blank());
//! ```

pub mod config;
pub mod error;
pub mod gesture;
pub mod pad;
pub mod render;
pub mod state;
pub mod types;

pub use config::PadConfig;
pub use error::{Error, Result};
pub use gesture::GestureTracker;
pub use pad::{PadPhase, SignatureAction, SignaturePad};
pub use render::{render_segments, Guideline, RenderOptions, SignatureImage, StrokeStyle};
pub use state::{SavedSignature, SignatureState};
pub use types::{Color, FrameBuffer, Point, Segment};
