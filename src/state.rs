//! Capture state: the ordered segment list plus the last rendered image.
//!
//! Hosts detect changes through [`SignatureState::revision`], which moves
//! whenever the segment list changes. A cached image remembers the revision
//! it was rendered at, so [`SignatureState::is_stale`] tells the host when a
//! re-render is due.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::render::{render_segments, RenderOptions, SignatureImage};
use crate::types::Segment;

#[derive(Debug)]
struct Rendered {
    image: SignatureImage,
    revision: u64,
    options: Option<RenderOptions>, // None when handed in by the host
}

#[derive(Debug, Default)]
pub struct SignatureState {
    segments: Vec<Segment>,
    revision: u64,
    rendered: Option<Rendered>,
}

/// Serialized form: one `[start x, start y, end x, end y]` record per segment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedSignature(pub Vec<[f32; 4]>);

impl SignatureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, segment: Segment) {
        self.segments.push(segment);
        self.revision += 1;
    }

    /// Drop every segment. Clearing an empty state changes nothing, not even the revision.
    pub fn clear(&mut self) {
        if self.segments.is_empty() {
            return;
        }
        debug!(count = self.segments.len(), "clearing signature");
        self.segments.clear();
        self.revision += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Rasterize the current segments. Pure: does not touch the cached image.
    pub fn render(&self, width: u32, height: u32, options: &RenderOptions) -> SignatureImage {
        render_segments(&self.segments, width, height, options)
    }

    /// Store an image as rendered from the current revision.
    pub fn update_signature(&mut self, image: SignatureImage) {
        self.rendered = Some(Rendered { image, revision: self.revision, options: None });
    }

    /// Last rendered image, which may be stale; check [`Self::is_stale`].
    pub fn signature(&self) -> Option<&SignatureImage> {
        self.rendered.as_ref().map(|r| &r.image)
    }

    pub fn is_stale(&self) -> bool {
        self.rendered.as_ref().is_none_or(|r| r.revision != self.revision)
    }

    /// Re-render into the cache unless it already holds this revision at this
    /// size with these options.
    pub fn refresh(&mut self, width: u32, height: u32, options: &RenderOptions) -> &SignatureImage {
        let mismatched = self.rendered.as_ref().is_some_and(|r| {
            r.image.width() != width || r.image.height() != height || r.options.as_ref() != Some(options)
        });
        if self.is_stale() || mismatched {
            self.rendered = None;
        }
        let revision = self.revision;
        let segments = &self.segments;
        &self
            .rendered
            .get_or_insert_with(|| Rendered {
                image: render_segments(segments, width, height, options),
                revision,
                options: Some(options.clone()),
            })
            .image
    }

    pub fn save(&self) -> SavedSignature {
        SavedSignature(self.segments.iter().map(Segment::to_tuple).collect())
    }

    /// Rebuild from saved records. The image is not restored; it is re-rendered on demand.
    pub fn restore(saved: &SavedSignature) -> Result<Self> {
        for (index, t) in saved.0.iter().enumerate() {
            if t.iter().any(|v| !v.is_finite()) {
                return Err(Error::NonFiniteState { index });
            }
        }
        let segments: Vec<Segment> = saved.0.iter().copied().map(Segment::from_tuple).collect();
        debug!(count = segments.len(), "restored signature");
        let revision = segments.len() as u64;
        Ok(Self { segments, revision, rendered: None })
    }

    /// Rebuild from untyped number lists. Any entry that is not exactly four
    /// finite numbers rejects the whole input.
    pub fn restore_flat(records: &[Vec<f32>]) -> Result<Self> {
        let mut tuples = Vec::with_capacity(records.len());
        for (index, rec) in records.iter().enumerate() {
            let tuple: [f32; 4] = rec
                .as_slice()
                .try_into()
                .map_err(|_| Error::MalformedState { index, len: rec.len() })?;
            tuples.push(tuple);
        }
        Self::restore(&SavedSignature(tuples))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.save()).map_err(|e| Error::StateEncoding(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<Vec<f32>> =
            serde_json::from_str(json).map_err(|e| Error::StateEncoding(e.to_string()))?;
        Self::restore_flat(&records)
    }
}
