//! Rendering collaborator seam.
//!
//! The engine keeps exactly one visual proxy per live entity: `add_visual`
//! when an entity is created, `remove_visual` when it is destroyed,
//! `set_visual_state` for target hit marking. `sync_transform` pushes moved
//! positions and may be ignored by sinks that read positions elsewhere.

use std::collections::BTreeMap;

use flak_core::enums::{Tint, VisualKind};
use flak_core::types::{EntityId, Transform};

pub trait RenderSink {
    fn add_visual(&mut self, id: EntityId, kind: VisualKind, transform: Transform);
    fn remove_visual(&mut self, id: EntityId);
    fn set_visual_state(&mut self, id: EntityId, tint: Tint);
    fn sync_transform(&mut self, _id: EntityId, _transform: Transform) {}
}

/// Discards every call. Used when running headless.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl RenderSink for NullRenderer {
    fn add_visual(&mut self, _id: EntityId, _kind: VisualKind, _transform: Transform) {}
    fn remove_visual(&mut self, _id: EntityId) {}
    fn set_visual_state(&mut self, _id: EntityId, _tint: Tint) {}
}

/// A proxy as seen by [`RecordingRenderer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualRecord {
    pub kind: VisualKind,
    pub transform: Transform,
    pub tint: Option<Tint>,
}

/// Keeps the current proxy set in memory and counts calls.
///
/// Removing or tinting an unknown id is counted as a stray call, which lets
/// tests assert the engine never double-destroys a visual.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    visuals: BTreeMap<EntityId, VisualRecord>,
    pub added: usize,
    pub removed: usize,
    pub stray_calls: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visual(&self, id: EntityId) -> Option<&VisualRecord> {
        self.visuals.get(&id)
    }

    pub fn live_count(&self) -> usize {
        self.visuals.len()
    }
}

impl RenderSink for RecordingRenderer {
    fn add_visual(&mut self, id: EntityId, kind: VisualKind, transform: Transform) {
        self.added += 1;
        let previous = self.visuals.insert(
            id,
            VisualRecord {
                kind,
                transform,
                tint: None,
            },
        );
        if previous.is_some() {
            self.stray_calls += 1;
        }
    }

    fn remove_visual(&mut self, id: EntityId) {
        if self.visuals.remove(&id).is_some() {
            self.removed += 1;
        } else {
            self.stray_calls += 1;
        }
    }

    fn set_visual_state(&mut self, id: EntityId, tint: Tint) {
        match self.visuals.get_mut(&id) {
            Some(record) => record.tint = Some(tint),
            None => self.stray_calls += 1,
        }
    }

    fn sync_transform(&mut self, id: EntityId, transform: Transform) {
        match self.visuals.get_mut(&id) {
            Some(record) => record.transform = transform,
            None => self.stray_calls += 1,
        }
    }
}
