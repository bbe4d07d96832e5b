use std::collections::VecDeque;

// ── Events ──────────────────────────────────────────────────────────────────

/// Cross-component notifications. Published from anywhere (hotkeys, settings
/// UI), consumed by the character and the distraction manager.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AppEvent {
    /// Change the character's scale factor (applied to both axes).
    ScaleChange(f32),
    /// Enable/disable idle wandering.
    IdleMovementToggle(bool),
    /// Set the ambient-distraction level, `0..=MAX_DISTRACTION_LEVEL`.
    DistractionLevelSet(u32),
}

// ── EventBus ────────────────────────────────────────────────────────────────

/// Synchronous notification inbox.
///
/// `publish` only enqueues; the host drains the queue at the top of each
/// simulation tick and hands every event to each subscriber's handler in
/// publish order. Delivery therefore always happens-before the tick's
/// update pipeline and never interleaves mid-pipeline.
#[derive(Default)]
pub struct EventBus {
    queue: VecDeque<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, event: AppEvent) {
        self.queue.push_back(event);
    }

    /// Take every pending event, oldest first. The queue is left empty.
    pub fn drain(&mut self) -> Vec<AppEvent> {
        self.queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
