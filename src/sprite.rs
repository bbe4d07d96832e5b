use glam::Vec2;

use crate::geometry::Orientation;

// ── Frame metadata ──────────────────────────────────────────────────────────

/// Size and length of one animation strip.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameSet {
    pub frame_w: f32,
    pub frame_h: f32,
    pub frames: u32,
}

impl FrameSet {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.frame_w, self.frame_h)
    }
}

/// Frame layout of a sheet: either one strip used for every facing, or a
/// strip per orientation (strips may differ in frame size between rows).
#[derive(Clone, Debug)]
pub enum Frames {
    Uniform(FrameSet),
    /// Indexed by `Orientation::ALL` order: Up, Down, Left, Right.
    Oriented([FrameSet; 4]),
}

fn orientation_index(o: Orientation) -> usize {
    match o {
        Orientation::Up => 0,
        Orientation::Down => 1,
        Orientation::Left => 2,
        Orientation::Right => 3,
    }
}

// ── AnimatedSprite ──────────────────────────────────────────────────────────

/// Playback clock over a frame strip. Rendering is the host's business; the
/// simulation only needs frame sizes and where the clock currently is.
#[derive(Clone, Debug)]
pub struct AnimatedSprite {
    frames: Frames,
    fps: f32,
    looping: bool,
    orientation: Orientation,
    clock: f32,
    stopped: bool,
}

impl AnimatedSprite {
    pub fn new(frames: Frames, fps: f32, looping: bool) -> Self {
        Self {
            frames,
            fps: fps.max(1.0),
            looping,
            orientation: Orientation::Down,
            clock: 0.0,
            stopped: false,
        }
    }

    /// Advance the animation clock by `dt` seconds. Does nothing once the
    /// sprite is stopped or a non-looping strip has finished.
    pub fn update(&mut self, dt: f32) {
        if self.stopped || self.finished() {
            return;
        }
        self.clock += dt;
    }

    /// Halt playback and rewind to the first frame.
    pub fn stop(&mut self) {
        self.stopped = true;
        self.clock = 0.0;
    }

    pub fn resume(&mut self) {
        self.stopped = false;
    }

    /// True when a non-looping strip has played through every frame.
    /// Looping sprites never finish.
    pub fn finished(&self) -> bool {
        !self.looping && self.clock * self.fps >= self.active_set().frames as f32
    }

    /// Current frame index within the active strip.
    pub fn frame_index(&self) -> u32 {
        let set = self.active_set();
        let raw = (self.clock * self.fps) as u32;
        if self.looping {
            raw % set.frames.max(1)
        } else {
            raw.min(set.frames.saturating_sub(1))
        }
    }

    /// Whether this sprite carries directional strips.
    pub fn is_oriented(&self) -> bool {
        matches!(self.frames, Frames::Oriented(_))
    }

    /// Select the strip for `orientation`. A no-op for uniform sheets.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Frame size of the strip currently selected by orientation.
    pub fn frame_size(&self) -> Vec2 {
        self.active_set().size()
    }

    /// Largest frame size across all orientations. Oriented sheets may have
    /// wider side-facing frames than front-facing ones, so the window must be
    /// sized for the worst case.
    pub fn max_frame_size(&self) -> Vec2 {
        match &self.frames {
            Frames::Uniform(set) => set.size(),
            Frames::Oriented(sets) => sets.iter().fold(Vec2::ZERO, |acc, s| acc.max(s.size())),
        }
    }

    fn active_set(&self) -> &FrameSet {
        match &self.frames {
            Frames::Uniform(set) => set,
            Frames::Oriented(sets) => &sets[orientation_index(self.orientation)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(w: f32, h: f32, frames: u32) -> FrameSet {
        FrameSet { frame_w: w, frame_h: h, frames }
    }

    #[test]
    fn looping_sprite_wraps() {
        let mut s = AnimatedSprite::new(Frames::Uniform(strip(32.0, 32.0, 4)), 10.0, true);
        s.update(0.55); // 5.5 frames in
        assert_eq!(s.frame_index(), 1);
        assert!(!s.finished());
    }

    #[test]
    fn non_looping_sprite_finishes_on_last_frame() {
        let mut s = AnimatedSprite::new(Frames::Uniform(strip(32.0, 32.0, 4)), 10.0, false);
        s.update(1.0);
        assert!(s.finished());
        assert_eq!(s.frame_index(), 3);
    }

    #[test]
    fn max_frame_size_spans_orientations() {
        let s = AnimatedSprite::new(
            Frames::Oriented([
                strip(30.0, 40.0, 2),
                strip(30.0, 40.0, 2),
                strip(48.0, 36.0, 2),
                strip(48.0, 36.0, 2),
            ]),
            8.0,
            true,
        );
        assert_eq!(s.max_frame_size(), Vec2::new(48.0, 40.0));
    }
}
