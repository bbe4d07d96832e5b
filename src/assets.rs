use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::character::CharacterParams;
use crate::sprite::{AnimatedSprite, FrameSet, Frames};

// ── Descriptors ─────────────────────────────────────────────────────────────

/// One animation strip on disk. `files` holds either a single sheet used for
/// every facing, or four sheets in Up/Down/Left/Right order — the rows may
/// differ in frame size, which is why each file is probed separately.
#[derive(Debug, Deserialize)]
pub struct SheetDescriptor {
    pub files: Vec<String>,
    pub frames: u32,
    pub fps: f32,
    #[serde(default = "default_looping")]
    pub looping: bool,
}

fn default_looping() -> bool {
    true
}

/// `character.json` sitting next to the sprite sheets.
#[derive(Debug, Deserialize)]
pub struct CharacterDescriptor {
    pub name: String,
    pub walk_speed: f32,
    pub run_speed: f32,
    pub wander_speed: f32,
    pub idle: SheetDescriptor,
    pub walk: SheetDescriptor,
    pub run: SheetDescriptor,
}

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset io: {0}")]
    Io(#[from] std::io::Error),
    #[error("descriptor parse: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("image probe failed for {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("sheet must list 1 or 4 files, got {0}")]
    BadSheetCount(usize),
    #[error("sheet {0} declares zero frames")]
    ZeroFrames(PathBuf),
}

// ── Loading ─────────────────────────────────────────────────────────────────

fn probe_frame_set(path: &Path, frames: u32) -> Result<FrameSet, AssetError> {
    if frames == 0 {
        return Err(AssetError::ZeroFrames(path.to_path_buf()));
    }
    let (w, h) = image::image_dimensions(path)
        .map_err(|source| AssetError::Image { path: path.to_path_buf(), source })?;
    // Strips are laid out horizontally: N frames side by side, one row.
    Ok(FrameSet {
        frame_w: w as f32 / frames as f32,
        frame_h: h as f32,
        frames,
    })
}

/// Build an [`AnimatedSprite`] from a sheet descriptor, probing the PNG
/// dimensions on disk to derive frame sizes.
pub fn load_sheet(dir: &Path, desc: &SheetDescriptor) -> Result<AnimatedSprite, AssetError> {
    let frames = match desc.files.as_slice() {
        [single] => Frames::Uniform(probe_frame_set(&dir.join(single), desc.frames)?),
        [up, down, left, right] => Frames::Oriented([
            probe_frame_set(&dir.join(up), desc.frames)?,
            probe_frame_set(&dir.join(down), desc.frames)?,
            probe_frame_set(&dir.join(left), desc.frames)?,
            probe_frame_set(&dir.join(right), desc.frames)?,
        ]),
        other => return Err(AssetError::BadSheetCount(other.len())),
    };
    Ok(AnimatedSprite::new(frames, desc.fps, desc.looping))
}

/// Load a character from a directory containing `character.json` and its
/// sprite sheets.
pub fn load_character(dir: &Path) -> Result<CharacterParams, AssetError> {
    let descriptor: CharacterDescriptor =
        serde_json::from_str(&fs::read_to_string(dir.join("character.json"))?)?;
    debug!(name = %descriptor.name, dir = %dir.display(), "loading character");
    Ok(CharacterParams {
        idle_sprite: load_sheet(dir, &descriptor.idle)?,
        walk_sprite: load_sheet(dir, &descriptor.walk)?,
        run_sprite: load_sheet(dir, &descriptor.run)?,
        name: descriptor.name,
        walk_speed: descriptor.walk_speed,
        run_speed: descriptor.run_speed,
        wander_speed: descriptor.wander_speed,
    })
}

/// Scan `root` recursively for character directories (anything holding a
/// `character.json`).
pub fn discover_characters(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_str() == Some("character.json"))
        .filter_map(|entry| entry.path().parent().map(Path::to_path_buf))
        .collect()
}

/// Placeholder character used when no assets are found on disk, so the app
/// still runs (invisible but draggable) on a fresh checkout.
pub fn placeholder_params() -> CharacterParams {
    let strip = |frames| {
        AnimatedSprite::new(
            Frames::Uniform(FrameSet { frame_w: 64.0, frame_h: 64.0, frames }),
            8.0,
            true,
        )
    };
    CharacterParams {
        name: "placeholder".into(),
        walk_speed: 2.0,
        run_speed: 5.0,
        wander_speed: 1.0,
        idle_sprite: strip(4),
        walk_sprite: strip(6),
        run_sprite: strip(6),
    }
}
