//! Selection of the demo render sequence frames on disk.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::frame::Frame;
use crate::io::load_frame;

/// Frames rendered per demo sequence; frame numbers wrap past the last one.
pub const FRAMES_PER_SEQUENCE: usize = 11;

/// `count` frame paths of `sequence`, starting at `start_frame` and cycling.
pub fn frame_paths(
    images_dir: &Path,
    sequence: usize,
    start_frame: usize,
    count: usize,
) -> Vec<PathBuf> {
    (0..count)
        .map(|i| {
            let frame = (start_frame + i) % FRAMES_PER_SEQUENCE;
            images_dir.join(format!("image{sequence}.{frame}.ppm"))
        })
        .collect()
}

/// Loads every frame, failing on the first one that cannot be read.
pub fn load_sequence<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Frame>> {
    paths
        .iter()
        .map(|path| {
            tracing::info!(path = %path.as_ref().display(), "Loading frame");
            load_frame(path)
        })
        .collect()
}
