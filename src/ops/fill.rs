//! Flood fill — 4-connected, exact-color, breadth-first.
//!
//! Runs on the flattened raster, so anti-aliased or semi-transparent edges
//! drawn earlier read as distinct colors and stop the fill; there is no
//! tolerance threshold. The traversal is an explicit queue, never recursion,
//! so a same-colored region the size of the whole canvas cannot blow the
//! stack.

use std::collections::VecDeque;

use image::{Rgb, RgbImage};

/// Result of a fill attempt, surfaced to the status bar by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillOutcome {
    /// Region recolored; `pixels` counts the writes.
    Filled { pixels: usize },
    /// Seed already holds the replacement color — zero writes.
    AlreadyFilled,
    /// Seed lies outside the buffer — zero writes.
    OutOfBounds,
}

/// Recolors every pixel 4-connected to `seed` that shares the seed's
/// original color. O(pixels touched) time, O(w×h) visited memory.
pub fn flood_fill(img: &mut RgbImage, seed: (i32, i32), replacement: Rgb<u8>) -> FillOutcome {
    let (width, height) = (img.width() as i32, img.height() as i32);
    let (sx, sy) = seed;
    if sx < 0 || sy < 0 || sx >= width || sy >= height {
        return FillOutcome::OutOfBounds;
    }

    let target = *img.get_pixel(sx as u32, sy as u32);
    if target == replacement {
        return FillOutcome::AlreadyFilled;
    }

    let mut visited = vec![false; (width * height) as usize];
    let mut queue: VecDeque<(i32, i32)> = VecDeque::new();
    queue.push_back((sx, sy));

    let mut written = 0usize;
    while let Some((x, y)) = queue.pop_front() {
        if x < 0 || y < 0 || x >= width || y >= height {
            continue;
        }
        let idx = (y * width + x) as usize;
        if visited[idx] {
            continue;
        }
        visited[idx] = true;

        if *img.get_pixel(x as u32, y as u32) == target {
            img.put_pixel(x as u32, y as u32, replacement);
            written += 1;
            queue.push_back((x + 1, y));
            queue.push_back((x - 1, y));
            queue.push_back((x, y + 1));
            queue.push_back((x, y - 1));
        }
    }

    FillOutcome::Filled { pixels: written }
}
