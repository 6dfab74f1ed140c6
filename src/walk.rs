//! Constrained random-walk generation.
//!
//! A draw is one or more "strokes": random walks over the canvas grid that
//! never revisit a point and never leave the configured bounds. At each step
//! the 8 compass neighbors of the tail are tried in a fresh uniform random
//! order - a plain clockwise scan would bias every stroke toward one corner.

use canvas_types::{Bounds, GridPoint, Pixel, PixelSet, Walk, MAX_COLOR};
use rand::{seq::SliceRandom, Rng};

/// Bounds for the x axis.
pub const X_BOUNDS: Bounds = Bounds::CANVAS;
/// Bounds for the y axis. Equal to [`X_BOUNDS`] by configuration, kept
/// separate because the two axes are bounded independently.
pub const Y_BOUNDS: Bounds = Bounds::CANVAS;

/// Generate one walk of at most `max_len` points.
///
/// Starts at a uniformly random in-bounds point and extends one step at a
/// time; stops early when the tail is boxed in by visited or out-of-bounds
/// neighbors. `max_len` of 1 yields a single-point walk.
pub fn generate_walk<R: Rng>(
    rng: &mut R,
    max_len: usize,
    x_bounds: Bounds,
    y_bounds: Bounds,
) -> Walk {
    debug_assert!(max_len >= 1, "walks have at least one point");

    let mut walk = Walk::with_capacity(max_len);
    walk.push(GridPoint::new(
        rng.gen_range(x_bounds.lo..=x_bounds.hi),
        rng.gen_range(y_bounds.lo..=y_bounds.hi),
    ));

    while walk.len() < max_len {
        match next_step(rng, &walk, x_bounds, y_bounds) {
            Some(point) => walk.push(point),
            None => break,
        }
    }

    walk
}

/// Pick the next point: shuffle the 8 neighbors of the tail and take the
/// first one that is unvisited and inside both bounds.
fn next_step<R: Rng>(rng: &mut R, walk: &Walk, x_bounds: Bounds, y_bounds: Bounds) -> Option<GridPoint> {
    let tail = walk.last()?;
    let (cx, cy) = (i32::from(tail.x), i32::from(tail.y));

    let mut candidates = [
        (cx + 1, cy),
        (cx + 1, cy - 1),
        (cx, cy - 1),
        (cx - 1, cy - 1),
        (cx - 1, cy),
        (cx - 1, cy + 1),
        (cx, cy + 1),
        (cx + 1, cy + 1),
    ];
    candidates.shuffle(rng);

    for (x, y) in candidates {
        if !x_bounds.contains(x) || !y_bounds.contains(y) {
            continue;
        }
        let point = GridPoint::new(x as u16, y as u16);
        if !walk.contains(&point) {
            return Some(point);
        }
    }

    None
}

/// Assemble a pixel set of at most `target_count` points from up to
/// `max_walks` independent walks.
///
/// The walk count is drawn uniformly from `[1, max_walks]` and each walk gets
/// a budget of `target_count / walk_count` points. Concatenation happens
/// before truncation, so the last walk may be partially or fully discarded;
/// integer division and boxed-in walks mean the result can also fall short of
/// the target. It is never padded.
pub fn generate_pixel_set<R: Rng>(rng: &mut R, target_count: usize, max_walks: usize) -> PixelSet {
    let walk_count = rng.gen_range(1..=max_walks.max(1));
    assemble(rng, target_count, walk_count)
}

fn assemble<R: Rng>(rng: &mut R, target_count: usize, walk_count: usize) -> PixelSet {
    let budget = (target_count / walk_count).max(1);

    let mut points = Vec::with_capacity(target_count);
    for _ in 0..walk_count {
        points.extend(generate_walk(rng, budget, X_BOUNDS, Y_BOUNDS).into_points());
    }
    points.truncate(target_count);

    let pixels = points
        .into_iter()
        .map(|point| Pixel {
            point,
            color: rng.gen_range(0..=MAX_COLOR),
        })
        .collect();
    PixelSet::from_pixels(pixels)
}
