//! Heuristic choice of the coarse-grid cell size
//!
//! The policy keeps fine structural detail visible at small display sizes while staying
//! visually blocky at large ones. An explicit caller-supplied cell size bypasses it
//! entirely.

/// The smallest cell size the automatic policy will choose
pub const MIN_CELL_SIZE: usize = 2;

/// The largest cell size the automatic policy will choose
pub const MAX_CELL_SIZE: usize = 7;

/// Choose a cell size (in source pixels) for the given display size.
///
/// The display size is bucketed into a target "apparent pixel count across" and the
/// cell size derived from it. A complexity hint (the subject's residue count) nudges
/// the result: large structures get finer cells, small ones slightly chunkier cells.
/// The result is always within `[MIN_CELL_SIZE, MAX_CELL_SIZE]`.
pub fn choose_cell_size(display_size: usize, residue_count: Option<usize>) -> usize {
    let target_pixels_across = if display_size <= 150 {
        40
    } else if display_size <= 200 {
        50
    } else if display_size <= 300 {
        60
    } else {
        75
    };

    let mut cell_size = (display_size as f64 / target_pixels_across as f64).round() as usize;

    if let Some(residue_count) = residue_count {
        if residue_count >= 300 {
            cell_size = cell_size.saturating_sub(1).max(2);
        } else if residue_count >= 200 {
            cell_size = ((cell_size as f64 * 0.85).round() as usize).max(3);
        } else if residue_count <= 100 {
            cell_size = (cell_size + 1).min(6);
        }
    }

    let cell_size = cell_size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE);
    tracing::debug!(
        "chose cell size {} for display size {} (residue count {:?})",
        cell_size,
        display_size,
        residue_count
    );
    cell_size
}
