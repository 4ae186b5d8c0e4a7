//! Zoom and grid density calculation
//!
//! Short recordings get a reduced width scale so they don't look stretched,
//! and the time grid step is picked from a table of "nice" values so that
//! roughly the same number of grid lines is visible for any duration.

/// Recordings shorter than this get a proportionally reduced width scale
pub const SHORT_RECORD_MS: u64 = 18_000;

/// Width scale used for recordings at or above [`SHORT_RECORD_MS`]
pub const DEFAULT_WIDTH_SCALE: f32 = 1.5;

/// Target number of grid lines across the whole timeline
pub const GRID_LINES_COUNT: u64 = 16;

/// Per-line seconds above this are halved (doubling the multiplier)
const MAX_TABLE_STEP_SEC: u64 = 239;

/// Upper bound (inclusive, in seconds per line) → grid step in milliseconds
const GRID_STEP_TABLE: [(u64, u64); 22] = [
    (2, 2_000),
    (6, 5_000),
    (14, 10_000),
    (24, 20_000),
    (44, 30_000),
    (74, 60_000),
    (104, 90_000),
    (149, 120_000),
    (209, 180_000),
    (269, 240_000),
    (329, 300_000),
    (419, 360_000),
    (539, 480_000),
    (659, 600_000),
    (809, 720_000),
    (1049, 900_000),
    (1349, 1_200_000),
    (1649, 1_500_000),
    (2099, 1_800_000),
    (2699, 2_400_000),
    (3299, 3_000_000),
    (3899, 3_600_000),
];

/// Step used when the table is exhausted
const LARGEST_GRID_STEP_MS: u64 = 4_200_000;

/// Every step value [`calculate_grid_step`] can pick before applying its multiplier
pub const CANONICAL_GRID_STEPS: [u64; 23] = [
    2_000, 5_000, 10_000, 20_000, 30_000, 60_000, 90_000, 120_000, 180_000, 240_000, 300_000,
    360_000, 480_000, 600_000, 720_000, 900_000, 1_200_000, 1_500_000, 1_800_000, 2_400_000,
    3_000_000, 3_600_000, LARGEST_GRID_STEP_MS,
];

/// Width scale for a recording
///
/// Returns `base_width_scale` unchanged when `duration_ms >= short_threshold_ms`,
/// otherwise scales it down linearly with duration (zero duration gives 0.0).
pub fn calculate_scale(duration_ms: u64, short_threshold_ms: u64, base_width_scale: f32) -> f32 {
    if duration_ms >= short_threshold_ms {
        base_width_scale
    } else {
        duration_ms as f32 * (base_width_scale / short_threshold_ms as f32)
    }
}

/// Grid step in milliseconds for a recording, using [`GRID_LINES_COUNT`] lines
pub fn calculate_grid_step(duration_ms: u64) -> u64 {
    calculate_grid_step_with(duration_ms, GRID_LINES_COUNT)
}

/// Grid step in milliseconds for a recording with a custom target line count
///
/// Always returns a positive multiple of one of [`CANONICAL_GRID_STEPS`].
/// Zero duration maps to the smallest step.
pub fn calculate_grid_step_with(duration_ms: u64, lines_count: u64) -> u64 {
    let mut step_sec = (duration_ms / 1000) / lines_count.max(1);
    let mut k = 1;
    while step_sec > MAX_TABLE_STEP_SEC {
        step_sec /= 2;
        k *= 2;
    }

    let step_ms = GRID_STEP_TABLE
        .iter()
        .find(|(upper, _)| step_sec <= *upper)
        .map(|&(_, step)| step)
        .unwrap_or(LARGEST_GRID_STEP_MS);

    step_ms * k
}
