//! Amplitude normalization for waveform drawing
//!
//! Decoders hand us one raw gain per audio frame with no upper bound. For
//! drawing we want symmetric bars around a center line, so the gains are:
//!
//! 1. Scaled linearly into 0..=255
//! 2. Histogrammed to find a 5% floor and a 1% ceiling (percentile clipping)
//! 3. Normalized into 0.0..=1.0 between floor and ceiling
//! 4. Squared, which pushes low-level noise towards the center line
//! 5. Multiplied by the half height and truncated
//!
//! The result is computed once per decoded recording and never mutated.

/// Number of histogram buckets (one per scaled gain value)
const HISTOGRAM_BUCKETS: usize = 256;

/// Largest scaled gain value
const MAX_SCALED_GAIN: f32 = 255.0;

/// Share of frames that may sit below the recalibrated minimum (1/20 = 5%)
const MIN_GAIN_DIVISOR: usize = 20;

/// Share of frames that may sit above the recalibrated maximum (1/100 = 1%)
const MAX_GAIN_DIVISOR: usize = 100;

/// Convert raw per-frame gains into drawable bar heights in `0..=half_height`
///
/// Output has the same length as `frame_gains`. Empty input gives empty output.
pub fn adjust_waveform_heights(frame_gains: &[u32], half_height: u32) -> Vec<u32> {
    let num_frames = frame_gains.len();
    if num_frames == 0 {
        return Vec::new();
    }

    // Highest gain, floored at 1.0
    let max_raw = frame_gains
        .iter()
        .fold(1.0_f32, |max, &gain| max.max(gain as f32));

    // Keep the working range within 0..=255
    let scale_factor = if max_raw > MAX_SCALED_GAIN {
        MAX_SCALED_GAIN / max_raw
    } else {
        1.0
    };

    let mut histogram = [0usize; HISTOGRAM_BUCKETS];
    let mut max_gain = 0usize;
    for &gain in frame_gains {
        let scaled = ((gain as f32 * scale_factor) as usize).min(HISTOGRAM_BUCKETS - 1);
        max_gain = max_gain.max(scaled);
        histogram[scaled] += 1;
    }

    let min_gain = recalibrated_min(&histogram, num_frames);
    let max_gain = recalibrated_max(&histogram, num_frames, max_gain);

    let range = match max_gain as f32 - min_gain as f32 {
        r if r <= 0.0 => 1.0,
        r => r,
    };

    frame_gains
        .iter()
        .map(|&gain| {
            let value = ((gain as f32 * scale_factor - min_gain as f32) / range).clamp(0.0, 1.0);
            (value * value * half_height as f32) as u32
        })
        .collect()
}

/// Walk up from bucket 0 until 5% of frames are covered
///
/// Stops one past the covering bucket, and never beyond 255.
fn recalibrated_min(histogram: &[usize; HISTOGRAM_BUCKETS], num_frames: usize) -> usize {
    let threshold = num_frames / MIN_GAIN_DIVISOR;
    let mut min_gain = 0;
    let mut sum = 0;
    while min_gain < HISTOGRAM_BUCKETS - 1 && sum < threshold {
        sum += histogram[min_gain];
        min_gain += 1;
    }
    min_gain
}

/// Walk down from the highest used bucket until 1% of frames are covered
///
/// Never drops to 2 or below.
fn recalibrated_max(
    histogram: &[usize; HISTOGRAM_BUCKETS],
    num_frames: usize,
    start: usize,
) -> usize {
    let threshold = num_frames / MAX_GAIN_DIVISOR;
    let mut max_gain = start;
    let mut sum = 0;
    while max_gain > 2 && sum < threshold {
        sum += histogram[max_gain];
        max_gain -= 1;
    }
    max_gain
}
