//! Step 7: waveform centerline extraction with continuity and median
//! filtering.

use crate::config::PipelineConfig;
use crate::types::GrayImage;

/// One column's extracted trace point: vertical pixel centroid of the
/// above-threshold ink, and a per-column confidence in [0,1].
#[derive(Debug, Clone, Copy)]
pub struct TracePoint {
    pub y: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone)]
pub struct RawTrace {
    pub points: Vec<TracePoint>,
    pub crop_height: u32,
}

pub fn extract(cleaned: &GrayImage, config: &PipelineConfig) -> Option<RawTrace> {
    if cleaned.width == 0 || cleaned.height == 0 {
        return None;
    }
    let inverted = invert(cleaned);

    let low_ink_threshold = 20u8;
    let mut points = Vec::with_capacity(cleaned.width as usize);

    for x in 0..cleaned.width {
        let column: Vec<u8> = (0..cleaned.height).map(|y| inverted.get(x, y)).collect();
        let max = *column.iter().max().unwrap_or(&0);
        if max < low_ink_threshold {
            points.push(TracePoint { y: 0.0, confidence: 0.0 });
            continue;
        }
        let col_threshold = (max as f64 * config.digitizer.centerline_ink_threshold_fraction) as u8;
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        let mut peak_width = 0u32;
        for (y, &v) in column.iter().enumerate() {
            if v >= col_threshold {
                weighted_sum += y as f64 * v as f64;
                weight_total += v as f64;
                peak_width += 1;
            }
        }
        if weight_total <= 0.0 {
            points.push(TracePoint { y: 0.0, confidence: 0.0 });
            continue;
        }
        let centroid = weighted_sum / weight_total;
        let confidence = (10.0 / peak_width.max(1) as f64).min(1.0);
        points.push(TracePoint { y: centroid, confidence });
    }

    let confident = points.iter().filter(|p| p.confidence > 0.0).count();
    if (confident as f64) < config.digitizer.centerline_min_confident_columns_fraction * points.len() as f64 {
        return None;
    }

    let mut trace = RawTrace { points, crop_height: cleaned.height };
    apply_continuity_filter(&mut trace, config);
    median_filter(&mut trace, config.digitizer.centerline_median_filter_width);
    Some(trace)
}

fn invert(img: &GrayImage) -> GrayImage {
    let mut out = img.clone();
    for v in out.values.iter_mut() {
        *v = 255 - *v;
    }
    out
}

/// A point whose vertical distance from BOTH neighbours exceeds a fraction
/// of crop height is replaced by the neighbour average, confidence halved.
fn apply_continuity_filter(trace: &mut RawTrace, config: &PipelineConfig) {
    let limit = config.digitizer.centerline_continuity_fraction_of_height * trace.crop_height as f64;
    let n = trace.points.len();
    if n < 3 {
        return;
    }
    let originals: Vec<TracePoint> = trace.points.clone();
    for i in 1..n - 1 {
        let prev = originals[i - 1];
        let cur = originals[i];
        let next = originals[i + 1];
        if (cur.y - prev.y).abs() > limit && (cur.y - next.y).abs() > limit {
            trace.points[i] = TracePoint {
                y: (prev.y + next.y) / 2.0,
                confidence: cur.confidence * 0.5,
            };
        }
    }
}

fn median_filter(trace: &mut RawTrace, width: usize) {
    let width = width.max(1) | 1; // force odd
    let half = width / 2;
    let originals: Vec<f64> = trace.points.iter().map(|p| p.y).collect();
    let n = originals.len();
    for i in 0..n {
        let lo = i.saturating_sub(half);
        let hi = (i + half + 1).min(n);
        let mut window = originals[lo..hi].to_vec();
        window.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        trace.points[i].y = window[window.len() / 2];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_crop_fails_tracing() {
        let gray = GrayImage::new(100, 50);
        let config = PipelineConfig::default();
        assert!(extract(&gray, &config).is_none());
    }

    #[test]
    fn single_dark_row_is_traced() {
        let mut gray = GrayImage::new(50, 50);
        for v in gray.values.iter_mut() {
            *v = 255;
        }
        for x in 0..50 {
            gray.set(x, 25, 0);
        }
        let config = PipelineConfig::default();
        let trace = extract(&gray, &config).expect("trace should succeed");
        assert!(trace.points.iter().all(|p| (p.y - 25.0).abs() < 2.0));
    }
}
