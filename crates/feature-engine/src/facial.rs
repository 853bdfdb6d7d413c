//! Facial expression sample averaging

use mood_types::FacialExpressionSample;

/// Average a sequence of expression readings channel by channel.
///
/// An empty slice yields an all-zero sample.
pub fn average_expressions(samples: &[FacialExpressionSample]) -> FacialExpressionSample {
    if samples.is_empty() {
        return FacialExpressionSample::default();
    }

    let n = samples.len() as f64;
    let mut avg = FacialExpressionSample::default();
    for s in samples {
        avg.happy += s.happy;
        avg.sad += s.sad;
        avg.angry += s.angry;
        avg.fearful += s.fearful;
        avg.disgusted += s.disgusted;
        avg.surprised += s.surprised;
        avg.neutral += s.neutral;
    }
    avg.happy /= n;
    avg.sad /= n;
    avg.angry /= n;
    avg.fearful /= n;
    avg.disgusted /= n;
    avg.surprised /= n;
    avg.neutral /= n;
    avg
}
