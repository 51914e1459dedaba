// src/decode/derive.rs
// Arithmetic over an already-validated vision extract. This is the whole
// "metric computation" of the legacy single-image path.

use serde::Serialize;

use super::vision::VisionExtract;

/// Metrics fed to the analysis model for a single screenshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimpleMetrics {
    pub msg_ratio: f64,
    pub message_count: u64,
    pub sentiment_trend: &'static str,
}

/// `msg_ratio` is the right-side (the user's own) share of all bubbles.
/// An empty screenshot yields the neutral midpoint 0.5 rather than a
/// division by zero.
pub fn compute_simple_metrics(extract: &VisionExtract) -> SimpleMetrics {
    let message_count = extract.left_count + extract.right_count;
    let msg_ratio = if message_count == 0 {
        0.5
    } else {
        extract.right_count as f64 / message_count as f64
    };

    SimpleMetrics {
        msg_ratio,
        message_count,
        sentiment_trend: extract.sentiment.trend(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::vision::{Sentiment, VisionSamples};

    fn extract(left: u64, right: u64, sentiment: Sentiment) -> VisionExtract {
        VisionExtract {
            left_count: left,
            right_count: right,
            samples: VisionSamples {
                left: vec![],
                right: vec![],
            },
            sentiment,
        }
    }

    #[test]
    fn test_zero_messages_yields_neutral_midpoint() {
        let metrics = compute_simple_metrics(&extract(0, 0, Sentiment::Neutral));
        assert_eq!(metrics.msg_ratio, 0.5);
        assert_eq!(metrics.message_count, 0);
    }

    #[test]
    fn test_ratio_is_right_share_of_total() {
        let metrics = compute_simple_metrics(&extract(6, 2, Sentiment::Positive));
        assert_eq!(metrics.msg_ratio, 0.25);
        assert_eq!(metrics.message_count, 8);
    }

    #[test]
    fn test_ratio_stays_in_unit_interval() {
        for (left, right) in [(0, 1), (1, 0), (3, 97), (1000, 1)] {
            let metrics = compute_simple_metrics(&extract(left, right, Sentiment::Neutral));
            assert!((0.0..=1.0).contains(&metrics.msg_ratio));
        }
    }

    #[test]
    fn test_sentiment_trend_mapping() {
        assert_eq!(
            compute_simple_metrics(&extract(1, 1, Sentiment::Positive)).sentiment_trend,
            "pos"
        );
        assert_eq!(
            compute_simple_metrics(&extract(1, 1, Sentiment::Negative)).sentiment_trend,
            "neg"
        );
        assert_eq!(
            compute_simple_metrics(&extract(1, 1, Sentiment::Neutral)).sentiment_trend,
            "neutral"
        );
    }
}
