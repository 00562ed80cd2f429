// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/results.rs
//
// Render matching results: summary line and per-image table.

use std::fmt::Write;

use crate::backend::{BackendClient, MatchResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityClass {
    High,
    Medium,
    Low,
}

impl SimilarityClass {
    /// `thresholds` is `(high, medium)`; both inclusive.
    pub fn classify(similarity: f64, thresholds: (f64, f64)) -> Self {
        let (high, medium) = thresholds;
        if similarity >= high {
            Self::High
        } else if similarity >= medium {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// `0.4567` -> `"45.7%"`.
pub fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Share of matched images; an empty run is `0.0%`.
#[allow(clippy::cast_precision_loss)]
pub fn match_rate(matched: usize, total: usize) -> String {
    if total == 0 {
        return percent(0.0);
    }
    percent(matched as f64 / total as f64)
}

pub fn view(results: &MatchResponse, thresholds: (f64, f64), client: &BackendClient) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Matched {} of {} images ({})",
        results.matched,
        results.total,
        match_rate(results.matched, results.total)
    );

    for result in &results.results {
        let class = SimilarityClass::classify(result.max_similarity, thresholds);
        let verdict = if result.is_match {
            "✓ Match"
        } else {
            "✗ No Match"
        };
        let url = client
            .image_url(&result.image_path)
            .map(String::from)
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:>7} {:<6} faces:{:<3} {:<10} {}\n        {}",
            percent(result.max_similarity),
            class.label(),
            result.faces,
            verdict,
            result.image_path,
            url
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MatchResult;

    #[test]
    fn classes_follow_thresholds() {
        let t = (0.5, 0.35);
        assert_eq!(SimilarityClass::classify(0.5, t), SimilarityClass::High);
        assert_eq!(SimilarityClass::classify(0.49, t), SimilarityClass::Medium);
        assert_eq!(SimilarityClass::classify(0.35, t), SimilarityClass::Medium);
        assert_eq!(SimilarityClass::classify(0.1, t), SimilarityClass::Low);
    }

    #[test]
    fn percentages_have_one_decimal() {
        assert_eq!(percent(0.4567), "45.7%");
        assert_eq!(match_rate(1, 3), "33.3%");
        assert_eq!(match_rate(0, 0), "0.0%");
    }

    #[test]
    fn table_lists_every_result() {
        let client = BackendClient::new("http://localhost:5000").unwrap();
        let results = MatchResponse {
            results: vec![
                MatchResult {
                    image_path: r"D:\event\a.jpg".into(),
                    max_similarity: 0.62,
                    faces: 3,
                    is_match: true,
                },
                MatchResult {
                    image_path: "/event/b.jpg".into(),
                    max_similarity: 0.2,
                    faces: 1,
                    is_match: false,
                },
            ],
            matched: 1,
            total: 2,
        };
        let text = view(&results, (0.5, 0.35), &client);
        assert!(text.starts_with("Matched 1 of 2 images (50.0%)"));
        assert!(text.contains("62.0% high"));
        assert!(text.contains("20.0% low"));
        assert!(text.contains("✗ No Match"));
        assert!(text.contains("/api/image?path=D%3A%2Fevent%2Fa.jpg"));
    }
}
