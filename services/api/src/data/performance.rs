//! services/api/src/data/performance.rs
//!
//! Fixture analytics: the daily delivery series behind the performance
//! chart and the A/B test outcomes for generated creative variations.

use serde::Serialize;

/// One day of aggregated delivery metrics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePoint {
    pub date: String,
    pub impressions: u64,
    pub clicks: u64,
    pub ctr: f64,
    pub conversions: u64,
    pub spend: u64,
    pub cpm: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbVariation {
    pub name: String,
    pub ctr: f64,
    pub conversions: u64,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AbWinner {
    A,
    B,
}

/// Outcome of testing a generated variation against its seed ad.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbTestResult {
    pub id: String,
    pub context: String,
    pub variation_a: AbVariation,
    pub variation_b: AbVariation,
    pub winner: AbWinner,
    pub confidence: u8,
    pub test_duration: String,
}

fn point(date: &str, impressions: u64, clicks: u64, ctr: f64, conversions: u64, spend: u64) -> PerformancePoint {
    PerformancePoint {
        date: date.to_string(),
        impressions,
        clicks,
        ctr,
        conversions,
        spend,
        cpm: 50,
    }
}

/// Daily performance for the trailing weeks shown on the dashboard.
pub fn performance_series() -> Vec<PerformancePoint> {
    vec![
        point("2024-08-15", 45_000, 675, 1.5, 34, 2_250),
        point("2024-08-16", 48_000, 720, 1.5, 36, 2_400),
        point("2024-08-17", 52_000, 832, 1.6, 42, 2_600),
        point("2024-08-18", 49_000, 735, 1.5, 37, 2_450),
        point("2024-08-19", 51_000, 765, 1.5, 38, 2_550),
        point("2024-08-20", 53_000, 848, 1.6, 42, 2_650),
        point("2024-08-21", 55_000, 880, 1.6, 44, 2_750),
        point("2024-08-22", 47_000, 705, 1.5, 35, 2_350),
        point("2024-08-23", 50_000, 750, 1.5, 38, 2_500),
        point("2024-08-24", 52_000, 832, 1.6, 42, 2_600),
        point("2024-08-25", 54_000, 864, 1.6, 43, 2_700),
        point("2024-08-26", 48_000, 720, 1.5, 36, 2_400),
        point("2024-08-27", 51_000, 765, 1.5, 38, 2_550),
        point("2024-08-28", 53_000, 848, 1.6, 42, 2_650),
        point("2024-08-29", 56_000, 896, 1.6, 45, 2_800),
        point("2024-08-30", 49_000, 735, 1.5, 37, 2_450),
        point("2024-08-31", 52_000, 832, 1.6, 42, 2_600),
        point("2024-09-01", 54_000, 864, 1.6, 43, 2_700),
        point("2024-09-02", 50_000, 750, 1.5, 38, 2_500),
        point("2024-09-03", 53_000, 848, 1.6, 42, 2_650),
        point("2024-09-04", 55_000, 880, 1.6, 44, 2_750),
        point("2024-09-05", 48_000, 720, 1.5, 36, 2_400),
        point("2024-09-06", 51_000, 765, 1.5, 38, 2_550),
        point("2024-09-07", 57_000, 912, 1.6, 46, 2_850),
        point("2024-09-08", 52_000, 832, 1.6, 42, 2_600),
        point("2024-09-09", 54_000, 864, 1.6, 43, 2_700),
        point("2024-09-10", 50_000, 750, 1.5, 38, 2_500),
        point("2024-09-11", 53_000, 848, 1.6, 42, 2_650),
        point("2024-09-12", 55_000, 880, 1.6, 44, 2_750),
    ]
}

fn ab_test(
    id: &str,
    context: &str,
    a: (&str, f64, u64, &str),
    b: (&str, f64, u64, &str),
    confidence: u8,
    duration: &str,
) -> AbTestResult {
    AbTestResult {
        id: id.to_string(),
        context: context.to_string(),
        variation_a: AbVariation {
            name: a.0.to_string(),
            ctr: a.1,
            conversions: a.2,
            image_url: a.3.to_string(),
        },
        variation_b: AbVariation {
            name: b.0.to_string(),
            ctr: b.1,
            conversions: b.2,
            image_url: b.3.to_string(),
        },
        winner: AbWinner::B,
        confidence,
        test_duration: duration.to_string(),
    }
}

/// Completed A/B tests of contextual variations against their seed ads.
pub fn ab_test_results() -> Vec<AbTestResult> {
    vec![
        ab_test(
            "test-1",
            "Sports Articles",
            ("Original Coca-Cola Ad", 1.2, 45, "/images/coke-original.jpg"),
            ("Marathon-Optimized", 1.8, 67, "/images/coke-marathon.jpg"),
            95,
            "14 days",
        ),
        ab_test(
            "test-2",
            "Family Lifestyle",
            ("Generic Nike Ad", 1.5, 52, "/images/nike-original.jpg"),
            ("Street Style Variant", 2.1, 73, "/images/nike-street.jpg"),
            98,
            "21 days",
        ),
        ab_test(
            "test-3",
            "Tech Reviews",
            ("Standard iPhone Ad", 1.4, 38, "/images/iphone-original.jpg"),
            ("Tech-Focused Variant", 1.9, 51, "/images/iphone-tech.jpg"),
            92,
            "10 days",
        ),
        ab_test(
            "test-4",
            "Parenting Blogs",
            ("Standard Happy Meal", 1.3, 41, "/images/mcdonalds-original.jpg"),
            ("Family-Optimized", 1.7, 58, "/images/mcdonalds-family.jpg"),
            89,
            "18 days",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_is_in_chronological_order() {
        let series = performance_series();
        for window in series.windows(2) {
            assert!(window[0].date < window[1].date);
        }
    }

    #[test]
    fn ab_winners_beat_their_seed_ads() {
        for test in ab_test_results() {
            assert!(test.variation_b.ctr > test.variation_a.ctr, "test {}", test.id);
        }
    }
}
