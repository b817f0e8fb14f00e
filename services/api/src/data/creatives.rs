//! services/api/src/data/creatives.rs
//!
//! Fixture creative sets: a seed ad plus its AI-generated contextual
//! variations and the accessibility package attached at review time.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CreativeStatus {
    Approved,
    Pending,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedAdType {
    Image,
    Video,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedAd {
    #[serde(rename = "type")]
    pub kind: SeedAdType,
    pub url: String,
    pub copy: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandGuidelines {
    pub logo_url: String,
    pub color_palette: Vec<String>,
    pub approved_fonts: Vec<String>,
}

/// One generated variation of the seed ad, tailored to a placement context.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualVariation {
    pub context: String,
    pub generated_image_url: String,
    pub generated_copy: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContrastStatus {
    Pass,
    Fail,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorContrastReport {
    pub score: f64,
    pub status: ContrastStatus,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityPackage {
    pub alt_text: String,
    pub color_contrast_report: ColorContrastReport,
    pub full_report_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Creative {
    pub id: String,
    pub name: String,
    pub advertiser: String,
    pub status: CreativeStatus,
    pub seed_ad: SeedAd,
    pub brand_guidelines: BrandGuidelines,
    pub contextual_variations: Vec<ContextualVariation>,
    pub accessibility_package: AccessibilityPackage,
}

fn variation(context: &str, image: &str, copy: &str) -> ContextualVariation {
    ContextualVariation {
        context: context.to_string(),
        generated_image_url: image.to_string(),
        generated_copy: copy.to_string(),
    }
}

/// The fixture creative library.
pub fn creatives() -> Vec<Creative> {
    vec![
        Creative {
            id: "creative-1".to_string(),
            name: "Coca-Cola Summer Refresh".to_string(),
            advertiser: "Coca-Cola".to_string(),
            status: CreativeStatus::Approved,
            seed_ad: SeedAd {
                kind: SeedAdType::Image,
                url: "/images/coke-original.png".to_string(),
                copy: "Ice Cold Coca-Cola. The Perfect Refreshment.".to_string(),
            },
            brand_guidelines: BrandGuidelines {
                logo_url: "/images/coke-original.png".to_string(),
                color_palette: vec![
                    "#FF0000".to_string(),
                    "#FFFFFF".to_string(),
                    "#000000".to_string(),
                ],
                approved_fonts: vec![
                    "Spencerian".to_string(),
                    "Helvetica".to_string(),
                    "Arial".to_string(),
                ],
            },
            contextual_variations: vec![
                variation(
                    "Marathon Article",
                    "/images/coke-marathon.png",
                    "Refresh Your Victory - Coca-Cola fuels champions",
                ),
                variation(
                    "Family Picnic Blog Post",
                    "/images/coke-family.png",
                    "The Perfect Companion for Your Family Outing",
                ),
                variation(
                    "Video Game Review",
                    "/images/coke-gaming.png",
                    "Level Up Your Game Break with Coca-Cola",
                ),
                variation(
                    "Cooking Recipe Site",
                    "/images/coke-cooking.png",
                    "The Secret Ingredient to Great Meals",
                ),
            ],
            accessibility_package: AccessibilityPackage {
                alt_text:
                    "Red Coca-Cola bottle with condensation droplets against a refreshing blue background"
                        .to_string(),
                color_contrast_report: ColorContrastReport {
                    score: 8.2,
                    status: ContrastStatus::Pass,
                    suggestions: Vec::new(),
                },
                full_report_url: "/reports/accessibility-coke-1.pdf".to_string(),
            },
        },
        Creative {
            id: "creative-2".to_string(),
            name: "Nike Air Max Revolution".to_string(),
            advertiser: "Nike".to_string(),
            status: CreativeStatus::Approved,
            seed_ad: SeedAd {
                kind: SeedAdType::Image,
                url: "/images/nike-original.png".to_string(),
                copy: "Just Do It. Air Max Revolution.".to_string(),
            },
            brand_guidelines: BrandGuidelines {
                logo_url: "/images/nike-original.png".to_string(),
                color_palette: vec![
                    "#000000".to_string(),
                    "#FFFFFF".to_string(),
                    "#FF6B35".to_string(),
                ],
                approved_fonts: vec![
                    "Nike Futura".to_string(),
                    "Helvetica Bold".to_string(),
                    "Arial Black".to_string(),
                ],
            },
            contextual_variations: vec![
                variation(
                    "Fitness Blog",
                    "/images/nike-fitness.png",
                    "Transform Your Workout. Just Do It.",
                ),
                variation(
                    "Street Fashion Article",
                    "/images/nike-fashion.png",
                    "Street Style Revolution. Step Up Your Game.",
                ),
                variation(
                    "Sports News Website",
                    "/images/nike-sports.png",
                    "Performance Meets Innovation. Just Do It.",
                ),
            ],
            accessibility_package: AccessibilityPackage {
                alt_text:
                    "Black and orange Nike Air Max sneaker with white sole on minimalist background"
                        .to_string(),
                color_contrast_report: ColorContrastReport {
                    score: 7.8,
                    status: ContrastStatus::Pass,
                    suggestions: Vec::new(),
                },
                full_report_url: "/reports/accessibility-nike-1.pdf".to_string(),
            },
        },
        Creative {
            id: "creative-3".to_string(),
            name: "Spotify Premium Experience".to_string(),
            advertiser: "Spotify".to_string(),
            status: CreativeStatus::Pending,
            seed_ad: SeedAd {
                kind: SeedAdType::Image,
                url: "/images/spotify-original.png".to_string(),
                copy: "Music For Everyone. Spotify Premium. Ad-Free.".to_string(),
            },
            brand_guidelines: BrandGuidelines {
                logo_url: "/images/spotify-original.png".to_string(),
                color_palette: vec![
                    "#1DB954".to_string(),
                    "#191414".to_string(),
                    "#FFFFFF".to_string(),
                    "#1ED760".to_string(),
                ],
                approved_fonts: vec!["Circular".to_string(), "Helvetica".to_string()],
            },
            contextual_variations: vec![
                variation(
                    "Music Review Site",
                    "/images/spotify-music-review.png",
                    "Hear Every Note. Premium Sound, Zero Ads.",
                ),
                variation(
                    "Fitness Blog",
                    "/images/spotify-fitness.png",
                    "Soundtrack Your Workout with Spotify Premium",
                ),
                variation(
                    "Student Life Magazine",
                    "/images/spotify-student-life.png",
                    "Student Discount. Full Premium. Half Price.",
                ),
            ],
            accessibility_package: AccessibilityPackage {
                alt_text: "Green Spotify logo over dark background with floating album artwork"
                    .to_string(),
                color_contrast_report: ColorContrastReport {
                    score: 6.9,
                    status: ContrastStatus::Pass,
                    suggestions: vec![
                        "Increase contrast between the green accent and white text".to_string(),
                    ],
                },
                full_report_url: "/reports/accessibility-spotify-1.pdf".to_string(),
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creative_ids_are_unique() {
        let library = creatives();
        let mut ids: Vec<&str> = library.iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), library.len());
    }

    #[test]
    fn every_creative_carries_variations_and_a_report() {
        for creative in creatives() {
            assert!(!creative.contextual_variations.is_empty(), "creative {}", creative.id);
            assert!(!creative.accessibility_package.full_report_url.is_empty());
        }
    }
}
