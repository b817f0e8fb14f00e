//! crates/trendlens_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or web framework; serde
//! derives only pin the camelCase wire names the dashboard frontend expects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

//=========================================================================================
// Website Analysis
//=========================================================================================

/// Lifecycle state of one analysis request. Transitions are forward-only:
/// `Analyzing` -> `Completed` or `Failed`, terminal thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Analyzing,
    Completed,
    Failed,
}

/// The full state of one website-analysis request, keyed by its id.
///
/// While the status is `Analyzing` the analysis fields hold placeholders:
/// empty trends, a zeroed content analysis, no recommendations, score 0.
/// `analyzed_at` is the submission time and is not refreshed on completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteAnalysis {
    pub id: String,
    pub url: String,
    pub title: String,
    pub analyzed_at: DateTime<Utc>,
    pub status: AnalysisStatus,
    pub trends: Vec<TrendInsight>,
    pub content_analysis: ContentAnalysis,
    pub recommendations: Vec<Recommendation>,
    /// Overall content score 0-100; meaningful only once `Completed`.
    pub score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendCategory {
    Technology,
    Lifestyle,
    Business,
    Entertainment,
    Health,
    Fashion,
    Gaming,
    Other,
}

/// One trending topic matched against the analyzed site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendInsight {
    pub id: String,
    pub trend: String,
    /// 0-100
    pub relevance: u8,
    pub category: TrendCategory,
    pub description: String,
    pub potential_reach: u64,
    /// 0-100
    pub confidence_level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Article,
    Blog,
    News,
    Product,
    Landing,
    Other,
}

/// Derived descriptive statistics about the analyzed page content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub word_count: u32,
    /// Reading time in minutes, derived from the word count.
    pub reading_time: u32,
    pub sentiment: Sentiment,
    pub topics: Vec<String>,
    pub key_phrases: Vec<String>,
    pub language: String,
    pub content_type: ContentType,
}

impl ContentAnalysis {
    /// The placeholder carried by a record that is still `Analyzing`.
    pub fn pending() -> Self {
        Self {
            word_count: 0,
            reading_time: 0,
            sentiment: Sentiment::Neutral,
            topics: Vec::new(),
            key_phrases: Vec::new(),
            language: "en".to_string(),
            content_type: ContentType::Article,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Content,
    Seo,
    Engagement,
    Monetization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

/// An actionable suggestion attached to a completed analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub impact: Level,
    pub effort: Level,
}

//=========================================================================================
// Accounts & Profiles
//=========================================================================================

/// Account discriminant. A closed enum at every boundary, including the
/// persisted schema, so no third value can enter the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Brand,
    Publisher,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Brand => "brand",
            Role::Publisher => "publisher",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brand" => Ok(Role::Brand),
            "publisher" => Ok(Role::Publisher),
            other => Err(format!("'{}' is not a valid role", other)),
        }
    }
}

/// Represents a registered user, brand or publisher.
///
/// Brand accounts fill the company fields, publisher accounts the website
/// fields; the remainder stay `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,

    // Brand-specific fields
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,

    // Publisher-specific fields
    pub website_name: Option<String>,
    pub website_url: Option<String>,
    pub website_category: Option<String>,
    pub monthly_page_views: Option<String>,
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Only used internally for login - contains sensitive data
#[derive(Debug, Clone)]
pub struct ProfileCredentials {
    pub id: Uuid,
    pub email: String,
    pub hashed_password: String,
    pub role: Role,
}

/// A partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub website_name: Option<String>,
    pub website_url: Option<String>,
    pub website_category: Option<String>,
    pub monthly_page_views: Option<String>,
    pub description: Option<String>,
}

// Represents a browser login session (auth cookie)
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub id: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}
