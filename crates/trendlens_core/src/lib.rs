pub mod domain;
pub mod insight;
pub mod ports;

pub use domain::{
    AnalysisStatus, AuthSession, ContentAnalysis, ContentType, Level, ProfileCredentials,
    ProfileUpdate, Recommendation, RecommendationKind, Role, Sentiment, TrendCategory,
    TrendInsight, UserProfile, WebsiteAnalysis,
};
pub use ports::{PortError, PortResult, ProfileStore};
