pub mod auth;
pub mod middleware;
pub mod rest;
pub mod state;

// Re-export the pieces the binary needs to build the web server router.
pub use middleware::require_auth;
pub use rest::{
    ab_tests_handler, delete_analysis_handler, get_analysis_handler, get_campaign_handler,
    get_creative_handler, list_analyses_handler, list_campaigns_handler, list_creatives_handler,
    performance_handler, submit_analysis_handler,
};
