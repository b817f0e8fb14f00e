//! services/api/src/data/campaigns.rs
//!
//! Fixture ad campaigns shown on the brand dashboard.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CampaignStatus {
    Active,
    Paused,
    Completed,
}

/// One ad campaign with its budget and delivery counters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub advertiser: String,
    pub status: CampaignStatus,
    pub budget: u64,
    pub spent: u64,
    pub impressions: u64,
    pub clicks: u64,
    pub ctr: f64,
    pub conversions: u64,
    pub start_date: String,
    pub end_date: String,
    pub creative_ids: Vec<String>,
}

fn campaign(
    id: &str,
    name: &str,
    advertiser: &str,
    status: CampaignStatus,
    budget: u64,
    spent: u64,
    impressions: u64,
    clicks: u64,
    ctr: f64,
    conversions: u64,
    start_date: &str,
    end_date: &str,
    creative_ids: &[&str],
) -> Campaign {
    Campaign {
        id: id.to_string(),
        name: name.to_string(),
        advertiser: advertiser.to_string(),
        status,
        budget,
        spent,
        impressions,
        clicks,
        ctr,
        conversions,
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
        creative_ids: creative_ids.iter().map(|c| c.to_string()).collect(),
    }
}

/// The fixture campaign roster.
pub fn campaigns() -> Vec<Campaign> {
    vec![
        campaign(
            "campaign-1",
            "Summer Refresh Campaign",
            "Coca-Cola",
            CampaignStatus::Active,
            50_000,
            34_250,
            1_250_000,
            15_625,
            1.25,
            891,
            "2024-06-01",
            "2024-08-31",
            &["creative-1"],
        ),
        campaign(
            "campaign-2",
            "Air Max Revolution Launch",
            "Nike",
            CampaignStatus::Active,
            75_000,
            42_100,
            980_000,
            19_600,
            2.0,
            1_274,
            "2024-05-15",
            "2024-09-15",
            &["creative-2"],
        ),
        campaign(
            "campaign-3",
            "iPhone 15 Pro Launch",
            "Apple",
            CampaignStatus::Paused,
            100_000,
            12_500,
            345_000,
            5_175,
            1.5,
            207,
            "2024-07-01",
            "2024-10-31",
            &["creative-3"],
        ),
        campaign(
            "campaign-4",
            "Happy Meal Adventure",
            "McDonald's",
            CampaignStatus::Active,
            30_000,
            18_900,
            750_000,
            11_250,
            1.5,
            675,
            "2024-06-15",
            "2024-09-30",
            &["creative-4"],
        ),
        campaign(
            "campaign-5",
            "Back to School Special",
            "Apple",
            CampaignStatus::Completed,
            45_000,
            45_000,
            890_000,
            13_350,
            1.5,
            801,
            "2024-07-15",
            "2024-08-31",
            &["creative-3"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campaign_ids_are_unique() {
        let roster = campaigns();
        let mut ids: Vec<&str> = roster.iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), roster.len());
    }

    #[test]
    fn spend_never_exceeds_budget() {
        for campaign in campaigns() {
            assert!(campaign.spent <= campaign.budget, "campaign {}", campaign.id);
        }
    }
}
