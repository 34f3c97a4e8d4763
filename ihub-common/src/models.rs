//! Data models shared between HTTP handlers and database queries
//!
//! Role and status columns are stored as TEXT; the enums here own the
//! canonical spellings and conversions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account role, fixed at identity-provider sync time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Brand,
    Influencer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Brand => "brand",
            UserRole::Influencer => "influencer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(UserRole::Admin),
            "brand" => Some(UserRole::Brand),
            "influencer" => Some(UserRole::Influencer),
            _ => None,
        }
    }
}

/// Campaign lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Active,
    Completed,
    Cancelled,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Active => "active",
            CampaignStatus::Completed => "completed",
            CampaignStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(CampaignStatus::Draft),
            "active" => Some(CampaignStatus::Active),
            "completed" => Some(CampaignStatus::Completed),
            "cancelled" => Some(CampaignStatus::Cancelled),
            _ => None,
        }
    }
}

/// Row in the `users` table.
///
/// User creation happens when the identity provider account is synced;
/// this service never issues credentials.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: String,
    pub created_at: NaiveDateTime,
}

/// Row in the `brands` table (1:1 with users)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Brand {
    pub user_id: String,
    pub company_name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub verified: bool,
}

/// Row in the `influencers` table (1:1 with users).
///
/// `niche` and `metrics` hold JSON text: a string array and an object.
#[derive(Debug, Clone, FromRow)]
pub struct Influencer {
    pub user_id: String,
    pub username: String,
    pub bio: Option<String>,
    pub niche: String,
    pub metrics: String,
    pub wallet_address: Option<String>,
}

impl Influencer {
    /// Parse the stored niche JSON array, tolerating legacy plain values
    pub fn niche_tags(&self) -> Vec<String> {
        serde_json::from_str(&self.niche).unwrap_or_default()
    }

    /// Parse the stored metrics JSON object
    pub fn metrics_value(&self) -> serde_json::Value {
        serde_json::from_str(&self.metrics)
            .unwrap_or_else(|_| serde_json::Value::Object(Default::default()))
    }
}

/// Row in the `campaigns` table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campaign {
    pub id: String,
    pub brand_id: String,
    pub title: String,
    pub description: Option<String>,
    pub budget: f64,
    pub status: String,
    pub tx_hash: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::Admin, UserRole::Brand, UserRole::Influencer] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse("superuser"), None);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            CampaignStatus::Draft,
            CampaignStatus::Active,
            CampaignStatus::Completed,
            CampaignStatus::Cancelled,
        ] {
            assert_eq!(CampaignStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(CampaignStatus::parse("archived"), None);
    }

    #[test]
    fn test_influencer_niche_parsing() {
        let influencer = Influencer {
            user_id: "u".to_string(),
            username: "creator".to_string(),
            bio: None,
            niche: r#"["tech","ai"]"#.to_string(),
            metrics: "{}".to_string(),
            wallet_address: None,
        };
        assert_eq!(influencer.niche_tags(), vec!["tech", "ai"]);
        assert!(influencer.metrics_value().is_object());
    }

    #[test]
    fn test_influencer_malformed_json_tolerated() {
        let influencer = Influencer {
            user_id: "u".to_string(),
            username: "creator".to_string(),
            bio: None,
            niche: "not json".to_string(),
            metrics: "not json".to_string(),
            wallet_address: None,
        };
        assert!(influencer.niche_tags().is_empty());
        assert!(influencer.metrics_value().is_object());
    }
}
