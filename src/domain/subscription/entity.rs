use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::document_id;

/// A purchasable plan from `GET /subscriptions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PlanRecord")]
pub struct SubscriptionPlan {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub currency: String,
    pub billing_cycle: String,
    pub features: Vec<String>,
    pub quality: String,
    pub resolution: String,
    pub screens: u32,
    pub devices: String,
    pub is_active: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanRecord {
    #[serde(default, rename = "_id")]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    name: String,
    amount: f64,
    #[serde(default)]
    currency: String,
    #[serde(default)]
    billing_cycle: String,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    quality: String,
    #[serde(default)]
    resolution: String,
    #[serde(default)]
    screens: u32,
    #[serde(default)]
    devices: String,
    #[serde(default)]
    is_active: bool,
}

impl TryFrom<PlanRecord> for SubscriptionPlan {
    type Error = String;

    fn try_from(record: PlanRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: document_id(record.mongo_id, record.id, "plan")?,
            name: record.name,
            amount: record.amount,
            currency: record.currency,
            billing_cycle: record.billing_cycle,
            features: record.features,
            quality: record.quality,
            resolution: record.resolution,
            screens: record.screens,
            devices: record.devices,
            is_active: record.is_active,
        })
    }
}

impl SubscriptionPlan {
    #[allow(clippy::too_many_arguments)]
    fn monthly(
        id: &str,
        name: &str,
        amount: f64,
        features: &[&str],
        quality: &str,
        resolution: &str,
        screens: u32,
        devices: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            amount,
            currency: "NGN".to_string(),
            billing_cycle: "monthly".to_string(),
            features: features.iter().map(|f| f.to_string()).collect(),
            quality: quality.to_string(),
            resolution: resolution.to_string(),
            screens,
            devices: devices.to_string(),
            is_active: true,
        }
    }
}

/// Plans shown when the plan list cannot be fetched.
pub fn default_plans() -> Vec<SubscriptionPlan> {
    vec![
        SubscriptionPlan::monthly(
            "1",
            "Basic",
            1500.0,
            &["Watch on 1 screen", "Good video quality", "720p resolution"],
            "Good",
            "720p",
            1,
            "Phone + Tablet",
        ),
        SubscriptionPlan::monthly(
            "2",
            "Standard",
            3000.0,
            &[
                "Watch on 2 screens",
                "Better video quality",
                "1080p resolution",
                "Download on 2 devices",
            ],
            "Better",
            "1080p",
            2,
            "Phone + Tablet + TV",
        ),
        SubscriptionPlan::monthly(
            "3",
            "Premium",
            5000.0,
            &[
                "Watch on 4 screens",
                "Best video quality",
                "4K+HDR resolution",
                "Download on 4 devices",
                "Dolby Atmos",
            ],
            "Best",
            "4K+HDR",
            4,
            "All Devices",
        ),
    ]
}

/// The caller's own subscription from `GET /subscriptions/my/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "UserSubscriptionRecord")]
pub struct UserSubscription {
    pub id: String,
    pub plan_name: String,
    pub amount: f64,
    pub status: String,
    pub end_date: Option<DateTime<Utc>>,
    pub auto_renew: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserSubscriptionRecord {
    #[serde(default, rename = "_id")]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    plan_name: String,
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    status: String,
    #[serde(default)]
    end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    auto_renew: bool,
}

impl TryFrom<UserSubscriptionRecord> for UserSubscription {
    type Error = String;

    fn try_from(record: UserSubscriptionRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: document_id(record.mongo_id, record.id, "subscription")?,
            plan_name: record.plan_name,
            amount: record.amount,
            status: record.status,
            end_date: record.end_date,
            auto_renew: record.auto_renew,
        })
    }
}

impl UserSubscription {
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active")
    }
}

/// Gateway hand-off returned by `POST /subscriptions/initialize-payment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInitialization {
    pub authorization_url: String,
    pub reference: String,
}

/// Body of `POST /subscriptions/initialize-payment`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub plan_id: String,
    pub billing_cycle: String,
    pub auto_renew: bool,
}

impl PaymentRequest {
    pub fn monthly(plan_id: impl Into<String>) -> Self {
        Self {
            plan_id: plan_id.into(),
            billing_cycle: "monthly".to_string(),
            auto_renew: true,
        }
    }
}
