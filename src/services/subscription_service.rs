// src/services/subscription_service.rs
//
// Subscription Service - plans, status and the payment hand-off
//
// The payment page itself is an external collaborator: this service only
// initializes the transaction and verifies the reference it returns.
// The cached subscription is refreshed from the server after every
// mutation rather than patched locally, except for auto-renew where the
// server only acknowledges.

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::{
    default_plans, PaymentInitialization, PaymentRequest, SubscriptionPlan, UserSubscription,
};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, SubscriptionChanged};
use crate::integrations::http::ApiTransport;
use crate::services::payload;

pub struct SubscriptionService {
    transport: Arc<dyn ApiTransport>,
    event_bus: Arc<EventBus>,
    current: RwLock<Option<UserSubscription>>,
}

impl SubscriptionService {
    pub fn new(transport: Arc<dyn ApiTransport>, event_bus: Arc<EventBus>) -> Self {
        Self {
            transport,
            event_bus,
            current: RwLock::new(None),
        }
    }

    /// Last subscription seen by `refresh_status`.
    pub fn current(&self) -> Option<UserSubscription> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_current(&self, subscription: Option<UserSubscription>) {
        let changed = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            let changed = *current != subscription;
            *current = subscription.clone();
            changed
        };

        if changed {
            self.event_bus.emit(SubscriptionChanged::new(
                subscription.as_ref().map(|s| s.id.clone()),
                subscription.map(|s| s.status),
            ));
        }
    }

    /// Active plans, cheapest first. Falls back to the built-in plans on any failure.
    pub async fn list_plans(&self) -> Vec<SubscriptionPlan> {
        let fetched = match self.transport.get("/subscriptions").await {
            Ok(body) => payload::data_list::<SubscriptionPlan>(&body, "subscriptions", false),
            Err(e) => Err(AppError::from(e)),
        };

        match fetched {
            Ok(mut plans) => {
                plans.retain(|plan| plan.is_active);
                plans.sort_by(|a, b| a.amount.total_cmp(&b.amount));
                plans
            }
            Err(e) => {
                log::warn!("plan list unavailable, using defaults: {}", e);
                default_plans()
            }
        }
    }

    /// `GET /subscriptions/my/status`. Any failure means "no subscription".
    pub async fn refresh_status(&self) -> Option<UserSubscription> {
        let subscription = match self.transport.get("/subscriptions/my/status").await {
            Ok(body) => payload::data_field::<UserSubscription>(&body, "subscription").ok(),
            Err(e) => {
                log::debug!("no subscription status: {}", e);
                None
            }
        };

        self.set_current(subscription.clone());
        subscription
    }

    /// Start a monthly, auto-renewing payment for `plan_id`.
    pub async fn initialize_payment(&self, plan_id: &str) -> AppResult<PaymentInitialization> {
        if self.current().is_some_and(|s| s.is_active()) {
            return Err(AppError::Validation(
                "You already have an active subscription".to_string(),
            ));
        }

        let request = serde_json::to_value(PaymentRequest::monthly(plan_id))?;
        let body = self
            .transport
            .post("/subscriptions/initialize-payment", request)
            .await?;

        payload::data_object(&body)
    }

    /// True when the gateway confirmed the payment; the status is refreshed then.
    pub async fn verify_payment(&self, reference: &str) -> AppResult<bool> {
        let body = self
            .transport
            .get(&format!("/subscriptions/verify-payment/{}", reference))
            .await?;

        if !payload::is_success(&body) {
            log::info!("payment {} not confirmed", reference);
            return Ok(false);
        }

        self.refresh_status().await;
        Ok(true)
    }

    pub async fn cancel(&self) -> AppResult<Option<UserSubscription>> {
        let subscription = self.current().ok_or(AppError::NotFound)?;

        self.transport
            .patch(&format!("/subscriptions/my/{}/cancel", subscription.id), None)
            .await?;

        Ok(self.refresh_status().await)
    }

    /// Flip auto-renew; the cached copy changes only when the server confirms.
    pub async fn toggle_auto_renew(&self) -> AppResult<UserSubscription> {
        let subscription = self.current().ok_or(AppError::NotFound)?;
        let wanted = !subscription.auto_renew;

        let body = self
            .transport
            .patch(
                &format!("/subscriptions/my/{}/auto-renew", subscription.id),
                Some(serde_json::json!({ "autoRenew": wanted })),
            )
            .await?;

        if !payload::is_success(&body) {
            return Ok(subscription);
        }

        let updated = UserSubscription {
            auto_renew: wanted,
            ..subscription
        };
        self.set_current(Some(updated.clone()));
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::http::{HttpMethod, NetworkError};
    use crate::services::test_support::{emitted, FakeTransport};
    use serde_json::json;

    fn setup() -> (Arc<FakeTransport>, Arc<EventBus>, SubscriptionService) {
        let transport = Arc::new(FakeTransport::new());
        let bus = Arc::new(EventBus::new());
        let service = SubscriptionService::new(transport.clone(), bus.clone());
        (transport, bus, service)
    }

    fn status_body(status: &str, auto_renew: bool) -> serde_json::Value {
        json!({ "data": { "subscription": {
            "_id": "s1", "planName": "Standard", "amount": 3000,
            "status": status, "autoRenew": auto_renew
        } } })
    }

    #[tokio::test]
    async fn test_list_plans_sorted_and_active_only() {
        let (transport, _bus, service) = setup();
        transport.ok(
            HttpMethod::Get,
            "/subscriptions",
            json!({ "data": { "subscriptions": [
                { "_id": "p", "name": "Premium", "amount": 5000, "isActive": true },
                { "_id": "o", "name": "Legacy", "amount": 100, "isActive": false },
                { "_id": "b", "name": "Basic", "amount": 1500, "isActive": true }
            ] } }),
        );

        let plans = service.list_plans().await;
        let names: Vec<&str> = plans.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Basic", "Premium"]);
    }

    #[tokio::test]
    async fn test_list_plans_falls_back_to_defaults() {
        let (transport, _bus, service) = setup();
        transport.fail(
            HttpMethod::Get,
            "/subscriptions",
            NetworkError::NoResponse("offline".to_string()),
        );

        let plans = service.list_plans().await;
        assert_eq!(plans, default_plans());
    }

    #[tokio::test]
    async fn test_refresh_status() {
        let (transport, bus, service) = setup();
        transport.ok(HttpMethod::Get, "/subscriptions/my/status", status_body("active", true));
        transport.fail(
            HttpMethod::Get,
            "/subscriptions/my/status",
            NetworkError::server(404, json!({ "message": "No subscription" })),
        );

        assert!(service.refresh_status().await.unwrap().is_active());
        assert!(service.refresh_status().await.is_none());
        assert!(service.current().is_none());
        assert_eq!(emitted(&bus), vec!["SubscriptionChanged", "SubscriptionChanged"]);
    }

    #[tokio::test]
    async fn test_initialize_payment() {
        let (transport, _bus, service) = setup();
        transport.ok(
            HttpMethod::Post,
            "/subscriptions/initialize-payment",
            json!({ "data": { "authorizationUrl": "https://pay.example.com/x", "reference": "ref-1" } }),
        );

        let init = service.initialize_payment("p2").await.unwrap();
        assert_eq!(init.reference, "ref-1");

        let request = transport.last_request().unwrap();
        assert_eq!(
            request.body,
            Some(json!({ "planId": "p2", "billingCycle": "monthly", "autoRenew": true }))
        );
    }

    #[tokio::test]
    async fn test_initialize_payment_blocked_when_active() {
        let (transport, _bus, service) = setup();
        transport.ok(HttpMethod::Get, "/subscriptions/my/status", status_body("active", true));
        service.refresh_status().await;

        let err = service.initialize_payment("p2").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(
            transport.request_count(HttpMethod::Post, "/subscriptions/initialize-payment"),
            0
        );
    }

    #[tokio::test]
    async fn test_verify_payment() {
        let (transport, _bus, service) = setup();
        transport.ok(
            HttpMethod::Get,
            "/subscriptions/verify-payment/ref-1",
            json!({ "status": "success" }),
        );
        transport.ok(HttpMethod::Get, "/subscriptions/my/status", status_body("active", true));
        transport.ok(
            HttpMethod::Get,
            "/subscriptions/verify-payment/ref-2",
            json!({ "status": "failed" }),
        );

        assert!(service.verify_payment("ref-1").await.unwrap());
        assert!(service.current().is_some());

        assert!(!service.verify_payment("ref-2").await.unwrap());
        assert_eq!(transport.request_count(HttpMethod::Get, "/subscriptions/my/status"), 1);
    }

    #[tokio::test]
    async fn test_cancel_and_toggle_require_subscription() {
        let (_transport, _bus, service) = setup();
        assert!(matches!(service.cancel().await, Err(AppError::NotFound)));
        assert!(matches!(service.toggle_auto_renew().await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_cancel_refreshes_status() {
        let (transport, _bus, service) = setup();
        transport.ok(HttpMethod::Get, "/subscriptions/my/status", status_body("active", true));
        transport.ok(HttpMethod::Patch, "/subscriptions/my/s1/cancel", json!({ "status": "success" }));
        transport.ok(HttpMethod::Get, "/subscriptions/my/status", status_body("cancelled", false));
        service.refresh_status().await;

        let after = service.cancel().await.unwrap().unwrap();
        assert_eq!(after.status, "cancelled");
        assert!(!after.is_active());
    }

    #[tokio::test]
    async fn test_toggle_auto_renew() {
        let (transport, _bus, service) = setup();
        transport.ok(HttpMethod::Get, "/subscriptions/my/status", status_body("active", true));
        transport.ok(
            HttpMethod::Patch,
            "/subscriptions/my/s1/auto-renew",
            json!({ "status": "success" }),
        );
        transport.ok(
            HttpMethod::Patch,
            "/subscriptions/my/s1/auto-renew",
            json!({ "status": "pending" }),
        );
        service.refresh_status().await;

        let updated = service.toggle_auto_renew().await.unwrap();
        assert!(!updated.auto_renew);
        assert_eq!(
            transport.last_request().unwrap().body,
            Some(json!({ "autoRenew": false }))
        );

        // unconfirmed: cached copy untouched
        let unchanged = service.toggle_auto_renew().await.unwrap();
        assert!(!unchanged.auto_renew);
        assert!(!service.current().unwrap().auto_renew);
    }
}
