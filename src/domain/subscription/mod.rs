pub mod entity;

pub use entity::{
    default_plans, PaymentInitialization, PaymentRequest, SubscriptionPlan, UserSubscription,
};
