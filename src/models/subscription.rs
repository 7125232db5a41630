use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Plan tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Ad-supported, catalog restricted.
    Free,
    /// One screen, HD.
    Basic,
    /// Two screens, full HD.
    Standard,
    /// Four screens, 4K.
    Premium,
}

/// What a plan allows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLimits {
    /// Simultaneous streams.
    pub max_streams: u32,
    /// Maximum vertical resolution.
    pub max_resolution: u32,
    /// Offline downloads allowed.
    pub max_downloads: u32,
    /// Watch parties allowed.
    pub watch_parties: bool,
    /// Ads shown.
    pub ads: bool,
}

impl PlanLimits {
    /// Limits that apply without a usable subscription.
    pub fn free() -> Self {
        Self {
            max_streams: 1,
            max_resolution: 480,
            max_downloads: 0,
            watch_parties: false,
            ads: true,
        }
    }
}

/// A subscription plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Tier.
    pub tier: PlanTier,
    /// Monthly price in cents.
    pub price_cents: u32,
    /// Feature limits.
    pub limits: PlanLimits,
}

/// Subscription lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Paid up and usable.
    Active,
    /// Payment overdue.
    PastDue,
    /// Cancelled by the user and past its period end.
    Cancelled,
    /// Period ended without renewal.
    Expired,
}

/// The user's current subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Unique identifier.
    pub id: String,
    /// Owner.
    pub user_id: String,
    /// Plan id; always one of the known plans.
    pub plan_id: String,
    /// Lifecycle state.
    pub status: SubscriptionStatus,
    /// Current billing period start.
    pub current_period_start: DateTime<Utc>,
    /// Current billing period end.
    pub current_period_end: DateTime<Utc>,
    /// Ends instead of renewing at period end.
    #[serde(default)]
    pub cancel_at_period_end: bool,
    /// Payment method id used for renewals.
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// Payment state. `Completed`, `Failed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Created, not yet submitted.
    Pending,
    /// Submitted to the processor.
    Processing,
    /// Charged.
    Completed,
    /// Declined.
    Failed,
    /// Abandoned before processing.
    Cancelled,
}

impl TransactionStatus {
    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Completed | TransactionStatus::Failed | TransactionStatus::Cancelled
        )
    }

    /// Whether moving from `self` to `next` is allowed.
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        use TransactionStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Pending, Cancelled)
                | (Processing, Completed)
                | (Processing, Failed)
        )
    }
}

/// A billing record. The transaction log is append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier.
    pub id: String,
    /// Plan being paid for.
    pub plan_id: String,
    /// Amount in cents.
    pub amount_cents: u32,
    /// Final state.
    pub status: TransactionStatus,
    /// Payment method id.
    pub payment_method: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Failure reason.
    #[serde(default)]
    pub error: Option<String>,
}

/// Payment method kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethodKind {
    /// Credit or debit card.
    Card,
    /// PayPal account.
    Paypal,
}

/// A saved payment method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    /// Unique identifier.
    pub id: String,
    /// Kind.
    pub kind: PaymentMethodKind,
    /// Display label (e.g. "Visa").
    pub label: String,
    /// Last four digits for cards.
    #[serde(default)]
    pub last4: Option<String>,
    /// Used by default for renewals.
    #[serde(default)]
    pub is_default: bool,
}
