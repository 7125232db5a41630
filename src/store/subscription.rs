//! Plans, the active subscription, billing history and the payment state
//! machine.
//!
//! A payment moves `Pending -> Processing -> Completed | Failed`, or
//! `Pending -> Cancelled`. Every payment that reaches a terminal state
//! appends exactly one record to the transaction log. Only a completed
//! payment touches the subscription.

use crate::models::{
    PaymentMethod, Plan, PlanTier, Subscription, SubscriptionStatus, Transaction,
    TransactionStatus, new_id,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Length of a billing period in days.
pub const BILLING_PERIOD_DAYS: i64 = 30;
/// Longest accepted billing period.
pub const MAX_BILLING_PERIOD_DAYS: i64 = 3650;

/// A payment that has not reached a terminal state yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingPayment {
    /// Id the transaction will be recorded under.
    pub id: String,
    /// Plan being bought.
    pub plan_id: String,
    /// Amount in cents.
    pub amount_cents: u32,
    /// Payment method used.
    pub method: PaymentMethod,
    /// Save the method as default once the payment completes.
    pub save_method: bool,
    /// `Pending` or `Processing`.
    pub status: TransactionStatus,
    /// When the payment was initiated.
    pub started_at: DateTime<Utc>,
}

/// Transient checkout state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentState {
    /// Payment in flight.
    pub current: Option<PendingPayment>,
    /// Message of the last failure, shown once to the user.
    pub error: Option<String>,
}

/// Subscription slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionState {
    /// Known plans.
    pub plans: Vec<Plan>,
    /// The single active subscription.
    pub subscription: Option<Subscription>,
    /// Billing history, most recent first.
    pub transactions: Vec<Transaction>,
    /// Saved payment methods.
    pub payment_methods: Vec<PaymentMethod>,
    /// Checkout in progress.
    #[serde(skip)]
    pub payment: PaymentState,
    /// Billing period length in days.
    pub period_days: i64,
}

impl Default for SubscriptionState {
    fn default() -> Self {
        Self {
            plans: Vec::new(),
            subscription: None,
            transactions: Vec::new(),
            payment_methods: Vec::new(),
            payment: PaymentState::default(),
            period_days: BILLING_PERIOD_DAYS,
        }
    }
}

impl SubscriptionState {
    /// Load plan definitions.
    pub fn set_plans(&mut self, plans: Vec<Plan>) {
        self.plans = plans;
    }

    /// Look up a plan.
    pub fn plan(&self, plan_id: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == plan_id)
    }

    /// Plan of the current subscription.
    pub fn current_plan(&self) -> Option<&Plan> {
        self.subscription
            .as_ref()
            .and_then(|s| self.plan(&s.plan_id))
    }

    /// Replace the subscription. Rejected when the plan is unknown.
    pub fn set_subscription(&mut self, subscription: Subscription) -> bool {
        if self.plan(&subscription.plan_id).is_none() {
            tracing::debug!(plan = %subscription.plan_id, "Ignoring subscription to unknown plan");
            return false;
        }
        self.subscription = Some(subscription);
        true
    }

    /// Start the free plan for a user without a subscription.
    pub fn start_free(&mut self, user_id: &str, now: DateTime<Utc>) -> bool {
        if self.subscription.is_some() {
            return false;
        }
        let Some(free) = self.plans.iter().find(|p| p.tier == PlanTier::Free) else {
            return false;
        };
        self.subscription = Some(Subscription {
            id: new_id(),
            user_id: user_id.to_string(),
            plan_id: free.id.clone(),
            status: SubscriptionStatus::Active,
            current_period_start: now,
            current_period_end: now + Duration::days(self.period_days),
            cancel_at_period_end: false,
            payment_method: None,
        });
        true
    }

    /// Stop renewing at the end of the current period.
    pub fn cancel_subscription(&mut self) -> bool {
        match self.subscription.as_mut() {
            Some(s) if !s.cancel_at_period_end => {
                s.cancel_at_period_end = true;
                true
            }
            _ => false,
        }
    }

    /// Undo a pending cancellation.
    pub fn reactivate_subscription(&mut self) -> bool {
        match self.subscription.as_mut() {
            Some(s) if s.cancel_at_period_end && s.status == SubscriptionStatus::Active => {
                s.cancel_at_period_end = false;
                true
            }
            _ => false,
        }
    }

    /// End a subscription whose period is over.
    pub fn expire_if_due(&mut self, now: DateTime<Utc>) -> bool {
        match self.subscription.as_mut() {
            Some(s) if s.status == SubscriptionStatus::Active && now >= s.current_period_end => {
                s.status = if s.cancel_at_period_end {
                    SubscriptionStatus::Cancelled
                } else {
                    SubscriptionStatus::Expired
                };
                true
            }
            _ => false,
        }
    }

    /// Remove the subscription entirely.
    pub fn clear_subscription(&mut self) {
        self.subscription = None;
    }

    // ========== PAYMENT STATE MACHINE ==========

    /// Open a checkout for a plan. Rejected for unknown plans or while
    /// another payment is in flight.
    pub fn initiate_payment(
        &mut self,
        plan_id: &str,
        method: PaymentMethod,
        save_method: bool,
        now: DateTime<Utc>,
    ) -> Option<&PendingPayment> {
        if self.payment.current.is_some() {
            tracing::debug!(plan = plan_id, "Payment already in progress");
            return None;
        }
        let amount_cents = self.plan(plan_id)?.price_cents;

        self.payment.error = None;
        self.payment.current = Some(PendingPayment {
            id: new_id(),
            plan_id: plan_id.to_string(),
            amount_cents,
            method,
            save_method,
            status: TransactionStatus::Pending,
            started_at: now,
        });
        self.payment.current.as_ref()
    }

    /// `Pending -> Processing`.
    pub fn process_payment(&mut self) -> bool {
        match self.payment.current.as_mut() {
            Some(p) if p.status.can_transition_to(TransactionStatus::Processing) => {
                p.status = TransactionStatus::Processing;
                true
            }
            _ => false,
        }
    }

    /// `Processing -> Completed`: record the transaction, switch the
    /// subscription to the paid plan and optionally save the method.
    pub fn complete_payment(&mut self, user_id: &str, now: DateTime<Utc>) -> Option<Transaction> {
        let payment = self.take_payment(TransactionStatus::Completed)?;

        let transaction = Transaction {
            id: payment.id.clone(),
            plan_id: payment.plan_id.clone(),
            amount_cents: payment.amount_cents,
            status: TransactionStatus::Completed,
            payment_method: payment.method.id.clone(),
            created_at: now,
            error: None,
        };
        self.transactions.insert(0, transaction.clone());

        self.subscription = Some(Subscription {
            id: new_id(),
            user_id: user_id.to_string(),
            plan_id: payment.plan_id,
            status: SubscriptionStatus::Active,
            current_period_start: now,
            current_period_end: now + Duration::days(self.period_days),
            cancel_at_period_end: false,
            payment_method: Some(payment.method.id.clone()),
        });

        if payment.save_method {
            let mut method = payment.method;
            method.is_default = true;
            self.add_payment_method(method);
        }

        self.payment.error = None;
        Some(transaction)
    }

    /// `Processing -> Failed`: record the failure and the message; the
    /// subscription is left alone.
    pub fn fail_payment(&mut self, error: &str, now: DateTime<Utc>) -> Option<Transaction> {
        let payment = self.take_payment(TransactionStatus::Failed)?;

        let transaction = Transaction {
            id: payment.id,
            plan_id: payment.plan_id,
            amount_cents: payment.amount_cents,
            status: TransactionStatus::Failed,
            payment_method: payment.method.id,
            created_at: now,
            error: Some(error.to_string()),
        };
        self.transactions.insert(0, transaction.clone());
        self.payment.error = Some(error.to_string());
        Some(transaction)
    }

    /// `Pending -> Cancelled`.
    pub fn cancel_payment(&mut self, now: DateTime<Utc>) -> Option<Transaction> {
        let payment = self.take_payment(TransactionStatus::Cancelled)?;

        let transaction = Transaction {
            id: payment.id,
            plan_id: payment.plan_id,
            amount_cents: payment.amount_cents,
            status: TransactionStatus::Cancelled,
            payment_method: payment.method.id,
            created_at: now,
            error: None,
        };
        self.transactions.insert(0, transaction.clone());
        Some(transaction)
    }

    /// Dismiss the last failure message.
    pub fn clear_payment_error(&mut self) {
        self.payment.error = None;
    }

    /// Take the in-flight payment if it may move to `next`.
    fn take_payment(&mut self, next: TransactionStatus) -> Option<PendingPayment> {
        let allowed = self
            .payment
            .current
            .as_ref()
            .is_some_and(|p| p.status.can_transition_to(next));
        if !allowed {
            tracing::debug!(?next, "Ignoring invalid payment transition");
            return None;
        }
        self.payment.current.take()
    }

    // ========== PAYMENT METHODS ==========

    /// Save a payment method. A default method demotes the previous default.
    pub fn add_payment_method(&mut self, method: PaymentMethod) -> bool {
        if self.payment_methods.iter().any(|m| m.id == method.id) {
            if method.is_default {
                self.set_default_payment_method(&method.id);
            }
            return false;
        }
        if method.is_default {
            for m in &mut self.payment_methods {
                m.is_default = false;
            }
        }
        self.payment_methods.push(method);
        true
    }

    /// Delete a payment method.
    pub fn remove_payment_method(&mut self, method_id: &str) -> bool {
        let before = self.payment_methods.len();
        self.payment_methods.retain(|m| m.id != method_id);
        self.payment_methods.len() != before
    }

    /// Make one method the default.
    pub fn set_default_payment_method(&mut self, method_id: &str) -> bool {
        if !self.payment_methods.iter().any(|m| m.id == method_id) {
            return false;
        }
        for m in &mut self.payment_methods {
            m.is_default = m.id == method_id;
        }
        true
    }

    /// The default payment method.
    pub fn default_payment_method(&self) -> Option<&PaymentMethod> {
        self.payment_methods.iter().find(|m| m.is_default)
    }
}
