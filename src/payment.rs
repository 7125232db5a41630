//! Simulated checkout.
//!
//! Drives the payment state machine on a [`SharedStore`] with artificial
//! latency between steps. The store lock is taken for each step and released
//! before every await.

use crate::config::PaymentConfig;
use crate::error::{AppError, Result};
use crate::models::{PaymentMethod, Transaction};
use crate::store::SharedStore;
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Message recorded when the simulated processor declines.
pub const DECLINED_MESSAGE: &str = "Payment declined. Please try again.";

/// Latency between checkout steps.
pub trait Delay: Send + Sync {
    /// Wait before the next step.
    fn pause(&self) -> impl Future<Output = ()> + Send;
}

/// Whether a processed payment goes through.
pub trait Outcome: Send + Sync {
    /// Decide the result of one payment.
    fn succeeds(&self) -> bool;
}

/// Sleeps a random duration between two bounds.
#[derive(Debug, Clone)]
pub struct TokioDelay {
    min_ms: u64,
    max_ms: u64,
}

impl TokioDelay {
    /// Sleep between `min_ms` and `max_ms` milliseconds.
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: max_ms.max(min_ms),
        }
    }
}

impl Delay for TokioDelay {
    async fn pause(&self) {
        let ms = rand::rng().random_range(self.min_ms..=self.max_ms);
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    async fn pause(&self) {}
}

/// Succeeds with a fixed probability.
#[derive(Debug, Clone, Copy)]
pub struct RandomOutcome {
    success_rate: f64,
}

impl RandomOutcome {
    /// `success_rate` is clamped to `0.0..=1.0`.
    pub fn new(success_rate: f64) -> Self {
        Self {
            success_rate: success_rate.clamp(0.0, 1.0),
        }
    }
}

impl Outcome for RandomOutcome {
    fn succeeds(&self) -> bool {
        rand::rng().random_bool(self.success_rate)
    }
}

/// Always the same result.
#[derive(Debug, Clone, Copy)]
pub struct FixedOutcome(pub bool);

impl Outcome for FixedOutcome {
    fn succeeds(&self) -> bool {
        self.0
    }
}

/// A checkout to run.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    /// Plan to buy.
    pub plan_id: String,
    /// Method to charge.
    pub method: PaymentMethod,
    /// Save the method as the default after success.
    pub save_method: bool,
}

/// Runs checkouts against a shared store.
#[derive(Debug, Clone)]
pub struct PaymentSimulator<D, O> {
    delay: D,
    outcome: O,
}

impl PaymentSimulator<TokioDelay, RandomOutcome> {
    /// Latency and success rate from configuration.
    pub fn from_config(config: &PaymentConfig) -> Self {
        Self::new(
            TokioDelay::new(config.min_delay_ms, config.max_delay_ms),
            RandomOutcome::new(config.success_rate),
        )
    }
}

impl<D: Delay, O: Outcome> PaymentSimulator<D, O> {
    /// Build from explicit sources.
    pub fn new(delay: D, outcome: O) -> Self {
        Self { delay, outcome }
    }

    /// Initiate, process, then complete or fail one payment.
    pub async fn run(&self, store: &SharedStore, request: PaymentRequest) -> Result<Transaction> {
        if !store.lock().user.is_authenticated() {
            return Err(AppError::InvalidTransition(
                "sign in before subscribing".to_string(),
            ));
        }

        let started = store.lock().initiate_payment(
            &request.plan_id,
            request.method,
            request.save_method,
        );
        if !started {
            let in_flight = store.lock().subscription.payment.current.is_some();
            return Err(if in_flight {
                AppError::InvalidTransition("a payment is already in progress".to_string())
            } else {
                AppError::NotFound(format!("plan {}", request.plan_id))
            });
        }

        self.delay.pause().await;

        if !store.lock().process_payment() {
            return Err(AppError::InvalidTransition(
                "payment is no longer pending".to_string(),
            ));
        }

        self.delay.pause().await;

        if self.outcome.succeeds() {
            let mut guard = store.lock();
            match guard.complete_payment() {
                Some(transaction) => Ok(transaction),
                None => {
                    guard.fail_payment("Signed out during checkout");
                    Err(AppError::InvalidTransition(
                        "payment could not be completed".to_string(),
                    ))
                }
            }
        } else {
            store.lock().fail_payment(DECLINED_MESSAGE);
            Err(AppError::Payment(DECLINED_MESSAGE.to_string()))
        }
    }
}
