//! Resource rate limiting — aggregates per-resource pressure into the single
//! throttle factor admission control reads.
//!
//! Each profile tracks one resource's rate-limit adjustment in [0, 1];
//! 1.0 = unthrottled, 0.0 = fully throttled. The limiter reports the minimum
//! across its profiles: the most constrained resource dictates the
//! system-wide throttle. Pure read-time aggregation; no blocking, no side
//! effects.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Statistics for one named resource. Writers update the adjustment from
/// their own tasks; readers may aggregate at any time.
#[derive(Debug)]
pub struct ResourceProfile {
    name: String,
    /// f64 bits; always a value in [0, 1].
    adjustment: AtomicU64,
}

impl ResourceProfile {
    /// A fresh profile starts unthrottled.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            adjustment: AtomicU64::new(1.0f64.to_bits()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current rate-limit adjustment percentage.
    pub fn adjustment(&self) -> f64 {
        f64::from_bits(self.adjustment.load(Ordering::Relaxed))
    }

    /// Update the adjustment. Values are clamped to [0, 1].
    pub fn set_adjustment(&self, value: f64) {
        self.adjustment
            .store(value.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
    }
}

/// Aggregates a named, ordered collection of resource profiles.
pub struct ResourceRateLimiter {
    name: String,
    profiles: Vec<Arc<ResourceProfile>>,
}

impl ResourceRateLimiter {
    pub fn new(name: impl Into<String>, profiles: Vec<Arc<ResourceProfile>>) -> Self {
        Self {
            name: name.into(),
            profiles,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Aggregate throttle factor in [0, 1]. An empty profile set reports
    /// 1.0: no profiles, no throttling.
    pub fn throttle_factor(&self) -> f64 {
        if self.profiles.is_empty() {
            return 1.0;
        }
        self.profiles
            .iter()
            .map(|p| p.adjustment())
            .fold(f64::INFINITY, f64::min)
    }

    /// Human-readable view: `name (factor): res-a=0.50 res-b=1.00`.
    pub fn summary(&self) -> String {
        let rates: String = self
            .profiles
            .iter()
            .map(|p| format!("{}={:.2} ", p.name(), p.adjustment()))
            .collect();
        format!(
            "{} ({}): {}",
            self.name,
            self.throttle_factor(),
            rates.trim_end()
        )
    }
}
