//! Advisory screen-time limits
//!
//! Per-category hour ceilings set through a bounded slider. The stored
//! mapping is flat (`{"gaming": 2, "social": 1}`) and unknown keys survive
//! a round trip untouched. Nothing measures usage against these numbers.

use crate::error::{GuardianError, GuardianResult};
use crate::store::{PersistentStore, Persisted, DEVICE_LIMITS_KEY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Stored form of the limits
pub type LimitMap = BTreeMap<String, f64>;

/// Categories a limit can be set for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitCategory {
    Gaming,
    Social,
    Education,
    Total,
}

impl LimitCategory {
    pub const ALL: [LimitCategory; 4] = [
        LimitCategory::Gaming,
        LimitCategory::Social,
        LimitCategory::Education,
        LimitCategory::Total,
    ];

    /// Key used in the stored mapping
    pub fn as_str(&self) -> &'static str {
        match self {
            LimitCategory::Gaming => "gaming",
            LimitCategory::Social => "social",
            LimitCategory::Education => "education",
            LimitCategory::Total => "total",
        }
    }

    /// Label shown next to the slider
    pub fn label(&self) -> &'static str {
        match self {
            LimitCategory::Gaming => "Gaming Apps",
            LimitCategory::Social => "Social Media",
            LimitCategory::Education => "Education",
            LimitCategory::Total => "Total Screen Time",
        }
    }

    /// Slider bounds and step for this category
    pub fn range(&self) -> LimitRange {
        match self {
            LimitCategory::Gaming => LimitRange::new(0.0, 4.0, 0.5),
            LimitCategory::Social => LimitRange::new(0.0, 2.0, 0.25),
            LimitCategory::Education => LimitRange::new(0.0, 3.0, 0.5),
            LimitCategory::Total => LimitRange::new(0.0, 8.0, 0.5),
        }
    }
}

impl fmt::Display for LimitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LimitCategory {
    type Err = GuardianError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LimitCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                GuardianError::Validation(format!(
                    "Unknown limit category '{}' (expected gaming, social, education or total)",
                    s
                ))
            })
    }
}

/// Bounds of a limit slider, in hours
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LimitRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl LimitRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, hours: f64) -> bool {
        hours >= self.min && hours <= self.max
    }

    pub fn clamp(&self, hours: f64) -> f64 {
        if hours.is_nan() {
            self.min
        } else {
            hours.clamp(self.min, self.max)
        }
    }

    /// Round to the nearest slider step, staying within bounds
    pub fn snap(&self, hours: f64) -> f64 {
        let steps = ((hours - self.min) / self.step).round();
        self.clamp(self.min + steps * self.step)
    }
}

/// One slider as displayed
#[derive(Debug, Clone, Serialize)]
pub struct LimitView {
    pub category: LimitCategory,
    pub label: &'static str,
    pub hours: f64,
    pub range: LimitRange,
}

/// Default mapping on a fresh session
pub fn default_limits() -> LimitMap {
    let mut limits = LimitMap::new();
    limits.insert(LimitCategory::Gaming.as_str().to_string(), 2.0);
    limits.insert(LimitCategory::Social.as_str().to_string(), 1.0);
    limits
}

/// The limits half of the devices page
pub struct DeviceLimits {
    limits: Persisted<LimitMap>,
}

impl DeviceLimits {
    pub fn load(store: Arc<dyn PersistentStore>) -> Self {
        Self {
            limits: Persisted::load(store, DEVICE_LIMITS_KEY, default_limits),
        }
    }

    /// Stored mapping, exactly as persisted
    pub fn raw(&self) -> &LimitMap {
        self.limits.get()
    }

    /// Displayed value for a category, `None` if it was never set.
    ///
    /// Out-of-range stored values are clamped here; the stored blob itself is
    /// left as it is.
    pub fn limit(&self, category: LimitCategory) -> Option<f64> {
        self.raw()
            .get(category.as_str())
            .map(|&hours| category.range().clamp(hours))
    }

    /// Sliders for every configured category, in category order
    pub fn views(&self) -> Vec<LimitView> {
        LimitCategory::ALL
            .into_iter()
            .filter_map(|category| {
                self.limit(category).map(|hours| LimitView {
                    category,
                    label: category.label(),
                    hours,
                    range: category.range(),
                })
            })
            .collect()
    }

    /// Set one category's ceiling and persist the whole mapping.
    ///
    /// Values outside the slider range are refused; values inside it are
    /// snapped to the slider step. Returns the value stored.
    pub fn set_limit(&mut self, category: LimitCategory, hours: f64) -> GuardianResult<f64> {
        let range = category.range();

        if !hours.is_finite() || !range.contains(hours) {
            return Err(GuardianError::Validation(format!(
                "{} limit must be between {} and {} hours, got {}",
                category, range.min, range.max, hours
            )));
        }

        let snapped = range.snap(hours);
        self.limits.update(|limits| {
            limits.insert(category.as_str().to_string(), snapped);
        })?;

        tracing::info!(%category, hours = snapped, "Screen-time limit updated");
        Ok(snapped)
    }
}
