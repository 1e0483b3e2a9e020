//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::activities::{Activity, Recommendation};
use crate::assistant::{ChatMessage, Intervention};
use crate::chart::ChartPoint;
use crate::devices::{AppUsage, LimitView};
use crate::medication::{Adherence, MedicationEntry};
use crate::shell::NavItem;

// ============================================
// SHELL DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub nav: Vec<NavItem>,
}

/// Onboarding dialog state
#[derive(Debug, Serialize)]
pub struct OnboardingResponse {
    pub completed: bool,
    pub visible: bool,
}

// ============================================
// MEDICATION DTOs
// ============================================

/// Today's schedule, partitioned for display
#[derive(Debug, Serialize)]
pub struct MedicationListResponse {
    pub entries: Vec<MedicationEntry>,
    pub pending: Vec<MedicationEntry>,
    pub taken: Vec<MedicationEntry>,
    pub adherence: Adherence,
    pub adherence_series: Vec<ChartPoint>,
}

/// Side-effect report request
#[derive(Debug, Deserialize)]
pub struct SideEffectRequest {
    pub observation: String,
}

// ============================================
// DEVICE DTOs
// ============================================

/// All configured sliders
#[derive(Debug, Serialize)]
pub struct LimitsResponse {
    pub limits: Vec<LimitView>,
}

/// New value for one slider
#[derive(Debug, Deserialize)]
pub struct SetLimitRequest {
    pub hours: f64,
}

/// Today's usage and its chart series
#[derive(Debug, Serialize)]
pub struct UsageResponse {
    pub apps: Vec<AppUsage>,
    pub by_app: Vec<ChartPoint>,
    pub by_category: Vec<ChartPoint>,
    pub total_hours: f64,
}

// ============================================
// ACTIVITY DTOs
// ============================================

#[derive(Debug, Serialize)]
pub struct ActivitiesResponse {
    pub upcoming: Vec<Activity>,
    pub recommendations: Vec<Recommendation>,
}

// ============================================
// ASSISTANT DTOs
// ============================================

/// Conversation so far plus suggestion chips
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub messages: Vec<ChatMessage>,
    pub suggested_prompts: Vec<String>,
}

/// Chat submit request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Chat submit response; the reply arrives later
#[derive(Debug, Serialize)]
pub struct ChatSubmitResponse {
    pub message: ChatMessage,
    pub reply_delay_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct InterventionsResponse {
    pub interventions: Vec<Intervention>,
}
