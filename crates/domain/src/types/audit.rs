//! Append-only audit trail for Alto settings edits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::agency::Agency;

/// One admin edit of an agency's Alto settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    pub agency_id: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub old_production_enabled: bool,
    pub new_production_enabled: bool,
    pub actor: String,
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    /// Describe the transition from `before` to `after`.
    ///
    /// Returns `None` when neither the reference nor the toggle changed, so
    /// repeated saves of the same form do not pad the log.
    pub fn for_change(before: &Agency, after: &Agency, actor: &str) -> Option<Self> {
        if before.agency_ref == after.agency_ref
            && before.alto_production_enabled == after.alto_production_enabled
        {
            return None;
        }

        Some(Self {
            id: Uuid::now_v7(),
            agency_id: after.id.clone(),
            old_value: before.agency_ref.clone(),
            new_value: after.agency_ref.clone(),
            old_production_enabled: before.alto_production_enabled,
            new_production_enabled: after.alto_production_enabled,
            actor: actor.to_string(),
            timestamp: Utc::now(),
        })
    }
}

/// Outcome of applying an admin edit: the stored agency and, when something
/// changed, the audit entry written with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AltoSettingsChange {
    pub agency: Agency,
    pub audit: Option<AuditEntry>,
}
