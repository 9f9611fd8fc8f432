//! Port interfaces for agency persistence
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations for the agency store.

use async_trait::async_trait;
use altolink_domain::{Agency, AltoSettingsChange, AltoSettingsUpdate, AuditEntry, Result};

/// Trait for agency persistence and the Alto settings audit trail
#[async_trait]
pub trait AgencyRepository: Send + Sync {
    /// Page through agencies ordered by name; returns the page and the total
    /// number of agencies.
    async fn list(&self, offset: u64, limit: u64) -> Result<(Vec<Agency>, u64)>;

    /// Get an agency by ID
    async fn get(&self, id: &str) -> Result<Option<Agency>>;

    /// Insert a new agency
    async fn insert(&self, agency: Agency) -> Result<()>;

    /// Apply `update` to the stored agency and record the change.
    ///
    /// The current row is read, the new settings are computed with
    /// [`Agency::with_alto_settings`], and the row update plus its
    /// [`AuditEntry::for_change`] entry are written, all under one write
    /// lock. Concurrent edits are serialised, so each entry's old value is
    /// the value that edit replaced. An edit that changes nothing writes
    /// nothing and returns `audit: None`.
    ///
    /// # Errors
    /// `NotFound` for an unknown agency, `InvalidInput` when the result would
    /// violate the production invariant.
    async fn update_alto_settings(
        &self,
        id: &str,
        update: AltoSettingsUpdate,
        actor: &str,
    ) -> Result<AltoSettingsChange>;

    /// Audit entries for an agency, newest first
    async fn list_audit(&self, agency_id: &str) -> Result<Vec<AuditEntry>>;
}
