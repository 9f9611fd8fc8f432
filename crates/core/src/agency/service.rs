//! Agency admin service - Alto settings edits with an audit trail

use std::sync::Arc;

use altolink_domain::{
    Agency, AgencyAltoDetail, AgencyAltoList, AltoEnvironment, AltoLinkError, AltoSettingsUpdate,
    AuditEntry, Result,
};
use tracing::{debug, info};

use super::ports::AgencyRepository;

/// Largest page the admin list will return.
pub const MAX_ADMIN_PAGE_SIZE: u32 = 200;

/// Operator-facing view and edit of each agency's Alto settings
pub struct AgencyAdminService {
    repository: Arc<dyn AgencyRepository>,
    environment: AltoEnvironment,
}

impl AgencyAdminService {
    /// Create a new admin service
    ///
    /// `environment` is the deployment's Alto environment; it drives the
    /// computed status shown for each agency.
    pub fn new(repository: Arc<dyn AgencyRepository>, environment: AltoEnvironment) -> Self {
        Self { repository, environment }
    }

    pub fn environment(&self) -> AltoEnvironment {
        self.environment
    }

    /// One page of agencies with their computed Alto status (1-based `page`)
    pub async fn list_agencies(&self, page: u32, page_size: u32) -> Result<AgencyAltoList> {
        if page == 0 {
            return Err(AltoLinkError::InvalidInput("page must be at least 1".to_string()));
        }
        if page_size == 0 || page_size > MAX_ADMIN_PAGE_SIZE {
            return Err(AltoLinkError::InvalidInput(format!(
                "page_size must be between 1 and {MAX_ADMIN_PAGE_SIZE}"
            )));
        }

        let offset = u64::from(page - 1) * u64::from(page_size);
        let (agencies, total) = self.repository.list(offset, u64::from(page_size)).await?;

        let items = agencies
            .iter()
            .map(|agency| AgencyAltoDetail::from_agency(agency, self.environment))
            .collect();

        Ok(AgencyAltoList { items, total })
    }

    pub async fn get_agency(&self, id: &str) -> Result<AgencyAltoDetail> {
        let agency = self.load(id).await?;
        Ok(AgencyAltoDetail::from_agency(&agency, self.environment))
    }

    /// Apply an operator's edit of the AgencyRef and production toggle
    ///
    /// - Absent fields keep the stored value; a blank `agency_ref` clears it.
    /// - Enabling production without a reference is rejected.
    /// - Turning production off keeps the reference for re-enabling later.
    /// - A change writes exactly one audit entry, in the same transaction;
    ///   an edit that changes nothing writes none.
    pub async fn update_alto_settings(
        &self,
        id: &str,
        update: AltoSettingsUpdate,
        actor: &str,
    ) -> Result<AgencyAltoDetail> {
        let actor = actor.trim();
        if actor.is_empty() {
            return Err(AltoLinkError::InvalidInput("actor is required".to_string()));
        }

        let change = self.repository.update_alto_settings(id, update, actor).await?;

        match &change.audit {
            Some(entry) => info!(
                target: "altolink::audit",
                agency_id = %entry.agency_id,
                actor = %entry.actor,
                old_agency_ref = ?entry.old_value,
                new_agency_ref = ?entry.new_value,
                production_enabled = entry.new_production_enabled,
                "AUDIT alto settings changed"
            ),
            None => debug!(agency_id = %change.agency.id, "alto settings unchanged; nothing saved"),
        }

        Ok(AgencyAltoDetail::from_agency(&change.agency, self.environment))
    }

    /// Audit trail for one agency, newest first
    pub async fn audit_log(&self, id: &str) -> Result<Vec<AuditEntry>> {
        self.load(id).await?;
        self.repository.list_audit(id).await
    }

    async fn load(&self, id: &str) -> Result<Agency> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| AltoLinkError::NotFound(format!("agency {id}")))
    }
}
