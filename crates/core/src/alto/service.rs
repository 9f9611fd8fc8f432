//! Property lookups on behalf of an agency

use std::sync::Arc;

use altolink_domain::constants::ADMIN_AGENCIES_PATH;
use altolink_domain::{
    Agency, AltoEnvironment, AltoLinkError, AltoProperty, PropertyFilter, PropertyListResponse,
    Result,
};
use tracing::debug;

use super::ports::AltoApi;
use crate::agency::ports::AgencyRepository;

/// Upper bound on `page_size` accepted by the Alto listing endpoint.
pub const MAX_PROPERTY_PAGE_SIZE: u32 = 100;

/// Resolves an agency's Alto settings and calls the partner API with them
pub struct AltoPropertyService {
    agencies: Arc<dyn AgencyRepository>,
    api: Arc<dyn AltoApi>,
}

impl AltoPropertyService {
    pub fn new(agencies: Arc<dyn AgencyRepository>, api: Arc<dyn AltoApi>) -> Self {
        Self { agencies, api }
    }

    pub async fn list_properties(
        &self,
        agency_id: &str,
        filter: &PropertyFilter,
    ) -> Result<PropertyListResponse> {
        validate_filter(filter)?;
        let agency = self.load(agency_id).await?;
        let agency_ref = self.agency_ref_for(&agency)?;

        debug!(
            agency_id = %agency.id,
            environment = %self.api.environment(),
            page = filter.page,
            "listing alto properties"
        );
        self.api.list_properties(agency_ref.as_deref(), filter).await
    }

    pub async fn get_property(&self, agency_id: &str, property_id: &str) -> Result<AltoProperty> {
        if property_id.trim().is_empty() {
            return Err(AltoLinkError::InvalidInput("property id is required".to_string()));
        }
        let agency = self.load(agency_id).await?;
        let agency_ref = self.agency_ref_for(&agency)?;

        self.api.get_property(property_id.trim(), agency_ref.as_deref()).await
    }

    /// Reference to send for `agency` in the client's environment.
    ///
    /// # Errors
    /// `Config` in production when the agency is not connected, naming the
    /// agency so the operator can fix it in the admin panel.
    fn agency_ref_for(&self, agency: &Agency) -> Result<Option<String>> {
        match self.api.environment() {
            AltoEnvironment::Sandbox => Ok(None),
            AltoEnvironment::Production => {
                if agency.agency_ref().is_none() {
                    return Err(AltoLinkError::Config(format!(
                        "agency {} ({}) has no AgencyRef; add it at {ADMIN_AGENCIES_PATH}",
                        agency.name, agency.id
                    )));
                }
                match agency.production_ref() {
                    Some(agency_ref) => Ok(Some(agency_ref.to_string())),
                    None => Err(AltoLinkError::Config(format!(
                        "Alto production is not enabled for agency {} ({}); enable it at {ADMIN_AGENCIES_PATH}",
                        agency.name, agency.id
                    ))),
                }
            }
        }
    }

    async fn load(&self, id: &str) -> Result<Agency> {
        self.agencies
            .get(id)
            .await?
            .ok_or_else(|| AltoLinkError::NotFound(format!("agency {id}")))
    }
}

fn validate_filter(filter: &PropertyFilter) -> Result<()> {
    if filter.page == 0 {
        return Err(AltoLinkError::InvalidInput("page must be at least 1".to_string()));
    }
    if filter.page_size == 0 || filter.page_size > MAX_PROPERTY_PAGE_SIZE {
        return Err(AltoLinkError::InvalidInput(format!(
            "page_size must be between 1 and {MAX_PROPERTY_PAGE_SIZE}"
        )));
    }
    Ok(())
}
