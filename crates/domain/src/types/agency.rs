//! Agency records and their Alto integration settings.
//!
//! The agency row itself belongs to the wider system; this integration only
//! adds two fields to it: the partner-issued `agency_ref` and the
//! `alto_production_enabled` toggle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AltoLinkError, Result};
use crate::impl_domain_status_conversions;

/// Which Alto deployment outbound calls are sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AltoEnvironment {
    #[default]
    Sandbox,
    Production,
}

impl_domain_status_conversions!(AltoEnvironment {
    Sandbox => "sandbox",
    Production => "production",
});

impl AltoEnvironment {
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Connection status shown next to each agency in the admin list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgencyStatus {
    #[serde(rename = "Sandbox only")]
    SandboxOnly,
    #[serde(rename = "Production connected")]
    ProductionConnected,
    #[serde(rename = "Missing AgencyRef")]
    MissingAgencyRef,
}

impl AgencyStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::SandboxOnly => "Sandbox only",
            Self::ProductionConnected => "Production connected",
            Self::MissingAgencyRef => "Missing AgencyRef",
        }
    }
}

impl std::fmt::Display for AgencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Agency record as seen by the Alto integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agency {
    pub id: String,
    pub name: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    /// Partner-issued identifier, pasted in by an operator. Opaque to us.
    pub agency_ref: Option<String>,
    pub alto_production_enabled: bool,
}

impl Agency {
    /// Create an agency with no Alto settings.
    pub fn new(id: impl Into<String>, name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            username: username.into(),
            created_at: Utc::now(),
            agency_ref: None,
            alto_production_enabled: false,
        }
    }

    /// Stored reference, ignoring blank values.
    pub fn agency_ref(&self) -> Option<&str> {
        self.agency_ref.as_deref().map(str::trim).filter(|r| !r.is_empty())
    }

    /// Reference to send on production calls, if this agency is connected.
    pub fn production_ref(&self) -> Option<&str> {
        if self.alto_production_enabled {
            self.agency_ref()
        } else {
            None
        }
    }

    /// Derive the admin status for the given system environment.
    ///
    /// Sandbox deployments never need a reference. In production, an agency
    /// without a stored reference is flagged regardless of its toggle so the
    /// operator knows the email from the partner is still outstanding.
    pub fn status(&self, environment: AltoEnvironment) -> AgencyStatus {
        match environment {
            AltoEnvironment::Sandbox => AgencyStatus::SandboxOnly,
            AltoEnvironment::Production => match (self.agency_ref(), self.alto_production_enabled) {
                (None, _) => AgencyStatus::MissingAgencyRef,
                (Some(_), true) => AgencyStatus::ProductionConnected,
                (Some(_), false) => AgencyStatus::SandboxOnly,
            },
        }
    }
}

/// Trim a submitted reference; blank input means "no reference".
pub fn normalize_agency_ref(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Admin edit payload for an agency's Alto settings.
///
/// Absent fields keep the stored value. `agency_ref: Some("")` clears the
/// reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AltoSettingsUpdate {
    #[serde(default)]
    pub agency_ref: Option<String>,
    #[serde(default)]
    pub enable_production: Option<bool>,
}

impl Agency {
    /// The agency as it would look after `update`.
    ///
    /// # Errors
    /// `InvalidInput` when the result would have production enabled without
    /// a reference.
    pub fn with_alto_settings(&self, update: &AltoSettingsUpdate) -> Result<Self> {
        let agency_ref = match &update.agency_ref {
            Some(submitted) => normalize_agency_ref(submitted),
            None => self.agency_ref.clone(),
        };
        let alto_production_enabled =
            update.enable_production.unwrap_or(self.alto_production_enabled);

        if alto_production_enabled && agency_ref.is_none() {
            return Err(AltoLinkError::InvalidInput(
                "AgencyRef is required to enable Alto production".to_string(),
            ));
        }

        Ok(Self { agency_ref, alto_production_enabled, ..self.clone() })
    }
}

/// Agency row as rendered by the admin surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencyAltoDetail {
    pub id: String,
    pub name: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub agency_ref: Option<String>,
    pub alto_production_enabled: bool,
    pub alto_env: AltoEnvironment,
    pub alto_status: AgencyStatus,
}

impl AgencyAltoDetail {
    pub fn from_agency(agency: &Agency, environment: AltoEnvironment) -> Self {
        Self {
            id: agency.id.clone(),
            name: agency.name.clone(),
            username: agency.username.clone(),
            created_at: agency.created_at,
            agency_ref: agency.agency_ref.clone(),
            alto_production_enabled: agency.alto_production_enabled,
            alto_env: environment,
            alto_status: agency.status(environment),
        }
    }
}

/// One page of the admin agency list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencyAltoList {
    pub items: Vec<AgencyAltoDetail>,
    pub total: u64,
}
