//! Mock port implementations for testing
//!
//! Provides an in-memory agency store and a recording Alto API, enabling
//! deterministic unit tests without database or network dependencies.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use altolink_core::{AgencyRepository, AltoApi};
use altolink_domain::{
    Agency, AltoEnvironment, AltoLinkError, AltoProperty, AltoSettingsChange, AltoSettingsUpdate,
    AuditEntry, PropertyFilter, PropertyListResponse, Result as DomainResult,
};

/// In-memory mock for `AgencyRepository`.
#[derive(Default, Clone)]
pub struct InMemoryAgencyRepository {
    agencies: Arc<Mutex<BTreeMap<String, Agency>>>,
    audit: Arc<Mutex<Vec<AuditEntry>>>,
}

impl InMemoryAgencyRepository {
    pub fn with_agencies(agencies: impl IntoIterator<Item = Agency>) -> Self {
        let repo = Self::default();
        {
            let mut map = repo.agencies.lock().unwrap();
            for agency in agencies {
                map.insert(agency.id.clone(), agency);
            }
        }
        repo
    }

    pub fn stored(&self, id: &str) -> Option<Agency> {
        self.agencies.lock().unwrap().get(id).cloned()
    }

    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.audit.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgencyRepository for InMemoryAgencyRepository {
    async fn list(&self, offset: u64, limit: u64) -> DomainResult<(Vec<Agency>, u64)> {
        let map = self.agencies.lock().unwrap();
        let mut all: Vec<Agency> = map.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        let total = all.len() as u64;
        let page = all.into_iter().skip(offset as usize).take(limit as usize).collect();
        Ok((page, total))
    }

    async fn get(&self, id: &str) -> DomainResult<Option<Agency>> {
        Ok(self.agencies.lock().unwrap().get(id).cloned())
    }

    async fn insert(&self, agency: Agency) -> DomainResult<()> {
        self.agencies.lock().unwrap().insert(agency.id.clone(), agency);
        Ok(())
    }

    async fn update_alto_settings(
        &self,
        id: &str,
        update: AltoSettingsUpdate,
        actor: &str,
    ) -> DomainResult<AltoSettingsChange> {
        let mut map = self.agencies.lock().unwrap();
        let before = map
            .get(id)
            .cloned()
            .ok_or_else(|| AltoLinkError::NotFound(format!("agency {id}")))?;
        let after = before.with_alto_settings(&update)?;
        let audit = AuditEntry::for_change(&before, &after, actor);

        if let Some(entry) = &audit {
            map.insert(after.id.clone(), after.clone());
            self.audit.lock().unwrap().push(entry.clone());
        }
        Ok(AltoSettingsChange { agency: after, audit })
    }

    async fn list_audit(&self, agency_id: &str) -> DomainResult<Vec<AuditEntry>> {
        let mut entries: Vec<AuditEntry> = self
            .audit
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.agency_id == agency_id)
            .cloned()
            .collect();
        entries.reverse();
        Ok(entries)
    }
}

/// A call observed by `RecordingAltoApi`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub operation: &'static str,
    pub agency_ref: Option<String>,
}

/// Mock `AltoApi` that records the agency reference of every call.
#[derive(Clone)]
pub struct RecordingAltoApi {
    environment: AltoEnvironment,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingAltoApi {
    pub fn new(environment: AltoEnvironment) -> Self {
        Self { environment, calls: Arc::new(Mutex::new(Vec::new())) }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, agency_ref: Option<&str>) {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall { operation, agency_ref: agency_ref.map(str::to_string) });
    }
}

#[async_trait]
impl AltoApi for RecordingAltoApi {
    fn environment(&self) -> AltoEnvironment {
        self.environment
    }

    async fn list_properties(
        &self,
        agency_ref: Option<&str>,
        _filter: &PropertyFilter,
    ) -> DomainResult<PropertyListResponse> {
        self.record("list_properties", agency_ref);
        let property: AltoProperty =
            serde_json::from_value(serde_json::json!({ "id": "prop-1" })).unwrap();
        Ok(PropertyListResponse {
            properties: vec![property],
            total_count: Some(1),
            ..Default::default()
        })
    }

    async fn get_property(
        &self,
        property_id: &str,
        agency_ref: Option<&str>,
    ) -> DomainResult<AltoProperty> {
        self.record("get_property", agency_ref);
        if property_id == "missing" {
            return Err(AltoLinkError::NotFound(format!("property {property_id}")));
        }
        Ok(serde_json::from_value(serde_json::json!({ "id": property_id })).unwrap())
    }
}
