use crate::core::cache::ServiceCache;
use crate::domain::model::{BpmFlags, ServiceRecord, UnresolvedReason};
use crate::domain::ports::XmlmcTransport;
use crate::domain::request::XmlmcRequest;
use crate::utils::error::Result;
use crate::utils::logger::{log_event, Severity};
use serde::Deserialize;
use std::sync::Arc;

pub const SERVICE_MANAGER_APP: &str = "com.hornbill.servicemanager";
const SERVICES_ENTITY: &str = "Services";
const SERVICE_NAME_FIELD: &str = "h_servicename";

/// `entityBrowseRecords` response, reduced to the fields a service search reads.
#[derive(Debug, Default, Deserialize)]
pub struct ServiceSearchResponse {
    #[serde(rename = "@status", default)]
    pub status: String,
    #[serde(default)]
    params: Option<ResponseParams>,
    #[serde(default)]
    state: Option<ResponseState>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseParams {
    #[serde(rename = "rowData", default)]
    row_data: Option<RowData>,
}

#[derive(Debug, Default, Deserialize)]
struct RowData {
    #[serde(default)]
    row: Vec<ServiceRow>,
}

#[derive(Debug, Default, Deserialize)]
struct ServiceRow {
    #[serde(default)]
    h_servicename: String,
    #[serde(default)]
    h_pk_serviceid: u64,
    #[serde(default)]
    h_bpm_incident: String,
    #[serde(default)]
    h_bpm_service: String,
    #[serde(default)]
    h_bpm_change: String,
    #[serde(default)]
    h_bpm_problem: String,
    #[serde(default)]
    h_bpm_knownerror: String,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseState {
    #[serde(default)]
    code: String,
    #[serde(default)]
    error: String,
}

impl ServiceSearchResponse {
    pub fn from_xml(xml: &str) -> Result<Self> {
        Ok(quick_xml::de::from_str(xml)?)
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    pub fn error_detail(&self) -> &str {
        self.state.as_ref().map(|s| s.error.as_str()).unwrap_or("")
    }

    pub fn error_code(&self) -> &str {
        self.state.as_ref().map(|s| s.code.as_str()).unwrap_or("")
    }

    fn first_row(&self) -> Option<&ServiceRow> {
        self.params
            .as_ref()
            .and_then(|p| p.row_data.as_ref())
            .and_then(|rows| rows.row.first())
    }

    /// Name of the returned service, empty when the search matched nothing.
    pub fn service_name(&self) -> &str {
        self.first_row().map(|r| r.h_servicename.as_str()).unwrap_or("")
    }

    pub fn service_record(&self) -> Option<ServiceRecord> {
        let row = self.first_row()?;
        Some(ServiceRecord::new(
            row.h_servicename.clone(),
            row.h_pk_serviceid,
            BpmFlags {
                incident: row.h_bpm_incident.clone(),
                service: row.h_bpm_service.clone(),
                change: row.h_bpm_change.clone(),
                problem: row.h_bpm_problem.clone(),
                known_error: row.h_bpm_knownerror.clone(),
            },
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(u64),
    NotFound(UnresolvedReason),
}

impl SearchOutcome {
    pub fn found(&self) -> Option<u64> {
        match self {
            SearchOutcome::Found(id) => Some(*id),
            SearchOutcome::NotFound(_) => None,
        }
    }
}

/// Exact-match service search against the instance. Successful matches are
/// added to the shared [`ServiceCache`].
pub struct ServiceSearch<T: XmlmcTransport> {
    transport: T,
    cache: Arc<ServiceCache>,
    application: String,
}

impl<T: XmlmcTransport> ServiceSearch<T> {
    pub fn new(transport: T, cache: Arc<ServiceCache>) -> Self {
        Self {
            transport,
            cache,
            application: SERVICE_MANAGER_APP.to_string(),
        }
    }

    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.application = application.into();
        self
    }

    pub fn build_request(&self, service_name: &str) -> Result<XmlmcRequest> {
        let mut request = XmlmcRequest::new("data", "entityBrowseRecords");
        request
            .set_param("application", self.application.as_str())
            .set_param("entity", SERVICES_ENTITY)
            .set_param("matchScope", "all")
            .open_element("searchFilter")
            .set_param(SERVICE_NAME_FIELD, service_name);
        request
            .close_element("searchFilter")?
            .set_param("maxResults", "1");
        Ok(request)
    }

    pub async fn search(&self, service_name: &str) -> SearchOutcome {
        let request = match self.build_request(service_name) {
            Ok(request) => request,
            Err(e) => {
                log_event(
                    Severity::Error,
                    &format!("API Call Failed: Search Service [{}]: {}", service_name, e),
                );
                return SearchOutcome::NotFound(UnresolvedReason::Transport(e.to_string()));
            }
        };

        let payload = match self.transport.invoke(&request).await {
            Ok(payload) => payload,
            Err(e) => {
                log_event(
                    Severity::Error,
                    &format!("API Call Failed: Search Service [{}]: {}", service_name, e),
                );
                return SearchOutcome::NotFound(UnresolvedReason::Transport(e.to_string()));
            }
        };

        let response = match ServiceSearchResponse::from_xml(&payload) {
            Ok(response) => response,
            Err(e) => {
                log_event(
                    Severity::Error,
                    &format!("Response Unmarshal Failed: Search Service [{}]: {}", service_name, e),
                );
                return SearchOutcome::NotFound(UnresolvedReason::MalformedResponse(e.to_string()));
            }
        };

        if !response.is_ok() {
            log_event(
                Severity::Warning,
                &format!(
                    "MethodResult Not OK: Search Service [{}]: {}",
                    service_name,
                    response.error_detail()
                ),
            );
            return SearchOutcome::NotFound(UnresolvedReason::RemoteFailure(
                response.error_detail().to_string(),
            ));
        }

        let record = match response.service_record() {
            Some(record) if !record.name.is_empty() => record,
            _ => return SearchOutcome::NotFound(UnresolvedReason::NotFound),
        };

        // 遠端搜尋可能不是精確比對，必須再次確認名稱
        if record.name.to_lowercase() != service_name.to_lowercase() {
            return SearchOutcome::NotFound(UnresolvedReason::NameMismatch {
                returned: record.name,
            });
        }

        let id = record.id;
        let name = record.name.clone();
        if self.cache.insert_if_absent(record) {
            log_event(Severity::Info, &format!("Service Cached [{}] [{}]", name, id));
        } else {
            tracing::debug!(service = %name, id, "Service already cached by a concurrent search");
        }

        SearchOutcome::Found(id)
    }
}
