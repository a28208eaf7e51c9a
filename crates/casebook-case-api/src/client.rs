use crate::ApiError;
use casebook_common_config::ApiConfig;
use casebook_common_core::CaseId;
use casebook_common_http::{parse_json, HttpClient, HttpConfig, HttpError, RequestBuilder};
use casebook_common_log::spans::{case_span, instrument_future, record_error, request_span, Timer};
use casebook_history_types::ingest::{audit_log_from_value, status_history_from_value};
use casebook_history_types::{AuditLogEvent, StatusChangeEvent};
use casebook_session::{Permission, Session};
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Both history feeds of one case, as fetched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseHistory {
    pub status_events: Vec<StatusChangeEvent>,
    pub audit_events: Vec<AuditLogEvent>,
}

impl CaseHistory {
    pub fn is_empty(&self) -> bool {
        self.status_events.is_empty() && self.audit_events.is_empty()
    }
}

/// Client for the case records API.
#[derive(Debug, Clone)]
pub struct CaseApi {
    http: HttpClient,
    request: RequestBuilder,
}

impl CaseApi {
    /// Client for the API at `base_url`.
    pub fn new(base_url: impl Into<String>, http: HttpClient) -> Self {
        Self {
            http,
            request: RequestBuilder::new().base_url(base_url).accept_json(),
        }
    }

    /// Client built from the `api` config section.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = url::Url::parse(config.base_url.trim())
            .map_err(|e| ApiError::Config(format!("api.base_url '{}': {e}", config.base_url)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "api.base_url must be http or https, got '{}'",
                base_url.scheme()
            )));
        }
        let http = HttpClient::with_config(HttpConfig::with_timeout_secs(config.request_timeout_secs))?;
        Ok(Self::new(config.base_url.trim(), http))
    }

    /// Status changes of a case, in the order the API returned them.
    pub async fn status_history(
        &self,
        session: &Session,
        case_id: &CaseId,
    ) -> Result<Vec<StatusChangeEvent>, ApiError> {
        session.require(Permission::ViewHistory)?;
        let value = self.fetch(session, case_id, STATUS_HISTORY).await?;
        Ok(status_history_from_value(value)?)
    }

    /// Audit log of a case, in the order the API returned it.
    pub async fn audit_logs(
        &self,
        session: &Session,
        case_id: &CaseId,
    ) -> Result<Vec<AuditLogEvent>, ApiError> {
        session.require(Permission::ViewHistory)?;
        let value = self.fetch(session, case_id, AUDIT_LOGS).await?;
        Ok(audit_log_from_value(value)?)
    }

    /// Both feeds, fetched concurrently. Fails if either fetch fails.
    pub async fn case_history(
        &self,
        session: &Session,
        case_id: &CaseId,
    ) -> Result<CaseHistory, ApiError> {
        let timer = Timer::start("case_history");
        let fetch = async {
            tokio::try_join!(
                self.status_history(session, case_id),
                self.audit_logs(session, case_id)
            )
        };
        let (status_events, audit_events) =
            instrument_future(fetch, case_span(case_id.as_str())).await?;
        timer.finish();

        debug!(
            case = %case_id,
            status = status_events.len(),
            audit = audit_events.len(),
            "fetched case history"
        );
        Ok(CaseHistory {
            status_events,
            audit_events,
        })
    }

    /// `{base}/api/criminals/{case_id}/{feed}`, with the id percent-encoded.
    fn endpoint(&self, case_id: &CaseId, feed: &str) -> Result<Url, ApiError> {
        if matches!(case_id.as_str(), "." | "..") {
            return Err(HttpError::InvalidUrl(format!("'{case_id}' is not a usable case id")).into());
        }
        Ok(self.request.url(["api", "criminals", case_id.as_str(), feed])?)
    }

    async fn fetch(&self, session: &Session, case_id: &CaseId, feed: &str) -> Result<Value, ApiError> {
        let request = self.request.clone().bearer_auth(session.bearer_token())?;
        let url = self.endpoint(case_id, feed)?;

        let fetch = async {
            let response = self.http.get(url.as_str(), request.headers()).await?;
            let value: Value = parse_json(response).await?;
            Ok::<_, ApiError>(value)
        };

        instrument_future(
            async {
                let result = fetch.await;
                if let Err(e) = &result {
                    record_error(e);
                }
                result
            },
            request_span("GET", url.path()),
        )
        .await
    }
}

const STATUS_HISTORY: &str = "status-history";
const AUDIT_LOGS: &str = "audit-logs";
