//! Blocking HTTP implementation of [`RecordService`].
//!
//! All calls are synchronous and run to completion or failure; the
//! client performs no retries. Query results are paginated by the
//! service and followed lazily as the returned stream is consumed.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use ureq::{Agent, Body};
use url::Url;

use crate::{
    config::ClientConfig,
    error::{ClientError, Result},
    service::{RecordService, RecordStream},
    types::{Envelope, FieldsResponse, ProjectEntry, Record, RecordPage, TypeEntry},
};

/// HTTP client for the record service.
pub struct HttpClient {
    agent: Agent,
    config: ClientConfig,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Self {
        let agent = config.build();
        Self {
            agent,
            config,
        }
    }

    /// Builds an endpoint URL under the configured base, with a
    /// trailing slash the service requires.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.config.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    fn auth_header(&self) -> Option<String> {
        self.config
            .token
            .as_ref()
            .map(|token| format!("Token {token}"))
    }

    fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let mut req = self.agent.get(url.as_str());
        if let Some(auth) = self.auth_header() {
            req = req.header("authorization", auth);
        }
        read_json(req.call()?)
    }
}

impl RecordService for HttpClient {
    fn projects(&self) -> Result<Vec<ProjectEntry>> {
        let url = self.endpoint(&["projects"])?;
        debug!("listing projects from {url}");
        let envelope: Envelope<Vec<ProjectEntry>> = self.get_json(&url)?;
        Ok(envelope.data)
    }

    fn fields(&self, project: &str) -> Result<FieldsResponse> {
        let url = self.endpoint(&["projects", project, "fields"])?;
        debug!(project = project, "describing fields");
        let envelope: Envelope<FieldsResponse> = self.get_json(&url)?;
        Ok(envelope.data)
    }

    fn types(&self) -> Result<Vec<TypeEntry>> {
        let url = self.endpoint(&["projects", "types"])?;
        debug!("fetching type catalog");
        let envelope: Envelope<Vec<TypeEntry>> = self.get_json(&url)?;
        Ok(envelope.data)
    }

    fn search(&self, project: &str, filter: &Value) -> Result<RecordStream> {
        let url = self.endpoint(&["projects", project, "query"])?;
        debug!(project = project, "submitting query to {url}");

        let mut req = self.agent.post(url.as_str());
        if let Some(auth) = self.auth_header() {
            req = req.header("authorization", auth);
        }
        let first: RecordPage = read_json(req.send_json(filter)?)?;

        Ok(Box::new(PageStream::new(
            self.agent.clone(),
            self.auth_header(),
            first,
        )))
    }
}

/// Iterator over query results that follows `next` links on demand.
///
/// A page fetch failure is yielded as an error item and ends the
/// stream, so a consumer can never mistake a truncated stream for a
/// complete one.
struct PageStream {
    agent: Agent,
    auth: Option<String>,
    records: std::vec::IntoIter<Record>,
    next: Option<String>,
    done: bool,
}

impl PageStream {
    fn new(agent: Agent, auth: Option<String>, first: RecordPage) -> Self {
        Self {
            agent,
            auth,
            records: first.data.into_iter(),
            next: first.next,
            done: false,
        }
    }

    fn fetch(&self, url: &str) -> Result<RecordPage> {
        debug!("fetching next page from {url}");
        let mut req = self.agent.get(url);
        if let Some(auth) = &self.auth {
            req = req.header("authorization", auth.as_str());
        }
        read_json(req.call()?)
    }
}

impl Iterator for PageStream {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }
            if let Some(record) = self.records.next() {
                return Some(Ok(record));
            }
            let Some(next_url) = self.next.take() else {
                self.done = true;
                return None;
            };
            match self.fetch(&next_url) {
                Ok(page) => {
                    self.records = page.data.into_iter();
                    self.next = page.next;
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

fn read_json<T: DeserializeOwned>(resp: ureq::http::Response<Body>) -> Result<T> {
    let status = resp.status();
    let body = resp.into_body().read_to_vec()?;

    if !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            detail: error_detail(&body),
        });
    }

    Ok(serde_json::from_slice(&body)?)
}

/// Pulls the human-readable rejection message out of an error body.
fn error_detail(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        if let Some(detail) = value.get("detail").and_then(Value::as_str) {
            return detail.to_string();
        }
        if let Some(messages) = value.get("messages") {
            return messages.to_string();
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        "no detail provided".to_string()
    } else {
        text.to_string()
    }
}
