use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::CommitmentId,
    protocol::{CommitmentDetailResponse, CompanyCommitmentsResponse, CompanyListResponse},
};
use tracing::{debug, warn};
use url::Url;

pub mod config;
pub mod error;

pub use config::{load_settings, load_settings_from, ClientSettings, SettingsError};
pub use error::RequestError;

/// Read-only access to the commitments service.
///
/// Every call is a fresh round trip: implementations never retry and never
/// cache.
#[async_trait]
pub trait CommitmentsApi: Send + Sync {
    async fn list_companies(&self) -> Result<Vec<String>, RequestError>;
    async fn list_commitments(
        &self,
        company: &str,
    ) -> Result<CompanyCommitmentsResponse, RequestError>;
    async fn get_commitment_detail(
        &self,
        company: &str,
        commitment_id: CommitmentId,
    ) -> Result<CommitmentDetailResponse, RequestError>;
}

#[async_trait]
impl<T> CommitmentsApi for Arc<T>
where
    T: CommitmentsApi + ?Sized,
{
    async fn list_companies(&self) -> Result<Vec<String>, RequestError> {
        (**self).list_companies().await
    }

    async fn list_commitments(
        &self,
        company: &str,
    ) -> Result<CompanyCommitmentsResponse, RequestError> {
        (**self).list_commitments(company).await
    }

    async fn get_commitment_detail(
        &self,
        company: &str,
        commitment_id: CommitmentId,
    ) -> Result<CommitmentDetailResponse, RequestError> {
        (**self).get_commitment_detail(company, commitment_id).await
    }
}

pub struct HttpCommitmentsClient {
    http: Client,
    api_root: String,
}

impl HttpCommitmentsClient {
    /// `api_root` is the absolute URL every `/api/...` path is appended to.
    pub fn new(api_root: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_root: api_root.into(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(settings.api_root())
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Appends `segments` to the api root. Each segment is percent-encoded on
    /// its own. Empty, `.` and `..` segments are rejected because the url
    /// path would drop or collapse them.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RequestError> {
        if let Some(segment) = segments
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            return Err(RequestError::InvalidPathSegment {
                segment: segment.to_string(),
            });
        }
        let invalid = |reason: String| RequestError::InvalidBaseUrl {
            url: self.api_root.clone(),
            reason,
        };
        let mut url = Url::parse(&self.api_root).map_err(|err| invalid(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("url cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn request_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, RequestError> {
        debug!(%url, "commitments request");
        let response = match self.http.get(url.clone()).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(%url, "commitments request failed to complete: {err}");
                return Err(err.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            // An unreadable error body still yields the synthesized message.
            let body = response.bytes().await.unwrap_or_default();
            let err = RequestError::from_status(status, &body);
            warn!(%url, status = status.as_u16(), "commitments request rejected: {err}");
            return Err(err);
        }

        response.json::<T>().await.map_err(|err| {
            warn!(%url, "commitments response body was not valid JSON: {err}");
            RequestError::from(err)
        })
    }
}

#[async_trait]
impl CommitmentsApi for HttpCommitmentsClient {
    async fn list_companies(&self) -> Result<Vec<String>, RequestError> {
        let url = self.endpoint(&["api", "companies"])?;
        let body: CompanyListResponse = self.request_json(url).await?;
        Ok(body.companies)
    }

    async fn list_commitments(
        &self,
        company: &str,
    ) -> Result<CompanyCommitmentsResponse, RequestError> {
        let url = self.endpoint(&["api", "companies", company, "commitments"])?;
        self.request_json(url).await
    }

    async fn get_commitment_detail(
        &self,
        company: &str,
        commitment_id: CommitmentId,
    ) -> Result<CommitmentDetailResponse, RequestError> {
        let id = commitment_id.to_string();
        let url = self.endpoint(&["api", "companies", company, "commitments", &id])?;
        self.request_json(url).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
