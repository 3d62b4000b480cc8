//! Shared HTTP client for the backend REST API.
//!
//! The backend owns all state; this module maps the repository traits onto
//! its endpoint conventions: `GET {resource}/pagination` with a
//! `{data, total, page, limit}` envelope, `GET/PUT/DELETE {resource}/{id}`,
//! `POST {resource}` and `POST {resource}/{id}/restore`.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ListQuery, Pagination};

/// Pagination envelope returned by every `{resource}/pagination` endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiPage<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

/// Error body the backend returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Thin wrapper around [`reqwest::Client`] holding the backend base URL and
/// service token.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: &str, token: &str) -> RepositoryResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RepositoryError::Unexpected(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{base}/{path}", base = self.base_url)
    }

    /// Maps a backend response onto the repository error taxonomy.
    async fn check(response: Response) -> RepositoryResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<ApiError>(&body)
                .map(|e| e.message)
                .unwrap_or(body),
            Err(_) => status.to_string(),
        };

        match status {
            StatusCode::NOT_FOUND => Err(RepositoryError::NotFound),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(RepositoryError::ValidationError(message))
            }
            _ => Err(RepositoryError::Backend {
                status: status.as_u16(),
                message,
            }),
        }
    }

    /// Fetches one page of a resource list.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(String, String)],
    ) -> RepositoryResult<ApiPage<T>> {
        let response = self
            .http
            .get(self.url(&format!("{resource}/pagination")))
            .bearer_auth(&self.token)
            .query(params)
            .send()
            .await?;

        let page = Self::check(response).await?.json::<ApiPage<T>>().await?;
        Ok(page)
    }

    /// Fetches a single resource; 404 becomes `None`.
    pub async fn get_one<T: DeserializeOwned>(
        &self,
        resource: &str,
        id: i32,
    ) -> RepositoryResult<Option<T>> {
        let response = self
            .http
            .get(self.url(&format!("{resource}/{id}")))
            .bearer_auth(&self.token)
            .send()
            .await?;

        match Self::check(response).await {
            Ok(response) => Ok(Some(response.json::<T>().await?)),
            Err(RepositoryError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Creates a resource, returning the backend's representation.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> RepositoryResult<T> {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        let created = Self::check(response).await?.json::<T>().await?;
        Ok(created)
    }

    /// Creates a resource where the backend replies with no useful body.
    pub async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> RepositoryResult<()> {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Updates a resource in place.
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        resource: &str,
        id: i32,
        body: &B,
    ) -> RepositoryResult<T> {
        let response = self
            .http
            .put(self.url(&format!("{resource}/{id}")))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        let updated = Self::check(response).await?.json::<T>().await?;
        Ok(updated)
    }

    /// Archives (soft-deletes) a resource.
    pub async fn delete(&self, resource: &str, id: i32) -> RepositoryResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("{resource}/{id}")))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Unarchives a previously deleted resource.
    pub async fn restore(&self, resource: &str, id: i32) -> RepositoryResult<()> {
        let response = self
            .http
            .post(self.url(&format!("{resource}/{id}/restore")))
            .bearer_auth(&self.token)
            .header(header::CONTENT_LENGTH, 0)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }
}

/// Backend-facing implementation of every repository trait.
#[derive(Clone)]
pub struct RestRepository {
    api: ApiClient,
}

impl RestRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }
}

/// Serializes the common list filters into query parameters.
pub(crate) fn base_params(query: &ListQuery) -> Vec<(String, String)> {
    let mut params = vec![(
        "academy_id".to_string(),
        query.academy_id.get().to_string(),
    )];

    if let Some(search) = &query.search {
        params.push(("search".to_string(), search.clone()));
    }
    if query.archived {
        params.push(("archived".to_string(), "true".to_string()));
    }
    push_pagination(&mut params, query.pagination);

    params
}

pub(crate) fn push_pagination(params: &mut Vec<(String, String)>, pagination: Option<Pagination>) {
    if let Some(pagination) = pagination {
        params.push(("page".to_string(), pagination.page.to_string()));
        params.push(("limit".to_string(), pagination.per_page.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::AcademyId;

    #[test]
    fn test_envelope_deserializes() {
        let json = serde_json::json!({
            "data": [{"value": 1}, {"value": 2}],
            "total": 41,
            "page": 1,
            "limit": 20
        });

        #[derive(Debug, serde::Deserialize)]
        struct Row {
            value: i32,
        }

        let page: ApiPage<Row> = serde_json::from_value(json).unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.total, 41);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 20);
        assert_eq!(page.data[1].value, 2);
    }

    #[test]
    fn test_base_params_include_filters() {
        let query = ListQuery::new(AcademyId::new(7).unwrap())
            .search("omar")
            .archived(true)
            .paginate(2, 20);

        let params = base_params(&query);

        assert!(params.contains(&("academy_id".to_string(), "7".to_string())));
        assert!(params.contains(&("search".to_string(), "omar".to_string())));
        assert!(params.contains(&("archived".to_string(), "true".to_string())));
        assert!(params.contains(&("page".to_string(), "2".to_string())));
        assert!(params.contains(&("limit".to_string(), "20".to_string())));
    }

    #[test]
    fn test_base_params_omit_defaults() {
        let query = ListQuery::new(AcademyId::new(7).unwrap());
        let params = base_params(&query);
        assert_eq!(params.len(), 1);
    }
}
