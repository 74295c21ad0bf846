//! HTTP implementation of the CMS client
//!
//! Targets a REST document API: collection endpoints under
//! `{base}/api/{type}` with `locale`, `slug`, `page` and `limit` query
//! parameters, JSON bodies, and bearer-token auth.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::client::CmsClient;
use crate::document::{Document, Fields, slug_of};
use crate::error::{Error, Result};

/// Marker header attached to every request so CMS-side write hooks can tell
/// sync-originated writes from editor writes and suppress export feedback
/// loops.
pub const SYNC_ORIGIN_HEADER: &str = "x-sync-origin";
pub const SYNC_ORIGIN_VALUE: &str = "mdx-import";

const PAGE_SIZE: u32 = 100;

/// CMS client over HTTP
pub struct HttpCmsClient {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    docs: Vec<Document>,
    #[serde(rename = "totalPages", default)]
    total_pages: u32,
}

impl HttpCmsClient {
    /// Build a client against `base_url` authenticating with `token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value.
    pub fn new(base_url: impl Into<String>, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| Error::Operation(format!("invalid API token: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(SYNC_ORIGIN_HEADER, HeaderValue::from_static(SYNC_ORIGIN_VALUE));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn collection_url(&self, type_id: &str) -> String {
        format!("{}/api/{}", self.base_url, type_id)
    }

    fn document_url(&self, type_id: &str, document_id: &str) -> String {
        format!("{}/api/{}/{}", self.base_url, type_id, document_id)
    }

    fn request(&self, method: Method, url: &str, locale: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match locale {
            Some(locale) => builder.query(&[("locale", locale)]),
            None => builder,
        }
    }

    async fn expect_success(operation: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response.text().await.unwrap_or_default();
        Err(Error::Status {
            operation: operation.to_string(),
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl CmsClient for HttpCmsClient {
    async fn get_all_entries(&self, type_id: &str, locale: &str) -> Result<Vec<Document>> {
        let mut docs = Vec::new();
        let mut page = 1;
        loop {
            let response = self
                .request(Method::GET, &self.collection_url(type_id), Some(locale))
                .query(&[("page", page), ("limit", PAGE_SIZE)])
                .send()
                .await?;
            let response = Self::expect_success("get_all_entries", response).await?;
            let body: ListResponse = response.json().await?;

            docs.extend(body.docs);
            if page >= body.total_pages {
                break;
            }
            page += 1;
        }

        debug!(type_id, locale, count = docs.len(), "listed CMS documents");
        Ok(docs)
    }

    async fn find_by_slug(
        &self,
        type_id: &str,
        slug: &str,
        locale: Option<&str>,
    ) -> Result<Option<Document>> {
        let response = self
            .request(Method::GET, &self.collection_url(type_id), locale)
            .query(&[("slug", slug), ("limit", "1")])
            .send()
            .await?;
        let response = Self::expect_success("find_by_slug", response).await?;
        let body: ListResponse = response.json().await?;
        Ok(body.docs.into_iter().next())
    }

    async fn create_entry(
        &self,
        type_id: &str,
        fields: &Fields,
        locale: Option<&str>,
    ) -> Result<Document> {
        let response = self
            .request(Method::POST, &self.collection_url(type_id), locale)
            .json(fields)
            .send()
            .await?;
        let response = Self::expect_success("create_entry", response).await?;
        Ok(response.json().await?)
    }

    async fn update_entry(
        &self,
        type_id: &str,
        document_id: &str,
        fields: &Fields,
        locale: Option<&str>,
    ) -> Result<Document> {
        let response = self
            .request(Method::PATCH, &self.document_url(type_id, document_id), locale)
            .json(fields)
            .send()
            .await?;
        let response = Self::expect_success("update_entry", response).await?;
        Ok(response.json().await?)
    }

    async fn create_localization(
        &self,
        type_id: &str,
        document_id: &str,
        locale: &str,
        fields: &Fields,
    ) -> Result<Document> {
        let response = self
            .request(
                Method::PATCH,
                &self.document_url(type_id, document_id),
                Some(locale),
            )
            .json(fields)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::BaseDocumentNotFound {
                type_id: type_id.to_string(),
                document_id: document_id.to_string(),
            });
        }
        let response = Self::expect_success("create_localization", response).await?;
        Ok(response.json().await?)
    }

    async fn update_localization(
        &self,
        type_id: &str,
        document_id: &str,
        locale: &str,
        fields: &Fields,
    ) -> Result<Document> {
        let existing = match slug_of(fields) {
            Some(slug) => self.find_by_slug(type_id, &slug, Some(locale)).await?,
            None => None,
        };

        match existing {
            Some(doc) => {
                self.update_entry(type_id, &doc.id, fields, Some(locale))
                    .await
            }
            None => {
                self.create_localization(type_id, document_id, locale, fields)
                    .await
            }
        }
    }

    async fn delete_entry(&self, type_id: &str, document_id: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, &self.document_url(type_id, document_id), None)
            .send()
            .await?;
        Self::expect_success("delete_entry", response).await?;
        Ok(())
    }

    async fn delete_localization(
        &self,
        type_id: &str,
        document_id: &str,
        locale: &str,
    ) -> Result<()> {
        let response = self
            .request(
                Method::DELETE,
                &self.document_url(type_id, document_id),
                Some(locale),
            )
            .send()
            .await?;
        Self::expect_success("delete_localization", response).await?;
        Ok(())
    }
}
