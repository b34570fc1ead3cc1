//! `reqwest`-backed catalog client.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shelf_query::QueryParams;
use tracing::debug;
use url::Url;

use crate::{CatalogError, CatalogResponse, CatalogService, Endpoint, Product, Result};

/// Default listing path, relative to the base URL.
pub const DEFAULT_LIST_PATH: &str = "products";
/// Default search path, relative to the base URL.
pub const DEFAULT_SEARCH_PATH: &str = "products/search";

/// Resolved URLs of the two catalog endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEndpoints {
	listing: Url,
	search: Url,
}

impl CatalogEndpoints {
	/// Resolves `list_path` and `search_path` against `base`.
	///
	/// Relative paths follow URL join rules, so a base without a trailing
	/// slash replaces its last segment.
	pub fn new(base: &Url, list_path: &str, search_path: &str) -> Result<Self> {
		Ok(Self {
			listing: join(base, list_path)?,
			search: join(base, search_path)?,
		})
	}

	/// Endpoints at the default `products` and `products/search` paths.
	pub fn with_defaults(base: &Url) -> Result<Self> {
		Self::new(base, DEFAULT_LIST_PATH, DEFAULT_SEARCH_PATH)
	}

	pub fn url(&self, endpoint: Endpoint) -> &Url {
		match endpoint {
			Endpoint::Listing => &self.listing,
			Endpoint::Search => &self.search,
		}
	}
}

fn join(base: &Url, path: &str) -> Result<Url> {
	base.join(path).map_err(|e| CatalogError::InvalidEndpoint {
		path: path.to_string(),
		reason: e.to_string(),
	})
}

/// Builder for [`HttpCatalog`].
#[derive(Debug)]
pub struct HttpCatalogBuilder<T = Product> {
	endpoints: CatalogEndpoints,
	timeout: Option<Duration>,
	user_agent: Option<String>,
	_item: PhantomData<fn() -> T>,
}

impl<T> HttpCatalogBuilder<T> {
	/// Per-request timeout. Unset means requests may wait indefinitely.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());
		self
	}

	pub fn build(self) -> Result<HttpCatalog<T>> {
		let mut builder = reqwest::Client::builder();
		if let Some(timeout) = self.timeout {
			builder = builder.timeout(timeout);
		}
		if let Some(user_agent) = self.user_agent {
			builder = builder.user_agent(user_agent);
		}
		let client = builder.build().map_err(|e| CatalogError::ClientBuild(e.to_string()))?;

		Ok(HttpCatalog {
			client,
			endpoints: self.endpoints,
			_item: PhantomData,
		})
	}
}

/// Catalog service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalog<T = Product> {
	client: reqwest::Client,
	endpoints: CatalogEndpoints,
	_item: PhantomData<fn() -> T>,
}

impl<T> HttpCatalog<T> {
	pub fn builder(endpoints: CatalogEndpoints) -> HttpCatalogBuilder<T> {
		HttpCatalogBuilder {
			endpoints,
			timeout: None,
			user_agent: None,
			_item: PhantomData,
		}
	}
}

#[async_trait]
impl<T> CatalogService for HttpCatalog<T>
where
	T: DeserializeOwned + Send + 'static,
{
	type Item = T;

	async fn fetch(&self, endpoint: Endpoint, params: &QueryParams) -> Result<CatalogResponse<T>> {
		let url = self.endpoints.url(endpoint);
		debug!(endpoint = endpoint.as_str(), %url, params = params.len(), "catalog.request");

		let response = self.client.get(url.clone()).query(&params.to_pairs()).send().await?;
		let status = response.status();
		let body = response.bytes().await?;

		if !status.is_success() {
			let message = serde_json::from_slice::<CatalogResponse<serde_json::Value>>(&body)
				.ok()
				.and_then(|envelope| envelope.message);
			debug!(endpoint = endpoint.as_str(), status = status.as_u16(), "catalog.response.error_status");
			return Err(CatalogError::Service {
				status: Some(status.as_u16()),
				message,
			});
		}

		serde_json::from_slice(&body).map_err(|e| CatalogError::Decode(e.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn paths_resolve_against_base() {
		let base = Url::parse("http://localhost:3000/api/").unwrap();
		let endpoints = CatalogEndpoints::with_defaults(&base).unwrap();
		assert_eq!(endpoints.url(Endpoint::Listing).as_str(), "http://localhost:3000/api/products");
		assert_eq!(endpoints.url(Endpoint::Search).as_str(), "http://localhost:3000/api/products/search");
	}

	#[test]
	fn absolute_paths_replace_base_path() {
		let base = Url::parse("http://localhost:3000/api/").unwrap();
		let endpoints = CatalogEndpoints::new(&base, "/v2/items", "/v2/items/find").unwrap();
		assert_eq!(endpoints.url(Endpoint::Listing).as_str(), "http://localhost:3000/v2/items");
	}
}
