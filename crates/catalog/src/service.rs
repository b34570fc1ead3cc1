use async_trait::async_trait;
use shelf_query::QueryParams;

use crate::{CatalogResponse, Result};

/// Catalog endpoint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// Plain filtered listing.
	Listing,
	/// Free-text search.
	Search,
}

impl Endpoint {
	/// Picks the endpoint a parameter map is meant for.
	pub fn for_params(params: &QueryParams) -> Self {
		if params.is_search() { Self::Search } else { Self::Listing }
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Listing => "listing",
			Self::Search => "search",
		}
	}
}

/// Remote catalog queried by the search coordinator.
///
/// Implementations report transport failures as `Err`; a reachable server
/// reporting failure may come back either as `Err(CatalogError::Service)` or
/// as an `Ok` envelope with `success = false`.
#[async_trait]
pub trait CatalogService: Send + Sync + 'static {
	/// Record type returned in `data`.
	type Item: Send + 'static;

	/// Issues one GET-style query against `endpoint`.
	async fn fetch(&self, endpoint: Endpoint, params: &QueryParams) -> Result<CatalogResponse<Self::Item>>;
}

#[cfg(test)]
mod tests {
	use shelf_query::{FilterSet, SearchText, build};

	use super::*;

	#[test]
	fn endpoint_follows_search_param() {
		let filters = FilterSet::default();
		assert_eq!(Endpoint::for_params(&build(&SearchText::new("rye"), &filters)), Endpoint::Search);
		assert_eq!(Endpoint::for_params(&build(&SearchText::new(" "), &filters)), Endpoint::Listing);
	}
}
