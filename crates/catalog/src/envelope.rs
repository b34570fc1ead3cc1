use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// Response envelope shared by the listing and search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogResponse<T> {
	pub success: bool,
	#[serde(default = "Vec::new")]
	pub data: Vec<T>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
}

impl<T> CatalogResponse<T> {
	pub fn ok(data: Vec<T>) -> Self {
		Self {
			success: true,
			data,
			message: None,
		}
	}

	pub fn failed(message: Option<String>) -> Self {
		Self {
			success: false,
			data: Vec::new(),
			message,
		}
	}

	/// Converts `success = false` into a [`CatalogError::Service`].
	pub fn into_result(self) -> Result<Vec<T>, CatalogError> {
		if self.success {
			Ok(self.data)
		} else {
			Err(CatalogError::service(self.message))
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn missing_data_defaults_to_empty() {
		let response: CatalogResponse<serde_json::Value> =
			serde_json::from_str(r#"{"success":false,"message":"Search index offline"}"#).unwrap();
		assert_eq!(
			response.into_result(),
			Err(CatalogError::service(Some("Search index offline".into())))
		);
	}

	#[test]
	fn success_yields_data_in_order() {
		let response: CatalogResponse<u32> = serde_json::from_str(r#"{"success":true,"data":[3,1,2]}"#).unwrap();
		assert_eq!(response.into_result(), Ok(vec![3, 1, 2]));
	}
}
