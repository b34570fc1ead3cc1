use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Catalog product record.
///
/// Fields the catalog adds beyond these are kept in [`Product::extra`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
	#[serde(deserialize_with = "id_from_string_or_number")]
	pub id: String,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub price: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image_url: Option<String>,
	#[serde(default = "default_true")]
	pub is_active: bool,
	#[serde(default = "default_true")]
	pub is_in_stock: bool,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Product {
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			description: None,
			category_id: None,
			price: None,
			image_url: None,
			is_active: true,
			is_in_stock: true,
			extra: Map::new(),
		}
	}
}

const fn default_true() -> bool {
	true
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: serde::Deserializer<'de>,
{
	match Value::deserialize(deserializer)? {
		Value::String(id) => Ok(id),
		Value::Number(id) => Ok(id.to_string()),
		other => Err(serde::de::Error::custom(format!("expected string or number id, got {other}"))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_numeric_ids_and_keeps_unknown_fields() {
		let product: Product = serde_json::from_str(
			r#"{"id":42,"name":"Lagavulin 16","category_id":"whisky","price":89.5,"abv":43.0}"#,
		)
		.unwrap();

		assert_eq!(product.id, "42");
		assert_eq!(product.category_id.as_deref(), Some("whisky"));
		assert!(product.is_active && product.is_in_stock);
		assert_eq!(product.extra.get("abv"), Some(&Value::from(43.0)));
	}

	#[test]
	fn rejects_object_ids() {
		let result = serde_json::from_str::<Product>(r#"{"id":{"oid":1},"name":"x"}"#);
		assert!(result.is_err());
	}
}
