use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of value a filter field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
	/// Free-form identifier such as a category ID.
	Text,
	/// Boolean toggle.
	Flag,
}

/// One named filter in a [`FilterSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterField {
	/// Parameter key sent to the catalog service.
	pub key: String,
	/// Accepted value kind.
	pub kind: FilterKind,
}

impl FilterField {
	pub fn new(key: impl Into<String>, kind: FilterKind) -> Self {
		Self { key: key.into(), kind }
	}
}

/// Fixed set of filter keys a view may constrain a query with.
///
/// Declaration order is the order filters are serialized in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FilterField>", into = "Vec<FilterField>")]
pub struct FilterSchema {
	fields: Vec<FilterField>,
}

impl FilterSchema {
	/// Builds a schema from field declarations.
	///
	/// Later duplicates of a key are dropped.
	pub fn new(fields: impl IntoIterator<Item = FilterField>) -> Self {
		let mut deduped: Vec<FilterField> = Vec::new();
		for field in fields {
			if !deduped.iter().any(|f| f.key == field.key) {
				deduped.push(field);
			}
		}
		Self { fields: deduped }
	}

	/// Product catalog schema: `category_id`, `is_active`, `is_in_stock`.
	pub fn catalog() -> Self {
		Self::new([
			FilterField::new("category_id", FilterKind::Text),
			FilterField::new("is_active", FilterKind::Flag),
			FilterField::new("is_in_stock", FilterKind::Flag),
		])
	}

	pub fn fields(&self) -> &[FilterField] {
		&self.fields
	}

	fn position(&self, key: &str) -> Option<usize> {
		self.fields.iter().position(|f| f.key == key)
	}
}

impl From<Vec<FilterField>> for FilterSchema {
	fn from(fields: Vec<FilterField>) -> Self {
		Self::new(fields)
	}
}

impl From<FilterSchema> for Vec<FilterField> {
	fn from(schema: FilterSchema) -> Self {
		schema.fields
	}
}

impl Default for FilterSchema {
	fn default() -> Self {
		Self::catalog()
	}
}

/// Concrete value of a set filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
	Text(String),
	Flag(bool),
}

impl FilterValue {
	pub const fn kind(&self) -> FilterKind {
		match self {
			Self::Text(_) => FilterKind::Text,
			Self::Flag(_) => FilterKind::Flag,
		}
	}

	/// Parses user input for a field of the given kind.
	///
	/// Flags accept `true`/`false`, `yes`/`no` and `1`/`0`.
	pub fn parse(kind: FilterKind, input: &str) -> Option<Self> {
		let input = input.trim();
		match kind {
			FilterKind::Text => Some(Self::Text(input.to_string())),
			FilterKind::Flag => match input.to_ascii_lowercase().as_str() {
				"true" | "yes" | "1" => Some(Self::Flag(true)),
				"false" | "no" | "0" => Some(Self::Flag(false)),
				_ => None,
			},
		}
	}
}

impl fmt::Display for FilterValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(value) => f.write_str(value),
			Self::Flag(value) => write!(f, "{value}"),
		}
	}
}

impl From<&str> for FilterValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for FilterValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<bool> for FilterValue {
	fn from(value: bool) -> Self {
		Self::Flag(value)
	}
}

/// Errors raised when a filter update does not fit the schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
	/// The key is not declared in the schema.
	#[error("unknown filter key: {0}")]
	UnknownKey(String),

	/// The value kind does not match the field declaration.
	#[error("filter {key} expects a {expected:?} value, got {actual:?}")]
	KindMismatch {
		key: String,
		expected: FilterKind,
		actual: FilterKind,
	},

	/// User input could not be parsed for the field kind.
	#[error("invalid value {input:?} for filter {key}")]
	InvalidInput { key: String, input: String },
}

/// Immutable snapshot of filter values for one schema.
///
/// Updates return a new set; the previous snapshot is unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSet {
	schema: Arc<FilterSchema>,
	values: Vec<Option<FilterValue>>,
}

impl FilterSet {
	/// Creates a set with every key unset.
	pub fn new(schema: Arc<FilterSchema>) -> Self {
		let values = vec![None; schema.fields().len()];
		Self { schema, values }
	}

	/// Returns a copy with `key` set to `value`.
	///
	/// Blank text values are treated as unset.
	pub fn with(&self, key: &str, value: impl Into<FilterValue>) -> Result<Self, FilterError> {
		let index = self.index_of(key)?;
		let value = value.into();
		let expected = self.schema.fields()[index].kind;
		if value.kind() != expected {
			return Err(FilterError::KindMismatch {
				key: key.to_string(),
				expected,
				actual: value.kind(),
			});
		}

		let value = match value {
			FilterValue::Text(text) if text.trim().is_empty() => None,
			FilterValue::Text(text) => Some(FilterValue::Text(text.trim().to_string())),
			flag => Some(flag),
		};

		let mut next = self.clone();
		next.values[index] = value;
		Ok(next)
	}

	/// Returns a copy with `key` set from unparsed user input.
	pub fn with_input(&self, key: &str, input: &str) -> Result<Self, FilterError> {
		let index = self.index_of(key)?;
		let kind = self.schema.fields()[index].kind;
		let value = FilterValue::parse(kind, input).ok_or_else(|| FilterError::InvalidInput {
			key: key.to_string(),
			input: input.to_string(),
		})?;
		self.with(key, value)
	}

	/// Returns a copy with `key` unset.
	pub fn without(&self, key: &str) -> Result<Self, FilterError> {
		let index = self.index_of(key)?;
		let mut next = self.clone();
		next.values[index] = None;
		Ok(next)
	}

	pub fn get(&self, key: &str) -> Option<&FilterValue> {
		let index = self.schema.position(key)?;
		self.values[index].as_ref()
	}

	/// Returns true when no key is set.
	pub fn is_unconstrained(&self) -> bool {
		self.values.iter().all(Option::is_none)
	}

	/// Set filters in schema order.
	pub fn iter_set(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
		self.schema
			.fields()
			.iter()
			.zip(&self.values)
			.filter_map(|(field, value)| value.as_ref().map(|v| (field.key.as_str(), v)))
	}

	fn index_of(&self, key: &str) -> Result<usize, FilterError> {
		self.schema.position(key).ok_or_else(|| FilterError::UnknownKey(key.to_string()))
	}
}

impl Default for FilterSet {
	fn default() -> Self {
		Self::new(Arc::new(FilterSchema::catalog()))
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn updates_leave_previous_snapshot_untouched() {
		let empty = FilterSet::default();
		let active = empty.with("is_active", true).unwrap();

		assert!(empty.is_unconstrained());
		assert_eq!(active.get("is_active"), Some(&FilterValue::Flag(true)));
		assert_eq!(active.without("is_active").unwrap(), empty);
	}

	#[test]
	fn rejects_unknown_keys_and_wrong_kinds() {
		let set = FilterSet::default();
		assert_eq!(set.with("colour", "red"), Err(FilterError::UnknownKey("colour".into())));
		assert_eq!(
			set.with("is_in_stock", "yes"),
			Err(FilterError::KindMismatch {
				key: "is_in_stock".into(),
				expected: FilterKind::Flag,
				actual: FilterKind::Text,
			})
		);
	}

	#[test]
	fn blank_text_is_unset() {
		let set = FilterSet::default().with("category_id", "whisky").unwrap();
		let cleared = set.with("category_id", "  ").unwrap();
		assert_eq!(cleared.get("category_id"), None);
	}

	#[test]
	fn iterates_in_schema_order() {
		let set = FilterSet::default()
			.with("is_in_stock", false)
			.unwrap()
			.with("category_id", " rum ")
			.unwrap();
		let keys: Vec<_> = set.iter_set().map(|(k, v)| format!("{k}={v}")).collect();
		assert_eq!(keys, vec!["category_id=rum", "is_in_stock=false"]);
	}

	#[test]
	fn parses_flag_input() {
		let set = FilterSet::default().with_input("is_active", "Yes").unwrap();
		assert_eq!(set.get("is_active"), Some(&FilterValue::Flag(true)));
		assert!(matches!(
			set.with_input("is_active", "maybe"),
			Err(FilterError::InvalidInput { .. })
		));
	}

	#[test]
	fn schema_deserializes_and_dedupes() {
		let schema: FilterSchema = serde_json::from_str(
			r#"[{"key":"brand","kind":"text"},{"key":"on_sale","kind":"flag"},{"key":"brand","kind":"flag"}]"#,
		)
		.unwrap();
		assert_eq!(
			schema.fields(),
			&[
				FilterField::new("brand", FilterKind::Text),
				FilterField::new("on_sale", FilterKind::Flag),
			]
		);
		assert_eq!(
			serde_json::to_string(&schema).unwrap(),
			r#"[{"key":"brand","kind":"text"},{"key":"on_sale","kind":"flag"}]"#
		);

		let deduped = FilterSchema::new([
			FilterField::new("brand", FilterKind::Text),
			FilterField::new("brand", FilterKind::Flag),
		]);
		assert_eq!(deduped.fields(), &[FilterField::new("brand", FilterKind::Text)]);
	}
}
