use std::fmt;

use indexmap::IndexMap;

use crate::{FilterSet, FilterValue, SearchText};

/// Parameter key carrying the trimmed search text.
pub const SEARCH_PARAM: &str = "q";
/// Parameter key flagging a query with more than one token.
pub const MULTI_WORD_PARAM: &str = "multiWord";

/// Value of one outgoing query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
	Text(String),
	Bool(bool),
}

impl fmt::Display for ParamValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(value) => f.write_str(value),
			Self::Bool(value) => write!(f, "{value}"),
		}
	}
}

impl From<&FilterValue> for ParamValue {
	fn from(value: &FilterValue) -> Self {
		match value {
			FilterValue::Text(text) => Self::Text(text.clone()),
			FilterValue::Flag(flag) => Self::Bool(*flag),
		}
	}
}

/// Ordered request-parameter map for one catalog query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
	entries: IndexMap<String, ParamValue>,
}

impl QueryParams {
	pub fn get(&self, key: &str) -> Option<&ParamValue> {
		self.entries.get(key)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Returns true when the parameters describe a text search rather than a
	/// plain listing.
	pub fn is_search(&self) -> bool {
		self.contains(SEARCH_PARAM)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Query-string pairs in insertion order.
	pub fn to_pairs(&self) -> Vec<(String, String)> {
		self.entries.iter().map(|(k, v)| (k.clone(), v.to_string())).collect()
	}

	fn insert(&mut self, key: impl Into<String>, value: ParamValue) {
		self.entries.insert(key.into(), value);
	}
}

/// Merges search text and filters into request parameters.
///
/// Empty text yields a listing request carrying only the set filters. Otherwise
/// `q` and `multiWord` lead, followed by set filters in schema order. Unset
/// filters never appear.
pub fn build(text: &SearchText, filters: &FilterSet) -> QueryParams {
	let mut params = QueryParams::default();

	if !text.is_empty() {
		params.insert(SEARCH_PARAM, ParamValue::Text(text.trimmed().to_string()));
		params.insert(MULTI_WORD_PARAM, ParamValue::Bool(text.is_multi_word()));
	}

	for (key, value) in filters.iter_set() {
		params.insert(key, ParamValue::from(value));
	}

	params
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	fn pairs(params: &QueryParams) -> Vec<(String, String)> {
		params.to_pairs()
	}

	#[rstest]
	#[case("scotch", Some(false))]
	#[case("single malt scotch", Some(true))]
	#[case("  bourbon  ", Some(false))]
	#[case("  ", None)]
	#[case("", None)]
	fn multi_word_derivation(#[case] raw: &str, #[case] expected: Option<bool>) {
		let params = build(&SearchText::new(raw), &FilterSet::default());
		assert_eq!(
			params.get(MULTI_WORD_PARAM),
			expected.map(ParamValue::Bool).as_ref()
		);
		assert_eq!(params.is_search(), expected.is_some());
	}

	#[test]
	fn unset_filters_are_omitted() {
		let params = build(&SearchText::default(), &FilterSet::default());
		assert!(params.is_empty());
		for key in ["category_id", "is_active", "is_in_stock"] {
			assert!(!params.contains(key));
		}
	}

	#[test]
	fn search_params_lead_then_filters_in_schema_order() {
		let filters = FilterSet::default()
			.with("is_in_stock", true)
			.unwrap()
			.with("category_id", "whisky")
			.unwrap();
		let params = build(&SearchText::new(" single malt "), &filters);

		assert_eq!(
			pairs(&params),
			vec![
				("q".to_string(), "single malt".to_string()),
				("multiWord".to_string(), "true".to_string()),
				("category_id".to_string(), "whisky".to_string()),
				("is_in_stock".to_string(), "true".to_string()),
			]
		);
	}

	#[test]
	fn listing_carries_only_filters() {
		let filters = FilterSet::default().with("is_active", false).unwrap();
		let params = build(&SearchText::new("   "), &filters);

		assert!(!params.is_search());
		assert_eq!(pairs(&params), vec![("is_active".to_string(), "false".to_string())]);
	}

	#[test]
	fn identical_inputs_build_identical_params() {
		let filters = FilterSet::default().with("category_id", "gin").unwrap();
		let text = SearchText::new("london dry");
		assert_eq!(build(&text, &filters), build(&text, &filters));
	}
}
