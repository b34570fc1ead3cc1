use std::fmt::Write;

use shelf_catalog::{Endpoint, Product};
use shelf_coordinator::{Phase, SearchState, SearchUpdate, Sequence};
use shelf_query::{FilterSet, SearchText};

/// One line per product: name, then price when known.
pub fn product_line(product: &Product) -> String {
	match product.price {
		Some(price) => format!("  {} ({price:.2})", product.name),
		None => format!("  {}", product.name),
	}
}

pub fn dispatched(sequence: Sequence, endpoint: Endpoint) -> String {
	format!("searching {sequence} ({})...", endpoint.as_str())
}

/// Text shown after `update` has been applied to `state`.
///
/// Returns `None` for updates with nothing to show.
pub fn update(update: SearchUpdate, state: &SearchState<Product>) -> Option<String> {
	match update {
		SearchUpdate::Dispatched { sequence, endpoint } => Some(dispatched(sequence, endpoint)),
		SearchUpdate::Discarded { .. } => None,
		SearchUpdate::Applied { succeeded: true, .. } => Some(results(state)),
		SearchUpdate::Applied { succeeded: false, .. } => {
			let message = state.error().unwrap_or("search failed");
			Some(format!("error: {message} (showing {} previous results)", state.items().len()))
		}
	}
}

pub fn results(state: &SearchState<Product>) -> String {
	if state.items().is_empty() {
		return if state.has_queried() { "no products found".to_string() } else { String::new() };
	}
	let mut out = format!("{} products", state.items().len());
	for product in state.items() {
		out.push('\n');
		out.push_str(&product_line(product));
	}
	out
}

/// Summary printed by `:state`.
pub fn summary(text: &SearchText, filters: &FilterSet, phase: Phase, state: &SearchState<Product>) -> String {
	let mut out = String::new();
	let _ = writeln!(out, "text:    {:?}", text.trimmed());
	let set: Vec<String> = filters.iter_set().map(|(key, value)| format!("{key}={value}")).collect();
	let _ = writeln!(out, "filters: {}", if set.is_empty() { "(none)".to_string() } else { set.join(", ") });
	let _ = writeln!(out, "phase:   {phase:?}");
	let _ = writeln!(out, "items:   {}", state.items().len());
	if let Some(error) = state.error() {
		let _ = writeln!(out, "error:   {error}");
	}
	out.pop();
	out
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn price_is_optional() {
		let mut product = Product::new("1", "Gin");
		assert_eq!(product_line(&product), "  Gin");
		product.price = Some(24.5);
		assert_eq!(product_line(&product), "  Gin (24.50)");
	}

	#[test]
	fn empty_state_before_first_query_prints_nothing() {
		assert_eq!(results(&SearchState::default()), "");
	}

	#[test]
	fn summary_lists_set_filters() {
		let filters = FilterSet::default().with_input("is_active", "yes").unwrap();
		let text = summary(&SearchText::new(" rum "), &filters, Phase::Idle, &SearchState::default());
		assert_eq!(text, "text:    \"rum\"\nfilters: is_active=true\nphase:   Idle\nitems:   0");
	}
}
