//! Query composition for catalog searches.
//!
//! A query is made of two independent inputs:
//!
//! - [`SearchText`]: free text typed by the user. Only its trimmed form is
//!   meaningful, and an empty trimmed value means "list, don't search".
//! - [`FilterSet`]: an immutable snapshot of structured constraints, checked
//!   against a [`FilterSchema`] injected by the owning view.
//!
//! [`build`] merges both into [`QueryParams`], the exact parameter map sent to
//! the catalog service. Unset filters are omitted rather than encoded.

mod filter;
mod params;
mod text;

pub use filter::{FilterError, FilterField, FilterKind, FilterSchema, FilterSet, FilterValue};
pub use params::{MULTI_WORD_PARAM, ParamValue, QueryParams, SEARCH_PARAM, build};
pub use text::SearchText;
