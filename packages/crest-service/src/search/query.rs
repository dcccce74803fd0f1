//! Translation of user-facing query syntax into index queries.
//!
//! Users write `in:`, `with:`, and `creator:` operators; the index knows the
//! corresponding typed fields. Operators only count when they start at a word
//! boundary, so `tin:inbox` stays untouched.

use std::sync::LazyLock;

use regex::Regex;

use crest_domain::ParticipantId;
use crest_storage::solr::{CREATOR_FIELD, FILTER_QUERY_PREFIX, IN_FIELD, WITH_FUZZY_FIELD};

static IN_TOKEN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(\b|^)in:").expect("in token pattern"));
static WITH_TOKEN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(\b|^)with:").expect("with token pattern"));
static CREATOR_TOKEN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(\b|^)creator:").expect("creator token pattern"));
/// An `in:` operator together with its argument.
static FOLDER_TOKEN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\bin:\S*").expect("folder token pattern"));

/// Rewrites user-facing operators into their index field prefixes.
pub fn build_backend_query(query: &str) -> String {
	let query = IN_TOKEN.replace_all(query, format!("{IN_FIELD}:"));
	let query = WITH_TOKEN.replace_all(&query, format!("{WITH_FUZZY_FIELD}:"));

	CREATOR_TOKEN.replace_all(&query, format!("{CREATOR_FIELD}:")).into_owned()
}

/// True when the query already scopes results with an `in:` operator.
pub fn scopes_folder(query: &str) -> bool {
	FOLDER_TOKEN.is_match(query)
}

/// Filter clause restricting records to `user`'s view.
///
/// Queries without a folder scope also surface waves shared with the whole
/// domain.
pub fn build_filter(query: &str, user: &ParticipantId, shared: &ParticipantId) -> String {
	let scope = if scopes_folder(query) {
		user.address().to_string()
	} else {
		format!("({} OR {})", user.address(), shared.address())
	};
	let mut filter = format!("{}{scope}", FILTER_QUERY_PREFIX.as_str());

	if !query.is_empty() {
		filter.push_str(&format!(" AND ({})", build_backend_query(query)));
	}

	filter
}
