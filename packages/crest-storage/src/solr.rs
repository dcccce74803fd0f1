use std::{sync::LazyLock, time::Duration};

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const ID_FIELD: &str = "id";
pub const WAVE_ID_FIELD: &str = "waveId_s";
pub const WAVELET_ID_FIELD: &str = "waveletId_s";
pub const DOC_NAME_FIELD: &str = "docName_s";
pub const LMT_FIELD: &str = "lmt_l";
pub const WITH_FIELD: &str = "with_ss";
pub const WITH_FUZZY_FIELD: &str = "with_txt";
pub const CREATOR_FIELD: &str = "creator_t";
pub const TEXT_FIELD: &str = "text_t";
pub const IN_FIELD: &str = "in_ss";

/// Matches records that carry every indexed field. Folder membership is
/// optional and stays out of this predicate.
pub static FIELDS_PRESENT_QUERY: LazyLock<String> = LazyLock::new(|| {
	[
		WAVE_ID_FIELD,
		WAVELET_ID_FIELD,
		DOC_NAME_FIELD,
		LMT_FIELD,
		WITH_FIELD,
		WITH_FUZZY_FIELD,
		CREATOR_FIELD,
		TEXT_FIELD,
	]
	.map(|field| format!("{field}:[* TO *]"))
	.join(" AND ")
});

/// Filter query prefix scoping a search to one participant. The participant
/// address is appended verbatim by the caller.
pub static FILTER_QUERY_PREFIX: LazyLock<String> =
	LazyLock::new(|| format!("{{!lucene q.op=AND df={TEXT_FIELD}}}{WITH_FIELD}:"));

/// One searchable record, one per indexed blip.
#[derive(Clone, Debug, Serialize)]
pub struct IndexDoc {
	pub id: String,
	#[serde(rename = "waveId_s")]
	pub wave_id: String,
	#[serde(rename = "waveletId_s")]
	pub wavelet_id: String,
	#[serde(rename = "docName_s")]
	pub doc_name: String,
	#[serde(rename = "lmt_l")]
	pub last_modified_time: i64,
	#[serde(rename = "with_ss")]
	pub with: Vec<String>,
	#[serde(rename = "with_txt")]
	pub with_fuzzy: Vec<String>,
	#[serde(rename = "creator_t")]
	pub creator: String,
	#[serde(rename = "text_t")]
	pub text: String,
	#[serde(rename = "in_ss")]
	pub folders: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct SelectQuery {
	pub start: u32,
	pub rows: u32,
	pub query: String,
	pub filter: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectResponse {
	pub response: SelectPage,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SelectPage {
	#[serde(rename = "numFound")]
	pub num_found: u64,
	pub docs: Vec<SelectDoc>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SelectDoc {
	#[serde(rename = "waveId_s")]
	pub wave_id: String,
	#[serde(rename = "waveletId_s")]
	pub wavelet_id: String,
}

pub struct SolrIndex {
	pub client: Client,
	pub base_url: String,
}
impl SolrIndex {
	pub fn new(cfg: &crest_config::Solr) -> Result<Self> {
		let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;

		Ok(Self { client, base_url: cfg.base_url.clone() })
	}

	/// Adds or replaces records and commits in the same request.
	pub async fn upsert_docs(&self, docs: &[IndexDoc]) -> Result<()> {
		let url = format!("{}/update/json?commit=true", self.base_url);
		let res = self.client.post(url).json(docs).send().await?;

		ensure_ok(res).await?;

		Ok(())
	}

	/// Deletes every record matching the query. Takes effect at the next commit.
	pub async fn delete_by_query(&self, query: &str) -> Result<()> {
		let url = format!("{}/update?wt=json", self.base_url);
		let body = serde_json::json!({ "delete": { "query": query } });
		let res = self.client.post(url).json(&body).send().await?;

		ensure_ok(res).await?;

		Ok(())
	}

	pub async fn commit(&self) -> Result<()> {
		let url = format!("{}/update?wt=json", self.base_url);
		let body = serde_json::json!({ "commit": {} });
		let res = self.client.post(url).json(&body).send().await?;

		ensure_ok(res).await?;

		Ok(())
	}

	pub async fn select(&self, select: &SelectQuery) -> Result<SelectPage> {
		let url = format!("{}/select", self.base_url);
		let start = select.start.to_string();
		let rows = select.rows.to_string();
		let res = self
			.client
			.get(url)
			.query(&[
				("wt", "json"),
				("start", start.as_str()),
				("rows", rows.as_str()),
				("q", select.query.as_str()),
				("fq", select.filter.as_str()),
			])
			.send()
			.await?;
		let res = ensure_ok(res).await?;
		let parsed: SelectResponse = res.json().await?;

		Ok(parsed.response)
	}
}

async fn ensure_ok(res: Response) -> Result<Response> {
	let status = res.status();

	if status != StatusCode::OK {
		let body = res.text().await.unwrap_or_default();

		return Err(Error::Status { status: status.as_u16(), body });
	}

	Ok(res)
}
