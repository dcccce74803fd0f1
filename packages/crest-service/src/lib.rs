//! Wave search service. Keeps a Solr core in sync with wavelet state and
//! answers per-user full-text queries from it.

pub mod admin;
pub mod indexing;
pub mod reconcile;
pub mod scheduler;
pub mod search;

mod error;
pub use error::{Error, Result};

pub use self::{
	admin::RebuildReport,
	scheduler::{IndexScheduler, TaskHandle},
	search::candidates::CandidateSet,
};

use std::{
	future::Future,
	pin::Pin,
	sync::{Arc, atomic::AtomicBool},
};

use crest_config::Config;
use crest_domain::{ParticipantId, WaveletName, WaveletSnapshot};
use crest_storage::solr::{IndexDoc, SelectPage, SelectQuery, SolrIndex};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Write and query surface of the search index.
///
/// [`SolrIndex`] is the production implementation; tests substitute in-memory
/// recorders.
pub trait SearchIndex: Send + Sync {
	fn upsert_docs<'a>(&'a self, docs: &'a [IndexDoc]) -> BoxFuture<'a, Result<()>>;
	fn delete_by_query<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<()>>;
	fn commit(&self) -> BoxFuture<'_, Result<()>>;
	fn select<'a>(&'a self, query: &'a SelectQuery) -> BoxFuture<'a, Result<SelectPage>>;
}

impl SearchIndex for SolrIndex {
	fn upsert_docs<'a>(&'a self, docs: &'a [IndexDoc]) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move { Ok(self.upsert_docs(docs).await?) })
	}

	fn delete_by_query<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move { Ok(self.delete_by_query(query).await?) })
	}

	fn commit(&self) -> BoxFuture<'_, Result<()>> {
		Box::pin(async move { Ok(self.commit().await?) })
	}

	fn select<'a>(&'a self, query: &'a SelectQuery) -> BoxFuture<'a, Result<SelectPage>> {
		Box::pin(async move { Ok(self.select(query).await?) })
	}
}

/// Read access to the wavelet registries of the wave server.
///
/// A wavelet lives in exactly one registry: the local one if this server
/// hosts it, the remote one if it is cached from another server.
pub trait WaveletProvider: Send + Sync {
	/// Snapshot of a remotely hosted wavelet, from the local cache.
	fn remote_snapshot<'a>(
		&'a self,
		name: &'a WaveletName,
	) -> BoxFuture<'a, Result<Option<WaveletSnapshot>>>;
	/// Snapshot of a wavelet hosted by this server.
	fn local_snapshot<'a>(
		&'a self,
		name: &'a WaveletName,
	) -> BoxFuture<'a, Result<Option<WaveletSnapshot>>>;
	/// Names of every wavelet known to either registry.
	fn wavelet_names(&self) -> BoxFuture<'_, Result<Vec<WaveletName>>>;
	/// Evicts cached wavelet state once a full reindex has read it all.
	fn unload_all(&self) -> BoxFuture<'_, Result<()>>;
}

/// Looks `name` up in the remote registry first, then the local one.
///
/// A remote lookup failure is logged and falls through to the local registry,
/// so a flaky federation cache cannot hide a locally hosted wavelet.
pub(crate) async fn lookup_snapshot(
	wavelets: &dyn WaveletProvider,
	name: &WaveletName,
) -> Result<Option<WaveletSnapshot>> {
	match wavelets.remote_snapshot(name).await {
		Ok(Some(snapshot)) => return Ok(Some(snapshot)),
		Ok(None) => {},
		Err(err) => tracing::error!(error = %err, wavelet = %name, "Remote wavelet lookup failed."),
	}

	wavelets.local_snapshot(name).await
}

pub struct CrestService {
	pub cfg: Config,
	pub wavelets: Arc<dyn WaveletProvider>,
	pub index: Arc<dyn SearchIndex>,
	pub scheduler: IndexScheduler,
	pub shared_participant: ParticipantId,
	pub rebuild_active: AtomicBool,
}
impl CrestService {
	/// Builds a service over the Solr core named in `cfg`.
	pub fn new(cfg: Config, wavelets: Arc<dyn WaveletProvider>) -> Result<Self> {
		let index = Arc::new(SolrIndex::new(&cfg.solr)?);

		Ok(Self::with_index(cfg, wavelets, index))
	}

	/// Builds a service over any index backend.
	pub fn with_index(
		cfg: Config,
		wavelets: Arc<dyn WaveletProvider>,
		index: Arc<dyn SearchIndex>,
	) -> Self {
		let shared_participant = ParticipantId::shared_domain(&cfg.server.domain);

		Self {
			cfg,
			wavelets,
			index,
			scheduler: IndexScheduler::start(),
			shared_participant,
			rebuild_active: AtomicBool::new(false),
		}
	}

	/// Finishes queued index work, then stops the worker.
	pub async fn shutdown(self) {
		self.scheduler.shutdown().await;
	}
}
