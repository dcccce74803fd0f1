use std::sync::{Arc, atomic::Ordering};

use crest_service::Error;
use crest_storage::solr;

use super::{MemoryWaveStore, RecordingIndex, build_service, snapshot};

#[tokio::test]
async fn rebuild_clears_then_reindexes_everything() {
	let store = Arc::new(MemoryWaveStore::default());
	let index = Arc::new(RecordingIndex::default());

	store.insert_local(snapshot("example.com/w+a", "kite lessons", &["alice@example.com"]));
	store.insert_remote(snapshot("example.com/w+b", "sailing course", &["bob@example.com"]));

	let service = build_service(store.clone(), index.clone());
	let report = service.rebuild_index().await.expect("Rebuild failed.");

	assert_eq!(report.rebuilt_count, 2);
	assert_eq!(report.failed_count, 0);

	service.shutdown().await;

	let ops = index.recorded_ops();

	assert_eq!(ops[..2], ["delete", "commit"]);
	assert_eq!(ops.iter().filter(|op| **op == "upsert").count(), 2);
	assert_eq!(index.recorded_deletes(), [solr::FIELDS_PRESENT_QUERY.as_str()]);
	assert_eq!(store.unloads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn per_wavelet_failures_are_counted() {
	let store = Arc::new(MemoryWaveStore::default());
	let index = Arc::new(RecordingIndex::default());

	store.insert_local(snapshot("example.com/w+a", "kite lessons", &["alice@example.com"]));
	store.insert_local(snapshot("example.com/w+b", "sailing course", &["alice@example.com"]));
	index.fail_upserts.store(true, Ordering::SeqCst);

	let service = build_service(store.clone(), index.clone());
	let report = service.rebuild_index().await.expect("Rebuild failed.");

	assert_eq!(report.rebuilt_count, 0);
	assert_eq!(report.failed_count, 2);
	assert_eq!(store.unloads.load(Ordering::SeqCst), 1);

	service.shutdown().await;
}

#[tokio::test]
async fn clear_failures_do_not_abort_the_rebuild() {
	let store = Arc::new(MemoryWaveStore::default());
	let index = Arc::new(RecordingIndex::default());

	store.insert_local(snapshot("example.com/w+a", "kite lessons", &["alice@example.com"]));
	index.fail_deletes.store(true, Ordering::SeqCst);

	let service = build_service(store, index.clone());
	let report = service.rebuild_index().await.expect("Rebuild failed.");

	assert_eq!(report.rebuilt_count, 1);
	assert!(index.recorded_deletes().is_empty());
	assert_eq!(index.upserted_docs().len(), 1);

	service.shutdown().await;
}

#[tokio::test]
async fn unload_failures_fail_the_rebuild_but_release_the_guard() {
	let store = Arc::new(MemoryWaveStore::default());
	let index = Arc::new(RecordingIndex::default());

	store.insert_local(snapshot("example.com/w+a", "kite lessons", &["alice@example.com"]));
	store.fail_unload.store(true, Ordering::SeqCst);

	let service = build_service(store.clone(), index.clone());
	let err = service.rebuild_index().await.expect_err("Rebuild should fail.");

	assert!(matches!(err, Error::Store { .. }));

	store.fail_unload.store(false, Ordering::SeqCst);

	let report = service.rebuild_index().await.expect("Retry failed.");

	assert_eq!(report.rebuilt_count, 1);

	service.shutdown().await;
}

#[tokio::test]
async fn concurrent_rebuilds_are_rejected() {
	let store = Arc::new(MemoryWaveStore::default());
	let index = Arc::new(RecordingIndex::default());
	let service = build_service(store, index.clone());

	service.rebuild_active.store(true, Ordering::SeqCst);

	let err = service.rebuild_index().await.expect_err("Rebuild should be rejected.");

	assert!(matches!(err, Error::RebuildInProgress));

	service.rebuild_active.store(false, Ordering::SeqCst);
	service.rebuild_index().await.expect("Rebuild failed.");
	service.shutdown().await;
}
