use std::sync::Arc;

use crest_domain::ParticipantId;

use super::{MemoryWaveStore, RecordingIndex, build_service, snapshot, snapshot_full, wavelet_name};

fn alice() -> ParticipantId {
	ParticipantId::new("alice@example.com")
}

#[tokio::test]
async fn vanished_wavelets_are_dropped() {
	let store = Arc::new(MemoryWaveStore::default());
	let index = Arc::new(RecordingIndex::default());

	store.insert_local(snapshot("example.com/w+a", "kite", &["alice@example.com"]));
	index.queue_page(&[
		("example.com/w+a", "example.com/conv+root"),
		("example.com/w+gone", "example.com/conv+root"),
	]);

	let service = build_service(store, index.clone());
	let views = service.search(&alice(), "kite", 0, 5).await;

	assert_eq!(views.len(), 1);
	assert_eq!(views[0].wave_id.as_str(), "example.com/w+a");
}

#[tokio::test]
async fn registry_failures_drop_only_that_wavelet() {
	let store = Arc::new(MemoryWaveStore::default());
	let index = Arc::new(RecordingIndex::default());

	store.insert_local(snapshot("example.com/w+a", "kite", &["alice@example.com"]));
	store.fail_local_for(wavelet_name("example.com/w+b", "example.com/conv+root"));
	index.queue_page(&[
		("example.com/w+a", "example.com/conv+root"),
		("example.com/w+b", "example.com/conv+root"),
	]);

	let service = build_service(store, index.clone());
	let views = service.search(&alice(), "kite", 0, 5).await;

	assert_eq!(views.len(), 1);
	assert_eq!(views[0].wave_id.as_str(), "example.com/w+a");
}

#[tokio::test]
async fn a_failing_wavelet_leaves_its_siblings_in_the_view() {
	let store = Arc::new(MemoryWaveStore::default());
	let index = Arc::new(RecordingIndex::default());

	store.insert_local(snapshot("example.com/w+a", "kite", &["alice@example.com"]));
	store.fail_local_for(wavelet_name("example.com/w+a", "example.com/conv+extra"));
	index.queue_page(&[
		("example.com/w+a", "example.com/conv+root"),
		("example.com/w+a", "example.com/conv+extra"),
	]);

	let service = build_service(store, index.clone());
	let views = service.search(&alice(), "kite", 0, 5).await;

	assert_eq!(views.len(), 1);
	assert_eq!(views[0].wavelets.len(), 1);
	assert_eq!(views[0].wavelets[0].wavelet_id.as_str(), "example.com/conv+root");
}

#[tokio::test]
async fn results_keep_index_order() {
	let store = Arc::new(MemoryWaveStore::default());
	let index = Arc::new(RecordingIndex::default());

	store.insert_local(snapshot("example.com/w+a", "kite", &["alice@example.com"]));
	store.insert_local(snapshot("example.com/w+b", "kite", &["alice@example.com"]));
	index.queue_page(&[
		("example.com/w+b", "example.com/conv+root"),
		("example.com/w+a", "example.com/conv+root"),
	]);

	let service = build_service(store, index.clone());
	let views = service.search(&alice(), "kite", 0, 5).await;
	let order = views.iter().map(|view| view.wave_id.as_str()).collect::<Vec<_>>();

	assert_eq!(order, ["example.com/w+b", "example.com/w+a"]);
}

#[tokio::test]
async fn views_merge_every_wavelet_of_a_wave() {
	let store = Arc::new(MemoryWaveStore::default());
	let index = Arc::new(RecordingIndex::default());

	store.insert_local(snapshot("example.com/w+a", "kite", &["alice@example.com"]));
	store.insert_local(snapshot_full(
		"example.com/w+a",
		"example.com/conv+extra",
		"kite spares",
		&["alice@example.com"],
		1,
	));
	index.queue_page(&[
		("example.com/w+a", "example.com/conv+root"),
		("example.com/w+a", "example.com/conv+extra"),
	]);

	let service = build_service(store, index.clone());
	let views = service.search(&alice(), "kite", 0, 5).await;

	assert_eq!(views.len(), 1);

	let wavelets =
		views[0].wavelets.iter().map(|wavelet| wavelet.wavelet_id.as_str()).collect::<Vec<_>>();

	assert_eq!(wavelets, ["example.com/conv+root", "example.com/conv+extra"]);
}

#[tokio::test]
async fn the_remote_registry_wins_when_both_hold_the_wavelet() {
	let store = Arc::new(MemoryWaveStore::default());
	let index = Arc::new(RecordingIndex::default());

	store.insert_remote(snapshot_full(
		"example.com/w+a",
		"example.com/conv+root",
		"remote copy",
		&["alice@example.com"],
		9,
	));
	store.insert_local(snapshot_full(
		"example.com/w+a",
		"example.com/conv+root",
		"local copy",
		&["alice@example.com"],
		1,
	));
	index.queue_page(&[("example.com/w+a", "example.com/conv+root")]);

	let service = build_service(store, index.clone());
	let views = service.search(&alice(), "copy", 0, 5).await;

	assert_eq!(views.len(), 1);
	assert_eq!(views[0].wavelets[0].version, 9);
}
