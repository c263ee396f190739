mod common;

use common::{proxy_for, server_for, setup_healthy_server, SwitchableStore, PROBE_TIMEOUT};
use gm_screen_server::{
    adapters::outbound::storage::create_local_store,
    AvailabilityState, BackendAvailability, LoadOutcome, StorageKey, StorageService,
    WriteOutcome,
};
use serde_json::{json, Value};
use std::{sync::Arc, time::Duration};

#[tokio::test]
async fn test_failed_ping_trips_backend_offline() {
    let (store, server) = setup_healthy_server().await;
    store.fail(true);

    let ping = server.get("/api/storage/ping").await;
    assert_eq!(ping.status_code(), 200);
    let ping: Value = ping.json();
    assert_eq!(ping["status"], "offline");
    assert_eq!(ping["message"], "Error accessing Cloud Storage bucket");
    assert!(ping["error"]
        .as_str()
        .unwrap()
        .contains("connection refused"));

    // The second ping no longer touches the backend
    let ping: Value = server.get("/api/storage/ping").await.json();
    assert_eq!(ping["status"], "offline");
    assert!(ping.get("error").is_none());
}

#[tokio::test]
async fn test_no_recovery_after_backend_failure() {
    let (store, server) = setup_healthy_server().await;

    server
        .post("/api/storage/save")
        .json(&json!({ "key": "k", "data": 1 }))
        .await;

    store.fail(true);
    let save: Value = server
        .post("/api/storage/save")
        .json(&json!({ "key": "k", "data": 2 }))
        .await
        .json();
    assert_eq!(save["success"], true);
    assert_eq!(save["useLocalStorage"], true);
    assert!(save["error"].as_str().is_some());

    // The backend is healthy again, but the process stays offline
    store.fail(false);

    let ping: Value = server.get("/api/storage/ping").await.json();
    assert_eq!(ping["status"], "offline");

    let load: Value = server
        .get("/api/storage/load")
        .add_query_param("key", "k")
        .await
        .json();
    assert_eq!(load["data"], Value::Null);
    assert_eq!(load["useLocalStorage"], true);

    let save: Value = server
        .post("/api/storage/save")
        .json(&json!({ "key": "k", "data": 3 }))
        .await
        .json();
    assert_eq!(save["useLocalStorage"], true);
    assert!(save.get("error").is_none());

    let delete: Value = server
        .delete("/api/storage/delete")
        .json(&json!({ "key": "k" }))
        .await
        .json();
    assert_eq!(delete["success"], true);
    assert_eq!(delete["useLocalStorage"], true);

    let debug: Value = server.get("/api/debug").await.json();
    assert_eq!(debug["cloud_storage_available"], false);
}

#[tokio::test]
async fn test_load_failure_trips_backend() {
    let store = SwitchableStore::new();
    let proxy = proxy_for(store.clone()).await;
    let key = StorageKey::new("notes").unwrap();

    store.fail(true);
    let outcome = proxy.load(&key).await;
    assert!(matches!(outcome, LoadOutcome::Failed { .. }));
    assert_eq!(proxy.availability().state(), AvailabilityState::Unavailable);

    store.fail(false);
    assert_eq!(proxy.load(&key).await, LoadOutcome::Offline);
}

#[tokio::test]
async fn test_delete_failure_trips_backend() {
    let store = SwitchableStore::new();
    let proxy = proxy_for(store.clone()).await;
    let key = StorageKey::new("notes").unwrap();

    store.fail(true);
    let outcome = proxy.delete(&key).await;
    assert!(outcome.use_local_storage());
    assert!(!proxy.is_available());
}

#[tokio::test]
async fn test_hanging_backend_times_out_to_fallback() {
    let store = SwitchableStore::new();
    let proxy = proxy_for(store.clone())
        .await
        .with_operation_timeout(Duration::from_millis(100));
    let key = StorageKey::new("slow").unwrap();

    store.hang(true);
    match proxy.save(&key, json!({ "slow": true })).await {
        WriteOutcome::Failed { error } => assert!(error.contains("timed out")),
        other => panic!("Expected a failed save, got {other:?}"),
    }
    assert!(!proxy.is_available());
}

#[tokio::test]
async fn test_initialization_failure_is_offline() {
    let store = SwitchableStore::new();
    store.fail(true);
    let availability = BackendAvailability::initialize(Ok(store.clone()), PROBE_TIMEOUT).await;
    assert!(!availability.is_available());

    // Recovering the backend later does not matter
    store.fail(false);
    assert!(availability.store().is_none());

    let server = server_for(gm_screen_server::StorageProxy::new(availability, "memory"));
    let ping: Value = server.get("/api/storage/ping").await.json();
    assert_eq!(ping["status"], "offline");
    assert_eq!(
        ping["message"],
        "Cloud Storage not configured, using offline mode"
    );
}

#[tokio::test]
async fn test_concurrent_saves_to_same_key() {
    let store = SwitchableStore::new();
    let proxy = Arc::new(proxy_for(store).await);
    let key = StorageKey::new("race").unwrap();

    let saves = (0..16).map(|i| {
        let proxy = proxy.clone();
        let key = key.clone();
        tokio::spawn(async move { proxy.save(&key, json!(i)).await })
    });
    for outcome in futures::future::join_all(saves).await {
        assert_eq!(outcome.unwrap(), WriteOutcome::Completed);
    }

    match proxy.load(&key).await {
        LoadOutcome::Found(value) => {
            let n = value.as_i64().unwrap();
            assert!((0..16).contains(&n));
        }
        other => panic!("Expected a stored value, got {other:?}"),
    }
}

#[tokio::test]
async fn test_single_path_failure_keeps_backend_online() {
    let root = std::env::temp_dir().join(format!(
        "gm-screen-path-failure-{}-{}",
        std::process::id(),
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    let store = create_local_store(root.clone(), "bucket").await.unwrap();
    let proxy = proxy_for(store).await;
    assert!(proxy.is_available());

    // A directory sits where the blob file for this key would go
    let blocked = root.join("bucket").join("blocked");
    std::fs::create_dir_all(&blocked).unwrap();
    std::fs::write(blocked.join("inner"), b"x").unwrap();

    let outcome = proxy
        .save(&StorageKey::new("blocked").unwrap(), json!(1))
        .await;
    assert!(matches!(outcome, WriteOutcome::Failed { .. }));
    assert!(proxy.is_available());

    let other = StorageKey::new("other").unwrap();
    assert_eq!(proxy.load(&other).await, LoadOutcome::NotFound);
    assert_eq!(proxy.save(&other, json!(2)).await, WriteOutcome::Completed);
    assert_eq!(proxy.load(&other).await, LoadOutcome::Found(json!(2)));

    let _ = std::fs::remove_dir_all(root);
}
