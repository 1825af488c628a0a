use super::*;
use tokio::time::{Duration, timeout};

async fn test_store() -> SqliteAreaStore {
    let pool = crate::db::init_pool("sqlite::memory:")
        .await
        .expect("in-memory database should initialize");
    SqliteAreaStore::new(pool).await.expect("store should build")
}

const POINTS: &str = r#"[{"latitude":33.58,"longitude":-7.59}]"#;

#[tokio::test]
async fn insert_assigns_increasing_ids() {
    let store = test_store().await;
    let a = store.insert("Field A", POINTS).await.unwrap();
    let b = store.insert("Field B", POINTS).await.unwrap();
    assert!(b > a);
}

#[tokio::test]
async fn insert_publishes_to_watchers() {
    let store = test_store().await;
    let mut rx = store.watch_rows();
    assert!(rx.borrow_and_update().is_empty());

    let id = store.insert("Field A", POINTS).await.unwrap();

    timeout(Duration::from_millis(200), rx.changed())
        .await
        .expect("row publish timed out")
        .expect("channel closed");
    let rows = rx.borrow().clone();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], AreaRecord { id, name: "Field A".into(), points_json: POINTS.into() });
}

#[tokio::test]
async fn delete_removes_row() {
    let store = test_store().await;
    let id = store.insert("Field A", POINTS).await.unwrap();
    let keep = store.insert("Field B", POINTS).await.unwrap();

    store.delete(id).await.unwrap();

    let rows = store.watch_rows().borrow().clone();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, keep);
}

#[tokio::test]
async fn delete_absent_id_is_noop() {
    let store = test_store().await;
    let id = store.insert("Field A", POINTS).await.unwrap();

    store.delete(id + 100).await.unwrap();

    assert_eq!(store.watch_rows().borrow().len(), 1);
}

#[tokio::test]
async fn rows_are_ordered_by_id() {
    let store = test_store().await;
    store.insert("C", POINTS).await.unwrap();
    store.insert("A", POINTS).await.unwrap();
    store.insert("B", POINTS).await.unwrap();

    let rows = store.watch_rows().borrow().clone();
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[tokio::test]
async fn new_store_sees_existing_rows() {
    let pool = crate::db::init_pool("sqlite::memory:").await.unwrap();
    let first = SqliteAreaStore::new(pool.clone()).await.unwrap();
    first.insert("Field A", POINTS).await.unwrap();

    let second = SqliteAreaStore::new(pool).await.unwrap();
    let rows = second.watch_rows().borrow().clone();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Field A");
}
