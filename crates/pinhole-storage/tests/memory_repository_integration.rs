use std::collections::HashSet;
use std::sync::Arc;

use pinhole_core::LinkId;
use pinhole_storage::{InMemoryRepository, LinkRecord, ReadRepository, Repository, StorageError};

fn record(url: &str) -> LinkRecord {
    LinkRecord::new(url)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_inserts_of_same_id_have_one_winner() {
    let repo = Arc::new(InMemoryRepository::new());
    let id = LinkId::new(20_662_393_254);

    let mut handles = vec![];
    for i in 0..16 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo.insert(id, record(&format!("https://example{i}.com")))
                .await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => winners += 1,
            Err(err) => assert_eq!(err, StorageError::Conflict(id)),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(repo.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_auto_inserts_get_distinct_ids() {
    let repo = Arc::new(InMemoryRepository::new());

    // Pre-claim some ids the counter will run into.
    for raw in [2, 5, 9] {
        repo.insert(LinkId::new(raw), record("https://custom.example"))
            .await
            .unwrap();
    }

    let mut handles = vec![];
    for i in 0..32 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo.insert_auto(record(&format!("https://auto{i}.example")))
                .await
                .unwrap()
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        let id = handle.await.unwrap();
        assert!(![2, 5, 9].contains(&id.get()));
        assert!(ids.insert(id));
    }

    assert_eq!(ids.len(), 32);
    assert_eq!(repo.len(), 35);
    for id in ids {
        assert!(repo.exists(id).await.unwrap());
    }
}
