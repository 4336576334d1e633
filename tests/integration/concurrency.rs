//! Race tests: many threads against one store.
//!
//! Store operations are synchronous, so each contender runs on tokio's
//! blocking pool and the test awaits them all together.

use crate::common::{self, fixtures};
use futures::future::join_all;
use scim_directory::error::ErrorKind;
use scim_directory::resource::{Precondition, UserCandidate, Version};
use scim_directory::storage::{InMemoryStore, ResourceStore};
use scim_directory::{QueryExecutor, SearchRequest};
use std::collections::HashSet;
use tokio::task::spawn_blocking;

const CONTENDERS: usize = 16;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_creates_yield_one_winner() {
    let store = common::store();

    let tasks = (0..CONTENDERS).map(|_| {
        let store = store.clone();
        spawn_blocking(move || store.create(&UserCandidate::new("joe")))
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("create task panicked"))
        .collect();

    let winners = results.iter().filter(|result| result.is_ok()).count();
    assert_eq!(winners, 1);
    for error in results.iter().filter_map(|result| result.as_ref().err()) {
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }
    assert_eq!(store.len(), 1);
    assert_eq!(store.stats().indexed_user_names, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_exact_updates_yield_one_winner() {
    let store = common::store();
    let joe = store.create(&fixtures::joe()).unwrap();

    let tasks = (0..CONTENDERS).map(|index| {
        let store = store.clone();
        let id = joe.id().to_string();
        spawn_blocking(move || {
            let candidate = UserCandidate::new("joe").with_email(format!("joe{}@blah.com", index));
            store.update(&id, &candidate, Some(Precondition::Exact(Version::INITIAL)))
        })
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("update task panicked"))
        .collect();

    let winners: Vec<_> = results.iter().filter_map(|result| result.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0].version(), Version::new(1));
    for error in results.iter().filter_map(|result| result.as_ref().err()) {
        assert_eq!(error.kind(), ErrorKind::VersionMismatch);
    }

    // The stored state is exactly the winner's
    assert_eq!(&store.get(joe.id().as_str()).unwrap(), winners[0]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_unconditional_updates_are_all_counted() {
    let store = common::store();
    let joe = store.create(&fixtures::joe()).unwrap();
    const ROUNDS: usize = 25;

    let tasks = (0..CONTENDERS).map(|_| {
        let store = store.clone();
        let id = joe.id().to_string();
        spawn_blocking(move || {
            let mut seen = Vec::with_capacity(ROUNDS);
            for _ in 0..ROUNDS {
                let updated = store.update(&id, &fixtures::joe(), None)?;
                seen.push(updated.version());
            }
            Ok::<_, scim_directory::DirectoryError>(seen)
        })
    });
    let per_task: Vec<Vec<Version>> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("update task panicked").unwrap())
        .collect();

    // Each task observes its own versions strictly increasing
    for versions in &per_task {
        assert!(versions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    // No version was handed out twice, and none was skipped
    let all: HashSet<u64> = per_task.iter().flatten().map(|v| v.value()).collect();
    assert_eq!(all.len(), CONTENDERS * ROUNDS);
    let final_version = store.get(joe.id().as_str()).unwrap().version();
    assert_eq!(final_version, Version::new((CONTENDERS * ROUNDS) as u64));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_renames_keep_index_consistent() {
    let store = common::sequential_store();
    let users = fixtures::populate(&store);

    // Every user tries to take the same new name
    let tasks = users.iter().map(|user| {
        let store = store.clone();
        let id = user.id().to_string();
        spawn_blocking(move || store.update(&id, &UserCandidate::new("taken"), None))
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("rename task panicked"))
        .collect();

    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);

    let stats = store.stats();
    assert_eq!(stats.resources, 3);
    assert_eq!(stats.indexed_user_names, 3);
    let page = QueryExecutor::new(&store)
        .search(&SearchRequest::filtered("userName eq 'taken'"))
        .unwrap();
    assert_eq!(page.total_results, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_never_observe_partial_updates() {
    let store = common::store();
    let joe = store.create(&fixtures::joe()).unwrap();
    let id = joe.id().to_string();

    let writer = {
        let store = store.clone();
        let id = id.clone();
        spawn_blocking(move || {
            for round in 0..200u32 {
                // userName and family name always change together
                let tag = format!("r{}", round);
                let candidate = UserCandidate::new(format!("joe-{}", tag)).with_name("Joe", tag);
                store.update(&id, &candidate, None).unwrap();
            }
        })
    };

    let readers = (0..4).map(|_| {
        let store = store.clone();
        let id = id.clone();
        spawn_blocking(move || {
            let mut last = Version::INITIAL;
            for _ in 0..200 {
                let user = store.get(&id).unwrap();
                assert!(user.version() >= last, "version went backwards");
                last = user.version();

                if let Some(family) = user.name().and_then(|name| name.family_name()) {
                    if family != "User" {
                        assert_eq!(user.user_name().as_str(), format!("joe-{}", family));
                    }
                }
            }
        })
    });

    writer.await.expect("writer panicked");
    for reader in join_all(readers).await {
        reader.expect("reader panicked");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_deletes_yield_one_winner() {
    let store: InMemoryStore = common::store();
    let joe = store.create(&fixtures::joe()).unwrap();

    let tasks = (0..CONTENDERS).map(|_| {
        let store = store.clone();
        let id = joe.id().to_string();
        spawn_blocking(move || store.delete(&id, Some(Precondition::Any)))
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("delete task panicked"))
        .collect();

    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
    for error in results.iter().filter_map(|result| result.as_ref().err()) {
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }
    assert!(store.is_empty());
    assert_eq!(store.stats().deleted_total, 1);
}
