//! Common test utilities for directory integration tests.

use scim_directory::config::{DirectoryConfig, IdStrategy};
use scim_directory::storage::InMemoryStore;
use std::sync::Once;

pub mod fixtures;

static INIT_LOGGER: Once = Once::new();

/// Route `log` output through env_logger once per test binary.
///
/// Set `RUST_LOG=scim_directory=debug` to see store activity.
pub fn init_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// A fresh store with the default configuration.
pub fn store() -> InMemoryStore {
    init_logging();
    InMemoryStore::new()
}

/// A fresh store that hands out numeric ids, like the classic UAA endpoint.
pub fn sequential_store() -> InMemoryStore {
    store_with(DirectoryConfig::default().with_id_strategy(IdStrategy::Sequential))
}

/// A fresh store with the given configuration.
pub fn store_with(config: DirectoryConfig) -> InMemoryStore {
    init_logging();
    InMemoryStore::with_config(config)
}

/// Assert that a result failed with the given error kind.
#[macro_export]
macro_rules! assert_error_kind {
    ($result:expr, $kind:expr) => {
        match $result {
            Ok(value) => panic!("Expected {:?} error, got Ok({:?})", $kind, value),
            Err(error) => assert_eq!(
                error.kind(),
                $kind,
                "Expected {:?} error, got: {}",
                $kind,
                error
            ),
        }
    };
}
