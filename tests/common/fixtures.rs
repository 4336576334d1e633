//! User payloads shared by the integration suites.

use scim_directory::resource::UserCandidate;
use scim_directory::storage::ResourceStore;
use scim_directory::User;

pub fn joe() -> UserCandidate {
    UserCandidate::new("joe")
        .with_name("Joe", "User")
        .with_email("joe@blah.com")
}

pub fn joel() -> UserCandidate {
    UserCandidate::new("joel")
        .with_name("Joel", "D'sa")
        .with_email("joel@blah.com")
}

pub fn ann() -> UserCandidate {
    UserCandidate::new("ann")
        .with_name("Ann", "Smith")
        .with_email("ann@example.org")
        .with_email("asmith@blah.com")
}

/// Create joe, joel and ann in that order.
pub fn populate<S: ResourceStore>(store: &S) -> Vec<User> {
    [joe(), joel(), ann()]
        .iter()
        .map(|candidate| store.create(candidate).expect("fixture user should be created"))
        .collect()
}
