//! Lifecycle tests: create, read, update and delete against one store.

use crate::assert_error_kind;
use crate::common::{self, fixtures};
use scim_directory::config::{CaseSensitivity, DirectoryConfig};
use scim_directory::error::{DirectoryError, ErrorKind, ValidationError};
use scim_directory::resource::{NameCandidate, Precondition, UserCandidate, Version};
use scim_directory::storage::ResourceStore;

#[test]
fn test_create_assigns_server_fields() {
    let store = common::store();
    let joe = store.create(&fixtures::joe()).unwrap();

    assert!(!joe.id().as_str().is_empty());
    assert_eq!(joe.version(), Version::INITIAL);
    assert_eq!(joe.user_name().as_str(), "joe");
    assert_eq!(joe.name().unwrap().family_name(), Some("User"));
    assert_eq!(joe.emails()[0].as_str(), "joe@blah.com");
    assert_eq!(joe.meta().created(), joe.meta().last_modified());
}

#[test]
fn test_emails_keep_insertion_order() {
    let store = common::store();
    let candidate = UserCandidate::new("multi")
        .with_email("z@example.org")
        .with_email("a@example.org")
        .with_email("m@example.org");
    let user = store.create(&candidate).unwrap();

    let emails: Vec<_> = user.emails().iter().map(|e| e.as_str()).collect();
    assert_eq!(emails, vec!["z@example.org", "a@example.org", "m@example.org"]);
}

#[test]
fn test_get_is_idempotent() {
    let store = common::store();
    let joe = store.create(&fixtures::joe()).unwrap();

    let first = store.get(joe.id().as_str()).unwrap();
    let second = store.get(joe.id().as_str()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, joe);
}

#[test]
fn test_get_unknown_id() {
    let store = common::store();
    let error = store.get("9999").unwrap_err();
    assert_eq!(error, DirectoryError::not_found("9999"));
    assert_eq!(error.to_string(), "User 9999 does not exist");
}

#[test]
fn test_duplicate_user_name_is_conflict() {
    let store = common::store();
    store.create(&fixtures::joe()).unwrap();

    assert_error_kind!(store.create(&fixtures::joe()), ErrorKind::Conflict);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_insensitive_store_treats_case_variants_as_equal() {
    let store = common::store_with(
        DirectoryConfig::default().with_user_name_case(CaseSensitivity::Insensitive),
    );
    let joe = store.create(&fixtures::joe()).unwrap();

    assert_error_kind!(store.create(&UserCandidate::new("JOE")), ErrorKind::Conflict);

    // Changing only the case of one's own name is not a conflict
    let renamed = store
        .update(joe.id().as_str(), &UserCandidate::new("Joe"), None)
        .unwrap();
    assert_eq!(renamed.user_name().as_str(), "Joe");
    assert_eq!(store.stats().indexed_user_names, 1);
}

#[test]
fn test_update_replaces_all_mutable_attributes() {
    let store = common::store();
    let joe = store.create(&fixtures::joe()).unwrap();

    let replacement = UserCandidate {
        name: Some(NameCandidate {
            given_name: None,
            family_name: Some("Bloggs".to_string()),
        }),
        ..UserCandidate::new("joe")
    };
    let updated = store
        .update(joe.id().as_str(), &replacement, Some(Precondition::Any))
        .unwrap();

    assert_eq!(updated.id(), joe.id());
    assert_eq!(updated.version(), Version::new(1));
    assert_eq!(updated.name().unwrap().given_name(), None);
    assert_eq!(updated.name().unwrap().family_name(), Some("Bloggs"));
    assert!(updated.emails().is_empty());
    assert_eq!(updated.meta().created(), joe.meta().created());
    assert!(updated.meta().last_modified() >= joe.meta().last_modified());
}

#[test]
fn test_rename_frees_old_name() {
    let store = common::store();
    let joe = store.create(&fixtures::joe()).unwrap();
    store.create(&fixtures::joel()).unwrap();

    assert_error_kind!(
        store.update(joe.id().as_str(), &UserCandidate::new("joel"), None),
        ErrorKind::Conflict
    );
    // The failed update left joe untouched
    assert_eq!(store.get(joe.id().as_str()).unwrap(), joe);

    store
        .update(joe.id().as_str(), &UserCandidate::new("joseph"), None)
        .unwrap();
    assert!(store.create(&UserCandidate::new("joe")).is_ok());
}

#[test]
fn test_invalid_payloads() {
    let store = common::store();

    let missing = store.create(&UserCandidate::default()).unwrap_err();
    assert_eq!(
        missing,
        DirectoryError::Validation(ValidationError::missing_required("userName"))
    );

    assert_error_kind!(store.create(&UserCandidate::new("   ")), ErrorKind::Validation);
    assert_error_kind!(
        store.create(&UserCandidate::new("joe").with_email(" ")),
        ErrorKind::Validation
    );
    assert!(store.is_empty());
}

#[test]
fn test_delete_then_get_and_recreate() {
    let store = common::sequential_store();
    let joe = store.create(&fixtures::joe()).unwrap();
    assert_eq!(joe.id().as_str(), "1");

    store
        .delete(joe.id().as_str(), Some(Precondition::Any))
        .unwrap();
    assert_error_kind!(store.get("1"), ErrorKind::NotFound);

    // A new joe is a new resource: fresh id, fresh version
    let again = store.create(&fixtures::joe()).unwrap();
    assert_eq!(again.id().as_str(), "2");
    assert_eq!(again.version(), Version::INITIAL);
    assert_error_kind!(store.get("1"), ErrorKind::NotFound);
}

#[test]
fn test_index_matches_live_resources() {
    let store = common::store();
    let users = fixtures::populate(&store);

    store
        .delete(users[1].id().as_str(), Some(Precondition::Exact(Version::INITIAL)))
        .unwrap();
    store
        .update(users[2].id().as_str(), &UserCandidate::new("annie"), None)
        .unwrap();

    let stats = store.stats();
    assert_eq!(stats.resources, 2);
    assert_eq!(stats.indexed_user_names, 2);
    assert_eq!(stats.created_total, 3);
    assert_eq!(stats.deleted_total, 1);
}
