//! Search tests: filters, paging and the list envelope.

use crate::assert_error_kind;
use crate::common::{self, fixtures};
use scim_directory::config::{CaseSensitivity, DirectoryConfig, MatchPolicy};
use scim_directory::error::{DirectoryError, ErrorKind, ValidationError};
use scim_directory::query::{ListResponse, QueryExecutor, SearchRequest};
use scim_directory::resource::{Precondition, UserCandidate};
use scim_directory::storage::{InMemoryStore, ResourceStore};

fn search(store: &InMemoryStore, filter: &str) -> ListResponse {
    QueryExecutor::new(store)
        .search(&SearchRequest::filtered(filter))
        .unwrap()
}

fn user_names(response: &ListResponse) -> Vec<String> {
    response
        .resources
        .iter()
        .map(|user| user.user_name().as_str().to_string())
        .collect()
}

#[test]
fn test_or_filter_returns_joe_and_joel() {
    let store = common::store();
    fixtures::populate(&store);

    let response = search(&store, "userName eq 'joe' or userName eq 'joel'");
    assert_eq!(user_names(&response), vec!["joe", "joel"]);
    assert_eq!(response.total_results, 2);
}

#[test]
fn test_results_follow_insertion_order() {
    let store = common::store();
    for name in ["zed", "amy", "mia"] {
        store.create(&UserCandidate::new(name)).unwrap();
    }

    let response = search(&store, "userName pr");
    assert_eq!(user_names(&response), vec!["zed", "amy", "mia"]);
}

#[test]
fn test_and_binds_tighter_than_or() {
    let store = common::store();
    fixtures::populate(&store);

    // joel is bound into the conjunction and fails its second half
    let response = search(
        &store,
        "userName eq 'ann' or userName eq 'joel' and name.familyName eq 'User'",
    );
    assert_eq!(user_names(&response), vec!["ann"]);

    let grouped = search(
        &store,
        "(userName eq 'ann' or userName eq 'joel') and name.familyName eq 'Smith'",
    );
    assert_eq!(user_names(&grouped), vec!["ann"]);
}

#[test]
fn test_email_search_matches_any_address() {
    let store = common::store();
    fixtures::populate(&store);

    let response = search(&store, "emails co 'blah.com'");
    assert_eq!(user_names(&response), vec!["joe", "joel", "ann"]);

    let secondary = search(&store, "emails.value eq 'asmith@blah.com'");
    assert_eq!(user_names(&secondary), vec!["ann"]);
}

#[test]
fn test_version_filter_tracks_updates() {
    let store = common::store();
    let users = fixtures::populate(&store);
    store
        .update(users[0].id().as_str(), &fixtures::joe(), Some(Precondition::Any))
        .unwrap();

    let response = search(&store, "meta.version eq 1");
    assert_eq!(user_names(&response), vec!["joe"]);
}

#[test]
fn test_id_filter() {
    let store = common::store();
    let users = fixtures::populate(&store);

    let response = search(&store, &format!("id eq \"{}\"", users[2].id()));
    assert_eq!(user_names(&response), vec!["ann"]);
}

#[test]
fn test_case_policy_applies_to_filters() {
    let exact = common::store();
    fixtures::populate(&exact);
    assert_eq!(search(&exact, "userName eq 'JOE'").total_results, 0);
    assert_eq!(search(&exact, "name.givenName sw 'jo'").total_results, 0);

    let insensitive = common::store_with(
        DirectoryConfig::default()
            .with_user_name_case(CaseSensitivity::Insensitive)
            .with_match_policy(MatchPolicy {
                user_name: CaseSensitivity::Insensitive,
                text: CaseSensitivity::Insensitive,
            }),
    );
    fixtures::populate(&insensitive);
    assert_eq!(user_names(&search(&insensitive, "userName eq 'JOE'")), vec!["joe"]);
    assert_eq!(search(&insensitive, "name.givenName sw 'jo'").total_results, 2);
}

#[test]
fn test_loaded_config_filters_with_index_case_policy() {
    let config: DirectoryConfig = serde_json::from_str(r#"{"userNameCase": "insensitive"}"#).unwrap();
    let store = common::store_with(config);
    store.create(&fixtures::joe()).unwrap();

    // The index and the filter agree on what counts as the same userName
    assert_error_kind!(store.create(&UserCandidate::new("JOE")), ErrorKind::Conflict);
    assert_eq!(user_names(&search(&store, "userName eq 'JOE'")), vec!["joe"]);
    assert_eq!(search(&store, "name.givenName eq 'JOE'").total_results, 0);
}

#[test]
fn test_deleted_users_disappear_from_search() {
    let store = common::store();
    let users = fixtures::populate(&store);
    store
        .delete(users[0].id().as_str(), Some(Precondition::Any))
        .unwrap();

    let response = search(&store, "userName sw 'jo'");
    assert_eq!(user_names(&response), vec!["joel"]);
}

#[test]
fn test_paging_reports_total() {
    let store = common::store();
    for index in 0..25 {
        store
            .create(&UserCandidate::new(format!("user{:02}", index)))
            .unwrap();
    }
    let executor = QueryExecutor::new(&store);

    let page = executor
        .search(
            &SearchRequest::filtered("userName sw 'user'")
                .with_start_index(11)
                .with_count(10),
        )
        .unwrap();
    assert_eq!(page.total_results, 25);
    assert_eq!(page.start_index, 11);
    assert_eq!(page.items_per_page, 10);
    assert_eq!(page.resources[0].user_name().as_str(), "user10");

    let last = executor
        .search(&SearchRequest::all().with_start_index(21).with_count(10))
        .unwrap();
    assert_eq!(last.items_per_page, 5);

    let empty = executor.search(&SearchRequest::all().with_count(0)).unwrap();
    assert!(empty.resources.is_empty());
    assert_eq!(empty.total_results, 25);
}

#[test]
fn test_default_page_size_comes_from_config() {
    let store = common::store_with(DirectoryConfig::default().with_default_items_per_page(3));
    fixtures::populate(&store);
    store.create(&UserCandidate::new("extra")).unwrap();

    let page = QueryExecutor::new(&store).search(&SearchRequest::all()).unwrap();
    assert_eq!(page.items_per_page, 3);
    assert_eq!(page.total_results, 4);
}

#[test]
fn test_malformed_filters_are_validation_errors() {
    let store = common::store();
    fixtures::populate(&store);
    let executor = QueryExecutor::new(&store);

    for filter in [
        "userName eq",
        "userName gt 'joe'",
        "nickName eq 'joe'",
        "userName eq 'joe",
        "(userName eq 'joe'",
        "userName eq 'joe' and",
    ] {
        assert_error_kind!(
            executor.search(&SearchRequest::filtered(filter)),
            ErrorKind::Validation
        );
    }

    let error = executor
        .search(&SearchRequest::filtered("nickName eq 'joe'"))
        .unwrap_err();
    assert_eq!(
        error,
        DirectoryError::Validation(ValidationError::UnknownAttribute {
            attribute: "nickName".to_string(),
            position: 0,
        })
    );
}

#[test]
fn test_oversized_filter_is_rejected() {
    let store = common::store_with(DirectoryConfig::default().with_filter_limits(64, 2));
    let executor = QueryExecutor::new(&store);

    let long = format!("userName eq '{}'", "x".repeat(100));
    assert!(matches!(
        executor.search(&SearchRequest::filtered(long)).unwrap_err(),
        DirectoryError::Validation(ValidationError::FilterTooLong { max: 64, .. })
    ));

    assert!(matches!(
        executor
            .search(&SearchRequest::filtered("(((userName pr)))"))
            .unwrap_err(),
        DirectoryError::Validation(ValidationError::FilterTooDeep { max: 2 })
    ));
}

#[test]
fn test_search_request_and_envelope_serde() {
    let request: SearchRequest =
        serde_json::from_str(r#"{"filter": "userName pr", "startIndex": 2, "count": 5}"#).unwrap();
    assert_eq!(
        request,
        SearchRequest::filtered("userName pr")
            .with_start_index(2)
            .with_count(5)
    );

    let store = common::store();
    fixtures::populate(&store);
    let page = QueryExecutor::new(&store).search(&request).unwrap();
    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["totalResults"], 3);
    assert_eq!(json["startIndex"], 2);
    assert_eq!(json["itemsPerPage"], 2);
    assert_eq!(json["resources"][0]["userName"], "joel");
}
