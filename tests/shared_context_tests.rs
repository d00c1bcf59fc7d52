/*!
 * Shared context lifecycle tests
 * Arrange fills all seven keys, cleanup always empties them
 */

use maps_bridge_contract::*;
use std::time::Duration;
mod test_utils;
use test_utils::*;

#[test]
fn test_cleanup_after_passing_iteration() {
    let mut context = arranged_context(&googleplex_record());
    let results = ResponseValidator::default().evaluate(&ok_response(&googleplex_body()), &context);
    assert!(results.iter().all(CheckResult::passed));

    let cleanup = CleanupManager::cleanup(&mut context);

    assert!(cleanup.passed());
    assert_eq!(cleanup.name, "Cleanup globals");
    assert!(context.is_empty());
}

#[test]
fn test_cleanup_after_failing_iteration() {
    let mut context = arranged_context(&googleplex_record());
    let response = ServiceResponse::new(500, Duration::from_secs(12), "Internal Server Error");
    let results = ResponseValidator::default().evaluate(&response, &context);
    assert!(results.iter().any(|result| !result.passed()));

    assert!(CleanupManager::cleanup(&mut context).passed());
    for key in ContextKey::ALL {
        assert!(!context.contains(key), "{} survived cleanup", key);
    }
}

#[test]
fn test_cleanup_is_idempotent() {
    let mut context = arranged_context(&IterationRecord::new("x"));
    CleanupManager::cleanup(&mut context);
    CleanupManager::cleanup(&mut context);
    assert!(context.is_empty());
    assert_eq!(context, SharedContext::new());
}

#[test]
fn test_expectations_do_not_leak_between_iterations() {
    let mut context = arranged_context(&googleplex_record());
    CleanupManager::cleanup(&mut context);

    RequestBuilder::arrange(&IterationRecord::new("48.8566,2.3522"), &mut context).unwrap();
    let results = ResponseValidator::default().evaluate(&ok_response(&paris_body(None)), &context);

    assert!(find(&results, "Expected coordinate values match").is_skipped());
    assert!(find(&results, "Name field validation").is_skipped());
}
