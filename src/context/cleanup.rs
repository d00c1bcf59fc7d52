use log::debug;

use crate::context::{ContextKey, SharedContext};
use crate::validation::CheckResult;

pub const CLEANUP_CHECK_NAME: &str = "Cleanup globals";

/// Restores the shared context to its empty state after an iteration
pub struct CleanupManager;

impl CleanupManager {
    /// Remove every expectation key. Always passes; safe to call on an
    /// already empty context.
    pub fn cleanup(context: &mut SharedContext) -> CheckResult {
        let removed = ContextKey::ALL
            .iter()
            .filter(|key| context.unset(**key).is_some())
            .count();
        debug!("Cleared {} shared context entries", removed);
        CheckResult::pass(CLEANUP_CHECK_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_is_total_and_idempotent() {
        let mut context = SharedContext::new();
        for key in ContextKey::ALL {
            context.set(key, true);
        }
        assert_eq!(context.len(), 7);

        assert!(CleanupManager::cleanup(&mut context).passed());
        assert!(context.is_empty());

        let again = CleanupManager::cleanup(&mut context);
        assert!(again.passed());
        assert_eq!(again.name, CLEANUP_CHECK_NAME);
        assert!(context.is_empty());
    }
}
