pub mod cleanup;
pub mod shared_context;

pub use cleanup::{CleanupManager, CLEANUP_CHECK_NAME};
pub use shared_context::{ContextKey, ContextValue, SharedContext, UNKNOWN_TEST_DESCRIPTION};
