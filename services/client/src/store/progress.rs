//! services/client/src/store/progress.rs
//!
//! Keeps loading indicators on screen long enough to be seen.

use std::future::Future;
use std::time::Duration;

/// Runs `operation` and a `minimum` timer concurrently and resolves once both
/// are done, with the operation's output. Errors are returned after the
/// timer too, so a fast failure still shows its loading state briefly.
pub async fn with_minimum_duration<F, T>(minimum: Duration, operation: F) -> T
where
    F: Future<Output = T>,
{
    let (output, ()) = futures::join!(operation, tokio::time::sleep(minimum));
    output
}
