//! Permission resolution use case

use tracing::{debug, info};

use crate::domain::permission::{PermissionKind, PermissionState, PromptConfig};

use super::ports::PermissionService;

/// Check a permission and prompt for it unless it is already granted.
///
/// Runs once at startup; the result is not re-checked per tick.
pub async fn resolve_permission<P>(
    service: &P,
    kind: PermissionKind,
    prompt: &PromptConfig,
) -> PermissionState
where
    P: PermissionService + ?Sized,
{
    let checked = service.check(kind).await;
    debug!(%kind, %checked, "permission checked");
    if checked.is_granted() {
        return checked;
    }

    let requested = service.request(kind, prompt).await;
    info!(%kind, state = %requested, "finished permissions");
    requested
}
