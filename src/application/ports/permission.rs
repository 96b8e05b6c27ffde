//! Permission port interface

use async_trait::async_trait;

use crate::domain::permission::{PermissionKind, PermissionState, PromptConfig};

/// Port for checking and requesting platform permissions
#[async_trait]
pub trait PermissionService: Send + Sync {
    /// Current state without prompting. `Unknown` means undetermined.
    async fn check(&self, kind: PermissionKind) -> PermissionState;

    /// Ask for the permission. Resolves to `Granted` or `Denied`.
    async fn request(&self, kind: PermissionKind, prompt: &PromptConfig) -> PermissionState;
}

/// Blanket implementation for boxed permission services
#[async_trait]
impl PermissionService for Box<dyn PermissionService> {
    async fn check(&self, kind: PermissionKind) -> PermissionState {
        self.as_ref().check(kind).await
    }

    async fn request(&self, kind: PermissionKind, prompt: &PromptConfig) -> PermissionState {
        self.as_ref().request(kind, prompt).await
    }
}
