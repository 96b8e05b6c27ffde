//! Permission service with a preset answer

use async_trait::async_trait;

use crate::application::ports::PermissionService;
use crate::domain::permission::{PermissionKind, PermissionState, PromptConfig};

/// Answers every check and request with the same state
#[derive(Debug, Clone, Copy)]
pub struct StaticPermission(PermissionState);

impl StaticPermission {
    pub fn new(state: PermissionState) -> Self {
        Self(state)
    }

    pub fn granted() -> Self {
        Self(PermissionState::Granted)
    }
}

#[async_trait]
impl PermissionService for StaticPermission {
    async fn check(&self, _kind: PermissionKind) -> PermissionState {
        self.0
    }

    async fn request(&self, _kind: PermissionKind, _prompt: &PromptConfig) -> PermissionState {
        self.0
    }
}
