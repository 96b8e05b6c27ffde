//! Microphone permission inferred from the input device
//!
//! Desktop platforms have no portable permission API, so access counts as
//! granted once an input stream can be opened and started.

use std::sync::Mutex as StdMutex;
use std::time::Duration;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{debug, info, warn};

use crate::application::ports::PermissionService;
use crate::domain::permission::{PermissionKind, PermissionState, PromptConfig};

/// How long the probe stream runs before it counts as working
const PROBE_DURATION: Duration = Duration::from_millis(100);

/// Permission service that probes the default input device
pub struct DeviceProbePermission {
    /// Result of the last request
    resolved: StdMutex<PermissionState>,
}

impl DeviceProbePermission {
    pub fn new() -> Self {
        Self {
            resolved: StdMutex::new(PermissionState::Unknown),
        }
    }

    fn has_input_device() -> bool {
        cpal::default_host().default_input_device().is_some()
    }

    /// Open and briefly run an input stream (called from spawn_blocking)
    fn probe_sync() -> Result<(), String> {
        let device = cpal::default_host()
            .default_input_device()
            .ok_or("no input device")?;
        let config = device.default_input_config().map_err(|e| e.to_string())?;

        let stream = device
            .build_input_stream_raw(
                &config.config(),
                config.sample_format(),
                |_data, _: &cpal::InputCallbackInfo| {},
                |err| warn!(error = %err, "probe stream error"),
                None,
            )
            .map_err(|e| e.to_string())?;
        stream.play().map_err(|e| e.to_string())?;
        std::thread::sleep(PROBE_DURATION);
        Ok(())
    }
}

impl Default for DeviceProbePermission {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PermissionService for DeviceProbePermission {
    async fn check(&self, kind: PermissionKind) -> PermissionState {
        let has_device = tokio::task::spawn_blocking(Self::has_input_device)
            .await
            .unwrap_or(false);
        if !has_device {
            debug!(%kind, "no input device");
            return PermissionState::Denied;
        }
        *self.resolved.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn request(&self, kind: PermissionKind, prompt: &PromptConfig) -> PermissionState {
        info!(%kind, title = %prompt.title, "{}", prompt.message);

        let state = match tokio::task::spawn_blocking(Self::probe_sync).await {
            Ok(Ok(())) => PermissionState::Granted,
            Ok(Err(reason)) => {
                warn!(%kind, %reason, "microphone not accessible");
                PermissionState::Denied
            }
            Err(e) => {
                warn!(%kind, error = %e, "permission probe task failed");
                PermissionState::Denied
            }
        };

        *self.resolved.lock().unwrap_or_else(|e| e.into_inner()) = state;
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unresolved() {
        let service = DeviceProbePermission::new();
        assert_eq!(
            *service.resolved.lock().unwrap(),
            PermissionState::Unknown
        );
    }

    #[tokio::test]
    #[ignore = "Requires audio hardware"]
    async fn request_grants_with_working_microphone() {
        let service = DeviceProbePermission::new();
        let state = service
            .request(PermissionKind::RecordAudio, &PromptConfig::record_audio())
            .await;
        assert_eq!(state, PermissionState::Granted);
        assert_eq!(
            service.check(PermissionKind::RecordAudio).await,
            PermissionState::Granted
        );
    }
}
