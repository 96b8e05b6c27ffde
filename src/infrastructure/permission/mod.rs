//! Permission infrastructure adapters

mod device_probe;
mod fixed;

pub use device_probe::DeviceProbePermission;
pub use fixed::StaticPermission;

use crate::application::ports::PermissionService;

/// Create the permission service; `assume_granted` skips probing the device
pub fn create_permission_service(assume_granted: bool) -> Box<dyn PermissionService> {
    if assume_granted {
        Box::new(StaticPermission::granted())
    } else {
        Box::new(DeviceProbePermission::new())
    }
}
