//! Recording cycle use case
//!
//! Drives the start/stop/pause/reset cycle from timer ticks and publishes the
//! most recent successful capture.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::domain::cycle::{CycleCommand, CycleLength, CyclePhase, LastRecording, Transition};
use crate::domain::permission::{PermissionGate, PermissionState};
use crate::domain::recording::{CaptureConfig, RecordingHandle, RecordingName};

use super::ports::{AudioCapture, CaptureError, Clock};

/// Errors from setting up the cycle
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("Microphone permission {0}; the recording cycle will not start")]
    PermissionDenied(PermissionState),

    #[error("Failed to configure capture: {0}")]
    Configure(#[from] CaptureError),
}

/// Configuration for the recording cycle
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleConfig {
    /// Terminal phase index
    pub cycle_length: CycleLength,
    /// Policy when permission is not granted
    pub permission_gate: PermissionGate,
}

/// What happened on the capture side during a tick
#[derive(Debug, Clone)]
pub enum CaptureReport {
    /// No capture command this tick
    Idle,
    Started(RecordingName),
    StartFailed(CaptureError),
    Committed(LastRecording),
    StopFailed(CaptureError),
}

/// Result of one processed tick
#[derive(Debug, Clone)]
pub struct TickReport {
    pub transition: Transition,
    pub capture: CaptureReport,
}

/// Result of delivering a tick to the controller
#[derive(Debug, Clone)]
pub enum TickOutcome {
    Processed(TickReport),
    /// A previous tick was still in flight; this one was discarded
    Dropped,
    /// The controller was never initialized
    Inactive,
}

/// Point-in-time view of the controller
#[derive(Debug, Clone)]
pub struct CycleStatus {
    pub phase: CyclePhase,
    pub capturing: bool,
    pub current_file: Option<RecordingHandle>,
    pub last_recording: Option<LastRecording>,
}

/// Mutable state owned by the tick handler
#[derive(Debug, Default)]
struct CycleSession {
    phase: CyclePhase,
}

/// Recording cycle controller.
///
/// Single writer of the cycle counter, the displayed current file and the
/// last recording. Readers observe the latter two through watch channels.
pub struct RecordingCycleController<A, K>
where
    A: AudioCapture,
    K: Clock,
{
    capture: A,
    clock: K,
    config: CycleConfig,
    session: Mutex<CycleSession>,
    /// Lock-free mirror of the session phase for status reads
    phase: AtomicU8,
    active: AtomicBool,
    current_file: watch::Sender<Option<RecordingHandle>>,
    last_recording: watch::Sender<Option<LastRecording>>,
}

impl<A, K> RecordingCycleController<A, K>
where
    A: AudioCapture,
    K: Clock,
{
    /// Create a new controller. It ignores ticks until initialized.
    pub fn new(capture: A, clock: K, config: CycleConfig) -> Self {
        let (current_file, _) = watch::channel(None);
        let (last_recording, _) = watch::channel(None);
        Self {
            capture,
            clock,
            config,
            session: Mutex::new(CycleSession::default()),
            phase: AtomicU8::new(CyclePhase::IDLE.value()),
            active: AtomicBool::new(false),
            current_file,
            last_recording,
        }
    }

    /// Apply the permission gate and baseline capture settings.
    pub fn initialize(&self, permission: PermissionState) -> Result<(), CycleError> {
        if !self.config.permission_gate.allows(permission) {
            warn!(%permission, gate = %self.config.permission_gate, "refusing to start recording cycle");
            return Err(CycleError::PermissionDenied(permission));
        }
        if !permission.is_granted() {
            warn!(%permission, "starting recording cycle without microphone permission");
        }

        info!("initiating audio");
        self.capture.configure(CaptureConfig::baseline())?;
        self.active.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Whether ticks are being accepted
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    /// The capture adapter driven by this controller
    pub fn capture(&self) -> &A {
        &self.capture
    }

    /// Advance the cycle by one tick and run its capture command.
    ///
    /// The session lock is held until the command resolves; a tick that finds
    /// it held is dropped without advancing the counter.
    pub async fn on_tick(&self) -> TickOutcome {
        if !self.is_active() {
            return TickOutcome::Inactive;
        }

        let Ok(mut session) = self.session.try_lock() else {
            warn!("previous tick still in flight, dropping tick");
            return TickOutcome::Dropped;
        };

        let transition = session.phase.advance(self.config.cycle_length);
        session.phase = transition.next;
        self.phase.store(transition.next.value(), Ordering::SeqCst);
        debug!(
            previous = transition.previous.value(),
            next = transition.next.value(),
            command = %transition.command,
            "cycle tick"
        );

        let capture = match transition.command {
            CycleCommand::StartCapture => self.start_capture().await,
            CycleCommand::StopCapture => self.stop_capture().await,
            CycleCommand::Pause => CaptureReport::Idle,
            CycleCommand::Reset => {
                info!("resetting audio");
                CaptureReport::Idle
            }
        };

        drop(session);
        TickOutcome::Processed(TickReport {
            transition,
            capture,
        })
    }

    async fn start_capture(&self) -> CaptureReport {
        self.current_file.send_replace(None);

        let name = RecordingName::from_timestamp(&self.clock.now());
        let config = CaptureConfig::baseline().with_output_name(name.clone());

        let result = match self.capture.configure(config) {
            Ok(()) => self.capture.start().await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                info!(file = %name, "started recording");
                CaptureReport::Started(name)
            }
            Err(e) => {
                warn!(error = %e, "capture start failed; cycle continues");
                CaptureReport::StartFailed(e)
            }
        }
    }

    async fn stop_capture(&self) -> CaptureReport {
        match self.capture.stop().await {
            Ok(handle) => {
                let recording = LastRecording::new(handle.clone(), self.clock.now());
                self.last_recording.send_replace(Some(recording.clone()));
                self.current_file.send_replace(Some(handle));
                info!(file = %recording.handle(), "stopped recording");
                CaptureReport::Committed(recording)
            }
            Err(e) => {
                warn!(error = %e, "capture stop failed; keeping previous recording");
                CaptureReport::StopFailed(e)
            }
        }
    }

    /// Current position in the cycle
    pub fn phase(&self) -> CyclePhase {
        CyclePhase::from_value(self.phase.load(Ordering::SeqCst))
    }

    /// Latest successful capture, if any
    pub fn last_recording(&self) -> Option<LastRecording> {
        self.last_recording.borrow().clone()
    }

    /// Subscribe to last-recording updates
    pub fn subscribe(&self) -> watch::Receiver<Option<LastRecording>> {
        self.last_recording.subscribe()
    }

    /// File shown as current; cleared when a new capture starts
    pub fn current_file(&self) -> Option<RecordingHandle> {
        self.current_file.borrow().clone()
    }

    /// Snapshot for status queries
    pub fn status(&self) -> CycleStatus {
        CycleStatus {
            phase: self.phase(),
            capturing: self.capture.is_capturing(),
            current_file: self.current_file(),
            last_recording: self.last_recording(),
        }
    }

    /// Format a timestamp with the controller's clock
    pub fn format_time(&self, recording: &LastRecording, pattern: &str) -> String {
        self.clock.format(recording.recorded_at(), pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::time::Timestamp;
    use async_trait::async_trait;
    use chrono::{Local, TimeZone};
    use std::sync::Mutex as StdMutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Configure(String),
        Start,
        Stop,
    }

    #[derive(Default)]
    struct MockCapture {
        calls: StdMutex<Vec<Call>>,
        fail_start: bool,
        fail_stop: bool,
    }

    impl MockCapture {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AudioCapture for MockCapture {
        fn configure(&self, config: CaptureConfig) -> Result<(), CaptureError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Configure(config.output_name.to_string()));
            Ok(())
        }

        async fn start(&self) -> Result<(), CaptureError> {
            self.calls.lock().unwrap().push(Call::Start);
            if self.fail_start {
                return Err(CaptureError::NoAudioDevice);
            }
            Ok(())
        }

        async fn stop(&self) -> Result<RecordingHandle, CaptureError> {
            self.calls.lock().unwrap().push(Call::Stop);
            if self.fail_stop {
                return Err(CaptureError::StopFailed("device lost".into()));
            }
            Ok(RecordingHandle::new("/tmp/clip.wav"))
        }

        fn is_capturing(&self) -> bool {
            false
        }
    }

    struct FixedClock(Timestamp);

    impl Clock for FixedClock {
        fn now(&self) -> Timestamp {
            self.0
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Local.with_ymd_and_hms(2024, 3, 9, 17, 4, 5).unwrap())
    }

    fn controller(capture: MockCapture) -> RecordingCycleController<MockCapture, FixedClock> {
        RecordingCycleController::new(capture, clock(), CycleConfig::default())
    }

    #[tokio::test]
    async fn ignores_ticks_before_initialize() {
        let c = controller(MockCapture::default());
        assert!(matches!(c.on_tick().await, TickOutcome::Inactive));
        assert!(c.phase().is_idle());
        assert!(c.capture.calls().is_empty());
    }

    #[tokio::test]
    async fn enforce_gate_rejects_denied_permission() {
        let c = controller(MockCapture::default());
        let err = c.initialize(PermissionState::Denied).unwrap_err();
        assert!(matches!(err, CycleError::PermissionDenied(PermissionState::Denied)));
        assert!(!c.is_active());
        assert!(matches!(c.on_tick().await, TickOutcome::Inactive));
    }

    #[tokio::test]
    async fn best_effort_gate_starts_without_permission() {
        let c = RecordingCycleController::new(
            MockCapture::default(),
            clock(),
            CycleConfig {
                permission_gate: PermissionGate::BestEffort,
                ..Default::default()
            },
        );
        c.initialize(PermissionState::Denied).unwrap();
        assert!(c.is_active());
    }

    #[tokio::test]
    async fn initialize_applies_baseline_config() {
        let c = controller(MockCapture::default());
        c.initialize(PermissionState::Granted).unwrap();
        assert_eq!(c.capture.calls(), vec![Call::Configure("audio.wav".into())]);
    }

    #[tokio::test]
    async fn full_cycle_commits_recording() {
        let c = controller(MockCapture::default());
        c.initialize(PermissionState::Granted).unwrap();

        for _ in 0..4 {
            assert!(matches!(c.on_tick().await, TickOutcome::Processed(_)));
        }

        assert_eq!(
            c.capture.calls(),
            vec![
                Call::Configure("audio.wav".into()),
                Call::Configure("file_2024_03_09_17_04_05_000.wav".into()),
                Call::Start,
                Call::Stop,
            ]
        );
        assert!(c.phase().is_idle());

        let last = c.last_recording().unwrap();
        assert_eq!(last.handle(), &RecordingHandle::new("/tmp/clip.wav"));
        assert_eq!(last.recorded_at(), &clock().0);
        assert_eq!(c.current_file(), Some(RecordingHandle::new("/tmp/clip.wav")));
    }

    #[tokio::test]
    async fn start_clears_current_file_but_keeps_last_recording() {
        let c = controller(MockCapture::default());
        c.initialize(PermissionState::Granted).unwrap();
        for _ in 0..4 {
            c.on_tick().await;
        }
        assert!(c.current_file().is_some());

        c.on_tick().await;
        assert!(c.current_file().is_none());
        assert!(c.last_recording().is_some());
    }

    #[tokio::test]
    async fn start_failure_does_not_stall_cycle() {
        let c = controller(MockCapture {
            fail_start: true,
            ..Default::default()
        });
        c.initialize(PermissionState::Granted).unwrap();

        let TickOutcome::Processed(report) = c.on_tick().await else {
            panic!("expected processed tick");
        };
        assert!(matches!(report.capture, CaptureReport::StartFailed(_)));
        assert_eq!(c.phase().value(), 1);
    }

    #[tokio::test]
    async fn stop_failure_keeps_previous_recording() {
        let c = controller(MockCapture {
            fail_stop: true,
            ..Default::default()
        });
        c.initialize(PermissionState::Granted).unwrap();

        c.on_tick().await;
        let TickOutcome::Processed(report) = c.on_tick().await else {
            panic!("expected processed tick");
        };
        assert!(matches!(report.capture, CaptureReport::StopFailed(_)));
        assert_eq!(report.transition.next.value(), 2);
        assert!(c.last_recording().is_none());
    }

    #[tokio::test]
    async fn subscribers_see_commit() {
        let c = controller(MockCapture::default());
        c.initialize(PermissionState::Granted).unwrap();
        let mut rx = c.subscribe();

        c.on_tick().await;
        c.on_tick().await;

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_some());
    }

    #[tokio::test]
    async fn status_reports_phase_and_recording() {
        let c = controller(MockCapture::default());
        c.initialize(PermissionState::Granted).unwrap();
        c.on_tick().await;
        c.on_tick().await;

        let status = c.status();
        assert_eq!(status.phase.value(), 2);
        assert!(!status.capturing);
        assert!(status.last_recording.is_some());
        assert_eq!(
            c.format_time(status.last_recording.as_ref().unwrap(), "%H:%M:%S"),
            "17:04:05"
        );
    }
}
