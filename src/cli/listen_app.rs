//! Listener runner: the recording cycle plus IPC control

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, trace};

use crate::application::ports::TickSource;
use crate::application::{
    resolve_permission, CycleConfig, CycleError, PlaybackController, RecordingCycleController,
};
use crate::domain::permission::{PermissionKind, PromptConfig};
use crate::infrastructure::{
    create_notifier, create_permission_service, CpalCapture, IntervalTickSource, RodioPlayback,
    SystemClock,
};

use super::app::{EXIT_ERROR, EXIT_PERMISSION_DENIED, EXIT_SUCCESS};
use super::args::ListenOptions;
use super::ipc::{create_ipc_server, ListenerStatus};
use super::pid_file::{PidFile, PidFileError};
use super::presenter::Presenter;
use super::signals::{ListenerSignal, ListenerSignalHandler};

/// Run the listener until SIGINT/SIGTERM or `ctl stop`
pub async fn run_listener(options: ListenOptions) -> ExitCode {
    let presenter = Presenter::new();

    let mut pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        match e {
            PidFileError::AlreadyRunning(pid) => {
                presenter.error(&format!("Another listener is already running (PID: {})", pid));
            }
            _ => presenter.error(&e.to_string()),
        }
        return ExitCode::from(EXIT_ERROR);
    }

    let permissions = create_permission_service(options.assume_permission);
    let permission = resolve_permission(
        &permissions,
        PermissionKind::RecordAudio,
        &PromptConfig::record_audio(),
    )
    .await;
    info!(%permission, "microphone permission resolved");

    let capture = CpalCapture::new(&options.output_dir);
    let controller = Arc::new(RecordingCycleController::new(
        capture,
        SystemClock::new(),
        CycleConfig {
            cycle_length: options.cycle_length,
            permission_gate: options.permission_gate,
        },
    ));

    match controller.initialize(permission) {
        Ok(()) => {}
        Err(e @ CycleError::PermissionDenied(_)) => {
            presenter.error(&e.to_string());
            presenter.info("Retry with --permission-gate best-effort to record anyway");
            return ExitCode::from(EXIT_PERMISSION_DENIED);
        }
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    }

    let playback = Arc::new(PlaybackController::new(
        RodioPlayback::new(),
        create_notifier(options.notify),
        controller.subscribe(),
    ));

    let (mut signals, signal_tx) = match ListenerSignalHandler::new() {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut ipc_server = create_ipc_server();
    if let Err(e) = ipc_server.bind() {
        presenter.error(&format!("Failed to bind socket: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }
    let socket_display = ipc_server.path();

    let status_controller = Arc::clone(&controller);
    let pattern = options.timestamp_format.clone();
    let cycle_length = options.cycle_length.get();
    tokio::spawn(async move {
        let status_fn = Box::new(move || {
            let status = status_controller.status();
            ListenerStatus {
                phase: status.phase.value(),
                cycle_length,
                capturing: status.capturing,
                last_record: status
                    .last_recording
                    .as_ref()
                    .map(|r| status_controller.format_time(r, &pattern)),
            }
        });
        if let Err(e) = ipc_server.run(signal_tx, status_fn).await {
            error!(error = %e, "IPC server stopped");
        }
    });

    presenter.listener_status(&format!(
        "Started: tick every {}, cycle of {} ticks",
        options.tick_interval, cycle_length
    ));
    presenter.info(&format!(
        "PID: {} | Socket: {} | Recordings: {}",
        std::process::id(),
        socket_display,
        options.output_dir.display()
    ));

    let mut ticks = IntervalTickSource::new().schedule(options.tick_interval.as_std());

    loop {
        tokio::select! {
            Some(tick) = ticks.recv() => {
                trace!(seq = tick.seq, "dispatching tick");
                let controller = Arc::clone(&controller);
                // Spawned so a slow stop never delays the next tick; overlap is dropped
                tokio::spawn(async move {
                    let outcome = controller.on_tick().await;
                    presenter.tick(&outcome);
                });
            }
            signal = signals.recv() => match signal {
                Some(ListenerSignal::Play) => {
                    let playback = Arc::clone(&playback);
                    tokio::spawn(async move {
                        match playback.play().await {
                            Ok(recording) => presenter.success(&format!("Played {}", recording.handle())),
                            Err(e) => presenter.warn(&e.to_string()),
                        }
                    });
                }
                Some(ListenerSignal::Stop) | Some(ListenerSignal::Shutdown) | None => {
                    presenter.listener_status("Shutting down...");
                    break;
                }
            },
            else => break,
        }
    }

    let _ = pid_file.release();
    ExitCode::from(EXIT_SUCCESS)
}
