//! Ctl command handler - sends commands to a running listener via IPC

use super::args::CtlAction;
use super::ipc::{create_ipc_client, IpcClient};
use super::presenter::Presenter;

/// Handle ctl subcommand
pub async fn handle_ctl_command(action: CtlAction, presenter: &Presenter) -> Result<(), String> {
    let client = create_ipc_client();
    send_ctl(client.as_ref(), action, presenter).await
}

async fn send_ctl(
    client: &dyn IpcClient,
    action: CtlAction,
    presenter: &Presenter,
) -> Result<(), String> {
    if !client.is_listener_running() {
        return Err("No listener running. Start one with: euro-listener".to_string());
    }

    let cmd = action.command();
    let response = client
        .send_command(cmd)
        .await
        .map_err(|e| format!("Failed to communicate with listener: {}", e))?;
    let response = response.trim();

    if let Some(stripped) = response.strip_prefix("error:") {
        return Err(stripped.trim().to_string());
    }

    match action {
        CtlAction::Status => presenter.output(response),
        _ => presenter.info(&format!("Command sent: {}", cmd)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io;

    struct FakeClient {
        running: bool,
        response: &'static str,
    }

    #[async_trait]
    impl IpcClient for FakeClient {
        fn is_listener_running(&self) -> bool {
            self.running
        }

        async fn send_command(&self, _cmd: &str) -> io::Result<String> {
            Ok(format!("{}\n", self.response))
        }
    }

    #[tokio::test]
    async fn reports_missing_listener() {
        let client = FakeClient {
            running: false,
            response: "ok",
        };
        let err = send_ctl(&client, CtlAction::Play, &Presenter::new())
            .await
            .unwrap_err();
        assert!(err.contains("No listener running"));
    }

    #[tokio::test]
    async fn surfaces_server_errors() {
        let client = FakeClient {
            running: true,
            response: "error: unknown command",
        };
        let err = send_ctl(&client, CtlAction::Stop, &Presenter::new())
            .await
            .unwrap_err();
        assert_eq!(err, "unknown command");
    }

    #[tokio::test]
    async fn status_succeeds() {
        let client = FakeClient {
            running: true,
            response: "phase 0/3 | idle | last record: none",
        };
        assert!(send_ctl(&client, CtlAction::Status, &Presenter::new())
            .await
            .is_ok());
    }
}
