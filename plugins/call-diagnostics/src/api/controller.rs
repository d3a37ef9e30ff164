use callui_plugin::{reply_channel, send_message_receive_result};

use crate::{MessageSender, PluginResult};

use super::{
    BannerTransition, Command, Config, DiagnosticKind, DiagnosticsState, Query, Reconciliation,
    Status, Surfaces,
};

/// Remote controller for the plugin
///
/// Wraps the message-based communication with the plugin
/// into asynchronous functions.
#[derive(Debug, Clone)]
pub struct Controller {
    message_tx: MessageSender,
}

impl Controller {
    #[must_use]
    pub const fn new(message_tx: MessageSender) -> Self {
        Self { message_tx }
    }

    pub async fn command_update_diagnostics(
        &self,
        state: DiagnosticsState,
    ) -> PluginResult<Reconciliation> {
        let (reply_tx, reply_rx) = reply_channel();
        let command = Command::UpdateDiagnostics(reply_tx, state);
        send_message_receive_result(command, &self.message_tx, reply_rx).await
    }

    pub async fn command_dismiss_banner(
        &self,
        kind: DiagnosticKind,
    ) -> PluginResult<BannerTransition> {
        let (reply_tx, reply_rx) = reply_channel();
        let command = Command::DismissBanner(reply_tx, kind);
        send_message_receive_result(command, &self.message_tx, reply_rx).await
    }

    pub async fn command_replace_config(&self, new_config: Config) -> PluginResult<Config> {
        let (reply_tx, reply_rx) = reply_channel();
        let command = Command::ReplaceConfig(reply_tx, new_config);
        send_message_receive_result(command, &self.message_tx, reply_rx).await
    }

    pub async fn command_shutdown(&self) -> PluginResult<()> {
        let (reply_tx, reply_rx) = reply_channel();
        let command = Command::Shutdown(reply_tx);
        send_message_receive_result(command, &self.message_tx, reply_rx).await
    }

    pub async fn query_config(&self) -> PluginResult<Config> {
        let (reply_tx, reply_rx) = reply_channel();
        let query = Query::Config(reply_tx);
        send_message_receive_result(query, &self.message_tx, reply_rx).await
    }

    pub async fn query_status(&self) -> PluginResult<Status> {
        let (reply_tx, reply_rx) = reply_channel();
        let query = Query::Status(reply_tx);
        send_message_receive_result(query, &self.message_tx, reply_rx).await
    }

    /// Subscribe to the observable toast slot and banner stack
    pub async fn query_surfaces(&self) -> PluginResult<Surfaces> {
        let (reply_tx, reply_rx) = reply_channel();
        let query = Query::Surfaces(reply_tx);
        send_message_receive_result(query, &self.message_tx, reply_rx).await
    }
}
