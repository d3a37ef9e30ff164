use std::time::Duration;

use anyhow::Result;
use tokio::{
    sync::{broadcast, mpsc},
    time,
};

use callui::{
    call_diagnostics::{
        api::{event::NotificationEvent, Controller, Event},
        create_plugin, Environment, PluginSetup,
    },
    core::{
        DiagnosticsState, MediaDiagnosticKind, NetworkDiagnosticKind, NetworkQuality,
        NetworkQualityDiagnosticKind,
    },
};

/// Diagnostics as a calling SDK might report them, with the delay
/// before each update
fn script() -> Vec<(Duration, DiagnosticsState)> {
    vec![
        (
            Duration::ZERO,
            DiagnosticsState::network(NetworkDiagnosticKind::NetworkUnavailable, true),
        ),
        (
            Duration::from_secs(1),
            DiagnosticsState::network(NetworkDiagnosticKind::NetworkRelaysUnreachable, true),
        ),
        (
            Duration::from_secs(1),
            DiagnosticsState::media(MediaDiagnosticKind::CameraFrozen, true),
        ),
        (
            Duration::from_secs(1),
            DiagnosticsState::media(MediaDiagnosticKind::NoMicrophoneDevicesAvailable, true),
        ),
        (
            Duration::from_secs(2),
            DiagnosticsState::media(MediaDiagnosticKind::CameraFrozen, false),
        ),
        (
            Duration::from_secs(10),
            DiagnosticsState::network_quality(
                NetworkQualityDiagnosticKind::NetworkReconnectionQuality,
                NetworkQuality::Poor,
            ),
        ),
        (
            Duration::from_secs(2),
            DiagnosticsState::network_quality(
                NetworkQualityDiagnosticKind::NetworkReconnectionQuality,
                NetworkQuality::Good,
            ),
        ),
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();
    log::info!("Starting scripted call diagnostics example");

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let plugin = create_plugin(Environment::default(), PluginSetup::default(), 100)?;
    let mut event_rx = plugin.ports.event_subscriber.subscribe();
    // The subscriber keeps the event channel open
    drop(plugin.ports.event_subscriber);
    let controller = Controller::new(plugin.ports.message_tx);

    // Print all surface changes in the order they are published
    let observer = tokio::spawn(async move {
        while let Ok(event) = event_rx.recv().await {
            match event.payload {
                Event::Notification(NotificationEvent::ToastShown(entry)) => {
                    log::info!("Toast: {}", entry.text);
                }
                Event::Notification(NotificationEvent::ToastCleared { kind, reason }) => {
                    log::info!("Toast {} cleared ({:?})", kind, reason);
                }
                Event::Notification(NotificationEvent::BannerStackChanged(banners)) => {
                    let texts: Vec<_> = banners.iter().map(|banner| banner.text.as_str()).collect();
                    log::info!("Banners: {:?}", texts);
                }
                Event::Lifecycle(lifecycle) => {
                    log::debug!("Lifecycle: {:?}", lifecycle);
                }
            }
        }
    });
    let message_loop = tokio::spawn(plugin.message_loop);

    let (update_tx, update_rx) = mpsc::channel(16);
    let source = tokio::spawn(async move {
        for (delay, state) in script() {
            time::sleep(delay).await;
            if update_tx.send(state).await.is_err() {
                log::warn!("The diagnostics channel was closed");
                return;
            }
        }
        // Let the last toast expire before finishing
        time::sleep(Duration::from_secs(11)).await;
    });

    let mediator = spawn_mediator(controller.clone(), update_rx, shutdown_rx);

    tokio::select! {
      _ = tokio::signal::ctrl_c() => {
        log::debug!("received CTRL+C");
        shutdown_tx.send(())?;
      }
      _ = source => {
        log::info!("Script finished");
      }
    }
    drop(shutdown_tx);
    mediator.await?;

    let status = controller.query_status().await?;
    log::info!(
        "Final status: toast = {:?}, banners = {}",
        status.toast.map(|entry| entry.kind),
        status.banners.len()
    );
    controller.command_shutdown().await?;
    message_loop.await?;
    observer.await?;
    log::info!("Terminating scripted call diagnostics example");
    Ok(())
}

/// Forward updates from the diagnostics source into the plugin
fn spawn_mediator(
    controller: Controller,
    mut update_rx: mpsc::Receiver<DiagnosticsState>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
              Some(state) = update_rx.recv() => {
                if let Err(err) = controller.command_update_diagnostics(state).await {
                    log::warn!("Failed to update diagnostics: {}", err);
                    return;
                }
              }
              _ = shutdown_rx.recv() => {
                  return;
              }
              else => return,
            }
        }
    })
}
