use std::future;

use tokio::time::{self, Instant};

use callui_core::{Localize, ToastGeneration};
use callui_plugin::{message_channel, MessageLoop};

use crate::{
    api::{event::LifecycleEvent, Command, Config, Event, Message, Query},
    EventPubSub, MessageSender, Result,
};

use super::{context::Context, invoke_context_from_message_loop};

/// Resolves when the dismiss deadline of the current toast is reached
///
/// Never resolves if no toast is shown. The future is recreated for
/// every iteration of the message loop, i.e. a replaced toast drops
/// the pending timer before a new one is armed.
async fn toast_timer(deadline: Option<(ToastGeneration, Instant)>) -> ToastGeneration {
    match deadline {
        Some((generation, expires_at)) => {
            time::sleep_until(expires_at).await;
            generation
        }
        None => future::pending().await,
    }
}

pub(crate) fn create_message_loop(
    event_pubsub: EventPubSub,
    initial_config: Config,
    localization: Box<dyn Localize + Send>,
) -> Result<(MessageLoop, MessageSender)> {
    let (message_tx, mut message_rx) = message_channel();
    let mut context = Context::try_new(initial_config, localization)?;
    let message_loop = async move {
        let mut exit_message_loop = false;
        log::info!("Starting message loop");
        event_pubsub.publish_event(Event::Lifecycle(LifecycleEvent::Started));
        loop {
            let toast_deadline = context.toast_deadline();
            let msg = tokio::select! {
                msg = message_rx.recv() => msg,
                generation = toast_timer(toast_deadline) => {
                    log::debug!("Toast timer {} elapsed", generation);
                    invoke_context_from_message_loop::toast_timer_elapsed(
                        &mut context,
                        &event_pubsub,
                        generation,
                    );
                    continue;
                }
            };
            let Some(msg) = msg else {
                log::info!("Message channel closed");
                break;
            };
            match msg {
                Message::Command(command) => {
                    log::trace!("Received command {:?}", command);
                    match command {
                        Command::UpdateDiagnostics(reply_tx, state) => {
                            invoke_context_from_message_loop::command_update_diagnostics(
                                &mut context,
                                &event_pubsub,
                                reply_tx,
                                state,
                            );
                        }
                        Command::DismissBanner(reply_tx, kind) => {
                            invoke_context_from_message_loop::command_dismiss_banner(
                                &mut context,
                                &event_pubsub,
                                reply_tx,
                                kind,
                            );
                        }
                        Command::ReplaceConfig(reply_tx, new_config) => {
                            invoke_context_from_message_loop::command_replace_config(
                                &mut context,
                                &event_pubsub,
                                reply_tx,
                                new_config,
                            );
                        }
                        Command::Shutdown(reply_tx) => {
                            invoke_context_from_message_loop::command_shutdown(
                                &mut context,
                                reply_tx,
                            );
                            exit_message_loop = true;
                        }
                    }
                }
                Message::Query(query) => {
                    log::debug!("Received query {:?}", query);
                    match query {
                        Query::Config(reply_tx) => {
                            invoke_context_from_message_loop::query_config(&context, reply_tx);
                        }
                        Query::Status(reply_tx) => {
                            invoke_context_from_message_loop::query_status(&context, reply_tx);
                        }
                        Query::Surfaces(reply_tx) => {
                            invoke_context_from_message_loop::query_surfaces(&context, reply_tx);
                        }
                    }
                }
            }
            if exit_message_loop {
                log::info!("Exiting message loop");
                break;
            }
        }
        log::info!("Message loop terminated");
        event_pubsub.publish_event(Event::Lifecycle(LifecycleEvent::Stopped));
    };
    Ok((Box::pin(message_loop), message_tx))
}
