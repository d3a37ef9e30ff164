use callui_core::{DiagnosticKind, DiagnosticsState, ToastGeneration};
use callui_plugin::send_reply;

use crate::{
    api::{
        event::{LifecycleEvent, NotificationEvent},
        BannerTransition, Config, Event, Reconciliation, Status, Surfaces, ToastTransition,
    },
    EventPubSub, ResultSender,
};

use super::context::Context;

fn publish_toast_transition(event_pubsub: &EventPubSub, transition: &ToastTransition) {
    let event = match transition {
        ToastTransition::Shown { entry, .. } => NotificationEvent::ToastShown(entry.clone()),
        ToastTransition::Cleared { entry, reason } => NotificationEvent::ToastCleared {
            kind: entry.kind,
            reason: *reason,
        },
        ToastTransition::Unchanged => return,
    };
    event_pubsub.publish_event(Event::Notification(event));
}

fn publish_banner_transition(
    context: &Context,
    event_pubsub: &EventPubSub,
    transition: &BannerTransition,
) {
    if transition.is_unchanged() {
        return;
    }
    let event = NotificationEvent::BannerStackChanged(context.status().banners);
    event_pubsub.publish_event(Event::Notification(event));
}

pub(crate) fn command_update_diagnostics(
    context: &mut Context,
    event_pubsub: &EventPubSub,
    reply_tx: ResultSender<Reconciliation>,
    state: DiagnosticsState,
) {
    let reconciliation = context.update_diagnostics(&state);
    match &reconciliation {
        Reconciliation::Toast(transition) => {
            publish_toast_transition(event_pubsub, transition);
        }
        Reconciliation::Banner(transition) => {
            publish_banner_transition(context, event_pubsub, transition);
        }
        Reconciliation::Ignored => (),
    }
    send_reply(reply_tx, Ok(reconciliation));
}

pub(crate) fn command_dismiss_banner(
    context: &mut Context,
    event_pubsub: &EventPubSub,
    reply_tx: ResultSender<BannerTransition>,
    kind: DiagnosticKind,
) {
    let transition = context.dismiss_banner(kind);
    publish_banner_transition(context, event_pubsub, &transition);
    send_reply(reply_tx, Ok(transition));
}

pub(crate) fn command_replace_config(
    context: &mut Context,
    event_pubsub: &EventPubSub,
    reply_tx: ResultSender<Config>,
    new_config: Config,
) {
    let replacement = match context.replace_config(new_config.clone()) {
        Ok(replacement) => replacement,
        Err(err) => {
            log::warn!("Failed to replace configuration: {}", err);
            send_reply(reply_tx, Err(err));
            return;
        }
    };
    let event = Event::Lifecycle(LifecycleEvent::ConfigChanged(new_config));
    event_pubsub.publish_event(event);
    publish_toast_transition(event_pubsub, &replacement.toast);
    if !replacement.removed_banners.is_empty() {
        let event = NotificationEvent::BannerStackChanged(context.status().banners);
        event_pubsub.publish_event(Event::Notification(event));
    }
    send_reply(reply_tx, Ok(replacement.old_config));
}

pub(crate) fn command_shutdown(_context: &mut Context, reply_tx: ResultSender<()>) {
    send_reply(reply_tx, Ok(()));
}

pub(crate) fn query_config(context: &Context, reply_tx: ResultSender<Config>) {
    send_reply(reply_tx, Ok(context.config().to_owned()));
}

pub(crate) fn query_status(context: &Context, reply_tx: ResultSender<Status>) {
    send_reply(reply_tx, Ok(context.status()));
}

pub(crate) fn query_surfaces(context: &Context, reply_tx: ResultSender<Surfaces>) {
    send_reply(reply_tx, Ok(context.surfaces()));
}

pub(crate) fn toast_timer_elapsed(
    context: &mut Context,
    event_pubsub: &EventPubSub,
    generation: ToastGeneration,
) {
    let transition = context.expire_toast(generation);
    publish_toast_transition(event_pubsub, &transition);
}
