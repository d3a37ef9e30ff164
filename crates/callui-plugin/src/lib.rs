// FIXME: Enable `deny(missing_docs)` before release
//#![deny(missing_docs)]

#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::must_use_candidate)]
#![warn(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(test), deny(clippy::panic_in_result_fn))]

use std::{error::Error as StdError, fmt, future::Future, pin::Pin, time::SystemTime};

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot, watch};

// ------ -------
//  Plugin shape
// ------ -------

#[allow(missing_debug_implementations)]
pub struct PluginContainer<M, P, E> {
    pub ports: PluginPorts<M, P, E>,
    pub message_loop: MessageLoop,
}

pub type MessageLoop = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

#[allow(missing_debug_implementations)]
pub struct PluginPorts<M, P, E> {
    pub message_tx: MessageSender<M>,
    pub event_subscriber: EventSubscriber<P, E>,
}

#[derive(Error, Debug)]
pub enum PluginError<E: StdError> {
    #[error("communication error")]
    Communication,

    #[error("internal error: {0}")]
    Internal(E),
}

pub type PluginResult<T, E> = Result<T, PluginError<E>>;

// ------ -------
//   Messages
// ------ -------

// TODO: Use bounded channels for backpressure?
pub type MessageSender<T> = mpsc::UnboundedSender<T>;
pub type MessageReceiver<T> = mpsc::UnboundedReceiver<T>;

#[must_use]
pub fn message_channel<T>() -> (MessageSender<T>, MessageReceiver<T>) {
    mpsc::unbounded_channel()
}

pub fn send_message<M, E>(
    message: impl Into<M>,
    message_tx: &MessageSender<M>,
) -> PluginResult<(), E>
where
    M: fmt::Debug,
    E: StdError,
{
    let message = message.into();
    log::trace!("Sending message {:?}", message);
    message_tx.send(message).map_err(|send_error| {
        log::error!("Unexpected send error: {:?}", send_error);
        PluginError::Communication
    })
}

// ------ -------
// Reply messages
// ------ -------

pub type ReplySender<T> = oneshot::Sender<T>;
pub type ReplyReceiver<T> = oneshot::Receiver<T>;

#[must_use]
pub fn reply_channel<T>() -> (ReplySender<T>, ReplyReceiver<T>) {
    oneshot::channel()
}

pub type ResultSender<T, E> = ReplySender<Result<T, E>>;
pub type ResultReceiver<T, E> = ReplyReceiver<Result<T, E>>;

pub fn send_reply<R>(reply_tx: ReplySender<R>, reply: impl Into<R>)
where
    R: fmt::Debug,
{
    if let Err(reply) = reply_tx.send(reply.into()) {
        // Not an error, the receiver may have been dropped intentionally
        log::info!("Reply receiver has been dropped: {:?}", reply);
    }
}

pub async fn receive_reply<R, E>(reply_rx: ReplyReceiver<R>) -> PluginResult<R, E>
where
    E: StdError,
{
    reply_rx.await.map_err(|receive_error| {
        log::error!("No reply received: {}", receive_error);
        PluginError::Communication
    })
}

pub async fn receive_result<T, E>(result_rx: ResultReceiver<T, E>) -> PluginResult<T, E>
where
    E: StdError,
{
    receive_reply(result_rx).await?.map_err(PluginError::Internal)
}

pub async fn send_message_receive_result<M, T, E>(
    message: impl Into<M>,
    message_tx: &MessageSender<M>,
    result_rx: ResultReceiver<T, E>,
) -> PluginResult<T, E>
where
    M: fmt::Debug,
    E: StdError,
{
    send_message(message, message_tx)?;
    receive_result(result_rx).await
}

// ------ -------
//  Observables
// ------ -------

/// Latest-value slot that is observed by the presentation layer
///
/// Only the owner of the publisher is able to modify the value.
#[derive(Debug)]
pub struct ObservablePublisher<T> {
    sender: watch::Sender<T>,
}

pub type ObservableReceiver<T> = watch::Receiver<T>;

impl<T> ObservablePublisher<T> {
    #[must_use]
    pub fn new(initial_value: T) -> Self {
        let (sender, _) = watch::channel(initial_value);
        Self { sender }
    }

    #[must_use]
    pub fn subscribe(&self) -> ObservableReceiver<T> {
        self.sender.subscribe()
    }

    /// Replace the current value and notify all observers
    ///
    /// The value is stored even if no observer is subscribed.
    pub fn publish(&self, value: T) {
        self.sender.send_replace(value);
    }
}

// ----- ------
//    Events
// ----- ------

#[derive(Debug, Clone)]
pub struct PublishedEvent<P, T> {
    pub publisher: P,
    pub published_at: SystemTime,
    pub payload: T,
}

pub type EventSender<P, T> = broadcast::Sender<PublishedEvent<P, T>>;
pub type EventReceiver<P, T> = broadcast::Receiver<PublishedEvent<P, T>>;

/// Subscribes to published events without being able to publish
///
/// Every held subscriber keeps the event channel open.
#[derive(Debug, Clone)]
pub struct EventSubscriber<P, T> {
    event_tx: EventSender<P, T>,
}

impl<P, T> EventSubscriber<P, T> {
    #[must_use]
    pub fn subscribe(&self) -> EventReceiver<P, T> {
        self.event_tx.subscribe()
    }
}

#[must_use]
pub fn event_channel<P, T>(channel_capacity: usize) -> (EventSender<P, T>, EventSubscriber<P, T>)
where
    P: Clone,
    T: Clone,
{
    let (event_tx, _) = broadcast::channel(channel_capacity);
    let subscriber = EventSubscriber {
        event_tx: event_tx.clone(),
    };
    (event_tx, subscriber)
}

#[derive(Debug, Clone)]
pub struct EventPubSub<P, E> {
    publisher: P,
    event_tx: EventSender<P, E>,
}

impl<P, T> EventPubSub<P, T>
where
    P: fmt::Debug + Clone,
    T: fmt::Debug + Clone,
{
    pub fn new(publisher: impl Into<P>, channel_capacity: usize) -> (Self, EventSubscriber<P, T>) {
        let (event_tx, event_subscriber) = event_channel(channel_capacity);
        (
            Self {
                event_tx,
                publisher: publisher.into(),
            },
            event_subscriber,
        )
    }

    pub fn publish_event(&self, payload: T) {
        let event = PublishedEvent {
            publisher: self.publisher.clone(),
            published_at: SystemTime::now(),
            payload,
        };
        self.dispatch_event(event);
    }
}

pub trait EventDispatcher<E> {
    fn dispatch_event(&self, event: E);
}

impl<P, T> EventDispatcher<PublishedEvent<P, T>> for EventPubSub<P, T>
where
    P: fmt::Debug + Clone,
    T: fmt::Debug + Clone,
{
    fn dispatch_event(&self, event: PublishedEvent<P, T>) {
        if let Err(event) = self.event_tx.send(event) {
            // Ignore all send errors that are expected if no subscribers
            // are connected.
            log::debug!("No subscribers for published event {:?}", event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("failed")]
    struct Failed;

    #[tokio::test]
    async fn receive_result_of_dropped_reply_sender() {
        let (reply_tx, reply_rx) = reply_channel::<Result<(), Failed>>();
        drop(reply_tx);
        assert!(matches!(
            receive_result(reply_rx).await,
            Err(PluginError::Communication)
        ));
    }

    #[tokio::test]
    async fn receive_internal_error() {
        let (reply_tx, reply_rx) = reply_channel::<Result<(), Failed>>();
        send_reply(reply_tx, Err(Failed));
        assert!(matches!(
            receive_result(reply_rx).await,
            Err(PluginError::Internal(Failed))
        ));
    }

    #[test]
    fn send_message_to_closed_channel() {
        let (message_tx, message_rx) = message_channel::<()>();
        drop(message_rx);
        assert!(matches!(
            send_message::<(), Failed>((), &message_tx),
            Err(PluginError::Communication)
        ));
    }

    #[test]
    fn publish_event_without_subscribers() {
        let (event_pubsub, event_subscriber) = EventPubSub::<&str, u8>::new("test", 1);
        event_pubsub.publish_event(1);
        let mut event_rx = event_subscriber.subscribe();
        event_pubsub.publish_event(2);
        let event = event_rx.try_recv().unwrap();
        assert_eq!("test", event.publisher);
        assert_eq!(2, event.payload);
    }

    #[test]
    fn observe_latest_value() {
        let publisher = ObservablePublisher::new(0);
        publisher.publish(1);
        let mut receiver = publisher.subscribe();
        assert_eq!(1, *receiver.borrow_and_update());
        publisher.publish(2);
        publisher.publish(3);
        assert!(receiver.has_changed().unwrap());
        assert_eq!(3, *receiver.borrow_and_update());
    }
}
