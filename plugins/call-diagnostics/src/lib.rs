// FIXME: Enable `deny(missing_docs)` before release
//#![deny(missing_docs)]

#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::explicit_deref_methods)]
#![warn(clippy::explicit_into_iter_loop)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::must_use_candidate)]
#![warn(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(test), deny(clippy::panic_in_result_fn))]
#![cfg_attr(not(debug_assertions), deny(clippy::used_underscore_binding))]

use thiserror::Error;

use callui_core::{DefaultLocalization, Localize};

pub mod api;

mod internal;
use self::internal::message_loop::create_message_loop;

pub const DEFAULT_EVENT_PUBLISHER_ID: &str = "callui.plugin.call-diagnostics";

pub type EventPublisherId = String;

#[derive(Debug, Clone)]
pub struct Environment {
    pub event_publisher_id: EventPublisherId,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            event_publisher_id: DEFAULT_EVENT_PUBLISHER_ID.to_owned(),
        }
    }
}

#[must_use]
pub fn default_config() -> api::Config {
    api::Config::default()
}

#[allow(missing_debug_implementations)]
pub struct PluginSetup {
    pub initial_config: api::Config,

    /// Resolves the display texts of toasts and banners
    pub localization: Box<dyn Localize + Send>,
}

impl Default for PluginSetup {
    fn default() -> Self {
        Self {
            initial_config: default_config(),
            localization: Box::new(DefaultLocalization),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] callui_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub type PluginError = callui_plugin::PluginError<Error>;
pub type PluginResult<T> = callui_plugin::PluginResult<T, Error>;

pub type MessageSender = callui_plugin::MessageSender<api::Message>;
pub type MessageReceiver = callui_plugin::MessageReceiver<api::Message>;

pub type ResultSender<T> = callui_plugin::ResultSender<T, Error>;
pub type ResultReceiver<T> = callui_plugin::ResultReceiver<T, Error>;

pub type PublishedEvent = callui_plugin::PublishedEvent<EventPublisherId, api::Event>;
pub type EventReceiver = callui_plugin::EventReceiver<EventPublisherId, api::Event>;
type EventPubSub = callui_plugin::EventPubSub<EventPublisherId, api::Event>;

pub type Plugin = callui_plugin::PluginContainer<api::Message, EventPublisherId, api::Event>;
pub type PluginPorts = callui_plugin::PluginPorts<api::Message, EventPublisherId, api::Event>;

pub fn create_plugin(
    environment: Environment,
    plugin_setup: PluginSetup,
    event_channel_capacity: usize,
) -> Result<Plugin> {
    let Environment { event_publisher_id } = environment;
    let PluginSetup {
        initial_config,
        localization,
    } = plugin_setup;
    let (event_pubsub, event_subscriber) =
        EventPubSub::new(event_publisher_id, event_channel_capacity);
    let (message_loop, message_tx) =
        create_message_loop(event_pubsub, initial_config, localization)?;
    Ok(Plugin {
        ports: PluginPorts {
            message_tx,
            event_subscriber,
        },
        message_loop,
    })
}
