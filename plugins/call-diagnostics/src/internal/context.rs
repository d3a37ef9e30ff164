use callui_core::{
    BannerEntry, BannerTransition, Config, ConfigReplacement, DiagnosticKind, DiagnosticsReconciler, DiagnosticsState,
    Localize, Reconciliation, SystemTimeInstant, ToastEntry, ToastGeneration, ToastTransition,
};
use callui_plugin::{ObservablePublisher, ObservableReceiver};
use tokio::time::Instant;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub toast: Option<ToastEntry>,
    pub banners: Vec<BannerEntry>,
}

/// Observable surfaces for the presentation layer
///
/// Each receiver always holds the latest value.
#[derive(Debug, Clone)]
pub struct Surfaces {
    pub toast: ObservableReceiver<Option<ToastEntry>>,
    pub banners: ObservableReceiver<Vec<BannerEntry>>,
}

#[derive(Debug)]
pub(crate) struct Context {
    reconciler: DiagnosticsReconciler,
    toast_publisher: ObservablePublisher<Option<ToastEntry>>,
    banners_publisher: ObservablePublisher<Vec<BannerEntry>>,
}

/// Anchor the runtime clock which might be paused or simulated
fn now() -> SystemTimeInstant {
    SystemTimeInstant::anchor(Instant::now().into_std())
}

impl Context {
    pub(crate) fn try_new(
        initial_config: Config,
        localization: Box<dyn Localize + Send>,
    ) -> Result<Self> {
        let reconciler = DiagnosticsReconciler::try_new(initial_config, localization)?;
        Ok(Self {
            reconciler,
            toast_publisher: ObservablePublisher::new(None),
            banners_publisher: ObservablePublisher::new(Vec::new()),
        })
    }

    pub(crate) fn config(&self) -> &Config {
        self.reconciler.config()
    }

    pub(crate) fn status(&self) -> Status {
        Status {
            toast: self.reconciler.toast().cloned(),
            banners: self.reconciler.banners().to_vec(),
        }
    }

    pub(crate) fn surfaces(&self) -> Surfaces {
        Surfaces {
            toast: self.toast_publisher.subscribe(),
            banners: self.banners_publisher.subscribe(),
        }
    }

    /// Generation and deadline of the pending dismiss timer
    pub(crate) fn toast_deadline(&self) -> Option<(ToastGeneration, Instant)> {
        self.reconciler
            .toast_deadline()
            .map(|(generation, expires_at)| (generation, Instant::from_std(expires_at)))
    }

    pub(crate) fn update_diagnostics(&mut self, state: &DiagnosticsState) -> Reconciliation {
        let reconciliation = self.reconciler.update(state, now());
        match &reconciliation {
            Reconciliation::Toast(transition) if !transition.is_unchanged() => {
                self.publish_toast();
            }
            Reconciliation::Banner(transition) if !transition.is_unchanged() => {
                self.publish_banners();
            }
            _ => (),
        }
        reconciliation
    }

    pub(crate) fn dismiss_banner(&mut self, kind: DiagnosticKind) -> BannerTransition {
        let transition = self.reconciler.dismiss(kind);
        if !transition.is_unchanged() {
            self.publish_banners();
        }
        transition
    }

    pub(crate) fn expire_toast(&mut self, generation: ToastGeneration) -> ToastTransition {
        let transition = self.reconciler.expire_toast(generation);
        if !transition.is_unchanged() {
            self.publish_toast();
        }
        transition
    }

    /// Switch the current configuration
    ///
    /// Entries that have been withdrawn are published immediately.
    pub(crate) fn replace_config(&mut self, new_config: Config) -> Result<ConfigReplacement> {
        let replacement = self.reconciler.replace_config(new_config)?;
        if !replacement.toast.is_unchanged() {
            self.publish_toast();
        }
        if !replacement.removed_banners.is_empty() {
            self.publish_banners();
        }
        Ok(replacement)
    }

    fn publish_toast(&self) {
        self.toast_publisher
            .publish(self.reconciler.toast().cloned());
    }

    fn publish_banners(&self) {
        self.banners_publisher
            .publish(self.reconciler.banners().to_vec());
    }
}
