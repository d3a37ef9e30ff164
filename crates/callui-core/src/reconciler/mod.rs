//! Reconciliation of diagnostic updates with the UI surfaces
use std::{
    fmt,
    time::{Duration, Instant},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    banner::{BannerEntry, BannerStack, BannerTransition},
    classification::{ClassificationTable, Route, Surface},
    diagnostic::{DiagnosticEvent, DiagnosticKind, DiagnosticsState},
    localization::Localize,
    time::SystemTimeInstant,
    toast::{ToastEntry, ToastGeneration, ToastReconciler, ToastTransition},
    Error, Result,
};

pub const DEFAULT_TOAST_DISMISS_INTERVAL: Duration = Duration::from_secs(10);

pub const MAX_TOAST_DISMISS_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Config {
    pub toast_dismiss_interval: Duration,
    pub classification: ClassificationTable,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.toast_dismiss_interval.is_zero() {
            return Err(Error::ZeroDismissInterval);
        }
        if self.toast_dismiss_interval > MAX_TOAST_DISMISS_INTERVAL {
            return Err(Error::DismissIntervalTooLarge(self.toast_dismiss_interval));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toast_dismiss_interval: DEFAULT_TOAST_DISMISS_INTERVAL,
            classification: Default::default(),
        }
    }
}

/// The effect of a single update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Empty update or unclassified kind
    Ignored,
    Toast(ToastTransition),
    Banner(BannerTransition),
}

impl Reconciliation {
    /// Whether any observable surface changed
    #[must_use]
    pub const fn is_effective(&self) -> bool {
        match self {
            Self::Ignored => false,
            Self::Toast(transition) => !transition.is_unchanged(),
            Self::Banner(transition) => !transition.is_unchanged(),
        }
    }
}

/// Outcome of switching the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigReplacement {
    pub old_config: Config,

    /// Cleared if the kind of the current toast is no longer a toast kind
    pub toast: ToastTransition,

    /// Banners of kinds that are no longer banner kinds
    pub removed_banners: Vec<BannerEntry>,
}

impl ConfigReplacement {
    fn unchanged(old_config: Config) -> Self {
        Self {
            old_config,
            toast: ToastTransition::Unchanged,
            removed_banners: Vec::new(),
        }
    }

    /// Whether any observable surface changed
    #[must_use]
    pub fn is_effective(&self) -> bool {
        !self.toast.is_unchanged() || !self.removed_banners.is_empty()
    }
}

/// Owns both UI surfaces and applies updates strictly in the
/// order they are received
pub struct DiagnosticsReconciler {
    config: Config,
    localization: Box<dyn Localize + Send>,
    toast: ToastReconciler,
    banners: BannerStack,
}

impl fmt::Debug for DiagnosticsReconciler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticsReconciler")
            .field("config", &self.config)
            .field("toast", &self.toast)
            .field("banners", &self.banners)
            .finish_non_exhaustive()
    }
}

impl DiagnosticsReconciler {
    pub fn try_new(config: Config, localization: Box<dyn Localize + Send>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            localization,
            toast: ToastReconciler::new(),
            banners: BannerStack::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn toast(&self) -> Option<&ToastEntry> {
        self.toast.current()
    }

    #[must_use]
    pub fn toast_deadline(&self) -> Option<(ToastGeneration, Instant)> {
        self.toast.deadline()
    }

    #[must_use]
    pub fn banners(&self) -> &[BannerEntry] {
        self.banners.entries()
    }

    /// Process the highest priority diagnostic of an update record
    pub fn update(&mut self, state: &DiagnosticsState, now: SystemTimeInstant) -> Reconciliation {
        match state.event() {
            Some(event) => self.apply(&event, now),
            None => {
                log::trace!("Ignoring empty diagnostics update");
                Reconciliation::Ignored
            }
        }
    }

    pub fn apply(&mut self, event: &DiagnosticEvent, now: SystemTimeInstant) -> Reconciliation {
        match self.config.classification.classify(event) {
            Route::Toast {
                kind,
                bad_state: true,
            } => {
                let text = self.localization.localize_kind(kind);
                Reconciliation::Toast(self.toast.show(
                    kind,
                    text,
                    now,
                    self.config.toast_dismiss_interval,
                ))
            }
            Route::Toast {
                kind,
                bad_state: false,
            } => Reconciliation::Toast(self.toast.recover(kind)),
            Route::Banner { kind, value } => {
                let localization = &self.localization;
                Reconciliation::Banner(
                    self.banners
                        .upsert(kind, value, || localization.localize_kind(kind)),
                )
            }
            Route::Ignore => {
                log::trace!("Ignoring unclassified diagnostic {}", event.kind());
                Reconciliation::Ignored
            }
        }
    }

    /// Remove a banner on request of the presentation layer
    pub fn dismiss(&mut self, kind: DiagnosticKind) -> BannerTransition {
        self.banners.dismiss(kind)
    }

    pub fn expire_toast(&mut self, generation: ToastGeneration) -> ToastTransition {
        self.toast.expire(generation)
    }

    /// For hosts that poll instead of arming a timer
    pub fn expire_due(&mut self, now: Instant) -> ToastTransition {
        self.toast.expire_due(now)
    }

    /// Switch the current configuration
    ///
    /// Visible entries whose kind is still assigned to the same surface
    /// are kept and a pending dismiss deadline is not rescheduled. All
    /// other entries are withdrawn.
    pub fn replace_config(&mut self, new_config: Config) -> Result<ConfigReplacement> {
        new_config.validate()?;
        if self.config == new_config {
            return Ok(ConfigReplacement::unchanged(new_config));
        }
        log::debug!("Replacing config: {:?} -> {:?}", self.config, new_config);
        let old_config = std::mem::replace(&mut self.config, new_config);
        let classification = &self.config.classification;
        let toast = match self.toast.current().map(|entry| entry.kind) {
            Some(kind) if classification.surface(kind) != Surface::Toast => {
                self.toast.withdraw()
            }
            _ => ToastTransition::Unchanged,
        };
        let removed_banners = self
            .banners
            .retain_kinds(|kind| classification.surface(kind) == Surface::Banner);
        Ok(ConfigReplacement {
            old_config,
            toast,
            removed_banners,
        })
    }
}

#[cfg(test)]
mod tests;
