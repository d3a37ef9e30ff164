//! Single-slot transient toast
//!
//! At most one toast is visible at any time. A new bad state always
//! replaces the current toast and restarts the dismiss timer. Every
//! toast is tagged with a fresh [`ToastGeneration`] so that a timer
//! that was armed for a replaced toast can be recognized and ignored
//! when it fires late.
use std::{
    fmt,
    time::{Duration, Instant, SystemTime},
};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{diagnostic::DiagnosticKind, time::SystemTimeInstant};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ToastEntry {
    pub kind: DiagnosticKind,
    pub text: String,
    pub created_at: SystemTime,
}

/// Identifies a single showing period of the toast
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ToastGeneration(u64);

impl ToastGeneration {
    #[must_use]
    pub const fn to_inner(self) -> u64 {
        self.0
    }

    #[must_use]
    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for ToastGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ClearReason {
    /// The diagnostic returned to a good state
    Recovered,

    /// The dismiss interval elapsed
    Expired,

    /// The kind is no longer shown as a toast
    Reclassified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastTransition {
    Shown {
        entry: ToastEntry,
        generation: ToastGeneration,
        replaced: Option<ToastEntry>,
    },
    Cleared {
        entry: ToastEntry,
        reason: ClearReason,
    },
    Unchanged,
}

impl ToastTransition {
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

#[derive(Debug, Clone)]
struct ShowingToast {
    entry: ToastEntry,
    generation: ToastGeneration,
    /// `None` if the deadline is not representable
    expires_at: Option<Instant>,
}

#[derive(Debug, Default)]
pub struct ToastReconciler {
    showing: Option<ShowingToast>,
    last_generation: ToastGeneration,
}

impl ToastReconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<&ToastEntry> {
        self.showing.as_ref().map(|showing| &showing.entry)
    }

    /// Generation and deadline of the pending dismiss timer
    #[must_use]
    pub fn deadline(&self) -> Option<(ToastGeneration, Instant)> {
        let showing = self.showing.as_ref()?;
        showing
            .expires_at
            .map(|expires_at| (showing.generation, expires_at))
    }

    /// Show a toast for a bad state, replacing any current toast
    pub fn show(
        &mut self,
        kind: DiagnosticKind,
        text: String,
        now: SystemTimeInstant,
        dismiss_interval: Duration,
    ) -> ToastTransition {
        let generation = self.last_generation.next();
        self.last_generation = generation;
        let expires_at = now.instant().checked_add(dismiss_interval);
        if expires_at.is_none() {
            log::warn!(
                "Toast {} {} will not expire after {:?}",
                kind,
                generation,
                dismiss_interval
            );
        }
        let entry = ToastEntry {
            kind,
            text,
            created_at: now.system_time(),
        };
        let replaced = self
            .showing
            .replace(ShowingToast {
                entry: entry.clone(),
                generation,
                expires_at,
            })
            .map(|showing| {
                log::debug!(
                    "Replacing toast {} {} with {} {}",
                    showing.entry.kind,
                    showing.generation,
                    kind,
                    generation
                );
                showing.entry
            });
        if replaced.is_none() {
            log::debug!("Showing toast {} {}", kind, generation);
        }
        ToastTransition::Shown {
            entry,
            generation,
            replaced,
        }
    }

    /// Dismiss the toast after a good state, but only if it shows
    /// the same kind
    pub fn recover(&mut self, kind: DiagnosticKind) -> ToastTransition {
        let Some(shown_kind) = self.current().map(|entry| entry.kind) else {
            return ToastTransition::Unchanged;
        };
        if shown_kind != kind {
            log::trace!("Keeping toast {} after recovery of {}", shown_kind, kind);
            return ToastTransition::Unchanged;
        }
        self.clear(ClearReason::Recovered)
    }

    /// Dismiss the toast whatever kind it shows
    pub fn withdraw(&mut self) -> ToastTransition {
        self.clear(ClearReason::Reclassified)
    }

    /// Dismiss timer callback
    ///
    /// Ignored unless the generation is still the current one.
    pub fn expire(&mut self, generation: ToastGeneration) -> ToastTransition {
        let is_current = self
            .showing
            .as_ref()
            .map_or(false, |showing| showing.generation == generation);
        if !is_current {
            log::trace!("Ignoring stale toast timer {}", generation);
            return ToastTransition::Unchanged;
        }
        self.clear(ClearReason::Expired)
    }

    /// Expire the current toast if its deadline has passed
    pub fn expire_due(&mut self, now: Instant) -> ToastTransition {
        match self.deadline() {
            Some((generation, expires_at)) if expires_at <= now => self.expire(generation),
            _ => ToastTransition::Unchanged,
        }
    }

    fn clear(&mut self, reason: ClearReason) -> ToastTransition {
        match self.showing.take() {
            Some(ShowingToast {
                entry, generation, ..
            }) => {
                log::debug!("Clearing toast {} {} ({:?})", entry.kind, generation, reason);
                ToastTransition::Cleared { entry, reason }
            }
            None => ToastTransition::Unchanged,
        }
    }
}
