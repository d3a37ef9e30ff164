//! Routing of diagnostic events onto UI surfaces
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    diagnostic::{
        DiagnosticEvent, DiagnosticKind, MediaDiagnosticKind, NetworkDiagnosticKind,
        NetworkQualityDiagnosticKind,
    },
    Error, Result,
};

/// The UI surface that handles a diagnostic kind
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Surface {
    Toast,
    Banner,
    Ignored,
}

/// Outcome of classifying a single event
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Route {
    Toast {
        kind: DiagnosticKind,
        bad_state: bool,
    },
    Banner {
        kind: DiagnosticKind,
        value: bool,
    },
    Ignore,
}

pub const DEFAULT_TOAST_MEDIA_KINDS: [MediaDiagnosticKind; 3] = [
    MediaDiagnosticKind::SpeakingWhileMicrophoneIsMuted,
    MediaDiagnosticKind::CameraStartFailed,
    MediaDiagnosticKind::CameraStartTimedOut,
];

pub const DEFAULT_BANNER_MEDIA_KINDS: [MediaDiagnosticKind; 7] = [
    MediaDiagnosticKind::NoSpeakerDevicesAvailable,
    MediaDiagnosticKind::NoMicrophoneDevicesAvailable,
    MediaDiagnosticKind::MicrophoneNotFunctioning,
    MediaDiagnosticKind::SpeakerNotFunctioning,
    MediaDiagnosticKind::SpeakerNotFunctioningDeviceInUse,
    MediaDiagnosticKind::MicrophoneMuteUnexpectedly,
    MediaDiagnosticKind::CameraFrozen,
];

/// All network related kinds and a few media kinds are shown as toast
pub fn default_toast_kinds() -> impl Iterator<Item = DiagnosticKind> {
    NetworkDiagnosticKind::ALL
        .into_iter()
        .map(DiagnosticKind::Network)
        .chain(
            NetworkQualityDiagnosticKind::ALL
                .into_iter()
                .map(DiagnosticKind::NetworkQuality),
        )
        .chain(
            DEFAULT_TOAST_MEDIA_KINDS
                .into_iter()
                .map(DiagnosticKind::Media),
        )
}

pub fn default_banner_kinds() -> impl Iterator<Item = DiagnosticKind> {
    DEFAULT_BANNER_MEDIA_KINDS
        .into_iter()
        .map(DiagnosticKind::Media)
}

/// Maps each diagnostic kind onto at most one surface
///
/// Kinds that are not contained are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "ClassificationLists", into = "ClassificationLists")
)]
pub struct ClassificationTable {
    surfaces: HashMap<DiagnosticKind, Surface>,
}

impl ClassificationTable {
    /// An empty table that ignores all kinds
    #[must_use]
    pub fn empty() -> Self {
        Self {
            surfaces: HashMap::new(),
        }
    }

    /// Build a table from separate lists
    ///
    /// Fails if a kind is contained in both lists. Duplicates
    /// within the same list are accepted.
    pub fn try_new(
        toast_kinds: impl IntoIterator<Item = DiagnosticKind>,
        banner_kinds: impl IntoIterator<Item = DiagnosticKind>,
    ) -> Result<Self> {
        let mut surfaces: HashMap<_, _> = toast_kinds
            .into_iter()
            .map(|kind| (kind, Surface::Toast))
            .collect();
        for kind in banner_kinds {
            if let Some(Surface::Toast) = surfaces.insert(kind, Surface::Banner) {
                log::warn!("Rejecting classification of {} as both toast and banner", kind);
                return Err(Error::ConflictingClassification(kind));
            }
        }
        Ok(Self { surfaces })
    }

    #[must_use]
    pub fn surface(&self, kind: DiagnosticKind) -> Surface {
        self.surfaces
            .get(&kind)
            .copied()
            .unwrap_or(Surface::Ignored)
    }

    /// Kinds handled by the given surface in a stable order
    #[must_use]
    pub fn kinds(&self, surface: Surface) -> Vec<DiagnosticKind> {
        let mut kinds: Vec<_> = self
            .surfaces
            .iter()
            .filter(|(_, handled_by)| **handled_by == surface)
            .map(|(kind, _)| *kind)
            .collect();
        kinds.sort_unstable();
        kinds
    }

    #[must_use]
    pub fn classify(&self, event: &DiagnosticEvent) -> Route {
        let kind = event.kind();
        match self.surface(kind) {
            Surface::Toast => Route::Toast {
                kind,
                bad_state: event.is_bad_state(),
            },
            Surface::Banner => Route::Banner {
                kind,
                value: event.is_bad_state(),
            },
            Surface::Ignored => Route::Ignore,
        }
    }
}

impl Default for ClassificationTable {
    fn default() -> Self {
        let surfaces = default_toast_kinds()
            .map(|kind| (kind, Surface::Toast))
            .chain(default_banner_kinds().map(|kind| (kind, Surface::Banner)))
            .collect();
        Self { surfaces }
    }
}

/// Serializable list representation of [`ClassificationTable`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ClassificationLists {
    pub toast: Vec<DiagnosticKind>,
    pub banner: Vec<DiagnosticKind>,
}

impl TryFrom<ClassificationLists> for ClassificationTable {
    type Error = Error;

    fn try_from(from: ClassificationLists) -> Result<Self> {
        let ClassificationLists { toast, banner } = from;
        Self::try_new(toast, banner)
    }
}

impl From<ClassificationTable> for ClassificationLists {
    fn from(from: ClassificationTable) -> Self {
        Self {
            toast: from.kinds(Surface::Toast),
            banner: from.kinds(Surface::Banner),
        }
    }
}
