//! Diagnostic kinds, values and update records
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Boolean network conditions
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum NetworkDiagnosticKind {
    NetworkUnavailable,
    NetworkRelaysUnreachable,
}

impl NetworkDiagnosticKind {
    pub const ALL: [Self; 2] = [Self::NetworkUnavailable, Self::NetworkRelaysUnreachable];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NetworkUnavailable => "networkUnavailable",
            Self::NetworkRelaysUnreachable => "networkRelaysUnreachable",
        }
    }
}

/// Graded network conditions
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum NetworkQualityDiagnosticKind {
    NetworkReconnectionQuality,
    NetworkReceiveQuality,
    NetworkSendQuality,
}

impl NetworkQualityDiagnosticKind {
    pub const ALL: [Self; 3] = [
        Self::NetworkReconnectionQuality,
        Self::NetworkReceiveQuality,
        Self::NetworkSendQuality,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NetworkReconnectionQuality => "networkReconnectionQuality",
            Self::NetworkReceiveQuality => "networkReceiveQuality",
            Self::NetworkSendQuality => "networkSendQuality",
        }
    }
}

/// Boolean media device conditions
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum MediaDiagnosticKind {
    SpeakingWhileMicrophoneIsMuted,
    SpeakerNotFunctioning,
    SpeakerNotFunctioningDeviceInUse,
    SpeakerMuted,
    SpeakerVolumeZero,
    NoSpeakerDevicesAvailable,
    SpeakerBusy,
    NoMicrophoneDevicesAvailable,
    MicrophoneNotFunctioning,
    MicrophoneNotFunctioningDeviceInUse,
    MicrophoneMuteUnexpectedly,
    MicrophonePermissionDenied,
    CameraFrozen,
    CameraStartFailed,
    CameraStartTimedOut,
    CameraPermissionDenied,
}

impl MediaDiagnosticKind {
    pub const ALL: [Self; 16] = [
        Self::SpeakingWhileMicrophoneIsMuted,
        Self::SpeakerNotFunctioning,
        Self::SpeakerNotFunctioningDeviceInUse,
        Self::SpeakerMuted,
        Self::SpeakerVolumeZero,
        Self::NoSpeakerDevicesAvailable,
        Self::SpeakerBusy,
        Self::NoMicrophoneDevicesAvailable,
        Self::MicrophoneNotFunctioning,
        Self::MicrophoneNotFunctioningDeviceInUse,
        Self::MicrophoneMuteUnexpectedly,
        Self::MicrophonePermissionDenied,
        Self::CameraFrozen,
        Self::CameraStartFailed,
        Self::CameraStartTimedOut,
        Self::CameraPermissionDenied,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SpeakingWhileMicrophoneIsMuted => "speakingWhileMicrophoneIsMuted",
            Self::SpeakerNotFunctioning => "speakerNotFunctioning",
            Self::SpeakerNotFunctioningDeviceInUse => "speakerNotFunctioningDeviceInUse",
            Self::SpeakerMuted => "speakerMuted",
            Self::SpeakerVolumeZero => "speakerVolumeZero",
            Self::NoSpeakerDevicesAvailable => "noSpeakerDevicesAvailable",
            Self::SpeakerBusy => "speakerBusy",
            Self::NoMicrophoneDevicesAvailable => "noMicrophoneDevicesAvailable",
            Self::MicrophoneNotFunctioning => "microphoneNotFunctioning",
            Self::MicrophoneNotFunctioningDeviceInUse => "microphoneNotFunctioningDeviceInUse",
            Self::MicrophoneMuteUnexpectedly => "microphoneMuteUnexpectedly",
            Self::MicrophonePermissionDenied => "microphonePermissionDenied",
            Self::CameraFrozen => "cameraFrozen",
            Self::CameraStartFailed => "cameraStartFailed",
            Self::CameraStartTimedOut => "cameraStartTimedOut",
            Self::CameraPermissionDenied => "cameraPermissionDenied",
        }
    }
}

/// Identifies a single diagnostic condition across all categories
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum DiagnosticKind {
    Network(NetworkDiagnosticKind),
    NetworkQuality(NetworkQualityDiagnosticKind),
    Media(MediaDiagnosticKind),
}

impl DiagnosticKind {
    /// Stable identifier, also used as the localization key
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Network(kind) => kind.as_str(),
            Self::NetworkQuality(kind) => kind.as_str(),
            Self::Media(kind) => kind.as_str(),
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        NetworkDiagnosticKind::ALL
            .into_iter()
            .map(Self::Network)
            .chain(
                NetworkQualityDiagnosticKind::ALL
                    .into_iter()
                    .map(Self::NetworkQuality),
            )
            .chain(MediaDiagnosticKind::ALL.into_iter().map(Self::Media))
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<NetworkDiagnosticKind> for DiagnosticKind {
    fn from(from: NetworkDiagnosticKind) -> Self {
        Self::Network(from)
    }
}

impl From<NetworkQualityDiagnosticKind> for DiagnosticKind {
    fn from(from: NetworkQualityDiagnosticKind) -> Self {
        Self::NetworkQuality(from)
    }
}

impl From<MediaDiagnosticKind> for DiagnosticKind {
    fn from(from: MediaDiagnosticKind) -> Self {
        Self::Media(from)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum NetworkQuality {
    Good,
    Poor,
    Bad,
}

impl NetworkQuality {
    /// Both poor and bad quality are reported to the user
    #[must_use]
    pub const fn is_bad_state(self) -> bool {
        matches!(self, Self::Poor | Self::Bad)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum DiagnosticEvent {
    Network {
        kind: NetworkDiagnosticKind,
        value: bool,
    },
    NetworkQuality {
        kind: NetworkQualityDiagnosticKind,
        value: NetworkQuality,
    },
    Media {
        kind: MediaDiagnosticKind,
        value: bool,
    },
}

impl DiagnosticEvent {
    #[must_use]
    pub const fn kind(&self) -> DiagnosticKind {
        match *self {
            Self::Network { kind, .. } => DiagnosticKind::Network(kind),
            Self::NetworkQuality { kind, .. } => DiagnosticKind::NetworkQuality(kind),
            Self::Media { kind, .. } => DiagnosticKind::Media(kind),
        }
    }

    /// Whether the value signals a degraded condition
    #[must_use]
    pub const fn is_bad_state(&self) -> bool {
        match *self {
            Self::Network { value, .. } | Self::Media { value, .. } => value,
            Self::NetworkQuality { value, .. } => value.is_bad_state(),
        }
    }
}

/// Update record as delivered by the calling SDK
///
/// Only a single field is expected to be populated. If more than
/// one is present the network diagnostic wins over the network
/// quality diagnostic which in turn wins over the media diagnostic.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct DiagnosticsState {
    pub network_diagnostic: Option<(NetworkDiagnosticKind, bool)>,
    pub network_quality_diagnostic: Option<(NetworkQualityDiagnosticKind, NetworkQuality)>,
    pub media_diagnostic: Option<(MediaDiagnosticKind, bool)>,
}

impl DiagnosticsState {
    #[must_use]
    pub fn network(kind: NetworkDiagnosticKind, value: bool) -> Self {
        Self {
            network_diagnostic: Some((kind, value)),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn network_quality(kind: NetworkQualityDiagnosticKind, value: NetworkQuality) -> Self {
        Self {
            network_quality_diagnostic: Some((kind, value)),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn media(kind: MediaDiagnosticKind, value: bool) -> Self {
        Self {
            media_diagnostic: Some((kind, value)),
            ..Default::default()
        }
    }

    /// The single event that is processed for this update, if any
    #[must_use]
    pub fn event(&self) -> Option<DiagnosticEvent> {
        if let Some((kind, value)) = self.network_diagnostic {
            return Some(DiagnosticEvent::Network { kind, value });
        }
        if let Some((kind, value)) = self.network_quality_diagnostic {
            return Some(DiagnosticEvent::NetworkQuality { kind, value });
        }
        self.media_diagnostic
            .map(|(kind, value)| DiagnosticEvent::Media { kind, value })
    }
}

impl From<DiagnosticEvent> for DiagnosticsState {
    fn from(from: DiagnosticEvent) -> Self {
        match from {
            DiagnosticEvent::Network { kind, value } => Self::network(kind, value),
            DiagnosticEvent::NetworkQuality { kind, value } => Self::network_quality(kind, value),
            DiagnosticEvent::Media { kind, value } => Self::media(kind, value),
        }
    }
}
