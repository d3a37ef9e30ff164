//! Display text lookup
use crate::diagnostic::{
    DiagnosticKind, MediaDiagnosticKind, NetworkDiagnosticKind, NetworkQualityDiagnosticKind,
};

/// Resolves a localization key into display text
///
/// Implementations must always return a string. Missing keys
/// are expected to fall back to the raw key.
pub trait Localize {
    fn localize(&self, key: &str, args: &[&str]) -> String;

    fn localize_kind(&self, kind: DiagnosticKind) -> String {
        self.localize(kind.as_str(), &[])
    }
}

impl<F> Localize for F
where
    F: Fn(&str, &[&str]) -> String,
{
    fn localize(&self, key: &str, args: &[&str]) -> String {
        self(key, args)
    }
}

/// Replace positional placeholders `{0}`, `{1}`, ...
///
/// Placeholders without a corresponding argument are kept verbatim.
#[must_use]
pub fn substitute_args(template: &str, args: &[&str]) -> String {
    if args.is_empty() {
        return template.to_owned();
    }
    let mut text = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        text.push_str(&rest[..start]);
        let tail = &rest[start..];
        let arg = tail.find('}').and_then(|end| {
            let index = tail[1..end].parse::<usize>().ok()?;
            args.get(index).map(|arg| (arg, end))
        });
        if let Some((arg, end)) = arg {
            text.push_str(arg);
            rest = &tail[end + 1..];
        } else {
            text.push('{');
            rest = &tail[1..];
        }
    }
    text.push_str(rest);
    text
}

/// Built-in English texts
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLocalization;

impl DefaultLocalization {
    #[must_use]
    pub fn text(kind: DiagnosticKind) -> &'static str {
        match kind {
            DiagnosticKind::Network(kind) => match kind {
                NetworkDiagnosticKind::NetworkUnavailable => {
                    "Network is unavailable. Check your connection."
                }
                NetworkDiagnosticKind::NetworkRelaysUnreachable => {
                    "Network relays are unreachable. Check your firewall settings."
                }
            },
            DiagnosticKind::NetworkQuality(kind) => match kind {
                NetworkQualityDiagnosticKind::NetworkReconnectionQuality => "Reconnecting...",
                NetworkQualityDiagnosticKind::NetworkReceiveQuality
                | NetworkQualityDiagnosticKind::NetworkSendQuality => {
                    "Poor network connection. Call quality might be affected."
                }
            },
            DiagnosticKind::Media(kind) => match kind {
                MediaDiagnosticKind::SpeakingWhileMicrophoneIsMuted => {
                    "You're muted. Unmute to speak."
                }
                MediaDiagnosticKind::SpeakerNotFunctioning => {
                    "Your speaker isn't working. Try another device."
                }
                MediaDiagnosticKind::SpeakerNotFunctioningDeviceInUse => {
                    "Your speaker is being used by another application."
                }
                MediaDiagnosticKind::SpeakerMuted => "Your speaker is muted.",
                MediaDiagnosticKind::SpeakerVolumeZero => "Your speaker volume is zero.",
                MediaDiagnosticKind::NoSpeakerDevicesAvailable => "No speakers found.",
                MediaDiagnosticKind::SpeakerBusy => "Your speaker is busy.",
                MediaDiagnosticKind::NoMicrophoneDevicesAvailable => "No microphones found.",
                MediaDiagnosticKind::MicrophoneNotFunctioning => {
                    "Your microphone isn't working. Try another device."
                }
                MediaDiagnosticKind::MicrophoneNotFunctioningDeviceInUse => {
                    "Your microphone is being used by another application."
                }
                MediaDiagnosticKind::MicrophoneMuteUnexpectedly => {
                    "Your microphone was muted by the system."
                }
                MediaDiagnosticKind::MicrophonePermissionDenied => {
                    "Microphone access is denied."
                }
                MediaDiagnosticKind::CameraFrozen => {
                    "Your camera stopped working. Others can't see you."
                }
                MediaDiagnosticKind::CameraStartFailed | MediaDiagnosticKind::CameraStartTimedOut => {
                    "Your camera couldn't be started."
                }
                MediaDiagnosticKind::CameraPermissionDenied => "Camera access is denied.",
            },
        }
    }

    fn lookup(key: &str) -> Option<&'static str> {
        DiagnosticKind::all()
            .find(|kind| kind.as_str() == key)
            .map(Self::text)
    }
}

impl Localize for DefaultLocalization {
    fn localize(&self, key: &str, args: &[&str]) -> String {
        match Self::lookup(key) {
            Some(template) => substitute_args(template, args),
            None => {
                log::debug!("Missing localization for key {}", key);
                key.to_owned()
            }
        }
    }

    fn localize_kind(&self, kind: DiagnosticKind) -> String {
        Self::text(kind).to_owned()
    }
}
