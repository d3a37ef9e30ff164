use crate::{
    diagnostic::{
        MediaDiagnosticKind, NetworkDiagnosticKind, NetworkQuality, NetworkQualityDiagnosticKind,
    },
    localization::DefaultLocalization,
    toast::ClearReason,
};

use super::*;

fn new_reconciler() -> DiagnosticsReconciler {
    DiagnosticsReconciler::try_new(Config::default(), Box::new(DefaultLocalization)).unwrap()
}

fn toast_kind(reconciler: &DiagnosticsReconciler) -> Option<DiagnosticKind> {
    reconciler.toast().map(|entry| entry.kind)
}

fn banner_kinds(reconciler: &DiagnosticsReconciler) -> Vec<DiagnosticKind> {
    reconciler.banners().iter().map(|entry| entry.kind).collect()
}

#[test]
fn reject_zero_dismiss_interval() {
    let config = Config {
        toast_dismiss_interval: Duration::ZERO,
        ..Default::default()
    };
    assert_eq!(
        Some(Error::ZeroDismissInterval),
        DiagnosticsReconciler::try_new(config.clone(), Box::new(DefaultLocalization)).err()
    );
    let mut reconciler = new_reconciler();
    assert_eq!(Err(Error::ZeroDismissInterval), reconciler.replace_config(config));
    assert_eq!(&Config::default(), reconciler.config());
}

#[test]
fn reject_too_large_dismiss_interval() {
    let mut reconciler = new_reconciler();
    let config = Config {
        toast_dismiss_interval: Duration::MAX,
        ..Default::default()
    };
    assert_eq!(
        Err(Error::DismissIntervalTooLarge(Duration::MAX)),
        reconciler.replace_config(config)
    );
    assert_eq!(&Config::default(), reconciler.config());

    // The largest accepted interval still yields a deadline
    let config = Config {
        toast_dismiss_interval: MAX_TOAST_DISMISS_INTERVAL,
        ..Default::default()
    };
    assert!(reconciler.replace_config(config).is_ok());
    let now = SystemTimeInstant::now();
    reconciler.update(
        &DiagnosticsState::network(NetworkDiagnosticKind::NetworkUnavailable, true),
        now,
    );
    assert_eq!(
        Some(now.instant() + MAX_TOAST_DISMISS_INTERVAL),
        reconciler.toast_deadline().map(|(_, expires_at)| expires_at)
    );
}

#[test]
fn empty_update_is_ignored() {
    let mut reconciler = new_reconciler();
    assert_eq!(
        Reconciliation::Ignored,
        reconciler.update(&DiagnosticsState::default(), SystemTimeInstant::now())
    );
}

#[test]
fn network_precedence_within_one_update() {
    let mut reconciler = new_reconciler();
    let state = DiagnosticsState {
        network_diagnostic: Some((NetworkDiagnosticKind::NetworkUnavailable, true)),
        media_diagnostic: Some((MediaDiagnosticKind::CameraFrozen, true)),
        ..Default::default()
    };
    reconciler.update(&state, SystemTimeInstant::now());
    assert_eq!(
        Some(DiagnosticKind::from(NetworkDiagnosticKind::NetworkUnavailable)),
        toast_kind(&reconciler)
    );
    assert!(reconciler.banners().is_empty());
}

#[test]
fn toast_text_is_localized_at_construction() {
    let localization = |key: &str, _args: &[&str]| format!("<{}>", key);
    let mut reconciler =
        DiagnosticsReconciler::try_new(Config::default(), Box::new(localization)).unwrap();
    reconciler.update(
        &DiagnosticsState::network(NetworkDiagnosticKind::NetworkRelaysUnreachable, true),
        SystemTimeInstant::now(),
    );
    assert_eq!(
        Some("<networkRelaysUnreachable>"),
        reconciler.toast().map(|entry| entry.text.as_str())
    );
}

#[test]
fn poor_network_quality_shows_toast_and_good_clears_it() {
    let mut reconciler = new_reconciler();
    let kind = NetworkQualityDiagnosticKind::NetworkReconnectionQuality;
    let now = SystemTimeInstant::now();
    reconciler.update(
        &DiagnosticsState::network_quality(kind, NetworkQuality::Poor),
        now,
    );
    assert_eq!(Some(DiagnosticKind::from(kind)), toast_kind(&reconciler));
    let reconciliation = reconciler.update(
        &DiagnosticsState::network_quality(kind, NetworkQuality::Good),
        now + Duration::from_secs(2),
    );
    assert!(matches!(
        reconciliation,
        Reconciliation::Toast(ToastTransition::Cleared {
            reason: ClearReason::Recovered,
            ..
        })
    ));
    assert_eq!(None, reconciler.toast());
}

#[test]
fn good_state_for_other_kind_keeps_toast() {
    let mut reconciler = new_reconciler();
    let now = SystemTimeInstant::now();
    reconciler.update(
        &DiagnosticsState::network(NetworkDiagnosticKind::NetworkRelaysUnreachable, true),
        now,
    );
    let deadline = reconciler.toast_deadline();
    let reconciliation = reconciler.update(
        &DiagnosticsState::network(NetworkDiagnosticKind::NetworkUnavailable, false),
        now + Duration::from_secs(1),
    );
    assert!(!reconciliation.is_effective());
    assert_eq!(
        Some(DiagnosticKind::from(NetworkDiagnosticKind::NetworkRelaysUnreachable)),
        toast_kind(&reconciler)
    );
    assert_eq!(deadline, reconciler.toast_deadline());
}

#[test]
fn replaced_toast_auto_clears_after_replacement_interval() {
    let mut reconciler = new_reconciler();
    let t0 = SystemTimeInstant::now();
    reconciler.update(
        &DiagnosticsState::network(NetworkDiagnosticKind::NetworkUnavailable, true),
        t0,
    );
    let (first_generation, _) = reconciler.toast_deadline().unwrap();
    reconciler.update(
        &DiagnosticsState::network(NetworkDiagnosticKind::NetworkRelaysUnreachable, true),
        t0 + Duration::from_secs(1),
    );
    assert!(reconciler.expire_toast(first_generation).is_unchanged());
    assert!(reconciler
        .expire_due(t0.instant() + Duration::from_secs(10))
        .is_unchanged());
    assert_eq!(
        Some(DiagnosticKind::from(NetworkDiagnosticKind::NetworkRelaysUnreachable)),
        toast_kind(&reconciler)
    );
    assert!(!reconciler
        .expire_due(t0.instant() + Duration::from_secs(11))
        .is_unchanged());
    assert_eq!(None, reconciler.toast());
}

#[test]
fn banner_appears_and_disappears_with_media_value() {
    let mut reconciler = new_reconciler();
    let t0 = SystemTimeInstant::now();
    reconciler.update(
        &DiagnosticsState::media(MediaDiagnosticKind::CameraFrozen, true),
        t0,
    );
    assert_eq!(
        vec![DiagnosticKind::from(MediaDiagnosticKind::CameraFrozen)],
        banner_kinds(&reconciler)
    );
    assert_eq!(None, reconciler.toast());
    reconciler.update(
        &DiagnosticsState::media(MediaDiagnosticKind::CameraFrozen, false),
        t0 + Duration::from_secs(5),
    );
    assert!(reconciler.banners().is_empty());
}

#[test]
fn toast_and_banners_are_independent() {
    let mut reconciler = new_reconciler();
    let now = SystemTimeInstant::now();
    reconciler.update(
        &DiagnosticsState::media(MediaDiagnosticKind::NoMicrophoneDevicesAvailable, true),
        now,
    );
    reconciler.update(
        &DiagnosticsState::media(MediaDiagnosticKind::SpeakingWhileMicrophoneIsMuted, true),
        now,
    );
    reconciler.update(
        &DiagnosticsState::media(MediaDiagnosticKind::CameraFrozen, true),
        now,
    );
    reconciler.expire_due(now.instant() + DEFAULT_TOAST_DISMISS_INTERVAL);
    assert_eq!(None, reconciler.toast());
    assert_eq!(
        vec![
            DiagnosticKind::from(MediaDiagnosticKind::NoMicrophoneDevicesAvailable),
            DiagnosticKind::from(MediaDiagnosticKind::CameraFrozen),
        ],
        banner_kinds(&reconciler)
    );
}

#[test]
fn dismiss_banner_by_kind() {
    let mut reconciler = new_reconciler();
    let now = SystemTimeInstant::now();
    reconciler.update(
        &DiagnosticsState::media(MediaDiagnosticKind::MicrophoneNotFunctioning, true),
        now,
    );
    assert!(reconciler
        .dismiss(MediaDiagnosticKind::CameraFrozen.into())
        .is_unchanged());
    assert!(!reconciler
        .dismiss(MediaDiagnosticKind::MicrophoneNotFunctioning.into())
        .is_unchanged());
    assert!(reconciler.banners().is_empty());
}

#[test]
fn unclassified_media_kind_is_ignored() {
    let mut reconciler = new_reconciler();
    assert_eq!(
        Reconciliation::Ignored,
        reconciler.update(
            &DiagnosticsState::media(MediaDiagnosticKind::SpeakerBusy, true),
            SystemTimeInstant::now(),
        )
    );
}

#[test]
fn replaced_dismiss_interval_applies_to_next_toast() {
    let mut reconciler = new_reconciler();
    let now = SystemTimeInstant::now();
    let new_config = Config {
        toast_dismiss_interval: Duration::from_secs(3),
        ..Default::default()
    };
    let replacement = reconciler.replace_config(new_config).unwrap();
    assert_eq!(Config::default(), replacement.old_config);
    assert!(!replacement.is_effective());
    reconciler.update(
        &DiagnosticsState::media(MediaDiagnosticKind::CameraStartFailed, true),
        now,
    );
    assert_eq!(
        Some(now.instant() + Duration::from_secs(3)),
        reconciler.toast_deadline().map(|(_, expires_at)| expires_at)
    );
}

#[test]
fn reclassify_media_kind_as_banner() {
    let kind = DiagnosticKind::from(MediaDiagnosticKind::SpeakerBusy);
    let mut reconciler = new_reconciler();
    let classification = ClassificationTable::try_new([], [kind]).unwrap();
    reconciler
        .replace_config(Config {
            classification,
            ..Default::default()
        })
        .unwrap();
    reconciler.update(
        &DiagnosticsState::media(MediaDiagnosticKind::SpeakerBusy, true),
        SystemTimeInstant::now(),
    );
    assert_eq!(vec![kind], banner_kinds(&reconciler));
}

#[cfg(feature = "serde")]
#[test]
fn deserialize_config() -> anyhow::Result<()> {
    let json = r#"{
        "toastDismissInterval": {"secs": 4, "nanos": 0},
        "classification": {
            "toast": [{"network": "networkUnavailable"}],
            "banner": [{"media": "cameraFrozen"}]
        }
    }"#;
    let config: Config = serde_json::from_str(json)?;
    assert_eq!(Duration::from_secs(4), config.toast_dismiss_interval);
    assert_eq!(
        crate::classification::Surface::Banner,
        config
            .classification
            .surface(MediaDiagnosticKind::CameraFrozen.into())
    );
    Ok(())
}

#[test]
fn reclassified_banner_is_withdrawn() {
    let frozen = DiagnosticKind::from(MediaDiagnosticKind::CameraFrozen);
    let no_mic = DiagnosticKind::from(MediaDiagnosticKind::NoMicrophoneDevicesAvailable);
    let mut reconciler = new_reconciler();
    let now = SystemTimeInstant::now();
    reconciler.update(
        &DiagnosticsState::media(MediaDiagnosticKind::NoMicrophoneDevicesAvailable, true),
        now,
    );
    reconciler.update(
        &DiagnosticsState::media(MediaDiagnosticKind::CameraFrozen, true),
        now,
    );
    let classification = ClassificationTable::try_new([frozen], [no_mic]).unwrap();
    let replacement = reconciler
        .replace_config(Config {
            classification,
            ..Default::default()
        })
        .unwrap();
    assert!(replacement.is_effective());
    assert!(replacement.toast.is_unchanged());
    assert_eq!(
        vec![frozen],
        replacement
            .removed_banners
            .iter()
            .map(|entry| entry.kind)
            .collect::<Vec<_>>()
    );
    assert_eq!(vec![no_mic], banner_kinds(&reconciler));

    // A good state now only targets the toast
    reconciler.update(
        &DiagnosticsState::media(MediaDiagnosticKind::CameraFrozen, false),
        now + Duration::from_secs(1),
    );
    assert_eq!(vec![no_mic], banner_kinds(&reconciler));
}

#[test]
fn reclassified_toast_is_withdrawn() {
    let muted = DiagnosticKind::from(MediaDiagnosticKind::SpeakingWhileMicrophoneIsMuted);
    let mut reconciler = new_reconciler();
    let now = SystemTimeInstant::now();
    reconciler.update(
        &DiagnosticsState::media(MediaDiagnosticKind::SpeakingWhileMicrophoneIsMuted, true),
        now,
    );
    let classification = ClassificationTable::try_new([], [muted]).unwrap();
    let replacement = reconciler
        .replace_config(Config {
            classification,
            ..Default::default()
        })
        .unwrap();
    assert!(matches!(
        replacement.toast,
        ToastTransition::Cleared {
            reason: ClearReason::Reclassified,
            ..
        }
    ));
    assert_eq!(None, reconciler.toast());
    assert_eq!(None, reconciler.toast_deadline());
    assert!(replacement.removed_banners.is_empty());
}

#[test]
fn toast_of_unchanged_surface_survives_config_replacement() {
    let mut reconciler = new_reconciler();
    let now = SystemTimeInstant::now();
    reconciler.update(
        &DiagnosticsState::network(NetworkDiagnosticKind::NetworkUnavailable, true),
        now,
    );
    let deadline = reconciler.toast_deadline();
    let replacement = reconciler
        .replace_config(Config {
            toast_dismiss_interval: Duration::from_secs(3),
            ..Default::default()
        })
        .unwrap();
    assert!(!replacement.is_effective());
    assert_eq!(deadline, reconciler.toast_deadline());
}
