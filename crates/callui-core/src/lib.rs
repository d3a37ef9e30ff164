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

use std::time::Duration;

use thiserror::Error;

pub mod banner;
pub mod classification;
pub mod diagnostic;
pub mod localization;
pub mod reconciler;
pub mod time;
pub mod toast;

pub use self::{
    banner::{BannerEntry, BannerStack, BannerTransition},
    classification::{ClassificationTable, Route, Surface},
    diagnostic::{
        DiagnosticEvent, DiagnosticKind, DiagnosticsState, MediaDiagnosticKind,
        NetworkDiagnosticKind, NetworkQuality, NetworkQualityDiagnosticKind,
    },
    localization::{DefaultLocalization, Localize},
    reconciler::{Config, ConfigReplacement, DiagnosticsReconciler, Reconciliation},
    time::SystemTimeInstant,
    toast::{ToastEntry, ToastGeneration, ToastReconciler, ToastTransition},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("diagnostic {0} is classified both as toast and as banner")]
    ConflictingClassification(DiagnosticKind),

    #[error("toast dismiss interval must not be zero")]
    ZeroDismissInterval,

    #[error("toast dismiss interval {0:?} exceeds the maximum")]
    DismissIntervalTooLarge(Duration),
}

pub type Result<T> = std::result::Result<T, Error>;
