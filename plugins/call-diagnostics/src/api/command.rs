use crate::ResultSender;

use super::{BannerTransition, Config, DiagnosticKind, DiagnosticsState, Reconciliation};

#[derive(Debug)]
pub enum Command {
    UpdateDiagnostics(ResultSender<Reconciliation>, DiagnosticsState),
    DismissBanner(ResultSender<BannerTransition>, DiagnosticKind),
    ReplaceConfig(ResultSender<Config>, Config),
    Shutdown(ResultSender<()>),
}
