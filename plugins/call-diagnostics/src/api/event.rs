use super::*;

#[derive(Debug, Clone)]
pub enum Event {
    Lifecycle(LifecycleEvent),
    Notification(NotificationEvent),
}

/// Common lifecycle events
#[derive(Debug, Clone)]
pub enum LifecycleEvent {
    Started,
    Stopped,
    ConfigChanged(Config),
}

/// Changes of the UI surfaces
#[derive(Debug, Clone)]
pub enum NotificationEvent {
    /// A new toast replaced the previous one, if any
    ToastShown(ToastEntry),

    ToastCleared {
        kind: DiagnosticKind,
        reason: ClearReason,
    },

    /// The banner stack after an entry has been appended or removed
    BannerStackChanged(Vec<BannerEntry>),
}
