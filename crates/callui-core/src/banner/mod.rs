//! Persistent banner stack
use crate::diagnostic::DiagnosticKind;

#[cfg(feature = "serde")]
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BannerEntry {
    pub kind: DiagnosticKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BannerTransition {
    Appended(BannerEntry),
    Removed(BannerEntry),
    Unchanged,
}

impl BannerTransition {
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

/// Ordered banners, at most one per kind
///
/// Entries are displayed in order of arrival.
#[derive(Debug, Clone, Default)]
pub struct BannerStack {
    entries: Vec<BannerEntry>,
}

impl BannerStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[BannerEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.position(kind).is_some()
    }

    /// Apply a new value for a diagnostic
    ///
    /// The text is only resolved if a new entry is actually appended.
    pub fn upsert(
        &mut self,
        kind: DiagnosticKind,
        value: bool,
        text: impl FnOnce() -> String,
    ) -> BannerTransition {
        if !value {
            return self.remove(kind);
        }
        if self.contains(kind) {
            log::trace!("Banner {} is already shown", kind);
            return BannerTransition::Unchanged;
        }
        let entry = BannerEntry { kind, text: text() };
        log::debug!("Appending banner {}", kind);
        self.entries.push(entry.clone());
        BannerTransition::Appended(entry)
    }

    /// Explicit removal, e.g. when the user closed the banner
    pub fn dismiss(&mut self, kind: DiagnosticKind) -> BannerTransition {
        self.remove(kind)
    }

    /// Remove all entries whose kind is rejected by the predicate
    ///
    /// Returns the removed entries. The remaining entries keep their order.
    pub fn retain_kinds(
        &mut self,
        mut keep: impl FnMut(DiagnosticKind) -> bool,
    ) -> Vec<BannerEntry> {
        let (kept, removed): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| keep(entry.kind));
        self.entries = kept;
        for entry in &removed {
            log::debug!("Removing banner {}", entry.kind);
        }
        removed
    }

    fn position(&self, kind: DiagnosticKind) -> Option<usize> {
        self.entries.iter().position(|entry| entry.kind == kind)
    }

    fn remove(&mut self, kind: DiagnosticKind) -> BannerTransition {
        match self.position(kind) {
            Some(index) => {
                log::debug!("Removing banner {}", kind);
                // Vec::remove keeps the order of the remaining entries
                BannerTransition::Removed(self.entries.remove(index))
            }
            None => BannerTransition::Unchanged,
        }
    }
}
