//! Searchable candidates.
//!
//! The ranking engine only needs a display name from each item it filters.
//! Callers either implement [`Candidate`] for their own types or use the
//! stock [`AppEntry`], which caches the lowercase name so repeated keystrokes
//! do not re-normalize the whole list.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// An item that can be ranked against a query.
///
/// Only `name` is required. Implementors that keep a precomputed lowercase
/// form should override [`Candidate::lowercase_name`] to return it borrowed.
pub trait Candidate {
    /// Display name shown to the user.
    fn name(&self) -> &str;

    /// Lowercase form of [`Candidate::name`] used for comparisons.
    fn lowercase_name(&self) -> Cow<'_, str> {
        Cow::Owned(self.name().to_lowercase())
    }

    /// Stable key used by the usage log. Defaults to the display name.
    fn key(&self) -> &str {
        self.name()
    }
}

impl Candidate for str {
    fn name(&self) -> &str {
        self
    }
}

impl Candidate for String {
    fn name(&self) -> &str {
        self
    }
}

impl<T: Candidate + ?Sized> Candidate for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn lowercase_name(&self) -> Cow<'_, str> {
        (**self).lowercase_name()
    }

    fn key(&self) -> &str {
        (**self).key()
    }
}

/// An installed application as seen by the app drawer.
///
/// `package` is the stable identity (the launcher's component name), `label`
/// is what the user reads and searches. The lowercase label is computed once
/// on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AppEntryRecord", into = "AppEntryRecord")]
pub struct AppEntry {
    pub package: String,
    pub label: String,
    lowercase_label: String,
}

impl AppEntry {
    /// Creates an entry and caches its lowercase label.
    ///
    /// # Examples
    ///
    /// ```
    /// use launcher_search::{AppEntry, Candidate};
    ///
    /// let app = AppEntry::new("com.google.android.apps.maps", "Google Maps");
    /// assert_eq!(app.lowercase_name(), "google maps");
    /// assert_eq!(app.key(), "com.google.android.apps.maps");
    /// ```
    #[must_use]
    pub fn new(package: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        let lowercase_label = label.to_lowercase();
        Self {
            package: package.into(),
            label,
            lowercase_label,
        }
    }
}

impl Candidate for AppEntry {
    fn name(&self) -> &str {
        &self.label
    }

    fn lowercase_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.lowercase_label)
    }

    fn key(&self) -> &str {
        &self.package
    }
}

/// Serialized shape of [`AppEntry`]; the lowercase cache is never persisted.
#[derive(Serialize, Deserialize)]
struct AppEntryRecord {
    package: String,
    label: String,
}

impl From<AppEntryRecord> for AppEntry {
    fn from(record: AppEntryRecord) -> Self {
        Self::new(record.package, record.label)
    }
}

impl From<AppEntry> for AppEntryRecord {
    fn from(entry: AppEntry) -> Self {
        Self {
            package: entry.package,
            label: entry.label,
        }
    }
}
