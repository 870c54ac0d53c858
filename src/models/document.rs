use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::models::media::CdnConfig;

/// A record type stored in the CMS.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// CMS `_type` value.
    const DOC_TYPE: &'static str;
    /// Path segment under `/api/admin/` and `/api/sanity/`.
    const RESOURCE: &'static str;

    fn id(&self) -> &str;

    /// Field checks run before create. Returns the message shown to the editor.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// Swaps asset references for public URLs.
    fn resolve_media(&mut self, _cdn: &CdnConfig) {}

    /// Cap checked when a record is created. Not enforced transactionally.
    fn soft_limit() -> Option<SoftLimit<Self>> {
        None
    }
}

/// At most `max` records may satisfy `counts`.
pub struct SoftLimit<T> {
    pub max: usize,
    pub counts: fn(&T) -> bool,
    pub message: &'static str,
}

impl<T> SoftLimit<T> {
    /// Whether adding `draft` to `existing` would go over the cap.
    pub fn exceeded_by(&self, existing: &[T], draft: &T) -> bool {
        (self.counts)(draft) && existing.iter().filter(|d| (self.counts)(d)).count() >= self.max
    }
}

/// Records with an editor-controlled visibility flag.
pub trait Activatable {
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}

pub(crate) fn default_true() -> bool {
    true
}

/// True when `now` falls inside the optional `[start, end]` window.
pub(crate) fn within_window(
    now: DateTime<Utc>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> bool {
    start.map_or(true, |s| s <= now) && end.map_or(true, |e| now <= e)
}

pub(crate) fn require(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(())
    }
}
