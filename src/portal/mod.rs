//! Client-side state for the public site and the admin console: listing
//! pagination, deep-link reconciliation, the article modal and optimistic
//! admin edits. Everything here is independent of how it is rendered.

pub mod admin;
pub mod deep_link;
pub mod layout;
pub mod listing;
pub mod navigation;
pub mod request_seq;
pub mod share;
pub mod source;

use thiserror::Error;

use crate::cms::CmsError;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error(transparent)]
    Cms(#[from] CmsError),
    #[error("{0}")]
    Invalid(String),
}
