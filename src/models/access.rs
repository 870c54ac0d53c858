use std::fmt;

use serde::{Deserialize, Serialize};

/// Admin access level granted by the login password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessTier {
    #[default]
    None,
    Local,
    Full,
}

/// Admin resources reachable with the `local` tier.
pub const LOCAL_TIER_RESOURCES: &[&str] = &["news", "obituaries", "upload", "session"];

impl AccessTier {
    pub fn as_str(self) -> &'static str {
        match self {
            AccessTier::None => "none",
            AccessTier::Local => "local",
            AccessTier::Full => "full",
        }
    }

    /// Whether this tier may reach `path`. Accepts both API paths
    /// (`/api/admin/news`) and console pages (`/admin/news/edit`).
    pub fn allows_path(self, path: &str) -> bool {
        match self {
            AccessTier::Full => true,
            AccessTier::None => false,
            AccessTier::Local => {
                let rest = path
                    .strip_prefix("/api/admin")
                    .or_else(|| path.strip_prefix("/admin"))
                    .unwrap_or(path);
                let resource = rest.trim_start_matches('/').split(['/', '?']).next().unwrap_or("");
                resource.is_empty() || LOCAL_TIER_RESOURCES.contains(&resource)
            }
        }
    }
}

impl fmt::Display for AccessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
