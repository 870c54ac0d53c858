use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    document::{default_true, require, Activatable, Document},
    media::{resolve_opt, CdnConfig, Media},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Obituary {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
    pub age: u32,
    pub place: String,
    pub date_of_death: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funeral_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Media>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Document for Obituary {
    const DOC_TYPE: &'static str = "obituary";
    const RESOURCE: &'static str = "obituaries";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), String> {
        require(&self.name, "name")?;
        require(&self.place, "place")
    }

    fn resolve_media(&mut self, cdn: &CdnConfig) {
        resolve_opt(&mut self.photo, cdn);
    }
}

impl Activatable for Obituary {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}
