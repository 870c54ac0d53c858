use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::IntoResponse,
    Json,
};
use http::StatusCode;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::{
    cms,
    models::{
        breaking_news::BreakingNewsItem,
        document::Document,
        error::Error,
        settings::{SiteSettings, SETTINGS_ID},
    },
    utils::state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// Fields a client may not set directly.
fn strip_system_fields(fields: &mut Map<String, Value>) {
    fields.retain(|key, _| !key.starts_with('_'));
}

/// Applies `fields` on top of `doc` and reads the result back as `T`.
fn merged<T: Document>(doc: &T, fields: &Map<String, Value>) -> Result<T, Error> {
    let mut value = serde_json::to_value(doc).map_err(|e| Error::bad_request(&e.to_string()))?;
    if let Value::Object(map) = &mut value {
        for (key, field) in fields {
            map.insert(key.clone(), field.clone());
        }
    }
    serde_json::from_value(value).map_err(|e| Error::bad_request(&e.to_string()))
}

/// Keeps the polled views in step with admin writes.
async fn after_write<T: Document>(state: &AppState) {
    if T::DOC_TYPE == BreakingNewsItem::DOC_TYPE {
        state.ticker.refresh().await;
    }
}

/// Every document of `T`, inactive ones included. Asset references are
/// returned as stored so edits round-trip.
pub async fn list<T: Document>(State(state): State<Arc<AppState>>) -> Result<Json<Vec<T>>, Error> {
    Ok(Json(cms::all::<T>(state.cms.as_ref()).await?))
}

pub async fn create<T: Document>(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(doc) = payload?;
    doc.validate().map_err(|message| Error::bad_request(&message))?;

    if let Some(limit) = T::soft_limit() {
        let existing = cms::all::<T>(state.cms.as_ref()).await?;
        if limit.exceeded_by(&existing, &doc) {
            return Err(Error::new(StatusCode::CONFLICT, limit.message));
        }
    }

    let saved = cms::create(state.cms.as_ref(), &doc).await?;
    tracing::info!("created {} {}", T::DOC_TYPE, saved.id());
    after_write::<T>(&state).await;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// `PATCH` with `{ _id, ...fields }`. Only the given fields change.
pub async fn update<T: Document>(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(mut fields) = payload?;
    let id = fields
        .get("_id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::bad_request("_id is required"))?;
    strip_system_fields(&mut fields);
    if fields.is_empty() {
        return Err(Error::bad_request("no fields to update"));
    }

    let current: T = match state.cms.document(&id).await? {
        Some(doc) if doc["_type"] == T::DOC_TYPE => serde_json::from_value(doc)
            .map_err(|e| Error::new(StatusCode::BAD_GATEWAY, &e.to_string()))?,
        _ => return Err(Error::not_found(&format!("{} '{}' not found", T::DOC_TYPE, id))),
    };
    let candidate = merged(&current, &fields)?;
    candidate.validate().map_err(|message| Error::bad_request(&message))?;

    if let Some(limit) = T::soft_limit() {
        if !(limit.counts)(&current) {
            let others: Vec<T> = cms::all::<T>(state.cms.as_ref())
                .await?
                .into_iter()
                .filter(|d| d.id() != id)
                .collect();
            if limit.exceeded_by(&others, &candidate) {
                return Err(Error::new(StatusCode::CONFLICT, limit.message));
            }
        }
    }

    let saved: T = cms::patch(state.cms.as_ref(), &id, fields).await?;
    tracing::info!("updated {} {}", T::DOC_TYPE, id);
    after_write::<T>(&state).await;
    Ok((StatusCode::OK, Json(saved)))
}

pub async fn remove<T: Document>(
    State(state): State<Arc<AppState>>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<impl IntoResponse, Error> {
    let Query(query) = query?;
    let id = query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| Error::bad_request("id query parameter is required"))?;

    match state.cms.document(&id).await? {
        Some(doc) if doc["_type"] == T::DOC_TYPE => {}
        _ => return Err(Error::not_found(&format!("{} '{}' not found", T::DOC_TYPE, id))),
    }

    state.cms.delete(&id).await?;
    tracing::info!("deleted {} {}", T::DOC_TYPE, id);
    after_write::<T>(&state).await;
    Ok((StatusCode::OK, Json(json!({ "deleted": id }))))
}

/// The stored settings, or the defaults when none were saved yet.
pub async fn get_settings(State(state): State<Arc<AppState>>) -> Result<Json<SiteSettings>, Error> {
    let stored = cms::get::<SiteSettings>(state.cms.as_ref(), SETTINGS_ID).await?;
    Ok(Json(stored.unwrap_or_default()))
}

/// Upserts the settings singleton and publishes it to the public poller so
/// the home page sees the change without waiting for the next poll.
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(mut fields) = payload?;
    strip_system_fields(&mut fields);

    let current = cms::get::<SiteSettings>(state.cms.as_ref(), SETTINGS_ID)
        .await?
        .unwrap_or_default();
    let mut settings = merged(&current, &fields)?;
    settings.id = SETTINGS_ID.to_string();

    let saved = cms::upsert(state.cms.as_ref(), &settings).await?;
    tracing::info!("site settings updated");
    state.settings.publish(saved.clone());
    Ok((StatusCode::OK, Json(saved)))
}
