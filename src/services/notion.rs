//! Articles kept in a Notion database, mapped onto news items.

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde_json::{json, Value};

use crate::{
    models::{
        media::Media,
        news::{NewsItem, NewsKind},
    },
    utils::{config::NotionConfig, image_link::rewrite_image_url},
};

const NOTION_API: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";
const PAGE_SIZE: u32 = 50;

/// Queries the database, newest pages first.
pub async fn query_database(http: &Client, config: &NotionConfig) -> Result<Vec<Value>, reqwest::Error> {
    let body: Value = http
        .post(format!("{}/databases/{}/query", NOTION_API, config.database_id))
        .bearer_auth(&config.token)
        .header("Notion-Version", NOTION_VERSION)
        .json(&json!({
            "page_size": PAGE_SIZE,
            "sorts": [{ "timestamp": "created_time", "direction": "descending" }]
        }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(body["results"].as_array().cloned().unwrap_or_default())
}

fn plain_text(parts: &Value) -> String {
    parts
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p["plain_text"].as_str())
                .collect::<String>()
        })
        .unwrap_or_default()
}

/// Text of the first property with one of `names`.
fn text_property(props: &Value, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        let prop = props.get(*name)?;
        let text = match prop["type"].as_str()? {
            "title" => plain_text(&prop["title"]),
            "rich_text" => plain_text(&prop["rich_text"]),
            "select" => prop["select"]["name"].as_str()?.to_string(),
            "url" => prop["url"].as_str()?.to_string(),
            _ => return None,
        };
        let text = text.trim().to_string();
        (!text.is_empty()).then_some(text)
    })
}

fn title(props: &Value) -> Option<String> {
    props.as_object()?.values().find_map(|prop| {
        (prop["type"] == "title")
            .then(|| plain_text(&prop["title"]))
            .filter(|t| !t.trim().is_empty())
    })
}

fn file_url(file: &Value) -> Option<String> {
    file["file"]["url"]
        .as_str()
        .or_else(|| file["external"]["url"].as_str())
        .map(str::to_string)
}

fn image(page: &Value) -> Option<String> {
    let props = &page["properties"];
    ["Image", "Cover", "Photo"]
        .iter()
        .find_map(|name| props[*name]["files"].as_array()?.first().and_then(file_url))
        .or_else(|| text_property(props, &["Image URL", "Image"]))
        .or_else(|| file_url(&page["cover"]))
}

fn published_at(page: &Value) -> DateTime<Utc> {
    let props = &page["properties"];
    let from_property = ["Date", "Published", "Published At"].iter().find_map(|name| {
        let start = props[*name]["date"]["start"].as_str()?;
        start.parse::<DateTime<Utc>>().ok().or_else(|| {
            start
                .parse::<NaiveDate>()
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
    });
    from_property
        .or_else(|| page["created_time"].as_str()?.parse().ok())
        .unwrap_or_else(Utc::now)
}

/// Maps a Notion page. Pages without a title are skipped.
pub fn page_to_news(page: &Value) -> Option<NewsItem> {
    let props = &page["properties"];
    let news_type = text_property(props, &["Type", "Category"])
        .and_then(|t| t.parse::<NewsKind>().ok())
        .unwrap_or_default();

    Some(NewsItem {
        id: page["id"].as_str()?.to_string(),
        title: title(props)?,
        image: image(page).map(|url| Media::Url(rewrite_image_url(&url))),
        description: text_property(props, &["Description", "Summary"]),
        author: text_property(props, &["Author"]),
        published_at: published_at(page),
        news_type,
    })
}
