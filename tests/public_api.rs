mod common;

use std::sync::Arc;

use axum::http::{header, StatusCode};
use serde_json::json;

use common::*;
use gramika_backend::{
    cms::MemoryCms,
    models::{cache::CacheEntry, news::NewsItem},
    routes::make_app,
    utils::{config::NotionConfig, state::AppState},
};

#[tokio::test]
async fn health_check_responds() {
    let t = spawn_app(Vec::new());
    let (status, body) = send(&t.app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn news_feed_is_filtered_sorted_and_resolved() {
    let t = spawn_app(vec![
        news("a", "Old local", "local", 1),
        news("b", "National story", "national", 2),
        news("c", "New local", "local", 3),
    ]);

    let res = tower::ServiceExt::oneshot(t.app.clone(), get("/api/sanity/news?type=local&t=123"))
        .await
        .unwrap();
    assert_eq!(res.headers()[header::CACHE_CONTROL], "no-store");

    let (status, body) = send(&t.app, get("/api/sanity/news?type=local")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["New local", "Old local"]);
    assert_eq!(
        body[0]["image"],
        "https://cdn.sanity.io/images/proj/test/chash-800x600.jpg"
    );

    let (_, all) = send(&t.app, get("/api/sanity/news")).await;
    assert_eq!(titles(&all).len(), 3);

    let (status, unknown) = send(&t.app, get("/api/sanity/news?type=weather")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unknown, json!([]));
}

#[tokio::test]
async fn advertisements_respect_position_and_schedule() {
    let t = spawn_app(vec![
        json!({ "_id": "ad1", "_type": "advertisement", "title": "Top banner", "position": "banner",
                "image": "https://x.test/banner.png" }),
        json!({ "_id": "ad2", "_type": "advertisement", "title": "Side", "position": "ad-one",
                "image": "https://x.test/side.png" }),
        json!({ "_id": "ad3", "_type": "advertisement", "title": "Expired", "position": "banner",
                "image": "https://x.test/old.png", "endDate": "2020-01-01T00:00:00Z" }),
        json!({ "_id": "ad4", "_type": "advertisement", "title": "Paused", "position": "banner",
                "image": "https://x.test/p.png", "active": false }),
    ]);

    let (_, banners) = send(&t.app, get("/api/sanity/advertisements?position=banner")).await;
    assert_eq!(titles(&banners), vec!["Top banner"]);

    let (_, everything) = send(&t.app, get("/api/sanity/advertisements?all=true")).await;
    assert_eq!(titles(&everything).len(), 4);

    let (status, bogus) = send(&t.app, get("/api/sanity/advertisements?position=footer")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bogus, json!([]));
}

#[tokio::test]
async fn settings_default_to_visible_and_follow_the_cms() {
    let t = spawn_app(Vec::new());
    t.state.settings.refresh().await;
    let (_, defaults) = send(&t.app, get("/api/sanity/settings")).await;
    assert_eq!(defaults["liveStreamVisible"], true);
    assert_eq!(defaults["topStoriesVisible"], true);

    let t = spawn_app(vec![json!({
        "_id": "siteSettings", "_type": "siteSettings", "liveStreamVisible": false
    })]);
    t.state.settings.refresh().await;
    let (_, stored) = send(&t.app, get("/api/sanity/settings")).await;
    assert_eq!(stored["liveStreamVisible"], false);
    assert_eq!(stored["heroSectionVisible"], true);
}

#[tokio::test]
async fn ticker_lists_live_items_by_priority() {
    let t = spawn_app(vec![
        breaking("low", 1, true),
        breaking("high", 9, true),
        breaking("off", 20, false),
    ]);
    t.state.ticker.refresh().await;

    let (_, ticker) = send(&t.app, get("/api/sanity/breaking-news")).await;
    assert_eq!(titles(&ticker), vec!["Breaking high", "Breaking low"]);

    let (_, all) = send(&t.app, get("/api/sanity/breaking-news?all=true")).await;
    assert_eq!(titles(&all), vec!["Breaking off", "Breaking high", "Breaking low"]);
}

#[tokio::test]
async fn inactive_records_are_hidden_unless_requested() {
    let t = spawn_app(vec![
        json!({ "_id": "o1", "_type": "obituary", "name": "K. Raman", "age": 82, "place": "Thrissur",
                "dateOfDeath": "2025-05-01" }),
        json!({ "_id": "o2", "_type": "obituary", "name": "P. Devaki", "age": 90, "place": "Palakkad",
                "dateOfDeath": "2025-05-03", "active": false }),
        json!({ "_id": "d1", "_type": "doctor", "name": "Dr B", "specialization": "ENT", "order": 2 }),
        json!({ "_id": "d2", "_type": "doctor", "name": "Dr A", "specialization": "GP", "order": 1 }),
    ]);

    let (_, visible) = send(&t.app, get("/api/sanity/obituaries")).await;
    assert_eq!(visible.as_array().unwrap().len(), 1);
    assert_eq!(visible[0]["name"], "K. Raman");

    let (_, all) = send(&t.app, get("/api/sanity/obituaries?all=true")).await;
    assert_eq!(all[0]["name"], "P. Devaki");

    let (_, doctors) = send(&t.app, get("/api/sanity/doctors")).await;
    assert_eq!(doctors[0]["name"], "Dr A");
    assert_eq!(doctors[1]["name"], "Dr B");
}

#[tokio::test]
async fn news_pages_partition_the_feed() {
    let docs = (1..=5)
        .map(|i| news(&format!("n{i}"), &format!("Story {i}"), "local", i))
        .collect();
    let t = spawn_app(docs);

    let (status, page) = send(&t.app, get("/api/news?type=local&page=2&size=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&page["items"]), vec!["Story 3", "Story 2"]);
    assert_eq!(page["page"], 2);
    assert_eq!(page["totalPages"], 3);
    assert_eq!(page["total"], 5);

    let (_, clamped) = send(&t.app, get("/api/news?type=local&page=99&size=2")).await;
    assert_eq!(clamped["page"], 3);
    assert_eq!(titles(&clamped["items"]), vec!["Story 1"]);

    let (status, _) = send(&t.app, get("/api/news?type=weather")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&t.app, get("/api/news?type=local&page=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
    assert!(body["message"].is_string());

    let (status, body) = send(&t.app, get("/api/news/resolve/story-1?size=-2")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn slugs_resolve_across_sibling_feeds() {
    let mut docs: Vec<_> = (1..=6)
        .map(|i| news(&format!("l{i}"), &format!("Local {i}"), "local", i))
        .collect();
    docs.push(news("x", "Breaking: Major News!!", "national", 1));
    docs.push(news("m", "തൃശൂർ പൂരം 2025: ഒരു വിശകലനം", "local", 7));
    let t = spawn_app(docs);

    let (status, found) = send(
        &t.app,
        get("/api/news/resolve/breaking-major-news?type=local&size=4"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["type"], "national");
    assert_eq!(found["index"], 0);
    assert_eq!(found["page"], 1);
    assert_eq!(found["item"]["_id"], "x");
    assert_eq!(found["share"]["url"], "https://gramika.test/news/breaking-major-news");
    assert!(found["share"]["whatsapp"]
        .as_str()
        .unwrap()
        .starts_with("https://wa.me/?text="));

    let (status, local) = send(&t.app, get("/api/news/resolve/local-1?type=local&size=4")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(local["index"], 6);
    assert_eq!(local["page"], 2);

    let encoded = urlencoding::encode("തൃശൂർ-പൂരം-2025-ഒരു-വിശകലനം").into_owned();
    let (status, malayalam) = send(
        &t.app,
        get(&format!("/api/news/resolve/{encoded}?type=national")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(malayalam["item"]["_id"], "m");
    assert_eq!(malayalam["type"], "local");

    let (status, missing) = send(&t.app, get("/api/news/resolve/nothing-here?type=top")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(missing["error"].is_string());
}

#[tokio::test]
async fn image_links_are_rewritten() {
    let t = spawn_app(Vec::new());
    let target = urlencoding::encode("https://drive.google.com/file/d/abc123/view").into_owned();
    let (status, body) = send(&t.app, get(&format!("/api/image-link?url={target}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "https://drive.google.com/uc?export=view&id=abc123");

    let (status, _) = send(&t.app, get("/api/image-link")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn notion_articles_are_empty_without_configuration() {
    let t = spawn_app(Vec::new());
    let (status, body) = send(&t.app, get("/api/notion/articles")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn queued_notion_requests_reuse_a_freshly_cached_result() {
    let mut config = test_config();
    config.notion = Some(NotionConfig {
        token: "secret".to_string(),
        database_id: "db".to_string(),
    });
    let state = AppState::init(config, Arc::new(MemoryCms::new(cdn())), reqwest::Client::new());
    let app = make_app(state.clone());

    let guard = state.notion_limiter.acquire().await.unwrap();
    let pending = tokio::spawn({
        let app = app.clone();
        async move { send(&app, get("/api/notion/articles")).await }
    });
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }

    let article: NewsItem =
        serde_json::from_value(json!({ "_id": "page-1", "title": "From Notion" })).unwrap();
    state.notion_cache.insert(
        "db".to_string(),
        CacheEntry::new(vec![article], chrono::Duration::minutes(5)),
    );
    drop(guard);

    let (status, body) = pending.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["From Notion"]);
}
