use url::Url;

/// Rewrites share links from common image hosts into URLs that serve the
/// image bytes directly. Anything unrecognised is returned unchanged.
pub fn rewrite_image_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let Ok(mut url) = Url::parse(trimmed) else {
        return trimmed.to_string();
    };

    let host = url.host_str().map(str::to_owned);
    match host.as_deref() {
        Some("drive.google.com") => google_drive_id(&url)
            .map(|id| format!("https://drive.google.com/uc?export=view&id={id}"))
            .unwrap_or_else(|| trimmed.to_string()),
        Some("www.dropbox.com") | Some("dropbox.com") => {
            let pairs: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(k, _)| k != "dl" && k != "raw")
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            url.query_pairs_mut()
                .clear()
                .extend_pairs(pairs)
                .append_pair("raw", "1");
            url.to_string()
        }
        Some("imgur.com") | Some("www.imgur.com") => {
            let segments: Vec<&str> = url.path_segments().map(|s| s.collect()).unwrap_or_default();
            match segments.as_slice() {
                [id] if !id.is_empty() && !id.contains('.') => format!("https://i.imgur.com/{id}.jpg"),
                _ => trimmed.to_string(),
            }
        }
        _ => trimmed.to_string(),
    }
}

fn google_drive_id(url: &Url) -> Option<String> {
    let segments: Vec<&str> = url.path_segments()?.collect();
    if let ["file", "d", id, ..] = segments.as_slice() {
        return Some(id.to_string());
    }
    url.query_pairs()
        .find(|(k, _)| k == "id")
        .map(|(_, v)| v.into_owned())
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn google_drive_file_links() {
        assert_eq!(
            rewrite_image_url("https://drive.google.com/file/d/1AbC_xyz/view?usp=sharing"),
            "https://drive.google.com/uc?export=view&id=1AbC_xyz"
        );
        assert_eq!(
            rewrite_image_url("https://drive.google.com/open?id=1AbC_xyz"),
            "https://drive.google.com/uc?export=view&id=1AbC_xyz"
        );
    }

    #[test]
    fn dropbox_links_serve_raw() {
        assert_eq!(
            rewrite_image_url("https://www.dropbox.com/s/abc/photo.jpg?dl=0"),
            "https://www.dropbox.com/s/abc/photo.jpg?raw=1"
        );
    }

    #[test]
    fn imgur_pages_point_at_image_host() {
        assert_eq!(rewrite_image_url("https://imgur.com/aBc123"), "https://i.imgur.com/aBc123.jpg");
        assert_eq!(
            rewrite_image_url("https://imgur.com/gallery/aBc123"),
            "https://imgur.com/gallery/aBc123"
        );
    }

    #[test]
    fn passthrough() {
        assert_eq!(rewrite_image_url("https://cdn.example.com/a.png"), "https://cdn.example.com/a.png");
        assert_eq!(rewrite_image_url(" not a url "), "not a url");
    }
}
