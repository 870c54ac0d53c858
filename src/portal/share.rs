use serde::Serialize;
use url::{ParseError, Url};

use crate::{models::news::NewsItem, utils::slug::news_path};

/// Share targets offered in the article modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub url: String,
    pub whatsapp: String,
    pub facebook: String,
    pub twitter: String,
    pub telegram: String,
}

impl ShareLinks {
    pub fn for_item(base_url: &str, item: &NewsItem) -> Result<Self, ParseError> {
        let url = Url::parse(base_url)?.join(&news_path(&item.title))?;
        let link = url.as_str();
        let title = item.title.trim();

        Ok(ShareLinks {
            whatsapp: Url::parse_with_params("https://wa.me/", &[("text", format!("{title} {link}"))])?
                .into(),
            facebook: Url::parse_with_params("https://www.facebook.com/sharer/sharer.php", &[("u", link)])?
                .into(),
            twitter: Url::parse_with_params(
                "https://twitter.com/intent/tweet",
                &[("url", link), ("text", title)],
            )?
            .into(),
            telegram: Url::parse_with_params(
                "https://t.me/share/url",
                &[("url", link), ("text", title)],
            )?
            .into(),
            url: link.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::news::NewsKind, portal::listing::tests::item};

    #[test]
    fn builds_encoded_links() {
        let news = item("n1", "Breaking: Major News!!", NewsKind::Local);
        let links = ShareLinks::for_item("https://gramika.example/", &news).unwrap();
        assert_eq!(links.url, "https://gramika.example/news/breaking-major-news");
        assert_eq!(
            links.facebook,
            "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fgramika.example%2Fnews%2Fbreaking-major-news"
        );
        assert!(links.whatsapp.starts_with("https://wa.me/?text=Breaking%3A+Major+News%21%21+https"));
        assert!(links.twitter.contains("text=Breaking%3A+Major+News%21%21"));
        assert!(links.telegram.starts_with("https://t.me/share/url?url="));
    }

    #[test]
    fn malayalam_paths_are_percent_encoded() {
        let news = item("n2", "തൃശൂർ പൂരം", NewsKind::Local);
        let links = ShareLinks::for_item("https://gramika.example", &news).unwrap();
        assert!(links.url.starts_with("https://gramika.example/news/%E0%B4"));
        assert!(links.url.is_ascii());
    }

    #[test]
    fn rejects_bad_base() {
        let news = item("n3", "x", NewsKind::Local);
        assert!(ShareLinks::for_item("not a url", &news).is_err());
    }
}
