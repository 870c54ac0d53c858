const MAX_SLUG_CHARS: usize = 60;

fn is_malayalam(ch: char) -> bool {
    ('\u{0D00}'..='\u{0D7F}').contains(&ch)
}

fn is_slug_char(ch: char) -> bool {
    is_malayalam(ch) || ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' || ch.is_whitespace()
}

/// Derives the URL slug for an article title.
///
/// Malayalam script is preserved, ASCII is lower-cased, punctuation is
/// dropped and whitespace becomes single hyphens. The result never exceeds
/// 60 characters and slugifying a slug returns it unchanged.
pub fn slugify(title: &str) -> String {
    let lowered = title.trim().to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut prev_hyphen = false;
    for ch in lowered.chars().filter(|c| is_slug_char(*c)) {
        if ch == '-' || ch.is_whitespace() {
            if !prev_hyphen {
                slug.push('-');
                prev_hyphen = true;
            }
        } else {
            slug.push(ch);
            prev_hyphen = false;
        }
    }

    let truncated: String = slug.chars().take(MAX_SLUG_CHARS).collect();
    truncated.trim_matches('-').to_string()
}

/// Path of the shareable article page for `title`.
pub fn news_path(title: &str) -> String {
    format!("/news/{}", slugify(title))
}
