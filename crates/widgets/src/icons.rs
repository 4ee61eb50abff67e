use url::Url;

pub const LUCIDE_BASE: &str = "https://cdn.jsdelivr.net/npm/lucide-static/icons/";
pub const SIMPLE_ICONS_BASE: &str = "https://cdn.simpleicons.org/";
pub const DEFAULT_CATEGORY_ICON: &str = "frontend/media/news.png";
pub const DEFAULT_LINK_ICON: &str = "frontend/media/none.png";

/// Sources to try in order: the Lucide glyph, then the Simple Icons brand
/// logo. Blank names go straight to the fallback.
pub fn icon_sources(name: &str, fallback: &str) -> Vec<String> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return vec![fallback.to_string()];
    }

    let sources: Vec<String> = [
        cdn_url(LUCIDE_BASE, &format!("{name}.svg")),
        cdn_url(SIMPLE_ICONS_BASE, &name),
    ]
    .into_iter()
    .flatten()
    .collect();

    if sources.is_empty() {
        vec![fallback.to_string()]
    } else {
        sources
    }
}

fn cdn_url(base: &str, file: &str) -> Option<String> {
    let mut url = Url::parse(base).ok()?;
    url.path_segments_mut().ok()?.pop_if_empty().push(file);
    Some(url.into())
}
