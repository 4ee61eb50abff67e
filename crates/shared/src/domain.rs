use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);
    };
}

id_newtype!(CategoryId);

pub const DEFAULT_LINK_TITLE: &str = "Link";
pub const DEFAULT_LINK_URL: &str = "#";
pub const DEFAULT_CATEGORY_TITLE: &str = "Category";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub icon: String,
}

impl Link {
    pub fn new(title: impl Into<String>, url: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            icon: icon.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Category {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            DEFAULT_CATEGORY_TITLE
        } else {
            &self.title
        }
    }
}

/// One bookmark as the command bar sees it, flattened out of its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkEntry {
    pub title: String,
    pub url: String,
    pub category_id: CategoryId,
    pub link_index: usize,
}

/// Flattens categories in display order. Blank titles and URLs get the same
/// placeholders the rendered grid shows, so matching sees what the user sees.
pub fn flatten_categories(categories: &[Category]) -> Vec<BookmarkEntry> {
    categories
        .iter()
        .enumerate()
        .flat_map(|(category_index, category)| {
            let category_id = CategoryId(category_index as u32);
            category
                .links
                .iter()
                .enumerate()
                .map(move |(link_index, link)| BookmarkEntry {
                    title: non_blank_or(&link.title, DEFAULT_LINK_TITLE),
                    url: non_blank_or(&link.url, DEFAULT_LINK_URL),
                    category_id,
                    link_index,
                })
        })
        .collect()
}

pub fn category_ids(categories: &[Category]) -> Vec<CategoryId> {
    (0..categories.len())
        .map(|index| CategoryId(index as u32))
        .collect()
}

fn non_blank_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
