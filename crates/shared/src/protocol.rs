use serde::{Deserialize, Serialize};

use crate::domain::CategoryId;

pub const WEB_SEARCH_ENDPOINT: &str = "https://duckduckgo.com/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Navigation {
    Bookmark { url: String },
    WebSearch { url: String },
}

impl Navigation {
    pub fn url(&self) -> &str {
        match self {
            Self::Bookmark { url } | Self::WebSearch { url } => url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Ignored,
    Calculated { value: f64, display: String },
    Navigate(Navigation),
}

/// Instructions for the shell that owns the rendered category grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum RenderInstruction {
    ResetAll,
    SetSearching {
        active: bool,
    },
    HighlightLink {
        category_id: CategoryId,
        link_index: usize,
        prefix: String,
        rest: String,
    },
    HideCategory {
        category_id: CategoryId,
    },
    MarkCategoryMatched {
        category_id: CategoryId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollCommand {
    pub index: usize,
    pub offset: f64,
}
