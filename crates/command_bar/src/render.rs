//! Projection from router output to grid instructions. The router stays free
//! of any notion of rendered state; the shell applies these in order.

use shared::{domain::CategoryId, protocol::RenderInstruction};

use crate::router::{category_counts, MatchResult};

pub fn project(
    query: &str,
    matches: &[MatchResult],
    category_ids: &[CategoryId],
) -> Vec<RenderInstruction> {
    let searching = !query.trim().is_empty();
    let mut instructions = vec![
        RenderInstruction::ResetAll,
        RenderInstruction::SetSearching { active: searching },
    ];
    if !searching {
        return instructions;
    }

    for m in matches {
        let (prefix, rest) = split_at_chars(&m.entry.title, m.matched_prefix_length);
        instructions.push(RenderInstruction::HighlightLink {
            category_id: m.entry.category_id,
            link_index: m.entry.link_index,
            prefix: prefix.to_string(),
            rest: rest.to_string(),
        });
    }

    let counts = category_counts(matches);
    for &category_id in category_ids {
        if counts.contains_key(&category_id) {
            instructions.push(RenderInstruction::MarkCategoryMatched { category_id });
        } else {
            instructions.push(RenderInstruction::HideCategory { category_id });
        }
    }

    instructions
}

fn split_at_chars(text: &str, count: usize) -> (&str, &str) {
    match text.char_indices().nth(count) {
        Some((idx, _)) => text.split_at(idx),
        None => (text, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::route;
    use shared::domain::BookmarkEntry;

    fn entries() -> Vec<BookmarkEntry> {
        vec![
            BookmarkEntry {
                title: "GitHub".into(),
                url: "https://github.com".into(),
                category_id: CategoryId(0),
                link_index: 0,
            },
            BookmarkEntry {
                title: "Reddit".into(),
                url: "https://www.reddit.com".into(),
                category_id: CategoryId(1),
                link_index: 3,
            },
        ]
    }

    #[test]
    fn empty_query_only_resets() {
        let instructions = project("  ", &[], &[CategoryId(0), CategoryId(1)]);
        assert_eq!(
            instructions,
            vec![
                RenderInstruction::ResetAll,
                RenderInstruction::SetSearching { active: false },
            ]
        );
    }

    #[test]
    fn highlights_prefix_and_hides_empty_categories() {
        let entries = entries();
        let result = route("red", &entries);
        let instructions = project("red", &result.matches, &[CategoryId(0), CategoryId(1)]);

        assert_eq!(
            instructions,
            vec![
                RenderInstruction::ResetAll,
                RenderInstruction::SetSearching { active: true },
                RenderInstruction::HighlightLink {
                    category_id: CategoryId(1),
                    link_index: 3,
                    prefix: "Red".into(),
                    rest: "dit".into(),
                },
                RenderInstruction::HideCategory {
                    category_id: CategoryId(0)
                },
                RenderInstruction::MarkCategoryMatched {
                    category_id: CategoryId(1)
                },
            ]
        );
    }

    #[test]
    fn highlight_covers_title_chars_that_lowercase_to_more() {
        let entries = vec![BookmarkEntry {
            title: "İstanbul".into(),
            url: "https://istanbul.example".into(),
            category_id: CategoryId(0),
            link_index: 0,
        }];
        let query = "İst".to_lowercase();
        let result = route(&query, &entries);
        let instructions = project(&query, &result.matches, &[CategoryId(0)]);

        assert!(instructions.contains(&RenderInstruction::HighlightLink {
            category_id: CategoryId(0),
            link_index: 0,
            prefix: "İst".into(),
            rest: "anbul".into(),
        }));
    }

    #[test]
    fn split_handles_multibyte_titles() {
        assert_eq!(split_at_chars("Café Bleu", 4), ("Café", " Bleu"));
        assert_eq!(split_at_chars("Go", 5), ("Go", ""));
    }
}
