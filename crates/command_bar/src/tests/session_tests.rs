use super::*;
use shared::protocol::Navigation;

fn entries() -> Vec<BookmarkEntry> {
    vec![
        BookmarkEntry {
            title: "Maps".into(),
            url: "https://maps.google.com".into(),
            category_id: CategoryId(0),
            link_index: 3,
        },
        BookmarkEntry {
            title: "MDN Docs".into(),
            url: "https://developer.mozilla.org".into(),
            category_id: CategoryId(2),
            link_index: 2,
        },
    ]
}

#[test]
fn blank_submit_is_ignored() {
    let mut bar = CommandBar::default();
    assert_eq!(bar.on_submit("   ", &entries()), SubmitOutcome::Ignored);
}

#[test]
fn calculation_chains_across_submits() {
    let mut bar = CommandBar::default();
    let entries = entries();

    assert_eq!(
        bar.on_submit("42", &entries),
        SubmitOutcome::Calculated {
            value: 42.0,
            display: "42".into()
        }
    );
    assert_eq!(bar.on_input("+", &entries, &[]).len(), 2);
    assert_eq!(
        bar.on_submit("+8", &entries),
        SubmitOutcome::Calculated {
            value: 50.0,
            display: "50".into()
        }
    );
    assert_eq!(bar.calculator().last_result(), Some(50.0));
}

#[test]
fn typing_a_non_operator_breaks_the_chain() {
    let mut bar = CommandBar::default();
    let entries = entries();
    bar.on_submit("10", &entries);

    bar.on_input("5", &entries, &[]);
    assert_eq!(bar.calculator().last_result(), None);

    // "*2" is no longer chained, so it is not an expression
    assert!(matches!(
        bar.on_submit("*2", &entries),
        SubmitOutcome::Navigate(Navigation::WebSearch { .. })
    ));
}

#[test]
fn declined_text_routes_to_bookmark_or_search() {
    let mut bar = CommandBar::default();
    let entries = entries();

    assert_eq!(
        bar.on_submit("maps", &entries),
        SubmitOutcome::Navigate(Navigation::Bookmark {
            url: "https://maps.google.com".into()
        })
    );
    assert_eq!(
        bar.on_submit("mdn", &entries),
        SubmitOutcome::Navigate(Navigation::WebSearch {
            url: "https://duckduckgo.com/?q=mdn".into()
        })
    );
}

#[test]
fn single_prefix_policy_is_threaded_through() {
    let mut bar = CommandBar::new(RoutePolicy {
        single_prefix_match_navigates: true,
    });
    assert_eq!(
        bar.on_submit("mdn", &entries()),
        SubmitOutcome::Navigate(Navigation::Bookmark {
            url: "https://developer.mozilla.org".into()
        })
    );
}

#[test]
fn live_input_projects_matches() {
    let mut bar = CommandBar::default();
    let instructions = bar.on_input("ma", &entries(), &[CategoryId(0), CategoryId(2)]);
    assert!(instructions.contains(&RenderInstruction::HighlightLink {
        category_id: CategoryId(0),
        link_index: 3,
        prefix: "Ma".into(),
        rest: "ps".into(),
    }));
    assert!(instructions.contains(&RenderInstruction::HideCategory {
        category_id: CategoryId(2)
    }));
}
