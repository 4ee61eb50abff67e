use command_bar::{CommandBar, RoutePolicy};
use shared::{
    domain::{flatten_categories, Category, CategoryId, Link},
    protocol::{Navigation, RenderInstruction, SubmitOutcome},
};

fn categories() -> Vec<Category> {
    vec![
        Category {
            title: "Search".into(),
            icon: "search".into(),
            links: vec![
                Link::new("Go", "https://go.dev", ""),
                Link::new("Google", "https://www.google.com", "google"),
            ],
        },
        Category {
            title: "Dev".into(),
            icon: "code".into(),
            links: vec![Link::new("GitHub", "https://github.com", "github")],
        },
    ]
}

#[test]
fn typing_and_submitting_walks_through_every_mode() {
    let categories = categories();
    let entries = flatten_categories(&categories);
    let ids = vec![CategoryId(0), CategoryId(1)];
    let mut bar = CommandBar::new(RoutePolicy::default());

    let preview = bar.on_input("go", &entries, &ids);
    let highlighted = preview
        .iter()
        .filter(|i| matches!(i, RenderInstruction::HighlightLink { .. }))
        .count();
    assert_eq!(highlighted, 2);
    assert!(preview.contains(&RenderInstruction::HideCategory {
        category_id: CategoryId(1)
    }));

    assert_eq!(
        bar.on_submit("go", &entries),
        SubmitOutcome::Navigate(Navigation::Bookmark {
            url: "https://go.dev".into()
        })
    );

    bar.on_input("10", &entries, &ids);
    assert!(matches!(
        bar.on_submit("10", &entries),
        SubmitOutcome::Calculated { value, .. } if value == 10.0
    ));
    bar.on_input("+8", &entries, &ids);
    assert!(matches!(
        bar.on_submit("+8", &entries),
        SubmitOutcome::Calculated { value, .. } if value == 18.0
    ));

    bar.on_input("goo", &entries, &ids);
    assert_eq!(bar.calculator().last_result(), None);
    assert_eq!(
        bar.on_submit("goo", &entries),
        SubmitOutcome::Navigate(Navigation::WebSearch {
            url: "https://duckduckgo.com/?q=goo".into()
        })
    );
}

#[test]
fn single_prefix_policy_navigates_to_the_only_candidate() {
    let entries = flatten_categories(&categories());
    let mut bar = CommandBar::new(RoutePolicy {
        single_prefix_match_navigates: true,
    });

    assert_eq!(
        bar.on_submit("git", &entries),
        SubmitOutcome::Navigate(Navigation::Bookmark {
            url: "https://github.com".into()
        })
    );
    assert!(matches!(
        bar.on_submit("g", &entries),
        SubmitOutcome::Navigate(Navigation::WebSearch { .. })
    ));
}
