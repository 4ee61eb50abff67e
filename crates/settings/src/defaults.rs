use shared::domain::{Category, Link};

fn category(title: &str, icon: &str, links: [(&str, &str, &str); 4]) -> Category {
    Category {
        title: title.to_string(),
        icon: icon.to_string(),
        links: links
            .into_iter()
            .map(|(title, url, icon)| Link::new(title, url, icon))
            .collect(),
    }
}

pub fn default_categories() -> Vec<Category> {
    vec![
        category(
            "Search",
            "search",
            [
                ("Google", "https://www.google.com", "google"),
                ("YouTube", "https://www.youtube.com", "youtube"),
                ("Wikipedia", "https://www.wikipedia.org", "wikipedia"),
                ("Maps", "https://maps.google.com", "map"),
            ],
        ),
        category(
            "Social",
            "users",
            [
                ("Reddit", "https://www.reddit.com", "reddit"),
                ("X", "https://x.com", "x-twitter"),
                ("LinkedIn", "https://www.linkedin.com", "linkedin"),
                ("Instagram", "https://www.instagram.com", "instagram"),
            ],
        ),
        category(
            "Dev",
            "code",
            [
                ("GitHub", "https://github.com", "github"),
                ("Stack Overflow", "https://stackoverflow.com", "stack-overflow"),
                ("MDN Docs", "https://developer.mozilla.org", "mdnwebdocs"),
                ("NPM", "https://www.npmjs.com", "npm"),
            ],
        ),
        category(
            "Shopping",
            "shopping-bag",
            [
                ("Amazon", "https://www.amazon.com", "amazon"),
                ("eBay", "https://www.ebay.com", "ebay"),
                ("Newegg", "https://www.newegg.com", "newegg"),
                ("AliExpress", "https://www.aliexpress.com", "aliexpress"),
            ],
        ),
    ]
}
