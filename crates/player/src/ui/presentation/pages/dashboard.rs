//! Character list with search, filters, sort and paging

use dioxus::prelude::*;
use sheetkeeper_domain::GameSystem;
use sheetkeeper_shared::{CharacterListQuery, CharacterListResponse, CharacterResponse, CharacterSort};

use crate::ui::presentation::components::{ErrorBanner, LoadingSpinner, TagList};
use crate::ui::presentation::services::use_character_service;
use crate::ui::routes::Route;

fn non_empty(text: String) -> Option<String> {
    let text = text.trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// Comma-joined tag filter from free text; spaces and commas both separate tags.
pub fn tag_filter(text: &str) -> Option<String> {
    let tags: Vec<&str> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    (!tags.is_empty()).then(|| tags.join(","))
}

#[component]
pub fn DashboardPage() -> Element {
    let character_service = use_character_service();

    let mut search = use_signal(String::new);
    let mut system: Signal<Option<GameSystem>> = use_signal(|| None);
    let mut tags = use_signal(String::new);
    let mut sort = use_signal(CharacterSort::default);
    let mut page = use_signal(|| 1u32);

    let mut result: Signal<Option<CharacterListResponse>> = use_signal(|| None);
    let mut loading = use_signal(|| true);
    let mut error: Signal<Option<String>> = use_signal(|| None);
    let mut generation = use_signal(|| 0u64);

    use_effect(move || {
        let query = CharacterListQuery {
            query: non_empty(search()),
            tags: tag_filter(&tags()),
            system: system().map(|s| s.as_str().to_string()),
            sort: Some(sort().as_str().to_string()),
            page: Some(i64::from(page())),
            limit: None,
        };
        let svc = character_service.clone();
        let current = *generation.peek() + 1;
        generation.set(current);
        spawn(async move {
            loading.set(true);
            let outcome = svc.list(&query).await;
            // A newer filter change owns the result.
            if *generation.peek() != current {
                return;
            }
            match outcome {
                Ok(list) => {
                    error.set(None);
                    result.set(Some(list));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to load characters");
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    });

    let listing = result.read().clone();
    let page_count = listing.as_ref().map_or(1, |l| l.page_count());
    let current_page = page();

    rsx! {
        div {
            class: "max-w-5xl mx-auto p-6 flex flex-col gap-6",

            div {
                class: "flex justify-between items-center",
                h1 { class: "m-0 text-2xl", "キャラクター一覧" }
                Link {
                    to: Route::CreateRoute {},
                    class: "btn btn-primary",
                    "+ 新規作成"
                }
            }

            div {
                class: "grid grid-cols-4 gap-3",
                input {
                    r#type: "search",
                    class: "input",
                    placeholder: "名前で検索...",
                    value: "{search}",
                    oninput: move |e| {
                        search.set(e.value());
                        page.set(1);
                    },
                }
                select {
                    class: "input",
                    onchange: move |e| {
                        system.set(e.value().parse().ok());
                        page.set(1);
                    },
                    option { value: "", "すべてのシステム" }
                    for s in GameSystem::ALL {
                        option {
                            key: "{s.as_str()}",
                            value: "{s.as_str()}",
                            selected: system() == Some(s),
                            "{s.display_name()}"
                        }
                    }
                }
                input {
                    r#type: "text",
                    class: "input",
                    placeholder: "タグで絞り込み...",
                    value: "{tags}",
                    oninput: move |e| {
                        tags.set(e.value());
                        page.set(1);
                    },
                }
                select {
                    class: "input",
                    onchange: move |e| {
                        if let Ok(next) = e.value().parse() {
                            sort.set(next);
                        }
                    },
                    for s in CharacterSort::ALL {
                        option {
                            key: "{s.as_str()}",
                            value: "{s.as_str()}",
                            selected: sort() == s,
                            "{s.label()}"
                        }
                    }
                }
            }

            ErrorBanner { message: error() }

            if *loading.read() && listing.is_none() {
                LoadingSpinner { message: "キャラクターを読み込み中..." }
            } else if let Some(listing) = listing {
                if listing.items.is_empty() {
                    div {
                        class: "text-center text-gray-400 p-12",
                        "キャラクターがありません。"
                    }
                } else {
                    div {
                        class: "grid grid-cols-3 gap-4",
                        for character in listing.items {
                            CharacterCard { key: "{character.id}", character }
                        }
                    }
                }
                if page_count > 1 {
                    div {
                        class: "flex justify-center items-center gap-4",
                        button {
                            r#type: "button",
                            class: "btn btn-secondary",
                            disabled: current_page <= 1,
                            onclick: move |_| page.set(current_page.saturating_sub(1).max(1)),
                            "前へ"
                        }
                        span { "{current_page} / {page_count}" }
                        button {
                            r#type: "button",
                            class: "btn btn-secondary",
                            disabled: current_page >= page_count,
                            onclick: move |_| page.set(current_page + 1),
                            "次へ"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CharacterCard(character: CharacterResponse) -> Element {
    rsx! {
        Link {
            to: Route::DetailRoute { id: character.id },
            class: "card flex gap-4 items-center",
            if let Some(url) = character.profile_image_url.as_ref().filter(|u| !u.is_empty()) {
                img { class: "w-16 h-16 rounded object-cover", src: "{url}", alt: "{character.name}" }
            } else {
                div { class: "w-16 h-16 rounded bg-gray-700" }
            }
            div {
                class: "flex flex-col gap-1 min-w-0",
                div { class: "font-bold truncate", "{character.name}" }
                div { class: "text-sm text-gray-400", "{character.system.display_name()}" }
                if character.is_public {
                    span { class: "tag tag-success self-start", "公開中" }
                }
                TagList { tags: character.tags.clone() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_filter_splits_on_commas_and_spaces() {
        assert_eq!(tag_filter(""), None);
        assert_eq!(tag_filter("  "), None);
        assert_eq!(tag_filter("探索者, 生存"), Some("探索者,生存".to_string()));
        assert_eq!(tag_filter("a b,,c"), Some("a,b,c".to_string()));
    }
}
