//! Library page: area grid, then the searchable list of one area.
//!
//! SYSTEM CONTEXT
//! ==============
//! The catalog is fetched once into `LibraryState` and reused by the reader
//! page. Selecting an area swaps the grid for that area's list; search,
//! sort and preview all run over the cached rows.

#[cfg(test)]
#[path = "library_test.rs"]
mod library_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use models::book::book_count_label;

use crate::components::book_card::{BookCard, BookPreview};
use crate::components::tutor_button::TutorButton;
use crate::state::auth::AuthState;
use crate::state::library::{LibraryState, browsing_context};
use crate::util::auth::install_unauth_redirect;

fn catalog_caption(books: usize, areas: usize) -> String {
    let livros = if books == 1 { "livro organizado" } else { "livros organizados" };
    let noun = if areas == 1 { "área" } else { "áreas" };
    format!("{books} {livros} em {areas} {noun} do direito")
}

/// Fetch the catalog unless it is already cached or loading.
pub fn ensure_catalog(library: RwSignal<LibraryState>) {
    let (loaded, loading) = library.with_untracked(|l| (l.loaded, l.loading));
    if loaded || loading {
        return;
    }
    library.update(LibraryState::begin_load);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = crate::net::api::fetch_books().await;
        if let Err(e) = &result {
            log::error!("catalog fetch failed: {e}");
        }
        library.update(|l| l.finish_load(result));
    });
}

#[component]
pub fn LibraryPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let library = expect_context::<RwSignal<LibraryState>>();
    install_unauth_redirect(auth, use_navigate());

    Effect::new(move || ensure_catalog(library));

    view! {
        <div class="library-page">
            <Show when=move || library.with(|l| l.error.is_some())>
                <p class="library-page__error">"Não foi possível carregar a biblioteca. Tente novamente mais tarde."</p>
            </Show>
            <Show
                when=move || !library.with(|l| l.loading)
                fallback=move || view! { <p class="library-page__loading">"Carregando biblioteca..."</p> }
            >
                <Show when=move || library.with(|l| l.area.is_some()) fallback=|| view! { <AreaGrid/> }>
                    <BookList/>
                </Show>
            </Show>
            <TutorButton context=Signal::derive(browsing_context)/>
        </div>
    }
}

#[component]
fn AreaGrid() -> impl IntoView {
    let library = expect_context::<RwSignal<LibraryState>>();

    view! {
        <header class="library-page__header">
            <h1>"📚 Biblioteca Jurídica"</h1>
            <p>{move || library.with(|l| {
                let summaries = l.area_summaries();
                catalog_caption(l.books.len(), summaries.len())
            })}</p>
        </header>
        <div class="area-grid">
            {move || {
                library
                    .with(LibraryState::area_summaries)
                    .into_iter()
                    .map(|summary| {
                        let area = summary.area.clone();
                        view! {
                            <button
                                class="area-card"
                                on:click=move |_| library.update(|l| l.select_area(Some(area.clone())))
                            >
                                <span class="area-card__count">{book_count_label(summary.count)}</span>
                                <h2 class="area-card__title">{summary.area}</h2>
                                <div class="area-card__covers">
                                    {summary
                                        .preview
                                        .into_iter()
                                        .map(|src| view! { <img class="area-card__cover" src=src alt="" loading="lazy"/> })
                                        .collect::<Vec<_>>()}
                                    {(summary.overflow > 0).then(|| view! {
                                        <span class="area-card__more">{format!("+{}", summary.overflow)}</span>
                                    })}
                                </div>
                            </button>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

#[component]
fn BookList() -> impl IntoView {
    let library = expect_context::<RwSignal<LibraryState>>();
    let visible = Memo::new(move |_| library.with(LibraryState::visible_books));
    let on_preview = Callback::new(move |id: i64| library.update(|l| l.open_preview(id)));
    let on_close_preview = Callback::new(move |()| library.update(LibraryState::close_preview));

    view! {
        <header class="library-page__header">
            <button class="btn" on:click=move |_| library.update(|l| l.select_area(None))>"← Áreas"</button>
            <h1>{move || library.with(|l| l.area.clone().unwrap_or_default())}</h1>
            <span class="library-page__count">{move || book_count_label(visible.with(Vec::len))}</span>
        </header>
        <div class="library-page__controls">
            <input
                class="library-page__search"
                type="search"
                placeholder="Buscar por título, autor ou descrição..."
                prop:value=move || library.with(|l| l.search.clone())
                on:input=move |ev| library.update(|l| l.search = event_target_value(&ev))
            />
            <button class="btn" on:click=move |_| library.update(LibraryState::toggle_sort)>
                {move || library.with(|l| l.sort.label())}
            </button>
        </div>
        <div class="book-list">
            <For
                each=move || visible.get()
                key=|book| book.id
                children=move |book| view! { <BookCard book=book on_preview=on_preview/> }
            />
        </div>
        <Show when=move || visible.with(Vec::is_empty)>
            <p class="library-page__empty">"Nenhum livro encontrado."</p>
        </Show>
        {move || {
            library
                .with(|l| l.preview.clone())
                .map(|book| view! { <BookPreview book=book on_close=on_close_preview/> })
        }}
    }
}
