//! Book reader: embedded viewer with tutor and ambient audio at hand.

#[cfg(test)]
#[path = "reader_test.rs"]
mod reader_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};

use models::chat::TutorContext;

use crate::components::tutor_button::TutorButton;
use crate::pages::library::ensure_catalog;
use crate::state::audio::AudioPlayerState;
use crate::state::auth::AuthState;
use crate::state::library::{LibraryState, browsing_context, reader_context};
use crate::util::auth::install_unauth_redirect;

fn parse_book_id(raw: Option<String>) -> Option<i64> {
    raw?.trim().parse().ok()
}

#[component]
pub fn ReaderPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let library = expect_context::<RwSignal<LibraryState>>();
    let audio = expect_context::<RwSignal<AudioPlayerState>>();
    let params = use_params_map();
    install_unauth_redirect(auth, use_navigate());

    Effect::new(move || ensure_catalog(library));

    let book_id = move || parse_book_id(params.with(|p| p.get("id")));
    let book = Memo::new(move |_| book_id().and_then(|id| library.with(|l| l.find(id).cloned())));
    let context = Signal::derive(move || library.with(|l| context_for(l, book_id())));

    view! {
        <div class="reader-page">
            <header class="reader-page__header">
                <a class="btn" href="/biblioteca">"← Voltar"</a>
                <span class="reader-page__title">{move || book.with(|b| b.as_ref().map(|b| b.title.clone()).unwrap_or_default())}</span>
                <button class="btn reader-page__ambient" on:click=move |_| audio.update(|a| a.dialog_open = true)>
                    "🎵 Som Ambiente"
                </button>
            </header>
            {move || match book.get() {
                None if library.with(|l| l.loading || !l.loaded) => {
                    view! { <p class="reader-page__loading">"Carregando..."</p> }.into_any()
                }
                None => view! { <p class="reader-page__missing">"Livro não encontrado."</p> }.into_any(),
                Some(book) if book.has_reader_link() => {
                    view! {
                        <iframe
                            class="reader-page__frame"
                            src=book.link.clone().unwrap_or_default()
                            allow="fullscreen"
                            title=book.title.clone()
                            {leptos::tachys::html::attribute::custom::custom_attribute("loading", "lazy")}
                        ></iframe>
                    }
                        .into_any()
                }
                Some(book) => view! {
                    <div class="reader-page__details">
                        {book.has_cover().then(|| view! { <img class="reader-page__cover" src=book.cover_url.clone() alt=book.title.clone()/> })}
                        <h2>{book.title.clone()}</h2>
                        {book.author.clone().map(|a| view! { <p>"Autor: " {a}</p> })}
                        {book.description.clone().map(|d| view! { <p class="reader-page__about">{d}</p> })}
                        <p class="reader-page__no-link">"Este livro não possui link disponível no momento."</p>
                    </div>
                }
                    .into_any(),
            }}
            <TutorButton context=context/>
        </div>
    }
}

/// Tutor context for the book at `id`, or the library context while it is unknown.
fn context_for(library: &LibraryState, id: Option<i64>) -> TutorContext {
    id.and_then(|id| library.find(id)).map_or_else(browsing_context, reader_context)
}
