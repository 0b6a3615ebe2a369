//! Catalog card and preview dialog for a single book.
//!
//! DESIGN
//! ======
//! Cards only request a preview; opening the reader is always an explicit
//! action from the preview so the list stays cheap to scan.

use leptos::prelude::*;

use models::book::Book;

/// A clickable list entry for one book.
#[component]
pub fn BookCard(book: Book, on_preview: Callback<i64>) -> impl IntoView {
    let id = book.id;
    let download = book.download.clone();
    let link = book.link.clone();

    view! {
        <article class="book-card" on:click=move |_| on_preview.run(id)>
            <div class="book-card__cover">
                {if book.has_cover() {
                    view! { <img src=book.cover_url.clone() alt=book.title.clone() loading="lazy"/> }.into_any()
                } else {
                    view! { <span class="book-card__cover-placeholder">"📖"</span> }.into_any()
                }}
            </div>
            <div class="book-card__body">
                <h3 class="book-card__title">{book.title.clone()}</h3>
                {book.author.clone().map(|a| view! { <p class="book-card__author">{a}</p> })}
                {book.description.clone().map(|d| view! { <p class="book-card__description">{d}</p> })}
                <div class="book-card__actions">
                    {download.map(|href| view! {
                        <a class="btn btn--small" href=href target="_blank" rel="noopener" on:click=|ev| ev.stop_propagation()>
                            "Download"
                        </a>
                    })}
                    {link.map(|href| view! {
                        <a class="btn btn--small" href=href target="_blank" rel="noopener" on:click=|ev| ev.stop_propagation()>
                            "Link"
                        </a>
                    })}
                </div>
            </div>
        </article>
    }
}

/// Modal preview with the "read now" action.
#[component]
pub fn BookPreview(book: Book, on_close: Callback<()>) -> impl IntoView {
    let reader_href = format!("/leitor/{}", book.id);

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div
                class="dialog dialog--book"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
                tabindex="0"
            >
                <header class="dialog__header">
                    <h2>{book.title.clone()}</h2>
                    <button class="btn" on:click=move |_| on_close.run(()) aria-label="Fechar">"✕"</button>
                </header>
                {book.author.clone().map(|a| view! { <p class="dialog__subtitle">{a}</p> })}
                <div class="dialog__book-body">
                    {book.has_cover().then(|| view! { <img class="dialog__cover" src=book.cover_url.clone() alt=book.title.clone()/> })}
                    {book.description.clone().map(|d| view! {
                        <section>
                            <h3>"Sobre o livro"</h3>
                            <p>{d}</p>
                        </section>
                    })}
                </div>
                <div class="dialog__actions">
                    <a class="btn btn--primary" href=reader_href>"Ler agora"</a>
                    {book.download.clone().map(|href| view! {
                        <a class="btn" href=href target="_blank" rel="noopener">"Download"</a>
                    })}
                </div>
            </div>
        </div>
    }
}
