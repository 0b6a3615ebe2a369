//! Mind-map page: create, generate from a document, view and export.
//!
//! SYSTEM CONTEXT
//! ==============
//! Maps live in `MindMapsState` for the session only. Generation uploads the
//! chosen file through the gateway; export is either a clipboard outline or
//! a JSON download of the current map.
//!
//! ERROR HANDLING
//! ==============
//! Every outcome the user triggers is reported as a toast; failures are also
//! logged to the console.

#[cfg(test)]
#[path = "mind_maps_test.rs"]
mod mind_maps_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use models::mind_map::MindMap;

use crate::components::mind_map_node::MindMapNodeView;
use crate::components::toast_stack::notify;
use crate::state::auth::AuthState;
use crate::state::mind_maps::{MindMapTab, MindMapsState};
use crate::state::ui::{ToastKind, UiState};
use crate::util::auth::install_unauth_redirect;
use crate::util::media;

const MSG_TITLE_REQUIRED: &str = "Digite um título para o mapa mental";
const MSG_CREATED: &str = "Mapa mental criado com sucesso!";
#[cfg(feature = "hydrate")]
const MSG_FILE_ERROR: &str = "Erro ao processar arquivo";
#[cfg(feature = "hydrate")]
const MSG_GENERATED: &str = "Mapa mental gerado com sucesso!";
#[cfg(feature = "hydrate")]
const MSG_GENERATE_FAILED: &str = "Erro ao gerar mapa mental. Tente novamente.";
const MSG_EXPORTED: &str = "Mapa mental exportado!";
const MSG_EXPORT_FAILED: &str = "Não foi possível exportar o mapa mental";
#[cfg(feature = "hydrate")]
const MSG_COPIED: &str = "Mapa mental copiado para área de transferência!";
#[cfg(feature = "hydrate")]
const MSG_COPY_FAILED: &str = "Não foi possível copiar o mapa mental";

/// Caption for a saved map's size.
pub fn topic_count_label(count: usize) -> String {
    if count == 1 {
        "1 tópico".to_owned()
    } else {
        format!("{count} tópicos")
    }
}

#[component]
pub fn MindMapsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let maps = expect_context::<RwSignal<MindMapsState>>();
    install_unauth_redirect(auth, use_navigate());

    view! {
        <div class="mind-maps-page">
            <h1>"🧠 Mapas Mentais"</h1>
            <nav class="tabs">
                {MindMapTab::ALL
                    .into_iter()
                    .map(|tab| view! {
                        <button
                            class="tabs__tab"
                            class:tabs__tab--active=move || maps.with(|m| m.tab == tab)
                            on:click=move |_| maps.update(|m| m.tab = tab)
                        >
                            {tab.label()}
                        </button>
                    })
                    .collect::<Vec<_>>()}
            </nav>
            {move || match maps.with(|m| m.tab) {
                MindMapTab::Create => view! { <CreateTab/> }.into_any(),
                MindMapTab::Generate => view! { <GenerateTab/> }.into_any(),
                MindMapTab::View => view! { <ViewTab/> }.into_any(),
            }}
            <SavedMaps/>
        </div>
    }
}

#[component]
fn CreateTab() -> impl IntoView {
    let maps = expect_context::<RwSignal<MindMapsState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match maps.try_update(|m| m.create(media::new_id(), media::now_ms())) {
            Some(Ok(())) => notify(ui, ToastKind::Success, MSG_CREATED),
            _ => notify(ui, ToastKind::Error, MSG_TITLE_REQUIRED),
        }
    };

    view! {
        <form class="mind-maps-page__form" on:submit=on_submit>
            <input
                class="login-input"
                type="text"
                placeholder="Título do mapa mental"
                prop:value=move || maps.with(|m| m.draft_title.clone())
                on:input=move |ev| maps.update(|m| m.draft_title = event_target_value(&ev))
            />
            <textarea
                class="login-input"
                rows="3"
                placeholder="Descrição (opcional)"
                prop:value=move || maps.with(|m| m.draft_description.clone())
                on:input=move |ev| maps.update(|m| m.draft_description = event_target_value(&ev))
            ></textarea>
            <button class="btn btn--primary" type="submit">"Criar Mapa Mental"</button>
        </form>
    }
}

#[component]
fn GenerateTab() -> impl IntoView {
    let maps = expect_context::<RwSignal<MindMapsState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let on_file = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let Some(file) = media::selected_file(&ev) else {
                return;
            };
            if !maps.try_update(MindMapsState::begin_generate).unwrap_or(false) {
                return;
            }
            leptos::task::spawn_local(async move {
                let upload = match media::read_file(&file).await {
                    Ok(upload) => upload,
                    Err(e) => {
                        log::warn!("document read failed: {e}");
                        maps.update(MindMapsState::fail_generate);
                        notify(ui, ToastKind::Error, MSG_FILE_ERROR);
                        return;
                    }
                };
                match crate::net::api::generate_mind_map(upload).await {
                    Ok(map) => {
                        maps.update(|m| m.insert_generated(map));
                        notify(ui, ToastKind::Success, MSG_GENERATED);
                    }
                    Err(e) => {
                        log::error!("mind map generation failed: {e}");
                        maps.update(MindMapsState::fail_generate);
                        notify(ui, ToastKind::Error, MSG_GENERATE_FAILED);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (ev, ui);
    };

    view! {
        <div class="mind-maps-page__generate">
            <p>"Envie um documento (PDF, imagem ou texto) e a IA cria o mapa mental."</p>
            <input
                type="file"
                accept=".pdf,.txt,.doc,.docx,image/*"
                disabled=move || maps.with(|m| m.generating)
                on:change=on_file
            />
            <Show when=move || maps.with(|m| m.generating)>
                <p class="mind-maps-page__progress">"Gerando mapa mental..."</p>
            </Show>
        </div>
    }
}

fn export_json(ui: RwSignal<UiState>, map: &MindMap) {
    let outcome = map
        .to_json()
        .map_err(|e| e.to_string())
        .and_then(|json| media::download_text(&map.export_file_name(), media::JSON_MIME, &json));
    match outcome {
        Ok(()) => notify(ui, ToastKind::Success, MSG_EXPORTED),
        Err(e) => {
            #[cfg(feature = "hydrate")]
            log::warn!("mind map export failed: {e}");
            #[cfg(not(feature = "hydrate"))]
            let _ = e;
            notify(ui, ToastKind::Error, MSG_EXPORT_FAILED);
        }
    }
}

fn copy_outline(ui: RwSignal<UiState>, map: &MindMap) {
    let text = map.to_text();
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match media::copy_text(&text).await {
            Ok(()) => notify(ui, ToastKind::Success, MSG_COPIED),
            Err(e) => {
                log::warn!("clipboard write failed: {e}");
                notify(ui, ToastKind::Error, MSG_COPY_FAILED);
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (ui, text);
}

#[component]
fn ViewTab() -> impl IntoView {
    let maps = expect_context::<RwSignal<MindMapsState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let on_add_child = Callback::new(move |parent_id: String| {
        maps.update(|m| {
            m.add_child(&parent_id, media::new_id());
        });
    });

    view! {
        {move || match maps.with(|m| m.current().cloned()) {
            None => view! { <p class="mind-maps-page__empty">"Crie ou gere um mapa mental para visualizá-lo aqui."</p> }
                .into_any(),
            Some(map) => {
                let for_copy = map.clone();
                let for_export = map.clone();
                view! {
                    <section class="mind-map">
                        <header class="mind-map__header">
                            <div>
                                <h2>{map.title.clone()}</h2>
                                <p>{map.description.clone()}</p>
                            </div>
                            <div class="mind-map__actions">
                                <button class="btn" on:click=move |_| copy_outline(ui, &for_copy)>"Copiar texto"</button>
                                <button class="btn" on:click=move |_| export_json(ui, &for_export)>"Exportar JSON"</button>
                            </div>
                        </header>
                        <div class="mind-map__tree">
                            {map
                                .nodes
                                .into_iter()
                                .map(|node| view! { <MindMapNodeView node=node on_add_child=on_add_child/> })
                                .collect::<Vec<_>>()}
                        </div>
                    </section>
                }
                    .into_any()
            }
        }}
    }
}

#[component]
fn SavedMaps() -> impl IntoView {
    let maps = expect_context::<RwSignal<MindMapsState>>();

    view! {
        <Show when=move || maps.with(|m| !m.maps.is_empty())>
            <section class="saved-maps">
                <h2>"Meus mapas"</h2>
                <ul>
                    {move || {
                        let current = maps.with(|m| m.current_id.clone());
                        maps.with(|m| m.maps.clone())
                            .into_iter()
                            .map(|map| {
                                let id = map.id.clone();
                                let active = current.as_deref() == Some(map.id.as_str());
                                view! {
                                    <li>
                                        <button
                                            class="btn saved-maps__item"
                                            class:saved-maps__item--active=active
                                            on:click=move |_| {
                                                maps.update(|m| {
                                                    m.select(&id);
                                                });
                                            }
                                        >
                                            {map.title.clone()}
                                            <span class="saved-maps__count">{topic_count_label(map.node_count())}</span>
                                        </button>
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </ul>
            </section>
        </Show>
    }
}
