//! Recursive mind-map node renderer.

use leptos::prelude::*;

use models::mind_map::MindMapNode;

/// One node and its subtree. `on_add_child` receives the node id.
#[component]
pub fn MindMapNodeView(node: MindMapNode, on_add_child: Callback<String>) -> impl IntoView {
    let id = node.id.clone();
    let level_class = format!("mind-node mind-node--level-{}", node.level.min(4));
    let children = node
        .children
        .into_iter()
        .map(|child| view! { <MindMapNodeView node=child on_add_child=on_add_child/> }.into_any())
        .collect::<Vec<_>>();

    view! {
        <div class=level_class>
            <div class="mind-node__card">
                <span class="mind-node__title">{node.title}</span>
                {(!node.content.is_empty()).then(|| view! { <p class="mind-node__content">{node.content.clone()}</p> })}
                <button
                    class="btn btn--small mind-node__add"
                    on:click=move |_| on_add_child.run(id.clone())
                    title="Adicionar tópico"
                >
                    "+"
                </button>
            </div>
            <div class="mind-node__children">{children}</div>
        </div>
    }
}
