//! Sign-in and sign-up page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Credentials go to the gateway, which sets the session cookie. Sign-up
//! collects the display name and study profile as account metadata and
//! ends with an email confirmation step.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use models::api::SignUpRequest;
use models::profile::ProfileType;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    SignIn,
    SignUp,
}

fn validate_sign_in(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Informe e-mail e senha.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

fn validate_sign_up(
    full_name: &str,
    email: &str,
    password: &str,
    profile_type: &str,
) -> Result<SignUpRequest, &'static str> {
    let full_name = full_name.trim();
    if full_name.is_empty() {
        return Err("Informe seu nome completo.");
    }
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err("Informe um e-mail válido.");
    }
    if password.is_empty() {
        return Err("Informe uma senha.");
    }
    let profile_type = ProfileType::parse(profile_type).ok_or("Escolha seu perfil.")?;
    Ok(SignUpRequest {
        email: email.to_owned(),
        password: password.to_owned(),
        full_name: full_name.to_owned(),
        profile_type,
    })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let mode = RwSignal::new(Mode::SignIn);
    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let profile_type = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_sign_in = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_sign_in(&email.get(), &password.get()) {
            Ok(v) => v,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Entrando...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::sign_in(&email_value, &password_value).await {
                Ok(_) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/");
                    }
                }
                Err(e) => {
                    info.set(format!("Falha ao entrar: {e}"));
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (email_value, password_value);
    };

    let on_sign_up = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_sign_up(&full_name.get(), &email.get(), &password.get(), &profile_type.get()) {
            Ok(r) => r,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Criando conta...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::sign_up(&request).await {
                Ok(()) => {
                    info.set("Conta criada! Verifique seu e-mail para confirmar o cadastro.".to_owned());
                    password.set(String::new());
                    mode.set(Mode::SignIn);
                }
                Err(e) => info.set(format!("Falha no cadastro: {e}")),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    let switch_mode = move |_| {
        info.set(String::new());
        mode.update(|m| *m = if *m == Mode::SignIn { Mode::SignUp } else { Mode::SignIn });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"LexDesk"</h1>
                <p class="login-card__subtitle">
                    {move || if mode.get() == Mode::SignIn { "Entre na sua conta" } else { "Crie sua conta" }}
                </p>
                <Show
                    when=move || mode.get() == Mode::SignUp
                    fallback=move || view! {
                        <form class="login-form" on:submit=on_sign_in>
                            <input
                                class="login-input"
                                type="email"
                                placeholder="voce@exemplo.com"
                                prop:value=move || email.get()
                                on:input=move |ev| email.set(event_target_value(&ev))
                            />
                            <input
                                class="login-input"
                                type="password"
                                placeholder="Senha"
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                            />
                            <button class="login-button" type="submit" disabled=move || busy.get()>"Entrar"</button>
                        </form>
                    }
                >
                    <form class="login-form" on:submit=on_sign_up>
                        <input
                            class="login-input"
                            type="text"
                            placeholder="Nome completo"
                            prop:value=move || full_name.get()
                            on:input=move |ev| full_name.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="email"
                            placeholder="voce@exemplo.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Senha"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <select
                            class="login-input"
                            prop:value=move || profile_type.get()
                            on:change=move |ev| profile_type.set(event_target_value(&ev))
                        >
                            <option value="">"Qual é o seu perfil?"</option>
                            {ProfileType::ALL
                                .into_iter()
                                .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                                .collect::<Vec<_>>()}
                        </select>
                        <button class="login-button" type="submit" disabled=move || busy.get()>"Criar conta"</button>
                    </form>
                </Show>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <button class="login-link" on:click=switch_mode>
                    {move || if mode.get() == Mode::SignIn { "Não tem conta? Cadastre-se" } else { "Já tem conta? Entrar" }}
                </button>
            </div>
        </div>
    }
}
