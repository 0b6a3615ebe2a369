//! HTTP implementation of [`Backend`] over the managed service's REST conventions.
//!
//! - auth: `/auth/v1/{signup,token,logout,user}`
//! - store: `/rest/v1/{table}` with `column=eq.value` filters
//! - functions: `POST /functions/v1/{name}`
//!
//! Every request carries the public key as `apikey`; the bearer token is the
//! caller's access token when there is one, otherwise the public key.

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use models::book::Book;
use models::profile::{AuthUser, ProfileRow, Session, SettingsRow, UserMetadata};

use super::config::{BackendConfig, TableNames};
use super::types::{BackendError, check_function_reply, error_message};
use super::Backend;

pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    tables: TableNames,
}

impl HttpBackend {
    /// Build a client from typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| BackendError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            anon_key: config.anon_key.clone(),
            tables: config.tables.clone(),
        })
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        self.http
            .request(method, endpoint(&self.base_url, path))
            .header("apikey", &self.anon_key)
            .bearer_auth(token.unwrap_or(&self.anon_key))
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(BackendError::Status { status: status.as_u16(), message: error_message(&text) });
        }
        Ok(text)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, BackendError> {
        let text = self.send(request).await?;
        serde_json::from_str(&text).map_err(|e| BackendError::Parse(e.to_string()))
    }

    async fn select_one<T: DeserializeOwned>(
        &self,
        token: &str,
        table: &str,
        columns: &str,
        id: &str,
    ) -> Result<Option<T>, BackendError> {
        let filter = eq_filter(id);
        let request = self
            .request(Method::GET, &table_path(table), Some(token))
            .query(&[("select", columns), ("id", filter.as_str()), ("limit", "1")]);
        let rows: Vec<T> = self.send_json(request).await?;
        Ok(rows.into_iter().next())
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    data: &'a UserMetadata,
}

#[derive(Serialize)]
struct NameUpdate<'a> {
    nome_completo: &'a str,
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &UserMetadata,
        redirect_to: Option<&str>,
    ) -> Result<(), BackendError> {
        let mut request = self
            .request(Method::POST, "/auth/v1/signup", None)
            .json(&SignUpBody { email, password, data: metadata });
        if let Some(url) = redirect_to {
            request = request.query(&[("redirect_to", url)]);
        }
        self.send(request).await.map(|_| ())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let request = self
            .request(Method::POST, "/auth/v1/token", None)
            .query(&[("grant_type", "password")])
            .json(&Credentials { email, password });
        self.send_json(request).await
    }

    async fn sign_out(&self, token: &str) -> Result<(), BackendError> {
        let request = self.request(Method::POST, "/auth/v1/logout", Some(token));
        self.send(request).await.map(|_| ())
    }

    async fn get_user(&self, token: &str) -> Result<AuthUser, BackendError> {
        let request = self.request(Method::GET, "/auth/v1/user", Some(token));
        self.send_json(request).await
    }

    async fn fetch_profile_row(&self, token: &str, user_id: &str) -> Result<Option<ProfileRow>, BackendError> {
        self.select_one(token, &self.tables.profiles, "id,nome_completo,email", user_id)
            .await
    }

    async fn fetch_settings_row(&self, token: &str, user_id: &str) -> Result<Option<SettingsRow>, BackendError> {
        self.select_one(token, &self.tables.settings, "profile_type", user_id)
            .await
    }

    async fn insert_profile_row(&self, token: &str, row: &ProfileRow) -> Result<(), BackendError> {
        let request = self
            .request(Method::POST, &table_path(&self.tables.profiles), Some(token))
            .header("Prefer", "return=minimal")
            .json(row);
        self.send(request).await.map(|_| ())
    }

    async fn update_profile_name(&self, token: &str, user_id: &str, full_name: &str) -> Result<(), BackendError> {
        let request = self
            .request(Method::PATCH, &table_path(&self.tables.profiles), Some(token))
            .query(&[("id", eq_filter(user_id))])
            .header("Prefer", "return=minimal")
            .json(&NameUpdate { nome_completo: full_name });
        self.send(request).await.map(|_| ())
    }

    async fn list_books(&self, token: Option<&str>) -> Result<Vec<Book>, BackendError> {
        let request = self
            .request(Method::GET, &table_path(&self.tables.books), token)
            .query(&[("select", "*"), ("order", "id.asc")]);
        self.send_json(request).await
    }

    async fn invoke(
        &self,
        name: &str,
        token: Option<&str>,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, BackendError> {
        let request = self
            .request(Method::POST, &function_path(name), token)
            .json(&payload);
        let value: serde_json::Value = self.send_json(request).await?;
        check_function_reply(value)
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn table_path(table: &str) -> String {
    format!("/rest/v1/{table}")
}

fn function_path(name: &str) -> String {
    format!("/functions/v1/{name}")
}

fn eq_filter(value: &str) -> String {
    format!("eq.{value}")
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
