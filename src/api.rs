//! API Client
//!
//! One async function per backend endpoint. Every call attaches the bearer
//! token when one is stored; a 401 from any endpoint clears the persisted
//! session and hard-navigates to `/login`.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::models::{
    Campaign, CampaignContact, CampaignStats, Channel, ChannelMessage, ChatThread, Community,
    Contact, Group, GroupMessage, Message, Profile, Template, TemplateParameter, User,
};
use crate::store;

const DEFAULT_API_URL: &str = "http://localhost:8000";

fn base_url() -> &'static str {
    option_env!("WHATSHUB_API_URL").unwrap_or(DEFAULT_API_URL)
}

fn url(path: &str) -> String {
    format!("{}{}", base_url(), path)
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("cannot connect to server: {0}")]
    Network(String),
    #[error("session expired")]
    Unauthorized,
    #[error("{detail}")]
    Api { status: u16, detail: String },
    #[error("unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message suitable for a toast, preferring the backend's `detail`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Api { detail, .. } => detail.clone(),
            ApiError::Network(_) => "Cannot connect to server".to_string(),
            _ => fallback.to_string(),
        }
    }
}

fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match store::read_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
        None => builder,
    }
}

fn redirect_to_login() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href("/login");
    }
}

async fn check(response: Response) -> Result<Response, ApiError> {
    if response.status() == 401 {
        store::clear_session();
        redirect_to_login();
        return Err(ApiError::Unauthorized);
    }
    if !response.ok() {
        let status = response.status();
        let detail = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("detail").and_then(|d| d.as_str().map(String::from)))
            .unwrap_or_else(|| format!("Request failed ({status})"));
        return Err(ApiError::Api { status, detail });
    }
    Ok(response)
}

async fn get_json<T: DeserializeOwned>(
    path: &str,
    query: &[(&str, &str)],
) -> Result<T, ApiError> {
    let mut builder = with_auth(Request::get(&url(path)));
    if !query.is_empty() {
        builder = builder.query(query.iter().copied());
    }
    let response = builder
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    decode(check(response).await?).await
}

async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let response = with_auth(Request::post(&url(path)))
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    decode(check(response).await?).await
}

async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let response = with_auth(Request::put(&url(path)))
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    decode(check(response).await?).await
}

/// POST with no interesting response body (201/204 endpoints).
async fn post_empty<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    let response = with_auth(Request::post(&url(path)))
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check(response).await.map(|_| ())
}

async fn delete_empty(path: &str) -> Result<(), ApiError> {
    let response = with_auth(Request::delete(&url(path)))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check(response).await.map(|_| ())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

// ========================
// Auth
// ========================

#[derive(Serialize)]
pub struct RegisterPayload<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct LoginPayload<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub access_token: String,
}

pub async fn register(payload: &RegisterPayload<'_>) -> Result<User, ApiError> {
    post_json("/auth/register", payload).await
}

pub async fn login(payload: &LoginPayload<'_>) -> Result<Token, ApiError> {
    post_json("/auth/login", payload).await
}

pub async fn current_user() -> Result<User, ApiError> {
    get_json("/auth/me", &[]).await
}

// ========================
// Profile
// ========================

#[derive(Serialize, Default)]
pub struct UpdateProfilePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

pub async fn profile() -> Result<Profile, ApiError> {
    get_json("/profile/", &[]).await
}

pub async fn update_profile(payload: &UpdateProfilePayload) -> Result<Profile, ApiError> {
    put_json("/profile/", payload).await
}

// ========================
// Contacts
// ========================

#[derive(Serialize)]
pub struct CreateContactPayload {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub tags: Vec<String>,
    pub source: String,
}

#[derive(Serialize, Default)]
pub struct UpdateContactPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailVerification {
    pub registered: bool,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

pub async fn contacts(search: &str, limit: u32) -> Result<Vec<Contact>, ApiError> {
    let limit = limit.to_string();
    let mut query = vec![("limit", limit.as_str())];
    if !search.is_empty() {
        query.push(("search", search));
    }
    get_json("/contacts/", &query).await
}

pub async fn contact(id: &str) -> Result<Contact, ApiError> {
    get_json(&format!("/contacts/{id}"), &[]).await
}

pub async fn create_contact(payload: &CreateContactPayload) -> Result<Contact, ApiError> {
    post_json("/contacts/", payload).await
}

pub async fn update_contact(id: &str, payload: &UpdateContactPayload) -> Result<Contact, ApiError> {
    put_json(&format!("/contacts/{id}"), payload).await
}

pub async fn delete_contact(id: &str) -> Result<(), ApiError> {
    delete_empty(&format!("/contacts/{id}")).await
}

pub async fn all_tags() -> Result<Vec<String>, ApiError> {
    get_json("/contacts/tags/all", &[]).await
}

pub async fn verify_email(email: &str) -> Result<EmailVerification, ApiError> {
    get_json("/contacts/verify-email", &[("email", email)]).await
}

// ========================
// Chat
// ========================

#[derive(Serialize)]
pub struct SendMessagePayload<'a> {
    pub contact_id: &'a str,
    pub content: &'a str,
    #[serde(rename = "type")]
    pub kind: &'a str,
}

#[derive(Serialize)]
pub struct SendTemplatePayload<'a> {
    pub contact_id: &'a str,
    pub template_id: &'a str,
    pub parameters: &'a HashMap<String, String>,
}

pub async fn chat_threads(limit: u32) -> Result<Vec<ChatThread>, ApiError> {
    get_json("/chat/threads", &[("limit", &limit.to_string())]).await
}

pub async fn thread_messages(contact_id: &str, limit: u32) -> Result<Vec<Message>, ApiError> {
    get_json(
        &format!("/chat/threads/{contact_id}/messages"),
        &[("limit", &limit.to_string())],
    )
    .await
}

pub async fn send_message(payload: &SendMessagePayload<'_>) -> Result<Message, ApiError> {
    post_json("/chat/send", payload).await
}

pub async fn send_template(payload: &SendTemplatePayload<'_>) -> Result<Message, ApiError> {
    post_json("/chat/send-template", payload).await
}

// ========================
// Campaigns
// ========================

#[derive(Serialize)]
pub struct CreateCampaignPayload {
    pub name: String,
    pub sheet_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_parameters: Option<HashMap<String, String>>,
}

pub async fn campaigns() -> Result<Vec<Campaign>, ApiError> {
    get_json("/campaigns/", &[]).await
}

pub async fn create_campaign(payload: &CreateCampaignPayload) -> Result<Campaign, ApiError> {
    post_json("/campaigns/", payload).await
}

pub async fn campaign_stats(id: &str) -> Result<CampaignStats, ApiError> {
    get_json(&format!("/campaigns/{id}/stats"), &[]).await
}

pub async fn campaign_contacts(id: &str) -> Result<Vec<CampaignContact>, ApiError> {
    get_json(&format!("/campaigns/{id}/contacts"), &[]).await
}

// ========================
// Templates
// ========================

#[derive(Serialize)]
pub struct CreateTemplatePayload {
    pub name: String,
    pub category: String,
    pub content: String,
    pub parameters: Vec<TemplateParameter>,
}

pub async fn templates() -> Result<Vec<Template>, ApiError> {
    get_json("/templates/", &[]).await
}

pub async fn create_template(payload: &CreateTemplatePayload) -> Result<Template, ApiError> {
    post_json("/templates/", payload).await
}

// ========================
// Sheets
// ========================

#[derive(Debug, Clone, Deserialize)]
pub struct SheetValidation {
    pub valid: bool,
    #[serde(default)]
    pub sheet_names: Vec<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetPreview {
    #[serde(default)]
    pub total_rows: u32,
    #[serde(default)]
    pub preview_rows: u32,
    #[serde(default)]
    pub data: Vec<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub columns: Vec<String>,
}

pub async fn validate_sheet(sheet_url: &str) -> Result<SheetValidation, ApiError> {
    get_json("/sheets/validate", &[("sheet_url", sheet_url)]).await
}

pub async fn preview_sheet(sheet_url: &str, sheet_name: &str) -> Result<SheetPreview, ApiError> {
    let mut query = vec![("sheet_url", sheet_url)];
    if !sheet_name.is_empty() {
        query.push(("sheet_name", sheet_name));
    }
    get_json("/sheets/preview", &query).await
}

// ========================
// Channels
// ========================

#[derive(Serialize)]
pub struct CreateChannelPayload {
    pub name: String,
    pub description: String,
}

#[derive(Serialize)]
pub struct PostMessagePayload<'a> {
    pub content: &'a str,
}

pub async fn channels(search: &str) -> Result<Vec<Channel>, ApiError> {
    let query: &[(&str, &str)] = if search.is_empty() {
        &[]
    } else {
        &[("search", search)]
    };
    get_json("/channels/", query).await
}

pub async fn following_channels() -> Result<Vec<Channel>, ApiError> {
    get_json("/channels/following", &[]).await
}

pub async fn create_channel(payload: &CreateChannelPayload) -> Result<Channel, ApiError> {
    post_json("/channels/", payload).await
}

pub async fn follow_channel(id: &str) -> Result<(), ApiError> {
    post_empty(&format!("/channels/{id}/follow"), &serde_json::json!({})).await
}

pub async fn unfollow_channel(id: &str) -> Result<(), ApiError> {
    delete_empty(&format!("/channels/{id}/unfollow")).await
}

pub async fn channel_messages(id: &str) -> Result<Vec<ChannelMessage>, ApiError> {
    get_json(&format!("/channels/{id}/messages"), &[]).await
}

pub async fn post_channel_message(
    id: &str,
    payload: &PostMessagePayload<'_>,
) -> Result<ChannelMessage, ApiError> {
    post_json(&format!("/channels/{id}/messages"), payload).await
}

// ========================
// Communities
// ========================

#[derive(Serialize)]
pub struct CreateCommunityPayload {
    pub name: String,
    pub description: String,
}

#[derive(Serialize)]
pub struct CreateGroupPayload {
    pub name: String,
    pub description: String,
}

pub async fn communities() -> Result<Vec<Community>, ApiError> {
    get_json("/communities/", &[]).await
}

pub async fn create_community(payload: &CreateCommunityPayload) -> Result<Community, ApiError> {
    post_json("/communities/", payload).await
}

pub async fn create_group(
    community_id: &str,
    payload: &CreateGroupPayload,
) -> Result<Group, ApiError> {
    post_json(&format!("/communities/{community_id}/groups"), payload).await
}

pub async fn join_group(group_id: &str) -> Result<(), ApiError> {
    post_empty(
        &format!("/communities/groups/{group_id}/join"),
        &serde_json::json!({}),
    )
    .await
}

pub async fn group_messages(group_id: &str) -> Result<Vec<GroupMessage>, ApiError> {
    get_json(&format!("/communities/groups/{group_id}/messages"), &[]).await
}

pub async fn post_group_message(
    group_id: &str,
    payload: &PostMessagePayload<'_>,
) -> Result<GroupMessage, ApiError> {
    post_json(&format!("/communities/groups/{group_id}/messages"), payload).await
}
