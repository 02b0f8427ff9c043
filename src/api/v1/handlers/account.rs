/*
 * Responsibility
 * - /whoami: public, reports the caller if a token resolved
 * - /account routes: module with required token authentication
 */
use axum::Json;
use serde::Serialize;

use crate::auth::CurrentUser;

#[derive(Debug, Serialize)]
pub struct WhoAmIResponse {
    pub authenticated: bool,
    pub user_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_name: String,
    pub claims: Vec<String>,
}

pub async fn whoami(user: Option<CurrentUser>) -> Json<WhoAmIResponse> {
    Json(WhoAmIResponse {
        authenticated: user.is_some(),
        user_name: user.map(|u| u.user_name().to_string()),
    })
}

pub async fn profile(user: CurrentUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        user_name: user.user_name().to_string(),
        claims: user.claims().to_vec(),
    })
}
