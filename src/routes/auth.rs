//! Login and logout.
//!
//! There is no registration page: the first login with a phone number
//! creates the account.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;
use validator::Validate;

use super::form_errors;
use crate::auth::{hash_password, sign_in, sign_out, verify_password};
use crate::db::{RepositoryError, UserRepository};
use crate::domain::aggregates::User;
use crate::domain::value_objects::PhoneNumber;
use crate::error::{AppError, Result};
use crate::state::AppState;

pub const INVALID_PASSWORD: &str = "Invalid password";
const PHONE_ERROR: &str = "Enter your phone number";
/// Longest phone number accepted, counted in digits after normalization.
const MAX_PHONE_DIGITS: usize = 15;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Enter your phone number"))]
    pub phone_number: String,
    #[validate(length(min = 1, message = "Enter a password"))]
    pub password: String,
}

#[derive(Template, WebTemplate, Default)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub messages_error: Vec<String>,
}

pub async fn login_page() -> LoginTemplate {
    LoginTemplate::default()
}

pub async fn login(State(state): State<AppState>, session: Session, Form(form): Form<LoginForm>) -> Result<Response> {
    if let Err(errors) = form.validate() {
        return Ok(LoginTemplate { messages_error: form_errors(&errors) }.into_response());
    }
    let phone = match PhoneNumber::normalize(&form.phone_number) {
        Ok(phone) if phone.as_str().len() <= MAX_PHONE_DIGITS => phone,
        Ok(_) => {
            let message = format!("Phone number is longer than {MAX_PHONE_DIGITS} digits");
            return Ok(LoginTemplate { messages_error: vec![message] }.into_response());
        }
        Err(_) => return Ok(LoginTemplate { messages_error: vec![PHONE_ERROR.to_string()] }.into_response()),
    };

    let users = UserRepository::new(&state.db);
    let (user, hash) = match users.get_credentials(&phone).await? {
        Some(found) => found,
        None => match create_or_existing(&users, &phone, &hash_password(&form.password)?).await? {
            FirstLogin::Created(user) => {
                tracing::info!(user_id = user.id, "Created user on first login");
                sign_in(&session, &user).await?;
                return Ok(Redirect::to("/").into_response());
            }
            FirstLogin::Existing(user, hash) => (user, hash),
        },
    };

    if verify_password(&form.password, &hash) {
        sign_in(&session, &user).await?;
        Ok(Redirect::to("/").into_response())
    } else {
        tracing::warn!(user_id = user.id, "Login failed: invalid password");
        Ok(LoginTemplate { messages_error: vec![INVALID_PASSWORD.to_string()] }.into_response())
    }
}

enum FirstLogin {
    Created(User),
    /// A concurrent request registered the phone first.
    Existing(User, String),
}

async fn create_or_existing(users: &UserRepository<'_>, phone: &PhoneNumber, hash: &str) -> Result<FirstLogin> {
    match users.create(phone, hash).await {
        Ok(user) => Ok(FirstLogin::Created(user)),
        Err(RepositoryError::Conflict(_)) => users
            .get_credentials(phone)
            .await?
            .map(|(user, hash)| FirstLogin::Existing(user, hash))
            .ok_or_else(|| AppError::NotFound(format!("user {phone}"))),
        Err(e) => Err(e.into()),
    }
}

pub async fn logout(session: Session) -> Result<Redirect> {
    sign_out(&session).await?;
    Ok(Redirect::to("/"))
}
