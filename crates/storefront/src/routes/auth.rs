//! Authentication route handlers.
//!
//! Handles login, signup, logout, and password changes. Validation
//! failures re-render the form with an inline error message; everything
//! else propagates as `AppError`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(rename = "emailOrPhone")]
    pub email_or_phone: String,
    pub password: String,
}

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

/// Change password form data.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordForm {
    #[serde(rename = "currentPassword")]
    pub current_password: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub user: Option<CurrentUser>,
    pub error: Option<String>,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub user: Option<CurrentUser>,
    pub error: Option<String>,
}

/// Change password page template.
#[derive(Template, WebTemplate)]
#[template(path = "change_password.html")]
pub struct ChangePasswordTemplate {
    pub user: Option<CurrentUser>,
    pub error: Option<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate {
        user: None,
        error: None,
    }
}

/// Handle login form submission.
///
/// On success stores the user's id and email in the session and
/// redirects home.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.pool());

    match auth.login(&form.email_or_phone, &form.password).await {
        Ok(user) => {
            set_current_user(&session, &user)
                .await
                .map_err(|e| AppError::Internal(format!("failed to set session: {e}")))?;
            set_sentry_user(&user.id, Some(user.email.as_str()));

            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::UserNotFound | AuthError::InvalidCredentials) => {
            // Same message for both so account existence is not revealed.
            let page = LoginTemplate {
                user: None,
                error: Some("Invalid email or password".to_string()),
            };
            Ok((StatusCode::UNAUTHORIZED, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page() -> impl IntoResponse {
    SignupTemplate {
        user: None,
        error: None,
    }
}

/// Handle signup form submission.
///
/// Creates the account and redirects to the login page; signup does not
/// log the user in.
#[instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.pool());

    match auth
        .signup(&form.email, &form.password, &form.confirm_password)
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "new account created");
            Ok(Redirect::to("/login").into_response())
        }
        Err(AuthError::UserAlreadyExists) => {
            let page = SignupTemplate {
                user: None,
                error: Some("An account with this email already exists".to_string()),
            };
            Ok((StatusCode::CONFLICT, page).into_response())
        }
        Err(
            e @ (AuthError::MissingFields
            | AuthError::PasswordMismatch
            | AuthError::InvalidEmail(_)),
        ) => {
            let page = SignupTemplate {
                user: None,
                error: Some(AppError::from(e).user_message()),
            };
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Change Password Routes
// =============================================================================

/// Display the change password page.
pub async fn change_password_page(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    ChangePasswordTemplate {
        user: Some(user),
        error: None,
    }
}

/// Handle change password form submission.
///
/// The user to update comes from the session, never from the form.
#[instrument(skip_all)]
pub async fn change_password(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<ChangePasswordForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.pool());

    match auth
        .change_password(
            user.id,
            &form.current_password,
            &form.new_password,
            &form.confirm_password,
        )
        .await
    {
        Ok(()) => Ok(Redirect::to("/profile").into_response()),
        Err(AuthError::InvalidCredentials) => {
            let page = ChangePasswordTemplate {
                user: Some(user),
                error: Some("Current password is incorrect".to_string()),
            };
            Ok((StatusCode::UNAUTHORIZED, page).into_response())
        }
        Err(e @ (AuthError::MissingFields | AuthError::PasswordMismatch)) => {
            let page = ChangePasswordTemplate {
                user: Some(user),
                error: Some(AppError::from(e).user_message()),
            };
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Destroys the whole session, not just the user key.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Response> {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    clear_sentry_user();

    Ok(Redirect::to("/").into_response())
}
