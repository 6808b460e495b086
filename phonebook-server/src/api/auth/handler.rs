//! Authentication Handlers
//!
//! Handles admin login, logout and the current-session lookup

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use shared::client::{AdminInfo, LoginRequest, LoginResponse};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::ApiResponse;
use crate::utils::validation::validate_login;

/// Login handler
///
/// Verifies admin credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_login(&req.email, &req.password)?;

    let admin = state
        .admin_repository()
        .find_by_email(&req.email)
        .await
        .map_err(|e| AppError::store_unavailable(e.to_string()))?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(state.config.login_delay_ms)).await;

    // Unified error message to prevent email enumeration
    let admin = match admin {
        Some(a) => {
            let password_valid = a
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                security_log!("WARN", "login_failed", email = req.email.clone(), reason = "invalid_password");
                return Err(AppError::invalid_credentials());
            }
            a
        }
        None => {
            security_log!("WARN", "login_failed", email = req.email.clone(), reason = "unknown_email");
            return Err(AppError::invalid_credentials());
        }
    };

    let jwt_service = state.get_jwt_service();
    let token = jwt_service
        .generate_token(&admin.id, &admin.email)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(admin_id = %admin.id, email = %admin.email, "Admin logged in");

    Ok(Json(LoginResponse {
        token,
        expires_in: jwt_service.expires_in_seconds(),
        user: AdminInfo {
            id: admin.id,
            email: admin.email,
        },
    }))
}

/// Get current admin info
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<AdminInfo>, AppError> {
    let admin = state
        .admin_repository()
        .find_by_id(&user.id)
        .await
        .map_err(|e| AppError::store_unavailable(e.to_string()))?
        .ok_or_else(AppError::not_authenticated)?;

    Ok(Json(AdminInfo {
        id: admin.id,
        email: admin.email,
    }))
}

/// Logout handler
///
/// Tokens are stateless; the client discards its copy.
pub async fn logout(Extension(user): Extension<CurrentUser>) -> Json<ApiResponse<()>> {
    security_log!("INFO", "logout", user_id = user.id.clone(), email = user.email.clone());
    tracing::info!(admin_id = %user.id, "Admin logged out");
    Json(ApiResponse::ok())
}
