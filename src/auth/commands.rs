use tauri::State;

use crate::{
    models::{Principal, ProfileRecord},
    AppState,
};

use super::SignUpRequest;

#[tauri::command]
pub async fn sign_up(
    state: State<'_, AppState>,
    request: SignUpRequest,
) -> Result<Principal, String> {
    state.auth.sign_up(request).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn sign_in(
    state: State<'_, AppState>,
    email: String,
    password: String,
) -> Result<Principal, String> {
    state
        .auth
        .sign_in(&email, &password)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn sign_out(state: State<'_, AppState>) {
    state.auth.sign_out();
}

#[tauri::command]
pub fn current_user(state: State<'_, AppState>) -> Option<Principal> {
    state.auth.current_principal()
}

#[tauri::command]
pub async fn get_profile(
    state: State<'_, AppState>,
    user_id: String,
) -> Result<Option<ProfileRecord>, String> {
    state
        .auth
        .get_profile(&user_id)
        .await
        .map_err(|e| e.to_string())
}
