use tauri::State;

use crate::{
    models::{ShirtDraft, ShirtRecord},
    AppState,
};

use super::{
    reference::{self, ReferenceData},
    ImageUpload, ProfileView, ShirtFilter,
};

#[tauri::command]
pub async fn list_shirts(state: State<'_, AppState>) -> Result<Vec<ShirtRecord>, String> {
    state.shirts.list_all().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn list_user_shirts(
    state: State<'_, AppState>,
    user_id: String,
) -> Result<Vec<ShirtRecord>, String> {
    state
        .shirts
        .list_for_user(&user_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_shirt(state: State<'_, AppState>, shirt_id: String) -> Result<ShirtRecord, String> {
    state.shirts.get(&shirt_id).await.map_err(|e| e.to_string())
}

/// Filters a list the frontend already holds.
#[tauri::command]
pub fn filter_shirts(shirts: Vec<ShirtRecord>, filter: ShirtFilter) -> Vec<ShirtRecord> {
    filter.apply_owned(shirts)
}

#[tauri::command]
pub async fn marketplace(
    state: State<'_, AppState>,
    filter: Option<ShirtFilter>,
) -> Result<Vec<ShirtRecord>, String> {
    state
        .shirts
        .marketplace(&filter.unwrap_or_default())
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn unique_seasons(state: State<'_, AppState>) -> Result<Vec<String>, String> {
    let shirts = state.shirts.list_all().await.map_err(|e| e.to_string())?;
    Ok(super::unique_seasons(&shirts))
}

#[tauri::command]
pub fn reference_data() -> ReferenceData {
    reference::reference_data()
}

#[tauri::command]
pub async fn profile_view(
    state: State<'_, AppState>,
    user_id: Option<String>,
) -> Result<ProfileView, String> {
    state
        .shirts
        .profile_view(&state.db, &state.session, user_id.as_deref())
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn add_shirt(
    state: State<'_, AppState>,
    draft: ShirtDraft,
    image: ImageUpload,
) -> Result<String, String> {
    state
        .shirts
        .add_shirt(&state.session, draft, image)
        .await
        .map_err(|e| e.to_string())
}
