use tauri::State;

use crate::{catalog::CatalogError, models::ShirtDraft, AppState};

use super::{CaptureSnapshot, OverlayGuide, ShotLabel};

#[tauri::command]
pub async fn capture_state(state: State<'_, AppState>) -> Result<CaptureSnapshot, String> {
    Ok(state.capture.lock().await.snapshot())
}

#[tauri::command]
pub fn set_camera_permission(state: State<'_, AppState>, granted: bool) {
    state.camera.set_permission(granted);
}

/// Returns `false` once no stream is open so the webview can stop its
/// frame loop.
#[tauri::command]
pub fn push_camera_frame(state: State<'_, AppState>, frame: String) -> Result<bool, String> {
    state
        .camera
        .push_encoded_frame(&frame)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn start_capture(
    state: State<'_, AppState>,
    stage: ShotLabel,
) -> Result<CaptureSnapshot, String> {
    let mut capture = state.capture.lock().await;
    capture
        .start_capture(stage)
        .await
        .map_err(|e| e.to_string())?;
    Ok(capture.snapshot())
}

/// `auto_crop` overrides the stored default for this shot only.
#[tauri::command]
pub async fn capture_shot(
    state: State<'_, AppState>,
    stage: ShotLabel,
    auto_crop: Option<bool>,
) -> Result<CaptureSnapshot, String> {
    let auto_crop = auto_crop.unwrap_or_else(|| state.settings.auto_crop());
    let mut capture = state.capture.lock().await;
    capture
        .capture(stage, auto_crop)
        .map_err(|e| e.to_string())?;
    Ok(capture.snapshot())
}

#[tauri::command]
pub async fn capture_preview(
    state: State<'_, AppState>,
    stage: ShotLabel,
) -> Result<Option<String>, String> {
    Ok(state.capture.lock().await.preview(stage))
}

#[tauri::command]
pub async fn retake_shot(
    state: State<'_, AppState>,
    stage: ShotLabel,
) -> Result<CaptureSnapshot, String> {
    let mut capture = state.capture.lock().await;
    capture.retake(stage).map_err(|e| e.to_string())?;
    Ok(capture.snapshot())
}

#[tauri::command]
pub async fn cancel_capture(state: State<'_, AppState>) -> Result<CaptureSnapshot, String> {
    let mut capture = state.capture.lock().await;
    capture.cancel();
    Ok(capture.snapshot())
}

/// Hands the reviewed stills to the uploader and returns the new shirt id.
#[tauri::command]
pub async fn submit_capture(state: State<'_, AppState>, draft: ShirtDraft) -> Result<String, String> {
    // Checked up front: the controller discards its shots on submit.
    if !state.session.is_signed_in() {
        return Err(CatalogError::NotAuthenticated.to_string());
    }
    if draft.name.trim().is_empty() {
        return Err(CatalogError::MissingName.to_string());
    }

    let shots = state
        .capture
        .lock()
        .await
        .submit()
        .map_err(|e| CatalogError::from(e).to_string())?;

    state
        .shirts
        .add_captured_shirt(&state.session, draft, shots)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn overlay_guide(stage: ShotLabel) -> OverlayGuide {
    *OverlayGuide::for_shot(stage)
}
