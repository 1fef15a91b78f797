pub mod auth;
pub mod capture;
pub mod catalog;
pub mod config;
pub mod db;
pub mod models;
pub mod settings;
pub mod storage;
pub mod utils;

#[cfg(feature = "desktop")]
pub use desktop::run;

#[cfg(feature = "desktop")]
pub(crate) use desktop::AppState;

#[cfg(feature = "desktop")]
mod desktop {
    use anyhow::Context;
    use tauri::{Emitter, Manager, State};
    use tokio::sync::Mutex;

    use crate::{
        auth::{
            commands::{current_user, get_profile, sign_in, sign_out, sign_up},
            AuthService, Session,
        },
        capture::{
            commands::{
                cancel_capture, capture_preview, capture_shot, capture_state, overlay_guide,
                push_camera_frame, retake_shot, set_camera_permission, start_capture,
                submit_capture,
            },
            CaptureController, WebviewCamera,
        },
        catalog::{
            commands::{
                add_shirt, filter_shirts, get_shirt, list_shirts, list_user_shirts, marketplace,
                profile_view, reference_data, unique_seasons,
            },
            ShirtService,
        },
        config::{self, AppConfig},
        db::Database,
        settings::{SettingsStore, ThemePreference},
        storage::FsBlobStore,
        utils::logging,
    };

    const THEME_CHANGED_EVENT: &str = "theme-changed";
    const SESSION_CHANGED_EVENT: &str = "session-changed";

    pub(crate) struct AppState {
        pub(crate) db: Database,
        pub(crate) session: Session,
        pub(crate) auth: AuthService<Database>,
        pub(crate) shirts: ShirtService<Database, FsBlobStore>,
        pub(crate) camera: WebviewCamera,
        pub(crate) capture: Mutex<CaptureController<WebviewCamera>>,
        pub(crate) settings: SettingsStore,
    }

    #[tauri::command]
    fn get_theme(state: State<AppState>) -> ThemePreference {
        state.settings.theme()
    }

    #[tauri::command]
    fn set_theme(theme: ThemePreference, state: State<AppState>) -> Result<(), String> {
        state.settings.set_theme(theme).map_err(|e| e.to_string())
    }

    #[tauri::command]
    fn toggle_theme(state: State<AppState>) -> Result<ThemePreference, String> {
        state.settings.toggle_theme().map_err(|e| e.to_string())
    }

    #[tauri::command]
    fn get_auto_crop(state: State<AppState>) -> bool {
        state.settings.auto_crop()
    }

    #[tauri::command]
    fn set_auto_crop(enabled: bool, state: State<AppState>) -> Result<(), String> {
        state
            .settings
            .set_auto_crop(enabled)
            .map_err(|e| e.to_string())
    }

    #[cfg_attr(mobile, tauri::mobile_entry_point)]
    pub fn run() {
        // Reads RUST_LOG; KITBAG_DEBUG raises the crate's own modules to debug.
        logging::init(config::debug_from_env());
        let app_config = AppConfig::from_env();

        log::info!("Kitbag starting up...");

        tauri::Builder::default()
            .plugin(tauri_plugin_opener::init())
            .setup(move |app| {
                let result = (|| -> anyhow::Result<()> {
                    let data_dir = app_config.resolve_data_dir(|| {
                        app.path()
                            .app_data_dir()
                            .map_err(|err| anyhow::anyhow!(err))
                    })?;
                    std::fs::create_dir_all(&data_dir).with_context(|| {
                        format!("Failed to create data directory {}", data_dir.display())
                    })?;
                    log::info!("Using data directory {}", data_dir.display());

                    let database = Database::new(data_dir.join(config::DATABASE_FILE))?;
                    let blobs = FsBlobStore::new(
                        data_dir.join(config::BLOB_DIR),
                        app_config.blob_base_url.clone(),
                    )?;

                    let system_prefers_dark = app
                        .get_webview_window("main")
                        .and_then(|window| window.theme().ok())
                        .map(|theme| matches!(theme, tauri::Theme::Dark));
                    let settings_store = SettingsStore::new(
                        data_dir.join(config::SETTINGS_FILE),
                        system_prefers_dark,
                    )?;

                    let theme_handle = app.handle().clone();
                    settings_store.on_change(move |theme| {
                        if let Err(err) = theme_handle.emit(THEME_CHANGED_EVENT, theme) {
                            log::warn!("Failed to emit {THEME_CHANGED_EVENT}: {err}");
                        }
                    });

                    let session = Session::new();
                    let mut subscription = session.subscribe();
                    let session_handle = app.handle().clone();
                    tauri::async_runtime::spawn(async move {
                        while let Some(principal) = subscription.changed().await {
                            if let Err(err) = session_handle.emit(SESSION_CHANGED_EVENT, &principal)
                            {
                                log::warn!("Failed to emit {SESSION_CHANGED_EVENT}: {err}");
                            }
                        }
                    });

                    let camera = WebviewCamera::new();
                    let capture = CaptureController::new(camera.clone(), app_config.jpeg_quality);

                    app.manage(AppState {
                        auth: AuthService::new(database.clone(), session.clone()),
                        shirts: ShirtService::new(database.clone(), blobs),
                        db: database,
                        session,
                        camera,
                        capture: Mutex::new(capture),
                        settings: settings_store,
                    });

                    Ok(())
                })();

                result.map_err(|err| err.into())
            })
            .invoke_handler(tauri::generate_handler![
                sign_up,
                sign_in,
                sign_out,
                current_user,
                get_profile,
                list_shirts,
                list_user_shirts,
                get_shirt,
                filter_shirts,
                marketplace,
                unique_seasons,
                reference_data,
                profile_view,
                add_shirt,
                capture_state,
                set_camera_permission,
                push_camera_frame,
                start_capture,
                capture_shot,
                capture_preview,
                retake_shot,
                cancel_capture,
                submit_capture,
                overlay_guide,
                get_theme,
                set_theme,
                toggle_theme,
                get_auto_crop,
                set_auto_crop,
            ])
            .run(tauri::generate_context!())
            .expect("error while running tauri application");
    }
}
