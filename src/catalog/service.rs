use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
    auth::{IdentityProvider, Session},
    capture::{CapturedShots, ShotLabel},
    models::{NewShirt, Principal, ProfileRecord, ShirtDraft, ShirtRecord, UNKNOWN_USER},
    storage::{sanitize_file_name, BlobStore},
};

use super::{CatalogError, ShirtFilter, ShirtQuery, ShirtStore};

const ENABLE_LOGS: bool = true;
use crate::{log_error, log_info};

/// A single image picked from disk on the upload form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub user_id: String,
    /// Only looked up when viewing someone else.
    pub profile: Option<ProfileRecord>,
    pub shirts: Vec<ShirtRecord>,
    pub is_own: bool,
}

/// Upload and browsing flows over a record store and a blob store.
///
/// Uploads write blobs first and the record last. A failed record write
/// leaves the uploaded blobs in place.
pub struct ShirtService<S, B> {
    store: S,
    blobs: B,
}

impl<S: ShirtStore, B: BlobStore> ShirtService<S, B> {
    pub fn new(store: S, blobs: B) -> Self {
        Self { store, blobs }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn add_shirt(
        &self,
        session: &Session,
        draft: ShirtDraft,
        image: ImageUpload,
    ) -> Result<String, CatalogError> {
        let (principal, name) = prepare(session, &draft)?;
        if image.bytes.is_empty() {
            return Err(CatalogError::MissingImage);
        }

        let path = format!(
            "shirts/{}/{}_{}",
            principal.user_id,
            Utc::now().timestamp_millis(),
            sanitize_file_name(&image.file_name)
        );
        let image_url = self.upload(image.bytes, &path).await?;

        self.create(new_shirt(&principal, name, draft, image_url, None, None))
            .await
    }

    /// Stores the three stills of a guided capture as one record. The front
    /// still becomes the primary image.
    pub async fn add_captured_shirt(
        &self,
        session: &Session,
        draft: ShirtDraft,
        shots: CapturedShots,
    ) -> Result<String, CatalogError> {
        let (principal, name) = prepare(session, &draft)?;

        let millis = Utc::now().timestamp_millis();
        let CapturedShots { front, back, label } = shots;
        let front = self.upload_shot(&principal, millis, ShotLabel::Front, front.bytes).await?;
        let back = self.upload_shot(&principal, millis, ShotLabel::Back, back.bytes).await?;
        let label = self.upload_shot(&principal, millis, ShotLabel::Label, label.bytes).await?;

        self.create(new_shirt(&principal, name, draft, front, Some(back), Some(label)))
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<ShirtRecord>, CatalogError> {
        self.store
            .list_shirts(ShirtQuery::All)
            .await
            .map_err(CatalogError::Read)
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<ShirtRecord>, CatalogError> {
        self.store
            .list_shirts(ShirtQuery::ByUser(user_id.to_string()))
            .await
            .map_err(CatalogError::Read)
    }

    pub async fn get(&self, id: &str) -> Result<ShirtRecord, CatalogError> {
        self.store
            .get_shirt(id)
            .await
            .map_err(CatalogError::Read)?
            .ok_or(CatalogError::NotFound)
    }

    pub async fn marketplace(&self, filter: &ShirtFilter) -> Result<Vec<ShirtRecord>, CatalogError> {
        let shirts = self.list_all().await?;
        Ok(filter.apply_owned(shirts))
    }

    /// A user's collection page. Without `user_id` the viewer's own page is
    /// shown, which needs a signed-in principal.
    pub async fn profile_view<I: IdentityProvider>(
        &self,
        identity: &I,
        session: &Session,
        user_id: Option<&str>,
    ) -> Result<ProfileView, CatalogError> {
        let viewer = session.current();
        let target = match (user_id.filter(|id| !id.is_empty()), viewer.as_ref()) {
            (Some(id), _) => id.to_string(),
            (None, Some(principal)) => principal.user_id.clone(),
            (None, None) => return Err(CatalogError::NotAuthenticated),
        };
        let is_own = viewer.is_some_and(|principal| principal.user_id == target);

        let profile = if is_own {
            None
        } else {
            identity
                .get_profile(&target)
                .await
                .map_err(CatalogError::Read)?
        };
        let shirts = self.list_for_user(&target).await?;

        Ok(ProfileView {
            user_id: target,
            profile,
            shirts,
            is_own,
        })
    }

    async fn upload(&self, bytes: Vec<u8>, path: &str) -> Result<String, CatalogError> {
        self.blobs.upload(bytes, path).await.map_err(|err| {
            log_error!("Upload of {path} failed: {err:#}");
            CatalogError::Upload(err)
        })
    }

    async fn upload_shot(
        &self,
        principal: &Principal,
        millis: i64,
        label: ShotLabel,
        bytes: Vec<u8>,
    ) -> Result<String, CatalogError> {
        if bytes.is_empty() {
            return Err(CatalogError::MissingImage);
        }
        let path = format!("shirts/{}/{millis}_{label}.jpg", principal.user_id);
        self.upload(bytes, &path).await
    }

    async fn create(&self, shirt: NewShirt) -> Result<String, CatalogError> {
        let id = self
            .store
            .create_shirt(shirt)
            .await
            .map_err(CatalogError::Write)?;
        log_info!("Created shirt {id}");
        Ok(id)
    }
}

fn prepare(session: &Session, draft: &ShirtDraft) -> Result<(Principal, String), CatalogError> {
    let principal = session.current().ok_or(CatalogError::NotAuthenticated)?;
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(CatalogError::MissingName);
    }
    Ok((principal, name.to_string()))
}

fn new_shirt(
    principal: &Principal,
    name: String,
    draft: ShirtDraft,
    image_url: String,
    back_image_url: Option<String>,
    label_image_url: Option<String>,
) -> NewShirt {
    let user_display_name = principal
        .display_name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_USER.to_string());

    NewShirt {
        name,
        description: draft.description.trim().to_string(),
        image_url,
        back_image_url,
        label_image_url,
        user_id: principal.user_id.clone(),
        user_display_name,
        metadata: draft.metadata.normalized(),
    }
}
