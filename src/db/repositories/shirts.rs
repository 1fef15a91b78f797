use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::{
    catalog::{ShirtQuery, ShirtStore},
    db::{
        connection::Database,
        helpers::{format_datetime, parse_datetime, parse_optional_kit_type},
    },
    models::{NewShirt, ShirtMetadata, ShirtRecord},
};

const SHIRT_COLUMNS: &str = "id, name, description, image_url, back_image_url, label_image_url,
     user_id, user_display_name, created_at, team, league, season, kit_type";

fn row_to_shirt(row: &Row) -> Result<ShirtRecord> {
    let created_at: String = row.get("created_at")?;
    let kit_type: Option<String> = row.get("kit_type")?;

    Ok(ShirtRecord {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        image_url: row.get("image_url")?,
        back_image_url: row.get("back_image_url")?,
        label_image_url: row.get("label_image_url")?,
        user_id: row.get("user_id")?,
        user_display_name: row.get("user_display_name")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        metadata: ShirtMetadata {
            team: row.get("team")?,
            league: row.get("league")?,
            season: row.get("season")?,
            kit_type: parse_optional_kit_type(kit_type)?,
        },
    })
}

impl Database {
    pub async fn insert_shirt(&self, shirt: NewShirt) -> Result<ShirtRecord> {
        self.execute(move |conn| {
            let record = shirt.into_record(Uuid::new_v4().to_string(), Utc::now());
            conn.execute(
                "INSERT INTO shirts (id, name, description, image_url, back_image_url, label_image_url,
                                     user_id, user_display_name, created_at, team, league, season, kit_type)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    record.id,
                    record.name,
                    record.description,
                    record.image_url,
                    record.back_image_url,
                    record.label_image_url,
                    record.user_id,
                    record.user_display_name,
                    format_datetime(&record.created_at),
                    record.metadata.team,
                    record.metadata.league,
                    record.metadata.season,
                    record.metadata.kit_type.map(|kit| kit.as_str()),
                ],
            )
            .with_context(|| "failed to insert shirt")?;
            Ok(record)
        })
        .await
    }

    pub async fn list_all_shirts(&self) -> Result<Vec<ShirtRecord>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SHIRT_COLUMNS}
                 FROM shirts
                 ORDER BY created_at DESC, rowid DESC"
            ))?;

            let mut rows = stmt.query([])?;
            let mut shirts = Vec::new();
            while let Some(row) = rows.next()? {
                shirts.push(row_to_shirt(row)?);
            }

            Ok(shirts)
        })
        .await
    }

    pub async fn list_user_shirts(&self, user_id: &str) -> Result<Vec<ShirtRecord>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SHIRT_COLUMNS}
                 FROM shirts
                 WHERE user_id = ?1
                 ORDER BY created_at DESC, rowid DESC"
            ))?;

            let mut rows = stmt.query(params![user_id])?;
            let mut shirts = Vec::new();
            while let Some(row) = rows.next()? {
                shirts.push(row_to_shirt(row)?);
            }

            Ok(shirts)
        })
        .await
    }

    pub async fn get_shirt_by_id(&self, shirt_id: &str) -> Result<Option<ShirtRecord>> {
        let shirt_id = shirt_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SHIRT_COLUMNS}
                 FROM shirts
                 WHERE id = ?1"
            ))?;

            let mut rows = stmt.query(params![shirt_id])?;
            let shirt = match rows.next()? {
                Some(row) => Some(row_to_shirt(row)?),
                None => None,
            };
            Ok(shirt)
        })
        .await
    }
}

impl ShirtStore for Database {
    async fn create_shirt(&self, shirt: NewShirt) -> Result<String> {
        Ok(self.insert_shirt(shirt).await?.id)
    }

    async fn list_shirts(&self, query: ShirtQuery) -> Result<Vec<ShirtRecord>> {
        match query {
            ShirtQuery::All => self.list_all_shirts().await,
            ShirtQuery::ByUser(user_id) => self.list_user_shirts(&user_id).await,
        }
    }

    async fn get_shirt(&self, id: &str) -> Result<Option<ShirtRecord>> {
        self.get_shirt_by_id(id).await
    }
}
