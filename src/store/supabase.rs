use super::{NewTranscript, StoreError, TranscriptRecord, TranscriptStore};
use async_trait::async_trait;
use tracing::info;

/// Supabase adapter speaking the PostgREST wire protocol directly.
pub struct SupabaseStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl SupabaseStore {
    pub fn new(client: reqwest::Client, base_url: String, api_key: String, table: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
            table,
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), self.table)
    }
}

#[async_trait]
impl TranscriptStore for SupabaseStore {
    async fn insert(&self, new: NewTranscript) -> Result<TranscriptRecord, StoreError> {
        info!("Inserting transcript record for {}", new.audio_filename);

        let response = self
            .client
            .post(self.table_url())
            .header("apikey", &self.api_key)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.api_key),
            )
            // PostgREST returns the stored row only when asked
            .header("Prefer", "return=representation")
            .json(&[&new])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        if !(200..300).contains(&status) {
            return Err(StoreError::Api { status, body });
        }

        let rows: Vec<TranscriptRecord> =
            serde_json::from_str(&body).map_err(StoreError::Decode)?;

        rows.into_iter().next().ok_or(StoreError::EmptyInsert)
    }

    async fn list_recent(&self) -> Result<Vec<TranscriptRecord>, StoreError> {
        let response = self
            .client
            .get(self.table_url())
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .header("apikey", &self.api_key)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.api_key),
            )
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        if !(200..300).contains(&status) {
            return Err(StoreError::Api { status, body });
        }

        serde_json::from_str(&body).map_err(StoreError::Decode)
    }
}
