use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use lingo_config::api::ApiConfig;
use lingo_core::{CatalogError, LanguageSource};
use lingo_history::{HistoryError, HistoryStore};
use lingo_translator::{TranslateError, Translator};
use lingo_types::{HistoryRecord, LanguageCode, LanguagePair, TranslationResult};
use reqwest::Response;

use crate::wire::{ErrorDto, Health, HistoryDto, LanguagesDto, TranslateBody, TranslationDto};

/// HTTP client for the translation backend
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    /// Probe `/api/health`
    pub async fn health(&self) -> Result<Health, reqwest::Error> {
        self.client
            .get(self.config.endpoint("health"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

async fn api_error(response: Response) -> TranslateError {
    let status = response.status().as_u16();
    let detail = response
        .json::<ErrorDto>()
        .await
        .ok()
        .and_then(ErrorDto::into_detail);

    TranslateError::ApiError { status, detail }
}

fn transport_error(e: reqwest::Error) -> TranslateError {
    if e.is_timeout() {
        TranslateError::Timeout
    } else {
        TranslateError::NetworkError(e)
    }
}

#[async_trait]
impl Translator for ApiClient {
    async fn translate(
        &self,
        text: &str,
        pair: &LanguagePair,
    ) -> Result<TranslationResult, TranslateError> {
        let body = TranslateBody {
            text,
            from_lang: &pair.source,
            to_lang: &pair.target,
        };

        tracing::debug!("POST translate {} -> {}", pair.source, pair.target);
        let response = self
            .client
            .post(self.config.endpoint("translate"))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let dto: TranslationDto = response.json().await.map_err(|e| {
            if e.is_timeout() {
                TranslateError::Timeout
            } else {
                TranslateError::MalformedResponse(e.to_string())
            }
        })?;

        Ok(HistoryRecord::from(dto).result)
    }
}

#[async_trait]
impl HistoryStore for ApiClient {
    async fn list(&self, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError> {
        let response = self
            .client
            .get(self.config.endpoint("history"))
            .query(&[("limit", limit)])
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(|e| HistoryError::Backend(e.to_string()))?;

        let history: HistoryDto = response
            .json()
            .await
            .map_err(|e| HistoryError::Backend(e.to_string()))?;

        Ok(history.translations.into_iter().map(HistoryRecord::from).collect())
    }

    async fn append(&self, record: &HistoryRecord) -> Result<(), HistoryError> {
        // The backend saves every successful translation itself
        tracing::trace!("History record {} already stored by backend", record.id);
        Ok(())
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        self.client
            .delete(self.config.endpoint("history"))
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(|e| HistoryError::Backend(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl LanguageSource for ApiClient {
    async fn fetch(&self) -> Result<BTreeMap<LanguageCode, String>, CatalogError> {
        let response = self
            .client
            .get(self.config.endpoint("languages"))
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;

        let body: LanguagesDto = response
            .json()
            .await
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;

        Ok(body.languages)
    }
}
