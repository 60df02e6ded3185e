//! Wikibase client implementation.

use crate::error::SdkError;
use crate::session::{LoginResponse, Session, TokenKind, TokensResponse};
use crate::wire::{self, EntitySnapshot};
use serde_json::Value;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};
use urzednicy_domain::{EntityId, EntityStore, ItemDocument, ItemLookup, Statement};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// `wbgetentities` accepts at most this many ids per call
const MAX_IDS_PER_REQUEST: usize = 50;

/// Endpoint configuration for a Wikibase instance
#[derive(Debug, Clone, PartialEq)]
pub struct WikibaseConfig {
    /// URL of `api.php`
    pub api_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Language used for searching and for matching labels/descriptions
    pub search_language: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Attempts per request for transient failures
    pub max_retries: u32,
    /// Delay before the first retry; doubled on every further attempt
    pub retry_base_ms: u64,
    /// Maximum number of search hits inspected per lookup
    pub search_limit: u32,
}

impl WikibaseConfig {
    /// Configuration for an endpoint with default settings
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            user_agent: format!("urzednicy/{}", env!("CARGO_PKG_VERSION")),
            search_language: "pl".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_ms: 1000,
            search_limit: 50,
        }
    }

    fn validate(&self) -> Result<(), SdkError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(SdkError::Config(format!("API URL must be http(s): '{}'", self.api_url)));
        }
        if self.max_retries == 0 {
            return Err(SdkError::Config("max_retries must be at least 1".to_string()));
        }
        if self.search_language.is_empty() {
            return Err(SdkError::Config("search_language must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Client for the MediaWiki Action API of a Wikibase instance
///
/// Reads work anonymously; writes require [`WikibaseClient::login`].
pub struct WikibaseClient {
    http: reqwest::blocking::Client,
    config: WikibaseConfig,
    session: Option<Session>,
}

impl WikibaseClient {
    /// Create a new client
    pub fn new(config: WikibaseConfig) -> Result<Self, SdkError> {
        config.validate()?;

        let http = reqwest::blocking::Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SdkError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            session: None,
        })
    }

    /// The endpoint configuration
    pub fn config(&self) -> &WikibaseConfig {
        &self.config
    }

    /// The current session, if logged in
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Log in with bot credentials and fetch an edit token
    pub fn login(&mut self, bot_name: &str, bot_password: &str) -> Result<(), SdkError> {
        let login_token = self.fetch_token(TokenKind::Login)?;

        let response = self.post(&[
            ("action", "login"),
            ("lgname", bot_name),
            ("lgpassword", bot_password),
            ("lgtoken", login_token.as_str()),
        ])?;
        let user = serde_json::from_value::<LoginResponse>(response)?.into_user(bot_name)?;

        let csrf_token = self.fetch_token(TokenKind::Csrf)?;
        info!(user = %user, "Logged in");
        self.session = Some(Session::new(user, csrf_token));
        Ok(())
    }

    fn fetch_token(&self, kind: TokenKind) -> Result<String, SdkError> {
        let response = self.get(&[
            ("action", "query"),
            ("meta", "tokens"),
            ("type", kind.as_str()),
        ])?;
        serde_json::from_value::<TokensResponse>(response)?.token(kind)
    }

    /// Search items by label
    pub fn search_entities(&self, search: &str, language: &str) -> Result<Vec<EntityId>, SdkError> {
        let limit = self.config.search_limit.to_string();
        let response = self.get(&[
            ("action", "wbsearchentities"),
            ("search", search),
            ("language", language),
            ("type", "item"),
            ("limit", limit.as_str()),
        ])?;
        let hits = wire::parse_search(&response)?;
        debug!(search, hits = hits.len(), "Searched entities");
        Ok(hits)
    }

    /// Read a single entity
    pub fn get_entity(&self, id: &EntityId) -> Result<EntitySnapshot, SdkError> {
        self.get_entities(std::slice::from_ref(id))?
            .into_iter()
            .next()
            .ok_or_else(|| SdkError::EntityNotFound(id.to_string()))
    }

    /// Read several entities, in batches
    pub fn get_entities(&self, ids: &[EntityId]) -> Result<Vec<EntitySnapshot>, SdkError> {
        let mut snapshots = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_IDS_PER_REQUEST) {
            let joined = chunk.iter().map(EntityId::as_str).collect::<Vec<_>>().join("|");
            let response = self.get(&[
                ("action", "wbgetentities"),
                ("ids", joined.as_str()),
                ("props", "labels|descriptions|claims"),
            ])?;
            let mut batch = wire::parse_entities(&response)?;
            // The API keys entities by id; restore the requested order.
            batch.sort_by_key(|s| chunk.iter().position(|id| *id == s.id));
            snapshots.extend(batch);
        }
        Ok(snapshots)
    }

    /// Create a new item
    pub fn create_item(&self, document: &ItemDocument) -> Result<EntityId, SdkError> {
        let data = wire::item_to_json(document).to_string();
        let id = self.edit(&[("new", "item"), ("data", data.as_str())])?;
        let label = document.label(&self.config.search_language).unwrap_or("");
        info!(id = %id, label, "Created item");
        Ok(id)
    }

    /// Add statements and aliases to an existing item
    ///
    /// Statements whose main snak is already present on the item are skipped.
    /// Returns the number of statements sent.
    pub fn edit_item(&self, id: &EntityId, document: &ItemDocument) -> Result<usize, SdkError> {
        let snapshot = self.get_entity(id)?;
        let statements: Vec<&Statement> = document
            .statements
            .iter()
            .filter(|s| !snapshot.has_main_snak(&s.main_snak))
            .collect();

        if statements.is_empty() && document.aliases.is_empty() {
            debug!(id = %id, "Nothing to update");
            return Ok(0);
        }

        let data = wire::item_update_json(&statements, &document.aliases).to_string();
        self.edit(&[("id", id.as_str()), ("data", data.as_str())])?;
        info!(id = %id, statements = statements.len(), "Updated item");
        Ok(statements.len())
    }

    fn edit(&self, params: &[(&str, &str)]) -> Result<EntityId, SdkError> {
        let session = self.session.as_ref().ok_or(SdkError::NotLoggedIn)?;

        let mut form = vec![
            ("action", "wbeditentity"),
            ("bot", "1"),
            ("token", session.csrf_token()),
        ];
        form.extend_from_slice(params);

        let response = self.post(&form)?;
        wire::parse_edit(&response)
    }

    fn get(&self, params: &[(&str, &str)]) -> Result<Value, SdkError> {
        self.with_retry(|| {
            let response = self
                .http
                .get(&self.config.api_url)
                .query(params)
                .query(&[("format", "json")])
                .send()?
                .error_for_status()?;
            let value: Value = response.json()?;
            wire::check_api_error(&value)?;
            Ok(value)
        })
    }

    fn post(&self, params: &[(&str, &str)]) -> Result<Value, SdkError> {
        let mut form = params.to_vec();
        form.push(("format", "json"));

        self.with_retry(|| {
            let response = self
                .http
                .post(&self.config.api_url)
                .form(&form)
                .send()?
                .error_for_status()?;
            let value: Value = response.json()?;
            wire::check_api_error(&value)?;
            Ok(value)
        })
    }

    fn with_retry<T>(
        &self,
        mut request: impl FnMut() -> Result<T, SdkError>,
    ) -> Result<T, SdkError> {
        let mut attempt = 1;
        loop {
            match request() {
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    // Exponential backoff: base, 2x base, 4x base, ...
                    let factor = 1u64 << (attempt - 1);
                    let delay =
                        Duration::from_millis(self.config.retry_base_ms.saturating_mul(factor));
                    warn!(attempt, error = %e, "Transient API failure, retrying in {:?}", delay);
                    thread::sleep(delay);
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

impl EntityStore for WikibaseClient {
    type Error = SdkError;

    fn find(&self, lookup: &ItemLookup) -> Result<Option<EntityId>, SdkError> {
        let language = self.config.search_language.as_str();
        let hits = self.search_entities(lookup.label(), language)?;
        if hits.is_empty() {
            return Ok(None);
        }

        let snapshots = self.get_entities(&hits)?;
        Ok(wire::select_match(lookup, &snapshots, language))
    }

    fn create(&mut self, document: &ItemDocument) -> Result<EntityId, SdkError> {
        self.create_item(document)
    }

    fn update(&mut self, id: &EntityId, document: &ItemDocument) -> Result<(), SdkError> {
        self.edit_item(id, document).map(|_| ())
    }
}
