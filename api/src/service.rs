//! Request orchestration: upstream fetch and normalization for catalog
//! lookups, the team store for saved teams.

use std::sync::Arc;

use once_cell::sync::Lazy;
use pokedex_catalog::{
    normalize::{normalize_ability, normalize_entry},
    AbilityInfo, CatalogClient, CatalogEntry, Identifier,
};
use pokedex_db::{NewTeam, TeamRecord, TeamStore};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{event, instrument, Level};

use crate::error::{Error, Result};

pub const DEFAULT_LIMIT: u64 = 50;
pub const DEFAULT_PAGE: u64 = 1;

/// Paging parameters as they arrive in the query string. Anything missing,
/// zero, or unparseable falls back to the default.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<String>,
    pub page: Option<String>,
}

impl ListParams {
    pub fn limit(&self) -> u64 {
        positive_or(self.limit.as_deref(), DEFAULT_LIMIT)
    }

    pub fn page(&self) -> u64 {
        positive_or(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn offset(&self) -> u64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

fn positive_or(value: Option<&str>, default: u64) -> u64 {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// A team submission before sanitizing. Every field is optional here so that a
/// missing field is reported by name instead of as a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct TeamInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default, deserialize_with = "text_or_json")]
    pub stats: Option<String>,
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default)]
    pub held_item: Option<String>,
}

/// Accept stats either as already serialized text or as a JSON value, which is
/// stored in its serialized form.
fn text_or_json<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

impl TeamInput {
    pub fn into_new_team(self) -> Result<NewTeam> {
        let required = |value: Option<String>, field: &'static str| {
            value
                .map(|v| sanitize_text(&v))
                .filter(|v| !v.is_empty())
                .ok_or(Error::MissingField(field))
        };

        Ok(NewTeam {
            name: required(self.name, "name")?,
            nickname: required(self.nickname, "nickname")?,
            stats: required(self.stats, "stats")?,
            ability: required(self.ability, "ability")?,
            held_item: self
                .held_item
                .map(|v| sanitize_text(&v))
                .filter(|v| !v.is_empty()),
        })
    }
}

static TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strip markup, collapse runs of whitespace, and trim.
pub fn sanitize_text(value: &str) -> String {
    let without_tags = TAGS.replace_all(value, "");
    WHITESPACE
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Result of listing saved teams.
#[derive(Debug)]
pub enum TeamListing {
    Teams(Vec<TeamRecord>),
    Empty,
}

pub struct Aggregator {
    catalog: CatalogClient,
    teams: Arc<dyn TeamStore>,
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("catalog", &self.catalog.base_url().as_str())
            .finish_non_exhaustive()
    }
}

impl Aggregator {
    pub fn new(catalog: CatalogClient, teams: Arc<dyn TeamStore>) -> Aggregator {
        Aggregator { catalog, teams }
    }

    pub fn team_store(&self) -> &dyn TeamStore {
        self.teams.as_ref()
    }

    /// One page of the species index, exactly as the catalog returned it. An
    /// unreachable catalog produces an empty array.
    #[instrument(skip(self))]
    pub async fn list_entries(&self, params: &ListParams) -> Value {
        match self
            .catalog
            .fetch_list(params.limit(), params.offset())
            .await
        {
            Ok(body) => body.unwrap_or(Value::Null),
            Err(e) => {
                event!(Level::WARN, error = %e, "Catalog list request failed");
                Value::Array(Vec::new())
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn entry(&self, identifier: &str) -> Result<Option<CatalogEntry>> {
        let identifier: Identifier = identifier.parse()?;
        let raw = self.catalog.fetch_entry(&identifier).await?;
        Ok(raw.as_ref().and_then(normalize_entry))
    }

    #[instrument(skip(self))]
    pub async fn ability(&self, name: &str) -> Result<Option<AbilityInfo>> {
        let raw = self.catalog.fetch_ability(name).await?;
        Ok(raw.as_ref().and_then(normalize_ability))
    }

    #[instrument(skip(self, input))]
    pub async fn create_team(&self, input: TeamInput) -> Result<i64> {
        let team = input.into_new_team()?;

        self.teams.ensure_schema().await.map_err(Error::TeamInsert)?;
        let id = self
            .teams
            .insert_team(team)
            .await
            .map_err(Error::TeamInsert)?;

        event!(Level::INFO, %id, "Added team member");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn all_teams(&self) -> Result<TeamListing> {
        let teams = self.teams.list_all_teams().await?;
        if teams.is_empty() {
            Ok(TeamListing::Empty)
        } else {
            Ok(TeamListing::Teams(teams))
        }
    }
}
