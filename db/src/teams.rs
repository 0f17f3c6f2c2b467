use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{prelude::*, sql_types};
use serde::{Deserialize, Serialize};
use tracing::{event, instrument, Level};

pub use crate::schema::pokemon_team;
use crate::{Error, Pool, PoolExt, Result};

pub const TABLE_NAME: &str = "pokemon_team";

const CREATE_TABLE: &str = r##"
CREATE TABLE IF NOT EXISTS pokemon_team (
  id BIGSERIAL PRIMARY KEY,
  name VARCHAR(100) NOT NULL,
  nickname VARCHAR(100) NOT NULL,
  stats TEXT NOT NULL,
  ability VARCHAR(100) NOT NULL,
  held_item VARCHAR(100),
  created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
  updated_at TIMESTAMPTZ
)
"##;

/// A saved team member, as stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = pokemon_team)]
pub struct TeamRecord {
    pub id: i64,
    pub name: String,
    pub nickname: String,
    /// Serialized JSON. The store never looks inside it.
    pub stats: String,
    pub ability: String,
    pub held_item: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTeam {
    pub name: String,
    pub nickname: String,
    pub stats: String,
    pub ability: String,
    pub held_item: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = pokemon_team)]
struct InsertTeam<'a> {
    name: &'a str,
    nickname: &'a str,
    stats: &'a str,
    ability: &'a str,
    held_item: Option<&'a str>,
    created_at: DateTime<Utc>,
}

impl<'a> InsertTeam<'a> {
    fn new(team: &'a NewTeam, created_at: DateTime<Utc>) -> Self {
        InsertTeam {
            name: &team.name,
            nickname: &team.nickname,
            stats: &team.stats,
            ability: &team.ability,
            held_item: team.held_item.as_deref(),
            created_at,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaStatus {
    /// The table was missing and has just been created.
    Created,
    /// The table was already there; no DDL was issued.
    Existing,
}

#[async_trait]
pub trait TeamStore: Send + Sync {
    /// Create the team table if it does not exist yet.
    async fn ensure_schema(&self) -> Result<SchemaStatus>;

    /// Insert a team member and return its generated id.
    async fn insert_team(&self, team: NewTeam) -> Result<i64>;

    /// Every saved team member, oldest first.
    async fn list_all_teams(&self) -> Result<Vec<TeamRecord>>;

    async fn healthy(&self) -> bool;
}

#[derive(QueryableByName)]
struct TableExists {
    #[diesel(sql_type = sql_types::Bool)]
    present: bool,
}

fn table_exists(conn: &mut PgConnection) -> QueryResult<bool> {
    diesel::sql_query(
        r##"SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = current_schema() AND table_name = $1
        ) AS present"##,
    )
    .bind::<sql_types::Text, _>(TABLE_NAME)
    .get_result::<TableExists>(conn)
    .map(|row| row.present)
}

pub struct PgTeamStore {
    pool: Pool,
    schema_ready: AtomicBool,
}

impl PgTeamStore {
    pub fn new(pool: Pool) -> PgTeamStore {
        PgTeamStore {
            pool,
            schema_ready: AtomicBool::new(false),
        }
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }
}

impl std::fmt::Debug for PgTeamStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgTeamStore")
            .field("schema_ready", &self.schema_ready)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TeamStore for PgTeamStore {
    #[instrument(skip(self))]
    async fn ensure_schema(&self) -> Result<SchemaStatus> {
        if self.schema_ready.load(Ordering::Acquire) {
            return Ok(SchemaStatus::Existing);
        }

        let status = self
            .pool
            .interact(|conn: &mut PgConnection| -> Result<SchemaStatus> {
                if table_exists(conn)? {
                    return Ok(SchemaStatus::Existing);
                }

                diesel::sql_query(CREATE_TABLE).execute(conn)?;
                Ok(SchemaStatus::Created)
            })
            .await?;

        self.schema_ready.store(true, Ordering::Release);
        if status == SchemaStatus::Created {
            event!(Level::INFO, table = TABLE_NAME, "Created table");
        }

        Ok(status)
    }

    #[instrument(skip(self, team), fields(name = %team.name))]
    async fn insert_team(&self, team: NewTeam) -> Result<i64> {
        self.pool
            .interact(move |conn: &mut PgConnection| {
                diesel::insert_into(pokemon_team::table)
                    .values(InsertTeam::new(&team, Utc::now()))
                    .returning(pokemon_team::id)
                    .get_result::<i64>(conn)
                    .map_err(Error::from)
            })
            .await
    }

    #[instrument(skip(self))]
    async fn list_all_teams(&self) -> Result<Vec<TeamRecord>> {
        self.pool
            .interact(|conn: &mut PgConnection| {
                pokemon_team::table
                    .select(TeamRecord::as_select())
                    .order(pokemon_team::id.asc())
                    .load::<TeamRecord>(conn)
                    .map_err(Error::from)
            })
            .await
    }

    async fn healthy(&self) -> bool {
        self.pool
            .interact(|conn: &mut PgConnection| {
                diesel::sql_query("SELECT 1")
                    .execute(conn)
                    .map_err(Error::from)
            })
            .await
            .is_ok()
    }
}

#[cfg(all(test, feature = "test-db"))]
mod tests {
    use super::*;
    use crate::test::run_database_test;

    fn pikachu() -> NewTeam {
        NewTeam {
            name: "Pikachu".to_string(),
            nickname: "Sparky".to_string(),
            stats: r##"{"hp":35}"##.to_string(),
            ability: "Static".to_string(),
            held_item: None,
        }
    }

    #[tokio::test]
    async fn schema_is_created_once() {
        run_database_test(|database| async move {
            let store = PgTeamStore::new(database.pool.clone());
            assert_eq!(store.ensure_schema().await?, SchemaStatus::Created);
            assert_eq!(store.ensure_schema().await?, SchemaStatus::Existing);

            // A fresh store finds the table through the existence check.
            let other = PgTeamStore::new(database.pool.clone());
            assert_eq!(other.ensure_schema().await?, SchemaStatus::Existing);
            Ok(())
        })
        .await
    }

    #[tokio::test]
    async fn empty_table_lists_nothing() {
        run_database_test(|database| async move {
            let store = PgTeamStore::new(database.pool.clone());
            store.ensure_schema().await?;
            assert!(store.list_all_teams().await?.is_empty());
            Ok(())
        })
        .await
    }

    #[tokio::test]
    async fn insert_then_list() {
        run_database_test(|database| async move {
            let store = PgTeamStore::new(database.pool.clone());
            store.ensure_schema().await?;

            let before = Utc::now();
            let id = store.insert_team(pikachu()).await?;
            assert!(id > 0);

            let second = store
                .insert_team(NewTeam {
                    name: "Snorlax".to_string(),
                    nickname: "Lump".to_string(),
                    stats: "{}".to_string(),
                    ability: "Thick Fat".to_string(),
                    held_item: Some("Leftovers".to_string()),
                })
                .await?;
            assert!(second > id);

            let teams = store.list_all_teams().await?;
            assert_eq!(teams.len(), 2);

            let first = &teams[0];
            assert_eq!(first.id, id);
            assert_eq!(first.name, "Pikachu");
            assert_eq!(first.nickname, "Sparky");
            assert_eq!(first.stats, r##"{"hp":35}"##);
            assert_eq!(first.held_item, None);
            assert_eq!(first.updated_at, None);
            assert!(first.created_at >= before - chrono::Duration::seconds(5));

            assert_eq!(teams[1].held_item.as_deref(), Some("Leftovers"));
            Ok(())
        })
        .await
    }

    #[tokio::test]
    async fn insert_without_table_fails() {
        run_database_test(|database| async move {
            let store = PgTeamStore::new(database.pool.clone());
            let result = store.insert_team(pikachu()).await;
            assert!(matches!(result, Err(Error::Query(_))));
            Ok(())
        })
        .await
    }

    #[tokio::test]
    async fn healthy_with_live_database() {
        run_database_test(|database| async move {
            let store = PgTeamStore::new(database.pool.clone());
            assert!(store.healthy().await);
            Ok(())
        })
        .await
    }
}
