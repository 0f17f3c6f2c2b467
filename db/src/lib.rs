mod error;
mod schema;

pub mod teams;

pub use error::*;
pub use schema::*;
pub use teams::{NewTeam, PgTeamStore, SchemaStatus, TeamRecord, TeamStore};

use async_trait::async_trait;
use diesel::PgConnection;

pub type Pool = deadpool_diesel::postgres::Pool;

pub fn connect(conn_str: &str, max_connections: usize) -> Result<Pool> {
    let manager =
        deadpool_diesel::postgres::Manager::new(conn_str, deadpool_diesel::Runtime::Tokio1);
    deadpool_diesel::Pool::builder(manager)
        .max_size(max_connections)
        .build()
        .map_err(|e| Error::PoolBuild(e.to_string()))
}

/// Run a closure against a pooled connection on the blocking worker.
#[async_trait]
pub trait PoolExt<F, RETVAL, ERR>
where
    F: (FnOnce(&mut PgConnection) -> Result<RETVAL, ERR>) + Send + 'static,
    RETVAL: Send + 'static,
    ERR: Send + 'static,
{
    async fn interact(&self, f: F) -> Result<RETVAL, ERR>;
}

#[async_trait]
impl<F, RETVAL, ERR> PoolExt<F, RETVAL, ERR> for Pool
where
    F: (FnOnce(&mut PgConnection) -> Result<RETVAL, ERR>) + Send + 'static,
    RETVAL: Send + 'static,
    ERR: From<deadpool_diesel::PoolError> + From<deadpool_diesel::InteractError> + Send + 'static,
{
    async fn interact(&self, f: F) -> Result<RETVAL, ERR> {
        let conn = self.get().await?;
        let result = conn.interact(f).await??;
        Ok(result)
    }
}
