use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::sqlite::SqliteConnection;

use ds_core::editor::CacheRecord;
use ds_core::ids::ProjectId;
use ds_core::ports::{LocalCacheError, LocalCachePort};

use crate::db::mappers::CacheRecordMapper;
use crate::db::models::CacheRecordRow;
use crate::db::pool::DbPool;
use crate::db::schema::t_cache_record;

pub struct DieselCacheRecordRepository {
    pool: DbPool,
}

impl DieselCacheRecordRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(
        &self,
    ) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>, LocalCacheError> {
        self.pool
            .get()
            .map_err(|e| LocalCacheError::Storage(e.to_string()))
    }
}

#[async_trait]
impl LocalCachePort for DieselCacheRecordRepository {
    async fn get(&self, project_id: &ProjectId) -> Result<Option<CacheRecord>, LocalCacheError> {
        let mut conn = self.conn()?;

        let row = t_cache_record::table
            .filter(t_cache_record::project_id.eq(project_id.as_str()))
            .first::<CacheRecordRow>(&mut conn)
            .optional()
            .map_err(|e| LocalCacheError::Storage(e.to_string()))?;

        row.map(CacheRecordMapper::to_domain).transpose()
    }

    async fn put(&self, record: &CacheRecord) -> Result<(), LocalCacheError> {
        let mut conn = self.conn()?;
        let row = CacheRecordMapper::to_row(record)?;

        diesel::insert_into(t_cache_record::table)
            .values(&row)
            .on_conflict(t_cache_record::project_id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .map_err(|e| LocalCacheError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn mark_synced(&self, project_id: &ProjectId) -> Result<(), LocalCacheError> {
        let mut conn = self.conn()?;

        diesel::update(
            t_cache_record::table.filter(t_cache_record::project_id.eq(project_id.as_str())),
        )
        .set(t_cache_record::pending_sync.eq(false))
        .execute(&mut conn)
        .map_err(|e| LocalCacheError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn list_pending(&self) -> Result<Vec<CacheRecord>, LocalCacheError> {
        let mut conn = self.conn()?;

        let rows = t_cache_record::table
            .filter(t_cache_record::pending_sync.eq(true))
            .load::<CacheRecordRow>(&mut conn)
            .map_err(|e| LocalCacheError::Storage(e.to_string()))?;

        rows.into_iter()
            .map(CacheRecordMapper::to_domain)
            .collect()
    }

    async fn remove(&self, project_id: &ProjectId) -> Result<(), LocalCacheError> {
        let mut conn = self.conn()?;

        diesel::delete(
            t_cache_record::table.filter(t_cache_record::project_id.eq(project_id.as_str())),
        )
        .execute(&mut conn)
        .map_err(|e| LocalCacheError::Storage(e.to_string()))?;

        Ok(())
    }
}
