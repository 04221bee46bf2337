use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    record::{
        entities::HealthRecord,
        ports::RecordRepository,
        value_objects::{OffsetLimit, RecordFilter},
    },
};
use crate::entity::health_records::{
    ActiveModel as HealthRecordActiveModel, Column as HealthRecordColumn,
    Entity as HealthRecordEntity,
};

#[derive(Debug, Clone)]
pub struct PostgresRecordRepository {
    pub db: DatabaseConnection,
}

impl PostgresRecordRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn filtered(filter: RecordFilter) -> Select<HealthRecordEntity> {
    let mut query = HealthRecordEntity::find();

    if let Some(device_id) = filter.device_id {
        query = query.filter(HealthRecordColumn::DeviceId.eq(device_id));
    }

    if let Some(created_after) = filter.created_after {
        query = query.filter(HealthRecordColumn::CreatedAt.gte(created_after));
    }

    if let Some(created_before) = filter.created_before {
        query = query.filter(HealthRecordColumn::CreatedAt.lt(created_before));
    }

    query
}

impl RecordRepository for PostgresRecordRepository {
    async fn create(&self, record: HealthRecord) -> Result<HealthRecord, CoreError> {
        let active_model = HealthRecordActiveModel::from(&record);

        active_model.insert(&self.db).await.map_err(|e| {
            error!("Failed to create health record: {}", e);
            CoreError::DatabaseError(e.to_string())
        })?;

        Ok(record)
    }

    async fn get_by_id(&self, record_id: Uuid) -> Result<Option<HealthRecord>, CoreError> {
        let model = HealthRecordEntity::find_by_id(record_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get health record by id: {}", e);
                CoreError::DatabaseError(e.to_string())
            })?;

        Ok(model.as_ref().map(HealthRecord::from))
    }

    async fn list(
        &self,
        filter: RecordFilter,
        pagination: Option<OffsetLimit>,
    ) -> Result<Vec<HealthRecord>, CoreError> {
        let mut query = filtered(filter)
            .order_by_desc(HealthRecordColumn::CreatedAt)
            .order_by_desc(HealthRecordColumn::Id);

        if let Some(pagination) = pagination {
            query = query
                .limit(pagination.limit as u64)
                .offset(pagination.offset as u64);
        }

        let models = query.all(&self.db).await.map_err(|e| {
            error!("Failed to list health records: {}", e);
            CoreError::DatabaseError(e.to_string())
        })?;

        Ok(models.iter().map(HealthRecord::from).collect())
    }

    async fn count(&self, filter: RecordFilter) -> Result<i64, CoreError> {
        let count = filtered(filter).count(&self.db).await.map_err(|e| {
            error!("Failed to count health records: {}", e);
            CoreError::DatabaseError(e.to_string())
        })?;

        Ok(count as i64)
    }
}
