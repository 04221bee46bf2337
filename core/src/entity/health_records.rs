//! `SeaORM` Entity for the `health_records` table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "health_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub device_id: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub height: f64,
    #[sea_orm(column_type = "Double")]
    pub weight: f64,
    pub tongue_body_color: String,
    pub tongue_shape: String,
    pub tongue_coating_color: String,
    pub tongue_coating_thickness: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub mood: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub symptoms: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub medical_records: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub image_url: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub clarifying_answers: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub analysis_result: Json,
    pub is_fallback: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
