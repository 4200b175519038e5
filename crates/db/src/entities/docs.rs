//! `SeaORM` Entity for docs table.
//!
//! `contact_id` is a plain column. No relation is declared because a doc may
//! outlive its contact.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "docs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub doc_title: String,
    pub pb_username: Option<String>,
    pub pb_email: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub labels: Json,
    pub notes: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub documents: Json,
    pub contact_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
