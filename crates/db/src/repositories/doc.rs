//! Doc repository for database operations.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::{from_json, map_db_err, to_json};
use crate::entities::docs;
use dossier_core::attachment::{Attachment, AttachmentError, AttachmentTarget};
use dossier_core::doc::{Doc, DocPatch, DocRepository as DocRepoTrait, ValidDoc};
use dossier_core::record::{RecordError, normalize_optional};
use dossier_shared::{ContactId, DocId};

/// Doc repository implementation.
#[derive(Debug, Clone)]
pub struct DocRepository {
    db: DatabaseConnection,
}

impl DocRepository {
    /// Create a new doc repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl DocRepoTrait for DocRepository {
    async fn insert(&self, input: ValidDoc, at: DateTime<Utc>) -> Result<Doc, RecordError> {
        let active_model = docs::ActiveModel {
            id: Set(DocId::new().into_inner()),
            doc_title: Set(input.doc_title),
            pb_username: Set(input.pb_username),
            pb_email: Set(input.pb_email),
            labels: Set(to_json(&input.labels)?),
            notes: Set(input.notes),
            documents: Set(to_json(&input.documents)?),
            contact_id: Set(input.contact.into_inner()),
            created_at: Set(at.into()),
            updated_at: Set(at.into()),
        };

        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;
        to_domain(model)
    }

    async fn find_by_id(&self, id: DocId) -> Result<Option<Doc>, RecordError> {
        let model = docs::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        model.map(to_domain).transpose()
    }

    async fn list(&self) -> Result<Vec<Doc>, RecordError> {
        let models = docs::Entity::find()
            .order_by_desc(docs::Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        models.into_iter().map(to_domain).collect()
    }

    async fn update(
        &self,
        id: DocId,
        patch: DocPatch,
        at: DateTime<Utc>,
    ) -> Result<Option<Doc>, RecordError> {
        let Some(existing) = docs::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let mut active: docs::ActiveModel = existing.into();

        if let Some(doc_title) = patch.doc_title {
            active.doc_title = Set(doc_title);
        }
        if let Some(pb_username) = patch.pb_username {
            active.pb_username = Set(normalize_optional(Some(pb_username)));
        }
        if let Some(pb_email) = patch.pb_email {
            active.pb_email = Set(normalize_optional(Some(pb_email)));
        }
        if let Some(labels) = patch.labels {
            active.labels = Set(to_json(&labels)?);
        }
        if let Some(notes) = patch.notes {
            active.notes = Set(normalize_optional(Some(notes)));
        }
        if let Some(contact) = patch.contact {
            active.contact_id = Set(contact.into_inner());
        }
        if let Some(documents) = patch.documents {
            active.documents = Set(to_json(&documents)?);
        }
        active.updated_at = Set(at.into());

        match active.update(&self.db).await {
            Ok(model) => to_domain(model).map(Some),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(map_db_err(e)),
        }
    }

    async fn delete(&self, id: DocId) -> Result<Option<Doc>, RecordError> {
        let Some(existing) = docs::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let result = docs::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        to_domain(existing).map(Some)
    }
}

impl AttachmentTarget for DocRepository {
    type Id = DocId;
    type Record = Doc;

    const KIND: &'static str = "Doc";

    async fn owner_exists(&self, id: DocId) -> Result<bool, AttachmentError> {
        let count: u64 = docs::Entity::find_by_id(id.into_inner())
            .count(&self.db)
            .await
            .map_err(|e| AttachmentError::repository(e.to_string()))?;

        Ok(count > 0)
    }

    async fn append_documents(
        &self,
        id: DocId,
        documents: Vec<Attachment>,
        at: DateTime<Utc>,
    ) -> Result<Option<Doc>, AttachmentError> {
        let models = docs::Entity::update_many()
            .col_expr(
                docs::Column::Documents,
                Expr::cust_with_values("documents || ?", [to_json(&documents)?]),
            )
            .col_expr(docs::Column::UpdatedAt, Expr::value(at))
            .filter(docs::Column::Id.eq(id.into_inner()))
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| AttachmentError::repository(e.to_string()))?;

        Ok(models.into_iter().next().map(to_domain).transpose()?)
    }
}

/// Convert database model to domain model.
fn to_domain(model: docs::Model) -> Result<Doc, RecordError> {
    Ok(Doc {
        id: DocId::from_uuid(model.id),
        doc_title: model.doc_title,
        pb_username: model.pb_username,
        pb_email: model.pb_email,
        labels: from_json(model.labels)?,
        notes: model.notes,
        documents: from_json(model.documents)?,
        contact: ContactId::from_uuid(model.contact_id),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
