//! Contact repository for database operations.
//!
//! Implements the core contact and attachment-target traits using SeaORM.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::{from_json, map_db_err, map_unique_err, to_json};
use crate::entities::contacts;
use dossier_core::attachment::{Attachment, AttachmentError, AttachmentTarget};
use dossier_core::contact::{
    Contact, ContactFilter, ContactPatch, ContactRepository as ContactRepoTrait, NewContact,
};
use dossier_core::record::{RecordError, normalize_optional};
use dossier_shared::ContactId;

const EMAIL_IN_USE: &str = "email is already in use";

/// Contact repository implementation.
#[derive(Debug, Clone)]
pub struct ContactRepository {
    db: DatabaseConnection,
}

impl ContactRepository {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ContactRepoTrait for ContactRepository {
    async fn insert(&self, input: NewContact, at: DateTime<Utc>) -> Result<Contact, RecordError> {
        let active_model = contacts::ActiveModel {
            id: Set(ContactId::new().into_inner()),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            email: Set(input.email),
            address: Set(to_json(&input.address)?),
            phone_number: Set(input.phone_number),
            alt_phone: Set(input.alt_phone),
            labels: Set(to_json(&input.labels)?),
            notes: Set(input.notes),
            documents: Set(to_json(&input.documents)?),
            created_at: Set(at.into()),
            updated_at: Set(at.into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(map_unique_err(EMAIL_IN_USE))?;
        to_domain(model)
    }

    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, RecordError> {
        let model = contacts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        model.map(to_domain).transpose()
    }

    async fn list(&self, filter: ContactFilter) -> Result<Vec<Contact>, RecordError> {
        let mut query = contacts::Entity::find();
        match filter {
            ContactFilter::All => {}
            ContactFilter::Name {
                first_name,
                last_name,
            } => {
                query = query
                    .filter(contacts::Column::FirstName.eq(first_name))
                    .filter(contacts::Column::LastName.eq(last_name));
            }
            ContactFilter::Email(email) => {
                query = query.filter(contacts::Column::Email.eq(email));
            }
        }

        let models = query
            .order_by_desc(contacts::Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        models.into_iter().map(to_domain).collect()
    }

    async fn update(
        &self,
        id: ContactId,
        patch: ContactPatch,
        at: DateTime<Utc>,
    ) -> Result<Option<Contact>, RecordError> {
        let Some(existing) = contacts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let mut active: contacts::ActiveModel = existing.into();

        if let Some(first_name) = patch.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = patch.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(email) = patch.email {
            active.email = Set(email);
        }
        if let Some(address) = patch.address {
            active.address = Set(to_json(&address)?);
        }
        if let Some(phone_number) = patch.phone_number {
            active.phone_number = Set(normalize_optional(Some(phone_number)));
        }
        if let Some(alt_phone) = patch.alt_phone {
            active.alt_phone = Set(normalize_optional(Some(alt_phone)));
        }
        if let Some(labels) = patch.labels {
            active.labels = Set(to_json(&labels)?);
        }
        if let Some(notes) = patch.notes {
            active.notes = Set(normalize_optional(Some(notes)));
        }
        if let Some(documents) = patch.documents {
            active.documents = Set(to_json(&documents)?);
        }
        active.updated_at = Set(at.into());

        match active.update(&self.db).await {
            Ok(model) => to_domain(model).map(Some),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(map_unique_err(EMAIL_IN_USE)(e)),
        }
    }

    async fn delete(&self, id: ContactId) -> Result<Option<Contact>, RecordError> {
        let Some(existing) = contacts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let result = contacts::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        to_domain(existing).map(Some)
    }

    async fn email_taken(
        &self,
        email: &str,
        exclude: Option<ContactId>,
    ) -> Result<bool, RecordError> {
        let mut query = contacts::Entity::find().filter(contacts::Column::Email.eq(email));
        if let Some(id) = exclude {
            query = query.filter(contacts::Column::Id.ne(id.into_inner()));
        }

        let count: u64 = query.count(&self.db).await.map_err(map_db_err)?;
        Ok(count > 0)
    }
}

impl AttachmentTarget for ContactRepository {
    type Id = ContactId;
    type Record = Contact;

    const KIND: &'static str = "Contact";

    async fn owner_exists(&self, id: ContactId) -> Result<bool, AttachmentError> {
        let count: u64 = contacts::Entity::find_by_id(id.into_inner())
            .count(&self.db)
            .await
            .map_err(|e| AttachmentError::repository(e.to_string()))?;

        Ok(count > 0)
    }

    async fn append_documents(
        &self,
        id: ContactId,
        documents: Vec<Attachment>,
        at: DateTime<Utc>,
    ) -> Result<Option<Contact>, AttachmentError> {
        // Single statement so concurrent appends never drop each other's entries.
        let models = contacts::Entity::update_many()
            .col_expr(
                contacts::Column::Documents,
                Expr::cust_with_values("documents || ?", [to_json(&documents)?]),
            )
            .col_expr(contacts::Column::UpdatedAt, Expr::value(at))
            .filter(contacts::Column::Id.eq(id.into_inner()))
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| AttachmentError::repository(e.to_string()))?;

        Ok(models.into_iter().next().map(to_domain).transpose()?)
    }
}

/// Convert database model to domain model.
fn to_domain(model: contacts::Model) -> Result<Contact, RecordError> {
    Ok(Contact {
        id: ContactId::from_uuid(model.id),
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        address: from_json(model.address)?,
        phone_number: model.phone_number,
        alt_phone: model.alt_phone,
        labels: from_json(model.labels)?,
        notes: model.notes,
        documents: from_json(model.documents)?,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
