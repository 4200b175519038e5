//! Records migration.
//!
//! Creates the contacts and docs tables. Attachment descriptors live inline
//! as JSONB arrays on their owning row.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(RECORDS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS docs CASCADE;")
            .await?;
        db.execute_unprepared("DROP TABLE IF EXISTS contacts CASCADE;")
            .await?;
        Ok(())
    }
}

const RECORDS_SQL: &str = r"
-- Contacts: people the practice holds files for
CREATE TABLE contacts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    first_name TEXT NOT NULL CHECK (length(btrim(first_name)) > 0),
    last_name TEXT NOT NULL CHECK (length(btrim(last_name)) > 0),
    email TEXT NOT NULL,
    address JSONB NOT NULL DEFAULT '{}'::jsonb,
    phone_number TEXT,
    alt_phone TEXT,
    labels JSONB NOT NULL DEFAULT '[]'::jsonb,
    notes TEXT,
    documents JSONB NOT NULL DEFAULT '[]'::jsonb,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_contacts_documents_array CHECK (jsonb_typeof(documents) = 'array')
);

-- Email is unique across contacts
CREATE UNIQUE INDEX idx_contacts_email ON contacts(email);

-- Name pair lookup
CREATE INDEX idx_contacts_name ON contacts(first_name, last_name);

-- Default list order
CREATE INDEX idx_contacts_updated ON contacts(updated_at DESC);

-- Docs: titled records referencing a contact.
-- contact_id has no foreign key: deleting a contact leaves its docs.
CREATE TABLE docs (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    doc_title TEXT NOT NULL CHECK (length(btrim(doc_title)) > 0),
    pb_username TEXT,
    pb_email TEXT,
    labels JSONB NOT NULL DEFAULT '[]'::jsonb,
    notes TEXT,
    documents JSONB NOT NULL DEFAULT '[]'::jsonb,
    contact_id UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_docs_documents_array CHECK (jsonb_typeof(documents) = 'array')
);

CREATE INDEX idx_docs_contact ON docs(contact_id);
CREATE INDEX idx_docs_updated ON docs(updated_at DESC);
";
