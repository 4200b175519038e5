//! Sample data seeder for Dossier development.
//!
//! Creates a handful of contacts and a doc for each one. Contacts whose email
//! already exists are skipped, so the seeder can be re-run.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::Context;
use dossier_core::contact::{Address, Contact, ContactQuery, ContactService, NewContact};
use dossier_core::doc::{DocService, NewDoc};
use dossier_db::{ContactRepository, DocRepository};

struct SampleContact {
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
    city: &'static str,
    state: &'static str,
    labels: &'static [&'static str],
    doc_title: &'static str,
}

const SAMPLES: &[SampleContact] = &[
    SampleContact {
        first_name: "Ada",
        last_name: "Lovelace",
        email: "ada@example.com",
        city: "London",
        state: "LDN",
        labels: &["client", "tax"],
        doc_title: "2025 Tax Return",
    },
    SampleContact {
        first_name: "Grace",
        last_name: "Hopper",
        email: "grace@example.com",
        city: "Arlington",
        state: "VA",
        labels: &["client", "estate"],
        doc_title: "Revocable Trust",
    },
    SampleContact {
        first_name: "Alan",
        last_name: "Turing",
        email: "alan@example.com",
        city: "Manchester",
        state: "MAN",
        labels: &["prospect"],
        doc_title: "Business Formation",
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    println!("Connecting to database...");
    let db = dossier_db::connect(&database_url)
        .await
        .context("failed to connect to database")?;

    let contacts = ContactService::new(Arc::new(ContactRepository::new(db.clone())));
    let docs = DocService::new(Arc::new(DocRepository::new(db)));

    let mut created = 0;
    for sample in SAMPLES {
        let Some(contact) = seed_contact(&contacts, sample).await? else {
            println!("  {} already exists, skipping...", sample.email);
            continue;
        };

        docs.create(NewDoc {
            doc_title: sample.doc_title.to_string(),
            pb_username: Some(format!("{}.{}", sample.first_name, sample.last_name).to_lowercase()),
            pb_email: Some(sample.email.to_string()),
            labels: sample.labels.iter().map(ToString::to_string).collect(),
            notes: None,
            contact: Some(contact.id),
            documents: Vec::new(),
        })
        .await
        .with_context(|| format!("failed to insert doc for {}", sample.email))?;

        println!("  Created {} {} with one doc", sample.first_name, sample.last_name);
        created += 1;
    }

    println!("Seeding complete! {created} contact(s) created");
    Ok(())
}

async fn seed_contact(
    contacts: &ContactService<ContactRepository>,
    sample: &SampleContact,
) -> anyhow::Result<Option<Contact>> {
    let existing = contacts
        .list(ContactQuery {
            email: Some(sample.email.to_string()),
            ..ContactQuery::default()
        })
        .await?;
    if !existing.is_empty() {
        return Ok(None);
    }

    let contact = contacts
        .create(NewContact {
            first_name: sample.first_name.to_string(),
            last_name: sample.last_name.to_string(),
            email: sample.email.to_string(),
            address: Address {
                street: None,
                city: Some(sample.city.to_string()),
                state: Some(sample.state.to_string()),
                zip: None,
            },
            phone_number: None,
            alt_phone: None,
            labels: sample.labels.iter().map(ToString::to_string).collect(),
            notes: Some("Seeded for local development".to_string()),
            documents: Vec::new(),
        })
        .await
        .with_context(|| format!("failed to insert contact {}", sample.email))?;

    Ok(Some(contact))
}
