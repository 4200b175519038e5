//! `SeaORM` entity definitions.

pub mod contacts;
pub mod docs;

pub mod prelude {
    //! Entity re-exports.

    pub use super::contacts::Entity as Contacts;
    pub use super::docs::Entity as Docs;
}
