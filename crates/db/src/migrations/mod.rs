//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250101_000001_create_surveys_table;
mod m20250101_000002_create_choices_table;
mod m20250101_000003_create_votes_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_surveys_table::Migration),
            Box::new(m20250101_000002_create_choices_table::Migration),
            Box::new(m20250101_000003_create_votes_table::Migration),
        ]
    }
}
