//! Seed command - reference data for a fresh installation.
//!
//! Creates the default leave type catalog, a starter department, and the
//! initial admin account. Credentials come from flags or environment, never
//! from source.

use std::sync::Arc;

use crate::cli::args::SeedArgs;
use crate::config::Config;
use crate::domain::{Password, Role};
use crate::errors::AppResult;
use crate::infra::{Database, Persistence, UnitOfWork};

/// Default leave type catalog: (code, name, annual quota)
const DEFAULT_LEAVE_TYPES: &[(&str, &str, i32)] = &[
    ("ANNUAL", "Annual Leave", 20),
    ("SICK", "Sick Leave", 10),
    ("CASUAL", "Casual Leave", 5),
    ("UNPAID", "Unpaid Leave", 0),
];

/// Execute the seed command
pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    tracing::info!("Seeding reference data...");

    let db = Database::connect(&config).await;
    let uow = Arc::new(Persistence::new(db.get_connection()));

    for (code, name, quota) in DEFAULT_LEAVE_TYPES {
        if uow.leave_types().find_by_code(code).await?.is_none() {
            uow.leave_types()
                .create(code.to_string(), name.to_string(), *quota)
                .await?;
            tracing::info!("Created leave type {}", code);
        }
    }

    if uow.departments().find_by_name("General").await?.is_none() {
        uow.departments()
            .create("General".to_string(), Some("Default department".to_string()))
            .await?;
        tracing::info!("Created department General");
    }

    if uow
        .users()
        .find_by_email_with_deleted(&args.admin_email)
        .await?
        .is_none()
    {
        let password_hash = Password::new(&args.admin_password)?.into_string();
        uow.users()
            .create(
                args.admin_username.clone(),
                args.admin_email.clone(),
                password_hash,
                "Administrator".to_string(),
                Role::Admin,
            )
            .await?;
        tracing::info!("Created admin account {}", args.admin_email);
    } else {
        tracing::info!("Admin account already exists, skipping");
    }

    tracing::info!("Seeding complete");
    Ok(())
}
