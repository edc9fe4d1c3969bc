//! Application assembly
//!
//! Wires the configuration into the data layer and services and returns the
//! state shared by every request handler.

use std::sync::Arc;

use crate::api::{ApiSettings, AppState};
use crate::config::Config;
use crate::db::{seed, Database};
use crate::services::{AuthService, RecordKind, RecordService, StatsService, TokenService};

/// Build the application state on fresh in-memory stores
pub async fn build_state(config: &Config) -> anyhow::Result<AppState> {
    build_state_with(Database::in_memory(), config).await
}

/// Build the application state on an existing database
pub async fn build_state_with(db: Database, config: &Config) -> anyhow::Result<AppState> {
    let tokens = TokenService::new(config.auth.secret(), config.auth.token_ttl());
    let auth_service = Arc::new(AuthService::new(db.users.clone(), tokens));

    let teacher_service = Arc::new(RecordService::new(db.teachers.clone(), RecordKind::Teacher));
    let student_service = Arc::new(RecordService::new(db.students.clone(), RecordKind::Student));
    let schedule_service = Arc::new(RecordService::new(db.schedule.clone(), RecordKind::Lesson));
    let stats_service = Arc::new(StatsService::new(
        teacher_service.clone(),
        student_service.clone(),
        schedule_service.clone(),
    ));

    if config.seed_demo_data {
        seed::seed_records(&db).await?;
        auth_service.seed_demo_accounts().await?;
    }

    Ok(AppState {
        auth_service,
        teacher_service,
        student_service,
        schedule_service,
        stats_service,
        settings: ApiSettings {
            enforce_auth: config.auth.enforce,
            expose_demo_credentials: config.auth.expose_demo_credentials,
        },
    })
}
