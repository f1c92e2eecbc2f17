use portal_shell::{
    Env, RecordingTitleSink, Shell, ShellConfig, UserRecord,
    identity::StaticIdentityProvider,
    roles::InMemoryUserRecordStore,
    routes::portal_routes,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// main
///
/// Demo entry point: assembles the shell against in-memory collaborators and
/// scripts the navigation scenarios the guard exists for: anonymous access
/// to protected routes, guest-only pages while signed in, role-restricted
/// pages for both roles, and the cache reset on actor switch.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading
    dotenv::dotenv().ok();
    let config = ShellConfig::load();

    // 2. Logging Filter Setup
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "portal_shell=debug".into());

    // 3. Initialize Logging based on Environment
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Shell starting in {:?} mode", config.env);

    // 4. Collaborator Setup (in-memory stand-ins for the real providers)
    let student_id = Uuid::new_v4();
    let teacher_id = Uuid::new_v4();

    let store = Arc::new(InMemoryUserRecordStore::new());
    for value in [
        serde_json::json!({
            "actor_id": student_id,
            "email": "ivanov@mvek.ru",
            "role": "student",
        }),
        serde_json::json!({
            "actor_id": teacher_id,
            "email": "petrova@mvek.ru",
            "role": "teacher",
        }),
    ] {
        match serde_json::from_value::<UserRecord>(value) {
            Ok(record) => store.insert(record),
            Err(e) => tracing::error!("seed record rejected: {e}"),
        }
    }

    let provider = Arc::new(StaticIdentityProvider::new());
    let titles = Arc::new(RecordingTitleSink::new());

    // 5. Shell Assembly
    let shell = Shell::new(
        portal_routes(),
        provider.clone(),
        store.clone(),
        titles.clone(),
        config,
    );
    let navigator = shell.navigator();

    // 6. Scripted Navigations
    tracing::info!("--- anonymous visitor ---");
    report(navigator.navigate_to("/").await);
    report(navigator.navigate_to("/profile").await);
    report(navigator.navigate_to("/no/such/page").await);

    tracing::info!("--- student session ---");
    provider.sign_in(student_id);
    report(navigator.navigate_to("/auth").await);
    report(navigator.navigate_to("/profile/edit").await);
    report(navigator.navigate_to("/students").await);

    tracing::info!("--- teacher session ---");
    provider.sign_out();
    provider.sign_in(teacher_id);
    report(navigator.navigate_to("/profile/edit").await);
    report(navigator.navigate_to("/students").await);

    tracing::info!(
        store_lookups = store.lookups(),
        last_title = ?titles.last_title(),
        "demo finished"
    );
}

/// Logs one navigation outcome as structured JSON.
fn report(outcome: portal_shell::NavigationOutcome) {
    match serde_json::to_string(&outcome) {
        Ok(json) => tracing::info!(outcome = %json, "navigation finished"),
        Err(e) => tracing::error!("outcome serialization failed: {e}"),
    }
}
