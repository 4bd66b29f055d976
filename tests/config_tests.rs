use std::env;
use std::io::Write;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use enrollrows::config::{self, ConfigError, EnrollmentConfig, PageContext};
use enrollrows::dom::Document;
use enrollrows::enrollment::add_row;
use enrollrows::models::RoleOption;

// Tests in this file mutate process-wide environment variables.
static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const VARS: &[&str] = &[
    "ENROLL_CONTAINER_ID",
    "ENROLL_ROW_ID_PREFIX",
    "ENROLL_FIELD_PREFIX",
    "ENROLL_ROLES",
    "ENROLL_HOST",
    "ENROLL_PORT",
    "ENROLL_PKG_DIR",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_defaults_without_environment() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let config = EnrollmentConfig::from_env().unwrap();
    assert_eq!(config, EnrollmentConfig::default());
    assert_eq!(config.container_id, "additional_enrollments");
    assert_eq!(config::get_host(), "127.0.0.1");
    assert_eq!(config::get_port(), Ok(8080));
    assert_eq!(config::get_pkg_dir(), "pkg");
}

#[test]
fn test_environment_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    env::set_var("ENROLL_CONTAINER_ID", "extra_people");
    env::set_var("ENROLL_ROW_ID_PREFIX", "person-");
    env::set_var("ENROLL_ROLES", "TA:TA,OBS:Observer");
    env::set_var("ENROLL_PORT", "9001");

    let config = EnrollmentConfig::from_env().unwrap();
    assert_eq!(config.container_id, "extra_people");
    assert_eq!(config.row_id(2), "person-2");
    assert_eq!(config.sequence_of("person-12"), Some(12));
    assert_eq!(
        config.roles,
        vec![RoleOption::new("TA", "TA"), RoleOption::new("OBS", "Observer")]
    );
    assert_eq!(config::get_port(), Ok(9001));

    clear_env();
}

#[test]
fn test_blank_values_fall_back_to_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    env::set_var("ENROLL_CONTAINER_ID", "   ");
    env::set_var("ENROLL_ROLES", "");

    let config = EnrollmentConfig::from_env().unwrap();
    assert_eq!(config, EnrollmentConfig::default());

    clear_env();
}

#[test]
fn test_invalid_values_are_reported() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    env::set_var("ENROLL_ROLES", "TA:TA,TA:Again");
    assert_eq!(
        EnrollmentConfig::from_env(),
        Err(ConfigError::DuplicateRole("TA".to_string()))
    );

    env::set_var("ENROLL_PORT", "eighty");
    assert_eq!(config::get_port(), Err(ConfigError::InvalidPort("eighty".to_string())));

    clear_env();
}

#[test]
fn test_env_file_is_loaded() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "ENROLL_CONTAINER_ID=from_file").unwrap();
    writeln!(file, "ENROLL_ROLES=LIB:Librarian").unwrap();
    file.flush().unwrap();

    config::load_env_file(file.path().to_str());
    let config = EnrollmentConfig::from_env().unwrap();
    assert_eq!(config.container_id, "from_file");
    assert_eq!(config.roles, vec![RoleOption::new("LIB", "Librarian")]);

    clear_env();
}

#[test]
fn test_parse_roles_errors() {
    assert_eq!(config::parse_roles(" , "), Err(ConfigError::EmptyRoles));
    assert_eq!(
        config::parse_roles("TA:"),
        Err(ConfigError::InvalidRole("TA:".to_string()))
    );
    assert_eq!(
        config::parse_roles(":Label"),
        Err(ConfigError::InvalidRole(":Label".to_string()))
    );
}

#[test]
fn test_sequence_of_rejects_foreign_ids() {
    let config = EnrollmentConfig::default();
    assert_eq!(config.sequence_of("addEnroll-3"), Some(3));
    assert_eq!(config.sequence_of("addEnroll-"), None);
    assert_eq!(config.sequence_of("addEnroll-x"), None);
    assert_eq!(config.sequence_of("sidebar"), None);
}

#[test]
fn test_quotes_in_ids_are_rejected() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    env::set_var("ENROLL_CONTAINER_ID", "it's");
    assert_eq!(
        EnrollmentConfig::from_env(),
        Err(ConfigError::UnsafeId {
            var: "ENROLL_CONTAINER_ID".to_string(),
            value: "it's".to_string()
        })
    );

    clear_env();
    env::set_var("ENROLL_ROW_ID_PREFIX", "row\"");
    assert!(matches!(
        EnrollmentConfig::from_env(),
        Err(ConfigError::UnsafeId { ref var, .. }) if var == "ENROLL_ROW_ID_PREFIX"
    ));

    // The field prefix never lands inside the onclick handler.
    clear_env();
    env::set_var("ENROLL_CONTAINER_ID", "extra-people_2");
    assert_eq!(EnrollmentConfig::from_env().unwrap().container_id, "extra-people_2");

    clear_env();
}

#[test]
fn test_page_context_carries_configured_ids() {
    let server = EnrollmentConfig {
        container_id: "extra_people".to_string(),
        row_id_prefix: "person-".to_string(),
        field_prefix: "people".to_string(),
        roles: vec![RoleOption::new("OBS", "Observer")],
        ..EnrollmentConfig::default()
    };

    let json = serde_json::to_value(PageContext::from(&server)).unwrap();
    assert_eq!(json["containerId"], "extra_people");
    assert_eq!(json["rowIdPrefix"], "person-");
    assert_eq!(json["fieldPrefix"], "people");
    assert_eq!(json["roles"][0]["code"], "OBS");

    // What the browser bindings rebuild from the injected context.
    let context: PageContext = serde_json::from_value(json).unwrap();
    let browser = EnrollmentConfig::default().with_page_context(context);
    assert_eq!(browser, server);

    let mut doc = Document::with_container("extra_people");
    let added = add_row(&mut doc, &browser).unwrap();
    assert_eq!(added.row_id, "person-1");
    assert!(add_row(&mut doc, &EnrollmentConfig::default()).is_err());
}

#[test]
fn test_page_context_without_roles_keeps_defaults() {
    let context: PageContext = serde_json::from_str(
        r#"{"containerId":"box","rowIdPrefix":"r-","fieldPrefix":"extra"}"#,
    )
    .unwrap();
    let config = EnrollmentConfig::default().with_page_context(context);
    assert_eq!(config.container_id, "box");
    assert_eq!(config.field_name(1, "user"), "extra[1][user]");
    assert_eq!(config.roles, EnrollmentConfig::default().roles);
}
