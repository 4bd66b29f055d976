use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{default_roles, RoleOption};

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CONTAINER_ID: &str = "additional_enrollments";
pub const DEFAULT_ROW_ID_PREFIX: &str = "addEnroll-";
pub const DEFAULT_FIELD_PREFIX: &str = "additional_enrollments";
pub const DEFAULT_ROW_CLASS: &str = "additional-enrollments";
pub const DEFAULT_USER_LABEL: &str = "User (pennkey)";
pub const DEFAULT_ROLE_LABEL: &str = "Role";
pub const DEFAULT_PLACEHOLDER: &str = "Please select";
pub const DEFAULT_DELETE_LABEL: &str = "Delete";
/// Directory holding the `wasm-pack` output served under `/pkg`.
pub const DEFAULT_PKG_DIR: &str = "pkg";
pub const MAX_PREVIEW_ROWS: usize = 50;

/// Global function name the Delete control calls in the browser.
pub const REMOVE_FUNCTION: &str = "removeAdditionalEnrollmentRow";
/// Window property the preview page stores its [`PageContext`] under.
pub const PAGE_CONTEXT_GLOBAL: &str = "__ENROLL_CONTEXT__";

// Ids end up inside a single-quoted JS call in the Delete control's onclick.
const FORBIDDEN_ID_CHARS: &[char] = &['\'', '"', '\\'];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid role entry '{0}': expected CODE:Label")]
    InvalidRole(String),

    #[error("Duplicate role code: {0}")]
    DuplicateRole(String),

    #[error("Role list is empty")]
    EmptyRoles,

    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("{var} must not contain quotes or backslashes: {value}")]
    UnsafeId { var: String, value: String },
}

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

/// Everything the row operations need to know about the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrollmentConfig {
    /// Id of the element holding the rows.
    pub container_id: String,
    pub row_id_prefix: String,
    /// Leading part of every field name, `prefix[n][user]`.
    pub field_prefix: String,
    pub row_class: String,
    pub user_label: String,
    pub role_label: String,
    pub placeholder: String,
    pub delete_label: String,
    pub roles: Vec<RoleOption>,
}

impl Default for EnrollmentConfig {
    fn default() -> Self {
        Self {
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            row_id_prefix: DEFAULT_ROW_ID_PREFIX.to_string(),
            field_prefix: DEFAULT_FIELD_PREFIX.to_string(),
            row_class: DEFAULT_ROW_CLASS.to_string(),
            user_label: DEFAULT_USER_LABEL.to_string(),
            role_label: DEFAULT_ROLE_LABEL.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            delete_label: DEFAULT_DELETE_LABEL.to_string(),
            roles: default_roles(),
        }
    }
}

impl EnrollmentConfig {
    /// Reads overrides from the environment; unset or blank variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let roles = match env_non_empty("ENROLL_ROLES") {
            Some(raw) => parse_roles(&raw)?,
            None => defaults.roles,
        };
        Ok(Self {
            container_id: env_id("ENROLL_CONTAINER_ID", DEFAULT_CONTAINER_ID)?,
            row_id_prefix: env_id("ENROLL_ROW_ID_PREFIX", DEFAULT_ROW_ID_PREFIX)?,
            field_prefix: env_or("ENROLL_FIELD_PREFIX", DEFAULT_FIELD_PREFIX),
            roles,
            ..defaults
        })
    }

    /// ```
    /// use enrollrows::config::EnrollmentConfig;
    ///
    /// assert_eq!(EnrollmentConfig::default().row_id(3), "addEnroll-3");
    /// ```
    pub fn row_id(&self, sequence: u32) -> String {
        format!("{}{}", self.row_id_prefix, sequence)
    }

    /// ```
    /// use enrollrows::config::EnrollmentConfig;
    ///
    /// let config = EnrollmentConfig::default();
    /// assert_eq!(config.field_name(2, "role"), "additional_enrollments[2][role]");
    /// ```
    pub fn field_name(&self, sequence: u32, field: &str) -> String {
        format!("{}[{}][{}]", self.field_prefix, sequence, field)
    }

    /// Sequence number encoded in a generated row id, if `row_id` is one.
    pub fn sequence_of(&self, row_id: &str) -> Option<u32> {
        row_id.strip_prefix(&self.row_id_prefix)?.parse().ok()
    }

    /// Takes the ids and roles the server rendered the page with.
    pub fn with_page_context(self, context: PageContext) -> Self {
        let roles = if context.roles.is_empty() {
            self.roles
        } else {
            context.roles
        };
        Self {
            container_id: context.container_id,
            row_id_prefix: context.row_id_prefix,
            field_prefix: context.field_prefix,
            roles,
            ..self
        }
    }
}

/// The part of [`EnrollmentConfig`] the preview page hands to the browser
/// bindings through `window.__ENROLL_CONTEXT__`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    pub container_id: String,
    pub row_id_prefix: String,
    pub field_prefix: String,
    #[serde(default)]
    pub roles: Vec<RoleOption>,
}

impl From<&EnrollmentConfig> for PageContext {
    fn from(config: &EnrollmentConfig) -> Self {
        Self {
            container_id: config.container_id.clone(),
            row_id_prefix: config.row_id_prefix.clone(),
            field_prefix: config.field_prefix.clone(),
            roles: config.roles.clone(),
        }
    }
}

pub fn get_host() -> String {
    env_or("ENROLL_HOST", DEFAULT_HOST)
}

pub fn get_pkg_dir() -> String {
    env_or("ENROLL_PKG_DIR", DEFAULT_PKG_DIR)
}

pub fn get_port() -> Result<u16, ConfigError> {
    match env_non_empty("ENROLL_PORT") {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw)),
        None => Ok(DEFAULT_PORT),
    }
}

/// Parses `CODE:Label,CODE:Label`. A bare `CODE` uses the code as label.
///
/// ```
/// use enrollrows::config::parse_roles;
///
/// let roles = parse_roles("TA:Teaching Assistant, OBS").unwrap();
/// assert_eq!(roles[0].label, "Teaching Assistant");
/// assert_eq!(roles[1].label, "OBS");
/// ```
pub fn parse_roles(raw: &str) -> Result<Vec<RoleOption>, ConfigError> {
    let mut roles: Vec<RoleOption> = Vec::new();
    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (code, label) = match entry.split_once(':') {
            Some((code, label)) => (code.trim(), label.trim()),
            None => (entry, entry),
        };
        if code.is_empty() || label.is_empty() {
            return Err(ConfigError::InvalidRole(entry.to_string()));
        }
        if roles.iter().any(|r| r.code == code) {
            return Err(ConfigError::DuplicateRole(code.to_string()));
        }
        roles.push(RoleOption::new(code, label));
    }
    if roles.is_empty() {
        return Err(ConfigError::EmptyRoles);
    }
    Ok(roles)
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_non_empty(key).unwrap_or_else(|| default.to_string())
}

fn env_id(key: &str, default: &str) -> Result<String, ConfigError> {
    let value = env_or(key, default);
    if value.contains(FORBIDDEN_ID_CHARS) {
        return Err(ConfigError::UnsafeId {
            var: key.to_string(),
            value,
        });
    }
    Ok(value)
}
