use std::sync::Arc;

use enrollrows::config::EnrollmentConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnrollmentConfig>,
    /// Rows pre-rendered into the form on every page load.
    pub seed_rows: usize,
    pub pkg_dir: String,
}

impl AppState {
    pub fn new(config: EnrollmentConfig, seed_rows: usize, pkg_dir: String) -> Self {
        Self {
            config: Arc::new(config),
            seed_rows,
            pkg_dir,
        }
    }
}
