use crate::config::EnrollmentConfig;
use crate::dom::Dom;

use super::adder::{add_row, AddedRow};
use super::error::EnrollmentError;
use super::notify::Notifier;
use super::remover::{activate_delete, remove_row, RemovedRow};

/// The additional-enrollment section of a page: a DOM backend, the page
/// configuration, and a sink for user notifications.
///
/// Every failed operation is reported to the notifier with its
/// [`EnrollmentError::user_message`] and also returned to the caller.
pub struct EnrollmentRows<D: Dom, N: Notifier> {
    dom: D,
    config: EnrollmentConfig,
    notifier: N,
}

impl<D: Dom, N: Notifier> EnrollmentRows<D, N> {
    pub fn new(dom: D, config: EnrollmentConfig, notifier: N) -> Self {
        Self {
            dom,
            config,
            notifier,
        }
    }

    pub fn add(&mut self) -> Result<AddedRow, EnrollmentError> {
        let result = add_row(&mut self.dom, &self.config);
        self.report(result)
    }

    pub fn remove(&mut self, container_id: &str, row_id: &str) -> Result<RemovedRow, EnrollmentError> {
        let result = remove_row(&mut self.dom, container_id, row_id);
        self.report(result)
    }

    /// Removes a row from the configured container.
    pub fn remove_row(&mut self, row_id: &str) -> Result<RemovedRow, EnrollmentError> {
        let container_id = self.config.container_id.clone();
        self.remove(&container_id, row_id)
    }

    /// Same as clicking the given Delete control.
    pub fn activate_delete(&mut self, control: &D::Node) -> Result<RemovedRow, EnrollmentError> {
        let result = activate_delete(&mut self.dom, control);
        self.report(result)
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn config(&self) -> &EnrollmentConfig {
        &self.config
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    fn report<T>(&mut self, result: Result<T, EnrollmentError>) -> Result<T, EnrollmentError> {
        if let Err(e) = &result {
            self.notifier.notify(&e.user_message());
        }
        result
    }
}
