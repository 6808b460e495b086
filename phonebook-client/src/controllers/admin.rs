//! Admin surface
//!
//! Gated on an explicit [`Session`]. While signed out the controller only
//! offers the login presentation and never touches the record store.

use std::sync::Arc;

use shared::directory::{PageSizes, QueryState, ViewModel, compose};
use shared::models::{EmployeeDraft, FieldErrors};
use shared::session::{AuthError, IdentityProvider, Session};
use shared::store::{EmployeeStore, RecordSet, StoreError, validate_draft};
use thiserror::Error;

/// What the admin surface should present
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminView {
    /// Signed out: show the login form, no record controls
    LoginRequired,
    /// Signed in: the admin table
    Ready(ViewModel),
}

/// Admin action failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    #[error("Sign in required")]
    LoginRequired,
    #[error("No employee form is open")]
    NoForm,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Employee create/edit form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    /// Id of the record being edited; `None` when creating
    pub editing: Option<String>,
    pub draft: EmployeeDraft,
    /// Inline messages from the last save attempt
    pub errors: FieldErrors,
}

impl EmployeeForm {
    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }
}

/// Admin table controller
pub struct AdminController {
    store: Arc<dyn EmployeeStore>,
    identity: Arc<dyn IdentityProvider>,
    session: Session,
    records: RecordSet,
    query: QueryState,
    sizes: PageSizes,
    view: ViewModel,
    form: Option<EmployeeForm>,
    pending_delete: Option<String>,
    login_error: Option<AuthError>,
    notice: Option<StoreError>,
}

impl AdminController {
    pub fn new(
        store: Arc<dyn EmployeeStore>,
        identity: Arc<dyn IdentityProvider>,
        session: Session,
        sizes: PageSizes,
    ) -> Self {
        let records = RecordSet::default();
        let query = QueryState::admin();
        let view = compose(&records.employees, &query, &sizes);
        Self {
            store,
            identity,
            session,
            records,
            query,
            sizes,
            view,
            form: None,
            pending_delete: None,
            login_error: None,
            notice: None,
        }
    }

    /// Enter the admin surface
    ///
    /// Signed out yields [`AdminView::LoginRequired`] without a store call.
    /// Signed in loads the record set; a failed load keeps the previous table
    /// and leaves the error in [`notice`](Self::notice).
    pub async fn open(&mut self) -> AdminView {
        if !self.session.is_authenticated {
            return AdminView::LoginRequired;
        }
        let _ = self.refresh().await;
        AdminView::Ready(self.view.clone())
    }

    /// Current presentation without reloading
    pub fn current(&self) -> AdminView {
        if self.session.is_authenticated {
            AdminView::Ready(self.view.clone())
        } else {
            AdminView::LoginRequired
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        match self.session.login(self.identity.as_ref(), email, password).await {
            Ok(()) => {
                self.login_error = None;
                let _ = self.refresh().await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Admin login failed");
                self.login_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Sign out and drop everything that belongs to the signed-in surface
    pub async fn logout(&mut self) -> Result<(), AuthError> {
        let result = self.session.logout(self.identity.as_ref()).await;
        self.form = None;
        self.pending_delete = None;
        self.notice = None;
        result
    }

    /// Reload the record set
    pub async fn refresh(&mut self) -> Result<(), AdminError> {
        self.ensure_signed_in()?;
        match self.store.list().await {
            Ok(set) => {
                self.notice = None;
                self.apply(set);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Admin refresh failed");
                self.notice = Some(e.clone());
                Err(e.into())
            }
        }
    }

    /// Install a fetched record set unless it is older than the current one
    pub fn apply(&mut self, set: RecordSet) -> bool {
        let applied = self.records.replace_if_newer(set);
        if applied {
            self.recompose();
        }
        applied
    }

    pub fn search(&mut self, term: impl Into<String>) {
        self.query.set_search_term(term);
        self.recompose();
    }

    /// Empty string selects all departments
    pub fn select_department(&mut self, department: impl Into<String>) {
        self.query.set_department(department);
        self.recompose();
    }

    pub fn select_floor(&mut self, floor: impl Into<String>) {
        self.query.set_floor(floor);
        self.recompose();
    }

    pub fn clear_filters(&mut self) {
        self.query.clear_filters();
        self.recompose();
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let moved = self.query.go_to_page(page, self.view.total_pages);
        if moved {
            self.recompose();
        }
        moved
    }

    // ========== Create / edit ==========

    /// Open an empty form
    pub fn begin_create(&mut self) -> Result<&mut EmployeeForm, AdminError> {
        self.ensure_signed_in()?;
        Ok(self.form.insert(EmployeeForm::default()))
    }

    /// Open the form pre-filled with a record; `None` if it is not in the set
    pub fn begin_edit(&mut self, id: &str) -> Result<Option<&mut EmployeeForm>, AdminError> {
        self.ensure_signed_in()?;
        let Some(employee) = self.records.find(id) else {
            return Ok(None);
        };
        let form = EmployeeForm {
            editing: Some(employee.id.clone()),
            draft: employee.to_draft(),
            errors: FieldErrors::default(),
        };
        Ok(Some(self.form.insert(form)))
    }

    pub fn form(&self) -> Option<&EmployeeForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut EmployeeForm> {
        self.form.as_mut()
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
    }

    /// Submit the open form
    ///
    /// Field problems stay on the form and never reach the store. A record
    /// that vanished meanwhile closes the form and reloads the table. A store
    /// outage keeps the form open for a retry. Returns the record id.
    pub async fn save(&mut self) -> Result<String, AdminError> {
        self.ensure_signed_in()?;
        let form = self.form.as_mut().ok_or(AdminError::NoForm)?;

        if let Err(e) = validate_draft(&form.draft) {
            if let StoreError::Validation(fields) = &e {
                form.errors = fields.clone();
            }
            return Err(e.into());
        }
        form.errors = FieldErrors::default();

        let draft = form.draft.clone();
        let result = match form.editing.clone() {
            Some(id) => self.store.update(&id, draft).await.map(|()| id),
            None => self.store.create(draft).await,
        };

        match result {
            Ok(id) => {
                self.form = None;
                self.notice = None;
                let _ = self.refresh().await;
                Ok(id)
            }
            Err(e) => Err(self.mutation_failed(e).await),
        }
    }

    // ========== Delete ==========

    /// Ask for confirmation before deleting
    pub fn request_delete(&mut self, id: impl Into<String>) -> Result<(), AdminError> {
        self.ensure_signed_in()?;
        self.pending_delete = Some(id.into());
        Ok(())
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the record awaiting confirmation; `Ok(None)` if nothing was pending
    pub async fn confirm_delete(&mut self) -> Result<Option<String>, AdminError> {
        self.ensure_signed_in()?;
        let Some(id) = self.pending_delete.take() else {
            return Ok(None);
        };

        match self.store.delete(&id).await {
            Ok(()) => {
                self.notice = None;
                let _ = self.refresh().await;
                Ok(Some(id))
            }
            Err(e) => Err(self.mutation_failed(e).await),
        }
    }

    // ========== Accessors ==========

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    /// Last login failure, for the login surface only
    pub fn login_error(&self) -> Option<&AuthError> {
        self.login_error.as_ref()
    }

    /// User-visible notice from the last failed mutation or load
    pub fn notice(&self) -> Option<&StoreError> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn ensure_signed_in(&self) -> Result<(), AdminError> {
        if self.session.is_authenticated {
            Ok(())
        } else {
            Err(AdminError::LoginRequired)
        }
    }

    async fn mutation_failed(&mut self, err: StoreError) -> AdminError {
        match &err {
            StoreError::NotFound(id) => {
                tracing::info!(id = %id, "Employee vanished, reloading");
                self.form = None;
                let _ = self.refresh().await;
                // Keep the vanished-record notice over any refresh outcome
                self.notice = Some(err.clone());
            }
            StoreError::Validation(fields) => {
                if let Some(form) = self.form.as_mut() {
                    form.errors = fields.clone();
                }
            }
            StoreError::Unavailable(_) => {
                self.notice = Some(err.clone());
            }
        }
        err.into()
    }

    fn recompose(&mut self) {
        self.view = compose(&self.records.employees, &self.query, &self.sizes);
        if self.view.current_page != self.query.page() {
            self.query
                .go_to_page(self.view.current_page, self.view.total_pages);
        }
    }
}
