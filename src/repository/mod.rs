use crate::db::DbPool;
use crate::domain::contact::{Contact, NewContact, Role, UpdateContact};
use crate::repository::errors::RepositoryResult;

pub mod contact;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Page length used when the caller does not specify one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 15;

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Listing query against the contact store.
///
/// Results are always ordered by id descending (newest first). A search term
/// filters with a case-insensitive substring OR-match across name, email,
/// phone, address and the text forms of contact type and role.
#[derive(Debug, Clone, Default)]
pub struct ContactListQuery {
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ContactListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait ContactReader {
    fn get_by_id(&self, id: i32) -> RepositoryResult<Option<Contact>>;
    fn get_by_email_and_role(&self, email: &str, role: Role) -> RepositoryResult<Option<Contact>>;
    /// Returns the total number of matching contacts and the requested page.
    fn list(&self, query: ContactListQuery) -> RepositoryResult<(usize, Vec<Contact>)>;
}

pub trait ContactWriter {
    fn create(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
    /// Replaces all mutable fields. The write only succeeds when the stored
    /// version still equals `expected_version`; the stored version is bumped.
    fn update(
        &self,
        contact_id: i32,
        expected_version: i32,
        updates: &UpdateContact,
    ) -> RepositoryResult<Contact>;
    /// Idempotent hard delete.
    fn delete(&self, contact_id: i32) -> RepositoryResult<()>;
}

/// Diesel implementation of the contact store.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}
