//! Mock repository implementation for isolating services in tests.

use mockall::mock;

use crate::domain::contact::{Contact, NewContact, Role, UpdateContact};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ContactListQuery, ContactReader, ContactWriter};

mock! {
    pub Repository {}

    impl ContactReader for Repository {
        fn get_by_id(&self, id: i32) -> RepositoryResult<Option<Contact>>;
        fn get_by_email_and_role(&self, email: &str, role: Role) -> RepositoryResult<Option<Contact>>;
        fn list(&self, query: ContactListQuery) -> RepositoryResult<(usize, Vec<Contact>)>;
    }

    impl ContactWriter for Repository {
        fn create(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
        fn update(
            &self,
            contact_id: i32,
            expected_version: i32,
            updates: &UpdateContact,
        ) -> RepositoryResult<Contact>;
        fn delete(&self, contact_id: i32) -> RepositoryResult<()>;
    }
}
