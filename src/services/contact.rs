use validator::Validate;

use crate::domain::contact::{ContactType, NewContact, Role, UpdateContact};
use crate::dto::contact::{ContactDto, PaginatedResponse};
use crate::repository::{ContactListQuery, ContactReader, ContactWriter};
use crate::services::{ServiceError, ServiceResult};

/// Returns the requested page of contacts, newest first.
///
/// A non-empty search term filters with a case-insensitive substring match
/// across name, email, phone, address, type and role.
pub fn list_contacts<R>(
    repo: &R,
    page: usize,
    page_size: usize,
    search: Option<String>,
) -> ServiceResult<PaginatedResponse<ContactDto>>
where
    R: ContactReader + ?Sized,
{
    if page < 1 || page_size < 1 {
        return Err(ServiceError::InvalidArgument(
            "Page and page size must be positive.".to_string(),
        ));
    }

    let mut query = ContactListQuery::new().paginate(page, page_size);

    let search = search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if let Some(term) = search {
        query = query.search(term);
    }

    let (total, contacts) = repo.list(query).map_err(ServiceError::from)?;

    Ok(PaginatedResponse {
        content: contacts.into_iter().map(ContactDto::from).collect(),
        total_pages: total.div_ceil(page_size),
        total_elements: total,
        current_page: page,
        page_size,
    })
}

/// Fetches a contact by its identifier. Absence is `None`, not an error.
pub fn get_contact_by_id<R>(repo: &R, id: i32) -> ServiceResult<Option<ContactDto>>
where
    R: ContactReader + ?Sized,
{
    let contact = repo.get_by_id(id).map_err(ServiceError::from)?;
    Ok(contact.map(ContactDto::from))
}

/// Validates and persists a new contact.
///
/// Rejects the request when another contact already holds the same email
/// with the same role.
pub fn create_contact<R>(repo: &R, dto: ContactDto) -> ServiceResult<ContactDto>
where
    R: ContactReader + ContactWriter + ?Sized,
{
    let (contact_type, role) = require_type_and_role(&dto)?;
    dto.validate()
        .map_err(|e| ServiceError::InvalidArgument(e.to_string()))?;

    let new_contact = NewContact::new(dto.name, contact_type, dto.email, dto.phone, dto.address, role);

    if repo
        .get_by_email_and_role(&new_contact.email, role)
        .map_err(ServiceError::from)?
        .is_some()
    {
        return Err(ServiceError::AlreadyExists(format!(
            "Contact with email {} is already in the system as {role}",
            new_contact.email
        )));
    }

    let created = repo.create(&new_contact).map_err(ServiceError::from)?;
    Ok(created.into())
}

/// Replaces all mutable fields of an existing contact.
///
/// Fails when the contact does not exist, when the stored role is BOTH and
/// the request would narrow it, or when another writer got there first.
pub fn update_contact<R>(repo: &R, id: i32, dto: ContactDto) -> ServiceResult<ContactDto>
where
    R: ContactReader + ContactWriter + ?Sized,
{
    let (contact_type, role) = require_type_and_role(&dto)?;
    dto.validate()
        .map_err(|e| ServiceError::InvalidArgument(e.to_string()))?;

    let existing = repo
        .get_by_id(id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if !existing.role.can_transition_to(role) {
        return Err(ServiceError::InvalidRoleTransition(
            "Cannot update role as the contact already has all roles.".to_string(),
        ));
    }

    let updates = UpdateContact::new(dto.name, contact_type, dto.email, dto.phone, dto.address, role);
    let updated = repo
        .update(id, existing.version, &updates)
        .map_err(ServiceError::from)?;
    Ok(updated.into())
}

/// Removes a contact. Deleting an absent id is not an error, so deletes
/// stay safely retriable.
pub fn delete_contact<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: ContactWriter + ?Sized,
{
    repo.delete(id).map_err(ServiceError::from)
}

/// Renders every contact as CSV, newest first, with a header row.
pub fn export_contacts<R>(repo: &R) -> ServiceResult<Vec<u8>>
where
    R: ContactReader + ?Sized,
{
    let (_, contacts) = repo
        .list(ContactListQuery::new())
        .map_err(ServiceError::from)?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "contactId",
            "name",
            "type",
            "email",
            "phone",
            "address",
            "role",
            "createdAt",
        ])
        .map_err(|e| ServiceError::Internal(e.to_string()))?;

    for contact in contacts {
        writer
            .write_record([
                contact.id.to_string(),
                contact.name,
                contact.contact_type.to_string(),
                contact.email,
                contact.phone,
                contact.address,
                contact.role.to_string(),
                contact.created_at.date().to_string(),
            ])
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| ServiceError::Internal(e.to_string()))
}

fn require_type_and_role(dto: &ContactDto) -> ServiceResult<(ContactType, Role)> {
    match (dto.contact_type, dto.role) {
        (Some(contact_type), Some(role)) => Ok((contact_type, role)),
        _ => Err(ServiceError::InvalidArgument(
            "Contact type and role must be provided.".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contact::Contact;
    use crate::repository::mock::MockRepository;
    use chrono::Utc;

    fn sample_contact(id: i32, role: Role, version: i32) -> Contact {
        Contact {
            id,
            name: "John Doe".to_string(),
            contact_type: ContactType::Person,
            email: "john.doe@example.com".to_string(),
            phone: "1234567890".to_string(),
            address: "123 Elm Street".to_string(),
            role,
            created_at: Utc::now().naive_utc(),
            version,
        }
    }

    fn sample_dto(contact_type: Option<ContactType>, role: Option<Role>) -> ContactDto {
        ContactDto {
            contact_id: None,
            name: "John Doe".to_string(),
            contact_type,
            email: "john.doe@example.com".to_string(),
            phone: "1234567890".to_string(),
            address: "123 Elm Street".to_string(),
            role,
            created_at: None,
        }
    }

    fn contact_from_new(id: i32, new: &NewContact) -> Contact {
        Contact {
            id,
            name: new.name.clone(),
            contact_type: new.contact_type,
            email: new.email.clone(),
            phone: new.phone.clone(),
            address: new.address.clone(),
            role: new.role,
            created_at: Utc::now().naive_utc(),
            version: 0,
        }
    }

    #[test]
    fn create_succeeds_for_every_type_role_pair() {
        let pairs = [
            (ContactType::Person, Role::Customer),
            (ContactType::Person, Role::Supplier),
            (ContactType::Person, Role::Both),
            (ContactType::Company, Role::Customer),
            (ContactType::Company, Role::Supplier),
            (ContactType::Company, Role::Both),
        ];
        for (contact_type, role) in pairs {
            let mut repo = MockRepository::new();
            repo.expect_get_by_email_and_role()
                .times(1)
                .returning(|_, _| Ok(None));
            repo.expect_create()
                .times(1)
                .returning(|new| Ok(contact_from_new(1, new)));

            let created =
                create_contact(&repo, sample_dto(Some(contact_type), Some(role))).unwrap();
            assert_eq!(created.contact_id, Some(1));
            assert_eq!(created.contact_type, Some(contact_type));
            assert_eq!(created.role, Some(role));
            assert!(created.created_at.is_some());
        }
    }

    #[test]
    fn create_rejects_duplicate_email_and_role() {
        let mut repo = MockRepository::new();
        repo.expect_get_by_email_and_role()
            .withf(|email, role| email == "john.doe@example.com" && *role == Role::Customer)
            .times(1)
            .returning(|_, _| Ok(Some(sample_contact(1, Role::Customer, 0))));

        let err = create_contact(
            &repo,
            sample_dto(Some(ContactType::Company), Some(Role::Customer)),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists(_)));
    }

    #[test]
    fn create_requires_type_and_role() {
        let repo = MockRepository::new();

        let err = create_contact(&repo, sample_dto(Some(ContactType::Person), None)).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));

        let err = create_contact(&repo, sample_dto(None, Some(Role::Customer))).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }

    #[test]
    fn create_rejects_malformed_fields() {
        let repo = MockRepository::new();
        let mut dto = sample_dto(Some(ContactType::Person), Some(Role::Customer));
        dto.email = "not-an-email".to_string();

        let err = create_contact(&repo, dto).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }

    #[test]
    fn update_missing_contact_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_by_id().times(1).returning(|_| Ok(None));

        let err = update_contact(
            &repo,
            42,
            sample_dto(Some(ContactType::Person), Some(Role::Customer)),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[test]
    fn update_cannot_narrow_both_role() {
        let mut repo = MockRepository::new();
        repo.expect_get_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_contact(id, Role::Both, 2))));

        let err = update_contact(
            &repo,
            1,
            sample_dto(Some(ContactType::Person), Some(Role::Customer)),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRoleTransition(_)));
    }

    #[test]
    fn update_both_to_both_succeeds_with_version_precondition() {
        let mut repo = MockRepository::new();
        repo.expect_get_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_contact(id, Role::Both, 2))));
        repo.expect_update()
            .withf(|id, expected_version, updates| {
                *id == 1 && *expected_version == 2 && updates.role == Role::Both
            })
            .times(1)
            .returning(|id, expected_version, updates| {
                let mut contact = sample_contact(id, updates.role, expected_version + 1);
                contact.name = updates.name.clone();
                Ok(contact)
            });

        let updated = update_contact(
            &repo,
            1,
            sample_dto(Some(ContactType::Person), Some(Role::Both)),
        )
        .unwrap();
        assert_eq!(updated.role, Some(Role::Both));
    }

    #[test]
    fn update_surfaces_stale_version_as_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_get_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_contact(id, Role::Customer, 1))));
        repo.expect_update()
            .times(1)
            .returning(|_, _, _| Err(crate::repository::errors::RepositoryError::Stale));

        let err = update_contact(
            &repo,
            1,
            sample_dto(Some(ContactType::Person), Some(Role::Customer)),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::StaleRecord));
    }

    #[test]
    fn get_absent_contact_is_none() {
        let mut repo = MockRepository::new();
        repo.expect_get_by_id().times(1).returning(|_| Ok(None));

        assert_eq!(get_contact_by_id(&repo, 9).unwrap(), None);
    }

    #[test]
    fn list_rejects_non_positive_paging() {
        let repo = MockRepository::new();
        assert!(matches!(
            list_contacts(&repo, 0, 15, None).unwrap_err(),
            ServiceError::InvalidArgument(_)
        ));
        assert!(matches!(
            list_contacts(&repo, 1, 0, None).unwrap_err(),
            ServiceError::InvalidArgument(_)
        ));
    }

    #[test]
    fn list_computes_page_metadata() {
        let mut repo = MockRepository::new();
        repo.expect_list()
            .withf(|query| {
                query.search.is_none()
                    && query
                        .pagination
                        .as_ref()
                        .is_some_and(|p| p.page == 1 && p.per_page == 15)
            })
            .times(1)
            .returning(|_| {
                let page = (0..15)
                    .map(|i| sample_contact(32 - i, Role::Customer, 0))
                    .collect();
                Ok((32, page))
            });

        let response = list_contacts(&repo, 1, 15, None).unwrap();
        assert_eq!(response.content.len(), 15);
        assert_eq!(response.total_elements, 32);
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.current_page, 1);
        assert_eq!(response.page_size, 15);
    }

    #[test]
    fn list_trims_search_term_and_drops_empty_ones() {
        let mut repo = MockRepository::new();
        repo.expect_list()
            .withf(|query| query.search.as_deref() == Some("doe"))
            .times(1)
            .returning(|_| Ok((0, vec![])));
        list_contacts(&repo, 1, 15, Some(" doe ".to_string())).unwrap();

        let mut repo = MockRepository::new();
        repo.expect_list()
            .withf(|query| query.search.is_none())
            .times(1)
            .returning(|_| Ok((0, vec![])));
        list_contacts(&repo, 1, 15, Some("   ".to_string())).unwrap();
    }

    #[test]
    fn export_renders_header_and_rows() {
        let mut repo = MockRepository::new();
        repo.expect_list()
            .withf(|query| query.search.is_none() && query.pagination.is_none())
            .times(1)
            .returning(|_| {
                Ok((2, vec![
                    sample_contact(2, Role::Supplier, 0),
                    sample_contact(1, Role::Customer, 0),
                ]))
            });

        let bytes = export_contacts(&repo).unwrap();
        let csv = String::from_utf8(bytes).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "contactId,name,type,email,phone,address,role,createdAt"
        );
        assert!(csv.contains("John Doe"));
        assert!(csv.contains("SUPPLIER"));
        assert_eq!(lines.count(), 2);
    }
}
