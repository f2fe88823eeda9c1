use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::contact::{Contact, ContactType, Role};

/// Wire shape of a contact.
///
/// `contact_id` and `created_at` are store-assigned and ignored on input;
/// `type` and `role` stay optional here so the service can reject their
/// absence explicitly instead of the JSON layer doing it implicitly.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactDto {
    pub contact_id: Option<i32>,
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,
    #[serde(rename = "type")]
    pub contact_type: Option<ContactType>,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(custom(function = validate_phone))]
    pub phone: String,
    #[validate(length(max = 255, message = "Address must be less than 255 characters"))]
    pub address: String,
    pub role: Option<Role>,
    pub created_at: Option<NaiveDate>,
}

/// A page of items plus total-page/total-element metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub content: Vec<T>,
    pub total_pages: usize,
    pub total_elements: usize,
    pub current_page: usize,
    pub page_size: usize,
}

/// Accepts an optional leading `+` followed by 7 to 25 digits or common
/// phone punctuation.
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    let valid = (7..=25).contains(&digits.chars().count())
        && digits
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ' ' | '(' | ')' | '-'));
    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("Invalid phone number format".into());
        Err(err)
    }
}

impl From<Contact> for ContactDto {
    fn from(contact: Contact) -> Self {
        Self {
            contact_id: Some(contact.id),
            name: contact.name,
            contact_type: Some(contact.contact_type),
            email: contact.email,
            phone: contact.phone,
            address: contact.address,
            role: Some(contact.role),
            created_at: Some(contact.created_at.date()),
        }
    }
}
