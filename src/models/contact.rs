use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::contact::{
    Contact as DomainContact, EnumParseError, NewContact as DomainNewContact,
    UpdateContact as DomainUpdateContact,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::contacts)]
/// Diesel model for [`crate::domain::contact::Contact`].
///
/// Enum columns are stored as uppercase text.
pub struct Contact {
    pub id: i32,
    pub name: String,
    pub contact_type: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub version: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::contacts)]
/// Insertable form of [`Contact`]. `created_at` and `version` come from
/// column defaults.
pub struct NewContact<'a> {
    pub name: &'a str,
    pub contact_type: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub role: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::contacts)]
/// Data used when updating a [`Contact`] record. The version bump is applied
/// by the repository alongside this changeset.
pub struct UpdateContact<'a> {
    pub name: &'a str,
    pub contact_type: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub role: &'a str,
}

impl TryFrom<Contact> for DomainContact {
    type Error = EnumParseError;

    fn try_from(contact: Contact) -> Result<Self, Self::Error> {
        Ok(Self {
            id: contact.id,
            name: contact.name,
            contact_type: contact.contact_type.parse()?,
            email: contact.email,
            phone: contact.phone,
            address: contact.address,
            role: contact.role.parse()?,
            created_at: contact.created_at,
            version: contact.version,
        })
    }
}

impl<'a> From<&'a DomainNewContact> for NewContact<'a> {
    fn from(contact: &'a DomainNewContact) -> Self {
        Self {
            name: contact.name.as_str(),
            contact_type: contact.contact_type.as_str(),
            email: contact.email.as_str(),
            phone: contact.phone.as_str(),
            address: contact.address.as_str(),
            role: contact.role.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateContact> for UpdateContact<'a> {
    fn from(contact: &'a DomainUpdateContact) -> Self {
        Self {
            name: contact.name.as_str(),
            contact_type: contact.contact_type.as_str(),
            email: contact.email.as_str(),
            phone: contact.phone.as_str(),
            address: contact.address.as_str(),
            role: contact.role.as_str(),
        }
    }
}
