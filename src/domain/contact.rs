use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Raised when an incoming string does not name a known enum variant.
///
/// Carries the offending input so callers can report what they received.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized {kind} `{value}`, expected one of {expected}")]
pub struct EnumParseError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Classification of a contact as a natural person or a company.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactType {
    Person,
    Company,
}

const CONTACT_TYPES: [(&str, ContactType); 2] = [
    ("PERSON", ContactType::Person),
    ("COMPANY", ContactType::Company),
];

impl ContactType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ContactType::Person => "PERSON",
            ContactType::Company => "COMPANY",
        }
    }
}

impl Display for ContactType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContactType {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        CONTACT_TYPES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(needle))
            .map(|(_, variant)| *variant)
            .ok_or_else(|| EnumParseError {
                kind: "contact type",
                value: s.to_string(),
                expected: "PERSON, COMPANY",
            })
    }
}

impl Serialize for ContactType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ContactType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(D::Error::custom)
    }
}

/// Commercial role a contact plays towards us.
///
/// `Both` is absorbing: once a contact is customer and supplier at the same
/// time, its role can no longer be narrowed back down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Customer,
    Supplier,
    Both,
}

const ROLES: [(&str, Role); 3] = [
    ("CUSTOMER", Role::Customer),
    ("SUPPLIER", Role::Supplier),
    ("BOTH", Role::Both),
];

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::Supplier => "SUPPLIER",
            Role::Both => "BOTH",
        }
    }

    /// Whether an update from `self` to `new_role` is legal.
    pub fn can_transition_to(self, new_role: Role) -> bool {
        !(self == Role::Both && new_role != Role::Both)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ROLES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(needle))
            .map(|(_, variant)| *variant)
            .ok_or_else(|| EnumParseError {
                kind: "role",
                value: s.to_string(),
                expected: "CUSTOMER, SUPPLIER, BOTH",
            })
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(D::Error::custom)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub id: i32,
    pub name: String,
    pub contact_type: ContactType,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
    /// Optimistic concurrency counter, bumped by the store on every update.
    pub version: i32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub contact_type: ContactType,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: Role,
}

impl NewContact {
    #[must_use]
    pub fn new(
        name: String,
        contact_type: ContactType,
        email: String,
        phone: String,
        address: String,
        role: Role,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            contact_type,
            email: email.trim().to_lowercase(),
            phone: phone.trim().to_string(),
            address: address.trim().to_string(),
            role,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateContact {
    pub name: String,
    pub contact_type: ContactType,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: Role,
}

impl UpdateContact {
    #[must_use]
    pub fn new(
        name: String,
        contact_type: ContactType,
        email: String,
        phone: String,
        address: String,
        role: Role,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            contact_type,
            email: email.trim().to_lowercase(),
            phone: phone.trim().to_string(),
            address: address.trim().to_string(),
            role,
        }
    }
}
