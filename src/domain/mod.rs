//! Domain aggregates exposed by the contact service layer.

pub mod contact;
