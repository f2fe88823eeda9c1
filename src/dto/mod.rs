//! DTOs that bridge the service layer with the REST API.

pub mod contact;
