use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, post, put, web};
use serde::Deserialize;

use crate::dto::contact::ContactDto;
use crate::repository::{DEFAULT_ITEMS_PER_PAGE, DieselRepository};
use crate::routes::error_response;
use crate::services::contact as contact_service;

#[derive(Debug, Deserialize)]
pub struct ListContactsParams {
    #[serde(default = "default_page")]
    page: usize,
    #[serde(default = "default_page_size")]
    size: usize,
    search: Option<String>,
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

#[get("")]
pub async fn list_contacts(
    params: web::Query<ListContactsParams>,
    repo: web::Data<DieselRepository>,
    req: HttpRequest,
) -> impl Responder {
    let params = params.into_inner();
    match contact_service::list_contacts(repo.get_ref(), params.page, params.size, params.search) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(&err, req.path()),
    }
}

#[get("/export")]
pub async fn export_contacts(
    repo: web::Data<DieselRepository>,
    req: HttpRequest,
) -> impl Responder {
    match contact_service::export_contacts(repo.get_ref()) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header(("Content-Disposition", "attachment; filename=\"contacts.csv\""))
            .body(csv),
        Err(err) => error_response(&err, req.path()),
    }
}

#[get("/{id}")]
pub async fn get_contact(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    req: HttpRequest,
) -> impl Responder {
    match contact_service::get_contact_by_id(repo.get_ref(), id.into_inner()) {
        Ok(Some(contact)) => HttpResponse::Ok().json(contact),
        Ok(None) => HttpResponse::NotFound().finish(),
        Err(err) => error_response(&err, req.path()),
    }
}

#[post("")]
pub async fn create_contact(
    contact: web::Json<ContactDto>,
    repo: web::Data<DieselRepository>,
    req: HttpRequest,
) -> impl Responder {
    match contact_service::create_contact(repo.get_ref(), contact.into_inner()) {
        Ok(created) => HttpResponse::Created().json(created),
        Err(err) => error_response(&err, req.path()),
    }
}

#[put("/{id}")]
pub async fn update_contact(
    id: web::Path<i32>,
    contact: web::Json<ContactDto>,
    repo: web::Data<DieselRepository>,
    req: HttpRequest,
) -> impl Responder {
    match contact_service::update_contact(repo.get_ref(), id.into_inner(), contact.into_inner()) {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(err) => error_response(&err, req.path()),
    }
}

#[delete("/{id}")]
pub async fn delete_contact(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    req: HttpRequest,
) -> impl Responder {
    match contact_service::delete_contact(repo.get_ref(), id.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err, req.path()),
    }
}
