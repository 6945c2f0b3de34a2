#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    error::{ErrorKind, ErrorResponse},
    models::business_date::{
        BusinessDateQuery, BusinessDateResponse, CalendarResponse, HolidayListResponse,
        PingResponse,
    },
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(business_date_doc, ping_doc, holidays_doc, calendar_doc),
    components(schemas(
        BusinessDateResponse,
        PingResponse,
        HolidayListResponse,
        CalendarResponse,
        ErrorResponse,
        ErrorKind
    )),
    tags(
        (name = "BusinessDate", description = "Business-calendar date arithmetic"),
        (name = "System", description = "Liveness and configuration")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/api/business-date",
    params(BusinessDateQuery),
    responses(
        (status = 200, description = "Resulting business instant in UTC", body = BusinessDateResponse),
        (status = 400, description = "Invalid or missing parameters", body = ErrorResponse),
        (status = 503, description = "Internal or upstream failure", body = ErrorResponse)
    ),
    tag = "BusinessDate"
)]
fn business_date_doc() {}

#[utoipa::path(
    get,
    path = "/api/ping",
    responses((status = 200, description = "Liveness probe", body = PingResponse)),
    tag = "System"
)]
fn ping_doc() {}

#[utoipa::path(
    get,
    path = "/api/holidays",
    responses((status = 200, description = "Holidays currently in effect", body = HolidayListResponse)),
    tag = "BusinessDate"
)]
fn holidays_doc() {}

#[utoipa::path(
    get,
    path = "/api/config/calendar",
    responses((status = 200, description = "Active working calendar", body = CalendarResponse)),
    tag = "System"
)]
fn calendar_doc() {}
