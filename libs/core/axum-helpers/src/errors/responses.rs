//! Reusable OpenAPI response types for the failure envelope.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Required fields missing: property_type, size",
        "error": "VALIDATION_ERROR",
        "code": 1001
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Resource not found",
        "error": "NOT_FOUND",
        "code": 1004
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "An internal server error occurred",
        "error": "INTERNAL_ERROR",
        "code": 1005
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);
