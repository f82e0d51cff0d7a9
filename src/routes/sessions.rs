use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    CreateSessionRequest, ErrorResponse, FieldInputRequest, FilterCriteria, FormField,
    FormFieldsResponse, FormStateResponse, SessionCreatedResponse,
};
use crate::services::{resolve_capability, Capability, FormSession};
use crate::routes::AppState;
use std::sync::Arc;

/// Configure form-session routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/sessions", web::post().to(create_session))
        .route("/sessions/{id}", web::get().to(get_session))
        .route("/sessions/{id}", web::delete().to(delete_session))
        .route("/sessions/{id}/address", web::put().to(input_address))
        .route("/sessions/{id}/name", web::put().to(input_name))
        .route("/sessions/{id}/selection", web::put().to(set_selection))
        .route("/forms/restaurant", web::get().to(restaurant_form_fields));
}

fn session_not_found(session_id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "Session not found".to_string(),
        message: format!("No form session with id {}", session_id),
        status_code: 404,
    })
}

fn form_state(session_id: String, session: &Arc<FormSession>) -> FormStateResponse {
    FormStateResponse {
        session_id,
        address: session.address.state(),
        address_text: session.address.text(),
        name: session.name.state(),
        name_text: session.name.text(),
        selection: session.selection(),
    }
}

/// Open a form session
///
/// POST /api/v1/sessions
///
/// Request body:
/// ```json
/// { "editingRestaurantId": "r3" }
/// ```
async fn create_session(
    state: web::Data<AppState>,
    req: web::Json<CreateSessionRequest>,
) -> impl Responder {
    let (session_id, session) = state
        .sessions
        .create(req.editing_restaurant_id.clone())
        .await;

    HttpResponse::Created().json(SessionCreatedResponse {
        session_id,
        created_at: session.created_at,
    })
}

/// Fetch a form session's current state
///
/// GET /api/v1/sessions/{id}
async fn get_session(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();

    match state.sessions.get(&session_id).await {
        Some(session) => HttpResponse::Ok().json(form_state(session_id, &session)),
        None => session_not_found(&session_id),
    }
}

/// Close a form session
///
/// DELETE /api/v1/sessions/{id}
async fn delete_session(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();

    if state.sessions.get(&session_id).await.is_none() {
        return session_not_found(&session_id);
    }

    state.sessions.remove(&session_id).await;
    HttpResponse::NoContent().finish()
}

/// Keystroke input into the address field
///
/// PUT /api/v1/sessions/{id}/address
///
/// The response reflects the immediately-observable state; resolution fires
/// after the quiet period and is visible on the next GET.
async fn input_address(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<FieldInputRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let session_id = path.into_inner();

    match state.sessions.get(&session_id).await {
        Some(session) => {
            session.address.input(&req.text);
            HttpResponse::Accepted().json(form_state(session_id, &session))
        }
        None => session_not_found(&session_id),
    }
}

/// Keystroke input into the name field
///
/// PUT /api/v1/sessions/{id}/name
async fn input_name(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<FieldInputRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let session_id = path.into_inner();

    match state.sessions.get(&session_id).await {
        Some(session) => {
            session.name.input(&req.text);
            HttpResponse::Accepted().json(form_state(session_id, &session))
        }
        None => session_not_found(&session_id),
    }
}

/// Store the search selection shared by the page's sibling components
///
/// PUT /api/v1/sessions/{id}/selection
async fn set_selection(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<FilterCriteria>,
) -> impl Responder {
    let session_id = path.into_inner();

    match state.sessions.get(&session_id).await {
        Some(session) => {
            session.set_selection(req.into_inner());
            HttpResponse::Ok().json(form_state(session_id, &session))
        }
        None => session_not_found(&session_id),
    }
}

/// Capability-gated restaurant form fields
///
/// GET /api/v1/forms/restaurant
///
/// Without a bearer token the member field set is returned; a valid admin
/// token adds the admin-only fields; a malformed token is rejected.
async fn restaurant_form_fields(
    state: web::Data<AppState>,
    http_req: HttpRequest,
) -> impl Responder {
    let capability = match bearer_token(&http_req) {
        Some(token) => match resolve_capability(token, &state.jwt_secret) {
            Ok(capability) => capability,
            Err(e) => {
                tracing::info!("Rejected form-fields token: {}", e);
                return HttpResponse::Unauthorized().json(ErrorResponse {
                    error: "Invalid token".to_string(),
                    message: e.to_string(),
                    status_code: 401,
                });
            }
        },
        None => Capability::Member,
    };

    HttpResponse::Ok().json(FormFieldsResponse {
        capability,
        fields: restaurant_fields(capability),
    })
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn restaurant_fields(capability: Capability) -> Vec<FormField> {
    let mut fields: Vec<FormField> = [
        "name",
        "address",
        "cuisine",
        "dietary",
        "district",
        "priceLevel",
        "description",
        "imageFileIds",
    ]
    .iter()
    .map(|name| FormField {
        name: name.to_string(),
        admin_only: false,
    })
    .collect();

    if capability == Capability::Admin {
        fields.extend(["featured", "personaScores"].iter().map(|name| FormField {
            name: name.to_string(),
            admin_only: true,
        }));
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_fields_have_no_admin_entries() {
        let fields = restaurant_fields(Capability::Member);
        assert!(fields.iter().all(|f| !f.admin_only));
        assert!(fields.iter().any(|f| f.name == "name"));
    }

    #[test]
    fn test_admin_fields_extend_member_fields() {
        let member = restaurant_fields(Capability::Member);
        let admin = restaurant_fields(Capability::Admin);

        assert_eq!(admin.len(), member.len() + 2);
        assert!(admin.iter().any(|f| f.name == "personaScores" && f.admin_only));
    }
}
