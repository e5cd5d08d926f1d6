use crate::common::mock_server::{MockServerConfiguration, MockServerStorage};
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

#[derive(Deserialize)]
pub(super) struct TokenRequest {
    grant_type: String,
    client_id: String,
    client_secret: String,
    scope: String,
}

#[derive(Deserialize)]
pub(super) struct RequestCapabilitiesRequest {
    capabilities: Vec<String>,
}

/// Checks the headers every API call must carry and records the request.
///
/// Returns the response to send back if the request must be rejected.
fn authorize(
    req: &HttpRequest,
    configuration: &MockServerConfiguration,
    storage: &MockServerStorage,
    scope: &str,
    account_scoped: bool,
) -> Option<HttpResponse> {
    let header_value = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let mut storage = storage.write().unwrap();
    storage
        .api_requests
        .push(format!("{} {}", req.method(), req.path()));

    if !header_value(header::USER_AGENT.as_str())
        .map_or(false, |ua| ua.starts_with("moov-rust/"))
    {
        return Some(HttpResponse::BadRequest().json(json!({ "error": "invalid user agent" })));
    }
    if header_value("origin").as_deref() != Some(configuration.domain.as_str())
        || header_value("referer").as_deref() != Some(configuration.domain.as_str())
    {
        return Some(HttpResponse::Forbidden().json(json!({ "error": "invalid origin" })));
    }
    if account_scoped
        && header_value("x-account-id").as_deref() != Some(configuration.account_id.as_str())
    {
        return Some(HttpResponse::Forbidden().json(json!({ "error": "invalid x-account-id" })));
    }

    let token = header_value(header::AUTHORIZATION.as_str())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(str::to_string));
    match token.and_then(|token| storage.tokens.get(&token).cloned()) {
        Some(token_scope) if token_scope == scope => None,
        Some(_) => Some(HttpResponse::Forbidden().json(json!({ "error": "insufficient scope" }))),
        None => Some(HttpResponse::Unauthorized().finish()),
    }
}

/// POST /oauth2/token
pub(super) async fn post_token(
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
    incoming: web::Json<TokenRequest>,
) -> HttpResponse {
    let incoming = incoming.into_inner();
    let mut storage = storage.write().unwrap();
    storage.token_requests.push(incoming.scope.clone());

    if incoming.grant_type != "client_credentials"
        || incoming.client_id != configuration.public_key
        || incoming.client_secret != configuration.secret_key
    {
        return HttpResponse::Unauthorized().json(json!({
            "error": "invalid_client"
        }));
    }

    let access_token = Uuid::new_v4().to_string();
    storage.tokens.insert(access_token.clone(), incoming.scope);

    HttpResponse::Ok().json(json!({
        "token_type": "Bearer",
        "access_token": access_token,
        "expires_in": 3600
    }))
}

/// GET /accounts/{id}/capabilities
pub(super) async fn list_capabilities(
    req: HttpRequest,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
    path: web::Path<String>,
) -> HttpResponse {
    let account_id = path.into_inner();
    let scope = format!("/accounts/{}/capabilities.read", account_id);
    if let Some(res) = authorize(&req, &configuration, &storage, &scope, true) {
        return res;
    }

    let capabilities = storage
        .read()
        .unwrap()
        .capabilities
        .get(&account_id)
        .cloned()
        .unwrap_or_default();

    HttpResponse::Ok().json(capabilities)
}

/// POST /accounts/{id}/capabilities
pub(super) async fn request_capabilities(
    req: HttpRequest,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
    path: web::Path<String>,
    incoming: web::Json<RequestCapabilitiesRequest>,
) -> HttpResponse {
    let account_id = path.into_inner();
    let scope = format!("/accounts/{}/capabilities.write", account_id);
    if let Some(res) = authorize(&req, &configuration, &storage, &scope, true) {
        return res;
    }

    let mut storage = storage.write().unwrap();
    let capabilities = storage.capabilities.entry(account_id.clone()).or_default();
    for requested in incoming.into_inner().capabilities {
        if !capabilities.iter().any(|c| c["capability"] == requested) {
            capabilities.push(json!({
                "capability": requested,
                "accountID": account_id,
                "status": "pending",
                "requirements": {
                    "currentlyDue": ["account.tos-acceptance"],
                    "errors": []
                },
                "createdOn": Utc::now(),
                "updatedOn": Utc::now()
            }));
        }
    }

    HttpResponse::Ok().json(capabilities.clone())
}

/// GET /accounts/{id}/capabilities/{capability}
pub(super) async fn get_capability(
    req: HttpRequest,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (account_id, capability) = path.into_inner();
    let scope = format!("/accounts/{}/capabilities.read", account_id);
    if let Some(res) = authorize(&req, &configuration, &storage, &scope, true) {
        return res;
    }

    storage
        .read()
        .unwrap()
        .capabilities
        .get(&account_id)
        .and_then(|capabilities| {
            capabilities
                .iter()
                .find(|c| c["capability"] == capability.as_str())
        })
        .map_or_else(
            || HttpResponse::NotFound().json(json!({ "error": "capability not found" })),
            |c| HttpResponse::Ok().json(c),
        )
}

/// DELETE /accounts/{id}/capabilities/{capability}
pub(super) async fn disable_capability(
    req: HttpRequest,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (account_id, capability) = path.into_inner();
    let scope = format!("/accounts/{}/capabilities.write", account_id);
    if let Some(res) = authorize(&req, &configuration, &storage, &scope, true) {
        return res;
    }

    let mut storage = storage.write().unwrap();
    let found = storage
        .capabilities
        .get_mut(&account_id)
        .and_then(|capabilities| {
            capabilities
                .iter_mut()
                .find(|c| c["capability"] == capability.as_str())
        });

    match found {
        Some(c) => {
            c["status"] = json!("disabled");
            c["disabledOn"] = json!(Utc::now());
            HttpResponse::NoContent().finish()
        }
        None => HttpResponse::NotFound().json(json!({ "error": "capability not found" })),
    }
}

/// POST /transfers
pub(super) async fn create_transfer(
    req: HttpRequest,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
    incoming: web::Json<Value>,
) -> HttpResponse {
    let scope = format!("/accounts/{}/transfers.write", configuration.account_id);
    if let Some(res) = authorize(&req, &configuration, &storage, &scope, false) {
        return res;
    }

    let idempotency_key = match req
        .headers()
        .get("x-idempotency-key")
        .and_then(|v| v.to_str().ok())
    {
        Some(key) => key.to_string(),
        None => {
            return HttpResponse::BadRequest().json(json!({ "error": "missing idempotency key" }))
        }
    };
    let incoming = incoming.into_inner();

    let mut storage = storage.write().unwrap();

    // Replay the original response if the same request is retried
    if let Some((body, transfer_id)) = storage.idempotency_keys.get(&idempotency_key) {
        return if body == &incoming {
            HttpResponse::Ok().json(json!({
                "transferID": transfer_id,
                "createdOn": storage.transfers[transfer_id]["createdOn"]
            }))
        } else {
            HttpResponse::Conflict().json(json!({
                "error": "idempotency key already used for a different request"
            }))
        };
    }

    let transfer_id = Uuid::new_v4().to_string();
    let created_on = Utc::now();
    storage.transfers.insert(
        transfer_id.clone(),
        json!({
            "transferID": transfer_id,
            "createdOn": created_on,
            "status": "created",
            "amount": incoming["amount"],
            "description": incoming["description"],
            "metadata": incoming.get("metadata").cloned().unwrap_or_else(|| json!({}))
        }),
    );
    storage
        .idempotency_keys
        .insert(idempotency_key, (incoming, transfer_id.clone()));

    HttpResponse::Ok().json(json!({
        "transferID": transfer_id,
        "createdOn": created_on
    }))
}

/// GET /transfers/{id}
pub(super) async fn get_transfer(
    req: HttpRequest,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
    path: web::Path<String>,
) -> HttpResponse {
    let scope = format!("/accounts/{}/transfers.read", configuration.account_id);
    if let Some(res) = authorize(&req, &configuration, &storage, &scope, false) {
        return res;
    }

    let id = path.into_inner();
    storage.read().unwrap().transfers.get(&id).map_or_else(
        || HttpResponse::NotFound().json(json!({ "message": "not found" })),
        |transfer| HttpResponse::Ok().json(transfer),
    )
}
