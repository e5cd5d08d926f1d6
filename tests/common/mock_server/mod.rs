mod routes;

use actix_web::{web, App, HttpServer};
use moov_rust::apis::auth::Credentials;
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};
use tokio::sync::oneshot;
use url::Url;

#[derive(Clone)]
struct MockServerConfiguration {
    public_key: String,
    secret_key: String,
    account_id: String,
    domain: String,
}

#[derive(Clone, Default)]
struct MockServerStorageInner {
    /// Access token -> scope it was issued for
    tokens: HashMap<String, String>,
    /// Scopes of all the token requests received, in order
    token_requests: Vec<String>,
    /// `METHOD /path` of all the authenticated requests received, in order
    api_requests: Vec<String>,
    capabilities: HashMap<String, Vec<Value>>,
    transfers: HashMap<String, Value>,
    /// Idempotency key -> (request body, transfer id)
    idempotency_keys: HashMap<String, (Value, String)>,
}

/// In-memory storage for resources created on the mock server.
type MockServerStorage = Arc<RwLock<MockServerStorageInner>>;

/// Simple mock server for Moov APIs used in local integration tests.
pub struct MoovMockServer {
    url: Url,
    shutdown: Option<oneshot::Sender<()>>,
    storage: MockServerStorage,
}

impl MoovMockServer {
    pub async fn start(credentials: &Credentials) -> Self {
        let configuration = MockServerConfiguration {
            public_key: credentials.public_key.clone(),
            secret_key: credentials.secret_key.expose_secret().to_string(),
            account_id: credentials.account_id.clone(),
            domain: credentials.domain.clone(),
        };

        // The facilitator account starts with a single enabled capability
        let storage = MockServerStorage::default();
        storage.write().unwrap().capabilities.insert(
            configuration.account_id.clone(),
            vec![stub_capability(&configuration.account_id)],
        );
        let storage_clone = storage.clone();

        // Setup the mock HTTP server and bind it to a random port
        let http_server_factory = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(configuration.clone()))
                .app_data(web::Data::new(storage.clone()))
                .service(web::resource("/oauth2/token").route(web::post().to(routes::post_token)))
                .service(
                    web::resource("/accounts/{id}/capabilities")
                        .route(web::get().to(routes::list_capabilities))
                        .route(web::post().to(routes::request_capabilities)),
                )
                .service(
                    web::resource("/accounts/{id}/capabilities/{capability}")
                        .route(web::get().to(routes::get_capability))
                        .route(web::delete().to(routes::disable_capability)),
                )
                .service(web::resource("/transfers").route(web::post().to(routes::create_transfer)))
                .service(
                    web::resource("/transfers/{id}").route(web::get().to(routes::get_transfer)),
                )
        })
        .workers(1)
        .bind("127.0.0.1:0")
        .unwrap();

        // Retrieve the address and port the server was bound to
        let addr = http_server_factory.addrs().first().cloned().unwrap();

        // Prepare a oneshot channel to kill the HTTP server when this struct is dropped
        let (shutdown_sender, shutdown_recv) = oneshot::channel();

        // Start the server in another task
        let http_server = http_server_factory.run();
        tokio::spawn(async move {
            tokio::select! {
                _ = http_server => panic!("HTTP server crashed"),
                _ = shutdown_recv => { /* Intentional shutdown */ }
            }
        });

        Self {
            url: Url::parse(&format!("http://{}", addr)).unwrap(),
            shutdown: Some(shutdown_sender),
            storage: storage_clone,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn token_requests(&self) -> Vec<String> {
        self.storage.read().unwrap().token_requests.clone()
    }

    pub fn api_requests(&self) -> Vec<String> {
        self.storage.read().unwrap().api_requests.clone()
    }

    pub fn capabilities(&self, account_id: &str) -> Value {
        Value::Array(
            self.storage
                .read()
                .unwrap()
                .capabilities
                .get(account_id)
                .cloned()
                .unwrap_or_default(),
        )
    }
}

impl Drop for MoovMockServer {
    fn drop(&mut self) {
        // Send a shutdown signal to the actix server on drop
        let _ = self.shutdown.take().unwrap().send(());
    }
}

fn stub_capability(account_id: &str) -> Value {
    json!({
        "capability": "transfers",
        "accountID": account_id,
        "status": "enabled",
        "requirements": {
            "currentlyDue": [],
            "errors": []
        },
        "createdOn": "2022-01-01T00:00:00Z",
        "updatedOn": "2022-01-01T00:00:00Z"
    })
}
