use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post},
};
use enroll_adapters::{
    config::AllowedOrigins,
    http::routes::{
        check_user, db_status, login, ping, send_otp, set_password, test_email, verify_otp,
    },
};
use enroll_core::{EmailClient, IdentityStore, PasswordHasher, TokenSigner};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The registration/login service: wires the injected collaborators
/// into the HTTP surface.
pub struct EnrollService {
    router: Router,
}

impl EnrollService {
    /// Assemble the router from the four collaborators, constructed once
    /// at process start and shared by handle.
    ///
    /// # Note on Architecture
    /// Stores and clients implement Clone via internal Arc for
    /// thread-safe sharing. Each route is given only the state it needs.
    pub fn new<S, E, H, G>(
        identity_store: S,
        email_client: E,
        password_hasher: H,
        token_signer: G,
    ) -> Self
    where
        S: IdentityStore + Clone + 'static,
        E: EmailClient + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
        G: TokenSigner + Clone + 'static,
    {
        let router = Router::new()
            // Liveness, diagnostics and the check-user gate share the store
            .route("/ping", get(ping))
            .route("/db-status", get(db_status::<S>))
            .route("/check-user", post(check_user::<S>))
            .with_state(identity_store.clone())
            // Send OTP needs the store and the notifier
            .route("/send-otp", post(send_otp::<S, E>))
            .with_state((identity_store.clone(), email_client.clone()))
            // Verify OTP only reads the store
            .route("/verify-otp", post(verify_otp::<S>))
            .with_state(identity_store.clone())
            // Provider self-check only needs the notifier
            .route("/test-email", get(test_email::<E>))
            .with_state(email_client)
            // Set password needs the store and the hasher
            .route("/set-password", post(set_password::<S, H>))
            .with_state((identity_store.clone(), password_hasher.clone()))
            // Login needs the store, the hasher and the signer
            .route("/login", post(login::<S, H, G>))
            .with_state((identity_store, password_hasher, token_signer));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Finish the router, optionally restricting cross-origin callers.
    pub fn into_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the service on the given listener until shutdown.
    pub async fn run(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.into_router(allowed_origins);

        tracing::info!("Enroll service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
