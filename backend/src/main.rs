//! Backend entry-point: wires stores, services, middleware, and routes.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::domain::booking_service::BookingService;
use backend::domain::catalogue_service::CatalogueService;
use backend::domain::identity_service::AccountService;
use backend::domain::policy::PolicyTable;
use backend::domain::ports::UserRepository;
use backend::domain::TokenService;
use backend::example_data;
use backend::inbound::http::authn::{Authenticate, AuthnState};
use backend::inbound::http::authz::Authorize;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{bookings, health, hotels, users};
use backend::outbound::persistence::{
    InMemoryBookingRepository, InMemoryHotelRepository, InMemoryUserRepository,
};
use backend::server::AppConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    // Missing signing key or lifetime is a fatal startup condition.
    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    info!(
        key_fingerprint = %config.key_fingerprint(),
        lifetime_secs = config.token_lifetime.num_seconds(),
        "signing configuration loaded"
    );

    let user_repo = Arc::new(InMemoryUserRepository::new());
    let hotel_repo = Arc::new(InMemoryHotelRepository::new());
    let booking_repo = Arc::new(InMemoryBookingRepository::new());
    example_data::seed_if_empty(user_repo.as_ref(), hotel_repo.as_ref())
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let tokens = Arc::new(TokenService::new(
        &config.signing_key,
        config.token_lifetime,
    ));
    let accounts = Arc::new(AccountService::new(
        Arc::clone(&user_repo),
        Arc::clone(&tokens),
    ));
    let reservations = Arc::new(BookingService::new(
        Arc::clone(&booking_repo),
        Arc::clone(&hotel_repo),
        Arc::clone(&user_repo),
    ));
    let state = HttpState {
        identity: accounts.clone(),
        users: accounts,
        bookings: reservations.clone(),
        bookings_query: reservations,
        catalogue: Arc::new(CatalogueService::new(Arc::clone(&hotel_repo))),
    };
    let authn = AuthnState::new(tokens, user_repo as Arc<dyn UserRepository>);

    let bind_addr = config.bind_addr;
    info!(%bind_addr, "starting server");
    HttpServer::new(move || {
        // Wrap order matters: the last-registered middleware is outermost,
        // so authentication runs before the policy gate.
        let api = web::scope("/api")
            .app_data(web::Data::new(state.clone()))
            .service(users::signup)
            .service(users::signin)
            .service(users::list_users)
            .service(hotels::list_hotels)
            .service(hotels::hotel_details)
            .service(bookings::create_booking)
            .service(bookings::my_bookings)
            .service(bookings::all_bookings)
            .service(bookings::update_booking)
            .service(bookings::cancel_booking)
            .wrap(Authorize::new(PolicyTable::standard()))
            .wrap(Authenticate::new(authn.clone()));

        let app = App::new().service(api).service(health::healthz);

        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}")
                .url("/api-docs/openapi.json", backend::ApiDoc::openapi()),
        );

        app
    })
    .bind(bind_addr)?
    .run()
    .await
}
