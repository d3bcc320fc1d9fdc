use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;

use ss_core::services::otp::{
    FixedWindowIssuance, IssuancePolicy, OtpIssuer, OtpServiceConfig, OtpVerifier,
    UnlimitedIssuance,
};
use ss_core::services::session::SessionTokenService;
use ss_infra::database::{create_pool, MySqlOtpStore, MySqlProfileRepository};
use ss_infra::sms::TwilioSmsGateway;

use ss_api::app::{configure_routes, AppState};
use ss_api::config::ApiConfig;
use ss_api::middleware::cors::create_cors;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting SoulSignal API server");

    let config = ApiConfig::from_env()?;
    let bind_address = config.server.bind_address();

    // Wire up infrastructure
    let pool = create_pool(&config.database).await?;
    let otp_store = Arc::new(MySqlOtpStore::new(pool.clone()));
    let profiles = Arc::new(MySqlProfileRepository::new(pool));
    let sms_gateway = Arc::new(
        TwilioSmsGateway::new(config.twilio.clone())
            .map_err(|e| anyhow::anyhow!("Twilio gateway: {}", e))?,
    );

    // Issuance policy: fixed window when a limit is configured, otherwise
    // unlimited
    let policy: Arc<dyn IssuancePolicy> = match config.otp.max_issuances_per_hour {
        Some(max) => {
            info!("Issuance limited to {} codes per phone per hour", max);
            Arc::new(FixedWindowIssuance::per_hour(max))
        }
        None => Arc::new(UnlimitedIssuance),
    };

    // Wire up domain services
    let issuer = Arc::new(OtpIssuer::new(
        otp_store.clone(),
        sms_gateway,
        policy,
        OtpServiceConfig::from(&config.otp),
    ));
    let sessions = Arc::new(SessionTokenService::new(config.session.clone()));
    let verifier = Arc::new(OtpVerifier::new(otp_store, profiles, sessions));

    let state = web::Data::new(AppState {
        issuer,
        verifier,
    });
    let cors_config = config.cors.clone();

    info!("Server binding to {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors(&cors_config))
            .app_data(state.clone())
            .configure(configure_routes::<MySqlOtpStore, TwilioSmsGateway, MySqlProfileRepository>)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
