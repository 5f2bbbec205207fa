pub mod clicks;
pub mod friends;
pub mod health;
pub mod metrics;
pub mod swagger;
pub mod upgrades;

use actix_web::{error::InternalError, web, HttpResponse};

/// Rotas da API. O `web::Data<dyn UserStore>` é registrado por quem monta o App.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Corpo JSON inválido responde no mesmo formato {message} dos demais erros
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(serde_json::json!({ "message": message })),
        )
        .into()
    });

    cfg.app_data(json_config)
        .route("/health", web::get().to(health::health_check))
        .route("/metrics", web::get().to(metrics::get_metrics))
        .service(
            web::scope("/api")
                .route("/clicks", web::get().to(clicks::get_clicks))
                .route("/clicks", web::post().to(clicks::set_clicks))
                .route("/upgrades", web::get().to(upgrades::list_upgrades))
                .route("/upgrades", web::post().to(upgrades::add_upgrade))
                .route("/friends", web::get().to(friends::list_friends))
                .route("/friends/add", web::post().to(friends::add_friend)),
        );
}
