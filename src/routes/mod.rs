use crate::types::error::AppError;
use crate::utils::webutils::validate_admin_token;
use actix_web::web;
use tracing::debug;

pub mod chat;
pub mod health;
pub mod team;
pub mod user;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let admin_auth = actix_web_httpauth::middleware::HttpAuthentication::bearer(validate_admin_token);

    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        debug!("rejected json body: {err}");
        AppError::BadRequest("Invalid JSON".into()).into()
    }));

    cfg.service(
        web::scope("/health").service(health::health)
    );
    cfg.service(
        web::scope("/user")
            .service(
                web::scope("/create")
                    .service(user::create::create)
                    .wrap(admin_auth)
            )
            .service(user::me::me)
            .service(user::regenerate::regenerate)
    );
    cfg.service(
        web::scope("/teams")
            .service(team::list::list_teams)
            .service(team::create::create_team)
            .service(team::accept_invite::accept_invite)
            .service(team::decline_invite::decline_invite)
            .service(team::detail::team_detail)
            .service(team::edit::edit_team)
            .service(team::delete::delete_team)
            .service(team::join::join_team)
            .service(team::leave::leave_team)
    );
    cfg.service(
        web::scope("/chat")
            .service(chat::rooms::chat_rooms)
            .service(chat::send::send_message)
            .service(chat::messages::get_messages)
    );
}
