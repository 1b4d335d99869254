//! HTTP routing configuration.
//!
//! Read-only endpoints exposing the running game:
//! - `GET /status`: latest round summary
//! - `GET /result`: final result, `404` until the game is settled

use actix_web::{Error, HttpResponse, error, http::StatusCode, web};

use crate::server::game_session::messages::{GetResult, GetStatus};
use crate::server::http_error::http_error_response;
use crate::server::state::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/status").route(web::get().to(status)))
        .service(web::resource("/result").route(web::get().to(result)));
}

async fn status(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    let status = data.status_board.send(GetStatus).await.map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(status))
}

async fn result(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    match data.status_board.send(GetResult).await.map_err(error::ErrorInternalServerError)? {
        Some(result) => Ok(HttpResponse::Ok().json(result)),
        None => {
            let status = data.status_board.send(GetStatus).await.map_err(error::ErrorInternalServerError)?;
            Ok(http_error_response(
                "RESULT_PENDING",
                "The game is not finished yet.",
                Some(&status.game_id.to_string()),
                StatusCode::NOT_FOUND,
            ))
        }
    }
}
