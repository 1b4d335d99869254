//! Posting the final result to the callback URL.

use actix_web::http::StatusCode;
use log::{info, warn};

use crate::config::network::{CALLBACK_URL_ENV, callback_url};
use crate::server::game_session::result::GameResult;

#[derive(Debug, thiserror::Error)]
pub enum CallbackError {
    #[error("request failed: {0}")]
    Send(String),
}

/// POST `result` as JSON to `url`.
pub async fn post_result(url: &str, result: &GameResult) -> Result<StatusCode, CallbackError> {
    let response = awc::Client::default()
        .post(url)
        .send_json(result)
        .await
        .map_err(|err| CallbackError::Send(err.to_string()))?;
    Ok(response.status())
}

/// Report the result to the configured callback, if any. Failures are only logged.
pub async fn report_result(result: &GameResult) {
    let Some(url) = callback_url() else {
        warn!("[Callback] {} is not set; result not reported", CALLBACK_URL_ENV);
        return;
    };
    info!("[Callback] {}={}", CALLBACK_URL_ENV, url);
    match post_result(&url, result).await {
        Ok(status) => info!("[Callback] Result reported to {} ({})", url, status),
        Err(err) => warn!("[Callback] Failed to report result to {}: {}", url, err),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use actix_web::{App, HttpResponse, HttpServer, web};

    use super::*;
    use crate::game::engine::Scores;

    async fn capture(body: web::Json<serde_json::Value>, received: web::Data<Mutex<Vec<serde_json::Value>>>) -> HttpResponse {
        received.lock().unwrap().push(body.into_inner());
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn posts_result_as_json() {
        let received = web::Data::new(Mutex::new(Vec::<serde_json::Value>::new()));
        let app_data = received.clone();
        let server = HttpServer::new(move || App::new().app_data(app_data.clone()).route("/", web::post().to(capture)))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .unwrap();
        let port = server.addrs()[0].port();
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        let result = GameResult::from_scores("a:1", "b:2", Scores { a: 0, b: 2 });
        let status = post_result(&format!("http://127.0.0.1:{port}/"), &result).await.unwrap();

        assert!(status.is_success());
        assert_eq!(
            received.lock().unwrap().as_slice(),
            &[serde_json::json!({"result": "win", "win": "b:2", "state": "A: 0,B: 2"})]
        );
        handle.stop(false).await;
    }
}
