use crate::server::api;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

fn json_ok(body: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "application/json",
        body,
    }
}

pub fn route_request(method: &str, path: &str, body: &str) -> HttpResponse {
    match (method, path) {
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => json_ok(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/cards") => match api::cards_payload() {
            Ok(payload) => json_ok(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/enemies") => match api::enemies_payload() {
            Ok(payload) => json_ok(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/data/version") => match api::data_version_payload() {
            Ok(payload) => json_ok(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("POST", "/api/turn") => match api::turn_payload(body) {
            Ok(payload) => json_ok(payload),
            Err(api::TurnPayloadError::Parse(err)) => {
                error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
            }
            Err(api::TurnPayloadError::Rejected(reason)) => {
                error_response(400, "Bad Request", &reason)
            }
        },
        _ => error_response(404, "Not Found", "Unknown route"),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    let body = serde_json::json!({
        "status": "error",
        "message": message,
    });
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: body.to_string(),
    }
}
