//! Static dashboard assets, compiled into the binary.

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, get};

const INDEX_HTML: &str = include_str!("../../../static/index.html");
const SCRIPT_JS: &str = include_str!("../../../static/script.js");

/// Dashboard page.
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .body(INDEX_HTML)
}

/// Dashboard script.
#[get("/script.js")]
pub async fn script() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .body(SCRIPT_JS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test::{self}};
    use rstest::rstest;

    #[rstest]
    #[case("/", "text/html")]
    #[case("/script.js", "application/javascript")]
    #[actix_web::test]
    async fn serves_assets(#[case] uri: &str, #[case] content_type: &str) {
        let app = test::init_service(App::new().service(index).service(script)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        let header = res
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        assert!(header.starts_with(content_type), "unexpected {header}");
        let body = test::read_body(res).await;
        assert!(!body.is_empty());
    }

    #[rstest]
    fn page_loads_its_script() {
        assert!(INDEX_HTML.contains("src=\"/script.js\""));
        assert!(SCRIPT_JS.contains("/api/list"));
    }
}
