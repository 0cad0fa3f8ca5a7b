use std::path::PathBuf;

use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use anyhow::{Context, Result};

use home_loan_lib::loan::{HomeLoan, LoanTerms};

mod charts;
mod page;

#[derive(Clone)]
struct ServerConfig {
    static_dir: PathBuf,
}

#[get("/")]
async fn loan_form() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page::render(None))
}

#[post("/")]
async fn calculate(
    form: web::Form<LoanTerms>,
    config: web::Data<ServerConfig>,
) -> Result<HttpResponse, actix_web::Error> {
    let loan = match HomeLoan::new(form.into_inner()) {
        Ok(loan) => loan,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().body(format!("Invalid loan terms: {:#}", e)));
        }
    };

    let chart_paths = match charts::render_charts(&loan, &config.static_dir) {
        Ok(paths) => paths,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().body(format!("Failed to render charts: {:#}", e))
            );
        }
    };

    let results = page::Results {
        total_monthly_payment: loan.total_monthly_payment(),
        balance_chart: chart_paths.balance,
        yearly_chart: chart_paths.yearly,
    };
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page::render(Some(&results))))
}

#[actix_web::main]
pub async fn run_server(port: u16, static_dir: PathBuf) -> Result<()> {
    std::fs::create_dir_all(&static_dir)
        .context(format!("Failed to create static dir {:?}", static_dir))?;

    let config = ServerConfig { static_dir };
    HttpServer::new(move || {
        let config = config.clone();
        App::new()
            .service(actix_files::Files::new("/static", config.static_dir.clone()))
            .data(config)
            .service(loan_form)
            .service(calculate)
    })
    .bind(format!("0.0.0.0:{}", port))?
    .run()
    .await?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, init_service, read_body, TestRequest};

    async fn post_form(static_dir: PathBuf, payload: &'static str) -> ServiceResponse {
        let config = ServerConfig { static_dir };
        let mut app = init_service(
            App::new()
                .data(config)
                .service(loan_form)
                .service(calculate),
        )
        .await;

        let req = TestRequest::post()
            .uri("/")
            .header("content-type", "application/x-www-form-urlencoded")
            .set_payload(payload)
            .to_request();
        call_service(&mut app, req).await
    }

    #[actix_rt::test]
    async fn test_form_page_serves() {
        let mut app = init_service(App::new().service(loan_form)).await;
        let resp = call_service(&mut app, TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("name=\"purchase_price\""));
    }

    #[actix_rt::test]
    async fn test_down_payment_over_price_gets_400() {
        let resp = post_form(
            std::env::temp_dir(),
            "purchase_price=350000&down_payment=400000&annual_interest_rate=6.0&loan_term_years=30",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = read_body(resp).await;
        let message = std::str::from_utf8(&body).unwrap();
        assert!(
            message.contains("Invalid loan terms"),
            "expected a validation message, got: {}",
            message,
        );
    }

    #[actix_rt::test]
    async fn test_non_numeric_input_gets_400() {
        let resp = post_form(
            std::env::temp_dir(),
            "purchase_price=abc&down_payment=0&annual_interest_rate=6.0&loan_term_years=30",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn test_valid_form_renders_results() {
        let dir = std::env::temp_dir().join(format!("home_loan_web_{}", charts::unique_suffix()));
        std::fs::create_dir_all(&dir).unwrap();

        let resp = post_form(
            dir.clone(),
            "purchase_price=350000&down_payment=50000&annual_interest_rate=6.0&loan_term_years=30&annual_property_tax=0&annual_home_insurance=0&annual_hoa_fees=0",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("Total monthly payment: $1,798.65"));
        assert!(html.contains("/static/plot1_"));
        assert!(html.contains("/static/plot2_"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
