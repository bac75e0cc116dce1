use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use backend::config::RelayConfig;
use backend::services;
use backend::services::relay::client::WorkflowServiceApi;
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{info, warn};
use mime_guess::from_path;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = RelayConfig::from_env();
    if config.access_token.is_empty() {
        warn!("COMFY_ACCESS_TOKEN is not set; the workflow service will reject relayed calls");
    }
    let url = format!("http://{}:{}", config.host, config.port);

    {
        let _url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&_url_clone);
        });
    }

    let api = web::Data::new(WorkflowServiceApi::from_config(&config));
    let bind_addr = (config.host.clone(), config.port);

    info!("Server running at {}", url);

    HttpServer::new(move || {
        App::new()
            .app_data(api.clone())
            .service(services::relay::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
    .bind(bind_addr)?
    .run()
    .await
}
