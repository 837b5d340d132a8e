use crate::callbacks::{self, display_page};
use crate::config::AppConfig;
use crate::router::{Bindings, Prop, Router};
use actix_files::Files;
use actix_web::{
    http::header::ContentType, middleware::Logger, post, web, App, HttpRequest, HttpResponse,
    HttpServer, Responder,
};
use anyhow::Context as _;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tera::Tera;
use tracker_fetch::api::QuoteFetcher;

pub const INDEX_TEMPLATE: &str = "index.html.tera";
pub const TITLE: &str = "Stock Tracker";

/// Where and how the HTTP server listens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub static_dir: PathBuf,
    pub template_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8050,
            workers: 1,
            static_dir: PathBuf::from("./static"),
            template_dir: PathBuf::from("./templates"),
        }
    }
}

/// Immutable state shared by every worker.
pub struct AppState {
    pub router: Arc<Router>,
    pub bindings: Bindings,
    pub templates: Tera,
}

impl AppState {
    pub fn new(
        fetcher: Arc<dyn QuoteFetcher>,
        config: AppConfig,
        templates: Tera,
    ) -> Self {
        let router = Arc::new(callbacks::router());
        let bindings = callbacks::bindings(router.clone(), fetcher, config);
        Self {
            router,
            bindings,
            templates,
        }
    }
}

/// Load every template under `dir`; `.html.tera` files are autoescaped.
pub fn load_templates(dir: &Path) -> anyhow::Result<Tera> {
    let glob = format!("{}/**/*", dir.display());
    let mut tera =
        Tera::new(&glob).with_context(|| format!("failed to load templates from {glob}"))?;
    tera.autoescape_on(vec![".html", ".html.tera"]);
    if !tera.get_template_names().any(|name| name == INDEX_TEMPLATE) {
        anyhow::bail!("{INDEX_TEMPLATE} not found in {}", dir.display());
    }
    Ok(tera)
}

/// Register the routes on an actix `App`:
///
/// ```text
/// GET  /static/**            stylesheets & client script
/// POST /_update-component    binding dispatch
/// GET  /**                   page shell, rendered for the request path
/// ```
pub fn configure(cfg: &mut web::ServiceConfig, static_dir: &Path) {
    cfg.service(Files::new("/static", static_dir))
        .service(update_component)
        .route("/{tail:.*}", web::get().to(shell));
}

pub async fn serve(
    server: ServerConfig,
    config: AppConfig,
    fetcher: Arc<dyn QuoteFetcher>,
) -> anyhow::Result<()> {
    let templates = load_templates(&server.template_dir)?;
    let state = web::Data::new(AppState::new(fetcher, config, templates));
    let static_dir = server.static_dir.clone();

    info!(
        "Serving {TITLE} on http://{}:{} ({} worker(s))",
        server.host, server.port, server.workers
    );
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(|cfg| configure(cfg, &static_dir))
    })
    .workers(server.workers)
    .bind((server.host.as_str(), server.port))
    .with_context(|| format!("failed to bind {}:{}", server.host, server.port))?
    .run()
    .await?;

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////

async fn shell(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let content = display_page(&state.router, req.path());

    let mut context = tera::Context::new();
    context.insert("title", TITLE);
    context.insert("page_content", &content.to_string());

    match state.templates.render(INDEX_TEMPLATE, &context) {
        Ok(html) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(html),
        Err(e) => {
            error!("failed rendering {INDEX_TEMPLATE}: {e}");
            HttpResponse::InternalServerError().body("Template rendering failed")
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// A changed component property, as posted by the client script.
///
/// ```json
/// { "id": "input", "property": "value", "value": "aapl" }
/// ```
#[derive(Deserialize, Serialize, Debug)]
pub struct UpdateRequest {
    #[serde(flatten)]
    pub input: Prop,
    #[serde(default)]
    pub value: Option<String>,
}

/// New children for the bound output.
///
/// ```json
/// { "output": { "id": "output_graph", "property": "children" }, "html": "<div ...>" }
/// ```
#[derive(Deserialize, Serialize, Debug)]
pub struct UpdateResponse {
    pub output: Prop,
    pub html: String,
}

#[post("/_update-component")]
async fn update_component(
    body: web::Json<UpdateRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let UpdateRequest { input, value } = body.into_inner();

    let Some(binding) = state.bindings.get(&input) else {
        warn!("No binding registered for {input}");
        return HttpResponse::NotFound().body(format!("No binding registered for {input}"));
    };

    match binding.call(value.unwrap_or_default()).await {
        Ok(node) => HttpResponse::Ok().json(UpdateResponse {
            output: binding.output.clone(),
            html: node.to_string(),
        }),
        Err(e) => {
            debug!("{input} -> {}: {e}", binding.output);
            HttpResponse::NoContent().finish()
        }
    }
}
