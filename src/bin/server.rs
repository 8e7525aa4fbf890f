use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hamgrid::config::Params;
use hamgrid::edgelist::parse_edge_list;
use hamgrid::optimize::Stats;
use hamgrid::render;

const CELL_PX: usize = 24;

#[derive(Deserialize)]
struct EvolveRequest {
    #[serde(flatten)]
    params: Params,
    /// Optional edge list (`x1,y1,x2,y2` lines) replacing the zigzag seed.
    edges: Option<String>,
}

#[derive(Serialize)]
struct EvolveResponse {
    layers: Vec<Layer>,
    timings: Vec<TimingEntry>,
    width: usize,
    height: usize,
    initial_cost: usize,
    best_cost: usize,
    valid: bool,
    stats: Stats,
    path: Vec<[usize; 2]>,
    /// Cells of the window tried by the last step.
    last_window: Vec<[usize; 2]>,
    ascii: String,
    skipped_lines: Vec<usize>,
}

#[derive(Serialize)]
struct Layer {
    name: String,
    data_url: String,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

type ApiError = (StatusCode, String);

fn encode_png(rgba: &[u8], w: usize, h: usize) -> Result<String, ApiError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder
        .write_image(rgba, w as u32, h as u32, image::ExtendedColorType::Rgba8)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    Ok(format!("data:image/png;base64,{}", b64))
}

fn evolve(req: EvolveRequest) -> Result<EvolveResponse, ApiError> {
    let bad_request = |e: hamgrid::error::Error| (StatusCode::BAD_REQUEST, e.to_string());

    let (loaded, skipped_lines) = match req.edges.as_deref() {
        Some(text) => {
            let list = parse_edge_list(text);
            let skipped = list.skipped.iter().map(|(n, _)| *n).collect();
            (Some(list.to_grid()), skipped)
        }
        None => (None, Vec::new()),
    };

    let (run, timings) = hamgrid::run(&req.params, loaded).map_err(bad_request)?;
    let (pw, ph) = render::image_dims(&run.edges, CELL_PX);
    let rgba = render::render_rgba(&run.edges, &run.zones, run.last_window.as_ref(), CELL_PX);

    Ok(EvolveResponse {
        layers: vec![Layer {
            name: "path".into(),
            data_url: encode_png(&rgba, pw, ph)?,
        }],
        timings: timings
            .iter()
            .map(|t| TimingEntry {
                name: t.name.to_string(),
                ms: t.ms,
            })
            .collect(),
        width: run.edges.w,
        height: run.edges.h,
        initial_cost: run.initial_cost,
        best_cost: run.best_cost,
        valid: run.valid,
        stats: run.stats,
        path: run.path.iter().map(|&(x, y)| [x, y]).collect(),
        last_window: run
            .last_window
            .iter()
            .flat_map(|win| win.cells())
            .map(|(x, y)| [x, y])
            .collect(),
        ascii: render::ascii(&run.edges, run.last_window.as_ref()),
        skipped_lines,
    })
}

async fn evolve_handler(Json(req): Json<EvolveRequest>) -> Result<Json<EvolveResponse>, ApiError> {
    let response = tokio::task::spawn_blocking(move || evolve(req))
        .await
        .map_err(|e| {
            error!(%e, "evolve task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })??;
    Ok(Json(response))
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let frontend = ServeDir::new("frontend");

    let app = Router::new()
        .route("/api/evolve", post(evolve_handler))
        .layer(CorsLayer::permissive())
        .fallback_service(frontend);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("hamgrid server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}
