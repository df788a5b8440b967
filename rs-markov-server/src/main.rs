use std::path::Path;
use std::sync::{Arc, RwLock};

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, put, web};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use rs_markov_core::io::{get_filename, list_files, normalize_folder};
use rs_markov_core::model::{GenerationConfig, MarkovModel, StartSeed};
use rs_markov_core::{MarkovError, text};

const DATA_FOLDER: &str = "./data";
const CORPUS_EXTENSION: &str = "txt";

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	length: Option<usize>,
	seed: Option<u64>,
	prefix: Option<String>, // tokenized, must hold exactly N tokens
}

/// Query parameters for the `/v1/load` endpoint
#[derive(Deserialize)]
struct LoadParams {
	name: Option<String>,
	order: Option<usize>,
}

/// Trained model and the corpus it was trained on.
struct LoadedModel {
	name: String,
	model: Arc<MarkovModel>,
}

#[derive(Default)]
struct SharedData {
	loaded: Option<LoadedModel>,
}

impl GenerateParams {
	/// Builds the generation config for a model of order `order`.
	fn config(&self, order: usize) -> Result<GenerationConfig, MarkovError> {
		let mut config = GenerationConfig::new(order, self.length.unwrap_or(100))?;
		if let Some(prefix) = &self.prefix {
			config.set_start_seed(StartSeed::Custom(text::tokenize(prefix)))?;
		}
		Ok(config)
	}
}

/// Maps a library error to an HTTP response.
fn error_response(error: MarkovError) -> HttpResponse {
	match error {
		MarkovError::InvalidConfiguration(_) | MarkovError::EmptyCorpus => HttpResponse::BadRequest().body(error.to_string()),
		MarkovError::Io { .. } => HttpResponse::NotFound().body(error.to_string()),
		MarkovError::ChainExhausted { .. } | MarkovError::SamplingExhausted { .. } => {
			warn!("generation failed: {error}");
			HttpResponse::InternalServerError().body(error.to_string())
		}
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a text with the loaded model.
/// The model is cloned out of the lock, so concurrent requests only share it read-only.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let model = match data.read() {
		Ok(shared_data) => match &shared_data.loaded {
			Some(loaded) => Arc::clone(&loaded.model),
			None => return HttpResponse::Conflict().body("No model loaded"),
		},
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let config = match query.config(model.order()) {
		Ok(c) => c,
		Err(e) => return error_response(e),
	};

	let mut rng = match query.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};

	let result = web::block(move || model.generate_text(&config, &mut rng)).await;
	match result {
		Ok(Ok(text)) => HttpResponse::Ok().body(text),
		Ok(Err(e)) => error_response(e),
		Err(_) => HttpResponse::InternalServerError().body("Generation task failed"),
	}
}

/// Corpus names in `dir`: the stems of its `.txt` files, sorted.
fn corpus_names<P: AsRef<Path>>(dir: P) -> Result<Vec<String>, MarkovError> {
	list_files(dir, CORPUS_EXTENSION)?.iter().map(get_filename).collect()
}

#[get("/v1/corpora")]
async fn get_corpora() -> impl Responder {
	match corpus_names(normalize_folder(DATA_FOLDER)) {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(e) => {
			warn!("listing corpora failed: {e}");
			HttpResponse::InternalServerError().body("Failed to list corpora")
		}
	}
}

#[get("/v1/loaded")]
async fn get_loaded(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match &shared_data.loaded {
		Some(loaded) => HttpResponse::Ok().body(format!("{} {}", loaded.name, loaded.model.order())),
		None => HttpResponse::Ok().body(""),
	}
}

#[put("/v1/load")]
async fn put_load(data: web::Data<RwLock<SharedData>>, query: web::Query<LoadParams>) -> impl Responder {
	let name = match &query.name {
		Some(s) if !s.trim().is_empty() && !s.contains(['/', '\\']) => s.trim().to_owned(),
		_ => return HttpResponse::BadRequest().body("Missing or invalid corpus name"),
	};
	let order = query.order.unwrap_or(2);

	// Validate the order before reading anything.
	if let Err(e) = GenerationConfig::new(order, order) {
		return error_response(e);
	}

	let path = normalize_folder(DATA_FOLDER).join(format!("{name}.{CORPUS_EXTENSION}"));
	let model = match web::block(move || MarkovModel::from_file(path, order)).await {
		Ok(Ok(m)) => m,
		Ok(Err(e)) => return error_response(e),
		Err(_) => return HttpResponse::InternalServerError().body("Training task failed"),
	};

	let mut shared_data = match data.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	shared_data.loaded = Some(LoadedModel { name: name.clone(), model: Arc::new(model) });
	info!("loaded corpus '{name}' with order {order}");

	HttpResponse::Ok().body("Model loaded successfully")
}

/// Main entry point for the server.
///
/// Starts an Actix-web HTTP server with no model loaded; `PUT /v1/load`
/// trains one from a corpus in `./data`.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let shared_data = web::Data::new(RwLock::new(SharedData::default()));

	info!("listening on 127.0.0.1:5000");
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.service(get_generated)
			.service(get_corpora)
			.service(put_load)
			.service(get_loaded)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
