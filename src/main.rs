use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use vellum::application::services::{GenerationService, SegmentationService, UploadService};
use vellum::infrastructure::fetch::HttpPdfSource;
use vellum::infrastructure::llm::TextGeneratorFactory;
use vellum::infrastructure::observability::{TracingConfig, init_tracing};
use vellum::infrastructure::storage::DocumentStoreFactory;
use vellum::infrastructure::text_processing::{FixedBlockSplitter, PdfTextExtractor};
use vellum::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env();

    init_tracing(
        TracingConfig {
            environment: settings.environment.to_string(),
            json_format: settings.log_json,
        },
        settings.server.port,
    );

    let document_store = DocumentStoreFactory::create(&settings.storage)?;

    // Bootstraps (downloads + unpacks) and loads the model before the
    // listener binds: the service is not reachable until it can generate.
    let generator = TextGeneratorFactory::create(&settings.model).await?;

    let pdf_source = Arc::new(HttpPdfSource::new());
    let extractor = Arc::new(PdfTextExtractor::new());
    let splitter = Arc::new(FixedBlockSplitter::new());

    let upload_service = Arc::new(UploadService::new(document_store));
    let segmentation_service = Arc::new(SegmentationService::new(
        pdf_source,
        extractor,
        splitter,
        settings.segmentation.max_block_size,
    ));
    let generation_service = Arc::new(GenerationService::new(
        Arc::clone(&segmentation_service),
        generator,
    ));

    let state = AppState {
        upload_service,
        segmentation_service,
        generation_service,
        default_max_length: settings.model.max_length,
        default_top_k: settings.model.top_k,
    };

    let router = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
