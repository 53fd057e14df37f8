mod generate;
mod health;
mod process;
mod upload;

pub use generate::generate_text_handler;
pub use health::health_handler;
pub use process::process_pdf_handler;
pub use upload::upload_pdf_handler;

use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
