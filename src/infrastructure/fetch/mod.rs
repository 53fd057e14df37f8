mod http_pdf_source;

pub use http_pdf_source::HttpPdfSource;
