mod bootstrap;
mod candle_generator;
mod generator_factory;
mod mock_generator;

pub use bootstrap::{BootstrapError, ensure_model, unpack_archive};
pub use candle_generator::CandleTextGenerator;
pub use generator_factory::TextGeneratorFactory;
pub use mock_generator::MockTextGenerator;
