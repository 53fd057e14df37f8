mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    GeneratorProviderSetting, ModelSettings, SegmentationSettings, ServerSettings, Settings,
    StorageProviderSetting, StorageSettings,
};
