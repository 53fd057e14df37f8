/// Knobs for subscriber setup, derived from `Settings` in `main`.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
}
