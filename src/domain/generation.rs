/// Parameters for one text-generation call.
///
/// `max_length` is the total token budget including the prompt, so a prompt
/// that already fills the budget produces no new tokens. When `greedy` is
/// set the sampler is pinned to argmax and `top_k`/`seed` are ignored,
/// which makes repeated calls with the same prompt deterministic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_length: usize,
    pub top_k: usize,
    pub seed: u64,
    pub greedy: bool,
}

pub const DEFAULT_MAX_LENGTH: usize = 200;
pub const DEFAULT_TOP_K: usize = 10;
