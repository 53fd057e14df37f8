/// One fixed-size block of a document's extracted text.
///
/// Segments are request-scoped: they are recomputed from a live download
/// every time and never cached, so `index` is only meaningful against the
/// segment list produced by the same request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub index: usize,
    pub text: String,
}

impl Segment {
    pub fn new(index: usize, text: String) -> Self {
        Self { index, text }
    }

    /// Length in Unicode scalar values, the unit segment boundaries are
    /// measured in.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
