/// Episode emitted by the release filter: numbered and normalized, but
/// not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEpisode {
    pub number: i32,
    pub title: String,
    pub plot: String,
    pub rating: f32,
}

/// How an enrichment result classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoKind {
    Trailer,
    Related,
}

/// Best-effort video attached to a newly discovered episode.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMatch {
    pub kind: VideoKind,
    pub link: String,
    pub title: String,
}
