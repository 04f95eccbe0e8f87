//! Per-feed load lifecycle.
//!
//! Unloaded → Loading → Loaded | Failed. There is no retry, so both end
//! states are terminal.

use formats::GeoJsonError;
use tracing::{info, warn};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Earthquakes,
    TectonicPlates,
}

impl FeedKind {
    pub fn label(self) -> &'static str {
        match self {
            FeedKind::Earthquakes => "earthquake feed",
            FeedKind::TectonicPlates => "tectonic plate feed",
        }
    }
}

/// Why a feed could not be turned into a layer.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedError {
    /// The request never produced a response.
    Network(String),
    /// The server answered with a non-success status.
    Http(u16),
    /// The response body could not be read.
    Body(String),
    GeoJson(GeoJsonError),
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::Network(msg) => write!(f, "request failed: {msg}"),
            FeedError::Http(status) => write!(f, "server answered HTTP {status}"),
            FeedError::Body(msg) => write!(f, "could not read response: {msg}"),
            FeedError::GeoJson(err) => write!(f, "malformed GeoJSON: {err}"),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::GeoJson(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GeoJsonError> for FeedError {
    fn from(err: GeoJsonError) -> Self {
        FeedError::GeoJson(err)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedState {
    Unloaded,
    Loading,
    Loaded { feature_count: usize, skipped: usize },
    Failed { error: FeedError },
}

impl FeedState {
    pub fn name(&self) -> &'static str {
        match self {
            FeedState::Unloaded => "unloaded",
            FeedState::Loading => "loading",
            FeedState::Loaded { .. } => "loaded",
            FeedState::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedStateError {
    pub kind: FeedKind,
    pub from: &'static str,
    pub to: &'static str,
}

impl std::fmt::Display for FeedStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: cannot move from {} to {}",
            self.kind.label(),
            self.from,
            self.to
        )
    }
}

impl std::error::Error for FeedStateError {}

#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    pub kind: FeedKind,
    pub url: String,
    state: FeedState,
}

impl Feed {
    pub fn new(kind: FeedKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            state: FeedState::Unloaded,
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn begin(&mut self) -> Result<(), FeedStateError> {
        self.transition(FeedState::Loading)?;
        info!(feed = self.kind.label(), url = %self.url, "fetching");
        Ok(())
    }

    pub fn finish_loaded(
        &mut self,
        feature_count: usize,
        skipped: usize,
    ) -> Result<(), FeedStateError> {
        self.transition(FeedState::Loaded {
            feature_count,
            skipped,
        })?;
        info!(feed = self.kind.label(), feature_count, skipped, "loaded");
        Ok(())
    }

    pub fn finish_failed(&mut self, error: FeedError) -> Result<(), FeedStateError> {
        let message = error.to_string();
        self.transition(FeedState::Failed { error })?;
        warn!(feed = self.kind.label(), error = %message, "failed");
        Ok(())
    }

    fn transition(&mut self, next: FeedState) -> Result<(), FeedStateError> {
        let allowed = matches!(
            (&self.state, &next),
            (FeedState::Unloaded, FeedState::Loading)
                | (FeedState::Loading, FeedState::Loaded { .. })
                | (FeedState::Loading, FeedState::Failed { .. })
        );
        if !allowed {
            return Err(FeedStateError {
                kind: self.kind,
                from: self.state.name(),
                to: next.name(),
            });
        }
        self.state = next;
        Ok(())
    }
}
