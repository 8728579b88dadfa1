//! Per-file reading state: current page, font tier and background.
//!
//! A [`ReadingSession`] is created for one document and dropped when the
//! reader leaves it. Every successful mutation is written to the store before
//! the in-memory state changes, so a failed write leaves the session as it was.

use crate::error::ReaderError;
use crate::pagination::{self, FontTier};
use crate::service::preferences::PreferencesService;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    pub file_name: String,
    pub lines: Vec<String>,
    pub page_index: usize,
    pub font_tier: FontTier,
    pub background_color: String,
}

impl LoadedDocument {
    pub fn capacity(&self) -> usize {
        self.font_tier.lines_per_page()
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.lines.len(), self.capacity())
    }

    fn has_next_page(&self) -> bool {
        (self.page_index + 1) * self.capacity() < self.lines.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unloaded,
    Loaded(LoadedDocument),
}

/// What the UI needs to draw the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageView<'a> {
    pub file_name: &'a str,
    pub page_index: usize,
    pub total_pages: usize,
    pub font_size: u32,
    pub background_color: &'a str,
    pub lines: &'a [String],
}

impl PageView<'_> {
    pub fn text(&self) -> String {
        pagination::render_page(self.lines)
    }
}

pub struct ReadingSession {
    preferences: PreferencesService,
    state: SessionState,
}

impl ReadingSession {
    pub fn new(preferences: PreferencesService) -> Self {
        Self {
            preferences,
            state: SessionState::Unloaded,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, SessionState::Loaded(_))
    }

    pub fn document(&self) -> Option<&LoadedDocument> {
        match &self.state {
            SessionState::Loaded(doc) => Some(doc),
            SessionState::Unloaded => None,
        }
    }

    /// Load `path` with the stored preferences and resume at the saved page.
    ///
    /// On failure the session keeps whatever state it had before.
    pub async fn open(&mut self, path: impl AsRef<Path>) -> Result<(), ReaderError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ReaderError::NotFound(path.display().to_string()))?;

        let prefs = self.preferences.get_reading_preferences().await?;
        let font_tier = FontTier::from_points(prefs.font_size).unwrap_or_else(|| {
            warn!(
                font_size = prefs.font_size,
                "unknown stored font size; using smallest tier"
            );
            FontTier::default()
        });

        let content = match tokio::fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ReaderError::NotFound(path.display().to_string()));
            }
            Err(e) => {
                warn!(file = %file_name, error = %e, "failed to read file");
                return Err(e.into());
            }
        };
        let lines = pagination::split_lines(&content);

        let stored = self.preferences.get_reading_progress(&file_name).await?;
        let page_index = pagination::clamp_page(
            stored as usize,
            lines.len(),
            font_tier.lines_per_page(),
        );
        self.preferences
            .save_reading_progress(&file_name, page_index as u32)
            .await?;

        info!(
            file = %file_name,
            lines = lines.len(),
            page = page_index,
            stored_page = stored,
            font_size = font_tier.points(),
            "document opened"
        );
        self.state = SessionState::Loaded(LoadedDocument {
            file_name,
            lines,
            page_index,
            font_tier,
            background_color: prefs.background_color,
        });
        Ok(())
    }

    /// Advance one page. `Ok(false)` on the last page.
    pub async fn next_page(&mut self) -> Result<bool, ReaderError> {
        let SessionState::Loaded(doc) = &mut self.state else {
            return Ok(false);
        };
        if !doc.has_next_page() {
            return Ok(false);
        }
        let page = doc.page_index + 1;
        self.preferences
            .save_reading_progress(&doc.file_name, page as u32)
            .await?;
        doc.page_index = page;
        debug!(file = %doc.file_name, page, "next page");
        Ok(true)
    }

    /// Go back one page. `Ok(false)` on the first page.
    pub async fn prev_page(&mut self) -> Result<bool, ReaderError> {
        let SessionState::Loaded(doc) = &mut self.state else {
            return Ok(false);
        };
        if doc.page_index == 0 {
            return Ok(false);
        }
        let page = doc.page_index - 1;
        self.preferences
            .save_reading_progress(&doc.file_name, page as u32)
            .await?;
        doc.page_index = page;
        debug!(file = %doc.file_name, page, "previous page");
        Ok(true)
    }

    pub async fn increase_font(&mut self) -> Result<bool, ReaderError> {
        self.step_font(FontTier::larger).await
    }

    pub async fn decrease_font(&mut self) -> Result<bool, ReaderError> {
        self.step_font(FontTier::smaller).await
    }

    async fn step_font(
        &mut self,
        step: fn(FontTier) -> Option<FontTier>,
    ) -> Result<bool, ReaderError> {
        let SessionState::Loaded(doc) = &mut self.state else {
            return Ok(false);
        };
        let Some(tier) = step(doc.font_tier) else {
            return Ok(false);
        };
        // Stored progress catches up on the next page turn; open() clamps stale rows.
        let page = pagination::clamp_page(doc.page_index, doc.lines.len(), tier.lines_per_page());
        self.preferences
            .save_reading_preferences(tier.points(), doc.background_color.as_str())
            .await?;
        doc.font_tier = tier;
        doc.page_index = page;
        debug!(font_size = tier.points(), page, "font tier changed");
        Ok(true)
    }

    /// Change the page background. Pagination is unaffected.
    pub async fn set_background(&mut self, hex_color: &str) -> Result<bool, ReaderError> {
        if !is_hex_color(hex_color) {
            return Err(ReaderError::validation(format!(
                "Invalid color: {hex_color}"
            )));
        }
        let SessionState::Loaded(doc) = &mut self.state else {
            return Ok(false);
        };
        self.preferences
            .save_reading_preferences(doc.font_tier.points(), hex_color)
            .await?;
        doc.background_color = hex_color.to_string();
        debug!(background = %hex_color, "background changed");
        Ok(true)
    }

    pub fn page_view(&self) -> Option<PageView<'_>> {
        let doc = self.document()?;
        Some(PageView {
            file_name: &doc.file_name,
            page_index: doc.page_index,
            total_pages: doc.total_pages(),
            font_size: doc.font_tier.points(),
            background_color: &doc.background_color,
            lines: pagination::paginate(&doc.lines, doc.page_index, doc.capacity()),
        })
    }

    /// Text of the current page, `None` before a document is open.
    pub fn render(&self) -> Option<String> {
        self.page_view().map(|view| view.text())
    }
}

/// `#RGB`, `#ARGB`, `#RRGGBB` or `#AARRGGBB`.
fn is_hex_color(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 4 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
}
