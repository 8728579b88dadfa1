//! Line-based pagination of plain-text documents.
//!
//! Everything here is pure: a page is a window of whole lines whose size is
//! fixed by the current [`FontTier`].

/// Line terminator used both to split file content and to join a rendered page.
pub const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// The three font-size steps offered by the reader.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum FontTier {
    #[default]
    Small,
    Medium,
    Large,
}

impl FontTier {
    pub const ALL: [FontTier; 3] = [FontTier::Small, FontTier::Medium, FontTier::Large];

    /// Font size in points.
    pub const fn points(self) -> u32 {
        match self {
            FontTier::Small => 18,
            FontTier::Medium => 22,
            FontTier::Large => 26,
        }
    }

    pub fn from_points(points: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.points() == points)
    }

    /// Next larger tier, or `None` at the top.
    pub const fn larger(self) -> Option<Self> {
        match self {
            FontTier::Small => Some(FontTier::Medium),
            FontTier::Medium => Some(FontTier::Large),
            FontTier::Large => None,
        }
    }

    /// Next smaller tier, or `None` at the bottom.
    pub const fn smaller(self) -> Option<Self> {
        match self {
            FontTier::Small => None,
            FontTier::Medium => Some(FontTier::Small),
            FontTier::Large => Some(FontTier::Medium),
        }
    }

    pub const fn lines_per_page(self) -> usize {
        lines_per_page(self)
    }
}

/// Page capacity for a tier. Strictly decreasing as the tier grows.
pub const fn lines_per_page(tier: FontTier) -> usize {
    match tier {
        FontTier::Small => 20,
        FontTier::Medium => 16,
        FontTier::Large => 12,
    }
}

/// Split raw content on [`LINE_ENDING`], keeping empty lines.
///
/// Mixed terminators are not normalised: on Windows a lone `\n` stays inside
/// its line.
pub fn split_lines(content: &str) -> Vec<String> {
    content.split(LINE_ENDING).map(str::to_owned).collect()
}

/// `ceil(line_count / capacity)`, never less than 1.
pub fn total_pages(line_count: usize, capacity: usize) -> usize {
    line_count.div_ceil(capacity.max(1)).max(1)
}

/// The lines belonging to page `page_index`; empty past the end.
pub fn paginate<T>(lines: &[T], page_index: usize, capacity: usize) -> &[T] {
    let capacity = capacity.max(1);
    let start = page_index.saturating_mul(capacity);
    if start >= lines.len() {
        return &[];
    }
    let end = start.saturating_add(capacity).min(lines.len());
    &lines[start..end]
}

/// Largest valid page index for the given layout.
pub fn clamp_page(page_index: usize, line_count: usize, capacity: usize) -> usize {
    page_index.min(total_pages(line_count, capacity) - 1)
}

/// Join a page back into displayable text.
pub fn render_page<T: AsRef<str>>(page: &[T]) -> String {
    page.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(LINE_ENDING)
}
