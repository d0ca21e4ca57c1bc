// src/presentation/holder.rs
//
// Library row holders
//
// A list adapter owns one holder per visible row and rebinds it as the list
// scrolls. Binding must not allocate once the row buffer has grown to its
// working size.

use std::fmt::Write;

use crate::domain::LibraryManga;

/// A library manga plus how it should be displayed
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryItem {
    pub manga: LibraryManga,
    pub show_unread_badge: bool,
}

impl LibraryItem {
    pub fn new(manga: LibraryManga) -> Self {
        Self {
            manga,
            show_unread_badge: true,
        }
    }

    /// Unread count to show, if any
    pub fn unread_badge(&self) -> Option<u32> {
        (self.show_unread_badge && self.manga.has_unread()).then_some(self.manga.unread_count)
    }
}

/// Binds a library item to a pre-allocated row
pub trait LibraryHolder {
    fn on_set_values(&mut self, item: &LibraryItem);
}

const COVER_PRESENT: &str = "[#]";
const COVER_MISSING: &str = "[ ]";
const ELLIPSIS: char = '~';
const BADGE_WIDTH: usize = 6;
/// Largest count that fits the badge; larger counts show BADGE_OVERFLOW
const BADGE_MAX: u32 = 9999;
const BADGE_OVERFLOW: &str = "(999+)";
const MIN_TITLE_WIDTH: usize = 8;

/// Renders a fixed-width terminal row:
///
/// `[#] Title of the manga          (12)`
///
/// The marker shows whether a cover is known. Titles longer than the row are
/// cut and end with `~`. Counts above 9999 show as `(999+)`.
#[derive(Debug)]
pub struct TextRowHolder {
    width: usize,
    row: String,
}

impl TextRowHolder {
    pub fn new(width: usize) -> Self {
        let width = width.max(COVER_PRESENT.len() + 1 + MIN_TITLE_WIDTH + BADGE_WIDTH);
        Self {
            width,
            row: String::with_capacity(width * 4),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// The row as last bound
    pub fn line(&self) -> &str {
        &self.row
    }

    fn title_width(&self) -> usize {
        self.width - COVER_PRESENT.len() - 1 - BADGE_WIDTH
    }

    fn push_title(&mut self, title: &str) {
        let max = self.title_width();
        let len = title.chars().count();

        if len <= max {
            self.row.push_str(title);
            self.pad(max - len);
        } else {
            self.row.extend(title.chars().take(max - 1));
            self.row.push(ELLIPSIS);
        }
    }

    fn pad(&mut self, n: usize) {
        self.row.extend(std::iter::repeat(' ').take(n));
    }
}

impl LibraryHolder for TextRowHolder {
    fn on_set_values(&mut self, item: &LibraryItem) {
        self.row.clear();

        let marker = if item.manga.manga.thumbnail_url.is_some() {
            COVER_PRESENT
        } else {
            COVER_MISSING
        };
        self.row.push_str(marker);
        self.row.push(' ');

        self.push_title(item.manga.title());

        match item.unread_badge() {
            Some(count) if count > BADGE_MAX => {
                self.row.push_str(BADGE_OVERFLOW);
            }
            Some(count) => {
                let digits = count.checked_ilog10().unwrap_or(0) as usize + 1;
                self.pad(BADGE_WIDTH - (digits + 2));
                // Writing into a String cannot fail
                let _ = write!(self.row, "({})", count);
            }
            None => self.pad(BADGE_WIDTH),
        }
    }
}
