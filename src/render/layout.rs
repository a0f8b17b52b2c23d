//! Page layout
//!
//! Pure grid computation: a normalized page plus a pagination state and the
//! current time go in, a full fixed-size frame plus the recomputed
//! pagination state come out. Nothing here touches collaborators or clocks,
//! which keeps every boundary condition unit-testable.
//!
//! Grid plan for the canonical 14-row panel: odd rows 1..=11 carry content,
//! the even row under each content row carries the *next* row's sub-label,
//! row 13 is the status bar, row 14 stays blank.

use chrono::NaiveTime;

use crate::config::DisplayGeometry;
use crate::display::{RenderedDisplay, RenderedLine, ERROR_COLOR, SUB_LABEL_COLOR};
use crate::page::{display_text, Line, Page};
use crate::render::text::{align_text, compose_row, pad_or_truncate, Align};

/// Content rows per screen: display rows 1, 3, 5, 7, 9, 11.
pub const PAGE_CAPACITY: usize = 6;

/// Where the caller is within a paginated page.
///
/// A plain value: layout takes one in and hands the recomputed, clamped one
/// back, so the owner decides where navigation state lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub page_offset: usize,
    pub total_pages: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_offset: 0,
            total_pages: 1,
        }
    }
}

impl PaginationState {
    /// Move one page forward. The next layout clamps overshoot.
    pub fn advance(&mut self) {
        self.page_offset = self.page_offset.saturating_add(1);
    }

    /// Move one page back.
    pub fn retreat(&mut self) {
        self.page_offset = self.page_offset.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Recompute for `item_count` content rows. A page that fits on one
    /// screen always snaps the offset back to zero; otherwise the offset is
    /// clamped to the last page.
    fn recompute(self, item_count: usize) -> Self {
        if item_count <= PAGE_CAPACITY {
            return Self::default();
        }
        let total_pages = item_count.div_ceil(PAGE_CAPACITY);
        Self {
            page_offset: self.page_offset.min(total_pages - 1),
            total_pages,
        }
    }
}

/// Lay out a full frame for `page`.
///
/// Always returns exactly `geometry.rows` lines of exactly
/// `geometry.columns` characters, no matter how much content exists.
pub fn layout_page(
    page: &Page,
    geometry: &DisplayGeometry,
    pagination: PaginationState,
    now: NaiveTime,
) -> (RenderedDisplay, PaginationState) {
    let columns = geometry.columns;

    // Content rows in ascending row order; sort_by_key is stable, so lines
    // sharing a row number keep their declaration order.
    let mut content: Vec<&Line> = page.lines.iter().collect();
    content.sort_by_key(|line| line.row);

    let pagination = pagination.recompute(content.len());
    let start = pagination.page_offset * PAGE_CAPACITY;
    let window: Vec<&Line> = content.into_iter().skip(start).take(PAGE_CAPACITY).collect();

    let mut lines = Vec::with_capacity(geometry.rows);
    for slot in 0..PAGE_CAPACITY {
        // Odd display row: the slot's own content.
        match window.get(slot) {
            Some(line) => lines.push(RenderedLine {
                text: compose_row(
                    display_text(&line.left.display),
                    display_text(&line.right.display),
                    columns,
                ),
                color: line.color.unwrap_or(geometry.default_color),
            }),
            None => lines.push(RenderedLine::blank(columns, geometry.default_color)),
        }
        // Even display row: sub-label announcing the *next* slot. Always
        // tinted in the marker color, label or not.
        let text = match window.get(slot + 1) {
            Some(next) => compose_row(&next.left.label, &next.right.label, columns),
            None => " ".repeat(columns),
        };
        lines.push(RenderedLine {
            text,
            color: SUB_LABEL_COLOR,
        });
    }

    lines.push(status_bar(page.title(), pagination, now, columns));

    while lines.len() < geometry.rows {
        lines.push(RenderedLine::blank(columns, geometry.default_color));
    }
    lines.truncate(geometry.rows);

    (lines, pagination)
}

/// Compose the status bar: uppercased title on the left, clock on the
/// right, page indicator next to the clock when the page is paginated.
pub fn status_bar(
    title: &str,
    pagination: PaginationState,
    now: NaiveTime,
    columns: usize,
) -> RenderedLine {
    let clock = now.format("%H:%M").to_string();
    let tail = if pagination.total_pages > 1 {
        format!(
            "{}/{} {}",
            pagination.page_offset + 1,
            pagination.total_pages,
            clock
        )
    } else {
        clock
    };
    let tail_width = tail.chars().count();
    let head_width = columns.saturating_sub(tail_width + 1);
    let head = pad_or_truncate(&title.to_uppercase(), head_width);
    RenderedLine {
        text: pad_or_truncate(&format!("{} {}", head, tail), columns),
        color: SUB_LABEL_COLOR,
    }
}

/// The frame published when a page id does not resolve: same shape as any
/// other frame, one red message row, everything else blank.
pub fn error_layout(geometry: &DisplayGeometry) -> RenderedDisplay {
    let mut lines: Vec<RenderedLine> = (0..geometry.rows)
        .map(|_| RenderedLine::blank(geometry.columns, geometry.default_color))
        .collect();
    let message_row = geometry.rows / 2;
    if let Some(line) = lines.get_mut(message_row) {
        *line = RenderedLine {
            text: align_text("NICHT GEFUNDEN", Align::Center, geometry.columns),
            color: ERROR_COLOR,
        };
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Color;
    use crate::page::Side;

    fn geometry() -> DisplayGeometry {
        DisplayGeometry::default()
    }

    fn content_line(row: u32, text: &str) -> Line {
        Line {
            row,
            left: Side {
                display: crate::page::DisplayField::label(text),
                ..Side::default()
            },
            right: Side::default(),
            color: None,
        }
    }

    fn page(lines: Vec<Line>) -> Page {
        Page {
            id: "test".into(),
            name: Some("Test".into()),
            lines,
        }
    }

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 7, 0).unwrap()
    }

    #[test]
    fn test_frame_is_always_full_size() {
        for line_count in [0, 1, 6, 9] {
            let lines = (0..line_count)
                .map(|i| content_line(2 * i + 1, &format!("ITEM {}", i + 1)))
                .collect();
            let (frame, _) = layout_page(&page(lines), &geometry(), Default::default(), noon());
            assert_eq!(frame.len(), 14);
            for line in &frame {
                assert_eq!(line.text.chars().count(), 24);
            }
        }
    }

    #[test]
    fn test_even_rows_are_always_marker_colored() {
        let (frame, _) = layout_page(
            &page(vec![content_line(1, "A"), content_line(3, "B")]),
            &geometry(),
            Default::default(),
            noon(),
        );
        for idx in [1, 3, 5, 7, 9, 11] {
            assert_eq!(frame[idx].color, SUB_LABEL_COLOR, "row {}", idx + 1);
        }
    }

    #[test]
    fn test_sub_label_row_announces_next_content_row() {
        let first = content_line(1, "TITLE");
        let mut second = content_line(3, "21.5 C");
        second.left.label = "WOHNZIMMER".into();
        let (frame, _) = layout_page(
            &page(vec![first, second]),
            &geometry(),
            Default::default(),
            noon(),
        );
        assert!(frame[1].text.contains("WOHNZIMMER"));
        assert_eq!(frame[3].text.trim(), "");
    }

    #[test]
    fn test_content_rows_sort_by_row_number() {
        let (frame, _) = layout_page(
            &page(vec![content_line(5, "LATE"), content_line(1, "EARLY")]),
            &geometry(),
            Default::default(),
            noon(),
        );
        assert!(frame[0].text.starts_with("EARLY"));
        assert!(frame[2].text.starts_with("LATE"));
    }

    #[test]
    fn test_right_side_renders_right_aligned() {
        let mut line = content_line(1, "LICHT");
        line.right.display = crate::page::DisplayField::label("AN");
        let (frame, _) = layout_page(&page(vec![line]), &geometry(), Default::default(), noon());
        assert_eq!(frame[0].text, "LICHT                 AN");
    }

    #[test]
    fn test_line_color_overrides_default() {
        let mut line = content_line(1, "ALARM");
        line.color = Some(Color::Red);
        let (frame, _) = layout_page(&page(vec![line]), &geometry(), Default::default(), noon());
        assert_eq!(frame[0].color, Color::Red);
        assert_eq!(frame[2].color, geometry().default_color);
    }

    #[test]
    fn test_pagination_math() {
        let nine: Vec<Line> = (1..=9)
            .map(|i| content_line(100 + i, &format!("ITEM {}", i)))
            .collect();
        let (frame, pagination) =
            layout_page(&page(nine.clone()), &geometry(), Default::default(), noon());
        assert_eq!(pagination.total_pages, 2);
        assert_eq!(pagination.page_offset, 0);
        assert!(frame[0].text.starts_with("ITEM 1"));
        assert!(frame[10].text.starts_with("ITEM 6"));

        let second = PaginationState {
            page_offset: 1,
            total_pages: 2,
        };
        let (frame, _) = layout_page(&page(nine), &geometry(), second, noon());
        assert!(frame[0].text.starts_with("ITEM 7"));
        assert!(frame[2].text.starts_with("ITEM 8"));
        assert!(frame[4].text.starts_with("ITEM 9"));
        assert_eq!(frame[6].text.trim(), "");
    }

    #[test]
    fn test_offset_clamps_to_last_page() {
        let nine: Vec<Line> = (1..=9).map(|i| content_line(i, "X")).collect();
        let wild = PaginationState {
            page_offset: 99,
            total_pages: 2,
        };
        let (_, pagination) = layout_page(&page(nine), &geometry(), wild, noon());
        assert_eq!(pagination.page_offset, 1);
    }

    #[test]
    fn test_single_screen_page_resets_offset() {
        let stale = PaginationState {
            page_offset: 5,
            total_pages: 10,
        };
        let (_, pagination) = layout_page(
            &page(vec![content_line(1, "A")]),
            &geometry(),
            stale,
            noon(),
        );
        assert_eq!(pagination, PaginationState::default());
    }

    #[test]
    fn test_status_bar_title_clock_and_indicator() {
        let bar = status_bar("Home", PaginationState::default(), noon(), 24);
        assert_eq!(bar.text.chars().count(), 24);
        assert_eq!(bar.color, SUB_LABEL_COLOR);
        assert!(bar.text.contains("HOME"));
        assert!(bar.text.contains("12:07"));
        assert!(!bar.text.contains('/'));

        let paged = status_bar(
            "Home",
            PaginationState {
                page_offset: 0,
                total_pages: 2,
            },
            noon(),
            24,
        );
        assert!(paged.text.contains("1/2 12:07"));
    }

    #[test]
    fn test_status_bar_truncates_long_titles() {
        let bar = status_bar(
            "A Very Long Page Name That Exceeds",
            PaginationState::default(),
            noon(),
            24,
        );
        assert_eq!(bar.text.chars().count(), 24);
        assert!(bar.text.ends_with("12:07"));
    }

    #[test]
    fn test_error_layout_matches_frame_shape() {
        let frame = error_layout(&geometry());
        assert_eq!(frame.len(), 14);
        for line in &frame {
            assert_eq!(line.text.chars().count(), 24);
        }
        let hits: Vec<_> = frame
            .iter()
            .filter(|l| l.text.contains("NICHT GEFUNDEN"))
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].color, ERROR_COLOR);
    }

    #[test]
    fn test_small_geometry_still_fills_exactly() {
        let geometry = DisplayGeometry {
            columns: 10,
            rows: 4,
            default_color: Color::White,
        };
        let (frame, _) = layout_page(
            &page(vec![content_line(1, "LONG TEXT HERE")]),
            &geometry,
            Default::default(),
            noon(),
        );
        assert_eq!(frame.len(), 4);
        for line in &frame {
            assert_eq!(line.text.chars().count(), 10);
        }
        assert_eq!(frame[0].text, "LONG TEXT ");
    }
}
