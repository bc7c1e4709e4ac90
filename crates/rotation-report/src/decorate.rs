//! Cell styling, kept apart from the layout.

use rotation_model::Status;
use rust_xlsxwriter::{Color, Format, FormatAlign};

use crate::layout::Cell;

/// Styles header rows and data cells of a report region.
pub trait SheetDecorator {
    /// Format of every header cell.
    fn header_format(&self) -> Format;

    /// Format of a data cell under `column`, or `None` for the default.
    fn cell_format(&self, column: &str, cell: &Cell) -> Option<Format>;
}

/// Header fill.
pub const HEADER_FILL: u32 = 0x4472C4;

/// The dashboard house style: blue headers, thousands separators and a
/// fill per status.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderDecorator;

impl HeaderDecorator {
    pub fn status_fill(status: Status) -> Option<u32> {
        match status {
            Status::DeadStock => Some(0xF4B183),
            Status::Urgent => Some(0xFF7C80),
            Status::ToOrder => Some(0xFFE699),
            Status::Blockbuster => Some(0xA9D08E),
            Status::Stable => None,
        }
    }

    fn number_format(column: &str) -> &'static str {
        match column {
            "ROTATION" => "0.00",
            "COUVERTURE" => "0.0",
            "P.VENTE" => "#,##0.00",
            _ => "#,##0",
        }
    }
}

impl SheetDecorator for HeaderDecorator {
    fn header_format(&self) -> Format {
        Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_align(FormatAlign::Center)
    }

    fn cell_format(&self, column: &str, cell: &Cell) -> Option<Format> {
        match cell {
            Cell::Integer(_) => Some(Format::new().set_num_format("#,##0")),
            Cell::Number(_) => Some(Format::new().set_num_format(Self::number_format(column))),
            Cell::Status(status) => Self::status_fill(*status)
                .map(|fill| Format::new().set_bold().set_background_color(Color::RGB(fill))),
            Cell::Text(_) => None,
        }
    }
}
