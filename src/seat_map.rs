// Rows front to back, each split at the aisle into A-C and D-F.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::Serialize;

use crate::models::seat::{Seat, SeatClass};
use crate::utils::error::{AppError, AppResult};
use crate::utils::format;

pub const SEAT_COLUMNS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];
pub const EXIT_ROW: u32 = 12;

const LAST_FIRST_CLASS_ROW: u32 = 3;
const LAST_BUSINESS_ROW: u32 = 8;

pub fn band_for_row(row: u32) -> SeatClass {
    if row <= LAST_FIRST_CLASS_ROW {
        SeatClass::First
    } else if row <= LAST_BUSINESS_ROW {
        SeatClass::Business
    } else {
        SeatClass::Economy
    }
}

fn column_index(seat: &Seat) -> usize {
    seat.column()
        .and_then(|column| SEAT_COLUMNS.iter().position(|c| *c == column))
        .unwrap_or(SEAT_COLUMNS.len())
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SeatView {
    #[serde(flatten)]
    pub seat: Seat,
    pub column: String,
    pub price: String,
    pub premium: Option<String>,
    pub description: String,
}

impl SeatView {
    fn new(seat: Seat, base_price: Decimal) -> Self {
        SeatView {
            column: seat.column().map(String::from).unwrap_or_default(),
            price: format::format_price(seat.price_for(base_price)),
            premium: format::premium_percent(seat.price_modifier),
            description: seat.description(),
            seat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SeatRow {
    pub number: u32,
    pub band: SeatClass,
    /// Set on the first row of each band, e.g. "Business Class" on row 4.
    pub section_header: Option<String>,
    pub is_exit_row: bool,
    /// A, B, C in that order (missing seats are simply absent)
    pub left: Vec<SeatView>,
    /// D, E, F in that order
    pub right: Vec<SeatView>,
}

impl SeatRow {
    pub fn seats(&self) -> impl Iterator<Item = &SeatView> {
        self.left.iter().chain(self.right.iter())
    }
}

// Seat whose stored class disagrees with its row band
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ClassMismatch {
    pub seat_number: String,
    pub stored: SeatClass,
    pub band: SeatClass,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SeatMap {
    pub rows: Vec<SeatRow>,
    pub class_mismatches: Vec<ClassMismatch>,
}

impl SeatMap {
    /// Lays out `seats` for a flight whose base fare is `base_price`.
    /// Seats whose number has no parseable row are left out.
    pub fn build(seats: Vec<Seat>, base_price: Decimal) -> Self {
        let mut by_row: BTreeMap<u32, Vec<Seat>> = BTreeMap::new();
        for seat in seats {
            match seat.row_number() {
                Some(row) => by_row.entry(row).or_default().push(seat),
                None => tracing::warn!(seat_number = %seat.seat_number, "skipping seat without a row number"),
            }
        }

        let mut rows = Vec::with_capacity(by_row.len());
        let mut class_mismatches = Vec::new();
        let mut previous_band = None;

        for (number, mut row_seats) in by_row {
            row_seats.sort_by_key(column_index);

            let band = band_for_row(number);
            let section_header = if previous_band != Some(band) {
                Some(band.label().to_string())
            } else {
                None
            };
            previous_band = Some(band);

            let is_exit_row = number == EXIT_ROW || row_seats.iter().any(|seat| seat.is_exit_row);

            for seat in row_seats.iter().filter(|seat| seat.seat_class != band) {
                class_mismatches.push(ClassMismatch {
                    seat_number: seat.seat_number.clone(),
                    stored: seat.seat_class,
                    band,
                });
            }

            let (left, right): (Vec<Seat>, Vec<Seat>) =
                row_seats.into_iter().partition(|seat| column_index(seat) < 3);

            rows.push(SeatRow {
                number,
                band,
                section_header,
                is_exit_row,
                left: left.into_iter().map(|seat| SeatView::new(seat, base_price)).collect(),
                right: right.into_iter().map(|seat| SeatView::new(seat, base_price)).collect(),
            });
        }

        if !class_mismatches.is_empty() {
            tracing::warn!(
                count = class_mismatches.len(),
                "stored seat classes disagree with the cabin row bands"
            );
        }

        SeatMap { rows, class_mismatches }
    }

    pub fn row(&self, number: u32) -> Option<&SeatRow> {
        self.rows.iter().find(|row| row.number == number)
    }

    pub fn find(&self, seat_number: &str) -> Option<&Seat> {
        self.rows
            .iter()
            .flat_map(SeatRow::seats)
            .map(|view| &view.seat)
            .find(|seat| seat.seat_number.eq_ignore_ascii_case(seat_number))
    }
}

/// Single-selection seat picker.
#[derive(Debug, Clone, Default)]
pub struct SeatPicker {
    selected: Option<Seat>,
}

impl SeatPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `seat`, replacing any earlier choice. Unavailable seats are
    /// ignored. Returns whether the selection changed.
    pub fn select(&mut self, seat: &Seat) -> bool {
        if !seat.is_available {
            return false;
        }
        self.selected = Some(seat.clone());
        true
    }

    pub fn selected(&self) -> Option<&Seat> {
        self.selected.as_ref()
    }

    pub fn confirm(&self) -> AppResult<&Seat> {
        self.selected
            .as_ref()
            .ok_or_else(|| AppError::ValidationError("select a seat to continue".into()))
    }
}
