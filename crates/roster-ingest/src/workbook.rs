//! Schedule workbook loading and day-sheet extraction.
//!
//! A workbook holds one sheet per clinic day (sometimes several). The day
//! number lives somewhere in the sheet name ("21일", "7/21 월"); the cells
//! of interest sit in the column immediately to the right of a marker
//! column found in the header row.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use tracing::debug;

use roster_model::DaySheet;

use crate::error::{IngestError, Result};

/// Highest day number a sheet can be matched to.
const MAX_DAY: u8 = 31;

/// Row index of the header row within a sheet.
const HEADER_ROW: usize = 1;

/// An `.xlsx` workbook loaded into per-sheet string grids.
#[derive(Debug, Clone)]
pub struct ScheduleWorkbook {
    sheets: Vec<SheetGrid>,
}

#[derive(Debug, Clone)]
struct SheetGrid {
    name: String,
    rows: Vec<Vec<String>>,
}

impl ScheduleWorkbook {
    /// Loads every sheet of an `.xlsx` workbook into memory.
    ///
    /// # Errors
    ///
    /// Returns an error when the workbook cannot be opened or a sheet
    /// cannot be read.
    pub fn open(path: &Path) -> Result<Self> {
        let mut workbook: Xlsx<_> =
            open_workbook(path).map_err(|source| IngestError::WorkbookOpen {
                path: path.to_path_buf(),
                source,
            })?;
        let names = workbook.sheet_names().to_owned();
        let mut sheets = Vec::with_capacity(names.len());
        for name in names {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|source| IngestError::SheetRead {
                    sheet: name.clone(),
                    source,
                })?;
            // Ranges are anchored at their first used cell; pad back to
            // absolute coordinates so the header row index stays stable.
            let rows = match range.start() {
                Some((row_offset, col_offset)) => {
                    let mut rows: Vec<Vec<String>> = vec![Vec::new(); row_offset as usize];
                    for row in range.rows() {
                        let mut cells = vec![String::new(); col_offset as usize];
                        cells.extend(row.iter().map(cell_text));
                        rows.push(cells);
                    }
                    rows
                }
                None => Vec::new(),
            };
            sheets.push(SheetGrid { name, rows });
        }
        debug!(sheet_count = sheets.len(), "workbook loaded");
        Ok(Self { sheets })
    }

    /// Collects the raw cell stream for each day of the month.
    ///
    /// A sheet belongs to a day when one of the maximal digit runs in its
    /// name equals the day number; days are scanned ascending and each
    /// sheet is claimed at most once, so "21일" feeds day 21 and never
    /// days 2 or 1. Days with no matching sheet, or whose sheets lack the
    /// marker column, yield no batch.
    pub fn day_sheets(&self, marker: &str) -> Vec<DaySheet> {
        let mut claimed = vec![false; self.sheets.len()];
        let mut batches = Vec::new();
        for day in 1..=MAX_DAY {
            let mut sheets = Vec::new();
            let mut cells = Vec::new();
            for (idx, sheet) in self.sheets.iter().enumerate() {
                if claimed[idx] || !sheet_day_tokens(&sheet.name).contains(&day) {
                    continue;
                }
                claimed[idx] = true;
                match sheet.marker_cells(marker) {
                    Some(batch) => {
                        sheets.push(sheet.name.clone());
                        cells.extend(batch);
                    }
                    None => {
                        debug!(sheet = %sheet.name, day, "marker column missing, sheet skipped");
                    }
                }
            }
            if !sheets.is_empty() {
                batches.push(DaySheet { day, sheets, cells });
            }
        }
        batches
    }
}

impl SheetGrid {
    /// Returns the non-blank data cells right of the marker column, or
    /// `None` when the header row or marker column is missing.
    ///
    /// The marker is matched by substring against header cells; the data
    /// column must exist in the header row.
    fn marker_cells(&self, marker: &str) -> Option<Vec<String>> {
        let header = self.rows.get(HEADER_ROW)?;
        let marker_col = header.iter().position(|cell| cell.contains(marker))?;
        let data_col = marker_col + 1;
        if data_col >= header.len() {
            return None;
        }
        let cells = self
            .rows
            .iter()
            .skip(HEADER_ROW + 1)
            .filter_map(|row| row.get(data_col))
            .filter(|cell| !cell.is_empty())
            .cloned()
            .collect();
        Some(cells)
    }
}

/// Renders one cell as trimmed text.
///
/// Floats holding whole numbers print without the trailing fraction so
/// numeric chart-number cells read back as typed.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.trim().to_string(),
        Data::Float(value) if value.fract() == 0.0 => format!("{}", *value as i64),
        other => other.to_string().trim().to_string(),
    }
}

/// Maximal digit runs in a sheet name, parsed as day numbers.
///
/// Runs outside 1-31 (years, zero) are dropped.
fn sheet_day_tokens(name: &str) -> Vec<u8> {
    let mut tokens = Vec::new();
    let mut digits = String::new();
    for ch in name.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
        } else {
            push_day_token(&mut tokens, &mut digits);
        }
    }
    push_day_token(&mut tokens, &mut digits);
    tokens
}

fn push_day_token(tokens: &mut Vec<u8>, digits: &mut String) {
    if digits.is_empty() {
        return;
    }
    if let Ok(day) = digits.parse::<u8>() {
        if (1..=MAX_DAY).contains(&day) {
            tokens.push(day);
        }
    }
    digits.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(name: &str, rows: &[&[&str]]) -> SheetGrid {
        SheetGrid {
            name: name.to_string(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
                .collect(),
        }
    }

    fn schedule_rows(cells: &[&str]) -> Vec<Vec<String>> {
        let mut rows = vec![
            vec!["7월 일정".to_string()],
            vec!["시간".to_string(), "편현준".to_string(), "비고".to_string()],
        ];
        for cell in cells {
            rows.push(vec![
                "09:00".to_string(),
                String::new(),
                (*cell).to_string(),
            ]);
        }
        rows
    }

    #[test]
    fn day_tokens_match_exact_numbers_only() {
        assert_eq!(sheet_day_tokens("21일"), vec![21]);
        assert_eq!(sheet_day_tokens("7월 21일"), vec![7, 21]);
        assert_eq!(sheet_day_tokens("1"), vec![1]);
        assert!(sheet_day_tokens("직원 명단").is_empty());
        // Out-of-range runs are not day tokens.
        assert!(sheet_day_tokens("2024년").is_empty());
        assert!(sheet_day_tokens("0").is_empty());
        assert!(sheet_day_tokens("32일").is_empty());
    }

    #[test]
    fn marker_cells_read_column_right_of_marker() {
        let sheet = SheetGrid {
            name: "3일".to_string(),
            rows: schedule_rows(&["1234 김철수 도수5", "", "철수 simple"]),
        };
        assert_eq!(
            sheet.marker_cells("편현준"),
            Some(vec![
                "1234 김철수 도수5".to_string(),
                "철수 simple".to_string(),
            ])
        );
    }

    #[test]
    fn marker_cells_handle_missing_header_or_marker() {
        let no_header = grid("3일", &[&["only one row"]]);
        assert!(no_header.marker_cells("편현준").is_none());

        let no_marker = grid("3일", &[&["제목"], &["시간", "다른사람", "비고"]]);
        assert!(no_marker.marker_cells("편현준").is_none());

        // Marker in the last header column: no column to its right.
        let marker_last = grid("3일", &[&["제목"], &["시간", "편현준"]]);
        assert!(marker_last.marker_cells("편현준").is_none());
    }

    #[test]
    fn marker_matches_header_by_substring() {
        let sheet = grid(
            "3일",
            &[&["제목"], &["시간", "치료사 편현준", "비고"], &["", "", "철수 도수5"]],
        );
        assert_eq!(
            sheet.marker_cells("편현준"),
            Some(vec!["철수 도수5".to_string()])
        );
    }

    #[test]
    fn sheets_are_claimed_by_exact_day_once() {
        let workbook = ScheduleWorkbook {
            sheets: vec![
                SheetGrid {
                    name: "1일".to_string(),
                    rows: schedule_rows(&["철수 도수5"]),
                },
                SheetGrid {
                    name: "21일".to_string(),
                    rows: schedule_rows(&["영희 도수8"]),
                },
            ],
        };
        let days = workbook.day_sheets("편현준");
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day, 1);
        assert_eq!(days[0].cells, vec!["철수 도수5".to_string()]);
        assert_eq!(days[1].day, 21);
        assert_eq!(days[1].cells, vec!["영희 도수8".to_string()]);
    }

    #[test]
    fn multi_token_sheet_goes_to_lowest_matching_day() {
        let workbook = ScheduleWorkbook {
            sheets: vec![SheetGrid {
                name: "7월 21일".to_string(),
                rows: schedule_rows(&["철수 도수5"]),
            }],
        };
        let days = workbook.day_sheets("편현준");
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].day, 7);
    }

    #[test]
    fn several_sheets_can_feed_one_day() {
        let workbook = ScheduleWorkbook {
            sheets: vec![
                SheetGrid {
                    name: "3일 오전".to_string(),
                    rows: schedule_rows(&["철수 도수5"]),
                },
                SheetGrid {
                    name: "3일 오후".to_string(),
                    rows: schedule_rows(&["영희 도수8"]),
                },
            ],
        };
        let days = workbook.day_sheets("편현준");
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].sheets.len(), 2);
        assert_eq!(
            days[0].cells,
            vec!["철수 도수5".to_string(), "영희 도수8".to_string()]
        );
    }

    #[test]
    fn markerless_sheet_contributes_nothing() {
        let workbook = ScheduleWorkbook {
            sheets: vec![SheetGrid {
                name: "3일".to_string(),
                rows: vec![vec!["제목".to_string()]],
            }],
        };
        assert!(workbook.day_sheets("편현준").is_empty());
    }

    #[test]
    fn whole_number_cells_render_without_fraction() {
        assert_eq!(cell_text(&Data::Float(1234.0)), "1234");
        assert_eq!(cell_text(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("  철수 도수5 ".to_string())), "철수 도수5");
    }
}
