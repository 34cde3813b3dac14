//! Rating sheet and game sheet readers

use crate::error::{LadderError, Result};
use crate::types::{GameRecord, Participant, PARTICIPANT_COLUMN_TITLES};
use anyhow::Context;
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use tracing::{debug, warn};

/// Data rows considered after the header (sheet rows 2..=10_000)
pub const MAX_DATA_ROWS: usize = 9_999;

fn csv_reader<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input)
}

fn is_blank_row(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

/// Collect data rows up to the first fully blank row
fn data_rows<R: Read>(input: R) -> Result<Vec<StringRecord>> {
    let mut reader = csv_reader(input);
    let mut rows = Vec::new();

    for (index, record) in reader.records().enumerate() {
        if index >= MAX_DATA_ROWS {
            warn!("Sheet has more than {} data rows, ignoring the rest", MAX_DATA_ROWS);
            break;
        }

        let record = record.with_context(|| format!("Failed to read sheet row {}", index + 2))?;
        if is_blank_row(&record) {
            break;
        }
        rows.push(record);
    }

    Ok(rows)
}

fn row_cells(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}

/// Parse a rating cell, accepting integral decimals such as `1500.0`.
///
/// Decimals outside the `i64` range are rejected rather than clamped.
fn parse_rating(cell: &str) -> Option<i64> {
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0; // 2^63

    let cell = cell.trim();
    cell.parse::<i64>().ok().or_else(|| {
        cell.parse::<f64>()
            .ok()
            .filter(|value| value.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(value))
            .map(|value| value as i64)
    })
}

/// Read known participants from a rating sheet.
///
/// Rows with a blank name are skipped. A blank game count reads as zero.
pub fn read_participants<R: Read>(input: R) -> Result<Vec<Participant>> {
    let mut participants = Vec::new();

    for record in data_rows(input)? {
        let name = record.get(0).unwrap_or_default().trim();
        if name.is_empty() {
            debug!("Skipping rating row without a name: {:?}", record);
            continue;
        }

        let rating_cell = record.get(1).unwrap_or_default();
        let rating = parse_rating(rating_cell).ok_or_else(|| LadderError::InvalidParticipantRow {
            row: row_cells(&record),
            reason: format!(
                "{} '{}' is not an integer",
                PARTICIPANT_COLUMN_TITLES[1], rating_cell
            ),
        })?;

        let count_cell = record.get(2).unwrap_or_default().trim();
        let game_count = if count_cell.is_empty() {
            0
        } else {
            parse_rating(count_cell)
                .and_then(|count| u32::try_from(count).ok())
                .ok_or_else(|| LadderError::InvalidParticipantRow {
                    row: row_cells(&record),
                    reason: format!(
                        "{} '{}' is not a non-negative integer",
                        PARTICIPANT_COLUMN_TITLES[2], count_cell
                    ),
                })?
        };

        participants.push(Participant::new(name, rating, game_count));
    }

    debug!("Read {} participants from rating sheet", participants.len());
    Ok(participants)
}

/// Read game records from a game sheet.
///
/// The whole sheet is decoded before anything is returned, so one malformed
/// row fails the batch.
pub fn read_game_records<R: Read>(input: R) -> Result<Vec<GameRecord>> {
    let games = data_rows(input)?
        .iter()
        .map(|record| {
            let mut cells = row_cells(record);
            // Spreadsheet exports pad rows with empty trailing cells
            while cells.len() > GameRecord::ROW_LEN
                && cells.last().is_some_and(|cell| cell.trim().is_empty())
            {
                cells.pop();
            }
            GameRecord::from_row(&cells)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Read {} game records from game sheet", games.len());
    Ok(games)
}
