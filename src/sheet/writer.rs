//! Rating sheet writer

use crate::error::Result;
use crate::rating::rank_participants;
use crate::types::{Participant, GAME_COLUMN_TITLES, PARTICIPANT_COLUMN_TITLES};
use chrono::{DateTime, TimeZone};
use csv::WriterBuilder;
use std::io::Write;

/// Write participants as a rating sheet, highest rating first
pub fn write_participants<W: Write>(output: W, participants: &[Participant]) -> Result<()> {
    let mut ranked = participants.to_vec();
    rank_participants(&mut ranked);

    let mut writer = WriterBuilder::new().from_writer(output);
    writer.write_record(PARTICIPANT_COLUMN_TITLES)?;
    for participant in &ranked {
        writer.write_record(participant.to_row())?;
    }
    writer.flush()?;

    Ok(())
}

/// Render participants into an in-memory rating sheet
pub fn participants_to_bytes(participants: &[Participant]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_participants(&mut buffer, participants)?;
    Ok(buffer)
}

/// Template rating sheet showing the expected layout
pub fn example_rating_sheet() -> Result<Vec<u8>> {
    participants_to_bytes(&[
        Participant::new("Марк", 1550, 10),
        Participant::new("Регина", 1500, 4),
        Participant::new("Александр", 1450, 7),
    ])
}

/// Template game sheet showing the expected layout
pub fn example_game_sheet() -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(GAME_COLUMN_TITLES)?;
    writer.write_record(["Марк", "Александр", "1", "0"])?;
    writer.write_record(["Регина", "Александр", "0.5", "0.5"])?;

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish example game sheet: {}", e))
}

/// File name for a result sheet created at `created_at`
pub fn output_file_name<Tz: TimeZone>(created_at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("player-rating-{}.csv", created_at.format("%Y-%m-%d %H-%M"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_write_participants_sorted_with_header() {
        let participants = vec![
            Participant::new("Марк", 1450, 2),
            Participant::new("Регина", 1551, 2),
        ];
        let bytes = participants_to_bytes(&participants).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Имя,Рейтинг,Кол-во игр");
        assert_eq!(lines[1], "Регина,1551,2");
        assert_eq!(lines[2], "Марк,1450,2");
    }

    #[test]
    fn test_example_sheets_are_readable() {
        let participants =
            crate::sheet::read_participants(example_rating_sheet().unwrap().as_slice()).unwrap();
        assert_eq!(participants.len(), 3);
        assert_eq!(participants[0].name, "Марк");

        let games = crate::sheet::read_game_records(example_game_sheet().unwrap().as_slice()).unwrap();
        assert_eq!(games.len(), 2);
    }

    #[test]
    fn test_output_file_name() {
        let created_at = Utc.with_ymd_and_hms(2025, 2, 7, 18, 30, 0).unwrap();
        assert_eq!(
            output_file_name(&created_at),
            "player-rating-2025-02-07 18-30.csv"
        );
        assert!(!output_file_name(&created_at).contains(':'));
    }
}
