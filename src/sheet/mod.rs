//! Tabular encoding of rating sheets and game sheets
//!
//! Sheets are CSV documents whose first row is a header. Data starts on the
//! second row and ends at the first fully blank row.

pub mod reader;
pub mod writer;

pub use reader::{read_game_records, read_participants, MAX_DATA_ROWS};
pub use writer::{
    example_game_sheet, example_rating_sheet, output_file_name, participants_to_bytes,
    write_participants,
};
