pub mod writer;

pub use writer::write_handicap_tables_to_xlsx;
pub use writer::write_score_pad_to_xlsx;
