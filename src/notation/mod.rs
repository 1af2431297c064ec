pub mod reader;

pub use reader::{parse_arrows, read_arrows, read_arrows_file, read_ends};
