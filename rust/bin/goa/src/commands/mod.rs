pub mod exports;
pub mod generate;
