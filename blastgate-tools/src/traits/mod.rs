pub mod runner;

pub use runner::SearchRunner;
