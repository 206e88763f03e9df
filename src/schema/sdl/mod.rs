mod finalizers;

#[cfg(test)]
mod tests;

pub mod error;
pub mod parser;

pub use parser::ParseSdl;
