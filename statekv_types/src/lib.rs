pub mod serde;
pub mod types;

#[cfg(test)]
mod proptest;
