pub mod ambient;
pub mod scenario;

#[cfg(test)]
mod integration;
