pub mod allergen;
pub mod food;
pub mod health;
pub mod profile;
pub mod recommendation;
pub mod scan;
pub mod server;

#[cfg(test)]
mod tests;
