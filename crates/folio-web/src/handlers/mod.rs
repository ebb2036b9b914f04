pub mod advanced;
pub mod extract;
pub mod health;
