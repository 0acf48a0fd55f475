pub mod health;
pub mod spaces;
