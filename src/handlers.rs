pub mod categories;
pub mod health;
pub mod index;
pub mod locations;
pub mod predict;
