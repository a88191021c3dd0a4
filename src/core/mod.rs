pub mod balance;
pub mod expense;
pub mod money;
pub mod person;
pub mod settlement;
