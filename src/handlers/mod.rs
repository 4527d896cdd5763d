pub mod check_ins;
pub mod dashboard;
pub mod health;
