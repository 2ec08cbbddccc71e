pub mod assistant;
pub mod attendance;
pub mod backup_exchange;
pub mod classes;
pub mod core;
pub mod grades;
pub mod reports;
pub mod schedule;
pub mod settings;
pub mod students;
pub mod tasks;
