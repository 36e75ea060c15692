pub mod aggregate;
pub mod benchmark;
pub mod dashboard;
pub mod data_point;
pub mod exposure;
pub mod history;
pub mod pivot;
pub mod report_date;
pub mod settings;
pub mod value_field;
