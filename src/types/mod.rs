pub mod station;
pub mod variable;
pub mod year_value;
