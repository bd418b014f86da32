pub mod course;
pub mod preference;
pub mod role;
