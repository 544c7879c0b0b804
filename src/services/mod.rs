pub mod booking;
pub mod dates;
pub mod prompts;
pub mod tools;
