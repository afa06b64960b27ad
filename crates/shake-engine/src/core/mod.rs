pub mod machine;
pub mod time;
