pub mod role;
pub mod user;
pub mod variable;
