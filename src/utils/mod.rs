pub mod borg;
pub mod command;
pub mod mount;
pub mod prompt;
pub mod space;
