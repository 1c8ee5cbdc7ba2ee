pub mod phrase;
pub mod request;
pub mod skeleton;
pub mod verb;
pub mod word;
