pub mod construct;
pub mod inspect;
