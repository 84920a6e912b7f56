pub mod bits;
pub mod core_api;
pub mod mii;
pub mod personality;
pub mod save;
pub mod text;

mod coded;
