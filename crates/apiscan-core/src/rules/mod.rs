pub mod advisory;
pub mod catalog;
pub mod eval;
pub mod gate;
pub mod performance;
pub mod recommend;
pub mod score;
pub mod security;
pub mod text;
