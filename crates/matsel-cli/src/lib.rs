pub mod recommend;
pub mod train;
