pub mod dispatch;
pub mod extract;
pub mod kb;
pub mod run;
pub mod shared;
pub mod simulate;
