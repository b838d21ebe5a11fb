pub mod action;
pub mod persona;
pub mod registro;
pub mod report;
