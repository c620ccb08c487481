pub mod electrical;
pub mod fuel;
pub mod overhead;
pub mod shared;
pub mod simulation;
pub mod turbine;
