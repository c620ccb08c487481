mod battery;
pub use battery::Battery;
