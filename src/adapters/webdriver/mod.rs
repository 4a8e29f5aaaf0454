pub mod client;
pub mod renderer;
