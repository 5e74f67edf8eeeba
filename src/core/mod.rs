pub mod aligner;
pub mod axis;
pub mod collector;
pub mod command;
pub mod compositor;
pub mod normalizer;
pub mod relay;
pub mod render;
pub mod smoother;
pub mod snapshot;
pub mod status;
