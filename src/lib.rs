pub mod codec;
pub mod config;
pub mod cpg;
pub mod error;
pub mod handlers;
pub mod predict;
pub mod scale;
pub mod sequence;
pub mod types;
pub mod validate;

pub use codec::ContentCodec;
pub use config::Config;
pub use error::{Error, Result};
pub use predict::PREDICTOR_NAME;
