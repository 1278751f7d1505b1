mod analysis;
mod audio;
mod error;
mod prompt;
mod speech;
mod transport;
pub mod wire;

pub use analysis::AnalysisClient;
pub use audio::AudioClip;
pub use error::{AnalysisError, SpeechError, TransportError};
pub use prompt::{JSON_DIRECTIVE, analysis_prompt};
pub use speech::SpeechClient;
pub use transport::{ReqwestTransport, Transport};
