pub mod gemini;

pub use gemini::GeminiNamer;
