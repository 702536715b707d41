pub use tempo_core::*;
