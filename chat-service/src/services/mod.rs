pub mod chat;
pub mod instructions;
pub mod metrics;
pub mod providers;

pub use chat::ChatService;
pub use instructions::{InstructionLoader, InstructionSource, SystemInstruction};
