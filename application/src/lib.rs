//! Application layer for streamchat
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ChatBehavior;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    file_store::{FileAck, FileStoreError, FileStorePort},
    surface::{ChatSurface, NoSurface, SurfaceNotice},
    transport::{
        ChatTransport, SendOutcome, TransportError, TransportEvent, TransportEventReceiver,
        TransportEventSender, transport_event_channel,
    },
};
pub use use_cases::accumulator::{AccumulateOutcome, StreamingAccumulator};
pub use use_cases::chat_session::ChatSession;
pub use use_cases::manage_files::{FileChange, ManageFilesUseCase};
pub use use_cases::transcript_store::TranscriptStore;
pub use use_cases::turn_controller::{SubmitError, SubmitOutcome, TurnController};
