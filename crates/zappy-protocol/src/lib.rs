pub mod ai;
pub mod error;
pub mod gui;
pub mod line_codec;

pub use ai::{parse_ai_command, AiCommand, AiReply};
pub use error::ProtocolError;
pub use gui::{parse_gui_request, GuiMessage, GuiParseError, GuiRequest};
pub use line_codec::LineCodec;
