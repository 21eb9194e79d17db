use crate::error::ProtocolError;
use zappy_types::{CommandKind, ResourceKind};

/// A parsed AI command, verb plus argument when the verb takes one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiCommand {
    Forward,
    Right,
    Left,
    Look,
    Inventory,
    Take(ResourceKind),
    Set(ResourceKind),
    Eject,
    Broadcast(String),
    Incantation,
    Fork,
    ConnectNbr,
}

impl AiCommand {
    pub fn kind(&self) -> CommandKind {
        match self {
            AiCommand::Forward => CommandKind::Forward,
            AiCommand::Right => CommandKind::Right,
            AiCommand::Left => CommandKind::Left,
            AiCommand::Look => CommandKind::Look,
            AiCommand::Inventory => CommandKind::Inventory,
            AiCommand::Take(_) => CommandKind::Take,
            AiCommand::Set(_) => CommandKind::Set,
            AiCommand::Eject => CommandKind::Eject,
            AiCommand::Broadcast(_) => CommandKind::Broadcast,
            AiCommand::Incantation => CommandKind::Incantation,
            AiCommand::Fork => CommandKind::Fork,
            AiCommand::ConnectNbr => CommandKind::ConnectNbr,
        }
    }
}

/// Parse one line of AI command text. The line has already been truncated
/// to `MAX_COMMAND_LEN` bytes by the connection layer (§3 "Action").
pub fn parse_ai_command(line: &str) -> Result<AiCommand, ProtocolError> {
    let mut parts = line.splitn(2, ' ');
    let verb = parts.next().unwrap_or("");
    let rest = parts.next();

    match verb {
        "Forward" => Ok(AiCommand::Forward),
        "Right" => Ok(AiCommand::Right),
        "Left" => Ok(AiCommand::Left),
        "Look" => Ok(AiCommand::Look),
        "Inventory" => Ok(AiCommand::Inventory),
        "Eject" => Ok(AiCommand::Eject),
        "Incantation" => Ok(AiCommand::Incantation),
        "Fork" => Ok(AiCommand::Fork),
        "Connect_nbr" => Ok(AiCommand::ConnectNbr),
        "Take" => parse_resource_arg(rest).map(AiCommand::Take),
        "Set" => parse_resource_arg(rest).map(AiCommand::Set),
        "Broadcast" => {
            let text = rest.unwrap_or("");
            if text.is_empty() {
                Err(ProtocolError::EmptyBroadcastText)
            } else {
                Ok(AiCommand::Broadcast(text.to_string()))
            }
        }
        other => Err(ProtocolError::UnknownVerb(other.to_string())),
    }
}

fn parse_resource_arg(rest: Option<&str>) -> Result<ResourceKind, ProtocolError> {
    let arg = rest.ok_or(ProtocolError::MissingArgument("resource"))?;
    ResourceKind::from_name(arg.trim()).ok_or_else(|| ProtocolError::InvalidResource(arg.to_string()))
}

/// A reply or unsolicited line sent to an AI client. All lines are
/// newline-terminated on the wire (§6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiReply {
    Ok,
    Ko,
    /// Pre-formatted payload, used for Look/Inventory bracketed lists.
    Raw(String),
    ElevationUnderway,
    CurrentLevel(u8),
    EjectNotice { arrival_direction: u8 },
    Message { sector: u8, text: String },
    FreeSlots(u32),
}

impl AiReply {
    pub fn to_line(&self) -> String {
        match self {
            AiReply::Ok => "ok\n".to_string(),
            AiReply::Ko => "ko\n".to_string(),
            AiReply::Raw(s) => format!("{s}\n"),
            AiReply::ElevationUnderway => "Elevation underway\n".to_string(),
            AiReply::CurrentLevel(level) => format!("Current level: {level}\n"),
            AiReply::EjectNotice { arrival_direction } => format!("eject: {arrival_direction}\n"),
            AiReply::Message { sector, text } => format!("message {sector}, {text}\n"),
            AiReply::FreeSlots(n) => format!("{n}\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_verbs() {
        assert_eq!(parse_ai_command("Forward"), Ok(AiCommand::Forward));
        assert_eq!(parse_ai_command("Connect_nbr"), Ok(AiCommand::ConnectNbr));
    }

    #[test]
    fn parses_take_with_resource() {
        assert_eq!(
            parse_ai_command("Take linemate"),
            Ok(AiCommand::Take(ResourceKind::Linemate))
        );
    }

    #[test]
    fn rejects_take_without_resource() {
        assert!(parse_ai_command("Take").is_err());
    }

    #[test]
    fn rejects_unknown_verb() {
        assert_eq!(
            parse_ai_command("Dance"),
            Err(ProtocolError::UnknownVerb("Dance".to_string()))
        );
    }

    #[test]
    fn rejects_empty_broadcast() {
        assert_eq!(parse_ai_command("Broadcast"), Err(ProtocolError::EmptyBroadcastText));
    }

    #[test]
    fn broadcast_keeps_spaces_in_text() {
        assert_eq!(
            parse_ai_command("Broadcast hello world"),
            Ok(AiCommand::Broadcast("hello world".to_string()))
        );
    }
}
