use zappy_types::ResourceKind;

/// A parsed GUI query line (§4.6, §6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuiRequest {
    Msz,
    Bct { x: i32, y: i32 },
    Mct,
    Tna,
    Ppo { id: u32 },
    Plv { id: u32 },
    Pin { id: u32 },
    Sgt,
    Sst { freq: u32 },
}

/// Outcome of parsing a GUI line that isn't a well-formed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuiParseError {
    /// Known verb, malformed or missing argument → `sbp`.
    BadParameter,
    /// Unrecognized verb → `suc`.
    UnknownCommand,
}

pub fn parse_gui_request(line: &str) -> Result<GuiRequest, GuiParseError> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or("");

    match verb {
        "msz" => Ok(GuiRequest::Msz),
        "mct" => Ok(GuiRequest::Mct),
        "tna" => Ok(GuiRequest::Tna),
        "sgt" => Ok(GuiRequest::Sgt),
        "bct" => {
            let x = parts.next().and_then(|v| v.parse().ok());
            let y = parts.next().and_then(|v| v.parse().ok());
            match (x, y) {
                (Some(x), Some(y)) => Ok(GuiRequest::Bct { x, y }),
                _ => Err(GuiParseError::BadParameter),
            }
        }
        "ppo" | "plv" | "pin" => {
            let id = parse_player_ref(parts.next()).ok_or(GuiParseError::BadParameter)?;
            Ok(match verb {
                "ppo" => GuiRequest::Ppo { id },
                "plv" => GuiRequest::Plv { id },
                _ => GuiRequest::Pin { id },
            })
        }
        "sst" => {
            let freq = parts.next().and_then(|v| v.parse().ok()).ok_or(GuiParseError::BadParameter)?;
            Ok(GuiRequest::Sst { freq })
        }
        _ => Err(GuiParseError::UnknownCommand),
    }
}

fn parse_player_ref(token: Option<&str>) -> Option<u32> {
    let token = token?.strip_prefix('#')?;
    token.parse().ok()
}

/// Any outbound line to a GUI spectator: a reply to a query, a
/// server-initiated notification, or an error (§4.6, §6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuiMessage {
    Msz { width: u32, height: u32 },
    Bct { x: i32, y: i32, counts: [u32; ResourceKind::COUNT] },
    Tna { team_name: String },
    Ppo { id: u32, x: u32, y: u32, orientation_wire: u8 },
    Plv { id: u32, level: u8 },
    Pin { id: u32, x: u32, y: u32, counts: [u32; ResourceKind::COUNT] },
    Sgt { freq: u32 },
    Sst { freq: u32 },
    Pnw { id: u32, x: u32, y: u32, orientation_wire: u8, level: u8, team_name: String },
    Pex { id: u32 },
    Pbc { id: u32, text: String },
    Pic { x: u32, y: u32, level: u8, participant_ids: Vec<u32> },
    Pie { x: u32, y: u32, success: bool },
    Pfk { id: u32 },
    Pdr { id: u32, resource_id: usize },
    Pgt { id: u32, resource_id: usize },
    Pdi { id: u32 },
    Enw { egg_id: u32, player_id: u32, x: u32, y: u32 },
    Seg { team_name: String },
    Smg { text: String },
    Sbp,
    Suc,
}

impl GuiMessage {
    pub fn to_line(&self) -> String {
        match self {
            GuiMessage::Msz { width, height } => format!("msz {width} {height}\n"),
            GuiMessage::Bct { x, y, counts } => {
                format!("bct {x} {y} {}\n", join_counts(counts))
            }
            GuiMessage::Tna { team_name } => format!("tna {team_name}\n"),
            GuiMessage::Ppo { id, x, y, orientation_wire } => {
                format!("ppo #{id} {x} {y} {orientation_wire}\n")
            }
            GuiMessage::Plv { id, level } => format!("plv #{id} {level}\n"),
            GuiMessage::Pin { id, x, y, counts } => {
                format!("pin #{id} {x} {y} {}\n", join_counts(counts))
            }
            GuiMessage::Sgt { freq } => format!("sgt {freq}\n"),
            GuiMessage::Sst { freq } => format!("sst {freq}\n"),
            GuiMessage::Pnw { id, x, y, orientation_wire, level, team_name } => {
                format!("pnw #{id} {x} {y} {orientation_wire} {level} {team_name}\n")
            }
            GuiMessage::Pex { id } => format!("pex #{id}\n"),
            GuiMessage::Pbc { id, text } => format!("pbc #{id} {text}\n"),
            GuiMessage::Pic { x, y, level, participant_ids } => {
                let ids = participant_ids
                    .iter()
                    .map(|id| format!("#{id}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("pic {x} {y} {level} {ids}\n")
            }
            GuiMessage::Pie { x, y, success } => {
                format!("pie {x} {y} {}\n", if *success { 1 } else { 0 })
            }
            GuiMessage::Pfk { id } => format!("pfk #{id}\n"),
            GuiMessage::Pdr { id, resource_id } => format!("pdr #{id} {resource_id}\n"),
            GuiMessage::Pgt { id, resource_id } => format!("pgt #{id} {resource_id}\n"),
            GuiMessage::Pdi { id } => format!("pdi #{id}\n"),
            GuiMessage::Enw { egg_id, player_id, x, y } => {
                format!("enw #{egg_id} #{player_id} {x} {y}\n")
            }
            GuiMessage::Seg { team_name } => format!("seg {team_name}\n"),
            GuiMessage::Smg { text } => format!("smg {text}\n"),
            GuiMessage::Sbp => "sbp\n".to_string(),
            GuiMessage::Suc => "suc\n".to_string(),
        }
    }
}

fn join_counts(counts: &[u32; ResourceKind::COUNT]) -> String {
    counts
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bct_with_coordinates() {
        assert_eq!(parse_gui_request("bct 1 2"), Ok(GuiRequest::Bct { x: 1, y: 2 }));
    }

    #[test]
    fn bct_without_args_is_bad_parameter() {
        assert_eq!(parse_gui_request("bct"), Err(GuiParseError::BadParameter));
    }

    #[test]
    fn unknown_verb_is_unknown_command() {
        assert_eq!(parse_gui_request("xyz"), Err(GuiParseError::UnknownCommand));
    }

    #[test]
    fn ppo_requires_hash_prefixed_id() {
        assert_eq!(parse_gui_request("ppo #3"), Ok(GuiRequest::Ppo { id: 3 }));
        assert_eq!(parse_gui_request("ppo 3"), Err(GuiParseError::BadParameter));
    }

    #[test]
    fn bct_line_has_seven_counts() {
        let msg = GuiMessage::Bct { x: 0, y: 0, counts: [1, 0, 0, 0, 0, 0, 2] };
        assert_eq!(msg.to_line(), "bct 0 0 1 0 0 0 0 0 2\n");
    }
}
