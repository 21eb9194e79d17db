use crate::state::GameState;
use zappy_protocol::{GuiMessage, GuiRequest};

/// Answer one GUI query against current state (§4.6, §6). A query can
/// expand into more than one line (`mct` is one `bct` per tile, `tna` is
/// one line per team); parse errors are handled by the caller. `sst` is the
/// one request that mutates state, updating the server's tick frequency.
pub fn handle_request(state: &mut GameState, request: GuiRequest) -> Vec<GuiMessage> {
    match request {
        GuiRequest::Msz => vec![GuiMessage::Msz { width: state.world.width(), height: state.world.height() }],
        GuiRequest::Bct { x, y } => {
            let pos = state.world.wrap(x, y);
            vec![GuiMessage::Bct { x: pos.x as i32, y: pos.y as i32, counts: *state.world.tile(pos).resources() }]
        }
        GuiRequest::Mct => state
            .world
            .tiles()
            .map(|(pos, tile)| GuiMessage::Bct { x: pos.x as i32, y: pos.y as i32, counts: *tile.resources() })
            .collect(),
        GuiRequest::Tna => state.teams.iter().map(|t| GuiMessage::Tna { team_name: t.name.clone() }).collect(),
        GuiRequest::Ppo { id } => vec![match state.players.get(id) {
            Some(p) => GuiMessage::Ppo { id, x: p.position.x, y: p.position.y, orientation_wire: p.orientation.to_wire() },
            None => GuiMessage::Suc,
        }],
        GuiRequest::Plv { id } => vec![match state.players.get(id) {
            Some(p) => GuiMessage::Plv { id, level: p.level },
            None => GuiMessage::Suc,
        }],
        GuiRequest::Pin { id } => vec![match state.players.get(id) {
            Some(p) => GuiMessage::Pin { id, x: p.position.x, y: p.position.y, counts: *p.inventory() },
            None => GuiMessage::Suc,
        }],
        GuiRequest::Sgt => vec![GuiMessage::Sgt { freq: state.freq }],
        GuiRequest::Sst { freq } => {
            state.freq = freq;
            vec![GuiMessage::Sst { freq }]
        }
    }
}

/// The full set of lines sent to a GUI client immediately upon
/// identification, in the exact order required by §4.6.
pub fn initial_handshake(state: &GameState) -> Vec<GuiMessage> {
    let mut lines = Vec::new();
    lines.push(GuiMessage::Msz { width: state.world.width(), height: state.world.height() });
    for (pos, tile) in state.world.tiles() {
        lines.push(GuiMessage::Bct { x: pos.x as i32, y: pos.y as i32, counts: *tile.resources() });
    }
    for team in &state.teams {
        lines.push(GuiMessage::Tna { team_name: team.name.clone() });
    }
    for player in state.players.iter() {
        lines.push(GuiMessage::Pnw {
            id: player.id,
            x: player.position.x,
            y: player.position.y,
            orientation_wire: player.orientation.to_wire(),
            level: player.level,
            team_name: player.team_name.clone(),
        });
        lines.push(GuiMessage::Ppo { id: player.id, x: player.position.x, y: player.position.y, orientation_wire: player.orientation.to_wire() });
        lines.push(GuiMessage::Plv { id: player.id, level: player.level });
        lines.push(GuiMessage::Pin { id: player.id, x: player.position.x, y: player.position.y, counts: *player.inventory() });
    }
    lines.push(GuiMessage::Sgt { freq: state.freq });
    lines
}
