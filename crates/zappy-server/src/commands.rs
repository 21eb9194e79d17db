use crate::state::GameState;
use zappy_protocol::{AiReply, GuiMessage};
use zappy_types::{eject_arrival_direction, Orientation, ResourceKind};
use zappy_world::incantation;

/// Every side effect one executed command can have, beyond its direct reply
/// to the acting player (§4.5, §9 "one executor table").
#[derive(Debug, Default)]
pub struct CommandOutcome {
    pub reply: Option<AiReply>,
    pub gui_events: Vec<GuiMessage>,
    /// Unsolicited lines delivered to other AI clients (eject notices,
    /// broadcast messages, incantation completions for co-participants).
    pub player_messages: Vec<(u32, AiReply)>,
}

impl CommandOutcome {
    fn ok(reply: AiReply) -> Self {
        Self { reply: Some(reply), ..Default::default() }
    }
}

pub fn forward(state: &mut GameState, player_id: u32) -> CommandOutcome {
    let Some(player) = state.players.get(player_id) else { return CommandOutcome::default() };
    let old_pos = player.position;
    let orientation = player.orientation;
    let new_pos = state.world.step(old_pos, orientation);

    state.world.tile_mut(old_pos).remove_occupant(player_id);
    state.world.tile_mut(new_pos).add_occupant(player_id);
    state.players.get_mut(player_id).unwrap().position = new_pos;

    let mut outcome = CommandOutcome::ok(AiReply::Ok);
    outcome.gui_events.push(GuiMessage::Ppo {
        id: player_id,
        x: new_pos.x,
        y: new_pos.y,
        orientation_wire: orientation.to_wire(),
    });
    outcome
}

pub fn turn_right(state: &mut GameState, player_id: u32) -> CommandOutcome {
    let Some(player) = state.players.get_mut(player_id) else { return CommandOutcome::default() };
    player.orientation = player.orientation.turn_right();
    reply_with_orientation(player_id, player.position, player.orientation)
}

pub fn turn_left(state: &mut GameState, player_id: u32) -> CommandOutcome {
    let Some(player) = state.players.get_mut(player_id) else { return CommandOutcome::default() };
    player.orientation = player.orientation.turn_left();
    reply_with_orientation(player_id, player.position, player.orientation)
}

fn reply_with_orientation(player_id: u32, pos: zappy_types::Position, orientation: Orientation) -> CommandOutcome {
    let mut outcome = CommandOutcome::ok(AiReply::Ok);
    outcome.gui_events.push(GuiMessage::Ppo {
        id: player_id,
        x: pos.x,
        y: pos.y,
        orientation_wire: orientation.to_wire(),
    });
    outcome
}

pub fn look(state: &GameState, player_id: u32) -> CommandOutcome {
    let Some(player) = state.players.get(player_id) else { return CommandOutcome::default() };
    let cone = state.world.look_cone(player.position, player.orientation, player.level);

    let mut tiles_rendered = Vec::new();
    for row in cone {
        for pos in row {
            let tile = state.world.tile(pos);
            let mut tokens: Vec<String> = tile.occupants().iter().map(|_| "player".to_string()).collect();
            for kind in ResourceKind::ALL {
                let count = tile.resource_count(kind);
                for _ in 0..count {
                    tokens.push(kind.name().to_string());
                }
            }
            tiles_rendered.push(tokens.join(" "));
        }
    }

    CommandOutcome::ok(AiReply::Raw(format!("[{}]", tiles_rendered.join(", "))))
}

pub fn inventory(state: &GameState, player_id: u32) -> CommandOutcome {
    let Some(player) = state.players.get(player_id) else { return CommandOutcome::default() };
    let items = ResourceKind::ALL
        .iter()
        .map(|kind| format!("{} {}", kind.name(), player.inventory_count(*kind)))
        .collect::<Vec<_>>()
        .join(", ");
    CommandOutcome::ok(AiReply::Raw(format!("[{items}]")))
}

pub fn take(state: &mut GameState, player_id: u32, kind: ResourceKind) -> CommandOutcome {
    let Some(player) = state.players.get(player_id) else { return CommandOutcome::default() };
    let pos = player.position;
    let taken = state.world.tile_mut(pos).take_resource(kind, 1);
    if taken == 0 {
        return CommandOutcome::ok(AiReply::Ko);
    }
    state.players.get_mut(player_id).unwrap().add_to_inventory(kind, taken);

    let mut outcome = CommandOutcome::ok(AiReply::Ok);
    outcome.gui_events.push(GuiMessage::Pgt { id: player_id, resource_id: kind.id() });
    outcome
}

pub fn set(state: &mut GameState, player_id: u32, kind: ResourceKind) -> CommandOutcome {
    let Some(player) = state.players.get(player_id) else { return CommandOutcome::default() };
    let pos = player.position;
    let taken = state.players.get_mut(player_id).unwrap().take_from_inventory(kind, 1);
    if taken == 0 {
        return CommandOutcome::ok(AiReply::Ko);
    }
    state.world.tile_mut(pos).add_resource(kind, taken);

    let mut outcome = CommandOutcome::ok(AiReply::Ok);
    outcome.gui_events.push(GuiMessage::Pdr { id: player_id, resource_id: kind.id() });
    outcome
}

pub fn eject(state: &mut GameState, player_id: u32) -> CommandOutcome {
    let Some(player) = state.players.get(player_id) else { return CommandOutcome::default() };
    let pos = player.position;
    let orientation = player.orientation;
    let dest = state.world.step(pos, orientation);
    let arrival_direction = eject_arrival_direction(orientation);

    let others: Vec<u32> = state
        .world
        .tile(pos)
        .occupants()
        .iter()
        .copied()
        .filter(|&id| id != player_id)
        .collect();

    let mut outcome = CommandOutcome::default();
    if others.is_empty() {
        outcome.reply = Some(AiReply::Ko);
        return outcome;
    }

    for other_id in &others {
        state.world.tile_mut(pos).remove_occupant(*other_id);
        state.world.tile_mut(dest).add_occupant(*other_id);
        if let Some(other) = state.players.get_mut(*other_id) {
            other.position = dest;
        }
        outcome.player_messages.push((*other_id, AiReply::EjectNotice { arrival_direction }));
        outcome.gui_events.push(GuiMessage::Ppo {
            id: *other_id,
            x: dest.x,
            y: dest.y,
            orientation_wire: orientation.to_wire(),
        });
    }

    outcome.reply = Some(AiReply::Ok);
    outcome.gui_events.push(GuiMessage::Pex { id: player_id });
    outcome
}

pub fn broadcast(state: &GameState, player_id: u32, text: &str) -> CommandOutcome {
    let Some(sender) = state.players.get(player_id) else { return CommandOutcome::default() };
    let sender_pos = sender.position;

    let mut outcome = CommandOutcome::ok(AiReply::Ok);
    for receiver in state.players.iter() {
        if receiver.id == player_id {
            continue;
        }
        let (dx, dy) = state.world.wrap_delta_to(receiver.position, sender_pos);
        let sector = zappy_types::broadcast_sector(dx, dy, receiver.orientation);
        outcome.player_messages.push((receiver.id, AiReply::Message { sector, text: text.to_string() }));
    }
    outcome.gui_events.push(GuiMessage::Pbc { id: player_id, text: text.to_string() });
    outcome
}

pub fn connect_nbr(state: &GameState, player_id: u32) -> CommandOutcome {
    let Some(player) = state.players.get(player_id) else { return CommandOutcome::default() };
    let Some(team_idx) = state.find_team(&player.team_name) else { return CommandOutcome::default() };
    CommandOutcome::ok(AiReply::FreeSlots(state.teams[team_idx].free_slots()))
}

pub fn fork(state: &mut GameState, player_id: u32) -> CommandOutcome {
    let Some(player) = state.players.get(player_id) else { return CommandOutcome::default() };
    let team_name = player.team_name.clone();
    let pos = player.position;
    let Some(team_idx) = state.find_team(&team_name) else { return CommandOutcome::default() };

    state.teams[team_idx].grow_capacity();
    let egg_id = state.next_egg_id();
    state.eggs.push(zappy_world::Egg::new(egg_id, team_name, pos));

    let mut outcome = CommandOutcome::ok(AiReply::Ok);
    outcome.gui_events.push(GuiMessage::Pfk { id: player_id });
    outcome.gui_events.push(GuiMessage::Enw { egg_id, player_id, x: pos.x, y: pos.y });
    outcome
}

/// Launch an incantation if preconditions hold (§4.8). Returns the
/// participant ids marked incanting so the caller can enqueue their
/// completion action; the caller is responsible for scheduling it.
pub fn incantation_start(state: &mut GameState, player_id: u32) -> (CommandOutcome, Vec<u32>) {
    let Some(player) = state.players.get(player_id) else { return (CommandOutcome::default(), Vec::new()) };
    let level = player.level;
    let pos = player.position;

    let participants: Vec<u32> = state
        .world
        .tile(pos)
        .occupants()
        .iter()
        .copied()
        .filter(|&id| state.players.get(id).is_some_and(|p| p.level == level))
        .collect();

    let tile_resources = *state.world.tile(pos).resources();
    if !incantation::requirement_met(level, participants.len() as u32, &tile_resources) {
        return (CommandOutcome::ok(AiReply::Ko), Vec::new());
    }

    for &id in &participants {
        if let Some(p) = state.players.get_mut(id) {
            p.incanting = true;
        }
    }

    let mut outcome = CommandOutcome::ok(AiReply::ElevationUnderway);
    outcome.gui_events.push(GuiMessage::Pic { x: pos.x, y: pos.y, level, participant_ids: participants.clone() });
    (outcome, participants)
}

/// Re-verify preconditions at completion against *current* tile state
/// (§4.8): recount same-level occupants fresh, not the roster frozen at
/// start, so a player who wanders onto the tile during the 300 ticks
/// counts toward the requirement.
pub fn incantation_finish(state: &mut GameState, leader_id: u32, started: &[u32]) -> CommandOutcome {
    let Some(leader) = state.players.get(leader_id) else { return CommandOutcome::default() };
    let level = leader.level;
    let pos = leader.position;

    let present: Vec<u32> = state
        .world
        .tile(pos)
        .occupants()
        .iter()
        .copied()
        .filter(|&id| state.players.get(id).is_some_and(|p| p.level == level))
        .collect();

    let tile_resources = *state.world.tile(pos).resources();
    let success = incantation::requirement_met(level, present.len() as u32, &tile_resources);

    let mut outcome = CommandOutcome::default();
    if success {
        incantation::consume_requirement_resources(level, state.world.tile_mut(pos));
        for &id in &present {
            if let Some(p) = state.players.get_mut(id) {
                p.incanting = false;
                p.level += 1;
                outcome.player_messages.push((id, AiReply::CurrentLevel(p.level)));
                outcome.gui_events.push(GuiMessage::Plv { id, level: p.level });
            }
        }
    } else {
        // Resolve everyone still flagged incanting, not just `present`:
        // a participant who left the tile before completion is still
        // owed the `ko` that clears its flag.
        for &id in started {
            if state.players.get(id).is_some_and(|p| p.incanting) {
                if let Some(p) = state.players.get_mut(id) {
                    p.incanting = false;
                }
                outcome.player_messages.push((id, AiReply::Ko));
            }
        }
    }

    outcome.gui_events.push(GuiMessage::Pie { x: pos.x, y: pos.y, success });
    outcome
}
