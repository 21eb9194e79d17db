use std::collections::HashMap;
use std::sync::atomic::AtomicU32;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};
use tracing::info;

use zappy_protocol::{
    parse_ai_command, parse_gui_request, AiCommand, AiReply, GuiMessage, GuiParseError,
};
use zappy_types::{CommandKind, Orientation, Position, FOOD_TICK_INTERVAL, MAX_COMMAND_LEN, RESOURCE_RESPAWN_INTERVAL_TICKS};
use zappy_world::{Player, QueuedAction};

use crate::commands::{self, CommandOutcome};
use crate::config::ServerConfig;
use crate::gui;
use crate::network::{self, ServerMessage};
use crate::state::GameState;

/// What a connection is, from the tick loop's point of view, between the
/// moment it was accepted and the moment it is either identified as an AI
/// client, identified as a GUI spectator, or dropped (§4.2).
enum ClientSlot {
    Unidentified { outbound: mpsc::UnboundedSender<String> },
    Ai { player_id: u32, outbound: mpsc::UnboundedSender<String> },
    Gui { spectator_id: u32 },
}

/// Owns `GameState` exclusively and is the only task that ever mutates it
/// (§5 "single-threaded cooperative"). Driven by a tick interval and the
/// inbound channel fed by every `network::handle_connection` task.
pub async fn run_tick_loop(config: ServerConfig, listener: TcpListener) -> anyhow::Result<()> {
    let mut state = GameState::new(config.width, config.height, &config.teams, config.clients_per_team, config.freq);
    let (inbound_tx, mut inbound_rx) = mpsc::unbounded_channel::<ServerMessage>();
    let next_conn_id = Arc::new(AtomicU32::new(0));

    tokio::spawn(network::accept_loop(listener, inbound_tx, next_conn_id));

    let mut slots: HashMap<u32, ClientSlot> = HashMap::new();
    let mut closers: HashMap<u32, oneshot::Sender<()>> = HashMap::new();
    let mut player_conn: HashMap<u32, u32> = HashMap::new();

    let mut ticker = tokio::time::interval(Duration::from_secs_f64(1.0 / config.freq as f64));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut ticker_freq = config.freq;

    info!(width = config.width, height = config.height, freq = config.freq, "tick loop started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                advance_tick(&mut state, &mut slots, &mut player_conn, &mut closers);
            }
            msg = inbound_rx.recv() => {
                match msg {
                    Some(ServerMessage::Connected { conn_id, outbound, close }) => {
                        slots.insert(conn_id, ClientSlot::Unidentified { outbound });
                        closers.insert(conn_id, close);
                    }
                    Some(ServerMessage::Line { conn_id, text }) => {
                        handle_line(&mut state, &mut slots, &mut player_conn, conn_id, text);
                    }
                    Some(ServerMessage::Disconnected { conn_id }) => {
                        handle_disconnect(&mut state, &mut slots, &mut player_conn, &mut closers, conn_id);
                    }
                    None => return Ok(()),
                }
            }
        }

        if state.freq != ticker_freq {
            ticker_freq = state.freq;
            ticker = tokio::time::interval(Duration::from_secs_f64(1.0 / ticker_freq as f64));
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            info!(freq = ticker_freq, "tick frequency updated");
        }
    }
}

fn advance_tick(
    state: &mut GameState,
    slots: &mut HashMap<u32, ClientSlot>,
    player_conn: &mut HashMap<u32, u32>,
    closers: &mut HashMap<u32, oneshot::Sender<()>>,
) {
    run_due_actions(state, slots, player_conn);
    apply_starvation_clock(state, slots, player_conn, closers);

    state.tick += 1;
    if state.tick % RESOURCE_RESPAWN_INTERVAL_TICKS == 0 {
        state.world.respawn_resources(&mut state.rng);
    }
}

/// Execute every living player's head action whose `end_tick` has arrived,
/// in ascending player-id order (§5 "Ordering guarantees").
fn run_due_actions(state: &mut GameState, slots: &HashMap<u32, ClientSlot>, player_conn: &HashMap<u32, u32>) {
    let ids: Vec<u32> = state.players.iter().map(|p| p.id).collect();
    for id in ids {
        let due = state.players.get_mut(id).and_then(|p| p.queue.pop_due(state.tick));
        let Some(action) = due else { continue };
        let outcome = execute_action(state, id, &action);
        deliver_outcome(state, slots, player_conn, id, outcome);
    }
}

fn execute_action(state: &mut GameState, player_id: u32, action: &QueuedAction) -> CommandOutcome {
    if action.kind == CommandKind::Incantation {
        let participants = state.incantations.remove(&player_id).unwrap_or_default();
        return commands::incantation_finish(state, player_id, &participants);
    }
    match parse_ai_command(&action.text) {
        Ok(AiCommand::Forward) => commands::forward(state, player_id),
        Ok(AiCommand::Right) => commands::turn_right(state, player_id),
        Ok(AiCommand::Left) => commands::turn_left(state, player_id),
        Ok(AiCommand::Look) => commands::look(state, player_id),
        Ok(AiCommand::Inventory) => commands::inventory(state, player_id),
        Ok(AiCommand::Take(kind)) => commands::take(state, player_id, kind),
        Ok(AiCommand::Set(kind)) => commands::set(state, player_id, kind),
        Ok(AiCommand::Eject) => commands::eject(state, player_id),
        Ok(AiCommand::Broadcast(text)) => commands::broadcast(state, player_id, &text),
        Ok(AiCommand::Fork) => commands::fork(state, player_id),
        Ok(AiCommand::ConnectNbr) => commands::connect_nbr(state, player_id),
        Ok(AiCommand::Incantation) | Err(_) => CommandOutcome::default(),
    }
}

/// Drain one tick of life from every living player; every `FOOD_TICK_INTERVAL`
/// ticks give them a chance to eat; kill whoever hits zero (§4.5).
fn apply_starvation_clock(
    state: &mut GameState,
    slots: &mut HashMap<u32, ClientSlot>,
    player_conn: &mut HashMap<u32, u32>,
    closers: &mut HashMap<u32, oneshot::Sender<()>>,
) {
    let ids: Vec<u32> = state.players.iter().map(|p| p.id).collect();
    let on_food_tick = state.tick % (FOOD_TICK_INTERVAL as u64) == 0;
    let mut starved = Vec::new();
    for id in ids {
        let Some(player) = state.players.get_mut(id) else { continue };
        player.decrement_life();
        if on_food_tick {
            player.apply_food_tick();
        }
        if player.is_starved() {
            starved.push(id);
        }
    }
    for id in starved {
        kill_player(state, slots, player_conn, closers, id);
    }
}

fn handle_line(
    state: &mut GameState,
    slots: &mut HashMap<u32, ClientSlot>,
    player_conn: &mut HashMap<u32, u32>,
    conn_id: u32,
    text: String,
) {
    let Some(slot) = slots.get(&conn_id) else { return };
    match slot {
        ClientSlot::Unidentified { outbound } => {
            let outbound = outbound.clone();
            handle_unidentified_line(state, slots, player_conn, conn_id, &outbound, &text);
        }
        ClientSlot::Ai { player_id, outbound } => {
            let player_id = *player_id;
            let outbound = outbound.clone();
            handle_ai_line(state, slots, player_conn, player_id, &outbound, &text);
        }
        ClientSlot::Gui { spectator_id } => {
            let spectator_id = *spectator_id;
            handle_gui_line(state, spectator_id, &text);
        }
    }
}

/// Classify an unidentified connection's first (and, on `ko`, every
/// subsequent) line: `GRAPHIC` for a spectator, else a team name for an AI
/// join attempt. A failed join leaves the connection eligible for retry
/// (§4.2, §4.3).
fn handle_unidentified_line(
    state: &mut GameState,
    slots: &mut HashMap<u32, ClientSlot>,
    player_conn: &mut HashMap<u32, u32>,
    conn_id: u32,
    outbound: &mpsc::UnboundedSender<String>,
    text: &str,
) {
    if text == "GRAPHIC" {
        let spectator_id = state.broadcaster.register(outbound.clone());
        slots.insert(conn_id, ClientSlot::Gui { spectator_id });
        for msg in gui::initial_handshake(state) {
            let _ = outbound.send(msg.to_line());
        }
        return;
    }

    match try_admit(state, text) {
        Some((player_id, free_slots)) => {
            slots.insert(conn_id, ClientSlot::Ai { player_id, outbound: outbound.clone() });
            player_conn.insert(player_id, conn_id);
            let _ = outbound.send(format!("{free_slots}\n{} {}\n", state.world.width(), state.world.height()));
            broadcast_join_notifications(state, player_id);
        }
        None => {
            let _ = outbound.send(AiReply::Ko.to_line());
        }
    }
}

/// Admit a new player into `team_name` if it names a known team with a free
/// slot and the world-wide cap is not exceeded (§4.3).
fn try_admit(state: &mut GameState, team_name: &str) -> Option<(u32, u32)> {
    let team_idx = state.find_team(team_name)?;
    if state.living_player_count() as u32 >= state.global_player_cap() {
        return None;
    }
    if !state.teams[team_idx].try_admit() {
        return None;
    }

    let pos = Position::new(state.rng.gen_range(0..state.world.width()), state.rng.gen_range(0..state.world.height()));
    let orientation = Orientation::from_index(state.rng.gen_range(0..4));
    let team_name = team_name.to_string();
    let player_id = state.players.insert(|id| Player::new(id, team_name, pos, orientation));
    state.world.tile_mut(pos).add_occupant(player_id);

    Some((player_id, state.teams[team_idx].free_slots()))
}

fn broadcast_join_notifications(state: &mut GameState, player_id: u32) {
    let Some(player) = state.players.get(player_id) else { return };
    let messages = [
        GuiMessage::Pnw {
            id: player.id,
            x: player.position.x,
            y: player.position.y,
            orientation_wire: player.orientation.to_wire(),
            level: player.level,
            team_name: player.team_name.clone(),
        },
        GuiMessage::Ppo { id: player.id, x: player.position.x, y: player.position.y, orientation_wire: player.orientation.to_wire() },
        GuiMessage::Plv { id: player.id, level: player.level },
        GuiMessage::Pin { id: player.id, x: player.position.x, y: player.position.y, counts: *player.inventory() },
    ];
    for message in messages {
        state.broadcaster.broadcast(message.to_line());
    }
}

/// Truncate to the wire limit, parse, and either reply `ko` immediately
/// (protocol error, §7) or enqueue. `Incantation` is special: its
/// precondition check and first reply happen synchronously on receipt, and
/// only the 300-tick completion is queued (§4.8, S4).
fn handle_ai_line(
    state: &mut GameState,
    slots: &HashMap<u32, ClientSlot>,
    player_conn: &HashMap<u32, u32>,
    player_id: u32,
    outbound: &mpsc::UnboundedSender<String>,
    text: &str,
) {
    let truncated = truncate_to_byte_boundary(text, MAX_COMMAND_LEN);
    let command = match parse_ai_command(&truncated) {
        Ok(command) => command,
        Err(_) => {
            let _ = outbound.send(AiReply::Ko.to_line());
            return;
        }
    };

    if command == AiCommand::Incantation {
        let (outcome, participants) = commands::incantation_start(state, player_id);
        if !participants.is_empty() {
            state.incantations.insert(player_id, participants);
            enqueue(state, player_id, CommandKind::Incantation, truncated);
        }
        deliver_outcome(state, slots, player_conn, player_id, outcome);
        return;
    }

    enqueue(state, player_id, command.kind(), truncated);
}

/// Truncate to at most `max_bytes` bytes without splitting a UTF-8 code
/// point, matching the original C server's fixed `char command[32]` buffer
/// (31 usable bytes).
fn truncate_to_byte_boundary(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

/// Append one command to a player's queue at its standard completion tick
/// (§3 "Action queue completion ticks").
fn enqueue(state: &mut GameState, player_id: u32, kind: CommandKind, text: String) {
    let now = state.tick;
    let freq = state.freq;
    let Some(player) = state.players.get_mut(player_id) else { return };
    let scheduled_at = player.queue.back().map(|a| a.end_tick).unwrap_or(now);
    player.queue.push(kind, text, scheduled_at, freq);
}

fn handle_gui_line(state: &mut GameState, spectator_id: u32, text: &str) {
    match parse_gui_request(text) {
        Ok(request) => {
            for message in gui::handle_request(state, request) {
                state.broadcaster.send_to(spectator_id, message.to_line());
            }
        }
        Err(GuiParseError::BadParameter) => state.broadcaster.send_to(spectator_id, GuiMessage::Sbp.to_line()),
        Err(GuiParseError::UnknownCommand) => state.broadcaster.send_to(spectator_id, GuiMessage::Suc.to_line()),
    }
}

fn handle_disconnect(
    state: &mut GameState,
    slots: &mut HashMap<u32, ClientSlot>,
    player_conn: &mut HashMap<u32, u32>,
    closers: &mut HashMap<u32, oneshot::Sender<()>>,
    conn_id: u32,
) {
    closers.remove(&conn_id);
    match slots.remove(&conn_id) {
        Some(ClientSlot::Ai { player_id, .. }) => {
            remove_player(state, player_id);
            player_conn.remove(&player_id);
        }
        Some(ClientSlot::Gui { spectator_id }) => {
            state.broadcaster.unregister(spectator_id);
        }
        Some(ClientSlot::Unidentified { .. }) | None => {}
    }
}

/// Free a player's resources and announce its death, without touching its
/// connection (the caller decides whether the socket is already closing or
/// needs to be forced closed).
fn remove_player(state: &mut GameState, player_id: u32) {
    let Some(player) = state.players.remove(player_id) else { return };
    state.world.tile_mut(player.position).remove_occupant(player_id);
    if let Some(team_idx) = state.find_team(&player.team_name) {
        state.teams[team_idx].release();
    }
    state.broadcaster.broadcast(GuiMessage::Pdi { id: player_id }.to_line());
}

/// Starvation death: free state as on disconnect, and additionally force
/// the socket closed (§4.5).
fn kill_player(
    state: &mut GameState,
    slots: &mut HashMap<u32, ClientSlot>,
    player_conn: &mut HashMap<u32, u32>,
    closers: &mut HashMap<u32, oneshot::Sender<()>>,
    player_id: u32,
) {
    remove_player(state, player_id);
    if let Some(conn_id) = player_conn.remove(&player_id) {
        slots.remove(&conn_id);
        if let Some(close) = closers.remove(&conn_id) {
            let _ = close.send(());
        }
    }
}

fn deliver_outcome(
    state: &mut GameState,
    slots: &HashMap<u32, ClientSlot>,
    player_conn: &HashMap<u32, u32>,
    acting_player: u32,
    outcome: CommandOutcome,
) {
    if let Some(reply) = outcome.reply {
        send_to_player(slots, player_conn, acting_player, reply.to_line());
    }
    for (target, reply) in outcome.player_messages {
        send_to_player(slots, player_conn, target, reply.to_line());
    }
    for message in outcome.gui_events {
        state.broadcaster.broadcast(message.to_line());
    }
}

fn send_to_player(slots: &HashMap<u32, ClientSlot>, player_conn: &HashMap<u32, u32>, player_id: u32, line: String) {
    if let Some(conn_id) = player_conn.get(&player_id) {
        if let Some(ClientSlot::Ai { outbound, .. }) = slots.get(conn_id) {
            let _ = outbound.send(line);
        }
    }
}
