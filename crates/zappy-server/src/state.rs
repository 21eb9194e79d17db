use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use zappy_events::GuiBroadcaster;
use zappy_world::{Egg, Players, Team, World};

/// All mutable simulation state, owned exclusively by the tick-loop task
/// (§5 "single-threaded cooperative... no locks in the core").
pub struct GameState {
    pub world: World,
    pub teams: Vec<Team>,
    pub players: Players,
    pub eggs: Vec<Egg>,
    pub broadcaster: GuiBroadcaster,
    pub rng: StdRng,
    pub tick: u64,
    pub freq: u32,
    next_egg_id: u32,
    /// Participants recorded at incantation start, keyed by the leader's
    /// player id whose queue carries the 300-tick completion action.
    pub incantations: HashMap<u32, Vec<u32>>,
}

impl GameState {
    pub fn new(width: u32, height: u32, team_names: &[String], clients_per_team: u32, freq: u32) -> Self {
        let mut rng = StdRng::from_entropy();
        let mut world = World::new(width, height);
        world.init_resources(&mut rng);
        let teams = team_names
            .iter()
            .map(|name| Team::new(name.clone(), clients_per_team))
            .collect();

        Self {
            world,
            teams,
            players: Players::default(),
            eggs: Vec::new(),
            broadcaster: GuiBroadcaster::new(),
            rng,
            tick: 0,
            freq,
            next_egg_id: 0,
            incantations: HashMap::new(),
        }
    }

    pub fn find_team(&self, name: &str) -> Option<usize> {
        self.teams.iter().position(|t| t.name == name)
    }

    pub fn next_egg_id(&mut self) -> u32 {
        let id = self.next_egg_id;
        self.next_egg_id += 1;
        id
    }

    pub fn global_player_cap(&self) -> u32 {
        self.teams.iter().map(Team::max_clients).sum()
    }

    pub fn living_player_count(&self) -> usize {
        self.players.iter().count()
    }
}
