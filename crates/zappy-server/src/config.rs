use clap::Parser;

/// Command-line interface, matching the wire contract of §6 exactly: no
/// config file, no environment overrides beyond `RUST_LOG`.
#[derive(Debug, Parser)]
#[command(name = "zappy-server", about = "Authoritative Zappy simulation server")]
pub struct Cli {
    /// TCP port to listen on.
    #[arg(short = 'p', long = "port")]
    pub port: u16,

    /// World width.
    #[arg(short = 'x', long = "width")]
    pub width: u32,

    /// World height.
    #[arg(short = 'y', long = "height")]
    pub height: u32,

    /// Team names, one per `-n` flag occurrence or space-separated after it.
    #[arg(short = 'n', long = "team", num_args = 1.., required = true)]
    pub teams: Vec<String>,

    /// Clients-per-team capacity, applied uniformly to every team.
    #[arg(short = 'c', long = "clients")]
    pub clients_per_team: u32,

    /// Ticks per wall-clock second.
    #[arg(short = 'f', long = "freq")]
    pub freq: u32,
}

/// Validated configuration built from `Cli` (§6, §7 "Configuration errors").
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub width: u32,
    pub height: u32,
    pub teams: Vec<String>,
    pub clients_per_team: u32,
    pub freq: u32,
}

impl ServerConfig {
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        if cli.freq == 0 {
            anyhow::bail!("freq must be > 0");
        }
        if cli.width == 0 || cli.height == 0 {
            anyhow::bail!("width and height must be > 0");
        }
        if cli.teams.is_empty() {
            anyhow::bail!("at least one team name is required");
        }
        for name in &cli.teams {
            if name.is_empty() || name.len() > zappy_types::MAX_TEAM_NAME_LEN {
                anyhow::bail!("team name '{name}' must be 1..={} characters", zappy_types::MAX_TEAM_NAME_LEN);
            }
        }
        let mut sorted = cli.teams.clone();
        sorted.sort();
        sorted.dedup();
        if sorted.len() != cli.teams.len() {
            anyhow::bail!("team names must be distinct");
        }

        Ok(Self {
            port: cli.port,
            width: cli.width,
            height: cli.height,
            teams: cli.teams,
            clients_per_team: cli.clients_per_team,
            freq: cli.freq,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(teams: &[&str]) -> Cli {
        Cli {
            port: 4242,
            width: 10,
            height: 10,
            teams: teams.iter().map(|s| s.to_string()).collect(),
            clients_per_team: 2,
            freq: 10,
        }
    }

    #[test]
    fn rejects_zero_frequency() {
        let mut c = cli(&["A"]);
        c.freq = 0;
        assert!(ServerConfig::from_cli(c).is_err());
    }

    #[test]
    fn rejects_duplicate_team_names() {
        assert!(ServerConfig::from_cli(cli(&["A", "A"])).is_err());
    }

    #[test]
    fn accepts_well_formed_config() {
        assert!(ServerConfig::from_cli(cli(&["A", "B"])).is_ok());
    }
}
