//! CTF Match Simulator
//!
//! Drives a full match through `ctf_core` with scripted players and a
//! simulated one-second clock, then prints the settlement.

mod log_host;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use ctf_core::{
    ClockTick, Loadout, LoadoutCatalog, MatchConfig, MatchController, Phase, PhaseClock, PlayerId,
    PlayerStats, RewardEvent, Team,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info};

use log_host::LogHost;

#[derive(Parser)]
#[command(name = "ctf_sim")]
#[command(about = "Simulate capture-the-flag matches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one scripted match
    Run {
        /// Seed for team draws and player behaviour
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Players joining the lobby
        #[arg(long, default_value = "6")]
        players: u32,

        /// Match config JSON (defaults when missing)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write the default config
    Config {
        /// Output JSON file path
        #[arg(long, default_value = "ctf_config.json")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { seed, players, config } => {
            let config = match config {
                Some(path) => MatchConfig::load(path)?,
                None => MatchConfig::default(),
            };
            run_match(config, seed, players)
        }
        Commands::Config { out } => {
            MatchConfig::default().save(&out)?;
            println!("Wrote default config to {}", out.display());
            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn starter_catalog() -> LoadoutCatalog {
    let mut catalog = LoadoutCatalog::new();
    for (id, name, hp, mana) in [(1, "Warrior", 200, 20), (2, "Archer", 140, 40), (3, "Mage", 100, 200)] {
        catalog.insert(Loadout { hp, mana, sell: true, hidden: false, ..Loadout::new(id, name) });
    }
    catalog.insert(Loadout { price: 500, sell: true, hidden: false, ..Loadout::new(4, "Paladin") });
    catalog
}

struct Sim {
    ctl: MatchController<LogHost>,
    clock: PhaseClock,
    rng: ChaCha8Rng,
    catalog: LoadoutCatalog,
    stats: BTreeMap<PlayerId, PlayerStats>,
}

impl Sim {
    fn new(config: MatchConfig, seed: u64) -> Self {
        Self {
            ctl: MatchController::with_seed(config, LogHost::default(), seed),
            clock: PhaseClock::new(),
            // world events use their own stream
            rng: ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
            catalog: starter_catalog(),
            stats: BTreeMap::new(),
        }
    }

    fn reward(&mut self, id: PlayerId, event: RewardEvent) {
        let amount = self.ctl.config().rewards.amount(event);
        let stats = self.stats.entry(id).or_default();
        match event {
            RewardEvent::Kill => stats.kills += 1,
            RewardEvent::Death => stats.deaths += 1,
            RewardEvent::Assist => stats.assists += 1,
            RewardEvent::Capture => {}
        }
        stats.award(amount);
    }

    /// Online, alive players on a team
    fn fighters(&self, team: Option<Team>) -> Vec<PlayerId> {
        self.ctl
            .players()
            .filter(|p| p.is_online() && !p.is_dead() && p.team().is_some())
            .filter(|p| team.is_none() || p.team() == team)
            .map(|p| p.id())
            .collect()
    }

    fn pick_classes(&mut self) -> Result<()> {
        let waiting: Vec<PlayerId> = self
            .ctl
            .players()
            .filter(|p| p.is_online() && !p.has_loadout())
            .map(|p| p.id())
            .collect();
        for id in waiting {
            let choices: Vec<&Loadout> = self.catalog.visible().filter(|l| l.usable_by(&[])).collect();
            if let Some(loadout) = choices.choose(&mut self.rng) {
                let loadout = (*loadout).clone();
                self.ctl.pick_class(id, loadout)?;
            }
        }
        Ok(())
    }

    /// One second of scripted player behaviour
    fn step_world(&mut self) -> Result<()> {
        let phase = self.ctl.phase();
        if !phase.is_pvp() {
            return Ok(());
        }
        let Some(&id) = self.fighters(None).choose(&mut self.rng) else {
            return Ok(());
        };
        let Some(team) = self.ctl.team_of(id) else {
            return Ok(());
        };
        let carrying = self.ctl.flag_holder(team.opponent()) == Some(id);
        let roll = self.rng.gen_range(0..100);

        match roll {
            0..=2 if !carrying => self.ctl.get_flag(id)?,
            0..=5 if carrying => {
                let before = self.ctl.score(team);
                self.ctl.capture_flag(id)?;
                if self.ctl.score(team) > before {
                    self.reward(id, RewardEvent::Capture);
                }
            }
            6 => {
                let killer = self.fighters(Some(team.opponent())).choose(&mut self.rng).copied();
                if let Some(killer) = killer {
                    self.reward(killer, RewardEvent::Kill);
                }
                self.reward(id, RewardEvent::Death);
                self.ctl.flag_drop(id)?;
                if phase == Phase::SuddenDeath {
                    self.ctl.sd_death(id)?;
                }
            }
            7 if phase == Phase::Combat => self.ctl.leave_game(id)?,
            8..=9 if phase == Phase::Combat => {
                let away: Vec<PlayerId> =
                    self.ctl.players().filter(|p| !p.is_online()).map(|p| p.id()).collect();
                if let Some(&back) = away.choose(&mut self.rng) {
                    self.ctl.rejoin_game(back)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn run(&mut self, players: u32) -> Result<()> {
        for n in 1..=players {
            self.ctl.join_game(PlayerId(n))?;
        }
        if !self.clock.arm_lobby_if_ready(self.ctl.online_players(), self.ctl.config()) {
            bail!(
                "lobby needs {} players, only {} joined",
                self.ctl.config().min_players_to_start,
                players
            );
        }

        let mut elapsed: u64 = 0;
        while !self.ctl.phase().is_terminal() {
            elapsed += 1;
            match self.clock.tick() {
                ClockTick::Expired => {
                    self.ctl.next_phase()?;
                    self.clock.arm_for(self.ctl.phase(), self.ctl.config());
                }
                ClockTick::Warning(remaining) => {
                    if let Some(msg) = self.clock.warning_message(remaining) {
                        info!("{}", msg);
                    }
                }
                ClockTick::Running(_) | ClockTick::Idle => {}
            }

            if self.ctl.phase() == Phase::Preparation {
                self.pick_classes()?;
            }
            self.step_world()?;

            // a capture or sudden-death touch can end the match between ticks
            if self.ctl.phase().is_terminal() && self.clock.phase() != Some(Phase::Ended) {
                self.clock.arm_for(Phase::Ended, self.ctl.config());
            }
            if elapsed % 60 == 0 {
                debug!(phase = %self.ctl.phase(), clock = %self.clock.display(), "tick");
            }
        }
        info!(elapsed, "match over");

        while let tick @ (ClockTick::Running(_) | ClockTick::Warning(_)) = self.clock.tick() {
            if let ClockTick::Warning(remaining) = tick {
                if let Some(msg) = self.clock.warning_message(remaining) {
                    info!("{}", msg);
                }
            }
        }
        Ok(())
    }

    fn report(&mut self) -> Result<()> {
        let Some(settlements) = self.ctl.settle() else {
            let reason = self.ctl.host().abort_reason.clone().unwrap_or_default();
            println!("Match aborted: {}", reason);
            return Ok(());
        };

        for s in &settlements {
            let stats = self.stats.entry(s.player).or_default();
            stats.record(s.result);
            stats.award(s.coins);
        }

        let standing = self.ctl.standing();
        let players: Vec<_> = self
            .stats
            .iter()
            .map(|(id, stats)| {
                serde_json::json!({
                    "player": id.0,
                    "team": self.ctl.team_of(*id),
                    "kd": stats.kd_ratio(),
                    "stats": stats,
                })
            })
            .collect();
        let summary = serde_json::json!({
            "outcome": self.ctl.outcome(),
            "score": standing.score,
            "settlements": settlements,
            "players": players,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}

fn run_match(config: MatchConfig, seed: u64, players: u32) -> Result<()> {
    config.validate()?;
    info!(seed, players, "starting simulated match");

    let mut sim = Sim::new(config, seed);
    sim.run(players)?;
    sim.report()
}
