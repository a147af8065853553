use std::env;

use serde_json::json;
use tracing::warn;

use crate::combat::{
    play_match, serialize_events_json, ActionPolicy, Faction, Rng, SideActions, TraceCollector,
    TraceMode, DEFAULT_MAX_ROUNDS,
};
use crate::data::{default_roster, load_roster, validate_roster, Roster};
use crate::error::RosterError;
use crate::trials::{run_trials, TrialConfig, DEFAULT_TRIALS};

const USAGE: &str = "usage: dogfight <simulate|trace|validate>";

/// Flags that take a value; their values are not positional arguments.
const VALUE_FLAGS: [&str; 5] = [
    "--roster",
    "--a-action",
    "--b-action",
    "--workers",
    "--max-rounds",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Simulate,
    Trace,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("simulate") => Some(Command::Simulate),
        Some("trace") => Some(Command::Trace),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Simulate) => handle_simulate(args),
        Some(Command::Trace) => handle_trace(args),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn handle_simulate(args: &[String]) -> i32 {
    let positional = positional_args(args);
    let default_trials = parse_usize_arg(
        env::var("DOGFIGHT_TRIALS").ok().as_ref(),
        "DOGFIGHT_TRIALS",
        DEFAULT_TRIALS,
    );
    let trials = parse_usize_arg(positional.first().copied(), "trials", default_trials);
    let seed = parse_seed(positional.get(1).copied());
    let default_workers =
        parse_usize_arg(env::var("DOGFIGHT_WORKERS").ok().as_ref(), "DOGFIGHT_WORKERS", 0);
    let workers = parse_usize_arg(flag_value(args, "--workers"), "workers", default_workers);
    let max_rounds = parse_u32_arg(
        flag_value(args, "--max-rounds"),
        "max_rounds",
        DEFAULT_MAX_ROUNDS,
    );
    let as_json = args.iter().any(|arg| arg == "--json");

    let Some(roster) = roster_from_args(args) else {
        return 1;
    };
    let Some(actions) = actions_from_args(args) else {
        return 2;
    };

    let config = TrialConfig {
        trials,
        seed,
        max_rounds,
        actions,
        workers,
    };
    let aggregate = match run_trials(&roster, &config) {
        Ok(aggregate) => aggregate,
        Err(err) => {
            eprintln!("simulation failed: {err}");
            return 1;
        }
    };

    if as_json {
        let payload = json!({
            "roster": roster.name,
            "trials": trials,
            "seed": seed,
            "results": aggregate,
            "side_a_win_rate": aggregate.win_rate(Faction::SideA),
            "side_b_win_rate": aggregate.win_rate(Faction::SideB),
            "draw_rate": aggregate.win_rate(Faction::Neutral),
            "side_a_mean_survivors": aggregate.mean_survivors(Faction::SideA),
            "side_b_mean_survivors": aggregate.mean_survivors(Faction::SideB),
            "mean_rounds": aggregate.mean_rounds(),
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(payload) => println!("{payload}"),
            Err(err) => {
                eprintln!("failed to serialize simulation result: {err}");
                return 1;
            }
        }
    } else {
        println!("{aggregate}");
    }
    0
}

fn handle_trace(args: &[String]) -> i32 {
    let positional = positional_args(args);
    let seed = parse_seed(positional.first().copied());
    let Some(roster) = roster_from_args(args) else {
        return 1;
    };
    let Some(actions) = actions_from_args(args) else {
        return 2;
    };

    let mut game = roster.new_match();
    let mut rng = Rng::new(seed);
    let mut trace = TraceCollector::new(TraceMode::Events);
    let result = play_match(&mut game, &actions, &mut rng, DEFAULT_MAX_ROUNDS, &mut trace);
    eprintln!("seed {seed}: {result}");

    match serialize_events_json(trace.events()) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize trace: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: dogfight validate <roster.yaml|roster.json>");
        return 2;
    };

    match load_roster(path) {
        Ok(roster) => {
            println!(
                "validation passed: {path} ({} ships, '{}')",
                roster.ship_count(),
                roster.name
            );
            0
        }
        Err(RosterError::Invalid(issues)) => {
            eprintln!("validation failed: {} issue(s)", issues.len());
            for issue in issues {
                eprintln!("- {issue}");
            }
            1
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            1
        }
    }
}

fn roster_from_args(args: &[String]) -> Option<Roster> {
    let Some(path) = flag_value(args, "--roster") else {
        let roster = default_roster();
        debug_assert!(validate_roster(&roster).is_ok());
        return Some(roster);
    };
    match load_roster(path) {
        Ok(roster) => Some(roster),
        Err(err) => {
            eprintln!("roster error: {err}");
            None
        }
    }
}

fn actions_from_args(args: &[String]) -> Option<SideActions> {
    let mut actions = SideActions::default();
    let slots = [
        ("--a-action", &mut actions.side_a),
        ("--b-action", &mut actions.side_b),
    ];
    for (flag, slot) in slots {
        if let Some(raw) = flag_value(args, flag) {
            let Some(policy) = ActionPolicy::parse(raw) else {
                eprintln!("unknown action '{raw}' for {flag} (expected none|focus|evade|target-lock)");
                return None;
            };
            *slot = policy;
        }
    }
    Some(actions)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|index| args.get(index + 1))
}

/// Arguments after the command that are neither flags nor flag values.
fn positional_args(args: &[String]) -> Vec<&String> {
    let mut positional = Vec::new();
    let mut rest = args.iter().skip(2);
    while let Some(arg) = rest.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            rest.next();
        } else if !arg.starts_with("--") {
            positional.push(arg);
        }
    }
    positional
}

fn parse_seed(raw: Option<&String>) -> u64 {
    match raw {
        Some(value) => value.parse::<u64>().unwrap_or_else(|_| {
            let seed = Rng::from_entropy_seed();
            warn!("invalid seed '{value}', using random seed {seed}");
            seed
        }),
        None => Rng::from_entropy_seed(),
    }
}

fn parse_usize_arg(raw: Option<&String>, name: &str, default: usize) -> usize {
    raw.and_then(|value| value.parse::<usize>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}

fn parse_u32_arg(raw: Option<&String>, name: &str, default: u32) -> u32 {
    raw.and_then(|value| value.parse::<u32>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}
