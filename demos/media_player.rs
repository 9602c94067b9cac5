//! Media Player
//!
//! This example drives a small hierarchical player:
//!
//! ```text
//! Root
//! ├── Idle
//! └── Active
//!     ├── Running
//!     └── Paused
//! ```
//!
//! Key concepts:
//! - Entry/exit actions run around the least common ancestor
//! - `Stop` is declared once on `Active` and handled from both children
//! - A guard on `Running` shadows its parent for the same event
//! - Listeners and history observe committed transitions
//!
//! Run with: cargo run --example media_player

use treestate::builder::{StructureBuilder, TransitionSpec};
use treestate::machine::{BoxError, HistoryPolicy, MachineOptions};
use treestate::Machine;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum Player {
    Root,
    Idle,
    Active,
    Running,
    Paused,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum Command {
    Start,
    Pause,
    Resume,
    Stop,
    Skip,
}

#[derive(Default)]
struct Deck {
    track: usize,
    playlist_len: usize,
}

fn announce_entry(state: &Player, _: &Command, _: &mut Deck) -> Result<(), BoxError> {
    println!("  enter {state:?}");
    Ok(())
}

fn announce_exit(state: &Player, _: &Command, _: &mut Deck) -> Result<(), BoxError> {
    println!("  exit  {state:?}");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Media Player Example ===\n");

    let mut builder = StructureBuilder::new()
        .state(Player::Root)?
        .child(Player::Idle, Player::Root)?
        .child(Player::Active, Player::Root)?
        .child(Player::Running, Player::Active)?
        .child(Player::Paused, Player::Active)?;

    for state in [Player::Idle, Player::Active, Player::Running, Player::Paused] {
        builder = builder
            .on_entry(state, announce_entry)
            .on_exit(state, announce_exit);
    }

    let structure = builder
        .add_transition(Player::Idle, Command::Start, TransitionSpec::new().to(Player::Running))
        .add_transition(Player::Running, Command::Pause, TransitionSpec::new().to(Player::Paused))
        .add_transition(Player::Paused, Command::Resume, TransitionSpec::new().to(Player::Running))
        .add_transition(Player::Active, Command::Stop, TransitionSpec::new().to(Player::Idle))
        // Skipping restarts the running state while tracks remain
        .add_transition(
            Player::Running,
            Command::Skip,
            TransitionSpec::new()
                .when(|_, deck: &Deck| deck.track + 1 < deck.playlist_len)
                .action(|_, _, deck: &mut Deck| {
                    deck.track += 1;
                    println!("  now playing track {}", deck.track);
                    Ok(())
                }),
        )
        .build()?;

    let deck = Deck {
        track: 0,
        playlist_len: 2,
    };
    let options = MachineOptions::default().history(HistoryPolicy::Bounded(16));
    let machine = Machine::with_options(structure, Player::Idle, deck, options)?;

    machine.add_listener(|command, record| {
        println!(
            "  [listener] {command:?}: {:?} -> {:?}",
            record.source, record.destination
        );
        Ok(())
    });

    for command in [
        Command::Start,
        Command::Skip,
        Command::Skip,
        Command::Pause,
        Command::Resume,
        Command::Stop,
    ] {
        println!("{command:?} (in {:?})", machine.current_state());
        if !machine.fire(&command)? {
            println!("  ignored");
        }
    }

    println!("\nFinal state: {:?}", machine.current_state());
    if let Some(history) = machine.history() {
        println!("Path: {:?}", history.get_path());
        if let Some(elapsed) = history.duration() {
            println!("Elapsed: {elapsed:?}");
        }
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
