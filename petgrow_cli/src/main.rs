use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use petgrow_core::stats::play_advised;
use petgrow_core::*;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "petgrow")]
#[command(about = "Look after a virtual pet from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how the pet is doing (default)
    Status,

    /// Perform a care action
    Act {
        #[arg(value_enum)]
        action: ActionArg,
    },

    /// Buy an item from the shop
    Buy {
        /// Item id (see `petgrow shop`)
        item_id: String,
    },

    /// List the shop catalog
    Shop,

    /// Show the care report
    Report,

    /// Start over with a new pet
    Adopt {
        #[arg(long, default_value = DEFAULT_PET_NAME)]
        name: String,

        #[arg(long, value_enum, default_value_t = SpeciesArg::Dog)]
        species: SpeciesArg,
    },

    /// Keep the pet company for a while, ticking the simulation live
    Run {
        /// Number of ticks to run
        #[arg(long, default_value_t = 60)]
        ticks: u64,

        /// Don't sleep between ticks (for scripting and testing)
        #[arg(long)]
        no_wait: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ActionArg {
    Feed,
    Clean,
    Play,
    Vet,
    Pet,
}

impl From<ActionArg> for ActionKind {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Feed => ActionKind::Feed,
            ActionArg::Clean => ActionKind::Clean,
            ActionArg::Play => ActionKind::Play,
            ActionArg::Vet => ActionKind::Vet,
            ActionArg::Pet => ActionKind::Pet,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SpeciesArg {
    Dog,
    Cat,
}

impl From<SpeciesArg> for Species {
    fn from(arg: SpeciesArg) -> Self {
        match arg {
            SpeciesArg::Dog => Species::Dog,
            SpeciesArg::Cat => Species::Cat,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    petgrow_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let store = JsonFileStore::in_dir(&data_dir);
    let mut session = GameSession::start(store, &config, Utc::now());

    if let Some(report) = session.acknowledge_offline_report() {
        display_offline_report(session.state(), &report);
    }

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => display_status(session.state()),
        Commands::Act { action } => cmd_act(&mut session, action.into()),
        Commands::Buy { item_id } => cmd_buy(&mut session, &item_id)?,
        Commands::Report => display_report(session.state()),
        Commands::Adopt { name, species } => {
            session.adopt(&name, species.into(), Utc::now());
            println!("\n✓ Welcome home, {}!", name);
            display_status(session.state());
        }
        Commands::Run { ticks, no_wait } => cmd_run(&mut session, ticks, no_wait),
        Commands::Shop => display_shop(catalog),
    }

    session.save(Utc::now())?;
    Ok(())
}

fn cmd_act<S: SnapshotStore>(session: &mut GameSession<S>, kind: ActionKind) {
    let name = session.state().name.clone();

    if kind == ActionKind::Play && !play_advised(&session.state().stats) {
        println!("{} is very tired. Maybe let them rest first.", name);
    }

    if session.perform_action(kind, Utc::now()) {
        let verb = match kind {
            ActionKind::Feed => "fed",
            ActionKind::Clean => "cleaned",
            ActionKind::Play => "played with",
            ActionKind::Vet => "took to the vet",
            ActionKind::Pet => "petted",
        };
        println!("\n✓ You {} {}!", verb, name);
        display_status(session.state());
        return;
    }

    match kind {
        ActionKind::Feed => {
            println!("No food left! Buy some with `petgrow buy {}`.", catalog::BASIC_FOOD_ID);
        }
        ActionKind::Vet => {
            let price = session.catalog().vet_price().unwrap_or_default();
            println!(
                "Not enough coins for the vet: need {}, have {}.",
                price,
                session.state().coins.floor()
            );
        }
        _ => println!("Nothing happened."),
    }
}

fn cmd_buy<S: SnapshotStore>(session: &mut GameSession<S>, item_id: &str) -> Result<()> {
    if session.buy_catalog_item(item_id, Utc::now())? {
        println!("\n✓ Bought {}!", item_id);
        display_status(session.state());
    } else {
        println!(
            "Not enough coins for {} (have {}).",
            item_id,
            session.state().coins.floor()
        );
    }
    Ok(())
}

fn cmd_run<S: SnapshotStore>(session: &mut GameSession<S>, ticks: u64, no_wait: bool) {
    let interval = Duration::from_millis(session.settings().tick_interval_ms);

    let name = session.state().name.clone();
    let mut last_health = session.state().health_state;
    session.subscribe(Box::new(move |state: &GameState| {
        if state.health_state != last_health {
            println!("  ! {} is now {}", name, health_label(state.health_state));
            last_health = state.health_state;
        }
    }));

    for _ in 0..ticks {
        if !no_wait {
            std::thread::sleep(interval);
        }
        session.tick(Utc::now());
    }

    println!("\n✓ Spent {} seconds together.", ticks);
    display_status(session.state());
}

fn health_label(health: HealthState) -> &'static str {
    match health {
        HealthState::Healthy => "healthy",
        HealthState::SickMild => "a little sick",
        HealthState::SickSerious => "seriously sick",
    }
}

fn bar(value: f64) -> String {
    let filled = (value / 10.0).round().clamp(0.0, 10.0) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

fn display_status(state: &GameState) {
    let species = match state.species {
        Species::Dog => "Dog",
        Species::Cat => "Cat",
    };

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {} the {}", state.name, species);
    println!("╰─────────────────────────────────────────╯");
    println!();

    let stats = &state.stats;
    for (label, value) in [
        ("Hunger", stats.hunger),
        ("Hygiene", stats.hygiene),
        ("Energy", stats.energy),
        ("Happiness", stats.happiness),
    ] {
        println!("  {:<10} {} {:>3.0}", label, bar(value), value);
    }
    println!("  {:<10} {}", "Health", health_label(state.health_state));
    println!();

    let visual = state.visual_state();
    let mut mood = Vec::new();
    if visual.sad {
        mood.push("sad");
    }
    if visual.sleeping {
        mood.push("sleepy");
    }
    if visual.dirty {
        mood.push("dirty");
    }
    if visual.pooped {
        mood.push("made a mess");
    }
    if !mood.is_empty() {
        println!("  Mood: {}", mood.join(", "));
    }

    println!("  Coins: {}", state.coins.floor());
    println!(
        "  Food: {} kibble, {} steak",
        state.inventory.basic_food, state.inventory.premium_food
    );
    println!();
}

fn display_offline_report(state: &GameState, report: &OfflineReport) {
    println!("\n🌙 Welcome back!");
    println!(
        "  While you were away for {} minutes, {} missed you!",
        (report.seconds_away / 60.0).floor(),
        state.name
    );
    println!("  Earned: {} coins", report.coins);
}

fn display_report(state: &GameState) {
    println!("\n  Care Report");
    println!("  Score: {:.0}", state.care_score.round());
    println!("  Rating: {}", state.care_rating().label());
    println!("  Days together: {}", state.days_alive);
    println!();
}

fn display_shop(catalog: &Catalog) {
    println!("\n  Shop");
    for item in &catalog.items {
        println!(
            "  {:<14} {:>4}c  {} - {}",
            item.id, item.price, item.name, item.description
        );
    }
    println!();
}
