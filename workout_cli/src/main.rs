mod display;

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use workout_core::*;

type App = WorkoutApp<FileStore>;

#[derive(Parser)]
#[command(name = "brutal")]
#[command(about = "Brutal workout tracker: exercise library, plans and live sessions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Load configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and edit the exercise library
    #[command(subcommand)]
    Exercises(ExerciseCommand),

    /// Manage workout plans
    #[command(subcommand)]
    Plans(PlanCommand),

    /// Run the active workout session
    #[command(subcommand)]
    Workout(WorkoutCommand),

    /// Show workout statistics
    Stats,
}

#[derive(Subcommand)]
enum ExerciseCommand {
    /// List exercises, optionally filtered and sorted
    List {
        /// Match against name or muscle (case-insensitive)
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<ExerciseCategory>,
        #[arg(long)]
        equipment: Option<String>,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// name, category, muscle or difficulty
        #[arg(long, default_value = "name")]
        sort: SortField,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// Show one exercise in full
    Show { id: String },

    /// Add an exercise to the library
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: ExerciseCategory,
        #[arg(long)]
        muscle: String,
        #[arg(long)]
        equipment: String,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        instructions: Option<String>,
        #[arg(long)]
        video_url: Option<String>,
    },

    /// Change fields of an exercise
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<ExerciseCategory>,
        #[arg(long)]
        muscle: Option<String>,
        #[arg(long)]
        equipment: Option<String>,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        instructions: Option<String>,
        #[arg(long)]
        video_url: Option<String>,
    },

    /// Copy an exercise under a new id, suffixing its name with " - COPIA"
    Duplicate { id: String },

    /// Delete an exercise (plans keep their copies)
    Delete { id: String },
}

#[derive(Subcommand)]
enum PlanCommand {
    /// List all plans
    List,

    /// Show a plan and its exercises
    Show { id: String },

    /// Create an empty plan
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "INTERMEDIO")]
        difficulty: String,
        #[arg(long, default_value = "45-60 min")]
        duration: String,
    },

    /// Change fields of a plan
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        duration: Option<String>,
    },

    /// Delete a plan
    Delete { id: String },

    /// Prescribe a library exercise in a plan
    AddExercise {
        plan_id: String,
        exercise_id: String,
        #[arg(long, default_value_t = 3)]
        sets: u32,
        #[arg(long, default_value = "8-12")]
        reps: String,
        /// Kilograms
        #[arg(long, default_value_t = 20.0)]
        weight: f64,
        /// Rest between sets, in seconds
        #[arg(long, default_value_t = 90)]
        rest: u32,
    },

    /// Remove the exercise at a 1-based position (as shown by `plans show`)
    RemoveExercise { plan_id: String, position: usize },
}

#[derive(Subcommand)]
enum WorkoutCommand {
    /// Start a workout from a plan, replacing any workout in progress
    Start { plan_id: String },

    /// Show the workout in progress
    Status,

    /// Mark the current set as done
    Set {
        /// Count down the rest timer afterwards when it starts
        #[arg(long)]
        rest: bool,
    },

    /// Count down the rest timer for the current exercise
    Rest,

    /// Finish (or abandon) the workout and record it
    Finish,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    workout_core::logging::init_with_level(workout_core::logging::level_for_verbosity(
        cli.verbose,
    ));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_user_facing() {
                eprintln!("✗ {}", e);
            } else {
                eprintln!("Error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    let mut app = WorkoutApp::load(FileStore::new(data_dir), &config)?;

    match cli.command {
        Some(Commands::Exercises(cmd)) => cmd_exercises(&mut app, cmd),
        Some(Commands::Plans(cmd)) => cmd_plans(&mut app, cmd),
        Some(Commands::Workout(cmd)) => cmd_workout(&mut app, cmd),
        Some(Commands::Stats) => {
            display::stats(app.stats());
            Ok(())
        }
        None => cmd_dashboard(&app),
    }
}

fn not_found(what: &str, id: &str) -> Error {
    Error::NotFound(format!("{} '{}'", what, id))
}

fn cmd_dashboard(app: &App) -> Result<()> {
    display::stats(app.stats());
    println!();
    match app.session() {
        Some(session) => display::session_status(session, app.timer()),
        None => {
            println!("No workout in progress. Start one with `brutal workout start <PLAN_ID>`.");
            println!();
            display::plan_list(app.list_plans());
        }
    }
    Ok(())
}

fn cmd_exercises(app: &mut App, cmd: ExerciseCommand) -> Result<()> {
    match cmd {
        ExerciseCommand::List {
            search,
            category,
            equipment,
            difficulty,
            sort,
            desc,
        } => {
            let query = ExerciseQuery {
                search,
                category,
                equipment,
                difficulty,
                sort,
                descending: desc,
            };
            let shown = app.query_exercises(&query);
            display::exercise_list(&shown, app.list_exercises().len());
        }

        ExerciseCommand::Show { id } => {
            let exercise = app
                .get_exercise(&id)
                .ok_or_else(|| not_found("exercise", &id))?;
            display::exercise_detail(exercise);
        }

        ExerciseCommand::Add {
            name,
            category,
            muscle,
            equipment,
            difficulty,
            description,
            instructions,
            video_url,
        } => {
            let new = NewExercise {
                name,
                category,
                muscle,
                equipment,
                description,
                instructions,
                difficulty,
                video_url,
            };
            let exercise = app.add_exercise(new)?;
            println!("✓ Added {} [{}]", exercise.name, exercise.id);
        }

        ExerciseCommand::Update {
            id,
            name,
            category,
            muscle,
            equipment,
            difficulty,
            description,
            instructions,
            video_url,
        } => {
            let patch = ExercisePatch {
                name,
                category,
                muscle,
                equipment,
                description,
                instructions,
                difficulty,
                video_url,
            };
            if !app.update_exercise(&id, patch)? {
                return Err(not_found("exercise", &id));
            }
            println!("✓ Updated exercise [{}]", id);
        }

        ExerciseCommand::Duplicate { id } => {
            let copy = app
                .duplicate_exercise(&id)?
                .ok_or_else(|| not_found("exercise", &id))?;
            println!("✓ Added {} [{}]", copy.name, copy.id);
        }

        ExerciseCommand::Delete { id } => {
            if !app.delete_exercise(&id)? {
                return Err(not_found("exercise", &id));
            }
            println!("✓ Deleted exercise [{}]", id);
        }
    }
    Ok(())
}

fn cmd_plans(app: &mut App, cmd: PlanCommand) -> Result<()> {
    match cmd {
        PlanCommand::List => display::plan_list(app.list_plans()),

        PlanCommand::Show { id } => {
            let plan = app.get_plan(&id).ok_or_else(|| not_found("plan", &id))?;
            display::plan_detail(plan);
        }

        PlanCommand::Add {
            name,
            description,
            difficulty,
            duration,
        } => {
            let plan = app.add_plan(NewPlan {
                name,
                description,
                difficulty,
                duration,
            })?;
            println!("✓ Created plan {} [{}]", plan.name, plan.id);
        }

        PlanCommand::Update {
            id,
            name,
            description,
            difficulty,
            duration,
        } => {
            let patch = PlanPatch {
                name,
                description,
                difficulty,
                duration,
                ..PlanPatch::default()
            };
            if !app.update_plan(&id, patch)? {
                return Err(not_found("plan", &id));
            }
            println!("✓ Updated plan [{}]", id);
        }

        PlanCommand::Delete { id } => {
            if !app.delete_plan(&id)? {
                return Err(not_found("plan", &id));
            }
            println!("✓ Deleted plan [{}]", id);
        }

        PlanCommand::AddExercise {
            plan_id,
            exercise_id,
            sets,
            reps,
            weight,
            rest,
        } => {
            if !app.prescribe_exercise(&plan_id, &exercise_id, sets, &reps, weight, rest)? {
                return Err(not_found("plan", &plan_id));
            }
            println!("✓ Exercise added to plan [{}]", plan_id);
        }

        PlanCommand::RemoveExercise { plan_id, position } => {
            let removed = match position.checked_sub(1) {
                Some(index) => app.remove_exercise_from_plan(&plan_id, index)?,
                None => None,
            };
            match removed {
                Some(exercise) => println!("✓ Removed {} from plan [{}]", exercise.name, plan_id),
                None => {
                    return Err(Error::NotFound(format!(
                        "no exercise at position {} in plan '{}'",
                        position, plan_id
                    )))
                }
            }
        }
    }
    Ok(())
}

fn cmd_workout(app: &mut App, cmd: WorkoutCommand) -> Result<()> {
    match cmd {
        WorkoutCommand::Start { plan_id } => {
            let session = app.start_session(&plan_id)?;
            println!(
                "✓ Started {} ({} exercises)",
                session.plan_name,
                session.exercises.len()
            );
            println!();
            if let Some(session) = app.session() {
                display::session_status(session, app.timer());
            }
        }

        WorkoutCommand::Status => match app.session() {
            Some(session) => display::session_status(session, app.timer()),
            None => println!("No workout in progress."),
        },

        WorkoutCommand::Set { rest } => match app.complete_set()? {
            None => println!("No workout in progress."),
            Some(advance) => {
                match advance {
                    Advance::NextSet => println!("✓ Set done. Rest {}", app.timer().clock()),
                    Advance::NextExercise => println!("✓ Exercise done. Next up!"),
                    Advance::Finished => println!("✓ Last set done."),
                }
                println!();
                if let Some(session) = app.session() {
                    display::session_status(session, app.timer());
                }
                if rest && app.timer().is_running() {
                    println!();
                    run_countdown(app)?;
                }
            }
        },

        WorkoutCommand::Rest => {
            if app.session().is_none() {
                println!("No workout in progress.");
                return Ok(());
            }
            app.start_timer();
            run_countdown(app)?;
        }

        WorkoutCommand::Finish => {
            let progress = app.session().map(|s| s.progress());
            if !app.complete_session()? {
                println!("No workout in progress.");
                return Ok(());
            }
            if let Some(progress) = progress {
                println!(
                    "✓ Workout logged ({}/{} sets)",
                    progress.completed, progress.total
                );
            }
            println!();
            display::stats(app.stats());
        }
    }
    Ok(())
}

/// Tick the rest timer once per second until it elapses
fn run_countdown(app: &mut App) -> Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "\r  Rest: {} ", app.timer().clock())?;
    stdout.flush()?;

    loop {
        std::thread::sleep(Duration::from_secs(1));
        match app.tick_timer() {
            Tick::Running { .. } => {
                write!(stdout, "\r  Rest: {} ", app.timer().clock())?;
                stdout.flush()?;
            }
            Tick::Elapsed => {
                writeln!(stdout, "\r  Rest: 0:00 - go!")?;
                break;
            }
            Tick::Idle => {
                writeln!(stdout)?;
                break;
            }
        }
    }
    Ok(())
}
