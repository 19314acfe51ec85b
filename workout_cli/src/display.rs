//! Terminal rendering of core records.

use chrono::Utc;
use workout_core::timer::format_clock;
use workout_core::{Exercise, RestTimer, WorkoutPlan, WorkoutSession, WorkoutStats};

fn banner(title: &str) {
    println!("╭─────────────────────────────────────────╮");
    println!("│  {}", title);
    println!("╰─────────────────────────────────────────╯");
}

pub fn exercise_row(exercise: &Exercise) {
    let difficulty = exercise.difficulty.map(|d| d.label()).unwrap_or("-");
    println!(
        "  [{}] {:<20} {:<11} {:<14} {:<14} {}",
        exercise.id, exercise.name, exercise.category, exercise.muscle, exercise.equipment, difficulty
    );
}

pub fn exercise_list(shown: &[&Exercise], total: usize) {
    banner(&format!("EXERCISE LIBRARY ({} of {})", shown.len(), total));
    if shown.is_empty() {
        println!("  No exercises match.");
        return;
    }
    for exercise in shown {
        exercise_row(exercise);
    }
}

pub fn exercise_detail(exercise: &Exercise) {
    banner(&exercise.name);
    println!("  Id:         {}", exercise.id);
    println!("  Category:   {}", exercise.category);
    println!("  Muscle:     {}", exercise.muscle);
    println!("  Equipment:  {}", exercise.equipment);
    if let Some(difficulty) = exercise.difficulty {
        println!("  Difficulty: {}", difficulty);
    }
    if let Some(description) = &exercise.description {
        println!();
        println!("  {}", description);
    }
    if let Some(instructions) = &exercise.instructions {
        println!();
        for line in instructions.lines() {
            println!("  {}", line);
        }
    }
    if let Some(url) = &exercise.video_url {
        println!();
        println!("  ℹ Video: {}", url);
    }
}

pub fn plan_list(plans: &[WorkoutPlan]) {
    banner("WORKOUT PLANS");
    if plans.is_empty() {
        println!("  No plans yet.");
        return;
    }
    for plan in plans {
        let sets: u32 = plan.exercises.iter().map(|e| e.sets).sum();
        println!(
            "  [{}] {:<16} {} exercises, {} sets  {}  {}  last used: {}",
            plan.id,
            plan.name,
            plan.exercises.len(),
            sets,
            plan.difficulty,
            plan.duration,
            plan.last_used.as_deref().unwrap_or("never")
        );
    }
}

pub fn plan_detail(plan: &WorkoutPlan) {
    banner(&plan.name);
    println!("  {}", plan.description);
    println!("  {} · {}", plan.difficulty, plan.duration);
    if let Some(last_used) = &plan.last_used {
        println!("  Last used: {}", last_used);
    }
    println!();
    if plan.exercises.is_empty() {
        println!("  No exercises yet.");
        return;
    }
    for (i, exercise) in plan.exercises.iter().enumerate() {
        println!(
            "  {}. {:<20} {} x {} @ {} kg, rest {}",
            i + 1,
            exercise.name,
            exercise.sets,
            exercise.reps,
            exercise.weight,
            format_clock(exercise.rest_time)
        );
    }
}

pub fn session_status(session: &WorkoutSession, timer: &RestTimer) {
    let progress = session.progress();
    banner(&format!("{} - IN PROGRESS", session.plan_name));
    println!(
        "  Progress: {}/{} sets ({:.0}%)",
        progress.completed, progress.total, progress.percent
    );
    println!(
        "  Elapsed:  {} min",
        session.elapsed(Utc::now()).num_minutes()
    );

    if progress.is_complete {
        println!();
        println!("  🏆 All sets done! Run `brutal workout finish` to log it.");
    } else if let Some(current) = session.current() {
        println!();
        println!(
            "  → {}  set {} of {}  ({} reps @ {} kg)",
            current.name,
            session.current_set + 1,
            current.sets,
            current.reps,
            current.weight
        );
        println!("    Rest timer: {}", timer.clock());
    }

    println!();
    for (i, (exercise, row)) in session
        .exercises
        .iter()
        .zip(&session.completed_sets)
        .enumerate()
    {
        let marker = if i == session.current_exercise { "▶" } else { " " };
        let sets: String = row
            .iter()
            .map(|done| if *done { "■" } else { "□" })
            .collect::<Vec<_>>()
            .join(" ");
        println!("  {} {:<20} {}", marker, exercise.name, sets);
    }
}

pub fn stats(stats: &WorkoutStats) {
    banner("STATS");
    println!("  Total workouts:   {}", stats.total_workouts);
    println!("  This week:        {}", stats.weekly_workouts);
    println!("  Streak:           {} days", stats.streak);
    println!("  Total volume:     {} kg", stats.total_volume);
    println!("  Weekly volume:    {} kg", stats.weekly_volume);
    println!("  Completion rate:  {}%", stats.completion_rate);
}
