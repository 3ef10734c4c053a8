//! Session replay utility.
//!
//! Replays a scripted sequence of editor events against a project (or an
//! empty model) and writes the resulting project file.

use std::path::PathBuf;
use std::time::Instant;

use voxsmith::core::config::EditorSettings;
use voxsmith::tool::{EditOutcome, Editor, Script};
use voxsmith::voxel::{load_project, save_project, BlockKind};

#[derive(Debug)]
struct Args {
    /// `None` starts from an empty model
    project: Option<PathBuf>,
    script: PathBuf,
    output: PathBuf,
    settings: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);

    let mut positional = Vec::new();
    let mut settings = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-s" | "--settings" => {
                let v = args.next().ok_or("--settings needs a path")?;
                settings = Some(PathBuf::from(v));
            }
            "-h" | "--help" | "help" => {
                return Err("show_help".to_string());
            }
            _ => positional.push(arg),
        }
    }

    let [project, script, output]: [String; 3] = positional
        .try_into()
        .map_err(|_| "expected <project.json|-> <script.json> <out.json>".to_string())?;

    Ok(Args {
        project: (project != "-").then(|| PathBuf::from(project)),
        script: PathBuf::from(script),
        output: PathBuf::from(output),
        settings,
    })
}

fn print_help() {
    println!("Session Replay Utility");
    println!("======================");
    println!();
    println!("Usage: replay_session [OPTIONS] <project.json|-> <script.json> <out.json>");
    println!();
    println!("Pass '-' as the project to start from an empty model.");
    println!();
    println!("Options:");
    println!("  -s, --settings <FILE>   Editor settings JSON");
    println!();
    println!("Examples:");
    println!("  replay_session - build_wall.json wall.json");
    println!("  replay_session house.json add_roof.json house_roofed.json");
}

fn run(args: &Args) -> voxsmith::core::Result<()> {
    let settings = match &args.settings {
        Some(path) => EditorSettings::load(path)?,
        None => EditorSettings::default(),
    };

    let blocks = match &args.project {
        Some(path) => load_project(path, &settings.default_color)?,
        None => Vec::new(),
    };
    let mut editor = Editor::with_blocks(settings, blocks);

    let script = Script::from_json(&std::fs::read_to_string(&args.script)?)?;
    log::info!("Replaying {} steps from {:?}", script.steps.len(), args.script);

    let start = Instant::now();
    let (outcomes, _) = script.run(&mut editor);
    let elapsed = start.elapsed();

    let committed = outcomes.iter().filter(|o| **o == EditOutcome::Committed).count();
    let ignored = outcomes.iter().filter(|o| **o == EditOutcome::Ignored).count();

    save_project(&args.output, editor.blocks())?;

    println!("Replayed {} steps in {:.1}ms", outcomes.len(), elapsed.as_secs_f64() * 1000.0);
    println!("  Commits:   {}", committed);
    println!("  Ignored:   {}", ignored);
    println!("  History:   {} (cursor)", editor.store().cursor());
    println!(
        "  Blocks:    {} ({} cubes, {} prisms)",
        editor.blocks().len(),
        editor.count_kind(BlockKind::Cube),
        editor.count_kind(BlockKind::Prism)
    );
    println!("  Selected:  {}", editor.selected_blocks().len());
    println!("  Output:    {}", args.output.display());
    Ok(())
}

fn main() {
    voxsmith::core::logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            if e == "show_help" {
                print_help();
                return;
            }
            eprintln!("Error: {}", e);
            print_help();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&args) {
        log::error!("Replay failed: {}", e);
        std::process::exit(1);
    }
}
