//! STL export utility.
//!
//! Loads a project file and writes the triangulated model as ASCII STL.

use std::path::PathBuf;
use std::time::Instant;

use voxsmith::core::config::EditorSettings;
use voxsmith::export::export_stl;
use voxsmith::voxel::load_project;

#[derive(Debug)]
struct Args {
    project: PathBuf,
    output: PathBuf,
    settings: Option<PathBuf>,
    hole_radius: Option<f32>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);

    let mut positional = Vec::new();
    let mut settings = None;
    let mut hole_radius = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-s" | "--settings" => {
                let v = args.next().ok_or("--settings needs a path")?;
                settings = Some(PathBuf::from(v));
            }
            "-r" | "--hole-radius" => {
                let v = args.next().ok_or("--hole-radius needs a value")?;
                hole_radius = Some(v.parse().map_err(|_| format!("invalid hole radius: {v}"))?);
            }
            "-h" | "--help" | "help" => {
                return Err("show_help".to_string());
            }
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let [project, output]: [PathBuf; 2] = positional
        .try_into()
        .map_err(|_| "expected <project.json> <out.stl>".to_string())?;

    Ok(Args {
        project,
        output,
        settings,
        hole_radius,
    })
}

fn print_help() {
    println!("STL Export Utility");
    println!("==================");
    println!();
    println!("Usage: export_stl [OPTIONS] <project.json> <out.stl>");
    println!();
    println!("Options:");
    println!("  -s, --settings <FILE>     Editor settings JSON");
    println!("  -r, --hole-radius <R>     Drilled opening radius (default: 0.35)");
    println!();
    println!("Examples:");
    println!("  export_stl model.json model.stl");
    println!("  export_stl --hole-radius 0.25 model.json model.stl");
}

fn run(args: &Args) -> voxsmith::core::Result<()> {
    let settings = match &args.settings {
        Some(path) => EditorSettings::load(path)?,
        None => EditorSettings::default(),
    };
    let hole_radius = args.hole_radius.unwrap_or(settings.hole_radius);

    let start = Instant::now();
    let blocks = load_project(&args.project, &settings.default_color)?;
    let facets = export_stl(&args.output, &blocks, hole_radius)?;

    println!(
        "Wrote {} facets for {} blocks to {} in {:.1}ms",
        facets,
        blocks.len(),
        args.output.display(),
        start.elapsed().as_secs_f64() * 1000.0
    );
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
        log::error!("Export failed: {}", e);
        std::process::exit(1);
    }
}
