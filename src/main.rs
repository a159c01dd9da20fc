//! TravelBook Kommandozeilen-Werkzeug.
//!
//! Lädt Travel- und GPX-Dateien, konvertiert zwischen den Formaten,
//! rechnet alte Dateien auf das aktuelle Format um und berechnet
//! Druckansichten für das Roadbook.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use travelbook_editor::core::{LatLng, Travel};
use travelbook_editor::print::PrintViewsFactory;
use travelbook_editor::shared::EditorOptions;
use travelbook_editor::{parse_gpx, read_travel, write_travel};

#[derive(Parser)]
#[command(name = "travelbook", version, about = "Werkzeuge für Travel- und GPX-Dateien")]
struct Cli {
    /// Pfad zur Optionen-Datei (Standard: travelbook.toml neben der Binary)
    #[arg(long)]
    options: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Zeigt Kennzahlen einer Travel- oder GPX-Datei
    Info {
        /// Eingabedatei (.trv oder .gpx)
        file: PathBuf,
    },
    /// Konvertiert eine GPX-Datei in eine Travel-Datei
    Convert {
        /// GPX-Eingabedatei
        input: PathBuf,
        /// Travel-Ausgabedatei
        output: PathBuf,
    },
    /// Liest eine Travel-Datei (beliebiges Format) und schreibt das aktuelle Format
    Recompress {
        /// Travel-Eingabedatei
        input: PathBuf,
        /// Travel-Ausgabedatei
        output: PathBuf,
    },
    /// Berechnet die Druckansichten einer Route
    PrintViews {
        /// Eingabedatei (.trv oder .gpx)
        file: PathBuf,
        /// Index der Route innerhalb der Reise
        #[arg(long, default_value_t = 0)]
        route: usize,
    },
}

fn main() -> Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let options_path = cli
        .options
        .clone()
        .unwrap_or_else(EditorOptions::config_path);
    let options = EditorOptions::load_from_file(&options_path);

    match cli.command {
        Command::Info { file } => info(&file, &options),
        Command::Convert { input, output } => convert(&input, &output, &options),
        Command::Recompress { input, output } => recompress(&input, &output),
        Command::PrintViews { file, route } => print_views(&file, route, &options),
    }
}

/// Lädt eine Datei anhand der Endung als GPX oder Travel.
fn load(file: &Path, options: &EditorOptions) -> Result<Travel> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Datei konnte nicht gelesen werden: {}", file.display()))?;

    if file
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("gpx"))
    {
        parse_gpx(&content, options)
    } else {
        read_travel(&content)
    }
}

fn info(file: &Path, options: &EditorOptions) -> Result<()> {
    let travel = load(file, options)?;

    println!("Reise '{}': {} Routen", travel.name, travel.routes.len());
    for (index, route) in travel.routes.iter().enumerate() {
        println!(
            "Route {} '{}': {} Punkte, {} Manöver, {} Wegpunkte, {:.1} m",
            index,
            route.name,
            route.itinerary.itinerary_points.len(),
            route.itinerary.maneuvers.len(),
            route.way_points.len(),
            route.distance
        );
        if route.itinerary.has_profile {
            println!(
                "    Profil: +{:.1} m / -{:.1} m",
                route.itinerary.ascent, route.itinerary.descent
            );
        }
    }

    Ok(())
}

fn convert(input: &Path, output: &Path, options: &EditorOptions) -> Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Datei konnte nicht gelesen werden: {}", input.display()))?;
    let travel = parse_gpx(&content, options)?;

    std::fs::write(output, write_travel(&travel)?)
        .with_context(|| format!("Datei konnte nicht geschrieben werden: {}", output.display()))?;

    log::info!("Konvertiert: {} -> {}", input.display(), output.display());
    Ok(())
}

fn recompress(input: &Path, output: &Path) -> Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Datei konnte nicht gelesen werden: {}", input.display()))?;
    let travel = read_travel(&content)?;

    std::fs::write(output, write_travel(&travel)?)
        .with_context(|| format!("Datei konnte nicht geschrieben werden: {}", output.display()))?;

    log::info!("Umgeschrieben: {} -> {}", input.display(), output.display());
    Ok(())
}

fn print_views(file: &Path, route_index: usize, options: &EditorOptions) -> Result<()> {
    let travel = load(file, options)?;
    let route = travel
        .routes
        .get(route_index)
        .with_context(|| format!("Route {} existiert nicht", route_index))?;

    let factory = PrintViewsFactory::new(LatLng::new(
        options.print_view_max_lat,
        options.print_view_max_lng,
    ));
    let views = factory.views_for_route(route)?;

    println!("{} Ansichten für Route {}", views.len(), route_index);
    for (index, view) in views.iter().enumerate() {
        println!(
            "{}: ({:.5}, {:.5}) - ({:.5}, {:.5}), Eintritt ({:.5}, {:.5}), Austritt ({:.5}, {:.5})",
            index,
            view.bottom_left.lat,
            view.bottom_left.lng,
            view.upper_right.lat,
            view.upper_right.lng,
            view.entry_point.lat,
            view.entry_point.lng,
            view.exit_point.lat,
            view.exit_point.lng
        );
    }

    Ok(())
}
