//! ETABS Viz command line - plan view of column joint displacements

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use etabs_viz::prelude::*;
use etabs_viz::report;

#[derive(Debug, Parser)]
#[command(name = "etabs-viz", version, about = "Column joint displacements from an ETABS export")]
struct Cli {
    /// ETABS workbook (.xlsx); falls back to ETABS_WORKBOOK or the config file
    workbook: Option<PathBuf>,

    /// Story to show (default: first story)
    #[arg(long)]
    story: Option<String>,

    /// Output case to show (default: first case)
    #[arg(long = "case")]
    load_case: Option<String>,

    /// Displacement component: ux, uy or uz
    #[arg(long)]
    direction: Option<Direction>,

    /// Display scale factor
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=10))]
    scale: Option<u32>,

    /// Write the display table to this CSV file instead of stdout
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the plot points and display table as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print stories and load cases and exit
    #[arg(long)]
    list: bool,

    /// JSON file with viewer options
    #[arg(long)]
    config: Option<PathBuf>,
}

fn options(cli: &Cli) -> anyhow::Result<ViewerOptions> {
    let mut options = match &cli.config {
        Some(path) => ViewerOptions::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => ViewerOptions::default(),
    }
    .with_env();

    if let Some(path) = &cli.workbook {
        options = options.with_workbook(path);
    }
    if let Some(direction) = cli.direction {
        options = options.with_direction(direction);
    }
    if let Some(scale) = cli.scale {
        options = options.with_scale(ScaleFactor::new(scale)?);
    }
    Ok(options)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let options = options(&cli)?;

    let path = options
        .workbook
        .clone()
        .context("no workbook given (argument, ETABS_WORKBOOK or config)")?;
    let model = DisplacementModel::open_with(&path, &options)
        .with_context(|| format!("loading {}", path.display()))?;

    if cli.list {
        print!("{}", report::render_options(&model));
        return Ok(());
    }

    let defaults = model.default_selection();
    let story = cli
        .story
        .clone()
        .or_else(|| defaults.as_ref().map(|s| s.story.clone()))
        .context("workbook has no joined displacement rows")?;
    let load_case = cli
        .load_case
        .clone()
        .or_else(|| defaults.as_ref().map(|s| s.load_case.clone()))
        .context("workbook has no joined displacement rows")?;

    let selection = Selection::new(&story, &load_case)
        .with_direction(options.direction)
        .with_scale(options.scale);
    let view = model.view(&selection)?;

    if let Some(json) = &cli.json {
        std::fs::write(json, view.to_json()?)
            .with_context(|| format!("writing {}", json.display()))?;
    }

    match &cli.csv {
        Some(csv) => {
            view.write_csv(csv)
                .with_context(|| format!("writing {}", csv.display()))?;
            eprint!("{}", report::render_view(&view));
            log::info!("Wrote {}", csv.display());
        }
        None => print!("{}", view.to_csv()?),
    }
    Ok(())
}
