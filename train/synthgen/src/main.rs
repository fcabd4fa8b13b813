use anyhow::Context;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::{
    cli::{CliArgs, Command},
    generator::GlyphDatasetGenerator,
    gnt_export::{GntExportCfg, export_gnt_dir},
    render::RenderCfg,
};

mod cli;
mod fonts;
mod generator;
mod geom;
mod gnt_export;
mod io;
mod record;
mod render;

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    setup_logging(args.verbose, args.quiet);

    match &args.command {
        Command::Fonts(a) => {
            let cfg = RenderCfg::from(a);
            let font = fonts::load_font(&a.font_filename)?;
            let chars = fonts::load_char_list(&a.char_list)?;
            GlyphDatasetGenerator::new(font, &cfg).generate(&chars)?;
        }
        Command::Gnt(a) => {
            export_gnt_dir(&GntExportCfg::from(a))?;
        }
        Command::Split(a) => {
            grid_cutter::split_and_save(&a.image, &a.out_dir, a.m, a.n, a.tile_size(), a.order)
                .with_context(|| format!("splitting {}", a.image.display()))?;
        }
        Command::Combine(a) => {
            grid_cutter::combine_and_save(
                &a.image_dir,
                &a.out_dir,
                a.m,
                a.n,
                a.size,
                a.order,
                a.kind(),
            )
            .with_context(|| format!("combining images of {}", a.image_dir.display()))?;
        }
    }

    Ok(())
}
