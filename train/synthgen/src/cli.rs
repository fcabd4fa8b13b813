//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use grid_cutter::{ImageKind, Order};

use crate::{
    gnt_export::{GntExportCfg, NamingPolicy},
    render::{MAX_JITTER, RenderCfg},
};

/// Dataset preparation for handwriting/font image translation
#[derive(Parser, Debug)]
#[command(name = "synthgen", version, about, long_about = None)]
pub struct CliArgs {
    /// Debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Errors only
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render one image per character of a font (domain B)
    Fonts(FontsArgs),
    /// Convert GNT handwriting containers into bitmaps (domain A)
    Gnt(GntArgs),
    /// Split an image into an m x n grid of tiles
    Split(SplitArgs),
    /// Paste result images into one m x n sheet
    Combine(CombineArgs),
}

#[derive(Args, Debug)]
pub struct FontsArgs {
    /// Font file (ttf/otf)
    #[arg(long = "font_filename", visible_alias = "font-filename")]
    pub font_filename: PathBuf,

    /// Character list: JSON array or text file of hex code points
    #[arg(long, default_value = "char_list.json")]
    pub char_list: PathBuf,

    #[arg(short, long, default_value = "trainB")]
    pub out_dir: PathBuf,

    /// Canvas side and font size in pixels
    #[arg(long, default_value_t = 128)]
    pub size: u32,

    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub x_offset: i32,

    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub y_offset: i32,

    /// Random shift of up to this many pixels per axis
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(..=MAX_JITTER as i64))]
    pub jitter: u32,

    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

impl From<&FontsArgs> for RenderCfg {
    fn from(a: &FontsArgs) -> Self {
        RenderCfg {
            out_dir: a.out_dir.clone(),
            size: a.size,
            x_offset: a.x_offset,
            y_offset: a.y_offset,
            jitter: a.jitter,
            seed: a.seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct GntArgs {
    /// Directory holding the .gnt containers
    #[arg(default_value = "gnt_files")]
    pub gnt_dir: PathBuf,

    #[arg(short, long, default_value = "trainA")]
    pub out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = NamingPolicy::Label)]
    pub naming: NamingPolicy,
}

impl From<&GntArgs> for GntExportCfg {
    fn from(a: &GntArgs) -> Self {
        GntExportCfg {
            gnt_dir: a.gnt_dir.clone(),
            out_dir: a.out_dir.clone(),
            naming: a.naming,
        }
    }
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    pub image: PathBuf,

    #[arg(short, long)]
    pub out_dir: PathBuf,

    /// Columns
    #[arg(short)]
    pub m: u32,

    /// Rows
    #[arg(short)]
    pub n: u32,

    /// Size of the saved tiles
    #[arg(long, num_args = 2, value_names = ["W", "H"], default_values_t = [128, 128])]
    pub size: Vec<u32>,

    #[arg(long, default_value_t = Order::Horizontal)]
    pub order: Order,
}

impl SplitArgs {
    pub fn tile_size(&self) -> (u32, u32) {
        match self.size.as_slice() {
            [w, h] => (*w, *h),
            _ => (128, 128),
        }
    }
}

#[derive(Args, Debug)]
pub struct CombineArgs {
    pub image_dir: PathBuf,

    #[arg(short, long)]
    pub out_dir: PathBuf,

    #[arg(short)]
    pub m: u32,

    #[arg(short)]
    pub n: u32,

    /// Cell size in pixels
    #[arg(long, default_value_t = 128)]
    pub size: u32,

    #[arg(long, default_value_t = Order::Horizontal)]
    pub order: Order,

    /// Combine real images instead of fake ones
    #[arg(long)]
    pub real: bool,
}

impl CombineArgs {
    pub fn kind(&self) -> ImageKind {
        if self.real { ImageKind::Real } else { ImageKind::Fake }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_gnt_defaults() {
        let args = CliArgs::try_parse_from(["synthgen", "gnt"]).unwrap();
        let Command::Gnt(gnt) = args.command else {
            panic!("expected gnt subcommand");
        };
        let cfg = GntExportCfg::from(&gnt);
        assert_eq!(cfg.gnt_dir, PathBuf::from("gnt_files"));
        assert_eq!(cfg.out_dir, PathBuf::from("trainA"));
        assert_eq!(cfg.naming, NamingPolicy::Label);
    }

    #[test]
    fn test_fonts_args() {
        let args = CliArgs::try_parse_from([
            "synthgen",
            "-v",
            "fonts",
            "--font_filename",
            "kai.ttf",
            "--size",
            "64",
            "--x-offset",
            "-4",
            "--jitter",
            "2",
        ])
        .unwrap();
        assert!(args.verbose);
        let Command::Fonts(fonts) = args.command else {
            panic!("expected fonts subcommand");
        };
        let cfg = RenderCfg::from(&fonts);
        assert_eq!(cfg.size, 64);
        assert_eq!(cfg.x_offset, -4);
        assert_eq!(cfg.jitter, 2);
        assert_eq!(cfg.out_dir, PathBuf::from("trainB"));

        let too_far = CliArgs::try_parse_from([
            "synthgen", "fonts", "--font_filename", "kai.ttf", "--jitter", "5000",
        ]);
        assert!(too_far.is_err());
    }

    #[test]
    fn test_split_and_combine_args() {
        let args = CliArgs::try_parse_from([
            "synthgen", "split", "sheet.png", "-o", "tiles", "-m", "4", "-n", "2", "--size", "64",
            "32", "--order", "vertical",
        ])
        .unwrap();
        let Command::Split(split) = args.command else {
            panic!("expected split subcommand");
        };
        assert_eq!(split.tile_size(), (64, 32));
        assert_eq!(split.order, Order::Vertical);

        let args = CliArgs::try_parse_from([
            "synthgen", "combine", "results", "-o", "out", "-m", "3", "-n", "3", "--real",
        ])
        .unwrap();
        let Command::Combine(combine) = args.command else {
            panic!("expected combine subcommand");
        };
        assert_eq!(combine.kind(), ImageKind::Real);
        assert_eq!(combine.size, 128);

        let bad_order = CliArgs::try_parse_from([
            "synthgen", "split", "a.png", "-o", "t", "-m", "1", "-n", "1", "--order", "diagonal",
        ]);
        assert!(bad_order.is_err());
    }
}
