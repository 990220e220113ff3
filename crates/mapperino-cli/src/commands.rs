//! Command handler

use indicatif::{ProgressBar, ProgressStyle};
use mapperino_app::app::{plan_tiles, stage_tiles, upload_tiles, ProgressCallback, Staging};
use mapperino_app::client::open_upload_client;
use mapperino_app::config::Config;
use mapperino_domain::{split_file, Tile, TileNaming};
use mapperino_types::Result;
use tracing::{debug, info};

use crate::cli::Cli;
use crate::output::{emit, format_commands, format_plan};

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let mode = cli.split_mode()?;
    let naming = TileNaming::from_path(&cli.image)?;
    let tiles = split_file(&cli.image, mode)?;
    info!(
        image = %cli.image.display(),
        tiles = tiles.len(),
        ?mode,
        "image split"
    );

    if cli.no_upload {
        return cmd_dry_run(&cli, &tiles, &naming);
    }
    cmd_upload(&cli, &tiles, &naming)
}

fn cmd_dry_run(cli: &Cli, tiles: &[Tile], naming: &TileNaming) -> Result<()> {
    if let Some(ref dir) = cli.keep_tiles {
        let staging = Staging::keep(dir.clone())?;
        let written = stage_tiles(tiles, naming, &staging)?;
        info!(dir = %dir.display(), files = written.len(), "tiles staged");
    }

    let plan = plan_tiles(tiles, naming);
    emit(&format_plan(cli.format, &plan)?, cli.output.as_deref())
}

fn cmd_upload(cli: &Cli, tiles: &[Tile], naming: &TileNaming) -> Result<()> {
    let config = Config::load()?;
    let client = open_upload_client(&config, cli.service)?;
    debug!(service = %cli.service, "upload client ready");

    let staging = match cli.keep_tiles {
        Some(ref dir) => Staging::keep(dir.clone())?,
        None => Staging::temporary()?,
    };

    let pb = ProgressBar::new(tiles.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    let on_progress: ProgressCallback<'_> = &|p| {
        pb.set_position(p.completed as u64);
        pb.set_message(p.remote_name.to_string());
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(upload_tiles(
        &client,
        tiles,
        naming,
        &staging,
        Some(on_progress),
    ));

    match result {
        Ok(commands) => {
            pb.finish_and_clear();
            info!(commands = commands.len(), "upload complete");
            emit(&format_commands(cli.format, &commands)?, cli.output.as_deref())
        }
        Err(e) => {
            pb.abandon();
            Err(e)
        }
    }
}
