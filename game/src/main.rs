mod config;
mod mesh;
mod player;

use {
    color_eyre::Report,
    config::Config,
    marionette::Figure,
    mesh::MeshProxy,
    player::Player,
    std::io::BufRead as _,
    tracing_subscriber::{fmt, prelude::*, EnvFilter},
};

fn main() -> Result<(), Report> {
    install_tracing()?;
    color_eyre::install()?;

    let config = Config::load_default()?;
    let mut figure = Figure::new(&config.engine)?;
    let player = Player::new(config.game.action_map.clone());

    let mut meshes: Vec<_> = figure
        .shapes()
        .map(|(name, shape)| MeshProxy::new(name, shape))
        .collect();
    figure.present(&mut meshes)?;

    tracing::info!(
        components = ?figure.joint_names().collect::<Vec<_>>(),
        selected = figure.selected_component(),
        "Figure ready"
    );

    let stdin = std::io::stdin();
    let mut frame = 0u64;

    // Main loop: one line of input, then pose update, then present.
    for line in stdin.lock().lines() {
        let line = line?;
        let (repeat, snapshot) = player.translate_line(&line);

        for _ in 0..repeat {
            figure.apply_input(&snapshot);
            figure.present(&mut meshes)?;
            frame += 1;
        }

        let position = figure.rig().displacement().translation();
        tracing::info!(
            frame,
            selected = figure.selected_component(),
            position = ?[position.x, position.y, position.z],
            "Frame"
        );

        if config.game.log_meshes {
            for mesh in &meshes {
                tracing::info!(
                    mesh = mesh.name(),
                    shape = ?mesh.shape(),
                    center = ?mesh.center(),
                    "Mesh"
                );
            }
        }
    }

    Ok(())
}

fn install_tracing() -> Result<(), Report> {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();

    Ok(())
}
