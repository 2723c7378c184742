use macroquad::logging::{error, info};
use macroquad::prelude::*;
use tile_platformer::config::{Settings, SETTINGS_FILE};
use tile_platformer::input::FrameInput;
use tile_platformer::level::library::list_levels;
use tile_platformer::plug::{PlugHost, PLUGS};
use tile_platformer::render::draw::Assets;
use tile_platformer::{Session, SCREEN_HEIGHT, SCREEN_WIDTH};

fn window_conf() -> Conf {
    let title = Settings::load(SETTINGS_FILE)
        .map(|s| s.window_title)
        .unwrap_or_else(|_| Settings::default().window_title);
    Conf {
        window_title: title,
        window_width: SCREEN_WIDTH as i32,
        window_height: SCREEN_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    if let Err(e) = run().await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let settings = Settings::load(SETTINGS_FILE)?;
    let assets = Assets::load(&settings.assets_dir).await;

    let mut session = Session::new(&settings);
    let mut host = PlugHost::new(&PLUGS);
    host.init(&mut session);

    let levels = list_levels(&settings.levels_dir)?;
    info!("{} levels in {}", levels.len(), settings.levels_dir.display());
    match settings.start_level_path().or_else(|| levels.first().cloned()) {
        Some(path) => session.load(path),
        None => session.new_level(),
    }

    loop {
        let input = FrameInput::poll();
        if input.reload {
            host.reload(&mut session);
        }
        host.update(&mut session, &input);
        host.render(&session, &assets);
        next_frame().await;
    }
}
