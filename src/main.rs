use anyhow::Context;
use macroquad::prelude::*;
use macroquad_tile_rpg::game::{Camera, Coin, Enemy, InputState, Player, PlayerClass, Sprite, World};
use macroquad_tile_rpg::render::texture_from_image;
use macroquad_tile_rpg::{load_tilemap, GameConfig, MapRenderer};

const CONFIG_PATH: &str = "assets/game.json";

struct SpriteTextures {
    player: Texture2D,
    enemy: Texture2D,
    coin: Texture2D,
}

fn load_sprite(path: &std::path::Path) -> anyhow::Result<Texture2D> {
    let img = ::image::open(path)
        .with_context(|| format!("Loading sprite {}", path.display()))?
        .into_rgba8();
    texture_from_image(&img)
        .with_context(|| format!("Sprite {} is too large for a texture", path.display()))
}

fn draw_sprite(tex: &Texture2D, sprite: &Sprite, offset: Vec2) {
    draw_texture_ex(
        tex,
        sprite.position.x + offset.x,
        sprite.position.y + offset.y,
        WHITE,
        DrawTextureParams {
            source: Some(Rect::new(0.0, 0.0, Sprite::SIZE, Sprite::SIZE)),
            ..Default::default()
        },
    );
}

fn build_world(config: &GameConfig, map_size: Vec2) -> World {
    let [px, py] = config.player_start;
    World {
        player: Player {
            sprite: Sprite::new(px, py),
            health: 100,
            experience: 0,
            speed: config.player_speed,
            class: PlayerClass::Ranged { range_bonus: 0.0 },
        },
        enemies: config
            .enemy_spawns
            .iter()
            .map(|&[x, y]| Enemy {
                sprite: Sprite::new(x, y),
                follows_player: true,
                can_attack_player: false,
                can_attack_enemy: false,
            })
            .collect(),
        coins: config
            .coin_spawns
            .iter()
            .map(|&[x, y]| Coin {
                sprite: Sprite::new(x, y),
                amount_xp: config.coin_xp,
            })
            .collect(),
        camera: Camera::default(),
        map_size,
        enemy_speed: config.enemy_speed,
    }
}

async fn run(config: GameConfig) -> anyhow::Result<()> {
    let map = load_tilemap(&config.map).context("Loading map")?;
    let tilesets = map.generate_tilesets(&config.map).context("Loading tilesets")?;
    let renderer = MapRenderer::new(&map, &tilesets);

    let sprites = SpriteTextures {
        player: load_sprite(&config.player_image)?,
        enemy: load_sprite(&config.enemy_image)?,
        coin: load_sprite(&config.coin_image)?,
    };

    let (map_w, map_h) = map.pixel_size();
    let mut world = build_world(&config, vec2(map_w, map_h));
    log::info!(
        "Player class: {}, attack range: {:.2}",
        world.player.class.name(),
        world.player.class.attack_range()
    );

    let [r, g, b, a] = config.background;
    let background = Color::from_rgba(r, g, b, a);

    loop {
        let screen = vec2(screen_width(), screen_height());
        world.update(&InputState::poll(), screen);

        clear_background(background);
        let offset = world.camera.offset();
        renderer.draw(offset, screen);
        draw_sprite(&sprites.player, &world.player.sprite, offset);
        for enemy in &world.enemies {
            draw_sprite(&sprites.enemy, &enemy.sprite, offset);
        }
        for coin in &world.coins {
            draw_sprite(&sprites.coin, &coin.sprite, offset);
        }

        next_frame().await;
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match GameConfig::load_or_default(CONFIG_PATH) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err:#}");
            std::process::exit(1);
        }
    };

    let conf = Conf {
        window_title: config.window_title.clone(),
        window_width: config.window_width,
        window_height: config.window_height,
        window_resizable: true,
        ..Default::default()
    };

    macroquad::Window::from_config(conf, async move {
        if let Err(err) = run(config).await {
            log::error!("{err:#}");
        }
    });
}
