//! Active gameplay scene
//!
//! Owns the player, enemies, potions, map, colliders and camera. Gameplay
//! state (`GameWorld`) is kept apart from GPU assets (`GameAssets`): the
//! fixed-step tick only touches the former, so it runs headless in tests.

use std::path::Path;

use macroquad::prelude::*;

use crate::animation::{player_sheet, Animation, SpriteSheet};
use crate::camera::Camera;
use crate::collision::{resolve_horizontal, resolve_vertical, Collider};
use crate::constants::{PLAYER_SPEED, SCREEN_HEIGHT, SCREEN_WIDTH, TILE_SIZE, TILE_SIZE_F};
use crate::entities::{Enemy, Player, Potion};
use crate::input::FrameInput;
use crate::tilemap::TilemapJson;
use crate::tileset::{load_texture_file, LoadError, Tileset};

use super::{Scene, SceneId};

const MAP_PATH: &str = "assets/maps/spawn.json";
const PLAYER_IMAGE: &str = "assets/images/ninja.png";
const SKELETON_IMAGE: &str = "assets/images/skeleton.png";
const POTION_IMAGE: &str = "assets/images/potion.png";

/// Everything the per-tick update mutates. One logical writer per frame;
/// the scene machine guarantees no other scene touches it.
pub struct GameWorld {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub potions: Vec<Potion>,
    pub colliders: Vec<Collider>,
    pub camera: Camera,
    pub map: TilemapJson,
}

impl GameWorld {
    /// One gameplay tick, in contract order: velocity from input, x move +
    /// horizontal resolve, y move + vertical resolve, animation, enemy AI
    /// (same axis-by-axis movement), pickups, camera follow + constrain.
    pub fn step(&mut self, input: &FrameInput) {
        let player = &mut self.player.sprite;
        player.dx = 0.0;
        player.dy = 0.0;
        if input.up {
            player.dy -= PLAYER_SPEED;
        }
        if input.down {
            player.dy += PLAYER_SPEED;
        }
        if input.left {
            player.dx -= PLAYER_SPEED;
        }
        if input.right {
            player.dx += PLAYER_SPEED;
        }

        // One axis at a time so a diagonal push into a corner still slides
        // along the free axis.
        player.x += player.dx;
        resolve_horizontal(player, &self.colliders);
        player.y += player.dy;
        resolve_vertical(player, &self.colliders);

        if let Some(animation) = self.player.active_animation() {
            animation.update();
        }

        let (player_x, player_y) = (self.player.sprite.x, self.player.sprite.y);
        for enemy in &mut self.enemies {
            enemy.sprite.dx = 0.0;
            enemy.sprite.dy = 0.0;
            enemy.chase_step(player_x, player_y);

            enemy.sprite.x += enemy.sprite.dx;
            resolve_horizontal(&mut enemy.sprite, &self.colliders);
            enemy.sprite.y += enemy.sprite.dy;
            resolve_vertical(&mut enemy.sprite, &self.colliders);
        }

        for potion in &mut self.potions {
            if potion.try_pickup(player_x, &mut self.player.health) {
                println!("Picked up potion! Health: {}", self.player.health);
            }
        }

        self.camera.follow_target(
            player_x + TILE_SIZE_F / 2.0,
            player_y + TILE_SIZE_F / 2.0,
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
        );
        self.camera.constrain(
            self.map.width_px(),
            self.map.height_px(),
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
        );
    }
}

/// GPU-side resources, loaded once at scene start, read only by draw.
struct GameAssets {
    player_texture: Texture2D,
    skeleton_texture: Texture2D,
    potion_texture: Texture2D,
    player_sheet: SpriteSheet,
    /// One resolver per map tileset declaration; layer i draws through
    /// tilesets[i] (positional association, see tilemap module).
    tilesets: Vec<Tileset>,
}

pub struct GameScene {
    world: Option<GameWorld>,
    assets: Option<GameAssets>,
}

impl GameScene {
    pub fn new() -> GameScene {
        GameScene { world: None, assets: None }
    }
}

impl Scene for GameScene {
    /// Load every asset and build the initial entities. Nothing is
    /// published until the whole load succeeded, so a failure leaves no
    /// partial scene state behind.
    fn start(&mut self) -> Result<(), LoadError> {
        let map = TilemapJson::load(Path::new(MAP_PATH))?;
        let tilesets = map.load_tilesets()?;
        let player_texture = load_texture_file(Path::new(PLAYER_IMAGE))?;
        let skeleton_texture = load_texture_file(Path::new(SKELETON_IMAGE))?;
        let potion_texture = load_texture_file(Path::new(POTION_IMAGE))?;
        println!(
            "game scene loaded: {} layers, {} tilesets",
            map.layers.len(),
            tilesets.len()
        );

        self.world = Some(GameWorld {
            player: Player::new(
                50.0,
                50.0,
                3,
                // Indexed by Direction: Down, Up, Left, Right. The sheet
                // is 4 columns wide, one column per facing, so each walk
                // cycle strides by 4.
                [
                    Animation::new(4, 12, 4, 20.0),
                    Animation::new(5, 13, 4, 20.0),
                    Animation::new(6, 14, 4, 20.0),
                    Animation::new(7, 15, 4, 20.0),
                ],
            ),
            enemies: vec![Enemy::new(100.0, 100.0, true), Enemy::new(150.0, 50.0, false)],
            potions: vec![Potion::new(210.0, 100.0, 1)],
            colliders: vec![Collider::new(100, 100, 116, 116)],
            camera: Camera::new(0.0, 0.0),
            map,
        });
        self.assets = Some(GameAssets {
            player_texture,
            skeleton_texture,
            potion_texture,
            player_sheet: player_sheet(),
            tilesets,
        });
        Ok(())
    }

    fn update(&mut self, input: &FrameInput) -> SceneId {
        // Scene shortcuts come before the gameplay tick
        if input.quit_pressed {
            return SceneId::Exit;
        }
        if input.pause_pressed {
            return SceneId::Pause;
        }

        if let Some(world) = &mut self.world {
            world.step(input);
        }
        SceneId::Game
    }

    fn draw(&mut self) {
        let (Some(world), Some(assets)) = (&mut self.world, &self.assets) else {
            return;
        };

        super::set_virtual_camera();
        clear_background(Color::from_rgba(120, 180, 255, 255));
        let camera = world.camera;

        for (layer_index, layer) in world.map.layers.iter().enumerate() {
            let Some(tileset) = assets.tilesets.get(layer_index) else {
                continue;
            };
            for index in 0..layer.data.len() {
                // 0 is the empty cell; unresolvable gids draw as nothing
                let Some(gid) = world.map.tile_at(layer_index, index) else {
                    continue;
                };
                if gid == 0 {
                    continue;
                }
                let Some(tile) = tileset.resolve(gid) else {
                    continue;
                };
                let (cell_x, cell_y) = layer.grid_pos(index);
                let dest_x = (cell_x as i32 * TILE_SIZE) as f32 + camera.x;
                // Bottom anchoring: tiles taller than the grid grow upward
                let dest_y =
                    (cell_y as i32 * TILE_SIZE) as f32 + TILE_SIZE_F - tile.source.h + camera.y;
                draw_texture_ex(
                    tile.texture,
                    dest_x,
                    dest_y,
                    WHITE,
                    DrawTextureParams {
                        source: Some(tile.source),
                        ..Default::default()
                    },
                );
            }
        }

        let frame = world.player.current_frame();
        draw_texture_ex(
            &assets.player_texture,
            world.player.sprite.x + camera.x,
            world.player.sprite.y + camera.y,
            WHITE,
            DrawTextureParams {
                source: Some(assets.player_sheet.rect(frame)),
                ..Default::default()
            },
        );

        let cell = Rect::new(0.0, 0.0, TILE_SIZE_F, TILE_SIZE_F);
        for enemy in &world.enemies {
            draw_texture_ex(
                &assets.skeleton_texture,
                enemy.sprite.x + camera.x,
                enemy.sprite.y + camera.y,
                WHITE,
                DrawTextureParams {
                    source: Some(cell),
                    ..Default::default()
                },
            );
        }

        for potion in world.potions.iter().filter(|p| !p.consumed) {
            draw_texture_ex(
                &assets.potion_texture,
                potion.sprite.x + camera.x,
                potion.sprite.y + camera.y,
                WHITE,
                DrawTextureParams {
                    source: Some(cell),
                    ..Default::default()
                },
            );
        }

        // Collider outlines, handy while authoring maps
        for collider in &world.colliders {
            draw_rectangle_lines(
                collider.min_x as f32 + camera.x,
                collider.min_y as f32 + camera.y,
                collider.width() as f32,
                collider.height() as f32,
                1.0,
                Color::from_rgba(0, 180, 0, 255),
            );
        }
    }

    fn on_enter(&mut self) {
        println!("enter game scene");
    }

    fn on_exit(&mut self) {
        println!("exit game scene");
    }

    fn is_loaded(&self) -> bool {
        self.world.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 30x30-cell (480x480 px) map with no tilesets; step never reads
    /// tile data, only the map bounds.
    fn test_map() -> TilemapJson {
        serde_json::from_str(
            r#"{"layers": [{"data": [], "width": 30, "height": 30}], "tilesets": []}"#,
        )
        .unwrap()
    }

    fn test_world() -> GameWorld {
        GameWorld {
            player: Player::new(
                50.0,
                50.0,
                3,
                [
                    Animation::new(4, 12, 4, 20.0),
                    Animation::new(5, 13, 4, 20.0),
                    Animation::new(6, 14, 4, 20.0),
                    Animation::new(7, 15, 4, 20.0),
                ],
            ),
            enemies: Vec::new(),
            potions: Vec::new(),
            colliders: Vec::new(),
            camera: Camera::new(0.0, 0.0),
            map: test_map(),
        }
    }

    fn held_right() -> FrameInput {
        FrameInput { right: true, ..FrameInput::default() }
    }

    #[test]
    fn held_keys_move_the_player() {
        let mut world = test_world();
        world.step(&held_right());
        assert_eq!(world.player.sprite.x, 52.0);
        assert_eq!(world.player.sprite.dx, PLAYER_SPEED);

        world.step(&FrameInput { down: true, ..FrameInput::default() });
        assert_eq!(world.player.sprite.y, 52.0);
        // Velocity is cleared each tick before input applies
        assert_eq!(world.player.sprite.dx, 0.0);
    }

    #[test]
    fn player_stops_against_a_wall() {
        let mut world = test_world();
        world.colliders = vec![Collider::new(100, 100, 116, 116)];
        world.player.sprite.x = 84.0;
        world.player.sprite.y = 100.0;

        for _ in 0..20 {
            world.step(&held_right());
            let box_x = world.player.sprite.x as i32;
            let box_y = world.player.sprite.y as i32;
            let sprite_box =
                Collider::new(box_x, box_y, box_x + TILE_SIZE, box_y + TILE_SIZE);
            assert!(!world.colliders[0].overlaps(&sprite_box));
        }
        // Flush against the collider's left edge
        assert_eq!(world.player.sprite.x, 84.0);
    }

    #[test]
    fn diagonal_push_into_corner_slides_vertically() {
        let mut world = test_world();
        // Wall covering x in [100, 116) for a tall span
        world.colliders = vec![Collider::new(100, 0, 116, 300)];
        world.player.sprite.x = 84.0;
        world.player.sprite.y = 50.0;

        world.step(&FrameInput { right: true, down: true, ..FrameInput::default() });
        assert_eq!(world.player.sprite.x, 84.0);
        assert_eq!(world.player.sprite.y, 52.0);
    }

    #[test]
    fn following_enemy_closes_in_one_step_per_axis() {
        let mut world = test_world();
        world.player.sprite.x = 150.0;
        world.player.sprite.y = 150.0;
        world.enemies = vec![Enemy::new(100.0, 100.0, true), Enemy::new(200.0, 50.0, false)];

        world.step(&FrameInput::default());
        assert_eq!((world.enemies[0].sprite.x, world.enemies[0].sprite.y), (101.0, 101.0));
        // Non-followers hold position
        assert_eq!((world.enemies[1].sprite.x, world.enemies[1].sprite.y), (200.0, 50.0));
    }

    #[test]
    fn potion_pickup_heals_exactly_once() {
        let mut world = test_world();
        world.player.sprite.x = 215.0;
        world.player.sprite.y = 100.0;
        world.potions = vec![Potion::new(210.0, 100.0, 1)];

        world.step(&FrameInput::default());
        assert_eq!(world.player.health, 4);
        assert!(world.potions[0].consumed);

        // The condition still holds next tick; the heal does not re-apply
        world.step(&FrameInput::default());
        assert_eq!(world.player.health, 4);
    }

    #[test]
    fn camera_tracks_player_within_map_bounds() {
        let mut world = test_world();
        // Near the origin: the follow offset clamps to 0
        world.step(&FrameInput::default());
        assert_eq!((world.camera.x, world.camera.y), (0.0, 0.0));

        // Mid-map: camera centers the player (plus half-cell target offset)
        world.player.sprite.x = 232.0;
        world.player.sprite.y = 232.0;
        world.step(&FrameInput::default());
        assert_eq!((world.camera.x, world.camera.y), (-80.0, -120.0));
    }

    #[test]
    fn shortcuts_override_the_tick() {
        let mut scene = GameScene::new();
        let quit = FrameInput { quit_pressed: true, ..FrameInput::default() };
        let pause = FrameInput { pause_pressed: true, ..FrameInput::default() };
        assert_eq!(scene.update(&quit), SceneId::Exit);
        assert_eq!(scene.update(&pause), SceneId::Pause);
        assert_eq!(scene.update(&FrameInput::default()), SceneId::Game);
    }
}
