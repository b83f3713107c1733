//! Interactive board viewer using kiss3d.
//!
//! Tiles are flat boxes coloured by a gradient over their home position, so a
//! solved board reads as a smooth ramp. Arrow keys slide a tile into the blank,
//! `S` shuffles, and `Space` solves and animates the solution.

use std::time::Instant;

use kiss3d::prelude::*;

use slider::board::{position_to_coord, Direction};
use slider::config::PuzzleConfig;
use slider::error::Result;
use slider::session::Session;
use slider::tiles::{Tile, TileSlicer};

/// Colours each tile by its home row and column in place of decoded pixels.
pub struct PaletteSlicer;

impl TileSlicer for PaletteSlicer {
    type Bitmap = Color;

    fn slice(&self, dim: usize) -> Vec<Tile<Color>> {
        let cells = dim * dim;
        let span = (dim - 1).max(1) as f32;

        (0..cells)
            .map(|identity| {
                let (row, col) = (identity / dim, identity % dim);
                let bitmap = (identity + 1 < cells).then(|| {
                    Color::new(
                        0.2 + 0.8 * col as f32 / span,
                        0.2 + 0.8 * row as f32 / span,
                        0.9 - 0.6 * (row + col) as f32 / (2.0 * span),
                        1.0,
                    )
                });
                Tile {
                    identity: identity as u8,
                    bitmap,
                }
            })
            .collect()
    }
}

/// Builds the scene for the current board.
///
/// Coordinate conventions:
/// - Board rows grow downwards, world Y grows upwards, so rows are negated.
/// - The grid is centered at the origin.
/// - The blank gets no node.
fn build_scene<const DIM: usize, const CELLS: usize, R>(
    scene: &mut SceneNode3d,
    session: &Session<DIM, CELLS, Color, R>,
) -> Vec<SceneNode3d>
where
    R: slider::scramble::MovePicker,
{
    /// Edge length of a rendered tile (slightly under 1.0 for visible gaps).
    const TILE_SIZE: f32 = 0.92;
    /// Thickness of a rendered tile.
    const TILE_DEPTH: f32 = 0.2;

    let center = (DIM as f32 - 1.0) / 2.0;

    session
        .cells()
        .filter_map(|cell| {
            let color = cell.bitmap?;
            let (row, col) = position_to_coord::<DIM>(cell.position);
            let position = Vec3::new(col as f32 - center, center - row as f32, 0.0);
            Some(
                scene
                    .add_cube(TILE_SIZE, TILE_SIZE, TILE_DEPTH)
                    .set_color(*color)
                    .set_position(position),
            )
        })
        .collect()
}

fn window_title<const DIM: usize, const CELLS: usize, R>(
    session: &Session<DIM, CELLS, Color, R>,
) -> String
where
    R: slider::scramble::MovePicker,
{
    let status = if session.is_solving() {
        "solving"
    } else if session.board().is_solved() {
        "solved"
    } else {
        "[Arrows] slide, [S] shuffle, [Space] solve"
    };
    format!("{DIM}x{DIM} puzzle - {status}")
}

/// Opens an interactive viewer for a freshly scrambled `DIM x DIM` puzzle.
pub fn display<const DIM: usize, const CELLS: usize>(config: PuzzleConfig) -> Result<()> {
    pollster::block_on(display_async::<DIM, CELLS>(config))
}

async fn display_async<const DIM: usize, const CELLS: usize>(config: PuzzleConfig) -> Result<()> {
    let rng = config.rng();
    let mut session = Session::<DIM, CELLS, Color, _>::new(&PaletteSlicer, config, rng)?;

    let mut window = Window::new(&window_title(&session)).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(DIM as f32 * 2.5);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(0.0, 0.0, 10.0));

    let mut rendered_tiles = build_scene(&mut scene, &session);

    loop {
        // whether the board changed since the last frame
        let mut needs_rebuild = false;

        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                if action != Action::Press {
                    continue;
                }
                let direction = match key {
                    Key::Up => Some(Direction::Up),
                    Key::Down => Some(Direction::Down),
                    Key::Left => Some(Direction::Left),
                    Key::Right => Some(Direction::Right),
                    Key::S => {
                        needs_rebuild |= session.shuffle();
                        None
                    }
                    Key::Space => {
                        if let Err(e) = session.solve() {
                            tracing::error!("solve failed: {e}");
                        }
                        needs_rebuild = true;
                        None
                    }
                    _ => None,
                };
                if let Some(target) = direction.and_then(|d| session.board().target_for(d)) {
                    needs_rebuild |= session.move_to(target);
                }
            }
        }

        if session.tick(Instant::now()).is_some() {
            needs_rebuild = true;
        }

        if needs_rebuild {
            for mut node in rendered_tiles.drain(..) {
                node.remove();
            }
            rendered_tiles = build_scene(&mut scene, &session);
            window.set_title(&window_title(&session));
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }

    Ok(())
}
