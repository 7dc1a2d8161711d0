use std::{collections::HashMap, path::Path, sync::Arc};

use autotile_wizard::{config::WindowConfig, CardinalDirs, Command, Session, Stage, Tile};
use glam::{IVec2, UVec2};
use image::RgbaImage;
use pixels::Pixels;
use winit::{
    event::{ElementState, Event, KeyboardInput, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};

use crate::{
    canvas::{mask_color, Canvas, Rgba},
    error::AppError,
    input::{self, Action},
};

const BACKGROUND: Rgba = [32, 32, 40, 255];
const PLACEHOLDER: Rgba = [16, 16, 16, 255];
const MISSING: Rgba = [255, 0, 255, 255];
const STRIP: Rgba = [48, 48, 64, 255];
const HOVER: Rgba = [255, 220, 0, 255];
const SELECTED: Rgba = [80, 160, 255, 255];

const NO_TINT: [f32; 3] = [1.0, 1.0, 1.0];
const NON_SOLID_TINT: [f32; 3] = [1.0, 0.5, 0.5];

const BAR_WIDTH: u32 = 4;
const BAR_GAP: i32 = 2;

/// Decoded source images, loaded on first use
#[derive(Default)]
struct ImageCache {
    images: HashMap<Arc<Path>, Option<RgbaImage>>,
}

impl ImageCache {
    fn get(&mut self, path: &Arc<Path>) -> Option<&RgbaImage> {
        return self
            .images
            .entry(path.clone())
            .or_insert_with(|| match image::open(path) {
                Ok(image) => Some(image.to_rgba8()),
                Err(err) => {
                    log::error!("failed to load {}: {err}", path.display());
                    None
                }
            })
            .as_ref();
    }
}

pub struct EditorWindow {
    window: Window,
    pixels: Pixels,
    frame_dims: UVec2,
    tile_size: u32,
    images: ImageCache,
    status: Option<String>,
    shift: bool,
}

impl EditorWindow {
    pub fn new(
        event_loop: &EventLoop<()>,
        config: &WindowConfig,
        tile_size: u32,
    ) -> Result<Self, AppError> {
        let frame_dims = UVec2::new(config.width, config.height);
        let size = winit::dpi::LogicalSize::new(
            frame_dims.x * config.pixel_scale,
            frame_dims.y * config.pixel_scale,
        );
        let window = winit::window::WindowBuilder::new()
            .with_title("autotile wizard")
            .with_inner_size(size)
            .with_min_inner_size(size)
            .with_max_inner_size(size)
            .build(event_loop)?;

        let pixels = Self::new_pixels(frame_dims, &window)?;
        return Ok(Self {
            window,
            pixels,
            frame_dims,
            tile_size,
            images: ImageCache::default(),
            status: None,
            shift: false,
        });
    }

    fn new_pixels(frame_dims: UVec2, window: &Window) -> Result<Pixels, pixels::Error> {
        let size = window.inner_size();
        let surface_texture = pixels::SurfaceTexture::new(size.width, size.height, window);
        return pixels::PixelsBuilder::new(frame_dims.x, frame_dims.y, surface_texture)
            .blend_state(pixels::wgpu::BlendState::REPLACE)
            .build();
    }

    pub fn run(mut self, event_loop: EventLoop<()>, mut session: Session) -> ! {
        self.window.set_title(&self.title(&session));
        event_loop.run(move |event, _, control_flow| {
            *control_flow = ControlFlow::Wait;
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                    WindowEvent::ModifiersChanged(modifiers) => self.shift = modifiers.shift(),
                    WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                state: ElementState::Pressed,
                                virtual_keycode: Some(key),
                                ..
                            },
                        ..
                    } => match input::action_for(session.stage(), key, self.shift) {
                        Some(Action::Quit) => *control_flow = ControlFlow::Exit,
                        Some(Action::Apply(command)) => {
                            self.apply(&mut session, command);
                            self.window.request_redraw();
                        }
                        None => {}
                    },
                    _ => {}
                },
                Event::RedrawRequested(_window_id) => {
                    self.draw(&session);
                    if let Err(err) = self.pixels.render() {
                        log::error!("pixels.render() failed: {err}");
                        *control_flow = ControlFlow::Exit;
                    }
                }
                _ => {}
            }
        });
    }

    fn apply(&mut self, session: &mut Session, command: Command) {
        let was_complete = session.is_pairing_complete();
        match session.apply(command) {
            Ok(()) => self.status = None,
            Err(err) => {
                log::error!("{err}");
                self.status = Some(err.to_string());
            }
        }
        if !was_complete && session.is_pairing_complete() {
            for (anchor, dir, neighbor) in session.graph().allowed_pairs() {
                log::debug!("allowed: {anchor} {} {neighbor}", dir.name());
            }
        }
        self.window.set_title(&self.title(session));
    }

    fn title(&self, session: &Session) -> String {
        let text = match session.stage() {
            Stage::Selection => match (session.active_group(), session.active_group_index()) {
                (Some(group), Some(index)) => format!(
                    "{} [{}/{}] - {} selected",
                    group.name(),
                    index + 1,
                    session.groups().len(),
                    session.catalog().len()
                ),
                _ => "no tilegroups loaded".to_string(),
            },
            Stage::Masks => match session.mask_tile() {
                Some(tile) => {
                    let masks: Vec<String> = CardinalDirs::iter()
                        .map(|&dir| format!("{} {}", dir.name(), tile.masks[dir].value()))
                        .collect();
                    format!(
                        "tile {} ({}/{}) {}{}",
                        tile.id,
                        session.mask_cursor().current() + 1,
                        session.catalog().len(),
                        masks.join(", "),
                        if tile.non_solid { " non-solid" } else { "" }
                    )
                }
                None => "no tiles".to_string(),
            },
            Stage::Pairing => match (session.prompt(), session.pairing_progress()) {
                (Some(pairing), Some((passed, total))) => format!(
                    "Does this pairing tile properly? {} {} of {} [{passed}/{total}]",
                    session.catalog()[pairing.candidate].id,
                    pairing.direction.name(),
                    session.catalog()[pairing.anchor].id,
                ),
                _ => format!(
                    "pairing complete, {} allowed pairs",
                    session.graph().allowed_pairs().count()
                ),
            },
        };
        return match &self.status {
            Some(status) => format!("{status} | {text}"),
            None => text,
        };
    }

    fn draw(&mut self, session: &Session) {
        let tile_size = self.tile_size;
        let mut canvas = Canvas::new(self.pixels.get_frame_mut(), self.frame_dims);
        canvas.clear(BACKGROUND);
        match session.stage() {
            Stage::Selection => draw_selection(&mut canvas, &mut self.images, session, tile_size),
            Stage::Masks => draw_masks(&mut canvas, &mut self.images, session, tile_size),
            Stage::Pairing => draw_pairing(&mut canvas, &mut self.images, session, tile_size),
        }
    }
}

fn draw_tile(canvas: &mut Canvas, images: &mut ImageCache, tile: &Tile, at: IVec2, tint: [f32; 3]) {
    if tile.is_ignored() {
        canvas.fill_rect(at, tile.rect.size, PLACEHOLDER);
        return;
    }
    match images.get(&tile.image) {
        Some(image) => canvas.blit(image, tile.rect, at, tint),
        None => canvas.fill_rect(at, tile.rect.size, MISSING),
    }
}

fn solidity_tint(tile: &Tile) -> [f32; 3] {
    return if tile.non_solid { NON_SOLID_TINT } else { NO_TINT };
}

fn centered(canvas: &Canvas, tile_size: u32) -> IVec2 {
    return (canvas.dims().as_ivec2() - IVec2::splat(tile_size as i32)) / 2;
}

fn draw_selection(canvas: &mut Canvas, images: &mut ImageCache, session: &Session, tile_size: u32) {
    let ts = tile_size as i32;
    let strip_x = canvas.dims().x as i32 - ts;

    if let Some(group) = session.active_group() {
        // keep the hovered cell inside the area left of the strip
        let view = IVec2::new(strip_x, canvas.dims().y as i32);
        let hover = session.hover().as_ivec2() * ts;
        let camera = (hover + IVec2::splat(ts) - view).max(IVec2::ZERO);

        for (i, tile) in group.tiles().iter().enumerate() {
            let at = group.cell_of(i).as_ivec2() * ts - camera;
            draw_tile(canvas, images, tile, at, NO_TINT);
            if session.catalog().iter().any(|selected| selected.same_source(tile)) {
                canvas.highlight(at, tile.rect.size, SELECTED, 0.4);
            }
        }
        canvas.outline_rect(hover - camera, UVec2::splat(tile_size), HOVER);
    }

    canvas.fill_rect(
        IVec2::new(strip_x, 0),
        UVec2::new(tile_size, canvas.dims().y),
        STRIP,
    );
    for (i, tile) in session.catalog().iter().enumerate() {
        draw_tile(canvas, images, tile, IVec2::new(strip_x, i as i32 * ts), NO_TINT);
    }
}

/// Position and size of the mask bar on the `dir` edge of a tile at `origin`
fn edge_bar(origin: IVec2, tile_size: u32, dir: CardinalDirs) -> (IVec2, UVec2) {
    let ts = tile_size as i32;
    let bar = BAR_WIDTH as i32;
    return match dir {
        CardinalDirs::Up => (
            origin + IVec2::new(0, -BAR_GAP - bar),
            UVec2::new(tile_size, BAR_WIDTH),
        ),
        CardinalDirs::Down => (
            origin + IVec2::new(0, ts + BAR_GAP),
            UVec2::new(tile_size, BAR_WIDTH),
        ),
        CardinalDirs::Left => (
            origin + IVec2::new(-BAR_GAP - bar, 0),
            UVec2::new(BAR_WIDTH, tile_size),
        ),
        CardinalDirs::Right => (
            origin + IVec2::new(ts + BAR_GAP, 0),
            UVec2::new(BAR_WIDTH, tile_size),
        ),
    };
}

fn draw_masks(canvas: &mut Canvas, images: &mut ImageCache, session: &Session, tile_size: u32) {
    let Some(tile) = session.mask_tile() else {
        return;
    };
    let origin = centered(canvas, tile_size);
    draw_tile(canvas, images, tile, origin, solidity_tint(tile));
    for &dir in CardinalDirs::iter() {
        let (pos, size) = edge_bar(origin, tile_size, dir);
        canvas.fill_rect(pos, size, mask_color(tile.masks[dir]));
    }
}

fn draw_pairing(canvas: &mut Canvas, images: &mut ImageCache, session: &Session, tile_size: u32) {
    let Some(pairing) = session.prompt() else {
        return;
    };
    let catalog = session.catalog();
    let (Some(anchor), Some(candidate)) = (catalog.get(pairing.anchor), catalog.get(pairing.candidate)) else {
        return;
    };
    let origin = centered(canvas, tile_size);
    let offset = IVec2::from(pairing.direction) * tile_size as i32;
    draw_tile(canvas, images, anchor, origin, solidity_tint(anchor));
    draw_tile(canvas, images, candidate, origin + offset, solidity_tint(candidate));
}
