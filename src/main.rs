use std::collections::HashSet;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use tile_caster::{GridMap, Player, SimConfig, SimError, Vector, World};

mod camera;
mod renderer;

const MAP: [&str; 12] = [
    "1111111111111111",
    "1..............1",
    "1..2....o...3..1",
    "1..2...........1",
    "1......22......1",
    "1.o....22...o..1",
    "1..............1",
    "1...3.....4....1",
    "1...3..........1",
    "1.......o..4...1",
    "1..............1",
    "1111111111111111",
];

/// Demo level: digits are wall ids, `o` spawns a pillar sprite.
fn build_world() -> Result<World, SimError> {
    let (w, h) = (MAP[0].len(), MAP.len());
    let mut grid = GridMap::new(w, h, vec![0; w * h], vec![0; w * h])?;
    for (y, row) in MAP.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            match c {
                'o' => {
                    grid.set_spawn(x as i32, y as i32, 3);
                }
                d => {
                    if let Some(id) = d.to_digit(10) {
                        grid.set_wall(x as i32, y as i32, id);
                    }
                }
            }
        }
    }
    let player = Player::new(Vector::new(7.5, 9.5), Vector::new(0.0, -1.0), 0.66);
    Ok(World::new(grid, player, SimConfig::default()))
}

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    world: World,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,

    // Input
    keys_down: HashSet<KeyCode>,
    last_tick: Instant,
}

impl App {
    fn new(world: World) -> Self {
        Self {
            window: None,
            surface: None,
            world,
            frame_counter: 0,
            last_fps_print: Instant::now(),
            keys_down: HashSet::new(),
            last_tick: Instant::now(),
        }
    }

    fn axis(&self, neg: &[KeyCode], pos: &[KeyCode]) -> f32 {
        let held = |keys: &[KeyCode]| keys.iter().any(|k| self.keys_down.contains(k));
        match (held(neg), held(pos)) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    fn tick(&mut self) {
        // Compute dt with cap to avoid huge jumps if the app was paused
        let now = Instant::now();
        let dt = now
            .duration_since(self.last_tick)
            .min(Duration::from_millis(100));
        self.last_tick = now;

        // Input is re-asserted every frame, rotation is consumed by update
        let move_dir = Vector::new(
            self.axis(&[KeyCode::KeyA], &[KeyCode::KeyD]),
            self.axis(&[KeyCode::KeyW], &[KeyCode::KeyS]),
        );
        let rotate_dir = self.axis(
            &[KeyCode::KeyQ, KeyCode::ArrowLeft],
            &[KeyCode::KeyE, KeyCode::ArrowRight],
        );
        self.world.player.move_dir = move_dir;
        self.world.player.rotate_dir = rotate_dir;

        self.world.update(dt.as_secs_f32());
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attributes = Window::default_attributes()
            .with_title("tile_caster")
            .with_inner_size(LogicalSize::new(800.0, 600.0));

        let window = Rc::new(event_loop.create_window(attributes).expect("create window"));

        let context = softbuffer::Context::new(window.clone()).expect("softbuffer context");
        let surface =
            softbuffer::Surface::new(&context, window.clone()).expect("softbuffer surface");

        self.surface = Some(surface);
        self.last_tick = Instant::now();
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested, exiting");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    if code == KeyCode::Space && !repeat {
                        self.world.shoot();
                    }
                    if code == KeyCode::Escape {
                        event_loop.exit();
                    }
                    self.keys_down.insert(code);
                }
                ElementState::Released => {
                    self.keys_down.remove(&code);
                }
            },

            WindowEvent::RedrawRequested => {
                self.tick();

                let (window, surface) = match (&self.window, &mut self.surface) {
                    (Some(w), Some(s)) if w.id() == id => (w, s),
                    _ => return,
                };

                let size = window.inner_size();
                let dims = (NonZeroU32::new(size.width), NonZeroU32::new(size.height));
                let (Some(dw), Some(dh)) = dims else {
                    return; // Minimized window, skip drawing
                };

                if let Err(err) = surface.resize(dw, dh) {
                    log::error!("surface resize failed: {err}");
                    return;
                }
                let mut buf = match surface.buffer_mut() {
                    Ok(buf) => buf,
                    Err(err) => {
                        log::error!("no frame buffer: {err}");
                        return;
                    }
                };

                renderer::render_frame(
                    &mut buf,
                    dw.get() as usize,
                    dh.get() as usize,
                    &self.world,
                );

                if let Err(err) = buf.present() {
                    log::error!("present failed: {err}");
                }

                self.frame_counter += 1;
                let now = Instant::now();
                let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
                if elapsed >= 1.0 {
                    log::info!(
                        "FPS: {:.1}, sprites: {}",
                        self.frame_counter as f32 / elapsed,
                        self.world.sprites.count()
                    );
                    self.frame_counter = 0;
                    self.last_fps_print = now;
                }

                window.request_redraw();
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let world = match build_world() {
        Ok(world) => world,
        Err(err) => {
            log::error!("invalid level: {err}");
            std::process::exit(1);
        }
    };

    let event_loop = EventLoop::new().expect("create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(world);
    if let Err(err) = event_loop.run_app(&mut app) {
        log::error!("event loop error: {err}");
    }
}
