use std::time::Instant;

use campsite3d::{
    abs::{App, GlTextureDevice},
    config::Config,
    error::AppError,
    input::{self, KeyboardState, MouseState, UpdateContext},
    logging,
    render::{camera::Camera, shapes::ShapeMeshes},
    scene::{FrameParams, SceneComposer, SceneDescription},
    shader_program,
};
use glow::HasContext;
use sdl2::{event::Event, keyboard::Keycode};

fn main() {
    let (config, config_error) = match Config::default_path() {
        Some(path) => match Config::load_or_create(&path) {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        },
        None => (Config::default(), None),
    };

    if let Err(e) = logging::setup_logger(&config.log) {
        eprintln!("{e}");
        std::process::exit(1);
    }
    if let Some(e) = config_error {
        log::warn!("{e}, using defaults");
    }

    if let Err(e) = run(&config) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), AppError> {
    let mut app = App::new(&config.window)?;

    unsafe {
        app.gl.enable(glow::DEPTH_TEST);
        app.gl.enable(glow::BLEND);
        app.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
    }

    let mut shader = shader_program!(scene, app.gl).map_err(AppError::Shader)?;

    let description = match &config.scene {
        Some(path) => SceneDescription::from_file(path)?,
        None => SceneDescription::bundled()?,
    };
    let background = description.background;

    let mut shapes = ShapeMeshes::new(&app.gl);
    let mut composer = SceneComposer::new(description, GlTextureDevice::new(&app.gl));
    let report = composer.prepare(&mut shapes, &config.asset_dir);
    log::info!(
        "Scene prepared: {} textures loaded, {} failed, {} materials",
        report.textures_loaded,
        report.texture_failures.len(),
        composer.materials().len()
    );
    if let Some((shape, e)) = report.shape_failures.first() {
        return Err(AppError::Mesh(format!("{shape:?}: {e}")));
    }

    let mut camera = Camera::new(&config.camera);
    let mut keyboard = KeyboardState::default();
    let mut mouse = MouseState::default();
    let (mut width, mut height) = app.size();
    let mut last_frame_time = Instant::now();

    'running: loop {
        let now = Instant::now();
        let delta_time = now.duration_since(last_frame_time).as_secs_f32();
        last_frame_time = now;

        keyboard.begin_frame();
        mouse.begin_frame();

        for event in app.event_pump.poll_iter() {
            input::handle_event(&mut keyboard, &mut mouse, &event);
            match event {
                Event::Quit { .. } => break 'running,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::SizeChanged(..),
                    ..
                } => {
                    (width, height) = app.window.drawable_size();
                    unsafe {
                        app.gl.viewport(0, 0, width as i32, height as i32);
                    }
                }
                _ => {}
            }
        }
        if keyboard.pressed.contains(&Keycode::Escape) {
            break 'running;
        }

        camera.update(&UpdateContext::new(&keyboard, &mouse, delta_time));

        unsafe {
            app.gl
                .clear_color(background.x, background.y, background.z, background.w);
            app.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        shader.use_program();
        let frame = FrameParams {
            view: camera.view(),
            projection: camera.projection(width as f32 / height.max(1) as f32),
            view_position: camera.position,
        };
        composer.render(&mut shader, &mut shapes, &frame);

        app.window.gl_swap_window();
    }

    composer.release();
    Ok(())
}
