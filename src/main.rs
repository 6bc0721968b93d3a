use painterly::prelude::*;

use sdl2::keyboard::Scancode;
use simplelog::TermLogger;

const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;

const ROTATE_STEP: f32 = 0.01;
const MOVE_STEP: f32 = 0.1;

fn build_scene(width: u32, height: u32) -> Scene {
    let mut scene = Scene::new(SceneConfig {
        width,
        height,
        ..SceneConfig::default()
    });

    let mesh = match Mesh::load("meshes/cube.obj") {
        Ok(mesh) => mesh,
        Err(err) => {
            log::warn!("falling back to built-in cube: {err}");
            Mesh::cube()
        }
    };
    scene.add_mesh("cube", mesh.translate(0.0, 0.0, 40.0));

    scene.add_light(
        "key",
        Light::new(
            Vec4::point(0.0, 0.0, 0.0),
            Vec4::direction(0.0, 0.0, -1.0),
            0.6,
        ),
    );
    scene.add_light(
        "side",
        Light::new(
            Vec4::point(10.0, 0.0, 20.0),
            Vec4::direction(-1.0, 0.0, 0.0),
            0.3,
        ),
    );

    scene
}

/// Held-key camera controls: arrows rotate pitch/yaw, WASD strafes, one
/// fixed step per frame while held.
fn apply_input(window: &Window, scene: &mut Scene) {
    let keys = window.keyboard();

    if keys.is_scancode_pressed(Scancode::Up) {
        scene.rotate_camera_x(-ROTATE_STEP);
    } else if keys.is_scancode_pressed(Scancode::Down) {
        scene.rotate_camera_x(ROTATE_STEP);
    } else if keys.is_scancode_pressed(Scancode::Right) {
        scene.rotate_camera_y(ROTATE_STEP);
    } else if keys.is_scancode_pressed(Scancode::Left) {
        scene.rotate_camera_y(-ROTATE_STEP);
    }

    if keys.is_scancode_pressed(Scancode::W) {
        scene.move_camera(0.0, -MOVE_STEP, 0.0);
    } else if keys.is_scancode_pressed(Scancode::S) {
        scene.move_camera(0.0, MOVE_STEP, 0.0);
    } else if keys.is_scancode_pressed(Scancode::D) {
        scene.move_camera(-MOVE_STEP, 0.0, 0.0);
    } else if keys.is_scancode_pressed(Scancode::A) {
        scene.move_camera(MOVE_STEP, 0.0, 0.0);
    }
}

fn main() -> Result<(), String> {
    TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .map_err(|e| e.to_string())?;

    let mut window = Window::new("Painterly", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut renderer = Renderer::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut limiter = FrameLimiter::new(&window);
    let mut scene = build_scene(WINDOW_WIDTH, WINDOW_HEIGHT);

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => {
                window.resize(w, h)?;
                renderer.resize(w, h);
                scene = build_scene(w, h);
            }
            WindowEvent::None => {}
        }

        apply_input(&window, &mut scene);

        renderer.clear(painterly::colors::BACKGROUND);
        scene.draw(&mut renderer);
        window.present(renderer.as_bytes())?;

        limiter.wait_and_get_delta(&window);
    }

    Ok(())
}
