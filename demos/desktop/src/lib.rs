//! Desktop platform code for the devgl demos.
//!
//! Opens a GLFW surface, turns the window events into [`InputAction`]s once per frame and drives an
//! [`Example`] until it asks to exit or the window gets closed.

use devgl_demos::{ColorPreset, Example, ExampleError, InputAction, LoopFeedback};
use devgl_glfw::{GlfwSurface, GlfwSurfaceError, WindowOpt};
use glfw::{Action, Key, WindowEvent};
use std::{error, fmt, process};

/// Exit status of a run that could not get past initialization.
pub const INIT_FAILURE_STATUS: i32 = -1;

/// Errors that stop a demo before its render loop starts.
#[non_exhaustive]
#[derive(Debug)]
pub enum RunError {
  /// The window, its context or the GL functions could not be set up.
  Surface(GlfwSurfaceError),
  /// The example failed to allocate its GPU resources.
  Bootstrap(ExampleError),
}

impl fmt::Display for RunError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      RunError::Surface(ref e) => write!(f, "cannot create surface: {}", e),
      RunError::Bootstrap(ref e) => write!(f, "cannot bootstrap example: {}", e),
    }
  }
}

impl error::Error for RunError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      RunError::Surface(e) => Some(e),
      RunError::Bootstrap(e) => Some(e),
    }
  }
}

impl From<GlfwSurfaceError> for RunError {
  fn from(e: GlfwSurfaceError) -> Self {
    RunError::Surface(e)
  }
}

impl From<ExampleError> for RunError {
  fn from(e: ExampleError) -> Self {
    RunError::Bootstrap(e)
  }
}

/// Initialize the logger: `Info` by default, overridable with `RUST_LOG`.
pub fn init_logging() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .parse_default_env()
    .init();
}

/// Window options of an example.
pub fn window_opt<E>() -> WindowOpt
where
  E: Example,
{
  WindowOpt::default().set_dim(E::WINDOW_SIZE)
}

/// Run an example until it exits or its window gets closed.
pub fn run_example<E>() -> Result<(), RunError>
where
  E: Example,
{
  // First thing first: we create a new surface to render to and get events from.
  let surface = GlfwSurface::new_gl33(E::TITLE, window_opt::<E>())?;
  let mut context = surface.context;
  let events = surface.events_rx;

  let mut example = E::bootstrap(context.backend())?;
  log::info!("running {}", E::TITLE);

  // the first frame gets the initial framebuffer size so that examples can set their viewport
  let [width, height] = context.framebuffer_size();
  let mut initial = Some(InputAction::Resized { width, height });

  while !context.should_close() {
    let actions = initial
      .take()
      .into_iter()
      .chain(glfw::flush_messages(&events).filter_map(|(_, event)| adapt_events(event)));

    match example.render_frame(actions, context.backend()) {
      LoopFeedback::Continue(stepped) => example = stepped,
      LoopFeedback::Exit => {
        context.window.set_should_close(true);
        break;
      }
    }

    context.swap_buffers();
    context.window.glfw.poll_events();
  }

  log::info!("{} closed", E::TITLE);

  Ok(())
}

/// Exit status of a finished run: `0` on normal shutdown, [`INIT_FAILURE_STATUS`] otherwise.
pub fn exit_status(result: &Result<(), RunError>) -> i32 {
  match result {
    Ok(()) => 0,
    Err(_) => INIT_FAILURE_STATUS,
  }
}

/// Run an example and terminate the process with its exit status.
///
/// Initialization failures print a message and exit with [`INIT_FAILURE_STATUS`].
pub fn run_and_exit<E>() -> !
where
  E: Example,
{
  let result = run_example::<E>();

  if let Err(ref e) = result {
    println!("{}", e);
    log::error!("{}", e);
  }

  process::exit(exit_status(&result))
}

/// Map a window event to an input action.
///
/// Only key presses are mapped: holding a key down does not repeat its action.
pub fn adapt_events(event: WindowEvent) -> Option<InputAction> {
  match event {
    WindowEvent::Close => Some(InputAction::Quit),

    WindowEvent::Key(key, _, Action::Press, _) => {
      log::debug!("key press: {:?}", key);
      match key {
        Key::Escape => Some(InputAction::Quit),
        Key::Up => Some(InputAction::Up),
        Key::Down => Some(InputAction::Down),
        Key::Left => Some(InputAction::Left),
        Key::Right => Some(InputAction::Right),
        Key::R => Some(InputAction::SelectColor(ColorPreset::Red)),
        Key::G => Some(InputAction::SelectColor(ColorPreset::Green)),
        Key::B => Some(InputAction::SelectColor(ColorPreset::Blue)),
        _ => None,
      }
    }

    WindowEvent::FramebufferSize(width, height) => Some(InputAction::Resized {
      width: width.max(0) as _,
      height: height.max(0) as _,
    }),

    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use devgl_gl::gl33::{ProgramError, StageError, StageType};
  use glfw::Modifiers;

  fn press(key: Key) -> WindowEvent {
    WindowEvent::Key(key, 0, Action::Press, Modifiers::empty())
  }

  #[test]
  fn arrows_map_to_directions() {
    assert_eq!(adapt_events(press(Key::Up)), Some(InputAction::Up));
    assert_eq!(adapt_events(press(Key::Down)), Some(InputAction::Down));
    assert_eq!(adapt_events(press(Key::Left)), Some(InputAction::Left));
    assert_eq!(adapt_events(press(Key::Right)), Some(InputAction::Right));
  }

  #[test]
  fn letters_map_to_color_presets() {
    assert_eq!(
      adapt_events(press(Key::R)),
      Some(InputAction::SelectColor(ColorPreset::Red))
    );
    assert_eq!(
      adapt_events(press(Key::G)),
      Some(InputAction::SelectColor(ColorPreset::Green))
    );
    assert_eq!(
      adapt_events(press(Key::B)),
      Some(InputAction::SelectColor(ColorPreset::Blue))
    );
  }

  #[test]
  fn escape_and_close_quit() {
    assert_eq!(adapt_events(press(Key::Escape)), Some(InputAction::Quit));
    assert_eq!(adapt_events(WindowEvent::Close), Some(InputAction::Quit));
  }

  #[test]
  fn repeats_and_releases_are_ignored() {
    let repeat = WindowEvent::Key(Key::Up, 0, Action::Repeat, Modifiers::empty());
    let release = WindowEvent::Key(Key::Up, 0, Action::Release, Modifiers::empty());

    assert_eq!(adapt_events(repeat), None);
    assert_eq!(adapt_events(release), None);
  }

  #[test]
  fn modifiers_do_not_matter() {
    let shifted = WindowEvent::Key(Key::Up, 0, Action::Press, Modifiers::Shift);
    assert_eq!(adapt_events(shifted), Some(InputAction::Up));
  }

  #[test]
  fn unmapped_keys_are_ignored() {
    assert_eq!(adapt_events(press(Key::Space)), None);
    assert_eq!(adapt_events(press(Key::W)), None);
  }

  #[test]
  fn framebuffer_resize() {
    assert_eq!(
      adapt_events(WindowEvent::FramebufferSize(1280, 720)),
      Some(InputAction::Resized {
        width: 1280,
        height: 720
      })
    );
  }

  #[test]
  fn window_options_follow_example() {
    let opt = window_opt::<devgl_demos::keyboard_triangle::LocalExample>();

    assert_eq!(opt.dim(), [800, 600]);
  }

  #[test]
  fn normal_shutdown_exits_with_zero() {
    assert_eq!(exit_status(&Ok(())), 0);
  }

  #[test]
  fn surface_failure_exits_with_init_failure() {
    let result = Err(RunError::Surface(GlfwSurfaceError::WindowCreationFailed));
    assert_eq!(exit_status(&result), -1);
  }

  #[test]
  fn shader_failures_are_fatal() {
    let link = Err(RunError::Bootstrap(ExampleError::Program(
      ProgramError::LinkFailed("undefined reference to main".to_owned()),
    )));
    assert_eq!(exit_status(&link), -1);

    let compile = Err(RunError::from(ExampleError::from(ProgramError::StageError(
      StageError::CompilationFailed(StageType::VertexShader, "syntax error".to_owned()),
    ))));
    assert_eq!(exit_status(&compile), -1);
  }

  #[test]
  fn run_error_display() {
    let err = RunError::from(GlfwSurfaceError::WindowCreationFailed);
    assert_eq!(err.to_string(), "cannot create surface: failed to create window");
  }
}
