//! [GLFW](https://crates.io/crates/glfw) surface for the devgl demos.
//!
//! A surface bundles everything a demo needs before issuing its first draw call: an initialized
//! GLFW library, a window with a current OpenGL 3.3 core context, loaded GL function pointers and
//! the acquired [`GL33`] state, plus the receiver of the window events.

#![deny(missing_docs)]

mod window;

pub use window::WindowOpt;

pub use devgl_gl::gl33::StateQueryError;
use devgl_gl::GL33;
use glfw::{Context as _, InitError, SwapInterval, Window, WindowEvent, WindowMode};
use std::{error, fmt, os::raw::c_void, sync::mpsc::Receiver};

/// Error that can be risen while creating a surface.
#[non_exhaustive]
#[derive(Debug)]
pub enum GlfwSurfaceError {
  /// Initialization of the windowing library went wrong.
  ///
  /// This variant exposes a **glfw** error for further information about what went wrong.
  InitError(InitError),

  /// The window (and its context) could not be created.
  WindowCreationFailed,

  /// The GL function loader could not resolve a required function.
  LoaderError(&'static str),

  /// The graphics state is not available.
  ///
  /// This error is generated when the initialization code is called on a thread on which the
  /// graphics state has already been acquired.
  GraphicsStateError(StateQueryError),
}

impl fmt::Display for GlfwSurfaceError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      GlfwSurfaceError::InitError(ref e) => write!(f, "initialization error: {}", e),
      GlfwSurfaceError::WindowCreationFailed => f.write_str("failed to create window"),
      GlfwSurfaceError::LoaderError(name) => {
        write!(f, "failed to load OpenGL function {}", name)
      }
      GlfwSurfaceError::GraphicsStateError(ref e) => {
        write!(f, "failed to get graphics state: {}", e)
      }
    }
  }
}

impl From<InitError> for GlfwSurfaceError {
  fn from(e: InitError) -> Self {
    GlfwSurfaceError::InitError(e)
  }
}

impl From<StateQueryError> for GlfwSurfaceError {
  fn from(e: StateQueryError) -> Self {
    GlfwSurfaceError::GraphicsStateError(e)
  }
}

impl error::Error for GlfwSurfaceError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      GlfwSurfaceError::InitError(e) => Some(e),
      GlfwSurfaceError::GraphicsStateError(e) => Some(e),
      _ => None,
    }
  }
}

/// GLFW surface.
///
/// This type is a helper that exposes two important concepts: the GLFW event receiver that you can
/// use to poll events and the [`GL33Context`], which allows you to perform the rendering part.
#[derive(Debug)]
pub struct GlfwSurface {
  /// Wrapped GLFW events queue.
  pub events_rx: Receiver<(f64, WindowEvent)>,

  /// Wrapped OpenGL context.
  pub context: GL33Context,
}

impl GlfwSurface {
  /// Initialize GLFW, open a window with an OpenGL 3.3 core context and load the GL functions.
  pub fn new_gl33(title: &str, win_opt: WindowOpt) -> Result<Self, GlfwSurfaceError> {
    let mut glfw = glfw::init(glfw::LOG_ERRORS)?;

    // OpenGL hints
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
      glfw::OpenGlProfileHint::Core,
    ));
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
    glfw.window_hint(glfw::WindowHint::ContextVersionMajor(3));
    glfw.window_hint(glfw::WindowHint::ContextVersionMinor(3));

    let [width, height] = win_opt.dim();
    let (mut window, events_rx) = glfw
      .create_window(width, height, title, WindowMode::Windowed)
      .ok_or(GlfwSurfaceError::WindowCreationFailed)?;

    window.make_current();
    window.set_key_polling(true);
    window.set_framebuffer_size_polling(true);
    window.set_close_polling(true);
    glfw.set_swap_interval(SwapInterval::Sync(1));

    // init OpenGL
    gl::load_with(|s| window.get_proc_address(s) as *const c_void);
    check_loaded_functions()?;

    let gl = GL33::new()?;
    let context = GL33Context { window, gl };
    let surface = GlfwSurface { events_rx, context };

    log::debug!("OpenGL 3.3 surface ready: {}", title);

    Ok(surface)
  }
}

// Fail early if the driver does not expose the functions the demos rely on.
fn check_loaded_functions() -> Result<(), GlfwSurfaceError> {
  let required: [(&'static str, fn() -> bool); 6] = [
    ("glClear", gl::Clear::is_loaded),
    ("glCreateShader", gl::CreateShader::is_loaded),
    ("glCreateProgram", gl::CreateProgram::is_loaded),
    ("glGenBuffers", gl::GenBuffers::is_loaded),
    ("glGenVertexArrays", gl::GenVertexArrays::is_loaded),
    ("glDrawArrays", gl::DrawArrays::is_loaded),
  ];

  match required.iter().find(|(_, is_loaded)| !is_loaded()) {
    Some((name, _)) => Err(GlfwSurfaceError::LoaderError(*name)),
    None => Ok(()),
  }
}

/// OpenGL 3.3 context.
///
/// This type also re-exports the GLFW window, if you need access to it.
#[derive(Debug)]
pub struct GL33Context {
  /// Wrapped GLFW window.
  pub window: Window,

  /// OpenGL 3.3 state.
  gl: GL33,
}

impl GL33Context {
  /// Access the OpenGL backend.
  pub fn backend(&mut self) -> &mut GL33 {
    &mut self.gl
  }

  /// Size of the framebuffer, in pixels.
  pub fn framebuffer_size(&self) -> [u32; 2] {
    let (w, h) = self.window.get_framebuffer_size();
    [w.max(0) as u32, h.max(0) as u32]
  }

  /// Whether the window was asked to close.
  pub fn should_close(&self) -> bool {
    self.window.should_close()
  }

  /// Swap the back and front buffers.
  pub fn swap_buffers(&mut self) {
    self.window.swap_buffers();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn surface_error_display() {
    assert_eq!(
      GlfwSurfaceError::WindowCreationFailed.to_string(),
      "failed to create window"
    );
    assert_eq!(
      GlfwSurfaceError::LoaderError("glClear").to_string(),
      "failed to load OpenGL function glClear"
    );
    assert_eq!(
      GlfwSurfaceError::from(StateQueryError::UnavailableGLState).to_string(),
      "failed to get graphics state: unavailable graphics state"
    );
  }

  #[test]
  fn surface_error_source() {
    use std::error::Error as _;

    assert!(GlfwSurfaceError::WindowCreationFailed.source().is_none());
    assert!(GlfwSurfaceError::GraphicsStateError(StateQueryError::UnavailableGLState)
      .source()
      .is_some());
  }
}
