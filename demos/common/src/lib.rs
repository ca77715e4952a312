//! devgl demos.
//!
//! This crate provides a set of small OpenGL demos. The demos are platform-agnostic on purpose:
//! they only see the [`GL33`] backend and an abstract stream of [`InputAction`]s, so the platform
//! code that opens the window and reads the system events can be shared by all of them.
//!
//! # Demo architecture
//!
//! Each demo is a module exposing a `LocalExample` type implementing [`Example`]. Demos allocate
//! their GPU resources in [`Example::bootstrap`] and render one frame per call to
//! [`Example::render_frame`]. Input is not delivered through callbacks: the platform drains its
//! event queue once per frame and hands the resulting actions to the demo, which folds them into
//! its interaction state with pure state-transition functions before drawing.
//!
//! # Error handling
//!
//! Bootstrap failures (shader compilation or link errors, buffer allocation errors) are reported
//! through [`ExampleError`]; the platform code treats them as fatal.

use cgmath::Vector3;
use devgl_gl::gl33::{ProgramError, VertexArrayError};
use devgl_gl::GL33;
use std::{error, fmt};

pub mod keyboard_triangle;
pub mod rotating_triangle;
pub mod window;

/// Example interface.
pub trait Example: Sized {
  /// Title of the window the example runs in.
  const TITLE: &'static str;

  /// Size of the window the example runs in, in screen coordinates.
  const WINDOW_SIZE: [u32; 2];

  /// Bootstrap the example.
  fn bootstrap(gl: &mut GL33) -> Result<Self, ExampleError>;

  /// Render a frame of the example.
  ///
  /// `actions` holds every input action gathered since the previous frame.
  fn render_frame(
    self,
    actions: impl Iterator<Item = InputAction>,
    gl: &mut GL33,
  ) -> LoopFeedback<Self>;
}

/// A type used to pass “inputs” to examples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputAction {
  /// Quit the application.
  Quit,

  /// Up direction. Typically used to move something up.
  Up,

  /// Down direction. Typically used to move something down.
  Down,

  /// Left direction. Typically used to move something left.
  Left,

  /// Right direction. Typically used to move something right.
  Right,

  /// Pick one of the color presets.
  SelectColor(ColorPreset),

  /// Framebuffer size changed.
  Resized { width: u32, height: u32 },
}

/// Fixed colors an example can switch between.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ColorPreset {
  Red,
  Green,
  Blue,
}

impl ColorPreset {
  /// RGB components of the preset.
  pub fn rgb(self) -> Vector3<f32> {
    match self {
      ColorPreset::Red => Vector3::new(1., 0., 0.),
      ColorPreset::Green => Vector3::new(0., 1., 0.),
      ColorPreset::Blue => Vector3::new(0., 0., 1.),
    }
  }
}

/// What the platform should do after a frame.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum LoopFeedback<T> {
  /// Keep running with the stepped value.
  Continue(T),
  /// Leave the loop.
  Exit,
}

/// Errors an example can hit while bootstrapping.
#[non_exhaustive]
#[derive(Debug)]
pub enum ExampleError {
  /// The shader program could not be built.
  Program(ProgramError),
  /// The vertex data could not be uploaded.
  VertexArray(VertexArrayError),
}

impl fmt::Display for ExampleError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ExampleError::Program(ref e) => write!(f, "cannot build shader program: {}", e),
      ExampleError::VertexArray(ref e) => write!(f, "cannot upload vertices: {}", e),
    }
  }
}

impl error::Error for ExampleError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ExampleError::Program(e) => Some(e),
      ExampleError::VertexArray(e) => Some(e),
    }
  }
}

impl From<ProgramError> for ExampleError {
  fn from(e: ProgramError) -> Self {
    ExampleError::Program(e)
  }
}

impl From<VertexArrayError> for ExampleError {
  fn from(e: VertexArrayError) -> Self {
    ExampleError::VertexArray(e)
  }
}

// Adjust the viewport on resize; every example needs it.
fn handle_resize(gl: &mut GL33, action: &InputAction) {
  if let InputAction::Resized { width, height } = *action {
    gl.set_viewport(width, height);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use devgl_gl::gl33::{StageError, StageType};

  #[test]
  fn color_presets() {
    assert_eq!(ColorPreset::Red.rgb(), Vector3::new(1., 0., 0.));
    assert_eq!(ColorPreset::Green.rgb(), Vector3::new(0., 1., 0.));
    assert_eq!(ColorPreset::Blue.rgb(), Vector3::new(0., 0., 1.));
  }

  #[test]
  fn example_error_display() {
    let err = ExampleError::from(ProgramError::LinkFailed("no main".to_owned()));

    assert_eq!(
      err.to_string(),
      "cannot build shader program: shader program failed to link: no main"
    );
  }

  #[test]
  fn example_error_chains_to_stage_error() {
    use std::error::Error as _;

    let stage = StageError::CompilationFailed(StageType::VertexShader, "oops".to_owned());
    let err = ExampleError::from(ProgramError::from(stage));
    let program_err = err.source().expect("program error");

    assert!(program_err.source().is_some());
  }
}
