//! The smallest demo: open a window and clear it every frame.
//!
//! Press <escape> to quit or close the window.

use crate::{handle_resize, Example, ExampleError, InputAction, LoopFeedback};
use devgl_gl::GL33;

const CLEAR_COLOR: [f32; 4] = [0., 0., 0., 1.];

pub struct LocalExample;

impl Example for LocalExample {
  const TITLE: &'static str = "OpenGL Window";
  const WINDOW_SIZE: [u32; 2] = [640, 480];

  fn bootstrap(gl: &mut GL33) -> Result<Self, ExampleError> {
    gl.set_clear_color(CLEAR_COLOR);
    Ok(LocalExample)
  }

  fn render_frame(
    self,
    actions: impl Iterator<Item = InputAction>,
    gl: &mut GL33,
  ) -> LoopFeedback<Self> {
    for action in actions {
      if action == InputAction::Quit {
        return LoopFeedback::Exit;
      }

      handle_resize(gl, &action);
    }

    gl.clear();

    LoopFeedback::Continue(self)
  }
}
