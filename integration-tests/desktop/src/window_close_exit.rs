use colored::Colorize as _;
use devgl_demos::{Example, ExampleError, InputAction, LoopFeedback};
use devgl_gl::GL33;

const FRAMES: u32 = 3;

// Clears a few frames, then asks to close like a user pressing escape would.
struct CloseAfterFrames {
  frames: u32,
}

impl Example for CloseAfterFrames {
  const TITLE: &'static str = "Window close exit";
  const WINDOW_SIZE: [u32; 2] = [320, 240];

  fn bootstrap(gl: &mut GL33) -> Result<Self, ExampleError> {
    gl.set_clear_color([0.2, 0.2, 0.2, 1.]);
    Ok(CloseAfterFrames { frames: 0 })
  }

  fn render_frame(
    mut self,
    actions: impl Iterator<Item = InputAction>,
    gl: &mut GL33,
  ) -> LoopFeedback<Self> {
    if actions.into_iter().any(|action| action == InputAction::Quit) || self.frames == FRAMES {
      return LoopFeedback::Exit;
    }

    gl.clear();
    self.frames += 1;

    LoopFeedback::Continue(self)
  }
}

pub fn fixture() {
  match devgl_demos_desktop::run_example::<CloseAfterFrames>() {
    Ok(()) => println!("{}", "ok".green()),
    Err(e) => panic!("run failed: {}", e),
  }
}
